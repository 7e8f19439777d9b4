use assert_cmd::Command as AssertCmd;
use mockito::Matcher;
use serde_json::json;

fn iobeam() -> AssertCmd {
    let mut cmd = AssertCmd::cargo_bin("iobeam").unwrap();
    for var in [
        "IOBEAM_HOST_URL",
        "IOBEAM_PROJECT_ID",
        "IOBEAM_PROJECT_TOKEN",
        "IOBEAM_TIMEOUT",
        "LOG_FILTER",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn stored_trigger(actions: usize) -> serde_json::Value {
    let actions: Vec<_> = (1..=actions)
        .map(|i| {
            json!({
                "type": "http",
                "min_delay": 0,
                "args": {
                    "url": format!("http://{i}"),
                    "payload": "",
                    "auth_header": "",
                    "content_type": "text/plain",
                }
            })
        })
        .collect();
    json!({
        "trigger_id": 7,
        "project_id": 1,
        "namespace": "input",
        "trigger_name": "t1",
        "fire_when": "{{temp}}>25",
        "actions": actions,
    })
}

#[test]
fn create_help_lists_every_action_kind() {
    let output = iobeam()
        .args(["trigger", "create", "--help"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&output);
    for about in [
        "Create a new trigger with an email action.",
        "Create a new trigger with an HTTP action.",
        "Create a new trigger with an MQTT action.",
        "Create a new trigger with an Twilio SMS action.",
    ] {
        assert!(stdout.contains(about), "missing {about:?} in:\n{stdout}");
    }
}

#[test]
fn add_action_help_lists_every_action_kind() {
    let output = iobeam()
        .args(["trigger", "add-action", "--help"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&output);
    for kind in ["email", "http", "mqtt", "sms"] {
        assert!(stdout.contains(kind), "missing {kind:?} in:\n{stdout}");
    }
    assert!(stdout.contains("Add new MQTT action to a trigger."), "{stdout}");
}

#[test]
fn invalid_create_fails_before_any_request() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/v1/triggers").expect(0).create();

    let output = iobeam()
        .args([
            "trigger",
            "create",
            "http",
            "--host",
            &server.url(),
            "--project-id",
            "1",
            "--token",
            "secret",
            "--name",
            "t1",
            "--url",
            "http://x",
        ])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();

    mock.assert();
    let stderr = String::from_utf8_lossy(&output);
    assert!(stderr.contains("Trigger command failed"), "{stderr}");
    assert!(stderr.contains("invalid arguments"), "{stderr}");
}

#[test]
fn create_reports_assigned_id() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/triggers")
        .match_header("Authorization", "Bearer secret")
        .match_body(Matcher::PartialJson(json!({
            "project_id": 1,
            "trigger_name": "t1",
            "fire_when": "{{temp}}>25",
        })))
        .with_status(201)
        .with_body(
            json!({
                "trigger_id": 42,
                "project_id": 1,
                "trigger_name": "t1",
                "fire_when": "{{temp}}>25",
            })
            .to_string(),
        )
        .create();

    let output = iobeam()
        .args([
            "trigger",
            "create",
            "http",
            "--host",
            &server.url(),
            "--project-id",
            "1",
            "--token",
            "secret",
            "--name",
            "t1",
            "--fire-when",
            "{{temp}}>25",
            "--url",
            "http://x",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    mock.assert();
    assert_eq!(
        String::from_utf8_lossy(&output).trim(),
        "Trigger 't1' created with ID: 42"
    );
}

#[test]
fn remove_action_rejects_index_past_the_end() {
    let mut server = mockito::Server::new();
    let get = server
        .mock("GET", "/v1/triggers/7")
        .with_status(200)
        .with_body(stored_trigger(3).to_string())
        .create();
    let put = server.mock("PUT", "/v1/triggers/7").expect(0).create();

    let output = iobeam()
        .args([
            "trigger",
            "remove-action",
            "--host",
            &server.url(),
            "--project-id",
            "1",
            "--token",
            "secret",
            "--trigger-id",
            "7",
            "--num",
            "5",
        ])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    get.assert();
    put.assert();
    let stderr = String::from_utf8_lossy(&output);
    assert!(
        stderr.contains("invalid action index: 5 (only 3 actions)"),
        "{stderr}"
    );
}

#[test]
fn remove_action_one_past_the_end_reports_nothing_removed() {
    let mut server = mockito::Server::new();
    let get = server
        .mock("GET", "/v1/triggers/7")
        .with_status(200)
        .with_body(stored_trigger(3).to_string())
        .create();
    let put = server
        .mock("PUT", "/v1/triggers/7")
        .with_status(200)
        .expect(1)
        .create();

    let output = iobeam()
        .args([
            "trigger",
            "remove-action",
            "--host",
            &server.url(),
            "--project-id",
            "1",
            "--token",
            "secret",
            "--trigger-id",
            "7",
            "--num",
            "4",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    get.assert();
    put.assert();
    let stdout = String::from_utf8_lossy(&output);
    assert!(
        stdout.contains("Trigger has no action number 4, nothing was removed."),
        "{stdout}"
    );
    assert!(!stdout.contains("successfully removed"), "{stdout}");
}

#[test]
fn get_prints_numbered_actions() {
    let mut server = mockito::Server::new();
    let get = server
        .mock("GET", "/v1/triggers")
        .match_query(Matcher::UrlEncoded("name".into(), "t1".into()))
        .with_status(200)
        .with_body(stored_trigger(2).to_string())
        .create();

    let output = iobeam()
        .args([
            "trigger",
            "get",
            "--host",
            &server.url(),
            "--project-id",
            "1",
            "--token",
            "secret",
            "--name",
            "t1",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    get.assert();
    let stdout = String::from_utf8_lossy(&output);
    assert!(stdout.contains("Trigger ID   : 7"), "{stdout}");
    assert!(stdout.contains("  1) Action type: http"), "{stdout}");
    assert!(stdout.contains("  2) Action type: http"), "{stdout}");
}

#[test]
fn missing_token_is_reported() {
    let output = iobeam()
        .args(["trigger", "list", "--host", "http://127.0.0.1:1", "--project-id", "3"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&output);
    assert!(
        stderr.contains("no project token available for project 3"),
        "{stderr}"
    );
}
