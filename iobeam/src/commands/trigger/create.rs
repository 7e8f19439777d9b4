use iobeam_types::{ActionEntry, ActionRegistry, ActionSelection, DEFAULT_NAMESPACE, Trigger};

use super::{CreateVerb, Error, protocol};
use crate::commands::common::IobeamConfig;

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[clap(flatten)]
    iobeam_config: IobeamConfig,

    /// Name of the new trigger
    #[clap(long = "name", default_value_t, global = true)]
    trigger_name: String,

    /// Namespace the trigger reads from
    #[clap(long = "namespace", default_value = DEFAULT_NAMESPACE, global = true)]
    namespace: String,

    /// Time (in milliseconds) after which data is considered too old to fire
    /// the trigger (0 = never too old)
    #[clap(long = "data-expiry", default_value_t = 0, global = true)]
    data_expiry: u64,

    /// Condition when the trigger is fired, e.g. "{{ temp }} > 25.0"
    #[clap(long = "fire-when", default_value_t, global = true)]
    fire_when: String,

    /// Optional condition when the trigger is released, e.g. "{{ temp }} < 22.0"
    #[clap(long = "release-when", global = true)]
    release_when: Option<String>,

    /// Minimum time (in milliseconds) between successive firings of the action
    #[clap(long = "min-delay", default_value_t = 0, global = true)]
    min_delay: u64,

    #[clap(subcommand)]
    action: ActionSelection<CreateVerb>,
}

impl Config {
    fn trigger(&self) -> Trigger {
        Trigger::new(
            self.iobeam_config.project_id,
            &self.trigger_name,
            &self.fire_when,
        )
        .with_namespace(&self.namespace)
        .with_data_expiry(self.data_expiry)
        .with_release_when(self.release_when.clone())
        .with_action(ActionEntry::new(self.action.action().clone(), self.min_delay))
    }
}

pub(super) async fn command(config: Config, registry: &ActionRegistry) -> Result<(), Error> {
    let trigger = config.trigger();
    let client = config.iobeam_config.client()?;
    let created = protocol::create(&client, registry, &trigger).await?;
    println!(
        "Trigger '{}' created with ID: {}",
        created.trigger_name, created.trigger_id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use iobeam_types::{Action, EmailAction, HttpAction, MqttAction};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_http_create() {
        let config = Config::try_parse_from([
            "create",
            "http",
            "--project-id",
            "1",
            "--name",
            "t1",
            "--fire-when",
            "{{temp}}>25",
            "--url",
            "http://x",
        ])
        .unwrap();

        let trigger = config.trigger();
        assert_eq!(trigger.project_id, 1);
        assert_eq!(trigger.trigger_name, "t1");
        assert_eq!(trigger.namespace, "input");
        assert_eq!(trigger.release_when, None);
        assert_eq!(
            trigger.actions,
            vec![ActionEntry::new(
                HttpAction {
                    url: "http://x".into(),
                    content_type: "text/plain".into(),
                    ..Default::default()
                },
                0
            )]
        );
        assert!(trigger.is_valid());
    }

    #[test]
    fn trigger_flags_before_kind() {
        let config = Config::try_parse_from([
            "create",
            "--name",
            "t1",
            "--min-delay",
            "250",
            "--release-when",
            "{{temp}}<22",
            "mqtt",
            "--broker",
            "tcp://b:1883",
            "--topic",
            "alerts",
            "--payload",
            "hot",
            "--qos",
            "2",
        ])
        .unwrap();

        let trigger = config.trigger();
        assert_eq!(trigger.trigger_name, "t1");
        assert_eq!(trigger.release_when.as_deref(), Some("{{temp}}<22"));
        assert_eq!(trigger.actions[0].min_delay, 250);
        assert_eq!(
            trigger.actions[0].action,
            Action::Mqtt(MqttAction {
                broker: "tcp://b:1883".into(),
                qos: 2,
                topic: "alerts".into(),
                payload: "hot".into(),
                ..Default::default()
            })
        );
    }

    #[test]
    fn repeated_email_recipients() {
        let config = Config::try_parse_from([
            "create", "email", "--to", "a@b.c", "--to", "d@e.f", "--payload", "hot",
        ])
        .unwrap();
        assert_eq!(
            config.action.action(),
            &Action::Email(EmailAction {
                to: vec!["a@b.c".into(), "d@e.f".into()],
                subject: String::new(),
                payload: "hot".into(),
            })
        );
    }

    #[test]
    fn kind_is_required() {
        let err = Config::try_parse_from(["create", "--name", "t1"]).unwrap_err();
        assert!(
            matches!(
                err.kind(),
                clap::error::ErrorKind::MissingSubcommand
                    | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ),
            "{err}"
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Config::try_parse_from(["create", "fax"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn qos_out_of_range() {
        let err = Config::try_parse_from(["create", "mqtt", "--qos", "3"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
