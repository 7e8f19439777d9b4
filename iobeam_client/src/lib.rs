use std::{collections::HashMap, time::Duration};

use bytes::Bytes;
use iobeam_types::{Trigger, TriggerList, TriggerLookup};
use observability_deps::tracing::debug;
use reqwest::{IntoUrl, Method, StatusCode, header::CONTENT_TYPE};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use url::Url;

const TRIGGERS_PATH: &str = "/v1/triggers";

/// Primary error type for the [`Client`]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("base URL error: {0}")]
    BaseUrl(#[source] reqwest::Error),

    #[error("failed to build the HTTP client: {0}")]
    Builder(#[source] reqwest::Error),

    #[error("request URL error: {0}")]
    RequestUrl(#[from] url::ParseError),

    #[error("no project token available for project {project_id}")]
    MissingProjectToken { project_id: u64 },

    #[error("failed to serialize the request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to read the API response bytes: {0}")]
    Bytes(#[source] reqwest::Error),

    #[error("failed to parse JSON response: {0}")]
    Json(#[source] serde_json::Error),

    #[error("server responded with error [{code}]: {message}")]
    ApiError { code: StatusCode, message: String },

    #[error("failed to build {method} {url} request: {source}")]
    RequestBuild {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to send {method} {url} request: {source}")]
    RequestSend {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    fn request_send(method: Method, url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::RequestSend {
            method,
            url: url.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The iobeam API client
///
/// For programmatic access to the trigger endpoints of the iobeam HTTP API.
/// Every request is scoped to a project and authorized with that project's
/// token, see [`Client::with_project_token`].
#[derive(Debug, Clone)]
pub struct Client {
    /// The base URL for making requests to the iobeam API
    base_url: Url,
    /// `Bearer` tokens keyed by the project they grant access to
    project_tokens: HashMap<u64, Secret<String>>,
    /// Echo each request to stdout before it is sent
    dump_request: bool,
    /// Echo each response to stdout when it is received
    dump_response: bool,
    /// A [`reqwest::Client`] for handling HTTP requests
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new [`Client`]
    ///
    /// Without a `timeout` requests wait for as long as the transport allows.
    pub fn new<U: IntoUrl>(base_url: U, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.into_url().map_err(Error::BaseUrl)?,
            project_tokens: HashMap::new(),
            dump_request: false,
            dump_response: false,
            http_client: builder.build().map_err(Error::Builder)?,
        })
    }

    /// Set the `Bearer` token sent with requests for `project_id`
    ///
    /// # Example
    /// ```
    /// # use iobeam_client::Client;
    /// # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    /// let client = Client::new("http://localhost:8080", None)?
    ///     .with_project_token(1, "secret-token-string");
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_project_token<S: Into<String>>(mut self, project_id: u64, token: S) -> Self {
        self.project_tokens
            .insert(project_id, Secret::new(token.into()));
        self
    }

    /// Print every request to stdout before sending it
    pub fn with_dump_request(mut self, dump: bool) -> Self {
        self.dump_request = dump;
        self
    }

    /// Print every response to stdout when it arrives
    pub fn with_dump_response(mut self, dump: bool) -> Self {
        self.dump_response = dump;
        self
    }

    /// Make a request to the `POST /v1/triggers` API
    ///
    /// Returns the trigger as created by the server, including its assigned id.
    ///
    /// # Example
    /// ```no_run
    /// # use iobeam_client::Client;
    /// # use iobeam_types::{ActionEntry, HttpAction, Trigger};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    /// let client = Client::new("http://localhost:8080", None)?.with_project_token(1, "token");
    /// let action = HttpAction {
    ///     url: "http://example.com/hook".into(),
    ///     content_type: "text/plain".into(),
    ///     ..Default::default()
    /// };
    /// let created = client
    ///     .api_v1_triggers_create(
    ///         &Trigger::new(1, "too_hot", "{{temp}} > 25").with_action(ActionEntry::new(action, 0)),
    ///     )
    ///     .await?;
    /// println!("created trigger {}", created.trigger_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn api_v1_triggers_create(&self, trigger: &Trigger) -> Result<Trigger> {
        let content = self
            .send_json(
                Method::POST,
                TRIGGERS_PATH,
                trigger.project_id,
                &[],
                Some(trigger),
                StatusCode::CREATED,
            )
            .await?;
        serde_json::from_slice(&content).map_err(Error::Json)
    }

    /// Make a request to the `GET /v1/triggers` API
    pub async fn api_v1_triggers_list(&self, project_id: u64) -> Result<Vec<Trigger>> {
        let content = self
            .send_json(
                Method::GET,
                TRIGGERS_PATH,
                project_id,
                &[],
                None::<&()>,
                StatusCode::OK,
            )
            .await?;
        let list: TriggerList = serde_json::from_slice(&content).map_err(Error::Json)?;
        Ok(list.triggers)
    }

    /// Make a request to the `GET /v1/triggers/{id}` API, or to
    /// `GET /v1/triggers?name={name}` when looking the trigger up by name
    pub async fn api_v1_triggers_get(
        &self,
        project_id: u64,
        lookup: &TriggerLookup,
    ) -> Result<Trigger> {
        let (api_path, query) = resource(lookup);
        let content = self
            .send_json(
                Method::GET,
                &api_path,
                project_id,
                &query,
                None::<&()>,
                StatusCode::OK,
            )
            .await?;
        serde_json::from_slice(&content).map_err(Error::Json)
    }

    /// Make a request to the `DELETE /v1/triggers/{id}` API, or to
    /// `DELETE /v1/triggers?name={name}` when deleting by name
    pub async fn api_v1_triggers_delete(
        &self,
        project_id: u64,
        lookup: &TriggerLookup,
    ) -> Result<()> {
        let (api_path, query) = resource(lookup);
        self.send_json(
            Method::DELETE,
            &api_path,
            project_id,
            &query,
            None::<&()>,
            StatusCode::NO_CONTENT,
        )
        .await?;
        Ok(())
    }

    /// Make a request to the `PUT /v1/triggers/{id}` API
    ///
    /// This overwrites the whole trigger, including its list of actions.
    pub async fn api_v1_triggers_replace(&self, trigger: &Trigger) -> Result<()> {
        let api_path = trigger_path(trigger.trigger_id);
        self.send_json(
            Method::PUT,
            &api_path,
            trigger.project_id,
            &[],
            Some(trigger),
            StatusCode::OK,
        )
        .await?;
        Ok(())
    }

    fn project_token(&self, project_id: u64) -> Result<&Secret<String>> {
        self.project_tokens
            .get(&project_id)
            .ok_or(Error::MissingProjectToken { project_id })
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        api_path: &str,
        project_id: u64,
        query: &[(&str, &str)],
        body: Option<&B>,
        expect: StatusCode,
    ) -> Result<Bytes> {
        let url = self.base_url.join(api_path)?;
        let token = self.project_token(project_id)?;
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(Error::Serialize)?;

        let mut req = self
            .http_client
            .request(method.clone(), url)
            .bearer_auth(token.expose_secret());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = &body {
            req = req
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }
        let req = req.build().map_err(|source| Error::RequestBuild {
            method: method.clone(),
            url: api_path.to_owned(),
            source,
        })?;

        debug!(%method, url = %req.url(), project_id, "sending request");
        if self.dump_request {
            println!("--> {method} {}", req.url());
            if let Some(body) = &body {
                println!("{}", pretty_json(body));
            }
        }

        let resp = self
            .http_client
            .execute(req)
            .await
            .map_err(|src| Error::request_send(method.clone(), api_path, src))?;
        let status = resp.status();
        let content = resp.bytes().await.map_err(Error::Bytes)?;

        debug!(%status, bytes = content.len(), "received response");
        if self.dump_response {
            println!("<-- {status}");
            if !content.is_empty() {
                println!("{}", pretty_json(&content));
            }
        }

        if status == expect {
            Ok(content)
        } else {
            Err(Error::ApiError {
                code: status,
                message: String::from_utf8_lossy(&content).into_owned(),
            })
        }
    }
}

fn trigger_path(trigger_id: u64) -> String {
    format!("{TRIGGERS_PATH}/{trigger_id}")
}

/// Path and query parameters addressing the trigger found by `lookup`
fn resource(lookup: &TriggerLookup) -> (String, Vec<(&'static str, &str)>) {
    match lookup {
        TriggerLookup::Id(id) => (trigger_path(*id), vec![]),
        TriggerLookup::Name(name) => (TRIGGERS_PATH.to_string(), vec![("name", name.as_str())]),
    }
}

fn pretty_json(bytes: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}
