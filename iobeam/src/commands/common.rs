use iobeam_client::Client;
use secrecy::{ExposeSecret, Secret};
use url::Url;

/// Connection settings shared by every command talking to the iobeam API
///
/// All of these are global so they may be given before or after an action
/// kind subcommand.
#[derive(Debug, clap::Parser)]
pub struct IobeamConfig {
    /// The base URL of the iobeam API
    #[clap(
        long = "host",
        env = "IOBEAM_HOST_URL",
        default_value = "https://api.iobeam.com",
        global = true
    )]
    pub host_url: Url,

    /// The project to operate on
    #[clap(
        long = "project-id",
        env = "IOBEAM_PROJECT_ID",
        default_value_t = 0,
        global = true
    )]
    pub project_id: u64,

    /// The project token used to authorize requests for the project
    #[clap(long = "token", env = "IOBEAM_PROJECT_TOKEN", global = true)]
    pub project_token: Option<Secret<String>>,

    /// How long to wait for the API to respond, e.g. "30s" or "2m"
    #[clap(
        long = "timeout",
        env = "IOBEAM_TIMEOUT",
        default_value = "30s",
        global = true
    )]
    pub timeout: humantime::Duration,

    /// Dump each request to stdout
    #[clap(long = "dump-request", global = true)]
    pub dump_request: bool,

    /// Dump each response to stdout
    #[clap(long = "dump-response", global = true)]
    pub dump_response: bool,
}

impl IobeamConfig {
    /// Build an API client authorized for the configured project
    pub fn client(&self) -> Result<Client, iobeam_client::Error> {
        let mut client = Client::new(self.host_url.clone(), Some(*self.timeout))?
            .with_dump_request(self.dump_request)
            .with_dump_response(self.dump_response);
        if let Some(token) = &self.project_token {
            client = client.with_project_token(self.project_id, token.expose_secret());
        }
        Ok(client)
    }
}
