use super::{Error, lookup, protocol};
use crate::commands::common::IobeamConfig;

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[clap(flatten)]
    iobeam_config: IobeamConfig,

    /// Trigger ID to delete (either this or --name must be set)
    #[clap(long = "id", default_value_t = 0)]
    trigger_id: u64,

    /// Trigger name to delete, ignored when --id is set
    #[clap(long = "name")]
    trigger_name: Option<String>,
}

pub(super) async fn command(config: Config) -> Result<(), Error> {
    let lookup = lookup(config.trigger_id, config.trigger_name.as_deref())?;
    let client = config.iobeam_config.client()?;
    protocol::delete(&client, config.iobeam_config.project_id, &lookup).await?;
    println!("Trigger successfully deleted");
    Ok(())
}
