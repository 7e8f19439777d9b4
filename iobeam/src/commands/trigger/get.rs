use iobeam_types::ActionRegistry;

use super::{Error, TriggerDisplay, lookup, protocol};
use crate::commands::common::IobeamConfig;

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[clap(flatten)]
    iobeam_config: IobeamConfig,

    /// Trigger ID to get (either this or --name must be set)
    #[clap(long = "id", default_value_t = 0)]
    trigger_id: u64,

    /// Trigger name to get, ignored when --id is set
    #[clap(long = "name")]
    trigger_name: Option<String>,
}

pub(super) async fn command(config: Config, registry: &ActionRegistry) -> Result<(), Error> {
    let lookup = lookup(config.trigger_id, config.trigger_name.as_deref())?;
    let client = config.iobeam_config.client()?;
    let trigger = protocol::get(&client, config.iobeam_config.project_id, &lookup).await?;
    println!("{}", TriggerDisplay::new(&trigger, registry));
    Ok(())
}
