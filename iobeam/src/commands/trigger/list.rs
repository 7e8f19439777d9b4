use iobeam_types::ActionRegistry;

use super::{Error, TriggerDisplay, protocol};
use crate::commands::common::IobeamConfig;

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[clap(flatten)]
    iobeam_config: IobeamConfig,
}

pub(super) async fn command(config: Config, registry: &ActionRegistry) -> Result<(), Error> {
    let client = config.iobeam_config.client()?;
    for trigger in protocol::list(&client, config.iobeam_config.project_id).await? {
        println!("{}", TriggerDisplay::new(&trigger, registry));
    }
    Ok(())
}
