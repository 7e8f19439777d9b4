use iobeam_types::{ActionEntry, ActionRegistry, ActionSelection};

use super::{AddActionVerb, Error, lookup, protocol};
use crate::commands::common::IobeamConfig;

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[clap(flatten)]
    iobeam_config: IobeamConfig,

    /// ID of the trigger to add the action to (either this or --trigger-name
    /// must be set)
    #[clap(long = "trigger-id", default_value_t = 0, global = true)]
    trigger_id: u64,

    /// Name of the trigger to add the action to
    #[clap(long = "trigger-name", global = true)]
    trigger_name: Option<String>,

    /// Minimum time (in milliseconds) between successive firings of the action
    #[clap(long = "min-delay", default_value_t = 0, global = true)]
    min_delay: u64,

    #[clap(subcommand)]
    action: ActionSelection<AddActionVerb>,
}

pub(super) async fn command(config: Config, registry: &ActionRegistry) -> Result<(), Error> {
    let lookup = lookup(config.trigger_id, config.trigger_name.as_deref())?;
    let entry = ActionEntry::new(config.action.into_action(), config.min_delay);
    let client = config.iobeam_config.client()?;
    protocol::add_action(
        &client,
        registry,
        config.iobeam_config.project_id,
        &lookup,
        entry,
    )
    .await?;
    println!("Action successfully added to trigger.");
    Ok(())
}
