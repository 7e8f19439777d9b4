use super::{Error, lookup, protocol};
use crate::commands::common::IobeamConfig;

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[clap(flatten)]
    iobeam_config: IobeamConfig,

    /// ID of the trigger containing the action (either this or
    /// --trigger-name must be set)
    #[clap(long = "trigger-id", default_value_t = 0)]
    trigger_id: u64,

    /// Name of the trigger containing the action
    #[clap(long = "trigger-name")]
    trigger_name: Option<String>,

    /// Number of the action to remove, as shown by `iobeam trigger get`
    #[clap(long = "num", alias = "index")]
    index: usize,
}

pub(super) async fn command(config: Config) -> Result<(), Error> {
    let lookup = lookup(config.trigger_id, config.trigger_name.as_deref())?;
    let client = config.iobeam_config.client()?;
    let removed = protocol::remove_action(
        &client,
        config.iobeam_config.project_id,
        &lookup,
        config.index,
    )
    .await?;
    match removed {
        Some(_) => println!("Action successfully removed from trigger."),
        None => println!(
            "Trigger has no action number {}, nothing was removed.",
            config.index
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn index_is_required() {
        let err = Config::try_parse_from(["remove-action", "--trigger-id", "7"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let config =
            Config::try_parse_from(["remove-action", "--trigger-id", "7", "--index", "2"]).unwrap();
        assert_eq!(config.index, 2);
        assert_eq!(config.trigger_id, 7);
    }
}
