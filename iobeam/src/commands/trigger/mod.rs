//! `iobeam trigger`: manage triggers and their actions
//!
//! `create` and `add-action` take the kind of action as a further subcommand,
//! one per entry of the [`ActionRegistry`]; the remaining verbs address an
//! existing trigger by id or name.

use std::fmt;

use iobeam_types::{ActionRegistry, ActionVerb, InvalidActionIndex, Trigger, TriggerLookup};

pub mod add_action;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod protocol;
pub mod remove_action;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Client(#[from] iobeam_client::Error),

    #[error("invalid arguments: {0}")]
    Validation(String),

    #[error(transparent)]
    InvalidActionIndex(#[from] InvalidActionIndex),
}

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[clap(subcommand)]
    command: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
enum SubCommand {
    /// Create a new trigger with an action
    Create(create::Config),

    /// Add an action to an existing trigger
    AddAction(add_action::Config),

    /// Remove an action from a trigger
    RemoveAction(remove_action::Config),

    /// Get the trigger matching a name or id
    Get(get::Config),

    /// Delete the trigger matching a name or id
    Delete(delete::Config),

    /// List all triggers of a project
    List(list::Config),
}

pub async fn command(config: Config) -> Result<(), Error> {
    let registry = ActionRegistry::builtin();
    match config.command {
        SubCommand::Create(config) => create::command(config, &registry).await,
        SubCommand::AddAction(config) => add_action::command(config, &registry).await,
        SubCommand::RemoveAction(config) => remove_action::command(config).await,
        SubCommand::Get(config) => get::command(config, &registry).await,
        SubCommand::Delete(config) => delete::command(config).await,
        SubCommand::List(config) => list::command(config, &registry).await,
    }
}

/// `trigger create <kind>`
#[derive(Debug, Clone, Copy)]
pub struct CreateVerb;

impl ActionVerb for CreateVerb {
    fn about(label: &str) -> String {
        format!("Create a new trigger with an {label} action.")
    }
}

/// `trigger add-action <kind>`
#[derive(Debug, Clone, Copy)]
pub struct AddActionVerb;

impl ActionVerb for AddActionVerb {
    fn about(label: &str) -> String {
        format!("Add new {label} action to a trigger.")
    }
}

/// Resolve the trigger a command addresses from its id and name flags
fn lookup(trigger_id: u64, trigger_name: Option<&str>) -> Result<TriggerLookup, Error> {
    TriggerLookup::from_parts(trigger_id, trigger_name)
        .ok_or_else(|| Error::Validation("either a trigger id or a trigger name is required".into()))
}

/// Human readable rendering of a trigger, actions numbered from 1
#[derive(Debug, Clone, Copy)]
pub struct TriggerDisplay<'a> {
    trigger: &'a Trigger,
    registry: &'a ActionRegistry,
}

impl<'a> TriggerDisplay<'a> {
    pub fn new(trigger: &'a Trigger, registry: &'a ActionRegistry) -> Self {
        Self { trigger, registry }
    }
}

impl fmt::Display for TriggerDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.trigger;
        writeln!(f, "Trigger ID   : {}", t.trigger_id)?;
        writeln!(f, "Trigger name : {}", t.trigger_name)?;
        writeln!(f, "Project ID   : {}", t.project_id)?;
        writeln!(f, "Data expiry  : {}", t.data_expiry)?;
        writeln!(f, "Namespace    : {}", t.namespace)?;
        writeln!(f, "Fire when    : {}", t.fire_when)?;
        if let Some(release_when) = &t.release_when {
            writeln!(f, "Release when : {release_when}")?;
        }
        writeln!(f, "Actions:")?;
        for (i, entry) in t.actions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let kind = self.registry.kind_of(&entry.action).map_err(|_| fmt::Error)?;
            let args = entry.action.to_args_json().map_err(|_| fmt::Error)?;
            writeln!(f, "  {}) Action type: {kind}", i + 1)?;
            writeln!(f, "     Min delay  : {}", entry.min_delay)?;
            writeln!(f, "     Args: {args}")?;
        }
        Ok(())
    }
}
