//! Request sequences behind the trigger commands.
//!
//! Every operation validates its input before the first request is made.
//! `add_action` and `remove_action` fetch the trigger, change its action list
//! in memory and write the whole trigger back. Nothing guards the gap between
//! the two requests: a change made by someone else in between is overwritten.

use iobeam_client::Client;
use iobeam_types::{ActionEntry, ActionRegistry, Trigger, TriggerLookup};
use observability_deps::tracing::info;

use super::Error;

fn require_project(project_id: u64) -> Result<(), Error> {
    if project_id == 0 {
        return Err(Error::Validation("a project id is required".into()));
    }
    Ok(())
}

fn require_valid_action(registry: &ActionRegistry, entry: &ActionEntry) -> Result<(), Error> {
    if !entry.is_valid() {
        let kind = registry.kind_of(&entry.action).unwrap_or("unknown");
        return Err(Error::Validation(format!(
            "the {kind} action is missing required fields"
        )));
    }
    Ok(())
}

/// Submit a new trigger, returning it as created by the server
pub async fn create(
    client: &Client,
    registry: &ActionRegistry,
    trigger: &Trigger,
) -> Result<Trigger, Error> {
    if !trigger.is_valid() {
        return Err(Error::Validation(
            "a project id, trigger name and fire condition are required".into(),
        ));
    }
    trigger
        .actions
        .iter()
        .try_for_each(|entry| require_valid_action(registry, entry))?;

    let created = client.api_v1_triggers_create(trigger).await?;
    info!(
        trigger_id = created.trigger_id,
        trigger_name = %created.trigger_name,
        "created trigger"
    );
    Ok(created)
}

pub async fn get(client: &Client, project_id: u64, lookup: &TriggerLookup) -> Result<Trigger, Error> {
    require_project(project_id)?;
    Ok(client.api_v1_triggers_get(project_id, lookup).await?)
}

pub async fn list(client: &Client, project_id: u64) -> Result<Vec<Trigger>, Error> {
    require_project(project_id)?;
    Ok(client.api_v1_triggers_list(project_id).await?)
}

pub async fn delete(client: &Client, project_id: u64, lookup: &TriggerLookup) -> Result<(), Error> {
    require_project(project_id)?;
    client.api_v1_triggers_delete(project_id, lookup).await?;
    info!(%lookup, "deleted trigger");
    Ok(())
}

/// Append `entry` to the end of the trigger's actions
///
/// Returns the trigger as written back.
pub async fn add_action(
    client: &Client,
    registry: &ActionRegistry,
    project_id: u64,
    lookup: &TriggerLookup,
    entry: ActionEntry,
) -> Result<Trigger, Error> {
    require_project(project_id)?;
    require_valid_action(registry, &entry)?;

    let mut trigger = client.api_v1_triggers_get(project_id, lookup).await?;
    info!(
        trigger_id = trigger.trigger_id,
        actions = trigger.actions.len(),
        "fetched trigger"
    );

    trigger.push_action(entry);
    info!(actions = trigger.actions.len(), "appended action");

    client.api_v1_triggers_replace(&trigger).await?;
    info!(trigger_id = trigger.trigger_id, "replaced trigger");
    Ok(trigger)
}

/// Remove the action at the 1-based `index` from the trigger
///
/// The trigger is written back even when `index` is one past its last action,
/// in which case nothing was removed and `None` is returned.
pub async fn remove_action(
    client: &Client,
    project_id: u64,
    lookup: &TriggerLookup,
    index: usize,
) -> Result<Option<ActionEntry>, Error> {
    require_project(project_id)?;
    if index == 0 {
        return Err(Error::Validation(
            "an action number of at least 1 is required".into(),
        ));
    }

    let mut trigger = client.api_v1_triggers_get(project_id, lookup).await?;
    info!(
        trigger_id = trigger.trigger_id,
        actions = trigger.actions.len(),
        "fetched trigger"
    );

    let removed = trigger.remove_action(index)?;
    info!(index, removed = removed.is_some(), "removed action");

    client.api_v1_triggers_replace(&trigger).await?;
    info!(trigger_id = trigger.trigger_id, "replaced trigger");
    Ok(removed)
}
