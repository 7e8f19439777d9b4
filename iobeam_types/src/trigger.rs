use serde::{Deserialize, Serialize};

use crate::action::ActionEntry;

/// Namespace a trigger's condition is evaluated against when none is given
pub const DEFAULT_NAMESPACE: &str = "input";

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn is_zero(v: &u64) -> bool {
    *v == 0
}

/// A trigger as it is sent to and received from the `/v1/triggers` API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Assigned by the server, `0` until the trigger is created
    #[serde(default, skip_serializing_if = "is_zero")]
    pub trigger_id: u64,
    pub project_id: u64,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    pub trigger_name: String,
    /// Time in milliseconds after which data is too old to fire the trigger,
    /// `0` means data never expires
    #[serde(default, skip_serializing_if = "is_zero")]
    pub data_expiry: u64,
    pub fire_when: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_when: Option<String>,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

impl Trigger {
    pub fn new(
        project_id: u64,
        trigger_name: impl Into<String>,
        fire_when: impl Into<String>,
    ) -> Self {
        Self {
            trigger_id: 0,
            project_id,
            namespace: default_namespace(),
            trigger_name: trigger_name.into(),
            data_expiry: 0,
            fire_when: fire_when.into(),
            release_when: None,
            actions: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_data_expiry(mut self, data_expiry: u64) -> Self {
        self.data_expiry = data_expiry;
        self
    }

    /// Set the release condition, an empty condition leaves it unset
    pub fn with_release_when(mut self, release_when: Option<String>) -> Self {
        self.release_when = release_when.filter(|r| !r.is_empty());
        self
    }

    pub fn with_action(mut self, entry: ActionEntry) -> Self {
        self.actions.push(entry);
        self
    }

    /// Whether the trigger's own fields are complete enough to submit
    ///
    /// Actions are validated separately.
    pub fn is_valid(&self) -> bool {
        self.project_id > 0 && !self.trigger_name.is_empty() && !self.fire_when.is_empty()
    }

    /// Append an action after every existing one
    pub fn push_action(&mut self, entry: ActionEntry) {
        self.actions.push(entry);
    }

    /// Remove the action at the 1-based `index`, keeping the order of the rest
    ///
    /// The range check compares the 0-based position against the action count,
    /// so an `index` one past the last action passes it; nothing is removed in
    /// that case and `Ok(None)` is returned.
    pub fn remove_action(&mut self, index: usize) -> Result<Option<ActionEntry>, InvalidActionIndex> {
        let count = self.actions.len();
        let err = InvalidActionIndex { index, count };
        let idx = index.checked_sub(1).ok_or(err)?;
        if idx > count {
            return Err(err);
        }
        Ok((idx < count).then(|| self.actions.remove(idx)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid action index: {index} (only {count} actions)")]
pub struct InvalidActionIndex {
    pub index: usize,
    pub count: usize,
}

/// How an existing trigger is located on the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerLookup {
    Id(u64),
    Name(String),
}

impl TriggerLookup {
    /// Pick the lookup key from the id and name given by the user
    ///
    /// A non-zero id always wins, the name is only used without one. Returns
    /// `None` when neither is set.
    pub fn from_parts(trigger_id: u64, trigger_name: Option<&str>) -> Option<Self> {
        if trigger_id > 0 {
            return Some(Self::Id(trigger_id));
        }
        trigger_name
            .filter(|n| !n.is_empty())
            .map(|n| Self::Name(n.to_string()))
    }
}

impl std::fmt::Display for TriggerLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

/// Response body of `GET /v1/triggers`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerList {
    #[serde(default, alias = "Triggers")]
    pub triggers: Vec<Trigger>,
}
