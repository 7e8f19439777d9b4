//! The table of supported action kinds.
//!
//! Each entry ties together the name a kind is known by (used both as the
//! command line subcommand and as the wire `type` tag), a constructor for a
//! fresh record, and the decoding and flag-binding functions for it. Adding a
//! kind of action means adding a record type in [`crate::action`] and one entry
//! to this table; nothing that consumes the registry changes.

use serde::de::DeserializeOwned;

use crate::action::{Action, EmailAction, HttpAction, MqttAction, SmsAction};

/// Discriminant of an [`Action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Email,
    Http,
    Mqtt,
    Sms,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action type: {0}")]
pub struct UnknownActionKind(pub String);

#[derive(Debug, thiserror::Error)]
pub enum DecodeActionError {
    #[error(transparent)]
    UnknownKind(#[from] UnknownActionKind),

    #[error("invalid args for {kind} action: {source}")]
    Args {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Registration of a single kind of action
#[derive(Debug, Clone, Copy)]
pub struct ActionKindEntry {
    pub kind: ActionKind,
    /// Subcommand name and wire `type` tag
    pub name: &'static str,
    /// Human readable name used in usage text
    pub label: &'static str,
    new: fn() -> Action,
    decode: fn(serde_json::Value) -> Result<Action, serde_json::Error>,
    #[cfg(feature = "clap")]
    pub(crate) augment_args: fn(clap::Command) -> clap::Command,
    #[cfg(feature = "clap")]
    pub(crate) from_arg_matches: fn(&clap::ArgMatches) -> Result<Action, clap::Error>,
}

impl ActionKindEntry {
    /// A freshly constructed record of this kind with every field at its default
    pub fn new_action(&self) -> Action {
        (self.new)()
    }
}

fn new_action<A: Default + Into<Action>>() -> Action {
    A::default().into()
}

fn decode_action<A: DeserializeOwned + Into<Action>>(
    args: serde_json::Value,
) -> Result<Action, serde_json::Error> {
    serde_json::from_value::<A>(args).map(Into::into)
}

#[cfg(feature = "clap")]
fn action_from_arg_matches<A: clap::FromArgMatches + Into<Action>>(
    matches: &clap::ArgMatches,
) -> Result<Action, clap::Error> {
    A::from_arg_matches(matches).map(Into::into)
}

const ACTION_KINDS: &[ActionKindEntry] = &[
    ActionKindEntry {
        kind: ActionKind::Email,
        name: "email",
        label: "email",
        new: new_action::<EmailAction>,
        decode: decode_action::<EmailAction>,
        #[cfg(feature = "clap")]
        augment_args: <EmailAction as clap::Args>::augment_args,
        #[cfg(feature = "clap")]
        from_arg_matches: action_from_arg_matches::<EmailAction>,
    },
    ActionKindEntry {
        kind: ActionKind::Http,
        name: "http",
        label: "HTTP",
        new: new_action::<HttpAction>,
        decode: decode_action::<HttpAction>,
        #[cfg(feature = "clap")]
        augment_args: <HttpAction as clap::Args>::augment_args,
        #[cfg(feature = "clap")]
        from_arg_matches: action_from_arg_matches::<HttpAction>,
    },
    ActionKindEntry {
        kind: ActionKind::Mqtt,
        name: "mqtt",
        label: "MQTT",
        new: new_action::<MqttAction>,
        decode: decode_action::<MqttAction>,
        #[cfg(feature = "clap")]
        augment_args: <MqttAction as clap::Args>::augment_args,
        #[cfg(feature = "clap")]
        from_arg_matches: action_from_arg_matches::<MqttAction>,
    },
    ActionKindEntry {
        kind: ActionKind::Sms,
        name: "sms",
        label: "Twilio SMS",
        new: new_action::<SmsAction>,
        decode: decode_action::<SmsAction>,
        #[cfg(feature = "clap")]
        augment_args: <SmsAction as clap::Args>::augment_args,
        #[cfg(feature = "clap")]
        from_arg_matches: action_from_arg_matches::<SmsAction>,
    },
];

/// Immutable lookup table from action kind names to their registrations
#[derive(Debug, Clone, Copy)]
pub struct ActionRegistry {
    entries: &'static [ActionKindEntry],
}

impl ActionRegistry {
    /// The registry of every kind of action this client supports
    pub const fn builtin() -> Self {
        Self {
            entries: ACTION_KINDS,
        }
    }

    /// Registered kinds, in the order they were registered
    pub fn entries(&self) -> std::slice::Iter<'static, ActionKindEntry> {
        self.entries.iter()
    }

    pub fn entry(&self, name: &str) -> Result<&'static ActionKindEntry, UnknownActionKind> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| UnknownActionKind(name.to_string()))
    }

    /// Construct a fresh, default valued action of the kind registered as `name`
    pub fn resolve(&self, name: &str) -> Result<Action, UnknownActionKind> {
        self.entry(name).map(ActionKindEntry::new_action)
    }

    /// The name `action`'s kind is registered under
    pub fn kind_of(&self, action: &Action) -> Result<&'static str, UnknownActionKind> {
        let kind = action.kind();
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.name)
            .ok_or_else(|| UnknownActionKind(format!("{kind:?}")))
    }

    /// Decode the wire `args` of an action whose `type` tag is `name`
    pub fn decode(&self, name: &str, args: serde_json::Value) -> Result<Action, DecodeActionError> {
        let entry = self.entry(name)?;
        (entry.decode)(args).map_err(|source| DecodeActionError::Args {
            kind: entry.name,
            source,
        })
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
