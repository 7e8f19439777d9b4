//! Shared types for the iobeam trigger API
//!
//! These are the JSON bodies exchanged with the `/v1/triggers` endpoints, plus
//! the registry of action kinds that maps between action records and the `type`
//! tag they carry on the wire.

pub mod action;
pub mod registry;
#[cfg(feature = "clap")]
pub mod selection;
pub mod trigger;

pub use action::{Action, ActionArgs, ActionEntry, EmailAction, HttpAction, MqttAction, SmsAction};
pub use registry::{ActionKind, ActionKindEntry, ActionRegistry, DecodeActionError, UnknownActionKind};
#[cfg(feature = "clap")]
pub use selection::{ActionSelection, ActionVerb};
pub use trigger::{DEFAULT_NAMESPACE, InvalidActionIndex, Trigger, TriggerList, TriggerLookup};
