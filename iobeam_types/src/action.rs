//! Trigger actions: the side effects a trigger performs when it fires.
//!
//! Every kind of action is a plain record with its own wire field names.
//! [`Action`] is the closed set of those records, and [`ActionEntry`] pairs one
//! with the rate limit that applies to it inside a trigger. The `type` tag used
//! on the wire is looked up through the [`ActionRegistry`] rather than hard
//! coded here.

use serde::{
    Deserialize, Serialize, Serializer,
    ser::{Error as _, SerializeStruct},
};

use crate::registry::{ActionKind, ActionRegistry, DecodeActionError};

/// Capabilities shared by every action record
///
/// With the `clap` feature enabled each record also implements [`clap::Args`],
/// which binds its fields as command line flags.
pub trait ActionArgs: Into<Action> {
    /// Whether the fields this kind of action requires are all set
    fn is_valid(&self) -> bool;
}

/// Send an email when the trigger fires
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
#[serde(default)]
pub struct EmailAction {
    /// Email address recipient, may be given more than once
    #[cfg_attr(feature = "clap", clap(long = "to"))]
    pub to: Vec<String>,

    /// Email subject line
    #[serde(skip_serializing_if = "String::is_empty")]
    #[cfg_attr(feature = "clap", clap(long = "subject", default_value_t))]
    pub subject: String,

    /// Email message body
    #[cfg_attr(feature = "clap", clap(long = "payload", default_value_t))]
    pub payload: String,
}

impl ActionArgs for EmailAction {
    fn is_valid(&self) -> bool {
        self.to.first().is_some_and(|to| !to.is_empty()) && !self.payload.is_empty()
    }
}

/// POST to an HTTP endpoint when the trigger fires
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
#[serde(default)]
pub struct HttpAction {
    /// URL to POST to when trigger is executed
    #[cfg_attr(feature = "clap", clap(long = "url", default_value_t))]
    pub url: String,

    /// Body of the POST request
    #[cfg_attr(feature = "clap", clap(long = "payload", default_value_t))]
    pub payload: String,

    /// Value of the `Authorization` header of the POST request, if needed
    #[cfg_attr(feature = "clap", clap(long = "auth-header", default_value_t))]
    pub auth_header: String,

    /// Content type of the payload
    #[cfg_attr(
        feature = "clap",
        clap(long = "content-type", default_value = "text/plain")
    )]
    pub content_type: String,
}

impl ActionArgs for HttpAction {
    fn is_valid(&self) -> bool {
        !self.url.is_empty() && !self.content_type.is_empty()
    }
}

/// Publish a message to an MQTT broker when the trigger fires
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
#[serde(default)]
pub struct MqttAction {
    /// MQTT broker address to send to
    #[serde(rename = "broker_addr")]
    #[cfg_attr(feature = "clap", clap(long = "broker", default_value_t))]
    pub broker: String,

    /// Username to use with the MQTT broker
    #[cfg_attr(feature = "clap", clap(long = "username", default_value_t))]
    pub username: String,

    /// Password to use with the MQTT broker
    #[cfg_attr(feature = "clap", clap(long = "password", default_value_t))]
    pub password: String,

    /// Quality of service level for the published message
    #[cfg_attr(
        feature = "clap",
        clap(
            long = "qos",
            default_value_t = 0,
            value_parser = clap::value_parser!(u8).range(0..=2)
        )
    )]
    pub qos: u8,

    /// MQTT topic to post the message to
    #[cfg_attr(feature = "clap", clap(long = "topic", default_value_t))]
    pub topic: String,

    /// Body of the MQTT message
    #[cfg_attr(feature = "clap", clap(long = "payload", default_value_t))]
    pub payload: String,
}

impl ActionArgs for MqttAction {
    fn is_valid(&self) -> bool {
        !self.broker.is_empty() && !self.topic.is_empty() && !self.payload.is_empty()
    }
}

/// Send a Twilio SMS when the trigger fires
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
#[serde(default)]
pub struct SmsAction {
    /// Twilio account SID
    #[cfg_attr(feature = "clap", clap(long = "account-sid", default_value_t))]
    pub account_sid: String,

    /// Twilio authorization token
    #[cfg_attr(feature = "clap", clap(long = "auth-token", default_value_t))]
    pub auth_token: String,

    /// Phone number of the SMS sender
    #[cfg_attr(feature = "clap", clap(long = "from", default_value_t))]
    pub from: String,

    /// Phone number of the SMS recipient
    #[cfg_attr(feature = "clap", clap(long = "to", default_value_t))]
    pub to: String,

    /// SMS message body
    #[serde(rename = "message")]
    #[cfg_attr(feature = "clap", clap(long = "payload", default_value_t))]
    pub payload: String,
}

impl ActionArgs for SmsAction {
    fn is_valid(&self) -> bool {
        !self.account_sid.is_empty()
            && !self.auth_token.is_empty()
            && !self.from.is_empty()
            && !self.to.is_empty()
            && !self.payload.is_empty()
    }
}

/// One of the supported kinds of action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Email(EmailAction),
    Http(HttpAction),
    Mqtt(MqttAction),
    Sms(SmsAction),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Email(_) => ActionKind::Email,
            Self::Http(_) => ActionKind::Http,
            Self::Mqtt(_) => ActionKind::Mqtt,
            Self::Sms(_) => ActionKind::Sms,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Self::Email(a) => a.is_valid(),
            Self::Http(a) => a.is_valid(),
            Self::Mqtt(a) => a.is_valid(),
            Self::Sms(a) => a.is_valid(),
        }
    }

    /// The kind specific record as it appears under `args` on the wire
    pub fn to_args_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Email(a) => serde_json::to_value(a),
            Self::Http(a) => serde_json::to_value(a),
            Self::Mqtt(a) => serde_json::to_value(a),
            Self::Sms(a) => serde_json::to_value(a),
        }
    }
}

impl From<EmailAction> for Action {
    fn from(a: EmailAction) -> Self {
        Self::Email(a)
    }
}

impl From<HttpAction> for Action {
    fn from(a: HttpAction) -> Self {
        Self::Http(a)
    }
}

impl From<MqttAction> for Action {
    fn from(a: MqttAction) -> Self {
        Self::Mqtt(a)
    }
}

impl From<SmsAction> for Action {
    fn from(a: SmsAction) -> Self {
        Self::Sms(a)
    }
}

/// An action attached to a trigger
///
/// On the wire this is `{"type": ..., "min_delay": ..., "args": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawActionEntry")]
pub struct ActionEntry {
    /// Minimum time in milliseconds between successive firings of this action
    pub min_delay: u64,
    pub action: Action,
}

impl ActionEntry {
    pub fn new(action: impl Into<Action>, min_delay: u64) -> Self {
        Self {
            min_delay,
            action: action.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.action.is_valid()
    }
}

impl Serialize for ActionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = ActionRegistry::builtin()
            .kind_of(&self.action)
            .map_err(S::Error::custom)?;
        let mut s = serializer.serialize_struct("ActionEntry", 3)?;
        s.serialize_field("type", kind)?;
        s.serialize_field("min_delay", &self.min_delay)?;
        match &self.action {
            Action::Email(a) => s.serialize_field("args", a)?,
            Action::Http(a) => s.serialize_field("args", a)?,
            Action::Mqtt(a) => s.serialize_field("args", a)?,
            Action::Sms(a) => s.serialize_field("args", a)?,
        }
        s.end()
    }
}

/// Undecoded form of an [`ActionEntry`], `args` is interpreted once `type` is known
#[derive(Debug, Deserialize)]
struct RawActionEntry {
    r#type: String,
    #[serde(default)]
    min_delay: u64,
    #[serde(default)]
    args: serde_json::Value,
}

impl TryFrom<RawActionEntry> for ActionEntry {
    type Error = DecodeActionError;

    fn try_from(raw: RawActionEntry) -> Result<Self, Self::Error> {
        let action = ActionRegistry::builtin().decode(&raw.r#type, raw.args)?;
        Ok(Self {
            min_delay: raw.min_delay,
            action,
        })
    }
}
