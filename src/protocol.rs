//! Surface Message Protocol
//!
//! JSON messages exchanged with a panel's rendering surface, tagged by
//! `command`.
//!
//! # Inbound (surface → core)
//!
//! - `select`: highlight the JSON value at `jsonPointer` in the editor
//! - `setContext`: set a host context value
//! - `showErrorMessage` / `showWarningMessage`: surface a notification
//! - `onReady`: the surface finished bootstrapping
//!
//! # Outbound (core → surface)
//!
//! - `refresh`: an external resource changed, reload assets
//! - `updateDebugMode`: the panel gained focus, resync debug UI

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message received from a rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum InboundMessage {
    Select {
        #[serde(rename = "jsonPointer")]
        json_pointer: String,
    },
    SetContext {
        name: String,
        value: Value,
    },
    ShowErrorMessage {
        message: String,
    },
    ShowWarningMessage {
        message: String,
    },
    OnReady,
}

/// Protocol violations. Each one is scoped to the single message that caused it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("message has no `command` field")]
    MissingCommand,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("malformed `{command}` message: {reason}")]
    Malformed { command: String, reason: String },
}

impl InboundMessage {
    /// Commands this side of the channel understands.
    pub const COMMANDS: [&'static str; 5] = [
        "select",
        "setContext",
        "showErrorMessage",
        "showWarningMessage",
        "onReady",
    ];

    /// Decode a raw surface message.
    pub fn decode(raw: Value) -> Result<Self, ProtocolError> {
        let command = raw
            .get("command")
            .and_then(Value::as_str)
            .map(str::to_owned);

        serde_json::from_value(raw).map_err(|err| match command {
            None => ProtocolError::MissingCommand,
            Some(command) if Self::COMMANDS.contains(&command.as_str()) => {
                ProtocolError::Malformed {
                    command,
                    reason: err.to_string(),
                }
            }
            Some(command) => ProtocolError::UnknownCommand(command),
        })
    }

    pub const fn command(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::SetContext { .. } => "setContext",
            Self::ShowErrorMessage { .. } => "showErrorMessage",
            Self::ShowWarningMessage { .. } => "showWarningMessage",
            Self::OnReady => "onReady",
        }
    }
}

/// Message sent to a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum OutboundMessage {
    Refresh,
    UpdateDebugMode,
}

impl OutboundMessage {
    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"command":"refresh"}"#.to_string())
    }
}
