//! Response parsing for backend replies.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::CommandError;
use crate::model::Device;
use crate::protocol::requests::ApiReply;

const PARSE_FAILURE: &str = "Failed to parse server response";

#[derive(Debug, Deserialize)]
struct AddSpeakerBody {
    speaker: Device,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

/// Parse a `GET /speakers` reply into the directory listing.
pub fn parse_speaker_list(reply: &ApiReply) -> Result<Vec<Device>, CommandError> {
    if !reply.is_success() {
        return Err(rejection(reply));
    }

    let records: Vec<Value> = serde_json::from_str(&reply.body)
        .map_err(|e| CommandError::Protocol(format!("{}: {}", PARSE_FAILURE, e)))?;

    // A record without a usable name or ip cannot be keyed; skip it and keep the rest.
    let devices = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Device>(record) {
            Ok(device) => Some(device),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable speaker record");
                None
            }
        })
        .collect();
    Ok(devices)
}

/// Parse a `POST /addSpeaker` reply into the added device record.
pub fn parse_added_speaker(reply: &ApiReply) -> Result<Device, CommandError> {
    if !reply.is_success() {
        return Err(rejection(reply));
    }

    serde_json::from_str::<AddSpeakerBody>(&reply.body)
        .map(|body| body.speaker)
        .map_err(|e| CommandError::Protocol(format!("{}: {}", PARSE_FAILURE, e)))
}

/// Classify a plain-text reply where exactly HTTP 200 means success.
///
/// The body is passed through verbatim in both cases.
pub fn parse_text_outcome(reply: &ApiReply) -> Result<String, CommandError> {
    if reply.is_ok() {
        Ok(reply.body.clone())
    } else {
        Err(CommandError::Rejected {
            status: reply.status,
            message: reply.body.clone(),
        })
    }
}

/// Build a `Rejected` error from a non-success reply.
pub fn rejection(reply: &ApiReply) -> CommandError {
    CommandError::Rejected {
        status: reply.status,
        message: error_message(reply),
    }
}

/// Extract the user-facing message of a failed reply.
///
/// Tries `{"message": ...}` (or `{"error": ...}`) first, then the raw body,
/// then the status reason so that something is always shown.
pub fn error_message(reply: &ApiReply) -> String {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&reply.body) {
        if !body.message.trim().is_empty() {
            return body.message;
        }
    }

    let raw = reply.body.trim();
    if !raw.is_empty() {
        return raw.to_string();
    }

    let reason = reqwest::StatusCode::from_u16(reply.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Request failed");
    format!("HTTP {} {}", reply.status, reason)
}
