//! Replaying adapters that serve recorded interactions from cassettes.

pub mod caption_model;
pub mod speech_model;
pub mod text_model;

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::StoryError;

/// Retrieve the next recorded output for a given port and method.
///
/// # Errors
///
/// Returns [`StoryError::Pipeline`] if the cassette has no more interactions
/// for this port.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, StoryError> {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard
        .next_interaction(port, method)
        .map(|interaction| interaction.output.clone())
        .map_err(StoryError::Pipeline)
}

/// Deserialize a replayed output as `Result<T, StoryError>`.
///
/// Recorded `Err` entries come back as [`StoryError::Replayed`] with the
/// recorded message unchanged; an output that does not match `T` is a
/// pipeline fault.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
    service: &'static str,
) -> Result<T, StoryError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let message = err_val.as_str().map_or_else(
            || format!("{service} failed while recording"),
            ToString::to_string,
        );
        return Err(StoryError::Replayed(message));
    }
    let value = match output.get("Ok").or_else(|| output.get("ok")) {
        Some(ok_val) => ok_val.clone(),
        None => output,
    };
    serde_json::from_value(value)
        .map_err(|e| StoryError::Pipeline(format!("Malformed {service} cassette entry: {e}")))
}
