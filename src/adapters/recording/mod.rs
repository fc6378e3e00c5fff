//! Recording adapters that capture interactions to cassettes.

pub mod caption_model;
pub mod speech_model;
pub mod text_model;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// Serialization failures are logged and the interaction is skipped; a
/// recording problem never fails the pipeline itself.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = match serde_json::to_value(input) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(port, method, error = %e, "skipping recording: input not serializable");
            return;
        }
    };

    let outcome = match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => Ok(inner),
            Err(e) => {
                tracing::warn!(port, method, error = %e, "skipping recording: output not serializable");
                return;
            }
        },
        Err(e) => Err(e.to_string()),
    };

    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, input_json, outcome);
}
