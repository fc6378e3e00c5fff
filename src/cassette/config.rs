//! Cassette loading for replay mode.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Ports a cassette may contain interactions for.
const KNOWN_PORTS: &[(&str, &str)] = &[
    ("caption_model", "caption"),
    ("text_model", "generate"),
    ("speech_model", "synthesize"),
];

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it records a
/// port/method this pipeline does not have.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
    let cassette: Cassette = serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

    if let Some(unknown) = cassette
        .interactions
        .iter()
        .find(|i| !KNOWN_PORTS.contains(&(i.port.as_str(), i.method.as_str())))
    {
        return Err(format!(
            "Cassette {} has an interaction for unknown port {}::{} (seq {})",
            path.display(),
            unknown.port,
            unknown.method,
            unknown.seq
        ));
    }

    tracing::debug!(
        cassette = %cassette.name,
        commit = %cassette.commit,
        interactions = cassette.interactions.len(),
        "cassette loaded"
    );
    Ok(CassetteReplayer::new(&cassette))
}
