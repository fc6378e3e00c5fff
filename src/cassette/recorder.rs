//! Records port interactions into a single cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Collects interactions across all ports and writes them as one YAML cassette.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), name: name.into(), commit: commit.into(), interactions: Vec::new() }
    }

    /// Record one call. `Ok` values and `Err` messages are stored under the
    /// `Ok`/`Err` keys the replayer understands; `seq` is assigned here.
    pub fn record(
        &mut self,
        port: &str,
        method: &str,
        input: serde_json::Value,
        outcome: Result<serde_json::Value, String>,
    ) {
        let output = match outcome {
            Ok(value) => serde_json::json!({ "Ok": value }),
            Err(message) => serde_json::json!({ "Err": message }),
        };
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.to_string(),
            method: method.to_string(),
            input,
            output,
        });
    }

    /// Number of interactions captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_every_stage_in_order() {
        let dir = std::env::temp_dir().join("imagetale_cassette_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("nested").join("pipeline.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "test-recording", "deadbeef");
        recorder.record(
            "caption_model",
            "caption",
            json!({"model": "blip"}),
            Ok(json!({"candidates": [{"generated_text": "a dog running in a field"}]})),
        );
        recorder.record(
            "text_model",
            "generate",
            json!({"prompt": "context = a dog running in a field"}),
            Err("Text model unavailable (429): quota".to_string()),
        );

        assert_eq!(recorder.len(), 2);

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("a dog running in a field"));
        assert!(content.contains("quota"));

        let cassette: super::super::format::Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.name, "test-recording");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].port, "caption_model");
        assert_eq!(cassette.interactions[1].seq, 1);
        assert_eq!(cassette.interactions[1].output["Err"], "Text model unavailable (429): quota");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
