//! Output file naming and persistence for narrations and uploads.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StoryError;

/// File name suffix of every narration.
pub const AUDIO_FILE_SUFFIX: &str = "story_speech.mp3";

/// Longest request id kept in a file name.
const MAX_REQUEST_ID_LEN: usize = 64;

/// Generate a fresh, time-ordered request identifier.
#[must_use]
pub fn new_request_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars() {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "request".to_string()
    } else {
        result
    }
}

/// Accept a caller-supplied request id only if it is already a file-name
/// slug, so two distinct ids never share an output file.
///
/// # Errors
///
/// Returns [`StoryError::InvalidArgument`] for ids that would be rewritten.
pub fn validate_request_id(request_id: &str) -> Result<(), StoryError> {
    if sanitize_for_filename(request_id, MAX_REQUEST_ID_LEN) == request_id {
        Ok(())
    } else {
        Err(StoryError::InvalidArgument(format!(
            "Request id {request_id:?} must be 1-{MAX_REQUEST_ID_LEN} lowercase letters, digits or single hyphens"
        )))
    }
}

/// Resolve where the narration goes: an explicit path, or
/// `<output_dir>/<request-id>-story_speech.mp3`.
#[must_use]
pub fn resolve_audio_path(explicit: Option<&Path>, output_dir: &Path, request_id: &str) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let id = sanitize_for_filename(request_id, MAX_REQUEST_ID_LEN);
            output_dir.join(format!("{id}-{AUDIO_FILE_SUFFIX}"))
        }
    }
}

/// Write audio bytes to `path`, replacing any existing file.
///
/// The bytes go to a sibling temp file that is renamed over `path`, so
/// `path` only ever holds a complete narration. Parent directories are
/// created as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_audio(path: &Path, audio: &[u8]) -> Result<(), StoryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let partial = partial_path(path);
    let written = write_file(&partial, audio).and_then(|()| std::fs::rename(&partial, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(())
}

/// `<dir>/.<file name>.<uuid>.part`, next to the final file so the rename
/// stays on one filesystem.
fn partial_path(path: &Path) -> PathBuf {
    let name = path.file_name().map_or_else(
        || AUDIO_FILE_SUFFIX.to_string(),
        |n| n.to_string_lossy().into_owned(),
    );
    path.with_file_name(format!(".{name}.{}.part", uuid::Uuid::now_v7().simple()))
}

fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

/// Keep a copy of the uploaded image under a synthetic name.
///
/// The caller's original file name is never used, so uploads cannot collide
/// with or escape `output_dir`.
///
/// # Errors
///
/// Returns an error if the format is not JPEG/PNG or the file cannot be written.
pub fn persist_upload(
    data: &[u8],
    output_dir: &Path,
    request_id: &str,
) -> Result<PathBuf, StoryError> {
    let ext = match image::guess_format(data) {
        Ok(image::ImageFormat::Jpeg) => "jpg",
        Ok(image::ImageFormat::Png) => "png",
        _ => {
            return Err(StoryError::InvalidArgument(
                "Only JPEG and PNG uploads can be kept".to_string(),
            ))
        }
    };
    std::fs::create_dir_all(output_dir)?;
    let id = sanitize_for_filename(request_id, MAX_REQUEST_ID_LEN);
    let path = output_dir.join(format!("{id}-upload.{ext}"));
    std::fs::write(&path, data)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize_for_filename("Session 42", 64), "session-42");
    }

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(sanitize_for_filename("../../etc/passwd", 64), "etc-passwd");
    }

    #[test]
    fn sanitize_truncates() {
        let long = "a".repeat(100);
        assert!(sanitize_for_filename(&long, 10).len() <= 10);
    }

    #[test]
    fn sanitize_empty() {
        assert_eq!(sanitize_for_filename("", 64), "request");
        assert_eq!(sanitize_for_filename("///", 64), "request");
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(new_request_id(), new_request_id());
    }

    #[test]
    fn resolve_explicit() {
        let path = resolve_audio_path(Some(Path::new("out.mp3")), Path::new("audio-img"), "x");
        assert_eq!(path, PathBuf::from("out.mp3"));
    }

    #[test]
    fn resolve_keys_path_by_request() {
        let path = resolve_audio_path(None, Path::new("audio-img"), "run-1");
        assert_eq!(path, PathBuf::from("audio-img/run-1-story_speech.mp3"));
    }

    #[test]
    fn request_ids_must_already_be_slugs() {
        assert!(validate_request_id("run-1").is_ok());
        assert!(validate_request_id(&new_request_id()).is_ok());

        for id in ["Run/1", "run--1", "", "///", "-run", "run 1", &"a".repeat(65)] {
            let err = validate_request_id(id).unwrap_err();
            assert!(matches!(err, StoryError::InvalidArgument(_)), "accepted {id:?}");
        }
    }

    #[test]
    fn write_audio_overwrites() {
        let dir = std::env::temp_dir().join("imagetale_output_overwrite_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("story_speech.mp3");

        write_audio(&path, b"first, longer payload").unwrap();
        write_audio(&path, &[0xFF, 0xFB]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xFF, 0xFB]);

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .filter(|name| name != "story_speech.mp3")
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_write_leaves_existing_narration_alone() {
        let dir = std::env::temp_dir().join("imagetale_output_failed_write_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("story_speech.mp3");
        write_audio(&path, b"complete").unwrap();

        // A directory at the target makes the final rename fail.
        let blocked = dir.join("blocked.mp3");
        std::fs::create_dir_all(blocked.join("inner")).unwrap();
        assert!(write_audio(&blocked, b"new").is_err());

        assert_eq!(std::fs::read(&path).unwrap(), b"complete");
        let names: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".part")), "temp file left: {names:?}");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn persist_upload_uses_synthetic_name() {
        let dir = std::env::temp_dir().join("imagetale_output_upload_test");
        let _ = std::fs::remove_dir_all(&dir);

        let mut data = PNG_MAGIC.to_vec();
        data.extend_from_slice(&[0; 8]);
        let path = persist_upload(&data, &dir, "req-1").unwrap();
        assert_eq!(path, dir.join("req-1-upload.png"));
        assert_eq!(std::fs::read(&path).unwrap(), data);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn persist_upload_rejects_unknown_formats() {
        let dir = std::env::temp_dir().join("imagetale_output_upload_bad_test");
        assert!(persist_upload(b"plain text", &dir, "req").is_err());
    }
}
