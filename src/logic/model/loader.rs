//! Artifact Loading & Integrity
//!
//! Reads the forest artifact from disk, optionally pinning it to an
//! expected SHA-256 digest before parsing.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::forest::{ForestArtifact, ForestModel};
use super::ModelError;

/// Load and validate the forest artifact at `path`.
///
/// When `expected_sha256` is set the file digest must match it
/// (hex, case-insensitive) before the artifact is even parsed.
pub fn load(path: &str, expected_sha256: Option<&str>) -> Result<ForestModel, ModelError> {
    if !Path::new(path).exists() {
        return Err(ModelError::NotFound(path.to_string()));
    }

    if let Some(expected) = expected_sha256 {
        let expected = expected.trim();
        let actual = file_sha256(path)?;
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ModelError::ChecksumMismatch {
                expected: expected.to_lowercase(),
                actual,
            });
        }
        log::debug!("model checksum verified ({})", actual);
    }

    let file = File::open(path)?;
    let artifact: ForestArtifact = serde_json::from_reader(BufReader::new(file))?;
    ForestModel::from_artifact(artifact)
}

/// SHA-256 of a file as lowercase hex, streamed in 8 KiB chunks
fn file_sha256(path: &str) -> Result<String, ModelError> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
