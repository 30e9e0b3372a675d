//! Model artifact storage
//!
//! Artifacts are written as bincode through an atomic rename, so a reader
//! never observes a half-written model. Each save reports a SHA-256 checksum
//! that a later load can verify against.

use crate::artifact::ModelArtifact;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use namesake_core::{Error, Result};
use namesake_matcher::ModelMatcher;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Description of a stored artifact
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactDescription {
    pub path: PathBuf,
    pub size: u64,
    pub checksum: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Reads and writes one model artifact file
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Validate and atomically write `artifact`
    pub fn save(&self, artifact: &ModelArtifact) -> Result<ArtifactDescription> {
        artifact.validate()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = bincode::serialize(artifact).map_err(|e| Error::Serialization(e.to_string()))?;

        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&data))
            .map_err(|e| Error::Persistence(e.to_string()))?;

        let checksum = format!("{:x}", Sha256::digest(&data));
        info!(
            path = %self.path.display(),
            backend = artifact.backend.kind(),
            size = data.len(),
            "model artifact saved"
        );

        Ok(ArtifactDescription {
            path: self.path.clone(),
            size: data.len() as u64,
            checksum,
            backend: artifact.backend.kind().to_string(),
            created_at: artifact.created_at.map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        })
    }

    /// Read, verify and validate the artifact
    ///
    /// A missing file is reported as [`Error::ModelUnavailable`]. When
    /// `expected_checksum` is given the file bytes must hash to it.
    pub fn load(&self, expected_checksum: Option<&str>) -> Result<ModelArtifact> {
        if !self.exists() {
            return Err(Error::ModelUnavailable(format!(
                "no model artifact at {}",
                self.path.display()
            )));
        }

        let bytes = fs::read(&self.path)?;

        if let Some(expected) = expected_checksum {
            let actual = format!("{:x}", Sha256::digest(&bytes));
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(Error::ChecksumMismatch {
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        let artifact: ModelArtifact =
            bincode::deserialize(&bytes).map_err(|e| Error::Serialization(e.to_string()))?;
        artifact.validate()?;

        info!(
            path = %self.path.display(),
            backend = artifact.backend.kind(),
            "model artifact loaded"
        );
        Ok(artifact)
    }

    /// Load the artifact and build a model-backed matcher
    pub fn load_matcher(&self, expected_checksum: Option<&str>) -> Result<ModelMatcher> {
        self.load(expected_checksum)?.into_matcher()
    }

    /// SHA-256 of the stored file
    pub fn checksum(&self) -> Result<String> {
        let bytes = fs::read(&self.path)?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }
}

/// Read an artifact exported as JSON by a training pipeline
pub fn import_json<P: AsRef<Path>>(path: P) -> Result<ModelArtifact> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| {
        Error::ModelUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;
    let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))?;
    artifact.validate()?;
    Ok(artifact)
}
