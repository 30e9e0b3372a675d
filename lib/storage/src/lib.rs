//! # Namesake Storage
//!
//! Persistence for trained match models. An artifact records the feature
//! schema version and feature order next to the classifier, and a load
//! refuses anything that does not agree with the running extractor.

pub mod artifact;
pub mod store;

pub use artifact::ModelArtifact;
pub use store::{import_json, ArtifactDescription, ModelStore};
