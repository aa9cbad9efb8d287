//! Model document snapshots
//!
//! A document is the serialized form of a registry: a schema version, a
//! generation timestamp and the full element list. JSON is the primary
//! format; YAML is accepted for hand-maintained documents. The extension
//! decides the codec.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Element;
use crate::registry::{Registry, RegistryError};

/// Current document schema version
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read document {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write document {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse document {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Unsupported document extension '{0}': expected .json, .yaml or .yml")]
    UnsupportedExtension(String),

    #[error("Unsupported document schema version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A serialized model: schema version, timestamp and elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDocument {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub elements: Vec<Element>,
}

impl ModelDocument {
    /// Snapshots a registry into a document
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            elements: registry.iter().cloned().collect(),
        }
    }

    /// Rebuilds a registry from this document, re-validating everything
    pub fn into_registry(self) -> Result<Registry, DocumentError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                found: self.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(Registry::from_elements(self.elements)?)
    }

    /// Loads a document from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: display.clone(),
            source,
        })?;

        match extension(path)? {
            Codec::Json => serde_json::from_str(&content).map_err(|e| DocumentError::Parse {
                path: display,
                message: e.to_string(),
            }),
            Codec::Yaml => serde_yaml::from_str(&content).map_err(|e| DocumentError::Parse {
                path: display,
                message: e.to_string(),
            }),
        }
    }

    /// Saves the document; the extension selects JSON or YAML
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let display = path.display().to_string();
        let content = match extension(path)? {
            Codec::Json => {
                let mut text = serde_json::to_string_pretty(self).map_err(|e| {
                    DocumentError::Parse {
                        path: display.clone(),
                        message: e.to_string(),
                    }
                })?;
                text.push('\n');
                text
            }
            Codec::Yaml => serde_yaml::to_string(self).map_err(|e| DocumentError::Parse {
                path: display.clone(),
                message: e.to_string(),
            })?,
        };

        // Write to a sibling temp file, then rename for atomicity.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, content).map_err(|source| DocumentError::Write {
            path: display.clone(),
            source,
        })?;
        fs::rename(&tmp, path).map_err(|source| DocumentError::Write {
            path: display,
            source,
        })
    }
}

enum Codec {
    Json,
    Yaml,
}

fn extension(path: &Path) -> Result<Codec, DocumentError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Codec::Json),
        Some("yaml") | Some("yml") => Ok(Codec::Yaml),
        other => Err(DocumentError::UnsupportedExtension(
            other.unwrap_or("").to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Kind, MilestoneOptions, StepOptions};
    use tempfile::TempDir;

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        let step = registry.declare(StepOptions::new("Enter amount")).unwrap();
        registry
            .declare(MilestoneOptions::new("Funds available").step(step, 1))
            .unwrap();
        registry
    }

    #[test]
    fn json_roundtrip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");

        let document = ModelDocument::from_registry(&sample_registry());
        document.save(&path).unwrap();

        let loaded = ModelDocument::load(&path).unwrap();
        let registry = loaded.into_registry().unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.by_kind(Kind::Milestone).count(), 1);
    }

    #[test]
    fn yaml_roundtrip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.yaml");

        let document = ModelDocument::from_registry(&sample_registry());
        document.save(&path).unwrap();

        let loaded = ModelDocument::load(&path).unwrap();
        assert_eq!(loaded.elements.len(), 2);
        assert!(loaded.into_registry().is_ok());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let document = ModelDocument::from_registry(&Registry::new());
        let err = document.save(Path::new("/tmp/model.toml")).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedExtension(ext) if ext == "toml"));
    }

    #[test]
    fn unsupported_schema_version_is_rejected() {
        let mut document = ModelDocument::from_registry(&sample_registry());
        document.schema_version = 99;
        let err = document.into_registry().unwrap_err();
        assert!(matches!(
            err,
            DocumentError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn dangling_reference_in_document_fails_registry_rebuild() {
        let mut document = ModelDocument::from_registry(&sample_registry());
        document.elements.retain(|e| e.kind() == Kind::Milestone);

        let err = document.into_registry().unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Registry(RegistryError::UnknownReference { .. })
        ));
    }

    #[test]
    fn parse_error_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = ModelDocument::load(&path).unwrap_err();
        match err {
            DocumentError::Parse { path: p, .. } => assert!(p.ends_with("broken.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
