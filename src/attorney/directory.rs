//! Read-only attorney dataset, loaded once at startup.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::attorney::model::Attorney;
use crate::config::{AppConfig, ConfigError};

const BUILTIN_RECORDS: &str = include_str!("advogados.json");

/// Immutable list of attorney records shared by every worker.
#[derive(Debug, Clone)]
pub struct AttorneyDirectory {
    records: Arc<[Attorney]>,
}

impl AttorneyDirectory {
    pub fn new(records: Vec<Attorney>) -> Self {
        Self {
            records: Arc::from(records),
        }
    }

    /// The records bundled with the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_RECORDS)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let records: Vec<Attorney> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::AttorneysIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Use `ADVOGADOS_FILE` when configured, the built-in records otherwise.
    pub fn load(config: &AppConfig) -> Result<Self, ConfigError> {
        match &config.attorneys_file {
            Some(path) => {
                log::info!("Loading attorney records from {}", path.display());
                Self::from_file(path)
            }
            None => Self::builtin(),
        }
    }

    pub fn all(&self) -> &[Attorney] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
