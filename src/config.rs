//! Runtime configuration read from the environment (and `.env`).

use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got '{value}'")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to read attorney records from {path}: {source}")]
    AttorneysIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("attorney records are not valid JSON: {0}")]
    AttorneysJson(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the `.docx` templates
    pub template_dir: PathBuf,
    pub procuracao_template: String,
    pub recibo_template: String,
    /// Replaces the built-in attorney list when set
    pub attorneys_file: Option<PathBuf>,
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            template_dir: PathBuf::from("./templates"),
            procuracao_template: "procuracao.docx".to_string(),
            recibo_template: "recibo.docx".to_string(),
            attorneys_file: None,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value: port.clone(), source })?;
        }
        if let Some(dir) = get("TEMPLATE_DIR") {
            config.template_dir = PathBuf::from(dir);
        }
        if let Some(name) = get("PROCURACAO_TEMPLATE") {
            config.procuracao_template = name;
        }
        if let Some(name) = get("RECIBO_TEMPLATE") {
            config.recibo_template = name;
        }
        config.attorneys_file = get("ADVOGADOS_FILE").map(PathBuf::from);
        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        Ok(config)
    }

    pub fn procuracao_template_path(&self) -> PathBuf {
        self.template_dir.join(&self.procuracao_template)
    }

    pub fn recibo_template_path(&self) -> PathBuf {
        self.template_dir.join(&self.recibo_template)
    }
}
