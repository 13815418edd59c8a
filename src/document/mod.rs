//! Document generation: fills `.docx` templates with request data.
//!
//! A request flows through these pieces:
//! - `validation` - required-field and format checks on the payload
//! - `filler` - placeholder substitution over the body paragraphs
//! - `textbox` - the same substitution inside floating text boxes
//! - `engine` - loads the package, runs the passes, serializes the result
//! - `procuracao` / `recibo` - one generator per document kind

pub mod common;
pub mod context;
pub mod engine;
pub mod filler;
pub mod handlers;
pub mod package;
pub mod placeholder;
pub mod procuracao;
pub mod recibo;
pub mod textbox;
pub mod traits;
pub mod validation;
pub mod xml;

#[cfg(test)]
pub(crate) mod fixtures;

pub use context::Context;
pub use engine::{DocxRenderEngine, RenderOptions};
pub use procuracao::{ProcuracaoGenerator, ProcuracaoRequest};
pub use recibo::{ReciboGenerator, ReciboRequest};
pub use traits::{Generator, Validator};
pub use validation::{ValidationError, ValidationErrors};

use std::path::PathBuf;
use thiserror::Error;

use self::xml::XmlError;

/// Template could not be turned into an editable document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template {template} is not a valid docx package: {source}")]
    Package {
        template: String,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("template {template} has no {part} part")]
    MissingPart { template: String, part: String },
    #[error("malformed XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: XmlError,
    },
}

/// Substitution or serialization failed after the template was loaded.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: XmlError,
    },
    #[error("failed to write docx package: {0}")]
    Package(#[from] zip::result::ZipError),
    #[error("failed to write docx package: {0}")]
    Io(#[from] std::io::Error),
    #[error("document generation task was cancelled")]
    Cancelled,
}

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedDocument {
    pub fn docx(filename: String, bytes: Vec<u8>) -> Self {
        let content_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string();

        Self {
            filename,
            content_type,
            bytes,
        }
    }
}
