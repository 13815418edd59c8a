//! Reading and writing the docx zip package.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use super::{LoadError, RenderError};

pub const MAIN_PART: &str = "word/document.xml";

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    data: Vec<u8>,
    is_dir: bool,
}

/// All entries of a docx package, held in memory in archive order.
#[derive(Debug, Clone)]
pub struct DocxPackage {
    label: String,
    entries: Vec<Entry>,
}

impl DocxPackage {
    /// Read the template at `path`. The file itself is never written to.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes, &path.display().to_string())
    }

    pub fn from_bytes(bytes: Vec<u8>, label: &str) -> Result<Self, LoadError> {
        let package_error = |source| LoadError::Package {
            template: label.to_string(),
            source,
        };

        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(package_error)?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(package_error)?;
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data).map_err(|source| LoadError::Io {
                path: label.into(),
                source,
            })?;
            entries.push(Entry {
                name: file.name().to_string(),
                is_dir: file.is_dir(),
                data,
            });
        }

        let package = Self {
            label: label.to_string(),
            entries,
        };
        if package.part(MAIN_PART).is_none() {
            return Err(LoadError::MissingPart {
                template: package.label,
                part: MAIN_PART.to_string(),
            });
        }
        Ok(package)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| !e.is_dir && e.name == name)
            .map(|e| e.data.as_slice())
    }

    /// Replace the content of an existing part. Unknown names are ignored.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.data = data;
        }
    }

    /// Parts that carry document text: the main part, then headers and footers.
    pub fn text_parts(&self) -> Vec<String> {
        let mut parts = vec![MAIN_PART.to_string()];
        parts.extend(
            self.entries
                .iter()
                .filter(|e| !e.is_dir && is_header_or_footer(&e.name))
                .map(|e| e.name.clone()),
        );
        parts
    }

    /// Serialize the package. Entry timestamps are pinned so the same input
    /// always produces the same bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RenderError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &self.entries {
            if entry.is_dir {
                zip.add_directory(entry.name.as_str(), options)?;
            } else {
                zip.start_file(entry.name.as_str(), options)?;
                zip.write_all(&entry.data)?;
            }
        }

        Ok(zip.finish()?.into_inner())
    }
}

fn is_header_or_footer(name: &str) -> bool {
    (name.starts_with("word/header") || name.starts_with("word/footer")) && name.ends_with(".xml")
}
