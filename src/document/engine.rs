//! Docx rendering engine.
//!
//! Loads a template package, runs the substitution passes over every text
//! part and serializes the result to an in-memory buffer.

use std::path::Path;

use super::context::Context;
use super::filler::fill_tree;
use super::package::DocxPackage;
use super::textbox::patch_text_boxes;
use super::traits::{DocumentRequest, Validator};
use super::xml::XmlTree;
use super::{DocumentError, GeneratedDocument, LoadError, RenderError};

/// Which passes to run on top of the body fill.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub patch_text_boxes: bool,
}

/// Stateless engine for rendering docx templates.
pub struct DocxRenderEngine;

impl DocxRenderEngine {
    /// Validate `request`, render it into the template and name the result.
    pub fn generate<R: DocumentRequest>(
        template_path: &Path,
        request: &R,
        options: RenderOptions,
    ) -> Result<GeneratedDocument, DocumentError> {
        request.validate()?;
        let context = request.context()?;
        let bytes = Self::render(template_path, &context, options)?;
        Ok(GeneratedDocument::docx(request.output_filename(), bytes))
    }

    /// Render the template at `template_path` with `context`.
    ///
    /// The template is read fresh on every call and never modified on disk.
    pub fn render(
        template_path: &Path,
        context: &Context,
        options: RenderOptions,
    ) -> Result<Vec<u8>, DocumentError> {
        log::debug!("Loading template {}", template_path.display());
        let package = DocxPackage::open(template_path)?;
        Self::render_package(package, context, options)
    }

    /// Render an already loaded package.
    pub fn render_package(
        mut package: DocxPackage,
        context: &Context,
        options: RenderOptions,
    ) -> Result<Vec<u8>, DocumentError> {
        for part in package.text_parts() {
            let Some(bytes) = package.part(&part) else {
                continue;
            };
            let mut tree = XmlTree::parse(bytes).map_err(|source| LoadError::Xml {
                part: part.clone(),
                source,
            })?;

            let paragraphs = fill_tree(&mut tree, context);
            let text_nodes = if options.patch_text_boxes {
                patch_text_boxes(&mut tree, context)
            } else {
                0
            };
            log::debug!(
                "{}: {} paragraph(s) filled, {} text box node(s) patched",
                part,
                paragraphs,
                text_nodes
            );

            if paragraphs + text_nodes > 0 {
                let xml = tree.to_bytes().map_err(|source| RenderError::Xml {
                    part: part.clone(),
                    source,
                })?;
                package.set_part(&part, xml);
            }
        }

        log::info!(
            "Rendered {} with {} context value(s)",
            package.label(),
            context.len()
        );
        Ok(package.to_bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::fixtures::{docx_with_body, paragraph, read_part, text_box_paragraph};
    use crate::document::package::MAIN_PART;

    fn package(inner: &str) -> DocxPackage {
        DocxPackage::from_bytes(docx_with_body(inner), "memoria").unwrap()
    }

    fn context() -> Context {
        [("nome_cliente", "Edinaldo Lima"), ("oab", "26.600")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_render_without_text_box_pass() {
        let inner = format!(
            "{}{}",
            paragraph("{{ nome_cliente }}"),
            text_box_paragraph(&["OAB {{ oab }}"])
        );
        let out = DocxRenderEngine::render_package(package(&inner), &context(), RenderOptions::default())
            .unwrap();
        let xml = read_part(&out, MAIN_PART);

        assert!(xml.contains("Edinaldo Lima"));
        assert!(xml.contains("OAB {{ oab }}"));
    }

    #[test]
    fn test_render_with_text_box_pass() {
        let inner = format!(
            "{}{}",
            paragraph("{{ nome_cliente }}"),
            text_box_paragraph(&["OAB {{ oab }}"])
        );
        let options = RenderOptions {
            patch_text_boxes: true,
        };
        let out = DocxRenderEngine::render_package(package(&inner), &context(), options).unwrap();
        let xml = read_part(&out, MAIN_PART);

        assert!(xml.contains("Edinaldo Lima"));
        assert!(xml.contains("OAB 26.600"));
        assert!(!xml.contains("{{"));
    }

    #[test]
    fn test_unused_context_keys_leave_document_unchanged() {
        let inner = paragraph("Sem marcadores");
        let original = read_part(&docx_with_body(&inner), MAIN_PART);
        let out = DocxRenderEngine::render_package(package(&inner), &context(), RenderOptions::default())
            .unwrap();

        assert_eq!(read_part(&out, MAIN_PART), original);
    }

    #[test]
    fn test_malformed_part_is_a_load_error() {
        let bytes = crate::document::fixtures::docx(&[("word/document.xml", "<w:document><w:body>")]);
        let package = DocxPackage::from_bytes(bytes, "quebrado").unwrap();
        let result = DocxRenderEngine::render_package(package, &context(), RenderOptions::default());

        assert!(matches!(result, Err(DocumentError::Load(LoadError::Xml { .. }))));
    }

    #[test]
    fn test_render_is_repeatable() {
        let inner = paragraph("{{ nome_cliente }}");
        let first = DocxRenderEngine::render_package(package(&inner), &context(), RenderOptions::default())
            .unwrap();
        let second = DocxRenderEngine::render_package(package(&inner), &context(), RenderOptions::default())
            .unwrap();

        assert_eq!(first, second);
    }
}
