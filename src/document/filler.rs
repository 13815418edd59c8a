//! Template filler: placeholder substitution over body paragraphs.
//!
//! Editors often split a single `{{ key }}` over several runs (spell check,
//! mixed formatting), so matching works on the concatenated text of a whole
//! paragraph. The replacement is written into the run where the token starts
//! and the rest of the token is cut from the runs it spilled into; everything
//! else keeps its run and its formatting.
//!
//! Text boxes are left alone here, see [`super::textbox`].

use std::ops::Range;

use super::context::Context;
use super::placeholder::{find_substitutions, MissingKey, Substitution};
use super::xml::{Element, XmlTree, PARAGRAPH, TEXT, TEXTBOX_CONTENT};

/// Fill every body paragraph of `tree`. Returns the number of paragraphs changed.
///
/// Keys missing from the context render as empty strings.
pub fn fill_tree(tree: &mut XmlTree, context: &Context) -> usize {
    let mut changed = 0;
    for paragraph in tree.collect_mut(PARAGRAPH, &[TEXTBOX_CONTENT]) {
        if fill_paragraph(paragraph, context) {
            changed += 1;
        }
    }
    changed
}

fn fill_paragraph(paragraph: &mut Element, context: &Context) -> bool {
    let mut texts = Vec::new();
    paragraph.collect_mut(TEXT, &[TEXTBOX_CONTENT], &mut texts);
    if texts.is_empty() {
        return false;
    }

    let segments: Vec<String> = texts.iter().map(|t| t.text()).collect();
    let joined = segments.concat();
    let substitutions = find_substitutions(&joined, context, MissingKey::Blank);
    if substitutions.is_empty() {
        return false;
    }

    for sub in &substitutions {
        log::debug!("Filling placeholder '{}' in body paragraph", sub.key);
    }

    let rewritten = redistribute(&segments, &substitutions);
    for ((text, old), new) in texts.into_iter().zip(&segments).zip(rewritten) {
        if *old != new {
            text.set_text(new);
        }
    }
    true
}

/// Apply `substitutions` (ranges into the concatenation of `segments`) and
/// split the result back into one string per segment.
fn redistribute(segments: &[String], substitutions: &[Substitution]) -> Vec<String> {
    let joined = segments.concat();
    let mut bounds = Vec::with_capacity(segments.len());
    let mut offset = 0;
    for segment in segments {
        bounds.push(offset..offset + segment.len());
        offset += segment.len();
    }

    let mut out = vec![String::new(); segments.len()];
    let mut cursor = 0;
    for sub in substitutions {
        copy_span(&joined, &bounds, cursor..sub.range.start, &mut out);
        let owner = bounds
            .iter()
            .position(|b| b.start <= sub.range.start && sub.range.start < b.end)
            .unwrap_or(segments.len() - 1);
        out[owner].push_str(&sub.value);
        cursor = sub.range.end;
    }
    copy_span(&joined, &bounds, cursor..joined.len(), &mut out);
    out
}

fn copy_span(joined: &str, bounds: &[Range<usize>], span: Range<usize>, out: &mut [String]) {
    for (i, bound) in bounds.iter().enumerate() {
        let start = bound.start.max(span.start);
        let end = bound.end.min(span.end);
        if start < end {
            out[i].push_str(&joined[start..end]);
        }
    }
}
