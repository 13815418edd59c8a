//! Text-box patcher.
//!
//! The body pass does not descend into floating text boxes (`w:txbxContent`).
//! This pass visits them explicitly: container, then paragraph, run, and text
//! node, substituting tokens inside each text node on its own. A token split
//! over two runs inside a text box is therefore not replaced.
//!
//! Word stores a text box twice (DrawingML plus a VML fallback); both copies
//! are `w:txbxContent` containers and both get patched.

use super::context::Context;
use super::placeholder::{substitute, MissingKey};
use super::xml::{XmlTree, PARAGRAPH, RUN, TEXT, TEXTBOX_CONTENT};

/// Patch every text box in `tree`. Returns the number of text nodes changed.
///
/// Only keys present in the context are replaced; other tokens stay as they are.
pub fn patch_text_boxes(tree: &mut XmlTree, context: &Context) -> usize {
    let mut changed = 0;

    for container in tree.collect_mut(TEXTBOX_CONTENT, &[]) {
        let mut paragraphs = Vec::new();
        container.collect_mut(PARAGRAPH, &[], &mut paragraphs);

        for paragraph in paragraphs {
            let mut runs = Vec::new();
            paragraph.collect_mut(RUN, &[TEXTBOX_CONTENT], &mut runs);

            for run in runs {
                let mut texts = Vec::new();
                run.collect_mut(TEXT, &[], &mut texts);

                for text in texts {
                    let current = text.text();
                    let patched = substitute(&current, context, MissingKey::Keep).into_owned();
                    if patched != current {
                        text.set_text(patched);
                        changed += 1;
                    }
                }
            }
        }
    }

    changed
}
