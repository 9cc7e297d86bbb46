//! Markup scanning and splicing for the primary document part.
//!
//! The part is scanned exactly once, yielding every non-blank text node with
//! its raw byte range and the range of its enclosing paragraph element. All
//! later edits are [`Splice`]s against those ranges; bytes outside an edited
//! range are carried into the output untouched, so styling markup survives.

use std::ops::Range;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::TailorError;

/// One text node in the markup part.
#[derive(Debug, Clone)]
pub(crate) struct TextNode {
    /// Byte range of the raw (still-escaped) text inside the part.
    pub range: Range<usize>,
    /// Unescaped content.
    pub text: String,
    /// Byte range of the innermost paragraph element that closed around this
    /// node, tag to tag.
    pub paragraph: Option<Range<usize>>,
}

/// Scans the part, recording every text node with non-blank content.
///
/// A part that fails to scan is a corrupt container, which is the one fatal
/// condition in the pipeline.
pub(crate) fn scan_text_nodes(xml: &str) -> Result<Vec<TextNode>, TailorError> {
    let mut reader = Reader::from_str(xml);
    let mut nodes: Vec<TextNode> = Vec::new();
    // Open paragraph elements: (start offset, indexes of nodes inside).
    let mut open_paragraphs: Vec<(usize, Vec<usize>)> = Vec::new();
    let mut last_pos = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            TailorError::invalid_package(format!("markup part is not well-formed XML: {e}"))
        })?;
        let pos = reader.buffer_position();
        match event {
            Event::Start(start) if start.local_name().as_ref() == b"p" => {
                open_paragraphs.push((last_pos, Vec::new()));
            }
            Event::End(end) if end.local_name().as_ref() == b"p" => {
                if let Some((start, members)) = open_paragraphs.pop() {
                    for idx in members {
                        nodes[idx].paragraph = Some(start..pos);
                    }
                }
            }
            Event::Text(text) => {
                let unescaped = text.unescape().map_err(|e| {
                    TailorError::invalid_package(format!("markup text cannot be unescaped: {e}"))
                })?;
                if !unescaped.trim().is_empty() {
                    let idx = nodes.len();
                    nodes.push(TextNode {
                        range: last_pos..pos,
                        text: unescaped.into_owned(),
                        paragraph: None,
                    });
                    if let Some((_, members)) = open_paragraphs.last_mut() {
                        members.push(idx);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        last_pos = pos;
    }

    Ok(nodes)
}

/// Well-formedness check for a rewritten part.
pub(crate) fn validate_markup(xml: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }
}

/// A single edit. `range` is a raw byte range in the part; `replacement`
/// must already be XML-escaped. A zero-length range inserts.
#[derive(Debug, Clone)]
pub(crate) struct Splice {
    pub range: Range<usize>,
    pub replacement: String,
}

/// Applies splices left to right. A splice overlapping an earlier one is
/// skipped, never partially applied.
pub(crate) fn apply_splices(xml: &str, mut splices: Vec<Splice>) -> String {
    splices.sort_by_key(|s| (s.range.start, s.range.end));
    let mut out = String::with_capacity(xml.len() + xml.len() / 4);
    let mut cursor = 0usize;
    for splice in splices {
        if splice.range.start < cursor || splice.range.end > xml.len() {
            continue;
        }
        out.push_str(&xml[cursor..splice.range.start]);
        out.push_str(&splice.replacement);
        cursor = splice.range.end;
    }
    out.push_str(&xml[cursor..]);
    out
}

pub(crate) fn escape_text(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}
