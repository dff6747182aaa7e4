/*!
 * Format-aware document processing.
 *
 * One adapter per document kind knows how to enumerate the translatable
 * text units of its format and how to write a translated unit back while
 * preserving the unit's formatting snapshot:
 * - `docx`: flow text — every paragraph, including table-cell paragraphs
 * - `xlsx`: tabular grid — every string-valued cell in every sheet
 * - `pptx`: slide deck — every text body, including table cells in shapes
 * - `legacy`: pre-XML binary formats — replaced by a conversion notice
 *
 * `package` holds the ZIP container, `pipeline` dispatches by extension
 * and owns serialization.
 */

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::errors::DocumentError;

pub mod docx;
pub mod legacy;
pub mod package;
pub mod pipeline;
pub mod pptx;
pub mod xlsx;

pub use package::OoxmlPackage;
pub use pipeline::DocumentPipeline;

/// Format tag: selects the serializer and output extension for a
/// translated in-memory document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Word-processing document (.docx)
    Docx,
    /// Spreadsheet workbook (.xlsx)
    Xlsx,
    /// Slide presentation (.pptx)
    Pptx,
}

impl DocumentKind {
    /// Output file extension for this kind
    pub fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
            Self::Pptx => "pptx",
        }
    }

    /// The package part whose presence identifies a well-formed container
    pub fn marker_part(self) -> &'static str {
        match self {
            Self::Docx => "word/document.xml",
            Self::Xlsx => "xl/workbook.xml",
            Self::Pptx => "ppt/presentation.xml",
        }
    }
}

/// Classified input format: a modern OOXML container, or a legacy binary
/// format that is answered with a conversion notice in the modern
/// container of the same family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Translatable OOXML document
    Modern(DocumentKind),
    /// Legacy binary format; not parsed, only answered with a notice
    Legacy(DocumentKind),
}

impl SourceFormat {
    /// Classify a file strictly by its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "docx" => Ok(Self::Modern(DocumentKind::Docx)),
            "xlsx" => Ok(Self::Modern(DocumentKind::Xlsx)),
            "pptx" => Ok(Self::Modern(DocumentKind::Pptx)),
            "doc" => Ok(Self::Legacy(DocumentKind::Docx)),
            "xls" => Ok(Self::Legacy(DocumentKind::Xlsx)),
            "ppt" => Ok(Self::Legacy(DocumentKind::Pptx)),
            _ => Err(DocumentError::UnsupportedFormat(
                path.to_string_lossy().into_owned(),
            )),
        }
    }
}

/// Captured style attributes of a text unit's first styled run.
///
/// Captured strictly before the unit's content is replaced and reapplied
/// to the replacement run afterwards. Spreadsheet cells carry no snapshot:
/// their styling lives on the cell, which value replacement never touches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormattingSnapshot {
    /// Font family name
    pub font: Option<String>,
    /// Font size in points
    pub size_pt: Option<f32>,
    /// Bold flag
    pub bold: Option<bool>,
    /// Italic flag
    pub italic: Option<bool>,
    /// Underline flag
    pub underline: Option<bool>,
    /// Font color as an RRGGBB hex string
    pub color_rgb: Option<String>,
}

impl FormattingSnapshot {
    /// True when no attribute was captured
    pub fn is_empty(&self) -> bool {
        self.font.is_none()
            && self.size_pt.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.color_rgb.is_none()
    }
}

/// One translatable span as enumerated by an adapter
#[derive(Debug, Clone)]
pub struct TextUnit {
    /// Raw text of the unit
    pub text: String,
    /// Formatting snapshot of the unit's first styled run
    pub formatting: FormattingSnapshot,
}

/// Read the subtree opened by `start` (already consumed from the reader),
/// returning all events including `start` itself and the matching end tag.
pub(crate) fn collect_subtree(
    reader: &mut Reader<&[u8]>,
    start: BytesStart<'static>,
    name: &[u8],
) -> Result<Vec<Event<'static>>, DocumentError> {
    let mut events = vec![Event::Start(start)];
    let mut depth = 1usize;
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(e) if e.name().as_ref() == name => depth += 1,
            Event::End(e) if e.name().as_ref() == name => depth -= 1,
            Event::Eof => {
                return Err(DocumentError::Corrupted(format!(
                    "unexpected end of XML inside <{}>",
                    String::from_utf8_lossy(name)
                )));
            }
            _ => {}
        }
        let done = depth == 0;
        events.push(event.into_owned());
        if done {
            return Ok(events);
        }
    }
}

/// Write one event, folding the writer's error into the document error set
pub(crate) fn emit<W: std::io::Write>(
    writer: &mut Writer<W>,
    event: Event<'_>,
) -> Result<(), DocumentError> {
    writer
        .write_event(event)
        .map_err(|e| DocumentError::Corrupted(e.to_string()))
}

/// Look up an attribute value on a start tag
pub(crate) fn attr_value(start: &BytesStart, key: &[u8]) -> Option<String> {
    start
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// Interpret an OOXML on/off attribute: absent means on, "0"/"false"/"none" off
pub(crate) fn parse_onoff(value: Option<String>) -> bool {
    match value.as_deref() {
        None => true,
        Some("0") | Some("false") | Some("none") => false,
        Some(_) => true,
    }
}
