//! Flow-text adapter: translates WordprocessingML documents.
//!
//! Every `<w:p>` paragraph in `word/document.xml` is a text unit — body
//! paragraphs and table-cell paragraphs alike, since table cells contain
//! ordinary `w:p` elements. The paragraph's runs are replaced by a single
//! run carrying the translated text and the formatting snapshot of the
//! first original run; paragraph-level properties (`w:pPr`) are kept
//! verbatim. Run-level structure beyond the first run's snapshot does not
//! survive the replacement — a known limitation of destructive rewrite.
//!
//! Translation failures propagate and abort the whole document; there is
//! no per-paragraph recovery in this format.

use log::debug;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::document::{
    attr_value, collect_subtree, emit, parse_onoff, FormattingSnapshot, OoxmlPackage, TextUnit,
};
use crate::errors::{AppError, DocumentError};
use crate::translation::UnitTranslator;

/// Main document part of a WordprocessingML package
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Translate every non-empty paragraph of the document in place
pub async fn translate_document(
    pkg: &mut OoxmlPackage,
    source_lang: &str,
    target_lang: &str,
    translator: &dyn UnitTranslator,
) -> Result<(), AppError> {
    let xml = pkg.part_str(DOCUMENT_PART)?;
    let mut reader = Reader::from_str(&xml);
    let mut writer = Writer::new(Vec::new());
    let mut translated_count = 0usize;

    loop {
        let event = reader.read_event().map_err(DocumentError::from)?;
        match event {
            Event::Eof => break,
            Event::Start(start) if start.name().as_ref() == b"w:p" => {
                let paragraph = collect_subtree(&mut reader, start.into_owned(), b"w:p")?;
                let text = paragraph_text(&paragraph);
                if text.trim().is_empty() {
                    // Empty units are never sent to the translator and never rewritten
                    for event in paragraph {
                        emit(&mut writer, event)?;
                    }
                    continue;
                }
                // Capture before the content is cleared, apply after insertion
                let snapshot = first_run_snapshot(&paragraph);
                let translated = translator
                    .translate_unit(&text, source_lang, target_lang)
                    .await?;
                write_replaced_paragraph(&mut writer, &paragraph, &snapshot, &translated)?;
                translated_count += 1;
            }
            event => emit(&mut writer, event)?,
        }
    }

    debug!("Translated {} paragraph(s) in {}", translated_count, DOCUMENT_PART);
    pkg.put_part(DOCUMENT_PART, writer.into_inner());
    Ok(())
}

/// Enumerate the non-empty text units of the document without mutating it
pub fn text_units(pkg: &OoxmlPackage) -> Result<Vec<TextUnit>, DocumentError> {
    let xml = pkg.part_str(DOCUMENT_PART)?;
    let mut reader = Reader::from_str(&xml);
    let mut units = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(start) if start.name().as_ref() == b"w:p" => {
                let paragraph = collect_subtree(&mut reader, start.into_owned(), b"w:p")?;
                let text = paragraph_text(&paragraph);
                if !text.trim().is_empty() {
                    units.push(TextUnit {
                        formatting: first_run_snapshot(&paragraph),
                        text,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(units)
}

/// Concatenate the visible text of a buffered paragraph.
///
/// Only run content counts: `w:tab` under `w:pPr/w:tabs` defines tab
/// stops, not text, so tabs and breaks are collected inside runs only.
fn paragraph_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    let mut in_run = false;
    let mut in_text = false;
    for event in events {
        match event {
            Event::Start(e) if e.name().as_ref() == b"w:r" => in_run = true,
            Event::End(e) if e.name().as_ref() == b"w:r" => in_run = false,
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::Text(e) if in_text => {
                text.push_str(&e.unescape().unwrap_or_default());
            }
            Event::Empty(e) if in_run && e.name().as_ref() == b"w:tab" => text.push('\t'),
            Event::Empty(e)
                if in_run
                    && (e.name().as_ref() == b"w:br" || e.name().as_ref() == b"w:cr") =>
            {
                text.push('\n');
            }
            _ => {}
        }
    }
    text
}

/// Capture the formatting snapshot of the paragraph's first run
fn first_run_snapshot(events: &[Event<'_>]) -> FormattingSnapshot {
    let mut snapshot = FormattingSnapshot::default();
    let mut in_run = false;
    let mut in_rpr = false;
    for event in events {
        match event {
            Event::Start(e) if e.name().as_ref() == b"w:r" => in_run = true,
            Event::End(e) if e.name().as_ref() == b"w:r" && in_run => return snapshot,
            Event::Start(e) if in_run && e.name().as_ref() == b"w:rPr" => in_rpr = true,
            Event::End(e) if in_rpr && e.name().as_ref() == b"w:rPr" => return snapshot,
            Event::Start(e) | Event::Empty(e) if in_rpr => capture_run_property(&mut snapshot, e),
            _ => {}
        }
    }
    snapshot
}

/// Fold one `w:rPr` child element into the snapshot
fn capture_run_property(snapshot: &mut FormattingSnapshot, element: &BytesStart) {
    match element.name().as_ref() {
        b"w:rFonts" => {
            snapshot.font = attr_value(element, b"w:ascii")
                .or_else(|| attr_value(element, b"w:hAnsi"))
                .or_else(|| attr_value(element, b"w:eastAsia"));
        }
        b"w:b" => snapshot.bold = Some(parse_onoff(attr_value(element, b"w:val"))),
        b"w:i" => snapshot.italic = Some(parse_onoff(attr_value(element, b"w:val"))),
        b"w:u" => snapshot.underline = Some(parse_onoff(attr_value(element, b"w:val"))),
        b"w:sz" => {
            // Word stores font size in half-points
            snapshot.size_pt = attr_value(element, b"w:val")
                .and_then(|v| v.parse::<f32>().ok())
                .map(|v| v / 2.0);
        }
        b"w:color" => {
            snapshot.color_rgb = attr_value(element, b"w:val").filter(|v| v != "auto");
        }
        _ => {}
    }
}

/// Emit the paragraph with its runs replaced by one restyled run.
///
/// The original start tag and any leading `w:pPr` subtree are copied
/// verbatim; everything else inside the paragraph is dropped.
fn write_replaced_paragraph(
    writer: &mut Writer<Vec<u8>>,
    events: &[Event<'_>],
    snapshot: &FormattingSnapshot,
    translated: &str,
) -> Result<(), DocumentError> {
    emit(writer, events[0].clone())?;

    // Preserve paragraph-level properties when present as the first child
    if events.len() > 2 {
        match &events[1] {
            Event::Empty(e) if e.name().as_ref() == b"w:pPr" => {
                emit(writer, events[1].clone())?;
            }
            Event::Start(e) if e.name().as_ref() == b"w:pPr" => {
                let mut depth = 0usize;
                for event in &events[1..events.len() - 1] {
                    match event {
                        Event::Start(e) if e.name().as_ref() == b"w:pPr" => depth += 1,
                        Event::End(e) if e.name().as_ref() == b"w:pPr" => depth -= 1,
                        _ => {}
                    }
                    emit(writer, event.clone())?;
                    if depth == 0 {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    emit(writer, Event::Start(BytesStart::new("w:r")))?;
    for event in run_property_events(snapshot) {
        emit(writer, event)?;
    }
    let mut text_start = BytesStart::new("w:t");
    text_start.push_attribute(("xml:space", "preserve"));
    emit(writer, Event::Start(text_start))?;
    emit(writer, Event::Text(BytesText::new(translated)))?;
    emit(writer, Event::End(BytesEnd::new("w:t")))?;
    emit(writer, Event::End(BytesEnd::new("w:r")))?;

    emit(writer, events[events.len() - 1].clone())?;
    Ok(())
}

/// Build the `w:rPr` subtree reapplying a formatting snapshot
fn run_property_events(snapshot: &FormattingSnapshot) -> Vec<Event<'static>> {
    if snapshot.is_empty() {
        return Vec::new();
    }
    let mut events = vec![Event::Start(BytesStart::new("w:rPr"))];

    if let Some(font) = &snapshot.font {
        let mut fonts = BytesStart::new("w:rFonts");
        fonts.push_attribute(("w:ascii", font.as_str()));
        fonts.push_attribute(("w:hAnsi", font.as_str()));
        events.push(Event::Empty(fonts));
    }
    if let Some(bold) = snapshot.bold {
        let mut b = BytesStart::new("w:b");
        if !bold {
            b.push_attribute(("w:val", "0"));
        }
        events.push(Event::Empty(b));
    }
    if let Some(italic) = snapshot.italic {
        let mut i = BytesStart::new("w:i");
        if !italic {
            i.push_attribute(("w:val", "0"));
        }
        events.push(Event::Empty(i));
    }
    if let Some(color) = &snapshot.color_rgb {
        let mut c = BytesStart::new("w:color");
        c.push_attribute(("w:val", color.as_str()));
        events.push(Event::Empty(c));
    }
    if let Some(size_pt) = snapshot.size_pt {
        let half_points = (size_pt * 2.0).round() as u32;
        let mut sz = BytesStart::new("w:sz");
        sz.push_attribute(("w:val", half_points.to_string().as_str()));
        events.push(Event::Empty(sz));
    }
    if let Some(underline) = snapshot.underline {
        let mut u = BytesStart::new("w:u");
        u.push_attribute(("w:val", if underline { "single" } else { "none" }));
        events.push(Event::Empty(u));
    }

    events.push(Event::End(BytesEnd::new("w:rPr")));
    events
}
