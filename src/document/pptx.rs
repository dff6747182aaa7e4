//! Slide-deck adapter: translates PresentationML slides.
//!
//! Every text body on a slide is a text unit: a shape's text frame
//! (`p:txBody`) or a table cell's text frame (`a:txBody`) — tables nested
//! in graphic frames are covered by matching both element names. The
//! paragraphs of a text body are joined with newlines, translated as one
//! unit, and rebuilt as one paragraph per translated line carrying the
//! formatting snapshot of the first original run. `a:bodyPr` and
//! `a:lstStyle` are preserved verbatim.
//!
//! Translation failures propagate and abort the whole document, matching
//! the flow-text policy rather than the spreadsheet one.

use log::debug;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::document::{
    attr_value, collect_subtree, emit, parse_onoff, FormattingSnapshot, OoxmlPackage, TextUnit,
};
use crate::errors::{AppError, DocumentError};
use crate::translation::UnitTranslator;

/// Translate every non-empty text body on every slide in place
pub async fn translate_presentation(
    pkg: &mut OoxmlPackage,
    source_lang: &str,
    target_lang: &str,
    translator: &dyn UnitTranslator,
) -> Result<(), AppError> {
    let slide_names: Vec<String> = pkg
        .part_names()
        .filter(|name| is_slide_part(name))
        .map(str::to_string)
        .collect();

    for name in &slide_names {
        let xml = pkg.part_str(name)?;
        let output = rewrite_slide(&xml, source_lang, target_lang, translator).await?;
        pkg.put_part(name.clone(), output);
    }
    debug!("Processed {} slide part(s)", slide_names.len());
    Ok(())
}

/// Enumerate the non-empty text units of the presentation without mutating it
pub fn text_units(pkg: &OoxmlPackage) -> Result<Vec<TextUnit>, DocumentError> {
    let slide_names: Vec<String> = pkg
        .part_names()
        .filter(|name| is_slide_part(name))
        .map(str::to_string)
        .collect();

    let mut units = Vec::new();
    for name in &slide_names {
        let xml = pkg.part_str(name)?;
        let mut reader = Reader::from_str(&xml);
        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Start(start) if is_text_body(start.name().as_ref()) => {
                    let tag = start.name().as_ref().to_vec();
                    let body = collect_subtree(&mut reader, start.into_owned(), &tag)?;
                    let text = body_text(&body);
                    if !text.trim().is_empty() {
                        units.push(TextUnit {
                            formatting: first_run_snapshot(&body),
                            text,
                        });
                    }
                }
                _ => {}
            }
        }
    }
    Ok(units)
}

fn is_slide_part(name: &str) -> bool {
    name.starts_with("ppt/slides/slide") && name.ends_with(".xml")
}

/// Shape text frames are `p:txBody`, table-cell frames are `a:txBody`
fn is_text_body(name: &[u8]) -> bool {
    name == b"p:txBody" || name == b"a:txBody"
}

/// Rewrite one slide part, translating its text bodies
async fn rewrite_slide(
    xml: &str,
    source_lang: &str,
    target_lang: &str,
    translator: &dyn UnitTranslator,
) -> Result<Vec<u8>, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    loop {
        let event = reader.read_event().map_err(DocumentError::from)?;
        match event {
            Event::Eof => break,
            Event::Start(start) if is_text_body(start.name().as_ref()) => {
                let tag = start.name().as_ref().to_vec();
                let body = collect_subtree(&mut reader, start.into_owned(), &tag)?;
                let text = body_text(&body);
                if text.trim().is_empty() {
                    for event in body {
                        emit(&mut writer, event)?;
                    }
                    continue;
                }
                let snapshot = first_run_snapshot(&body);
                let translated = translator
                    .translate_unit(&text, source_lang, target_lang)
                    .await?;
                write_replaced_body(&mut writer, &body, &snapshot, &translated)?;
            }
            event => emit(&mut writer, event)?,
        }
    }

    Ok(writer.into_inner())
}

/// Visible text of a buffered text body: paragraphs joined with newlines
fn body_text(events: &[Event<'_>]) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    for event in events {
        match event {
            Event::Start(e) if e.name().as_ref() == b"a:p" => current = Some(String::new()),
            Event::End(e) if e.name().as_ref() == b"a:p" => {
                if let Some(paragraph) = current.take() {
                    paragraphs.push(paragraph);
                }
            }
            Event::Start(e) if e.name().as_ref() == b"a:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"a:t" => in_text = false,
            Event::Text(e) if in_text => {
                if let Some(paragraph) = current.as_mut() {
                    paragraph.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"a:br" => {
                if let Some(paragraph) = current.as_mut() {
                    paragraph.push('\n');
                }
            }
            _ => {}
        }
    }
    paragraphs.join("\n")
}

/// Capture the formatting snapshot of the body's first run
fn first_run_snapshot(events: &[Event<'_>]) -> FormattingSnapshot {
    let mut snapshot = FormattingSnapshot::default();
    let mut in_run = false;
    let mut in_rpr = false;
    let mut in_outline = false;
    let mut in_fill = false;
    for event in events {
        match event {
            Event::Start(e) if e.name().as_ref() == b"a:r" => in_run = true,
            Event::End(e) if e.name().as_ref() == b"a:r" && in_run => return snapshot,
            Event::Start(e) if in_run && !in_rpr && e.name().as_ref() == b"a:rPr" => {
                capture_run_attributes(&mut snapshot, e);
                in_rpr = true;
            }
            Event::Empty(e) if in_run && !in_rpr && e.name().as_ref() == b"a:rPr" => {
                capture_run_attributes(&mut snapshot, e);
                return snapshot;
            }
            Event::End(e) if in_rpr && e.name().as_ref() == b"a:rPr" => return snapshot,
            Event::Start(e) if in_rpr && e.name().as_ref() == b"a:ln" => in_outline = true,
            Event::End(e) if in_rpr && e.name().as_ref() == b"a:ln" => in_outline = false,
            Event::Start(e) if in_rpr && !in_outline && e.name().as_ref() == b"a:solidFill" => {
                in_fill = true;
            }
            Event::End(e) if in_fill && e.name().as_ref() == b"a:solidFill" => in_fill = false,
            Event::Start(e) | Event::Empty(e) if in_fill && e.name().as_ref() == b"a:srgbClr" => {
                if snapshot.color_rgb.is_none() {
                    snapshot.color_rgb = attr_value(e, b"val");
                }
            }
            Event::Start(e) | Event::Empty(e) if in_rpr && e.name().as_ref() == b"a:latin" => {
                snapshot.font = attr_value(e, b"typeface");
            }
            _ => {}
        }
    }
    snapshot
}

/// Fold the attributes of an `a:rPr` element into the snapshot
fn capture_run_attributes(snapshot: &mut FormattingSnapshot, element: &BytesStart) {
    // DrawingML stores font size in hundredths of a point
    snapshot.size_pt = attr_value(element, b"sz")
        .and_then(|v| v.parse::<f32>().ok())
        .map(|v| v / 100.0);
    snapshot.bold = attr_value(element, b"b").map(|v| parse_onoff(Some(v)));
    snapshot.italic = attr_value(element, b"i").map(|v| parse_onoff(Some(v)));
    snapshot.underline = attr_value(element, b"u").map(|v| parse_onoff(Some(v)));
}

/// Emit the text body with its paragraphs replaced by restyled ones.
///
/// `a:bodyPr` (and `a:lstStyle` when present) are copied verbatim; one
/// paragraph is written per line of the translated text.
fn write_replaced_body(
    writer: &mut Writer<Vec<u8>>,
    events: &[Event<'_>],
    snapshot: &FormattingSnapshot,
    translated: &str,
) -> Result<(), DocumentError> {
    emit(writer, events[0].clone())?;

    let mut cursor = 1usize;
    let mut body_pr_copied = false;
    for name in [b"a:bodyPr".as_slice(), b"a:lstStyle".as_slice()] {
        if let Some(end) = leading_subtree_end(events, cursor, name) {
            for event in &events[cursor..=end] {
                emit(writer, event.clone())?;
            }
            if name == b"a:bodyPr" {
                body_pr_copied = true;
            }
            cursor = end + 1;
        }
    }
    if !body_pr_copied {
        // The schema requires a body-properties element
        emit(writer, Event::Empty(BytesStart::new("a:bodyPr")))?;
    }

    for line in translated.split('\n') {
        emit(writer, Event::Start(BytesStart::new("a:p")))?;
        emit(writer, Event::Start(BytesStart::new("a:r")))?;
        for event in run_property_events(snapshot) {
            emit(writer, event)?;
        }
        emit(writer, Event::Start(BytesStart::new("a:t")))?;
        emit(writer, Event::Text(BytesText::new(line)))?;
        emit(writer, Event::End(BytesEnd::new("a:t")))?;
        emit(writer, Event::End(BytesEnd::new("a:r")))?;
        emit(writer, Event::End(BytesEnd::new("a:p")))?;
    }

    emit(writer, events[events.len() - 1].clone())?;
    Ok(())
}

/// If `events[start]` opens (or is) an element named `name`, return the
/// index of its closing event
fn leading_subtree_end(events: &[Event<'_>], start: usize, name: &[u8]) -> Option<usize> {
    match events.get(start)? {
        Event::Empty(e) if e.name().as_ref() == name => Some(start),
        Event::Start(e) if e.name().as_ref() == name => {
            let mut depth = 0usize;
            for (offset, event) in events[start..].iter().enumerate() {
                match event {
                    Event::Start(e) if e.name().as_ref() == name => depth += 1,
                    Event::End(e) if e.name().as_ref() == name => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(start + offset);
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        _ => None,
    }
}

/// Build the `a:rPr` element reapplying a formatting snapshot
fn run_property_events(snapshot: &FormattingSnapshot) -> Vec<Event<'static>> {
    if snapshot.is_empty() {
        return Vec::new();
    }
    let mut rpr = BytesStart::new("a:rPr");
    if let Some(size_pt) = snapshot.size_pt {
        let hundredths = (size_pt * 100.0).round() as u32;
        rpr.push_attribute(("sz", hundredths.to_string().as_str()));
    }
    if let Some(bold) = snapshot.bold {
        rpr.push_attribute(("b", if bold { "1" } else { "0" }));
    }
    if let Some(italic) = snapshot.italic {
        rpr.push_attribute(("i", if italic { "1" } else { "0" }));
    }
    if let Some(underline) = snapshot.underline {
        rpr.push_attribute(("u", if underline { "sng" } else { "none" }));
    }

    let has_children = snapshot.color_rgb.is_some() || snapshot.font.is_some();
    if !has_children {
        return vec![Event::Empty(rpr)];
    }

    let mut events = vec![Event::Start(rpr)];
    if let Some(color) = &snapshot.color_rgb {
        events.push(Event::Start(BytesStart::new("a:solidFill")));
        let mut clr = BytesStart::new("a:srgbClr");
        clr.push_attribute(("val", color.as_str()));
        events.push(Event::Empty(clr));
        events.push(Event::End(BytesEnd::new("a:solidFill")));
    }
    if let Some(font) = &snapshot.font {
        let mut latin = BytesStart::new("a:latin");
        latin.push_attribute(("typeface", font.as_str()));
        events.push(Event::Empty(latin));
    }
    events.push(Event::End(BytesEnd::new("a:rPr")));
    events
}
