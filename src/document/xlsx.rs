//! Tabular-grid adapter: translates SpreadsheetML workbooks.
//!
//! Every cell whose value is a non-empty string is a text unit, across
//! every worksheet. Cell styling lives on the cell itself and is never
//! touched, so no formatting snapshot is needed in this format.
//!
//! String values are stored in the workbook-wide shared-string table, so
//! the adapter rebuilds that table: every string cell is visited in
//! document order, its final text (translated, or the original when the
//! translator fails for that cell) interned into a fresh deduplicated
//! table, and the cell's index rewritten. A single cell failure never
//! aborts the sheet — the failed cell keeps its original value and
//! processing continues.

use std::collections::HashMap;

use log::{debug, warn};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::document::{attr_value, collect_subtree, emit, OoxmlPackage, TextUnit};
use crate::errors::{AppError, DocumentError};
use crate::translation::UnitTranslator;

/// Shared-string table part of a SpreadsheetML package
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// Deduplicating replacement shared-string table
#[derive(Debug, Default)]
struct StringTable {
    strings: Vec<String>,
    index: HashMap<String, usize>,
    /// Total number of cell references into the table
    refs: usize,
}

impl StringTable {
    /// Intern a string, returning its index in the rebuilt table
    fn intern(&mut self, value: String) -> usize {
        self.refs += 1;
        if let Some(&existing) = self.index.get(&value) {
            return existing;
        }
        let index = self.strings.len();
        self.index.insert(value.clone(), index);
        self.strings.push(value);
        index
    }
}

/// Translate every non-empty string cell of the workbook in place
pub async fn translate_workbook(
    pkg: &mut OoxmlPackage,
    source_lang: &str,
    target_lang: &str,
    translator: &dyn UnitTranslator,
) -> Result<(), AppError> {
    let shared = read_shared_strings(pkg)?;
    let mut table = StringTable::default();

    let sheet_names: Vec<String> = pkg
        .part_names()
        .filter(|name| is_sheet_part(name))
        .map(str::to_string)
        .collect();

    let mut rewritten = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let xml = pkg.part_str(name)?;
        let output = rewrite_sheet(&xml, &shared, &mut table, source_lang, target_lang, translator)
            .await?;
        rewritten.push((name.clone(), output));
    }
    for (name, data) in rewritten {
        pkg.put_part(name, data);
    }

    if table.refs > 0 {
        debug!(
            "Rebuilt shared-string table: {} reference(s), {} unique string(s)",
            table.refs,
            table.strings.len()
        );
        pkg.put_part(SHARED_STRINGS_PART, build_shared_strings(&table)?);
    }
    Ok(())
}

/// Enumerate the non-empty string cells of the workbook without mutating it
pub fn text_units(pkg: &OoxmlPackage) -> Result<Vec<TextUnit>, DocumentError> {
    let shared = read_shared_strings(pkg)?;
    let sheet_names: Vec<String> = pkg
        .part_names()
        .filter(|name| is_sheet_part(name))
        .map(str::to_string)
        .collect();

    let mut units = Vec::new();
    for name in &sheet_names {
        let xml = pkg.part_str(name)?;
        let mut reader = Reader::from_str(&xml);
        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Start(start) if start.name().as_ref() == b"c" => {
                    let cell = collect_subtree(&mut reader, start.into_owned(), b"c")?;
                    if let Some(text) = cell_string_value(&cell, &shared)? {
                        if !text.trim().is_empty() {
                            units.push(TextUnit {
                                text,
                                formatting: Default::default(),
                            });
                        }
                    }
                }
                _ => {}
            }
        }
    }
    Ok(units)
}

fn is_sheet_part(name: &str) -> bool {
    name.starts_with("xl/worksheets/") && name.ends_with(".xml") && !name.contains("_rels")
}

/// Rewrite one worksheet, translating its string cells
async fn rewrite_sheet(
    xml: &str,
    shared: &[String],
    table: &mut StringTable,
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
            Event::Start(start) if start.name().as_ref() == b"c" => {
                let cell = collect_subtree(&mut reader, start.into_owned(), b"c")?;
                rewrite_cell(&mut writer, cell, shared, table, source_lang, target_lang, translator)
                    .await?;
            }
            event => emit(&mut writer, event)?,
        }
    }

    Ok(writer.into_inner())
}

/// Rewrite one buffered cell, isolating translation failures to the cell
async fn rewrite_cell(
    writer: &mut Writer<Vec<u8>>,
    cell: Vec<Event<'static>>,
    shared: &[String],
    table: &mut StringTable,
    source_lang: &str,
    target_lang: &str,
    translator: &dyn UnitTranslator,
) -> Result<(), AppError> {
    let Event::Start(start) = &cell[0] else {
        return Err(DocumentError::Corrupted("malformed cell buffer".to_string()).into());
    };
    let cell_type = attr_value(start, b"t");
    let cell_ref = attr_value(start, b"r").unwrap_or_else(|| "?".to_string());

    match cell_type.as_deref() {
        Some("s") => {
            let Some(index) = shared_index(&cell)? else {
                // Style-only cell with no value child
                for event in cell {
                    emit(writer, event)?;
                }
                return Ok(());
            };
            let original = shared.get(index).ok_or_else(|| {
                DocumentError::Corrupted(format!(
                    "cell {} references shared string {} out of range",
                    cell_ref, index
                ))
            })?;

            let final_text = if original.trim().is_empty() {
                original.clone()
            } else {
                match translator
                    .translate_unit(original, source_lang, target_lang)
                    .await
                {
                    Ok(translated) => translated,
                    Err(e) => {
                        // Fault isolation: this cell keeps its original value
                        warn!("Cell {}: translation failed ({}); keeping original value", cell_ref, e);
                        original.clone()
                    }
                }
            };
            let new_index = table.intern(final_text).to_string();

            let mut in_value = false;
            for event in cell {
                match event {
                    Event::Start(e) if e.name().as_ref() == b"v" => {
                        in_value = true;
                        emit(writer, Event::Start(e))?;
                    }
                    Event::End(e) if e.name().as_ref() == b"v" => {
                        in_value = false;
                        emit(writer, Event::End(e))?;
                    }
                    Event::Text(_) if in_value => {
                        emit(writer, Event::Text(BytesText::new(&new_index)))?;
                    }
                    event => emit(writer, event)?,
                }
            }
            Ok(())
        }
        Some("inlineStr") => {
            let text = inline_text(&cell);
            if text.trim().is_empty() {
                for event in cell {
                    emit(writer, event)?;
                }
                return Ok(());
            }
            match translator.translate_unit(&text, source_lang, target_lang).await {
                Ok(translated) => {
                    emit(writer, cell[0].clone())?;
                    emit(writer, Event::Start(BytesStart::new("is")))?;
                    let mut text_start = BytesStart::new("t");
                    text_start.push_attribute(("xml:space", "preserve"));
                    emit(writer, Event::Start(text_start))?;
                    emit(writer, Event::Text(BytesText::new(&translated)))?;
                    emit(writer, Event::End(BytesEnd::new("t")))?;
                    emit(writer, Event::End(BytesEnd::new("is")))?;
                    emit(writer, cell[cell.len() - 1].clone())?;
                    Ok(())
                }
                Err(e) => {
                    warn!("Cell {}: translation failed ({}); keeping original value", cell_ref, e);
                    for event in cell {
                        emit(writer, event)?;
                    }
                    Ok(())
                }
            }
        }
        // Numbers, booleans and cached formula results pass through untouched
        _ => {
            for event in cell {
                emit(writer, event)?;
            }
            Ok(())
        }
    }
}

/// Shared-string index referenced by a buffered `t="s"` cell
fn shared_index(cell: &[Event<'_>]) -> Result<Option<usize>, DocumentError> {
    let mut in_value = false;
    for event in cell {
        match event {
            Event::Start(e) if e.name().as_ref() == b"v" => in_value = true,
            Event::End(e) if e.name().as_ref() == b"v" => in_value = false,
            Event::Text(e) if in_value => {
                let raw = e.unescape().unwrap_or_default();
                return raw
                    .trim()
                    .parse::<usize>()
                    .map(Some)
                    .map_err(|_| {
                        DocumentError::Corrupted(format!("invalid shared string reference: {}", raw))
                    });
            }
            _ => {}
        }
    }
    Ok(None)
}

/// Concatenated text of a buffered `t="inlineStr"` cell
fn inline_text(cell: &[Event<'_>]) -> String {
    let mut text = String::new();
    let mut in_text = false;
    for event in cell {
        match event {
            Event::Start(e) if e.name().as_ref() == b"t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"t" => in_text = false,
            Event::Text(e) if in_text => text.push_str(&e.unescape().unwrap_or_default()),
            _ => {}
        }
    }
    text
}

/// Resolve a buffered cell to its string value, if it has one
fn cell_string_value(
    cell: &[Event<'_>],
    shared: &[String],
) -> Result<Option<String>, DocumentError> {
    let Event::Start(start) = &cell[0] else {
        return Ok(None);
    };
    match attr_value(start, b"t").as_deref() {
        Some("s") => match shared_index(cell)? {
            Some(index) => Ok(Some(shared.get(index).cloned().ok_or_else(|| {
                DocumentError::Corrupted(format!("shared string {} out of range", index))
            })?)),
            None => Ok(None),
        },
        Some("inlineStr") => Ok(Some(inline_text(cell))),
        _ => Ok(None),
    }
}

/// Read the shared-string table, flattening rich-text runs per entry
fn read_shared_strings(pkg: &OoxmlPackage) -> Result<Vec<String>, DocumentError> {
    if !pkg.has_part(SHARED_STRINGS_PART) {
        return Ok(Vec::new());
    }
    let xml = pkg.part_str(SHARED_STRINGS_PART)?;
    let mut reader = Reader::from_str(&xml);
    let mut strings = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(start) if start.name().as_ref() == b"si" => {
                let entry = collect_subtree(&mut reader, start.into_owned(), b"si")?;
                strings.push(inline_text(&entry));
            }
            _ => {}
        }
    }
    Ok(strings)
}

/// Serialize the rebuilt shared-string table
fn build_shared_strings(table: &StringTable) -> Result<Vec<u8>, DocumentError> {
    let mut writer = Writer::new(Vec::new());
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )?;

    let mut sst = BytesStart::new("sst");
    sst.push_attribute(("xmlns", SPREADSHEET_NS));
    sst.push_attribute(("count", table.refs.to_string().as_str()));
    sst.push_attribute(("uniqueCount", table.strings.len().to_string().as_str()));
    emit(&mut writer, Event::Start(sst))?;

    for value in &table.strings {
        emit(&mut writer, Event::Start(BytesStart::new("si")))?;
        let mut text_start = BytesStart::new("t");
        text_start.push_attribute(("xml:space", "preserve"));
        emit(&mut writer, Event::Start(text_start))?;
        emit(&mut writer, Event::Text(BytesText::new(value)))?;
        emit(&mut writer, Event::End(BytesEnd::new("t")))?;
        emit(&mut writer, Event::End(BytesEnd::new("si")))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("sst")))?;
    Ok(writer.into_inner())
}
