//! Document pipeline: open → adapt → serialize.
//!
//! Pure dispatch plus lifecycle. The pipeline never talks to the network
//! and holds no translation state; the translator is supplied by the
//! caller, which keeps the adapters and the translation stack
//! independently testable.

use std::path::Path;

use log::info;

use crate::document::{docx, legacy, pptx, xlsx, DocumentKind, OoxmlPackage, SourceFormat};
use crate::errors::{AppError, DocumentError};
use crate::translation::UnitTranslator;

/// Drives one document through its format adapter
pub struct DocumentPipeline;

impl DocumentPipeline {
    /// Translate the document at `path`, returning the mutated in-memory
    /// package and the format tag selecting its serializer.
    ///
    /// Legacy binary formats short-circuit into a conversion-notice
    /// document without opening the input or calling the translator.
    pub async fn process(
        path: &Path,
        source_lang: &str,
        target_lang: &str,
        translator: &dyn UnitTranslator,
    ) -> Result<(OoxmlPackage, DocumentKind), AppError> {
        match SourceFormat::from_path(path)? {
            SourceFormat::Legacy(kind) => {
                info!(
                    "Legacy format upload ({}); producing a conversion notice instead of a translation",
                    path.display()
                );
                Ok((legacy::notice_document(kind), kind))
            }
            SourceFormat::Modern(kind) => {
                let mut pkg = OoxmlPackage::open(path)?;
                let marker = kind.marker_part();
                if !pkg.has_part(marker) {
                    return Err(DocumentError::Corrupted(format!(
                        "not a valid .{} container: missing {}",
                        kind.extension(),
                        marker
                    ))
                    .into());
                }
                match kind {
                    DocumentKind::Docx => {
                        docx::translate_document(&mut pkg, source_lang, target_lang, translator)
                            .await?;
                    }
                    DocumentKind::Xlsx => {
                        xlsx::translate_workbook(&mut pkg, source_lang, target_lang, translator)
                            .await?;
                    }
                    DocumentKind::Pptx => {
                        pptx::translate_presentation(&mut pkg, source_lang, target_lang, translator)
                            .await?;
                    }
                }
                Ok((pkg, kind))
            }
        }
    }

    /// Serialize a translated document to `path`
    pub fn save(pkg: &OoxmlPackage, path: &Path) -> Result<(), DocumentError> {
        pkg.save(path)
    }
}
