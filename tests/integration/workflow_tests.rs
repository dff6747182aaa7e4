/*!
 * End-to-end document translation tests: fixture documents driven
 * through the pipeline and the controller with translator doubles.
 */

use std::sync::Arc;

use doctrans::app_config::{Config, RequestOverrides};
use doctrans::app_controller::Controller;
use doctrans::document::{docx, xlsx, DocumentKind, DocumentPipeline, OoxmlPackage};
use doctrans::errors::TranslationError;
use doctrans::translation::TwoStageTranslator;

use crate::common::{
    build_docx, build_xlsx, save_fixture, DocxParagraph, MockClient, MockUnitTranslator,
};

#[tokio::test]
async fn test_endToEnd_boldParagraph_shouldKeepFormattingAcrossTranslation() {
    // One bold 14pt paragraph "Hello world", en -> zh
    let pkg = build_docx(&[DocxParagraph::bold_sized("Hello world", 14.0)], &[]);
    let (_guard, input) = save_fixture(&pkg, "hello.docx");

    let translator = MockUnitTranslator::fixed("你好世界");
    let (translated, kind) = DocumentPipeline::process(&input, "en", "zh", &translator)
        .await
        .unwrap();
    assert_eq!(kind, DocumentKind::Docx);

    let output = input.with_file_name("translated_hello.docx");
    DocumentPipeline::save(&translated, &output).unwrap();

    let reopened = OoxmlPackage::open(&output).unwrap();
    let units = docx::text_units(&reopened).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].text, "你好世界");
    assert_eq!(units[0].formatting.bold, Some(true));
    assert_eq!(units[0].formatting.size_pt, Some(14.0));
}

#[tokio::test]
async fn test_endToEnd_workbookWithFailingCell_shouldKeepThatCellOriginal() {
    // Cells A1="Hello", A2="World"; the translate function fails for A2 only
    let pkg = build_xlsx(&["Hello", "World"]);
    let (_guard, input) = save_fixture(&pkg, "cells.xlsx");

    let translator = MockUnitTranslator::fail_on("World");
    let (translated, kind) = DocumentPipeline::process(&input, "en", "zh", &translator)
        .await
        .unwrap();
    assert_eq!(kind, DocumentKind::Xlsx);

    let output = input.with_file_name("translated_cells.xlsx");
    DocumentPipeline::save(&translated, &output).unwrap();

    let reopened = OoxmlPackage::open(&output).unwrap();
    let units = xlsx::text_units(&reopened).unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].text, MockUnitTranslator::translated("zh", "Hello"));
    assert_eq!(units[1].text, "World");
}

#[tokio::test]
async fn test_endToEnd_twoStageTranslatorDrivesDocument() {
    // The full stack below the client: two completions per unit, the
    // refined result lands in the document
    let pkg = build_docx(&[DocxParagraph::plain("Hello world")], &[]);
    let (_guard, input) = save_fixture(&pkg, "staged.docx");

    let client = Arc::new(MockClient::with_responses(vec![
        Ok("draft 你好".to_string()),
        Ok("你好世界".to_string()),
    ]));
    let translator = TwoStageTranslator::new(client.clone());

    let (translated, _) = DocumentPipeline::process(&input, "en", "zh", &translator)
        .await
        .unwrap();

    assert_eq!(client.call_count(), 2);
    let units = docx::text_units(&translated).unwrap();
    assert_eq!(units[0].text, "你好世界");
}

#[tokio::test]
async fn test_endToEnd_twoStageRefinementFailure_shouldShipTheDraft() {
    let pkg = build_docx(&[DocxParagraph::plain("Hello world")], &[]);
    let (_guard, input) = save_fixture(&pkg, "fallback.docx");

    let client = Arc::new(MockClient::with_responses(vec![
        Ok("draft result".to_string()),
        Err(TranslationError::RateLimit("throttled".to_string())),
    ]));
    let translator = TwoStageTranslator::new(client);

    let (translated, _) = DocumentPipeline::process(&input, "en", "zh", &translator)
        .await
        .unwrap();
    let units = docx::text_units(&translated).unwrap();
    assert_eq!(units[0].text, "draft result");
}

#[tokio::test]
async fn test_controller_translateBytes_withLegacyDoc_shouldReturnNoticeBytes() {
    // The controller path never reaches the network for a legacy upload
    let controller = Controller::with_config(Config::default());

    let output = controller
        .translate_bytes(
            b"\xD0\xCF\x11\xE0 legacy bits",
            "old report.doc",
            "en",
            "zh",
            &RequestOverrides::default(),
        )
        .await
        .unwrap();

    assert_eq!(output.filename, "translated_old report.docx");
    let pkg = OoxmlPackage::from_bytes(output.bytes).unwrap();
    let units = docx::text_units(&pkg).unwrap();
    assert!(units[0].text.contains("Legacy document format"));
}

#[tokio::test]
async fn test_controller_translateBytes_withDisallowedExtension_shouldMapTo400() {
    let controller = Controller::with_config(Config::default());

    let error = controller
        .translate_bytes(b"plain", "notes.txt", "en", "zh", &RequestOverrides::default())
        .await
        .unwrap_err();

    assert_eq!(error.http_status(), 400);
}

#[tokio::test]
async fn test_controller_translateBytes_withUnknownLanguage_shouldMapTo400() {
    let controller = Controller::with_config(Config::default());

    let error = controller
        .translate_bytes(
            b"irrelevant",
            "report.docx",
            "xx",
            "zh",
            &RequestOverrides::default(),
        )
        .await
        .unwrap_err();

    assert_eq!(error.http_status(), 400);
}

#[tokio::test]
async fn test_controller_translateBytes_withEmptyFilename_shouldMapTo400() {
    let controller = Controller::with_config(Config::default());

    let error = controller
        .translate_bytes(b"irrelevant", "", "en", "zh", &RequestOverrides::default())
        .await
        .unwrap_err();

    assert_eq!(error.http_status(), 400);
}

#[tokio::test]
async fn test_controller_translateFile_withLegacyInput_shouldWriteModernExtension() {
    let controller = Controller::with_config(Config::default());
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("slides.ppt");
    std::fs::write(&input, b"legacy").unwrap();
    let out_dir = dir.path().join("out");

    let output = controller
        .translate_file(&input, &out_dir, "en", "zh", &RequestOverrides::default(), false)
        .await
        .unwrap();

    assert_eq!(
        output.file_name().map(|name| name.to_string_lossy().into_owned()),
        Some("translated_slides.pptx".to_string())
    );
    assert!(output.exists());
    // The written notice is a well-formed container
    assert!(OoxmlPackage::open(&output).is_ok());
}
