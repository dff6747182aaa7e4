/*!
 * Tests for the slide-deck (.pptx) adapter
 */

use doctrans::document::{pptx, OoxmlPackage};

use crate::common::{build_pptx, MockUnitTranslator, PptxShape};

#[tokio::test]
async fn test_translatePresentation_shouldReplaceShapeText() {
    let mut pkg = build_pptx(
        &[PptxShape::plain("Slide title"), PptxShape::plain("Slide body")],
        &[],
    );
    let translator = MockUnitTranslator::working();

    pptx::translate_presentation(&mut pkg, "en", "zh", &translator)
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 2);
    let units = pptx::text_units(&pkg).unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].text, MockUnitTranslator::translated("zh", "Slide title"));
    assert_eq!(units[1].text, MockUnitTranslator::translated("zh", "Slide body"));
}

#[tokio::test]
async fn test_translatePresentation_shouldPreserveFormattingSnapshot() {
    let styled = PptxShape {
        text: "Styled shape".to_string(),
        font: Some("Arial".to_string()),
        size_pt: Some(32.0),
        bold: Some(true),
        italic: Some(true),
        underline: Some(false),
        color: Some("00FF00".to_string()),
    };
    let mut pkg = build_pptx(&[styled], &[]);
    let before = pptx::text_units(&pkg).unwrap();

    pptx::translate_presentation(&mut pkg, "en", "ja", &MockUnitTranslator::working())
        .await
        .unwrap();

    let after = pptx::text_units(&pkg).unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].formatting, before[0].formatting);
    assert_eq!(after[0].formatting.font.as_deref(), Some("Arial"));
    assert_eq!(after[0].formatting.size_pt, Some(32.0));
    assert_eq!(after[0].formatting.bold, Some(true));
    assert_eq!(after[0].formatting.italic, Some(true));
    assert_eq!(after[0].formatting.underline, Some(false));
    assert_eq!(after[0].formatting.color_rgb.as_deref(), Some("00FF00"));
}

#[tokio::test]
async fn test_translatePresentation_shouldVisitTableCells() {
    let mut pkg = build_pptx(&[PptxShape::plain("Heading")], &["Cell A", "Cell B"]);
    let translator = MockUnitTranslator::working();

    pptx::translate_presentation(&mut pkg, "en", "zh", &translator)
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 3);
    let units = pptx::text_units(&pkg).unwrap();
    let texts: Vec<&str> = units.iter().map(|unit| unit.text.as_str()).collect();
    assert!(texts.contains(&MockUnitTranslator::translated("zh", "Cell A").as_str()));
    assert!(texts.contains(&MockUnitTranslator::translated("zh", "Cell B").as_str()));
}

#[tokio::test]
async fn test_translatePresentation_withEmptyShape_shouldSkipIt() {
    let mut pkg = build_pptx(
        &[PptxShape::plain(""), PptxShape::plain("Content")],
        &[],
    );
    let translator = MockUnitTranslator::working();

    pptx::translate_presentation(&mut pkg, "en", "th", &translator)
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 1);
}

#[tokio::test]
async fn test_translatePresentation_withFailure_shouldAbortWholeDocument() {
    let mut pkg = build_pptx(
        &[PptxShape::plain("First"), PptxShape::plain("Second")],
        &[],
    );

    let result =
        pptx::translate_presentation(&mut pkg, "en", "zh", &MockUnitTranslator::fail_on("Second"))
            .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_translatePresentation_withMultilineResult_shouldSplitIntoParagraphs() {
    let mut pkg = build_pptx(&[PptxShape::plain("Two line text")], &[]);

    pptx::translate_presentation(
        &mut pkg,
        "en",
        "zh",
        &MockUnitTranslator::fixed("first line\nsecond line"),
    )
    .await
    .unwrap();

    // Paragraph-per-line output still reads back as one unit joined by newlines
    let units = pptx::text_units(&pkg).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].text, "first line\nsecond line");
}

#[tokio::test]
async fn test_translatePresentation_roundTrip_shouldPreserveUnitSet() {
    let mut pkg = build_pptx(
        &[PptxShape::bold_sized("Heading", 40.0), PptxShape::plain("Body")],
        &["Cell"],
    );

    pptx::translate_presentation(&mut pkg, "en", "zh", &MockUnitTranslator::working())
        .await
        .unwrap();

    let written = pptx::text_units(&pkg).unwrap();
    let reopened = OoxmlPackage::from_bytes(pkg.to_bytes().unwrap()).unwrap();
    let reread = pptx::text_units(&reopened).unwrap();

    assert_eq!(written.len(), reread.len());
    for (a, b) in written.iter().zip(reread.iter()) {
        assert_eq!(a.text, b.text);
        assert_eq!(a.formatting, b.formatting);
    }
}
