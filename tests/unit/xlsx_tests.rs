/*!
 * Tests for the tabular-grid (.xlsx) adapter
 */

use doctrans::document::{xlsx, OoxmlPackage};

use crate::common::{build_xlsx, MockUnitTranslator};

#[tokio::test]
async fn test_translateWorkbook_shouldTranslateEveryStringCell() {
    let mut pkg = build_xlsx(&["Hello", "World", "Data"]);
    let translator = MockUnitTranslator::working();

    xlsx::translate_workbook(&mut pkg, "en", "zh", &translator)
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 3);
    let units = xlsx::text_units(&pkg).unwrap();
    let texts: Vec<&str> = units.iter().map(|unit| unit.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            MockUnitTranslator::translated("zh", "Hello"),
            MockUnitTranslator::translated("zh", "World"),
            MockUnitTranslator::translated("zh", "Data"),
        ]
    );
}

#[tokio::test]
async fn test_translateWorkbook_withOneFailingCell_shouldIsolateTheFault() {
    let mut pkg = build_xlsx(&["Hello", "World"]);
    let translator = MockUnitTranslator::fail_on("World");

    // A single cell failure never aborts the sheet
    xlsx::translate_workbook(&mut pkg, "en", "zh", &translator)
        .await
        .unwrap();

    let units = xlsx::text_units(&pkg).unwrap();
    assert_eq!(units[0].text, MockUnitTranslator::translated("zh", "Hello"));
    assert_eq!(units[1].text, "World");
}

#[tokio::test]
async fn test_translateWorkbook_withAllCellsFailing_shouldKeepAllOriginals() {
    let mut pkg = build_xlsx(&["One", "Two"]);

    xlsx::translate_workbook(&mut pkg, "en", "ja", &MockUnitTranslator::failing())
        .await
        .unwrap();

    let units = xlsx::text_units(&pkg).unwrap();
    let texts: Vec<&str> = units.iter().map(|unit| unit.text.as_str()).collect();
    assert_eq!(texts, vec!["One", "Two"]);
}

#[tokio::test]
async fn test_translateWorkbook_withEmptyCells_shouldSkipThem() {
    let mut pkg = build_xlsx(&["", "   ", "Content"]);
    let translator = MockUnitTranslator::working();

    xlsx::translate_workbook(&mut pkg, "en", "zh", &translator)
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 1);
}

#[tokio::test]
async fn test_translateWorkbook_withDuplicateStrings_shouldTranslatePerCell() {
    let mut pkg = build_xlsx(&["Same", "Same"]);
    let translator = MockUnitTranslator::working();

    xlsx::translate_workbook(&mut pkg, "en", "zh", &translator)
        .await
        .unwrap();

    // Both cells are visited even though they deduplicate in the table
    assert_eq!(translator.call_count(), 2);
    let units = xlsx::text_units(&pkg).unwrap();
    assert_eq!(units.len(), 2);
    assert!(units
        .iter()
        .all(|unit| unit.text == MockUnitTranslator::translated("zh", "Same")));
}

#[tokio::test]
async fn test_translateWorkbook_roundTrip_shouldPreserveUnitSet() {
    let mut pkg = build_xlsx(&["Alpha", "Beta & <Gamma>"]);

    xlsx::translate_workbook(&mut pkg, "en", "th", &MockUnitTranslator::working())
        .await
        .unwrap();

    let written = xlsx::text_units(&pkg).unwrap();
    let reopened = OoxmlPackage::from_bytes(pkg.to_bytes().unwrap()).unwrap();
    let reread = xlsx::text_units(&reopened).unwrap();

    assert_eq!(written.len(), reread.len());
    for (a, b) in written.iter().zip(reread.iter()) {
        assert_eq!(a.text, b.text);
    }
}

#[tokio::test]
async fn test_translateWorkbook_shouldRebuildSharedStringsPart() {
    let mut pkg = build_xlsx(&["Hello", "Hello", "Other"]);

    xlsx::translate_workbook(&mut pkg, "en", "zh", &MockUnitTranslator::working())
        .await
        .unwrap();

    let shared = pkg.part_str(xlsx::SHARED_STRINGS_PART).unwrap();
    // Three references, two unique strings after deduplication
    assert!(shared.contains(r#"count="3""#));
    assert!(shared.contains(r#"uniqueCount="2""#));
}
