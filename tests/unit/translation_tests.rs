/*!
 * Tests for the two-stage translation protocol
 */

use std::sync::Arc;

use doctrans::errors::TranslationError;
use doctrans::translation::{PromptTemplate, TwoStageTranslator};

use crate::common::MockClient;

#[tokio::test]
async fn test_translate_withBothStagesSucceeding_shouldReturnRefinedResult() {
    let client = Arc::new(MockClient::with_responses(vec![
        Ok("draft translation".to_string()),
        Ok("refined translation".to_string()),
    ]));
    let translator = TwoStageTranslator::new(client.clone());

    let result = translator.translate("Hello world", "en", "zh").await.unwrap();
    assert_eq!(result, "refined translation");
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_translate_withRefineFailing_shouldFallBackToDraft() {
    let client = Arc::new(MockClient::with_responses(vec![
        Ok("draft translation".to_string()),
        Err(TranslationError::RateLimit("throttled".to_string())),
    ]));
    let translator = TwoStageTranslator::new(client.clone());

    let result = translator.translate("Hello world", "en", "zh").await.unwrap();
    assert_eq!(result, "draft translation");
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_translate_withDraftFailing_shouldPropagateError() {
    let client = Arc::new(MockClient::with_responses(vec![Err(
        TranslationError::Authentication("bad key".to_string()),
    )]));
    let translator = TwoStageTranslator::new(client.clone());

    let result = translator.translate("Hello world", "en", "zh").await;
    assert!(matches!(result, Err(TranslationError::Authentication(_))));
    // Stage 2 is never attempted when stage 1 fails
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_translate_shouldRenderLanguageNamesIntoPrompts() {
    let client = Arc::new(MockClient::with_responses(vec![
        Ok("draft".to_string()),
        Ok("refined".to_string()),
    ]));
    let translator = TwoStageTranslator::new(client.clone());
    translator.translate("Hello", "en", "zh").await.unwrap();

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    // Language codes are resolved to display names before substitution
    assert!(requests[0].0.contains("English"));
    assert!(requests[0].0.contains("Chinese"));
    assert!(!requests[0].0.contains("{{source_lang}}"));
    assert_eq!(requests[0].1, "Hello");
}

#[tokio::test]
async fn test_translate_refineStage_shouldSeeSourceAndDraft() {
    let client = Arc::new(MockClient::with_responses(vec![
        Ok("draft output".to_string()),
        Ok("refined".to_string()),
    ]));
    let translator = TwoStageTranslator::new(client.clone());
    translator.translate("source input", "en", "ja").await.unwrap();

    let requests = client.requests();
    let refine_user = &requests[1].1;
    assert!(refine_user.contains("source input"));
    assert!(refine_user.contains("draft output"));
}

#[tokio::test]
async fn test_translate_withPromptOverrides_shouldUseThem() {
    let client = Arc::new(MockClient::with_responses(vec![
        Ok("draft".to_string()),
        Ok("refined".to_string()),
    ]));
    let translator = TwoStageTranslator::with_prompts(
        client.clone(),
        Some("Custom draft {{source_lang}} to {{target_lang}}".to_string()),
        Some("Custom refine {{target_lang}}".to_string()),
    );
    translator.translate("Hello", "ja", "th").await.unwrap();

    let requests = client.requests();
    assert_eq!(requests[0].0, "Custom draft Japanese to Thai");
    assert_eq!(requests[1].0, "Custom refine Thai");
}

#[tokio::test]
async fn test_translate_withRefineTransportFailure_shouldStillSucceed() {
    // Any stage-2 failure kind is recovered, not just service errors
    let client = Arc::new(MockClient::with_responses(vec![
        Ok("the draft".to_string()),
        Err(TranslationError::Transport("connection reset".to_string())),
    ]));
    let translator = TwoStageTranslator::new(client);

    let result = translator.translate("text", "zh", "en").await.unwrap();
    assert_eq!(result, "the draft");
}

#[test]
fn test_defaultPromptTemplates_shouldCarryBothSubstitutionPoints() {
    for template in [PromptTemplate::DRAFT, PromptTemplate::REFINE] {
        assert!(template.contains("{{source_lang}}"));
        assert!(template.contains("{{target_lang}}"));
    }
}
