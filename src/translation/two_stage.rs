/*!
 * Two-stage translation: a draft pass followed by a best-effort
 * refinement pass that sees both the source text and the draft.
 */

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::errors::TranslationError;
use crate::providers::TranslationClient;
use crate::translation::prompts::{compose_refine_input, PromptTemplate};

/// The seam the document layer drives: translate one text unit.
///
/// Implementations receive language *codes*; resolving display names for
/// prompts is their concern, not the document layer's.
#[async_trait]
pub trait UnitTranslator: Send + Sync {
    /// Translate one text unit from `source_lang` to `target_lang`
    async fn translate_unit(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError>;
}

/// Orchestrates the draft-then-refine protocol over a completion client
pub struct TwoStageTranslator {
    /// Backend client shared by both stages
    client: Arc<dyn TranslationClient>,

    /// Stage-1 prompt template
    draft_prompt: PromptTemplate,

    /// Stage-2 prompt template
    refine_prompt: PromptTemplate,
}

impl TwoStageTranslator {
    /// Create a translator with the built-in prompt templates
    pub fn new(client: Arc<dyn TranslationClient>) -> Self {
        Self {
            client,
            draft_prompt: PromptTemplate::draft(),
            refine_prompt: PromptTemplate::refine(),
        }
    }

    /// Create a translator with optional prompt overrides.
    ///
    /// `None` keeps the corresponding built-in template.
    pub fn with_prompts(
        client: Arc<dyn TranslationClient>,
        draft_override: Option<String>,
        refine_override: Option<String>,
    ) -> Self {
        Self {
            client,
            draft_prompt: draft_override
                .map(PromptTemplate::new)
                .unwrap_or_else(PromptTemplate::draft),
            refine_prompt: refine_override
                .map(PromptTemplate::new)
                .unwrap_or_else(PromptTemplate::refine),
        }
    }

    /// Run the two-stage protocol for one text.
    ///
    /// Stage 1 failures propagate: there is nothing to fall back to.
    /// Stage 2 is strictly best-effort: any failure returns the draft,
    /// so once stage 1 succeeds the call cannot fail.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        let source_name = crate::language::display_name(source_lang);
        let target_name = crate::language::display_name(target_lang);

        // Stage 1: draft
        let draft_system = self.draft_prompt.render(&source_name, &target_name);
        let draft = self.client.complete(&draft_system, text).await?;

        // Stage 2: refine, falling back to the draft on any failure
        let refine_system = self.refine_prompt.render(&source_name, &target_name);
        let refine_input = compose_refine_input(text, &draft);
        match self.client.complete(&refine_system, &refine_input).await {
            Ok(refined) => Ok(refined),
            Err(e) => {
                warn!(
                    "Refinement stage failed ({}); keeping the draft translation",
                    e
                );
                debug!("Draft kept after refinement failure: {} chars", draft.len());
                Ok(draft)
            }
        }
    }
}

#[async_trait]
impl UnitTranslator for TwoStageTranslator {
    async fn translate_unit(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        self.translate(text, source_lang, target_lang).await
    }
}
