/*!
 * Prompt templates for the two translation stages.
 *
 * Templates carry two literal substitution points, `{{source_lang}}` and
 * `{{target_lang}}`, resolved by plain substring replacement before the
 * template is sent as the system message of a completion request.
 */

/// System prompt template with language substitution points
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Default system prompt for the draft (stage 1) translation.
    pub const DRAFT: &'static str = "You are a professional linguist specializing in \
{{source_lang}} to {{target_lang}} translation. Your task is to translate the provided \
{{source_lang}} text into {{target_lang}}.\n\
Respond with the translation only, without any explanation or other text.";

    /// Default system prompt for the refine (stage 2) correction pass.
    pub const REFINE: &'static str = "You are a professional linguist specializing in \
{{source_lang}} to {{target_lang}} translation. You will receive a {{source_lang}} text \
together with a draft translation of it, and your goal is to improve that translation. \
Read the {{source_lang}} text carefully and edit the draft, considering:\n\
(i) accuracy (correct additions, mistranslations, omissions and untranslated text)\n\
(ii) fluency (apply {{target_lang}} grammar, spelling and punctuation rules, avoid \
unnecessary repetition)\n\
(iii) style (make the translation reflect the style of the source text)\n\
(iv) terminology (replace terms that do not fit the context or are used inconsistently)\n\
(v) any other errors\n\
Respond with the translation only, without any explanation or other text.";

    /// Create a new prompt template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Create the default draft-stage template.
    pub fn draft() -> Self {
        Self::new(Self::DRAFT)
    }

    /// Create the default refine-stage template.
    pub fn refine() -> Self {
        Self::new(Self::REFINE)
    }

    /// Render the template with the given language display names.
    pub fn render(&self, source_lang: &str, target_lang: &str) -> String {
        self.template
            .replace("{{source_lang}}", source_lang)
            .replace("{{target_lang}}", target_lang)
    }
}

/// Build the stage-2 user message from the original text and the draft.
///
/// Both parts are labeled so the model can tell them apart.
pub fn compose_refine_input(original: &str, draft: &str) -> String {
    format!("Source text: {}\n\nDraft translation: {}", original, draft)
}
