use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::app_config::{Config, RequestOverrides};
use crate::auth::AuthClient;
use crate::document::{DocumentPipeline, SourceFormat};
use crate::errors::{AppError, DocumentError, TranslationError};
use crate::file_utils::FileManager;
use crate::language;
use crate::providers::OpenAI;
use crate::translation::{TwoStageTranslator, UnitTranslator};

// @module: Application controller for document translation

/// Translated document bytes plus the filename to deliver them under.
///
/// This is the exact shape the upstream HTTP boundary consumes.
#[derive(Debug)]
pub struct TranslatedOutput {
    /// Serialized translated document
    pub bytes: Vec<u8>,
    /// Suggested output filename (`translated_<stem>.<ext>`)
    pub filename: String,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Audit client for the credential-check boundary, if configured
    pub fn auth_client(&self) -> Option<AuthClient> {
        if self.config.auth_endpoint.is_empty() {
            None
        } else {
            Some(AuthClient::new(self.config.auth_endpoint.clone()))
        }
    }

    /// Record an audit action for a user; a no-op when auditing is not
    /// configured and fire-and-forget when it is
    pub fn audit(&self, user_id: &str, action: &str) {
        if let Some(client) = self.auth_client() {
            client.record_action(user_id, action);
        }
    }

    /// Translate a document on disk into `output_dir`.
    ///
    /// Returns the output path. An existing output is kept unless
    /// `force_overwrite` is set.
    pub async fn translate_file(
        &self,
        input_file: &Path,
        output_dir: &Path,
        source_lang: &str,
        target_lang: &str,
        overrides: &RequestOverrides,
        force_overwrite: bool,
    ) -> Result<PathBuf, AppError> {
        self.validate_languages(source_lang, target_lang)?;
        if !FileManager::file_exists(input_file) {
            return Err(AppError::InvalidRequest(format!(
                "Input file does not exist: {}",
                input_file.display()
            )));
        }

        let output_kind = match SourceFormat::from_path(input_file)? {
            SourceFormat::Modern(kind) | SourceFormat::Legacy(kind) => kind,
        };
        FileManager::ensure_dir(output_dir)?;
        let output_path =
            FileManager::generate_output_path(input_file, output_dir, output_kind.extension());
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping file, translation already exists (use -f to force overwrite): {}",
                output_path.display()
            );
            return Ok(output_path);
        }

        let start_time = Instant::now();
        let translator = self.build_translator(overrides);
        let bar = Self::progress_spinner();
        let progress = ProgressTranslator {
            inner: translator.as_ref(),
            bar: bar.clone(),
        };

        let result =
            DocumentPipeline::process(input_file, source_lang, target_lang, &progress).await;
        bar.finish_and_clear();
        let (pkg, _) = result?;

        DocumentPipeline::save(&pkg, &output_path)?;
        info!(
            "Translation completed in {:.1}s: {}",
            start_time.elapsed().as_secs_f32(),
            output_path.display()
        );
        Ok(output_path)
    }

    /// Translate an uploaded document held in memory.
    ///
    /// The upload is staged in a request-scoped temp directory that is
    /// removed on every exit path, success or error.
    pub async fn translate_bytes(
        &self,
        bytes: &[u8],
        filename: &str,
        source_lang: &str,
        target_lang: &str,
        overrides: &RequestOverrides,
    ) -> Result<TranslatedOutput, AppError> {
        self.validate_languages(source_lang, target_lang)?;
        let name = FileManager::sanitized_file_name(filename)
            .ok_or_else(|| AppError::InvalidRequest("No file selected".to_string()))?;
        if !FileManager::is_allowed_extension(&name) {
            return Err(DocumentError::UnsupportedFormat(name).into());
        }

        let workspace = tempfile::tempdir()?;
        let input_path = workspace.path().join(&name);
        std::fs::write(&input_path, bytes)?;

        let translator = self.build_translator(overrides);
        let (pkg, kind) =
            DocumentPipeline::process(&input_path, source_lang, target_lang, translator.as_ref())
                .await?;

        Ok(TranslatedOutput {
            bytes: pkg.to_bytes()?,
            filename: FileManager::translated_filename(&name, kind.extension()),
        })
    }

    /// Build the per-request translator, overrides already resolved
    fn build_translator(&self, overrides: &RequestOverrides) -> Arc<TwoStageTranslator> {
        let model_config = self.config.resolve_model(overrides);
        let (draft, refine) = self.config.resolve_prompts(overrides);
        let client = Arc::new(OpenAI::new(model_config));
        Arc::new(TwoStageTranslator::with_prompts(client, draft, refine))
    }

    fn validate_languages(&self, source_lang: &str, target_lang: &str) -> Result<(), AppError> {
        for code in [source_lang, target_lang] {
            if !language::is_supported(code) {
                let supported: Vec<&str> = language::SUPPORTED_LANGUAGES
                    .iter()
                    .map(|lang| lang.code)
                    .collect();
                return Err(AppError::InvalidRequest(format!(
                    "Unsupported language code '{}'; supported codes: {}",
                    code,
                    supported.join(", ")
                )));
            }
        }
        if language::language_codes_match(source_lang, target_lang) {
            return Err(AppError::InvalidRequest(
                "Source and target language are the same".to_string(),
            ));
        }
        Ok(())
    }

    fn progress_spinner() -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_message("Translating...");
        bar
    }
}

/// Ticks the progress spinner once per translated unit
struct ProgressTranslator<'a> {
    inner: &'a dyn UnitTranslator,
    bar: ProgressBar,
}

#[async_trait]
impl UnitTranslator for ProgressTranslator<'_> {
    async fn translate_unit(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        self.bar.inc(1);
        self.bar
            .set_message(format!("Translating unit {}", self.bar.position()));
        self.inner.translate_unit(text, source_lang, target_lang).await
    }
}
