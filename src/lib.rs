/*!
 * # doctrans - Office Document Translation
 *
 * A Rust library for translating office documents between languages
 * with a large-language-model backend while preserving formatting.
 *
 * ## Features
 *
 * - Translate .docx, .xlsx and .pptx documents in place
 * - Preserve per-unit formatting (font, size, emphasis, color)
 * - Two-stage translation: draft pass plus best-effort refinement
 * - Per-cell fault isolation for spreadsheets
 * - Conversion notices for legacy .doc/.xls/.ppt uploads
 * - Fixed supported-language set with prompt-ready display names
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and per-request overrides
 * - `document`: Format adapters, the OOXML container and the pipeline
 * - `translation`: Prompt templates and the two-stage translator
 * - `providers`: Client for the OpenAI-compatible completion backend
 * - `app_controller`: Main application controller
 * - `auth`: Credential-check and audit boundary client
 * - `language`: Supported-language table and display names
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod auth;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, RequestOverrides};
pub use app_controller::{Controller, TranslatedOutput};
pub use document::{DocumentKind, DocumentPipeline, FormattingSnapshot, OoxmlPackage};
pub use errors::{AppError, DocumentError, TranslationError};
pub use translation::{TwoStageTranslator, UnitTranslator};
