/*!
 * AI-powered translation of document text units.
 *
 * - `prompts`: system prompt templates for the two stages
 * - `two_stage`: the draft-then-refine orchestration and the
 *   `UnitTranslator` seam consumed by the document layer
 */

pub mod prompts;
pub mod two_stage;

pub use prompts::PromptTemplate;
pub use two_stage::{TwoStageTranslator, UnitTranslator};
