// Artifact protocol
//
// Turns free-form model output into a result that always carries a
// human-readable summary, and recovers once when the model ignores the
// envelope format. Format problems never surface as errors; only transport
// failures of the provider calls do.

use std::sync::Arc;
use std::time::Duration;

pub mod envelope;
pub mod scanner;

pub use envelope::{Envelope, FileAction};
pub use scanner::{locate, EnvelopeSpan};

use crate::errors::ProviderError;
use crate::prompts::{FileNode, PromptComposer};
use crate::providers::{complete_with_timeout, CompletionOptions, LlmProvider};

/// Summary used when the model gave none, or one too short to be useful.
pub const FALLBACK_SUMMARY: &str = "I've prepared the requested changes to your project.";

/// Summaries shorter than this (in characters, after trimming) are replaced.
pub const MIN_SUMMARY_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub conversational_summary: String,
    /// Full model transcript, including the envelope
    pub artifact_text: String,
    /// Produced by the corrective re-prompt rather than the first answer
    pub was_forced: bool,
}

impl GenerationResult {
    /// Structured view of the envelope in `artifact_text`, if any.
    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::extract(&self.artifact_text)
    }
}

/// Parse a raw model answer.
///
/// Returns `None` when the text holds no envelope; the caller decides how
/// to recover.
pub fn parse(raw: &str) -> Option<GenerationResult> {
    let span = scanner::locate(raw)?;
    if span.is_ambiguous() {
        tracing::warn!(
            opening_markers = span.opening_markers,
            "Response holds more than one envelope; treating first open to last close as one"
        );
    }

    Some(GenerationResult {
        conversational_summary: summary_or_fallback(&raw[..span.start]),
        artifact_text: raw.to_string(),
        was_forced: false,
    })
}

fn summary_or_fallback(prefix: &str) -> String {
    let summary = prefix.trim();
    if summary.chars().count() < MIN_SUMMARY_CHARS {
        FALLBACK_SUMMARY.to_string()
    } else {
        summary.to_string()
    }
}

/// Generation flow for the conversational route: one call, then at most one
/// corrective call.
pub struct ArtifactProtocol {
    provider: Arc<dyn LlmProvider>,
    composer: PromptComposer,
    options: CompletionOptions,
    timeout: Duration,
}

impl ArtifactProtocol {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        composer: PromptComposer,
        options: CompletionOptions,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            composer,
            options,
            timeout,
        }
    }

    /// Ask for changes against the current project files.
    pub async fn generate(
        &self,
        user_request: &str,
        files: &[FileNode],
    ) -> Result<GenerationResult, ProviderError> {
        let messages = self.composer.conversation(user_request, files);
        let raw = complete_with_timeout(
            self.provider.as_ref(),
            &messages,
            &self.options,
            self.timeout,
        )
        .await?;
        self.parse_or_recover(&raw, user_request).await
    }

    /// Parse `raw`; when it has no envelope, re-prompt once and accept the
    /// corrective answer as-is.
    pub async fn parse_or_recover(
        &self,
        raw: &str,
        user_request: &str,
    ) -> Result<GenerationResult, ProviderError> {
        if let Some(result) = parse(raw) {
            return Ok(result);
        }

        tracing::warn!(
            chars = raw.len(),
            "Model answer has no artifact envelope; issuing corrective re-prompt"
        );

        let messages = self.composer.corrective(user_request);
        let forced = complete_with_timeout(
            self.provider.as_ref(),
            &messages,
            &self.options,
            self.timeout,
        )
        .await?;

        if scanner::locate(&forced).is_none() {
            tracing::warn!(
                chars = forced.len(),
                "FormatRecoveryExhausted: corrective answer also lacks an envelope"
            );
        }

        Ok(GenerationResult {
            conversational_summary: FALLBACK_SUMMARY.to_string(),
            artifact_text: forced,
            was_forced: true,
        })
    }
}
