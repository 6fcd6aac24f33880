// Template classification
//
// Maps a free-text project description onto one of the starter templates.
// An answer outside the enum is surfaced to the caller; it is never coerced
// to a default.

use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::constants::CLASSIFY_MAX_TOKENS;
use crate::errors::{ClassificationError, GatewayError};
use crate::prompts::{PromptComposer, PromptLibrary};
use crate::providers::{complete_with_timeout, CompletionOptions, LlmProvider};

/// Files the front end keeps on disk but never shows the model.
const HIDDEN_FILES_NOTE: &str =
    "Here is a list of files that exist on the file system but are not being shown to you:\n\n  - .gitignore\n  - package-lock.json\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectTemplate {
    React,
    Node,
}

impl ProjectTemplate {
    pub const ALL: [ProjectTemplate; 2] = [ProjectTemplate::React, ProjectTemplate::Node];

    pub fn token(&self) -> &'static str {
        match self {
            ProjectTemplate::React => "react",
            ProjectTemplate::Node => "node",
        }
    }
}

impl FromStr for ProjectTemplate {
    type Err = ClassificationError;

    /// Exact, case-sensitive token match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.token() == s)
            .ok_or_else(|| ClassificationError {
                raw_answer: s.to_string(),
            })
    }
}

/// Prompts handed back to the front end for a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBundle {
    /// Prompts the front end prepends to the generation conversation
    pub prompts: Vec<String>,
    /// Starter artifacts the front end renders immediately
    pub ui_prompts: Vec<String>,
}

impl TemplateBundle {
    /// Deterministic lookup; no network call.
    pub fn for_template(template: ProjectTemplate, library: &PromptLibrary) -> Self {
        match template {
            ProjectTemplate::React => Self {
                prompts: vec![library.base.clone(), project_files_prompt(&library.react)],
                ui_prompts: vec![library.react.clone()],
            },
            ProjectTemplate::Node => Self {
                prompts: vec![project_files_prompt(&library.node)],
                ui_prompts: vec![library.node.clone()],
            },
        }
    }
}

fn project_files_prompt(artifact: &str) -> String {
    format!(
        "Here is an artifact that contains all files of the project visible to you.\n\
        Consider the contents of ALL files in the project.\n\n{}\n\n{}",
        artifact, HIDDEN_FILES_NOTE
    )
}

/// Asks the provider which template a description needs.
pub struct TemplateClassifier {
    provider: Arc<dyn LlmProvider>,
    composer: PromptComposer,
    timeout: Duration,
}

impl TemplateClassifier {
    pub fn new(provider: Arc<dyn LlmProvider>, composer: PromptComposer, timeout: Duration) -> Self {
        Self {
            provider,
            composer,
            timeout,
        }
    }

    fn options() -> CompletionOptions {
        CompletionOptions::default()
            .with_max_tokens(CLASSIFY_MAX_TOKENS)
            .with_temperature(0.0)
    }

    pub async fn classify(&self, description: &str) -> Result<ProjectTemplate, GatewayError> {
        let messages = self.composer.classification(description);
        let answer = complete_with_timeout(
            self.provider.as_ref(),
            &messages,
            &Self::options(),
            self.timeout,
        )
        .await?;

        let trimmed = answer.trim();
        tracing::info!(answer = %trimmed, "Template classification answer");
        Ok(trimmed.parse::<ProjectTemplate>()?)
    }

    /// Classify and resolve the bundle in one step.
    pub async fn bundle_for(&self, description: &str) -> Result<TemplateBundle, GatewayError> {
        let template = self.classify(description).await?;
        Ok(TemplateBundle::for_template(template, self.composer.library()))
    }
}
