// Prompt library and message composition
//
// The prompt bodies are opaque configuration: defaults are compiled in and a
// directory of overrides may replace any of them at start-up. Once loaded the
// library is immutable and shared across requests.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub mod composer;
pub mod file_tree;

pub use composer::PromptComposer;
pub use file_tree::{FileNode, NodeKind};

const DEFAULT_SYSTEM_PROMPT: &str = include_str!("defaults/system.md");
const DEFAULT_BASE_PROMPT: &str = include_str!("defaults/base.md");
const DEFAULT_REACT_ARTIFACT: &str = include_str!("defaults/react.md");
const DEFAULT_NODE_ARTIFACT: &str = include_str!("defaults/node.md");

/// Static prompt bodies used by the composer and the template bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLibrary {
    /// Full generation system prompt
    pub system: String,
    /// Design guidance sent ahead of the react starter files
    pub base: String,
    /// Starter artifact for the react template
    pub react: String,
    /// Starter artifact for the node template
    pub node: String,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            base: DEFAULT_BASE_PROMPT.to_string(),
            react: DEFAULT_REACT_ARTIFACT.to_string(),
            node: DEFAULT_NODE_ARTIFACT.to_string(),
        }
    }
}

impl PromptLibrary {
    /// Load the library, replacing defaults with `system.md`, `base.md`,
    /// `react.md` and `node.md` from `dir` when those files exist.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let mut library = Self::default();
        let Some(dir) = dir else {
            return Ok(library);
        };

        let slots: [(&str, &mut String); 4] = [
            ("system.md", &mut library.system),
            ("base.md", &mut library.base),
            ("react.md", &mut library.react),
            ("node.md", &mut library.node),
        ];

        for (file_name, slot) in slots {
            let path = dir.join(file_name);
            if !path.is_file() {
                continue;
            }
            *slot = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read prompt override {}", path.display()))?;
            tracing::info!(path = %path.display(), "Loaded prompt override");
        }

        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_populated() {
        let library = PromptLibrary::default();
        assert!(library.system.contains("<artifact"));
        assert!(library.react.starts_with("<artifact"));
        assert!(library.node.contains("filePath=\"index.js\""));
        assert!(!library.base.is_empty());
    }

    #[test]
    fn test_load_without_dir_is_default() {
        assert_eq!(PromptLibrary::load(None).unwrap(), PromptLibrary::default());
    }

    #[test]
    fn test_load_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("node.md"), "custom node starter").unwrap();

        let library = PromptLibrary::load(Some(dir.path())).unwrap();
        assert_eq!(library.node, "custom node starter");
        assert_eq!(library.react, DEFAULT_REACT_ARTIFACT);
    }
}
