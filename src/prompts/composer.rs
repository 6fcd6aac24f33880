// Prompt composer
//
// Builds the outgoing message list for each operation. Everything here is a
// pure function of its inputs: caller history and file trees are only read,
// and no timestamps or random values are injected.

use std::sync::Arc;

use super::file_tree::{render_tree, FileNode};
use super::PromptLibrary;
use crate::providers::{Message, Role};

/// System prompt for template classification.
pub const CLASSIFY_SYSTEM_PROMPT: &str = "Only answer with one word: 'react' or 'node' based on the following project description. Do not return anything extra.";

/// Exact envelope grammar the model must follow.
pub const ENVELOPE_GRAMMAR: &str = r#"<artifact id="IDENTIFIER" title="TITLE">
  <action type="file" filePath="RELATIVE/PATH">
  COMPLETE file contents, no truncation, no placeholders
  </action>
  ... one action block per file to create or change ...
</artifact>"#;

/// Appended to the system prompt when the request changes an existing project.
pub const FOLLOW_UP_AMENDMENT: &str = "\
IMPORTANT: This is a follow-up request on an existing project, not a new project.

1. Analyze the current state of the codebase from the conversation before changing anything.
2. Treat the request as an incremental modification: preserve the existing structure, naming and styling.
3. Generate only the steps and files needed for the requested change. Do not regenerate files that do not change.
4. Every file you do touch must be written out in full.";

/// Output-format mandate for the conversational route.
pub const OUTPUT_FORMAT_MANDATE: &str = "\
STRICT OUTPUT FORMAT (MANDATORY):
- Start with one or two plain sentences describing the change for the user.
- Then output exactly ONE artifact envelope using this grammar:

{grammar}

- filePath is always relative to the project root; never start it with '/'.
- Every action contains the COMPLETE file. No diffs, no partial snippets, no placeholders.
- Do not output anything after the closing </artifact> tag.";

/// Composes message lists from the static prompt library.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    library: Arc<PromptLibrary>,
}

impl PromptComposer {
    pub fn new(library: Arc<PromptLibrary>) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &PromptLibrary {
        &self.library
    }

    /// System instruction plus the raw description; no history.
    pub fn classification(&self, description: &str) -> Vec<Message> {
        vec![
            Message::system(CLASSIFY_SYSTEM_PROMPT),
            Message::user(description),
        ]
    }

    /// Generation system prompt followed by the caller's history verbatim.
    pub fn chat(&self, history: &[Message]) -> Vec<Message> {
        with_system(self.library.system.clone(), history)
    }

    /// Like [`chat`](Self::chat) with the incremental-modification amendment.
    pub fn follow_up(&self, history: &[Message]) -> Vec<Message> {
        let system = format!("{}\n\n{}", self.library.system, FOLLOW_UP_AMENDMENT);
        with_system(system, history)
    }

    /// Single-turn request carrying the project tree and the latest user
    /// message in the system prompt. Earlier turns are not replayed.
    pub fn conversation(&self, latest_user_message: &str, files: &[FileNode]) -> Vec<Message> {
        let system = format!(
            "{system}\n\n\
            <current_project_files>\n{tree}</current_project_files>\n\n\
            <latest_user_request>\n{request}\n</latest_user_request>\n\n\
            {mandate}",
            system = self.library.system,
            tree = ensure_trailing_newline(render_tree(files)),
            request = latest_user_message,
            mandate = output_format_mandate(),
        );
        vec![Message::system(system), Message::user(latest_user_message)]
    }

    /// One-shot reformatting request used when a response had no envelope.
    pub fn corrective(&self, user_request: &str) -> Vec<Message> {
        let system = format!(
            "Your previous answer did not follow the required format. \
            Respond to the request below with ONLY a single artifact envelope, \
            exactly in this grammar:\n\n{grammar}\n\n\
            Relative file paths only. Complete file contents only.\n\n\
            Original request:\n\"\"\"\n{request}\n\"\"\"",
            grammar = ENVELOPE_GRAMMAR,
            request = user_request,
        );
        vec![Message::system(system), Message::user(user_request)]
    }
}

/// Content of the last user turn in `history`, if any.
pub fn latest_user_message(history: &[Message]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
}

fn output_format_mandate() -> String {
    OUTPUT_FORMAT_MANDATE.replace("{grammar}", ENVELOPE_GRAMMAR)
}

fn with_system(system: String, history: &[Message]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::system(system));
    messages.extend_from_slice(history);
    messages
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::file_tree::FileNode;

    fn composer() -> PromptComposer {
        PromptComposer::new(Arc::new(PromptLibrary {
            system: "SYSTEM".to_string(),
            base: "BASE".to_string(),
            react: "REACT".to_string(),
            node: "NODE".to_string(),
        }))
    }

    fn history() -> Vec<Message> {
        vec![
            Message::user("make a todo app"),
            Message::assistant("Here it is."),
            Message::user("add dark mode"),
        ]
    }

    #[test]
    fn test_classification_messages() {
        let messages = composer().classification("a blog with comments");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::system(CLASSIFY_SYSTEM_PROMPT));
        assert_eq!(messages[1], Message::user("a blog with comments"));
    }

    #[test]
    fn test_chat_prepends_system_and_keeps_history_order() {
        let history = history();
        let messages = composer().chat(&history);
        assert_eq!(messages[0], Message::system("SYSTEM"));
        assert_eq!(&messages[1..], &history[..]);
    }

    #[test]
    fn test_chat_is_idempotent() {
        let composer = composer();
        let history = history();
        let first = serde_json::to_vec(&composer.chat(&history)).unwrap();
        let second = serde_json::to_vec(&composer.chat(&history)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_follow_up_amends_system_prompt() {
        let messages = composer().follow_up(&history());
        assert!(messages[0].content.starts_with("SYSTEM\n\n"));
        assert!(messages[0].content.contains("incremental modification"));
        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn test_conversation_replays_only_latest_user_message() {
        let files = vec![FileNode::folder("src", vec![FileNode::file("a.ts")])];
        let messages = composer().conversation("add dark mode", &files);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1], Message::user("add dark mode"));

        let system = &messages[0].content;
        assert!(system.starts_with("SYSTEM"));
        assert!(system.contains("📁 src\n  📄 a.ts\n"));
        assert!(system.contains("<latest_user_request>\nadd dark mode\n"));
        assert!(system.contains(ENVELOPE_GRAMMAR));
        assert!(!system.contains("{grammar}"));
    }

    #[test]
    fn test_corrective_quotes_request_and_grammar() {
        let messages = composer().corrective("add a login page");
        assert_eq!(messages[1], Message::user("add a login page"));
        assert!(messages[0].content.contains("\"\"\"\nadd a login page\n\"\"\""));
        assert!(messages[0].content.contains(ENVELOPE_GRAMMAR));
    }

    #[test]
    fn test_latest_user_message() {
        assert_eq!(latest_user_message(&history()), Some("add dark mode"));
        assert_eq!(latest_user_message(&[Message::assistant("hi")]), None);
    }

    #[test]
    fn test_composer_does_not_mutate_history() {
        let history = history();
        let before = history.clone();
        let _ = composer().follow_up(&history);
        assert_eq!(history, before);
    }
}
