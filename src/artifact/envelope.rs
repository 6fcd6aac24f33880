// Structured view of an artifact envelope

use once_cell::sync::Lazy;
use regex::Regex;

use super::scanner;

static OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<artifact\b([^>]*)>").expect("valid artifact tag regex"));
static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z_][\w-]*)\s*=\s*"([^"]*)""#).expect("valid attribute regex"));
static ACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<action\b([^>]*)>(.*?)</action>").expect("valid action block regex")
});

/// One file write requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAction {
    pub file_path: String,
    pub contents: String,
}

impl FileAction {
    pub fn is_absolute(&self) -> bool {
        self.file_path.starts_with('/') || self.file_path.starts_with('\\')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub id: Option<String>,
    pub title: Option<String>,
    pub actions: Vec<FileAction>,
}

impl Envelope {
    /// Parse the envelope located by the scanner, if there is one.
    pub fn extract(text: &str) -> Option<Self> {
        let span = scanner::locate(text)?;
        let body = &text[span.start..span.end];

        let (id, title) = match OPEN_TAG.captures(body) {
            Some(caps) => {
                let attrs = caps.get(1).map_or("", |m| m.as_str());
                (attribute(attrs, "id"), attribute(attrs, "title"))
            }
            None => (None, None),
        };

        let actions = ACTION
            .captures_iter(body)
            .filter_map(|caps| {
                let attrs = caps.get(1).map_or("", |m| m.as_str());
                if attribute(attrs, "type").as_deref() != Some("file") {
                    tracing::debug!(attrs = attrs.trim(), "Skipping non-file action");
                    return None;
                }
                Some(FileAction {
                    file_path: attribute(attrs, "filePath")?,
                    contents: strip_block_padding(caps.get(2).map_or("", |m| m.as_str())),
                })
            })
            .collect();

        Some(Self { id, title, actions })
    }

    /// File paths that violate the relative-path rule.
    pub fn absolute_paths(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter(|a| a.is_absolute())
            .map(|a| a.file_path.as_str())
            .collect()
    }
}

fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTRIBUTE
        .captures_iter(attrs)
        .find(|caps| &caps[1] == name)
        .map(|caps| caps[2].to_string())
}

/// Drop the newline after the opening tag and the indented line holding the
/// closing tag; the file body itself is untouched.
fn strip_block_padding(raw: &str) -> String {
    let body = raw
        .strip_prefix("\r\n")
        .or_else(|| raw.strip_prefix('\n'))
        .unwrap_or(raw);
    let body = body.trim_end_matches(&[' ', '\t'][..]);
    let body = body
        .strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .unwrap_or(body);
    body.to_string()
}
