// Caller-supplied project file tree and its prompt rendering

use serde::{Deserialize, Serialize};

const FOLDER_MARKER: &str = "📁";
const FILE_MARKER: &str = "📄";
const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// One entry of the project tree. Only folders carry children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            children,
        }
    }
}

/// Render the tree depth-first, one line per node, children indented one
/// level deeper than their parent.
pub fn render_tree(nodes: &[FileNode]) -> String {
    if nodes.is_empty() {
        return "(no files)".to_string();
    }
    let mut out = String::new();
    render_level(nodes, 0, &mut out);
    out
}

fn render_level(nodes: &[FileNode], depth: usize, out: &mut String) {
    for node in nodes {
        let marker = match node.kind {
            NodeKind::Folder => FOLDER_MARKER,
            NodeKind::File => FILE_MARKER,
        };
        out.push_str(&format!("{}{} {}\n", INDENT.repeat(depth), marker, node.name));
        if node.kind == NodeKind::Folder {
            render_level(&node.children, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_then_nested_file() {
        let tree = vec![FileNode::folder("src", vec![FileNode::file("a.ts")])];
        let rendered = render_tree(&tree);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["📁 src", "  📄 a.ts"]);
    }

    #[test]
    fn test_deep_nesting_and_order() {
        let tree = vec![
            FileNode::file("package.json"),
            FileNode::folder(
                "src",
                vec![
                    FileNode::folder("components", vec![FileNode::file("Button.tsx")]),
                    FileNode::file("App.tsx"),
                ],
            ),
        ];
        assert_eq!(
            render_tree(&tree),
            "📄 package.json\n📁 src\n  📁 components\n    📄 Button.tsx\n  📄 App.tsx\n"
        );
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(render_tree(&[]), "(no files)");
    }

    #[test]
    fn test_deserialize_from_front_end_shape() {
        let tree: Vec<FileNode> = serde_json::from_str(
            r#"[{"name":"src","type":"folder","children":[{"name":"a.ts","type":"file"}]}]"#,
        )
        .unwrap();
        assert_eq!(tree[0].kind, NodeKind::Folder);
        assert_eq!(tree[0].children[0], FileNode::file("a.ts"));
    }
}
