use super::path::relative_id;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Marker separating a split output's parent stem from its section suffix
pub const SPLIT_TAG: &str = "_split_";

static SPLIT_KEY_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn get_split_key_regex() -> Option<&'static Regex> {
    SPLIT_KEY_REGEX
        .get_or_init(|| Regex::new(r"split_(\d+)_(\d+)").ok())
        .as_ref()
}

/// Ordering key for split outputs: (section number, first page)
///
/// Files that are not split outputs sort first with `(0, 0)`.
pub fn split_sort_key(name: &str) -> (u32, u32) {
    get_split_key_regex()
        .and_then(|re| re.captures(name))
        .and_then(|caps| {
            let section = caps.get(1)?.as_str().parse().ok()?;
            let page = caps.get(2)?.as_str().parse().ok()?;
            Some((section, page))
        })
        .unwrap_or((0, 0))
}

/// File name of the document a split output was cut from, if it is one
pub fn split_parent_name(name: &str) -> Option<String> {
    name.find(SPLIT_TAG)
        .map(|idx| format!("{}.pdf", &name[..idx]))
}

/// One entry of the library listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// File name shown to the user
    pub name: String,
    /// Forward-slash path relative to the library root
    pub id: String,
    /// Split outputs of this document
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(name: String, id: String) -> Self {
        Self {
            name,
            id,
            children: Vec::new(),
        }
    }
}

/// Group PDF paths under `root` into a two-level tree
///
/// Split outputs hang under their parent document, which gets a node even
/// when the parent file itself is gone. Roots keep the order of `files`;
/// children are ordered by `split_sort_key`.
pub fn build_tree(root: &Path, files: &[PathBuf]) -> Vec<TreeNode> {
    let mut roots: Vec<TreeNode> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for file in files {
        let name = match file.file_name() {
            Some(n) => n.to_string_lossy().into_owned(),
            None => continue,
        };
        let id = relative_id(root, file);

        match split_parent_name(&name) {
            Some(parent_name) => {
                let parent_id = match id.rsplit_once('/') {
                    Some((dir, _)) => format!("{}/{}", dir, parent_name),
                    None => parent_name.clone(),
                };
                let slot = *index.entry(parent_id.clone()).or_insert_with(|| {
                    roots.push(TreeNode::leaf(parent_name, parent_id));
                    roots.len() - 1
                });
                roots[slot].children.push(TreeNode::leaf(name, id));
            }
            None => {
                if !index.contains_key(&id) {
                    index.insert(id.clone(), roots.len());
                    roots.push(TreeNode::leaf(name, id));
                }
            }
        }
    }

    for node in &mut roots {
        node.children
            .sort_by_key(|child| split_sort_key(&child.name));
    }

    roots
}
