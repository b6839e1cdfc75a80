use std::rc::Rc;

use serde::Serialize;

use super::record::Record;

/// Synthetic index page for one period bucket
///
/// Nodes only point forward to the next finer period. Parent and sibling
/// lookups are derived from the flat page map by path when a host needs them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveNode {
    pub path: String,
    pub layout: String,
    pub posts: Vec<Rc<Record>>,
    pub title: String,
    pub children: Vec<Rc<ArchiveNode>>,
    /// Always empty; rendering belongs to the host
    pub contents: String,
}

impl ArchiveNode {
    pub fn new(path: String, layout: String, posts: Vec<Rc<Record>>, title: String) -> Self {
        Self { path, layout, posts, title, children: Vec::new(), contents: String::new() }
    }

    /// Whether `path` sits exactly one numeric segment below this node
    pub fn is_parent_of(&self, path: &str) -> bool {
        path.strip_prefix(self.path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|segment| {
                !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
            })
    }

    /// Key under which this node is stored in the host file map
    pub fn page_key(&self, index_name: &str) -> String {
        format!("{}/{}", self.path, index_name)
    }
}
