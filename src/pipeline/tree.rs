use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;

use crate::dates::{DateCache, Period};
use crate::error::{ArchiveError, Result};
use crate::models::{Archive, ArchiveNode, PeriodGroups, Record};

/// Generated pages keyed by `<path>/<index name>`
pub type PageMap = IndexMap<String, Rc<ArchiveNode>>;

/// One bucket waiting to become a node
struct Candidate {
    path: String,
    title: String,
    posts: Vec<Rc<Record>>,
}

/// Which scopes get pages and what they look like
#[derive(Debug, Clone, Copy)]
pub struct PageSettings<'a> {
    pub layout: &'a str,
    pub index_name: &'a str,
    pub root_level: bool,
    pub collections: bool,
}

/// Build the nodes for one archive scope, coarsest period first
///
/// Paths come from each bucket's first record rendered through `YYYY`,
/// `YYYY/MM` or `YYYY/MM/DD`, prefixed with `namespace/` for collection
/// scopes. A node's children are the other nodes in the same scope whose path
/// is its own plus one numeric segment.
pub fn build_nodes(
    cache: &DateCache,
    groups: &PeriodGroups,
    layout: &str,
    namespace: Option<&str>,
) -> Result<Vec<Rc<ArchiveNode>>> {
    let mut candidates = Vec::new();

    for period in Period::ALL {
        for (title, posts) in groups.buckets(period).iter() {
            let reference = posts.first().ok_or_else(|| {
                ArchiveError::invalid_argument(format!("period bucket {title:?} has no records"))
            })?;

            let date_path = cache.lookup(reference)?.path(period).ok_or_else(|| {
                ArchiveError::invalid_argument(format!(
                    "period bucket {title:?} references an invalid date"
                ))
            })?;

            let path = match namespace {
                Some(namespace) => format!("{namespace}/{date_path}"),
                None => date_path,
            };

            candidates.push(Candidate { path, title: title.to_string(), posts: posts.to_vec() });
        }
    }

    let mut resolved = vec![None; candidates.len()];
    Ok((0..candidates.len()).map(|index| link(index, &candidates, layout, &mut resolved)).collect())
}

/// Resolve a candidate into a node, resolving its children first
///
/// Children always have longer paths than their parent, so the recursion
/// bottoms out at day nodes.
fn link(
    index: usize,
    candidates: &[Candidate],
    layout: &str,
    resolved: &mut Vec<Option<Rc<ArchiveNode>>>,
) -> Rc<ArchiveNode> {
    if let Some(node) = &resolved[index] {
        return Rc::clone(node);
    }

    let candidate = &candidates[index];
    let mut node = ArchiveNode::new(
        candidate.path.clone(),
        layout.to_string(),
        candidate.posts.clone(),
        candidate.title.clone(),
    );

    let child_indices: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, other)| node.is_parent_of(&other.path))
        .map(|(child, _)| child)
        .collect();
    node.children =
        child_indices.into_iter().map(|child| link(child, candidates, layout, resolved)).collect();

    let node = Rc::new(node);
    resolved[index] = Some(Rc::clone(&node));
    node
}

/// Build every enabled scope into one page map
///
/// Collection pages are inserted first and root-level pages last, so a root
/// page wins if a collection namespace ever produces the same key.
pub fn build_pages(
    cache: &DateCache,
    archive: &Archive,
    settings: &PageSettings<'_>,
) -> Result<PageMap> {
    let mut pages = PageMap::new();

    if settings.collections {
        for (name, groups) in &archive.collections {
            let nodes = build_nodes(cache, groups, settings.layout, Some(name.as_str()))?;
            debug!("built {} archive pages for collection {name:?}", nodes.len());
            insert_nodes(&mut pages, nodes, settings.index_name);
        }
    }

    if settings.root_level {
        let nodes = build_nodes(cache, &archive.root, settings.layout, None)?;
        debug!("built {} root-level archive pages", nodes.len());
        insert_nodes(&mut pages, nodes, settings.index_name);
    }

    Ok(pages)
}

fn insert_nodes(pages: &mut PageMap, nodes: Vec<Rc<ArchiveNode>>, index_name: &str) {
    for node in nodes {
        pages.insert(node.page_key(index_name), node);
    }
}
