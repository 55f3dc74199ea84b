use std::fmt;

use crate::error::Result;
use crate::hash::ObjectId;
use crate::object::{read_tree, ObjectStore};
use crate::types::TreeEntry;

/// list the entry names of a tree, in stored order
pub fn ls_tree<S: ObjectStore + ?Sized>(store: &S, id: &ObjectId) -> Result<Vec<String>> {
    Ok(read_tree(store, id)?.names())
}

/// list the full entries of a tree, in stored order
pub fn ls_tree_entries<S: ObjectStore + ?Sized>(store: &S, id: &ObjectId) -> Result<Vec<TreeEntry>> {
    Ok(read_tree(store, id)?.into_entries())
}

/// tree entry with its path relative to the listed tree
#[derive(Debug, Clone)]
pub struct LsTreeEntry {
    pub path: String,
    pub entry: TreeEntry,
}

/// list every non-directory entry below a tree, depth-first in stored order
///
/// directories are descended into rather than listed, like `git ls-tree -r`.
pub fn ls_tree_recursive<S: ObjectStore + ?Sized>(
    store: &S,
    id: &ObjectId,
) -> Result<Vec<LsTreeEntry>> {
    let mut out = Vec::new();

    // stack of (prefix, remaining entries reversed so pop() yields stored order)
    let mut stack = vec![(String::new(), reversed(read_tree(store, id)?.into_entries()))];

    while let Some((prefix, entries)) = stack.last_mut() {
        let Some(entry) = entries.pop() else {
            stack.pop();
            continue;
        };

        let path = if prefix.is_empty() {
            entry.name.clone()
        } else {
            format!("{}/{}", prefix, entry.name)
        };

        if entry.mode.is_directory() {
            let subtree = read_tree(store, &entry.id)?;
            stack.push((path, reversed(subtree.into_entries())));
        } else {
            out.push(LsTreeEntry { path, entry });
        }
    }

    Ok(out)
}

fn reversed(mut entries: Vec<TreeEntry>) -> Vec<TreeEntry> {
    entries.reverse();
    entries
}

impl fmt::Display for LsTreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0>6} {} {}\t{}",
            self.entry.mode.as_str(),
            self.entry.mode.object_kind(),
            self.entry.id,
            self.path
        )
    }
}
