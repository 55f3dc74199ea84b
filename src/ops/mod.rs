//! high-level operations on gitlite repositories

mod cat_file;
mod commit_tree;
mod hash_object;
mod ls_tree;
mod write_tree;

pub use cat_file::{cat_file, pretty_print};
pub use commit_tree::{commit_tree, Clock, FixedClock, SystemClock};
pub use hash_object::{hash_file, hash_object};
pub use ls_tree::{ls_tree, ls_tree_entries, ls_tree_recursive, LsTreeEntry};
pub use write_tree::write_tree;
