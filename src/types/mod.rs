mod commit;
mod tree;

pub use commit::{Commit, Identity, Signature, TZ_OFFSET};
pub use tree::{EntryMode, Tree, TreeEntry};
