//! gitlite - git-compatible loose object store
//!
//! stores blobs, trees and commits in the same on-disk format git uses for
//! loose objects, so a repository written by gitlite can be read by git.
//!
//! # Core concepts
//!
//! - **Blob**: raw file content
//! - **Tree**: a directory listing of `<mode> <name>\0<20-byte id>` entries
//! - **Commit**: a tree snapshot with parents, author, committer and message
//!
//! # Object format
//!
//! framed = "<kind> <decimal length>\0" | content
//!
//! id = SHA1(framed), stored zlib-compressed at `.git/objects/<2 hex>/<38 hex>`
//!
//! # Example usage
//!
//! ```no_run
//! use gitlite::{ops, Repo};
//! use std::path::Path;
//!
//! let repo = Repo::init(Path::new("/path/to/work")).unwrap();
//!
//! // snapshot the work tree and commit it
//! let tree = ops::write_tree(repo.store(), repo.path()).unwrap();
//! let commit = ops::commit_tree(
//!     repo.store(),
//!     &tree,
//!     &[],
//!     "initial commit",
//!     repo.identity(),
//!     &ops::SystemClock,
//! )
//! .unwrap();
//! println!("{}", commit);
//! ```

mod config;
mod error;
mod hash;
mod repo;

pub mod object;
pub mod ops;
pub mod types;

pub use config::Config;
pub use error::{Error, IoResultExt, Result};
pub use hash::{ObjectId, HEX_LEN, ID_LEN};
pub use object::{
    blob_id, read_blob, read_tree, tree_id, write_blob, write_commit, FsStore, MemoryStore,
    ObjectKind, ObjectStore, RawObject,
};
pub use repo::{Repo, CONTROL_DIR};
pub use types::{Commit, EntryMode, Identity, Signature, Tree, TreeEntry, TZ_OFFSET};
