pub mod blob;
pub mod codec;
pub mod commit;
pub mod store;
pub mod tree;

pub use blob::{blob_id, read_blob, write_blob};
pub use codec::{compress, decode, decompress, encode, ObjectKind};
pub use commit::write_commit;
pub use store::{FsStore, MemoryStore, ObjectStore, RawObject};
pub use tree::{read_tree, tree_id, write_tree};

use crate::error::{Error, Result};
use crate::hash::ObjectId;

/// read an object and require it to be of the given kind
pub(crate) fn read_kind<S: ObjectStore + ?Sized>(
    store: &S,
    id: &ObjectId,
    expected: ObjectKind,
) -> Result<Vec<u8>> {
    let raw = store.read_object(id)?;
    if raw.kind != expected {
        return Err(Error::UnexpectedKind {
            id: *id,
            expected: expected.as_str(),
            actual: raw.kind.as_str(),
        });
    }
    Ok(raw.content)
}
