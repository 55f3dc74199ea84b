use std::fs;
use std::path::Path;

use crate::error::{IoResultExt, Result};
use crate::hash::ObjectId;
use crate::object::{blob_id, write_blob, ObjectStore};

/// compute the blob id of a file, storing it when `write` is set
pub fn hash_object<S: ObjectStore + ?Sized>(store: &S, path: &Path, write: bool) -> Result<ObjectId> {
    if !write {
        return hash_file(path);
    }
    let content = fs::read(path).with_path(path)?;
    write_blob(store, &content)
}

/// compute the blob id of a file without a store
pub fn hash_file(path: &Path) -> Result<ObjectId> {
    let content = fs::read(path).with_path(path)?;
    Ok(blob_id(&content))
}
