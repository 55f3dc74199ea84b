use crate::error::Result;
use crate::hash::ObjectId;
use crate::object::{ObjectKind, ObjectStore, RawObject};
use crate::types::Tree;

/// read an object's kind and content
pub fn cat_file<S: ObjectStore + ?Sized>(store: &S, id: &ObjectId) -> Result<RawObject> {
    store.read_object(id)
}

/// render an object for display
///
/// trees are shown one entry per line in `ls-tree` format; blobs and commits
/// are returned as stored.
pub fn pretty_print(object: &RawObject) -> Result<Vec<u8>> {
    match object.kind {
        ObjectKind::Tree => {
            let tree = Tree::parse(&object.content)?;
            let mut out = String::new();
            for entry in tree.entries() {
                out.push_str(&entry.to_string());
                out.push('\n');
            }
            Ok(out.into_bytes())
        }
        ObjectKind::Blob | ObjectKind::Commit => Ok(object.content.clone()),
    }
}
