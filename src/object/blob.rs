use crate::error::Result;
use crate::hash::ObjectId;
use crate::object::codec::{encode, ObjectKind};
use crate::object::read_kind;
use crate::object::store::ObjectStore;

/// write a blob to the object store
///
/// returns the blob id, which can be used to reference this blob.
pub fn write_blob<S: ObjectStore + ?Sized>(store: &S, content: &[u8]) -> Result<ObjectId> {
    store.write_object(ObjectKind::Blob, content)
}

/// compute the id a blob would have, without storing it
pub fn blob_id(content: &[u8]) -> ObjectId {
    ObjectId::digest(&encode(ObjectKind::Blob, content))
}

/// read blob content
pub fn read_blob<S: ObjectStore + ?Sized>(store: &S, id: &ObjectId) -> Result<Vec<u8>> {
    read_kind(store, id, ObjectKind::Blob)
}
