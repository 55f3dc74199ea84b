use crate::error::Result;
use crate::hash::ObjectId;
use crate::object::codec::ObjectKind;
use crate::object::store::ObjectStore;
use crate::types::Commit;

/// write a commit to the object store
///
/// the commit is stored as its git text rendering; referenced tree and
/// parent ids are not checked for existence.
pub fn write_commit<S: ObjectStore + ?Sized>(store: &S, commit: &Commit) -> Result<ObjectId> {
    store.write_object(ObjectKind::Commit, &commit.to_bytes())
}
