use crate::error::Result;
use crate::hash::ObjectId;
use crate::object::codec::{encode, ObjectKind};
use crate::object::read_kind;
use crate::object::store::ObjectStore;
use crate::types::Tree;

/// write a tree to the object store
pub fn write_tree<S: ObjectStore + ?Sized>(store: &S, tree: &Tree) -> Result<ObjectId> {
    store.write_object(ObjectKind::Tree, &tree.to_bytes())
}

/// compute the id a tree would have, without storing it
pub fn tree_id(tree: &Tree) -> ObjectId {
    ObjectId::digest(&encode(ObjectKind::Tree, &tree.to_bytes()))
}

/// read a tree from the object store
pub fn read_tree<S: ObjectStore + ?Sized>(store: &S, id: &ObjectId) -> Result<Tree> {
    let content = read_kind(store, id, ObjectKind::Tree)?;
    Tree::parse(&content)
}
