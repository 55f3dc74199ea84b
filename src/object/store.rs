use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, IoResultExt, Result};
use crate::hash::ObjectId;
use crate::object::codec::{compress, decode, decompress, encode, ObjectKind};

/// a decoded object: its kind and unframed content
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawObject {
    pub kind: ObjectKind,
    pub content: Vec<u8>,
}

/// content-addressed storage for framed objects
///
/// implementations store whatever compressed representation they like, but
/// `put` and `get` always deal in framed bytes (header + content).
pub trait ObjectStore {
    /// is an object with this id already stored
    fn exists(&self, id: &ObjectId) -> bool;

    /// store framed bytes under `id` unless already present
    ///
    /// returns true if a new object was written, false if it was deduplicated.
    fn put(&self, id: &ObjectId, framed: &[u8]) -> Result<bool>;

    /// fetch the framed bytes stored under `id`
    fn get(&self, id: &ObjectId) -> Result<Vec<u8>>;

    /// frame, hash and store content, returning its id
    fn write_object(&self, kind: ObjectKind, content: &[u8]) -> Result<ObjectId> {
        let framed = encode(kind, content);
        let id = ObjectId::digest(&framed);
        self.put(&id, &framed)?;
        Ok(id)
    }

    /// fetch and unframe an object
    fn read_object(&self, id: &ObjectId) -> Result<RawObject> {
        let framed = self.get(id)?;
        let (kind, content) = decode(&framed)?;
        Ok(RawObject {
            kind,
            content: content.to_vec(),
        })
    }
}

/// inflate a stored object and check it still hashes to its id
fn inflate_verified(id: &ObjectId, compressed: &[u8]) -> Result<Vec<u8>> {
    let framed = decompress(compressed).map_err(|e| match e {
        Error::Decompress(source) => Error::CorruptObject { id: *id, source },
        other => other,
    })?;

    if ObjectId::digest(&framed) != *id {
        return Err(Error::HashMismatch(*id));
    }

    Ok(framed)
}

/// loose-object store rooted at an `objects` directory
///
/// each object lives at `<root>/<2 hex>/<38 hex>`, zlib-compressed.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// the `objects` directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// get the filesystem path to an object
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        let (dir, file) = id.to_path_components();
        self.root.join(dir).join(file)
    }
}

impl ObjectStore for FsStore {
    fn exists(&self, id: &ObjectId) -> bool {
        self.object_path(id).exists()
    }

    fn put(&self, id: &ObjectId, framed: &[u8]) -> Result<bool> {
        let (dir, file) = id.to_path_components();
        let object_dir = self.root.join(&dir);
        let object_path = object_dir.join(&file);

        // dedup: if the object already exists, we're done
        if object_path.exists() {
            tracing::debug!(%id, "object already stored");
            return Ok(false);
        }

        let compressed = compress(framed)?;

        fs::create_dir_all(&object_dir).with_path(&object_dir)?;

        // temp file in the fan-out dir, fsync, then rename into place
        let (tmp, mut file) = TempObject::create(&object_dir)?;
        file.write_all(&compressed).with_path(tmp.path())?;
        file.sync_all().with_path(tmp.path())?;
        drop(file);
        tmp.persist(&object_path)?;

        tracing::debug!(%id, bytes = compressed.len(), "wrote object");
        Ok(true)
    }

    fn get(&self, id: &ObjectId) -> Result<Vec<u8>> {
        let path = self.object_path(id);

        let compressed = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ObjectNotFound(*id)
            } else {
                Error::Io {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        tracing::trace!(%id, bytes = compressed.len(), "read object");
        inflate_verified(id, &compressed)
    }
}

/// temp file that is removed on drop unless persisted
struct TempObject {
    path: PathBuf,
    armed: bool,
}

impl TempObject {
    fn create(dir: &Path) -> Result<(Self, File)> {
        let path = dir.join(format!("tmp_obj_{}", uuid::Uuid::new_v4()));
        let file = File::create(&path).with_path(&path)?;
        Ok((Self { path, armed: true }, file))
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// rename into place; on failure the temp file is still removed
    fn persist(mut self, dest: &Path) -> Result<()> {
        fs::rename(&self.path, dest).with_path(dest)?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for TempObject {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// in-memory store, for exercising builders without touching the filesystem
///
/// objects are kept compressed so reads go through the same inflate and
/// verification path as [`FsStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RefCell<BTreeMap<ObjectId, Vec<u8>>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of stored objects
    pub fn len(&self) -> usize {
        self.objects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.borrow().is_empty()
    }

    /// number of writes actually performed (dedup skips not counted)
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl ObjectStore for MemoryStore {
    fn exists(&self, id: &ObjectId) -> bool {
        self.objects.borrow().contains_key(id)
    }

    fn put(&self, id: &ObjectId, framed: &[u8]) -> Result<bool> {
        if self.exists(id) {
            return Ok(false);
        }
        let compressed = compress(framed)?;
        self.objects.borrow_mut().insert(*id, compressed);
        self.writes.set(self.writes.get() + 1);
        Ok(true)
    }

    fn get(&self, id: &ObjectId) -> Result<Vec<u8>> {
        let objects = self.objects.borrow();
        let compressed = objects.get(id).ok_or(Error::ObjectNotFound(*id))?;
        inflate_verified(id, compressed)
    }
}
