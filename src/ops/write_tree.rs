use std::fs;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, IoResultExt, Result};
use crate::hash::ObjectId;
use crate::object::{write_blob, ObjectStore};
use crate::repo::CONTROL_DIR;
use crate::types::{Tree, TreeEntry};

/// store a directory as tree and blob objects, returning the root tree id
///
/// files become `100644` blobs and subdirectories become `40000` trees.
/// any entry named `.git` is skipped at every depth. symlinks are followed,
/// so a link to a file is stored as a blob of the target's bytes and a link
/// to a directory as a subtree; a symlink cycle or a dangling link is an
/// error. sockets, fifos and devices are skipped with a warning.
///
/// the walk is contents-first, so every subdirectory's tree is written
/// before its parent needs the id. entries still waiting for their parent
/// are kept on an explicit per-depth stack, which means nesting depth is
/// not limited by the call stack.
pub fn write_tree<S: ObjectStore + ?Sized>(store: &S, root: &Path) -> Result<ObjectId> {
    let meta = fs::metadata(root).with_path(root)?;
    if !meta.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    // pending[d] collects entries for the open directory at depth d
    let mut pending: Vec<Vec<TreeEntry>> = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .contents_first(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != CONTROL_DIR);

    for entry in walker {
        let entry = entry?;
        let depth = entry.depth();
        if pending.len() <= depth {
            pending.resize_with(depth + 1, Vec::new);
        }

        let file_type = entry.file_type();
        let tree_entry = if file_type.is_dir() {
            let tree = Tree::new(std::mem::take(&mut pending[depth]))?;
            let id = crate::object::write_tree(store, &tree)?;
            tracing::debug!(path = %entry.path().display(), %id, entries = tree.len(), "stored tree");

            if depth == 0 {
                return Ok(id);
            }
            TreeEntry::directory(entry_name(&entry)?, id)
        } else if file_type.is_file() {
            let path = entry.path();
            let content = fs::read(path).with_path(path)?;
            let id = write_blob(store, &content)?;
            TreeEntry::file(entry_name(&entry)?, id)
        } else {
            tracing::warn!(path = %entry.path().display(), "skipping special file");
            continue;
        };

        pending[depth - 1].push(tree_entry);
    }

    // a contents-first walk yields the root last; getting here means it vanished mid-walk
    Err(Error::NotADirectory(root.to_path_buf()))
}

fn entry_name(entry: &DirEntry) -> Result<&str> {
    entry.file_name().to_str().ok_or_else(|| {
        Error::InvalidEntryName(format!("name is not valid utf-8: {}", entry.path().display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{read_blob, read_tree, tree_id, FsStore, MemoryStore};
    use crate::types::EntryMode;
    use tempfile::tempdir;

    #[test]
    fn test_write_tree_two_files() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("b.txt"), "hi").unwrap();
        fs::write(source.join("a.txt"), "lo").unwrap();

        let store = MemoryStore::new();
        let id = write_tree(&store, &source).unwrap();

        let tree = read_tree(&store, &id).unwrap();
        assert_eq!(tree.names(), vec!["a.txt", "b.txt"]);

        let a = tree.get("a.txt").unwrap();
        assert_eq!(a.mode, EntryMode::File);
        assert_eq!(read_blob(&store, &a.id).unwrap(), b"lo");
    }

    #[test]
    fn test_write_tree_empty_directory() {
        let dir = tempdir().unwrap();

        let store = MemoryStore::new();
        let id = write_tree(&store, dir.path()).unwrap();

        assert_eq!(id.to_hex(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
        assert!(read_tree(&store, &id).unwrap().is_empty());
    }

    #[test]
    fn test_write_tree_nested() {
        let dir = tempdir().unwrap();
        let source = dir.path();
        fs::create_dir_all(source.join("a/b/c")).unwrap();
        fs::write(source.join("a/b/c/file.txt"), "deep").unwrap();
        fs::write(source.join("top.txt"), "top").unwrap();
        fs::create_dir(source.join("empty")).unwrap();

        let store = MemoryStore::new();
        let root = write_tree(&store, source).unwrap();

        let tree = read_tree(&store, &root).unwrap();
        assert_eq!(tree.names(), vec!["a", "empty", "top.txt"]);

        let a = tree.get("a").unwrap();
        assert_eq!(a.mode, EntryMode::Directory);
        let a_tree = read_tree(&store, &a.id).unwrap();
        let b_tree = read_tree(&store, &a_tree.get("b").unwrap().id).unwrap();
        let c_tree = read_tree(&store, &b_tree.get("c").unwrap().id).unwrap();
        let file = c_tree.get("file.txt").unwrap();
        assert_eq!(read_blob(&store, &file.id).unwrap(), b"deep");

        let empty = tree.get("empty").unwrap();
        assert_eq!(empty.id, tree_id(&Tree::empty()));
    }

    #[test]
    fn test_write_tree_matches_hand_built_tree() {
        let dir = tempdir().unwrap();
        let source = dir.path();
        fs::create_dir(source.join("sub")).unwrap();
        fs::write(source.join("sub/inner"), "x").unwrap();
        fs::write(source.join("file"), "y").unwrap();

        let store = MemoryStore::new();
        let root = write_tree(&store, source).unwrap();

        let sub = Tree::new(vec![TreeEntry::file(
            "inner",
            crate::object::blob_id(b"x"),
        )])
        .unwrap();
        let expected = Tree::new(vec![
            TreeEntry::directory("sub", tree_id(&sub)),
            TreeEntry::file("file", crate::object::blob_id(b"y")),
        ])
        .unwrap();

        assert_eq!(root, tree_id(&expected));
    }

    #[test]
    fn test_write_tree_skips_control_dir() {
        let dir = tempdir().unwrap();
        let source = dir.path();
        fs::create_dir_all(source.join(".git/objects")).unwrap();
        fs::write(source.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::create_dir_all(source.join("nested/.git")).unwrap();
        fs::write(source.join("nested/.git/config"), "x").unwrap();
        fs::write(source.join("nested/kept.txt"), "kept").unwrap();
        fs::write(source.join(".gitignore"), "target\n").unwrap();

        let store = MemoryStore::new();
        let root = write_tree(&store, source).unwrap();

        let tree = read_tree(&store, &root).unwrap();
        assert_eq!(tree.names(), vec![".gitignore", "nested"]);

        let nested = read_tree(&store, &tree.get("nested").unwrap().id).unwrap();
        assert_eq!(nested.names(), vec!["kept.txt"]);
    }

    #[test]
    fn test_write_tree_is_deterministic_and_deduplicated() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir_all(source.join("x")).unwrap();
        fs::write(source.join("x/one"), "1").unwrap();
        fs::write(source.join("two"), "2").unwrap();

        let objects = dir.path().join("objects");
        let store = FsStore::new(&objects);

        let first = write_tree(&store, &source).unwrap();
        let second = write_tree(&store, &source).unwrap();
        assert_eq!(first, second);

        let mem = MemoryStore::new();
        write_tree(&mem, &source).unwrap();
        let writes = mem.writes();
        write_tree(&mem, &source).unwrap();
        assert_eq!(mem.writes(), writes);
        // two blobs, two trees
        assert_eq!(mem.len(), 4);
    }

    #[test]
    fn test_write_tree_identical_files_share_blob() {
        let dir = tempdir().unwrap();
        let source = dir.path();
        fs::create_dir(source.join("d")).unwrap();
        fs::write(source.join("a"), "same").unwrap();
        fs::write(source.join("d/b"), "same").unwrap();

        let store = MemoryStore::new();
        write_tree(&store, source).unwrap();

        // one blob, two trees
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_write_tree_changes_with_content() {
        let dir = tempdir().unwrap();
        let source = dir.path();
        fs::write(source.join("f"), "v1").unwrap();

        let store = MemoryStore::new();
        let before = write_tree(&store, source).unwrap();
        fs::write(source.join("f"), "v2").unwrap();
        let after = write_tree(&store, source).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn test_write_tree_deep_nesting() {
        let dir = tempdir().unwrap();
        let mut path = dir.path().to_path_buf();
        for _ in 0..200 {
            path.push("d");
        }
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("leaf"), "bottom").unwrap();

        let store = MemoryStore::new();
        let mut id = write_tree(&store, dir.path()).unwrap();

        for _ in 0..200 {
            let tree = read_tree(&store, &id).unwrap();
            assert_eq!(tree.names(), vec!["d"]);
            id = tree.get("d").unwrap().id;
        }
        let bottom = read_tree(&store, &id).unwrap();
        assert_eq!(bottom.names(), vec!["leaf"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_tree_follows_file_symlink() {
        let dir = tempdir().unwrap();
        let source = dir.path();
        fs::write(source.join("real"), "data").unwrap();
        std::os::unix::fs::symlink("real", source.join("link")).unwrap();

        let store = MemoryStore::new();
        let root = write_tree(&store, source).unwrap();

        let tree = read_tree(&store, &root).unwrap();
        assert_eq!(tree.names(), vec!["link", "real"]);

        let link = tree.get("link").unwrap();
        assert_eq!(link.mode, EntryMode::File);
        assert_eq!(link.id, tree.get("real").unwrap().id);
        assert_eq!(read_blob(&store, &link.id).unwrap(), b"data");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_tree_follows_directory_symlink() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source");
        let outside = dir.path().join("outside");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("inner.txt"), "inner").unwrap();
        std::os::unix::fs::symlink(&outside, source.join("linked")).unwrap();

        let store = MemoryStore::new();
        let root = write_tree(&store, &source).unwrap();

        let tree = read_tree(&store, &root).unwrap();
        assert_eq!(tree.names(), vec!["linked"]);

        let linked = tree.get("linked").unwrap();
        assert_eq!(linked.mode, EntryMode::Directory);
        let sub = read_tree(&store, &linked.id).unwrap();
        assert_eq!(sub.names(), vec!["inner.txt"]);
        assert_eq!(read_blob(&store, &sub.get("inner.txt").unwrap().id).unwrap(), b"inner");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_tree_symlink_cycle_is_error() {
        let dir = tempdir().unwrap();
        let source = dir.path();
        fs::create_dir(source.join("d")).unwrap();
        std::os::unix::fs::symlink("..", source.join("d/up")).unwrap();

        let store = MemoryStore::new();
        assert!(matches!(write_tree(&store, source), Err(Error::Walk(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_tree_dangling_symlink_is_error() {
        let dir = tempdir().unwrap();
        let source = dir.path();
        std::os::unix::fs::symlink("nowhere", source.join("broken")).unwrap();

        let store = MemoryStore::new();
        assert!(write_tree(&store, source).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_tree_skips_fifo() {
        use std::process::Command;

        let dir = tempdir().unwrap();
        let source = dir.path();
        fs::write(source.join("real"), "data").unwrap();
        let status = Command::new("mkfifo").arg(source.join("pipe")).status();
        if !matches!(status, Ok(s) if s.success()) {
            return;
        }

        let store = MemoryStore::new();
        let root = write_tree(&store, source).unwrap();

        assert_eq!(read_tree(&store, &root).unwrap().names(), vec!["real"]);
    }

    #[test]
    fn test_write_tree_rejects_file_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();

        let store = MemoryStore::new();
        assert!(matches!(
            write_tree(&store, &file),
            Err(Error::NotADirectory(_))
        ));
    }

    #[test]
    fn test_write_tree_missing_root() {
        let dir = tempdir().unwrap();

        let store = MemoryStore::new();
        assert!(matches!(
            write_tree(&store, &dir.path().join("missing")),
            Err(Error::Io { .. })
        ));
    }
}
