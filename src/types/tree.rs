use std::fmt;

use crate::error::{Error, Result};
use crate::hash::{ObjectId, ID_LEN};
use crate::object::ObjectKind;

/// a directory tree - collection of entries sorted by name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// create a new tree, validating and sorting entries
    pub fn new(mut entries: Vec<TreeEntry>) -> Result<Self> {
        // validate entry names
        for entry in &entries {
            validate_entry_name(&entry.name)?;
        }

        // sort by name (byte-wise)
        entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

        // check for duplicates
        for window in entries.windows(2) {
            if window[0].name == window[1].name {
                return Err(Error::DuplicateEntryName(window[0].name.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// create an empty tree
    pub fn empty() -> Self {
        Self { entries: vec![] }
    }

    /// get entries slice
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// consume and return entries
    pub fn into_entries(self) -> Vec<TreeEntry> {
        self.entries
    }

    /// entry names, in stored order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// look up entry by name
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// is tree empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// serialize to tree object content
    ///
    /// each entry is `"<mode> <name>\0"` followed by the 20 raw id bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.extend_from_slice(entry.mode.as_str().as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.name.as_bytes());
            out.push(0);
            out.extend_from_slice(entry.id.as_bytes());
        }
        out
    }

    /// parse tree object content
    ///
    /// entries are kept in stored order; trees written by other tools may
    /// order directories differently, and listing them should not fail.
    pub fn parse(content: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < content.len() {
            let rest = &content[pos..];

            let nul = rest.iter().position(|&b| b == 0).ok_or_else(|| {
                Error::TreeParse(format!("entry at offset {} has no terminator", pos))
            })?;
            let head = &rest[..nul];

            let space = head.iter().position(|&b| b == b' ').ok_or_else(|| {
                Error::TreeParse(format!("entry at offset {} has no mode separator", pos))
            })?;
            let mode = EntryMode::from_bytes(&head[..space])?;
            let name = std::str::from_utf8(&head[space + 1..]).map_err(|_| {
                Error::TreeParse(format!("entry name at offset {} is not valid utf-8", pos))
            })?;

            let id_start = nul + 1;
            let id = rest
                .get(id_start..id_start + ID_LEN)
                .and_then(ObjectId::from_slice)
                .ok_or_else(|| {
                    Error::TreeParse(format!("entry {:?} has a truncated object id", name))
                })?;

            entries.push(TreeEntry::new(mode, name, id));
            pos += id_start + ID_LEN;
        }

        Ok(Self { entries })
    }
}

/// validate an entry name
fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidEntryName("empty name".to_string()));
    }
    if name.contains('/') {
        return Err(Error::InvalidEntryName(format!(
            "name contains '/': {}",
            name
        )));
    }
    if name.contains('\0') {
        return Err(Error::InvalidEntryName(format!(
            "name contains null byte: {}",
            name
        )));
    }
    if name == "." || name == ".." {
        return Err(Error::InvalidEntryName(format!("reserved name: {}", name)));
    }
    Ok(())
}

/// file mode recorded in a tree entry
///
/// the tree builder only ever writes `File` and `Directory`; the other modes
/// are recognised so that trees written by git itself can be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryMode {
    /// regular file (`100644`)
    File,
    /// executable file (`100755`)
    Executable,
    /// symbolic link (`120000`)
    Symlink,
    /// subdirectory (`40000`)
    Directory,
    /// submodule commit (`160000`)
    Gitlink,
}

impl EntryMode {
    /// mode string as stored in tree objects
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::File => "100644",
            EntryMode::Executable => "100755",
            EntryMode::Symlink => "120000",
            EntryMode::Directory => "40000",
            EntryMode::Gitlink => "160000",
        }
    }

    /// parse the mode field of a tree entry
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        match raw {
            b"100644" => Ok(EntryMode::File),
            b"100755" => Ok(EntryMode::Executable),
            b"120000" => Ok(EntryMode::Symlink),
            b"40000" | b"040000" => Ok(EntryMode::Directory),
            b"160000" => Ok(EntryMode::Gitlink),
            other => Err(Error::TreeParse(format!(
                "unknown entry mode {:?}",
                String::from_utf8_lossy(other)
            ))),
        }
    }

    /// kind of the object this entry points at
    pub fn object_kind(&self) -> ObjectKind {
        match self {
            EntryMode::Directory => ObjectKind::Tree,
            EntryMode::Gitlink => ObjectKind::Commit,
            _ => ObjectKind::Blob,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }
}

/// a single entry in a tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub id: ObjectId,
}

impl TreeEntry {
    pub fn new(mode: EntryMode, name: impl Into<String>, id: ObjectId) -> Self {
        Self {
            mode,
            name: name.into(),
            id,
        }
    }

    /// create a regular file entry
    pub fn file(name: impl Into<String>, id: ObjectId) -> Self {
        Self::new(EntryMode::File, name, id)
    }

    /// create a directory entry
    pub fn directory(name: impl Into<String>, id: ObjectId) -> Self {
        Self::new(EntryMode::Directory, name, id)
    }
}

/// `git ls-tree` style line: `<mode> <kind> <id>\t<name>`
impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0>6} {} {}\t{}",
            self.mode.as_str(),
            self.mode.object_kind(),
            self.id,
            self.name
        )
    }
}
