use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::ObjectId;

/// a name and email pair, rendered as `name <email>`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
}

impl Signature {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::new("gitlite", "gitlite@localhost")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// author and committer used for every commit written by a repository
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub author: Signature,
    #[serde(default)]
    pub committer: Signature,
}

/// timezone offset written on author and committer lines
pub const TZ_OFFSET: &str = "+0000";

/// a commit object pointing to a tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    /// root tree id
    pub tree: ObjectId,
    /// parent commit ids (empty for initial, 1 for linear, 2+ for merge)
    pub parents: Vec<ObjectId>,
    pub author: Signature,
    pub committer: Signature,
    /// unix timestamp (seconds since epoch), shared by author and committer
    pub timestamp: i64,
    pub message: String,
}

impl Commit {
    /// create a new commit with explicit timestamp
    pub fn with_timestamp(
        tree: ObjectId,
        parents: Vec<ObjectId>,
        identity: &Identity,
        timestamp: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tree,
            parents,
            author: identity.author.clone(),
            committer: identity.committer.clone(),
            timestamp,
            message: message.into(),
        }
    }

    /// render the commit object content
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tree {}", self.tree)?;
        for parent in &self.parents {
            writeln!(f, "parent {}", parent)?;
        }
        writeln!(f, "author {} {} {}", self.author, self.timestamp, TZ_OFFSET)?;
        writeln!(
            f,
            "committer {} {} {}",
            self.committer, self.timestamp, TZ_OFFSET
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.message)
    }
}
