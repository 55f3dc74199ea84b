use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::hash::ObjectId;
use crate::object::{write_commit, ObjectStore};
use crate::types::{Commit, Identity};

/// source of commit timestamps
pub trait Clock {
    /// seconds since the unix epoch
    fn now(&self) -> i64;
}

/// wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        seconds_since_epoch(SystemTime::now())
    }
}

/// whole seconds since the unix epoch, saturating at 0 for earlier times
fn seconds_since_epoch(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => {
            tracing::warn!(
                behind = ?e.duration(),
                "system clock is before the unix epoch, using timestamp 0"
            );
            0
        }
    }
}

/// clock frozen at a given timestamp
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// create and store a commit object for a tree
///
/// author and committer come from `identity` and share one timestamp read
/// from `clock`. the tree and parents are referenced as given; whether they
/// exist in the store is not checked.
pub fn commit_tree<S, C>(
    store: &S,
    tree: &ObjectId,
    parents: &[ObjectId],
    message: &str,
    identity: &Identity,
    clock: &C,
) -> Result<ObjectId>
where
    S: ObjectStore + ?Sized,
    C: Clock + ?Sized,
{
    let commit = Commit::with_timestamp(*tree, parents.to_vec(), identity, clock.now(), message);
    let id = write_commit(store, &commit)?;
    tracing::debug!(%id, tree = %tree, parents = parents.len(), "stored commit");
    Ok(id)
}
