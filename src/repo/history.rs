use std::collections::HashSet;

use tracing::*;

use super::{Database, Repo};
use crate::commit::Commit;
use crate::digest::Digest;
use crate::Result;

/// Depth-first walk over commit parents, yielding every reachable commit once.
///
/// Commits come out in pre-order, parents visited in header order. The visited set is what makes
/// the walk terminate on a corrupt repository whose parent links form a cycle. After an error the
/// iterator is exhausted.
pub struct History<'r> {
    database: &'r Database,
    pending: Vec<Digest>,
    seen: HashSet<Digest>,
}

impl<'r> History<'r> {
    pub fn new(database: &'r Database, start: Digest) -> Self {
        Self {
            database,
            pending: vec![start],
            seen: HashSet::new(),
        }
    }

    fn visit(&mut self, oid: &Digest) -> Result<Commit> {
        let commit = self.database.load_commit(oid)?;
        let parents = commit.parents().map_err(|e| e.in_object(oid))?;
        trace!(%oid, parents = parents.len(), "Visiting commit");
        // reversed so the first parent is popped first
        self.pending.extend(
            parents
                .into_iter()
                .rev()
                .filter(|parent| !self.seen.contains(parent)),
        );
        Ok(commit)
    }
}

impl Iterator for History<'_> {
    type Item = Result<(Digest, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(oid) = self.pending.pop() {
            if !self.seen.insert(oid.clone()) {
                continue;
            }
            return Some(match self.visit(&oid) {
                Ok(commit) => Ok((oid, commit)),
                Err(e) => {
                    self.pending.clear();
                    Err(e)
                }
            });
        }
        None
    }
}

impl Repo {
    /// Walk the history reachable from `start`.
    pub fn history(&self, start: Digest) -> History<'_> {
        History::new(&self.database, start)
    }
}
