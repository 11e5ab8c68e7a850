use std::collections::{BTreeMap, HashSet};
use std::io::{ErrorKind, Write};
use std::str::FromStr;

use camino::Utf8Path;
use tracing::*;
use walkdir::WalkDir;

use super::Repo;
use crate::digest::Digest;
use crate::lock::LockedFile;
use crate::util;
use crate::{Error, Result};

pub const HEAD: &str = "HEAD";

const SYMREF_PREFIX: &str = "ref: ";

/// Check whether a string is a valid ref name.
///
/// This is not a port of `check_refname_component` from git, but is based on the documentation for
/// that function.
///
/// Disallowed paths are any path where:
///
/// - it (or any path component) begins with `'.'`
/// - it contains double dots `".."`
/// - it contains ASCII control characters, including `'\0'`
/// - it contains ':', '?', '[', '\', '^', '~', '*', or SP anywhere
/// - it is empty, or ends with `'/'`
/// - it contains an empty path component
/// - it ends with `".lock"`
/// - it contains `"@{"`
///
/// See: <https://github.com/git/git/blob/795ea8776befc95ea2becd8020c7a284677b4161/refs.c#L59-L77>
pub fn is_valid_ref_name(name: &str) -> bool {
    !(name.is_empty()
        || name
            .chars()
            .any(|c| c.is_ascii_control() || " *:?[\\^~".contains(c))
        || name.starts_with('.')
        || name.contains("/.")
        || name.contains("..")
        || name.contains("//")
        || name.ends_with('/')
        || name.ends_with(".lock")
        || name.contains("@{"))
}

/// One level of the refs hierarchy, keyed by path component.
pub type RefTree = BTreeMap<String, RefNode>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefNode {
    /// A ref file and what it resolves to. `None` for a symbolic ref to an unborn branch.
    Ref(Option<Digest>),
    /// A directory of further refs.
    Namespace(RefTree),
}

enum RefContents {
    Symbolic(String),
    Direct(Digest),
}

impl Repo {
    /// Read one ref file without following it. `Ok(None)` if the file doesn't exist.
    fn read_ref_file(&self, name: &str) -> Result<Option<RefContents>> {
        let path = self.git_dir.join(name);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let contents = contents.strip_suffix('\n').unwrap_or(&contents);

        if let Some(target) = contents.strip_prefix(SYMREF_PREFIX) {
            return Ok(Some(RefContents::Symbolic(target.trim().to_owned())));
        }
        Digest::from_str(contents.trim())
            .map(|oid| Some(RefContents::Direct(oid)))
            .map_err(|_| Error::InvalidDigest(contents.to_owned()))
    }

    /// The ref HEAD names, if HEAD is symbolic.
    pub fn head_target(&self) -> Result<Option<String>> {
        match self.read_ref_file(HEAD)? {
            Some(RefContents::Symbolic(target)) => Ok(Some(target)),
            _ => Ok(None),
        }
    }

    /// Whether `name` is the branch a symbolic HEAD points at. An unreadable HEAD has no such
    /// branch.
    fn is_unborn(&self, name: &str) -> bool {
        match self.head_target() {
            Ok(target) => target.as_deref() == Some(name),
            Err(e) => {
                debug!(error=%e, "Ignoring unreadable HEAD");
                false
            }
        }
    }

    /// Follow `name` (a path relative to the metadata directory, e.g. `refs/heads/main`) through
    /// any symbolic refs to a digest.
    ///
    /// A missing ref is only acceptable as the branch HEAD points at, which is what a repository
    /// with no commits looks like; that resolves to `Ok(None)`.
    pub fn resolve_ref(&self, name: &str) -> Result<Option<Digest>> {
        let mut visited = HashSet::new();
        let mut current = name.to_owned();

        loop {
            if !visited.insert(current.clone()) {
                return Err(Error::ReferenceCycle(name.to_owned()));
            }
            match self.read_ref_file(&current)? {
                Some(RefContents::Direct(oid)) => {
                    trace!(%name, %oid, "Resolved ref");
                    return Ok(Some(oid));
                }
                Some(RefContents::Symbolic(target)) => {
                    if !is_valid_ref_name(&target) {
                        return Err(Error::InvalidRefName(target));
                    }
                    trace!(from=%current, to=%target, "Following symbolic ref");
                    current = target;
                }
                None if self.is_unborn(&current) => {
                    debug!(%name, "Ref points at an unborn branch");
                    return Ok(None);
                }
                None => {
                    return Err(Error::DanglingReference {
                        name: name.to_owned(),
                        target: current,
                    })
                }
            }
        }
    }

    pub fn read_head(&self) -> Result<Option<Digest>> {
        self.resolve_ref(HEAD)
    }

    /// Whether a ref file called `name` exists.
    pub fn ref_exists(&self, name: &str) -> bool {
        is_valid_ref_name(name) && self.git_dir.join(name).is_file()
    }

    /// Every ref under `refs/`, resolved, as a tree mirroring the directory layout.
    pub fn list_refs(&self) -> Result<RefTree> {
        let refs_dir = self.git_dir.join("refs");
        if !refs_dir.is_dir() {
            return Ok(RefTree::new());
        }
        self.list_refs_in(&refs_dir)
    }

    fn list_refs_in(&self, dir: &Utf8Path) -> Result<RefTree> {
        let mut tree = RefTree::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry?;
            let path = util::utf8_path(entry.into_path())?;
            let Some(file_name) = path.file_name() else {
                continue;
            };
            if file_name.ends_with(".lock") {
                continue;
            }
            let node = if path.is_dir() {
                RefNode::Namespace(self.list_refs_in(&path)?)
            } else {
                let name = path
                    .strip_prefix(&self.git_dir)
                    .map_err(|_| Error::InvalidRefName(path.to_string()))?;
                RefNode::Ref(self.resolve_ref(name.as_str())?)
            };
            tree.insert(file_name.to_owned(), node);
        }
        Ok(tree)
    }

    /// Point `name` (a full name under `refs/`) at `oid`.
    ///
    /// An existing ref is only replaced with `force`.
    pub fn create_ref(&self, name: &str, oid: &Digest, force: bool) -> Result<()> {
        if !name.starts_with("refs/") || !is_valid_ref_name(name) {
            return Err(Error::InvalidRefName(name.to_owned()));
        }

        let segments: Vec<&str> = name.split('/').collect();
        let path = self.resolve_path(&segments, true)?;

        if path.is_dir() || (path.exists() && !force) {
            return Err(Error::RefAlreadyExists(name.to_owned()));
        }

        let mut lock = LockedFile::try_acquire(&path)?
            .ok_or_else(|| Error::RefLocked(name.to_owned()))?;
        writeln!(lock, "{oid:x}")?;
        lock.commit()?;

        debug!(%name, %oid, "Updated ref");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ref_names() {
        for name in ["main", "refs/heads/main", "origin/main", "v1.0.0", "feature/x-y_z"] {
            assert!(is_valid_ref_name(name), "{name}");
        }
    }

    #[test]
    fn test_invalid_ref_names() {
        for name in [
            "",
            ".hidden",
            "refs/.hidden",
            "a..b",
            "a//b",
            "trailing/",
            "main.lock",
            "at@{0}",
            "has space",
            "star*",
            "col:on",
            "quest?",
            "brack[et",
            "back\\slash",
            "car^et",
            "til~de",
            "nul\0byte",
            "tab\tchar",
            "del\x7f",
        ] {
            assert!(!is_valid_ref_name(name), "{name:?}");
        }
    }
}
