mod parse;
mod write;

use std::cmp::Ordering;

use bstr::{BString, ByteSlice};

use crate::digest::Digest;
use crate::filemode::FileMode;
use crate::object::ObjectKind;
use crate::{Error, Result};

/// One record of a tree: `<mode> <name>\0<20 raw digest bytes>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub name: BString,
    pub oid: Digest,
}

impl TreeEntry {
    pub fn new(mode: FileMode, name: impl Into<BString>, oid: Digest) -> Self {
        Self {
            mode,
            name: name.into(),
            oid,
        }
    }

    /// The kind of object this entry points at, derived from its mode.
    pub fn kind(&self) -> Result<ObjectKind> {
        self.mode.kind()
    }

    /// The entry name, if it is safe to use as a single path component on disk.
    ///
    /// Rejects anything that could escape or clobber the directory being written into: empty
    /// names, `.` and `..`, names containing a separator or NUL, and `.git` in any case.
    pub fn checked_name(&self) -> Result<&[u8]> {
        let name = self.name.as_bytes();
        let unsafe_name = name.is_empty()
            || name == b"."
            || name == b".."
            || name.eq_ignore_ascii_case(b".git")
            || name.contains(&b'/')
            || name.contains(&b'\0');
        if unsafe_name {
            return Err(Error::UnsafeEntryName(self.name.to_str_lossy().into_owned()));
        }
        Ok(name)
    }

    /// Canonical order: byte-wise by name, with directories compared as if their name ended in
    /// `'/'`.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        fn key(entry: &TreeEntry) -> impl Iterator<Item = u8> + '_ {
            let suffix = entry.mode.is_directory().then_some(b'/');
            entry.name.iter().copied().chain(suffix)
        }
        key(self).cmp(key(other))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from entries in any order; serialization sorts them.
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Entries in the order they were parsed or inserted.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn get(&self, name: &[u8]) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name.as_bytes() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
