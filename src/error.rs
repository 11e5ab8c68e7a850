use std::path::PathBuf;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::digest::Digest;
use crate::object::ObjectKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything the object store and repository graph can fail with.
///
/// None of these are retried internally; each carries the digest, path or name involved so the
/// caller can render a precise diagnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("not a repository (or any of the parent directories): {0}")]
    RepositoryNotFound(Utf8PathBuf),

    #[error("repository already initialised: {0}")]
    AlreadyInitialized(Utf8PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(Utf8PathBuf),

    #[error("configuration file missing: {0}")]
    MissingConfig(Utf8PathBuf),

    #[error("unsupported repository format version: {0:?}")]
    UnsupportedConfigVersion(Option<String>),

    #[error("object not found: {0:x}")]
    ObjectNotFound(Digest),

    #[error("malformed object {oid:x}: {reason}")]
    MalformedObject { oid: Digest, reason: String },

    #[error("corrupt object {oid:x}: {source}")]
    CorruptObject {
        oid: Digest,
        #[source]
        source: Box<Error>,
    },

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("unknown tree entry mode: {0}")]
    UnknownTreeMode(String),

    #[error("tree entry name cannot be checked out safely: {0:?}")]
    UnsafeEntryName(String),

    #[error("malformed key-value list: {0}")]
    MalformedKvlm(String),

    #[error("missing '{0}' header")]
    MissingHeader(&'static str),

    #[error("invalid digest: {0:?}")]
    InvalidDigest(String),

    #[error("object {oid:x} is a {kind}, not a commit")]
    NotACommit { oid: Digest, kind: ObjectKind },

    #[error("object {oid:x} is a {actual}, expected a {expected}")]
    UnexpectedKind {
        oid: Digest,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    #[error("reference '{name}' points to non-existent reference '{target}'")]
    DanglingReference { name: String, target: String },

    #[error("symbolic reference cycle while resolving '{0}'")]
    ReferenceCycle(String),

    #[error("invalid ref name: {0}")]
    InvalidRefName(String),

    #[error("reference already exists: {0}")]
    RefAlreadyExists(String),

    #[error("reference is locked by another process: {0}")]
    RefLocked(String),

    #[error("unknown revision: {0}")]
    UnknownRevision(String),

    #[error("ambiguous revision '{name}': matches {} objects", .candidates.len())]
    AmbiguousRevision { name: String, candidates: Vec<Digest> },

    #[error("invalid revision '{name}': {reason}")]
    InvalidRevision { name: String, reason: String },

    #[error("destination is not empty: {0}")]
    DestinationNotEmpty(Utf8PathBuf),

    #[error("destination is not a directory: {0}")]
    DestinationNotADirectory(Utf8PathBuf),

    #[error("path is not valid unicode: {0:?}")]
    NonUtf8Path(PathBuf),

    #[error(transparent)]
    Config(#[from] ini::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Attach the digest of the object whose contents produced this error.
    ///
    /// Only errors about an object's contents are wrapped; anything that already names an object
    /// or has nothing to do with contents passes through unchanged.
    pub fn in_object(self, oid: &Digest) -> Self {
        match self {
            Error::MalformedTree(_)
            | Error::UnknownTreeMode(_)
            | Error::MalformedKvlm(_)
            | Error::MissingHeader(_)
            | Error::InvalidDigest(_) => Error::CorruptObject {
                oid: oid.clone(),
                source: Box::new(self),
            },
            other => other,
        }
    }
}
