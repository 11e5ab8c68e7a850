//! A content-addressable object store and the repository graph built on it.
//!
//! Objects (blobs, trees, commits and tags) are stored zlib-compressed under the SHA-1 of their
//! `<kind> <len>\0<payload>` envelope. References name digests, optionally through other
//! references, and commits link to their parents to form history.

#[cfg(test)]
mod test;

pub mod blob;
pub mod commit;
pub mod digest;
pub mod error;
pub mod filemode;
pub mod kvlm;
pub mod lock;
pub mod object;
pub mod repo;
pub mod revision;
pub mod storable;
pub mod tag;
pub mod timestamp;
pub mod tree;
pub mod util;

pub use digest::Digest;
pub use error::{Error, Result};
pub use object::{Object, ObjectKind};
pub use repo::Repo;
