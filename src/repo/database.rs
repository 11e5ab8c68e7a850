use crate::commit::Commit;
use crate::digest::Digest;
use crate::object::{Object, ObjectKind};
use crate::storable::DatabaseObject;
use crate::storable::Storable;
use crate::tree::Tree;
use crate::util;
use crate::{Error, Result};

use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::str::FromStr;

use bstr::ByteSlice;
use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use memchr::memchr;
use tracing::*;
use walkdir::WalkDir;

/// The loose object store under `<git_dir>/objects`.
///
/// Objects are addressed by the digest of their envelope and live at `xx/yyyy...`, where `xx` is
/// the first byte of the digest in hex. Stored files are never modified.
pub struct Database {
    database_root: Utf8PathBuf,
}

impl Database {
    pub fn new(git_dir: impl AsRef<Utf8Path>) -> Self {
        Self {
            database_root: git_dir.as_ref().join("objects"),
        }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.database_root
    }

    /// Write an already-enveloped object. Does nothing if the object is already present.
    pub fn store(&self, obj: &DatabaseObject) -> Result<()> {
        let object_path = self.object_path(obj.oid());

        if object_path.exists() {
            trace!(oid=%obj.oid(), "Object already stored");
            return Ok(());
        }
        trace!(oid=%obj.oid(), "Writing object to database");

        let dirname = object_path
            .parent()
            .unwrap_or(&self.database_root)
            .to_owned();
        util::create_dirs(&self.database_root, &dirname)?;

        let content = obj.formatted();
        let mut e = ZlibEncoder::new(Vec::with_capacity(content.len()), Compression::default());
        e.write_all(content)?;
        let compressed_bytes = e.finish()?;

        // write next to the destination first so a crash never leaves a truncated object behind
        let temp_path = dirname.join(util::tmp_file_name());
        let written = std::fs::write(&temp_path, &compressed_bytes)
            .and_then(|()| std::fs::rename(&temp_path, &object_path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }

    /// Envelope, hash and store `obj`, returning its digest.
    pub fn write<T: Storable + ?Sized>(&self, obj: &T) -> Result<Digest> {
        let obj = DatabaseObject::new(obj);
        self.store(&obj)?;
        Ok(obj.into_oid())
    }

    fn object_path(&self, oid: &Digest) -> Utf8PathBuf {
        let mut x = self.database_root.to_owned();
        let oid = oid.to_hex();
        let (prefix, suffix) = oid.split_at(2);
        x.push(prefix);
        x.push(suffix);
        x
    }

    pub fn exists(&self, oid: &Digest) -> bool {
        self.object_path(oid).is_file()
    }

    fn read_to_vec(&self, oid: &Digest) -> Result<Vec<u8>> {
        trace!(object=%oid, "Reading object from database");

        let compressed = match std::fs::read(self.object_path(oid)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(oid.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut decompressed = Vec::new();
        ZlibDecoder::new(&*compressed)
            .read_to_end(&mut decompressed)
            .map_err(|e| Error::MalformedObject {
                oid: oid.clone(),
                reason: format!("corrupt zlib stream: {e}"),
            })?;

        Ok(decompressed)
    }

    /// Read an object's kind and payload without interpreting the payload.
    pub fn load_raw(&self, oid: &Digest) -> Result<(ObjectKind, Vec<u8>)> {
        let mut bytes = self.read_to_vec(oid)?;
        let (kind, content_start) = parse_envelope(oid, &bytes)?;
        bytes.drain(..content_start);
        Ok((kind, bytes))
    }

    pub fn load(&self, oid: &Digest) -> Result<Object> {
        let (kind, payload) = self.load_raw(oid)?;
        let object = Object::parse(kind, &payload).map_err(|e| e.in_object(oid))?;
        debug!(oid=%oid, %kind, "Loaded object");
        Ok(object)
    }

    pub fn load_commit(&self, oid: &Digest) -> Result<Commit> {
        let object = self.load(oid)?;
        let kind = object.kind();
        object.into_commit().ok_or_else(|| Error::NotACommit {
            oid: oid.clone(),
            kind,
        })
    }

    pub fn load_tree(&self, oid: &Digest) -> Result<Tree> {
        let object = self.load(oid)?;
        let actual = object.kind();
        object.into_tree().ok_or_else(|| Error::UnexpectedKind {
            oid: oid.clone(),
            expected: ObjectKind::Tree,
            actual,
        })
    }

    /// Every digest currently stored, in no particular order.
    pub fn entries(&self) -> Result<Vec<Digest>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.database_root).min_depth(2).max_depth(2) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let (Some(shard), Some(rest)) = (
                path.parent().and_then(|p| p.file_name()).and_then(|s| s.to_str()),
                path.file_name().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            // anything that isn't a full digest is a leftover temporary file
            if let Ok(oid) = Digest::from_str(&format!("{shard}{rest}")) {
                entries.push(oid);
            }
        }
        Ok(entries)
    }
}

/// Validate `<kind> <len>\0` at the start of `bytes`, returning the kind and where the payload
/// begins.
fn parse_envelope(oid: &Digest, bytes: &[u8]) -> Result<(ObjectKind, usize)> {
    let malformed = |reason: String| Error::MalformedObject {
        oid: oid.clone(),
        reason,
    };

    let space_idx =
        memchr(b' ', bytes).ok_or_else(|| malformed("missing type terminator".to_owned()))?;
    let r#type = &bytes[..space_idx];
    let kind = ObjectKind::from_bytes(r#type)
        .ok_or_else(|| malformed(format!("unknown object type {:?}", r#type.as_bstr())))?;

    let nul_idx = memchr(b'\0', &bytes[space_idx + 1..])
        .map(|i| space_idx + 1 + i)
        .ok_or_else(|| malformed("missing header terminator".to_owned()))?;
    let len = &bytes[space_idx + 1..nul_idx];
    let declared = Some(len)
        .filter(|len| !len.is_empty() && len.iter().all(u8::is_ascii_digit))
        .and_then(|len| len.to_str().ok()?.parse::<usize>().ok())
        .ok_or_else(|| malformed(format!("invalid length {:?}", len.as_bstr())))?;

    let content_start = nul_idx + 1;
    let actual = bytes.len() - content_start;
    if declared != actual {
        return Err(malformed(format!(
            "declared length {declared} but payload is {actual} bytes"
        )));
    }

    Ok((kind, content_start))
}
