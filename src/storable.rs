use crate::digest::Digest;
use crate::object::ObjectKind;

pub trait Storable {
    fn kind(&self) -> ObjectKind;

    /// The object's payload, without the `"{type} {len}\0"` header.
    fn serialize(&self) -> Vec<u8>;
}

/// A storable in its canonical on-disk form, together with its digest.
///
/// Constructing one never touches a repository, so it doubles as the way to compute a digest
/// for an object that will not be written.
pub struct DatabaseObject {
    oid: Digest,
    formatted: Vec<u8>,
}

impl DatabaseObject {
    pub fn new<T: Storable + ?Sized>(obj: &T) -> Self {
        Self::from_payload(obj.kind(), &obj.serialize())
    }

    pub fn from_payload(kind: ObjectKind, payload: &[u8]) -> Self {
        let mut formatted = Vec::with_capacity(payload.len() + 32);
        formatted.extend_from_slice(kind.as_str().as_bytes());
        formatted.push(b' ');
        formatted.extend_from_slice(payload.len().to_string().as_bytes());
        formatted.push(b'\0');
        formatted.extend_from_slice(payload);
        let oid = Digest::new(&formatted);

        Self { oid, formatted }
    }

    /// Returns the storable uncompressed but formatted `"{type} {len}\0{data}"`.
    /// e.g.
    /// a blob `"hello\n"` becomes `"blob 6\0hello\n"`
    pub fn formatted(&self) -> &[u8] {
        &self.formatted
    }

    pub fn oid(&self) -> &Digest {
        &self.oid
    }

    pub fn into_oid(self) -> Digest {
        self.oid
    }
}
