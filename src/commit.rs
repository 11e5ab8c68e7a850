use bstr::{BStr, ByteSlice};

use crate::digest::Digest;
use crate::kvlm::Kvlm;
use crate::object::ObjectKind;
use crate::storable::Storable;
use crate::timestamp::Signature;
use crate::{Error, Result};

/// A commit payload. The headers are kept exactly as read, so re-serializing a parsed commit
/// reproduces its digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    kvlm: Kvlm,
}

impl Commit {
    pub fn new(
        tree: &Digest,
        parents: &[Digest],
        author: &Signature,
        committer: &Signature,
        message: &str,
    ) -> Self {
        let mut kvlm = Kvlm::new();
        kvlm.push("tree", tree.to_hex());
        for parent in parents {
            kvlm.push("parent", parent.to_hex());
        }
        kvlm.push("author", author.to_string());
        kvlm.push("committer", committer.to_string());
        kvlm.set_message(terminated(message));
        Self { kvlm }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            kvlm: Kvlm::parse(bytes)?,
        })
    }

    pub fn tree(&self) -> Result<Digest> {
        let value = self.kvlm.first(b"tree").ok_or(Error::MissingHeader("tree"))?;
        header_digest(value)
    }

    /// Parent digests in header order. Empty for a root commit.
    pub fn parents(&self) -> Result<Vec<Digest>> {
        self.kvlm
            .get(b"parent")
            .unwrap_or_default()
            .iter()
            .map(|p| header_digest(p.as_bstr()))
            .collect()
    }

    pub fn author(&self) -> Option<Signature> {
        Signature::parse(self.kvlm.first(b"author")?.to_str().ok()?)
    }

    pub fn message(&self) -> &BStr {
        self.kvlm.message()
    }

    /// The first line of the message.
    pub fn summary(&self) -> String {
        let message = self.message();
        let first = message.lines().next().unwrap_or_default();
        first.to_str_lossy().trim().to_owned()
    }
}

impl Storable for Commit {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }

    fn serialize(&self) -> Vec<u8> {
        self.kvlm.serialize()
    }
}

pub(crate) fn header_digest(value: &BStr) -> Result<Digest> {
    Digest::from_hex(value).ok_or_else(|| Error::InvalidDigest(value.to_string()))
}

pub(crate) fn terminated(message: &str) -> String {
    if message.is_empty() || message.ends_with('\n') {
        message.to_owned()
    } else {
        format!("{message}\n")
    }
}
