use bstr::{BStr, ByteSlice};

use crate::commit::{header_digest, terminated};
use crate::digest::Digest;
use crate::kvlm::Kvlm;
use crate::object::ObjectKind;
use crate::storable::Storable;
use crate::timestamp::Signature;
use crate::{Error, Result};

/// An annotated tag payload. Shares the KVLM format with commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    kvlm: Kvlm,
}

impl Tag {
    pub fn new(
        object: &Digest,
        kind: ObjectKind,
        name: &str,
        tagger: &Signature,
        message: &str,
    ) -> Self {
        let mut kvlm = Kvlm::new();
        kvlm.push("object", object.to_hex());
        kvlm.push("type", kind.as_str());
        kvlm.push("tag", name);
        kvlm.push("tagger", tagger.to_string());
        kvlm.set_message(terminated(message));
        Self { kvlm }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            kvlm: Kvlm::parse(bytes)?,
        })
    }

    /// The tagged object.
    pub fn object(&self) -> Result<Digest> {
        let value = self
            .kvlm
            .first(b"object")
            .ok_or(Error::MissingHeader("object"))?;
        header_digest(value)
    }

    /// The kind the tag claims its object has.
    pub fn target_kind(&self) -> Result<ObjectKind> {
        let value = self.kvlm.first(b"type").ok_or(Error::MissingHeader("type"))?;
        ObjectKind::from_bytes(value).ok_or_else(|| {
            Error::MalformedKvlm(format!("unknown tag target type: {value:?}"))
        })
    }

    pub fn name(&self) -> Option<&BStr> {
        self.kvlm.first(b"tag")
    }

    pub fn tagger(&self) -> Option<Signature> {
        Signature::parse(self.kvlm.first(b"tagger")?.to_str().ok()?)
    }

    pub fn message(&self) -> &BStr {
        self.kvlm.message()
    }
}

impl Storable for Tag {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Tag
    }

    fn serialize(&self) -> Vec<u8> {
        self.kvlm.serialize()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::timestamp::Timestamp;

    #[test]
    fn test_tag_layout() -> Result<()> {
        let when = Timestamp::from_git("1658312219 +0000").unwrap();
        let tagger = Signature::new("Jamie Quigley", "jamie@quigley.xyz", when);
        let object = Digest::from_str("e6a49274aa0893ce2e2928589100387aee220c5b").unwrap();

        let tag = Tag::new(&object, ObjectKind::Commit, "v1.0.0", &tagger, "Release 1.0.0");
        let expected = "object e6a49274aa0893ce2e2928589100387aee220c5b
type commit
tag v1.0.0
tagger Jamie Quigley <jamie@quigley.xyz> 1658312219 +0000

Release 1.0.0
";
        assert_eq!(tag.serialize().as_bstr(), expected.as_bytes().as_bstr());

        let parsed = Tag::parse(expected.as_bytes())?;
        assert_eq!(parsed, tag);
        assert_eq!(parsed.object()?, object);
        assert_eq!(parsed.target_kind()?, ObjectKind::Commit);
        assert_eq!(parsed.name().unwrap(), "v1.0.0");
        assert_eq!(parsed.tagger().unwrap(), tagger);
        Ok(())
    }

    #[test]
    fn test_unknown_target_type() -> Result<()> {
        let tag = Tag::parse(b"object e6a49274aa0893ce2e2928589100387aee220c5b\ntype thing\n\n")?;
        assert!(matches!(tag.target_kind(), Err(Error::MalformedKvlm(_))));
        Ok(())
    }
}
