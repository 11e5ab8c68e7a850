use std::fmt::Display;
use std::str::FromStr;

use crate::blob::Blob;
use crate::commit::Commit;
use crate::storable::Storable;
use crate::tag::Tag;
use crate::tree::Tree;
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
            ObjectKind::Tag => "tag",
        }
    }

    /// Parse the type tag of an object envelope.
    pub fn from_bytes(tag: &[u8]) -> Option<Self> {
        match tag {
            b"blob" => Some(ObjectKind::Blob),
            b"tree" => Some(ObjectKind::Tree),
            b"commit" => Some(ObjectKind::Commit),
            b"tag" => Some(ObjectKind::Tag),
            _ => None,
        }
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or_else(|| format!("unknown object type: {s}"))
    }
}

/// An object as loaded from the database, one variant per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    /// Interpret `payload` (the envelope body) as an object of the given kind.
    pub fn parse(kind: ObjectKind, payload: &[u8]) -> Result<Self> {
        Ok(match kind {
            ObjectKind::Blob => Object::Blob(Blob::new(payload.to_vec())),
            ObjectKind::Tree => Object::Tree(Tree::parse(payload)?),
            ObjectKind::Commit => Object::Commit(Commit::parse(payload)?),
            ObjectKind::Tag => Object::Tag(Tag::parse(payload)?),
        })
    }

    pub fn into_commit(self) -> Option<Commit> {
        if let Self::Commit(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn into_tree(self) -> Option<Tree> {
        if let Self::Tree(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn into_blob(self) -> Option<Blob> {
        if let Self::Blob(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn into_tag(self) -> Option<Tag> {
        if let Self::Tag(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl Storable for Object {
    fn kind(&self) -> ObjectKind {
        match self {
            Object::Blob(_) => ObjectKind::Blob,
            Object::Tree(_) => ObjectKind::Tree,
            Object::Commit(_) => ObjectKind::Commit,
            Object::Tag(_) => ObjectKind::Tag,
        }
    }

    fn serialize(&self) -> Vec<u8> {
        match self {
            Object::Blob(blob) => blob.serialize(),
            Object::Tree(tree) => tree.serialize(),
            Object::Commit(commit) => commit.serialize(),
            Object::Tag(tag) => tag.serialize(),
        }
    }
}
