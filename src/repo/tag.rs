use tracing::*;

use super::{is_valid_ref_name, RefNode, RefTree, Repo};
use crate::digest::Digest;
use crate::tag::Tag;
use crate::timestamp::Signature;
use crate::{Error, Result};

/// The tagger and message of an annotated tag.
#[derive(Clone, Debug)]
pub struct Annotation<'a> {
    pub tagger: Signature,
    pub message: &'a str,
}

impl Repo {
    /// Create `refs/tags/<name>` pointing at `target`.
    ///
    /// With an annotation, a tag object is written first and the ref points at that instead.
    /// Returns what the ref now points at.
    pub fn create_tag(
        &self,
        name: &str,
        target: &Digest,
        annotation: Option<Annotation<'_>>,
    ) -> Result<Digest> {
        let ref_name = format!("refs/tags/{name}");
        if !is_valid_ref_name(&ref_name) {
            return Err(Error::InvalidRefName(ref_name));
        }

        let oid = match annotation {
            None if self.database.exists(target) => target.clone(),
            None => return Err(Error::ObjectNotFound(target.clone())),
            Some(Annotation { tagger, message }) => {
                let (kind, _) = self.database.load_raw(target)?;
                let tag = Tag::new(target, kind, name, &tagger, message);
                let oid = self.database.write(&tag)?;
                debug!(%name, %oid, %target, "Wrote tag object");
                oid
            }
        };

        self.create_ref(&ref_name, &oid, false)?;
        Ok(oid)
    }

    /// Names of every tag, in order.
    pub fn tag_names(&self) -> Result<Vec<String>> {
        fn collect(prefix: &str, tree: &RefTree, out: &mut Vec<String>) {
            for (name, node) in tree {
                let full = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}/{name}")
                };
                match node {
                    RefNode::Ref(_) => out.push(full),
                    RefNode::Namespace(children) => collect(&full, children, out),
                }
            }
        }

        let mut names = Vec::new();
        if let Some(RefNode::Namespace(tags)) = self.list_refs()?.get("tags") {
            collect("", tags, &mut names);
        }
        Ok(names)
    }
}
