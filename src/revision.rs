//! A revision is valid if it matches the following (informally defined) context-free grammar:
//! `<rev>` = `<refname>`
//! `<rev>` = `<rev>^`
//! `<rev>` = `<rev>~<num>`
//! `<num>` = a natural number
//! `<refname>` = a branch or tag name | a sha1 hash or unique prefix of one | "HEAD" or '@'

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::*;

use crate::{
    digest::Digest,
    object::{Object, ObjectKind},
    repo::{is_valid_ref_name, Repo, HEAD},
    storable::Storable,
    Error, Result,
};

/// Where a bare name is looked for, in order.
const SEARCH_PREFIXES: [&str; 4] = ["refs/", "refs/tags/", "refs/heads/", "refs/remotes/"];

#[derive(Debug, PartialEq, Eq)]
pub struct Rev {
    refname: Refname,
    distance: u64,
}

impl Rev {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidRevision {
            name: input.to_owned(),
            reason: reason.to_owned(),
        };

        let mut rest = input;
        let mut distance: u64 = 0;
        loop {
            let step = if let Some(stripped) = rest.strip_suffix('^') {
                rest = stripped;
                1
            } else if let Some(idx) = rest.rfind('~') {
                let step = rest[idx + 1..]
                    .parse::<u64>()
                    .map_err(|_| invalid("a number is required after '~'"))?;
                rest = &rest[..idx];
                step
            } else {
                let refname = Refname::parse(rest).map_err(|_| invalid("not a valid name"))?;
                break Ok(Rev { refname, distance });
            };
            distance = distance
                .checked_add(step)
                .ok_or_else(|| invalid("ancestor distance too large"))?;
        }
    }

    /// Evaluate to a digest, or `None` if a name doesn't exist or the walk runs out of parents.
    pub fn resolve(self, repo: &Repo) -> Result<Option<Digest>> {
        let Self { refname, distance } = self;

        let Some(mut oid) = refname.resolve(repo)? else {
            return Ok(None);
        };

        for _ in 0..distance {
            let commit_oid = repo.peel(oid, ObjectKind::Commit)?;
            let commit = repo.database.load_commit(&commit_oid)?;
            oid = match commit
                .parents()
                .map_err(|e| e.in_object(&commit_oid))?
                .into_iter()
                .next()
            {
                Some(parent) => parent,
                None => return Ok(None),
            };
        }

        Ok(Some(oid))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Refname {
    BranchTag(String),
    Sha1(Digest),
    PartialSha1(String),
    Head,
}

impl Refname {
    fn parse(input: &str) -> Result<Self> {
        static PARTIAL_SHA1: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{4,40}$").unwrap());

        if matches!(input, "HEAD" | "@") {
            return Ok(Self::Head);
        }

        if let Ok(digest) = Digest::from_str(input) {
            return Ok(Self::Sha1(digest));
        }

        if PARTIAL_SHA1.is_match(input) {
            return Ok(Self::PartialSha1(input.to_ascii_lowercase()));
        }

        if !is_valid_ref_name(input) {
            return Err(Error::InvalidRefName(input.to_owned()));
        }

        Ok(Self::BranchTag(input.to_owned()))
    }

    pub fn resolve(&self, repo: &Repo) -> Result<Option<Digest>> {
        fn branchtag(name: &str, repo: &Repo) -> Result<Option<Digest>> {
            let direct = name.starts_with("refs/").then(|| name.to_owned());
            let candidates = direct
                .into_iter()
                .chain(SEARCH_PREFIXES.iter().map(|prefix| format!("{prefix}{name}")));
            for candidate in candidates {
                if repo.ref_exists(&candidate) {
                    trace!(%name, %candidate, "Matched ref");
                    return repo.resolve_ref(&candidate);
                }
            }
            Ok(None)
        }

        match self {
            Refname::Head => repo.resolve_ref(HEAD),

            Refname::Sha1(oid) => Ok(repo.database.exists(oid).then(|| oid.clone())),

            Refname::PartialSha1(prefix) => {
                let mut candidates = repo
                    .database
                    .entries()?
                    .into_iter()
                    .filter(|oid| oid.to_hex().starts_with(prefix.as_str()))
                    .collect::<Vec<_>>();

                match candidates.len() {
                    // nothing stored under that prefix, so it may be a branch or tag name
                    0 => branchtag(prefix, repo),
                    1 => Ok(candidates.pop()),
                    _ => {
                        candidates.sort();
                        Err(Error::AmbiguousRevision {
                            name: prefix.clone(),
                            candidates,
                        })
                    }
                }
            }

            Refname::BranchTag(name) => branchtag(name, repo),
        }
    }
}

impl Repo {
    /// Resolve `name` to a digest. With `expected`, peel towards that kind: tags to their object,
    /// commits to their tree.
    pub fn find_object(&self, name: &str, expected: Option<ObjectKind>) -> Result<Digest> {
        let oid = Rev::parse(name)?
            .resolve(self)?
            .ok_or_else(|| Error::UnknownRevision(name.to_owned()))?;
        match expected {
            None => Ok(oid),
            Some(kind) => self.peel(oid, kind),
        }
    }

    /// Follow `oid` until it reaches an object of kind `want`.
    pub fn peel(&self, mut oid: Digest, want: ObjectKind) -> Result<Digest> {
        loop {
            let object = self.database.load(&oid)?;
            let actual = object.kind();
            if actual == want {
                return Ok(oid);
            }
            let next = match object {
                Object::Tag(tag) => tag.object(),
                Object::Commit(commit) if want == ObjectKind::Tree => commit.tree(),
                _ => {
                    return Err(Error::UnexpectedKind {
                        oid,
                        expected: want,
                        actual,
                    })
                }
            };
            oid = next.map_err(|e| e.in_object(&oid))?;
        }
    }
}
