mod checkout;
mod config;
pub mod database;
mod history;
mod init;
mod refs;
mod tag;

pub use database::Database;
pub use history::History;
pub use refs::{is_valid_ref_name, RefNode, RefTree, HEAD};
pub use tag::Annotation;

use std::fmt::Debug;

use camino::{Utf8Path, Utf8PathBuf};
use ini::Ini;
use tracing::*;

use crate::util;
use crate::{Error, Result};

/// Name of the metadata directory inside a worktree.
pub const GIT_DIR: &str = ".git";

/// Branch HEAD points at in a freshly initialised repository.
pub const DEFAULT_BRANCH: &str = "main";

/// An opened repository: a worktree, its metadata directory, the parsed config and the object
/// database.
pub struct Repo {
    dir: Utf8PathBuf,
    git_dir: Utf8PathBuf,
    config: Ini,
    pub database: Database,
}

impl Debug for Repo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repo")
            .field("dir", &self.dir)
            .field("git_dir", &self.git_dir)
            .finish_non_exhaustive()
    }
}

impl Repo {
    fn from_parts(dir: Utf8PathBuf, git_dir: Utf8PathBuf, config: Ini) -> Self {
        let database = Database::new(&git_dir);
        Self {
            dir,
            git_dir,
            config,
            database,
        }
    }

    /// Open the repository whose worktree is exactly `dir`.
    pub fn open(dir: impl Into<Utf8PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let git_dir = dir.join(GIT_DIR);
        if !git_dir.is_dir() {
            return Err(Error::RepositoryNotFound(dir));
        }
        let config = config::load(&git_dir)?;
        trace!(path=%dir, "Opened repo");
        Ok(Self::from_parts(dir, git_dir, config))
    }

    /// Find the repository containing `start`, checking `start` and then each of its ancestors.
    ///
    /// When nothing is found, `required` decides between [`Error::RepositoryNotFound`] and
    /// `Ok(None)`.
    pub fn locate(start: impl AsRef<Utf8Path>, required: bool) -> Result<Option<Self>> {
        let start = start.as_ref().canonicalize_utf8()?;
        let mut current: &Utf8Path = &start;
        loop {
            if current.join(GIT_DIR).is_dir() {
                debug!(path=%current, "Found repository");
                return Self::open(current.to_owned()).map(Some);
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        if required {
            Err(Error::RepositoryNotFound(start))
        } else {
            Ok(None)
        }
    }

    /// Join `segments` onto the metadata directory. With `create_parents`, every missing directory
    /// above the final segment is created.
    pub fn resolve_path(&self, segments: &[&str], create_parents: bool) -> Result<Utf8PathBuf> {
        let mut path = self.git_dir.clone();
        path.extend(segments);
        if create_parents {
            if let Some(parent) = path.parent() {
                util::create_dirs(&self.git_dir, parent)?;
            }
        }
        Ok(path)
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn git_dir(&self) -> &Utf8Path {
        &self.git_dir
    }

    /// Look up `key` in `section` of the repository config.
    pub fn config_value(&self, section: &str, key: &str) -> Option<&str> {
        self.config.get_from(Some(section), key)
    }
}
