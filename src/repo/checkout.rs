use std::ffi::OsStr;
use std::io::ErrorKind;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use camino::Utf8Path;
use tracing::*;

use super::Repo;
use crate::object::ObjectKind;
use crate::storable::Storable;
use crate::tree::Tree;
use crate::{Error, Result};

impl Repo {
    /// Write the contents of `tree` into `destination`, which must be missing or an empty
    /// directory.
    ///
    /// Blob payloads are written unchanged, symlink entries included. Submodule entries are
    /// skipped.
    pub fn checkout(&self, tree: &Tree, destination: &Utf8Path) -> Result<()> {
        match std::fs::metadata(destination) {
            Ok(meta) if !meta.is_dir() => {
                return Err(Error::DestinationNotADirectory(destination.to_owned()))
            }
            Ok(_) => {
                if destination.read_dir()?.next().is_some() {
                    return Err(Error::DestinationNotEmpty(destination.to_owned()));
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => std::fs::create_dir_all(destination)?,
            Err(e) => return Err(e.into()),
        }

        info!(%destination, "Checking out tree");
        self.materialize(tree, destination.as_std_path())
    }

    fn materialize(&self, tree: &Tree, dir: &Path) -> Result<()> {
        for entry in tree.entries() {
            let path = dir.join(OsStr::from_bytes(entry.checked_name()?));
            match entry.kind()? {
                ObjectKind::Tree => {
                    let subtree = self.database.load_tree(&entry.oid)?;
                    trace!(?path, "Creating directory");
                    std::fs::create_dir(&path)?;
                    self.materialize(&subtree, &path)?;
                }
                ObjectKind::Commit => {
                    warn!(?path, oid=%entry.oid, "Skipping submodule entry");
                }
                _ => {
                    let object = self.database.load(&entry.oid)?;
                    let actual = object.kind();
                    let blob = object.into_blob().ok_or_else(|| Error::UnexpectedKind {
                        oid: entry.oid.clone(),
                        expected: ObjectKind::Blob,
                        actual,
                    })?;
                    trace!(?path, "Writing file");
                    std::fs::write(&path, blob.data())?;
                }
            }
        }
        Ok(())
    }
}
