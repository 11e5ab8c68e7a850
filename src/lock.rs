use crate::Result;

use std::{
    fs::File,
    io::{ErrorKind, Write},
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

use tracing::warn;

/// Exclusive write access to a file, by way of a sibling `<name>.lock` file.
///
/// Writes go to the lock file; [`LockedFile::commit`] renames it over the guarded path, so
/// readers see either the old contents or the new ones. Dropping without committing discards the
/// write.
pub struct LockedFile {
    guarded_path: PathBuf,
    lock_path: PathBuf,
    lockfile: File,
    committed: bool,
}

impl Deref for LockedFile {
    type Target = File;

    fn deref(&self) -> &Self::Target {
        &self.lockfile
    }
}

impl DerefMut for LockedFile {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.lockfile
    }
}

impl LockedFile {
    /// Returns `Ok(None)` if someone else holds the lock.
    pub fn try_acquire<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let guarded_path = path.as_ref().to_owned();
        let mut lock_name = guarded_path.file_name().unwrap_or_default().to_owned();
        lock_name.push(".lock");
        let lock_path = guarded_path.with_file_name(lock_name);

        match File::options()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(None),
            Err(e) => Err(e.into()),
            Ok(lockfile) => Ok(Some(Self {
                guarded_path,
                lock_path,
                lockfile,
                committed: false,
            })),
        }
    }

    /// Flush and move the new contents into place.
    pub fn commit(mut self) -> Result<()> {
        self.lockfile.flush()?;
        self.lockfile.sync_all()?;
        std::fs::rename(&self.lock_path, &self.guarded_path)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = std::fs::remove_file(&self.lock_path) {
                warn!(path=?self.lock_path, error=%e, "Failed to remove abandoned lock file");
            }
        }
    }
}
