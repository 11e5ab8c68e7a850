use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::{Error, Result};

pub fn tmp_file_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("tmp_obj_{suffix}")
}

/// Create every missing directory between `root` and `dir` (inclusive).
///
/// Fails with [`Error::NotADirectory`] if some component already exists as something other than a
/// directory. `root` itself is assumed to exist.
pub fn create_dirs(root: &Utf8Path, dir: &Utf8Path) -> Result<()> {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let mut current = root.to_owned();
    for component in relative.components() {
        current.push(component);
        match std::fs::metadata(&current) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(Error::NotADirectory(current)),
            Err(e) if e.kind() == ErrorKind::NotFound => match std::fs::create_dir(&current) {
                Ok(()) => {}
                // lost a race with another creator; fine as long as it's a directory
                Err(e) if e.kind() == ErrorKind::AlreadyExists && current.is_dir() => {}
                Err(e) => return Err(e.into()),
            },
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Convert an OS path into a UTF-8 one, or fail with [`Error::NonUtf8Path`].
pub fn utf8_path(path: std::path::PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(Error::NonUtf8Path)
}
