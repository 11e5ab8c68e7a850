use camino::Utf8Path;
use tracing::*;

use super::{config, Repo, DEFAULT_BRANCH, GIT_DIR};
use crate::util;
use crate::{Error, Result};

const DESCRIPTION: &str = "Unnamed repository; edit this file 'description' to name the repository.\n";

impl Repo {
    /// Create a new repository at `path`, creating the directory itself if needed.
    ///
    /// An existing but empty metadata directory is reused.
    pub fn init(path: impl AsRef<Utf8Path>) -> Result<Repo> {
        let dir = path.as_ref().to_owned();
        let git_dir = dir.join(GIT_DIR);
        trace!(path=%dir, "Initialising repo");

        if dir.exists() {
            if !dir.is_dir() {
                return Err(Error::NotADirectory(dir));
            }
            if git_dir.exists() {
                if !git_dir.is_dir() {
                    return Err(Error::NotADirectory(git_dir));
                }
                if git_dir.read_dir()?.next().is_some() {
                    return Err(Error::AlreadyInitialized(dir));
                }
            }
        } else {
            std::fs::create_dir_all(&dir)?;
        }
        std::fs::create_dir_all(&git_dir)?;

        for d in ["branches", "objects", "refs/tags", "refs/heads"] {
            let path = git_dir.join(d);
            trace!(%path, "Creating directory");
            util::create_dirs(&git_dir, &path)?;
        }

        std::fs::write(git_dir.join("description"), DESCRIPTION)?;
        std::fs::write(
            git_dir.join("HEAD"),
            format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
        )?;

        let config = config::default_config();
        config.write_to_file(git_dir.join("config"))?;

        info!(path=%dir, "Initialised empty repository");
        Ok(Repo::from_parts(dir, git_dir, config))
    }
}
