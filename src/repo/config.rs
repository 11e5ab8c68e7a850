use camino::Utf8Path;
use ini::Ini;
use tracing::*;

use crate::{Error, Result};

const CORE: &str = "core";
const FORMAT_VERSION: &str = "repositoryformatversion";

/// The config written by `init`.
pub(super) fn default_config() -> Ini {
    let mut config = Ini::new();
    config
        .with_section(Some(CORE))
        .set(FORMAT_VERSION, "0")
        .set("filemode", "false")
        .set("bare", "false");
    config
}

/// Read `<git_dir>/config` and reject anything but format version 0.
pub(super) fn load(git_dir: &Utf8Path) -> Result<Ini> {
    let path = git_dir.join("config");
    if !path.is_file() {
        return Err(Error::MissingConfig(path));
    }
    let config = Ini::load_from_file(&path)?;
    check_version(&config)?;
    trace!(%path, "Loaded config");
    Ok(config)
}

fn check_version(config: &Ini) -> Result<()> {
    let version = config.get_from(Some(CORE), FORMAT_VERSION);
    match version.map(|v| v.trim().parse::<u32>()) {
        Some(Ok(0)) => Ok(()),
        _ => Err(Error::UnsupportedConfigVersion(version.map(str::to_owned))),
    }
}
