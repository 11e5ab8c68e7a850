use cairn::repo::Annotation;
use cairn::timestamp::{Signature, Timestamp};
use cairn::Repo;
use color_eyre::eyre::eyre;
use tracing::*;

use crate::Result;

pub fn list(repo: &Repo) -> Result<()> {
    for name in repo.tag_names()? {
        println!("{name}");
    }
    Ok(())
}

pub fn create(
    repo: &Repo,
    name: &str,
    object: &str,
    annotation: Option<(Signature, &str)>,
) -> Result<()> {
    let target = repo.find_object(object, None)?;
    let annotation = annotation.map(|(tagger, message)| Annotation { tagger, message });
    let oid = repo.create_tag(name, &target, annotation)?;
    info!(%name, %oid, "Created tag");
    Ok(())
}

/// The tagger identity: flags or environment first, then `user.name`/`user.email` from the config.
pub fn tagger(repo: &Repo, name: Option<&str>, email: Option<&str>) -> Result<Signature> {
    let name = name
        .map(str::to_owned)
        .or_else(|| repo.config_value("user", "name").map(str::to_owned))
        .ok_or_else(|| eyre!("no tagger name: set CAIRN_AUTHOR_NAME or user.name"))?;
    let email = email
        .map(str::to_owned)
        .or_else(|| repo.config_value("user", "email").map(str::to_owned))
        .ok_or_else(|| eyre!("no tagger email: set CAIRN_AUTHOR_EMAIL or user.email"))?;
    Ok(Signature::new(name, email, Timestamp::now()))
}
