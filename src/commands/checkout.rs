use cairn::{ObjectKind, Repo};
use camino::Utf8Path;

use crate::Result;

pub fn handle(repo: &Repo, name: &str, destination: &Utf8Path) -> Result<()> {
    let oid = repo.find_object(name, Some(ObjectKind::Tree))?;
    let tree = repo.database.load_tree(&oid)?;
    repo.checkout(&tree, destination)?;
    Ok(())
}
