use cairn::storable::DatabaseObject;
use cairn::{Object, ObjectKind, Repo};
use camino::Utf8Path;
use color_eyre::eyre::{bail, Context};

use crate::Result;

/// Print the digest `file` would be stored under, and store it when `write` is set.
///
/// The payload is parsed first so that only well-formed objects get a digest, but what gets hashed
/// is the file exactly as read.
pub fn handle(repo: Option<&Repo>, kind: ObjectKind, write: bool, file: &Utf8Path) -> Result<()> {
    let data = std::fs::read(file).wrap_err(format!("Could not read '{file}'"))?;
    Object::parse(kind, &data)?;

    let object = DatabaseObject::from_payload(kind, &data);
    if write {
        let Some(repo) = repo else {
            bail!("writing an object requires a repository");
        };
        repo.database.store(&object)?;
    }

    println!("{}", object.oid());
    Ok(())
}
