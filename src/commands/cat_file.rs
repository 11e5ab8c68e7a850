use std::io::Write;

use cairn::{ObjectKind, Repo};

use crate::Result;

/// Write the payload of `object`, peeled to `kind`, to stdout unchanged.
pub fn handle(repo: &Repo, kind: ObjectKind, object: &str) -> Result<()> {
    let oid = repo.find_object(object, Some(kind))?;
    let (_, payload) = repo.database.load_raw(&oid)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&payload)?;
    stdout.flush()?;
    Ok(())
}
