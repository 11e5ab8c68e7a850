mod refs;

use std::io::Write;

use camino::Utf8Path;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tempdir::TempDir;

use crate::blob::Blob;
use crate::commit::Commit;
use crate::digest::Digest;
use crate::filemode::FileMode;
use crate::repo::Repo;
use crate::timestamp::{Signature, Timestamp};
use crate::tree::{Tree, TreeEntry};
use crate::Result;

pub const COMMIT_NAME: &str = "Jamie Quigley";
pub const COMMIT_EMAIL: &str = "jamie@quigley.xyz";

#[macro_export]
macro_rules! testfiles {
    ($root:ident, [$($path:expr),*]) => {{
        use std::io::Write;
        $({
            let path = $root.join($path);
            std::fs::create_dir_all(path.parent().unwrap())?;
            writeln!(
                std::fs::File::create($root.join($path))?,
                concat!(stringify!($path), "-contents")
                )?;
        })*
    }};
}

/// A freshly initialised repository in a temporary directory. Keep the `TempDir` alive for as long
/// as the repository is used.
pub fn temp_repo() -> Result<(TempDir, Repo)> {
    let dir = TempDir::new("")?;
    let root = Utf8Path::from_path(dir.path()).unwrap();
    let repo = Repo::init(root)?;
    Ok((dir, repo))
}

pub fn signature() -> Signature {
    let when = Timestamp::from_git("1658312219 +0100").unwrap();
    Signature::new(COMMIT_NAME, COMMIT_EMAIL, when)
}

/// Store a flat tree of regular files.
pub fn write_tree(repo: &Repo, files: &[(&str, &[u8])]) -> Result<Digest> {
    let mut entries = Vec::new();
    for (name, data) in files {
        let oid = repo.database.write(&Blob::new(data.to_vec()))?;
        entries.push(TreeEntry::new(FileMode::REGULAR, *name, oid));
    }
    repo.database.write(&Tree::new(entries))
}

pub fn write_commit(
    repo: &Repo,
    tree: &Digest,
    parents: &[Digest],
    message: &str,
) -> Result<Digest> {
    let sig = signature();
    repo.database
        .write(&Commit::new(tree, parents, &sig, &sig, message))
}

/// Place `raw` (an uncompressed envelope) at `oid`'s path without checking that it hashes to
/// `oid`.
pub fn plant(repo: &Repo, oid: &Digest, raw: &[u8]) -> Result<()> {
    let hex = oid.to_hex();
    let dir = repo.database.root().join(&hex[..2]);
    std::fs::create_dir_all(&dir)?;
    let mut e = ZlibEncoder::new(Vec::new(), Compression::default());
    e.write_all(raw)?;
    std::fs::write(dir.join(&hex[2..]), e.finish()?)?;
    Ok(())
}
