use std::io::Write;

use bstr::ByteSlice;
use cairn::tree::Tree;
use cairn::{ObjectKind, Repo};

use crate::Result;

pub fn handle(repo: &Repo, name: &str, recursive: bool) -> Result<()> {
    let oid = repo.find_object(name, Some(ObjectKind::Tree))?;
    let tree = repo.database.load_tree(&oid)?;

    let mut stdout = std::io::stdout().lock();
    print_tree(repo, &tree, recursive, "", &mut stdout)
}

fn print_tree(
    repo: &Repo,
    tree: &Tree,
    recursive: bool,
    prefix: &str,
    out: &mut impl Write,
) -> Result<()> {
    for entry in tree.entries() {
        let path = if prefix.is_empty() {
            entry.name.to_str_lossy().into_owned()
        } else {
            format!("{prefix}/{}", entry.name.as_bstr())
        };
        let kind = entry.kind()?;

        if recursive && kind == ObjectKind::Tree {
            let subtree = repo.database.load_tree(&entry.oid)?;
            print_tree(repo, &subtree, recursive, &path, out)?;
        } else {
            writeln!(out, "{} {} {}\t{}", entry.mode, kind, entry.oid, path)?;
        }
    }
    Ok(())
}
