use std::io::Write;

use cairn::repo::{RefNode, RefTree};
use cairn::Repo;

use crate::Result;

pub fn handle(repo: &Repo) -> Result<()> {
    let refs = repo.list_refs()?;
    let mut stdout = std::io::stdout().lock();
    print_refs(&refs, "refs", &mut stdout)
}

fn print_refs(refs: &RefTree, prefix: &str, out: &mut impl Write) -> Result<()> {
    for (name, node) in refs {
        let path = format!("{prefix}/{name}");
        match node {
            RefNode::Ref(Some(oid)) => writeln!(out, "{oid} {path}")?,
            RefNode::Ref(None) => {}
            RefNode::Namespace(children) => print_refs(children, &path, out)?,
        }
    }
    Ok(())
}
