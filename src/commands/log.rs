use std::io::Write;

use cairn::{ObjectKind, Repo};

use crate::Result;

/// Print the history reachable from `name` as a Graphviz digraph.
pub fn handle(repo: &Repo, name: &str) -> Result<()> {
    let start = repo.find_object(name, Some(ObjectKind::Commit))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "digraph cairnlog{{")?;
    writeln!(stdout, "  node[shape=rect]")?;
    for item in repo.history(start) {
        let (oid, commit) = item?;
        let summary = commit.summary().replace('\\', "\\\\").replace('"', "\\\"");
        writeln!(stdout, "  c_{oid} [label=\"{}: {summary}\"]", oid.short())?;
        for parent in commit.parents()? {
            writeln!(stdout, "  c_{oid} -> c_{parent};")?;
        }
    }
    writeln!(stdout, "}}")?;
    Ok(())
}
