use pretty_assertions::assert_eq;

use super::{temp_repo, write_commit, write_tree};
use crate::digest::Digest;
use crate::repo::{Annotation, RefNode, RefTree, Repo};
use crate::{Error, Result};

fn write_ref(repo: &Repo, name: &str, contents: &str) -> Result<()> {
    let segments: Vec<&str> = name.split('/').collect();
    let path = repo.resolve_path(&segments, true)?;
    std::fs::write(path, contents)?;
    Ok(())
}

fn some_commit(repo: &Repo) -> Result<Digest> {
    let tree = write_tree(repo, &[("file", b"x\n")])?;
    write_commit(repo, &tree, &[], "commit")
}

#[test]
fn symbolic_chain_resolves() -> Result<()> {
    let (_dir, repo) = temp_repo()?;
    let oid = some_commit(&repo)?;

    repo.create_ref("refs/heads/main", &oid, false)?;
    write_ref(&repo, "refs/b", "ref: refs/heads/main\n")?;
    write_ref(&repo, "refs/a", "ref: refs/b\n")?;
    write_ref(&repo, "HEAD", "ref: refs/a\n")?;

    assert_eq!(repo.resolve_ref("HEAD")?, Some(oid.clone()));
    assert_eq!(repo.resolve_ref("refs/a")?, Some(oid.clone()));
    assert_eq!(repo.read_head()?, Some(oid));
    Ok(())
}

#[test]
fn detached_head() -> Result<()> {
    let (_dir, repo) = temp_repo()?;
    let oid = some_commit(&repo)?;

    write_ref(&repo, "HEAD", &format!("{oid}\n"))?;
    assert_eq!(repo.read_head()?, Some(oid));
    assert_eq!(repo.head_target()?, None);
    Ok(())
}

#[test]
fn unborn_and_dangling() -> Result<()> {
    let (_dir, repo) = temp_repo()?;

    // HEAD's own target may be missing
    assert_eq!(repo.resolve_ref("HEAD")?, None);
    assert_eq!(repo.resolve_ref("refs/heads/main")?, None);

    // any other missing target is an error
    write_ref(&repo, "refs/heads/other", "ref: refs/heads/missing\n")?;
    assert!(matches!(
        repo.resolve_ref("refs/heads/other"),
        Err(Error::DanglingReference { name, target })
            if name == "refs/heads/other" && target == "refs/heads/missing"
    ));
    assert!(matches!(
        repo.resolve_ref("refs/heads/nothing"),
        Err(Error::DanglingReference { .. })
    ));
    Ok(())
}

#[test]
fn corrupt_head_only_affects_head() -> Result<()> {
    let (_dir, repo) = temp_repo()?;
    let oid = some_commit(&repo)?;
    repo.create_ref("refs/heads/other", &oid, false)?;
    write_ref(&repo, "HEAD", "garbage\n")?;

    assert_eq!(repo.resolve_ref("refs/heads/other")?, Some(oid.clone()));
    assert!(matches!(
        repo.resolve_ref("refs/heads/missing"),
        Err(Error::DanglingReference { .. })
    ));
    assert!(matches!(repo.resolve_ref("HEAD"), Err(Error::InvalidDigest(_))));
    assert!(repo.list_refs().is_ok());
    assert_eq!(repo.find_object("refs/heads/other", None)?, oid);
    Ok(())
}

#[test]
fn symbolic_cycle_is_an_error() -> Result<()> {
    let (_dir, repo) = temp_repo()?;
    write_ref(&repo, "refs/x", "ref: refs/y\n")?;
    write_ref(&repo, "refs/y", "ref: refs/x\n")?;

    assert!(matches!(
        repo.resolve_ref("refs/x"),
        Err(Error::ReferenceCycle(name)) if name == "refs/x"
    ));
    Ok(())
}

#[test]
fn garbage_ref_contents() -> Result<()> {
    let (_dir, repo) = temp_repo()?;
    write_ref(&repo, "refs/heads/bad", "not a digest\n")?;
    write_ref(&repo, "refs/heads/escape", "ref: ../../outside\n")?;

    assert!(matches!(
        repo.resolve_ref("refs/heads/bad"),
        Err(Error::InvalidDigest(_))
    ));
    assert!(matches!(
        repo.resolve_ref("refs/heads/escape"),
        Err(Error::InvalidRefName(_))
    ));
    Ok(())
}

#[test]
fn list_refs_mirrors_directories() -> Result<()> {
    let (_dir, repo) = temp_repo()?;
    let oid = some_commit(&repo)?;

    repo.create_ref("refs/heads/main", &oid, false)?;
    repo.create_ref("refs/heads/feature/x", &oid, false)?;
    repo.create_tag("v1", &oid, None)?;
    write_ref(&repo, "refs/heads/main.lock", "in progress\n")?;

    let expected = RefTree::from([
        (
            "heads".to_owned(),
            RefNode::Namespace(RefTree::from([
                (
                    "feature".to_owned(),
                    RefNode::Namespace(RefTree::from([(
                        "x".to_owned(),
                        RefNode::Ref(Some(oid.clone())),
                    )])),
                ),
                ("main".to_owned(), RefNode::Ref(Some(oid.clone()))),
            ])),
        ),
        (
            "tags".to_owned(),
            RefNode::Namespace(RefTree::from([(
                "v1".to_owned(),
                RefNode::Ref(Some(oid)),
            )])),
        ),
    ]);
    assert_eq!(repo.list_refs()?, expected);
    Ok(())
}

#[test]
fn create_ref_policy() -> Result<()> {
    let (_dir, repo) = temp_repo()?;
    let first = some_commit(&repo)?;
    let tree = write_tree(&repo, &[])?;
    let second = write_commit(&repo, &tree, &[first.clone()], "second")?;

    repo.create_ref("refs/heads/main", &first, false)?;
    assert_eq!(
        std::fs::read_to_string(repo.git_dir().join("refs/heads/main"))?,
        format!("{first}\n")
    );

    assert!(matches!(
        repo.create_ref("refs/heads/main", &second, false),
        Err(Error::RefAlreadyExists(name)) if name == "refs/heads/main"
    ));
    assert_eq!(repo.resolve_ref("refs/heads/main")?, Some(first));

    repo.create_ref("refs/heads/main", &second, true)?;
    assert_eq!(repo.resolve_ref("refs/heads/main")?, Some(second.clone()));

    // a namespace directory is never overwritten, even with force
    assert!(matches!(
        repo.create_ref("refs/heads", &second, true),
        Err(Error::RefAlreadyExists(name)) if name == "refs/heads"
    ));
    assert!(repo.git_dir().join("refs/heads").is_dir());

    for bad in ["heads/main", "refs/heads/../x", "refs/heads/a b", "refs/heads/x.lock"] {
        assert!(
            matches!(
                repo.create_ref(bad, &second, false),
                Err(Error::InvalidRefName(_))
            ),
            "{bad}"
        );
    }
    Ok(())
}

#[test]
fn create_ref_respects_lock() -> Result<()> {
    let (_dir, repo) = temp_repo()?;
    let oid = some_commit(&repo)?;
    write_ref(&repo, "refs/heads/main.lock", "")?;

    assert!(matches!(
        repo.create_ref("refs/heads/main", &oid, false),
        Err(Error::RefLocked(_))
    ));
    assert!(!repo.git_dir().join("refs/heads/main").exists());
    Ok(())
}

#[test]
fn tags() -> Result<()> {
    let (_dir, repo) = temp_repo()?;
    let oid = some_commit(&repo)?;

    let light = repo.create_tag("light", &oid, None)?;
    assert_eq!(light, oid);

    let annotation = Annotation {
        tagger: super::signature(),
        message: "annotated",
    };
    let heavy = repo.create_tag("release/1.0", &oid, Some(annotation))?;
    let tag = repo.database.load(&heavy)?.into_tag().unwrap();
    assert_eq!(tag.object()?, oid);
    assert_eq!(tag.target_kind()?, crate::ObjectKind::Commit);
    assert_eq!(tag.name().unwrap(), "release/1.0");
    assert_eq!(tag.message(), "annotated\n");
    assert_eq!(repo.resolve_ref("refs/tags/release/1.0")?, Some(heavy));

    assert_eq!(repo.tag_names()?, ["light", "release/1.0"]);

    assert!(matches!(
        repo.create_tag("light", &oid, None),
        Err(Error::RefAlreadyExists(_))
    ));
    assert!(matches!(
        repo.create_tag("bad name", &oid, None),
        Err(Error::InvalidRefName(_))
    ));
    assert!(matches!(
        repo.create_tag("ghost", &Digest::new(b"missing"), None),
        Err(Error::ObjectNotFound(_))
    ));
    Ok(())
}
