mod cat_file;
mod checkout;
mod hash_object;
mod log;
mod ls_tree;
mod show_ref;
mod tag;

use cairn::Repo;
use camino::Utf8PathBuf;
use color_eyre::eyre::{eyre, Context};
use tracing::*;

use crate::interface::{Command, Opt};
use crate::Result;

pub fn dispatch(opt: &Opt) -> Result<()> {
    let cwd = match opt.path {
        Some(ref path) => path
            .canonicalize_utf8()
            .wrap_err(format!("Directory not found: '{path}'"))?,
        None => Utf8PathBuf::try_from(std::env::current_dir()?)?,
    };
    debug!(%cwd, command=?opt.command, "Running");

    let open = || -> Result<Repo> {
        Repo::locate(&cwd, true)?.ok_or_else(|| eyre!("not a repository: {cwd}"))
    };

    match &opt.command {
        Command::Init { path } => {
            let target = path.as_ref().map_or_else(|| cwd.clone(), |p| cwd.join(p));
            let repo = Repo::init(&target)?;
            println!("Initialized empty repository in {}", repo.git_dir());
            Ok(())
        }
        Command::HashObject { kind, write, file } => {
            let repo = Repo::locate(&cwd, *write)?;
            hash_object::handle(repo.as_ref(), *kind, *write, &cwd.join(file))
        }
        Command::CatFile { kind, object } => cat_file::handle(&open()?, *kind, object),
        Command::LsTree { recursive, tree } => ls_tree::handle(&open()?, tree, *recursive),
        Command::Log { commit } => log::handle(&open()?, commit),
        Command::Checkout { object, path } => {
            checkout::handle(&open()?, object, &cwd.join(path))
        }
        Command::ShowRef => show_ref::handle(&open()?),
        Command::Tag {
            annotate,
            message,
            author_name,
            author_email,
            name,
            object,
        } => {
            let repo = open()?;
            match name {
                None => tag::list(&repo),
                Some(name) if *annotate => {
                    let tagger =
                        tag::tagger(&repo, author_name.as_deref(), author_email.as_deref())?;
                    let message = message
                        .as_deref()
                        .ok_or_else(|| eyre!("an annotated tag needs a message (-m)"))?;
                    tag::create(&repo, name, object, Some((tagger, message)))
                }
                Some(name) => tag::create(&repo, name, object, None),
            }
        }
        Command::RevParse { kind, name } => {
            let repo = open()?;
            println!("{}", repo.find_object(name, *kind)?);
            Ok(())
        }
    }
}
