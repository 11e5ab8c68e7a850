use camino::Utf8PathBuf;
use clap::Parser;
use clap::Subcommand;

use cairn::ObjectKind;

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Create an empty repository
    Init {
        /// Where to create it. Defaults to the current directory
        path: Option<Utf8PathBuf>,
    },

    /// Compute the digest of a file as an object of the given type
    HashObject {
        #[clap(short = 't', value_name = "type", default_value = "blob")]
        kind: ObjectKind,

        /// Also store the object
        #[clap(short, long)]
        write: bool,

        file: Utf8PathBuf,
    },

    /// Print the payload of an object
    CatFile {
        #[clap(value_name = "type")]
        kind: ObjectKind,

        object: String,
    },

    /// List the entries of a tree
    LsTree {
        /// Recurse into subtrees
        #[clap(short)]
        recursive: bool,

        #[clap(value_name = "tree-ish")]
        tree: String,
    },

    /// Print the history reachable from a commit as a Graphviz digraph
    Log {
        #[clap(default_value = "HEAD")]
        commit: String,
    },

    /// Write a commit's tree into an empty directory
    Checkout {
        #[clap(value_name = "commit-or-tree")]
        object: String,

        path: Utf8PathBuf,
    },

    /// List references and the digests they resolve to
    ShowRef,

    /// List tags, or create one
    Tag {
        /// Create an annotated tag object
        #[clap(short)]
        annotate: bool,

        /// Message for an annotated tag
        #[clap(short, long, env = "CAIRN_TAG_MESSAGE")]
        message: Option<String>,

        #[clap(long, env = "CAIRN_AUTHOR_NAME", hide_env_values = true)]
        author_name: Option<String>,

        #[clap(long, env = "CAIRN_AUTHOR_EMAIL", hide_env_values = true)]
        author_email: Option<String>,

        name: Option<String>,

        #[clap(default_value = "HEAD")]
        object: String,
    },

    /// Resolve a revision to a digest
    RevParse {
        /// Peel the result to an object of this type
        #[clap(long = "type", value_name = "type")]
        kind: Option<ObjectKind>,

        name: String,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "cairn", version, about)]
pub struct Opt {
    #[clap(subcommand)]
    pub command: Command,

    /// Log debug output to stderr
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in this directory
    #[clap(short = 'C', global = true)]
    pub path: Option<Utf8PathBuf>,
}
