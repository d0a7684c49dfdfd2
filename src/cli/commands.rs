use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "ol", about = concat!("outline v", env!("CARGO_PKG_VERSION"), " - checklists in plain markdown"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Outline file (default: $OUTLINE_FILE, then the configured file)
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items with their ids
    Ls(LsArgs),
    /// Add a task or section
    Add(AddArgs),
    /// Mark a task done
    Done(IdArg),
    /// Mark a task not done
    Undo(IdArg),
    /// Remove a task, or a section and everything under it
    Rm(IdArg),
    /// Swap an item with its neighbor
    Mv(MvArgs),
    /// Replace an item's text
    Title(TitleArgs),
    /// Set or remove task metadata
    Meta(MetaArgs),
    /// Show one item in detail
    Show(IdArg),
    /// Fuzzy search item text
    Search(SearchArgs),
    /// Hide the items under a section in listings
    Collapse(IdArg),
    /// Show the items under a collapsed section again
    Expand(IdArg),
    /// View or edit the config file
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct IdArg {
    /// Item id as shown by `ol ls` (1-based)
    pub id: usize,
}

#[derive(Args)]
pub struct LsArgs {
    /// Include items under collapsed sections
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task or section text. Tasks may include key:value metadata.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Add a section instead of a task
    #[arg(long)]
    pub section: bool,
    /// Section level (1-6), used with --section
    #[arg(long, default_value_t = 1)]
    pub level: u8,
    /// Insert after this item id instead of at the end
    #[arg(long)]
    pub after: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Args)]
pub struct MvArgs {
    pub id: usize,
    #[arg(value_enum)]
    pub direction: MoveDirection,
}

#[derive(Args)]
pub struct TitleArgs {
    pub id: usize,
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct MetaArgs {
    pub id: usize,
    /// Pairs to set, as key=value
    pub pairs: Vec<String>,
    /// Keys to remove (repeatable)
    #[arg(long)]
    pub unset: Vec<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    #[arg(required = true, num_args = 1..)]
    pub terms: Vec<String>,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective config and where it is read from
    Show,
    /// Set the default outline file
    SetFile {
        path: String,
    },
}
