use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::outline_io::{self, StoreError};
use crate::io::{config_io, state};
use crate::model::config::OutlineConfig;
use crate::model::outline::Outline;
use crate::ops::outline_ops::{self, Direction, InsertPosition, OutlineError};
use crate::ops::{search, visibility};
use crate::parse::parse_task_content;

/// Argument errors caught before any outline operation runs
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("item id {id} does not exist (outline has {len} items)")]
    NoSuchId { id: usize, len: usize },
    #[error("expected key=value, got {0:?}")]
    BadPair(String),
    #[error("item {0} is not a task")]
    NotATask(usize),
    #[error("item {0} is not a section")]
    NotASection(usize),
    #[error("item {id} is already {edge}")]
    AtEdge { id: usize, edge: &'static str },
    #[error("nothing to do: give key=value pairs or --unset")]
    NothingToDo,
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs: the resolved file and the loaded config
struct Context {
    path: PathBuf,
    config: OutlineConfig,
    json: bool,
}

impl Context {
    fn load(&self) -> Result<Outline, StoreError> {
        outline_io::load_or_create(&self.path, self.config.file.auto_create)
    }

    fn save(&self, outline: &Outline) -> Result<(), StoreError> {
        outline_io::save_outline(&self.path, outline)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let config_path = config_io::config_path();
    let config = config_io::load_config(&config_path)?;

    let ctx = Context {
        path: outline_io::resolve_path(cli.file.as_deref(), &config),
        config,
        json: cli.json,
    };

    match cli.command {
        Commands::Ls(args) => cmd_ls(&ctx, args),
        Commands::Add(args) => cmd_add(&ctx, args),
        Commands::Done(args) => cmd_toggle(&ctx, args, true),
        Commands::Undo(args) => cmd_toggle(&ctx, args, false),
        Commands::Rm(args) => cmd_rm(&ctx, args),
        Commands::Mv(args) => cmd_mv(&ctx, args),
        Commands::Title(args) => cmd_title(&ctx, args),
        Commands::Meta(args) => cmd_meta(&ctx, args),
        Commands::Show(args) => cmd_show(&ctx, args),
        Commands::Search(args) => cmd_search(&ctx, args),
        Commands::Collapse(args) => cmd_collapse(&ctx, args, true),
        Commands::Expand(args) => cmd_collapse(&ctx, args, false),
        Commands::Config(args) => cmd_config(&ctx, args, &config_path),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Translate a 1-based user id into a 0-based index, checking it exists
pub fn resolve_id(id: usize, len: usize) -> Result<usize, CliError> {
    if id == 0 || id > len {
        return Err(CliError::NoSuchId { id, len });
    }
    Ok(id - 1)
}

/// Restate a model error in terms of the 1-based ids the user typed
fn with_user_ids(err: OutlineError) -> Box<dyn std::error::Error> {
    match err {
        OutlineError::InvalidIndex { index, len } => CliError::NoSuchId { id: index + 1, len }.into(),
        OutlineError::NotATask(index) => CliError::NotATask(index + 1).into(),
        other => other.into(),
    }
}

/// A failed swap at either end of the outline names the edge instead of the
/// missing neighbor
fn move_error(err: OutlineError, id: usize, direction: Direction) -> Box<dyn std::error::Error> {
    match err {
        OutlineError::InvalidIndex { .. } => {
            let edge = match direction {
                Direction::Up => "first",
                Direction::Down => "last",
            };
            CliError::AtEdge { id, edge }.into()
        }
        other => with_user_ids(other),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_collapse(path: &Path) -> (state::UiState, visibility::CollapseState) {
    let ui_state = state::read_ui_state(path);
    let collapse = ui_state.collapse_state(path);
    (ui_state, collapse)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_ls(ctx: &Context, args: LsArgs) -> CmdResult {
    let outline = ctx.load()?;
    let (_, collapse) = load_collapse(&ctx.path);
    let flags = if args.all {
        Vec::new()
    } else {
        collapse.flags_for(&outline.items)
    };
    let visible = visibility::compute_visible(&outline.items, &flags);

    if ctx.json {
        let items: Vec<ItemJson> = visible
            .iter()
            .map(|&i| {
                let collapsed = flags.get(i).copied().unwrap_or(false);
                item_to_json(i, &outline.items[i], collapsed)
            })
            .collect();
        return print_json(&items);
    }

    for line in format_listing(&outline, &visible, &flags, ctx.config.ui.id_width) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_show(ctx: &Context, args: IdArg) -> CmdResult {
    let outline = ctx.load()?;
    let index = resolve_id(args.id, outline.len())?;
    let item = outline_ops::get(&outline, index).map_err(with_user_ids)?;

    if ctx.json {
        let (_, collapse) = load_collapse(&ctx.path);
        return print_json(&item_to_json(index, item, collapse.is_collapsed(item)));
    }
    for line in format_item_detail(index, item) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_search(ctx: &Context, args: SearchArgs) -> CmdResult {
    let outline = ctx.load()?;
    let results = search::search(&outline.items, &args.terms);
    let query = args.terms.join(" ");

    if ctx.json {
        let hits: Vec<SearchHitJson> = results
            .iter()
            .map(|hit| hit_to_json(hit, &outline.items[hit.index]))
            .collect();
        return print_json(&hits);
    }

    if results.is_empty() {
        println!("No matches found for: {}", query);
        return Ok(());
    }
    println!("Found {} match(es) for: {}", results.len(), query);
    println!();
    for hit in &results {
        println!(
            "{}",
            format_item_line(hit.index, &outline.items[hit.index], ctx.config.ui.id_width)
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs) -> CmdResult {
    let mut outline = ctx.load()?;
    let position = match args.after {
        Some(id) => InsertPosition::After(resolve_id(id, outline.len())?),
        None => InsertPosition::End,
    };
    let text = args.text.join(" ");

    let index = if args.section {
        outline_ops::insert_section(&mut outline, text, args.level, position)
            .map_err(with_user_ids)?
    } else {
        let content = parse_task_content(&text);
        if content.description.is_empty() {
            return Err(OutlineError::EmptyText.into());
        }
        outline_ops::insert_task(&mut outline, content.description, content.metadata, position)
            .map_err(with_user_ids)?
    };

    ctx.save(&outline)?;
    println!("Added {} as {}", describe(&outline.items[index]), index + 1);
    Ok(())
}

fn cmd_toggle(ctx: &Context, args: IdArg, completed: bool) -> CmdResult {
    let mut outline = ctx.load()?;
    let index = resolve_id(args.id, outline.len())?;
    outline_ops::toggle(&mut outline, index, completed).map_err(with_user_ids)?;
    ctx.save(&outline)?;
    let verb = if completed { "Completed" } else { "Reopened" };
    println!("{} {} {}", verb, args.id, describe(&outline.items[index]));
    Ok(())
}

fn cmd_rm(ctx: &Context, args: IdArg) -> CmdResult {
    let mut outline = ctx.load()?;
    let index = resolve_id(args.id, outline.len())?;
    let removed = outline_ops::delete_subtree(&mut outline, index).map_err(with_user_ids)?;
    ctx.save(&outline)?;

    if let Some(first) = removed.first() {
        match removed.len() {
            1 => println!("Removed {} {}", args.id, describe(first)),
            n => println!(
                "Removed {} {} and {} item(s) under it",
                args.id,
                describe(first),
                n - 1
            ),
        }
    }
    Ok(())
}

fn cmd_mv(ctx: &Context, args: MvArgs) -> CmdResult {
    let mut outline = ctx.load()?;
    let index = resolve_id(args.id, outline.len())?;
    let direction = match args.direction {
        MoveDirection::Up => Direction::Up,
        MoveDirection::Down => Direction::Down,
    };
    let new_index = outline_ops::move_item(&mut outline, index, direction)
        .map_err(|e| move_error(e, args.id, direction))?;
    ctx.save(&outline)?;
    println!("Moved {} to {}", describe(&outline.items[new_index]), new_index + 1);
    Ok(())
}

fn cmd_title(ctx: &Context, args: TitleArgs) -> CmdResult {
    let mut outline = ctx.load()?;
    let index = resolve_id(args.id, outline.len())?;
    outline_ops::edit_text(&mut outline, index, &args.text.join(" ")).map_err(with_user_ids)?;
    ctx.save(&outline)?;
    println!("Updated {} {}", args.id, describe(&outline.items[index]));
    Ok(())
}

fn cmd_meta(ctx: &Context, args: MetaArgs) -> CmdResult {
    if args.pairs.is_empty() && args.unset.is_empty() {
        return Err(CliError::NothingToDo.into());
    }
    let pairs = args
        .pairs
        .iter()
        .map(|p| p.split_once('=').ok_or_else(|| CliError::BadPair(p.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    let mut outline = ctx.load()?;
    let index = resolve_id(args.id, outline.len())?;

    // Nothing is written unless every edit succeeds
    for (key, value) in pairs {
        outline_ops::set_metadata(&mut outline, index, key, value).map_err(with_user_ids)?;
    }
    for key in &args.unset {
        outline_ops::remove_metadata(&mut outline, index, key).map_err(with_user_ids)?;
    }

    ctx.save(&outline)?;
    println!("Updated {} {}", args.id, describe(&outline.items[index]));
    Ok(())
}

fn cmd_collapse(ctx: &Context, args: IdArg, collapsed: bool) -> CmdResult {
    let outline = ctx.load()?;
    let index = resolve_id(args.id, outline.len())?;
    let item = outline_ops::get(&outline, index).map_err(with_user_ids)?;

    let (mut ui_state, mut collapse) = load_collapse(&ctx.path);
    if !collapse.set(item, collapsed) {
        return Err(CliError::NotASection(args.id).into());
    }
    collapse.prune(&outline.items);
    ui_state.set_collapse_state(&ctx.path, collapse);
    state::write_ui_state(&ctx.path, &ui_state)?;

    let verb = if collapsed { "Collapsed" } else { "Expanded" };
    println!("{} {} {}", verb, args.id, describe(item));
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(ctx: &Context, args: ConfigCmd, config_path: &Path) -> CmdResult {
    match args.action {
        ConfigAction::Show => {
            if ctx.json {
                return print_json(&ctx.config);
            }
            println!("config: {}", config_path.display());
            println!("file: {}", ctx.path.display());
            println!("auto_create: {}", ctx.config.file.auto_create);
            println!("id_width: {}", ctx.config.ui.id_width);
        }
        ConfigAction::SetFile { path } => {
            let (_, mut doc) = config_io::read_config(config_path)?;
            config_io::set_default_file(&mut doc, &path);
            config_io::write_config(config_path, &doc)?;
            println!("Default file set to {}", path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_id_is_one_based() {
        assert_eq!(resolve_id(1, 3).unwrap(), 0);
        assert_eq!(resolve_id(3, 3).unwrap(), 2);
    }

    #[test]
    fn resolve_id_rejects_out_of_range() {
        assert!(matches!(
            resolve_id(0, 3),
            Err(CliError::NoSuchId { id: 0, len: 3 })
        ));
        assert!(matches!(
            resolve_id(4, 3),
            Err(CliError::NoSuchId { id: 4, len: 3 })
        ));
        assert!(resolve_id(1, 0).is_err());
    }

    #[test]
    fn model_errors_use_one_based_ids() {
        assert_eq!(
            with_user_ids(OutlineError::NotATask(0)).to_string(),
            "item 1 is not a task"
        );
        assert_eq!(
            with_user_ids(OutlineError::InvalidIndex { index: 4, len: 3 }).to_string(),
            "item id 5 does not exist (outline has 3 items)"
        );
        assert_eq!(
            with_user_ids(OutlineError::EmptyText).to_string(),
            "text cannot be empty"
        );
    }

    #[test]
    fn move_errors_name_the_edge() {
        let err = OutlineError::InvalidIndex { index: 0, len: 3 };
        assert_eq!(
            move_error(err, 1, Direction::Up).to_string(),
            "item 1 is already first"
        );
        let err = OutlineError::InvalidIndex { index: 3, len: 3 };
        assert_eq!(
            move_error(err, 3, Direction::Down).to_string(),
            "item 3 is already last"
        );
    }
}
