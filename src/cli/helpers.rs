//! Shared helper functions for CLI commands
//!
//! Store resolution, record lookup, the show/add/update/delete flow every
//! entity command shares, and text formatting.

use std::collections::HashSet;

use clap::ValueEnum;
use console::style;
use dialoguer::Input;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{
    Config, EntityController, Record, SaveOutcome, Store, Workspace, WorkspaceError,
};

/// Resolved store plus output preferences for one command run
pub struct Context {
    pub store: Store,
    pub format: OutputFormat,
}

/// Locate the database, make sure its schema exists, and pick the
/// output format
pub fn open_context(global: &GlobalOpts) -> Result<Context> {
    let workspace = Workspace::discover().ok();
    let config = Config::load(workspace.as_ref());

    let path = match config.database_path(workspace.as_ref(), global.db.as_deref()) {
        Some(path) => path,
        None => {
            let searched_from = std::env::current_dir().unwrap_or_default();
            return Err(WorkspaceError::NotFound { searched_from }.into());
        }
    };

    let store = Store::new(path);
    store.ensure_schema()?;
    tracing::debug!(path = %store.path().display(), "store ready");

    Ok(Context {
        store,
        format: resolve_format(global.format, &config),
    })
}

/// `auto` defers to the configured default format, if any
pub fn resolve_format(requested: OutputFormat, config: &Config) -> OutputFormat {
    if requested != OutputFormat::Auto {
        return requested;
    }
    config
        .default_format
        .as_deref()
        .and_then(|name| OutputFormat::from_str(name, true).ok())
        .unwrap_or(OutputFormat::Auto)
}

/// Select record `id` in the controller or fail with a readable error
pub fn select_existing<R: Record>(controller: &mut EntityController<R>, id: i64) -> Result<()> {
    if controller.select(id) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = format!("run `stockroom {} list` to see existing ids", command_for::<R>()),
            "No {} with id {}",
            R::LABEL,
            id
        ))
    }
}

/// Ids currently in the controller's snapshot
pub fn snapshot_ids<R: Record>(controller: &EntityController<R>) -> HashSet<i64> {
    controller.snapshot().rows().iter().map(|r| r.id()).collect()
}

/// The record that appeared since `before` was taken
///
/// Inserts do not report the generated id; it is discovered by comparing
/// the refreshed snapshot with the previous one.
pub fn newly_added<'a, R: Record>(controller: &'a EntityController<R>, before: &HashSet<i64>) -> Option<&'a R> {
    controller
        .snapshot()
        .rows()
        .iter()
        .filter(|r| !before.contains(&r.id()))
        .max_by_key(|r| r.id())
}

/// A record kind the shared show command can print
pub trait Tabular: Record + Serialize {
    /// Plain field values for the one-line `tsv`/`csv`/`md` show output
    fn plain_fields(&self) -> Vec<String>;
}

/// `--reverse`, `--limit` and `--count` for list commands
#[derive(clap::Args, Debug, Default)]
pub struct WindowArgs {
    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

impl WindowArgs {
    /// Reverse, then truncate to the limit
    pub fn apply<T>(&self, rows: &mut Vec<T>) {
        if self.reverse {
            rows.reverse();
        }
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
    }
}

/// `show ID` for any record kind
pub fn show_record<R: Tabular>(global: &GlobalOpts, id: i64) -> Result<()> {
    let ctx = open_context(global)?;
    let mut controller = EntityController::<R>::open(&ctx.store)?;
    select_existing(&mut controller, id)?;

    let Some(record) = controller.selected() else {
        return Ok(());
    };

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(record).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Id => println!("{}", record.id()),
        OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Md => {
            println!("{}", record.plain_fields().join("\t"));
        }
        OutputFormat::Yaml | OutputFormat::Auto => {
            let yaml = serde_yml::to_string(record).into_diagnostic()?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

/// Insert a new record from `input` and report its id
pub fn add_record<R: Record>(global: &GlobalOpts, input: &R::Input) -> Result<()> {
    let ctx = open_context(global)?;
    let mut controller = EntityController::<R>::open(&ctx.store)?;

    let before = snapshot_ids(&controller);
    controller.new_entry();
    controller.save(input)?;

    match newly_added(&controller, &before) {
        Some(record) => println!(
            "{} Added {} {} {}",
            style("✓").green(),
            R::LABEL,
            style(record.id()).cyan(),
            style(record.name()).yellow()
        ),
        None => println!("{} Added {}", style("✓").green(), R::LABEL),
    }

    Ok(())
}

/// Use `value` when given, otherwise ask for it on the terminal
pub fn prompt_if_missing(prompt: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .into_diagnostic(),
    }
}

/// Load record `id` into its form, let `edit` change it, then save
pub fn update_record<R: Record>(
    global: &GlobalOpts,
    id: i64,
    edit: impl FnOnce(&mut R::Input),
) -> Result<()> {
    let ctx = open_context(global)?;
    let mut controller = EntityController::<R>::open(&ctx.store)?;
    select_existing(&mut controller, id)?;

    let Some(mut input) = controller.details() else {
        return Ok(());
    };
    edit(&mut input);

    let outcome = controller.save(&input)?;
    report_update::<R>(outcome)
}

/// Print the result of an update, failing when the row disappeared
pub fn report_update<R: Record>(outcome: SaveOutcome) -> Result<()> {
    match outcome {
        SaveOutcome::Updated(id) => {
            println!("{} Updated {} {}", style("✓").green(), R::LABEL, style(id).cyan());
            Ok(())
        }
        SaveOutcome::Vanished(id) => Err(miette::miette!(
            help = format!("run `stockroom {} list` to see existing ids", command_for::<R>()),
            "{} {} was deleted before the update was saved",
            R::LABEL,
            id
        )),
        SaveOutcome::Inserted => Ok(()),
    }
}

/// `delete ID` for any record kind
pub fn delete_record<R: Record>(global: &GlobalOpts, id: i64) -> Result<()> {
    let ctx = open_context(global)?;
    let mut controller = EntityController::<R>::open(&ctx.store)?;
    select_existing(&mut controller, id)?;

    let name = controller
        .selected()
        .map(|r| r.name().to_string())
        .unwrap_or_default();
    let id = controller.delete_selected()?;

    println!(
        "{} Deleted {} {} {}",
        style("✓").green(),
        R::LABEL,
        style(id).cyan(),
        style(name).yellow()
    );

    Ok(())
}

fn command_for<R: Record>() -> &'static str {
    match R::LABEL {
        "supplier" => "sup",
        other => other,
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
