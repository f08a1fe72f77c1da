//! `stockroom init` command - Initialize a workspace and its database

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::{Config, Store, Workspace, WorkspaceError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    // Create directory if it doesn't exist
    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let workspace = match Workspace::init(&path) {
        Ok(ws) => {
            println!(
                "{} Initialized stockroom workspace at {}",
                style("✓").green(),
                style(ws.root().display()).cyan()
            );
            ws
        }
        Err(WorkspaceError::AlreadyExists(root)) => {
            println!(
                "{} Stockroom workspace already exists at {}",
                style("!").yellow(),
                style(root.display()).cyan()
            );
            Workspace::discover_from(&root)?
        }
        Err(e) => return Err(e.into()),
    };

    // Existing tables and rows are left alone
    let config = Config::load(Some(&workspace));
    let db_path = config
        .database_path(Some(&workspace), global.db.as_deref())
        .unwrap_or_else(|| workspace.default_database());
    let store = Store::new(db_path);
    store.ensure_schema()?;

    println!(
        "{} Database ready at {}",
        style("✓").green(),
        style(store.path().display()).cyan()
    );

    if !global.quiet {
        println!();
        println!("Next steps:");
        println!(
            "  {} Add your first item",
            style("stockroom item add --name Widget --quantity 12 --price 4.99").yellow()
        );
        println!("  {} Add a supplier", style("stockroom sup add --name Acme").yellow());
        println!("  {} See stock totals", style("stockroom dashboard").yellow());
    }

    Ok(())
}
