//! `stockroom item` command - Inventory item management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{
    add_record, delete_record, escape_csv, open_context, prompt_if_missing, show_record,
    truncate_str, update_record, Tabular, WindowArgs,
};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{format_usd, EntityController, LOW_STOCK_THRESHOLD};
use crate::entities::item::{Item, ItemInput};

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List items with filtering
    List(ListArgs),

    /// Show an item's details
    Show(ShowArgs),

    /// Add a new item
    Add(AddArgs),

    /// Change an existing item
    Update(UpdateArgs),

    /// Delete an item
    Delete(DeleteArgs),
}

/// Columns to sort by
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Id,
    Name,
    Quantity,
    Price,
    Value,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only items whose name contains this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only items below the low-stock threshold
    #[arg(long)]
    pub low_stock: bool,

    /// Sort by field (default: store order)
    #[arg(long)]
    pub sort: Option<ListColumn>,

    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Item id
    pub id: i64,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Item name (required)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Units in stock
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Option<String>,

    /// Unit price
    #[arg(long, short = 'p', allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Interactive mode (prompt for missing fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Item id
    pub id: i64,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New quantity
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Option<String>,

    /// New unit price
    #[arg(long, short = 'p', allow_hyphen_values = true)]
    pub price: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Item id
    pub id: i64,
}

/// Run an item subcommand
pub fn run(cmd: ItemCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ItemCommands::List(args) => run_list(args, global),
        ItemCommands::Show(args) => run_show(args, global),
        ItemCommands::Add(args) => run_add(args, global),
        ItemCommands::Update(args) => run_update(args, global),
        ItemCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = open_context(global)?;
    let controller = EntityController::<Item>::open(&ctx.store)?;

    let mut items: Vec<&Item> = controller
        .snapshot()
        .filter_by_name(args.search.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|i| !args.low_stock || i.quantity < LOW_STOCK_THRESHOLD)
        .collect();

    if let Some(column) = args.sort {
        match column {
            ListColumn::Id => items.sort_by_key(|i| i.id),
            ListColumn::Name => items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            ListColumn::Quantity => items.sort_by_key(|i| i.quantity),
            ListColumn::Price => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
            ListColumn::Value => items.sort_by(|a, b| a.value().total_cmp(&b.value())),
        }
    }

    args.window.apply(&mut items);

    if args.window.count {
        println!("{}", items.len());
        return Ok(());
    }

    let format = match ctx.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&items).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&items).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            println!("id,name,quantity,price,value");
            for item in &items {
                println!(
                    "{},{},{},{:.2},{:.2}",
                    item.id,
                    escape_csv(&item.name),
                    item.quantity,
                    item.price,
                    item.value()
                );
            }
        }
        OutputFormat::Md => {
            println!("| ID | Name | Quantity | Price | Value |");
            println!("|---|---|---|---|---|");
            for item in &items {
                println!(
                    "| {} | {} | {} | {} | {} |",
                    item.id,
                    item.name,
                    item.quantity,
                    format_usd(item.price),
                    format_usd(item.value())
                );
            }
        }
        OutputFormat::Id => {
            for item in &items {
                println!("{}", item.id);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if items.is_empty() {
                println!("No items found.");
                return Ok(());
            }

            println!(
                "{:<6} {:<30} {:>10} {:>12} {:>14}",
                style("ID").bold(),
                style("NAME").bold(),
                style("QUANTITY").bold(),
                style("PRICE").bold(),
                style("VALUE").bold()
            );
            println!("{}", "-".repeat(76));

            for item in &items {
                let quantity = if item.quantity < LOW_STOCK_THRESHOLD {
                    style(item.quantity.to_string()).yellow()
                } else {
                    style(item.quantity.to_string())
                };
                println!(
                    "{:<6} {:<30} {:>10} {:>12} {:>14}",
                    style(item.id).cyan(),
                    truncate_str(&item.name, 28),
                    quantity,
                    format_usd(item.price),
                    format_usd(item.value())
                );
            }

            if !global.quiet {
                println!();
                println!("{} item(s) found.", style(items.len()).cyan());
            }
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    show_record::<Item>(global, args.id)
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let input = if args.interactive {
        ItemInput {
            name: prompt_if_missing("Name", args.name)?,
            quantity: prompt_if_missing("Quantity", args.quantity)?,
            price: prompt_if_missing("Price", args.price)?,
        }
    } else {
        ItemInput {
            name: args.name.unwrap_or_default(),
            quantity: args.quantity.unwrap_or_default(),
            price: args.price.unwrap_or_default(),
        }
    };

    add_record::<Item>(global, &input)
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    update_record::<Item>(global, args.id, |input| {
        if let Some(name) = args.name {
            input.name = name;
        }
        if let Some(quantity) = args.quantity {
            input.quantity = quantity;
        }
        if let Some(price) = args.price {
            input.price = price;
        }
    })
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    delete_record::<Item>(global, args.id)
}

impl Tabular for Item {
    fn plain_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.quantity.to_string(),
            format!("{:.2}", self.price),
        ]
    }
}
