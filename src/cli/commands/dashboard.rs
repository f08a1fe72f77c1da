//! `stockroom dashboard` command - Stock totals and low-stock items

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::open_context;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{DashboardMetrics, LOW_STOCK_THRESHOLD};

#[derive(clap::Args, Debug)]
pub struct DashboardArgs {
    /// Only print the low-stock list
    #[arg(long)]
    pub low_stock: bool,
}

pub fn run(args: DashboardArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = open_context(global)?;
    let metrics = DashboardMetrics::load(&ctx.store)?;

    match ctx.format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let low_stock: Vec<String> = metrics.low_stock_items.iter().map(|l| l.to_string()).collect();
            let summary = serde_json::json!({
                "total_unique_items": metrics.total_unique_items,
                "total_stock_quantity": metrics.total_stock_quantity,
                "total_inventory_value": metrics.total_inventory_value,
                "total_inventory_value_display": metrics.total_value_display(),
                "low_stock_threshold": LOW_STOCK_THRESHOLD,
                "low_stock_items": low_stock,
            });
            if ctx.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary).into_diagnostic()?);
            } else {
                print!("{}", serde_yml::to_string(&summary).into_diagnostic()?);
            }
        }
        OutputFormat::Md => print!("{}", markdown_report(&metrics, args.low_stock)),
        OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Id => {
            for low in &metrics.low_stock_items {
                println!("{}\t{}", low.name, low.quantity);
            }
        }
        OutputFormat::Auto => print_dashboard(&metrics, args.low_stock),
    }

    Ok(())
}

fn print_dashboard(metrics: &DashboardMetrics, low_stock_only: bool) {
    let width = 48;

    if !low_stock_only {
        println!("{}", style("Inventory Dashboard").bold().underlined());
        println!("{}", "═".repeat(width));
        println!("  Total unique items:   {}", style(metrics.total_unique_items).cyan());
        println!("  Total stock quantity: {}", style(metrics.total_stock_quantity).cyan());
        println!(
            "  Total inventory value: {}",
            style(metrics.total_value_display()).green().bold()
        );
        println!();
    }

    println!(
        "{} (quantity below {})",
        style("LOW STOCK").bold(),
        LOW_STOCK_THRESHOLD
    );
    println!("{}", "─".repeat(width));
    if metrics.low_stock_items.is_empty() {
        println!("  {}", style("All items are sufficiently stocked").dim());
    } else {
        for low in &metrics.low_stock_items {
            println!("  {} {}", style("!").yellow(), low);
        }
    }
}

fn markdown_report(metrics: &DashboardMetrics, low_stock_only: bool) -> String {
    let mut output = String::new();

    if !low_stock_only {
        output.push_str("# Inventory Dashboard\n\n");

        let mut summary = Builder::default();
        summary.push_record(["Metric", "Value"]);
        summary.push_record(["Total unique items".to_string(), metrics.total_unique_items.to_string()]);
        summary.push_record(["Total stock quantity".to_string(), metrics.total_stock_quantity.to_string()]);
        summary.push_record(["Total inventory value".to_string(), metrics.total_value_display()]);
        output.push_str(&summary.build().with(Style::markdown()).to_string());
        output.push_str("\n\n");
    }

    output.push_str("## Low Stock\n\n");
    if metrics.low_stock_items.is_empty() {
        output.push_str("_All items are sufficiently stocked._\n");
    } else {
        let mut low = Builder::default();
        low.push_record(["Item", "Quantity"]);
        for item in &metrics.low_stock_items {
            low.push_record([item.name.clone(), item.quantity.to_string()]);
        }
        output.push_str(&low.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    output
}
