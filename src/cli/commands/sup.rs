//! `stockroom sup` command - Supplier management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{
    add_record, delete_record, escape_csv, open_context, prompt_if_missing, show_record,
    truncate_str, update_record, Tabular, WindowArgs,
};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::EntityController;
use crate::entities::supplier::{Supplier, SupplierInput};

#[derive(Subcommand, Debug)]
pub enum SupCommands {
    /// List suppliers with filtering
    List(ListArgs),

    /// Show a supplier's details
    Show(ShowArgs),

    /// Add a new supplier
    Add(AddArgs),

    /// Change an existing supplier
    Update(UpdateArgs),

    /// Delete a supplier
    Delete(DeleteArgs),
}

/// Columns to sort by
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Id,
    Name,
    Contact,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only suppliers whose name contains this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Sort by field (default: store order)
    #[arg(long)]
    pub sort: Option<ListColumn>,

    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Supplier id
    pub id: i64,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Supplier name (required)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Contact person
    #[arg(long, short = 'c')]
    pub contact: Option<String>,

    /// Email address
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Phone number
    #[arg(long, short = 'p')]
    pub phone: Option<String>,

    /// Interactive mode (prompt for missing fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Supplier id
    pub id: i64,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New contact person (empty string clears it)
    #[arg(long, short = 'c')]
    pub contact: Option<String>,

    /// New email address (empty string clears it)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// New phone number (empty string clears it)
    #[arg(long, short = 'p')]
    pub phone: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Supplier id
    pub id: i64,
}

/// Run a supplier subcommand
pub fn run(cmd: SupCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SupCommands::List(args) => run_list(args, global),
        SupCommands::Show(args) => run_show(args, global),
        SupCommands::Add(args) => run_add(args, global),
        SupCommands::Update(args) => run_update(args, global),
        SupCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = open_context(global)?;
    let controller = EntityController::<Supplier>::open(&ctx.store)?;

    let mut suppliers = controller
        .snapshot()
        .filter_by_name(args.search.as_deref().unwrap_or(""));

    if let Some(column) = args.sort {
        match column {
            ListColumn::Id => suppliers.sort_by_key(|s| s.id),
            ListColumn::Name => suppliers.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            ListColumn::Contact => suppliers.sort_by(|a, b| a.contact_person.cmp(&b.contact_person)),
        }
    }

    args.window.apply(&mut suppliers);

    if args.window.count {
        println!("{}", suppliers.len());
        return Ok(());
    }

    let format = match ctx.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&suppliers).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&suppliers).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            println!("id,name,contact_person,email,phone");
            for sup in &suppliers {
                println!(
                    "{},{},{},{},{}",
                    sup.id,
                    escape_csv(&sup.name),
                    escape_csv(sup.contact_person.as_deref().unwrap_or("")),
                    escape_csv(sup.email.as_deref().unwrap_or("")),
                    escape_csv(sup.phone.as_deref().unwrap_or(""))
                );
            }
        }
        OutputFormat::Md => {
            println!("| ID | Name | Contact | Email | Phone |");
            println!("|---|---|---|---|---|");
            for sup in &suppliers {
                println!(
                    "| {} | {} | {} | {} | {} |",
                    sup.id,
                    sup.name,
                    sup.contact_person.as_deref().unwrap_or("-"),
                    sup.email.as_deref().unwrap_or("-"),
                    sup.phone.as_deref().unwrap_or("-")
                );
            }
        }
        OutputFormat::Id => {
            for sup in &suppliers {
                println!("{}", sup.id);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if suppliers.is_empty() {
                println!("No suppliers found.");
                return Ok(());
            }

            println!(
                "{:<6} {:<25} {:<20} {:<25} {:<15}",
                style("ID").bold(),
                style("NAME").bold(),
                style("CONTACT").bold(),
                style("EMAIL").bold(),
                style("PHONE").bold()
            );
            println!("{}", "-".repeat(95));

            for sup in &suppliers {
                println!(
                    "{:<6} {:<25} {:<20} {:<25} {:<15}",
                    style(sup.id).cyan(),
                    truncate_str(&sup.name, 23),
                    truncate_str(sup.contact_person.as_deref().unwrap_or("-"), 18),
                    truncate_str(sup.email.as_deref().unwrap_or("-"), 23),
                    truncate_str(sup.phone.as_deref().unwrap_or("-"), 15)
                );
            }

            if !global.quiet {
                println!();
                println!("{} supplier(s) found.", style(suppliers.len()).cyan());
            }
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    show_record::<Supplier>(global, args.id)
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let input = if args.interactive {
        SupplierInput {
            name: prompt_if_missing("Name", args.name)?,
            contact_person: prompt_if_missing("Contact person", args.contact)?,
            email: prompt_if_missing("Email", args.email)?,
            phone: prompt_if_missing("Phone", args.phone)?,
        }
    } else {
        SupplierInput {
            name: args.name.unwrap_or_default(),
            contact_person: args.contact.unwrap_or_default(),
            email: args.email.unwrap_or_default(),
            phone: args.phone.unwrap_or_default(),
        }
    };

    add_record::<Supplier>(global, &input)
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    update_record::<Supplier>(global, args.id, |input| {
        if let Some(name) = args.name {
            input.name = name;
        }
        if let Some(contact) = args.contact {
            input.contact_person = contact;
        }
        if let Some(email) = args.email {
            input.email = email;
        }
        if let Some(phone) = args.phone {
            input.phone = phone;
        }
    })
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    delete_record::<Supplier>(global, args.id)
}

impl Tabular for Supplier {
    fn plain_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.contact_person.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            self.phone.clone().unwrap_or_default(),
        ]
    }
}
