//! Datasource catalog commands
//!
//! Read-only inspection of the configured datasource catalog: a summary
//! list and a per-datasource attribute view. Selection happens in chat
//! mode; nothing here mutates state.

use crate::cli::DatasourceCommand;
use crate::config::Config;
use crate::error::{GenbiError, Result};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle datasource commands
pub fn handle_datasources(command: DatasourceCommand, config: &Config) -> Result<()> {
    match command {
        DatasourceCommand::List => {
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "ID".bold(),
                "Name".bold(),
                "Definition".bold(),
                "Attributes".bold()
            ]);

            for ds in &config.datasources {
                table.add_row(prettytable::row![
                    ds.id.cyan(),
                    ds.name,
                    ds.definition,
                    ds.attributes.len()
                ]);
            }

            println!("\nDatasources:");
            table.printstd();
            println!();
            println!(
                "Use {} for the attribute list.",
                "genbi datasources show <ID>".cyan()
            );
            println!();
        }
        DatasourceCommand::Show { id } => {
            let ds = config
                .find_datasource(&id)
                .ok_or_else(|| GenbiError::DatasourceNotFound(id.clone()))?;

            println!();
            println!("{} ({})", ds.name.bold(), ds.id.cyan());
            println!("  {}", ds.definition);
            println!("  luid: {}", ds.luid.dimmed());

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
            table.add_row(prettytable::row![
                "Attribute".bold(),
                "Type".bold(),
                "Description".bold()
            ]);
            for attr in &ds.attributes {
                table.add_row(prettytable::row![
                    attr.name.cyan(),
                    attr.attr_type,
                    attr.description
                ]);
            }
            table.printstd();
            println!();
        }
    }

    Ok(())
}
