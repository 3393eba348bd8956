use crate::output::{print_table, print_value};
use crate::settings::Settings;
use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;

#[derive(Subcommand)]
pub enum DataviewSubcommand {
    /// Run a Dataview LIST query
    List {
        /// DQL query, e.g. 'LIST FROM #project'
        dql: String,
    },

    /// Run a Dataview TABLE query
    Table {
        /// DQL query, e.g. 'TABLE file.mtime FROM #project'
        dql: String,
    },
}

pub fn run(settings: &Settings, subcmd: DataviewSubcommand) -> anyhow::Result<()> {
    let vault = settings.vault()?;
    match subcmd {
        DataviewSubcommand::List { dql } => {
            let value = vault
                .dataview_list_query(&dql)
                .context("dataview LIST query failed")?;
            print_value(value.as_ref(), settings.json)
        }
        DataviewSubcommand::Table { dql } => {
            let value = vault
                .dataview_table_query(&dql)
                .context("dataview TABLE query failed")?;
            match value {
                Some(Value::Array(rows)) if !settings.json && rows.iter().all(Value::is_array) => {
                    print_rows(&rows);
                    Ok(())
                }
                other => print_value(other.as_ref(), settings.json),
            }
        }
    }
}

/// TABLE results are a list of rows; the first row is the header.
fn print_rows(rows: &[Value]) {
    let Some((header, body)) = rows.split_first() else {
        println!("(no rows)");
        return;
    };
    let cells = |row: &Value| -> Vec<String> {
        row.as_array()
            .map(|cols| {
                cols.iter()
                    .map(|c| match c {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    };
    let headers = cells(header);
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    print_table(&headers, body.iter().map(cells).collect());
}
