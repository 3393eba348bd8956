use crate::output::print_value;
use crate::settings::Settings;
use anyhow::Context;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum CommandSubcommand {
    /// List command palette entries
    List,

    /// Execute one or more commands in sequence
    Execute {
        /// Command IDs (see `command list`)
        #[arg(required = true)]
        ids: Vec<String>,
        /// Pause between commands, in seconds
        #[arg(long)]
        pause: Option<f64>,
    },
}

pub fn run(settings: &Settings, subcmd: CommandSubcommand) -> anyhow::Result<()> {
    let vault = settings.vault()?;
    let value = match subcmd {
        CommandSubcommand::List => vault.list_commands().context("failed to list commands")?,
        CommandSubcommand::Execute { ids, pause } => {
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            vault
                .execute_command(&ids, pause)
                .context("failed to execute commands")?
        }
    };
    print_value(value.as_ref(), settings.json)
}
