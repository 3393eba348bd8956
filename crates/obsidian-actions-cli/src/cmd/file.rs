use crate::output::print_value;
use crate::settings::Settings;
use anyhow::Context;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum FileSubcommand {
    /// List all files in the vault (not just notes)
    List,

    /// Show the currently active file
    Active,

    /// Open a file in Obsidian
    Open { file: String },

    /// Rename a file
    Rename {
        file: String,
        new_filename: String,
        /// Don't open the renamed file
        #[arg(long)]
        silent: bool,
    },

    /// Delete a file
    Delete { file: String },

    /// Move a file to the trash
    Trash { file: String },
}

pub fn run(settings: &Settings, subcmd: FileSubcommand) -> anyhow::Result<()> {
    let vault = settings.vault()?;
    let value = match subcmd {
        FileSubcommand::List => vault.file_list().context("failed to list files")?,
        FileSubcommand::Active => vault.file_get_active().context("failed to get active file")?,
        FileSubcommand::Open { file } => vault
            .file_open(&file)
            .with_context(|| format!("failed to open '{file}'"))?,
        FileSubcommand::Rename {
            file,
            new_filename,
            silent,
        } => vault
            .file_rename(&file, &new_filename, silent)
            .with_context(|| format!("failed to rename '{file}'"))?,
        FileSubcommand::Delete { file } => vault
            .file_delete(&file)
            .with_context(|| format!("failed to delete '{file}'"))?,
        FileSubcommand::Trash { file } => vault
            .file_trash(&file)
            .with_context(|| format!("failed to trash '{file}'"))?,
    };
    print_value(value.as_ref(), settings.json)
}
