use crate::output::print_value;
use crate::settings::Settings;
use anyhow::Context;
use clap::Subcommand;

/// Folder paths are relative to the vault root.
#[derive(Subcommand)]
pub enum FolderSubcommand {
    /// List folder paths
    List,

    /// Create a folder
    Create { folder: String },

    /// Rename a folder
    Rename { folder: String, new_foldername: String },

    /// Delete a folder
    Delete { folder: String },

    /// Move a folder to the trash
    Trash { folder: String },
}

pub fn run(settings: &Settings, subcmd: FolderSubcommand) -> anyhow::Result<()> {
    let vault = settings.vault()?;
    let value = match subcmd {
        FolderSubcommand::List => vault.folder_list().context("failed to list folders")?,
        FolderSubcommand::Create { folder } => vault
            .folder_create(&folder)
            .with_context(|| format!("failed to create '{folder}'"))?,
        FolderSubcommand::Rename {
            folder,
            new_foldername,
        } => vault
            .folder_rename(&folder, &new_foldername)
            .with_context(|| format!("failed to rename '{folder}'"))?,
        FolderSubcommand::Delete { folder } => vault
            .folder_delete(&folder)
            .with_context(|| format!("failed to delete '{folder}'"))?,
        FolderSubcommand::Trash { folder } => vault
            .folder_trash(&folder)
            .with_context(|| format!("failed to trash '{folder}'"))?,
    };
    print_value(value.as_ref(), settings.json)
}
