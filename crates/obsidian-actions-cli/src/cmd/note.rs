use crate::output::print_value;
use crate::settings::Settings;
use anyhow::Context;
use clap::{Args, Subcommand};
use obsidian_actions::{NoteCreate, NoteInsert};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum NoteSubcommand {
    /// List all notes in the vault
    List,

    /// Show a note (body, content, filepath, front matter, properties)
    Get {
        /// Note name; the `.md` extension may be omitted
        name: String,
        /// Treat NAME as the full vault path instead of a file name
        #[arg(long)]
        path: bool,
        /// Don't open the note in Obsidian
        #[arg(long)]
        silent: bool,
    },

    /// Show the currently active note
    Active,

    /// Open a note in Obsidian
    Open { name: String },

    /// Create a note
    Create {
        file: String,
        /// Initial content
        #[arg(long, conflicts_with = "template")]
        content: Option<String>,
        /// Template note to apply
        #[arg(long)]
        template: Option<String>,
        /// Replace the note if it already exists
        #[arg(long)]
        overwrite: bool,
        /// Don't open the note in Obsidian
        #[arg(long)]
        silent: bool,
    },

    /// Append content to the end of a note (or below a headline)
    Append(InsertArgs),

    /// Prepend content after the front matter (or below a headline)
    Prepend(InsertArgs),
}

#[derive(Args)]
pub struct InsertArgs {
    file: String,
    content: String,
    /// Full headline line to insert below, e.g. '## Log'
    #[arg(long)]
    below_headline: Option<String>,
    /// Create the note when it doesn't exist
    #[arg(long)]
    create: bool,
    /// Make sure the note ends with a newline
    #[arg(long)]
    ensure_newline: bool,
    /// Don't open the note in Obsidian
    #[arg(long)]
    silent: bool,
}

impl From<InsertArgs> for NoteInsert {
    fn from(a: InsertArgs) -> Self {
        NoteInsert {
            file: a.file,
            content: a.content,
            below_headline: a.below_headline,
            create_if_not_found: a.create,
            ensure_newline: a.ensure_newline,
            silent: a.silent,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(settings: &Settings, subcmd: NoteSubcommand) -> anyhow::Result<()> {
    let vault = settings.vault()?;
    let value = match subcmd {
        NoteSubcommand::List => vault.note_list().context("failed to list notes")?,
        NoteSubcommand::Get { name, path, silent } => vault
            .note_get(&name, path, silent)
            .with_context(|| format!("failed to get note '{name}'"))?,
        NoteSubcommand::Active => vault.note_get_active().context("failed to get active note")?,
        NoteSubcommand::Open { name } => vault
            .note_open(&name)
            .with_context(|| format!("failed to open note '{name}'"))?,
        NoteSubcommand::Create {
            file,
            content,
            template,
            overwrite,
            silent,
        } => {
            let ctx = format!("failed to create note '{file}'");
            vault
                .note_create(NoteCreate {
                    file,
                    content,
                    template,
                    overwrite,
                    silent,
                })
                .context(ctx)?
        }
        NoteSubcommand::Append(args) => {
            let ctx = format!("failed to append to '{}'", args.file);
            vault.note_append(args.into()).context(ctx)?
        }
        NoteSubcommand::Prepend(args) => {
            let ctx = format!("failed to prepend to '{}'", args.file);
            vault.note_prepend(args.into()).context(ctx)?
        }
    };
    print_value(value.as_ref(), settings.json)
}
