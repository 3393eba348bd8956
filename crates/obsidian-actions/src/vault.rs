use serde_json::Value;

use crate::client::ActionClient;
use crate::types::{Params, Scalar};
use crate::{ActionError, Result};

// ─── Option structs ───────────────────────────────────────────────────────

/// Arguments for [`Vault::note_create`].
#[derive(Debug, Clone, Default)]
pub struct NoteCreate {
    pub file: String,
    /// Initial body. Mutually exclusive with `template`.
    pub content: Option<String>,
    /// Template note to apply. Mutually exclusive with `content`.
    pub template: Option<String>,
    /// Replace an existing note instead of leaving it untouched.
    pub overwrite: bool,
    pub silent: bool,
}

/// Arguments for [`Vault::note_append`] and [`Vault::note_prepend`].
#[derive(Debug, Clone, Default)]
pub struct NoteInsert {
    pub file: String,
    pub content: String,
    /// Insert below this headline; must match the full headline line.
    pub below_headline: Option<String>,
    pub create_if_not_found: bool,
    pub ensure_newline: bool,
    pub silent: bool,
}

// ─── Vault ────────────────────────────────────────────────────────────────

/// Typed access to the Actions URI routes of one vault.
///
/// Every call carries `vault=<name>`; parameters left as `None` are not sent.
pub struct Vault {
    client: ActionClient,
    name: String,
}

impl Vault {
    pub fn new(client: ActionClient, name: impl Into<String>) -> Self {
        Vault {
            client,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &ActionClient {
        &self.client
    }

    /// Run any route in this vault and return the decoded value.
    pub fn run(&self, route: &str, args: Args) -> Result<Option<Value>> {
        let mut params = args.0;
        params.insert("vault".to_string(), Scalar::from(&self.name));
        Ok(self.client.call(route, params)?.value)
    }

    /// Plugin and Obsidian version information.
    pub fn info(&self) -> Result<Option<Value>> {
        self.run("info", Args::new())
    }

    // ── command ──

    /// Command palette entries as `{id, name}` objects.
    pub fn list_commands(&self) -> Result<Option<Value>> {
        self.run("command/list", Args::new())
    }

    /// Run commands in sequence, optionally pausing between them.
    pub fn execute_command(
        &self,
        commands: &[&str],
        pause_in_secs: Option<f64>,
    ) -> Result<Option<Value>> {
        if commands.is_empty() {
            return Err(ActionError::InvalidArguments(
                "at least one command id is required".to_string(),
            ));
        }
        self.run(
            "command/execute",
            Args::new()
                .set("commands", commands.join(","))
                .opt("pause-in-secs", pause_in_secs),
        )
    }

    // ── dataview ──

    pub fn dataview_list_query(&self, dql: &str) -> Result<Option<Value>> {
        self.run("dataview/list-query", Args::new().set("dql", dql))
    }

    pub fn dataview_table_query(&self, dql: &str) -> Result<Option<Value>> {
        self.run("dataview/table-query", Args::new().set("dql", dql))
    }

    // ── file ──

    /// All files, not just notes.
    pub fn file_list(&self) -> Result<Option<Value>> {
        self.run("file/list", Args::new())
    }

    pub fn file_get_active(&self) -> Result<Option<Value>> {
        self.run("file/get-active", Args::new())
    }

    pub fn file_open(&self, file: &str) -> Result<Option<Value>> {
        self.run("file/open", Args::new().set("file", file))
    }

    /// Rename a file. The renamed file is opened unless `silent`.
    pub fn file_rename(&self, file: &str, new_filename: &str, silent: bool) -> Result<Option<Value>> {
        self.run(
            "file/rename",
            Args::new()
                .set("file", file)
                .set("new-filename", new_filename)
                .set("silent", silent),
        )
    }

    pub fn file_delete(&self, file: &str) -> Result<Option<Value>> {
        self.run("file/delete", Args::new().set("file", file))
    }

    pub fn file_trash(&self, file: &str) -> Result<Option<Value>> {
        self.run("file/trash", Args::new().set("file", file))
    }

    // ── folder ──
    //
    // Folder paths are relative to the vault root.

    pub fn folder_list(&self) -> Result<Option<Value>> {
        self.run("folder/list", Args::new())
    }

    pub fn folder_create(&self, folder: &str) -> Result<Option<Value>> {
        self.run("folder/create", Args::new().set("folder", folder))
    }

    pub fn folder_rename(&self, folder: &str, new_foldername: &str) -> Result<Option<Value>> {
        self.run(
            "folder/rename",
            Args::new()
                .set("folder", folder)
                .set("new-foldername", new_foldername),
        )
    }

    pub fn folder_delete(&self, folder: &str) -> Result<Option<Value>> {
        self.run("folder/delete", Args::new().set("folder", folder))
    }

    pub fn folder_trash(&self, folder: &str) -> Result<Option<Value>> {
        self.run("folder/trash", Args::new().set("folder", folder))
    }

    // ── note ──

    pub fn note_list(&self) -> Result<Option<Value>> {
        self.run("note/list", Args::new())
    }

    /// Fetch a note. With `by_path` the name is the full vault path,
    /// otherwise the first note with that file name wins. The `.md`
    /// extension may be omitted.
    pub fn note_get(&self, name: &str, by_path: bool, silent: bool) -> Result<Option<Value>> {
        let route = if by_path { "note/get" } else { "note/get-first-named" };
        self.run(route, Args::new().set("file", name).set("silent", silent))
    }

    pub fn note_get_active(&self) -> Result<Option<Value>> {
        self.run("note/get-active", Args::new())
    }

    pub fn note_open(&self, name: &str) -> Result<Option<Value>> {
        self.run("note/open", Args::new().set("file", name))
    }

    /// Create a note from `content` or `template` (empty content when
    /// neither is given). An existing note is skipped unless `overwrite`.
    pub fn note_create(&self, note: NoteCreate) -> Result<Option<Value>> {
        if note.content.is_some() && note.template.is_some() {
            return Err(ActionError::InvalidArguments(
                "set either content or template when creating a note, not both".to_string(),
            ));
        }
        let apply = if note.template.is_some() { "template" } else { "content" };
        let content = match (&note.content, &note.template) {
            (None, None) => Some(String::new()),
            (c, _) => c.clone(),
        };
        self.run(
            "note/create",
            Args::new()
                .set("file", note.file)
                .set("apply", apply)
                .opt("content", content)
                .opt("template", note.template)
                .set("if-exists", if note.overwrite { "overwrite" } else { "skip" })
                .set("silent", note.silent),
        )
    }

    /// Append to the end of a note, or below a headline.
    pub fn note_append(&self, insert: NoteInsert) -> Result<Option<Value>> {
        self.run("note/append", insert.into_args())
    }

    /// Prepend after the front matter, or below a headline.
    pub fn note_prepend(&self, insert: NoteInsert) -> Result<Option<Value>> {
        self.run("note/prepend", insert.into_args())
    }

    // ── tags ──

    pub fn tags_list(&self) -> Result<Option<Value>> {
        self.run("tags/list", Args::new())
    }
}

impl NoteInsert {
    fn into_args(self) -> Args {
        Args::new()
            .set("file", self.file)
            .set("content", self.content)
            .opt("below-headline", self.below_headline)
            .set("create-if-not-found", self.create_if_not_found)
            .set("ensure-newline", self.ensure_newline)
            .set("silent", self.silent)
    }
}

// ─── Args ─────────────────────────────────────────────────────────────────

/// Parameter builder that silently skips absent values.
#[derive(Debug, Clone, Default)]
pub struct Args(Params);

impl Args {
    pub fn new() -> Self {
        Args(Params::new())
    }

    pub fn set(mut self, key: &str, value: impl Into<Scalar>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn opt<V: Into<Scalar>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    pub fn into_params(self) -> Params {
        self.0
    }
}

impl From<Params> for Args {
    fn from(params: Params) -> Self {
        Args(params)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
