//! Interactive command loop
//!
//! One state: waiting for a command. Each command collects its answers,
//! runs against the store, prints the result and returns to the prompt.
//! Mutations happen only after every answer is in, so leaving mid-command
//! (end of input or Ctrl+C) changes nothing.

use std::io::{BufRead, Write};

use crate::audit::AuditLogger;
use crate::config::QuillPaths;
use crate::display::{
    format_history, format_quote_list, format_raw_preview, format_search_results,
};
use crate::error::{QuillError, QuillResult};
use crate::export::{export_quotes, ExportFormat};
use crate::models::{parse_tag_list, Quote, QuoteUpdate, Tag};
use crate::services::QuoteService;
use crate::storage::QuoteStore;

use super::prompt::Prompter;

/// Lines of the backing file shown by `raw`
pub const RAW_PREVIEW_LINES: usize = 10;

/// Audit entries shown by `history`
pub const HISTORY_ENTRIES: usize = 10;

const PROMPT: &str = "\nquote> ";
const COMMAND_SUMMARY: &str = concat!(
    "Commands: (a)dd, (l)ist, (s)earch, (d)elete, (e)dit, e(x)port, (r)aw, ",
    "(w)rite, (hi)story, (h)elp, (q)uit"
);

/// A command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    List,
    Search,
    Delete,
    Edit,
    Export,
    Raw,
    Write,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse a command name or its alias; `None` for a blank line
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let command = match s.as_str() {
            "" => return None,
            "a" | "add" => Self::Add,
            "l" | "list" => Self::List,
            "s" | "search" => Self::Search,
            "d" | "delete" => Self::Delete,
            "e" | "edit" => Self::Edit,
            "x" | "export" => Self::Export,
            "r" | "raw" => Self::Raw,
            "w" | "write" => Self::Write,
            "hi" | "history" => Self::History,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(s),
        };
        Some(command)
    }
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The interactive quote shell
pub struct Shell<R, W> {
    store: QuoteStore,
    paths: QuillPaths,
    audit: AuditLogger,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: QuoteStore, paths: QuillPaths, input: R, output: W) -> Self {
        let audit = AuditLogger::new(paths.audit_log());
        Self {
            store,
            paths,
            audit,
            prompter: Prompter::new(input, output),
        }
    }

    /// Print the startup banner, then run commands until quit or end of input
    ///
    /// Both ways out are silent; only an interrupt says goodbye.
    pub fn run(&mut self) -> QuillResult<()> {
        self.greet()?;

        while let Some(line) = self.prompter.ask(PROMPT)? {
            let Some(command) = Command::parse(&line) else {
                continue;
            };

            if self.dispatch(command)? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Hand back the output writer (used by tests)
    pub fn into_output(self) -> QuillResult<W> {
        self.prompter.into_output()
    }

    fn greet(&mut self) -> QuillResult<()> {
        let path = self.store.path().display().to_string();
        for warning in self.store.load_warnings().to_vec() {
            self.prompter.say(format!("Warning: {}", warning))?;
        }
        if self.store.existed_on_load() {
            self.prompter
                .say(format!("Loaded {} quotes from {}", self.store.len(), path))?;
        } else {
            self.prompter
                .say(format!("Creating new quote file: {}", path))?;
        }

        self.prompter.say("=== Quote Manager ===")?;
        self.prompter.say(COMMAND_SUMMARY)
    }

    fn dispatch(&mut self, command: Command) -> QuillResult<Flow> {
        match command {
            Command::Add => self.add()?,
            Command::List => self.list()?,
            Command::Search => self.search()?,
            Command::Delete => self.delete()?,
            Command::Edit => self.edit()?,
            Command::Export => self.export()?,
            Command::Raw => self.raw()?,
            Command::Write => self.write()?,
            Command::History => self.history()?,
            Command::Help => self.prompter.say(COMMAND_SUMMARY)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(_) => self.prompter.say("Unknown command.")?,
        }
        Ok(Flow::Continue)
    }

    /// Parse typed tags, warning about the ones that don't exist
    fn collect_tags(&mut self, input: &str) -> QuillResult<Vec<Tag>> {
        let (tags, rejected) = parse_tag_list(input);
        for name in rejected {
            self.prompter
                .say(format!("Warning: '{}' is not a valid tag, skipping", name))?;
        }
        Ok(tags)
    }

    fn saved_message(&self) -> String {
        format!(
            "Saved {} quotes to {} (base64 encoded)",
            self.store.len(),
            self.store.path().display()
        )
    }

    fn report_save_error(&mut self, err: &QuillError) -> QuillResult<()> {
        self.prompter.say(format!("Error saving quotes: {}", err))?;
        self.prompter
            .say("Changes are kept in memory; use 'write' to retry saving.")
    }

    fn add(&mut self) -> QuillResult<()> {
        self.prompter.say("\n=== Adding New Quote ===")?;
        self.prompter
            .say("Enter the quote (press Enter twice when done):")?;
        let Some(body) = self.prompter.read_multiline()? else {
            return Ok(());
        };
        if body.is_empty() {
            return self.prompter.say("Quote cannot be empty. Cancelled.");
        }

        let Some(author) = self.prompter.ask("Enter the author: ")? else {
            return Ok(());
        };
        if author.is_empty() {
            return self.prompter.say("Author cannot be empty. Cancelled.");
        }

        let Some(context) = self.prompter.ask("Enter context (optional): ")? else {
            return Ok(());
        };

        self.prompter
            .say(format!("Available tags: {}", Tag::available()))?;
        let Some(tag_input) = self
            .prompter
            .ask("Enter tags (comma-separated, optional): ")?
        else {
            return Ok(());
        };
        let tags = self.collect_tags(&tag_input)?;

        let quote = match Quote::new(body, author, context, tags) {
            Ok(quote) => quote,
            Err(e) => return self.prompter.say(format!("{}. Cancelled.", e)),
        };

        let result = QuoteService::new(&mut self.store, &self.audit).add(quote);
        match result {
            Ok(added) => {
                let saved = self.saved_message();
                self.prompter.say(saved)?;
                self.prompter.say(format!("\nAdded: {}", added))
            }
            Err(e) => self.report_save_error(&e),
        }
    }

    fn list(&mut self) -> QuillResult<()> {
        let output = format_quote_list(self.store.quotes());
        self.prompter.print(&output)
    }

    fn search(&mut self) -> QuillResult<()> {
        let Some(query) = self.prompter.ask("Search for: ")? else {
            return Ok(());
        };
        if query.is_empty() {
            return Ok(());
        }

        let output = format_search_results(&query, &self.store.search(&query));
        self.prompter.print(&output)
    }

    fn delete(&mut self) -> QuillResult<()> {
        let Some(key) = self.prompter.ask("Enter index or slug to delete: ")? else {
            return Ok(());
        };

        let result = QuoteService::new(&mut self.store, &self.audit).delete(&key);
        match result {
            Ok(removed) => {
                let saved = self.saved_message();
                self.prompter.say(saved)?;
                self.prompter.say(format!("Deleted: {}", removed))
            }
            Err(e) if e.is_not_found() => self.prompter.say("Quote not found."),
            Err(e) => self.report_save_error(&e),
        }
    }

    fn edit(&mut self) -> QuillResult<()> {
        let Some(key) = self.prompter.ask("Enter index or slug to edit: ")? else {
            return Ok(());
        };
        let Some(current) = self.store.find(&key).cloned() else {
            return self.prompter.say("Quote not found.");
        };

        self.prompter.say(format!("\nEditing: {}\n", current))?;

        let mut update = QuoteUpdate::default();

        let Some(body) = self.prompter.ask("New quote (leave blank to keep): ")? else {
            return Ok(());
        };
        update.body = Some(body).filter(|s| !s.is_empty());

        let Some(author) = self.prompter.ask("New author (leave blank to keep): ")? else {
            return Ok(());
        };
        update.author = Some(author).filter(|s| !s.is_empty());

        let Some(context) = self.prompter.ask("New context (leave blank to keep): ")? else {
            return Ok(());
        };
        update.context = Some(context).filter(|s| !s.is_empty());

        let Some(tag_input) = self
            .prompter
            .ask("New tags comma-separated (leave blank to keep): ")?
        else {
            return Ok(());
        };
        if !tag_input.is_empty() {
            let tags = self.collect_tags(&tag_input)?;
            if tags.is_empty() {
                self.prompter.say("No valid tags given, keeping existing tags.")?;
            } else {
                update.tags = Some(tags);
            }
        }

        let result = QuoteService::new(&mut self.store, &self.audit).edit(&key, update);
        match result {
            Ok(outcome) if outcome.changed => {
                let saved = self.saved_message();
                self.prompter.say(saved)?;
                self.prompter.say(format!("Updated: {}", outcome.quote))
            }
            Ok(_) => self.prompter.say("No changes made."),
            Err(e) if e.is_not_found() => self.prompter.say("Quote not found."),
            Err(e @ QuillError::Storage(_)) => self.report_save_error(&e),
            Err(e) => self.prompter.say(format!("{}. Cancelled.", e)),
        }
    }

    fn export(&mut self) -> QuillResult<()> {
        let Some(format_input) = self.prompter.ask("Format (json/txt): ")? else {
            return Ok(());
        };
        let format = match ExportFormat::parse(&format_input) {
            Ok(format) => format,
            Err(e) => return self.prompter.say(e.to_string()),
        };

        let encoded = match format {
            ExportFormat::Json => match self.prompter.confirm("Export encoded? (y/n): ")? {
                Some(encoded) => encoded,
                None => return Ok(()),
            },
            ExportFormat::Text => false,
        };

        match export_quotes(&self.store, &self.paths, format, encoded) {
            Ok(output) => self
                .prompter
                .say(format!("Exported to {}", output.display())),
            Err(e) => self.prompter.say(format!("Error exporting quotes: {}", e)),
        }
    }

    fn raw(&mut self) -> QuillResult<()> {
        match self.store.raw_preview(RAW_PREVIEW_LINES) {
            Ok(preview) => {
                let output = format_raw_preview(self.store.path(), preview.as_ref());
                self.prompter.print(&output)
            }
            Err(e) => self.prompter.say(format!("Error reading quote file: {}", e)),
        }
    }

    fn history(&mut self) -> QuillResult<()> {
        match self.audit.recent(HISTORY_ENTRIES) {
            Ok(entries) => {
                let output = format_history(&entries);
                self.prompter.print(&output)
            }
            Err(e) => self.prompter.say(format!("Error reading history: {}", e)),
        }
    }

    fn write(&mut self) -> QuillResult<()> {
        let result = QuoteService::new(&mut self.store, &self.audit).save();
        match result {
            Ok(()) => {
                let saved = self.saved_message();
                self.prompter.say(saved)
            }
            Err(e) => self.report_save_error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slug;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_session(
        temp_dir: &TempDir,
        input: &str,
    ) -> (QuoteStore, String) {
        let paths = QuillPaths::new(temp_dir.path().join("quotes.json"));
        let store = QuoteStore::load(paths.quotes_file()).unwrap();

        let mut shell = Shell::new(
            store,
            paths.clone(),
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        );
        shell.run().unwrap();

        let store = QuoteStore::load(paths.quotes_file()).unwrap();
        let output = String::from_utf8(shell.into_output().unwrap()).unwrap();
        (store, output)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("a"), Some(Command::Add));
        assert_eq!(Command::parse(" LIST "), Some(Command::List));
        assert_eq!(Command::parse("x"), Some(Command::Export));
        assert_eq!(Command::parse("?"), Some(Command::Help));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("hi"), Some(Command::History));
        assert_eq!(Command::parse("h"), Some(Command::Help));
        assert_eq!(Command::parse(""), None);
        assert_eq!(
            Command::parse("dance"),
            Some(Command::Unknown("dance".into()))
        );
    }

    #[test]
    fn test_add_then_list() {
        let temp_dir = TempDir::new().unwrap();
        let (store, output) = run_session(&temp_dir, "a\nHello\n\nA\n\n\nl\nq\n");

        assert_eq!(store.len(), 1);
        assert_eq!(store.quotes()[0].slug().as_str(), "185f8db32271");
        assert!(output.contains("Creating new quote file"));
        assert!(output.contains("Added: \"Hello\" - A [no tags] (slug: 185f8db32271)"));
        assert!(output.contains(" 1. \"Hello\" - A [no tags]"));
        assert!(!output.contains("Goodbye!"));
    }

    #[test]
    fn test_add_multiline_with_tags() {
        let temp_dir = TempDir::new().unwrap();
        let (store, output) = run_session(
            &temp_dir,
            "add\nline one\nline two\n\nAuthor\nsome context\nbook, podcast, MOVIE\nq\n",
        );

        let quote = &store.quotes()[0];
        assert_eq!(quote.body(), "line one\nline two");
        assert_eq!(quote.context(), "some context");
        assert_eq!(quote.tags(), &[Tag::Book, Tag::Movie]);
        assert!(output.contains("Warning: 'podcast' is not a valid tag, skipping"));
    }

    #[test]
    fn test_add_cancelled_on_blank_author() {
        let temp_dir = TempDir::new().unwrap();
        let (store, output) = run_session(&temp_dir, "a\nHello\n\n\nq\n");

        assert!(store.is_empty());
        assert!(output.contains("Author cannot be empty. Cancelled."));
        assert!(!temp_dir.path().join("quotes.json").exists());
    }

    #[test]
    fn test_add_cancelled_on_blank_body() {
        let temp_dir = TempDir::new().unwrap();
        let (store, output) = run_session(&temp_dir, "a\n\nq\n");

        assert!(store.is_empty());
        assert!(output.contains("Quote cannot be empty. Cancelled."));
    }

    #[test]
    fn test_end_of_input_mid_add_discards() {
        let temp_dir = TempDir::new().unwrap();
        let (store, output) = run_session(&temp_dir, "a\nHalf a quote\n\nSomeone\n");

        assert!(store.is_empty());
        assert!(output.ends_with("quote> "));
        assert!(!output.contains("Goodbye!"));
    }

    #[test]
    fn test_delete_by_position_shifts() {
        let temp_dir = TempDir::new().unwrap();
        let (store, output) = run_session(
            &temp_dir,
            "a\none\n\nA\n\n\na\ntwo\n\nB\n\n\nd\n1\nl\nq\n",
        );

        assert_eq!(store.len(), 1);
        assert_eq!(store.quotes()[0].body(), "two");
        assert!(output.contains("Deleted: \"one\" - A"));
        assert!(output.contains(" 1. \"two\" - B"));
    }

    #[test]
    fn test_delete_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let (_store, output) = run_session(&temp_dir, "d\n3\nq\n");
        assert!(output.contains("Quote not found."));
    }

    #[test]
    fn test_edit_body_and_keep_rest() {
        let temp_dir = TempDir::new().unwrap();
        let (store, output) = run_session(
            &temp_dir,
            "a\nHello\n\nA\nctx\nlyric\ne\n185f8db32271\nHello there\n\n\n\nq\n",
        );

        let quote = &store.quotes()[0];
        assert_eq!(quote.body(), "Hello there");
        assert_eq!(quote.author(), "A");
        assert_eq!(quote.context(), "ctx");
        assert_eq!(quote.tags(), &[Tag::Lyric]);
        assert_eq!(quote.slug(), &Slug::from_body("Hello there"));
        assert!(output.contains("Updated: \"Hello there\""));
    }

    #[test]
    fn test_edit_invalid_tags_keep_existing() {
        let temp_dir = TempDir::new().unwrap();
        let (store, output) = run_session(
            &temp_dir,
            "a\nHello\n\nA\n\nfriend\ne\n1\n\n\n\nnonsense\nq\n",
        );

        assert_eq!(store.quotes()[0].tags(), &[Tag::Friend]);
        assert!(output.contains("No valid tags given, keeping existing tags."));
        assert!(output.contains("No changes made."));
    }

    #[test]
    fn test_search_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let (_store, output) = run_session(
            &temp_dir,
            "a\nHello world\n\nA\n\n\na\nOther\n\nB\n\n\ns\nhello\ns\nzzz\nq\n",
        );

        assert!(output.contains("=== Search Results for 'hello' (1) ==="));
        assert!(output.contains(" 1. \"Hello world\" - A"));
        assert!(output.contains("No quotes found matching 'zzz'"));
    }

    #[test]
    fn test_export_encoded() {
        let temp_dir = TempDir::new().unwrap();
        let (_store, output) = run_session(&temp_dir, "a\nHello\n\nA\n\n\nx\njson\ny\nq\n");

        let exported = temp_dir.path().join("quotes.encoded.json");
        assert!(output.contains(&format!("Exported to {}", exported.display())));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&exported).unwrap()).unwrap();
        assert_eq!(value[0]["quote"], "SGVsbG8=");
    }

    #[test]
    fn test_export_unknown_format() {
        let temp_dir = TempDir::new().unwrap();
        let (_store, output) = run_session(&temp_dir, "x\nxml\nq\n");
        assert!(output.contains("Unknown export format 'xml'"));
    }

    #[test]
    fn test_raw_before_and_after_save() {
        let temp_dir = TempDir::new().unwrap();
        let (_store, output) = run_session(&temp_dir, "r\na\nHello\n\nA\n\n\nr\nq\n");

        assert!(output.contains("No file exists yet."));
        assert!(output.contains("=== Raw File Content"));
        assert!(output.contains("\"quote\": \"SGVsbG8=\""));
    }

    #[test]
    fn test_unknown_and_blank_commands() {
        let temp_dir = TempDir::new().unwrap();
        let (store, output) = run_session(&temp_dir, "\nfoo\nh\nq\n");

        assert!(store.is_empty());
        assert_eq!(output.matches("Unknown command.").count(), 1);
        assert_eq!(output.matches(COMMAND_SUMMARY).count(), 2);
    }

    #[test]
    fn test_write_command_saves() {
        let temp_dir = TempDir::new().unwrap();
        let (_store, output) = run_session(&temp_dir, "w\nq\n");

        assert!(output.contains("Saved 0 quotes"));
        assert!(temp_dir.path().join("quotes.json").exists());
    }

    #[test]
    fn test_add_body_keeps_whitespace_lines() {
        let temp_dir = TempDir::new().unwrap();
        let (store, _output) = run_session(
            &temp_dir,
            "a\nfirst\n   \nsecond\n\nAuthor\nctx\n\nq\n",
        );

        let quote = &store.quotes()[0];
        assert_eq!(quote.body(), "first\n   \nsecond");
        assert_eq!(quote.author(), "Author");
        assert_eq!(quote.context(), "ctx");
    }

    #[test]
    fn test_history_lists_changes() {
        let temp_dir = TempDir::new().unwrap();
        let (_store, output) = run_session(
            &temp_dir,
            "hi\na\nHello\n\nA\n\n\nd\n1\nhistory\nq\n",
        );

        assert!(output.contains("No changes recorded yet."));
        assert!(output.contains("=== Recent Changes (2) ==="));
        assert!(output.contains("ADD    185f8db32271"));
        assert!(output.contains("DELETE 185f8db32271"));
    }

    #[test]
    fn test_audit_log_written() {
        let temp_dir = TempDir::new().unwrap();
        run_session(&temp_dir, "a\nHello\n\nA\n\n\nd\n1\nq\n");

        let audit = AuditLogger::new(temp_dir.path().join("quotes.audit.log"));
        assert_eq!(audit.entries().unwrap().len(), 2);
    }
}
