//! Interactive list session.
//!
//! One `UsersView` lives for the whole session, so filters, selection and the
//! pending confirmation carry over between commands the way they do on the
//! settings page.

use crate::cli::OutputFormat;
use crate::commands::users::{ensure_listed, prompt_question};
use crate::output::{output_error, output_result, output_success};
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::debug;
use useradmin_core::{
    BulkRemoveOutcome, RemovePrompt, RowActionKind, UserId, UserStore, UsersView,
};

const HELP: &str = "\
Commands:
  show                     Print the table
  search [KEYWORD]         Filter by keyword (no keyword clears the filter)
  temporary [on|off]       Show or hide temporary users (no argument flips it)
  toggle ID...             Select or deselect users
  remove                   Ask to remove the selected users
  delete ID                Ask to delete a single user
  yes | no                 Answer the pending removal
  login ID                 Log in as a user (managers only)
  connections ID           Show the connections page of a user
  reload                   Fetch the users again
  help                     Show this help
  quit                     Leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Show,
    Search(String),
    Temporary(Option<bool>),
    Toggle(Vec<UserId>),
    Remove,
    Answer(bool),
    Delete(UserId),
    Action(RowActionKind, UserId),
    Reload,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let command = match verb.to_lowercase().as_str() {
            "show" | "ls" => Self::Show,
            "search" | "s" => Self::Search(rest.join(" ")),
            "temporary" | "temp" => Self::Temporary(match rest.first().copied() {
                None => None,
                Some("on") | Some("true") => Some(true),
                Some("off") | Some("false") => Some(false),
                Some(other) => return Err(anyhow!("Expected on or off, got '{}'", other)),
            }),
            "toggle" | "t" => {
                if rest.is_empty() {
                    return Err(anyhow!("toggle needs at least one user ID"));
                }
                Self::Toggle(rest.iter().map(|w| parse_id(w)).collect::<Result<_>>()?)
            }
            "remove" | "rm" => Self::Remove,
            "yes" | "y" => Self::Answer(true),
            "no" | "n" => Self::Answer(false),
            "delete" => Self::Delete(single_id(verb, &rest)?),
            "reload" => Self::Reload,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => match RowActionKind::from_key(other) {
                Some(kind) => Self::Action(kind, single_id(verb, &rest)?),
                None => return Err(anyhow!("Unknown command '{}'. Type 'help'.", other)),
            },
        };
        Ok(Some(command))
    }
}

fn parse_id(word: &str) -> Result<UserId> {
    word.parse::<UserId>()
        .with_context(|| format!("'{}' is not a user ID", word))
}

fn single_id(verb: &str, rest: &[&str]) -> Result<UserId> {
    match rest {
        [id] => parse_id(id),
        _ => Err(anyhow!("{} needs exactly one user ID", verb)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Browser<'a> {
    store: &'a dyn UserStore,
    view: UsersView,
    format: OutputFormat,
    /// Single-row delete waiting for an answer
    pending_delete: Option<UserId>,
}

impl<'a> Browser<'a> {
    pub fn new(store: &'a dyn UserStore, view: UsersView, format: OutputFormat) -> Self {
        Self {
            store,
            view,
            format,
            pending_delete: None,
        }
    }

    pub fn view(&self) -> &UsersView {
        &self.view
    }

    /// Read commands until `quit` or end of input. Failed commands are
    /// reported and the session goes on.
    pub fn run(&mut self, input: &mut dyn BufRead) -> Result<()> {
        self.show();
        let mut line = String::new();
        loop {
            eprint!("{} ", ">".cyan().bold());
            std::io::stderr().flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            let outcome = BrowseCommand::parse(&line).and_then(|command| match command {
                Some(command) => self.execute(command),
                None => Ok(Flow::Continue),
            });
            match outcome {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => output_error(&e, self.format),
            }
        }
    }

    pub fn execute(&mut self, command: BrowseCommand) -> Result<Flow> {
        debug!(?command, "browse command");
        match command {
            BrowseCommand::Show => self.show(),
            BrowseCommand::Search(keyword) => {
                self.view.set_keyword(keyword);
                self.show();
            }
            BrowseCommand::Temporary(include) => {
                let include = include.unwrap_or(!self.view.filters().include_temporary);
                self.view.set_include_temporary(include);
                self.show();
            }
            BrowseCommand::Toggle(ids) => {
                for id in ids {
                    self.view.toggle(id);
                }
                self.show();
            }
            BrowseCommand::Remove => {
                if !self.view.request_bulk_remove() {
                    return Err(anyhow!("Nothing selected. Use 'toggle ID' first."));
                }
                self.pending_delete = None;
                if let Some(prompt) = self.view.remove_prompt() {
                    let question = prompt_question(&prompt, self.view.translations());
                    eprintln!("{} {}", question.yellow(), "(yes/no)".dimmed());
                }
            }
            BrowseCommand::Answer(confirmed) => {
                if let Some(id) = self.pending_delete.take() {
                    return self.answer_delete(id, confirmed);
                }
                let outcome = self.view.resolve_bulk_remove(self.store, confirmed)?;
                output_result(&outcome, self.format);
                if let BulkRemoveOutcome::Removed { .. } = outcome {
                    self.show();
                }
            }
            BrowseCommand::Delete(id) => {
                if self.view.pending_removal().is_some() {
                    return Err(anyhow!("Answer the pending removal first"));
                }
                ensure_listed(&self.view, id)?;
                let prompt = RemovePrompt::single(self.view.collection_actions().endpoint());
                let question = prompt_question(&prompt, self.view.translations());
                eprintln!(
                    "{} {} {}",
                    question.yellow(),
                    id.to_string().cyan(),
                    "(yes/no)".dimmed()
                );
                self.pending_delete = Some(id);
            }
            BrowseCommand::Action(kind, id) => {
                let outcome = self.view.run_action(self.store, kind, id)?;
                output_result(&outcome, self.format);
                if kind == RowActionKind::Login {
                    // Our session now belongs to someone else
                    return Ok(Flow::Quit);
                }
            }
            BrowseCommand::Reload => {
                self.view.reload(self.store)?;
                self.show();
            }
            BrowseCommand::Help => println!("{}", HELP),
            BrowseCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn answer_delete(&mut self, id: UserId, confirmed: bool) -> Result<Flow> {
        if !confirmed {
            output_success("Cancelled.", serde_json::json!({ "removed": false }), self.format);
            return Ok(Flow::Continue);
        }
        self.view.remove_one(self.store, id)?;
        output_success(
            &format!("User {} deleted", id.to_string().cyan().bold()),
            serde_json::json!({ "removed": true, "id": id }),
            self.format,
        );
        self.show();
        Ok(Flow::Continue)
    }

    fn show(&self) {
        output_result(&self.view.table(), self.format);
    }
}

pub fn handle_browse(store: &dyn UserStore, view: UsersView, format: OutputFormat) -> Result<()> {
    let mut browser = Browser::new(store, view, format);
    let stdin = std::io::stdin();
    browser.run(&mut stdin.lock())
}
