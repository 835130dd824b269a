use crate::cli::OutputFormat;
use crate::output::{output_result, output_success};
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::debug;
use useradmin_core::{
    ActionOutcome, OperatorPrivilege, RemovePrompt, RowActionKind, Translations, UserId,
    UserStore, UsersView,
};

/// Look up the operator's privileges and fetch the collection
pub fn open_view(store: &dyn UserStore, translations: Translations) -> Result<UsersView> {
    let operator = store
        .current_session()
        .context("Failed to look up the current session")?;
    debug!(operator = %operator.id, manager = operator.is_manager(), "session resolved");

    let mut view =
        UsersView::new(OperatorPrivilege::from_session(&operator)).with_translations(translations);
    view.reload(store)?;
    Ok(view)
}

pub fn handle_list(
    view: &mut UsersView,
    search: Option<&str>,
    temporary: bool,
    format: OutputFormat,
) -> Result<()> {
    if let Some(keyword) = search {
        view.set_keyword(keyword);
    }
    view.set_include_temporary(temporary);

    output_result(&view.table(), format);
    Ok(())
}

pub fn handle_remove(
    store: &dyn UserStore,
    view: &mut UsersView,
    ids: &[i64],
    yes: bool,
    format: OutputFormat,
) -> Result<()> {
    for id in unique_ids(ids) {
        ensure_listed(view, id)?;
        view.toggle(id);
    }

    if !view.request_bulk_remove() {
        return Err(anyhow!("No users selected"));
    }

    let confirmed = match view.remove_prompt() {
        Some(prompt) if !yes => confirm(&prompt_question(&prompt, view.translations()))?,
        _ => true,
    };

    let outcome = view.resolve_bulk_remove(store, confirmed)?;
    output_result(&outcome, format);
    Ok(())
}

pub fn handle_delete(
    store: &dyn UserStore,
    view: &mut UsersView,
    id: i64,
    yes: bool,
    format: OutputFormat,
) -> Result<()> {
    let id = UserId(id);
    ensure_listed(view, id)?;

    let prompt = RemovePrompt::single(view.collection_actions().endpoint());
    if !yes && !confirm(&prompt_question(&prompt, view.translations()))? {
        output_success("Cancelled.", serde_json::json!({ "removed": false }), format);
        return Ok(());
    }

    view.remove_one(store, id)?;

    let message = format!("User {} deleted", id.to_string().cyan().bold());
    output_success(
        &message,
        serde_json::json!({ "removed": true, "id": id }),
        format,
    );
    Ok(())
}

pub fn handle_action(
    store: &dyn UserStore,
    view: &UsersView,
    kind: RowActionKind,
    id: i64,
    open: bool,
    format: OutputFormat,
) -> Result<()> {
    let outcome = view.run_action(store, kind, UserId(id))?;
    output_result(&outcome, format);
    if open {
        open_path(store, outcome.path())?;
    }
    Ok(())
}

pub fn handle_edit(
    store: &dyn UserStore,
    view: &UsersView,
    id: i64,
    open: bool,
    format: OutputFormat,
) -> Result<()> {
    let id = UserId(id);
    ensure_listed(view, id)?;

    let outcome = ActionOutcome::Navigate {
        path: view.collection_actions().edit_path(id),
    };
    output_result(&outcome, format);
    if open {
        open_path(store, outcome.path())?;
    }
    Ok(())
}

pub fn handle_create(
    store: &dyn UserStore,
    view: &UsersView,
    open: bool,
    format: OutputFormat,
) -> Result<()> {
    let outcome = ActionOutcome::Navigate {
        path: view.collection_actions().create_path().to_string(),
    };
    output_result(&outcome, format);
    if open {
        open_path(store, outcome.path())?;
    }
    Ok(())
}

/// Open an application route in the browser
pub fn open_path(store: &dyn UserStore, path: &str) -> Result<()> {
    let url = store
        .app_url(path)
        .ok_or_else(|| anyhow!("This backend has no web address to open {}", path))?;
    open::that(&url).with_context(|| format!("Failed to open {}", url))?;
    Ok(())
}

fn unique_ids(ids: &[i64]) -> Vec<UserId> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids.iter().copied().map(UserId) {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

pub(crate) fn ensure_listed(view: &UsersView, id: UserId) -> Result<()> {
    if view.users().iter().any(|u| u.id == id) {
        Ok(())
    } else {
        Err(anyhow!("User {} not found", id))
    }
}

pub fn prompt_question(prompt: &RemovePrompt, t: &Translations) -> String {
    if prompt.is_multiple() {
        let ids: Vec<String> = prompt.item_ids.iter().map(|id| id.to_string()).collect();
        format!("{} ({})", t.get("sharedRemoveConfirmMultiple"), ids.join(", "))
    } else {
        t.get("sharedRemoveConfirm").to_string()
    }
}

/// Ask on stderr and read the answer from stdin. End of input counts as no.
fn confirm(question: &str) -> Result<bool> {
    let stdin = std::io::stdin();
    confirm_with(question, &mut stdin.lock(), &mut std::io::stderr())
}

fn confirm_with(question: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<bool> {
    write!(out, "{} [y/N] ", question)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
