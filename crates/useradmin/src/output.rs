use crate::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;
use useradmin_core::{ActionOutcome, BulkRemoveOutcome, TableBody, UserRow, UsersTable};

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

/// Print a success message, or `{"success": true, ...}` in JSON mode
pub fn output_success(message: &str, extra: serde_json::Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let mut body = serde_json::json!({ "success": true, "message": message });
            if let (Some(obj), serde_json::Value::Object(more)) = (body.as_object_mut(), extra) {
                obj.extend(more);
            }
            if let Ok(json) = serde_json::to_string_pretty(&body) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => println!("{}", message),
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: error_code(err).to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

/// Stable code for scripts, taken from the innermost store error
fn error_code(err: &anyhow::Error) -> &'static str {
    use useradmin_core::{AdminError, ViewError};

    for cause in err.chain() {
        if let Some(ViewError::ActionNotAllowed(_)) = cause.downcast_ref::<ViewError>() {
            return "not_allowed";
        }
        if let Some(admin) = cause.downcast_ref::<AdminError>() {
            return match admin {
                AdminError::Unauthorized => "unauthorized",
                AdminError::Forbidden(_) => "forbidden",
                AdminError::NotFound(_) => "not_found",
                AdminError::InvalidInput(_) => "invalid_input",
                AdminError::Api { .. } => "api",
                AdminError::Http(_) => "http",
                AdminError::Parse(_) => "parse",
                AdminError::Io(_) => "io",
            };
        }
    }
    "error"
}

pub trait Displayable {
    fn display(&self) -> String;
}

const ID_HEADER: &str = "ID";

impl Displayable for UsersTable {
    fn display(&self) -> String {
        let mut lines = Vec::new();

        let rows = match &self.body {
            TableBody::Loading { columns, .. } => {
                lines.push(
                    vec!["..."; *columns]
                        .join("  ")
                        .dimmed()
                        .to_string(),
                );
                return lines.join("\n");
            }
            TableBody::Rows { rows } => rows,
        };

        // Widths are measured on plain text; color is applied after padding
        let mut header = vec![ID_HEADER.to_string()];
        header.extend(self.headers.iter().cloned());
        let cells: Vec<Vec<String>> = rows.iter().map(row_cells).collect();
        let widths: Vec<usize> = (0..header.len())
            .map(|col| {
                cells
                    .iter()
                    .map(|c| c[col].chars().count())
                    .chain(std::iter::once(header[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header_line: Vec<String> = header
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w).bold().to_string())
            .collect();
        lines.push(format!("    {}", header_line.join("  ")));

        for (row, cells) in rows.iter().zip(&cells) {
            let mark = if row.selected {
                "[x]".green().to_string()
            } else {
                "[ ]".dimmed().to_string()
            };
            let mut columns: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| pad(c, *w))
                .collect();
            columns[0] = columns[0].cyan().to_string();
            let actions: Vec<String> = row.actions.iter().map(|a| a.title.clone()).collect();
            lines.push(format!(
                "{} {}  {}",
                mark,
                columns.join("  "),
                actions.join(", ").dimmed()
            ));
        }

        if rows.is_empty() {
            lines.push("  (no users)".dimmed().to_string());
        }

        let switch = if self.include_temporary { "on" } else { "off" };
        let selected = rows.iter().filter(|r| r.selected).count();
        let mut footer = format!("{}: {}", self.temporary_label.dimmed(), switch);
        if self.remove_enabled {
            footer.push_str(&format!(
                "  {} {}",
                self.remove_title.red(),
                format!("({} selected)", selected).dimmed()
            ));
        }
        lines.push(String::new());
        lines.push(footer);

        lines.join("\n")
    }
}

fn row_cells(row: &UserRow) -> Vec<String> {
    vec![
        row.id.to_string(),
        row.name.clone(),
        row.email.clone(),
        row.administrator.clone(),
        row.disabled.clone(),
        row.expiration_time.clone(),
    ]
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

impl Displayable for ActionOutcome {
    fn display(&self) -> String {
        match self {
            ActionOutcome::Reload { path } => {
                format!("{} {}", "Session switched, reload:".green(), path)
            }
            ActionOutcome::Navigate { path } => path.clone(),
        }
    }
}

impl Displayable for BulkRemoveOutcome {
    fn display(&self) -> String {
        match self {
            BulkRemoveOutcome::NotOpen => "Nothing selected.".dimmed().to_string(),
            BulkRemoveOutcome::Cancelled => "Cancelled.".yellow().to_string(),
            BulkRemoveOutcome::Removed { ids } => {
                let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                format!("{} {}", "Removed users:".green(), ids.join(", ").cyan().bold())
            }
        }
    }
}
