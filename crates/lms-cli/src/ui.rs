use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub color: bool,
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let is_tty = std::io::stderr().is_terminal() && std::io::stdout().is_terminal();
    let color = is_tty && !flags.quiet && std::env::var_os("NO_COLOR").is_none();

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = UI_PREFS.set(UiPrefs {
        color,
        table_color: color && flags.format == OutputFormat::Table,
        progress: is_tty && !flags.quiet && flags.format != OutputFormat::Json,
        term_width,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        color: false,
        table_color: false,
        progress: false,
        term_width: None,
    })
}

/// Red when color is enabled.
pub fn urgent(text: &str) -> String {
    if prefs().color {
        format!("\u{1b}[31m{text}\u{1b}[0m")
    } else {
        text.to_string()
    }
}
