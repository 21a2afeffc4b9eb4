use std::error::Error;

use crossterm::style::Stylize;

/// Severity of a status line. Only affects colour; plain output is identical
/// for both kinds.
#[derive(Debug, Clone, Copy)]
pub(crate) enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    pub(crate) fn paint(self, text: &str, colored: bool) -> String {
        if !colored {
            return text.to_string();
        }
        match self {
            StatusKind::Info => text.green().to_string(),
            StatusKind::Error => text.red().to_string(),
        }
    }
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &(dyn Error + 'static)) -> String {
    let mut cause = err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}
