//! Shared helpers for command handlers.

use serde::Serialize;

use encore_core::Page;

use crate::cli::{GlobalOpts, OutputFormat};

/// A resource identifier paired with its URL, for `url` subcommands.
#[derive(Debug, Serialize)]
pub struct ResourceUrl {
    pub id: String,
    pub url: String,
}

/// Summary line printed under table listings.
pub fn page_footer<T>(page: &Page<T>) -> String {
    format!(
        "page {} of {} ({} total)",
        page.page,
        page.page_count(),
        page.total
    )
}

/// Footer goes to stderr so piped table output stays clean.
pub fn print_page_footer<T>(page: &Page<T>, global: &GlobalOpts) {
    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        eprintln!("{}", page_footer(page));
    }
}

pub fn opt<T: ToString>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}
