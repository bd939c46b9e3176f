//! CLI UI utilities for terminal output.
//!
//! This module provides colored status lines, spinners, and the tables used
//! to show search results and favorites.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::models::{Document, Favorite, ProviderKind, SearchResultSet};

/// Get the current terminal width.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Icon for a provider.
pub fn provider_icon(provider: &ProviderKind) -> &'static str {
    match provider {
        ProviderKind::OpenLibrary => "📚",
        ProviderKind::GoogleBooks => "🔎",
        ProviderKind::Other(_) => "📄",
    }
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
        Status::Favorite => "★",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
    Favorite,
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
        Status::Favorite => println!("{} {}", icon.yellow().bold(), msg),
    }
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Print search results header.
pub fn print_search_header(query: &str, result: &SearchResultSet, duration: Duration) {
    println!();
    println!(
        "{} Search results for: \"{}\"",
        status_icon(Status::Search).yellow().bold(),
        query.cyan().bold()
    );
    println!(
        "{} {} {} of ~{} books, page {} of {} in {:.2}s",
        "─".repeat(10).dimmed(),
        provider_icon(&result.provider),
        result.provider.to_string().green(),
        format_number(result.total).bold(),
        result.page,
        result.total_pages(),
        duration.as_secs_f64()
    );
    println!();
}

/// Format a number with commas.
pub fn format_number(n: usize) -> String {
    n.to_string()
        .chars()
        .rev()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect()
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    let mut current_width = 0;
    let mut end_idx = 0;
    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width - 3 {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

/// Table of search results; `is_favorite` marks bookmarked rows.
pub fn documents_table(documents: &[Document], is_favorite: impl Fn(&str) -> bool) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(terminal_width() as u16);
    table.set_header(vec!["", "Title", "Authors", "Year", "Editions", "Key"]);

    for doc in documents {
        let star = if is_favorite(&doc.key) { "★" } else { "" };
        let year = doc
            .first_publish_year
            .map(|y| y.to_string())
            .unwrap_or_default();
        let editions = doc
            .edition_count
            .map(|n| n.to_string())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(star),
            Cell::new(truncate_with_ellipsis(&doc.title, 50)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&doc.author_line(), 30)),
            Cell::new(year),
            Cell::new(editions),
            Cell::new(&doc.key),
        ]);
    }
    table
}

/// Table of favorites.
pub fn favorites_table(favorites: &[Favorite]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(terminal_width() as u16);
    table.set_header(vec!["#", "Title", "Authors", "Added", "Key"]);

    for (i, fav) in favorites.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(truncate_with_ellipsis(&fav.title, 50)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&fav.authors.join(", "), 30)),
            Cell::new(fav.added_at.format("%Y-%m-%d").to_string()),
            Cell::new(&fav.key),
        ]);
    }
    table
}

/// Loading spinner with a message.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(msg: &str) -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        if let Ok(style) =
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}")
        {
            pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that draws nothing (non-TTY or quiet output).
    pub fn hidden() -> Self {
        Self {
            pb: indicatif::ProgressBar::hidden(),
        }
    }

    /// Stop and erase the spinner.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
