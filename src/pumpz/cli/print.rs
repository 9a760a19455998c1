use colored::Colorize;
use pumpz::api::{CmdMessage, MessageLevel};
use pumpz::commands::sort::SortState;
use pumpz::commands::view::TableView;
use pumpz::model::{Column, Record};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CELL_WIDTH: usize = 24;
const COLUMN_GAP: &str = "  ";
const ASC_MARKER: &str = "▲";
const DESC_MARKER: &str = "▼";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn header_label(column: Column, sort: &SortState) -> String {
    match sort {
        SortState::Ascending(key) if key.column() == Some(column) => {
            format!("{} {}", column.label(), ASC_MARKER)
        }
        SortState::Descending(key) if key.column() == Some(column) => {
            format!("{} {}", column.label(), DESC_MARKER)
        }
        _ => column.label().to_string(),
    }
}

/// Renders the visible page as an aligned table, followed by the match counts.
pub(super) fn print_table(view: &TableView, sort: &SortState) {
    if view.is_empty() {
        println!("{}", "No pumps found matching your search criteria".dimmed());
        print_summary(view);
        return;
    }

    let mut headers = vec!["ID".to_string()];
    headers.extend(Column::ALL.iter().map(|c| header_label(*c, sort)));

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|record| {
            let mut cells = vec![record.id.to_string()];
            cells.extend(Column::ALL.iter().map(|c| record.get(*c).to_string()));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(headers[i].width()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let header_line = format_line(&headers, &widths);
    println!("{}", header_line.bold());
    for row in &rows {
        println!("{}", format_line(row, &widths));
    }
    println!();
    print_summary(view);
}

fn print_summary(view: &TableView) {
    println!(
        "{}",
        format!("Showing {} of {} pumps", view.filtered_count, view.total_count).dimmed()
    );
    if view.total_pages > 0 {
        println!(
            "{}",
            format!(
                "Page {} of {} ({} per page)",
                view.current_page, view.total_pages, view.page_size
            )
            .dimmed()
        );
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_to_width(&truncate_to_width(cell, *width), *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

/// Prints the edit buffer as a label/value form.
pub(super) fn print_record(record: &Record) {
    let label_width = Column::ALL
        .iter()
        .map(|c| c.label().width())
        .max()
        .unwrap_or(0);

    println!("{} {}", "Edit Pump".bold(), record.id.to_string().yellow());
    for column in Column::ALL {
        let value = record.get(column);
        let shown = if value.is_absent() {
            "-".dimmed().to_string()
        } else {
            value.to_string()
        };
        println!(
            "  {}  {}  {}",
            pad_to_width(column.label(), label_width),
            format!("[{}]", column.key()).dimmed(),
            shown
        );
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
