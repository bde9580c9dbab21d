// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use tonic::Status;

/// Human readable text for a failed call.
pub fn describe_status(status: &Status) -> String {
    if status.message().is_empty() {
        status.code().description().to_string()
    } else {
        status.message().to_string()
    }
}

/// Pretty JSON dump of a response message.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unable to render: {e}>"))
}

/// Render rows as a box-drawn table with a leading `(index)` column.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut columns: Vec<String> = Vec::with_capacity(headers.len() + 1);
    columns.push("(index)".to_string());
    columns.extend(headers.iter().map(|h| h.to_string()));

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    let indexed: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = Vec::with_capacity(columns.len());
            cells.push(i.to_string());
            cells.extend(row.iter().cloned());
            cells.resize(columns.len(), String::new());
            cells
        })
        .collect();

    for row in &indexed {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&border(&widths, '┌', '┬', '┐'));
    out.push_str(&line(&widths, &columns));
    out.push_str(&border(&widths, '├', '┼', '┤'));
    for row in &indexed {
        out.push_str(&line(&widths, row));
    }
    out.push_str(&border(&widths, '└', '┴', '┘'));
    out
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&middle.to_string()))
}

fn line(widths: &[usize], cells: &[String]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .zip(cells)
        .map(|(&w, cell)| format!(" {cell:<w$} "))
        .collect();
    format!("│{}│\n", padded.join("│"))
}
