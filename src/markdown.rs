//! Markdown reference document, one section per table.

use crate::measure::{column_widths, pad_to};
use crate::schema::{Column, Document, Table};

const HEADERS: [&str; 7] = ["Column", "Type", "PK", "FK", "NOT NULL", "DEFAULT", "Comment"];
const YES: &str = "○";
const NO: &str = "-";

pub fn render_markdown(doc: &Document) -> String {
    let mut output = format!("# {}\n\n", doc.database.name);

    for table in &doc.tables {
        render_table(&mut output, table);
    }

    output
}

fn render_table(output: &mut String, table: &Table) {
    if table.comment.is_empty() {
        output.push_str(&format!("## {}\n\n", table.name));
    } else {
        output.push_str(&format!("## {} ({})\n\n", table.name, table.comment));
    }

    let mut rows: Vec<Vec<String>> = vec![HEADERS.iter().map(|h| h.to_string()).collect()];
    rows.extend(table.columns.iter().map(column_row));

    // Keep every delimiter cell at least three dashes wide.
    let widths: Vec<usize> = column_widths(&rows).into_iter().map(|w| w.max(3)).collect();

    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad_to(cell, *width))
            .collect();
        output.push_str(&format!("| {} |\n", cells.join(" | ")));

        if i == 0 {
            let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
            output.push_str(&format!("|{}|\n", dashes.join("|")));
        }
    }

    output.push('\n');
}

fn column_row(column: &Column) -> Vec<String> {
    vec![
        escape_cell(&column.name),
        escape_cell(&column.typ),
        marker(column.pk).to_string(),
        column
            .fk
            .as_ref()
            .map(|fk| escape_cell(&format!("{}.{}", fk.table, fk.column)))
            .unwrap_or_else(|| NO.to_string()),
        marker(column.not_null).to_string(),
        column
            .default
            .as_ref()
            .map(|d| escape_cell(&d.to_string()))
            .unwrap_or_else(|| NO.to_string()),
        escape_cell(&column.comment),
    ]
}

fn marker(flag: bool) -> &'static str {
    if flag { YES } else { NO }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
