//! MySQL DDL rendering.

use crate::error::RenderError;
use crate::schema::{Column, DefaultValue, Document, Table};

/// Render the whole document as a MySQL script.
///
/// Foreign key checks are switched off around the script, so tables can be
/// dropped and created in document order regardless of their references.
pub fn render_sql(doc: &Document) -> Result<String, RenderError> {
    let mut output = String::from("SET FOREIGN_KEY_CHECKS = 0;\n\n");

    for table in &doc.tables {
        tracing::debug!(table = %table.name, "rendering DDL");
        render_table(&mut output, table)?;
    }

    output.push_str("SET FOREIGN_KEY_CHECKS = 1;\n");
    Ok(output)
}

fn render_table(output: &mut String, table: &Table) -> Result<(), RenderError> {
    let name = quote_ident(&table.name);
    output.push_str(&format!("DROP TABLE IF EXISTS {};\n", name));
    output.push_str(&format!("CREATE TABLE {} (\n", name));

    let mut lines: Vec<String> = table.columns.iter().map(column_definition).collect();

    let pk: Vec<String> = table.primary_key().map(|c| quote_ident(&c.name)).collect();
    if !pk.is_empty() {
        lines.push(format!("  PRIMARY KEY ({})", pk.join(", ")));
    }

    for (column, fk) in table.foreign_keys() {
        lines.push(format!(
            "  CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}({})",
            quote_ident(&format!("fk_{}_{}", table.name, column.name)),
            quote_ident(&column.name),
            quote_ident(&fk.table),
            quote_ident(&fk.column),
        ));
    }

    for index in &table.indexes {
        if index.columns.is_empty() {
            return Err(RenderError::EmptyIndex {
                table: table.name.clone(),
                index: index.name.clone(),
            });
        }
        let columns: Vec<String> = index.columns.iter().map(|c| quote_ident(c)).collect();
        lines.push(format!(
            "  {} {} ({})",
            index.kind().keyword(),
            quote_ident(&index.name),
            columns.join(", ")
        ));
    }

    output.push_str(&lines.join(",\n"));
    output.push_str("\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4");
    if !table.comment.is_empty() {
        output.push_str(&format!(" COMMENT={}", quote_literal(&table.comment)));
    }
    output.push_str(";\n\n");
    Ok(())
}

fn column_definition(column: &Column) -> String {
    let mut line = format!("  {} {}", quote_ident(&column.name), column.typ);

    if column.auto_increment {
        line.push_str(" AUTO_INCREMENT");
    }
    if column.not_null {
        line.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default {
        line.push_str(" DEFAULT ");
        line.push_str(&format_default(default));
    }
    if !column.comment.is_empty() {
        line.push_str(" COMMENT ");
        line.push_str(&quote_literal(&column.comment));
    }

    line
}

/// Strings become quoted literals, everything else keeps its natural form.
pub fn format_default(value: &DefaultValue) -> String {
    match value {
        DefaultValue::String(s) => quote_literal(s),
        other => other.to_string(),
    }
}

/// Backtick-quote an identifier, doubling embedded backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Single-quote a string literal, escaping backslashes and quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}
