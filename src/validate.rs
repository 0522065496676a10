//! Optional consistency checks over a loaded schema.
//!
//! The renderers never call this; they render whatever the document says.
//! Callers that want guarantees about references and names run it first.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::openapi::schema_name;
use crate::schema::{Document, Table};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    #[error("duplicate table `{table}`")]
    DuplicateTable { table: String },
    #[error("table `{table}`: duplicate column `{column}`")]
    DuplicateColumn { table: String, column: String },
    #[error("table `{table}` has no columns")]
    NoColumns { table: String },
    #[error("table `{table}`: column `{column}` references missing table `{target}`")]
    MissingFkTable {
        table: String,
        column: String,
        target: String,
    },
    #[error("table `{table}`: column `{column}` references missing column `{target}.{target_column}`")]
    MissingFkColumn {
        table: String,
        column: String,
        target: String,
        target_column: String,
    },
    #[error("table `{table}`: index `{index}` has no columns")]
    EmptyIndex { table: String, index: String },
    #[error("table `{table}`: index `{index}` uses unknown column `{column}`")]
    UnknownIndexColumn {
        table: String,
        index: String,
        column: String,
    },
    #[error("table `{table}`: index `{index}` sets more than one of unique/fulltext/spatial")]
    ConflictingIndexFlags { table: String, index: String },
    #[error("tables `{first}` and `{second}` both map to OpenAPI schema `{schema}`")]
    SchemaNameCollision {
        first: String,
        second: String,
        schema: String,
    },
}

/// Check the document and return every problem found, in document order.
pub fn validate(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    let tables: HashMap<&str, &Table> = doc.tables.iter().map(|t| (t.name.as_str(), t)).collect();

    let mut seen_tables = HashSet::new();
    let mut schema_names: HashMap<String, &str> = HashMap::new();

    for table in &doc.tables {
        if !seen_tables.insert(table.name.as_str()) {
            issues.push(Issue::DuplicateTable {
                table: table.name.clone(),
            });
        } else if let Some(first) = schema_names.insert(schema_name(&table.name), &table.name) {
            issues.push(Issue::SchemaNameCollision {
                first: first.to_string(),
                second: table.name.clone(),
                schema: schema_name(&table.name),
            });
        }

        check_columns(table, &tables, &mut issues);
        check_indexes(table, &mut issues);
    }

    issues
}

fn check_columns(table: &Table, tables: &HashMap<&str, &Table>, issues: &mut Vec<Issue>) {
    if table.columns.is_empty() {
        issues.push(Issue::NoColumns {
            table: table.name.clone(),
        });
    }

    let mut seen = HashSet::new();
    for column in &table.columns {
        if !seen.insert(column.name.as_str()) {
            issues.push(Issue::DuplicateColumn {
                table: table.name.clone(),
                column: column.name.clone(),
            });
        }
    }

    for (column, fk) in table.foreign_keys() {
        match tables.get(fk.table.as_str()) {
            None => issues.push(Issue::MissingFkTable {
                table: table.name.clone(),
                column: column.name.clone(),
                target: fk.table.clone(),
            }),
            Some(target) if target.column(&fk.column).is_none() => {
                issues.push(Issue::MissingFkColumn {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    target: fk.table.clone(),
                    target_column: fk.column.clone(),
                })
            }
            Some(_) => {}
        }
    }
}

fn check_indexes(table: &Table, issues: &mut Vec<Issue>) {
    for index in &table.indexes {
        if index.columns.is_empty() {
            issues.push(Issue::EmptyIndex {
                table: table.name.clone(),
                index: index.name.clone(),
            });
        }
        for column in &index.columns {
            if table.column(column).is_none() {
                issues.push(Issue::UnknownIndexColumn {
                    table: table.name.clone(),
                    index: index.name.clone(),
                    column: column.clone(),
                });
            }
        }
        if index.has_conflicting_flags() {
            issues.push(Issue::ConflictingIndexFlags {
                table: table.name.clone(),
                index: index.name.clone(),
            });
        }
    }
}
