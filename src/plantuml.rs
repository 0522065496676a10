//! Serializer for the PlantUML entity-relationship diagram.

use crate::schema::{Column, Document, Table};

/// Crow's foot notation: the referenced table has many owning rows.
const RELATION: &str = "||--o{";

/// Serialize a Document to PlantUML source.
pub fn render_plantuml(doc: &Document) -> String {
    let mut output = String::from("@startuml\nhide circle\nskinparam linetype ortho\n\n");

    for table in &doc.tables {
        serialize_entity(&mut output, table);
    }

    // Relationships, one per foreign key column
    for table in &doc.tables {
        for (_, fk) in table.foreign_keys() {
            output.push_str(&format!("{} {} {}\n", fk.table, RELATION, table.name));
        }
    }

    output.push_str("\n@enduml\n");
    output
}

fn serialize_entity(output: &mut String, table: &Table) {
    // The label is a PlantUML string, `\n` is kept literally for a line break.
    output.push_str(&format!(
        "entity {} as \"{}\\n[{}]\" {{\n",
        table.name,
        table.name,
        escape_label(&table.comment)
    ));

    for column in &table.columns {
        serialize_column(output, column);
    }

    output.push_str("}\n\n");
}

fn serialize_column(output: &mut String, column: &Column) {
    output.push_str("  ");
    if column.pk {
        output.push('+');
    }
    output.push_str(&format!("{} : {}", column.name, column.typ));

    if column.pk {
        output.push_str(" <<PK>>");
    }
    if column.fk.is_some() {
        output.push_str(" <<FK>>");
    }
    if !column.comment.is_empty() {
        output.push_str("  // ");
        output.push_str(&column.comment);
    }

    output.push('\n');
}

fn escape_label(text: &str) -> String {
    text.replace('"', "'")
}
