//! OpenAPI component schemas generated from the table definitions.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::RenderError;
use crate::schema::{Column, Document, Table};
use crate::sql::map_type;

pub const OPENAPI_VERSION: &str = "3.0.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    /// Always empty, routes are not generated.
    pub paths: IndexMap<String, serde_json::Value>,
    pub components: Components,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Components {
    pub schemas: IndexMap<String, ComponentSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSchema {
    #[serde(rename = "type")]
    pub typ: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub properties: IndexMap<String, Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "x-table-name", skip_serializing_if = "String::is_empty")]
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub typ: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    #[serde(rename = "maxLength", skip_serializing_if = "is_zero")]
    pub max_length: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "x-primary-key", skip_serializing_if = "is_false")]
    pub primary_key: bool,
    #[serde(rename = "x-auto-increment", skip_serializing_if = "is_false")]
    pub auto_increment: bool,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Build the OpenAPI document for every table in the schema.
///
/// Two tables with the same schema identifier collide and the later one
/// wins; see [`crate::validate`] for detecting that up front.
pub fn render_openapi(doc: &Document) -> OpenApiDocument {
    let mut schemas = IndexMap::new();
    for table in &doc.tables {
        tracing::debug!(table = %table.name, "rendering OpenAPI schema");
        schemas.insert(schema_name(&table.name), component_schema(table));
    }

    OpenApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: doc.database.name.clone(),
            version: format!("{:.1}", doc.database.version),
        },
        paths: IndexMap::new(),
        components: Components { schemas },
    }
}

fn component_schema(table: &Table) -> ComponentSchema {
    ComponentSchema {
        typ: "object",
        description: table.comment.clone(),
        properties: table
            .columns
            .iter()
            .map(|c| (c.name.clone(), property(c)))
            .collect(),
        required: table
            .columns
            .iter()
            .filter(|c| c.not_null)
            .map(|c| c.name.clone())
            .collect(),
        table_name: table.name.clone(),
    }
}

fn property(column: &Column) -> Property {
    let mapped = map_type(&column.typ);
    Property {
        typ: mapped.base.as_str(),
        format: mapped.format.map(|f| f.as_str()),
        max_length: mapped.max_length,
        description: column.comment.clone(),
        primary_key: column.pk,
        auto_increment: column.auto_increment,
    }
}

/// Schema identifier for a table: the name with its first letter uppercased.
pub fn schema_name(table: &str) -> String {
    let mut chars = table.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl OpenApiDocument {
    pub fn to_yaml(&self) -> Result<String, RenderError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::load_str;

    const SHOP: &str = r#"
database: { name: Shop, version: 1.0 }
tables:
  - name: users
    comment: users table
    columns:
      - { name: id, type: bigint, pk: true, auto_increment: true, not_null: true }
      - { name: name, type: varchar(100), not_null: true, comment: display name }
      - { name: created_at, type: datetime }
"#;

    #[test]
    fn test_envelope() {
        let api = render_openapi(&load_str(SHOP).unwrap());
        assert_eq!(api.openapi, "3.0.0");
        assert_eq!(api.info.title, "Shop");
        assert_eq!(api.info.version, "1.0");
        assert!(api.paths.is_empty());
    }

    #[test]
    fn test_users_schema() {
        let api = render_openapi(&load_str(SHOP).unwrap());
        let users = &api.components.schemas["Users"];
        assert_eq!(users.typ, "object");
        assert_eq!(users.description, "users table");
        assert_eq!(users.table_name, "users");
        assert_eq!(users.required, vec!["id", "name"]);

        let id = &users.properties["id"];
        assert_eq!((id.typ, id.format), ("integer", Some("int64")));
        assert!(id.primary_key && id.auto_increment);

        let name = &users.properties["name"];
        assert_eq!((name.typ, name.format, name.max_length), ("string", None, 100));
        assert_eq!(name.description, "display name");

        let created = &users.properties["created_at"];
        assert_eq!(created.format, Some("date-time"));

        let order: Vec<&str> = users.properties.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["id", "name", "created_at"]);
    }

    #[test]
    fn test_required_only_lists_not_null() {
        let input = r#"
tables:
  - name: t
    columns:
      - { name: id, type: int, pk: true }
      - { name: name, type: text, not_null: true }
"#;
        let api = render_openapi(&load_str(input).unwrap());
        assert_eq!(api.components.schemas["T"].required, vec!["name"]);
    }

    #[test]
    fn test_yaml_output_omits_empty_fields() {
        let yaml = render_openapi(&load_str(SHOP).unwrap()).to_yaml().unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        let name = &value["components"]["schemas"]["Users"]["properties"]["name"];
        assert_eq!(name["type"].as_str(), Some("string"));
        assert_eq!(name["maxLength"].as_u64(), Some(100));
        assert!(name.get("format").is_none());
        assert!(name.get("x-primary-key").is_none());

        let id = &value["components"]["schemas"]["Users"]["properties"]["id"];
        assert_eq!(id["x-primary-key"].as_bool(), Some(true));
        assert!(id.get("maxLength").is_none());

        assert!(yaml.contains("x-table-name: users"));
        assert_eq!(value["info"]["version"].as_str(), Some("1.0"));
        assert!(value["paths"].as_mapping().is_some_and(|m| m.is_empty()));
    }

    #[test]
    fn test_json_output() {
        let json = render_openapi(&load_str(SHOP).unwrap()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["openapi"], "3.0.0");
        assert_eq!(value["components"]["schemas"]["Users"]["required"][1], "name");
    }

    #[test]
    fn test_schema_name() {
        assert_eq!(schema_name("users"), "Users");
        assert_eq!(schema_name("order_items"), "Order_items");
        assert_eq!(schema_name("ähnlich"), "Ähnlich");
        assert_eq!(schema_name(""), "");
    }

    #[test]
    fn test_colliding_names_later_wins() {
        let input = r#"
tables:
  - { name: users, comment: first }
  - { name: Users, comment: second }
"#;
        let api = render_openapi(&load_str(input).unwrap());
        assert_eq!(api.components.schemas.len(), 1);
        assert_eq!(api.components.schemas["Users"].description, "second");
    }

    #[test]
    fn test_idempotent() {
        let doc = load_str(SHOP).unwrap();
        assert_eq!(
            render_openapi(&doc).to_yaml().unwrap(),
            render_openapi(&doc).to_yaml().unwrap()
        );
    }
}
