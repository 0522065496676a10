//! In-memory schema model shared by every renderer.
//!
//! Built once by [`crate::parser::load`] and only ever read afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Document {
    pub database: DatabaseInfo,
    pub tables: Vec<Table>,
}

/// Document-level metadata, only used to title the artifacts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseInfo {
    pub name: String,
    pub version: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Table {
    pub name: String,
    pub comment: String,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub pk: bool,
    #[serde(alias = "notNull")]
    pub not_null: bool,
    #[serde(alias = "autoIncrement")]
    pub auto_increment: bool,
    pub default: Option<DefaultValue>,
    pub comment: String,
    pub fk: Option<ForeignKey>,
}

/// Reference to another table's column. Never checked against the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
    pub fulltext: bool,
    pub spatial: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Plain,
    Unique,
    Fulltext,
    Spatial,
}

/// Open-typed scalar from the `default` key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
}

impl Table {
    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.pk)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&Column, &ForeignKey)> {
        self.columns
            .iter()
            .filter_map(|c| c.fk.as_ref().map(|fk| (c, fk)))
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl Index {
    /// Resolve the kind from the flags. When several flags are set the
    /// first of `unique`, `fulltext`, `spatial` wins.
    pub fn kind(&self) -> IndexKind {
        if self.unique {
            IndexKind::Unique
        } else if self.fulltext {
            IndexKind::Fulltext
        } else if self.spatial {
            IndexKind::Spatial
        } else {
            IndexKind::Plain
        }
    }

    pub fn has_conflicting_flags(&self) -> bool {
        [self.unique, self.fulltext, self.spatial]
            .iter()
            .filter(|f| **f)
            .count()
            > 1
    }
}

impl IndexKind {
    pub fn keyword(self) -> &'static str {
        match self {
            IndexKind::Plain => "INDEX",
            IndexKind::Unique => "UNIQUE INDEX",
            IndexKind::Fulltext => "FULLTEXT INDEX",
            IndexKind::Spatial => "SPATIAL INDEX",
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Bool(b) => write!(f, "{}", b),
            DefaultValue::Integer(n) => write!(f, "{}", n),
            DefaultValue::Unsigned(n) => write!(f, "{}", n),
            DefaultValue::Float(x) => write!(f, "{}", x),
            DefaultValue::String(s) => f.write_str(s),
        }
    }
}
