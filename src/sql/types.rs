//! SQL column type to OpenAPI type mapping.

/// OpenAPI primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Integer,
    String,
    Boolean,
}

/// OpenAPI `format` qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFormat {
    Int64,
    DateTime,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedType {
    pub base: BaseType,
    pub format: Option<TypeFormat>,
    /// 0 when the type carries no length.
    pub max_length: u32,
}

impl BaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            BaseType::Integer => "integer",
            BaseType::String => "string",
            BaseType::Boolean => "boolean",
        }
    }
}

impl TypeFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFormat::Int64 => "int64",
            TypeFormat::DateTime => "date-time",
            TypeFormat::Date => "date",
        }
    }
}

impl MappedType {
    const fn new(base: BaseType, format: Option<TypeFormat>, max_length: u32) -> Self {
        Self {
            base,
            format,
            max_length,
        }
    }

    /// Format as a plain string, empty when there is none.
    pub fn format_str(&self) -> &'static str {
        self.format.map(TypeFormat::as_str).unwrap_or("")
    }
}

/// Map a raw column type such as `varchar(255)` to its OpenAPI shape.
///
/// Matching is case-insensitive and ordered; unknown types fall back to
/// a plain string, so this never fails.
pub fn map_type(sql_type: &str) -> MappedType {
    let lower = sql_type.to_lowercase();

    if lower.starts_with("bigint") {
        return MappedType::new(BaseType::Integer, Some(TypeFormat::Int64), 0);
    }
    if lower.starts_with("int") {
        return MappedType::new(BaseType::Integer, None, 0);
    }
    if lower.starts_with("varchar") {
        return MappedType::new(BaseType::String, None, parse_length(&lower));
    }

    match lower.as_str() {
        "text" => MappedType::new(BaseType::String, None, 0),
        "datetime" => MappedType::new(BaseType::String, Some(TypeFormat::DateTime), 0),
        "date" => MappedType::new(BaseType::String, Some(TypeFormat::Date), 0),
        "boolean" => MappedType::new(BaseType::Boolean, None, 0),
        _ => MappedType::new(BaseType::String, None, 0),
    }
}

/// Parenthesized length, e.g. `255` in `varchar(255)`.
fn parse_length(typ: &str) -> u32 {
    let Some(start) = typ.find('(') else {
        return 0;
    };
    let rest = &typ[start + 1..];
    let Some(end) = rest.find(')') else {
        return 0;
    };
    rest[..end].parse().unwrap_or(0)
}
