use crate::schema::Document;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Schema document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Invalid schema document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Decode a schema document from raw bytes.
pub fn load(bytes: &[u8]) -> Result<Document, ParseError> {
    let source = std::str::from_utf8(bytes)?;
    load_str(source)
}

pub fn load_str(source: &str) -> Result<Document, ParseError> {
    // An empty file deserializes to unit rather than a mapping.
    if source.trim().is_empty() {
        return Ok(Document::default());
    }
    let document: Document = serde_yaml::from_str(source)?;
    tracing::debug!(
        database = %document.database.name,
        tables = document.tables.len(),
        "loaded schema document"
    );
    Ok(document)
}
