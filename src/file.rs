//! Loading documents referenced by `--from-file=` and `--set-from-file=`.
//!
//! The format follows the extension (see [`DocumentFormat::from_path`]).
//! Documents are read eagerly; a missing file is an error, unlike config
//! discovery where absence is normal.

use std::path::Path;

use crate::error::LayerfigError;
use crate::types::DocumentFormat;
use crate::value::ConfigValue;

/// Read and parse the document at `path`.
pub fn load_document(path: &Path) -> Result<ConfigValue, LayerfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| LayerfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let format = DocumentFormat::from_path(path);
    let value = parse_document(&content, format).map_err(|source| LayerfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), ?format, kind = value.kind(), "loaded document");
    Ok(value)
}

type ParseFailure = Box<dyn std::error::Error + Send + Sync>;

fn parse_document(content: &str, format: DocumentFormat) -> Result<ConfigValue, ParseFailure> {
    Ok(match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Toml => toml::from_str(content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
    })
}
