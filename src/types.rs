use std::path::Path;

/// How whole-tree tokens (`--from-file=`, `--from-fn=`) are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WholeTree {
    /// Only as the first argument, where the document replaces the empty
    /// starting tree. Anywhere else is an error.
    #[default]
    FirstOnly,
    /// At any position; the document is merged over what came before.
    MergeAnywhere,
}

/// Serialization format of a document loaded from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from the file extension. Anything that is not `.json`
    /// or `.toml` is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => DocumentFormat::Json,
            Some("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Yaml,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.TOML")), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("conf")), DocumentFormat::Yaml);
    }
}
