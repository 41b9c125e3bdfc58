use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayerfigError {
    #[error("Invalid argument #{index} '{token}': {source}\n  in: {}", .args.join(" "))]
    InvalidArgument {
        index: usize,
        token: String,
        args: Vec<String>,
        source: Box<LayerfigError>,
    },

    #[error("Not an assignment: expected `key.path=value`")]
    NotAnAssignment,

    #[error(
        "Unrecognized flag '{flag}'. Only --set, --set-json, --set-from-file, --set-from-fn, \
         --from-file and --from-fn may start with '-'; use `--set=-key=value` for keys starting with '-'"
    )]
    UnknownFlag { flag: String },

    #[error("Invalid key path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("Invalid JSON value '{text}': {source}")]
    InvalidJson {
        text: String,
        source: serde_json::Error,
    },

    #[error("{flag} is only allowed as the first argument")]
    MisplacedWholeTree { flag: &'static str },

    #[error("{flag} needs an object at the top level, got {kind}")]
    NotAnObject {
        flag: &'static str,
        kind: &'static str,
    },

    #[error("Value nests {depth} levels deep (limit is {limit})")]
    TooDeep { depth: usize, limit: usize },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("Identifier '{0}' is already registered")]
    DuplicateIdentifier(String),

    #[error("Invalid identifier '{id}': {reason}")]
    InvalidIdentifier { id: String, reason: &'static str },

    #[error("Unknown key '{key}'")]
    UnknownKey { key: String },

    #[error("Unknown keys in configuration: {}", join_keys(.0))]
    UnknownKeys(Vec<LayerfigError>),

    #[error("Cannot bind configuration: {reason}")]
    Bind { reason: String },

    #[error("Cannot convert value to a configuration tree: {reason}")]
    Unbind { reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("Overlay replaces the whole tree and cannot be written as key assignments")]
    UnrepresentableRoot,
}

impl LayerfigError {
    /// The underlying error, with any argument context peeled off.
    pub fn cause(&self) -> &LayerfigError {
        match self {
            LayerfigError::InvalidArgument { source, .. } => source.cause(),
            other => other,
        }
    }

    /// Attach the argument that caused this error.
    pub(crate) fn at_argument<S: AsRef<str>>(self, index: usize, token: &str, args: &[S]) -> Self {
        LayerfigError::InvalidArgument {
            index,
            token: token.to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
            source: Box::new(self),
        }
    }
}

fn join_keys(errors: &[LayerfigError]) -> String {
    errors
        .iter()
        .map(|e| match e {
            LayerfigError::UnknownKey { key } => key.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_token_and_sequence() {
        let err = LayerfigError::NotAnAssignment.at_argument(1, "a", &["x=1", "a"]);
        let msg = err.to_string();
        assert!(msg.contains("#1"));
        assert!(msg.contains("'a'"));
        assert!(msg.contains("x=1 a"));
        assert!(matches!(err.cause(), LayerfigError::NotAnAssignment));
    }

    #[test]
    fn unknown_flag_suggests_set() {
        let err = LayerfigError::UnknownFlag { flag: "-a.b".into() };
        assert!(err.to_string().contains("--set=-key=value"));
    }

    #[test]
    fn unknown_keys_lists_each_key() {
        let err = LayerfigError::UnknownKeys(vec![
            LayerfigError::UnknownKey { key: "typo".into() },
            LayerfigError::UnknownKey { key: "database.typo".into() },
        ]);
        assert_eq!(
            err.to_string(),
            "Unknown keys in configuration: typo, database.typo"
        );
    }

    #[test]
    fn cause_of_plain_error_is_itself() {
        let err = LayerfigError::UnknownIdentifier("presets:small".into());
        assert!(matches!(err.cause(), LayerfigError::UnknownIdentifier(_)));
    }
}
