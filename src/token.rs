//! Classification of a single overlay argument.
//!
//! | form                          | meaning                                   |
//! |-------------------------------|-------------------------------------------|
//! | `a.b=VALUE`, `--set=a.b=VALUE`| guarded scalar (JSON, else raw string)    |
//! | `--set-json=a.b=JSON`         | strict JSON                               |
//! | `--set-from-file=a.b=PATH`    | document loaded from `PATH`               |
//! | `--set-from-fn=a.b=ID`        | value produced by registered factory `ID` |
//! | `--from-file=PATH`            | whole tree from a document                |
//! | `--from-fn=ID`                | whole tree from a registered factory      |
//!
//! `--set-from-py-fn=` and `--from-py-fn=` are accepted as aliases.

use std::fmt;
use std::path::PathBuf;

use crate::error::LayerfigError;
use crate::path::DotPath;

const SET: &str = "--set=";
const SET_JSON: &str = "--set-json=";
const SET_FROM_FILE: &str = "--set-from-file=";
const SET_FROM_FN: &str = "--set-from-fn=";
const SET_FROM_FN_ALIAS: &str = "--set-from-py-fn=";
const FROM_FILE: &str = "--from-file=";
const FROM_FN: &str = "--from-fn=";
const FROM_FN_ALIAS: &str = "--from-py-fn=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Assign { path: DotPath, value: String },
    AssignJson { path: DotPath, value: String },
    AssignFile { path: DotPath, file: PathBuf },
    AssignFn { path: DotPath, id: String },
    WholeFile { file: PathBuf },
    WholeFn { id: String },
}

impl Token {
    pub fn parse(arg: &str) -> Result<Token, LayerfigError> {
        if let Some(rest) = arg.strip_prefix(SET) {
            let (path, value) = split_assignment(rest)?;
            return Ok(Token::Assign { path, value: value.to_string() });
        }
        if let Some(rest) = arg.strip_prefix(SET_JSON) {
            let (path, value) = split_assignment(rest)?;
            return Ok(Token::AssignJson { path, value: value.to_string() });
        }
        if let Some(rest) = arg.strip_prefix(SET_FROM_FILE) {
            let (path, file) = split_assignment(rest)?;
            return Ok(Token::AssignFile { path, file: PathBuf::from(file) });
        }
        if let Some(rest) = arg
            .strip_prefix(SET_FROM_FN)
            .or_else(|| arg.strip_prefix(SET_FROM_FN_ALIAS))
        {
            let (path, id) = split_assignment(rest)?;
            return Ok(Token::AssignFn { path, id: id.to_string() });
        }
        if let Some(file) = arg.strip_prefix(FROM_FILE) {
            return Ok(Token::WholeFile { file: PathBuf::from(file) });
        }
        if let Some(id) = arg
            .strip_prefix(FROM_FN)
            .or_else(|| arg.strip_prefix(FROM_FN_ALIAS))
        {
            return Ok(Token::WholeFn { id: id.to_string() });
        }
        if arg.starts_with('-') {
            let flag = arg.split_once('=').map_or(arg, |(flag, _)| flag);
            return Err(LayerfigError::UnknownFlag { flag: flag.to_string() });
        }
        let (path, value) = split_assignment(arg)?;
        Ok(Token::Assign { path, value: value.to_string() })
    }

    /// The flag name used in error messages.
    pub fn flag(&self) -> &'static str {
        match self {
            Token::Assign { .. } => "--set",
            Token::AssignJson { .. } => "--set-json",
            Token::AssignFile { .. } => "--set-from-file",
            Token::AssignFn { .. } => "--set-from-fn",
            Token::WholeFile { .. } => "--from-file",
            Token::WholeFn { .. } => "--from-fn",
        }
    }

    pub fn is_whole_tree(&self) -> bool {
        matches!(self, Token::WholeFile { .. } | Token::WholeFn { .. })
    }
}

/// Canonical form: plain assignments render without `--set=` unless the
/// path starts with `-`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Assign { path, value } if path.to_string().starts_with('-') => {
                write!(f, "{SET}{path}={value}")
            }
            Token::Assign { path, value } => write!(f, "{path}={value}"),
            Token::AssignJson { path, value } => write!(f, "{SET_JSON}{path}={value}"),
            Token::AssignFile { path, file } => {
                write!(f, "{SET_FROM_FILE}{path}={}", file.display())
            }
            Token::AssignFn { path, id } => write!(f, "{SET_FROM_FN}{path}={id}"),
            Token::WholeFile { file } => write!(f, "{FROM_FILE}{}", file.display()),
            Token::WholeFn { id } => write!(f, "{FROM_FN}{id}"),
        }
    }
}

fn split_assignment(text: &str) -> Result<(DotPath, &str), LayerfigError> {
    let (key, value) = text.split_once('=').ok_or(LayerfigError::NotAnAssignment)?;
    Ok((DotPath::parse(key)?, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(dotted: &str) -> DotPath {
        DotPath::parse(dotted).unwrap()
    }

    #[test]
    fn bare_assignment() {
        assert_eq!(
            Token::parse("a.b=1").unwrap(),
            Token::Assign { path: p("a.b"), value: "1".into() }
        );
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        assert_eq!(
            Token::parse("url=postgres://h/db?x=1").unwrap(),
            Token::Assign { path: p("url"), value: "postgres://h/db?x=1".into() }
        );
    }

    #[test]
    fn empty_value_is_allowed() {
        assert_eq!(
            Token::parse("a=").unwrap(),
            Token::Assign { path: p("a"), value: String::new() }
        );
    }

    #[test]
    fn explicit_set_allows_dash_keys() {
        assert_eq!(
            Token::parse("--set=-v=2").unwrap(),
            Token::Assign { path: p("-v"), value: "2".into() }
        );
    }

    #[test]
    fn every_flag_form() {
        assert_eq!(
            Token::parse("--set-json=a=[1]").unwrap(),
            Token::AssignJson { path: p("a"), value: "[1]".into() }
        );
        assert_eq!(
            Token::parse("--set-from-file=db=conf/db.yaml").unwrap(),
            Token::AssignFile { path: p("db"), file: "conf/db.yaml".into() }
        );
        assert_eq!(
            Token::parse("--set-from-fn=db=presets:db").unwrap(),
            Token::AssignFn { path: p("db"), id: "presets:db".into() }
        );
        assert_eq!(
            Token::parse("--from-file=base.toml").unwrap(),
            Token::WholeFile { file: "base.toml".into() }
        );
        assert_eq!(
            Token::parse("--from-fn=presets:small").unwrap(),
            Token::WholeFn { id: "presets:small".into() }
        );
    }

    #[test]
    fn py_fn_aliases() {
        assert_eq!(
            Token::parse("--from-py-fn=x").unwrap(),
            Token::parse("--from-fn=x").unwrap()
        );
        assert_eq!(
            Token::parse("--set-from-py-fn=a=x").unwrap(),
            Token::parse("--set-from-fn=a=x").unwrap()
        );
    }

    #[test]
    fn unknown_flags_are_rejected() {
        for arg in ["--verbose", "-a.b=1", "--set-yaml=a=1", "--from-file"] {
            assert!(
                matches!(Token::parse(arg), Err(LayerfigError::UnknownFlag { .. })),
                "{arg}"
            );
        }
        match Token::parse("--nope=a=1") {
            Err(LayerfigError::UnknownFlag { flag }) => assert_eq!(flag, "--nope"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_equals_is_not_an_assignment() {
        assert!(matches!(Token::parse("a.b"), Err(LayerfigError::NotAnAssignment)));
        assert!(matches!(Token::parse("--set=a.b"), Err(LayerfigError::NotAnAssignment)));
        assert!(matches!(
            Token::parse("--set-from-fn=presets:db"),
            Err(LayerfigError::NotAnAssignment)
        ));
    }

    #[test]
    fn empty_key_segments_are_rejected() {
        for arg in ["=1", "a..b=1", "--set=.a=1"] {
            assert!(
                matches!(Token::parse(arg), Err(LayerfigError::InvalidPath { .. })),
                "{arg}"
            );
        }
    }

    #[test]
    fn display_is_canonical() {
        for arg in [
            "a.b=1",
            "--set=-v=2",
            "--set-json=a=[1]",
            "--set-from-file=db=conf/db.yaml",
            "--set-from-fn=db=presets:db",
            "--from-file=base.toml",
            "--from-fn=presets:small",
        ] {
            assert_eq!(Token::parse(arg).unwrap().to_string(), arg);
        }
        assert_eq!(Token::parse("--set=a=1").unwrap().to_string(), "a=1");
    }

    #[test]
    fn whole_tree_tokens() {
        assert!(Token::parse("--from-fn=x").unwrap().is_whole_tree());
        assert!(!Token::parse("a=1").unwrap().is_whole_tree());
    }
}
