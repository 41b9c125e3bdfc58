//! Clap adapter for layerfig.
//!
//! This module is the **optional integration layer** between layerfig's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`OverlayArgs`] collects every trailing argument, dashes included, so that
//! `--set=`, `--from-file=` and friends reach the overlay compiler untouched
//! instead of being rejected by clap as unknown flags. Flags the host program
//! declares itself must come before the first overlay argument.

use clap::Args;
use confique::Config;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::builder::LayerfigBuilder;
use crate::error::LayerfigError;
use crate::value::ConfigValue;

/// Clap-derived trailing overlay arguments.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[arg(short, long)]
///     verbose: bool,
///
///     #[command(flatten)]
///     overlay: OverlayArgs,
/// }
/// ```
#[derive(Debug, Clone, Default, Args)]
pub struct OverlayArgs {
    /// Configuration overrides, applied left to right: `key.path=VALUE`,
    /// `--set-json=PATH=JSON`, `--set-from-file=PATH=FILE`,
    /// `--set-from-fn=PATH=ID`, `--from-file=FILE`, `--from-fn=ID`.
    #[arg(value_name = "OVERLAY", trailing_var_arg = true, allow_hyphen_values = true)]
    pub overlay: Vec<String>,
}

impl OverlayArgs {
    /// Compile the collected arguments with `layerfig`'s settings.
    pub fn compile(&self, layerfig: &LayerfigBuilder) -> Result<ConfigValue, LayerfigError> {
        layerfig.compile(&self.overlay)
    }

    /// Compile and deserialize into `T`.
    pub fn parse<T: DeserializeOwned>(&self, layerfig: &LayerfigBuilder) -> Result<T, LayerfigError> {
        layerfig.parse(&self.overlay)
    }

    /// Compile into a confique config.
    pub fn load<C>(&self, layerfig: &LayerfigBuilder) -> Result<C, LayerfigError>
    where
        C: Config,
        C::Layer: for<'de> Deserialize<'de>,
    {
        layerfig.load(&self.overlay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Layerfig;
    use crate::fixtures::test::TestConfig;
    use clap::Parser;
    use serde_json::json;

    /// Wrapper so we can use `try_parse_from` on the flattened args.
    #[derive(Debug, Parser)]
    struct TestCli {
        #[arg(short, long)]
        verbose: bool,

        #[command(flatten)]
        overlay: OverlayArgs,
    }

    fn parse(args: &[&str]) -> TestCli {
        TestCli::try_parse_from(args).unwrap()
    }

    #[test]
    fn no_overlay_arguments() {
        let cli = parse(&["test"]);
        assert!(cli.overlay.overlay.is_empty());
        assert!(!cli.verbose);
    }

    #[test]
    fn bare_assignments() {
        let cli = parse(&["test", "a.b=1", "c=x"]);
        assert_eq!(cli.overlay.overlay, ["a.b=1", "c=x"]);
    }

    #[test]
    fn dashed_overlay_flags_pass_through() {
        let cli = parse(&["test", "--from-file=base.yaml", "--set=-v=2", "a=1"]);
        assert_eq!(cli.overlay.overlay, ["--from-file=base.yaml", "--set=-v=2", "a=1"]);
    }

    #[test]
    fn host_flags_come_first() {
        let cli = parse(&["test", "--verbose", "a=1", "--set-json=b=[1]"]);
        assert!(cli.verbose);
        assert_eq!(cli.overlay.overlay, ["a=1", "--set-json=b=[1]"]);
    }

    #[test]
    fn compile_through_adapter() {
        let cli = parse(&["test", "a.b=1", "--set-json=c=[true]"]);
        let tree = cli.overlay.compile(&Layerfig::builder()).unwrap();
        assert_eq!(tree, json!({"a": {"b": 1}, "c": [true]}).into());
    }

    #[test]
    fn load_through_adapter() {
        let cli = parse(&["test", "port=3000", "database.url=pg://x"]);
        let config: TestConfig = cli.overlay.load(&Layerfig::builder()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database.url.as_deref(), Some("pg://x"));
    }

    #[test]
    fn compile_errors_surface_from_adapter() {
        let cli = parse(&["test", "a=1", "oops"]);
        let err = cli.overlay.compile(&Layerfig::builder()).unwrap_err();
        assert!(matches!(err.cause(), LayerfigError::NotAnAssignment));
    }
}
