//! # layerfig demo application
//!
//! A sample CLI tool showing how to wire [layerfig](https://docs.rs/layerfig)
//! into an application. It exists purely to demonstrate and manually verify
//! layerfig's features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example layerfig_demo
//! cargo run --example layerfig_demo -- server.port=8080 display.format=plain
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                                       |
//! |-------------------------|--------------------------------------------------------------------------|
//! | Compiled defaults       | `cargo run --example layerfig_demo`                                      |
//! | Dotted assignment       | `... -- server.port=9999`                                                |
//! | Inline JSON             | `... -- 'allow=["10.0.0.1", "10.0.0.2"]'`                                |
//! | Whole tree from preset  | `... -- --from-fn=presets:prod server.port=8443`                         |
//! | Subtree from preset     | `... -- --set-from-fn=display=presets:quiet`                             |
//! | Whole tree from file    | `... -- --from-file=conf.yaml` (YAML, JSON or TOML by extension)         |
//! | Strict unknown keys     | `... -- server.prot=1` fails and names the argument                      |
//! | Equivalent arguments    | `... -- --explain --from-fn=presets:prod` prints the minimal overlay     |
//! | Merge presets anywhere  | `... -- --merge-anywhere verbose=true --from-fn=presets:prod`            |
//! | Typed path shorthand    | `... -- --port 8081 display.color=green`                                 |

mod config;

use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use layerfig::{
    Layerfig, LayerfigBuilder, LayerfigError, OverlayArgs, Registry, SequenceIfDifferent,
    WholeTree, diff_with, mapper, to_cli_args,
};

use config::{DemoConfig, paths};

const RESET: &str = "\x1b[0m";

/// layerfig demo: a sample CLI app showing overlay arguments.
#[derive(Parser, Debug)]
#[command(name = "layerfig-demo")]
struct Cli {
    /// Print the minimal arguments that reproduce the loaded config.
    #[arg(long)]
    explain: bool,

    /// Accept --from-file / --from-fn at any position, merging them.
    #[arg(long)]
    merge_anywhere: bool,

    /// Shorthand for `server.port=PORT`, applied after the overlay.
    #[arg(long)]
    port: Option<u16>,

    #[command(flatten)]
    overlay: OverlayArgs,
}

fn presets() -> Result<Registry, LayerfigError> {
    Registry::new()
        .with("presets:prod", || {
            json!({
                "name": "prod",
                "allow": ["10.0.0.0/8"],
                "server": {"host": "0.0.0.0", "port": 443, "max_connections": 10000},
            })
        })?
        .with("presets:quiet", || json!({"color": "white", "format": "plain"}))
}

fn make_builder(cli: &Cli) -> Result<LayerfigBuilder, LayerfigError> {
    let mode = if cli.merge_anywhere {
        WholeTree::MergeAnywhere
    } else {
        WholeTree::FirstOnly
    };
    Ok(Layerfig::builder().registry(presets()?).whole_tree(mode))
}

fn ansi_color_code(color: &str) -> &'static str {
    match color {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",
        _ => "",
    }
}

fn print_config(config: &DemoConfig) {
    let color = ansi_color_code(&config.display.color);

    if config.verbose {
        println!("{color}[verbose] Resolved configuration for {:?}{RESET}", config.name);
        println!();
    }

    let entries = [
        ("name", config.name.clone()),
        ("verbose", config.verbose.to_string()),
        ("allow", config.allow.join(",")),
        ("server.host", config.server.host.clone()),
        ("server.port", config.server.port.to_string()),
        ("server.max_connections", config.server.max_connections.to_string()),
        ("display.color", config.display.color.clone()),
        ("display.format", config.display.format.clone()),
    ];

    if config.display.format == "plain" {
        for (key, value) in &entries {
            println!("{key}={value}");
        }
    } else {
        let max_key_len = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in &entries {
            println!("{color}{key:<max_key_len$}{RESET}  {value}");
        }
    }
}

/// Arguments that turn the compiled defaults into `config`.
fn explain(builder: &LayerfigBuilder, config: &DemoConfig) -> Result<Vec<String>, LayerfigError> {
    let no_args: [&str; 0] = [];
    let defaults = mapper::unbind(&builder.load::<DemoConfig, _>(&no_args)?)?;
    let loaded = mapper::unbind(config)?;
    to_cli_args(&diff_with(&defaults, &loaded, &SequenceIfDifferent))
}

fn run(cli: &Cli) -> Result<(), LayerfigError> {
    let builder = make_builder(cli)?;
    let mut args = cli.overlay.overlay.clone();
    if let Some(port) = cli.port {
        args.push(paths::server_port().assign_arg(&u64::from(port).into())?);
    }
    let config: DemoConfig = builder.load(&args)?;
    if cli.explain {
        for arg in explain(&builder, &config)? {
            println!("{arg}");
        }
    } else {
        print_config(&config);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to load config:\n{e}");
            ExitCode::FAILURE
        }
    }
}
