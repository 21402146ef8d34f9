use anyhow::{Context, Result};
use forum_markup_config::Config;
use forum_markup_engine::{ContentNode, MarkupParser, outline, plain_text, to_markup};
use serde::Serialize;
use std::{env, io::Read, process};

const USAGE: &str = "Usage: forum-markup-cli [--outline | --plain | --markup | --toml] [file]";

/// What to print for the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    /// Indented node outline.
    Outline,
    /// Text content only.
    Plain,
    /// The tree written back as markup.
    Markup,
    /// The tree serialized as TOML.
    Toml,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    output: Output,
    /// Input file; stdin when absent or `-`.
    path: Option<String>,
}

#[derive(Serialize)]
struct Document<'a> {
    nodes: &'a [ContentNode],
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut output = Output::Outline;
    let mut path = None;

    for arg in args {
        match arg.as_str() {
            "--outline" => output = Output::Outline,
            "--plain" => output = Output::Plain,
            "--markup" => output = Output::Markup,
            "--toml" => output = Output::Toml,
            "-" => path = None,
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            file if path.is_none() => path = Some(file.to_string()),
            extra => return Err(format!("unexpected argument {extra}")),
        }
    }
    Ok(Args { output, path })
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn render(nodes: &[ContentNode], output: Output) -> Result<String> {
    Ok(match output {
        Output::Outline => outline(nodes),
        Output::Plain => plain_text(nodes) + "\n",
        Output::Markup => to_markup(nodes) + "\n",
        Output::Toml => toml::to_string_pretty(&Document { nodes })?,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let raw_args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw_args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    // Settings come from the config file when present; defaults otherwise
    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Using config from {}", config_path.display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("Failed to load config file, using defaults: {e}");
            Config::default()
        }
    };

    let parser = MarkupParser::new(config.parse_options()?);
    let input = read_input(args.path.as_deref())?;
    let nodes = parser.parse(&input);
    log::debug!("parsed {} top-level nodes", nodes.len());

    print!("{}", render(&nodes, args.output)?);
    Ok(())
}
