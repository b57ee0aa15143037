use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use worksheet_gen::{Difficulty, OptionValue};

#[derive(Parser)]
#[command(author, version, about = "Seeded, reproducible maths worksheets", long_about = None)]
pub struct Cli {
    /// TOML config file; overrides WORKSHEET_CONFIG_PATH.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a worksheet, or regenerate one from its ID.
    Generate(GenerateArgs),
    /// List every problem type with its group and options.
    List,
    /// Check the registry and every problem type; exits 1 on any issue.
    Check,
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Problem type id, e.g. `times-tables`.
    #[arg(short = 't', long = "type")]
    pub type_id: Option<String>,

    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Number of problems.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Type option as KEY=VALUE; repeatable.
    #[arg(short, long = "option", value_name = "KEY=VALUE", value_parser = parse_option)]
    pub options: Vec<(String, OptionValue)>,

    /// Existing worksheet ID to regenerate, or a base id for a new one.
    #[arg(long)]
    pub id: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the answer key after the questions.
    #[arg(short, long)]
    pub answers: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_option(raw: &str) -> Result<(String, OptionValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("missing option name in `{raw}`"));
    }
    let value = match value {
        "true" => OptionValue::Bool(true),
        "false" => OptionValue::Bool(false),
        other => OptionValue::text(other),
    };
    Ok((key.to_string(), value))
}
