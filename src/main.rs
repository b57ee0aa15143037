use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use worksheet_gen::{
    config::{load_config, load_config_from_env, WorksheetConfig},
    generate_worksheet_with_limit,
    telemetry::init_tracing,
    worksheet_engine::{
        answer_key::{answer_text, question_text, worksheet_json, TRUNCATED_NOTE},
        models::OptionKind,
        validator::check_registry,
    },
    Options, Registry, Worksheet, WorksheetRequest,
};

mod cli;
use cli::{Cli, Command, GenerateArgs, OutputFormat};

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(target: "worksheet", error = %e, "cannot load config");
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => load_config_from_env().unwrap_or_default(),
    };
    let registry = Registry::builtin().with_default_type(config.default_type.clone());

    match cli.command {
        Command::Generate(args) => generate(&registry, &config, args),
        Command::List => {
            list(&registry);
            ExitCode::SUCCESS
        }
        Command::Check => check(&registry, &config),
    }
}

fn generate(registry: &Registry, config: &WorksheetConfig, args: GenerateArgs) -> ExitCode {
    let request = WorksheetRequest {
        id: args.id,
        type_id: args.type_id.unwrap_or_else(|| config.default_type.clone()),
        difficulty: args.difficulty.unwrap_or(config.default_difficulty),
        count: args.count.unwrap_or(config.default_count),
        options: args.options.into_iter().collect::<Options>(),
    };
    let sheet = generate_worksheet_with_limit(registry, request, config.max_count);

    match args.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&worksheet_json(&sheet)) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Text => print_text(&sheet, args.answers),
    }
    ExitCode::SUCCESS
}

fn print_text(sheet: &Worksheet, answers: bool) {
    println!("{}", sheet.title);
    if let Some(instruction) = &sheet.instruction {
        println!("{instruction}");
    }
    println!("ID: {}", sheet.id);
    if sheet.truncated {
        println!("Note: {TRUNCATED_NOTE}");
    }
    println!();
    for (i, problem) in sheet.problems.iter().enumerate() {
        println!("{:>3}. {}", i + 1, question_text(problem));
    }
    if answers {
        println!("\nAnswers");
        for (i, problem) in sheet.problems.iter().enumerate() {
            println!("{:>3}. {}", i + 1, answer_text(problem));
        }
    }
}

fn list(registry: &Registry) {
    for group in registry.groups() {
        println!("{}", group.name);
        for ty in group.type_ids.iter().filter_map(|id| registry.get(id)) {
            println!("  {:<24} {}", ty.id(), ty.label());
            for spec in ty.options() {
                let choices = match spec.kind {
                    OptionKind::Select { values, default } => {
                        let values: Vec<&str> = values.iter().map(|(v, _)| *v).collect();
                        format!("{} (default {default})", values.join("|"))
                    }
                    OptionKind::Checkbox { default } => {
                        format!("true|false (default {default})")
                    }
                };
                println!("  {:<24}   --option {}=<{choices}>", "", spec.id);
            }
        }
    }
}

fn check(registry: &Registry, config: &WorksheetConfig) -> ExitCode {
    let report = check_registry(registry, &config.validator);
    for issue in &report.issues {
        println!("{issue}");
    }
    println!(
        "checked {} types in {} runs: {} issue(s)",
        report.types_checked,
        report.runs,
        report.issues.len()
    );
    if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
