use clap::{Parser, Subcommand};
use katagami::memory::Fixture;
use katagami::prelude::*;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Build forms for JSON-described records and bind submissions onto them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble the form for a fixture's record and print it
    Form {
        /// Path to the fixture JSON file
        fixture: String,
        /// Print the form as JSON instead of an outline
        #[arg(long)]
        json: bool,
    },
    /// Bind submitted values onto a fixture's record and persist it
    Submit {
        /// Path to the fixture JSON file
        fixture: String,
        /// Path to a JSON object of submitted values
        posted: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Form { fixture, json } => run_form(&load_fixture(&fixture), json),
        Command::Submit { fixture, posted } => run_submit(load_fixture(&fixture), &posted),
    }
}

fn run_form(fixture: &Fixture, json: bool) {
    let form = FormAssembler::builder(&fixture.config)
        .with_relations(&fixture.tables)
        .build()
        .assemble(&fixture.record, fixture.hints.clone());

    if json {
        let rendered = serde_json::to_string_pretty(&form)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize form: {}", e)));
        println!("{}", rendered);
        for warning in &form.warnings {
            eprintln!("warning: {}", warning);
        }
    } else {
        print!("{}", format_form(&form));
    }
}

fn run_submit(mut fixture: Fixture, posted_path: &str) {
    let posted_json = fs::read_to_string(posted_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read submitted values '{}': {}",
            posted_path, e
        ))
    });
    let posted: PostedValues = serde_json::from_str(&posted_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse submitted values: {}", e)));

    let binder = SubmissionBinder::new(&fixture.config);
    let outcome = binder
        .process(&mut fixture.record, &posted)
        .unwrap_or_else(|e| exit_with_error(&format!("Submission failed: {}", e)));

    match &outcome {
        SubmissionOutcome::Inserted { id } => {
            println!("Inserted '{}' with id {}", fixture.record.table, id)
        }
        SubmissionOutcome::Updated => println!("Updated '{}'", fixture.record.table),
        SubmissionOutcome::Rejected(errors) => {
            println!("Rejected:");
            for (field, message) in errors.iter() {
                println!("  -> {}: {}", field, message);
            }
        }
    }

    if outcome.attempted_persistence() {
        let values = serde_json::to_string_pretty(&fixture.record.values)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize record: {}", e)));
        println!("{}", values);
    }
}

fn load_fixture(path: &str) -> Fixture {
    Fixture::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load fixture: {}", e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
