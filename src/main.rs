//! bindforge CLI - drives one binding-generation task from a config file

use clap::Parser;
use colored::Colorize;

use bindforge::config::{self, GeneratorConfig};
use bindforge::dispatch::Dispatcher;
use bindforge::engine;
use bindforge::error::{FixSuggestion, ForgeError};
use bindforge::example::{self, EXAMPLE_CONFIG_FILE};
use bindforge::resolve::resolve_task;
use bindforge::typemap::FileIncludeLoader;

#[derive(Parser)]
#[command(name = "bindforge")]
#[command(about = "Configuration-driven generator driver for native library bindings")]
#[command(version)]
struct Cli {
    /// Path to a generator config file (unescaped spaces are fine), or
    /// `example` to write a starter config into the current directory
    args: Vec<String>,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.args.first().map(String::as_str) {
        None => {
            print_usage();
            Ok(())
        }
        Some("example") => write_example(),
        // Spaces in the config path arrive as separate arguments; rejoin
        // them so unescaped paths still work.
        Some(_) => run_config(&cli.args.join(" ")),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        "You need to provide a configuration file! \
         Run `bindforge example` to generate an example config, \
         then `bindforge {{path to your config file}}` to run it."
    );
}

fn write_example() -> Result<(), ForgeError> {
    let cwd = std::env::current_dir()?;

    println!("{} Writing example config...", "→".cyan());
    let result = example::write_example_files(&cwd)?;

    for file in &result.files_created {
        println!("  {} {}", "+".green(), file);
    }
    println!(
        "{} Example config written to `{}`! Edit it to your liking, then run \
         `bindforge {}`",
        "✓".green(),
        EXAMPLE_CONFIG_FILE,
        EXAMPLE_CONFIG_FILE
    );
    Ok(())
}

fn run_config(path: &str) -> Result<(), ForgeError> {
    let generator_config = GeneratorConfig::load(path)?;
    let base_dir = config::base_dir(path)?;

    // Only the first task of a collection is dispatched per invocation.
    let task = &generator_config.tasks[0];

    println!(
        "{} Running generator for config file {}...",
        "→".cyan(),
        path.cyan().bold()
    );

    let mut loader = FileIncludeLoader::new(&base_dir);
    loader.register_sources(&task.type_maps);
    let resolved = resolve_task(task, &base_dir, &loader)?;

    let dispatcher = Dispatcher::new(engine::for_mode(resolved.task.mode));
    let report = dispatcher.run(&resolved)?;

    println!("{} Finished in {:.2}s", "✓".green(), report.seconds());
    Ok(())
}
