mod cli;

use bench_summarizer::{actual_values, config, output, summarizer};
use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            input_dir,
            format,
            output: output_path,
            failures_only,
            skip,
            config: config_path,
        } => {
            let mut config = config::Config::load(config_path.as_deref()).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });

            if failures_only {
                config.report.failures_only = true;
            }
            config.skip.checks.extend(skip);
            if let Err(e) = config.validate() {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }

            let report = summarizer::summarize(&input_dir, &config).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            let formatted = output::format_report(&report, &format);

            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else {
                print!("{formatted}");
            }

            std::process::exit(if report.has_failures() { 1 } else { 0 });
        }

        Commands::Decode { report } => {
            let content = std::fs::read_to_string(&report).unwrap_or_else(|e| {
                eprintln!("Error reading report {}: {e}", report.display());
                std::process::exit(2);
            });
            let document: serde_json::Value = serde_json::from_str(&content).unwrap_or_else(|e| {
                eprintln!("Error parsing report {}: {e}", report.display());
                std::process::exit(2);
            });
            let Some(data) = document["actual_value_map_data"].as_str() else {
                eprintln!(
                    "Error: report {} has no actual_value_map_data field",
                    report.display()
                );
                std::process::exit(2);
            };
            let groups = actual_values::decode(data).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            match serde_json::to_string_pretty(&groups) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                }
            }
        }
    }
}
