//! Roughcut: Rough-Set Reduction CLI Tool
//!
//! A command-line tool for analyzing decision tables with rough-set
//! approximations or decision rules, and removing the objects that make
//! them inconsistent.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use roughcut::cli::{confirm_overwrite, select_method, Cli, Commands};
use roughcut::pipeline::{analyze, load_decision_table, save_decision_table};
use roughcut::report::{export_report, ReductionSummary};
use roughcut::service::{serve, ServiceConfig};
use roughcut::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    ConfigCard,
};

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Serve {
                addr,
                allowed_origin,
                load,
                analysis,
            } => {
                init_tracing("info");
                let config = ServiceConfig {
                    addr: *addr,
                    allowed_origin: allowed_origin.clone(),
                    load: load.load_options(),
                    analysis: analysis.analysis_options(),
                };
                tokio::runtime::Runtime::new()?.block_on(serve(config))
            }
        };
    }

    init_tracing("warn");

    // Main analysis pipeline - require input
    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let output_path = cli
        .output_path()
        .ok_or_else(|| anyhow::anyhow!("Could not derive output path from input"))?;
    let report_path = cli
        .report_path()
        .ok_or_else(|| anyhow::anyhow!("Could not derive report path from input"))?;

    let method = match cli.method {
        Some(method) => method,
        None if cli.no_confirm => anyhow::bail!(
            "Method is required when using --no-confirm. Use -m/--method to specify."
        ),
        None => select_method()?,
    };

    let load_options = cli.load.load_options();
    let analysis_options = cli.analysis.analysis_options();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&ConfigCard {
        input,
        method: method.name(),
        output: &output_path,
        report: &report_path,
        encoding: &load_options.encoding,
        separator: cli.load.separator,
        single_rule_policy: &analysis_options.single_rule_policy.to_string(),
    });

    // Step 1: Load decision table
    print_step_header(1, "Load Decision Table");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading decision table...");
    let table = load_decision_table(input, &load_options)?;
    finish_with_success(&spinner, "Decision table loaded");

    println!("\n    {} Table Statistics:", style("✧").cyan());
    println!("      Objects: {}", table.len());
    println!(
        "      Conditional attributes: {}",
        table.condition_attributes().len()
    );
    println!("      Decision attribute: {}", table.decision_attribute());
    println!("      Decision values: {}", table.decision_values().join(", "));
    print_step_time(step_start.elapsed());

    // Step 2: Analysis
    print_step_header(2, &format!("{} Analysis", capitalize(method.name())));

    let step_start = Instant::now();
    let spinner = create_spinner("Analyzing...");
    let report = analyze(method, &table, &analysis_options);
    let removed = report.result.removed_objects();
    if removed.is_empty() {
        finish_with_warning(&spinner, "No objects to remove");
        print_info("The decision table is already consistent for this method");
    } else {
        finish_with_success(&spinner, "Analysis complete");
        print_count(
            "object(s) to remove",
            removed.len(),
            Some(&format!("(of {})", table.len())),
        );
    }
    print_step_time(step_start.elapsed());

    // Step 3: Save results
    print_step_header(3, "Save Results");

    let step_start = Instant::now();
    if should_write(&output_path, cli.no_confirm)? {
        save_decision_table(
            report.result.consistent_data(),
            &output_path,
            load_options.separator,
        )?;
        print_success(&format!("Saved reduced table to {}", output_path.display()));
    } else {
        print_info("Kept existing output file");
    }
    if should_write(&report_path, cli.no_confirm)? {
        export_report(
            &report_path,
            &input.display().to_string(),
            method,
            &analysis_options,
            &report,
        )?;
        print_success(&format!("Saved report to {}", report_path.display()));
    } else {
        print_info("Kept existing report file");
    }
    print_step_time(step_start.elapsed());

    ReductionSummary::from_report(method, &report).display();

    print_completion();

    Ok(())
}

fn should_write(path: &Path, no_confirm: bool) -> Result<bool> {
    if no_confirm || !path.exists() {
        return Ok(true);
    }
    confirm_overwrite(path)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
