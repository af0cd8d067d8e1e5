//! NetGuard CLI - schematic netlist extraction and ERC from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use netguard::{
    ErcViolation, NetguardCore, Severity, ValidationOptions, ValidationResult,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "netguard")]
#[command(about = "Schematic connectivity and electrical rule checking tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run ERC over a single schematic document
    Check {
        /// Path to a .sch.json document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if violations exist at this severity or higher
        #[arg(long, value_enum)]
        fail_on: Option<FailOnSeverity>,

        /// Run only these rule ids (repeatable)
        #[arg(long = "rule", value_name = "RULE_ID")]
        rules: Vec<String>,
    },

    /// Extract the netlist of a schematic document
    Extract {
        /// Path to a .sch.json document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Run ERC over every document in a directory
    Project {
        /// Path to project directory
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if violations exist at this severity or higher
        #[arg(long, value_enum)]
        fail_on: Option<FailOnSeverity>,
    },

    /// List available ERC rules
    Rules {
        /// Show detailed rule descriptions
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for CI/CD
    Json,
    /// GitHub Actions annotation format
    Github,
}

#[derive(Clone, ValueEnum)]
enum FailOnSeverity {
    Error,
    Warning,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Check {
            file,
            format,
            fail_on,
            rules,
        } => handle_check(&file, format, fail_on, rules),
        Commands::Extract { file, pretty } => handle_extract(&file, pretty),
        Commands::Project {
            dir,
            format,
            fail_on,
        } => handle_project(&dir, format, fail_on),
        Commands::Rules { verbose } => {
            handle_rules(verbose);
            0
        }
    };

    process::exit(exit_code);
}

fn handle_check(
    file: &PathBuf,
    format: OutputFormat,
    fail_on: Option<FailOnSeverity>,
    rules: Vec<String>,
) -> i32 {
    let options = ValidationOptions { rules };

    match NetguardCore::check_file(file, options) {
        Ok(result) => {
            output_results(std::slice::from_ref(&result), &format);
            if let Some(severity) = fail_on {
                if should_fail(&result, &severity) {
                    return 1;
                }
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn handle_extract(file: &PathBuf, pretty: bool) -> i32 {
    match NetguardCore::extract_file(file) {
        Ok(netlist) => {
            let json = if pretty {
                serde_json::to_string_pretty(&netlist)
            } else {
                serde_json::to_string(&netlist)
            };
            match json {
                Ok(text) => {
                    println!("{}", text);
                    0
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn handle_project(
    dir: &PathBuf,
    format: OutputFormat,
    fail_on: Option<FailOnSeverity>,
) -> i32 {
    match NetguardCore::validate_project(dir, ValidationOptions::default()) {
        Ok(results) => {
            output_results(&results, &format);
            if let Some(severity) = fail_on {
                for result in &results {
                    if should_fail(result, &severity) {
                        return 1;
                    }
                }
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn should_fail(result: &ValidationResult, severity: &FailOnSeverity) -> bool {
    match severity {
        FailOnSeverity::Error => result.stats.errors > 0,
        FailOnSeverity::Warning => result.total_violations() > 0,
    }
}

fn output_results(results: &[ValidationResult], format: &OutputFormat) {
    match format {
        OutputFormat::Human => output_human(results),
        OutputFormat::Json => output_json(results),
        OutputFormat::Github => output_github(results),
    }
}

fn output_human(results: &[ValidationResult]) {
    for result in results {
        println!("\nFile: {}", result.file.display());
        println!("{}", "─".repeat(60));

        if result.total_violations() == 0 {
            println!("  No violations found");
            continue;
        }

        let errors: Vec<_> = result
            .violations
            .iter()
            .filter(|v| matches!(v.severity, Severity::Error))
            .collect();
        let warnings: Vec<_> = result
            .violations
            .iter()
            .filter(|v| matches!(v.severity, Severity::Warning))
            .collect();

        if !errors.is_empty() {
            println!("\n  ERRORS:");
            for violation in errors {
                println!("    - {}", violation.message);
                if let Some(ref location) = violation.location {
                    println!("      At: ({:.2}, {:.2})", location.x, location.y);
                }
            }
        }
        if !warnings.is_empty() {
            println!("\n  WARNINGS:");
            for violation in warnings {
                println!("    - {}", violation.message);
                if let Some(ref location) = violation.location {
                    println!("      At: ({:.2}, {:.2})", location.x, location.y);
                }
            }
        }

        println!("\n  Summary:");
        println!("    Errors:   {}", result.stats.errors);
        println!("    Warnings: {}", result.stats.warnings);
    }
}

fn output_json(results: &[ValidationResult]) {
    let output = serde_json::json!({
        "results": results.iter().map(|r| {
            serde_json::json!({
                "file": r.file.display().to_string(),
                "violations": r.violations,
                "stats": {
                    "errors": r.stats.errors,
                    "warnings": r.stats.warnings,
                }
            })
        }).collect::<Vec<_>>(),
        "summary": {
            "total_files": results.len(),
            "total_violations": results.iter().map(|r| r.total_violations()).sum::<usize>(),
            "errors": results.iter().map(|r| r.stats.errors).sum::<usize>(),
        }
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn severity_to_github(violation: &ErcViolation) -> &'static str {
    match violation.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn output_github(results: &[ValidationResult]) {
    for result in results {
        for violation in &result.violations {
            let level = severity_to_github(violation);
            println!(
                "::{} file={}::{}",
                level,
                result.file.display(),
                violation.message.replace('\n', " ")
            );
        }
    }
}

fn handle_rules(verbose: bool) {
    println!("Available ERC rules:\n");

    let rules = [
        (
            "unconnected_pin",
            "Unconnected pins",
            "Flags pins that touch no wire, junction, or other pin; passive pins warn, all others error",
        ),
        (
            "conflicting_pin_types",
            "Conflicting pin types",
            "Flags nets driven by more than one output or power-output pin",
        ),
        (
            "missing_power_flag",
            "Missing power flag",
            "Power-input pins must reach a power port or a power-output pin",
        ),
        (
            "duplicate_reference",
            "Duplicate references",
            "A reference designator may be used by only one component",
        ),
        (
            "unconnected_wire",
            "Unconnected wires",
            "Wire terminal points must land on a pin, label, port, junction, or another wire",
        ),
        (
            "missing_net_label",
            "Missing net labels",
            "Wire nets joining two or more pins should carry a net label",
        ),
    ];

    for (name, short, long) in &rules {
        println!("  {}", name);
        println!("    {}", short);
        if verbose {
            println!("    {}", long);
        }
        println!();
    }
}
