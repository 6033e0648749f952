use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use expense_core::charts::ChartStyle;
use expense_core::cli::output::{self, OutputPreferences};
use expense_core::cli::run_dashboard;
use expense_core::cli::table::{Table, TableColumn};
use expense_core::config::{self, ConfigManager, PresentationConfig, CONFIG_ENV};
use expense_core::currency::format_money;
use expense_core::errors::ExpenseError;
use expense_core::jobs;
use expense_core::utils::build_info;
use expense_core::init;

#[derive(Parser)]
#[command(name = "expense_cli")]
#[command(about = "Analyze, chart and explore an expense ledger spreadsheet")]
#[command(version)]
struct Cli {
    /// Presentation config file (JSON).
    #[arg(long, global = true, env = CONFIG_ENV, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colours and decorative glyphs.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize spending by category into expense_analysis_result.xlsx.
    Analyze {
        input: PathBuf,
        /// Output directory (defaults to the input's directory).
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Render category share, monthly trend and stacked charts as SVG.
    Visualize {
        input: PathBuf,
        /// Output directory (defaults to <input dir>/charts).
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Open the interactive dashboard.
    Dashboard { input: Option<PathBuf> },
    /// Show the effective presentation config.
    Config {
        /// Write the defaults to the config path when no file exists yet.
        #[arg(long)]
        init: bool,
    },
    /// Show build metadata.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init();

    let manager = ConfigManager::resolve(cli.config.as_deref());
    let mut settings = match manager.load() {
        Ok(settings) => settings,
        Err(err) => return fail(&err),
    };
    settings.plain_output |= cli.plain;
    if settings.plain_output {
        colored::control::set_override(false);
    }
    output::set_preferences(OutputPreferences {
        plain_mode: settings.plain_output,
        ..OutputPreferences::default()
    });
    let settings = config::install(settings);

    let result = match cli.command.unwrap_or(Commands::Dashboard { input: None }) {
        Commands::Analyze { input, output } => run_analyze(&input, output.as_deref(), settings),
        Commands::Visualize { input, output } => {
            run_visualize(&input, output.as_deref(), settings)
        }
        Commands::Dashboard { input } => {
            return match run_dashboard(input.as_deref(), settings) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => fail(&err),
            };
        }
        Commands::Config { init: write_defaults } => run_config(&manager, settings, write_defaults),
        Commands::Version => {
            for line in build_info::current().describe("expense_cli") {
                println!("{line}");
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_empty_state() => {
            output::warning("The ledger has no records; nothing to do.");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

fn run_analyze(
    input: &Path,
    output_dir: Option<&Path>,
    settings: &PresentationConfig,
) -> Result<(), ExpenseError> {
    output::info(format!("Reading {}", input.display()));
    let outcome = jobs::analyze(input, output_dir)?;

    output::section("Spending by category");
    let rows = outcome
        .categories
        .iter()
        .map(|summary| {
            vec![
                summary.category.clone(),
                format_money(&settings.money, summary.total, 2),
                summary.count.to_string(),
                format_money(&settings.money, summary.mean, 2),
            ]
        })
        .collect();
    output::block(
        Table::new(
            vec![
                TableColumn::left("Category"),
                TableColumn::right("Total"),
                TableColumn::right("Count"),
                TableColumn::right("Mean"),
            ],
            rows,
        )
        .render(),
    );

    output::info(format!(
        "Records: {}  Categories: {}",
        outcome.record_count,
        outcome.categories.len()
    ));
    output::info(format!(
        "Top category: {} ({})",
        outcome.leading.category,
        format_money(&settings.money, outcome.leading.total, 2)
    ));
    output::success(format!("Analysis saved to {}", outcome.output_path.display()));
    Ok(())
}

fn run_visualize(
    input: &Path,
    output_dir: Option<&Path>,
    settings: &PresentationConfig,
) -> Result<(), ExpenseError> {
    output::info(format!("Reading {}", input.display()));
    let outcome = jobs::visualize(input, output_dir, &ChartStyle::from_config(settings))?;

    output::info(format!("Records: {}", outcome.record_count));
    if let (Some(first), Some(last)) = (outcome.first_date, outcome.last_date) {
        output::info(format!("Date range: {first} to {last}"));
    }
    output::success(format!("Charts saved to {}", outcome.output_dir.display()));
    for (idx, path) in outcome.charts.iter().enumerate() {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        output::info(format!("  {}. {}", idx + 1, name));
    }
    Ok(())
}

fn run_config(
    manager: &ConfigManager,
    settings: &PresentationConfig,
    write_defaults: bool,
) -> Result<(), ExpenseError> {
    if write_defaults {
        if manager.config_path().exists() {
            output::warning(format!(
                "{} already exists; left unchanged.",
                manager.config_path().display()
            ));
        } else {
            manager.save(&PresentationConfig::default())?;
            output::success(format!("Wrote defaults to {}", manager.config_path().display()));
        }
    }
    output::info(format!("Config path: {}", manager.config_path().display()));
    let json = serde_json::to_string_pretty(settings)
        .map_err(|err| ExpenseError::Config(err.to_string()))?;
    output::block(json);
    Ok(())
}

fn fail(err: &dyn std::fmt::Display) -> ExitCode {
    eprintln!("Error: {err}");
    ExitCode::FAILURE
}
