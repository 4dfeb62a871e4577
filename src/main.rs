use clap::{Parser, Subcommand};
use estimate_insight::cli;
use estimate_insight::error::InsightResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Estimate vs actual spending analysis with category reconciliation.")]
#[command(long_about = "Insight - Estimate vs actual spending analysis

Compares a budget estimate workbook against an actual spending workbook,
reconciles category labels across the two, and reports per-category
variance, category overlap, and aggregate statistics.

COMMANDS:
  analyze - Compare estimate vs actual workbooks

EXAMPLES:
  insight analyze estimate.xlsx actual.xlsx
  insight analyze estimate.xlsx actual.xlsx --project-name \"Warehouse Retrofit\"
  insight analyze estimate.xlsx actual.xlsx -o report.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Compare estimate vs actual workbooks.

Both inputs are Excel files (.xlsx or .xls). Column layout is flexible:
the category column is found by scanning for category/name/item/
description/line_item headers (falling back to the first column), and the
amount column by scanning for amount/cost/value/price/total (falling back
to the first numeric column).

OUTPUT:
  Terminal report (default)
  Excel: insight analyze estimate.xlsx actual.xlsx -o report.xlsx
  JSON:  insight analyze estimate.xlsx actual.xlsx -o report.json

The --show-prompt flag additionally prints the executive-summary prompt
to hand to an external language model.")]
    /// Compare estimate vs actual workbooks
    Analyze {
        /// Path to the estimate workbook (.xlsx/.xls)
        estimate: PathBuf,

        /// Path to the actual-spending workbook (.xlsx/.xls)
        actual: PathBuf,

        /// Name of the project being analyzed
        #[arg(short, long, default_value = "Unnamed Project")]
        project_name: String,

        /// Worksheet to read from both workbooks (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Output file (optional: .xlsx or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the narrative prompt for an external model
        #[arg(long)]
        show_prompt: bool,

        /// Show verbose progress
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> InsightResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            estimate,
            actual,
            project_name,
            sheet,
            output,
            show_prompt,
            verbose,
        } => cli::analyze(
            estimate,
            actual,
            project_name,
            sheet,
            output,
            show_prompt,
            verbose,
        ),
    }
}
