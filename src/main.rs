use clap::{Parser, Subcommand};
use royalbit_rowpdf::cli::{self, ConvertArgs};
use royalbit_rowpdf::config::PageSize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rowpdf")]
#[command(about = "Turn every spreadsheet row into its own PDF record.")]
#[command(long_about = "RowPDF - Spreadsheet rows to PDF records
One bordered key-value document per row | Deterministic filenames | Failure-isolated batches

COMMANDS:
  convert  - Render each row of a sheet as {prefix}_{index:03}.pdf
  sheets   - List the sheets of a workbook
  sample   - Write a demo employee workbook

EXAMPLES:
  rowpdf sample sample_data.xlsx
  rowpdf convert sample_data.xlsx --prefix employee --output employee_pdfs
  rowpdf convert data.xlsx -s Q3 -p record -o out --no-prompt
  rowpdf sheets data.xlsx

LOGGING:
  Set RUST_LOG (e.g. RUST_LOG=royalbit_rowpdf=debug) or pass --verbose.")]
#[command(version)]
struct Cli {
    /// Show verbose output and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert every row of a sheet into its own PDF.

Each PDF is titled 'Record N' and holds a two-column table: field names on
the left (shaded), values on the right, in the sheet's column order.
The first sheet row is treated as the header row.

PROMPTS:
  Anything not given on the command line is asked for interactively:
  the file path, the sheet (only when the workbook has several),
  the filename prefix (default 'row') and the output folder
  (default 'pdf_output'). Use --no-prompt to take defaults instead.

FAILURES:
  A row that cannot be rendered (e.g. characters the PDF font cannot
  encode) is reported and skipped; the other rows are still converted
  and the command exits 0. Missing files, unreadable workbooks and
  unknown sheets stop the run with a non-zero exit code.

EXAMPLES:
  rowpdf convert people.xlsx
  rowpdf convert people.xlsx -s Staff -p employee -o employee_pdfs
  rowpdf convert people.xlsx -c style.yaml --page-size letter --report summary.json")]
    /// Render each row of a sheet as a PDF
    Convert {
        /// Path to the spreadsheet (prompted for when omitted)
        file: Option<PathBuf>,

        /// Sheet to convert (defaults to the first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Filename prefix for generated PDFs
        #[arg(short, long)]
        prefix: Option<String>,

        /// Output folder for generated PDFs
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML render config (page size, margins, fonts, colors)
        #[arg(short, long, env = "ROWPDF_CONFIG")]
        config: Option<PathBuf>,

        /// Page size: a4, letter or legal (overrides the config file)
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<PageSize>,

        /// Write a JSON summary of the run to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Never prompt; use defaults for anything not given
        #[arg(short = 'y', long)]
        no_prompt: bool,
    },

    /// List the sheets of a workbook
    Sheets {
        /// Path to the spreadsheet
        file: PathBuf,
    },

    /// Write a demo workbook to try the converter on
    Sample {
        /// Output path (.xlsx)
        #[arg(default_value = "sample_data.xlsx")]
        path: PathBuf,
    },
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    s.parse::<PageSize>().map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "royalbit_rowpdf=debug"
    } else {
        "royalbit_rowpdf=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            file,
            sheet,
            prefix,
            output,
            config,
            page_size,
            report,
            no_prompt,
        } => cli::convert(ConvertArgs {
            file,
            sheet,
            prefix,
            output,
            config,
            page_size,
            report,
            no_prompt,
            verbose: cli.verbose,
        })?,

        Commands::Sheets { file } => cli::sheets(file)?,

        Commands::Sample { path } => cli::sample(path)?,
    }

    Ok(())
}
