use crate::config::{PageSize, RenderConfig, DEFAULT_OUTPUT_DIR, DEFAULT_PREFIX};
use crate::convert::{write_report, Converter};
use crate::error::{ConvertError, ConvertResult};
use crate::excel::{SampleWorkbook, SheetLoader};
use crate::types::ConversionSummary;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Options for the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub file: Option<PathBuf>,
    pub sheet: Option<String>,
    pub prefix: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub page_size: Option<PageSize>,
    pub report: Option<PathBuf>,
    pub no_prompt: bool,
    pub verbose: bool,
}

/// Execute the convert command
pub fn convert(args: ConvertArgs) -> ConvertResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    convert_with_input(args, &mut input)
}

/// Convert command with an explicit answer source for the prompts
pub fn convert_with_input<R: BufRead>(args: ConvertArgs, input: &mut R) -> ConvertResult<()> {
    println!("{}", "📄 RowPDF - Spreadsheet rows to PDF".bold().green());
    println!("{}", "=".repeat(50));

    let file = match args.file {
        Some(file) => file,
        None if args.no_prompt => {
            return Err(ConvertError::Config(
                "No spreadsheet given (pass FILE or drop --no-prompt)".to_string(),
            ))
        }
        None => PathBuf::from(ask(input, "Enter the path to your Excel file: ")?),
    };

    if !file.exists() {
        println!("{} File '{}' not found!", "❌ Error:".red().bold(), file.display());
        return Err(ConvertError::SourceNotFound(file));
    }

    let mut config = match &args.config {
        Some(path) => {
            if args.verbose {
                println!("{}", format!("⚙️  Loading config {}", path.display()).cyan());
            }
            RenderConfig::from_yaml_file(path)?
        }
        None => RenderConfig::default(),
    };
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }

    let sheets = SheetLoader::new(&file).list_sheets()?;
    println!("\nAvailable sheets: {}", sheets.join(", ").bright_blue());

    let sheet = match args.sheet {
        Some(sheet) => sheet,
        None if sheets.len() > 1 && !args.no_prompt => prompt_for_sheet(input, &sheets)?,
        None => sheets.first().cloned().ok_or_else(|| ConvertError::SourceFormat {
            path: file.clone(),
            reason: "workbook contains no sheets".to_string(),
        })?,
    };

    let prefix = match args.prefix {
        Some(prefix) => prefix,
        None if args.no_prompt => DEFAULT_PREFIX.to_string(),
        None => ask_with_default(input, "Enter filename prefix", DEFAULT_PREFIX)?,
    };

    let output = match args.output {
        Some(output) => output,
        None if args.no_prompt => PathBuf::from(DEFAULT_OUTPUT_DIR),
        None => PathBuf::from(ask_with_default(
            input,
            "Enter output folder name",
            DEFAULT_OUTPUT_DIR,
        )?),
    };

    if args.verbose {
        println!("{}", format!("\n📖 Reading sheet '{}'...", sheet).cyan());
    }

    let converter = Converter::with_config(&file, config.with_output_dir(&output));
    let summary = converter.convert(Some(&sheet), &prefix)?;

    print_summary(&summary, args.verbose);

    if let Some(report) = args.report {
        let path = write_report(&summary, &report)?;
        println!("   Report: {}", path.display());
    }

    Ok(())
}

/// Execute the sheets command
pub fn sheets(file: PathBuf) -> ConvertResult<()> {
    let sheets = SheetLoader::new(&file).list_sheets()?;

    println!("{}", "📄 RowPDF - Sheets".bold().green());
    println!("   File: {}\n", file.display());
    for (i, sheet) in sheets.iter().enumerate() {
        println!("   {}. {}", i + 1, sheet.bright_blue());
    }
    Ok(())
}

/// Execute the sample command
pub fn sample(path: PathBuf) -> ConvertResult<()> {
    SampleWorkbook::write(&path)?;
    println!(
        "{} Sample Excel file '{}' created!",
        "✅".green(),
        path.display()
    );
    println!("   Try: rowpdf convert {} --prefix employee", path.display());
    Ok(())
}

fn print_summary(summary: &ConversionSummary, verbose: bool) {
    println!("\nProcessing {} rows...", summary.total);

    if verbose {
        for result in &summary.results {
            if let Some(path) = &result.output_path {
                println!("   Created PDF: {}", path.display());
            }
        }
    }

    for failure in summary.failures() {
        println!(
            "   {} Record {}: {}",
            "❌".red(),
            failure.index,
            failure.error.as_deref().unwrap_or("unknown error").red()
        );
    }

    println!();
    if summary.is_complete_success() {
        println!(
            "{} Conversion complete! {} PDFs created in '{}' folder",
            "✅".green(),
            summary.succeeded.to_string().bold(),
            summary.output_dir.display()
        );
    } else {
        println!(
            "{} Conversion finished: {} of {} PDFs created in '{}' folder, {} failed",
            "⚠️".yellow(),
            summary.succeeded.to_string().bold(),
            summary.total,
            summary.output_dir.display(),
            summary.failed.to_string().red().bold()
        );
    }
}

/// Show a numbered sheet menu and read the choice
fn prompt_for_sheet<R: BufRead>(input: &mut R, sheets: &[String]) -> ConvertResult<String> {
    println!("\nMultiple sheets found:");
    for (i, sheet) in sheets.iter().enumerate() {
        println!("{}. {}", i + 1, sheet);
    }
    let choice = ask(input, "\nEnter sheet number (or press Enter for first sheet): ")?;

    match resolve_sheet_choice(sheets, &choice) {
        SheetChoice::Selected(sheet) | SheetChoice::Default(sheet) => Ok(sheet),
        SheetChoice::OutOfRange(sheet) => {
            println!("{}", "Invalid selection, using first sheet".yellow());
            Ok(sheet)
        }
        SheetChoice::NotANumber(sheet) => {
            println!("{}", "Invalid input, using first sheet".yellow());
            Ok(sheet)
        }
    }
}

/// Result of interpreting a sheet menu answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetChoice {
    Selected(String),
    /// Empty answer: first sheet
    Default(String),
    OutOfRange(String),
    NotANumber(String),
}

/// Map a 1-based menu answer to a sheet name, falling back to the first sheet
pub fn resolve_sheet_choice(sheets: &[String], choice: &str) -> SheetChoice {
    let first = sheets.first().cloned().unwrap_or_default();
    let choice = choice.trim();
    if choice.is_empty() {
        return SheetChoice::Default(first);
    }
    match choice.parse::<usize>() {
        Ok(n) if n >= 1 && n <= sheets.len() => SheetChoice::Selected(sheets[n - 1].clone()),
        Ok(_) => SheetChoice::OutOfRange(first),
        Err(_) => SheetChoice::NotANumber(first),
    }
}

fn ask<R: BufRead>(input: &mut R, question: &str) -> ConvertResult<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn ask_with_default<R: BufRead>(input: &mut R, question: &str, default: &str) -> ConvertResult<String> {
    let answer = ask(input, &format!("{} (default: '{}'): ", question, default))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
