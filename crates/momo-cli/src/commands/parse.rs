use momo_core::error::StatementError;
use momo_core::export;
use momo_core::model::Statement;
use momo_core::StatementParser;
use std::path::{Path, PathBuf};

use crate::commands::{load_text, parse_options};
use crate::output;

pub fn run(
    input_file: &Path,
    provider: Option<String>,
    output_format: &str,
    output_file: Option<PathBuf>,
    raw_text: bool,
    no_repair: bool,
) -> Result<(), StatementError> {
    let text = load_text(input_file, raw_text)?;
    let options = parse_options(provider, no_repair)?;
    let statement = StatementParser::new()?
        .parse(&text, &options)?
        .require_transactions()?;

    match output_file {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(export::suggested_filename(&statement))
            } else {
                path
            };
            // Files are always machine-readable: JSON if asked for, CSV otherwise.
            let contents = match output_format {
                "json" => output::json::to_string(&statement)?,
                _ => export::to_csv_string(&statement)?,
            };
            std::fs::write(&path, contents)?;
            eprintln!(
                "Parsed {} {} transaction(s), written to {}",
                statement.transactions.len(),
                statement.provider,
                path.display()
            );
            report_warnings(&statement);
        }
        None => {
            match output_format {
                "json" => println!("{}", output::json::to_string(&statement)?),
                "csv" => print!("{}", export::to_csv_string(&statement)?),
                _ => {
                    println!("{}", output::table::format_statement(&statement));
                    report_warnings(&statement);
                }
            }
        }
    }

    Ok(())
}

fn report_warnings(statement: &Statement) {
    for w in &statement.warnings {
        eprintln!("  warning: {w}");
    }
}
