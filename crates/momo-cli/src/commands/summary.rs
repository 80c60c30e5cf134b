use momo_core::error::StatementError;
use momo_core::summary::StatementSummary;
use momo_core::StatementParser;
use std::path::Path;

use crate::commands::{load_text, parse_options};
use crate::output;

pub fn run(
    input_file: &Path,
    provider: Option<String>,
    output_format: &str,
    raw_text: bool,
    no_repair: bool,
) -> Result<(), StatementError> {
    let text = load_text(input_file, raw_text)?;
    let options = parse_options(provider, no_repair)?;
    let statement = StatementParser::new()?
        .parse(&text, &options)?
        .require_transactions()?;
    let summary = StatementSummary::from_statement(&statement);

    match output_format {
        "json" => println!("{}", output::json::to_string(&summary)?),
        _ => println!("{}", output::table::format_summary(&summary)),
    }
    Ok(())
}
