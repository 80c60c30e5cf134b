use momo_core::error::StatementError;
use momo_core::StatementParser;
use std::path::Path;

use crate::commands::load_text;

pub fn run(input_file: &Path, raw_text: bool) -> Result<(), StatementError> {
    let text = load_text(input_file, raw_text)?;
    let provider = StatementParser::new()?
        .detect(&text)
        .ok_or(StatementError::ProviderUndetectable)?;
    println!("{provider}");
    Ok(())
}
