//! JSON Lines (JSONL) output writer.
//!
//! One transfer per line, which suits `jq`, spreadsheets importing NDJSON and
//! appending daily batches to one log.

use std::fs::File;
use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::error::Result;
use crate::transfer::{ParsingResult, Transfer};

/// A transfer flattened with its direction and normalized quantity.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonlTransfer<'a> {
    direction: String,
    #[serde(flatten)]
    transfer: &'a Transfer,
    quantity: String,
}

impl<'a> JsonlTransfer<'a> {
    fn new(transfer: &'a Transfer) -> Self {
        Self {
            direction: transfer.direction(),
            transfer,
            quantity: transfer.quantity(),
        }
    }
}

/// Writes transfers to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"direction":"Берлин ➡️ Ладожская","product":"волжский",...,"quantity":"1 шт"}
/// ```
///
/// Unparsed lines are not exported.
pub fn write_jsonl(result: &ParsingResult, output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(result, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts transfers to a JSONL string.
pub fn to_jsonl(result: &ParsingResult) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(result, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(result: &ParsingResult, writer: &mut W) -> Result<()> {
    for transfer in result.transfers() {
        let line = serde_json::to_string(&JsonlTransfer::new(transfer))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TransferParser;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    fn sample() -> ParsingResult {
        TransferParser::from_shorthands("б-Берлин,к-Кулакова,л-Ладожская")
            .parse("черника, с бк по 1 на л\nмусор")
    }

    #[test]
    fn test_write_jsonl_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&sample(), path).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["direction"], "Берлин ➡️ Ладожская");
        assert_eq!(first["product"], "черника");
        assert_eq!(first["rawQuantity"], "1");
        assert_eq!(first["quantity"], "1 шт");

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["sourceShop"], "Кулакова");
    }

    #[test]
    fn test_jsonl_no_array_wrapper() {
        let content = to_jsonl(&sample()).unwrap();
        assert!(!content.starts_with('['));
        assert!(content.ends_with('\n'));
        assert!(!content.contains("мусор"));
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(to_jsonl(&ParsingResult::default()).unwrap(), "");
    }
}
