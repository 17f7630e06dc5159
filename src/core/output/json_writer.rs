//! JSON output writer.

use std::fs::File;
use std::io::Write;

use crate::error::Result;
use crate::transfer::ParsingResult;

/// Writes the whole parsing result to a JSON file.
///
/// # Format
/// ```json
/// {
///   "transfersByDirection": {
///     "Берлин ➡️ Ладожская": [{"product": "волжский", "source": "б", ...}]
///   },
///   "unparsed": [],
///   "shopBranchMap": {"б": "Берлин", "л": "Ладожская"},
///   "categories": []
/// }
/// ```
pub fn write_json(result: &ParsingResult, output_path: &str) -> Result<()> {
    let json = to_json(result)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the parsing result to a pretty-printed JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(result: &ParsingResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
