//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::error::Result;
use crate::transfer::{ParsingResult, Transfer};

const HEADER: [&str; 9] = [
    "Direction",
    "Category",
    "Product",
    "Source",
    "SourceShop",
    "Destination",
    "DestinationShop",
    "Quantity",
    "RawText",
];

/// Writes transfers to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Direction`, `Category`, `Product`, `Source`, `SourceShop`,
///   `Destination`, `DestinationShop`, `Quantity`, `RawText`
/// - One row per transfer, directions in label order
/// - `Quantity` is normalized (`2шт` becomes `2 шт`)
/// - Encoding: UTF-8
///
/// Unparsed lines are not part of the table.
pub fn write_csv(result: &ParsingResult, output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(result, file)
}

/// Converts transfers to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv(result: &ParsingResult) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(result, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(result: &ParsingResult, sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(HEADER)?;
    for transfer in result.transfers() {
        writer.write_record(build_record(transfer))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_record(transfer: &Transfer) -> [String; 9] {
    [
        transfer.direction(),
        transfer.category.clone().unwrap_or_default(),
        transfer.product.clone(),
        transfer.source.clone(),
        transfer.source_shop.clone(),
        transfer.destination.clone(),
        transfer.destination_shop.clone(),
        transfer.quantity(),
        transfer.raw_text.clone(),
    ]
}
