//! Tests for output writers (report, JSON, JSONL, CSV)

use std::fs;

use tempfile::tempdir;
use transfersort::config::ReportConfig;
use transfersort::core::output::{write_csv, write_json, write_jsonl};
use transfersort::format::{OutputFormat, to_format_string, write_to_format};
use transfersort::{ParsingResult, TransferParser};

fn sample_result() -> ParsingResult {
    TransferParser::from_shorthands("б-Берлин,к-Кулакова,л-Ладожская").parse(
        "Dojo 12к\nКислое яблоко с к на б\nТабак с л 3 на б\n\nволжский, с б на л\nмусор",
    )
}

// ============================================================================
// JSON Writer Tests
// ============================================================================

mod json_writer_tests {
    use super::*;

    #[test]
    fn test_write_json_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        let path_str = path.to_str().unwrap();

        let result = sample_result();
        write_json(&result, path_str).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: ParsingResult = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = to_format_string(&sample_result(), OutputFormat::Json, &ReportConfig::new())
            .unwrap();

        assert!(json.contains("\"transfersByDirection\""));
        assert!(json.contains("\"shopBranchMap\""));
        assert!(json.contains("\"rawQuantity\""));
        assert!(!json.contains("raw_quantity"));
    }

    #[test]
    fn test_json_omits_missing_category() {
        let json = to_format_string(&sample_result(), OutputFormat::Json, &ReportConfig::new())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let volzhsky = &value["transfersByDirection"]["Берлин ➡️ Ладожская"][0];
        assert!(volzhsky.get("category").is_none());

        let apple = &value["transfersByDirection"]["Кулакова ➡️ Берлин"][0];
        assert_eq!(apple["category"], "Dojo 12к");
    }
}

// ============================================================================
// JSONL Writer Tests
// ============================================================================

mod jsonl_writer_tests {
    use super::*;

    #[test]
    fn test_write_jsonl_one_transfer_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.jsonl");
        let path_str = path.to_str().unwrap();

        write_jsonl(&sample_result(), path_str).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l["direction"].is_string()));
        assert!(lines.iter().all(|l| l["quantity"].is_string()));
    }

    #[test]
    fn test_jsonl_normalizes_quantity() {
        let jsonl =
            to_format_string(&sample_result(), OutputFormat::Jsonl, &ReportConfig::new()).unwrap();
        let tobacco: serde_json::Value = jsonl
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap())
            .find(|v| v["product"] == "Табак")
            .unwrap();

        assert_eq!(tobacco["rawQuantity"], "3");
        assert_eq!(tobacco["quantity"], "3 шт");
    }
}

// ============================================================================
// CSV Writer Tests
// ============================================================================

mod csv_writer_tests {
    use super::*;

    #[test]
    fn test_write_csv_parses_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.csv");
        let path_str = path.to_str().unwrap();

        write_csv(&sample_result(), path_str).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(&path)
            .unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("Direction"));
        assert_eq!(headers.len(), 9);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get(2), Some("волжский"));
        assert_eq!(rows[0].get(1), Some(""));
    }
}

// ============================================================================
// Format dispatch
// ============================================================================

mod format_dispatch_tests {
    use super::*;

    #[test]
    fn test_write_to_format_all_formats() {
        let dir = tempdir().unwrap();
        let result = sample_result();

        for format in OutputFormat::all() {
            let path = dir.path().join(format!("out.{}", format.extension()));
            let path_str = path.to_str().unwrap();

            write_to_format(&result, path_str, *format, &ReportConfig::new()).unwrap();

            let written = fs::read_to_string(&path).unwrap();
            let expected = to_format_string(&result, *format, &ReportConfig::new()).unwrap();
            assert_eq!(written, expected, "format {format}");
        }
    }

    #[test]
    fn test_report_text_contains_notice() {
        let text =
            to_format_string(&sample_result(), OutputFormat::Report, &ReportConfig::new()).unwrap();

        assert!(text.contains("🚚 *КУЛАКОВА ➡️ БЕРЛИН*"));
        assert!(text.contains("⚠️"));
        assert!(text.contains("• мусор"));
        assert!(text.ends_with("• мусор"));
    }

    #[test]
    fn test_detect_format_then_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transfers.ndjson");
        let path_str = path.to_str().unwrap();

        let format = OutputFormat::from_path(path_str).unwrap();
        write_to_format(&sample_result(), path_str, format, &ReportConfig::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);
    }
}
