//! Award table ingest.
//!
//! FPDS "CSV" exports are comma-delimited text with a header row. Bodies are
//! Latin-1, not UTF-8: descriptions occasionally carry bytes such as `0xE9`
//! that would make a UTF-8 decode fail.
//!
//! Only three columns matter downstream; everything else is ignored. A missing
//! column, a record too short to reach every required column, or a broken
//! record is fatal (no row skipping).

use std::collections::HashMap;

use csv::StringRecord;

use crate::domain::AwardRecord;
use crate::error::PipelineError;

/// Header names (normalized) accepted for each required column, first match wins.
const OBLIGATION_HEADERS: [&str; 3] = ["action obligation ($)", "action obligation", "obligation amount"];
const CODE_HEADERS: [&str; 2] = ["psc", "product or service code"];
const DESCRIPTION_HEADERS: [&str; 3] = ["psc description", "product or service description", "product or service code description"];

/// Display name of the obligation column, for error messages.
pub const OBLIGATION_FIELD: &str = "Action Obligation ($)";

/// Decode a Latin-1 (ISO-8859-1) body. Every byte maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse delimited award text into records, in source order.
///
/// A body with no content at all is an empty dataset, not a parse failure.
pub fn parse_award_table(text: &str) -> Result<Vec<AwardRecord>, PipelineError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| PipelineError::Parse(format!("failed to read header row: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let obligation_idx = resolve_column(&header_map, &OBLIGATION_HEADERS)?;
    let code_idx = resolve_column(&header_map, &CODE_HEADERS)?;
    let description_idx = resolve_column(&header_map, &DESCRIPTION_HEADERS)?;

    let required_len = obligation_idx.max(code_idx).max(description_idx) + 1;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| PipelineError::Parse(format!("record {}: {e}", idx + 1)))?;
        // Line the record starts on; quoted fields can span lines.
        let line = record.position().map_or(idx + 2, |p| p.line() as usize);

        if record.len() < required_len {
            return Err(PipelineError::Parse(format!(
                "line {line}: expected at least {required_len} fields, found {}",
                record.len()
            )));
        }

        let category_code = field(&record, code_idx).to_string();
        if category_code.is_empty() {
            return Err(PipelineError::Parse(format!("line {line}: missing PSC code")));
        }

        records.push(AwardRecord {
            line,
            obligation_amount: field(&record, obligation_idx).to_string(),
            category_code,
            category_description: field(&record, description_idx).to_string(),
        });
    }

    Ok(records)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // Keep the first occurrence of duplicated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet re-saves sometimes prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_column(header_map: &HashMap<String, usize>, candidates: &[&str]) -> Result<usize, PipelineError> {
    candidates
        .iter()
        .find_map(|name| header_map.get(*name).copied())
        .ok_or_else(|| {
            PipelineError::Parse(format!(
                "missing required column (expected one of: {})",
                candidates.join(", ")
            ))
        })
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Award ID,Action Obligation ($),PSC,PSC Description,Vendor Name
GS-1,\"$1,234.56\",D301,IT AND TELECOM- FACILITY OPERATION AND MAINTENANCE,ACME
GS-2,$10.00,D302,IT AND TELECOM- SYSTEMS DEVELOPMENT,INITECH
GS-3,,D302,IT AND TELECOM- SYSTEMS DEVELOPMENT,INITECH
";

    #[test]
    fn parses_required_columns_in_order() {
        let records = parse_award_table(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[0].obligation_amount, "$1,234.56");
        assert_eq!(records[0].category_code, "D301");
        assert_eq!(records[1].category_description, "IT AND TELECOM- SYSTEMS DEVELOPMENT");
        assert_eq!(records[2].obligation_amount, "");
    }

    #[test]
    fn header_only_body_is_empty() {
        let records = parse_award_table("Action Obligation ($),PSC,PSC Description\n").unwrap();
        assert!(records.is_empty());
        assert!(parse_award_table("  \r\n").unwrap().is_empty());
    }

    #[test]
    fn missing_column_is_parse_error() {
        let err = parse_award_table("Action Obligation ($),PSC\n$1.00,D301\n").unwrap_err();
        match err {
            PipelineError::Parse(msg) => assert!(msg.contains("psc description")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn html_error_page_is_parse_error() {
        let err = parse_award_table("<html><body>Service unavailable</body></html>").unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }

    #[test]
    fn blank_psc_code_is_parse_error() {
        let err = parse_award_table("Action Obligation ($),PSC,PSC Description\n$1.00,,THING\n").unwrap_err();
        match err {
            PipelineError::Parse(msg) => assert!(msg.contains("line 2")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn short_record_is_parse_error() {
        let err = parse_award_table("Action Obligation ($),PSC,PSC Description\n$5.00,R408\n").unwrap_err();
        match err {
            PipelineError::Parse(msg) => {
                assert!(msg.contains("line 2"));
                assert!(msg.contains("expected at least 3 fields, found 2"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn extra_trailing_fields_are_ignored() {
        let records = parse_award_table("Action Obligation ($),PSC,PSC Description\n$5.00,R408,SUPPORT,EXTRA\n").unwrap();
        assert_eq!(records[0].category_description, "SUPPORT");
    }

    #[test]
    fn line_numbers_follow_multiline_fields() {
        let text = "Action Obligation ($),PSC,PSC Description\n\
                    $5.00,R408,\"PROGRAM\nSUPPORT\"\n\
                    $6.00,R499,AUDIT\n";
        let records = parse_award_table(text).unwrap();
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 4);
    }

    #[test]
    fn latin1_bytes_decode_without_loss() {
        let body = b"Action Obligation ($),PSC,PSC Description\n$5.00,R408,PROGRAM MGMT \xE9TUDE\n";
        let text = decode_latin1(body);
        let records = parse_award_table(&text).unwrap();
        assert_eq!(records[0].category_description, "PROGRAM MGMT \u{e9}TUDE");
    }

    #[test]
    fn bom_prefixed_header_is_recognized() {
        let text = "\u{feff}Action Obligation ($),PSC,PSC Description\n$5.00,R408,SUPPORT\n";
        assert_eq!(parse_award_table(text).unwrap().len(), 1);
    }
}
