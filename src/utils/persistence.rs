use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    domain::{bet::BetRecord, performance::PerformanceReport},
    errors::ResultsError,
};

use super::paths::write_atomic;

/// Envelope the results API wraps around its records.
#[derive(Deserialize)]
struct ResultsEnvelope {
    results: Vec<BetRecord>,
}

/// Parses either a bare array of records or `{ "results": [...] }`. Each
/// shape is decoded directly so errors point at the offending record.
pub fn parse_records(data: &str) -> Result<Vec<BetRecord>, ResultsError> {
    match data.trim_start().chars().next() {
        Some('[') => Ok(serde_json::from_str::<Vec<BetRecord>>(data)?),
        Some('{') => Ok(serde_json::from_str::<ResultsEnvelope>(data)?.results),
        _ => Err(ResultsError::InvalidInput(
            "results must be a JSON array or an object with a `results` array".into(),
        )),
    }
}

/// Loads an exported results file.
pub fn load_records_from_file(path: &Path) -> Result<Vec<BetRecord>, ResultsError> {
    let data = fs::read_to_string(path)?;
    let records = parse_records(&data)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded results");
    Ok(records)
}

/// Writes a report as pretty JSON, staging to a temporary file first.
pub fn save_report_to_file(report: &PerformanceReport, path: &Path) -> Result<(), ResultsError> {
    let json = serde_json::to_string_pretty(report)?;
    write_atomic(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_wrapped_payloads() {
        let bare = r#"[{"date":"2024-01-01","result":"won","odds":3.5,"stake":10,"pl":25}]"#;
        let wrapped = format!(r#"{{"results": {bare}}}"#);
        assert_eq!(parse_records(bare).unwrap().len(), 1);
        assert_eq!(parse_records(&wrapped).unwrap().len(), 1);
    }

    #[test]
    fn rejects_unknown_shapes() {
        assert!(matches!(
            parse_records(r#"{"rows": []}"#),
            Err(ResultsError::Serde(_))
        ));
    }

    #[test]
    fn field_errors_name_the_field() {
        let data = r#"[{"date":"2024-01-01","result":"won","odds":3.5,"stake":10,"pl":25},
                       {"date":"2024-01-02","result":"won","odds":3.5,"stake":10}]"#;
        let err = parse_records(data).expect_err("missing pl");
        assert!(err.to_string().contains("missing field `pl`"), "{err}");
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn null_odds_do_not_reject_the_file() {
        let data = r#"{"results": [
            {"date":"2024-01-01","result":"won","bsp":6.0,"stake":10,"pl":50},
            {"date":"2024-01-02","result":"lost","bsp":null,"stake":10,"pl":-10}
        ]}"#;
        let records = parse_records(data).expect("null odds tolerated");
        assert_eq!(records.len(), 2);
        assert!(!records[1].has_finite_odds());
    }

    #[test]
    fn scalar_payload_is_invalid_input() {
        assert!(matches!(
            parse_records("42"),
            Err(ResultsError::InvalidInput(_))
        ));
    }
}
