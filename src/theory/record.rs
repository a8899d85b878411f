use std::io::Read;

use anyhow::{Context, Result};
use csv::StringRecord;
use serde::{Deserialize, Deserializer};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TheoryRow {
    #[serde(default)]
    pub theory: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantum_fidelity: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stability: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub entropy: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cqc: f64,
    #[serde(default)]
    pub known_result: String,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0))
}

pub(super) fn parse_rows<R: Read>(input: R) -> Result<Vec<TheoryRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader
        .headers()
        .context("CSV header row is unreadable")?
        .clone();

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in reader.records().enumerate() {
        let row = record.and_then(|record| {
            fit_to_header(&record, headers.len()).deserialize::<TheoryRow>(Some(&headers))
        });
        match row {
            Ok(row) => rows.push(row),
            Err(error) => {
                skipped += 1;
                tracing::warn!(record = line + 1, %error, "skipping unreadable CSV record");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, kept = rows.len(), "CSV parsing had errors");
    }

    Ok(rows)
}

// Short records get empty trailing cells, long ones lose their surplus.
fn fit_to_header(record: &StringRecord, width: usize) -> StringRecord {
    let mut fitted = record.iter().take(width).collect::<StringRecord>();
    while fitted.len() < width {
        fitted.push_field("");
    }
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "theory,category,quantum_fidelity,stability,entropy,cqc,known_result\n";

    #[test]
    fn parses_typed_columns() {
        let csv = format!(
            "{HEADER}Poincare Conjecture,Topology,42.5,0.91,1.2,15000,Solved (Perelman)\n"
        );
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.theory, "Poincare Conjecture");
        assert_eq!(row.category, "Topology");
        assert_eq!(row.quantum_fidelity, 42.5);
        assert_eq!(row.stability, 0.91);
        assert_eq!(row.entropy, 1.2);
        assert_eq!(row.cqc, 15000.0);
        assert_eq!(row.known_result, "Solved (Perelman)");
    }

    #[test]
    fn missing_values_default_to_zero_and_empty() {
        let csv = format!("{HEADER}Goldbach,Number Theory,,n/a,,,\n");
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].quantum_fidelity, 0.0);
        assert_eq!(rows[0].stability, 0.0);
        assert_eq!(rows[0].entropy, 0.0);
        assert_eq!(rows[0].cqc, 0.0);
        assert_eq!(rows[0].known_result, "");
    }

    #[test]
    fn short_records_and_blank_lines_are_tolerated() {
        let csv = format!("{HEADER}\nHodge,Algebraic Geometry,12\n\n");
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].theory, "Hodge");
        assert_eq!(rows[0].quantum_fidelity, 12.0);
        assert_eq!(rows[0].stability, 0.0);
        assert_eq!(rows[0].known_result, "");
    }

    #[test]
    fn row_without_result_cell_keeps_its_values() {
        let csv = format!(
            "{HEADER}Riemann,Number Theory,20,0.4,2.0,50\nPoincare,Topology,40,0.9,1.1,12000,Solved\n"
        );
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].theory, "Riemann");
        assert_eq!(rows[0].quantum_fidelity, 20.0);
        assert_eq!(rows[0].stability, 0.4);
        assert_eq!(rows[0].entropy, 2.0);
        assert_eq!(rows[0].cqc, 50.0);
        assert_eq!(rows[0].known_result, "");
        assert_eq!(rows[1].known_result, "Solved");
    }

    #[test]
    fn surplus_cells_are_dropped() {
        let csv = format!("{HEADER}Hopf,Differential Geometry,9,0.3,1,4,Open,extra,cells\n");
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].known_result, "Open");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "theory,notes,category,quantum_fidelity,stability,entropy,cqc,known_result\n\
                   Knot Invariants,draft,Knot Theory,10,0.5,0.3,2,Open\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].category, "Knot Theory");
        assert_eq!(rows[0].known_result, "Open");
    }
}
