use std::io::Write;

use serde::Serialize;

use crate::aggregator::shares;
use crate::error::Result;
use crate::models::Summary;
use crate::navigation::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    key: &'a str,
    name: &'a str,
    units: i64,
    share: String,
}

pub fn write_csv<W: Write, S: Summary>(writer: W, summaries: &[S]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (s, pct) in summaries.iter().zip(shares(summaries)) {
        wtr.serialize(CsvRow {
            key: s.key(),
            name: s.name(),
            units: s.units(),
            share: format!("{pct:.1}"),
        })?;
    }
    // serialize() only emits a header alongside the first row
    if summaries.is_empty() {
        wtr.write_record(["key", "name", "units", "share"])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write, S: Serialize>(mut writer: W, summaries: &[S]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, summaries)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_level<W: Write>(writer: W, level: &Level, format: ExportFormat) -> Result<()> {
    match (level, format) {
        (Level::Models(v), ExportFormat::Csv) => write_csv(writer, v),
        (Level::Dealers(v), ExportFormat::Csv) => write_csv(writer, v),
        (Level::Salespeople(v), ExportFormat::Csv) => write_csv(writer, v),
        (Level::Models(v), ExportFormat::Json) => write_json(writer, v),
        (Level::Dealers(v), ExportFormat::Json) => write_json(writer, v),
        (Level::Salespeople(v), ExportFormat::Json) => write_json(writer, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::summarize_dealers;
    use crate::models::SaleRecord;

    fn records() -> Vec<SaleRecord> {
        [("d1", "s1", 5), ("d1", "s2", 3), ("d2", "s3", 2)]
            .iter()
            .map(|(d, s, u)| SaleRecord {
                model_id: "m1".into(),
                dealer_id: d.to_string(),
                salesperson_id: s.to_string(),
                model_name: "Camry".into(),
                dealer_name: format!("Dealer {d}"),
                salesperson_name: String::new(),
                units: *u,
            })
            .collect()
    }

    #[test]
    fn test_csv_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &summarize_dealers(&records(), "m1")).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "key,name,units,share");
        assert_eq!(lines[1], "d1,Dealer d1,8,80.0");
        assert_eq!(lines[2], "d2,Dealer d2,2,20.0");
    }

    #[test]
    fn test_csv_empty_still_has_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &summarize_dealers(&records(), "none")).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().trim(), "key,name,units,share");
    }

    #[test]
    fn test_json_level() {
        let mut buf = Vec::new();
        let level = Level::Dealers(summarize_dealers(&records(), "m1"));
        write_level(&mut buf, &level, ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["dealerId"], "d1");
        assert_eq!(value[0]["units"], 8);
    }
}
