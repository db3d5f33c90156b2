use crate::apis::places::DirectoryEntry;
use crate::error::Result;
use crate::types::ExhibitionRecord;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Report column headers, in output order
pub const CSV_HEADERS: [&str; 13] = [
    "館別",
    "展覽名稱",
    "展覽日期",
    "開始日期",
    "結束日期",
    "常設展",
    "展覽主題",
    "展覽連結",
    "展覽圖片",
    "展覽地點",
    "展覽時間",
    "展覽類別",
    "備註",
];

/// Museum directory column headers
pub const DIRECTORY_HEADERS: [&str; 9] = [
    "place_id", "館名", "地址", "緯度", "經度", "網站", "電話", "評分", "營業時間",
];

// Lets Excel detect UTF-8
const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` means JSON, anything else CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// Write the report, creating parent directories as needed
pub fn write_report(path: &Path, records: &[ExhibitionRecord], format: ExportFormat) -> Result<()> {
    let mut writer = create_output(path)?;
    match format {
        ExportFormat::Csv => write_csv(&mut writer, records)?,
        ExportFormat::Json => write_json(&mut writer, records)?,
    }
    writer.flush()?;
    info!("Wrote {} exhibitions to {}", records.len(), path.display());
    Ok(())
}

/// Write the museum directory in the same formats as the report
pub fn write_directory(path: &Path, entries: &[DirectoryEntry], format: ExportFormat) -> Result<()> {
    let mut writer = create_output(path)?;
    match format {
        ExportFormat::Csv => write_directory_csv(&mut writer, entries)?,
        ExportFormat::Json => write_json(&mut writer, entries)?,
    }
    writer.flush()?;
    info!("Wrote {} directory entries to {}", entries.len(), path.display());
    Ok(())
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

pub fn write_csv<W: Write>(mut w: W, records: &[ExhibitionRecord]) -> Result<()> {
    write_header(&mut w, &CSV_HEADERS)?;
    for record in records {
        write_row(&mut w, &csv_row(record))?;
    }
    Ok(())
}

pub fn write_directory_csv<W: Write>(mut w: W, entries: &[DirectoryEntry]) -> Result<()> {
    write_header(&mut w, &DIRECTORY_HEADERS)?;
    for entry in entries {
        write_row(&mut w, &directory_row(entry))?;
    }
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(mut w: W, rows: &[T]) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, rows)?;
    w.write_all(b"\n")?;
    Ok(())
}

fn write_header<W: Write>(mut w: W, headers: &[&str]) -> std::io::Result<()> {
    w.write_all(UTF8_BOM.as_bytes())?;
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_row(&mut w, &header)
}

fn csv_row(record: &ExhibitionRecord) -> Vec<String> {
    let dates = &record.dates;
    vec![
        record.museum.clone(),
        record.title.clone(),
        record.date_text.clone(),
        dates.start_date_string().unwrap_or_default(),
        dates.end_date_string().unwrap_or_default(),
        if dates.is_permanent() { "1" } else { "0" }.to_string(),
        record.topic.clone(),
        record.url.clone(),
        record.image_url.clone(),
        record.location.clone(),
        record.time.clone(),
        record.category.clone(),
        record.note.clone(),
    ]
}

fn directory_row(entry: &DirectoryEntry) -> Vec<String> {
    let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
    vec![
        entry.place_id.clone(),
        entry.name.clone(),
        entry.address.clone(),
        number(entry.latitude),
        number(entry.longitude),
        entry.website.clone(),
        entry.phone.clone(),
        number(entry.rating),
        entry.opening_hours.clone(),
    ]
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(mut w: W, row: &[String]) -> std::io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{DateNormalizer, FubonDates, NpmDates};
    use crate::types::{Museum, RawListing};

    fn record(museum: Museum, title: &str, raw: &str, dates: &dyn DateNormalizer) -> ExhibitionRecord {
        let listing = RawListing {
            title: title.to_string(),
            date_text: raw.to_string(),
            ..Default::default()
        };
        ExhibitionRecord::from_listing(museum, listing, dates.normalize(raw))
    }

    #[test]
    fn test_csv_layout() {
        let records = vec![
            record(Museum::Fubon, "遇見雷諾瓦", "2025.10.23 - 2026.4.20", &FubonDates),
            record(Museum::Npm, "故宮精華", "常設展", &NpmDates),
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(UTF8_BOM));
        let lines: Vec<&str> = text.trim_start_matches(UTF8_BOM).lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADERS.join(","));
        assert_eq!(
            lines[1],
            "富邦美術館,遇見雷諾瓦,2025.10.23 - 2026.4.20,2025-10-23,2026-04-20,0,,,,,,,"
        );
        assert_eq!(lines[2], "國立故宮博物院,故宮精華,常設展,,,1,,,,,,,");
    }

    #[test]
    fn test_csv_quoting() {
        let records = vec![record(Museum::Fubon, "A, \"B\"\nC", "TBD", &FubonDates)];
        let mut out = Vec::new();
        write_csv(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("富邦美術館,\"A, \"\"B\"\"\nC\",TBD,,,0,"));
    }

    #[test]
    fn test_directory_csv_layout() {
        let entries = vec![DirectoryEntry {
            place_id: "p1".to_string(),
            name: "臺北市立美術館".to_string(),
            address: "104台北市中山區中山北路三段181號".to_string(),
            latitude: Some(25.0724),
            longitude: Some(121.5247),
            rating: Some(4.5),
            opening_hours: "星期一: 休息|星期二: 09:30 – 17:30".to_string(),
            ..Default::default()
        }];
        let mut out = Vec::new();
        write_directory_csv(&mut out, &entries).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.trim_start_matches(UTF8_BOM).lines().collect();
        assert_eq!(lines[0], "place_id,館名,地址,緯度,經度,網站,電話,評分,營業時間");
        assert_eq!(
            lines[1],
            "p1,臺北市立美術館,104台北市中山區中山北路三段181號,25.0724,121.5247,,,4.5,星期一: 休息|星期二: 09:30 – 17:30"
        );
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("out/report.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("report.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("report")), ExportFormat::Csv);
    }

    #[test]
    fn test_write_report_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let records = vec![record(Museum::Fubon, "展", "2025.12.24", &FubonDates)];
        write_report(&path, &records, ExportFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed[0]["start_date"], "2025-12-24");
        assert_eq!(parsed[0]["end_date"], serde_json::Value::Null);
        assert_eq!(parsed[0]["is_permanent"], true);
    }
}
