use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::info;

use crate::error::{DashboardError, Result};
use crate::models::{FilterOptions, Row, Table, Value};
use crate::utils::constants::{AGB_SHEET, BGB_SHEET, DATE_COLUMN, GHG_SHEET, WEATHER_SHEET};
use crate::utils::progress::LoadProgress;

/// Read-only tables and option lists shared by every request handler
#[derive(Debug, Clone)]
pub struct DataContext {
    pub ghg: Table,
    pub weather: Table,
    pub agb: Table,
    pub bgb: Table,
    pub options: FilterOptions,
}

impl DataContext {
    /// Assemble the context from already-built tables.
    ///
    /// The GHG and weather tables must have their date column converted.
    pub fn new(ghg: Table, weather: Table, agb: Table, bgb: Table) -> Result<Self> {
        for table in [&ghg, &weather] {
            if table.date_column().is_none() {
                return Err(DashboardError::Config(format!(
                    "Sheet '{}' has no converted date column",
                    table.name()
                )));
            }
        }

        let options = FilterOptions::derive(&ghg, &agb)?;
        Ok(Self {
            ghg,
            weather,
            agb,
            bgb,
            options,
        })
    }

    pub fn tables(&self) -> [&Table; 4] {
        [&self.ghg, &self.weather, &self.agb, &self.bgb]
    }

    /// Human-readable overview of the loaded sheets and option lists
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        for table in self.tables() {
            lines.push(format!(
                "Sheet '{}': {} rows, {} columns",
                table.name(),
                table.len(),
                table.columns().len()
            ));

            let numeric: Vec<&str> = table
                .numeric_columns()
                .into_iter()
                .map(|idx| table.columns()[idx].as_str())
                .collect();
            if !numeric.is_empty() {
                lines.push(format!("  Numeric columns: {}", numeric.join(", ")));
            }

            match table.date_range() {
                Some((first, last)) => lines.push(format!("  Date range: {} to {}", first, last)),
                None if table.date_column().is_some() => {
                    lines.push("  Date range: no dated rows".to_string())
                }
                None => {}
            }
        }

        lines.push("Filter options:".to_string());
        let lists = [
            ("GHG sites", &self.options.ghg_sites),
            ("GHG treatments", &self.options.ghg_treatments),
            ("GHG types", &self.options.ghg_types),
            ("AGB regions", &self.options.agb_regions),
            ("AGB sites", &self.options.agb_sites),
        ];
        for (name, list) in lists {
            let labels: Vec<&str> = list.entries().iter().map(|e| e.label.as_str()).collect();
            lines.push(format!("  {} ({}): {}", name, list.len(), labels.join(", ")));
        }

        lines.join("\n")
    }
}

pub struct WorkbookReader {
    silent: bool,
}

impl WorkbookReader {
    pub fn new() -> Self {
        Self { silent: false }
    }

    pub fn with_silent(silent: bool) -> Self {
        Self { silent }
    }

    /// Load the four dashboard sheets and normalise their dates
    pub fn load(&self, path: &Path) -> Result<DataContext> {
        let sheets = [GHG_SHEET, WEATHER_SHEET, AGB_SHEET, BGB_SHEET];
        let progress = LoadProgress::new(sheets.len(), self.silent);

        let mut workbook = open_workbook_auto(path)?;
        let available = workbook.sheet_names();

        let mut tables = Vec::with_capacity(sheets.len());
        for (index, sheet) in sheets.iter().enumerate() {
            progress.sheet_started(index, sheet);

            if !available.iter().any(|name| name == sheet) {
                return Err(DashboardError::SheetNotFound {
                    sheet: sheet.to_string(),
                });
            }

            let range = workbook.worksheet_range(sheet)?;
            let table = sheet_to_table(sheet, &range);
            info!(
                sheet = *sheet,
                rows = table.len(),
                columns = table.columns().len(),
                "loaded sheet"
            );
            tables.push(table);
        }

        let mut tables = tables.into_iter();
        let (Some(ghg), Some(weather), Some(agb), Some(bgb)) =
            (tables.next(), tables.next(), tables.next(), tables.next())
        else {
            return Err(DashboardError::Config(
                "Workbook did not yield four sheets".to_string(),
            ));
        };

        let ghg = ghg.with_serial_dates(DATE_COLUMN)?;
        let weather = weather.with_serial_dates(DATE_COLUMN)?;

        let context = DataContext::new(ghg, weather, agb, bgb)?;
        progress.finish_with_message(&format!("Loaded workbook {}", path.display()));
        Ok(context)
    }
}

impl Default for WorkbookReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a table from a sheet range whose first row holds the column names.
///
/// Rows with no values at all are skipped.
pub fn sheet_to_table(name: &str, range: &Range<Data>) -> Table {
    let mut rows = range.rows();

    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                cell_to_value(cell)
                    .display_text()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| format!("Unnamed: {}", idx))
            })
            .collect(),
        None => Vec::new(),
    };

    let data_rows = rows
        .map(|cells| cells.iter().map(cell_to_value).collect::<Vec<_>>())
        .filter(|values| values.iter().any(|v| !v.is_empty()))
        .map(Row::new)
        .collect();

    Table::new(name, columns, data_rows)
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Empty,
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::String(s) if s.trim().is_empty() => Value::Empty,
        Data::String(s) => Value::Text(s.clone()),
        // Serial day count; date columns are converted later
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) => parse_iso_timestamp(s)
            .map(Value::Timestamp)
            .unwrap_or_else(|| Value::Text(s.clone())),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

fn parse_iso_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use zip::{CompressionMethod, ZipWriter};

    const SHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

    fn xml_escape(s: &str) -> String {
        s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
    }

    // Numeric-looking cells are written as numbers, everything else as inline strings
    fn worksheet_xml(rows: &[&[&str]]) -> String {
        let mut data = String::new();
        for (r, row) in rows.iter().enumerate() {
            data.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, cell) in row.iter().enumerate() {
                let reference = format!("{}{}", (b'A' + c as u8) as char, r + 1);
                if cell.parse::<f64>().is_ok() {
                    data.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, cell));
                } else {
                    data.push_str(&format!(
                        r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                        reference,
                        xml_escape(cell)
                    ));
                }
            }
            data.push_str("</row>");
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="{}"><sheetData>{}</sheetData></worksheet>"#,
            SHEET_NS, data
        )
    }

    fn write_workbook(sheets: &[(&str, &[&[&str]])]) -> NamedTempFile {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        {
            let mut zip = ZipWriter::new(&file);
            let options =
                zip::write::FileOptions::default().compression_method(CompressionMethod::Stored);

            let overrides: String = (1..=sheets.len())
                .map(|i| {
                    format!(
                        r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                        i
                    )
                })
                .collect();
            zip.start_file("[Content_Types].xml", options).unwrap();
            write!(
                zip,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{}</Types>"#,
                overrides
            )
            .unwrap();

            zip.start_file("_rels/.rels", options).unwrap();
            write!(
                zip,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}"><Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
                PKG_REL_NS, REL_NS
            )
            .unwrap();

            let mut sheet_entries = String::new();
            let mut relationships = String::new();
            for (i, (name, _)) in sheets.iter().enumerate() {
                sheet_entries.push_str(&format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    xml_escape(name),
                    i + 1,
                    i + 1
                ));
                relationships.push_str(&format!(
                    r#"<Relationship Id="rId{}" Type="{}/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                    i + 1,
                    REL_NS,
                    i + 1
                ));
            }

            zip.start_file("xl/workbook.xml", options).unwrap();
            write!(
                zip,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="{}" xmlns:r="{}"><sheets>{}</sheets></workbook>"#,
                SHEET_NS, REL_NS, sheet_entries
            )
            .unwrap();

            zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
            write!(
                zip,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}">{}</Relationships>"#,
                PKG_REL_NS, relationships
            )
            .unwrap();

            for (i, (_, rows)) in sheets.iter().enumerate() {
                zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                    .unwrap();
                zip.write_all(worksheet_xml(rows).as_bytes()).unwrap();
            }

            zip.finish().unwrap();
        }
        file
    }

    const GHG_ROWS: &[&[&str]] = &[
        &["Site", "Treatment", "Type", "Date", "CO2", "CH4"],
        &["A", "X", "Y", "44000", "10", "0.5"],
        &["B", "X", "Y", "44001.5", "20", "1.5"],
    ];
    const WEATHER_ROWS: &[&[&str]] = &[
        &["Date", "RH, %", "Rain, mm", "Temp, °C"],
        &["44000.25", "88", "4", "27.5"],
    ];
    const AGB_ROWS: &[&[&str]] = &[
        &["Region", "Site", "Spp_Sci", "Fam", "dbh"],
        &["R1", "S1", "Shorea", "Dipterocarpaceae", "31"],
    ];
    const BGB_ROWS: &[&[&str]] = &[
        &["Region", "Land cover", "Site", "Depth"],
        &["R1", "Peat", "S1", "40"],
    ];

    fn range_from(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn test_sheet_to_table_reads_header_and_rows() {
        let range = range_from(&[
            &[s("Site"), s("Date"), s("CO2")],
            &[s("A"), Data::Float(44000.0), Data::Float(10.0)],
            &[Data::Empty, Data::Empty, Data::Empty],
            &[s("B"), Data::Int(44001), Data::Error(calamine::CellErrorType::NA)],
        ]);

        let table = sheet_to_table("GHG Data", &range);
        assert_eq!(table.columns(), &["Site", "Date", "CO2"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].get(1).as_number(), Some(44001.0));
        assert!(table.rows()[1].get(2).is_empty());
    }

    #[test]
    fn test_blank_header_gets_placeholder_name() {
        let range = range_from(&[&[s("Region"), Data::Empty], &[s("R1"), Data::Float(1.0)]]);
        let table = sheet_to_table("Carbon_BGB", &range);
        assert_eq!(table.columns(), &["Region", "Unnamed: 1"]);
    }

    #[test]
    fn test_iso_dates_become_timestamps() {
        let value = cell_to_value(&Data::DateTimeIso("2021-04-05T06:30:00".to_string()));
        assert_eq!(
            value.as_timestamp().map(|ts| ts.to_string()),
            Some("2021-04-05 06:30:00".to_string())
        );

        let value = cell_to_value(&Data::DateTimeIso("2021-04-05".to_string()));
        assert!(value.as_timestamp().is_some());
    }

    #[test]
    fn test_converted_sheet_builds_context() {
        let ghg = sheet_to_table(
            GHG_SHEET,
            &range_from(&[
                &[s("Site"), s("Treatment"), s("Type"), s("Date"), s("CO2"), s("CH4")],
                &[
                    s("A"),
                    s("X"),
                    s("Y"),
                    Data::Float(44000.0),
                    Data::Float(10.0),
                    Data::Float(1.0),
                ],
            ]),
        )
        .with_serial_dates(DATE_COLUMN)
        .unwrap();
        let weather = sheet_to_table(
            WEATHER_SHEET,
            &range_from(&[
                &[s("Date"), s("Rain, mm")],
                &[Data::Float(44000.5), Data::Float(0.2)],
            ]),
        )
        .with_serial_dates(DATE_COLUMN)
        .unwrap();
        let agb = sheet_to_table(
            AGB_SHEET,
            &range_from(&[
                &[s("Region"), s("Site"), s("dbh")],
                &[s("R1"), s("S1"), Data::Float(12.0)],
            ]),
        );
        let bgb = sheet_to_table(BGB_SHEET, &range_from(&[&[s("Region"), s("Depth")]]));

        let context = DataContext::new(ghg, weather, agb, bgb).unwrap();
        assert_eq!(context.options.ghg_sites.len(), 2);
        assert!(context.bgb.is_empty());

        let summary = context.summary();
        assert!(summary.contains("Sheet 'GHG Data': 1 rows, 6 columns"));
        assert!(summary.contains("Numeric columns: CO2, CH4"));
        assert!(summary.contains("Date range: 2020-06-18 12:00:00 to 2020-06-18 12:00:00"));
        assert!(summary.contains("GHG sites (2): All, A"));
    }

    #[test]
    fn test_context_requires_converted_dates() {
        let ghg = Table::new(
            GHG_SHEET,
            vec!["Site".into(), "Treatment".into(), "Type".into()],
            vec![],
        );
        let weather = Table::new(WEATHER_SHEET, vec!["Date".into()], vec![]);
        let agb = Table::new(AGB_SHEET, vec!["Region".into(), "Site".into()], vec![]);
        let bgb = Table::new(BGB_SHEET, vec![], vec![]);
        assert!(DataContext::new(ghg, weather, agb, bgb).is_err());
    }

    #[test]
    fn test_load_complete_workbook() {
        let file = write_workbook(&[
            (GHG_SHEET, GHG_ROWS),
            (WEATHER_SHEET, WEATHER_ROWS),
            (AGB_SHEET, AGB_ROWS),
            (BGB_SHEET, BGB_ROWS),
        ]);

        let context = WorkbookReader::with_silent(true).load(file.path()).unwrap();

        assert_eq!(context.ghg.len(), 2);
        let (first, last) = context.ghg.date_range().unwrap();
        assert_eq!(first.to_string(), "2020-06-18 00:00:00");
        assert_eq!(last.to_string(), "2020-06-19 12:00:00");
        let (reading, _) = context.weather.date_range().unwrap();
        assert_eq!(reading.to_string(), "2020-06-18 06:00:00");

        assert_eq!(context.options.ghg_sites.len(), 3);
        assert_eq!(context.options.agb_regions.entries()[0].value, "R1");
        assert_eq!(context.bgb.columns()[1], "Land cover");
        assert!(context.agb.date_column().is_none());
    }

    #[test]
    fn test_missing_sheet_is_fatal() {
        let file = write_workbook(&[
            (GHG_SHEET, GHG_ROWS),
            (WEATHER_SHEET, WEATHER_ROWS),
            (AGB_SHEET, AGB_ROWS),
        ]);

        let err = WorkbookReader::with_silent(true)
            .load(file.path())
            .unwrap_err();
        match err {
            DashboardError::SheetNotFound { sheet } => assert_eq!(sheet, "Carbon_BGB"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_workbook_is_fatal() {
        let reader = WorkbookReader::with_silent(true);
        assert!(reader.load(Path::new("does/not/exist.xlsx")).is_err());
    }

    #[test]
    fn test_unreadable_workbook_is_fatal() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile()?;
        writeln!(file, "definitely not a zip archive")?;

        let reader = WorkbookReader::with_silent(true);
        let err = reader.load(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::Workbook(_)));
        Ok(())
    }
}
