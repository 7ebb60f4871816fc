use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

/// What the generate command reports after writing a PDF.
#[derive(Debug, Serialize)]
pub struct GenerateSummary {
    pub file: String,
    pub filename: String,
    pub bytes: u64,
    pub generation_time_ms: i64,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "API Filename")]
    filename: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Generation Time")]
    generation_time: String,
}

fn build_summary_row(summary: &GenerateSummary) -> SummaryRow {
    SummaryRow {
        file: summary.file.clone(),
        filename: summary.filename.clone(),
        size: format_bytes(summary.bytes),
        generation_time: format!("{} ms", summary.generation_time_ms),
    }
}

fn render_summary_table(summary: &GenerateSummary) -> String {
    let mut table = Table::new([build_summary_row(summary)]);
    table.with(Style::rounded());
    table.to_string()
}

pub fn print_summary_table(summary: &GenerateSummary) {
    println!("{}", render_summary_table(summary));
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1_024 {
        format!("{:.1} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> GenerateSummary {
        GenerateSummary {
            file: "out/invoice.pdf".to_string(),
            filename: "invoice.pdf".to_string(),
            bytes: 2_048,
            generation_time_ms: 245,
        }
    }

    #[test]
    fn test_format_bytes_small() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn test_format_bytes_kilobytes() {
        assert_eq!(format_bytes(2_048), "2.0 KB");
    }

    #[test]
    fn test_format_bytes_megabytes() {
        assert_eq!(format_bytes(3_145_728), "3.0 MB");
    }

    #[test]
    fn test_summary_table_contains_fields() {
        let rendered = render_summary_table(&summary());
        assert!(rendered.contains("File"));
        assert!(rendered.contains("out/invoice.pdf"));
        assert!(rendered.contains("2.0 KB"));
        assert!(rendered.contains("245 ms"));
    }

    #[test]
    fn test_summary_json_fields() {
        let value = serde_json::to_value(summary()).unwrap();
        assert_eq!(value["file"], "out/invoice.pdf");
        assert_eq!(value["bytes"], 2048);
        assert_eq!(value["generation_time_ms"], 245);
    }
}
