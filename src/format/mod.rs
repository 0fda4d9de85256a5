//! Output formatting for book records (table, JSON, NDJSON, CSV).

use crate::books::{BookRecord, Rating};
use crate::config::OutputFormat;

/// Formats book records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single record.
    pub fn format_record(&self, record: &BookRecord) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(record),
            OutputFormat::Ndjson => self.ndjson_records(std::slice::from_ref(record)),
            OutputFormat::Table => self.table_single(record),
            OutputFormat::Csv => self.csv_records(std::slice::from_ref(record)),
        }
    }

    /// Formats multiple records.
    pub fn format_records(&self, records: &[BookRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Ndjson => String::new(),
                OutputFormat::Csv => self.csv_header(),
                OutputFormat::Table => "No books found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Ndjson => self.ndjson_records(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    // JSON formatting

    fn json_single(&self, record: &BookRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_records(&self, records: &[BookRecord]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    fn ndjson_records(&self, records: &[BookRecord]) -> String {
        records
            .iter()
            .filter_map(|r| serde_json::to_string(r).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Table formatting

    fn table_single(&self, record: &BookRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title:   {}", record.title));
        lines.push(format!("Authors: {}", record.authors.as_deref().unwrap_or("N/A")));
        lines.push(format!(
            "Year:    {}",
            record.year.map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string())
        ));

        match record.price {
            Some(price) => lines.push(format!("Price:   {:.2}", price)),
            None => lines.push("Price:   N/A".to_string()),
        }

        match record.star_rating {
            Some(Rating::Stars(stars)) => lines.push(format!("Rating:  {:.1}/5", stars)),
            Some(Rating::Count(count)) => lines.push(format!("Rating:  {} ratings", count)),
            None => lines.push("Rating:  N/A".to_string()),
        }

        lines.push(format!("URL:     {}", record.source_url));

        lines.join("\n")
    }

    fn table_records(&self, records: &[BookRecord]) -> String {
        let year_width = 4;
        let price_width = 8;
        let rating_width = 7;
        let title_width = 50;
        let authors_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<year_width$}  {:<price_width$}  {:<rating_width$}  {:<title_width$}  {}",
            "Year", "Price", "Rating", "Title", "Authors"
        ));
        lines.push(format!(
            "{:-<year_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<title_width$}  {:-<authors_width$}",
            "", "", "", "", ""
        ));

        for record in records {
            let year_str = record.year.map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string());

            let price_str = match record.price {
                Some(p) => format!("{:.2}", p),
                None => "N/A".to_string(),
            };

            let rating_str = match record.star_rating {
                Some(Rating::Stars(stars)) => format!("{:.1}", stars),
                Some(Rating::Count(count)) => format!("({})", count),
                None => "N/A".to_string(),
            };

            let authors = record.authors.as_deref().unwrap_or("N/A");

            lines.push(format!(
                "{:<year_width$}  {:>price_width$}  {:>rating_width$}  {:<title_width$}  {}",
                year_str,
                price_str,
                rating_str,
                truncate(&record.title, title_width),
                truncate(authors, authors_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} books", records.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "title,authors,year,star_rating,price,source_url".to_string()
    }

    fn csv_records(&self, records: &[BookRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for record in records {
            let authors = record.authors.as_deref().map(Self::csv_escape).unwrap_or_default();
            let year = record.year.map(|y| y.to_string()).unwrap_or_default();
            // Debug keeps the ".0" so CSV numbers read the same as JSON
            let rating = record.rating_value().map(|r| format!("{:?}", r)).unwrap_or_default();
            let price = record.price.map(|p| format!("{:?}", p)).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{}",
                Self::csv_escape(&record.title),
                authors,
                year,
                rating,
                price,
                Self::csv_escape(&record.source_url)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens text to `width` characters, ending in "..." when cut.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
