//! Rendering of classified papers as CSV or a terminal table.
//!
//! Multi-value fields (`Non-academic Author(s)`, `Company Affiliation(s)`)
//! are joined with [`FIELD_SEPARATOR`]. With no output file, rows go to
//! standard output: CSV when piped, a readable table on a terminal.

use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::error::Error;
use crate::models::ClassifiedPaper;

/// Separator joining multi-value CSV fields
pub const FIELD_SEPARATOR: &str = "; ";

/// Output columns, in order
pub const CSV_HEADER: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// One rendered output row
#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "PubmedID")]
    pubmed_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Publication Date")]
    publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    corresponding_email: String,
}

impl From<&ClassifiedPaper> for CsvRow {
    fn from(record: &ClassifiedPaper) -> Self {
        Self {
            pubmed_id: record.paper.pmid.clone(),
            title: record.paper.title.clone(),
            publication_date: record.paper.publication_date.clone().unwrap_or_default(),
            non_academic_authors: record.non_academic_authors.join(FIELD_SEPARATOR),
            company_affiliations: record.company_affiliations.join(FIELD_SEPARATOR),
            corresponding_email: record.paper.corresponding_email.clone().unwrap_or_default(),
        }
    }
}

fn write_rows<W: Write>(records: &[ClassifiedPaper], writer: W) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    // serialize() emits the header from the first row; an empty result set
    // still gets a valid header-only file
    if records.is_empty() {
        wtr.write_record(CSV_HEADER)?;
    }
    for record in records {
        wtr.serialize(CsvRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write records as CSV to `path`, flushing before returning
pub fn write_csv_file(records: &[ClassifiedPaper], path: &Path) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    write_rows(records, file)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Results written");
    Ok(())
}

/// Print records to standard output
pub fn write_stdout(records: &[ClassifiedPaper]) -> Result<(), Error> {
    if io::stdout().is_terminal() {
        print_table(records);
        Ok(())
    } else {
        write_rows(records, io::stdout().lock())
    }
}

fn print_table(records: &[ClassifiedPaper]) {
    use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(CSV_HEADER);

    for record in records {
        let row = CsvRow::from(record);
        table.add_row(vec![
            row.pubmed_id,
            row.title,
            row.publication_date,
            row.non_academic_authors,
            row.company_affiliations,
            row.corresponding_email,
        ]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorRecord, PaperRecordBuilder};

    fn sample_record() -> ClassifiedPaper {
        let paper = PaperRecordBuilder::new("36464800", "A phase II trial")
            .publication_date("2023 Mar")
            .author(AuthorRecord::new("J. Doe").with_affiliation("Acme Pharma Inc"))
            .corresponding_email("j.doe@acmepharma.com")
            .build();

        ClassifiedPaper {
            paper,
            non_academic_authors: vec!["J. Doe".to_string()],
            company_affiliations: vec!["Acme Pharma Inc".to_string()],
        }
    }

    fn render(records: &[ClassifiedPaper]) -> String {
        let mut buf = Vec::new();
        write_rows(records, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_results_produce_header_only() {
        let out = render(&[]);
        assert_eq!(
            out.trim_end(),
            "PubmedID,Title,Publication Date,Non-academic Author(s),Company Affiliation(s),Corresponding Author Email"
        );
    }

    #[test]
    fn test_row_fields_and_order() {
        let out = render(&[sample_record()]);
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let row = reader.records().next().unwrap().unwrap();

        assert_eq!(&row[0], "36464800");
        assert_eq!(&row[1], "A phase II trial");
        assert_eq!(&row[2], "2023 Mar");
        assert_eq!(&row[3], "J. Doe");
        assert_eq!(&row[4], "Acme Pharma Inc");
        assert_eq!(&row[5], "j.doe@acmepharma.com");
    }

    #[test]
    fn test_multi_values_joined_with_separator() {
        let mut record = sample_record();
        record.non_academic_authors.push("K. Lee".to_string());
        record
            .company_affiliations
            .push("Beta Biotech Ltd".to_string());

        let out = render(&[record]);
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let row = reader.records().next().unwrap().unwrap();

        assert_eq!(&row[3], "J. Doe; K. Lee");
        assert_eq!(&row[4], "Acme Pharma Inc; Beta Biotech Ltd");
    }

    #[test]
    fn test_commas_in_fields_are_quoted() {
        let mut record = sample_record();
        record.company_affiliations = vec!["Acme Pharma Inc, Cambridge, MA".to_string()];

        let out = render(&[record]);
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[4], "Acme Pharma Inc, Cambridge, MA");
    }

    #[test]
    fn test_write_csv_file_round_trip() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_csv_file(&[sample_record()], file.path()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("PubmedID,Title"));
        assert!(lines[1].contains("36464800"));
    }

    #[test]
    fn test_write_csv_file_bad_path_is_io_error() {
        let result = write_csv_file(&[], Path::new("/nonexistent-dir/out.csv"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
