use crate::core::models::ids::StudentId;
use crate::core::models::student::{Gender, ParseGenderError, Student};
use csv::{ReaderBuilder, StringRecord, Trim};
use rand::Rng;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const HEADER_KEYWORDS: [&str; 3] = ["name", "gender", "student"];

/// A non-fatal problem with one roster row. The row is skipped; the rest still import.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterIssue {
    #[error("File is empty")]
    Empty,
    #[error("Line {line}: {kind}")]
    Row { line: u64, kind: RowIssueKind },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowIssueKind {
    #[error("Expected at least 2 columns (name, gender), got {0}")]
    TooFewColumns(usize),
    #[error("Invalid name format \"{0}\"")]
    InvalidName(String),
    #[error(transparent)]
    InvalidGender(#[from] ParseGenderError),
    #[error("Malformed record: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Failed to read roster: {0}")]
    Io(#[from] io::Error),
}

/// Result of a roster import: every row that parsed, plus one issue per row that did not.
#[derive(Debug, Default)]
pub struct RosterImport {
    pub students: Vec<Student>,
    pub issues: Vec<RosterIssue>,
}

impl RosterImport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Column roles taken from a header row. They apply only to rows with the header's width.
#[derive(Debug, Default, Clone, Copy)]
struct HeaderLayout {
    width: usize,
    gender: Option<usize>,
    first: Option<usize>,
    last: Option<usize>,
}

impl HeaderLayout {
    fn detect(record: &StringRecord) -> Option<Self> {
        let cells: Vec<String> = record.iter().map(str::to_lowercase).collect();
        let is_header = cells
            .iter()
            .any(|cell| HEADER_KEYWORDS.iter().any(|kw| cell.contains(kw)));
        if !is_header {
            return None;
        }
        let find = |needle: &str| cells.iter().position(|cell| cell.contains(needle));
        Some(Self {
            width: cells.len(),
            gender: find("gender"),
            first: find("first"),
            last: find("last"),
        })
    }
}

struct ParsedName {
    first: String,
    last: String,
}

/// "Last, First", then "First Last...", then a single token taken as the first name.
fn parse_name(value: &str) -> Option<ParsedName> {
    let trimmed = value.trim();

    if trimmed.contains(',') {
        let mut parts = trimmed.split(',').map(str::trim);
        if let (Some(last), Some(first)) = (parts.next(), parts.next()) {
            if !last.is_empty() && !first.is_empty() {
                return Some(ParsedName {
                    first: first.to_string(),
                    last: last.to_string(),
                });
            }
        }
    }

    let mut tokens = trimmed.split_whitespace();
    let first = tokens.next()?;
    let rest: Vec<&str> = tokens.collect();
    Some(ParsedName {
        first: first.to_string(),
        last: rest.join(" "),
    })
}

fn parse_row(
    record: &StringRecord,
    layout: HeaderLayout,
) -> Result<(ParsedName, Gender), RowIssueKind> {
    let fields: Vec<&str> = record.iter().collect();
    if fields.len() < 2 {
        return Err(RowIssueKind::TooFewColumns(fields.len()));
    }
    // An unquoted "Last, First" splits into an extra field, so the header's columns no
    // longer line up with the row.
    let layout = if fields.len() == layout.width {
        layout
    } else {
        HeaderLayout::default()
    };

    let gender_col = layout
        .gender
        .filter(|&idx| idx < fields.len())
        .unwrap_or(fields.len() - 1);
    let gender: Gender = fields[gender_col].parse()?;

    let name = match (layout.first, layout.last) {
        (Some(f), Some(l)) if f != gender_col && l != gender_col => {
            let first = fields.get(f).copied().unwrap_or_default();
            let last = fields.get(l).copied().unwrap_or_default();
            if first.is_empty() {
                return Err(RowIssueKind::InvalidName(format!("{last}, {first}")));
            }
            ParsedName {
                first: first.to_string(),
                last: last.to_string(),
            }
        }
        _ => {
            let raw = fields
                .iter()
                .enumerate()
                .filter(|(idx, value)| *idx != gender_col && !value.is_empty())
                .map(|(_, value)| *value)
                .collect::<Vec<_>>()
                .join(", ");
            parse_name(&raw).ok_or(RowIssueKind::InvalidName(raw))?
        }
    };

    Ok((name, gender))
}

fn unique_id(rng: &mut impl Rng, taken: &mut HashSet<StudentId>) -> StudentId {
    loop {
        let id = StudentId::generate(rng);
        if taken.insert(id.clone()) {
            return id;
        }
    }
}

/// Parses a roster CSV with a caller-supplied id generator.
pub fn parse_roster_with_rng(text: &str, rng: &mut impl Rng) -> RosterImport {
    let mut import = RosterImport::default();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut taken = HashSet::new();
    let mut layout: Option<HeaderLayout> = None;
    let mut seen_rows = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                import.issues.push(RosterIssue::Row {
                    line,
                    kind: RowIssueKind::Malformed(err.to_string()),
                });
                seen_rows += 1;
                continue;
            }
        };
        if record.iter().all(str::is_empty) {
            continue;
        }
        seen_rows += 1;
        let line = record.position().map_or(0, |p| p.line());

        if seen_rows == 1 {
            if let Some(header) = HeaderLayout::detect(&record) {
                debug!(line, ?header, "Skipping roster header row.");
                layout = Some(header);
                continue;
            }
        }

        match parse_row(&record, layout.unwrap_or_default()) {
            Ok((name, gender)) => {
                let id = unique_id(rng, &mut taken);
                import.students.push(Student {
                    id,
                    first_name: name.first,
                    last_name: name.last,
                    gender,
                });
            }
            Err(kind) => {
                debug!(line, %kind, "Rejected roster row.");
                import.issues.push(RosterIssue::Row { line, kind });
            }
        }
    }

    if seen_rows == 0 {
        import.issues.push(RosterIssue::Empty);
    }

    info!(
        students = import.students.len(),
        issues = import.issues.len(),
        "Roster parsed."
    );
    import
}

/// Parses roster text into students, collecting per-row issues instead of failing.
pub fn parse_roster(text: &str) -> RosterImport {
    parse_roster_with_rng(text, &mut rand::thread_rng())
}

/// Reads and parses a roster file.
pub fn import_path<P: AsRef<Path>>(path: P) -> Result<RosterImport, RosterError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_roster(&text))
}
