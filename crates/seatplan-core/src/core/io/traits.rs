use crate::core::models::plan::Plan;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing persisted seating plans.
///
/// Implementors handle format-specific parsing and serialization; the path and string
/// helpers are provided on top of the two reader/writer primitives.
pub trait PlanFormat {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a plan from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails, the document is structurally invalid, or I/O
    /// operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Plan, Self::Error>;

    /// Writes a plan to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn write_to(plan: &Plan, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a plan from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Plan, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a plan to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(plan: &Plan, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(plan, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a plan from an in-memory document.
    fn read_from_str(content: &str) -> Result<Plan, Self::Error> {
        let mut reader = content.as_bytes();
        Self::read_from(&mut reader)
    }

    /// Serializes a plan into an in-memory document.
    fn write_to_string(plan: &Plan) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(plan, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}
