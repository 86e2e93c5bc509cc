use std::io::Read;
use std::path::Path;

use crate::error::{PortalError, Result};
use crate::store::Student;

/// Fields per row: id, name, study program.
const FIELDS_PER_RECORD: usize = 3;

/// Read one CSV source into a batch of students.
///
/// The whole source is rejected on the first malformed row; a partial batch
/// is never returned.
pub async fn read_students_csv(path: &Path) -> Result<Vec<Student>> {
    let source_name = path.display().to_string();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| source_error(&source_name, e))?;
    parse_students_csv(bytes.as_slice(), &source_name)
}

/// Parse headerless `id,name,program` rows from `reader`.
pub fn parse_students_csv<R: Read>(reader: R, source_name: &str) -> Result<Vec<Student>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut students = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| source_error(source_name, e))?;
        if record.len() != FIELDS_PER_RECORD {
            return Err(source_error(
                source_name,
                format!(
                    "row {}: expected {} fields, got {}",
                    row + 1,
                    FIELDS_PER_RECORD,
                    record.len()
                ),
            ));
        }
        students.push(Student::new(&record[0], &record[1], &record[2]));
    }
    Ok(students)
}

fn source_error(source_name: &str, reason: impl std::fmt::Display) -> PortalError {
    PortalError::Source {
        source_name: source_name.to_string(),
        reason: reason.to_string(),
    }
}
