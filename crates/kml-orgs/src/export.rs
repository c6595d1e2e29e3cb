use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One CSV record.
pub type Row = Vec<String>;

/// Header written by each individual converter.
pub const CONVERTER_HEADER: [&str; 8] = [
    "Name",
    "Address",
    "City",
    "State",
    "Website",
    "Phone Number",
    "Folder Name",
    "Source File Name",
];

/// Header of the combined output.
pub const MERGED_HEADER: [&str; 8] = [
    "Name",
    "Address",
    "City",
    "State",
    "Website",
    "Phone Number",
    "Category",
    "Source",
];

pub fn header_row(columns: &[&str]) -> Row {
    columns.iter().map(|column| column.to_string()).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode csv output: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("merge requires at least one row sequence")]
    MissingInputs,
    #[error("merge requires a non-empty header")]
    MissingHeader,
}

/// Writes `header` followed by `rows` to a new file at `path`.
pub fn write_rows<P: AsRef<Path>>(path: P, header: &[String], rows: &[Row]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_rows_to(file, header, rows)
}

pub fn write_rows_to<W: Write>(writer: W, header: &[String], rows: &[Row]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes records verbatim; used for merged output which already leads with its header.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[Row]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut csv_writer = csv::Writer::from_writer(file);
    for record in records {
        csv_writer.write_record(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Concatenates row sequences under a shared header, preserving input order.
pub fn merge_rows(sequences: &[Vec<Row>], header: &[String]) -> Result<Vec<Row>, MergeError> {
    if sequences.is_empty() {
        return Err(MergeError::MissingInputs);
    }
    if header.is_empty() {
        return Err(MergeError::MissingHeader);
    }

    let total = sequences.iter().map(Vec::len).sum::<usize>();
    let mut merged = Vec::with_capacity(total + 1);
    merged.push(header.to_vec());
    for sequence in sequences {
        merged.extend(sequence.iter().cloned());
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Row {
        header_row(values)
    }

    #[test]
    fn merge_rejects_missing_inputs_and_header() {
        let header = header_row(&MERGED_HEADER);
        assert_eq!(merge_rows(&[], &header), Err(MergeError::MissingInputs));
        assert_eq!(
            merge_rows(&[vec![row(&["a"])]], &[]),
            Err(MergeError::MissingHeader)
        );
    }

    #[test]
    fn merge_prepends_header_and_keeps_order() {
        let header = row(&["h"]);
        let merged = merge_rows(
            &[vec![row(&["1"]), row(&["2"])], vec![], vec![row(&["3"])]],
            &header,
        )
        .expect("merge succeeds");
        assert_eq!(merged, vec![row(&["h"]), row(&["1"]), row(&["2"]), row(&["3"])]);
    }

    #[test]
    fn writer_quotes_embedded_delimiters() {
        let mut buffer = Vec::new();
        write_rows_to(
            &mut buffer,
            &row(&["Name", "Address"]),
            &[row(&["Acme Co", "123, Main, St"]), row(&["Say \"hi\"", ""])],
        )
        .expect("csv written");

        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(
            text,
            "Name,Address\nAcme Co,\"123, Main, St\"\n\"Say \"\"hi\"\"\",\n"
        );
    }
}
