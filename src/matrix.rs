use std::io::{Read, Write};
use std::path::Path;

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, SortingHatError};

// Load a numeric matrix from a csv file.
// The expected format is:
// - Optional header row (skipped)
// - One matrix row per record
// - Every record has the same number of fields, each a float
pub fn read_matrix_csv(path: impl AsRef<Path>, has_headers: bool) -> Result<Array2<f64>> {
    let reader = reader_builder(has_headers).from_path(path.as_ref())?;
    let matrix = parse_matrix(reader)?;
    debug!(
        "Loaded {}x{} matrix from {}",
        matrix.nrows(),
        matrix.ncols(),
        path.as_ref().display()
    );
    Ok(matrix)
}

pub fn read_matrix<R: Read>(reader: R, has_headers: bool) -> Result<Array2<f64>> {
    parse_matrix(reader_builder(has_headers).from_reader(reader))
}

fn reader_builder(has_headers: bool) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        // Ragged rows get a better error from us than from the csv crate
        .flexible(true);
    builder
}

fn parse_matrix<R: Read>(mut reader: csv::Reader<R>) -> Result<Array2<f64>> {
    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

    let n_rows = records.len();
    let n_cols = records.first().map_or(0, |record| record.len());

    // Each row parses independently, then they're stitched back together in order
    let rows = records
        .par_iter()
        .enumerate()
        .map(|(row, record)| {
            if record.len() != n_cols {
                return Err(SortingHatError::RaggedRow {
                    row,
                    expected: n_cols,
                    actual: record.len(),
                });
            }
            record
                .iter()
                .enumerate()
                .map(|(column, field)| {
                    field.trim().parse::<f64>().map_err(|_| SortingHatError::Parse {
                        row,
                        column,
                        value: field.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let values = rows.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((n_rows, n_cols), values)?)
}

// Write one csv record per matrix row, no header
pub fn write_matrix_csv<W: Write>(matrix: ArrayView2<f64>, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for row in matrix.rows() {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
