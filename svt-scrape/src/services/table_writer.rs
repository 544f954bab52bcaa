//! CSV persistence of the result set
//!
//! Layout: a header row starting with an empty index cell, then one row per
//! record in persisted order, each starting with the record's insertion index.
//! Absent values are empty cells.

use crate::error::ScrapeResult;
use crate::models::ResultSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SEPARATOR: char = ',';

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Write the whole table, sorted by video year
pub fn write_records<W: Write>(mut w: W, results: &ResultSet) -> io::Result<()> {
    let columns = results.columns();

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(String::new());
    header.extend(columns.iter().map(|c| c.header().to_string()));
    write_row(&mut w, &header, SEPARATOR)?;

    for (index, record) in results.sorted() {
        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(index.to_string());
        row.extend(columns.iter().map(|c| record.cell(*c).unwrap_or_default()));
        write_row(&mut w, &row, SEPARATOR)?;
    }

    w.flush()
}

/// Overwrite `path` with the rendered table
///
/// The table is written to a sibling `.tmp` file and renamed into place, so
/// readers never see a half-written file.
pub fn write_table(results: &ResultSet, path: &Path) -> ScrapeResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp = temp_path(path);
    let file = File::create(&temp)?;
    let written =
        write_records(BufWriter::new(file), results).and_then(|_| fs::rename(&temp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
