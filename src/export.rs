//! Ledger export: one workbook, one sheet, fully overwritten on each run.
//! Rows are deduplicated by full content before writing, so exporting twice
//! without new bookings produces the same row set.

use crate::booker::{Booking, BookingLedger};
use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

pub const SHEET_NAME: &str = "JadwalTerisi";

/// Column names kept from the original export format.
pub const HEADERS: [&str; 8] = [
    "kelas",
    "mata_kuliah",
    "dosen",
    "gedung",
    "lantai",
    "ruangan",
    "hari",
    "jam",
];

/// Writes every booking to `path`, replacing the file. Returns the number of
/// rows written after deduplication.
pub fn export_bookings(ledger: &BookingLedger, path: &Path) -> Result<usize> {
    let rows = dedup(ledger.bookings());

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, booking) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &booking.class_id)?;
        sheet.write_string(row, 1, &booking.course)?;
        sheet.write_string(row, 2, &booking.lecturer)?;
        sheet.write_string(row, 3, &booking.building)?;
        sheet.write_number(row, 4, f64::from(booking.floor))?;
        sheet.write_string(row, 5, &booking.room_name)?;
        sheet.write_string(row, 6, &booking.day)?;
        sheet.write_string(row, 7, &booking.time)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("writing export workbook {}", path.display()))?;
    info!("Exported {} bookings to {}", rows.len(), path.display());
    Ok(rows.len())
}

fn dedup(bookings: &[Booking]) -> Vec<&Booking> {
    let mut seen = HashSet::new();
    bookings.iter().filter(|b| seen.insert(*b)).collect()
}
