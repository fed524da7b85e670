//! Loads a real workbook written to disk and checks the row-block scan.

use jadwal_booking::catalog::ScheduleCatalog;
use rust_xlsxwriter::Workbook;
use std::path::Path;

fn write_fixture(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("angkatan 2022").unwrap();

    sheet.write_string(0, 0, "Kelas : 2022A (pagi)").unwrap();
    // Column header row, stored like data and filtered at query time.
    let header = ["No", "Kode", "Mata Kuliah", "SKS", "Hari", "Jam", "Ruang", "Dosen"];
    for (col, text) in header.iter().enumerate() {
        sheet.write_string(1, col as u16, *text).unwrap();
    }
    let rows = [
        ("1", "IF101", "Basis Data", "3", "Senin", "08:00 - 10:00", "", "budi santoso, m.kom"),
        ("2", "IF102", "Struktur Data", "3", "Selasa", "10:00 - 12:00", "", ""),
    ];
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 2) as u32;
        sheet.write_string(r, 0, row.0).unwrap();
        sheet.write_string(r, 1, row.1).unwrap();
        sheet.write_string(r, 2, row.2).unwrap();
        sheet.write_string(r, 3, row.3).unwrap();
        sheet.write_string(r, 4, row.4).unwrap();
        sheet.write_string(r, 5, row.5).unwrap();
        sheet.write_string(r, 6, row.6).unwrap();
        sheet.write_string(r, 7, row.7).unwrap();
    }

    let second = workbook.add_worksheet();
    second.set_name("angkatan 2023").unwrap();
    second.write_string(0, 0, "Kelas : 2023B").unwrap();
    second.write_string(1, 0, "1").unwrap();
    second.write_string(1, 2, "Basis Data Lanjut").unwrap();
    second.write_string(1, 4, "Rabu").unwrap();
    second.write_string(1, 5, "13:00 - 15:00").unwrap();
    second.write_string(1, 7, "sari dewi, m.t").unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn loads_classes_from_every_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jadwal.xlsx");
    write_fixture(&path);

    let catalog = ScheduleCatalog::load(&path).unwrap();

    assert_eq!(catalog.cohorts(), vec!["2022".to_string(), "2023".to_string()]);
    assert_eq!(catalog.classes_in_cohort("2022"), vec!["2022A"]);
    assert_eq!(
        catalog.courses("2022A"),
        vec!["Basis Data".to_string(), "Struktur Data".to_string()]
    );
    assert_eq!(
        catalog.lecturer_candidates("basis data"),
        vec![
            "Budi Santoso, M.Kom.".to_string(),
            "Sari Dewi, M.T.".to_string()
        ]
    );
}

#[test]
fn missing_file_is_a_load_error() {
    assert!(ScheduleCatalog::load(Path::new("does-not-exist.xlsx")).is_err());
}

#[test]
fn workbook_without_class_blocks_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "nothing to see").unwrap();
    workbook.save(&path).unwrap();

    assert!(ScheduleCatalog::load(&path).is_err());
}
