use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use wpr_ingest::{
    IngestError, LoadOptions, MAX_TABLE_SIZE, SheetSelector, TableFormat, TableSource, load_table,
    read_workbook_file,
};

fn write_workbook(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("base.xlsx");
    let mut workbook = Workbook::new();

    let capa = workbook.add_worksheet();
    capa.set_name("Capa").unwrap();
    capa.write_string(0, 0, "Relatório").unwrap();
    capa.write_string(1, 0, "semanal").unwrap();

    let base = workbook.add_worksheet();
    base.set_name("Base").unwrap();
    base.write_string(0, 0, "Data").unwrap();
    base.write_string(0, 1, "Colaborador").unwrap();
    base.write_string(0, 2, "Notas Atendidas").unwrap();
    base.write_string(1, 0, "01/09/2025").unwrap();
    base.write_string(1, 1, "ana").unwrap();
    base.write_number(1, 2, 3.0).unwrap();
    base.write_string(3, 0, "02/09/2025").unwrap();
    base.write_string(3, 1, "bia").unwrap();
    base.write_number(3, 2, 5.0).unwrap();

    workbook.save(&path).unwrap();
    path
}

#[test]
fn reads_named_sheet_and_skips_blank_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir);

    let table = read_workbook_file(
        &path,
        &SheetSelector::Name("base".to_string()),
        MAX_TABLE_SIZE,
    )
    .unwrap();

    assert_eq!(table.format, TableFormat::Workbook);
    assert_eq!(table.headers(), vec!["Data", "Colaborador", "Notas Atendidas"]);
    assert_eq!(table.height(), 2);
    let counts = wpr_common::column_strings(&table.frame, 2).unwrap();
    assert_eq!(counts, vec!["3", "5"]);
}

#[test]
fn first_sheet_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir);
    let source = TableSource::File {
        path,
        sheet: SheetSelector::First,
    };

    let table = load_table(&source, &LoadOptions::default()).unwrap();
    assert_eq!(table.headers(), vec!["Relatório"]);
}

#[test]
fn missing_sheet_lists_available() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir);

    let err = read_workbook_file(&path, &SheetSelector::Index(7), MAX_TABLE_SIZE).unwrap_err();
    match err {
        IngestError::SheetNotFound { available, .. } => assert_eq!(available, "Capa, Base"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn csv_file_through_load_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("base.csv");
    std::fs::write(&path, "Data;Colaborador;Notas\n01/09/2025;ana;3\n").unwrap();

    let source = TableSource::from_arg(path.to_str().unwrap(), SheetSelector::First);
    let table = load_table(&source, &LoadOptions::default()).unwrap();
    assert_eq!(table.format, TableFormat::Csv);
    assert_eq!(table.width(), 3);
}
