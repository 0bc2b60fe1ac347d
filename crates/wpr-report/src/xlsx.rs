//! Spreadsheet export: `Resumo`, `Periodo`, `Demandas` and `Ano` sheets.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::info;
use wpr_common::{date_weekday_label, format_date, weekday_index_label};
use wpr_model::{AggregateResult, SupportTable, YearScope};

use crate::error::Result;

/// Sheet names in workbook order.
pub const SHEET_NAMES: [&str; 4] = ["Resumo", "Periodo", "Demandas", "Ano"];

struct Formats {
    header: Format,
    text: Format,
    integer: Format,
    label: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(0x1F4E79)
                .set_font_color(0xFFFFFF)
                .set_border(FormatBorder::Thin),
            text: Format::new().set_border(FormatBorder::Thin),
            integer: Format::new()
                .set_num_format("#,##0")
                .set_border(FormatBorder::Thin),
            label: Format::new().set_bold().set_border(FormatBorder::Thin),
        }
    }
}

/// Builds the four-sheet workbook.
pub fn build_workbook(result: &AggregateResult, support: &[SupportTable]) -> Result<Workbook> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();
    workbook.push_worksheet(summary_sheet(result, &formats)?);
    workbook.push_worksheet(period_sheet(result, &formats)?);
    workbook.push_worksheet(demand_sheet(support, &formats)?);
    workbook.push_worksheet(year_sheet(result, &formats)?);
    Ok(workbook)
}

/// Writes the workbook to `path`.
pub fn write_xlsx(path: &Path, result: &AggregateResult, support: &[SupportTable]) -> Result<()> {
    let mut workbook = build_workbook(result, support)?;
    workbook.save(path)?;
    info!(path = %path.display(), "spreadsheet written");
    Ok(())
}

fn headers(sheet: &mut Worksheet, names: &[&str], formats: &Formats) -> Result<()> {
    for (col, name) in (0u16..).zip(names) {
        sheet.write_with_format(0, col, *name, &formats.header)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn summary_sheet(result: &AggregateResult, formats: &Formats) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(SHEET_NAMES[0])?;
    headers(&mut sheet, &["Campo", "Valor"], formats)?;

    let year = match result.year {
        YearScope::All => "Todos".to_string(),
        YearScope::Year(year) => year.to_string(),
    };
    let text_rows = [
        ("Periodo", result.window.label()),
        ("Inicio", format_date(result.window.start)),
        ("Fim", format_date(result.window.end)),
        ("Ano", year),
    ];
    let mut row = 1u32;
    for (label, value) in text_rows {
        sheet.write_with_format(row, 0, label, &formats.label)?;
        sheet.write_with_format(row, 1, value, &formats.text)?;
        row += 1;
    }
    for (label, value) in [
        ("Total do periodo", result.period_total),
        ("Total do ano", result.year_total),
    ] {
        sheet.write_with_format(row, 0, label, &formats.label)?;
        sheet.write_with_format(row, 1, value as f64, &formats.integer)?;
        row += 1;
    }
    for warning in &result.warnings {
        sheet.write_with_format(row, 0, "Aviso", &formats.label)?;
        sheet.write_with_format(row, 1, warning.to_string(), &formats.text)?;
        row += 1;
    }
    sheet.set_column_width(0, 18)?;
    sheet.set_column_width(1, 40)?;
    Ok(sheet)
}

fn period_sheet(result: &AggregateResult, formats: &Formats) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(SHEET_NAMES[1])?;
    headers(&mut sheet, &["Data", "Dia", "Colaborador", "Notas"], formats)?;
    for (row, entry) in (1u32..).zip(&result.daily) {
        sheet.write_with_format(row, 0, format_date(entry.date), &formats.text)?;
        sheet.write_with_format(row, 1, date_weekday_label(entry.date), &formats.text)?;
        sheet.write_with_format(row, 2, entry.collaborator.as_str(), &formats.text)?;
        sheet.write_with_format(row, 3, entry.count as f64, &formats.integer)?;
    }
    sheet.set_column_width(0, 12)?;
    sheet.set_column_width(2, 28)?;
    Ok(sheet)
}

fn demand_sheet(support: &[SupportTable], formats: &Formats) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(SHEET_NAMES[2])?;
    headers(&mut sheet, &["Colaborador", "Data", "Dia", "Demanda"], formats)?;
    let rows = support
        .iter()
        .flat_map(|table| table.rows.iter().map(move |row| (&table.collaborator, row)));
    for (row, (collaborator, entry)) in (1u32..).zip(rows) {
        sheet.write_with_format(row, 0, collaborator.as_str(), &formats.text)?;
        sheet.write_with_format(row, 1, format_date(entry.date), &formats.text)?;
        sheet.write_with_format(row, 2, weekday_index_label(entry.weekday), &formats.text)?;
        sheet.write_with_format(row, 3, entry.demand.as_str(), &formats.text)?;
    }
    sheet.set_column_width(0, 28)?;
    sheet.set_column_width(1, 12)?;
    sheet.set_column_width(3, 50)?;
    Ok(sheet)
}

fn year_sheet(result: &AggregateResult, formats: &Formats) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(SHEET_NAMES[3])?;
    headers(&mut sheet, &["Colaborador", "Total"], formats)?;
    for (row, total) in (1u32..).zip(&result.year_totals) {
        sheet.write_with_format(row, 0, total.collaborator.as_str(), &formats.text)?;
        sheet.write_with_format(row, 1, total.total as f64, &formats.integer)?;
    }
    sheet.set_column_width(0, 28)?;
    Ok(sheet)
}
