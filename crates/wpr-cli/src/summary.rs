//! Terminal tables for report runs.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use wpr_common::{format_date, weekday_index_label};
use wpr_core::ViewModel;
use wpr_map::{RoleMatch, column_letter};
use wpr_model::{EMPTY_DEMAND, FieldRole, LoadReport};

/// Plain-text header block: period, totals and load counters.
pub fn header_lines(view: &ViewModel) -> Vec<String> {
    let mut lines = vec![
        format!("Periodo: {}", view.period),
        format!(
            "Total do periodo: {}  |  Total do ano: {}",
            view.result.period_total, view.result.year_total
        ),
    ];
    lines.push(load_line(&view.load_report));
    lines
}

fn load_line(report: &LoadReport) -> String {
    format!(
        "Linhas: {} lidas, {} usadas, {} com data invalida, {} com quantidade zerada",
        report.total_rows, report.kept_rows, report.dropped_invalid_date, report.coerced_counts
    )
}

pub fn print_summary(view: &ViewModel) {
    for line in header_lines(view) {
        println!("{line}");
    }
    println!("{}", chart_table(view));

    if !view.result.year_totals.is_empty() {
        println!();
        println!("Acumulado no ano:");
        println!("{}", year_table(view));
    }

    for table in support_tables(view) {
        println!();
        println!("{table}");
    }

    let warnings = view.warning_messages();
    if !warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in warnings {
            eprintln!("- {warning}");
        }
    }
}

/// Weekday grid, one row per selected collaborator.
pub fn chart_table(view: &ViewModel) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Colaborador")];
    header.extend(view.weekday_labels.iter().map(|label| header_cell(label)));
    header.push(header_cell("Total"));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for col in 1..=view.weekday_labels.len() + 1 {
        align_column(&mut table, col, CellAlignment::Right);
    }

    for series in &view.chart {
        let total: u64 = series.values.iter().sum();
        let mut row = vec![
            Cell::new(&series.collaborator)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        ];
        row.extend(series.values.iter().map(|value| count_cell(*value)));
        row.push(Cell::new(total).add_attribute(Attribute::Bold));
        table.add_row(row);
    }
    table
}

fn year_table(view: &ViewModel) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Colaborador"), header_cell("Total")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for total in &view.result.year_totals {
        table.add_row(vec![Cell::new(&total.collaborator), Cell::new(total.total)]);
    }
    table
}

fn support_tables(view: &ViewModel) -> Vec<Table> {
    view.support_tables
        .iter()
        .map(|support| {
            let mut table = Table::new();
            table.set_header(vec![
                header_cell(&support.collaborator),
                header_cell("Dia"),
                header_cell("Demanda"),
            ]);
            apply_table_style(&mut table);
            align_column(&mut table, 1, CellAlignment::Center);
            for row in &support.rows {
                let demand = if row.demand == EMPTY_DEMAND {
                    dim_cell(&row.demand)
                } else {
                    Cell::new(&row.demand)
                };
                table.add_row(vec![
                    Cell::new(format_date(row.date)),
                    Cell::new(weekday_index_label(row.weekday)),
                    demand,
                ]);
            }
            table
        })
        .collect()
}

/// Role resolution report for the `columns` command.
pub fn columns_table(matches: &[(FieldRole, Option<RoleMatch>)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Column"),
        header_cell("Letter"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for (role, found) in matches {
        let role_cell = if role.is_mandatory() {
            Cell::new(role).add_attribute(Attribute::Bold)
        } else {
            Cell::new(role)
        };
        let row = match found {
            Some(found) => vec![
                role_cell,
                Cell::new(&found.column.name),
                Cell::new(column_letter(found.column.index)),
                Cell::new(format!("{:?} ({})", found.kind, found.candidate)).fg(Color::Green),
            ],
            None if role.is_mandatory() => vec![
                role_cell,
                Cell::new("missing").fg(Color::Red).add_attribute(Attribute::Bold),
                dim_cell("-"),
                dim_cell("-"),
            ],
            None => vec![role_cell, dim_cell("absent"), dim_cell("-"), dim_cell("-")],
        };
        table.add_row(row);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: u64) -> Cell {
    if value > 0 {
        Cell::new(value)
    } else {
        dim_cell(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
