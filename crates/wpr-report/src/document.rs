//! Layout-free model of the PDF report.

use wpr_common::{format_date, weekday_index_label};
use wpr_model::{AggregateResult, SupportTable, YearScope};

/// A titled table of text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSection {
    pub heading: String,
    pub table: TextTable,
}

/// What the PDF shows, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    /// Period bounds, totals and warnings under the title.
    pub summary: Vec<String>,
    pub sections: Vec<DocumentSection>,
}

fn strings<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

impl ReportDocument {
    pub fn build(result: &AggregateResult, support: &[SupportTable]) -> Self {
        let year = match result.year {
            YearScope::All => "todos".to_string(),
            YearScope::Year(year) => year.to_string(),
        };
        let mut summary = vec![
            format!("Periodo: {}", result.window.label()),
            format!("Ano: {year}"),
            format!("Total do periodo: {}", result.period_total),
            format!("Total do ano: {}", result.year_total),
        ];
        summary.extend(result.warnings.iter().map(|w| format!("Aviso: {w}")));

        let mut sections = vec![DocumentSection {
            heading: "Produtividade no periodo".to_string(),
            table: TextTable {
                headers: strings(["Colaborador", "SEG", "TER", "QUA", "QUI", "SEX", "Total"]),
                rows: result
                    .selected
                    .iter()
                    .map(|name| {
                        let series = result.series_for(name);
                        let total: u64 = series.iter().sum();
                        std::iter::once(name.clone())
                            .chain(series.iter().map(ToString::to_string))
                            .chain(std::iter::once(total.to_string()))
                            .collect()
                    })
                    .collect(),
            },
        }];

        sections.extend(support.iter().map(|table| DocumentSection {
            heading: format!("Demandas de apoio: {}", table.collaborator),
            table: TextTable {
                headers: strings(["Data", "Dia", "Demanda"]),
                rows: table
                    .rows
                    .iter()
                    .map(|row| {
                        vec![
                            format_date(row.date),
                            weekday_index_label(row.weekday).to_string(),
                            row.demand.clone(),
                        ]
                    })
                    .collect(),
            },
        }));

        Self {
            title: "Relatorio semanal de produtividade".to_string(),
            summary,
            sections,
        }
    }
}
