//! PDF rendering of a [`ReportDocument`] with printpdf's built-in Helvetica.

use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use tracing::info;
use wpr_model::{AggregateResult, SupportTable};

use crate::document::{ReportDocument, TextTable};
use crate::error::{ReportError, Result};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const LINE: f32 = 6.0;
const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 9.0;
/// Approximate Helvetica advance at `BODY_SIZE`, in millimetres.
const CHAR_WIDTH: f32 = 1.8;

/// Replaces accented Latin letters with their base letter and any other
/// non-ASCII character with `?`; built-in fonts cover ASCII only.
///
/// ```
/// use wpr_report::fold_ascii;
///
/// assert_eq!(fold_ascii("Relatório São João"), "Relatorio Sao Joao");
/// ```
pub fn fold_ascii(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            'ñ' => 'n',
            'Ñ' => 'N',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

fn pdf_error(err: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf {
        message: err.to_string(),
    }
}

/// Tracks the write position and opens new pages as text runs off the end.
struct Cursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl Cursor {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(fold_ascii(title), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        self.pages += 1;
    }

    fn ensure_room(&mut self, lines: f32) {
        if self.y - lines * LINE < MARGIN {
            self.new_page();
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(fold_ascii(text), size, Mm(x), Mm(self.y), font);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_room(1.0);
        self.text(text, size, MARGIN, bold);
        self.y -= LINE;
    }

    /// Draws the lines of one wrapped row. A row taller than a page
    /// continues on the next one.
    fn row(&mut self, lines: &[Vec<String>], widths: &[f32], bold: bool) {
        for line in lines {
            self.ensure_room(1.0);
            let mut x = MARGIN;
            for (fragment, width) in line.iter().zip(widths) {
                self.text(fragment, BODY_SIZE, x, bold);
                x += width;
            }
            self.y -= LINE;
        }
    }

    fn table(&mut self, table: &TextTable) {
        let widths = column_widths(table);
        let header = wrap_row(&table.headers, &widths);
        self.row(&header, &widths, true);
        for row in &table.rows {
            let lines = wrap_row(row, &widths);
            if self.y - lines.len() as f32 * LINE < MARGIN {
                self.new_page();
                self.row(&header, &widths, true);
            }
            self.row(&lines, &widths, false);
        }
    }

    fn finish(self) -> Result<(Vec<u8>, usize)> {
        let pages = self.pages;
        let bytes = self.doc.save_to_bytes().map_err(pdf_error)?;
        Ok((bytes, pages))
    }
}

/// Splits the printable width so the last column gets whatever is left after
/// the others take what their longest cell needs.
fn column_widths(table: &TextTable) -> Vec<f32> {
    let available = PAGE_WIDTH - 2.0 * MARGIN;
    let count = table.headers.len().max(1);
    let longest = |col: usize| -> usize {
        std::iter::once(&table.headers)
            .chain(&table.rows)
            .filter_map(|row| row.get(col))
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(0)
    };
    let mut widths: Vec<f32> = (0..count)
        .map(|col| ((longest(col) + 2) as f32 * CHAR_WIDTH).min(available / count as f32 * 2.0))
        .collect();
    let used: f32 = widths[..count - 1].iter().sum();
    widths[count - 1] = (available - used).max(CHAR_WIDTH * 4.0);
    widths
}

/// Breaks `text` into lines that fit `width`, at spaces where possible.
///
/// Spaces stay at the end of the line they follow, so the lines concatenate
/// back to `text`. Words longer than a line are split.
fn wrap(text: &str, width: f32) -> Vec<String> {
    let max_chars = ((width / CHAR_WIDTH) as usize).saturating_sub(1).max(3);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0;
    for word in text.split_inclusive(' ') {
        let visible = word.trim_end_matches(' ').chars().count();
        if len > 0 && len + visible > max_chars {
            lines.push(std::mem::take(&mut line));
            len = 0;
        }
        for ch in word.chars() {
            if len >= max_chars && ch != ' ' {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            line.push(ch);
            len += 1;
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wraps every cell of a row and returns the drawn lines, one fragment per
/// column, padded with blanks to the tallest cell.
fn wrap_row(cells: &[String], widths: &[f32]) -> Vec<Vec<String>> {
    let wrapped: Vec<Vec<String>> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| wrap(cell, *width))
        .collect();
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);
    (0..height)
        .map(|line| {
            wrapped
                .iter()
                .map(|cell| cell.get(line).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

fn render(document: &ReportDocument) -> Result<(Vec<u8>, usize)> {
    let mut cursor = Cursor::new(&document.title)?;
    cursor.line(&document.title, TITLE_SIZE, true);
    cursor.y -= LINE / 2.0;
    for line in &document.summary {
        cursor.line(line, BODY_SIZE + 1.0, false);
    }
    for section in &document.sections {
        cursor.y -= LINE / 2.0;
        cursor.ensure_room(3.0);
        cursor.line(&section.heading, HEADING_SIZE, true);
        cursor.table(&section.table);
    }
    cursor.finish()
}

/// Renders the report to PDF bytes.
pub fn pdf_bytes(result: &AggregateResult, support: &[SupportTable]) -> Result<Vec<u8>> {
    render(&ReportDocument::build(result, support)).map(|(bytes, _)| bytes)
}

/// Renders the report and writes it to `path`.
pub fn write_pdf(path: &Path, result: &AggregateResult, support: &[SupportTable]) -> Result<()> {
    let (bytes, pages) = render(&ReportDocument::build(result, support))?;
    std::fs::write(path, bytes).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), pages, "PDF written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_at_spaces() {
        assert_eq!(wrap("APOIO", 40.0), ["APOIO"]);
        assert_eq!(wrap("", 40.0), [""]);
        assert_eq!(
            wrap("TIPO: CORRETIVA, PREVENTIVA", 25.0),
            ["TIPO: ", "CORRETIVA, ", "PREVENTIVA"]
        );
        assert_eq!(wrap("ABCDEFGHIJKL", 10.0), ["ABCD", "EFGH", "IJKL"]);
    }

    #[test]
    fn long_demand_is_drawn_in_full() {
        let demand = "Vistoria no almoxarifado central; apoio ao setor de compras; \
                      conferencia de notas pendentes da semana anterior"
            .to_string();
        assert!(demand.chars().count() > 100);
        let table = TextTable {
            headers: vec!["Data".to_string(), "Dia".to_string(), "Demanda".to_string()],
            rows: vec![vec!["02/09/2025".to_string(), "TER".to_string(), demand.clone()]],
        };
        let widths = column_widths(&table);

        let lines = wrap_row(&table.rows[0], &widths);

        assert!(lines.len() > 1);
        assert_eq!(lines[0][0], "02/09/2025");
        assert!(lines[1..].iter().all(|line| line[0].is_empty()));
        let drawn: String = lines.iter().map(|line| line[2].as_str()).collect();
        assert_eq!(drawn, demand);
        let max_chars = (widths[2] / CHAR_WIDTH) as usize - 1;
        assert!(lines.iter().all(|line| line[2].trim_end().chars().count() <= max_chars));
    }

    #[test]
    fn long_tables_paginate() {
        let document = ReportDocument {
            title: "Teste".to_string(),
            summary: Vec::new(),
            sections: vec![crate::document::DocumentSection {
                heading: "Longa".to_string(),
                table: TextTable {
                    headers: vec!["Data".to_string(), "Demanda".to_string()],
                    rows: (0..120)
                        .map(|i| vec![format!("{i:02}/09/2025"), "-".to_string()])
                        .collect(),
                },
            }],
        };
        let (bytes, pages) = render(&document).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(pages >= 3);
    }
}
