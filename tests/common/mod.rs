//! Workbook fixtures shared by the integration tests

#![allow(dead_code)]

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;

/// A cell to write into a fixture sheet
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Bool(bool),
    Date(u16, u8, u8),
    Blank,
}

/// Write a workbook with one sheet per `(name, header, rows)` entry
pub fn write_workbook(path: &Path, sheets: Vec<(&str, Vec<&str>, Vec<Vec<Cell>>)>) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (name, header, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name).unwrap();

        for (col, title) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *title).unwrap();
        }

        for (r, row) in rows.iter().enumerate() {
            let r = r as u32 + 1;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, *s).unwrap();
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(r, c, *n).unwrap();
                    }
                    Cell::Bool(b) => {
                        worksheet.write_boolean(r, c, *b).unwrap();
                    }
                    Cell::Date(y, m, d) => {
                        let date = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
                        worksheet
                            .write_datetime_with_format(r, c, &date, &date_format)
                            .unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Five-person sheet; row 3's Name cannot be encoded by the PDF fonts
pub fn people_with_bad_row(path: &Path) {
    write_workbook(
        path,
        vec![(
            "People",
            vec!["Name", "Email", "Age"],
            vec![
                vec![Cell::Text("Ann"), Cell::Text("ann@example.com"), Cell::Number(31.0)],
                vec![Cell::Text("Bob"), Cell::Blank, Cell::Number(45.0)],
                vec![Cell::Text("王小明"), Cell::Text("wang@example.com"), Cell::Number(27.0)],
                vec![Cell::Text("Dee"), Cell::Text("dee@example.com"), Cell::Number(52.5)],
                vec![Cell::Text("Eve"), Cell::Text("eve@example.com"), Cell::Number(38.0)],
            ],
        )],
    );
}

/// Count occurrences of `needle` in `haystack`
pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}
