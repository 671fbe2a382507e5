//! Demo workbook generation

use crate::error::{ConvertError, ConvertResult};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};
use std::path::Path;

pub const SAMPLE_SHEET: &str = "Employees";

pub const SAMPLE_HEADERS: [&str; 7] = [
    "Name",
    "Age",
    "Department",
    "Salary",
    "Email",
    "Location",
    "Start Date",
];

struct Employee {
    name: &'static str,
    age: f64,
    department: &'static str,
    salary: f64,
    email: &'static str,
    location: &'static str,
    start: (u16, u8, u8),
}

const EMPLOYEES: [Employee; 4] = [
    Employee {
        name: "John Doe",
        age: 28.0,
        department: "Engineering",
        salary: 75000.0,
        email: "john.doe@company.com",
        location: "New York",
        start: (2019, 4, 1),
    },
    Employee {
        name: "Jane Smith",
        age: 35.0,
        department: "Marketing",
        salary: 65000.0,
        email: "jane.smith@company.com",
        location: "San Francisco",
        start: (2016, 9, 12),
    },
    Employee {
        name: "Mike Johnson",
        age: 42.0,
        department: "Sales",
        salary: 58000.0,
        email: "mike.johnson@company.com",
        location: "Chicago",
        start: (2012, 1, 23),
    },
    Employee {
        name: "Sarah Wilson",
        age: 29.0,
        department: "HR",
        salary: 62000.0,
        email: "sarah.wilson@company.com",
        location: "Boston",
        start: (2021, 6, 7),
    },
];

/// Writes a small employee workbook for trying the converter
pub struct SampleWorkbook;

impl SampleWorkbook {
    /// Number of data rows in the sample sheet
    pub const ROWS: usize = EMPLOYEES.len();

    pub fn write<P: AsRef<Path>>(path: P) -> ConvertResult<()> {
        Self::build(path.as_ref()).map_err(|e| ConvertError::Sample(e.to_string()))
    }

    fn build(path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SAMPLE_SHEET)?;

        for (col, header) in SAMPLE_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }

        for (i, e) in EMPLOYEES.iter().enumerate() {
            let row = i as u32 + 1;
            let (year, month, day) = e.start;
            let start = ExcelDateTime::from_ymd(year, month, day)?;

            worksheet.write_string(row, 0, e.name)?;
            worksheet.write_number(row, 1, e.age)?;
            worksheet.write_string(row, 2, e.department)?;
            worksheet.write_number(row, 3, e.salary)?;
            worksheet.write_string(row, 4, e.email)?;
            worksheet.write_string(row, 5, e.location)?;
            worksheet.write_datetime_with_format(row, 6, &start, &date_format)?;
        }

        workbook.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::SheetLoader;
    use crate::types::CellValue;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_sample_round_trips_through_loader() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample_data.xlsx");
        SampleWorkbook::write(&path).unwrap();

        let loader = SheetLoader::new(&path);
        assert_eq!(loader.list_sheets().unwrap(), vec![SAMPLE_SHEET.to_string()]);

        let rows = loader.load_rows(None).unwrap();
        assert_eq!(rows.len(), SampleWorkbook::ROWS);

        let columns: Vec<&str> = rows[0].columns().collect();
        assert_eq!(columns, SAMPLE_HEADERS.to_vec());
        assert_eq!(rows[0].get("Salary"), Some(&CellValue::Number(75000.0)));
        assert_eq!(
            rows[3].get("Start Date"),
            Some(&CellValue::Date(NaiveDate::from_ymd_opt(2021, 6, 7).unwrap()))
        );
    }
}
