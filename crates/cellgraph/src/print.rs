//! Tab-separated dumps of the printable area

use crate::sheet::Sheet;
use cellgraph_core::Position;
use std::io::{self, Write};

impl Sheet {
    /// Write every cell's value, one row per line, fields separated by tabs
    ///
    /// Empty and absent cells produce an empty field. Numbers use the shortest text that
    /// reads back as the same `f64` (`1/3` prints as `0.3333333333333333`), not the
    /// six-significant-digit form of a C++ `std::ostream` (`0.333333`).
    pub fn print_values<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, |sheet, pos| match sheet.get(pos) {
            Some(cell) if !cell.content().is_empty() => sheet.cell_value(pos, cell).to_string(),
            _ => String::new(),
        })
    }

    /// Write every cell's raw text, one row per line, fields separated by tabs
    pub fn print_texts<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, |sheet, pos| {
            sheet.get(pos).map(|cell| cell.text()).unwrap_or_default()
        })
    }

    fn print_with<W, F>(&self, out: &mut W, field: F) -> io::Result<()>
    where
        W: Write,
        F: Fn(&Sheet, Position) -> String,
    {
        let size = self.printable_size();
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    out.write_all(b"\t")?;
                }
                out.write_all(field(self, Position::new(row, col)).as_bytes())?;
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Sheet;
    use cellgraph_core::Position;
    use pretty_assertions::assert_eq;

    fn values(sheet: &Sheet) -> String {
        let mut out = Vec::new();
        sheet.print_values(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn texts(sheet: &Sheet) -> String {
        let mut out = Vec::new();
        sheet.print_texts(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_empty_sheet() {
        let sheet = Sheet::new();
        assert_eq!(values(&sheet), "");
        assert_eq!(texts(&sheet), "");
    }

    #[test]
    fn test_print_values_and_texts() {
        let mut sheet = Sheet::new();
        sheet.set_cell(Position::from_a1("A2"), "meow").unwrap();
        sheet.set_cell(Position::from_a1("B2"), "=1+2").unwrap();
        sheet.set_cell(Position::from_a1("A1"), "=1/0").unwrap();

        assert_eq!(values(&sheet), "#ARITHM!\t\nmeow\t3\n");
        assert_eq!(texts(&sheet), "=1/0\t\nmeow\t=1+2\n");
    }

    #[test]
    fn test_print_numbers_in_shortest_round_trip_form() {
        let mut sheet = Sheet::new();
        sheet.set_cell(Position::from_a1("A1"), "=1/3").unwrap();
        sheet.set_cell(Position::from_a1("B1"), "=1e6").unwrap();
        sheet.set_cell(Position::from_a1("C1"), "=0.1+0.2").unwrap();

        let printed = values(&sheet);
        assert_eq!(printed, "0.3333333333333333\t1000000\t0.30000000000000004\n");

        let first: f64 = printed.split('\t').next().unwrap().parse().unwrap();
        assert_eq!(first, 1.0 / 3.0);
    }

    #[test]
    fn test_print_escaped_text() {
        let mut sheet = Sheet::new();
        sheet.set_cell(Position::from_a1("A1"), "'=1+2").unwrap();

        assert_eq!(values(&sheet), "=1+2\n");
        assert_eq!(texts(&sheet), "'=1+2\n");
    }

    #[test]
    fn test_print_auto_created_cells_as_empty() {
        let mut sheet = Sheet::new();
        sheet.set_cell(Position::from_a1("A1"), "x").unwrap();
        sheet.set_cell(Position::from_a1("C2"), "=B1+1").unwrap();

        assert_eq!(values(&sheet), "x\t\t\n\t\t1\n");
        assert_eq!(texts(&sheet), "x\t\t\n\t\t=B1+1\n");
    }
}
