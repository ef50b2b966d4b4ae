//! Helper functions to generate point workbooks and rules files for testing

use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Cell written to a test sheet
#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    /// Text cell
    Text(&'a str),
    /// Numeric cell
    Number(f64),
    /// Boolean cell
    Bool(bool),
    /// Cell left unwritten
    Blank,
}

/// One sheet: name and rows, starting at `first_col`
#[derive(Debug, Clone)]
pub struct SheetSpec<'a> {
    pub name: &'a str,
    pub first_col: u16,
    pub rows: Vec<Vec<Cell<'a>>>,
}

impl<'a> SheetSpec<'a> {
    pub fn new(name: &'a str, rows: Vec<Vec<Cell<'a>>>) -> Self {
        Self {
            name,
            first_col: 0,
            rows,
        }
    }
}

/// Write a workbook with the given sheets, in order
pub fn write_workbook(path: &Path, sheets: &[SheetSpec<'_>]) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();

    for spec in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(spec.name)?;

        for (r, row) in spec.rows.iter().enumerate() {
            let r = u32::try_from(r)?;
            for (c, cell) in row.iter().enumerate() {
                let c = spec.first_col + u16::try_from(c)?;
                match cell {
                    Cell::Text(text) => {
                        sheet.write_string(r, c, *text)?;
                    }
                    Cell::Number(value) => {
                        sheet.write_number(r, c, *value)?;
                    }
                    Cell::Bool(value) => {
                        sheet.write_boolean(r, c, *value)?;
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Rules for the `RM` and `LD` record types
pub const STANDARD_RULES: &str = "\
Type,RM
Field,Required,Default
RECORD_TYPE,x,
NETWORK_ID,,0
UNIT_ID,,1
IO_LOCATION,x,
Type,LD
Field,Required,Default
RECORD_TYPE,x,
DESCRIPTION,,
AUTO_RESET,,1
";

/// `RM` sheet with two complete points
pub fn rm_sheet<'a>() -> SheetSpec<'a> {
    use Cell::{Number, Text};
    SheetSpec::new(
        "RM",
        vec![
            vec![
                Text("INDEX"),
                Text("POINT_NAME"),
                Text("RECORD_TYPE"),
                Text("DROP_ID"),
                Text("IO_LOCATION"),
            ],
            vec![
                Number(1.0),
                Text("D004P1B1L1"),
                Text("RM"),
                Number(4.0),
                Text("1.1.1"),
            ],
            vec![
                Number(2.0),
                Text("D004P1B1L2"),
                Text("RM"),
                Number(4.0),
                Text("1.1.2"),
            ],
        ],
    )
}

/// `LD` sheet without a `RECORD_TYPE` column or an `AUTO_RESET` column
pub fn ld_sheet<'a>() -> SheetSpec<'a> {
    use Cell::{Blank, Number, Text};
    SheetSpec::new(
        "LD",
        vec![
            vec![
                Text("INDEX"),
                Text("POINT_NAME"),
                Text("DESCRIPTION"),
                Text("TERMINAL_1"),
            ],
            vec![
                Number(1.0),
                Text("HS500KGV501E"),
                Text("PUMP 5 PRIME DISCH KGV REMOTE"),
                Blank,
            ],
        ],
    )
}

/// Sheet whose name is not a record type of [`STANDARD_RULES`]
pub fn foo_sheet<'a>() -> SheetSpec<'a> {
    use Cell::{Number, Text};
    SheetSpec::new(
        "Foo",
        vec![
            vec![Text("INDEX"), Text("POINT_NAME"), Text("X")],
            vec![Number(1.0), Text("FOO1"), Text("ignored")],
        ],
    )
}

/// Import file expected for [`STANDARD_RULES`] with the `RM`, `Foo` and `LD`
/// sheets
pub const STANDARD_OUTPUT: &str = "\
OBJECT=\"POINT\" ACTION=\"INSERT\" POINT_NAME=\"D004P1B1L1\"
  RECORD_TYPE = \"RM\"
  DROP_ID = \"4\"
  IO_LOCATION = \"1.1.1\"
  NETWORK_ID = \"0\"
  UNIT_ID = \"1\"

OBJECT=\"POINT\" ACTION=\"INSERT\" POINT_NAME=\"D004P1B1L2\"
  RECORD_TYPE = \"RM\"
  DROP_ID = \"4\"
  IO_LOCATION = \"1.1.2\"
  NETWORK_ID = \"0\"
  UNIT_ID = \"1\"

OBJECT=\"POINT\" ACTION=\"INSERT\" POINT_NAME=\"HS500KGV501E\"
  RECORD_TYPE = \"LD\"
  DESCRIPTION = \"PUMP 5 PRIME DISCH KGV REMOTE\"
  TERMINAL_1 = \"\"
  AUTO_RESET = \"1\"

";

/// Write [`STANDARD_RULES`] and a workbook with the `RM`, `Foo` and `LD`
/// sheets into `dir` under the default file names
pub fn write_standard_inputs(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(dir.join("Defaults.csv"), STANDARD_RULES)?;
    write_workbook(&dir.join("Points.xlsx"), &[rm_sheet(), foo_sheet(), ld_sheet()])
}
