//! Structural comparison for tests.
//!
//! Each helper walks both sides and stops at the first difference, reporting
//! it as `StructuralMismatch` with a path such as `cells[1].value.items[0]`.
//! Arguments are always `(expected, actual)`.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::content::CellContent;
use crate::error::TableError;
use crate::layout::{Cell, Entry, Row, Table};
use crate::value::Value;
use crate::Result;

/// Compare two pieces of content, recursing into nested values
pub fn assert_contents_equal(expected: &CellContent, actual: &CellContent) -> Result<()> {
    contents_equal("content", expected, actual)
}

/// Compare two cells: value, classes, header flag, color and attributes
pub fn assert_cells_equal(expected: &Cell, actual: &Cell) -> Result<()> {
    cells_equal("cell", expected, actual)
}

/// Compare two rows.
///
/// Classes are compared as sets; attributes and entries exactly. A bare
/// value equals a default cell holding the same value.
pub fn assert_rows_equal(expected: &Row, actual: &Row) -> Result<()> {
    rows_equal("row", expected, actual)
}

/// Compare two tables, including title, scripts, styles and buttons
pub fn assert_tables_equal(expected: &Table, actual: &Table) -> Result<()> {
    let path = "table";
    same(&format!("{path}.title"), &expected.title(), &actual.title())?;
    same(&format!("{path}.classes"), &expected.classes(), &actual.classes())?;
    attrs_equal(&format!("{path}.attrs"), expected.attrs(), actual.attrs())?;
    entries_equal(&format!("{path}.headers"), expected.headers(), actual.headers())?;

    if expected.rows().len() != actual.rows().len() {
        return Err(TableError::mismatch(
            format!("{path}.rows"),
            format!(
                "expected {} rows, got {}",
                expected.rows().len(),
                actual.rows().len()
            ),
        ));
    }
    for (i, (e, a)) in expected.rows().iter().zip(actual.rows()).enumerate() {
        rows_equal(&format!("{path}.rows[{i}]"), e, a)?;
    }

    values_slice_equal(&format!("{path}.buttons"), expected.buttons(), actual.buttons())?;
    same(&format!("{path}.js"), &expected.js(), &actual.js())?;
    same(&format!("{path}.css"), &expected.css(), &actual.css())
}

fn rows_equal(path: &str, expected: &Row, actual: &Row) -> Result<()> {
    let expected_classes: BTreeSet<&String> = expected.classes().iter().collect();
    let actual_classes: BTreeSet<&String> = actual.classes().iter().collect();
    if expected_classes != actual_classes {
        return Err(TableError::mismatch(
            format!("{path}.classes"),
            format!(
                "expected {:?}, got {:?}",
                expected.classes(),
                actual.classes()
            ),
        ));
    }
    attrs_equal(&format!("{path}.attrs"), expected.attrs(), actual.attrs())?;
    entries_equal(&format!("{path}.cells"), expected.entries(), actual.entries())
}

fn entries_equal(path: &str, expected: &[Entry], actual: &[Entry]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(TableError::mismatch(
            path,
            format!("expected {} cells, got {}", expected.len(), actual.len()),
        ));
    }
    for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
        cells_equal(&format!("{path}[{i}]"), &e.cell(), &a.cell())?;
    }
    Ok(())
}

fn cells_equal(path: &str, expected: &Cell, actual: &Cell) -> Result<()> {
    values_equal(&format!("{path}.value"), expected.value(), actual.value())?;
    same(&format!("{path}.classes"), &expected.classes(), &actual.classes())?;
    same(
        &format!("{path}.is_header"),
        &expected.is_header(),
        &actual.is_header(),
    )?;
    same(
        &format!("{path}.color"),
        &expected.background(),
        &actual.background(),
    )?;
    same(
        &format!("{path}.null_as_nbsp"),
        &expected.null_as_nbsp(),
        &actual.null_as_nbsp(),
    )?;
    attrs_equal(&format!("{path}.attrs"), expected.attrs(), actual.attrs())
}

fn values_equal(path: &str, expected: &Value, actual: &Value) -> Result<()> {
    match (expected, actual) {
        (Value::Content(e), Value::Content(a)) => contents_equal(path, e, a),
        (Value::List(e), Value::List(a)) => values_slice_equal(&format!("{path}.items"), e, a),
        (e, a) if e.kind() != a.kind() => Err(TableError::mismatch(
            path,
            format!("expected a {} value, got a {} value", e.kind(), a.kind()),
        )),
        (e, a) if e != a => Err(TableError::mismatch(
            path,
            format!("expected {}, got {}", e.describe(), a.describe()),
        )),
        _ => Ok(()),
    }
}

fn values_slice_equal(path: &str, expected: &[Value], actual: &[Value]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(TableError::mismatch(
            path,
            format!("expected {} items, got {}", expected.len(), actual.len()),
        ));
    }
    for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
        values_equal(&format!("{path}[{i}]"), e, a)?;
    }
    Ok(())
}

fn contents_equal(path: &str, expected: &CellContent, actual: &CellContent) -> Result<()> {
    if expected.kind() != actual.kind() {
        return Err(TableError::mismatch(
            path,
            format!("expected {}, got {}", expected.kind(), actual.kind()),
        ));
    }
    match (expected, actual) {
        (CellContent::Link(e), CellContent::Link(a)) => {
            same(&format!("{path}.url"), &e.url(), &a.url())?;
            same(&format!("{path}.classes"), &e.classes(), &a.classes())?;
            values_slice_equal(&format!("{path}.contents"), e.contents(), a.contents())
        }
        (CellContent::List(e), CellContent::List(a)) => {
            values_slice_equal(&format!("{path}.items"), e.items(), a.items())
        }
        (CellContent::SimpleList(e), CellContent::SimpleList(a)) => {
            values_slice_equal(&format!("{path}.items"), e.items(), a.items())
        }
        (e, a) if e != a => Err(TableError::mismatch(
            path,
            format!("expected {:?}, got {:?}", e.to_string(), a.to_string()),
        )),
        _ => Ok(()),
    }
}

fn attrs_equal(
    path: &str,
    expected: &IndexMap<String, String>,
    actual: &IndexMap<String, String>,
) -> Result<()> {
    if expected != actual {
        return Err(TableError::mismatch(
            path,
            format!("expected {:?}, got {:?}", expected, actual),
        ));
    }
    Ok(())
}

fn same<T: PartialEq + std::fmt::Debug>(path: &str, expected: &T, actual: &T) -> Result<()> {
    if expected != actual {
        return Err(TableError::mismatch(
            path,
            format!("expected {:?}, got {:?}", expected, actual),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{InHref, Tooltip};

    fn mismatch_path(result: Result<()>) -> String {
        match result {
            Err(TableError::StructuralMismatch { path, .. }) => path,
            other => panic!("expected a mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_equal_contents() {
        let a = CellContent::from(Tooltip::new("a", "b").width(100));
        assert!(assert_contents_equal(&a, &a.clone()).is_ok());
    }

    #[test]
    fn test_content_kind_mismatch() {
        let a = CellContent::from(Tooltip::new("a", "b"));
        let b = CellContent::from(InHref::new("a", "/b").unwrap());
        let err = assert_contents_equal(&a, &b).unwrap_err();
        assert_eq!(err.to_string(), "content: expected Tooltip, got InHref");
    }

    #[test]
    fn test_nested_link_mismatch_path() {
        let a = CellContent::from(InHref::new(vec!["x", "y"], "/go").unwrap());
        let b = CellContent::from(InHref::new(vec!["x", "z"], "/go").unwrap());
        assert_eq!(
            mismatch_path(assert_contents_equal(&a, &b)),
            "content.contents[1]"
        );
    }

    #[test]
    fn test_cell_color_normalized() {
        let a = Cell::new(1).unwrap().with_color("ff0000");
        let b = Cell::new(1).unwrap().with_color("#ff0000");
        assert!(assert_cells_equal(&a, &b).is_ok());
    }

    #[test]
    fn test_cell_header_flag() {
        let a = Cell::new("x").unwrap();
        let b = Cell::header("x").unwrap();
        assert_eq!(mismatch_path(assert_cells_equal(&a, &b)), "cell.is_header");
    }

    #[test]
    fn test_row_cell_path() {
        let a = Row::from_entries([Value::from("x"), Value::from(vec![1, 2])]).unwrap();
        let b = Row::from_entries([Value::from("x"), Value::from(vec![1, 3])]).unwrap();
        assert_eq!(
            mismatch_path(assert_rows_equal(&a, &b)),
            "row.cells[1].value.items[1]"
        );
    }

    #[test]
    fn test_row_value_equals_default_cell() {
        let a = Row::from_entries([Entry::from("x")]).unwrap();
        let b = Row::from_entries([Cell::new("x").unwrap()]).unwrap();
        assert!(assert_rows_equal(&a, &b).is_ok());
    }

    #[test]
    fn test_row_attrs_exact() {
        let a = Row::new().with_pk(1);
        let b = Row::new().with_pk(2);
        assert_eq!(mismatch_path(assert_rows_equal(&a, &b)), "row.attrs");
    }

    #[test]
    fn test_row_length_mismatch() {
        let a = Row::from_entries(["x"]).unwrap();
        let b = Row::from_entries(["x", "y"]).unwrap();
        let err = assert_rows_equal(&a, &b).unwrap_err();
        assert_eq!(err.to_string(), "row.cells: expected 1 cells, got 2");
    }

    #[test]
    fn test_tables() {
        let mut a = Table::new(["A"]).unwrap();
        a.create_row(["x"]).unwrap();
        let mut b = a.clone();
        assert!(assert_tables_equal(&a, &b).is_ok());

        b.rows_mut()[0].add_class("hl");
        assert_eq!(
            mismatch_path(assert_tables_equal(&a, &b)),
            "table.rows[0].classes"
        );
    }
}
