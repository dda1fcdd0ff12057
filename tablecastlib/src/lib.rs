//! # tablecastlib
//!
//! Describe a table once, render it twice: as trusted HTML for the browser
//! and as CSV records for export.
//!
//! ## Overview
//!
//! Business code hands over headers and rows of plain values (strings,
//! numbers, dates, durations, money, lists) or explicitly typed content
//! (links, tooltips, feedback, images). Each value is coerced into a
//! [`CellContent`], which knows how to render itself in both formats:
//!
//! - **HTML**: newlines become `<br>`, empty values become `&nbsp;`, dates use
//!   human-friendly patterns in the configured timezone
//! - **CSV**: newlines become spaces, empty values stay empty, dates use ISO
//!   forms, links export their text and never their URL
//!
//! The layer is deliberately thin. It does not infer schema, assign
//! identifiers or look data up; a row's `data-pk` attribute only carries
//! whatever key the caller provides.
//!
//! ## Escaping
//!
//! HTML output is **not escaped**. Text is interpolated as is, and the page
//! template that embeds the fragment owns escaping untrusted input.
//!
//! ## Example
//!
//! ```rust
//! use tablecastlib::{Cell, InHref, Table, Value};
//!
//! let mut table = Table::new(["Name", "Age"]).unwrap();
//! table
//!     .create_row([Value::from(InHref::new("Ann", "/people/7").unwrap()), Value::from(30)])
//!     .unwrap()
//!     .set_pk(7);
//! table
//!     .create_row([Value::from("Bo"), Value::Null])
//!     .unwrap();
//!
//! let html = table.render_html();
//! assert!(html.contains("<tr class=\"row1\" data-pk=\"7\">"));
//! assert!(html.contains("<a href=\"/people/7\">Ann</a>"));
//!
//! assert_eq!(
//!     table.csv_records(),
//!     vec![
//!         vec!["Name".to_string(), "Age".to_string()],
//!         vec!["Ann".to_string(), "30".to_string()],
//!         vec!["Bo".to_string(), String::new()],
//!     ]
//! );
//!
//! // Unsupported values are rejected when the cell is built
//! struct Socket;
//! assert!(Cell::new(Value::foreign(&Socket)).is_err());
//! ```

pub mod coerce;
pub mod compare;
pub mod content;
pub mod error;
pub mod export;
pub mod layout;
pub mod money;
pub mod options;
pub mod value;

pub use coerce::{check, coerce, coerce_with};
pub use compare::{assert_cells_equal, assert_contents_equal, assert_rows_equal, assert_tables_equal};
pub use content::{
    CellContent, CellContentList, DisappearingFeedback, Feedback, Img, InHref, Paragraph, Problem,
    Render, SimpleList, StringContent, Tooltip,
};
pub use error::TableError;
pub use export::RecordSink;
pub use layout::{Cell, Entry, Row, Table, PK_ATTR, RESULTS_CLASS};
pub use money::Money;
pub use options::{Format, RenderOptions};
pub use value::{format_duration, Value};

/// Result type for tablecastlib operations
pub type Result<T> = std::result::Result<T, TableError>;
