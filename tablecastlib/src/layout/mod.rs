//! Cells, rows and tables.
//!
//! Containers check every value they are given, so a table that was built
//! successfully always renders.

pub mod cell;
pub mod row;
pub mod table;

pub use cell::{Cell, Entry};
pub use row::{Row, PK_ATTR};
pub use table::{Table, RESULTS_CLASS};
