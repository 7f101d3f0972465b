//! Karnaugh map exercises: filling, grouping and expression checks.
//!
//! Every check is a pure function over its inputs and returns a
//! [`ValidationResult`] for display.

pub mod exercise;
pub mod expression;
pub mod filling;
pub mod grid;
pub mod grouping;
pub mod verdict;

pub use exercise::KmapExercise;
pub use expression::{normalize_expression, syntax_issues, validate_expression};
pub use filling::validate_filling;
pub use grid::{CellValue, KmapGrid, COLS, GRAY_CODE, ROWS};
pub use grouping::{validate_grouping, Group};
pub use verdict::ValidationResult;
