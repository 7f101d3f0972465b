use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows in the grid (variables A, B)
pub const ROWS: usize = 4;
/// Columns in the grid (variables C, D)
pub const COLS: usize = 4;

/// Axis labels in Gray-code order: 00, 01, 11, 10
pub const GRAY_CODE: [usize; 4] = [0b00, 0b01, 0b11, 0b10];

/// Value written in one K-map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "X")]
    DontCare,
}

impl CellValue {
    /// Cells a group is allowed to cover
    pub fn is_groupable(&self) -> bool {
        matches!(self, CellValue::One | CellValue::DontCare)
    }

    /// Next value in the click cycle 0 → 1 → X → 0
    pub fn next(&self) -> CellValue {
        match self {
            CellValue::Zero => CellValue::One,
            CellValue::One => CellValue::DontCare,
            CellValue::DontCare => CellValue::Zero,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            CellValue::Zero => '0',
            CellValue::One => '1',
            CellValue::DontCare => 'X',
        }
    }
}

impl TryFrom<char> for CellValue {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(CellValue::Zero),
            '1' => Ok(CellValue::One),
            'X' | 'x' => Ok(CellValue::DontCare),
            other => Err(format!("Invalid K-map cell value '{}'", other)),
        }
    }
}

/// A 4×4 Karnaugh map with Gray-code ordered axes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KmapGrid {
    cells: [[CellValue; COLS]; ROWS],
}

impl KmapGrid {
    /// A grid of zeros
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of a cell: the row label times the column count plus the column label
    ///
    /// With Gray-code labels this is the minterm number the cell stands for.
    pub fn cell_index(row: usize, col: usize) -> usize {
        GRAY_CODE[row % ROWS] * COLS + GRAY_CODE[col % COLS]
    }

    /// Grid position of a minterm number
    pub fn position_of(index: usize) -> Option<(usize, usize)> {
        if index >= ROWS * COLS {
            return None;
        }
        let row = GRAY_CODE.iter().position(|&g| g == index / COLS)?;
        let col = GRAY_CODE.iter().position(|&g| g == index % COLS)?;
        Some((row, col))
    }

    /// Build a grid from minterm and don't-care index lists
    ///
    /// Out-of-range indices are ignored. Don't-cares win over minterms.
    pub fn from_indices(minterms: &[usize], dont_cares: &[usize]) -> Self {
        let mut grid = Self::new();
        for (indices, value) in [(minterms, CellValue::One), (dont_cares, CellValue::DontCare)] {
            for &index in indices {
                if let Some((row, col)) = Self::position_of(index) {
                    grid.cells[row][col] = value;
                }
            }
        }
        grid
    }

    /// Parse four rows of four characters from {0, 1, X}, e.g. `["11X0", ...]`
    pub fn from_rows(rows: &[&str]) -> Result<Self, String> {
        if rows.len() != ROWS {
            return Err(format!("Expected {} rows, found {}", ROWS, rows.len()));
        }
        let mut grid = Self::new();
        for (r, line) in rows.iter().enumerate() {
            let values: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if values.len() != COLS {
                return Err(format!(
                    "Row {} has {} cells, expected {}",
                    r,
                    values.len(),
                    COLS
                ));
            }
            for (c, value) in values.into_iter().enumerate() {
                grid.cells[r][c] = CellValue::try_from(value)?;
            }
        }
        Ok(grid)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellValue> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: CellValue) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Advance one cell through 0 → 1 → X → 0
    pub fn toggle(&mut self, row: usize, col: usize) -> Option<CellValue> {
        let next = self.get(row, col)?.next();
        self.set(row, col, next);
        Some(next)
    }

    /// Minterm indices of every cell holding `value`, ascending
    pub fn indices_of(&self, value: CellValue) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .positions()
            .filter(|&(r, c)| self.cells[r][c] == value)
            .map(|(r, c)| Self::cell_index(r, c))
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Every (row, col) in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        (0..ROWS).flat_map(|r| (0..COLS).map(move |c| (r, c)))
    }
}

impl fmt::Display for KmapGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AB\\CD |")?;
        for g in GRAY_CODE {
            write!(f, " {:02b} |", g)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(7 + COLS * 5))?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "  {:02b}  |", GRAY_CODE[r])?;
            for cell in row {
                write!(f, "  {} |", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
