use crate::kmap::grid::{CellValue, KmapGrid};
use crate::kmap::verdict::{format_indices, ValidationResult};
use std::collections::BTreeSet;

/// Compare the filled grid with the expected minterms and don't-cares
///
/// Both comparisons are on sets, so the order cells were filled in does
/// not matter.
pub fn validate_filling(
    grid: &KmapGrid,
    expected_minterms: &[usize],
    expected_dont_cares: &[usize],
) -> ValidationResult {
    let ones: BTreeSet<usize> = grid.indices_of(CellValue::One).into_iter().collect();
    let dont_cares: BTreeSet<usize> = grid.indices_of(CellValue::DontCare).into_iter().collect();
    let expected_ones: BTreeSet<usize> = expected_minterms.iter().copied().collect();
    let expected_dc: BTreeSet<usize> = expected_dont_cares.iter().copied().collect();

    let mut problems = Vec::new();
    if let Some(detail) = describe_mismatch("Minterms (1)", &ones, &expected_ones) {
        problems.push(detail);
    }
    if let Some(detail) = describe_mismatch("Don't-cares (X)", &dont_cares, &expected_dc) {
        problems.push(detail);
    }

    if problems.is_empty() {
        ValidationResult::pass("The K-map is filled in correctly.")
    } else {
        ValidationResult::fail("The K-map is not filled in correctly.", problems.join("\n"))
    }
}

fn describe_mismatch(
    label: &str,
    actual: &BTreeSet<usize>,
    expected: &BTreeSet<usize>,
) -> Option<String> {
    if actual == expected {
        return None;
    }
    let missing: Vec<usize> = expected.difference(actual).copied().collect();
    let extra: Vec<usize> = actual.difference(expected).copied().collect();
    let mut detail = format!("{} do not match.", label);
    if !missing.is_empty() {
        detail.push_str(&format!(" Missing: {}.", format_indices(&missing)));
    }
    if !extra.is_empty() {
        detail.push_str(&format!(" Unexpected: {}.", format_indices(&extra)));
    }
    Some(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINTERMS: [usize; 8] = [0, 1, 5, 6, 7, 11, 12, 14];
    const DONT_CARES: [usize; 3] = [3, 8, 13];

    #[test]
    fn test_filling_matches_regardless_of_order() {
        let mut grid = KmapGrid::new();
        for &index in MINTERMS.iter().rev() {
            let (r, c) = KmapGrid::position_of(index).unwrap();
            grid.set(r, c, CellValue::One);
        }
        for &index in &DONT_CARES {
            let (r, c) = KmapGrid::position_of(index).unwrap();
            grid.toggle(r, c);
            grid.toggle(r, c);
        }
        let result = validate_filling(&grid, &MINTERMS, &DONT_CARES);
        assert!(result.is_valid, "{:?}", result);
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_minterm_mismatch_only() {
        let grid = KmapGrid::from_indices(&[0, 1, 5, 6, 7, 11, 12], &DONT_CARES);
        let result = validate_filling(&grid, &MINTERMS, &DONT_CARES);
        assert!(!result.is_valid);
        let error = result.error.unwrap();
        assert!(error.contains("Minterms (1) do not match. Missing: {14}."));
        assert!(!error.contains("Don't-cares"));
    }

    #[test]
    fn test_both_sets_reported() {
        let grid = KmapGrid::from_indices(&[0, 1, 2, 5, 6, 7, 11, 12, 14], &[3, 8]);
        let result = validate_filling(&grid, &MINTERMS, &DONT_CARES);
        let error = result.error.unwrap();
        assert!(error.contains("Unexpected: {2}"));
        assert!(error.contains("Don't-cares (X) do not match. Missing: {13}."));
    }
}
