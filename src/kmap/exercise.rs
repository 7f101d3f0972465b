use crate::kmap::expression::validate_expression;
use crate::kmap::filling::validate_filling;
use crate::kmap::grid::KmapGrid;
use crate::kmap::grouping::{validate_grouping, Group};
use crate::kmap::verdict::ValidationResult;
use log::debug;
use serde::{Deserialize, Serialize};

/// A four-variable K-map exercise and its solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmapExercise {
    pub minterms: Vec<usize>,
    pub dont_cares: Vec<usize>,
    /// Accepted grouping, one sorted index list per group
    pub canonical_groups: Vec<Vec<usize>>,
    pub expected_expression: String,
}

impl KmapExercise {
    pub fn new(minterms: Vec<usize>, dont_cares: Vec<usize>) -> Self {
        Self {
            minterms,
            dont_cares,
            canonical_groups: Vec::new(),
            expected_expression: String::new(),
        }
    }

    pub fn with_canonical_groups(mut self, groups: Vec<Vec<usize>>) -> Self {
        self.canonical_groups = groups
            .into_iter()
            .map(|mut g| {
                g.sort_unstable();
                g
            })
            .collect();
        self
    }

    pub fn with_expected_expression(mut self, expression: &str) -> Self {
        self.expected_expression = expression.to_string();
        self
    }

    /// F(A,B,C,D) = Σm(0,1,5,6,7,11,12,14) + Σd(3,8,13)
    pub fn sample() -> Self {
        Self::new(vec![0, 1, 5, 6, 7, 11, 12, 14], vec![3, 8, 13])
            .with_canonical_groups(vec![
                vec![1, 3, 5, 7],
                vec![3, 11],
                vec![12, 14],
                vec![6, 14],
                vec![0, 8],
            ])
            .with_expected_expression("A'D+B'CD+ABD'+BCD'+B'C'D'")
    }

    /// The grid a correct filling produces
    pub fn solution_grid(&self) -> KmapGrid {
        KmapGrid::from_indices(&self.minterms, &self.dont_cares)
    }

    /// Canonical groups as drawable groups
    pub fn solution_groups(&self) -> Vec<Group> {
        self.canonical_groups
            .iter()
            .enumerate()
            .map(|(i, indices)| Group::from_indices(&format!("g{}", i + 1), indices, ""))
            .collect()
    }

    pub fn check_filling(&self, grid: &KmapGrid) -> ValidationResult {
        let result = validate_filling(grid, &self.minterms, &self.dont_cares);
        debug!("Filling check: {}", result.message);
        result
    }

    pub fn check_grouping(&self, grid: &KmapGrid, groups: &[Group]) -> ValidationResult {
        let result = validate_grouping(grid, groups, &self.canonical_groups);
        debug!("Grouping check ({} groups): {}", groups.len(), result.message);
        result
    }

    pub fn check_expression(&self, expression: &str) -> ValidationResult {
        let result = validate_expression(expression, &self.expected_expression);
        debug!("Expression check: {}", result.message);
        result
    }
}
