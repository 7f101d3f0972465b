//! Sum-of-products expression check.
//!
//! Terms are separated by `+`, a literal is a letter with an optional
//! trailing `'`. Two expressions are equal when their canonical forms are:
//! literals sorted within each term, then terms sorted.

use crate::kmap::verdict::ValidationResult;
use std::collections::BTreeSet;

/// One product term in canonical form, e.g. `AB'D`
fn normalize_term(term: &str) -> String {
    let mut literals: Vec<String> = Vec::new();
    for c in term.chars().filter(|c| !c.is_whitespace()) {
        if c.is_ascii_alphabetic() {
            literals.push(c.to_ascii_uppercase().to_string());
        } else if c == '\'' {
            if let Some(last) = literals.last_mut() {
                last.push('\'');
            }
        }
    }
    literals.sort();
    literals.concat()
}

fn normalized_terms(expression: &str) -> Vec<String> {
    let mut terms: Vec<String> = expression
        .split('+')
        .map(normalize_term)
        .filter(|t| !t.is_empty())
        .collect();
    terms.sort();
    terms
}

/// Canonical string of a sum-of-products expression
pub fn normalize_expression(expression: &str) -> String {
    normalized_terms(expression).join("+")
}

/// Hints about characters that are not part of the accepted syntax
pub fn syntax_issues(expression: &str) -> Vec<String> {
    let mut issues = Vec::new();
    if expression.contains('*') || expression.contains('.') {
        issues.push("Use juxtaposition for AND (write AB, not A*B or A.B).".to_string());
    }
    let invalid: BTreeSet<char> = expression
        .chars()
        .filter(|&c| {
            !(c.is_ascii_alphabetic() || c == '\'' || c == '+' || c.is_whitespace())
                && c != '*'
                && c != '.'
        })
        .collect();
    if !invalid.is_empty() {
        let listed: Vec<String> = invalid.iter().map(|c| format!("'{}'", c)).collect();
        issues.push(format!("Invalid characters: {}.", listed.join(", ")));
    }
    issues
}

/// Compare a student's expression with the expected one
pub fn validate_expression(user_expression: &str, expected_expression: &str) -> ValidationResult {
    if user_expression.trim().is_empty() {
        return ValidationResult::fail("No expression entered.", "Enter a sum-of-products expression.");
    }

    let user = normalized_terms(user_expression);
    let expected = normalized_terms(expected_expression);
    let issues = syntax_issues(user_expression);

    if user == expected && issues.is_empty() {
        return ValidationResult::pass("The expression is correct.");
    }

    let user_set: BTreeSet<&String> = user.iter().collect();
    let expected_set: BTreeSet<&String> = expected.iter().collect();
    let missing: Vec<&str> = expected_set
        .difference(&user_set)
        .map(|t| t.as_str())
        .collect();
    let extra: Vec<&str> = user_set
        .difference(&expected_set)
        .map(|t| t.as_str())
        .collect();

    let mut details = Vec::new();
    if !missing.is_empty() {
        details.push(format!("Missing terms: {}.", missing.join(", ")));
    }
    if !extra.is_empty() {
        details.push(format!("Extra terms: {}.", extra.join(", ")));
    }
    if missing.is_empty() && extra.is_empty() && user.len() != expected.len() {
        details.push("Some terms are repeated.".to_string());
    }
    details.extend(issues);

    ValidationResult::fail("The expression is not correct.", details.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: &str = "A'D+B'CD+ABD'+BCD'+B'C'D'";

    #[test]
    fn test_normalization_ignores_order_case_and_spacing() {
        let user = "b'cd + a'd + abd' + bcd' + b'c'd'";
        assert_eq!(normalize_expression(user), normalize_expression(EXPECTED));
        assert_eq!(normalize_expression("d a' + c"), "A'D+C");
        assert!(validate_expression(user, EXPECTED).is_valid);
    }

    #[test]
    fn test_literal_order_inside_term() {
        assert_eq!(normalize_expression("DCB'"), "B'CD");
        assert_eq!(normalize_expression("A'A"), "AA'");
    }

    #[test]
    fn test_star_is_rejected_even_when_terms_match() {
        let result = validate_expression("a*b", "AB");
        assert!(!result.is_valid);
        let error = result.error.unwrap();
        assert!(error.contains("AND"));
        assert!(!error.contains("Missing"));
    }

    #[test]
    fn test_missing_and_extra_terms() {
        let result = validate_expression("A'D + B'CD + ABD' + BC", EXPECTED);
        let error = result.error.unwrap();
        assert!(error.contains("Missing terms: B'C'D', BCD'."));
        assert!(error.contains("Extra terms: BC."));
    }

    #[test]
    fn test_invalid_characters_listed() {
        let issues = syntax_issues("A(B) + C");
        assert_eq!(issues, vec!["Invalid characters: '(', ')'.".to_string()]);
        assert!(syntax_issues("A'B + C").is_empty());
    }

    #[test]
    fn test_empty_expression() {
        let result = validate_expression("   ", EXPECTED);
        assert!(!result.is_valid);
        assert_eq!(result.message, "No expression entered.");
    }
}
