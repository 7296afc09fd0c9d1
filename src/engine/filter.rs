//! Multi-predicate filtering over the roster.

use crate::models::{Criteria, Employee};

/// Compute the visible subset of the roster under the given criteria.
///
/// Pure and order-preserving: the result is always recomputed from the full
/// roster (never patched incrementally), so output depends only on the inputs
/// regardless of how criteria changed over time. With all predicates inactive
/// the result equals the full roster.
pub fn apply_filters(roster: &[Employee], criteria: &Criteria) -> Vec<Employee> {
    let search = criteria.search.trim().to_lowercase();

    roster
        .iter()
        .filter(|e| {
            if !search.is_empty() {
                let matches = e.name.to_lowercase().contains(&search)
                    || e.job_title.to_lowercase().contains(&search);
                if !matches {
                    return false;
                }
            }

            if let Some(letter) = criteria.letter {
                let first = e.name.chars().next().map(|c| c.to_ascii_uppercase());
                if first != Some(letter.to_ascii_uppercase()) {
                    return false;
                }
            }

            // Empty stored values never match an active criterion.
            if !criteria.department.is_empty()
                && !e.department.eq_ignore_ascii_case(&criteria.department)
            {
                return false;
            }

            if !criteria.job_title.is_empty()
                && !e.job_title.eq_ignore_ascii_case(&criteria.job_title)
            {
                return false;
            }

            true
        })
        .cloned()
        .collect()
}
