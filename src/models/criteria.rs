use serde::{Deserialize, Serialize};

/// The active combination of filter predicates over the roster.
///
/// Each predicate is independently optional; an empty string (or `None` for
/// `letter`) means the predicate is inactive. Active predicates combine with
/// logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    /// Case-insensitive substring match against name or job title.
    pub search: String,
    /// First letter of the name, compared uppercased.
    pub letter: Option<char>,
    /// Exact case-insensitive department match.
    pub department: String,
    /// Exact case-insensitive job title match.
    pub job_title: String,
}

impl Criteria {
    /// Clear all four predicates, restoring the full roster as the visible set.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a partial update. Fields left `None` are untouched.
    pub fn apply(&mut self, update: CriteriaUpdate) {
        if let Some(search) = update.search {
            self.search = search;
        }
        if let Some(letter) = update.letter {
            // An empty string clears the letter predicate.
            self.letter = letter.chars().next();
        }
        if let Some(department) = update.department {
            self.department = department;
        }
        if let Some(job_title) = update.job_title {
            self.job_title = job_title;
        }
    }
}

/// Input for updating criteria. All fields are optional for partial updates;
/// `Some("")` clears the corresponding predicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriteriaUpdate {
    pub search: Option<String>,
    pub letter: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
}
