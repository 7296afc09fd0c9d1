//! The roster aggregation engine.
//!
//! [`Directory`] owns the single piece of mutable shared state (the roster)
//! plus the active filter criteria, and exposes the consumer-facing surface:
//! loading, presence refresh, the filtered view, and the derived org chart.
//! The state is explicit and handle-owned; there are no ambient singletons.

mod enrich;
mod filter;
mod hierarchy;
mod scheduler;

use std::sync::{Arc, RwLock};

pub use enrich::enrich;
pub use filter::apply_filters;
pub use hierarchy::build_org_tree;
pub use scheduler::RefreshScheduler;

use crate::models::{Criteria, CriteriaUpdate, Employee, OrgNode};
use crate::sources::{DirectorySource, LoadError, PresenceSource};

/// Cheap-to-clone handle over the shared roster state.
///
/// Readers (filter, org chart) always see a consistent snapshot: the roster is
/// only ever replaced wholesale, by the loader or by a completed enrichment
/// pass, never mutated in place under a reader.
#[derive(Clone)]
pub struct Directory {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn DirectorySource>,
    presence: Arc<dyn PresenceSource>,
    roster: RwLock<Roster>,
    criteria: RwLock<Criteria>,
    /// Serializes enrichment passes: a pass that starts while another is
    /// outstanding waits for it instead of racing to publish.
    pass_guard: tokio::sync::Mutex<()>,
}

#[derive(Default)]
struct Roster {
    employees: Vec<Employee>,
    /// Bumped on every loader publish so a pass that raced a reload can
    /// discard its now-stale results.
    generation: u64,
}

impl Directory {
    pub fn new(source: Arc<dyn DirectorySource>, presence: Arc<dyn PresenceSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                presence,
                roster: RwLock::new(Roster::default()),
                criteria: RwLock::new(Criteria::default()),
                pass_guard: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Fetch the directory list, publish it as the new roster, and run one
    /// enrichment pass over it.
    ///
    /// On failure the previously held roster is untouched: a failed load means
    /// "no new data", never "empty roster".
    pub async fn load(&self) -> Result<usize, LoadError> {
        let employees = self.inner.source.fetch().await?;
        let count = employees.len();
        {
            let mut roster = self.inner.roster.write().expect("roster lock poisoned");
            roster.employees = employees;
            roster.generation += 1;
        }
        tracing::info!("Loaded {} employees from directory", count);

        self.refresh_presence().await;
        Ok(count)
    }

    /// Run one enrichment pass against the current roster.
    ///
    /// Passes never overlap; the enriched roster is published atomically once
    /// every lookup has completed. A pass-level client acquisition failure
    /// keeps all statuses at their last-known values.
    pub async fn refresh_presence(&self) {
        let _pass = self.inner.pass_guard.lock().await;

        let (snapshot, generation) = {
            let roster = self.inner.roster.read().expect("roster lock poisoned");
            (roster.employees.clone(), roster.generation)
        };
        if snapshot.is_empty() {
            return;
        }

        match enrich(self.inner.presence.as_ref(), snapshot).await {
            Ok(enriched) => {
                let mut roster = self.inner.roster.write().expect("roster lock poisoned");
                if roster.generation == generation {
                    roster.employees = enriched;
                } else {
                    // A reload happened mid-pass; these results are stale.
                    tracing::debug!("Roster replaced during enrichment pass, results discarded");
                }
            }
            Err(e) => {
                tracing::warn!("Presence pass failed, keeping last-known statuses: {}", e);
            }
        }
    }

    /// Snapshot of the full roster.
    pub fn current_roster(&self) -> Vec<Employee> {
        self.inner
            .roster
            .read()
            .expect("roster lock poisoned")
            .employees
            .clone()
    }

    /// The visible subset of the roster under the current criteria,
    /// recomputed from the full roster on every call.
    pub fn visible_employees(&self) -> Vec<Employee> {
        let criteria = self
            .inner
            .criteria
            .read()
            .expect("criteria lock poisoned")
            .clone();
        let roster = self.inner.roster.read().expect("roster lock poisoned");
        apply_filters(&roster.employees, &criteria)
    }

    /// The currently active criteria.
    pub fn criteria(&self) -> Criteria {
        self.inner
            .criteria
            .read()
            .expect("criteria lock poisoned")
            .clone()
    }

    /// Apply a partial criteria update.
    pub fn set_criteria(&self, update: CriteriaUpdate) {
        self.inner
            .criteria
            .write()
            .expect("criteria lock poisoned")
            .apply(update);
    }

    /// Clear all predicates, restoring the full roster as the visible set.
    pub fn reset_criteria(&self) {
        self.inner
            .criteria
            .write()
            .expect("criteria lock poisoned")
            .reset();
    }

    /// Build a fresh org chart from the current roster.
    pub fn org_chart(&self) -> Option<OrgNode> {
        let roster = self.inner.roster.read().expect("roster lock poisoned");
        build_org_tree(&roster.employees)
    }

    /// Distinct non-empty departments, in roster order.
    pub fn departments(&self) -> Vec<String> {
        let roster = self.inner.roster.read().expect("roster lock poisoned");
        distinct(roster.employees.iter().map(|e| &e.department))
    }

    /// Distinct non-empty job titles, in roster order.
    pub fn job_titles(&self) -> Vec<String> {
        let roster = self.inner.roster.read().expect("roster lock poisoned");
        distinct(roster.employees.iter().map(|e| &e.job_title))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(v.as_str()))
        .cloned()
        .collect()
}
