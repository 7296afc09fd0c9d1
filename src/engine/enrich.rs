//! The presence enrichment pass.

use futures::future::join_all;

use crate::models::{Employee, Presence};
use crate::sources::{PresenceError, PresenceSource};

/// Run one enrichment pass over a roster snapshot.
///
/// Every employee gets exactly one lookup per pass, issued concurrently; an
/// employee with no email is assigned offline without a lookup. Individual
/// lookup failures are absorbed to offline for that employee only and never
/// block or abort the rest, so the output always has the same cardinality and
/// order as the input.
///
/// Only client acquisition ([`PresenceSource::prepare`]) can fail the pass as
/// a whole; the caller then keeps all statuses at their last-known values.
pub async fn enrich(
    source: &dyn PresenceSource,
    mut roster: Vec<Employee>,
) -> Result<Vec<Employee>, PresenceError> {
    source.prepare().await?;

    let lookups = roster.iter().map(|employee| {
        let email = employee.email.clone();
        async move {
            if email.is_empty() {
                return Presence::Offline;
            }
            match source.availability(&email).await {
                Ok(presence) => presence,
                Err(e) => {
                    tracing::debug!("Presence lookup failed for {}: {}", email, e);
                    Presence::Offline
                }
            }
        }
    });

    let statuses = join_all(lookups).await;
    for (employee, presence) in roster.iter_mut().zip(statuses) {
        employee.presence = presence;
    }
    Ok(roster)
}
