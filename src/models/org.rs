use serde::{Deserialize, Serialize};

/// One node of the derived reporting tree.
///
/// Holds a snapshot of an employee's display attributes plus that employee's
/// direct reports, in roster order. Nodes are constructed fresh each time a
/// tree is requested and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgNode {
    pub name: String,
    pub title: String,
    pub department: String,
    pub email: String,
    pub children: Vec<OrgNode>,
}
