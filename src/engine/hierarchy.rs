//! Derivation of the reporting tree from flat manager references.

use std::collections::HashSet;

use crate::models::{Employee, OrgNode};

/// Build the org chart from the roster.
///
/// The root is the first employee in roster order with no manager reference;
/// if every employee has one (or the roster is empty), there is no tree. Only
/// one root is ever chosen: further manager-less employees become unreachable
/// orphans, present in the flat roster but absent from the tree, as is any
/// employee whose manager reference matches no email in the roster.
///
/// The manager-reference graph is not guaranteed acyclic, so descent is
/// guarded by a visited-id set: an employee already placed in the tree is
/// never re-attached, which bounds the node count at the roster size and
/// guarantees termination on cyclic input.
pub fn build_org_tree(roster: &[Employee]) -> Option<OrgNode> {
    let root = roster.iter().find(|e| e.manager_email.is_empty())?;
    let mut visited = HashSet::new();
    Some(build_node(root, roster, &mut visited))
}

fn build_node(employee: &Employee, roster: &[Employee], visited: &mut HashSet<i64>) -> OrgNode {
    visited.insert(employee.id);

    let mut children = Vec::new();
    // An empty email never acts as a manager reference; otherwise every other
    // root would attach beneath a root with no email.
    if !employee.email.is_empty() {
        for report in roster {
            if report.manager_email == employee.email && !visited.contains(&report.id) {
                children.push(build_node(report, roster, visited));
            }
        }
    }

    OrgNode {
        name: employee.name.clone(),
        title: employee.job_title.clone(),
        department: employee.department.clone(),
        email: employee.email.clone(),
        children,
    }
}
