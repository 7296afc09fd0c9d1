//! ASCII rendering of the roster and org chart for CLI output.

use crate::models::{Employee, OrgNode, Presence};

const AVAILABLE: char = '●';
const BUSY: char = '◆';
const AWAY: char = '○';
const OFFLINE: char = '✗';

/// Get the status symbol for a presence value.
fn presence_symbol(presence: Presence) -> char {
    match presence {
        Presence::Available => AVAILABLE,
        Presence::Busy => BUSY,
        Presence::Away => AWAY,
        Presence::Offline => OFFLINE,
    }
}

/// Render the flat roster, one line per employee with a presence symbol.
pub fn render_roster(roster: &[Employee]) -> String {
    let mut output = String::new();
    for employee in roster {
        output.push(presence_symbol(employee.presence));
        output.push(' ');
        output.push_str(&employee.name);
        if !employee.job_title.is_empty() {
            output.push_str(&format!(" — {}", employee.job_title));
        }
        if !employee.department.is_empty() {
            output.push_str(&format!(" ({})", employee.department));
        }
        output.push('\n');
    }
    output
}

/// Render the org chart as an ASCII tree.
///
/// Example output:
/// ```text
/// Alice Smith (CEO)
/// ├── Bob Jones (CTO)
/// │   ├── Carl Park (Engineer)
/// │   └── Dana Wu (Engineer)
/// └── Erin Cole (CFO)
/// ```
pub fn render_org_tree(root: &OrgNode) -> String {
    let mut output = String::new();
    render_node(&mut output, root, "", true, true);
    output
}

/// Recursively render a node and its children.
fn render_node(output: &mut String, node: &OrgNode, prefix: &str, is_last: bool, is_root: bool) {
    let label = if node.title.is_empty() {
        node.name.clone()
    } else {
        format!("{} ({})", node.name, node.title)
    };

    if is_root {
        // Root node: just the label (no branch characters)
        output.push_str(&label);
        output.push('\n');
    } else {
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
        output.push_str(&label);
        output.push('\n');
    }

    // Calculate prefix for children
    let child_prefix = if is_root {
        String::new()
    } else {
        let continuation = if is_last { "    " } else { "│   " };
        format!("{}{}", prefix, continuation)
    };

    for (i, child) in node.children.iter().enumerate() {
        let child_is_last = i == node.children.len() - 1;
        render_node(output, child, &child_prefix, child_is_last, false);
    }
}
