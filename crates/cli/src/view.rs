//! Plain-text views of the engine snapshots.

use std::fmt::Write;

use engine::{AccountTree, SelectedReport};

use crate::app::Notice;

const INDENT: &str = "  ";

pub fn accounts(tree: &AccountTree) -> String {
    let mut out = String::new();
    for (depth, account) in tree.walk() {
        let _ = writeln!(out, "{}{} (#{})", INDENT.repeat(depth), account.name, account.id);
    }
    out
}

pub fn account_paths(tree: &AccountTree, separator: &str) -> String {
    let mut out = String::new();
    for (_, account) in tree.walk() {
        if let Some(name) = tree.full_name(account.id, separator) {
            let _ = writeln!(out, "{name}");
        }
    }
    out
}

/// `Title / Food / [Groceries]`: ancestors with their jump level, current
/// level in brackets.
pub fn breadcrumbs(selected: &SelectedReport) -> String {
    selected
        .breadcrumbs()
        .iter()
        .map(|crumb| {
            if crumb.current {
                format!("[{}]", crumb.label)
            } else {
                format!("{}:{}", crumb.level, crumb.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn report(selected: &SelectedReport) -> String {
    let report = selected.report();
    let mut out = String::new();
    let _ = writeln!(out, "{}", breadcrumbs(selected));
    if !report.subtitle.is_empty() {
        let _ = writeln!(out, "{}", report.subtitle);
    }

    let rows = selected.chart_rows();
    let width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let _ = write!(out, "{INDENT}  {:width$}", "");
    for label in &report.labels {
        let _ = write!(out, " {label:>10}");
    }
    let _ = writeln!(out, " {:>10}", "Total");

    for row in rows {
        let marker = if row.selectable { '>' } else { ' ' };
        let _ = write!(out, "{INDENT}{marker} {:width$}", row.name);
        for value in &row.values {
            let _ = write!(out, " {value:>10.2}");
        }
        let total: f64 = row.values.iter().sum();
        let _ = writeln!(out, " {total:>10.2}");
    }
    if !report.units.is_empty() {
        let _ = writeln!(out, "({})", report.units);
    }
    out
}

pub fn notice(notice: &Notice) -> Option<String> {
    if !notice.is_set() {
        return None;
    }
    let message = notice.message.as_deref().unwrap_or_default();
    Some(match notice.code {
        Some(code) => format!("error {}: {message}", code.id()),
        None => format!("error: {message}"),
    })
}
