use std::collections::BTreeMap;

use catalog_core::{CatalogViewModel, CycleStatus, GroupView, ItemRowView};
use chrono::{DateTime, Utc};

use super::constants::*;

/// Which groups are expanded. Pure presentation state; never reaches the store.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    default_expanded: bool,
    overrides: BTreeMap<i64, bool>,
}

impl ExpandState {
    pub fn new(default_expanded: bool) -> Self {
        Self {
            default_expanded,
            overrides: BTreeMap::new(),
        }
    }

    pub fn is_expanded(&self, group_id: i64) -> bool {
        self.overrides
            .get(&group_id)
            .copied()
            .unwrap_or(self.default_expanded)
    }

    pub fn toggle(&mut self, group_id: i64) {
        let next = !self.is_expanded(group_id);
        self.overrides.insert(group_id, next);
    }
}

pub fn render(view: &CatalogViewModel, expand: &ExpandState, now: DateTime<Utc>) -> Vec<String> {
    let status_label = match view.status {
        CycleStatus::Idle => "Idle",
        CycleStatus::Fetching => "Fetching",
        CycleStatus::Published => "Up to date",
        CycleStatus::Failed => "Failed",
    };

    let mut lines = vec![format!(
        "{} | {} items in {} lists | {}",
        status_label,
        format_with_commas(view.item_count as u64),
        view.groups.len(),
        now.to_rfc3339()
    )];

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }

    if view.is_loading() {
        lines.push(LOADING_TEXT.to_string());
        return lines;
    }

    if view.groups.is_empty() && view.status == CycleStatus::Published {
        lines.push(EMPTY_TEXT.to_string());
    }

    for group in &view.groups {
        render_group(&mut lines, group, expand.is_expanded(group.group_id));
    }

    lines
}

fn render_group(lines: &mut Vec<String>, group: &GroupView, expanded: bool) {
    let marker = if expanded {
        MARKER_EXPANDED
    } else {
        MARKER_COLLAPSED
    };
    lines.push(format!(
        "{marker} List ID: {} ({} items)",
        group.group_id,
        group.rows.len()
    ));
    if expanded {
        lines.extend(group.rows.iter().map(render_row));
    }
}

fn render_row(row: &ItemRowView) -> String {
    format!(
        "{ROW_INDENT}{}  (id {}, price {:.2}, rating {})",
        row.name, row.id, row.price, row.rating
    )
}

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
