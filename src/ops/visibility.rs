use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::item::Item;
use crate::model::outline::Outline;

/// Indices of the items not hidden by a collapsed ancestor section.
///
/// `collapsed[i]` is the flag for the section at `i`; entries for tasks are
/// ignored and a missing entry counts as expanded. A collapsed section stays
/// visible itself; only what it owns is hidden.
pub fn compute_visible(items: &[Item], collapsed: &[bool]) -> Vec<usize> {
    // Open ancestor sections: (level, collapsed)
    let mut stack: Vec<(u8, bool)> = Vec::new();
    let mut visible = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let hidden = match item {
            Item::Section(section) => {
                while stack.last().is_some_and(|&(level, _)| level >= section.level) {
                    stack.pop();
                }
                let hidden = stack.iter().any(|&(_, c)| c);
                stack.push((section.level, collapsed.get(i).copied().unwrap_or(false)));
                hidden
            }
            Item::Task(_) => stack.iter().any(|&(_, c)| c),
        };
        if !hidden {
            visible.push(i);
        }
    }

    log::debug!("{} of {} items visible", visible.len(), items.len());
    visible
}

/// Keep a cursor into the visible list in range after a recompute
pub fn clamp_cursor(cursor: usize, visible_len: usize) -> usize {
    cursor.min(visible_len.saturating_sub(1))
}

/// How many items a collapsed section at `index` hides
pub fn hidden_count(outline: &Outline, index: usize) -> usize {
    match outline.get(index) {
        Some(Item::Section(_)) => outline.subtree_range(index).len() - 1,
        _ => 0,
    }
}

/// Collapsed sections for one outline file, keyed by heading text
/// (`## Title`) so the flags survive reloads and reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseState {
    #[serde(default)]
    pub collapsed: BTreeSet<String>,
}

impl CollapseState {
    pub fn is_collapsed(&self, item: &Item) -> bool {
        match item {
            Item::Section(section) => self.collapsed.contains(&section.heading()),
            Item::Task(_) => false,
        }
    }

    /// Set the flag for a section. Returns false for tasks.
    pub fn set(&mut self, item: &Item, collapsed: bool) -> bool {
        let Item::Section(section) = item else {
            return false;
        };
        if collapsed {
            self.collapsed.insert(section.heading());
        } else {
            self.collapsed.remove(&section.heading());
        }
        true
    }

    /// Per-item flags for `compute_visible`
    pub fn flags_for(&self, items: &[Item]) -> Vec<bool> {
        items.iter().map(|item| self.is_collapsed(item)).collect()
    }

    /// Drop keys for sections that no longer exist
    pub fn prune(&mut self, items: &[Item]) {
        let live: BTreeSet<String> = items
            .iter()
            .filter_map(|item| match item {
                Item::Section(s) => Some(s.heading()),
                Item::Task(_) => None,
            })
            .collect();
        self.collapsed.retain(|key| live.contains(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Item> {
        vec![
            Item::section(1, "A"),  // 0
            Item::task("t1"),       // 1
            Item::section(2, "B"),  // 2
            Item::task("t2"),       // 3
            Item::section(3, "B1"), // 4
            Item::task("t3"),       // 5
            Item::section(2, "D"),  // 6
            Item::task("t4"),       // 7
            Item::section(1, "C"),  // 8
            Item::task("t5"),       // 9
        ]
    }

    fn flags(len: usize, collapsed: &[usize]) -> Vec<bool> {
        (0..len).map(|i| collapsed.contains(&i)).collect()
    }

    #[test]
    fn nothing_collapsed_shows_everything() {
        let items = sample();
        assert_eq!(compute_visible(&items, &[]), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn collapsed_top_level_hides_until_next_top_level() {
        let items = sample();
        let visible = compute_visible(&items, &flags(10, &[0]));
        assert_eq!(visible, vec![0, 8, 9]);
    }

    #[test]
    fn expanding_restores_without_mutation() {
        let items = sample();
        let before = items.clone();
        let collapsed = compute_visible(&items, &flags(10, &[0]));
        let expanded = compute_visible(&items, &flags(10, &[]));
        assert_eq!(collapsed.len(), 3);
        assert_eq!(expanded.len(), 10);
        assert_eq!(items, before);
    }

    #[test]
    fn collapsed_nested_section_hides_only_its_range() {
        let items = sample();
        let visible = compute_visible(&items, &flags(10, &[2]));
        assert_eq!(visible, vec![0, 1, 2, 6, 7, 8, 9]);
    }

    #[test]
    fn sibling_at_same_level_is_not_hidden() {
        let items = sample();
        let visible = compute_visible(&items, &flags(10, &[4]));
        assert_eq!(visible, vec![0, 1, 2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn collapsed_inside_collapsed_stays_hidden() {
        let items = sample();
        let visible = compute_visible(&items, &flags(10, &[0, 2]));
        assert_eq!(visible, vec![0, 8, 9]);
        let visible = compute_visible(&items, &flags(10, &[2, 4]));
        assert_eq!(visible, vec![0, 1, 2, 6, 7, 8, 9]);
    }

    #[test]
    fn tasks_before_any_section_are_visible() {
        let items = vec![Item::task("loose"), Item::section(1, "A"), Item::task("t")];
        assert_eq!(compute_visible(&items, &[false, true, false]), vec![0, 1]);
    }

    #[test]
    fn task_flags_are_ignored() {
        let items = vec![Item::task("a"), Item::task("b")];
        assert_eq!(compute_visible(&items, &[true, true]), vec![0, 1]);
    }

    #[test]
    fn clamps_cursor() {
        assert_eq!(clamp_cursor(7, 3), 2);
        assert_eq!(clamp_cursor(1, 3), 1);
        assert_eq!(clamp_cursor(4, 0), 0);
    }

    #[test]
    fn counts_hidden_items() {
        let outline = Outline::new(sample());
        assert_eq!(hidden_count(&outline, 0), 7);
        assert_eq!(hidden_count(&outline, 2), 3);
        assert_eq!(hidden_count(&outline, 8), 1);
        assert_eq!(hidden_count(&outline, 1), 0);
        assert_eq!(hidden_count(&outline, 99), 0);
    }

    #[test]
    fn collapse_state_flags_by_heading() {
        let items = sample();
        let mut state = CollapseState::default();
        assert!(state.set(&items[2], true));
        assert!(!state.set(&items[1], true));
        assert_eq!(state.flags_for(&items), flags(10, &[2]));
        assert!(state.collapsed.contains("## B"));

        state.set(&items[2], false);
        assert!(state.collapsed.is_empty());
    }

    #[test]
    fn prune_drops_missing_sections() {
        let items = sample();
        let mut state = CollapseState::default();
        state.collapsed.insert("## B".into());
        state.collapsed.insert("## Gone".into());
        state.prune(&items);
        assert_eq!(state.collapsed.len(), 1);
        assert!(state.collapsed.contains("## B"));
    }
}
