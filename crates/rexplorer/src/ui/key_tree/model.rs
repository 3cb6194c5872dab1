use std::collections::HashSet;

use rexplorer_core::KeyGroups;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowId {
    Group(String),
    Key(String),
}

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: RowId,
    pub label: String,
    pub depth: usize,
    /// Number of keys under a group row; zero for key rows.
    pub child_count: usize,
    pub is_expanded: bool,
}

impl TreeRow {
    pub fn is_group(&self) -> bool {
        matches!(self.id, RowId::Group(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Result of activating a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Toggled { prefix: String, expanded: bool },
    Selected(String),
    Nothing,
}

/// Groups flattened into rows, with expansion, cursor and selection.
///
/// Groups start collapsed. The cursor is the keyboard position; the selection
/// is the key whose value is on display.
#[derive(Debug, Default)]
pub struct KeyTreeModel {
    groups: KeyGroups,
    expanded: HashSet<String>,
    cursor: Option<RowId>,
    selected: Option<String>,
    rows: Vec<TreeRow>,
}

impl KeyTreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing, keeping what still applies.
    ///
    /// Expansion survives for prefixes still present and the selection only
    /// if its key still exists. A cursor on a vanished key falls back to its
    /// group, or to the nearest row.
    pub fn set_groups(&mut self, groups: KeyGroups) {
        let previous_index = self.cursor_index();
        let previous_group = match &self.cursor {
            Some(RowId::Key(key)) => self.group_of(key),
            _ => None,
        };

        self.expanded.retain(|prefix| groups.get(prefix).is_some());
        self.selected = self
            .selected
            .take()
            .filter(|key| groups.contains_key(key));
        self.groups = groups;
        self.rebuild_rows();

        let cursor_kept = self
            .cursor
            .as_ref()
            .is_some_and(|id| self.position(id).is_some());
        if cursor_kept {
            return;
        }

        let fallback = previous_group
            .filter(|id| self.position(id).is_some())
            .or_else(|| {
                let last = self.rows.len().checked_sub(1)?;
                let index = previous_index.unwrap_or(0).min(last);
                Some(self.rows[index].id.clone())
            });

        self.cursor = fallback;
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cursor(&self) -> Option<&RowId> {
        self.cursor.as_ref()
    }

    pub fn cursor_index(&self) -> Option<usize> {
        self.cursor.as_ref().and_then(|id| self.position(id))
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_expanded(&self, prefix: &str) -> bool {
        self.expanded.contains(prefix)
    }

    /// Returns whether the cursor moved.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let new_index = match (self.cursor_index(), direction) {
            (None, _) if !self.rows.is_empty() => Some(0),
            (Some(index), Direction::Up) if index > 0 => Some(index - 1),
            (Some(index), Direction::Down) if index + 1 < self.rows.len() => Some(index + 1),
            _ => None,
        };

        match new_index {
            Some(index) => {
                self.cursor = Some(self.rows[index].id.clone());
                true
            }
            None => false,
        }
    }

    pub fn move_to_first(&mut self) -> bool {
        let first = self.rows.first().map(|row| row.id.clone());
        self.move_to(first)
    }

    pub fn move_to_last(&mut self) -> bool {
        let last = self.rows.last().map(|row| row.id.clone());
        self.move_to(last)
    }

    /// Expand a collapsed group, or step into an expanded one.
    pub fn expand_at_cursor(&mut self) -> bool {
        let Some(RowId::Group(prefix)) = self.cursor.clone() else {
            return false;
        };

        if !self.is_expanded(&prefix) {
            self.expanded.insert(prefix);
            self.rebuild_rows();
            return true;
        }

        self.move_cursor(Direction::Down)
    }

    /// Collapse an expanded group, or step out of a key to its group.
    pub fn collapse_at_cursor(&mut self) -> bool {
        match self.cursor.clone() {
            Some(RowId::Group(prefix)) => {
                if self.expanded.remove(&prefix) {
                    self.rebuild_rows();
                    true
                } else {
                    false
                }
            }
            Some(RowId::Key(key)) => {
                let group = self.group_of(&key);
                self.move_to(group)
            }
            None => false,
        }
    }

    pub fn activate_cursor(&mut self) -> Activation {
        match self.cursor.clone() {
            Some(id) => self.activate(&id),
            None => Activation::Nothing,
        }
    }

    /// Toggle a group, or select a key. Moves the cursor onto the row.
    pub fn activate(&mut self, id: &RowId) -> Activation {
        if self.position(id).is_none() {
            return Activation::Nothing;
        }
        self.cursor = Some(id.clone());

        match id {
            RowId::Group(prefix) => {
                let expanded = if self.expanded.remove(prefix) {
                    false
                } else {
                    self.expanded.insert(prefix.clone());
                    true
                };
                self.rebuild_rows();

                Activation::Toggled {
                    prefix: prefix.clone(),
                    expanded,
                }
            }
            RowId::Key(key) => {
                self.selected = Some(key.clone());
                Activation::Selected(key.clone())
            }
        }
    }

    fn move_to(&mut self, id: Option<RowId>) -> bool {
        match id {
            Some(id) if self.cursor.as_ref() != Some(&id) => {
                self.cursor = Some(id);
                true
            }
            _ => false,
        }
    }

    fn position(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|row| &row.id == id)
    }

    fn group_of(&self, key: &str) -> Option<RowId> {
        self.groups
            .group_of(key)
            .map(|prefix| RowId::Group(prefix.to_string()))
    }

    fn rebuild_rows(&mut self) {
        let mut rows = Vec::with_capacity(self.groups.len());

        for (prefix, keys) in self.groups.iter() {
            let is_expanded = self.expanded.contains(prefix);

            rows.push(TreeRow {
                id: RowId::Group(prefix.to_string()),
                label: prefix.to_string(),
                depth: 0,
                child_count: keys.len(),
                is_expanded,
            });

            if is_expanded {
                rows.extend(keys.iter().map(|key| TreeRow {
                    id: RowId::Key(key.clone()),
                    label: key.clone(),
                    depth: 1,
                    child_count: 0,
                    is_expanded: false,
                }));
            }
        }

        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rexplorer_core::{DEFAULT_DELIMITER, group_keys};

    fn groups(keys: &[&str]) -> KeyGroups {
        group_keys(keys.iter().map(|k| k.to_string()), DEFAULT_DELIMITER)
    }

    fn labels(model: &KeyTreeModel) -> Vec<&str> {
        model.rows().iter().map(|row| row.label.as_str()).collect()
    }

    fn group(prefix: &str) -> RowId {
        RowId::Group(prefix.to_string())
    }

    fn key(name: &str) -> RowId {
        RowId::Key(name.to_string())
    }

    #[test]
    fn groups_start_collapsed() {
        let mut model = KeyTreeModel::new();
        model.set_groups(groups(&["user:1", "user:2", "order:5"]));

        assert_eq!(labels(&model), vec!["order", "user"]);
        assert_eq!(model.rows()[1].child_count, 2);
        assert!(model.rows().iter().all(TreeRow::is_group));
    }

    #[test]
    fn activating_group_toggles_without_selecting() {
        let mut model = KeyTreeModel::new();
        model.set_groups(groups(&["user:1", "user:2", "order:5"]));

        let activation = model.activate(&group("user"));
        assert_eq!(
            activation,
            Activation::Toggled {
                prefix: "user".to_string(),
                expanded: true
            }
        );
        assert_eq!(labels(&model), vec!["order", "user", "user:1", "user:2"]);
        assert_eq!(model.selected(), None);

        model.activate(&group("user"));
        assert_eq!(labels(&model), vec!["order", "user"]);
    }

    #[test]
    fn activating_key_selects_it() {
        let mut model = KeyTreeModel::new();
        model.set_groups(groups(&["user:1", "user:2"]));
        model.activate(&group("user"));

        assert_eq!(
            model.activate(&key("user:2")),
            Activation::Selected("user:2".to_string())
        );
        assert_eq!(model.selected(), Some("user:2"));
        assert_eq!(model.cursor(), Some(&key("user:2")));
    }

    #[test]
    fn keyboard_walk() {
        let mut model = KeyTreeModel::new();
        model.set_groups(groups(&["user:1", "user:2", "order:5"]));

        assert_eq!(model.cursor_index(), Some(0));
        assert!(model.move_cursor(Direction::Down));
        assert_eq!(model.cursor(), Some(&group("user")));
        assert!(!model.move_cursor(Direction::Down));

        assert!(model.expand_at_cursor());
        assert!(model.expand_at_cursor());
        assert_eq!(model.cursor(), Some(&key("user:1")));
        assert_eq!(model.activate_cursor(), Activation::Selected("user:1".to_string()));

        assert!(model.collapse_at_cursor());
        assert_eq!(model.cursor(), Some(&group("user")));
        assert!(model.collapse_at_cursor());
        assert_eq!(labels(&model), vec!["order", "user"]);
        assert!(!model.collapse_at_cursor());

        assert!(model.move_to_first());
        assert_eq!(model.cursor(), Some(&group("order")));
        assert!(model.move_to_last());
        assert!(!model.move_to_last());
    }

    #[test]
    fn refresh_keeps_surviving_state() {
        let mut model = KeyTreeModel::new();
        model.set_groups(groups(&["user:1", "user:2", "order:5"]));
        model.activate(&group("user"));
        model.activate(&group("order"));
        model.activate(&key("user:2"));

        model.set_groups(groups(&["user:1", "user:2", "cart:3"]));

        assert_eq!(labels(&model), vec!["cart", "user", "user:1", "user:2"]);
        assert!(!model.is_expanded("order"));
        assert_eq!(model.selected(), Some("user:2"));
        assert_eq!(model.cursor(), Some(&key("user:2")));
    }

    #[test]
    fn refresh_drops_vanished_selection() {
        let mut model = KeyTreeModel::new();
        model.set_groups(groups(&["user:1", "user:2"]));
        model.activate(&group("user"));
        model.activate(&key("user:2"));

        model.set_groups(groups(&["user:1"]));

        assert_eq!(model.selected(), None);
        assert_eq!(model.cursor(), Some(&group("user")));
    }

    #[test]
    fn refresh_with_custom_delimiter_keeps_selection_and_falls_back_to_group() {
        let slash = |keys: &[&str]| group_keys(keys.iter().map(|k| k.to_string()), '/');

        let mut model = KeyTreeModel::new();
        model.set_groups(slash(&["eu/a:1", "eu/b:2", "us/c"]));
        model.activate(&group("eu"));
        model.activate(&key("eu/a:1"));

        model.set_groups(slash(&["eu/a:1", "us/c"]));
        assert_eq!(model.selected(), Some("eu/a:1"));

        model.set_groups(slash(&["eu/z", "us/c"]));
        assert_eq!(model.selected(), None);
        assert_eq!(model.cursor(), Some(&group("eu")));
    }

    #[test]
    fn refresh_to_empty_keyspace() {
        let mut model = KeyTreeModel::new();
        model.set_groups(groups(&["user:1"]));
        model.activate(&group("user"));
        model.activate(&key("user:1"));

        model.set_groups(KeyGroups::new());

        assert_eq!(model.row_count(), 0);
        assert_eq!(model.cursor(), None);
        assert_eq!(model.selected(), None);
        assert!(!model.move_cursor(Direction::Down));
        assert_eq!(model.activate_cursor(), Activation::Nothing);
    }

    #[test]
    fn unknown_rows_are_ignored() {
        let mut model = KeyTreeModel::new();
        model.set_groups(groups(&["user:1"]));

        assert_eq!(model.activate(&key("user:1")), Activation::Nothing);
        assert_eq!(model.activate(&group("nope")), Activation::Nothing);
    }
}
