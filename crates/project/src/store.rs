//! Reference implementation of the project side of the marker editor: staging of
//! in-progress edits, submission, cutting and navigation.

use crate::{Entry, IndexedEntry, Project, ProjectError};

pub struct EditorStore {
    project: Project,
    /// Edits made during the current drag, not yet submitted.
    staged: Option<Vec<IndexedEntry>>,
    multiple_edit: bool,
}

impl EditorStore {
    pub fn new(project: Project, multiple_edit: bool) -> Self {
        Self {
            project,
            staged: None,
            multiple_edit,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    /// Entries the editor should display: staged edits if any, else the stored window.
    pub fn entries_for_editing(&self) -> Vec<IndexedEntry> {
        match &self.staged {
            Some(staged) => staged.clone(),
            None => self.project.editing_window(self.multiple_edit),
        }
    }

    pub fn edit_entries(&mut self, entries: Vec<IndexedEntry>) {
        self.staged = Some(entries);
    }

    /// Commits staged edits. Returns whether the project changed.
    pub fn submit_entries(&mut self) -> bool {
        let Some(staged) = self.staged.take() else {
            return false;
        };
        let changed = staged
            .iter()
            .any(|edited| self.project.entries.get(edited.index) != Some(&edited.entry));
        if !changed {
            return false;
        }

        for edited in &staged {
            self.project.entries[edited.index] = edited.entry.clone();
        }
        if self.project.label_config.continuous {
            self.sync_neighbors(&staged);
        }
        log::info!("Submitted {} edited entries", staged.len());
        true
    }

    /// Keeps entries outside the edited window attached to its outer borders.
    fn sync_neighbors(&mut self, edited: &[IndexedEntry]) {
        let (Some(first), Some(last)) = (edited.first(), edited.last()) else {
            return;
        };
        let entries = &mut self.project.entries;

        if first.index > 0 && entries[first.index - 1].sample == first.entry.sample {
            entries[first.index - 1].end = first.entry.start;
        }
        if let Some(next) = entries.get_mut(last.index + 1) {
            if next.sample == last.entry.sample {
                next.start = last.entry.end;
            }
        }
    }

    /// Splits an entry in two at `position` (milliseconds).
    ///
    /// The left part keeps the name; the right part is inserted after it. Field points are
    /// clamped into the part they end up in.
    pub fn cut_entry(&mut self, index: usize, position: f64) -> Result<(), ProjectError> {
        let Some(entry) = self.project.entries.get(index) else {
            return Err(ProjectError::InvalidCut { index, position });
        };
        let duration = self
            .project
            .sample_of(entry)
            .map(|s| s.duration_ms())
            .unwrap_or_default();
        let end = entry.resolved_end(duration);
        if !(position > entry.start && position < end) {
            log::warn!("Rejected cut of entry {index} at {position}ms");
            return Err(ProjectError::InvalidCut { index, position });
        }

        let left = Entry {
            end: position,
            points: entry.points.iter().map(|p| p.clamp(entry.start, position)).collect(),
            ..entry.clone()
        };
        let right = Entry {
            name: format!("{}_2", entry.name),
            start: position,
            end: entry.end,
            points: entry.points.iter().map(|p| p.clamp(position, end)).collect(),
            ..entry.clone()
        };

        self.staged = None;
        self.project.entries[index] = left;
        self.project.entries.insert(index + 1, right);
        if self.project.current_index > index {
            self.project.current_index += 1;
        }
        log::info!("Cut entry {index} at {position}ms");
        Ok(())
    }

    pub fn rename_entry(&mut self, index: usize, name: String) -> bool {
        match self.project.entries.get_mut(index) {
            Some(entry) if entry.name != name => {
                entry.name = name;
                true
            }
            _ => false,
        }
    }

    fn switch_to(&mut self, index: usize) -> bool {
        if index == self.project.current_index || index >= self.project.entries.len() {
            return false;
        }
        self.staged = None;
        self.project.current_index = index;
        true
    }

    pub fn next_entry(&mut self) -> bool {
        self.switch_to(self.project.current_index + 1)
    }

    pub fn previous_entry(&mut self) -> bool {
        match self.project.current_index.checked_sub(1) {
            Some(index) => self.switch_to(index),
            None => false,
        }
    }

    /// Moves to the first entry of the next sample.
    pub fn next_sample(&mut self) -> bool {
        let current = &self.project.current_entry().sample;
        let target = self
            .project
            .entries
            .iter()
            .enumerate()
            .skip(self.project.current_index)
            .find(|(_, e)| &e.sample != current)
            .map(|(i, _)| i);
        match target {
            Some(index) => self.switch_to(index),
            None => false,
        }
    }

    /// Moves to the first entry of the previous sample.
    pub fn previous_sample(&mut self) -> bool {
        let entries = &self.project.entries;
        let current = &entries[self.project.current_index].sample;
        let Some(last_of_previous) = entries[..self.project.current_index]
            .iter()
            .rposition(|e| &e.sample != current)
        else {
            return false;
        };
        let previous = &entries[last_of_previous].sample;
        let first = entries[..=last_of_previous]
            .iter()
            .rposition(|e| &e.sample != previous)
            .map_or(0, |i| i + 1);
        self.switch_to(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_project;
    use pretty_assertions::assert_eq;

    fn store() -> EditorStore {
        EditorStore::new(sample_project(), true)
    }

    #[test]
    fn test_edit_is_staged_until_submit() {
        let mut store = store();
        let mut window = store.entries_for_editing();
        window[0].entry.points[0] = 200.0;
        store.edit_entries(window);

        assert_eq!(store.project().entries[0].points[0], 100.0);
        assert_eq!(store.entries_for_editing()[0].entry.points[0], 200.0);

        assert!(store.submit_entries());
        assert_eq!(store.project().entries[0].points[0], 200.0);
    }

    #[test]
    fn test_submit_without_changes_is_ignored() {
        let mut store = store();
        assert!(!store.submit_entries());

        let window = store.entries_for_editing();
        store.edit_entries(window);
        assert!(!store.submit_entries());
    }

    #[test]
    fn test_submit_syncs_continuous_neighbor() {
        let mut store = EditorStore::new(sample_project(), false);
        {
            let mut window = store.entries_for_editing();
            assert_eq!(window.len(), 1);
            window[0].entry.end = 450.0;
            store.edit_entries(window);
        }
        assert!(store.submit_entries());

        assert_eq!(store.project().entries[0].end, 450.0);
        assert_eq!(store.project().entries[1].start, 450.0);
        // Neighbor in another sample is untouched
        assert_eq!(store.project().entries[2].start, 100.0);
    }

    #[test]
    fn test_cut_entry_splits_and_clamps_points() {
        let mut store = store();
        store.cut_entry(1, 600.0).expect("cut");

        let entries = &store.project().entries;
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].name, "ki");
        assert_eq!((entries[1].start, entries[1].end), (500.0, 600.0));
        assert_eq!(entries[1].points, vec![600.0]);
        assert_eq!(entries[2].name, "ki_2");
        assert_eq!((entries[2].start, entries[2].end), (600.0, 1200.0));
        assert_eq!(entries[2].points, vec![700.0]);
    }

    #[test]
    fn test_cut_entry_with_relative_end() {
        let mut store = store();
        store.cut_entry(2, 500.0).expect("cut");

        let entries = &store.project().entries;
        assert_eq!(entries[2].end, 500.0);
        assert_eq!(entries[3].start, 500.0);
        assert_eq!(entries[3].end, -100.0);
    }

    #[test]
    fn test_cut_outside_entry_is_rejected() {
        let mut store = store();
        assert!(matches!(
            store.cut_entry(0, 500.0),
            Err(ProjectError::InvalidCut { index: 0, .. })
        ));
        assert!(store.cut_entry(9, 10.0).is_err());
        assert_eq!(store.project().entries.len(), 3);
    }

    #[test]
    fn test_cut_before_current_shifts_index() {
        let mut project = sample_project();
        project.current_index = 2;
        let mut store = EditorStore::new(project, false);

        store.cut_entry(0, 250.0).expect("cut");
        assert_eq!(store.project().current_index, 3);
        assert_eq!(store.project().current_entry().name, "ku");
    }

    #[test]
    fn test_entry_navigation() {
        let mut store = store();
        assert!(!store.previous_entry());
        assert!(store.next_entry());
        assert!(store.next_entry());
        assert_eq!(store.project().current_index, 2);
        assert!(!store.next_entry());
        assert!(store.previous_entry());
        assert_eq!(store.project().current_index, 1);
    }

    #[test]
    fn test_sample_navigation() {
        let mut store = store();
        store.next_entry();
        assert!(store.next_sample());
        assert_eq!(store.project().current_index, 2);
        assert!(!store.next_sample());

        assert!(store.previous_sample());
        assert_eq!(store.project().current_index, 0);
        assert!(!store.previous_sample());
    }

    #[test]
    fn test_navigation_drops_staged_edits() {
        let mut store = store();
        let mut window = store.entries_for_editing();
        window[0].entry.points[0] = 50.0;
        store.edit_entries(window);

        store.next_sample();
        assert!(!store.submit_entries());
        assert_eq!(store.project().entries[0].points[0], 100.0);
    }

    #[test]
    fn test_rename_entry() {
        let mut store = store();
        assert!(store.rename_entry(0, "ga".to_string()));
        assert!(!store.rename_entry(0, "ga".to_string()));
        assert!(!store.rename_entry(5, "x".to_string()));
        assert_eq!(store.project().entries[0].name, "ga");
    }
}
