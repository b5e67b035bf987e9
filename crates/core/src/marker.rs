use crate::point::PointIndex;
use crate::projection::{EntryConverter, EntryInPixel, FieldPoint};
use crate::time::CanvasParams;
use labeler_project::{Entry, FillingTarget, IndexedEntry, LabelConfig};

/// Vertical layout of the marker canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub height: f64,
    /// Share of `height` occupied by the waveforms; field lines grow up from its bottom.
    pub waveforms_height_ratio: f64,
    /// Canvas pixel at the left edge of the visible screen.
    pub screen_start: f64,
}

impl CanvasLayout {
    pub fn waveforms_height(&self) -> f64 {
        self.height.max(0.0) * self.waveforms_height_ratio
    }
}

/// Entries immediately outside the edited window, within the same sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a IndexedEntry>,
    pub next: Option<&'a IndexedEntry>,
}

/// Everything the interaction engine and the renderer need for one frame: the
/// projected window of entries and the hard bounds they can be dragged within.
#[derive(Debug, Clone)]
pub struct MarkerState {
    pub entries: Vec<IndexedEntry>,
    pub entries_in_pixel: Vec<EntryInPixel>,
    pub left_entry: Option<EntryInPixel>,
    pub right_entry: Option<EntryInPixel>,
    pub label_config: LabelConfig,
    pub canvas: CanvasParams,
    pub layout: CanvasLayout,
    pub converter: EntryConverter,
    pub left_border: f64,
    pub right_border: f64,
}

impl MarkerState {
    /// Projects `entries` for the given canvas.
    ///
    /// # Panics
    ///
    /// Panics if `entries` is empty or an entry carries a different number of points than
    /// the config has fields; both are caller bugs.
    pub fn new(
        entries: Vec<IndexedEntry>,
        neighbors: Neighbors<'_>,
        label_config: LabelConfig,
        canvas: CanvasParams,
        layout: CanvasLayout,
    ) -> Self {
        assert!(!entries.is_empty(), "marker state needs at least one entry");
        assert!(
            entries
                .iter()
                .all(|e| e.entry.points.len() == label_config.field_count()),
            "entry points must match configured fields"
        );

        let converter = EntryConverter::new(canvas.transform(), canvas.sample_duration_ms());
        let entries_in_pixel: Vec<EntryInPixel> =
            entries.iter().map(|e| converter.to_pixel(e)).collect();
        let left_entry = neighbors.previous.map(|e| converter.to_pixel(e));
        let right_entry = neighbors.next.map(|e| converter.to_pixel(e));

        let (left_border, right_border) = if label_config.continuous {
            (
                left_entry.as_ref().map_or(0.0, |e| e.end),
                right_entry
                    .as_ref()
                    .map_or(canvas.length_in_pixel(), |e| e.start),
            )
        } else {
            (0.0, canvas.length_in_pixel())
        };

        Self {
            entries,
            entries_in_pixel,
            left_entry,
            right_entry,
            label_config,
            canvas,
            layout,
            converter,
            left_border,
            right_border,
        }
    }

    /// Builds the state for the project's current window.
    pub fn from_window(
        all_entries: &[Entry],
        window: Vec<IndexedEntry>,
        label_config: LabelConfig,
        canvas: CanvasParams,
        layout: CanvasLayout,
    ) -> Self {
        let neighbor = |index: Option<usize>, sample: &str| {
            index
                .and_then(|i| all_entries.get(i).map(|entry| (i, entry)))
                .filter(|(_, entry)| entry.sample == sample)
                .map(|(index, entry)| IndexedEntry {
                    index,
                    entry: entry.clone(),
                })
        };
        let first = window.first().map(|e| (e.index, e.entry.sample.clone()));
        let last = window.last().map(|e| (e.index, e.entry.sample.clone()));
        let previous = first.and_then(|(i, sample)| neighbor(i.checked_sub(1), &sample));
        let next = last.and_then(|(i, sample)| neighbor(Some(i + 1), &sample));

        Self::new(
            window,
            Neighbors {
                previous: previous.as_ref(),
                next: next.as_ref(),
            },
            label_config,
            canvas,
            layout,
        )
    }

    pub fn field_count(&self) -> usize {
        self.label_config.field_count()
    }

    /// Shared borders between consecutive visible entries.
    pub fn entry_borders(&self) -> Vec<f64> {
        let count = self.entries_in_pixel.len();
        self.entries_in_pixel[..count - 1]
            .iter()
            .map(|e| e.end)
            .collect()
    }

    pub fn start(&self) -> f64 {
        self.entries_in_pixel[0].start
    }

    pub fn end(&self) -> f64 {
        self.entries_in_pixel[self.entries_in_pixel.len() - 1].end
    }

    /// Current pixel position of a point, or `None` if it does not address a visible point.
    pub fn point_position(&self, point: PointIndex) -> Option<f64> {
        match point {
            PointIndex::None => None,
            PointIndex::Start => Some(self.start()),
            PointIndex::End => Some(self.end()),
            PointIndex::Field { entry, field } => self
                .entries_in_pixel
                .get(entry)
                .and_then(|e| e.points.get(field))
                .copied(),
            PointIndex::Border { left } => {
                if left + 1 < self.entries_in_pixel.len() {
                    Some(self.entries_in_pixel[left].end)
                } else {
                    None
                }
            }
        }
    }

    /// The point a field's region is filled against, if it declares one.
    pub fn fill_target(&self, field_index: usize) -> Option<FieldPoint> {
        let field = self.label_config.fields.get(field_index)?;
        match &field.filling {
            FillingTarget::None => None,
            FillingTarget::Start => Some(FieldPoint::Start),
            FillingTarget::End => Some(FieldPoint::End),
            FillingTarget::Field(name) => self
                .label_config
                .field_index(name)
                .filter(|&i| i != field_index)
                .map(FieldPoint::Field),
        }
    }

    /// Whether pressing on `point` starts a drag of the whole window by default.
    pub fn locks_by_default(&self, point: PointIndex) -> bool {
        let policy = self.label_config.locked_drag;
        let by_base_field = match point {
            PointIndex::Field { field, .. } => {
                policy.use_drag_base && self.label_config.is_drag_base(field)
            }
            _ => false,
        };
        let by_start = policy.use_start && point == PointIndex::Start;
        by_base_field || by_start
    }

    /// Screen offset that brings the entry with project index `current` into view on a screen
    /// `screen_width` pixels wide, centered when it fits and start-aligned when it does not.
    /// Falls back to the whole window if `current` is not visible. The result keeps the
    /// screen on the canvas.
    pub fn fit_screen_start(&self, current: usize, screen_width: f64) -> f64 {
        let (start, end) = self
            .entries_in_pixel
            .iter()
            .find(|e| e.index == current)
            .map_or((self.start(), self.end()), |e| (e.start, e.end));
        let offset = if end - start > screen_width {
            start
        } else {
            (start + end - screen_width) / 2.0
        };
        let max_start = (self.canvas.length_in_pixel() - screen_width).max(0.0);
        offset.max(0.0).min(max_start)
    }

    /// Converts a dragged projection back to milliseconds for the store.
    pub fn to_millis(&self, entries: &[EntryInPixel]) -> Vec<IndexedEntry> {
        entries.iter().map(|e| self.converter.to_millis(e)).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use labeler_project::{Field, LockedDragPolicy};

    pub(crate) fn field(name: &str, height: f64, filling: FillingTarget) -> Field {
        Field {
            name: name.to_string(),
            label: name.to_uppercase(),
            color: "#ffffff".to_string(),
            height,
            filling,
            drag_base: false,
        }
    }

    pub(crate) fn config(fields: Vec<Field>, continuous: bool) -> LabelConfig {
        LabelConfig {
            name: "test".to_string(),
            fields,
            continuous,
            locked_drag: LockedDragPolicy::default(),
        }
    }

    pub(crate) fn entry(index: usize, start: f64, end: f64, points: Vec<f64>) -> IndexedEntry {
        IndexedEntry {
            index,
            entry: Entry {
                sample: "a.wav".to_string(),
                name: format!("e{index}"),
                start,
                end,
                points,
            },
        }
    }

    /// 2000 frames at 1kHz and 10 frames per pixel: 1ms == 0.1px, canvas is 200px wide.
    pub(crate) fn canvas() -> CanvasParams {
        CanvasParams::new(2000, 1000, 10, 1.0)
    }

    pub(crate) fn layout() -> CanvasLayout {
        CanvasLayout {
            height: 400.0,
            waveforms_height_ratio: 0.5,
            screen_start: 0.0,
        }
    }

    /// Single entry `{start: 0, end: 1000, points: [300]}` → `{0px, 100px, [30px]}`.
    pub(crate) fn single_state(filling: FillingTarget) -> MarkerState {
        MarkerState::new(
            vec![entry(0, 0.0, 1000.0, vec![300.0])],
            Neighbors::default(),
            config(vec![field("p", 0.5, filling)], false),
            canvas(),
            layout(),
        )
    }

    #[test]
    fn test_projection_scenario() {
        let state = single_state(FillingTarget::None);
        let projected = &state.entries_in_pixel[0];

        assert_eq!(projected.start, 0.0);
        assert_eq!(projected.end, 100.0);
        assert_eq!(projected.points, vec![30.0]);
        assert_eq!(state.left_border, 0.0);
        assert_eq!(state.right_border, 200.0);
    }

    #[test]
    fn test_continuous_borders_come_from_neighbors() {
        let all = vec![
            entry(0, 0.0, 200.0, vec![100.0]).entry,
            entry(1, 200.0, 900.0, vec![300.0]).entry,
            entry(2, 900.0, 1500.0, vec![1000.0]).entry,
        ];
        let window = vec![entry(1, 200.0, 900.0, vec![300.0])];
        let state = MarkerState::from_window(
            &all,
            window,
            config(vec![field("p", 0.5, FillingTarget::None)], true),
            canvas(),
            layout(),
        );

        assert_eq!(state.left_border, 20.0);
        assert_eq!(state.right_border, 90.0);
        assert_eq!(state.left_entry.as_ref().map(|e| e.index), Some(0));
        assert_eq!(state.right_entry.as_ref().map(|e| e.index), Some(2));
    }

    #[test]
    fn test_neighbors_in_other_samples_are_ignored() {
        let mut other = entry(1, 0.0, 500.0, vec![100.0]).entry;
        other.sample = "b.wav".to_string();
        let all = vec![entry(0, 0.0, 1000.0, vec![300.0]).entry, other];
        let state = MarkerState::from_window(
            &all,
            vec![entry(0, 0.0, 1000.0, vec![300.0])],
            config(vec![field("p", 0.5, FillingTarget::None)], true),
            canvas(),
            layout(),
        );

        assert!(state.right_entry.is_none());
        assert_eq!(state.right_border, 200.0);
    }

    #[test]
    fn test_entry_borders_and_positions() {
        let state = MarkerState::new(
            vec![
                entry(4, 0.0, 500.0, vec![100.0]),
                entry(5, 500.0, 1000.0, vec![700.0]),
            ],
            Neighbors::default(),
            config(vec![field("p", 0.5, FillingTarget::None)], true),
            canvas(),
            layout(),
        );

        assert_eq!(state.entry_borders(), vec![50.0]);
        assert_eq!(state.point_position(PointIndex::Start), Some(0.0));
        assert_eq!(state.point_position(PointIndex::End), Some(100.0));
        assert_eq!(state.point_position(PointIndex::Border { left: 0 }), Some(50.0));
        assert_eq!(state.point_position(PointIndex::Border { left: 1 }), None);
        assert_eq!(
            state.point_position(PointIndex::Field { entry: 1, field: 0 }),
            Some(70.0)
        );
        assert_eq!(state.point_position(PointIndex::Field { entry: 2, field: 0 }), None);
        assert_eq!(state.point_position(PointIndex::None), None);
    }

    #[test]
    fn test_fill_target_resolution() {
        let state = MarkerState::new(
            vec![entry(0, 0.0, 1000.0, vec![100.0, 200.0, 300.0])],
            Neighbors::default(),
            config(
                vec![
                    field("a", 0.5, FillingTarget::Start),
                    field("b", 0.5, FillingTarget::Field("a".to_string())),
                    field("c", 0.5, FillingTarget::End),
                ],
                false,
            ),
            canvas(),
            layout(),
        );

        assert_eq!(state.fill_target(0), Some(FieldPoint::Start));
        assert_eq!(state.fill_target(1), Some(FieldPoint::Field(0)));
        assert_eq!(state.fill_target(2), Some(FieldPoint::End));
        assert_eq!(state.fill_target(3), None);
    }

    #[test]
    fn test_locks_by_default() {
        let mut state = single_state(FillingTarget::None);
        let field_point = PointIndex::Field { entry: 0, field: 0 };
        assert!(!state.locks_by_default(field_point));
        assert!(!state.locks_by_default(PointIndex::Start));

        state.label_config.fields[0].drag_base = true;
        state.label_config.locked_drag = LockedDragPolicy {
            use_drag_base: true,
            use_start: true,
        };
        assert!(state.locks_by_default(field_point));
        assert!(state.locks_by_default(PointIndex::Start));
        assert!(!state.locks_by_default(PointIndex::End));
    }

    #[test]
    fn test_fit_screen_centers_current_entry() {
        // 60s at 1kHz and 10 frames per pixel: 6000px
        let long = CanvasParams::new(60_000, 1000, 10, 1.0);
        let fit = |start: f64, end: f64| {
            MarkerState::new(
                vec![entry(1, start, end, vec![start])],
                Neighbors::default(),
                config(vec![field("p", 0.5, FillingTarget::None)], false),
                long,
                layout(),
            )
            .fit_screen_start(1, 1000.0)
        };
        assert_eq!(fit(30_000.0, 31_000.0), 2550.0);
        assert_eq!(fit(0.0, 1000.0), 0.0);
        assert_eq!(fit(59_500.0, 60_000.0), 5000.0);
        // Wider than the screen: its start goes to the left edge
        assert_eq!(fit(1000.0, 20_000.0), 100.0);
    }

    #[test]
    fn test_fit_screen_on_short_canvas_stays_at_zero() {
        let state = single_state(FillingTarget::None);
        assert_eq!(state.fit_screen_start(0, 1000.0), 0.0);
    }

    #[test]
    fn test_fit_screen_picks_current_entry_in_window() {
        let long = CanvasParams::new(60_000, 1000, 10, 1.0);
        let state = MarkerState::new(
            vec![
                entry(0, 0.0, 30_000.0, vec![100.0]),
                entry(1, 30_000.0, 31_000.0, vec![30_500.0]),
            ],
            Neighbors::default(),
            config(vec![field("p", 0.5, FillingTarget::None)], true),
            long,
            layout(),
        );
        assert_eq!(state.fit_screen_start(1, 1000.0), 2550.0);
        // Not in the window: fit the whole window, which is wider than the screen
        assert_eq!(state.fit_screen_start(7, 1000.0), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_empty_window_is_rejected() {
        MarkerState::new(
            vec![],
            Neighbors::default(),
            config(vec![], false),
            canvas(),
            layout(),
        );
    }
}
