//! Hit-testing pointer positions against marker lines and labels.

use crate::marker::MarkerState;
use crate::point::PointIndex;

/// Grab radius around `Start`, `End` and shared borders, in density-independent pixels.
pub const NEAR_RADIUS_START_OR_END: f64 = 20.0;
/// Grab radius around field lines, in density-independent pixels.
pub const NEAR_RADIUS_CUSTOM: f64 = 5.0;

/// Size and placement of the floating field name labels, in density-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub width: f64,
    pub height: f64,
    /// Distance from the top of a field's line to the label's center.
    pub shift_up: f64,
}

impl Default for LabelGeometry {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 25.0,
            shift_up: 8.0,
        }
    }
}

/// An axis-aligned box in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

impl MarkerState {
    /// Top of a field's line; the line extends down to the canvas bottom.
    pub fn field_top(&self, field_index: usize) -> f64 {
        let waveforms_height = self.layout.waveforms_height();
        let ratio = self
            .label_config
            .fields
            .get(field_index)
            .map_or(1.0, |f| f.height);
        waveforms_height * (1.0 - ratio)
    }

    /// Hit box of the floating label for one field of one visible entry.
    pub fn field_label_rect(&self, entry: usize, field: usize, label: &LabelGeometry) -> Option<Rect> {
        let x = *self.entries_in_pixel.get(entry)?.points.get(field)?;
        let density = self.canvas.density;
        let center_y = self.field_top(field) - label.shift_up * density;
        let half_width = label.width * density / 2.0;
        let half_height = label.height * density / 2.0;
        Some(Rect {
            left: x - half_width,
            top: center_y - half_height,
            right: x + half_width,
            bottom: center_y + half_height,
        })
    }

    /// Finds the point under the pointer. `x` is in canvas pixels, `y` from the canvas top.
    ///
    /// When several points qualify, the one whose line is nearest to `x` wins; on equal
    /// distance fields beat borders, and borders beat `Start` and `End`.
    pub fn point_index_for_hovering(&self, x: f64, y: f64, label: &LabelGeometry) -> PointIndex {
        if self.layout.height <= 0.0 {
            return PointIndex::None;
        }
        let density = self.canvas.density;
        let custom_radius = NEAR_RADIUS_CUSTOM * density;
        let edge_radius = NEAR_RADIUS_START_OR_END * density;
        let last = self.entries_in_pixel.len() - 1;

        let mut candidates: Vec<(f64, PointIndex)> = Vec::new();
        for (entry_index, entry) in self.entries_in_pixel.iter().enumerate() {
            for (field_index, &position) in entry.points.iter().enumerate() {
                let distance = (x - position).abs();
                let on_line = distance <= custom_radius && y >= self.field_top(field_index);
                let on_label = self
                    .field_label_rect(entry_index, field_index, label)
                    .is_some_and(|rect| rect.contains(x, y));
                if on_line || on_label {
                    candidates.push((
                        distance,
                        PointIndex::Field {
                            entry: entry_index,
                            field: field_index,
                        },
                    ));
                }
            }
        }
        for (left, entry) in self.entries_in_pixel[..last].iter().enumerate() {
            let distance = (x - entry.end).abs();
            if distance <= edge_radius {
                candidates.push((distance, PointIndex::Border { left }));
            }
        }
        let start_distance = (x - self.start()).abs();
        if start_distance <= edge_radius {
            candidates.push((start_distance, PointIndex::Start));
        }
        let end_distance = (x - self.end()).abs();
        if end_distance <= edge_radius {
            candidates.push((end_distance, PointIndex::End));
        }

        candidates
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or(PointIndex::None, |(_, point)| point)
    }

    /// Hit-tests the entry name labels shown in continuous mode, returning the project
    /// index of the entry whose label is under the pointer.
    pub fn name_label_at(&self, x: f64, y: f64, size: (f64, f64)) -> Option<usize> {
        if !self.label_config.continuous {
            return None;
        }
        let density = self.canvas.density;
        let (width, height) = (size.0 * density, size.1 * density);
        self.left_entry
            .iter()
            .chain(&self.entries_in_pixel)
            .chain(&self.right_entry)
            .find(|e| {
                Rect {
                    left: e.start,
                    top: 0.0,
                    right: e.start + width,
                    bottom: height,
                }
                .contains(x, y)
            })
            .map(|e| e.index)
    }
}
