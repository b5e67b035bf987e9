//! Constraint-preserving drag of one point, or of the whole window.

use crate::marker::MarkerState;
use crate::point::PointIndex;
use crate::projection::{EntryInPixel, FieldPoint};

/// Bounds `x` to `[left, right]`. Inverted bounds resolve to `right` instead of panicking.
fn bound(x: f64, left: f64, right: f64) -> f64 {
    x.max(left).min(right)
}

impl MarkerState {
    /// Moves only the addressed point to `x`, kept within `[left, right]`.
    ///
    /// A field filled against `Start` never moves before it, one filled against `End` never
    /// moves past it, and one filled against another field keeps the side it started on.
    ///
    /// Returns the projection unchanged when `point` addresses nothing.
    pub fn dragged_entries(&self, point: PointIndex, x: f64, left: f64, right: f64) -> Vec<EntryInPixel> {
        let mut entries = self.entries_in_pixel.clone();
        let x = bound(x, left, right);
        let last = entries.len() - 1;

        match point {
            PointIndex::None => {}
            PointIndex::Start => {
                let first = &mut entries[0];
                first.start = x.min(first.end);
            }
            PointIndex::End => {
                let last = &mut entries[last];
                last.end = x.max(last.start);
            }
            PointIndex::Border { left: k } if k < last => {
                let x = bound(x, entries[k].start, entries[k + 1].end);
                entries[k].end = x;
                entries[k + 1].start = x;
            }
            PointIndex::Border { .. } => {}
            PointIndex::Field { entry, field } => {
                let Some(current) = entries.get(entry).and_then(|e| e.points.get(field).copied())
                else {
                    return entries;
                };
                let x = match self.fill_target(field) {
                    None => x,
                    Some(target) => {
                        let t = bound(entries[entry].point(target), left, right);
                        match target {
                            FieldPoint::Start => x.max(t),
                            FieldPoint::End => x.min(t),
                            // A field resting on its target stays at or after it
                            FieldPoint::Field(_) if current >= t => x.max(t),
                            FieldPoint::Field(_) => x.min(t),
                        }
                    }
                };
                entries[entry].points[field] = x;
            }
        }
        entries
    }

    /// Shifts every point of the window by the same delta, so that the addressed point
    /// lands as close to `x` as `[left, right]` allows for all of them.
    pub fn locked_dragged_entries(
        &self,
        point: PointIndex,
        x: f64,
        left: f64,
        right: f64,
    ) -> Vec<EntryInPixel> {
        let Some(current) = self.point_position(point) else {
            return self.entries_in_pixel.clone();
        };
        let (min, max) = self
            .entries_in_pixel
            .iter()
            .flat_map(EntryInPixel::all_points)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
                (min.min(p), max.max(p))
            });
        let (low, high) = (left - min, right - max);
        let dx = if low > high {
            0.0
        } else {
            bound(x - current, low, high)
        };
        if dx == 0.0 {
            return self.entries_in_pixel.clone();
        }
        self.entries_in_pixel.iter().map(|e| e.shifted(dx)).collect()
    }

    /// Runs the drag selected by `locked` against the state's own borders.
    pub fn drag(&self, point: PointIndex, x: f64, locked: bool) -> Vec<EntryInPixel> {
        if locked {
            self.locked_dragged_entries(point, x, self.left_border, self.right_border)
        } else {
            self.dragged_entries(point, x, self.left_border, self.right_border)
        }
    }
}
