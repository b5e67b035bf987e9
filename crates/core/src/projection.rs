//! Pixel-space snapshots of time-domain entries.

use crate::time::CoordinateTransform;
use labeler_project::{Entry, IndexedEntry};

/// An entry projected onto the canvas. Recreated whenever entries, resolution or scroll
/// change; never edited in place by the renderer.
///
/// Equality is exact: two projections are equal only if every coordinate has the same
/// bit pattern. Drag results are compared this way to decide whether an edit is emitted,
/// so sub-pixel moves that clamp to the same value produce no store write.
#[derive(Debug, Clone)]
pub struct EntryInPixel {
    /// Position in the project's entry list.
    pub index: usize,
    pub sample: String,
    pub name: String,
    pub start: f64,
    pub end: f64,
    /// Index-aligned with the label config's fields.
    pub points: Vec<f64>,
}

impl EntryInPixel {
    /// Position of `Start`, `End` or one of this entry's fields.
    pub fn point(&self, point: FieldPoint) -> f64 {
        match point {
            FieldPoint::Start => self.start,
            FieldPoint::End => self.end,
            FieldPoint::Field(i) => self.points[i],
        }
    }

    /// Start, end and every field point.
    pub fn all_points(&self) -> impl Iterator<Item = f64> + '_ {
        [self.start, self.end].into_iter().chain(self.points.iter().copied())
    }

    pub(crate) fn shifted(&self, dx: f64) -> Self {
        Self {
            start: self.start + dx,
            end: self.end + dx,
            points: self.points.iter().map(|p| p + dx).collect(),
            ..self.clone()
        }
    }
}

impl PartialEq for EntryInPixel {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.sample == other.sample
            && self.name == other.name
            && self.start.to_bits() == other.start.to_bits()
            && self.end.to_bits() == other.end.to_bits()
            && self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

/// A point within a single entry, as referenced by a field's filling target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPoint {
    Start,
    End,
    Field(usize),
}

/// Converts entries between milliseconds and canvas pixels for one sample.
#[derive(Debug, Clone, Copy)]
pub struct EntryConverter {
    pub transform: CoordinateTransform,
    pub sample_duration_ms: f64,
}

impl EntryConverter {
    pub fn new(transform: CoordinateTransform, sample_duration_ms: f64) -> Self {
        Self {
            transform,
            sample_duration_ms,
        }
    }

    pub fn to_pixel(&self, indexed: &IndexedEntry) -> EntryInPixel {
        let entry = &indexed.entry;
        EntryInPixel {
            index: indexed.index,
            sample: entry.sample.clone(),
            name: entry.name.clone(),
            start: self.transform.to_pixel(entry.start),
            end: self
                .transform
                .to_pixel(entry.resolved_end(self.sample_duration_ms)),
            points: entry
                .points
                .iter()
                .map(|p| self.transform.to_pixel(*p))
                .collect(),
        }
    }

    pub fn to_millis(&self, entry: &EntryInPixel) -> IndexedEntry {
        IndexedEntry {
            index: entry.index,
            entry: Entry {
                sample: entry.sample.clone(),
                name: entry.name.clone(),
                start: self.transform.to_millis(entry.start),
                end: self.transform.to_millis(entry.end),
                points: entry
                    .points
                    .iter()
                    .map(|p| self.transform.to_millis(*p))
                    .collect(),
            },
        }
    }

    pub fn to_millis_position(&self, pixel: f64) -> f64 {
        self.transform.to_millis(pixel)
    }

    pub fn to_frame(&self, pixel: f64) -> f64 {
        self.transform.pixel_to_frame(pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn indexed(start: f64, end: f64, points: Vec<f64>) -> IndexedEntry {
        IndexedEntry {
            index: 3,
            entry: Entry {
                sample: "a.wav".to_string(),
                name: "a".to_string(),
                start,
                end,
                points,
            },
        }
    }

    fn converter() -> EntryConverter {
        EntryConverter::new(CoordinateTransform::new(1000, 10), 2000.0)
    }

    #[test]
    fn test_project_entry_to_pixels() {
        let projected = converter().to_pixel(&indexed(0.0, 1000.0, vec![300.0]));

        assert_eq!(projected.index, 3);
        assert_eq!(projected.start, 0.0);
        assert_eq!(projected.end, 100.0);
        assert_eq!(projected.points, vec![30.0]);
    }

    #[test]
    fn test_relative_end_is_resolved() {
        let projected = converter().to_pixel(&indexed(0.0, -500.0, vec![]));
        assert_eq!(projected.end, 150.0);

        let projected = converter().to_pixel(&indexed(0.0, 0.0, vec![]));
        assert_eq!(projected.end, 200.0);
    }

    #[test]
    fn test_back_to_millis() {
        let converter = converter();
        let original = indexed(120.0, 870.0, vec![300.0, 450.0]);
        let back = converter.to_millis(&converter.to_pixel(&original));

        assert_eq!(back, original);
    }

    #[test]
    fn test_equality_is_exact() {
        let a = converter().to_pixel(&indexed(0.0, 1000.0, vec![300.0]));
        let mut b = a.clone();
        assert_eq!(a, b);

        b.points[0] += 1e-9;
        assert_ne!(a, b);
    }

    #[test]
    fn test_shifted_moves_every_point() {
        let a = converter().to_pixel(&indexed(0.0, 1000.0, vec![300.0]));
        let shifted = a.shifted(20.0);

        assert_eq!(shifted.start, 20.0);
        assert_eq!(shifted.end, 120.0);
        assert_eq!(shifted.points, vec![50.0]);
        assert_eq!(shifted.all_points().count(), 3);
    }
}
