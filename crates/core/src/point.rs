//! Addresses of the points a pointer can grab.

/// Flattened address meaning "no target".
pub const NONE_POINT_INDEX: i64 = -3;
/// Flattened address of the first visible entry's start.
pub const START_POINT_INDEX: i64 = -1;
/// Flattened address of the last visible entry's end.
pub const END_POINT_INDEX: i64 = -2;

/// One addressable point across the visible entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PointIndex {
    #[default]
    None,
    /// Start of the first visible entry.
    Start,
    /// End of the last visible entry.
    End,
    /// A configured field of the entry at `entry` (offset within the visible window).
    Field { entry: usize, field: usize },
    /// The shared border between visible entries `left` and `left + 1`.
    Border { left: usize },
}

impl PointIndex {
    pub fn is_none(&self) -> bool {
        matches!(self, PointIndex::None)
    }

    /// Flattens to `field + entry * (field_count + 1)`; the extra slot per entry is the
    /// border after it. Renderers key highlight state on this integer.
    pub fn flatten(&self, field_count: usize) -> i64 {
        let stride = field_count as i64 + 1;
        match *self {
            PointIndex::None => NONE_POINT_INDEX,
            PointIndex::Start => START_POINT_INDEX,
            PointIndex::End => END_POINT_INDEX,
            PointIndex::Field { entry, field } => field as i64 + entry as i64 * stride,
            PointIndex::Border { left } => field_count as i64 + left as i64 * stride,
        }
    }

    pub fn unflatten(address: i64, field_count: usize) -> Self {
        match address {
            START_POINT_INDEX => PointIndex::Start,
            END_POINT_INDEX => PointIndex::End,
            a if a < 0 => PointIndex::None,
            a => {
                let stride = field_count as i64 + 1;
                let entry = (a / stride) as usize;
                let slot = (a % stride) as usize;
                if slot == field_count {
                    PointIndex::Border { left: entry }
                } else {
                    PointIndex::Field { entry, field: slot }
                }
            }
        }
    }
}
