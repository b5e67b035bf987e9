//! Cut positions and click-to-play ranges.

use crate::marker::MarkerState;
use crate::projection::EntryInPixel;

/// Minimum distance, in pixels, between a cut and any existing point.
pub const CUT_POINT_EPSILON: f64 = 1.0;

impl MarkerState {
    /// Whether a cut at canvas pixel `x` would split a visible entry cleanly.
    pub fn is_valid_cut_position(&self, x: f64) -> bool {
        if !(x > self.left_border && x < self.right_border) {
            return false;
        }
        let inside_entry = self
            .entries_in_pixel
            .iter()
            .any(|e| x > e.start && x < e.end);
        let clear_of_points = self
            .entries_in_pixel
            .iter()
            .flat_map(EntryInPixel::all_points)
            .all(|p| (x - p).abs() >= CUT_POINT_EPSILON);
        inside_entry && clear_of_points
    }

    /// Project index of the visible entry containing `x`.
    pub fn entry_index_by_cut_position(&self, x: f64) -> Option<usize> {
        self.entries_in_pixel
            .iter()
            .find(|e| e.start <= x && x <= e.end)
            .map(|e| e.index)
    }

    /// The region between the borders around `x`, for playback.
    ///
    /// `None` if `x` is outside `[left_border, right_border]`. A `None` bound means the
    /// region reaches the start or end of the sample.
    pub fn clicked_audio_range(&self, x: f64) -> Option<(Option<f64>, Option<f64>)> {
        let (left, right) = (self.left_border, self.right_border);
        if !(x >= left && x <= right) {
            return None;
        }
        let mut bounds = vec![left, self.start()];
        bounds.extend(self.entry_borders());
        bounds.extend([self.end(), right]);
        bounds.sort_by(f64::total_cmp);
        bounds.dedup();

        let length = self.canvas.length_in_pixel();
        let to_start = |b: f64| (b > 0.0).then_some(b);
        let to_end = |b: f64| (b < length).then_some(b);

        let range = bounds
            .windows(2)
            .find(|pair| pair[0] <= x && x <= pair[1])
            .map_or((to_start(left), to_end(right)), |pair| {
                (to_start(pair[0]), to_end(pair[1]))
            });
        Some(range)
    }
}
