/// Default horizontal resolution, in sample frames per pixel.
pub const DEFAULT_RESOLUTION: u32 = 40;

/// Allowed zoom levels. Resolution is measured in sample frames per pixel, so a larger
/// value means a more zoomed-out canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl ResolutionRange {
    pub fn new(min: u32, max: u32, step: u32) -> Self {
        assert!(min > 0 && min <= max, "resolution range must satisfy 0 < min <= max");
        Self { min, max, step }
    }

    pub fn clamp(&self, resolution: u32) -> u32 {
        resolution.clamp(self.min, self.max)
    }

    pub fn can_increase(&self, resolution: u32) -> bool {
        resolution < self.max
    }

    pub fn increase_from(&self, resolution: u32) -> u32 {
        self.clamp(resolution.saturating_add(self.step))
    }

    pub fn can_decrease(&self, resolution: u32) -> bool {
        resolution > self.min
    }

    pub fn decrease_from(&self, resolution: u32) -> u32 {
        self.clamp(resolution.saturating_sub(self.step))
    }
}

impl Default for ResolutionRange {
    fn default() -> Self {
        Self::new(10, 400, 20)
    }
}

/// Maps between milliseconds, sample frames and canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    pub sample_rate: u32,
    /// Sample frames per pixel.
    pub resolution: u32,
}

impl CoordinateTransform {
    pub fn new(sample_rate: u32, resolution: u32) -> Self {
        Self {
            sample_rate,
            resolution,
        }
    }

    pub fn millis_to_frame(&self, millis: f64) -> f64 {
        millis * self.sample_rate as f64 / 1000.0
    }

    pub fn frame_to_millis(&self, frame: f64) -> f64 {
        frame * 1000.0 / self.sample_rate as f64
    }

    pub fn frame_to_pixel(&self, frame: f64) -> f64 {
        frame / self.resolution as f64
    }

    pub fn pixel_to_frame(&self, pixel: f64) -> f64 {
        pixel * self.resolution as f64
    }

    pub fn to_pixel(&self, millis: f64) -> f64 {
        self.frame_to_pixel(self.millis_to_frame(millis))
    }

    pub fn to_millis(&self, pixel: f64) -> f64 {
        self.frame_to_millis(self.pixel_to_frame(pixel))
    }
}

/// Geometry of the marker canvas for one sample at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasParams {
    /// Sample length in frames.
    pub data_length: u64,
    pub sample_rate: u32,
    pub resolution: u32,
    /// Device pixel ratio.
    pub density: f64,
}

impl CanvasParams {
    pub fn new(data_length: u64, sample_rate: u32, resolution: u32, density: f64) -> Self {
        Self {
            data_length,
            sample_rate,
            resolution,
            density,
        }
    }

    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.sample_rate, self.resolution)
    }

    pub fn length_in_pixel(&self) -> f64 {
        (self.data_length as f64 / self.resolution as f64).ceil()
    }

    pub fn sample_duration_ms(&self) -> f64 {
        self.transform().frame_to_millis(self.data_length as f64)
    }

    pub fn with_resolution(self, resolution: u32) -> Self {
        Self { resolution, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_millis_to_pixel() {
        let transform = CoordinateTransform::new(1000, 10);
        assert_eq!(transform.to_pixel(1000.0), 100.0);
        assert_eq!(transform.to_pixel(300.0), 30.0);
        assert_eq!(transform.to_millis(150.0), 1500.0);
    }

    #[test]
    fn test_frames_and_millis() {
        let transform = CoordinateTransform::new(44100, 40);
        assert_eq!(transform.millis_to_frame(1000.0), 44100.0);
        assert_eq!(transform.frame_to_millis(22050.0), 500.0);
        assert_eq!(transform.pixel_to_frame(10.0), 400.0);
    }

    #[test]
    fn test_canvas_length_rounds_up() {
        let canvas = CanvasParams::new(44101, 44100, 40, 1.0);
        assert_eq!(canvas.length_in_pixel(), 1103.0);
        assert!((canvas.sample_duration_ms() - 1000.0227).abs() < 1e-3);
    }

    #[test]
    fn test_resolution_steps_are_clamped() {
        let range = ResolutionRange::new(10, 400, 20);

        assert_eq!(range.increase_from(40), 60);
        assert_eq!(range.increase_from(390), 400);
        assert_eq!(range.increase_from(400), 400);
        assert_eq!(range.decrease_from(20), 10);
        assert_eq!(range.decrease_from(10), 10);
        assert!(!range.can_increase(400));
        assert!(range.can_increase(399));
        assert!(!range.can_decrease(10));
        assert_eq!(range.clamp(1000), 400);
    }

    #[test]
    #[should_panic]
    fn test_resolution_range_rejects_inverted_bounds() {
        ResolutionRange::new(100, 10, 5);
    }

    proptest! {
        #[test]
        fn round_trip_stays_within_one_pixel_of_time(
            millis in 0.0f64..600_000.0,
            resolution in 10u32..=400,
            sample_rate in prop::sample::select(vec![8000u32, 22050, 44100, 48000, 96000]),
        ) {
            let transform = CoordinateTransform::new(sample_rate, resolution);
            let back = transform.to_millis(transform.to_pixel(millis));
            let one_pixel = transform.to_millis(1.0);
            prop_assert!((back - millis).abs() < one_pixel);
            prop_assert!((back - millis).abs() < 1e-6 * millis.max(1.0));
        }

        #[test]
        fn stepping_is_idempotent_at_the_bounds(min in 1u32..100, span in 0u32..500, step in 1u32..50) {
            let range = ResolutionRange::new(min, min + span, step);
            prop_assert_eq!(range.increase_from(range.max), range.max);
            prop_assert_eq!(range.decrease_from(range.min), range.min);
        }
    }
}
