//! Histogram model behind the level-adjustment widget.
//!
//! The model owns the sample distribution, the bin layout and the range
//! slider whose `[low, high]` pair drives display normalization. Bins are
//! derived data: every change rebuilds them from scratch and republishes the
//! thresholds on the event channel.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::buffer::ImageBuffer;
use crate::error::Error;
use crate::events::{EventSender, UiEvent};
use crate::processing::levels::DisplayRange;

pub const DEFAULT_BIN_COUNT: usize = 50;

/// Largest bin count the entry accepts; edges are allocated per bin.
pub const MAX_BIN_COUNT: usize = 10_000;

/// Value span of the preview distribution shown before any image is loaded.
pub const PREVIEW_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataStats {
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

/// Two-handle slider state: bounds plus the selected `[low, high]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeSlider {
    pub minimum: f64,
    pub maximum: f64,
    pub low: f64,
    pub high: f64,
}

impl RangeSlider {
    fn set_bounds(&mut self, minimum: f64, maximum: f64) {
        self.minimum = minimum.min(maximum);
        self.maximum = maximum.max(minimum);
    }

    /// Clamp both handles into the bounds and keep `low <= high`.
    fn set_values(&mut self, low: f64, high: f64) {
        let range = DisplayRange::new(low, high);
        self.low = range.low.clamp(self.minimum, self.maximum);
        self.high = range.high.clamp(self.minimum, self.maximum);
    }

    /// Position of `value` along the track, `0.0..=1.0`.
    pub fn fraction_of(&self, value: f64) -> f64 {
        let span = self.maximum - self.minimum;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.minimum) / span).clamp(0.0, 1.0)
    }

    /// Value at a track position, `fraction` is clamped to `0.0..=1.0`.
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.minimum + fraction.clamp(0.0, 1.0) * (self.maximum - self.minimum)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistogramBins {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
    pub log_x: bool,
    pub log_y: bool,
}

impl HistogramBins {
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Bar heights scaled to `0.0..=1.0`; log-y uses `log10(1 + count)`.
    pub fn bar_heights(&self) -> Vec<f64> {
        let max = self.max_count();
        if max == 0 {
            return vec![0.0; self.counts.len()];
        }
        let scale = |c: u64| {
            if self.log_y {
                (1.0 + c as f64).log10()
            } else {
                c as f64
            }
        };
        let top = scale(max);
        self.counts.iter().map(|&c| scale(c) / top).collect()
    }
}

pub struct HistogramModel {
    sorted: Vec<f64>,
    stats: DataStats,
    bin_count: usize,
    log_x: bool,
    log_y: bool,
    slider: RangeSlider,
    bins: HistogramBins,
    events: EventSender,
}

impl HistogramModel {
    pub fn new(bin_count: usize, log_x: bool, log_y: bool, events: EventSender) -> Self {
        Self {
            sorted: Vec::new(),
            stats: DataStats::default(),
            bin_count: bin_count.clamp(1, MAX_BIN_COUNT),
            log_x,
            log_y,
            slider: RangeSlider::default(),
            bins: HistogramBins::default(),
            events,
        }
    }

    /// A model filled with `samples` random values in `[0, 100)`, used by the
    /// workspace before an image has been opened.
    pub fn preview(samples: usize, seed: Option<u64>, bin_count: usize, events: EventSender) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut model = Self::new(bin_count, false, false, events);
        let mut data: Vec<f64> = (0..samples)
            .map(|_| rng.random::<f64>() * PREVIEW_MAX)
            .collect();
        data.sort_by(f64::total_cmp);
        model.sorted = data;
        model.stats = DataStats {
            min: 0.0,
            max: PREVIEW_MAX,
            range: PREVIEW_MAX,
        };
        model.slider.set_bounds(0.0, PREVIEW_MAX);
        model.slider.set_values(0.0, PREVIEW_MAX);
        model.rebuild_bins();
        model
    }

    /// Replace the distribution: recompute stats, widen the slider bounds by
    /// one bin of tolerance, reset the thresholds to `[min, max]`, rebuild.
    pub fn set_data(&mut self, samples: impl IntoIterator<Item = f64>) {
        let mut data: Vec<f64> = samples.into_iter().filter(|v| !v.is_nan()).collect();
        data.sort_by(f64::total_cmp);
        let (min, max) = match (data.first(), data.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0.0, 0.0),
        };
        self.sorted = data;
        self.stats = DataStats {
            min,
            max,
            range: max - min,
        };

        let tolerance = self.tolerance();
        self.slider.set_bounds(min - tolerance, max + tolerance);
        self.slider.set_values(min, max);
        debug!(
            samples = self.sorted.len(),
            min,
            max,
            tolerance,
            "histogram data replaced"
        );
        self.rebuild_bins();
    }

    pub fn set_image(&mut self, buffer: &ImageBuffer) {
        self.set_data(buffer.samples().iter_f64());
    }

    /// Slider padding on each side: one bin's worth of the value range,
    /// truncated to an integer.
    pub fn tolerance(&self) -> f64 {
        (self.stats.range / self.bin_count as f64).trunc()
    }

    /// Recompute edges and counts from the current state and publish the
    /// thresholds, whether or not they moved.
    pub fn rebuild_bins(&mut self) {
        if self.sorted.is_empty() {
            self.bins = HistogramBins {
                log_x: self.log_x,
                log_y: self.log_y,
                ..HistogramBins::default()
            };
            self.publish_thresholds();
            return;
        }

        let edges = compute_edges(
            self.slider.low,
            self.slider.high,
            self.stats.range,
            self.bin_count,
            self.log_x,
            self.smallest_positive(),
        );
        let counts = count_sorted(&self.sorted, &edges);
        trace!(bins = counts.len(), log_x = self.log_x, log_y = self.log_y, "histogram rebuilt");
        self.bins = HistogramBins {
            edges,
            counts,
            log_x: self.log_x,
            log_y: self.log_y,
        };
        self.publish_thresholds();
    }

    fn publish_thresholds(&self) {
        let _ = self.events.send(UiEvent::ThresholdsChanged {
            low: self.slider.low,
            high: self.slider.high,
        });
    }

    pub fn set_log_x(&mut self, enabled: bool) {
        self.log_x = enabled;
        self.rebuild_bins();
    }

    pub fn set_log_y(&mut self, enabled: bool) {
        self.log_y = enabled;
        self.rebuild_bins();
    }

    /// Parse the bin entry text. Anything but an integer in
    /// `1..=MAX_BIN_COUNT` leaves the previous bin count in place.
    ///
    /// # Errors
    /// Returns [`Error::InvalidBinCount`] when `text` is not an integer in
    /// `1..=MAX_BIN_COUNT`.
    pub fn set_bin_count_text(&mut self, text: &str) -> Result<(), Error> {
        match text.trim().parse::<usize>() {
            Ok(n) if (1..=MAX_BIN_COUNT).contains(&n) => {
                self.bin_count = n;
                self.rebuild_bins();
                Ok(())
            }
            _ => Err(Error::InvalidBinCount(text.to_string())),
        }
    }

    /// Move the slider handles (clamped to the slider bounds) and rebuild.
    pub fn set_thresholds(&mut self, low: f64, high: f64) {
        self.slider.set_values(low, high);
        self.rebuild_bins();
    }

    pub fn thresholds(&self) -> DisplayRange {
        DisplayRange::new(self.slider.low, self.slider.high)
    }

    pub fn stats(&self) -> DataStats {
        self.stats
    }

    pub fn slider(&self) -> &RangeSlider {
        &self.slider
    }

    pub fn bins(&self) -> &HistogramBins {
        &self.bins
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn log_x(&self) -> bool {
        self.log_x
    }

    pub fn log_y(&self) -> bool {
        self.log_y
    }

    pub fn has_data(&self) -> bool {
        !self.sorted.is_empty()
    }

    fn smallest_positive(&self) -> f64 {
        let idx = self.sorted.partition_point(|&v| v <= 0.0);
        self.sorted.get(idx).copied().unwrap_or(1.0)
    }
}

/// `bin_count + 1` edges from `low` to `high + range / bin_count`.
///
/// The upper end deliberately overshoots `high` by one bin so samples equal to
/// `high` land inside the last bin. Log spacing needs a positive lower edge;
/// non-positive `low` is replaced by `log_floor`.
pub fn compute_edges(
    low: f64,
    high: f64,
    range: f64,
    bin_count: usize,
    log_x: bool,
    log_floor: f64,
) -> Vec<f64> {
    let n = bin_count.clamp(1, MAX_BIN_COUNT);
    let mut upper = high + range / n as f64;
    if log_x {
        let lower = if low > 0.0 { low } else { log_floor.max(f64::MIN_POSITIVE) };
        if upper <= lower {
            upper = lower * 10.0;
        }
        linspace(lower.log10(), upper.log10(), n)
            .into_iter()
            .map(|e| 10f64.powf(e))
            .collect()
    } else {
        if upper <= low {
            upper = low + 1.0;
        }
        linspace(low, upper, n)
    }
}

fn linspace(start: f64, stop: f64, intervals: usize) -> Vec<f64> {
    let step = (stop - start) / intervals as f64;
    let mut out: Vec<f64> = (0..=intervals).map(|i| start + step * i as f64).collect();
    if let Some(last) = out.last_mut() {
        *last = stop;
    }
    out
}

/// Counts per bin over sorted samples. Bins are half-open `[e_i, e_i+1)`
/// except the last, which also takes samples equal to its upper edge.
fn count_sorted(sorted: &[f64], edges: &[f64]) -> Vec<u64> {
    let below = |x: f64| sorted.partition_point(|&v| v < x);
    let at_or_below = |x: f64| sorted.partition_point(|&v| v <= x);
    let bins = edges.len().saturating_sub(1);
    (0..bins)
        .map(|i| {
            let start = below(edges[i]);
            let end = if i + 1 == bins {
                at_or_below(edges[i + 1])
            } else {
                below(edges[i + 1])
            };
            end.saturating_sub(start) as u64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_channel;

    fn thresholds_sent(rx: &crate::events::EventReceiver) -> Vec<(f64, f64)> {
        rx.try_iter()
            .filter_map(|e| match e {
                UiEvent::ThresholdsChanged { low, high } => Some((low, high)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn uniform_eight_bit_image_bounds() {
        let (tx, _rx) = event_channel();
        let samples: Vec<u8> = (0..100 * 100).map(|i| (i % 256) as u8).collect();
        let buffer = ImageBuffer::gray8(100, 100, samples).unwrap();
        let mut model = HistogramModel::new(50, false, false, tx);
        model.set_image(&buffer);

        let stats = model.stats();
        assert_eq!((stats.min, stats.max, stats.range), (0.0, 255.0, 255.0));
        assert_eq!(model.tolerance(), 5.0);
        assert_eq!(model.slider().minimum, -5.0);
        assert_eq!(model.slider().maximum, 260.0);
        assert_eq!(model.thresholds(), DisplayRange::new(0.0, 255.0));
    }

    #[test]
    fn reset_thresholds_sit_inside_data_range() {
        let (tx, _rx) = event_channel();
        let mut model = HistogramModel::new(7, false, false, tx);
        model.set_data([12.0, 40.0, 33.5, 18.0]);
        let s = model.slider();
        assert!(model.stats().min <= s.low && s.low <= s.high && s.high <= model.stats().max);
        // range 28 / 7 bins = 4
        assert_eq!(s.minimum, 12.0 - 4.0);
        assert_eq!(s.maximum, 40.0 + 4.0);
    }

    #[test]
    fn edges_overshoot_high_by_one_bin() {
        let edges = compute_edges(0.0, 100.0, 100.0, 10, false, 1.0);
        assert_eq!(edges.len(), 11);
        assert_eq!(edges[0], 0.0);
        assert_eq!(*edges.last().unwrap(), 110.0);
        assert!((edges[1] - 11.0).abs() < 1e-12);
    }

    #[test]
    fn log_edges_are_geometric() {
        let edges = compute_edges(1.0, 990.0, 1000.0, 3, true, 1.0);
        // upper = 990 + 1000/3
        let upper: f64 = 990.0 + 1000.0 / 3.0;
        assert_eq!(edges.len(), 4);
        assert!((edges[0] - 1.0).abs() < 1e-12);
        assert!((edges[3] - upper).abs() < 1e-9);
        let r1 = edges[1] / edges[0];
        let r2 = edges[2] / edges[1];
        assert!((r1 - r2).abs() < 1e-9);
    }

    #[test]
    fn log_edges_replace_non_positive_low() {
        let edges = compute_edges(0.0, 255.0, 255.0, 5, true, 3.0);
        assert!((edges[0] - 3.0).abs() < 1e-12);
        assert!(edges.iter().all(|e| e.is_finite() && *e > 0.0));
    }

    #[test]
    fn rebuild_is_bit_identical() {
        let (tx, _rx) = event_channel();
        let mut model = HistogramModel::new(50, true, false, tx);
        model.set_data((1..500).map(|v| v as f64 * 0.37));
        let first = model.bins().edges.clone();
        model.rebuild_bins();
        model.rebuild_bins();
        let again = &model.bins().edges;
        assert_eq!(first.len(), again.len());
        for (a, b) in first.iter().zip(again) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn every_rebuild_publishes_thresholds() {
        let (tx, rx) = event_channel();
        let mut model = HistogramModel::new(10, false, false, tx);
        model.set_data([0.0, 10.0]);
        model.rebuild_bins();
        model.rebuild_bins();
        let sent = thresholds_sent(&rx);
        assert_eq!(sent, vec![(0.0, 10.0); 3]);
    }

    #[test]
    fn counts_cover_all_samples_in_window() {
        let (tx, _rx) = event_channel();
        let mut model = HistogramModel::new(4, false, false, tx);
        model.set_data([0.0, 1.0, 2.0, 3.0, 4.0, 4.0]);
        let bins = model.bins();
        assert_eq!(bins.counts.iter().sum::<u64>(), 6);
        // edges 0, 1.25, 2.5, 3.75, 5
        assert_eq!(bins.counts, vec![2, 1, 1, 2]);
    }

    #[test]
    fn narrowed_thresholds_drop_outliers() {
        let (tx, _rx) = event_channel();
        let mut model = HistogramModel::new(2, false, false, tx);
        model.set_data([0.0, 5.0, 10.0, 20.0]);
        model.set_thresholds(4.0, 12.0);
        // edges 4, 14, 24 (range 20 / 2 bins overshoot)
        assert_eq!(model.bins().counts, vec![2, 1]);
    }

    #[test]
    fn thresholds_clamp_to_slider_bounds() {
        let (tx, _rx) = event_channel();
        let mut model = HistogramModel::new(10, false, false, tx);
        model.set_data([0.0, 100.0]);
        model.set_thresholds(500.0, -300.0);
        let s = model.slider();
        assert_eq!((s.low, s.high), (-10.0, 110.0));
    }

    #[test]
    fn invalid_bin_text_keeps_previous_count() {
        let (tx, _rx) = event_channel();
        let mut model = HistogramModel::new(50, false, false, tx);
        model.set_data([1.0, 2.0, 3.0]);
        assert!(matches!(
            model.set_bin_count_text("lots"),
            Err(Error::InvalidBinCount(_))
        ));
        assert!(model.set_bin_count_text("0").is_err());
        assert!(model.set_bin_count_text("").is_err());
        assert_eq!(model.bin_count(), 50);

        model.set_bin_count_text(" 12 ").unwrap();
        assert_eq!(model.bin_count(), 12);
        assert_eq!(model.bins().counts.len(), 12);
    }

    #[test]
    fn preview_distribution_is_seeded() {
        let (tx, _rx) = event_channel();
        let a = HistogramModel::preview(100, Some(7), 50, tx.clone());
        let b = HistogramModel::preview(100, Some(7), 50, tx);
        assert_eq!(a.bins(), b.bins());
        assert_eq!(a.stats().range, PREVIEW_MAX);
        assert_eq!(a.bins().counts.iter().sum::<u64>(), 100);
    }

    #[test]
    fn huge_bin_count_is_rejected() {
        let (tx, _rx) = event_channel();
        let mut model = HistogramModel::new(50, false, false, tx);
        model.set_data([1.0, 2.0, 3.0]);
        for text in ["10001", "1000000000", "100000000000"] {
            assert!(matches!(
                model.set_bin_count_text(text),
                Err(Error::InvalidBinCount(_))
            ));
        }
        assert_eq!(model.bin_count(), 50);
        assert_eq!(model.bins().counts.len(), 50);

        model.set_bin_count_text("10000").unwrap();
        assert_eq!(model.bins().counts.len(), MAX_BIN_COUNT);
    }

    #[test]
    fn oversized_counts_are_clamped_at_construction() {
        let (tx, _rx) = event_channel();
        let model = HistogramModel::new(usize::MAX, false, false, tx);
        assert_eq!(model.bin_count(), MAX_BIN_COUNT);
        assert_eq!(compute_edges(0.0, 1.0, 1.0, usize::MAX, false, 1.0).len(), MAX_BIN_COUNT + 1);
    }

    #[test]
    fn empty_model_builds_no_bins() {
        let (tx, rx) = event_channel();
        let mut model = HistogramModel::new(50, false, false, tx);
        model.rebuild_bins();
        assert!(model.bins().counts.is_empty());
        assert_eq!(thresholds_sent(&rx), vec![(0.0, 0.0)]);
    }

    #[test]
    fn empty_preview_still_publishes_thresholds() {
        let (tx, rx) = event_channel();
        let model = HistogramModel::preview(0, Some(1), 50, tx);
        assert!(!model.has_data());
        assert_eq!(thresholds_sent(&rx), vec![(0.0, PREVIEW_MAX)]);
    }

    #[test]
    fn log_y_heights_compress_peaks() {
        let bins = HistogramBins {
            edges: vec![0.0, 1.0, 2.0],
            counts: vec![9, 99],
            log_x: false,
            log_y: true,
        };
        let h = bins.bar_heights();
        assert!((h[0] - 0.5).abs() < 1e-12);
        assert!((h[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn slider_fraction_round_trips() {
        let s = RangeSlider {
            minimum: -5.0,
            maximum: 260.0,
            low: 0.0,
            high: 255.0,
        };
        let f = s.fraction_of(127.5);
        assert!((s.value_at(f) - 127.5).abs() < 1e-9);
        assert_eq!(s.fraction_of(1000.0), 1.0);
    }
}
