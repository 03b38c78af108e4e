//! Magnitude classification: colour bins, marker sizes, time intervals.
//!
//! Every function here is pure and total. Magnitudes are compared with `<=`
//! against integer bin boundaries, so a boundary value belongs to the lower
//! bin. NaN fails every comparison and therefore lands in the top bin.

use quakemap_types::{MagnitudeColor, MarkerStyle, TimeInterval};

/// Milliseconds of visibility per unit of magnitude on the time layer.
pub const INTERVAL_MS_PER_MAGNITUDE: f64 = 10_000_000.0;

/// Pixels of marker radius per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

/// Fill opacity of every earthquake marker.
pub const MARKER_FILL_OPACITY: f64 = 1.0;

/// One legend bin: a half-open magnitude range and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagnitudeBin {
    /// Lower boundary, exclusive (except for the first bin, which is open).
    pub lower: u8,
    /// Upper boundary, inclusive. `None` for the open-ended top bin.
    pub upper: Option<u8>,
    /// Human-readable range.
    pub label: &'static str,
}

impl MagnitudeBin {
    /// The swatch colour shown for this bin.
    ///
    /// Classifies `lower + 1`, which is the bin's own upper boundary (or a
    /// value inside the top bin). Under `<=` semantics that boundary is
    /// coloured like the rest of the range the label names.
    pub fn swatch(&self) -> MagnitudeColor {
        choose_color(f64::from(self.lower) + 1.0)
    }
}

/// The six legend bins, lowest first.
pub const MAGNITUDE_BINS: [MagnitudeBin; 6] = [
    MagnitudeBin {
        lower: 0,
        upper: Some(1),
        label: "0\u{2013}1",
    },
    MagnitudeBin {
        lower: 1,
        upper: Some(2),
        label: "1\u{2013}2",
    },
    MagnitudeBin {
        lower: 2,
        upper: Some(3),
        label: "2\u{2013}3",
    },
    MagnitudeBin {
        lower: 3,
        upper: Some(4),
        label: "3\u{2013}4",
    },
    MagnitudeBin {
        lower: 4,
        upper: Some(5),
        label: "4\u{2013}5",
    },
    MagnitudeBin {
        lower: 5,
        upper: None,
        label: "5+",
    },
];

/// Colour category of a magnitude.
pub const fn choose_color(magnitude: f64) -> MagnitudeColor {
    if magnitude <= 1.0 {
        MagnitudeColor::GreenYellow
    } else if magnitude <= 2.0 {
        MagnitudeColor::YellowGreen
    } else if magnitude <= 3.0 {
        MagnitudeColor::Yellow
    } else if magnitude <= 4.0 {
        MagnitudeColor::Gold
    } else if magnitude <= 5.0 {
        MagnitudeColor::Orange
    } else {
        MagnitudeColor::Red
    }
}

/// Raw marker size: five pixels per unit of magnitude.
///
/// Not clamped; negative magnitudes give negative sizes. Use
/// [`clamp_radius`] (or [`marker_style`]) before drawing.
pub const fn marker_size(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

/// Clamp a marker size to a drawable radius.
///
/// Negative and non-finite sizes become `0.0`.
pub const fn clamp_radius(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}

/// Full marker style for a magnitude.
pub const fn marker_style(magnitude: f64) -> MarkerStyle {
    let color = choose_color(magnitude);
    MarkerStyle {
        color,
        fill_color: color,
        radius: clamp_radius(marker_size(magnitude)),
        fill_opacity: MARKER_FILL_OPACITY,
    }
}

/// Visibility interval of an event on the time layer.
///
/// `end = time + magnitude × 10,000,000 ms`, rounded to the millisecond and
/// saturating at `i64::MAX`. A negative or non-finite extension is treated
/// as zero so that `end >= start` always holds.
pub const fn time_interval(time_ms: i64, magnitude: f64) -> TimeInterval {
    let extension = magnitude * INTERVAL_MS_PER_MAGNITUDE;
    let extension_ms = if extension.is_finite() && extension > 0.0 {
        round_to_millis(extension)
    } else {
        0
    };
    TimeInterval {
        start: time_ms,
        end: time_ms.saturating_add(extension_ms),
    }
}

/// Round a non-negative finite millisecond count to `i64`.
///
/// Float-to-int `as` casts saturate, which is the behaviour wanted here.
#[allow(clippy::cast_possible_truncation)]
const fn round_to_millis(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn boundaries_belong_to_lower_bin() {
        assert_eq!(choose_color(1.0), MagnitudeColor::GreenYellow);
        assert_eq!(choose_color(1.0001), MagnitudeColor::YellowGreen);
        assert_eq!(choose_color(2.0), MagnitudeColor::YellowGreen);
        assert_eq!(choose_color(3.0), MagnitudeColor::Yellow);
        assert_eq!(choose_color(4.0), MagnitudeColor::Gold);
        assert_eq!(choose_color(5.0), MagnitudeColor::Orange);
        assert_eq!(choose_color(5.0001), MagnitudeColor::Red);
    }

    #[test]
    fn out_of_range_inputs_fall_into_end_bins() {
        assert_eq!(choose_color(-3.0), MagnitudeColor::GreenYellow);
        assert_eq!(choose_color(f64::NEG_INFINITY), MagnitudeColor::GreenYellow);
        assert_eq!(choose_color(9.5), MagnitudeColor::Red);
        assert_eq!(choose_color(f64::INFINITY), MagnitudeColor::Red);
        assert_eq!(choose_color(f64::NAN), MagnitudeColor::Red);
    }

    #[test]
    fn colour_is_monotonic_across_a_sweep() {
        let mut previous = choose_color(-1.0);
        for step in 0_u16..=800 {
            let magnitude = f64::from(step) / 100.0 - 1.0;
            let color = choose_color(magnitude);
            assert!(color >= previous, "colour went down at {magnitude}");
            previous = color;
        }
        assert_eq!(previous, MagnitudeColor::Red);
    }

    #[test]
    fn marker_size_is_five_times_magnitude() {
        assert!(approx(marker_size(0.0), 0.0));
        assert!(approx(marker_size(-1.0), -5.0));
        assert!(approx(marker_size(0.5), 2.5));
        assert!(approx(marker_size(6.0), 30.0));
    }

    #[test]
    fn style_clamps_negative_radius() {
        let style = marker_style(-1.0);
        assert!(approx(style.radius, 0.0));
        assert_eq!(style.color, MagnitudeColor::GreenYellow);
        assert!(approx(clamp_radius(f64::NAN), 0.0));
        assert!(approx(clamp_radius(f64::INFINITY), 0.0));
    }

    #[test]
    fn style_uses_same_colour_for_stroke_and_fill() {
        let style = marker_style(4.4);
        assert_eq!(style.color, MagnitudeColor::Orange);
        assert_eq!(style.fill_color, style.color);
        assert!(approx(style.radius, 22.0));
        assert!(approx(style.fill_opacity, 1.0));
    }

    #[test]
    fn interval_extends_by_magnitude() {
        let interval = time_interval(1000, 2.0);
        assert_eq!(interval.start, 1000);
        assert_eq!(interval.end, 20_001_000);
    }

    #[test]
    fn interval_never_ends_before_it_starts() {
        let negative = time_interval(5000, -1.5);
        assert_eq!(negative.end, 5000);
        let nan = time_interval(5000, f64::NAN);
        assert_eq!(nan.end, 5000);
        let huge = time_interval(i64::MAX - 10, 3.0);
        assert_eq!(huge.end, i64::MAX);
    }

    #[test]
    fn legend_swatches_match_labelled_ranges() {
        let swatches: Vec<_> = MAGNITUDE_BINS.iter().map(MagnitudeBin::swatch).collect();
        assert_eq!(swatches, MagnitudeColor::ALL.to_vec());
        assert_eq!(MAGNITUDE_BINS.last().map(|b| b.label), Some("5+"));
        assert_eq!(MAGNITUDE_BINS.first().map(|b| b.label), Some("0\u{2013}1"));
    }
}
