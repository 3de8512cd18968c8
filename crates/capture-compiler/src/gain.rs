//! Gain splitting.
//!
//! Camera stacks that expose separate analog and digital gain controls get
//! as much of the requested gain as possible from the analog stage, with the
//! remainder applied digitally.

use serde::Serialize;

/// Highest analog gain the Pi sensors accept (found experimentally).
pub const MAX_ANALOG_GAIN: f64 = 15.0;

/// A combined gain decomposed so that `analog * digital == gain`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedGain {
    pub analog: f64,
    pub digital: f64,
}

impl DerivedGain {
    /// Split a positive gain. Gains up to [`MAX_ANALOG_GAIN`] are purely analog.
    pub fn split(gain: f64) -> Self {
        let analog = gain.min(MAX_ANALOG_GAIN);
        Self {
            analog,
            digital: gain / analog,
        }
    }

    /// The product of both parts.
    pub fn combined(&self) -> f64 {
        self.analog * self.digital
    }
}

/// Render a gain the way the camera tools parse it: integral values keep
/// one decimal place (`10.0`), others use the shortest exact form.
pub fn format_gain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_below_limit_is_all_analog() {
        let gain = DerivedGain::split(10.0);
        assert_eq!(gain.analog, 10.0);
        assert_eq!(gain.digital, 1.0);
    }

    #[test]
    fn test_split_above_limit() {
        let gain = DerivedGain::split(30.0);
        assert_eq!(gain.analog, 15.0);
        assert_eq!(gain.digital, 2.0);
    }

    #[test]
    fn test_split_at_limit() {
        let gain = DerivedGain::split(15.0);
        assert_eq!(gain.analog, 15.0);
        assert_eq!(gain.digital, 1.0);
    }

    #[test]
    fn test_format_gain() {
        assert_eq!(format_gain(10.0), "10.0");
        assert_eq!(format_gain(1.0), "1.0");
        assert_eq!(format_gain(2.5), "2.5");
        assert_eq!(format_gain(20.0 / 15.0), "1.3333333333333333");
    }
}
