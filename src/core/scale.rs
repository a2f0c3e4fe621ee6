use crate::error::{ChartError, ChartResult};

/// Affine map from a data domain onto a pixel range.
///
/// The pixel range may be inverted (`pixel_start > pixel_end`), which is how
/// the y axis maps upward-growing data onto downward-growing device rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(ChartError::InvalidData(
                "scale pixel range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn pixel_range(self) -> (f64, f64) {
        (self.pixel_start, self.pixel_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let normalized = (pixel - self.pixel_start) / (self.pixel_end - self.pixel_start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Pixel length of a data-space distance (always non-negative).
    #[must_use]
    pub fn span_to_pixels(self, span: f64) -> f64 {
        (span / (self.domain_end - self.domain_start) * (self.pixel_end - self.pixel_start)).abs()
    }
}

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Evenly spaced "round" tick values covering `[min, max]` with at most
/// `max_bins` intervals, in the spirit of a max-n locator.
pub fn nice_ticks(min: f64, max: f64, max_bins: usize) -> ChartResult<Vec<f64>> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(ChartError::InvalidData(
            "tick range must be finite with min < max".to_owned(),
        ));
    }
    if max_bins == 0 {
        return Err(ChartError::InvalidData("tick bins must be > 0".to_owned()));
    }

    let raw_step = (max - min) / max_bins as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = NICE_STEPS
        .iter()
        .map(|factor| factor * magnitude)
        .find(|candidate| {
            let first = (min / candidate).ceil();
            let last = (max / candidate).floor();
            last - first <= max_bins as f64
        })
        .unwrap_or(10.0 * magnitude);

    let first = (min / step - 1e-9).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    Ok((first..=last)
        .map(|index| {
            let value = index as f64 * step;
            if value.abs() < step * 1e-9 { 0.0 } else { value }
        })
        .collect())
}

/// Number of decimals needed to print ticks spaced `step` apart.
#[must_use]
pub fn tick_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let mut precision = 0usize;
    let mut scaled = step;
    while precision < 6 && (scaled - scaled.round()).abs() > 1e-6 * scaled.abs().max(1.0) {
        scaled *= 10.0;
        precision += 1;
    }
    precision
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_pixel_range_maps_up_to_down() {
        let scale = LinearScale::new(-3.0, 1.0, 400.0, 0.0).expect("scale");
        assert!((scale.domain_to_pixel(-3.0).expect("px") - 400.0).abs() <= 1e-9);
        assert!((scale.domain_to_pixel(1.0).expect("px") - 0.0).abs() <= 1e-9);
        let back = scale.pixel_to_domain(100.0).expect("domain");
        assert!((back - 0.0).abs() <= 1e-9);
    }

    #[test]
    fn nice_ticks_cover_negative_energy_range() {
        let ticks = nice_ticks(-3.15, 0.15, 6).expect("ticks");
        let expected = [-3.0, -2.5, -2.0, -1.5, -1.0, -0.5, 0.0];
        assert_eq!(ticks.len(), expected.len());
        for (tick, want) in ticks.iter().zip(expected) {
            assert!((tick - want).abs() <= 1e-9, "tick {tick} != {want}");
        }
        assert_eq!(tick_precision(0.5), 1);
        assert_eq!(tick_precision(2.0), 0);
    }
}
