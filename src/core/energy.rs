use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Ordered energies of consecutive reaction steps, in caller-chosen units.
///
/// Always non-empty and finite. Transformations return new series; the
/// source values are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct EnergySeries {
    values: Vec<f64>,
}

impl EnergySeries {
    pub fn new(values: Vec<f64>) -> ChartResult<Self> {
        if values.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ChartError::NonFiniteEnergy { index, value });
        }
        Ok(Self { values })
    }

    pub fn from_slice(values: &[f64]) -> ChartResult<Self> {
        Self::new(values.to_vec())
    }

    /// Converts exact decimal energies (e.g. parsed from quantum-chemistry logs).
    pub fn from_decimals(values: &[Decimal]) -> ChartResult<Self> {
        let converted = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value.to_f64().ok_or_else(|| ChartError::EnergyConversion {
                    index,
                    reason: format!("decimal {value} is not representable"),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(converted)
    }

    /// Parses textual energies, failing on the first non-numeric entry.
    pub fn parse_strs<S: AsRef<str>>(values: &[S]) -> ChartResult<Self> {
        let converted = values
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let raw = raw.as_ref().trim();
                raw.parse::<f64>()
                    .map_err(|err| ChartError::EnergyConversion {
                        index,
                        reason: format!("`{raw}`: {err}"),
                    })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(converted)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> ChartResult<f64> {
        self.values
            .get(index)
            .copied()
            .ok_or(ChartError::ZeroIndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// Returns a copy shifted so that step `zero_index` reads as zero.
    ///
    /// Fails with `NonFiniteEnergy` when a shifted value overflows `f64`.
    pub fn rebased(&self, zero_index: usize) -> ChartResult<Self> {
        let reference = self.get(zero_index)?;
        Self::new(self.values.iter().map(|value| value - reference).collect())
    }

    /// Step-to-step differences `E[i + 1] - E[i]`; empty for a single step.
    pub fn deltas(&self) -> ChartResult<DeltaSeries> {
        let values: Vec<f64> = self
            .values
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect();
        if let Some(index) = values.iter().position(|delta| !delta.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "energy difference between steps {} and {} overflows f64",
                index + 1,
                index + 2
            )));
        }
        Ok(DeltaSeries { values })
    }
}

impl TryFrom<Vec<f64>> for EnergySeries {
    type Error = ChartError;

    fn try_from(values: Vec<f64>) -> ChartResult<Self> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for EnergySeries {
    type Error = ChartError;

    fn try_from(values: &[f64]) -> ChartResult<Self> {
        Self::from_slice(values)
    }
}

impl From<EnergySeries> for Vec<f64> {
    fn from(series: EnergySeries) -> Self {
        series.values
    }
}

/// Derived step-to-step energy differences, length `N - 1`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeltaSeries {
    values: Vec<f64>,
}

impl DeltaSeries {
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_non_finite_values() {
        assert!(matches!(
            EnergySeries::new(Vec::new()),
            Err(ChartError::EmptySeries)
        ));
        let err = EnergySeries::new(vec![1.0, f64::NAN]).expect_err("nan must fail");
        assert!(matches!(err, ChartError::NonFiniteEnergy { index: 1, .. }));
    }

    #[test]
    fn rebased_leaves_source_untouched() {
        let series = EnergySeries::new(vec![2.0, 3.5, 1.0]).expect("series");
        let rebased = series.rebased(2).expect("rebase");
        assert_eq!(rebased.values(), &[1.0, 2.5, 0.0]);
        assert_eq!(series.values(), &[2.0, 3.5, 1.0]);
    }

    #[test]
    fn overflowing_differences_are_rejected() {
        let series = EnergySeries::new(vec![f64::MAX, -f64::MAX]).expect("series");
        assert!(matches!(series.deltas(), Err(ChartError::InvalidData(_))));
        assert!(matches!(
            series.rebased(0),
            Err(ChartError::NonFiniteEnergy { index: 1, .. })
        ));
    }

    #[test]
    fn parse_strs_reports_offending_index() {
        let err = EnergySeries::parse_strs(&["1.0", " 2.5 ", "abc"]).expect_err("must fail");
        assert!(matches!(err, ChartError::EnergyConversion { index: 2, .. }));
    }
}
