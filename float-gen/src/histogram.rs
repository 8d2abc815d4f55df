use std::fmt;

use log::warn;
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::error::GenError;
use crate::value::{Value, NUM_DECIMAL_PLACES};

/// Integer parts of valid values never exceed this.
const MAX_WHOLE: usize = 100;

/// One-unit-wide bins spanning the integer parts of the smallest and largest values seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Indexed by integer part
    counts: [u64; MAX_WHOLE + 1],
    min: Value,
    max: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    pub start: Decimal,
    /// Inclusive, e.g. `42.9` for the bin starting at `42.0`
    pub end: Decimal,
    pub count: u64,
}

impl Histogram {
    /// # Errors
    /// Errors when `values` is empty
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Result<Self, GenError> {
        let mut values = values.into_iter();
        let first = values.next().ok_or(GenError::Empty)?;
        let mut histogram = Histogram {
            counts: [0; MAX_WHOLE + 1],
            min: first,
            max: first,
        };
        histogram.add(first);
        for value in values {
            histogram.add(value);
        }
        Ok(histogram)
    }

    /// Like [`Histogram::from_values`], but malformed records are logged and skipped.
    ///
    /// # Errors
    /// Errors when no record is a valid value
    pub fn from_csv_values(
        values: impl IntoIterator<Item = Result<Value, GenError>>,
    ) -> Result<Self, GenError> {
        Histogram::from_values(
            values
                .into_iter()
                .flat_map(|res| res.map_err(|e| warn!("Malformed value: {:?}", e))),
        )
    }

    /// Same bins as [`Histogram::from_values`], counted on the rayon pool.
    ///
    /// Each worker fills its own counts, which are summed once the slice is exhausted.
    ///
    /// # Errors
    /// Errors when `values` is empty
    pub fn from_slice_parallel(values: &[Value]) -> Result<Self, GenError> {
        let first = *values.first().ok_or(GenError::Empty)?;
        let empty = || Histogram {
            counts: [0; MAX_WHOLE + 1],
            min: first,
            max: first,
        };
        Ok(values
            .par_iter()
            .fold(empty, |mut local, &value| {
                local.add(value);
                local
            })
            .reduce(empty, Histogram::merge))
    }

    fn merge(mut self, other: Histogram) -> Histogram {
        for (count, other_count) in self.counts.iter_mut().zip(other.counts) {
            *count += other_count;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self
    }

    fn add(&mut self, value: Value) {
        let whole = usize::try_from(value.whole()).map_or(MAX_WHOLE, |w| w.min(MAX_WHOLE));
        self.counts[whole] += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    #[must_use]
    pub fn min(&self) -> Value {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Value {
        self.max
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        let first = self.min.whole();
        let last = self.max.whole();
        (first..=last).map(move |whole| {
            let start = Decimal::new(i64::from(whole) * 10, NUM_DECIMAL_PLACES);
            Bin {
                start,
                end: Decimal::new(i64::from(whole) * 10 + 9, NUM_DECIMAL_PLACES),
                count: usize::try_from(whole).map_or(0, |w| self.counts[w]),
            }
        })
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Histogram:")?;
        for bin in self.bins() {
            writeln!(f, "{} - {}: {}", bin.start, bin.end, bin.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ValueGenerator;

    fn values(raw: &[&str]) -> Vec<Value> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_empty_histogram() {
        assert!(matches!(
            Histogram::from_values(Vec::new()),
            Err(GenError::Empty)
        ));
    }

    #[test]
    fn test_bins_span_min_to_max() {
        let histogram =
            Histogram::from_values(values(&["3.4", "1.9", "3.0", "1.0", "4.9"])).unwrap();
        let bins: Vec<Bin> = histogram.bins().collect();
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].start.to_string(), "1.0");
        assert_eq!(bins[0].end.to_string(), "1.9");
        assert_eq!(
            bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            vec![2, 0, 2, 1]
        );
        assert_eq!(histogram.min().to_string(), "1.0");
        assert_eq!(histogram.max().to_string(), "4.9");
        assert_eq!(histogram.total(), 5);
    }

    #[test]
    fn test_display() {
        let histogram = Histogram::from_values(values(&["99.5", "100.1", "100.0"])).unwrap();
        assert_eq!(
            histogram.to_string(),
            "Histogram:\n99.0 - 99.9: 1\n100.0 - 100.9: 2\n"
        );
    }

    #[test]
    fn test_skips_malformed_records() {
        let records: Vec<Result<Value, GenError>> = vec![
            Ok("5.5".parse().unwrap()),
            Err(GenError::OutOfRange),
            Ok("6.1".parse().unwrap()),
        ];
        let histogram = Histogram::from_csv_values(records).unwrap();
        assert_eq!(histogram.total(), 2);

        let all_bad: Vec<Result<Value, GenError>> =
            vec![Err(GenError::TooPrecise), Err(GenError::InvalidFloat)];
        assert!(Histogram::from_csv_values(all_bad).is_err());
    }

    #[test]
    fn test_parallel_matches_serial() {
        let values: Vec<Value> = ValueGenerator::seeded(100_000, 21).collect();
        let serial = Histogram::from_values(values.iter().copied()).unwrap();
        let parallel = Histogram::from_slice_parallel(&values).unwrap();
        assert_eq!(parallel, serial);
        assert_eq!(parallel.total(), 100_000);
        assert_eq!(parallel.to_string(), serial.to_string());
    }

    #[test]
    fn test_parallel_edge_cases() {
        assert!(matches!(
            Histogram::from_slice_parallel(&[]),
            Err(GenError::Empty)
        ));

        let single = values(&["57.3"]);
        let histogram = Histogram::from_slice_parallel(&single).unwrap();
        assert_eq!(histogram.total(), 1);
        assert_eq!(histogram.to_string(), "Histogram:\n57.0 - 57.9: 1\n");
    }

    #[test]
    fn test_counts_sum_to_values() {
        let histogram = Histogram::from_values(ValueGenerator::seeded(20_000, 11)).unwrap();
        assert_eq!(histogram.total(), 20_000);
        assert_eq!(histogram.bins().map(|b| b.count).sum::<u64>(), 20_000);
    }
}
