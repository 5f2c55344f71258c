//! Half-open sleep interval.

use std::time::Duration;

use rand::Rng;

/// Returned when `max` is smaller than `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("maximum sleep {max:?} is shorter than minimum sleep {min:?}")]
pub struct InvalidRange {
    pub min: Duration,
    pub max: Duration,
}

/// The interval `[min, max)` a sleep duration is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepRange {
    min: Duration,
    max: Duration,
}

impl SleepRange {
    pub fn new(min: Duration, max: Duration) -> Result<Self, InvalidRange> {
        if max < min {
            return Err(InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Width of the interval. Zero when `min == max`.
    pub fn width(&self) -> Duration {
        self.max - self.min
    }

    /// Draw a duration uniformly from `[min, max)`.
    ///
    /// When the interval is empty the result is `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        // Widths beyond u64 nanoseconds (~584 years) are clamped.
        let width = u64::try_from(self.width().as_nanos()).unwrap_or(u64::MAX);
        if width == 0 {
            return self.min;
        }
        self.min + Duration::from_nanos(rng.gen_range(0..width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_inverted_range() {
        let err = SleepRange::new(Duration::from_millis(10), Duration::from_millis(5)).unwrap_err();
        assert_eq!(err.min, Duration::from_millis(10));
        assert_eq!(err.max, Duration::from_millis(5));
    }

    #[test]
    fn empty_range_yields_min() {
        let range = SleepRange::new(Duration::from_millis(40), Duration::from_millis(40)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(range.sample(&mut rng), Duration::from_millis(40));
        }
    }

    #[test]
    fn samples_stay_inside_half_open_interval() {
        let range = SleepRange::new(Duration::from_millis(250), Duration::from_millis(2500)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let d = range.sample(&mut rng);
            assert!(d >= range.min(), "{:?} below min", d);
            assert!(d < range.max(), "{:?} not below max", d);
        }
    }

    #[test]
    fn samples_spread_evenly() {
        // 10 buckets, 20k draws: each bucket expects 2000.
        let range = SleepRange::new(Duration::ZERO, Duration::from_millis(1000)).unwrap();
        let mut rng = StdRng::seed_from_u64(1234);
        let mut buckets = [0u32; 10];
        for _ in 0..20_000 {
            let ms = range.sample(&mut rng).as_millis() as usize;
            buckets[ms / 100] += 1;
        }
        for (i, count) in buckets.iter().enumerate() {
            assert!(
                (1700..=2300).contains(count),
                "bucket {} has {} samples",
                i,
                count
            );
        }
    }

    #[test]
    fn one_nanosecond_range() {
        let range = SleepRange::new(Duration::ZERO, Duration::from_nanos(1)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(range.sample(&mut rng), Duration::ZERO);
    }
}
