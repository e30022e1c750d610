use chrono::{NaiveDateTime, TimeDelta};

use crate::model::config::{ConfigError, RoutingParameters};

/// enumerates the departure instants evaluated across a departure window.
///
/// for a window of length `W` and interval `I` the sampler produces
/// `ceil(W / I) + 1` instants `start + k * I`. the last instant is clamped to the
/// window end, so the closed window `[start, start + W]` is always covered. a
/// window of zero length yields only `start`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartureSampler {
    start: NaiveDateTime,
    window: TimeDelta,
    interval: TimeDelta,
}

impl DepartureSampler {
    pub fn new(
        start: NaiveDateTime,
        window: TimeDelta,
        interval: TimeDelta,
    ) -> Result<DepartureSampler, ConfigError> {
        if window < TimeDelta::zero() {
            return Err(ConfigError::InvalidWindow {
                name: String::from("departure_time_window"),
                value: window.num_milliseconds() as f64 / 60_000.0,
            });
        }
        if interval <= TimeDelta::zero() {
            return Err(ConfigError::InvalidDuration {
                name: String::from("sampling_interval"),
                value: interval.num_milliseconds() as f64 / 60_000.0,
            });
        }
        if start.checked_add_signed(window).is_none() {
            return Err(ConfigError::InvalidWindow {
                name: String::from("departure_time_window"),
                value: window.num_milliseconds() as f64 / 60_000.0,
            });
        }
        Ok(DepartureSampler {
            start,
            window,
            interval,
        })
    }

    pub fn n_samples(&self) -> usize {
        let window = self.window.num_milliseconds();
        let interval = self.interval.num_milliseconds().max(1);
        let steps = window / interval + i64::from(window % interval != 0);
        steps as usize + 1
    }

    /// the ordered, strictly increasing departure instants of the window
    pub fn samples(&self) -> Vec<NaiveDateTime> {
        let n = self.n_samples();
        let interval_ms = self.interval.num_milliseconds().max(1);
        let end = self.start.checked_add_signed(self.window);
        (0..n)
            .filter_map(|k| {
                if k + 1 == n {
                    end
                } else {
                    interval_ms
                        .checked_mul(k as i64)
                        .and_then(TimeDelta::try_milliseconds)
                        .and_then(|offset| self.start.checked_add_signed(offset))
                }
            })
            .collect()
    }
}

impl TryFrom<&RoutingParameters> for DepartureSampler {
    type Error = ConfigError;

    fn try_from(params: &RoutingParameters) -> Result<Self, Self::Error> {
        DepartureSampler::new(
            params.departure,
            params.departure_time_window,
            params.sampling_interval,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use itertools::Itertools;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .expect("test invariant failed: invalid start")
    }

    fn sampler(window_minutes: i64, interval_minutes: i64) -> DepartureSampler {
        DepartureSampler::new(
            start(),
            TimeDelta::minutes(window_minutes),
            TimeDelta::minutes(interval_minutes),
        )
        .expect("test invariant failed: sampler rejected")
    }

    #[test]
    fn test_sample_count() {
        for (window, interval, expected) in [(10, 1, 11), (10, 3, 5), (10, 10, 2), (10, 20, 2), (0, 1, 1)] {
            let s = sampler(window, interval);
            assert_eq!(s.n_samples(), expected, "window {window} interval {interval}");
            assert_eq!(s.samples().len(), expected);
        }
    }

    #[test]
    fn test_samples_strictly_increasing_from_start() {
        let samples = sampler(10, 3).samples();
        assert_eq!(samples[0], start());
        assert!(samples.iter().tuple_windows().all(|(a, b)| a < b));
        let minutes = samples
            .iter()
            .map(|s| (*s - start()).num_minutes())
            .collect_vec();
        assert_eq!(minutes, vec![0, 3, 6, 9, 10]);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(sampler(10, 1).samples(), sampler(10, 1).samples());
    }

    #[test]
    fn test_zero_window_yields_start() {
        assert_eq!(sampler(0, 5).samples(), vec![start()]);
    }

    #[test]
    fn test_window_past_calendar_range_rejected() {
        let result = DepartureSampler::new(
            start(),
            TimeDelta::days(1_000_000_000),
            TimeDelta::minutes(1),
        );
        assert!(matches!(result, Err(ConfigError::InvalidWindow { .. })));
    }

    #[test]
    fn test_long_window_offsets_are_exact() {
        let samples = sampler(400 * 24 * 60, 1).samples();
        assert_eq!(samples.len(), 400 * 24 * 60 + 1);
        let k = samples.len() - 2;
        assert_eq!((samples[k] - start()).num_minutes(), k as i64);
        assert_eq!(samples[samples.len() - 1], start() + TimeDelta::days(400));
    }

    #[test]
    fn test_invalid_interval() {
        let result = DepartureSampler::new(start(), TimeDelta::minutes(10), TimeDelta::zero());
        assert!(result.is_err());
    }
}
