use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use uom::si::f64::Time;

use crate::model::router::TravelTimeObservation;

/// the observations of one origin-destination pair across all sampled departures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairObservations {
    pub travel_times: Vec<Time>,
    pub unreachable_samples: usize,
}

/// groups observations by (origin index, destination index). the result does not
/// depend on the order the observations arrive in, apart from the order of the
/// collected travel times, which the median ignores.
pub fn group_observations<I>(observations: I) -> BTreeMap<(usize, usize), PairObservations>
where
    I: IntoIterator<Item = ((usize, usize), TravelTimeObservation)>,
{
    observations
        .into_iter()
        .fold(BTreeMap::new(), |mut acc, (key, observation)| {
            let pair: &mut PairObservations = acc.entry(key).or_default();
            match observation.travel_time() {
                Some(t) if t.value.is_finite() => pair.travel_times.push(t),
                _ => pair.unreachable_samples += 1,
            }
            acc
        })
}

/// median of a set of travel times; the mean of the two middle values for an
/// even count. None for an empty set.
pub fn median(travel_times: &[Time]) -> Option<Time> {
    let mut sorted = travel_times
        .iter()
        .map(|t| OrderedFloat(t.value))
        .collect::<Vec<_>>();
    sorted.sort();
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let value = if n % 2 == 1 {
        sorted[n / 2].0
    } else {
        (sorted[n / 2 - 1].0 + sorted[n / 2].0) / 2.0
    };
    Some(Time::new::<uom::si::time::second>(value))
}
