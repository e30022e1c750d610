use std::collections::HashMap;

use itertools::Itertools;

use super::{MatrixError, OdMatrixEntry};

/// the result of a matrix batch: one entry per origin-destination pair,
/// ordered by origin then destination in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTimeMatrix {
    entries: Vec<OdMatrixEntry>,
    lookup: HashMap<(String, String), usize>,
}

impl TravelTimeMatrix {
    pub fn new(entries: Vec<OdMatrixEntry>) -> TravelTimeMatrix {
        let lookup = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| ((e.from_id.clone(), e.to_id.clone()), idx))
            .collect();
        TravelTimeMatrix { entries, lookup }
    }

    pub fn entries(&self) -> &[OdMatrixEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<OdMatrixEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, from_id: &str, to_id: &str) -> Option<&OdMatrixEntry> {
        self.lookup
            .get(&(from_id.to_string(), to_id.to_string()))
            .and_then(|idx| self.entries.get(*idx))
    }

    /// all entries arriving at one destination, in origin order.
    ///
    /// # Returns
    ///
    /// * the entries, or an error if the destination is not in the matrix or no
    ///   origin reaches it
    pub fn to_destination(&self, to_id: &str) -> Result<Vec<&OdMatrixEntry>, MatrixError> {
        let entries = self
            .entries
            .iter()
            .filter(|e| e.to_id == to_id)
            .collect_vec();
        if entries.is_empty() {
            Err(MatrixError::UnknownDestination(to_id.to_string()))
        } else if entries.iter().all(|e| !e.is_reachable()) {
            Err(MatrixError::NoTravelTimes(to_id.to_string()))
        } else {
            Ok(entries)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use uom::si::{f64::Time, time::minute};

    fn entry(from: &str, to: &str, minutes: Option<f64>) -> OdMatrixEntry {
        OdMatrixEntry {
            from_id: from.to_string(),
            to_id: to.to_string(),
            travel_time: minutes.map(Time::new::<minute>),
            unreachable_samples: if minutes.is_some() { 0 } else { 3 },
        }
    }

    fn matrix() -> TravelTimeMatrix {
        TravelTimeMatrix::new(vec![
            entry("a", "a", Some(0.0)),
            entry("a", "b", Some(12.0)),
            entry("a", "c", None),
            entry("b", "a", Some(14.0)),
            entry("b", "b", Some(0.0)),
            entry("b", "c", None),
        ])
    }

    #[test]
    fn test_get() {
        let m = matrix();
        assert_eq!(m.len(), 6);
        let found = m.get("b", "a").expect("test invariant failed: entry missing");
        assert_eq!(found.travel_time_minutes(), Some(14.0));
        assert!(m.get("a", "z").is_none());
    }

    #[test]
    fn test_to_destination() {
        let m = matrix();
        let to_b = m.to_destination("b").expect("test invariant failed");
        let from = to_b.iter().map(|e| e.from_id.as_str()).collect_vec();
        assert_eq!(from, vec!["a", "b"]);
    }

    #[test]
    fn test_to_unknown_destination() {
        let m = matrix();
        let result = m.to_destination("z");
        assert!(matches!(result, Err(MatrixError::UnknownDestination(id)) if id == "z"));
    }

    #[test]
    fn test_to_unreachable_destination() {
        let m = matrix();
        let result = m.to_destination("c");
        assert!(matches!(result, Err(MatrixError::NoTravelTimes(_))));
    }
}
