use chrono::NaiveDate;
use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{
    model::{CoordinateSystem, TravelMode},
    util::date_deserialization_ops::{
        deserialize_naive_date, deserialize_naive_dates, deserialize_optional_service_time,
    },
};

/// raw street and schedule records handed over by an external loader. parsing of
/// street geometry and transit feeds happens upstream; these records are already
/// normalized into the coordinate system given here.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct NetworkSource {
    #[serde(default)]
    pub coordinate_system: CoordinateSystem,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub stops: Vec<StopRecord>,
    #[serde(default)]
    pub calendars: Vec<CalendarRecord>,
    #[serde(default)]
    pub trips: Vec<TripRecord>,
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct NodeRecord {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct EdgeRecord {
    pub src: i64,
    pub dst: i64,
    /// segment length in meters
    pub length: f64,
    /// permitted street modes. defaults to walking and cycling.
    #[serde(default = "TravelMode::street_modes")]
    pub modes: EnumSet<TravelMode>,
    /// if false, the reverse edge is created as well
    #[serde(default)]
    pub oneway: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct StopRecord {
    pub stop_id: String,
    pub x: f64,
    pub y: f64,
    /// explicit walking links to street nodes. when missing, the stop is linked
    /// to its nearest street nodes during network construction.
    #[serde(default)]
    pub access_links: Option<Vec<AccessLinkRecord>>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct AccessLinkRecord {
    pub node: i64,
    /// link length in meters
    pub length: f64,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct CalendarRecord {
    pub service_id: String,
    #[serde(deserialize_with = "deserialize_naive_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_naive_date")]
    pub end_date: NaiveDate,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    #[serde(default, deserialize_with = "deserialize_naive_dates")]
    pub added_dates: Vec<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_naive_dates")]
    pub removed_dates: Vec<NaiveDate>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct TripRecord {
    pub trip_id: String,
    /// calendar this trip runs on. trips without one run every day.
    #[serde(default)]
    pub service_id: Option<String>,
    pub stop_times: Vec<StopTimeRecord>,
}

/// a stop visit. times are seconds after service-day midnight and are read
/// from "HH:MM:SS" strings. one of the two times may be omitted, in which case
/// the stop is treated as a pass-through with equal arrival and departure.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct StopTimeRecord {
    pub stop_id: String,
    pub stop_sequence: u32,
    #[serde(default, deserialize_with = "deserialize_optional_service_time")]
    pub arrival_time: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_service_time")]
    pub departure_time: Option<u32>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct TransferRecord {
    pub from_stop_id: String,
    pub to_stop_id: String,
    /// walking duration in seconds
    pub duration: f64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize_source() {
        let json = r#"{
            "coordinate_system": "planar",
            "nodes": [{"id": 1, "x": 0.0, "y": 0.0}, {"id": 2, "x": 100.0, "y": 0.0}],
            "edges": [{"src": 1, "dst": 2, "length": 100.0}],
            "stops": [{"stop_id": "a", "x": 0.0, "y": 0.0}],
            "calendars": [{
                "service_id": "wk", "start_date": "2024-03-01", "end_date": "2024-03-31",
                "monday": true, "tuesday": true, "wednesday": true, "thursday": true,
                "friday": true, "saturday": false, "sunday": false,
                "removed_dates": ["2024-03-05"]
            }],
            "trips": [{
                "trip_id": "t1", "service_id": "wk",
                "stop_times": [
                    {"stop_id": "a", "stop_sequence": 1, "departure_time": "08:00:00"},
                    {"stop_id": "a", "stop_sequence": 2, "arrival_time": "25:00:00"}
                ]
            }]
        }"#;
        let source: NetworkSource = serde_json::from_str(json).expect("test failed");
        assert_eq!(source.coordinate_system, CoordinateSystem::Planar);
        assert_eq!(source.edges[0].modes, TravelMode::street_modes());
        assert!(!source.edges[0].oneway);
        assert!(source.stops[0].access_links.is_none());
        assert_eq!(source.calendars[0].removed_dates.len(), 1);
        let stop_times = &source.trips[0].stop_times;
        assert_eq!(stop_times[0].departure_time, Some(8 * 3600));
        assert_eq!(stop_times[0].arrival_time, None);
        assert_eq!(stop_times[1].arrival_time, Some(25 * 3600));
        assert!(source.transfers.is_empty());
    }
}
