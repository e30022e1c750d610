//! shared networks for router and matrix tests.
//!
//! the line network has street nodes every 100m along the x axis from x=0 to
//! x=2000 (planar meters), walkable and cyclable in both directions. stop "A"
//! sits on node 0 and stop "B" on node 20. stop "C" lies far off the street
//! network at (2000, 3000) and is only reached by a 120 second transfer from "B".
//! trips run from "A" to "B" in 5 minutes at 08:00 and 08:30 every day, and a
//! weekend-only trip leaves at 08:15. stop "D" at (2000, -3000) is off the
//! street network too, served only by a daily trip leaving "B" at 08:10.

use std::sync::Arc;

use ttmatrix_core::model::network::{build_network, NetworkBuildConfig, NetworkModel, NetworkSource};

use crate::model::config::{RoutingParameters, TravelTimeConfig};

pub const LINE_NODES: i64 = 21;

pub fn line_source() -> NetworkSource {
    let nodes = (0..LINE_NODES)
        .map(|i| format!(r#"{{"id": {i}, "x": {}.0, "y": 0.0}}"#, i * 100))
        .collect::<Vec<_>>()
        .join(",");
    let edges = (0..LINE_NODES - 1)
        .map(|i| format!(r#"{{"src": {i}, "dst": {}, "length": 100.0}}"#, i + 1))
        .collect::<Vec<_>>()
        .join(",");
    let json = format!(
        r#"{{
        "coordinate_system": "planar",
        "nodes": [{nodes}],
        "edges": [{edges}],
        "stops": [
            {{"stop_id": "A", "x": 0.0, "y": 0.0}},
            {{"stop_id": "B", "x": 2000.0, "y": 0.0}},
            {{"stop_id": "C", "x": 2000.0, "y": 3000.0}},
            {{"stop_id": "D", "x": 2000.0, "y": -3000.0}}
        ],
        "calendars": [{{
            "service_id": "weekend", "start_date": "2024-01-01", "end_date": "2024-12-31",
            "monday": false, "tuesday": false, "wednesday": false, "thursday": false,
            "friday": false, "saturday": true, "sunday": true
        }}],
        "trips": [
            {{"trip_id": "early", "stop_times": [
                {{"stop_id": "A", "stop_sequence": 1, "departure_time": "08:00:00"}},
                {{"stop_id": "B", "stop_sequence": 2, "arrival_time": "08:05:00"}}
            ]}},
            {{"trip_id": "weekend", "service_id": "weekend", "stop_times": [
                {{"stop_id": "A", "stop_sequence": 1, "departure_time": "08:15:00"}},
                {{"stop_id": "B", "stop_sequence": 2, "arrival_time": "08:20:00"}}
            ]}},
            {{"trip_id": "late", "stop_times": [
                {{"stop_id": "A", "stop_sequence": 1, "departure_time": "08:30:00"}},
                {{"stop_id": "B", "stop_sequence": 2, "arrival_time": "08:35:00"}}
            ]}},
            {{"trip_id": "owl", "stop_times": [
                {{"stop_id": "A", "stop_sequence": 1, "departure_time": "24:10:00"}},
                {{"stop_id": "B", "stop_sequence": 2, "arrival_time": "24:15:00"}}
            ]}},
            {{"trip_id": "connector", "stop_times": [
                {{"stop_id": "B", "stop_sequence": 1, "departure_time": "08:10:00"}},
                {{"stop_id": "D", "stop_sequence": 2, "arrival_time": "08:20:00"}}
            ]}}
        ],
        "transfers": [{{"from_stop_id": "B", "to_stop_id": "C", "duration": 120.0}}]
    }}"#
    );
    serde_json::from_str(&json).expect("test invariant failed: fixture json invalid")
}

pub fn line_network() -> Arc<NetworkModel> {
    let network = build_network(&line_source(), &NetworkBuildConfig::default())
        .expect("test invariant failed: fixture network did not build");
    Arc::new(network)
}

/// a monday configuration with a single sample and walking at 4.5 km/h
pub fn config(departure: &str) -> TravelTimeConfig {
    let mut conf = TravelTimeConfig::new(departure);
    conf.departure_time_window = 0.0;
    conf.speed_walking = 4.5;
    conf.parallelism = 2;
    conf
}

pub fn params(conf: &TravelTimeConfig) -> RoutingParameters {
    RoutingParameters::try_from(conf).expect("test invariant failed: invalid test config")
}
