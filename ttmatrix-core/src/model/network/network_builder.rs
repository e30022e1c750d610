use std::collections::HashMap;

use geo::Point;
use indexmap::IndexMap;
use itertools::Itertools;
use uom::si::f64::{Length, Time};

use super::{
    batch_build_error, AccessLink, CalendarId, Departure, Edge, EdgeId, NetworkBuildConfig,
    NetworkBuildError, NetworkModel, NetworkSource, Node, NodeId, PointIndex, Route, RouteId,
    Schedule, ServiceCalendar, Stop, StopId, StopTime, Transfer, Trip, TripId, TripRecord,
};
use crate::{model::TravelMode, util::geo_utils};

/// builds an immutable [`NetworkModel`] from raw source records.
///
/// every record is validated. within each phase (nodes, edges, stops, calendars,
/// trips, transfers) all problems are collected and reported together; a phase
/// with errors stops the build.
///
/// # Arguments
///
/// * `source` - street and schedule records from an external loader
/// * `config` - options for linking stops to the street graph
///
/// # Returns
///
/// * the network model, or the structural problems found in the source data
pub fn build_network(
    source: &NetworkSource,
    config: &NetworkBuildConfig,
) -> Result<NetworkModel, NetworkBuildError> {
    let coordinate_system = source.coordinate_system;

    let (nodes, node_lookup) = build_nodes(source)?;
    let node_points = nodes.iter().map(|n| n.coordinate).collect_vec();
    let node_index = PointIndex::new(&node_points, coordinate_system);

    let edges = build_edges(source, &node_lookup)?;
    let mut adjacency: Vec<Vec<EdgeId>> = vec![vec![]; nodes.len()];
    for edge in edges.iter() {
        adjacency[edge.src_node_id.0].push(edge.edge_id);
    }

    let stops = build_stops(source, config, &node_lookup, &node_index)?;
    let stop_lookup: HashMap<String, StopId> = stops
        .iter()
        .map(|s| (s.external_id.clone(), s.stop_id))
        .collect();
    let stop_points = stops.iter().map(|s| s.coordinate).collect_vec();
    let stop_index = PointIndex::new(&stop_points, coordinate_system);

    let calendars = build_calendars(source)?;
    let calendar_lookup: HashMap<&str, CalendarId> = calendars
        .iter()
        .map(|c| (c.service_id.as_str(), c.calendar_id))
        .collect();

    let mut trips = build_trips(source, &stop_lookup, &calendar_lookup)?;
    let routes = build_routes(&mut trips);
    let mut stop_routes: Vec<Vec<(RouteId, usize)>> = vec![vec![]; stops.len()];
    for route in routes.iter() {
        for (position, stop_id) in route.stops.iter().enumerate().take(route.schedules.len()) {
            stop_routes[stop_id.0].push((route.route_id, position));
        }
    }

    let transfer_list = build_transfers(source, &stop_lookup)?;
    let mut transfers: Vec<Vec<Transfer>> = vec![vec![]; stops.len()];
    for transfer in transfer_list {
        transfers[transfer.from_stop_id.0].push(transfer);
    }

    let network = NetworkModel {
        coordinate_system,
        nodes: nodes.into_boxed_slice(),
        edges: edges.into_boxed_slice(),
        adjacency: adjacency.into_boxed_slice(),
        stops: stops.into_boxed_slice(),
        stop_routes: stop_routes.into_boxed_slice(),
        routes: routes.into_boxed_slice(),
        trips: trips.into_boxed_slice(),
        calendars: calendars.into_boxed_slice(),
        transfers: transfers.into_boxed_slice(),
        node_index,
        stop_index,
        stop_lookup,
    };
    log::info!(
        "built network model with {} nodes, {} edges, {} stops, {} routes, {} trips, {} transfers",
        network.n_nodes(),
        network.n_edges(),
        network.n_stops(),
        network.n_routes(),
        network.n_trips(),
        network.n_transfers()
    );
    Ok(network)
}

impl TryFrom<&NetworkSource> for NetworkModel {
    type Error = NetworkBuildError;

    fn try_from(source: &NetworkSource) -> Result<Self, Self::Error> {
        build_network(source, &NetworkBuildConfig::default())
    }
}

fn meters(value: f64) -> Length {
    Length::new::<uom::si::length::meter>(value)
}

fn valid_length(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn finish_phase<T>(value: T, errors: Vec<NetworkBuildError>) -> Result<T, NetworkBuildError> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(batch_build_error(errors))
    }
}

fn build_nodes(
    source: &NetworkSource,
) -> Result<(Vec<Node>, IndexMap<i64, NodeId>), NetworkBuildError> {
    let mut errors = vec![];
    let mut lookup: IndexMap<i64, NodeId> = IndexMap::with_capacity(source.nodes.len());
    let mut nodes = Vec::with_capacity(source.nodes.len());
    for record in source.nodes.iter() {
        let coordinate = Point::new(record.x, record.y);
        if !geo_utils::is_finite_point(&coordinate) {
            errors.push(NetworkBuildError::InvalidCoordinate {
                context: format!("node {}", record.id),
                x: record.x,
                y: record.y,
            });
            continue;
        }
        if lookup.contains_key(&record.id) {
            errors.push(NetworkBuildError::DuplicateNode(record.id));
            continue;
        }
        let node_id = NodeId(nodes.len());
        lookup.insert(record.id, node_id);
        nodes.push(Node {
            node_id,
            external_id: record.id,
            coordinate,
        });
    }
    finish_phase((nodes, lookup), errors)
}

fn build_edges(
    source: &NetworkSource,
    node_lookup: &IndexMap<i64, NodeId>,
) -> Result<Vec<Edge>, NetworkBuildError> {
    let mut errors = vec![];
    let mut edges: Vec<Edge> = Vec::with_capacity(source.edges.len() * 2);
    for record in source.edges.iter() {
        let context = format!("edge ({}, {})", record.src, record.dst);
        let src = node_lookup.get(&record.src).copied();
        let dst = node_lookup.get(&record.dst).copied();
        for (node, id) in [(src, record.src), (dst, record.dst)] {
            if node.is_none() {
                errors.push(NetworkBuildError::UnknownNode {
                    context: context.clone(),
                    node: id,
                });
            }
        }
        if !valid_length(record.length) {
            errors.push(NetworkBuildError::InvalidEdgeLength {
                context: context.clone(),
                length: record.length,
            });
            continue;
        }
        let (Some(src), Some(dst)) = (src, dst) else {
            continue;
        };
        // transit never runs over street edges
        let modes = record.modes & TravelMode::street_modes();
        let mut directions = vec![(src, dst)];
        if !record.oneway {
            directions.push((dst, src));
        }
        for (src_node_id, dst_node_id) in directions {
            edges.push(Edge {
                edge_id: EdgeId(edges.len()),
                src_node_id,
                dst_node_id,
                length: meters(record.length),
                modes,
            });
        }
    }
    finish_phase(edges, errors)
}

fn build_stops(
    source: &NetworkSource,
    config: &NetworkBuildConfig,
    node_lookup: &IndexMap<i64, NodeId>,
    node_index: &PointIndex,
) -> Result<Vec<Stop>, NetworkBuildError> {
    let mut errors = vec![];
    let mut seen: HashMap<&str, StopId> = HashMap::with_capacity(source.stops.len());
    let mut stops = Vec::with_capacity(source.stops.len());
    for record in source.stops.iter() {
        let context = format!("stop '{}'", record.stop_id);
        let coordinate = Point::new(record.x, record.y);
        if !geo_utils::is_finite_point(&coordinate) {
            errors.push(NetworkBuildError::InvalidCoordinate {
                context,
                x: record.x,
                y: record.y,
            });
            continue;
        }
        if seen.contains_key(record.stop_id.as_str()) {
            errors.push(NetworkBuildError::DuplicateStop(record.stop_id.clone()));
            continue;
        }

        let access_links = match &record.access_links {
            Some(links) => {
                let mut resolved = Vec::with_capacity(links.len());
                for link in links.iter() {
                    match node_lookup.get(&link.node) {
                        None => errors.push(NetworkBuildError::UnknownNode {
                            context: context.clone(),
                            node: link.node,
                        }),
                        Some(_) if !valid_length(link.length) => {
                            errors.push(NetworkBuildError::InvalidEdgeLength {
                                context: format!("{context} access link to node {}", link.node),
                                length: link.length,
                            })
                        }
                        Some(node_id) => resolved.push(AccessLink {
                            node_id: *node_id,
                            length: meters(link.length),
                        }),
                    }
                }
                resolved
            }
            None => {
                let linked = node_index
                    .within_distance(&coordinate, config.stop_link_radius())
                    .into_iter()
                    .take(config.max_stop_links)
                    .map(|(idx, length)| AccessLink {
                        node_id: NodeId(idx),
                        length,
                    })
                    .collect_vec();
                if linked.is_empty() {
                    log::debug!(
                        "{context} has no street nodes within {} meters, it is only reachable directly or by transfer",
                        config.stop_link_radius
                    );
                }
                linked
            }
        };

        let stop_id = StopId(stops.len());
        seen.insert(record.stop_id.as_str(), stop_id);
        stops.push(Stop {
            stop_id,
            external_id: record.stop_id.clone(),
            coordinate,
            access_links,
        });
    }
    finish_phase(stops, errors)
}

fn build_calendars(source: &NetworkSource) -> Result<Vec<ServiceCalendar>, NetworkBuildError> {
    let mut errors = vec![];
    let mut calendars: Vec<ServiceCalendar> = Vec::with_capacity(source.calendars.len());
    for record in source.calendars.iter() {
        if calendars.iter().any(|c| c.service_id == record.service_id) {
            errors.push(NetworkBuildError::DuplicateCalendar(
                record.service_id.clone(),
            ));
            continue;
        }
        if record.end_date < record.start_date {
            errors.push(NetworkBuildError::InvalidCalendar {
                service_id: record.service_id.clone(),
            });
            continue;
        }
        calendars.push(ServiceCalendar {
            calendar_id: CalendarId(calendars.len()),
            service_id: record.service_id.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
            weekdays: [
                record.monday,
                record.tuesday,
                record.wednesday,
                record.thursday,
                record.friday,
                record.saturday,
                record.sunday,
            ],
            added_dates: record.added_dates.clone(),
            removed_dates: record.removed_dates.clone(),
        });
    }
    finish_phase(calendars, errors)
}

fn build_trips(
    source: &NetworkSource,
    stop_lookup: &HashMap<String, StopId>,
    calendar_lookup: &HashMap<&str, CalendarId>,
) -> Result<Vec<Trip>, NetworkBuildError> {
    let mut errors = vec![];
    let mut seen: HashMap<&str, TripId> = HashMap::with_capacity(source.trips.len());
    let mut trips = Vec::with_capacity(source.trips.len());
    for record in source.trips.iter() {
        if seen.contains_key(record.trip_id.as_str()) {
            errors.push(NetworkBuildError::DuplicateTrip(record.trip_id.clone()));
            continue;
        }
        let calendar_id = match &record.service_id {
            None => None,
            Some(service_id) => match calendar_lookup.get(service_id.as_str()) {
                Some(calendar_id) => Some(*calendar_id),
                None => {
                    errors.push(NetworkBuildError::UnknownCalendar {
                        trip: record.trip_id.clone(),
                        service_id: service_id.clone(),
                    });
                    continue;
                }
            },
        };
        match get_ordered_stop_times(record, stop_lookup) {
            Ok(stop_times) => {
                let trip_id = TripId(trips.len());
                seen.insert(record.trip_id.as_str(), trip_id);
                trips.push(Trip {
                    trip_id,
                    external_id: record.trip_id.clone(),
                    // assigned when grouping trips into routes
                    route_id: RouteId(0),
                    calendar_id,
                    stop_times,
                });
            }
            Err(mut trip_errors) => errors.append(&mut trip_errors),
        }
    }
    finish_phase(trips, errors)
}

/// resolves and orders the stop times of a trip by stop sequence, then checks that
/// time never decreases along the trip.
fn get_ordered_stop_times(
    record: &TripRecord,
    stop_lookup: &HashMap<String, StopId>,
) -> Result<Vec<StopTime>, Vec<NetworkBuildError>> {
    if record.stop_times.len() < 2 {
        return Err(vec![NetworkBuildError::TripTooShort(record.trip_id.clone())]);
    }

    let mut errors = vec![];
    let mut stop_times: Vec<(u32, StopTime)> = Vec::with_capacity(record.stop_times.len());
    for st in record.stop_times.iter().sorted_by_key(|st| st.stop_sequence) {
        let stop_sequence = st.stop_sequence;
        let stop_id = match stop_lookup.get(&st.stop_id) {
            Some(stop_id) => *stop_id,
            None => {
                errors.push(NetworkBuildError::UnknownStop {
                    context: format!("trip '{}'", record.trip_id),
                    stop: st.stop_id.clone(),
                });
                continue;
            }
        };
        let (arrival_time, departure_time) = match (st.arrival_time, st.departure_time) {
            (Some(a), Some(d)) => (a, d),
            (Some(a), None) => (a, a),
            (None, Some(d)) => (d, d),
            (None, None) => {
                errors.push(NetworkBuildError::MissingStopTimes {
                    trip: record.trip_id.clone(),
                    stop_sequence,
                });
                continue;
            }
        };
        stop_times.push((
            stop_sequence,
            StopTime {
                stop_id,
                arrival_time,
                departure_time,
            },
        ));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut previous_departure: Option<u32> = None;
    for (stop_sequence, st) in stop_times.iter() {
        let decreases_at_stop = st.departure_time < st.arrival_time;
        let decreases_from_previous = previous_departure
            .map(|prev| st.arrival_time < prev)
            .unwrap_or_default();
        if decreases_at_stop || decreases_from_previous {
            errors.push(NetworkBuildError::NonMonotonicStopTimes {
                trip: record.trip_id.clone(),
                stop_sequence: *stop_sequence,
            });
        }
        previous_departure = Some(st.departure_time);
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(stop_times.into_iter().map(|(_, st)| st).collect_vec())
}

/// true if `trip` never leaves or arrives earlier than `previous` at any position.
fn follows_without_overtaking(previous: &Trip, trip: &Trip) -> bool {
    previous
        .stop_times
        .iter()
        .zip(trip.stop_times.iter())
        .all(|(p, t)| p.arrival_time <= t.arrival_time && p.departure_time <= t.departure_time)
}

/// groups trips into route patterns. trips with the same stop sequence share a
/// route unless one would overtake another, in which case a parallel route is created.
/// assigns each trip its route id.
fn build_routes(trips: &mut [Trip]) -> Vec<Route> {
    let order = trips
        .iter()
        .sorted_by(|a, b| {
            a.first_departure()
                .cmp(&b.first_departure())
                .then(a.external_id.cmp(&b.external_id))
        })
        .map(|t| t.trip_id)
        .collect_vec();

    let mut routes: Vec<Route> = vec![];
    let mut patterns: HashMap<Vec<StopId>, Vec<RouteId>> = HashMap::new();
    for trip_id in order {
        let trip = &trips[trip_id.0];
        let stop_sequence = trip.stop_times.iter().map(|st| st.stop_id).collect_vec();
        let candidates = patterns.entry(stop_sequence.clone()).or_default();
        let existing = candidates.iter().copied().find(|route_id| {
            routes[route_id.0]
                .trips
                .last()
                .map(|last| follows_without_overtaking(&trips[last.0], trip))
                .unwrap_or(true)
        });
        let route_id = match existing {
            Some(route_id) => route_id,
            None => {
                let route_id = RouteId(routes.len());
                let n_boardable = stop_sequence.len().saturating_sub(1);
                routes.push(Route {
                    route_id,
                    stops: stop_sequence,
                    trips: vec![],
                    schedules: (0..n_boardable).map(|_| Schedule::new()).collect_vec(),
                });
                candidates.push(route_id);
                route_id
            }
        };
        let route = &mut routes[route_id.0];
        for (position, (here, next)) in trip.stop_times.iter().tuple_windows().enumerate() {
            route.schedules[position].insert(Departure {
                departure_time: here.departure_time,
                next_arrival_time: next.arrival_time,
                trip_id,
            });
        }
        route.trips.push(trip_id);
        trips[trip_id.0].route_id = route_id;
    }
    routes
}

fn build_transfers(
    source: &NetworkSource,
    stop_lookup: &HashMap<String, StopId>,
) -> Result<Vec<Transfer>, NetworkBuildError> {
    let mut errors = vec![];
    let mut transfers = Vec::with_capacity(source.transfers.len());
    for record in source.transfers.iter() {
        let context = format!(
            "transfer from '{}' to '{}'",
            record.from_stop_id, record.to_stop_id
        );
        let from = stop_lookup.get(&record.from_stop_id).copied();
        let to = stop_lookup.get(&record.to_stop_id).copied();
        for (stop, id) in [(from, &record.from_stop_id), (to, &record.to_stop_id)] {
            if stop.is_none() {
                errors.push(NetworkBuildError::UnknownStop {
                    context: context.clone(),
                    stop: id.clone(),
                });
            }
        }
        if !valid_length(record.duration) {
            errors.push(NetworkBuildError::InvalidTransferDuration {
                from: record.from_stop_id.clone(),
                to: record.to_stop_id.clone(),
                duration: record.duration,
            });
            continue;
        }
        if let (Some(from_stop_id), Some(to_stop_id)) = (from, to) {
            transfers.push(Transfer {
                from_stop_id,
                to_stop_id,
                duration: Time::new::<uom::si::time::second>(record.duration),
            });
        }
    }
    finish_phase(transfers, errors)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::CoordinateSystem;
    use chrono::NaiveDate;
    use uom::si::{f64::Velocity, length::meter, time::second, velocity::meter_per_second};

    fn source_from_json(json: &str) -> NetworkSource {
        serde_json::from_str(json).expect("test invariant failed: invalid source json")
    }

    /// three nodes on a line 100m apart, two stops at the ends served by an
    /// outbound trip on weekdays and a return trip every day.
    fn line_source() -> NetworkSource {
        source_from_json(
            r#"{
            "coordinate_system": "planar",
            "nodes": [
                {"id": 10, "x": 0.0, "y": 0.0},
                {"id": 11, "x": 100.0, "y": 0.0},
                {"id": 12, "x": 200.0, "y": 0.0}
            ],
            "edges": [
                {"src": 10, "dst": 11, "length": 100.0},
                {"src": 11, "dst": 12, "length": 100.0, "oneway": true, "modes": ["walk"]}
            ],
            "stops": [
                {"stop_id": "west", "x": 0.0, "y": 5.0},
                {"stop_id": "east", "x": 200.0, "y": 5.0,
                 "access_links": [{"node": 12, "length": 5.0}]}
            ],
            "calendars": [{
                "service_id": "weekday", "start_date": "2024-03-01", "end_date": "2024-03-31",
                "monday": true, "tuesday": true, "wednesday": true, "thursday": true,
                "friday": true, "saturday": false, "sunday": false
            }],
            "trips": [
                {"trip_id": "out-2", "service_id": "weekday", "stop_times": [
                    {"stop_id": "east", "stop_sequence": 2, "arrival_time": "08:20:00"},
                    {"stop_id": "west", "stop_sequence": 1, "departure_time": "08:10:00"}
                ]},
                {"trip_id": "out-1", "service_id": "weekday", "stop_times": [
                    {"stop_id": "west", "stop_sequence": 1, "departure_time": "08:00:00"},
                    {"stop_id": "east", "stop_sequence": 2, "arrival_time": "08:10:00"}
                ]},
                {"trip_id": "back", "stop_times": [
                    {"stop_id": "east", "stop_sequence": 1, "departure_time": "09:00:00"},
                    {"stop_id": "west", "stop_sequence": 2, "arrival_time": "09:05:00"}
                ]}
            ],
            "transfers": [{"from_stop_id": "west", "to_stop_id": "east", "duration": 180.0}]
        }"#,
        )
    }

    fn build(source: &NetworkSource) -> NetworkModel {
        NetworkModel::try_from(source).expect("test invariant failed: network did not build")
    }

    fn expect_build_error(source: &NetworkSource) -> NetworkBuildError {
        match NetworkModel::try_from(source) {
            Ok(_) => panic!("expected network build to fail"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_build_counts() {
        let network = build(&line_source());
        assert_eq!(network.n_nodes(), 3);
        // one two-way edge and one oneway edge
        assert_eq!(network.n_edges(), 3);
        assert_eq!(network.n_stops(), 2);
        assert_eq!(network.n_trips(), 3);
        assert_eq!(network.n_routes(), 2);
        assert_eq!(network.n_transfers(), 1);
    }

    #[test]
    fn test_oneway_edge_modes() {
        let network = build(&line_source());
        let from_middle = network.outgoing_edges(NodeId(1)).collect_vec();
        assert_eq!(from_middle.len(), 2);
        let to_east = from_middle
            .iter()
            .find(|e| e.dst_node_id == NodeId(2))
            .expect("test invariant failed: edge to east node missing");
        assert!(to_east.permits(TravelMode::Walk));
        assert!(!to_east.permits(TravelMode::Bicycle));
        assert_eq!(network.outgoing_edges(NodeId(2)).count(), 0);
    }

    #[test]
    fn test_stop_links() {
        let network = build(&line_source());
        let west = network
            .find_stop("west")
            .and_then(|s| network.get_stop(s))
            .expect("test invariant failed: west stop missing");
        // linked automatically to the nearest node only, the next is beyond 100m
        assert_eq!(west.access_links.len(), 1);
        assert_eq!(west.access_links[0].node_id, NodeId(0));
        assert!((west.access_links[0].length.get::<meter>() - 5.0).abs() < 1e-9);

        let east = network
            .find_stop("east")
            .and_then(|s| network.get_stop(s))
            .expect("test invariant failed: east stop missing");
        assert_eq!(east.access_links.len(), 1);
        assert_eq!(east.access_links[0].node_id, NodeId(2));
    }

    #[test]
    fn test_trips_ordered_by_stop_sequence() {
        let network = build(&line_source());
        let west = network.find_stop("west").expect("test invariant failed");
        let trip = network
            .get_trip(TripId(0))
            .expect("test invariant failed: trip missing");
        assert_eq!(trip.external_id, "out-2");
        assert_eq!(trip.stop_times[0].stop_id, west);
        assert_eq!(trip.stop_times[0].departure_time, 8 * 3600 + 600);
        // pass-through times are copied from the known side
        assert_eq!(trip.stop_times[0].arrival_time, 8 * 3600 + 600);
    }

    #[test]
    fn test_trips_departing_after() {
        let network = build(&line_source());
        let west = network.find_stop("west").expect("test invariant failed");
        let departures = network
            .trips_departing_after(west, 8 * 3600)
            .map(|d| d.departure_time)
            .collect_vec();
        assert_eq!(departures, vec![8 * 3600, 8 * 3600 + 600]);

        let later = network
            .trips_departing_after(west, 8 * 3600 + 1)
            .collect_vec();
        assert_eq!(later.len(), 1);
        assert_eq!(later[0].trip_id, TripId(0));
        assert_eq!(later[0].position, 0);

        // the last stop of a trip is not a boarding point
        let east = network.find_stop("east").expect("test invariant failed");
        let from_east = network.trips_departing_after(east, 0).collect_vec();
        assert_eq!(from_east.len(), 1);
        assert_eq!(from_east[0].trip_id, TripId(2));
        assert!(network.trips_departing_after(east, 9 * 3600 + 1).next().is_none());
    }

    #[test]
    fn test_overtaking_trips_split_routes() {
        let mut source = line_source();
        // departs after out-1 but arrives before it
        source.trips.push(source_from_json(
            r#"{"nodes": [], "edges": [], "trips": [
                {"trip_id": "express", "stop_times": [
                    {"stop_id": "west", "stop_sequence": 1, "departure_time": "08:01:00"},
                    {"stop_id": "east", "stop_sequence": 2, "arrival_time": "08:05:00"}
                ]}
            ]}"#,
        )
        .trips
        .remove(0));
        let network = build(&source);
        assert_eq!(network.n_routes(), 3);
        let west = network.find_stop("west").expect("test invariant failed");
        let departures = network
            .trips_departing_after(west, 0)
            .map(|d| d.departure_time)
            .collect_vec();
        assert_eq!(departures, vec![28800, 28860, 29400]);
    }

    #[test]
    fn test_trip_runs_on() {
        let network = build(&line_source());
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).expect("test invariant failed");
        let saturday = NaiveDate::from_ymd_opt(2024, 3, 9).expect("test invariant failed");
        assert!(network.trip_runs_on(TripId(1), &monday));
        assert!(!network.trip_runs_on(TripId(1), &saturday));
        // no calendar
        assert!(network.trip_runs_on(TripId(2), &saturday));
        assert!(!network.trip_runs_on(TripId(99), &monday));
    }

    #[test]
    fn test_nearby_queries() {
        let network = build(&line_source());
        let speed = Velocity::new::<meter_per_second>(1.0);
        let origin = Point::new(90.0, 0.0);
        let nodes = network.nearby_nodes(&origin, Length::new::<meter>(100.0), speed);
        let ids = nodes.iter().map(|(n, _)| *n).collect_vec();
        assert_eq!(ids, vec![NodeId(1), NodeId(0)]);
        assert!((nodes[0].1.get::<second>() - 10.0).abs() < 1e-9);

        let stops = network.nearby_stops(&origin, Length::new::<meter>(50.0), speed);
        assert!(stops.is_empty());
    }

    #[test]
    fn test_transfers_from() {
        let network = build(&line_source());
        let west = network.find_stop("west").expect("test invariant failed");
        let east = network.find_stop("east").expect("test invariant failed");
        let transfers = network.transfers_from(west);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].to_stop_id, east);
        assert!(network.transfers_from(east).is_empty());
        assert!(network.transfers_from(StopId(42)).is_empty());
    }

    #[test]
    fn test_duplicate_node() {
        let mut source = line_source();
        source.nodes[1].id = 10;
        let error = expect_build_error(&source);
        assert!(matches!(error, NetworkBuildError::DuplicateNode(10)));
    }

    #[test]
    fn test_unknown_edge_endpoint() {
        let mut source = line_source();
        source.edges[0].dst = 99;
        let error = expect_build_error(&source);
        assert!(matches!(
            error,
            NetworkBuildError::UnknownNode { node: 99, .. }
        ));
    }

    #[test]
    fn test_negative_edge_length() {
        let mut source = line_source();
        source.edges[0].length = -1.0;
        let error = expect_build_error(&source);
        assert!(matches!(error, NetworkBuildError::InvalidEdgeLength { .. }));
    }

    #[test]
    fn test_errors_within_a_phase_are_collected() {
        let mut source = line_source();
        source.edges[0].length = f64::NAN;
        source.edges[1].src = 77;
        let error = expect_build_error(&source);
        match error {
            NetworkBuildError::Multiple(msg) => {
                assert!(msg.contains("invalid length"));
                assert!(msg.contains("unknown node id 77"));
            }
            other => panic!("expected multiple errors, found {other}"),
        }
    }

    #[test]
    fn test_invalid_stop_coordinate() {
        let mut source = line_source();
        source.stops[0].x = f64::INFINITY;
        let error = expect_build_error(&source);
        assert!(matches!(error, NetworkBuildError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_unknown_trip_stop() {
        let mut source = line_source();
        source.trips[2].stop_times[0].stop_id = String::from("nowhere");
        let error = expect_build_error(&source);
        assert!(matches!(error, NetworkBuildError::UnknownStop { .. }));
    }

    #[test]
    fn test_unknown_calendar() {
        let mut source = line_source();
        source.trips[2].service_id = Some(String::from("holiday"));
        let error = expect_build_error(&source);
        assert!(matches!(error, NetworkBuildError::UnknownCalendar { .. }));
    }

    #[test]
    fn test_decreasing_stop_times() {
        let mut source = line_source();
        source.trips[2].stop_times[1].arrival_time = Some(8 * 3600);
        let error = expect_build_error(&source);
        assert!(matches!(
            error,
            NetworkBuildError::NonMonotonicStopTimes {
                stop_sequence: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_trip_too_short() {
        let mut source = line_source();
        source.trips[2].stop_times.pop();
        let error = expect_build_error(&source);
        assert!(matches!(error, NetworkBuildError::TripTooShort(_)));
    }

    #[test]
    fn test_missing_stop_times() {
        let mut source = line_source();
        source.trips[2].stop_times[1].arrival_time = None;
        let error = expect_build_error(&source);
        assert!(matches!(error, NetworkBuildError::MissingStopTimes { .. }));
    }

    #[test]
    fn test_invalid_transfer_duration() {
        let mut source = line_source();
        source.transfers[0].duration = -5.0;
        let error = expect_build_error(&source);
        assert!(matches!(
            error,
            NetworkBuildError::InvalidTransferDuration { .. }
        ));
    }

    #[test]
    fn test_calendar_ends_before_start() {
        let mut source = line_source();
        source.calendars[0].end_date = NaiveDate::from_ymd_opt(2024, 2, 1)
            .expect("test invariant failed");
        let error = expect_build_error(&source);
        assert!(matches!(error, NetworkBuildError::InvalidCalendar { .. }));
    }

    #[test]
    fn test_geographic_auto_link() {
        let source = source_from_json(
            r#"{
            "nodes": [{"id": 1, "x": -105.0, "y": 39.0}, {"id": 2, "x": -105.01, "y": 39.0}],
            "edges": [{"src": 1, "dst": 2, "length": 865.0}],
            "stops": [{"stop_id": "s", "x": -105.0003, "y": 39.0}]
        }"#,
        );
        assert_eq!(source.coordinate_system, CoordinateSystem::Geographic);
        let network = build(&source);
        let stop = network
            .get_stop(StopId(0))
            .expect("test invariant failed: stop missing");
        assert_eq!(stop.access_links.len(), 1);
        let length = stop.access_links[0].length.get::<meter>();
        assert!(length > 20.0 && length < 30.0, "link length {length}");
    }
}
