use std::{collections::HashMap, ops::Bound};

use chrono::NaiveDate;
use geo::Point;
use itertools::Itertools;
use uom::si::f64::{Length, Time, Velocity};

use super::{
    Departure, Edge, EdgeId, Node, NodeId, PointIndex, Route, RouteId, ServiceCalendar, Stop,
    StopId, Transfer, Trip, TripDeparture, TripId,
};
use crate::model::CoordinateSystem;

/// the immutable multimodal graph. all relationships are id-indexed adjacency
/// tables; the model owns every node, edge, stop, trip and transfer, and nothing
/// mutates it once built, so it can be shared freely across routing threads.
pub struct NetworkModel {
    pub(super) coordinate_system: CoordinateSystem,
    pub(super) nodes: Box<[Node]>,
    pub(super) edges: Box<[Edge]>,
    /// outgoing edges of each node
    pub(super) adjacency: Box<[Vec<EdgeId>]>,
    pub(super) stops: Box<[Stop]>,
    /// boardable (route, position) pairs at each stop
    pub(super) stop_routes: Box<[Vec<(RouteId, usize)>]>,
    pub(super) routes: Box<[Route]>,
    pub(super) trips: Box<[Trip]>,
    pub(super) calendars: Box<[ServiceCalendar]>,
    /// outgoing transfers of each stop
    pub(super) transfers: Box<[Vec<Transfer>]>,
    pub(super) node_index: PointIndex,
    pub(super) stop_index: PointIndex,
    pub(super) stop_lookup: HashMap<String, StopId>,
}

impl NetworkModel {
    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn n_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn n_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn n_trips(&self) -> usize {
        self.trips.len()
    }

    pub fn n_transfers(&self) -> usize {
        self.transfers.iter().map(|t| t.len()).sum()
    }

    pub fn get_node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(node_id.0)
    }

    pub fn get_stop(&self, stop_id: StopId) -> Option<&Stop> {
        self.stops.get(stop_id.0)
    }

    pub fn get_route(&self, route_id: RouteId) -> Option<&Route> {
        self.routes.get(route_id.0)
    }

    pub fn get_trip(&self, trip_id: TripId) -> Option<&Trip> {
        self.trips.get(trip_id.0)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// look up a stop by its identifier in the source schedule
    pub fn find_stop(&self, external_id: &str) -> Option<StopId> {
        self.stop_lookup.get(external_id).copied()
    }

    /// street nodes within `max_distance` of `point`, nearest first, paired with
    /// the time needed to cover the straight-line distance at `speed`. an empty
    /// result means the point has no street access.
    pub fn nearby_nodes(
        &self,
        point: &Point<f64>,
        max_distance: Length,
        speed: Velocity,
    ) -> Vec<(NodeId, Time)> {
        self.node_index
            .within_distance(point, max_distance)
            .into_iter()
            .map(|(idx, distance)| (NodeId(idx), distance / speed))
            .collect_vec()
    }

    /// transit stops within `max_distance` of `point`, nearest first, paired with
    /// the time needed to cover the straight-line distance at `speed`.
    pub fn nearby_stops(
        &self,
        point: &Point<f64>,
        max_distance: Length,
        speed: Velocity,
    ) -> Vec<(StopId, Time)> {
        self.stop_index
            .within_distance(point, max_distance)
            .into_iter()
            .map(|(idx, distance)| (StopId(idx), distance / speed))
            .collect_vec()
    }

    /// edges leaving a node. unknown nodes have no edges.
    pub fn outgoing_edges(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency
            .get(node_id.0)
            .into_iter()
            .flatten()
            .filter_map(|edge_id| self.edges.get(edge_id.0))
    }

    /// all trips leaving `stop_id` at or after `time` (seconds after service-day
    /// midnight), across every route serving the stop. ordered by departure time,
    /// then by arrival at the next stop. the sequence is produced lazily, so callers
    /// may stop reading once they have found what they need. calendars are not
    /// applied here; see [`NetworkModel::trip_runs_on`].
    pub fn trips_departing_after(
        &self,
        stop_id: StopId,
        time: u32,
    ) -> impl Iterator<Item = TripDeparture> + '_ {
        let query = Departure::construct_query(time);
        self.stop_routes
            .get(stop_id.0)
            .into_iter()
            .flatten()
            .filter_map(move |(route_id, position)| {
                let schedule = self.routes.get(route_id.0)?.schedules.get(*position)?;
                let departures = schedule
                    .range(Bound::Included(&query), Bound::Unbounded)
                    .map(move |d| TripDeparture {
                        departure_time: d.departure_time,
                        next_arrival_time: d.next_arrival_time,
                        route_id: *route_id,
                        position: *position,
                        trip_id: d.trip_id,
                    });
                Some(departures)
            })
            .kmerge()
    }

    /// walking transfers leaving a stop
    pub fn transfers_from(&self, stop_id: StopId) -> &[Transfer] {
        self.transfers
            .get(stop_id.0)
            .map(|t| t.as_slice())
            .unwrap_or_default()
    }

    /// true if the trip is in service on the given service date
    pub fn trip_runs_on(&self, trip_id: TripId, date: &NaiveDate) -> bool {
        match self.trips.get(trip_id.0) {
            None => false,
            Some(trip) => match trip.calendar_id {
                None => true,
                Some(calendar_id) => self
                    .calendars
                    .get(calendar_id.0)
                    .map(|c| c.is_active(date))
                    .unwrap_or_default(),
            },
        }
    }
}

impl std::fmt::Debug for NetworkModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkModel")
            .field("coordinate_system", &self.coordinate_system)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("stops", &self.stops.len())
            .field("routes", &self.routes.len())
            .field("trips", &self.trips.len())
            .finish()
    }
}
