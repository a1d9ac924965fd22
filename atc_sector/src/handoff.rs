/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the per-flight, per-tick handoff decision process

use atc_common::{debug,geo::GeoPoint3,uom::distance_travelled};

use crate::{
    control::SectorControl,
    flight::FlightSnapshot,
    hierarchy::{NodeId,SectorGraph},
    sector::SectorType
};

/// the decision that a flight should be transferred from the own sector to `next_sector`
#[derive(Debug,Clone)]
pub struct HandoffEntry {
    pub(crate) manually_changed: bool,
    pub(crate) performed: bool,
    pub(crate) flight: FlightSnapshot,
    pub(crate) next_sector: NodeId,
}

impl HandoffEntry {
    pub(crate) fn new (flight: FlightSnapshot, next_sector: NodeId)->Self {
        HandoffEntry { manually_changed: false, performed: false, flight, next_sector }
    }

    pub fn is_manually_changed (&self)->bool { self.manually_changed }
    pub fn is_performed (&self)->bool { self.performed }
    pub fn flight (&self)->&FlightSnapshot { &self.flight }
    pub fn next_sector (&self)->NodeId { self.next_sector }
}

/// what we remember about a flight between ticks
#[derive(Debug,Clone,Default)]
pub struct FlightState {
    /// lowest enclosing node of the last update, ignoring clearance state
    pub(crate) sector: Option<NodeId>,

    /// controller that initiated a handoff while the flight was outside the own sector
    pub(crate) initiated_by: Option<String>,
}

impl FlightState {
    pub fn sector (&self)->Option<NodeId> { self.sector }
    pub fn initiated_by (&self)->Option<&str> { self.initiated_by.as_deref() }
}

/// the online node that is responsible in lieu of `id`: the node itself if it has controllers, otherwise the
/// first online deputy of its first border (for delivery also deputies of deputies). UNICOM if nobody is online
pub fn online_substitute (graph: &SectorGraph, id: NodeId)->NodeId {
    let Some(node) = graph.node(id) else { return graph.unicom() };
    if node.is_online() { return id }

    let is_delivery = node.sector_type() == SectorType::Delivery;
    for deputy in node.sector().deputies() {
        if let Some(dn) = graph.find_by_identifier( deputy).and_then( |did| graph.node(did)) {
            if dn.is_online() { return dn.id() }
            if is_delivery {
                for dd in dn.sector().deputies() {
                    if let Some(ddn) = graph.find_by_identifier( dd).and_then( |ddid| graph.node(ddid)) {
                        if ddn.is_online() { return ddn.id() }
                    }
                }
            }
        }
    }

    graph.unicom()
}

impl SectorControl {

    /// run one handoff tick for the given flight
    pub fn update_flight (&mut self, flight: &FlightSnapshot) {
        let callsign = flight.callsign.as_str();
        let current = self.graph.find_lowest_sector_from_roots( flight, &flight.position, true);
        self.flights.entry( callsign.to_string()).or_default().sector = current;

        let Some(own) = self.own_sector else {
            self.flights.entry( callsign.to_string()).or_default().initiated_by = None;
            return
        };
        let own_is_delivery = self.graph.node(own).is_some_and( |n| n.sector_type() == SectorType::Delivery);

        let responsible = self.graph.find_lowest_sector_from_roots( flight, &flight.position, own_is_delivery);
        let inside_own = responsible == Some(own);

        if let Some(entry) = self.handoffs.get( callsign) {
            if entry.performed && !flight.tracked_by_me && !inside_own {
                debug!("handoff of {} to {} completed", callsign, self.identifier_of( entry.next_sector));
                self.handoffs.remove( callsign);
                return
            }
            if entry.performed || entry.manually_changed {
                if let Some(entry) = self.handoffs.get_mut( callsign) { entry.flight = flight.clone(); }
                return
            }
        }

        {
            let state = self.flights.entry( callsign.to_string()).or_default();
            state.initiated_by = if inside_own { None } else { flight.handoff_initiated_by.clone().or( state.initiated_by.take()) };
        }

        if !(flight.tracked_by_me || inside_own) { return }

        let predicted = self.predict_position( flight, own_is_delivery);
        if self.graph.find_lowest_sector_from_roots( flight, &predicted, false) == Some(own) {
            if self.handoffs.remove( callsign).is_some() {
                debug!("{} remains in own sector, handoff dropped", callsign);
            }
            return
        }

        let next = online_substitute( &self.graph, self.next_responsible( own, flight, &predicted));
        let initiator = self.flights.get( callsign).and_then( |s| s.initiated_by.clone());

        if next == own {
            self.handoffs.remove( callsign);

        } else if initiator.as_deref().is_some_and( |id| id == self.identifier_of( next)) {
            if self.handoffs.remove( callsign).is_some() {
                debug!("handoff of {} already initiated by {}", callsign, self.identifier_of( next));
            }

        } else {
            match self.handoffs.get_mut( callsign) {
                Some(entry) => {
                    entry.flight = flight.clone();
                    entry.next_sector = next;
                }
                None => {
                    debug!("handoff of {} to {} required", callsign, self.identifier_of( next));
                    self.handoffs.insert( callsign.to_string(), HandoffEntry::new( flight.clone(), next));
                }
            }
        }
    }

    /// drop all state we have for this flight. Unknown callsigns are ignored
    pub fn remove_flight (&mut self, callsign: &str) {
        self.flights.remove( callsign);
        if self.handoffs.remove( callsign).is_some() {
            debug!("removed handoff of {}", callsign);
        }
    }

    /// where the flight will be within the prediction horizon. Slow flights are assumed to move with a minimum
    /// speed, delivery decisions do not depend on movement at all
    fn predict_position (&self, flight: &FlightSnapshot, own_is_delivery: bool)->GeoPoint3 {
        if own_is_delivery { return flight.position }

        let cfg = &self.config;
        let distance = if flight.ground_speed < cfg.slow_speed_threshold {
            let speed = if flight.ground_speed < cfg.slow_min_speed { cfg.slow_min_speed } else { flight.ground_speed };
            distance_travelled( speed, cfg.slow_prediction_horizon)
        } else {
            distance_travelled( flight.ground_speed, cfg.prediction_horizon)
        };

        flight.position.destination( flight.heading, distance)
    }

    /// the closest node above `own` that covers the predicted position. Departures prefer departure positions
    /// and arrivals prefer approach positions if several candidates match
    fn next_responsible (&self, own: NodeId, flight: &FlightSnapshot, predicted: &GeoPoint3)->NodeId {
        let candidates = self.graph.find_in_ancestors( own, flight, predicted);

        let preferred = if flight.is_departure() {
            Some(SectorType::Departure)
        } else if flight.is_arrival() {
            Some(SectorType::Approach)
        } else {
            None
        };

        preferred
            .and_then( |t| candidates.iter().find( |id| self.graph.node(**id).is_some_and( |n| n.sector_type() == t)))
            .or( candidates.first())
            .copied()
            .unwrap_or_else( || self.graph.unicom())
    }

    pub(crate) fn identifier_of (&self, id: NodeId)->&str {
        self.graph.node(id).map( |n| n.identifier()).unwrap_or( "")
    }
}
