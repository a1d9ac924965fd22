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

//! the sector control engine of one controller position.
//!
//! [`SectorControl`] owns the sector hierarchy of an airport, the own sector pointer and all per-flight state.
//! It is driven by three kinds of events that are all processed synchronously from the host's tick:
//!   - controller presence changes ([`SectorControl::controller_online`], [`SectorControl::controller_offline`],
//!     [`SectorControl::set_own_sector`])
//!   - flight updates ([`SectorControl::update_flight`], [`SectorControl::remove_flight`])
//!   - manual controller actions ([`SectorControl::handoff_performed`], [`SectorControl::handoff_sector_select`])
//!
//! All other methods are side effect free queries. Queries for unknown flights or sectors return fallback values
//! (UNICOM, empty lists, false) instead of errors

use std::{collections::{HashMap,HashSet},fmt};
use atc_common::{debug,info,warn};

use crate::{
    config::HandoffConfig,
    flight::FlightSnapshot,
    handoff::{FlightState,HandoffEntry},
    hierarchy::{NodeId,SectorGraph},
    sector::{ControllerInfo,Sector}
};

pub struct SectorControl {
    pub(crate) config: HandoffConfig,
    pub(crate) graph: SectorGraph,
    pub(crate) own_sector: Option<NodeId>,
    pub(crate) own_controller: Option<ControllerInfo>,
    pub(crate) flights: HashMap<String,FlightState>,
    pub(crate) handoffs: HashMap<String,HandoffEntry>,
}

impl SectorControl {
    pub fn new (airport: &str, sectors: &[Sector], config: HandoffConfig)->Self {
        let graph = SectorGraph::build( airport, sectors, &config, 1);

        SectorControl {
            config,
            graph,
            own_sector: None,
            own_controller: None,
            flights: HashMap::new(),
            handoffs: HashMap::new(),
        }
    }

    /// replace the hierarchy with one for a new airport and/or sector set. All flight and handoff state is
    /// dropped, online controllers and the own sector are carried over if they still have a position
    pub fn reinitialize (&mut self, airport: &str, sectors: &[Sector]) {
        let own = self.own_controller.take();
        let online: Vec<ControllerInfo> = self.graph.nodes()
            .filter( |n| !n.is_unicom())
            .flat_map( |n| n.controllers().iter())
            .filter( |c| own.as_ref().is_none_or( |o| !crate::presence::same_controller( o, c)))
            .cloned()
            .collect();

        self.graph = SectorGraph::build( airport, sectors, &self.config, self.graph.generation() + 1);
        self.own_sector = None;
        self.flights.clear();
        self.handoffs.clear();
        info!("reinitialized sector control for {}", airport);

        for c in &online { self.controller_online( c); }
        if let Some(own) = own { self.set_own_sector( &own); }
    }

    pub fn config (&self)->&HandoffConfig { &self.config }
    pub fn graph (&self)->&SectorGraph { &self.graph }
    pub fn airport (&self)->&str { self.graph.airport() }

    pub fn own_sector_id (&self)->Option<NodeId> { self.own_sector }

    /// the own position, UNICOM if we don't have one
    pub fn own_sector (&self)->ControllerInfo {
        match (&self.own_controller, self.own_sector) {
            (Some(info), Some(_)) => info.clone(),
            _ => self.unicom_info()
        }
    }

    pub fn handoff (&self, callsign: &str)->Option<&HandoffEntry> { self.handoffs.get( callsign) }

    pub fn flight_state (&self, callsign: &str)->Option<&FlightState> { self.flights.get( callsign) }

    fn unicom_info (&self)->ControllerInfo {
        self.graph.node( self.graph.unicom()).map( |n| n.controller_info()).unwrap_or_default()
    }

    //--- sector membership

    pub fn is_in_sector (&self, flight: &FlightSnapshot)->bool {
        self.flights.get( &flight.callsign).and_then( |s| s.sector).is_some()
    }

    pub fn is_in_own_sector (&self, flight: &FlightSnapshot)->bool {
        self.own_sector.is_some() && self.flights.get( &flight.callsign).and_then( |s| s.sector) == self.own_sector
    }

    /// the position the flight was in at its last update
    pub fn flight_sector (&self, flight: &FlightSnapshot)->Option<ControllerInfo> {
        self.flights.get( &flight.callsign)
            .and_then( |s| s.sector)
            .and_then( |id| self.graph.node(id))
            .map( |n| n.sector().controller_info())
    }

    pub fn sector (&self, identifier: &str)->Option<ControllerInfo> {
        self.graph.find_by_identifier( identifier)
            .and_then( |id| self.graph.node(id))
            .map( |n| n.sector().controller_info())
    }

    pub fn online_controllers (&self, identifier: &str)->Vec<ControllerInfo> {
        self.graph.find_by_identifier( identifier)
            .and_then( |id| self.graph.node(id))
            .map( |n| n.controllers().to_vec())
            .unwrap_or_default()
    }

    //--- handoff queries and actions

    pub fn handoff_required (&self, flight: &FlightSnapshot)->bool {
        self.handoffs.get( &flight.callsign).is_some_and( |e| !e.performed)
    }

    pub fn handoff_possible (&self, flight: &FlightSnapshot)->bool {
        self.handoff_required( flight) || (flight.tracked_by_me && self.handoff_sectors().iter().any( |c| !c.is_unicom()))
    }

    /// the controller a handoff of this flight goes to, UNICOM if there is none
    pub fn handoff_sector (&self, flight: &FlightSnapshot)->ControllerInfo {
        self.handoffs.get( &flight.callsign)
            .and_then( |e| self.graph.node( e.next_sector))
            .map( |n| n.controller_info())
            .unwrap_or_else( || self.unicom_info())
    }

    pub fn handoff_target_identifier (&self, flight: &FlightSnapshot)->Option<String> {
        self.handoffs.get( &flight.callsign).map( |e| self.identifier_of( e.next_sector).to_string())
    }

    /// callsigns of the controllers at the handoff target of this flight
    pub fn handoff_stations (&self, flight: &FlightSnapshot)->Vec<String> {
        self.handoffs.get( &flight.callsign)
            .and_then( |e| self.graph.node( e.next_sector))
            .filter( |n| !n.is_unicom())
            .map( |n| n.controllers().iter().map( |c| c.callsign()).collect())
            .unwrap_or_default()
    }

    /// mark the handoff of this flight as done. The entry is removed once the flight has left the own sector
    /// and is not tracked by us anymore
    pub fn handoff_performed (&mut self, flight: &FlightSnapshot) {
        if let Some(entry) = self.handoffs.get_mut( &flight.callsign) {
            entry.performed = true;
            entry.flight = flight.clone();
            debug!("handoff of {} performed", flight.callsign);
        }
    }

    /// manually set the handoff target of a flight. This overrides automatic target computation until the
    /// handoff is completed or the flight is removed. Returns false if the target is unknown or our own sector
    pub fn handoff_sector_select (&mut self, flight: &FlightSnapshot, identifier: &str)->bool {
        let Some(target) = self.graph.find_by_identifier( identifier) else {
            warn!("unknown handoff target {} for {}", identifier, flight.callsign);
            return false
        };
        if Some(target) == self.own_sector { return false }

        let entry = self.handoffs.entry( flight.callsign.clone()).or_insert_with( || HandoffEntry::new( flight.clone(), target));
        entry.flight = flight.clone();
        entry.next_sector = target;
        entry.manually_changed = true;
        entry.performed = false;

        info!("handoff target of {} manually set to {}", flight.callsign, identifier);
        true
    }

    /// all positions we could hand off to, ordered by ascending authority. UNICOM is always the last entry
    pub fn handoff_sectors (&self)->Vec<ControllerInfo> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut nodes: Vec<_> = self.graph.nodes()
            .filter( |n| !n.is_unicom() && Some(n.id()) != self.own_sector && n.is_online())
            .filter( |n| seen.insert( n.identifier().to_string()))
            .collect();
        nodes.sort_by( |a,b| a.sector_type().cmp( &b.sector_type()).then_with( || a.identifier().cmp( b.identifier())));

        let mut list: Vec<ControllerInfo> = nodes.into_iter().map( |n| n.controller_info()).collect();
        list.push( self.unicom_info());
        list
    }

    //--- handover of the own position to another controller

    pub fn sector_handover_possible (&self)->bool {
        self.own_sector.and_then( |id| self.graph.node(id)).is_some_and( |n| n.controllers().len() > 1)
    }

    /// the other controllers that are logged into our own position
    pub fn sector_handover_candidates (&self)->Vec<ControllerInfo> {
        let Some(node) = self.own_sector.and_then( |id| self.graph.node(id)) else { return Vec::new() };

        node.controllers().iter()
            .filter( |c| self.own_controller.as_ref().is_none_or( |o| !crate::presence::same_controller( o, c)))
            .cloned()
            .collect()
    }

    /// the handover candidate with the given callsign
    pub fn sector_handover (&self, callsign: &str)->Option<ControllerInfo> {
        self.sector_handover_candidates().into_iter().find( |c| c.callsign() == callsign)
    }
}

impl fmt::Display for SectorControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}", self.graph)?;
        if let Some(own) = &self.own_controller {
            writeln!( f, "own sector: {}", own)?;
        }
        for (cs,e) in &self.handoffs {
            writeln!( f, "handoff {} -> {}{}", cs, self.identifier_of( e.next_sector), if e.performed {" (performed)"} else {""})?;
        }
        Ok(())
    }
}
