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

//! position to sector resolution within a [`SectorGraph`]

use atc_common::geo::GeoPoint3;

use crate::{
    flight::FlightSnapshot,
    hierarchy::{NodeId,SectorGraph},
    sector::{Sector,SectorType}
};

/// delivery positions only handle departures that still need a clearance
fn is_rejected (sector: &Sector, flight: &FlightSnapshot, ignore_clearance: bool)->bool {
    sector.sector_type() == SectorType::Delivery && (!flight.is_departure() || (flight.clearance_issued && !ignore_clearance))
}

impl SectorGraph {

    /// the lowest node in the sub-hierarchy of `id` (including `id` itself) that contains `pos` and
    /// accepts the flight. Children are searched before their parent
    pub fn find_lowest_sector (&self, id: NodeId, flight: &FlightSnapshot, pos: &GeoPoint3, ignore_clearance: bool)->Option<NodeId> {
        let node = self.node(id)?;

        for child in node.children() {
            if let Some(found) = self.find_lowest_sector( *child, flight, pos, ignore_clearance) {
                return Some(found)
            }
        }

        if node.sector().contains( pos) && !is_rejected( node.sector(), flight, ignore_clearance) {
            Some(id)
        } else {
            None
        }
    }

    fn accepts (&self, id: NodeId, flight: &FlightSnapshot, pos: &GeoPoint3)->bool {
        self.node(id).is_some_and( |n| n.sector().contains( pos) && !is_rejected( n.sector(), flight, false))
    }

    /// search the whole hierarchy in root order
    pub fn find_lowest_sector_from_roots (&self, flight: &FlightSnapshot, pos: &GeoPoint3, ignore_clearance: bool)->Option<NodeId> {
        self.roots().iter().find_map( |r| self.find_lowest_sector( *r, flight, pos, ignore_clearance))
    }

    /// all candidate nodes below the given ancestor level, closest level first. Each level is the union of the
    /// parents of the previous level. The first non-empty level wins. Parents of the same level that all contain
    /// `pos` are all candidates, which lets the caller choose between e.g. departure and approach
    pub fn find_in_ancestors (&self, id: NodeId, flight: &FlightSnapshot, pos: &GeoPoint3)->Vec<NodeId> {
        let mut visited: Vec<NodeId> = vec![id];
        let mut level: Vec<NodeId> = self.parents_of( id).to_vec();

        while !level.is_empty() {
            let mut candidates: Vec<NodeId> = Vec::new();
            for p in &level {
                if let Some(found) = self.find_lowest_sector( *p, flight, pos, false) {
                    if !candidates.contains( &found) { candidates.push( found) }

                    // a parent that is nested inside another parent of the same level would shadow it
                    if found != *p && level.contains( &found) && self.accepts( *p, flight, pos) && !candidates.contains( p) {
                        candidates.push( *p)
                    }
                }
            }
            if !candidates.is_empty() { return candidates }

            visited.extend_from_slice( &level);
            let mut next: Vec<NodeId> = Vec::new();
            for p in &level {
                for pp in self.parents_of( *p) {
                    if !visited.contains( pp) && !next.contains( pp) { next.push( *pp) }
                }
            }
            level = next;
        }

        Vec::new()
    }
}
