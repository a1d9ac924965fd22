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

//! controller presence tracking

use std::collections::HashSet;
use atc_common::{debug,info,warn};

use crate::{
    control::SectorControl,
    hierarchy::NodeId,
    sector::ControllerInfo
};

/// do two entries denote the same person. Controllers can reconnect with a different identifier or frequency,
/// but their display name stays the same
pub(crate) fn same_controller (a: &ControllerInfo, b: &ControllerInfo)->bool {
    if !a.name.is_empty() && !b.name.is_empty() {
        a.name == b.name
    } else {
        a.callsign() == b.callsign()
    }
}

impl SectorControl {

    /// a controller logged in
    pub fn controller_online (&mut self, info: &ControllerInfo) {
        if info.is_unicom() { return }
        let Some(id) = self.find_controller_node( info) else {
            debug!("no sector for controller {}", info.callsign());
            return
        };
        let entry = self.normalized_entry( id, info);

        // the controller might have been registered for another position before
        let mut emptied: Vec<NodeId> = Vec::new();
        for node in self.graph.nodes_mut() {
            if node.is_unicom() { continue }
            let cs = node.controllers_mut();
            let n = cs.len();
            cs.retain( |c| !(same_controller( c, &entry) && c.identifier != entry.identifier));
            if cs.len() < n && cs.is_empty() { emptied.push( node.id()); }
        }
        self.purge_handoffs( &emptied);

        if let Some(node) = self.graph.node_mut( id) {
            let cs = node.controllers_mut();
            match cs.iter_mut().find( |c| same_controller( c, &entry)) {
                Some(c) => *c = entry,
                None => {
                    debug!("controller {} online at {}", entry.callsign(), entry.identifier);
                    cs.push( entry)
                }
            }
        }
    }

    /// a controller logged out. Unknown controllers are ignored
    pub fn controller_offline (&mut self, info: &ControllerInfo) {
        if info.is_unicom() { return }

        let mut emptied: Vec<NodeId> = Vec::new();
        for node in self.graph.nodes_mut() {
            if node.is_unicom() { continue }
            let cs = node.controllers_mut();
            let n = cs.len();
            cs.retain( |c| !same_controller( c, info));
            let (removed, now_empty) = (cs.len() < n, cs.is_empty());
            if removed {
                debug!("controller {} offline at {}", info.callsign(), node.identifier());
                if now_empty { emptied.push( node.id()); }
            }
        }
        self.purge_handoffs( &emptied);
    }

    /// the controller of this engine instance logged into a (new) position
    pub fn set_own_sector (&mut self, info: &ControllerInfo) {
        let found = self.find_controller_node( info);
        if found.is_some() && found == self.own_sector { return }

        if let (Some(prev), Some(own)) = (self.own_sector, self.own_controller.as_ref()) {
            if let Some(node) = self.graph.node_mut( prev) {
                node.controllers_mut().retain( |c| !same_controller( c, own));
            }
        }

        let Some(id) = found else {
            warn!("no sector for own controller {}", info.callsign());
            self.own_sector = None;
            self.own_controller = Some( info.clone());
            return
        };

        let entry = self.normalized_entry( id, info);
        if let Some(node) = self.graph.node_mut( id) {
            let cs = node.controllers_mut();
            cs.retain( |c| !same_controller( c, &entry));
            cs.push( entry.clone());
        }

        self.own_sector = Some(id);
        self.own_controller = Some(entry);
        self.handoffs.retain( |_,e| e.next_sector != id);
        info!("own sector is now {}", self.identifier_of( id));
    }

    /// three stage lookup: sector identifier, frequency, display name with matching callsign prefix and suffix
    pub(crate) fn find_controller_node (&self, info: &ControllerInfo)->Option<NodeId> {
        let positions = || self.graph.nodes().filter( |n| !n.is_unicom());

        positions().find( |n| n.identifier() == info.identifier)
            .or_else( || {
                if info.frequency.is_empty() { return None }
                positions().find( |n| n.sector().frequency() == info.frequency)
            })
            .or_else( || {
                if info.name.is_empty() { return None }
                positions().find( |n| {
                    n.sector().prefix() == info.prefix && n.sector().suffix() == info.suffix &&
                    n.controllers().iter().any( |c| c.name == info.name)
                })
            })
            .map( |n| n.id())
    }

    /// the entry we store for a controller at a node always carries the identifier of the node's sector
    fn normalized_entry (&self, id: NodeId, info: &ControllerInfo)->ControllerInfo {
        let mut entry = info.clone();
        if let Some(node) = self.graph.node( id) {
            entry.identifier = node.identifier().to_string();
        }
        entry
    }

    /// drop pending handoffs whose target lost its last controller
    fn purge_handoffs (&mut self, emptied: &[NodeId]) {
        if emptied.is_empty() { return }
        let emptied: HashSet<NodeId> = emptied.iter().copied().collect();

        self.handoffs.retain( |cs,e| {
            let keep = !emptied.contains( &e.next_sector);
            if !keep { debug!("dropped handoff of {} to position without controller", cs); }
            keep
        });
    }
}
