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

//! the sector hierarchy graph and its construction.
//!
//! Nodes are stored in an arena that is owned by the [`SectorGraph`] and addressed by [`NodeId`] handles.
//! Parent, child and sibling relations are handle lists. Each graph has a generation that is part of its
//! handles so that handles which survive a re-build of the graph do not resolve to unrelated nodes.
//!
//! The builder turns an unordered set of [`Sector`] definitions into a hierarchy for one airport:
//!   1. select the airport's own tower, ground and delivery sectors (by callsign prefix)
//!   2. collect the deputies of those sectors
//!   3. turn deputies into candidate nodes (center level deputies and unrelated approach facilities excluded)
//!   4. group candidates into sibling groups (same position split over several frequencies)
//!   5. chain sibling groups top down according to authority
//!   6. attach the center level positions above the topmost group
//!
//! The synthetic UNICOM node is always present and is the terminal fallback if nobody is responsible

use std::{cmp::Ordering,collections::{HashSet,VecDeque},fmt};
use atc_common::{debug,info,warn,relative_difference};

use crate::{
    config::HandoffConfig,
    sector::{ControllerInfo,Sector,SectorType}
};

/// handle of a node within a specific [`SectorGraph`] generation
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub struct NodeId {
    generation: u32,
    index: u32,
}

impl NodeId {
    pub fn generation (&self)->u32 { self.generation }
    pub fn index (&self)->usize { self.index as usize }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!( f, "#{}.{}", self.generation, self.index) }
}

/* #region Node ***************************************************************************************************/

#[derive(Debug)]
pub struct Node {
    id: NodeId,
    sector: Sector,
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
    siblings: Vec<NodeId>,
    controllers: Vec<ControllerInfo>, // more than one means a handover between controllers of this position
    always_online: bool,
    attached: bool, // reachable from the roots (detached nodes are deputies we only track presence for)
}

impl Node {
    fn new (id: NodeId, sector: Sector, attached: bool)->Self {
        Node {
            id, sector,
            parents: Vec::new(),
            children: Vec::new(),
            siblings: Vec::new(),
            controllers: Vec::new(),
            always_online: false,
            attached
        }
    }

    pub fn id (&self)->NodeId { self.id }
    pub fn sector (&self)->&Sector { &self.sector }
    pub fn sector_type (&self)->SectorType { self.sector.sector_type() }
    pub fn identifier (&self)->&str { self.sector.identifier() }
    pub fn parents (&self)->&[NodeId] { self.parents.as_slice() }
    pub fn children (&self)->&[NodeId] { self.children.as_slice() }
    pub fn siblings (&self)->&[NodeId] { self.siblings.as_slice() }
    pub fn controllers (&self)->&[ControllerInfo] { self.controllers.as_slice() }
    pub fn is_attached (&self)->bool { self.attached }
    pub fn is_unicom (&self)->bool { self.always_online }

    pub fn is_online (&self)->bool { self.always_online || !self.controllers.is_empty() }

    /// the logged in controller if there is one, the position itself otherwise
    pub fn controller_info (&self)->ControllerInfo {
        self.controllers.first().cloned().unwrap_or_else( || self.sector.controller_info())
    }

    pub(crate) fn controllers_mut (&mut self)->&mut Vec<ControllerInfo> { &mut self.controllers }
}

/* #endregion Node */

/* #region SectorGraph ********************************************************************************************/

pub struct SectorGraph {
    generation: u32,
    airport: String,
    nodes: Vec<Node>,   // nodes[0] is always UNICOM
    roots: Vec<NodeId>,
}

impl SectorGraph {
    /// a graph that only contains the UNICOM node
    pub fn unicom_only (airport: &str, config: &HandoffConfig, generation: u32)->Self {
        let id = NodeId { generation, index: 0 };
        let mut unicom = Node::new( id, Sector::unicom( &config.unicom_frequency), false);
        unicom.always_online = true;

        SectorGraph {
            generation,
            airport: airport.to_string(),
            nodes: vec![unicom],
            roots: Vec::new(),
        }
    }

    /// build the hierarchy of the given airport from a set of sectors that can cover any number of facilities
    pub fn build (airport: &str, sectors: &[Sector], config: &HandoffConfig, generation: u32)->Self {
        HierarchyBuilder::new( airport, sectors, config).build( generation)
    }

    pub fn generation (&self)->u32 { self.generation }
    pub fn airport (&self)->&str { self.airport.as_str() }
    pub fn unicom (&self)->NodeId { self.nodes[0].id }
    pub fn roots (&self)->&[NodeId] { self.roots.as_slice() }

    /// true if there are no real positions (only UNICOM)
    pub fn is_degenerate (&self)->bool { self.nodes.len() == 1 }

    pub fn len (&self)->usize { self.nodes.len() }

    pub fn node (&self, id: NodeId)->Option<&Node> {
        if id.generation == self.generation { self.nodes.get( id.index()) } else { None }
    }

    pub(crate) fn node_mut (&mut self, id: NodeId)->Option<&mut Node> {
        if id.generation == self.generation { self.nodes.get_mut( id.index()) } else { None }
    }

    pub fn nodes (&self)->impl Iterator<Item=&Node> { self.nodes.iter() }

    pub(crate) fn nodes_mut (&mut self)->impl Iterator<Item=&mut Node> { self.nodes.iter_mut() }

    pub fn find_by_identifier (&self, identifier: &str)->Option<NodeId> {
        self.nodes.iter().find( |n| n.identifier() == identifier).map( |n| n.id)
    }

    pub fn is_ancestor_of (&self, ancestor: NodeId, id: NodeId)->bool {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue: VecDeque<NodeId> = VecDeque::from( self.parents_of( id).to_vec());
        while let Some(p) = queue.pop_front() {
            if p == ancestor { return true }
            if visited.insert(p) { queue.extend( self.parents_of(p)) }
        }
        false
    }

    pub fn parents_of (&self, id: NodeId)->&[NodeId] {
        self.node(id).map( |n| n.parents()).unwrap_or( &[])
    }

    pub fn children_of (&self, id: NodeId)->&[NodeId] {
        self.node(id).map( |n| n.children()).unwrap_or( &[])
    }

    fn add_node (&mut self, sector: Sector, attached: bool)->NodeId {
        let id = NodeId { generation: self.generation, index: self.nodes.len() as u32 };
        self.nodes.push( Node::new( id, sector, attached));
        id
    }

    fn link (&mut self, parent: NodeId, child: NodeId) {
        if parent == child { return }
        let pn = &mut self.nodes[parent.index()];
        if !pn.children.contains( &child) { pn.children.push( child) }
        let cn = &mut self.nodes[child.index()];
        if !cn.parents.contains( &parent) { cn.parents.push( parent) }
    }

    fn fmt_subtree (&self, f: &mut fmt::Formatter<'_>, id: NodeId, level: usize, visited: &mut HashSet<NodeId>)->fmt::Result {
        let node = &self.nodes[id.index()];
        write!( f, "{:indent$}{}", "", node.sector, indent = level*2)?;
        if !node.controllers.is_empty() {
            let names: Vec<String> = node.controllers.iter().map( |c| c.callsign()).collect();
            write!( f, " online: {}", names.join(","))?;
        }
        if !visited.insert( id) {
            return writeln!( f, " ...")
        }
        writeln!( f)?;
        for c in &node.children {
            self.fmt_subtree( f, *c, level+1, visited)?;
        }
        Ok(())
    }
}

impl fmt::Display for SectorGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!( f, "sector hierarchy of {} (generation {}):", self.airport, self.generation)?;
        let mut visited: HashSet<NodeId> = HashSet::new();
        for r in &self.roots {
            self.fmt_subtree( f, *r, 1, &mut visited)?;
        }

        let detached: Vec<&Node> = self.nodes.iter().skip(1).filter( |n| !n.attached).collect();
        if !detached.is_empty() {
            writeln!( f, "deputies outside hierarchy:")?;
            for n in detached { writeln!( f, "  {}", n.sector)?; }
        }
        Ok(())
    }
}

/* #endregion SectorGraph */

/* #region HierarchyBuilder ***************************************************************************************/

/// top down order of sectors: higher authority first, then more borders, then higher ceiling
fn cmp_authority (a: &Sector, b: &Sector)->Ordering {
    b.sector_type().cmp( &a.sector_type())
        .then_with( || b.borders().len().cmp( &a.borders().len()))
        .then_with( || b.highest_altitude_feet().total_cmp( &a.highest_altitude_feet()))
}

/// authority order that keeps positions of the same facility (callsign prefix) together
fn cmp_grouped_authority (a: &Sector, b: &Sector)->Ordering {
    b.sector_type().cmp( &a.sector_type())
        .then_with( || a.prefix().cmp( b.prefix()))
        .then_with( || b.borders().len().cmp( &a.borders().len()))
        .then_with( || b.highest_altitude_feet().total_cmp( &a.highest_altitude_feet()))
}

/// consecutive candidates of the same type that represent the same logical position
struct SiblingGroup {
    sector_type: SectorType,
    prefix: String,
    nodes: Vec<NodeId>,
}

struct HierarchyBuilder<'a> {
    airport: &'a str,
    sectors: &'a [Sector],
    config: &'a HandoffConfig,
}

impl<'a> HierarchyBuilder<'a> {
    fn new (airport: &'a str, sectors: &'a [Sector], config: &'a HandoffConfig)->Self {
        HierarchyBuilder { airport, sectors, config }
    }

    fn sector (&self, identifier: &str)->Option<&'a Sector> {
        self.sectors.iter().find( |s| s.identifier() == identifier)
    }

    fn build (&self, generation: u32)->SectorGraph {
        let mut graph = SectorGraph::unicom_only( self.airport, self.config, generation);

        let own = self.own_sectors();
        if own.is_empty() {
            warn!("no sectors found for airport {}, using UNICOM only", self.airport);
            return graph
        }

        let candidates = self.candidates( &own);
        let groups = self.sibling_groups( &mut graph, &candidates);
        self.link_groups( &mut graph, &groups);
        graph.roots = self.attach_center_levels( &mut graph, &groups);
        self.add_detached_deputies( &mut graph);

        info!("built sector hierarchy for {} with {} nodes in {} sibling groups", self.airport, graph.len()-1, groups.len());
        graph
    }

    /// the tower, ground and delivery positions of our airport
    fn own_sectors (&self)->Vec<&'a Sector> {
        self.sectors.iter().filter( |s| {
            s.prefix() == self.airport && 
            matches!( s.sector_type(), SectorType::Tower | SectorType::Ground | SectorType::Delivery)
        }).collect()
    }

    fn candidates (&self, own: &[&'a Sector])->Vec<&'a Sector> {
        let is_own = |id: &str| own.iter().any( |s| s.identifier() == id);

        let mut deputies: Vec<&str> = Vec::new();
        for s in own {
            for d in s.all_deputies() {
                if !is_own(d) && !deputies.contains( &d) { deputies.push( d) }
            }
        }

        let mut sorted: Vec<&'a Sector> = self.sectors.iter().collect();
        sorted.sort_by( |a,b| cmp_authority( a, b));

        let mut candidates: Vec<&'a Sector> = Vec::new();
        let mut approach_prefix: Option<&str> = None;

        for s in sorted {
            if !deputies.contains( &s.identifier()) { continue }
            if s.sector_type().is_center_level() { continue } // attached above the root later

            if s.sector_type() == SectorType::Approach {
                match approach_prefix {
                    None => approach_prefix = Some( s.prefix()),
                    Some(prefix) if prefix != s.prefix() => {
                        debug!("ignoring approach deputy {} of unrelated facility", s.identifier());
                        continue
                    }
                    _ => {}
                }
            }

            if !candidates.iter().any( |c| c.identifier() == s.identifier()) {
                candidates.push( s)
            }
        }

        for s in own {
            if !candidates.iter().any( |c| c.identifier() == s.identifier()) {
                candidates.push( *s)
            }
        }

        candidates.sort_by( |a,b| cmp_grouped_authority( a, b));
        candidates
    }

    fn is_sibling (&self, a: &Sector, b: &Sector)->bool {
        if a.sector_type() != b.sector_type() { return false }

        match a.sector_type() {
            SectorType::Approach => {
                relative_difference( a.highest_altitude_feet(), b.highest_altitude_feet()) <= self.config.sibling_altitude_tolerance
            }
            SectorType::Departure | SectorType::Tower | SectorType::Ground => a.prefix() == b.prefix(),
            _ => false
        }
    }

    /// create nodes for all (sorted) candidates and merge consecutive siblings into groups
    fn sibling_groups (&self, graph: &mut SectorGraph, candidates: &[&'a Sector])->Vec<SiblingGroup> {
        let mut groups: Vec<SiblingGroup> = Vec::new();
        let mut last: Option<&Sector> = None;

        for s in candidates {
            let id = graph.add_node( (*s).clone(), true);

            let merge = last.is_some_and( |prev| self.is_sibling( prev, s));
            match groups.last_mut() {
                Some(group) if merge => group.nodes.push( id),
                _ => groups.push( SiblingGroup{ sector_type: s.sector_type(), prefix: s.prefix().to_string(), nodes: vec![id] })
            }
            last = Some( *s);
        }

        for group in &groups {
            for id in &group.nodes {
                graph.nodes[id.index()].siblings = group.nodes.iter().filter( |n| *n != id).copied().collect();
            }
            if group.nodes.len() > 1 {
                let ids: Vec<&str> = group.nodes.iter().map( |id| graph.nodes[id.index()].identifier()).collect();
                debug!("sibling group {}", ids.join(","));
            }
        }

        groups
    }

    fn link_groups (&self, graph: &mut SectorGraph, groups: &[SiblingGroup]) {
        let find_group = |t: SectorType, prefix: &str| {
            groups.iter().position( |g| g.sector_type == t && g.prefix == prefix)
        };

        let mut upper_tail: Option<usize> = None;   // lowest group above tower level so far
        let mut last_approach: Option<usize> = None;

        for (i,group) in groups.iter().enumerate() {
            // positions up to tower level do not chain, they hang below the lowest departure/approach group.
            // If that is a departure we also attach to the lowest approach so that arrivals have a parent
            let tail_parents = || {
                let mut parents: Vec<usize> = upper_tail.into_iter().collect();
                if let (Some(tail),Some(app)) = (upper_tail,last_approach) {
                    if tail != app && groups[tail].sector_type == SectorType::Departure { parents.push( app) }
                }
                parents
            };

            let parents: Vec<usize> = match group.sector_type {
                SectorType::Ground => {
                    find_group( SectorType::Tower, &group.prefix).map( |p| vec![p]).unwrap_or_else( tail_parents)
                }
                SectorType::Delivery => {
                    find_group( SectorType::Ground, &group.prefix)
                        .or_else( || find_group( SectorType::Tower, &group.prefix))
                        .map( |p| vec![p])
                        .unwrap_or_else( tail_parents)
                }
                t if t > SectorType::Tower => upper_tail.into_iter().collect(),
                _ => tail_parents()
            };

            for p in parents {
                for parent in &groups[p].nodes {
                    for child in &group.nodes {
                        graph.link( *parent, *child);
                    }
                }
            }

            if group.sector_type > SectorType::Tower {
                upper_tail = Some(i);
                if group.sector_type == SectorType::Approach { last_approach = Some(i); }
            }
        }
    }

    /// wrap center level deputies of the topmost group around the hierarchy and return the resulting roots
    fn attach_center_levels (&self, graph: &mut SectorGraph, groups: &[SiblingGroup])->Vec<NodeId> {
        let Some(top) = groups.first() else { return Vec::new() };
        let mut roots: Vec<NodeId> = top.nodes.clone();

        let mut queue: VecDeque<&'a str> = VecDeque::new();
        if let Some(sector) = self.sector( graph.nodes[top.nodes[0].index()].identifier()) {
            queue.extend( sector.deputies().iter().map( |d| d.as_str()));
        }

        let mut visited: HashSet<&str> = HashSet::new();
        while let Some(identifier) = queue.pop_front() {
            if !visited.insert( identifier) || graph.find_by_identifier( identifier).is_some() { continue }

            if let Some(sector) = self.sector( identifier) {
                if sector.sector_type().is_center_level() {
                    let id = graph.add_node( sector.clone(), true);
                    for r in &roots { graph.link( id, *r); }
                    debug!("attached {} above {} root node(s)", identifier, roots.len());
                    roots = vec![id];
                    queue.extend( sector.deputies().iter().map( |d| d.as_str()));
                }
            }
        }

        roots
    }

    /// deputies that are not part of the hierarchy still need presence tracking so that we can fall back to them.
    /// Delivery configurations sometimes skip a level, hence we also add deputies of delivery deputies
    fn add_detached_deputies (&self, graph: &mut SectorGraph) {
        let mut wanted: Vec<&'a str> = Vec::new();
        for node in graph.nodes.iter().skip(1) {
            let Some(sector) = self.sector( node.identifier()) else { continue };
            wanted.extend( sector.all_deputies());

            if node.sector_type() == SectorType::Delivery {
                for d in sector.deputies() {
                    if let Some(ds) = self.sector( d) { wanted.extend( ds.deputies().iter().map( |d| d.as_str())); }
                }
            }
        }

        for identifier in wanted {
            if graph.find_by_identifier( identifier).is_none() {
                if let Some(sector) = self.sector( identifier) {
                    debug!("tracking deputy {} outside of hierarchy", identifier);
                    graph.add_node( sector.clone(), false);
                }
            }
        }
    }
}

/* #endregion HierarchyBuilder */
