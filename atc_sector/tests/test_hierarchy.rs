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
#![allow(unused)]

mod common;
use common::*;

use atc_common::geo::GeoPoint3;
use atc_sector::{config::HandoffConfig, FlightType, NodeId, SectorGraph, SectorType};

// run with "cargo test --test test_hierarchy -- --nocapture"

fn node_id (graph: &SectorGraph, identifier: &str)->NodeId {
    graph.find_by_identifier( identifier).unwrap()
}

fn parent_ids (graph: &SectorGraph, identifier: &str)->Vec<String> {
    graph.parents_of( node_id( graph, identifier)).iter().map( |id| graph.node(*id).unwrap().identifier().to_string()).collect()
}

#[test]
fn test_eddb_hierarchy() {
    let graph = SectorGraph::build( "EDDB", &eddb_sectors(), &HandoffConfig::default(), 1);
    println!("{graph}");

    let unicom = graph.node( graph.unicom()).unwrap();
    assert_eq!( graph.unicom().index(), 0);
    assert!( unicom.is_unicom() && unicom.is_online());
    assert!( unicom.parents().is_empty() && unicom.children().is_empty());

    assert_eq!( graph.roots().len(), 1);
    assert_eq!( graph.node( graph.roots()[0]).unwrap().identifier(), "EDWW_CTR");

    assert_eq!( parent_ids( &graph, "EDDB_APP"), vec!["EDWW_CTR"]);
    assert_eq!( parent_ids( &graph, "EDDB_TWR"), vec!["EDDB_APP"]);
    assert_eq!( parent_ids( &graph, "EDDB_GND"), vec!["EDDB_TWR"]);
    assert_eq!( parent_ids( &graph, "EDDB_DEL"), vec!["EDDB_GND"]);

    // not a deputy of any EDDB position
    assert!( graph.find_by_identifier( "EDDT_TWR").is_none());
}

#[test]
fn test_approach_sibling_merge() {
    let sectors = vec![
        sector( "EDDB", "", "TWR", "120.025", vec![ box_border( "EDDB_TWR", &["EDDB_N_APP", "EDDB_S_APP"], 0.0, 3000.0, 13.4, 52.32, 13.62, 52.4) ]),
        sector( "EDDB", "N", "APP", "119.625", vec![ box_border( "EDDB_N_APP", &[], 0.0, 9000.0, 12.9, 52.36, 14.1, 52.7) ]),
        sector( "EDDB", "S", "APP", "126.425", vec![ box_border( "EDDB_S_APP", &[], 0.0, 9500.0, 12.9, 52.0, 14.1, 52.36) ]),
    ];
    let graph = SectorGraph::build( "EDDB", &sectors, &HandoffConfig::default(), 1);
    println!("{graph}");

    let n = graph.node( node_id( &graph, "EDDB_N_APP")).unwrap();
    let s = graph.node( node_id( &graph, "EDDB_S_APP")).unwrap();
    assert_eq!( n.siblings(), &[s.id()]);
    assert_eq!( s.siblings(), &[n.id()]);

    let mut twr_parents = parent_ids( &graph, "EDDB_TWR");
    twr_parents.sort();
    assert_eq!( twr_parents, vec!["EDDB_N_APP", "EDDB_S_APP"]);
    assert_eq!( graph.roots().len(), 2);
}

#[test]
fn test_feeder_pickup_approach() {
    let sectors = vec![
        sector( "EDDB", "", "TWR", "120.025", vec![ box_border( "EDDB_TWR", &["EDDB_F_APP", "EDDB_P_APP"], 0.0, 3000.0, 13.4, 52.32, 13.62, 52.4) ]),
        sector( "EDDB", "F", "APP", "119.625", vec![ box_border( "EDDB_F_APP", &[], 0.0, 9000.0, 12.9, 52.0, 14.1, 52.7) ]),
        sector( "EDDB", "P", "APP", "126.425", vec![ box_border( "EDDB_P_APP", &[], 0.0, 15000.0, 12.5, 51.8, 14.5, 52.9) ]),
    ];
    let graph = SectorGraph::build( "EDDB", &sectors, &HandoffConfig::default(), 1);
    println!("{graph}");

    let feeder = graph.node( node_id( &graph, "EDDB_F_APP")).unwrap();
    assert!( feeder.siblings().is_empty());
    assert_eq!( parent_ids( &graph, "EDDB_F_APP"), vec!["EDDB_P_APP"]);
    assert_eq!( parent_ids( &graph, "EDDB_TWR"), vec!["EDDB_F_APP"]);
    assert_eq!( graph.node( graph.roots()[0]).unwrap().identifier(), "EDDB_P_APP");
}

#[test]
fn test_unrelated_approach_is_detached() {
    let sectors = vec![
        sector( "EDDB", "", "TWR", "120.025", vec![ box_border( "EDDB_TWR", &["EDDB_APP", "EDBM_APP"], 0.0, 3000.0, 13.4, 52.32, 13.62, 52.4) ]),
        sector( "EDDB", "", "APP", "119.625", vec![ box_border( "EDDB_APP", &[], 0.0, 9000.0, 12.9, 52.0, 14.1, 52.7) ]),
        sector( "EDBM", "", "APP", "123.500", vec![ box_border( "EDBM_APP", &[], 0.0, 5000.0, 11.5, 51.9, 12.9, 52.4) ]),
    ];
    let graph = SectorGraph::build( "EDDB", &sectors, &HandoffConfig::default(), 1);
    println!("{graph}");

    assert_eq!( parent_ids( &graph, "EDDB_TWR"), vec!["EDDB_APP"]);

    let edbm = graph.node( node_id( &graph, "EDBM_APP")).unwrap();
    assert!( !edbm.is_attached());
    assert!( edbm.parents().is_empty() && edbm.children().is_empty());
}

#[test]
fn test_tower_below_departure_and_approach() {
    let sectors = vec![
        sector( "EDDB", "", "TWR", "120.025", vec![ box_border( "EDDB_TWR", &["EDDB_DEP", "EDDB_APP"], 0.0, 3000.0, 13.4, 52.32, 13.62, 52.4) ]),
        sector( "EDDB", "", "DEP", "120.625", vec![ box_border( "EDDB_DEP", &["EDDB_APP"], 0.0, 5000.0, 13.3, 52.2, 13.8, 52.5) ]),
        sector( "EDDB", "", "APP", "119.625", vec![ box_border( "EDDB_APP", &[], 0.0, 9000.0, 12.9, 52.0, 14.1, 52.7) ]),
    ];
    let graph = SectorGraph::build( "EDDB", &sectors, &HandoffConfig::default(), 1);
    println!("{graph}");

    assert_eq!( parent_ids( &graph, "EDDB_DEP"), vec!["EDDB_APP"]);
    assert_eq!( parent_ids( &graph, "EDDB_TWR"), vec!["EDDB_DEP", "EDDB_APP"]);

    let twr = node_id( &graph, "EDDB_TWR");
    assert!( graph.is_ancestor_of( node_id( &graph, "EDDB_APP"), twr));
    assert!( !graph.is_ancestor_of( twr, node_id( &graph, "EDDB_APP")));
}

#[test]
fn test_unknown_airport_degrades_to_unicom() {
    let graph = SectorGraph::build( "XXXX", &eddb_sectors(), &HandoffConfig::default(), 1);
    println!("{graph}");

    assert!( graph.is_degenerate());
    assert!( graph.roots().is_empty());

    let f = flight( "DLH1", 13.5, 52.36, 1000.0, 90.0, 150.0, FlightType::Departure);
    assert!( graph.find_lowest_sector_from_roots( &f, &f.position, false).is_none());
}

#[test]
fn test_lowest_sector() {
    let graph = SectorGraph::build( "EDDB", &eddb_sectors(), &HandoffConfig::default(), 1);
    let resolve = |flight: &atc_sector::FlightSnapshot, ignore_clearance: bool| {
        graph.find_lowest_sector_from_roots( flight, &flight.position, ignore_clearance)
            .map( |id| graph.node(id).unwrap().identifier().to_string())
    };

    // delivery only covers departures that still need a clearance
    let dep = flight( "DLH1", 13.51, 52.37, 100.0, 0.0, 0.0, FlightType::Departure);
    assert_eq!( resolve( &dep, false).as_deref(), Some("EDDB_DEL"));
    let cleared = dep.clone().with_clearance( true);
    assert_eq!( resolve( &cleared, false).as_deref(), Some("EDDB_GND"));
    assert_eq!( resolve( &cleared, true).as_deref(), Some("EDDB_DEL"));
    let arr = flight( "DLH2", 13.51, 52.37, 100.0, 0.0, 0.0, FlightType::Arrival);
    assert_eq!( resolve( &arr, true).as_deref(), Some("EDDB_GND"));

    assert_eq!( resolve( &flight( "DLH3", 13.45, 52.33, 1000.0, 0.0, 150.0, FlightType::Arrival), false).as_deref(), Some("EDDB_TWR"));
    assert_eq!( resolve( &flight( "DLH4", 13.45, 52.33, 5000.0, 0.0, 200.0, FlightType::Arrival), false).as_deref(), Some("EDDB_APP"));
    assert_eq!( resolve( &flight( "DLH5", 14.50, 52.33, 5000.0, 0.0, 250.0, FlightType::Arrival), false).as_deref(), Some("EDWW_CTR"));
    assert_eq!( resolve( &flight( "DLH6", 16.00, 52.33, 5000.0, 0.0, 250.0, FlightType::Arrival), false), None);

    // starting below the root only searches that sub-hierarchy
    let twr = node_id( &graph, "EDDB_TWR");
    let f = flight( "DLH7", 13.45, 52.33, 5000.0, 0.0, 200.0, FlightType::Arrival);
    assert!( graph.find_lowest_sector( twr, &f, &f.position, false).is_none());
}

#[test]
fn test_stale_node_ids() {
    let config = HandoffConfig::default();
    let g1 = SectorGraph::build( "EDDB", &eddb_sectors(), &config, 1);
    let g2 = SectorGraph::build( "EDDB", &eddb_sectors(), &config, 2);

    let id1 = node_id( &g1, "EDDB_TWR");
    assert!( g2.node( id1).is_none());
    assert_eq!( g2.node( node_id( &g2, "EDDB_TWR")).unwrap().sector_type(), SectorType::Tower);
}

#[test]
fn test_multi_level_center() {
    let sectors = vec![
        sector( "EDWW", "", "CTR", "134.125", vec![ box_border( "EDWW_CTR", &[], 0.0, 24500.0, 11.0, 51.0, 15.5, 54.0) ]),
        sector( "EDBB", "", "CTR", "128.475", vec![ box_border( "EDBB_CTR", &["EDWW_CTR"], 0.0, 24500.0, 12.0, 51.5, 15.0, 53.5) ]),
        sector( "EDDB", "", "APP", "119.625", vec![ box_border( "EDDB_APP", &["EDBB_CTR"], 0.0, 9000.0, 12.9, 52.0, 14.1, 52.7) ]),
        sector( "EDDB", "", "TWR", "120.025", vec![ box_border( "EDDB_TWR", &["EDDB_APP"], 0.0, 3000.0, 13.40, 52.32, 13.62, 52.40) ]),
    ];
    let graph = SectorGraph::build( "EDDB", &sectors, &HandoffConfig::default(), 1);
    println!("{graph}");

    let roots: Vec<&str> = graph.roots().iter().map( |id| graph.node(*id).unwrap().identifier()).collect();
    assert_eq!( roots, vec!["EDWW_CTR"]);
    assert!( parent_ids( &graph, "EDWW_CTR").is_empty());
    assert_eq!( parent_ids( &graph, "EDBB_CTR"), vec!["EDWW_CTR"]);
    assert_eq!( parent_ids( &graph, "EDDB_APP"), vec!["EDBB_CTR"]);
    assert_eq!( parent_ids( &graph, "EDDB_TWR"), vec!["EDDB_APP"]);
    assert!( graph.is_ancestor_of( node_id( &graph, "EDWW_CTR"), node_id( &graph, "EDDB_TWR")));

    let resolve = |lon: f64, lat: f64| {
        let f = flight( "DLH1", lon, lat, 12000.0, 0.0, 300.0, FlightType::Arrival);
        graph.find_lowest_sector_from_roots( &f, &f.position, false).map( |id| graph.node(id).unwrap().identifier().to_string())
    };
    assert_eq!( resolve( 13.5, 52.36).as_deref(), Some("EDBB_CTR"));
    assert_eq!( resolve( 11.5, 52.36).as_deref(), Some("EDWW_CTR"));
}
