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

//! sector hierarchy and handoff decision engine for tower/approach controller positions.
//!
//! Given the sector definitions of an airport's surroundings this crate builds a hierarchy of controller
//! positions ([`hierarchy::SectorGraph`]), tracks which positions are staffed and decides for every flight
//! which position should be responsible for it next ([`control::SectorControl`])

pub mod errors;
pub mod sector;
pub mod flight;
pub mod config;
pub mod hierarchy;
pub mod resolver;
pub mod presence;
pub mod handoff;
pub mod control;

pub use control::SectorControl;
pub use hierarchy::{NodeId,SectorGraph};
pub use sector::{ControllerInfo,Sector,SectorBorder,SectorType,UNICOM_ID};
pub use flight::{FlightSnapshot,FlightType};
pub use config::{HandoffConfig,SectorSet};
