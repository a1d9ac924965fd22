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

//! common foundation types and utilities for the ATC sector crates: normalized angles,
//! geodetic points and polygons, unit helpers, RON config loading and the central logging macros

pub mod macros;
pub mod errors;
pub mod angle;
pub mod geo;
pub mod uom;
pub mod datetime;
pub mod config;

// re-exported so that our logging macros can be expanded in crates that don't depend on tracing
pub use tracing;

use tracing_subscriber::EnvFilter;

/// initialize a `tracing` fmt subscriber that takes its max level from the RUST_LOG env var.
/// This is meant to be called by executables - library code should never set the global subscriber.
/// Note this only succeeds if there is no global subscriber set yet, otherwise the call is ignored
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .try_init();
}

/// relative difference of two non-negative magnitudes, 0.0 if both are zero
#[inline]
pub fn relative_difference (a: f64, b: f64)->f64 {
    let max = a.abs().max( b.abs());
    if max == 0.0 { 0.0 } else { (a - b).abs() / max }
}
