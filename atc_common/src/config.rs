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

//! RON based configuration support.
//! Configs are plain serde types that are stored as RON files. Since RON does not serialize type paths
//! the caller has to specify the config type

use std::{fs,path::Path};
use lazy_static::lazy_static;
use ron::ser::PrettyConfig;
use serde::{Serialize,Deserialize};

use crate::errors::Result;

lazy_static! {
    /// pretty config we use to write human readable configs
    static ref CONFIG_RON: PrettyConfig = PrettyConfig::new()
        .struct_names(true)
        .compact_arrays(true)
        .depth_limit(6);
}

/// load a RON config from the given pathname
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/// parse a RON config from a string (e.g. embedded or test data)
pub fn config_from_str<C> (s: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    Ok( ron::from_str(s)? )
}

pub fn to_pretty_ron<T> (v: &T)->Result<String> where T: Serialize {
    Ok( ron::ser::to_string_pretty( v, CONFIG_RON.clone())? )
}
