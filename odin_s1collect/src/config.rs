/*
 * Copyright © 2026, United States Government, as represented by the Administrator of 
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

use std::{net::{Ipv4Addr, SocketAddr}, path::{Path,PathBuf}, time::Duration};
use serde::{Serialize,Deserialize};

use odin_common::fs::filepath_contents_as_string;
use crate::errors::{OdinS1Error, Result};

pub const ESA_LISTING_URL: &str = "https://sentinel.esa.int/web/sentinel/missions/sentinel-1/observation-scenario/acquisition-segments";
pub const ESA_BASE_URL: &str = "https://sentinel.esa.int";
pub const ASF_SEARCH_URL: &str = "https://api.daac.asf.alaska.edu/services/search/param";

/// configuration shared by catalog builder, query tool and server
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct S1CollectConfig {
    /// page that links the current acquisition plan KML documents
    pub listing_url: String,
    /// site root for relative document links
    pub document_base_url: String,
    /// listing sections (div classes) to collect document links from, one per satellite unit
    pub unit_classes: Vec<String>,
    /// per document cache of parsed segments, disabled if not set
    pub cache_dir: Option<PathBuf>,
    pub snapshot_path: PathBuf,
    pub granule_search_url: String,
    pub sock_addr: SocketAddr,
    pub request_timeout_secs: u64,
}

impl Default for S1CollectConfig {
    fn default () -> Self {
        S1CollectConfig {
            listing_url: ESA_LISTING_URL.to_string(),
            document_base_url: ESA_BASE_URL.to_string(),
            unit_classes: vec!["sentinel-1a".to_string()],
            cache_dir: Some( PathBuf::from("cache/s1collect")),
            snapshot_path: PathBuf::from("data/s1collect/collection.geojson"),
            granule_search_url: ASF_SEARCH_URL.to_string(),
            sock_addr: SocketAddr::from( (Ipv4Addr::LOCALHOST, 9010)),
            request_timeout_secs: 60,
        }
    }
}

impl S1CollectConfig {
    pub fn request_timeout (&self) -> Duration {
        Duration::from_secs( self.request_timeout_secs)
    }
}

/// load a RON config file. Fields missing in the file keep their default values
pub fn load_config<P: AsRef<Path>> (path: P) -> Result<S1CollectConfig> {
    let path = path.as_ref();
    let contents = filepath_contents_as_string( &path)
        .map_err( |e| OdinS1Error::ConfigError( format!("failed to read {:?}: {}", path, e)))?;
    ron::from_str( &contents).map_err( |e| OdinS1Error::ConfigError( format!("invalid config {:?}: {}", path, e)))
}

/// the config from `path` if given, the built-in defaults otherwise
pub fn config_or_default<P: AsRef<Path>> (path: Option<P>) -> Result<S1CollectConfig> {
    match path {
        Some(path) => load_config( path),
        None => Ok( S1CollectConfig::default())
    }
}
