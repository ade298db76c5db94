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

//! Sentinel-1 collect catalog: answers "when is the next planned acquisition that covers a location,
//! or that can be interferometrically paired with a given scene".
//!
//! The catalog is built from the ESA acquisition plan KML documents ([`builder`]), persisted as a
//! GeoJSON snapshot ([`snapshot`]) and queried through a [`CollectService`] that is used by both the
//! command line tool and the web server ([`web`])

use tracing_subscriber::EnvFilter;

pub mod errors;
pub use errors::{OdinS1Error, Result};

pub mod segment;
pub mod catalog;
pub mod source;
pub mod builder;
pub mod snapshot;
pub mod filter;
pub mod granule;
pub mod matcher;
pub mod service;
pub mod config;
pub mod web;

pub use segment::AcquisitionSegment;
pub use catalog::Catalog;
pub use builder::CatalogBuilder;
pub use snapshot::{SnapshotStore, FileSnapshotStore, SnapshotHandle};
pub use filter::{QueryShape, SegmentFilter, filter};
pub use granule::{GranuleResolver, AsfGranuleResolver, SceneReference};
pub use matcher::{CollectQuery, MatchResult, match_by_location, match_by_scene};
pub use service::{CollectService, CollectAnswer};
pub use config::{S1CollectConfig, load_config, config_or_default};

/// install a fmt subscriber that is controlled by RUST_LOG. This is a no-op if there already is a global subscriber
pub fn init_env_tracing () {
    let _ = tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .try_init();
}
