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

/// query a Sentinel-1 collect catalog snapshot from the command line

use std::{path::PathBuf, sync::Arc};
use anyhow::Result;
use clap::{Parser, Subcommand};
use odin_s1collect::{
    config_or_default, init_env_tracing, AsfGranuleResolver, CollectService, FileSnapshotStore, SnapshotHandle,
    source::http_client
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "show next planned Sentinel-1 collect for a location or reference scene")]
pub struct Args {
    /// RON config file (built-in defaults if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// snapshot file to query (overrides config)
    #[arg(short,long)]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub query: Query,
}

#[derive(Subcommand, Debug)]
pub enum Query {
    /// next interferometrically valid collect for a scene or product id
    Scene {
        scene_id: String
    },
    /// next collect covering a location
    Location {
        #[arg(long, allow_negative_numbers=true)]
        lon: f64,

        #[arg(long, allow_negative_numbers=true)]
        lat: f64,

        /// acquisition mode (e.g. IW)
        #[arg(short,long)]
        mode: Option<String>,
    },
}

#[tokio::main]
async fn main()->Result<()> {
    init_env_tracing();
    let args = Args::parse();

    let config = config_or_default( args.config.as_ref())?;
    let store = FileSnapshotStore::new( args.snapshot.as_ref().unwrap_or( &config.snapshot_path));
    let snapshot = SnapshotHandle::load( Arc::new(store))?;
    let resolver = AsfGranuleResolver::new( http_client( config.request_timeout())?, &config.granule_search_url);
    let service = CollectService::new( snapshot, Arc::new(resolver));

    let answer = match &args.query {
        Query::Scene { scene_id } => service.next_interferometric_collect( scene_id).await?,
        Query::Location { lon, lat, mode } => service.next_collect_at_location( *lon, *lat, mode.as_deref())?,
    };
    println!("{}", answer.message);

    Ok(())
}
