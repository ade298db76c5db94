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

/// serve Sentinel-1 collect queries over HTTP

use std::{path::PathBuf, sync::Arc};
use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use odin_s1collect::{
    config_or_default, init_env_tracing, AsfGranuleResolver, CollectService, FileSnapshotStore, SnapshotHandle,
    source::http_client, web
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "serve next planned Sentinel-1 collect queries")]
pub struct Args {
    /// RON config file (built-in defaults if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main()->Result<()> {
    init_env_tracing();
    let args = Args::parse();

    let config = config_or_default( args.config.as_ref())?;
    let snapshot = SnapshotHandle::load( Arc::new( FileSnapshotStore::new( &config.snapshot_path)))?;
    let resolver = AsfGranuleResolver::new( http_client( config.request_timeout())?, &config.granule_search_url);
    let service = Arc::new( CollectService::new( snapshot, Arc::new(resolver)));

    let listener = TcpListener::bind( config.sock_addr).await?;
    println!("serving collect queries on http://{}{}", config.sock_addr, web::BASE_PATH);
    web::serve( service, listener).await?;

    Ok(())
}
