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

/// build a new Sentinel-1 collect catalog from the current ESA acquisition plans and store it as snapshot

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use odin_s1collect::{
    config_or_default, init_env_tracing, CatalogBuilder, FileSnapshotStore,
    source::{http_client, EsaListing, HttpFetcher}
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "build Sentinel-1 collect catalog snapshot from ESA acquisition plans")]
pub struct Args {
    /// RON config file (built-in defaults if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// do not use (or update) cached documents
    #[arg(long)]
    pub no_cache: bool,

    /// snapshot file to write (overrides config)
    #[arg(short,long)]
    pub output: Option<PathBuf>,
}

#[tokio::main]
async fn main()->Result<()> {
    init_env_tracing();
    let args = Args::parse();

    let config = config_or_default( args.config.as_ref())?;
    let client = http_client( config.request_timeout())?;

    let listing = EsaListing::new( client.clone(), &config.listing_url, &config.document_base_url, config.unit_classes.clone());
    let mut builder = CatalogBuilder::new( listing, HttpFetcher::new( client));
    if !args.no_cache && let Some(cache_dir) = &config.cache_dir {
        builder = builder.with_cache_dir( cache_dir)?;
    }

    let store = FileSnapshotStore::new( args.output.as_ref().unwrap_or( &config.snapshot_path));
    let catalog = builder.build_and_store( &store).await?;

    println!("stored {} segments to {:?}", catalog.len(), store.path());
    if let (Some(first), Some(last)) = (catalog.first_begin_date(), catalog.max_end_date()) {
        println!("catalog covers {} .. {}", first, last);
    }

    Ok(())
}
