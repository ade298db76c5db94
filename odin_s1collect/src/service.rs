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

//! the single entry point for collect queries, shared by the command line tool and the web server

use std::sync::Arc;
use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::filter::QueryShape;
use crate::granule::GranuleResolver;
use crate::matcher::{CollectQuery, MatchResult};
use crate::snapshot::SnapshotHandle;
use crate::errors::Result;

/// the outcome of a query together with its human readable message
#[derive(Debug,Clone,PartialEq)]
pub struct CollectAnswer {
    pub query: CollectQuery,
    pub result: MatchResult,
    pub message: String,
}

/// what we send back to clients
#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct CollectMessage {
    pub message: String,
}

impl From<&CollectAnswer> for CollectMessage {
    fn from (answer: &CollectAnswer) -> Self {
        CollectMessage { message: answer.message.clone() }
    }
}

pub struct CollectService {
    snapshot: SnapshotHandle,
    resolver: Arc<dyn GranuleResolver>,
}

impl CollectService {
    pub fn new (snapshot: SnapshotHandle, resolver: Arc<dyn GranuleResolver>) -> Self {
        CollectService { snapshot, resolver }
    }

    pub fn snapshot (&self) -> &SnapshotHandle { &self.snapshot }

    pub fn catalog (&self) -> Arc<Catalog> { self.snapshot.current() }

    /// input is validated before we look at the catalog
    pub fn next_collect_at_location (&self, lon: f64, lat: f64, mode: Option<&str>) -> Result<CollectAnswer> {
        let point = QueryShape::from_lon_lat( lon, lat)?;
        Ok( self.answer( CollectQuery::location( point, mode)) )
    }

    /// resolver failures are returned as errors, there is no degraded answer
    pub async fn next_interferometric_collect (&self, scene_id: &str) -> Result<CollectAnswer> {
        let sref = self.resolver.resolve( scene_id).await?;
        Ok( self.answer( CollectQuery::Scene(sref)) )
    }

    /// replace the current snapshot with the stored one, returning the new number of segments
    pub fn reload (&self) -> Result<usize> {
        self.snapshot.reload()
    }

    fn answer (&self, query: CollectQuery) -> CollectAnswer {
        let catalog = self.snapshot.current();
        let result = query.evaluate( &catalog);
        let message = query.message( &result);
        debug!("{:?} -> {}", query, result);

        CollectAnswer { query, result, message }
    }
}
