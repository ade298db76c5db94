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

//! building catalog snapshots from the current mission planning documents

use std::path::Path;
use chrono::{DateTime,Utc};
use tracing::{debug,info};

use odin_common::datetime::{utc_now, iso8601_millis_string};
use crate::catalog::Catalog;
use crate::segment::{AcquisitionSegment, parse_kml};
use crate::snapshot::SnapshotStore;
use crate::source::{DocumentCache, DocumentFetcher, SourceListing, document_name};
use crate::errors::{OdinS1Error, Result};

/// the steps to create a new catalog: discover source documents, fetch (or reuse cached) documents,
/// parse, aggregate, deduplicate, drop segments that begin before the build time and sort.
/// All failures are fatal - a build either produces a complete catalog or nothing
pub struct CatalogBuilder<L,F> where L: SourceListing, F: DocumentFetcher {
    listing: L,
    fetcher: F,
    cache: Option<DocumentCache>,
}

impl<L,F> CatalogBuilder<L,F> where L: SourceListing, F: DocumentFetcher {
    pub fn new (listing: L, fetcher: F) -> Self {
        CatalogBuilder { listing, fetcher, cache: None }
    }

    /// reuse documents that were already parsed by a previous run
    pub fn with_cache_dir (mut self, dir: impl AsRef<Path>) -> Result<Self> {
        self.cache = Some( DocumentCache::new(dir)?);
        Ok(self)
    }

    pub async fn build (&self) -> Result<Catalog> {
        self.build_at( utc_now()).await
    }

    /// build with a fixed reference time. The time is captured once so that the temporal filter is
    /// consistent across all documents of this build
    pub async fn build_at (&self, build_time: DateTime<Utc>) -> Result<Catalog> {
        let urls = self.listing.source_urls().await?;
        if urls.is_empty() {
            return Err( OdinS1Error::ListingError("no source documents".to_string()))
        }
        info!("building catalog for {} from {} source documents", iso8601_millis_string(&build_time), urls.len());

        let mut segments: Vec<AcquisitionSegment> = Vec::new();
        for url in &urls {
            let mut doc_segments = self.document_segments( url).await?;
            segments.append( &mut doc_segments);
        }

        let n_total = segments.len();
        let catalog = Catalog::from_sources( segments, build_time);
        info!("catalog has {} of {} parsed segments (duplicates and past segments removed)", catalog.len(), n_total);

        Ok(catalog)
    }

    /// build a new catalog and persist it. The store is only touched if the build succeeded
    pub async fn build_and_store (&self, store: &dyn SnapshotStore) -> Result<Catalog> {
        let catalog = self.build().await?;
        store.store( &catalog)?;
        Ok(catalog)
    }

    async fn document_segments (&self, url: &str) -> Result<Vec<AcquisitionSegment>> {
        let doc_name = document_name( url)?;

        if let Some(cache) = &self.cache && let Some(segments) = cache.get( &doc_name) {
            debug!("using {} cached segments of {}", segments.len(), doc_name);
            return Ok(segments)
        }

        let doc = self.fetcher.fetch( url).await?;
        let segments = parse_kml( &doc).map_err( |e| e.in_context( &doc_name))?;
        debug!("parsed {} segments from {}", segments.len(), doc_name);

        if let Some(cache) = &self.cache {
            cache.put( &doc_name, &segments)?;
        }

        Ok(segments)
    }
}
