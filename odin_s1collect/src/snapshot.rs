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

//! persistence of catalog snapshots and the handle through which queries see the current one

use std::{path::{Path,PathBuf}, sync::{Arc,PoisonError,RwLock}};
use tracing::{info,warn};

use odin_common::fs::{filepath_contents_as_string, replace_file_contents};
use crate::catalog::Catalog;
use crate::errors::{OdinS1Error, Result};

/// where catalog snapshots live. Implementations have to guarantee that `load` never observes a
/// partially stored snapshot
pub trait SnapshotStore: Send + Sync {
    fn load (&self) -> Result<Catalog>;

    fn store (&self, catalog: &Catalog) -> Result<()>;
}

/// a snapshot stored as a GeoJSON file
#[derive(Debug,Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new (path: impl AsRef<Path>) -> Self {
        FileSnapshotStore { path: path.as_ref().to_path_buf() }
    }

    pub fn path (&self) -> &Path { &self.path }
}

impl SnapshotStore for FileSnapshotStore {
    fn load (&self) -> Result<Catalog> {
        let contents = filepath_contents_as_string( &self.path)
            .map_err( |e| OdinS1Error::SnapshotError( format!("failed to read snapshot {:?}: {}", self.path, e)))?;
        let catalog = Catalog::from_geojson_str( &contents)?;
        info!("loaded snapshot {:?} with {} segments", self.path, catalog.len());
        Ok(catalog)
    }

    /// write to a staging file and rename, i.e. readers see either the old or the new snapshot
    fn store (&self, catalog: &Catalog) -> Result<()> {
        let contents = catalog.to_geojson_string()?;
        replace_file_contents( &self.path, contents.as_bytes())
            .map_err( |e| OdinS1Error::SnapshotError( format!("failed to store snapshot {:?}: {}", self.path, e)))?;
        info!("stored snapshot {:?} with {} segments", self.path, catalog.len());
        Ok(())
    }
}

/// in-process snapshot store, e.g. for services that get their catalog pushed
#[derive(Debug,Default)]
pub struct MemorySnapshotStore {
    catalog: RwLock<Option<Catalog>>,
}

impl MemorySnapshotStore {
    pub fn new (catalog: Catalog) -> Self {
        MemorySnapshotStore { catalog: RwLock::new( Some(catalog)) }
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load (&self) -> Result<Catalog> {
        self.catalog.read().unwrap_or_else( PoisonError::into_inner)
            .clone()
            .ok_or( OdinS1Error::SnapshotError("no snapshot stored".to_string()))
    }

    fn store (&self, catalog: &Catalog) -> Result<()> {
        *self.catalog.write().unwrap_or_else( PoisonError::into_inner) = Some( catalog.clone());
        Ok(())
    }
}

/// explicit, shareable reference to the current catalog snapshot.
/// Queries obtain the current snapshot as an `Arc<Catalog>` and keep using it even if a concurrent
/// `reload` replaces it. The lock is only held to swap or clone the `Arc`
pub struct SnapshotHandle {
    store: Arc<dyn SnapshotStore>,
    current: RwLock<Arc<Catalog>>,
}

impl SnapshotHandle {
    /// load the initial snapshot from the store
    pub fn load (store: Arc<dyn SnapshotStore>) -> Result<Self> {
        let catalog = store.load()?;
        Ok( SnapshotHandle { store, current: RwLock::new( Arc::new(catalog)) } )
    }

    pub fn current (&self) -> Arc<Catalog> {
        self.current.read().unwrap_or_else( PoisonError::into_inner).clone()
    }

    /// replace the current snapshot with whatever is in the store now. If loading fails the current
    /// snapshot stays in place. Returns the number of segments of the new snapshot
    pub fn reload (&self) -> Result<usize> {
        match self.store.load() {
            Ok(catalog) => {
                let len = catalog.len();
                *self.current.write().unwrap_or_else( PoisonError::into_inner) = Arc::new(catalog);
                Ok(len)
            }
            Err(e) => {
                warn!("snapshot reload failed, keeping current snapshot: {e}");
                Err(e)
            }
        }
    }
}
