/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
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

use std::fs::{self,File};
use std::io::{self,Read,Write,ErrorKind};
use std::path::{Path,PathBuf};
use std::process;

use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(ErrorKind::PermissionDenied, "dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

pub fn filepath_contents_as_string <P: AsRef<Path>> (path: &P) -> Result<String> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut contents = String::with_capacity(len as usize);
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// the sibling path we use to stage new contents for `path` before renaming
pub fn staging_path (path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let fname = filename(&path).ok_or( io_error!(ErrorKind::InvalidInput, "not a file path {:?}", path))?;
    Ok( path.with_file_name( format!(".{}.{}.tmp", fname, process::id())) )
}

/// replace the contents of the file at `path` so that concurrent readers either see the old or the new
/// contents, never a partially written file.
/// New contents are written to a staging file in the same directory, synced and then renamed, which
/// is atomic as long as both are on the same filesystem. If anything fails before the rename the
/// original file is left untouched.
pub fn replace_file_contents (path: impl AsRef<Path>, new_contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() && !dir.as_os_str().is_empty() {
        ensure_writable_dir(dir)?;
    }

    let tmp_path = staging_path(path)?;
    let res = write_synced( &tmp_path, new_contents).and_then( |_| fs::rename( &tmp_path, path));
    if res.is_err() {
        let _ = fs::remove_file( &tmp_path); // don't leave stale staging files behind
    }
    res
}

fn write_synced (path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.flush()?;
    file.sync_all()
}
