// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::copy;
use std::ops::Deref;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;
use tempfile::tempdir;

use crate::error::Fallible;

/// A temporary directory, deleted with its contents when dropped.
pub struct TmpDir {
    path: PathBuf,
    _dir: TempDir,
}

impl Deref for TmpDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

pub fn create_tmp_directory() -> Fallible<TmpDir> {
    let dir = tempdir()?;
    let path = dir.path().canonicalize()?;
    Ok(TmpDir { path, _dir: dir })
}

/// Copy the `./test` fixtures into a temporary directory, so tests can write
/// databases beside them.
pub fn create_tmp_copy_of_test_directory() -> Fallible<TmpDir> {
    let source: PathBuf = PathBuf::from("./test").canonicalize()?;
    let target = create_tmp_directory()?;
    for entry in source.read_dir()? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            if let Some(file_name) = path.file_name() {
                if path.extension().is_none_or(|ext| ext != "db") {
                    copy(&path, target.join(file_name))?;
                }
            }
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_copy_of_test_directory() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        assert!(directory.join("phrases.txt").is_file());
        Ok(())
    }

    #[test]
    fn test_tmp_directory_removed_on_drop() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let path = directory.to_path_buf();
        assert!(path.is_dir());
        drop(directory);
        assert!(!path.exists());
        Ok(())
    }
}
