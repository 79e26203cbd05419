// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Buffered append handle for the active log file.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use snafu::ResultExt;

use crate::{
    Result,
    error::{CreateFileSnafu, FlushSnafu, SyncSnafu},
};

/// The currently open output file behind its buffered writer.
///
/// Records are appended verbatim; the sink imposes no framing or header.
pub(crate) struct LogFile {
    out: BufWriter<File>,
    path: PathBuf,
}

impl LogFile {
    /// Create the file at `path`, truncating anything already there.
    /// Collision-free naming makes the truncation moot in practice.
    pub(crate) fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .context(CreateFileSnafu { path })?;

        Ok(Self {
            out: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Append one record through the buffer.
    pub(crate) fn write(&mut self, record: &[u8]) -> io::Result<()> {
        self.out.write_all(record)
    }

    /// Flush the buffer and fsync the file. The durability barrier: once
    /// this returns, everything appended so far is on disk.
    pub(crate) fn flush_and_sync(&mut self) -> Result<()> {
        self.out.flush().context(FlushSnafu { path: &self.path })?;
        self.out
            .get_ref()
            .sync_all()
            .context(SyncSnafu { path: &self.path })?;
        Ok(())
    }
}
