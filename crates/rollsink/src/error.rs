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

use std::{io, path::PathBuf};

use snafu::Snafu;

/// Writer operation errors.
///
/// Only construction errors and the final flush+sync at close propagate to
/// callers; everything the worker hits mid-stream is contained and logged.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// Configuration rejected at construction.
    #[snafu(display("invalid configuration: {message}"))]
    InvalidConfig { message: String },

    /// Target directory could not be created.
    #[snafu(display("failed to create log directory {}", path.display()))]
    CreateDirectory { path: PathBuf, source: io::Error },

    /// The background worker thread could not be spawned.
    #[snafu(display("failed to spawn writer worker thread"))]
    SpawnWorker { source: io::Error },

    /// `write` was called after `close` began.
    #[snafu(display("writer is closing"))]
    Closing,

    /// A new log file could not be created during rotation.
    #[snafu(display("failed to create log file {}", path.display()))]
    CreateFile { path: PathBuf, source: io::Error },

    /// Buffered data could not be flushed to the file.
    #[snafu(display("failed to flush log file {}", path.display()))]
    Flush { path: PathBuf, source: io::Error },

    /// The file could not be synced to disk.
    #[snafu(display("failed to sync log file {}", path.display()))]
    Sync { path: PathBuf, source: io::Error },

    /// The worker thread panicked before `close` could join it.
    #[snafu(display("writer worker thread panicked"))]
    WorkerPanicked,
}

/// Result type for writer operations.
pub type Result<T> = std::result::Result<T, Error>;
