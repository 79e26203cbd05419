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

use std::{fmt, path::PathBuf, sync::Arc, time::Duration};

use snafu::ensure;

use crate::{
    Result,
    error::InvalidConfigSnafu,
    path::{FileNameFn, default_file_name},
};

/// Queue capacity used when none is configured.
pub(crate) const DEFAULT_QUEUE_CAPACITY: usize = 4096;

/// When the worker flushes and syncs the current file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Flush and sync after every record. Maximum durability, slowest.
    EveryRecord,
    /// Let the buffer accumulate; flush only on rotation and close.
    OnRotation,
}

/// Immutable writer configuration, validated once at construction.
#[derive(Clone)]
pub struct Config {
    /// Directory log files are written to. Created recursively if absent.
    pub directory: PathBuf,
    /// Maximum size of each log file in bytes. `0` = unbounded. No file
    /// grows past this; a single record larger than this is skipped
    /// entirely rather than split.
    pub max_file_size: u64,
    /// Maximum age of a file before rotation. Zero = never time-rotate.
    pub max_file_lifetime: Duration,
    /// Flush behavior of the worker.
    pub flush: FlushPolicy,
    /// Capacity of the bounded record queue. Producers block once it fills.
    pub queue_capacity: usize,
    /// Naming function for newly created files. Must not produce
    /// collisions; see [`default_file_name`].
    pub file_name: FileNameFn,
}

impl Config {
    /// Configuration with defaults for the given directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(self.queue_capacity > 0, InvalidConfigSnafu {
            message: "queue_capacity must be non-zero",
        });
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./logs"),
            max_file_size: 0,
            max_file_lifetime: Duration::ZERO,
            flush: FlushPolicy::OnRotation,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            file_name: Arc::new(default_file_name),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("directory", &self.directory)
            .field("max_file_size", &self.max_file_size)
            .field("max_file_lifetime", &self.max_file_lifetime)
            .field("flush", &self.flush)
            .field("queue_capacity", &self.queue_capacity)
            .finish_non_exhaustive()
    }
}
