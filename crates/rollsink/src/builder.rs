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

use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::{Config, FlushPolicy, Result, Writer};

/// Builder for [`Writer`].
pub struct WriterBuilder {
    config: Config,
}

impl WriterBuilder {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            config: Config::new(directory),
        }
    }

    /// Maximum size of each log file in bytes. `0` = unbounded.
    #[must_use]
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    /// Maximum age of a file before rotation. Zero = never time-rotate.
    #[must_use]
    pub fn max_file_lifetime(mut self, lifetime: Duration) -> Self {
        self.config.max_file_lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn flush(mut self, policy: FlushPolicy) -> Self {
        self.config.flush = policy;
        self
    }

    /// Capacity of the bounded record queue. Must be non-zero.
    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Replace the default file naming function. `f` must produce a
    /// collision-free name on every call.
    #[must_use]
    pub fn file_name<F>(mut self, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.config.file_name = Arc::new(f);
        self
    }

    /// Validate the configuration, create the directory, and start the
    /// writer.
    pub fn build(self) -> Result<Writer> {
        Writer::new(self.config)
    }
}
