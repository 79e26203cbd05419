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

//! Background worker that owns all file state.
//!
//! The worker runs on a dedicated thread and receives records from
//! [`Writer::write`](crate::Writer::write) via a bounded crossbeam channel:
//!
//! ```text
//! ┌──────────────┐     crossbeam      ┌──────────────┐    BufWriter   ┌──────────────┐
//! │ Writer::write│ ──── channel ────► │    Worker    │ ─────────────► │   Log File   │
//! │  (producers) │                    │ (bg thread)  │                │    (.log)    │
//! └──────────────┘                    └──────────────┘                └──────────────┘
//! ```
//!
//! It is the only thread that opens, writes to, flushes, or rotates the
//! output file, so the file handle and counters need no synchronization.

use std::{sync::Arc, time::Instant};

use bytes::Bytes;
use crossbeam::channel::Receiver;
use tracing::{debug, error, warn};

use crate::{
    Result,
    config::{Config, FlushPolicy},
    file::LogFile,
};

/// The single consumer of the record queue.
pub(crate) struct Worker {
    /// Incoming records from producers.
    rx: Receiver<Bytes>,
    /// Shared writer configuration.
    config: Arc<Config>,
    /// Currently open output file, if any. Opened lazily on the first
    /// record and replaced on rotation.
    current: Option<LogFile>,
    /// Bytes appended to the current file since it was opened, for
    /// size-based rotation. Reset on rotation only.
    bytes_written: u64,
    /// When the current file was created, for age-based rotation.
    opened_at: Instant,
}

impl Worker {
    pub(crate) fn new(rx: Receiver<Bytes>, config: Arc<Config>) -> Self {
        Self {
            rx,
            config,
            current: None,
            bytes_written: 0,
            opened_at: Instant::now(),
        }
    }

    /// Main run loop.
    ///
    /// Dequeues records until the channel disconnects — which happens only
    /// once [`Writer::close`](crate::Writer::close) has revoked the sender
    /// and every in-flight `write` finished enqueueing — then drains what
    /// is left and performs the final flush+sync. That final result is the
    /// one error `close` surfaces; everything else is contained here.
    pub(crate) fn run(&mut self) -> Result<()> {
        debug!("log writer worker started");

        while let Ok(record) = self.rx.recv() {
            self.handle_record(&record);
        }

        if self.current.is_some() {
            self.flush_and_sync()?;
        }

        debug!("log writer worker stopped");
        Ok(())
    }

    /// Apply rotation checks and append one record.
    ///
    /// Errors are logged and never halt the stream; a single failed write
    /// or rotation must not take the worker down.
    fn handle_record(&mut self, record: &[u8]) {
        if self.current.is_none()
            && let Err(err) = self.rotate()
        {
            error!(error = %err, "failed to create log file, dropping record");
            return;
        }

        let size = record.len() as u64;
        let max_size = self.config.max_file_size;

        // An oversized record is skipped outright: never written, never
        // split, and it does not trigger a rotation.
        if max_size != 0 && size > max_size {
            warn!(size, max_size, "record exceeds maximum file size, skipping");
            return;
        }

        if max_size != 0
            && self.bytes_written + size > max_size
            && let Err(err) = self.rotate()
        {
            error!(error = %err, "failed to rotate log file");
        }

        let lifetime = self.config.max_file_lifetime;
        if !lifetime.is_zero()
            && self.opened_at.elapsed() > lifetime
            && let Err(err) = self.rotate()
        {
            error!(error = %err, "failed to rotate log file");
        }

        if let Some(file) = self.current.as_mut()
            && let Err(err) = file.write(record)
        {
            error!(error = %err, "failed to write record");
        }

        if self.config.flush == FlushPolicy::EveryRecord
            && let Err(err) = self.flush_and_sync()
        {
            error!(error = %err, "failed to flush log file");
        }

        self.bytes_written += size;
    }

    /// Flush and sync the current file, then open a fresh one.
    ///
    /// `current` is only replaced once the new file exists; on failure the
    /// old file stays active, so pending records are delayed rather than
    /// lost. Prior files are never deleted or renamed.
    fn rotate(&mut self) -> Result<()> {
        self.flush_and_sync()?;

        let path = self.config.directory.join((self.config.file_name)());
        let file = LogFile::create(&path)?;
        debug!(path = %path.display(), "rotated to new log file");

        self.current = Some(file);
        self.bytes_written = 0;
        self.opened_at = Instant::now();

        Ok(())
    }

    fn flush_and_sync(&mut self) -> Result<()> {
        match self.current.as_mut() {
            Some(file) => file.flush_and_sync(),
            None => Ok(()),
        }
    }
}
