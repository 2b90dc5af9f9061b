//! Operation executor
//!
//! Performs a single create/read/write/delete against the shared registry
//! and the filesystem. The executor owns everything worker-local: the
//! generator, one block-size scratch buffer, and the result record.
//!
//! Error policy: any I/O failure inside an operation is logged to stderr
//! and abandons only that operation; the affected counters stay untouched
//! and the caller moves on to its next operation.

use crate::config::Config;
use crate::prng::Prng;
use crate::registry::{EmptyRegistry, FileRegistry};
use crate::stats::WorkerStats;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// The four benchmark operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Read,
    Write,
    Create,
    Delete,
}

/// Worker-local operation executor
pub struct Executor {
    config: Arc<Config>,
    registry: Arc<FileRegistry>,
    prng: Prng,
    /// Scratch buffer, exactly one block
    buffer: Vec<u8>,
    stats: WorkerStats,
}

impl Executor {
    pub fn new(config: Arc<Config>, registry: Arc<FileRegistry>, seed: u32) -> Self {
        let block_size = config.workload.block_size as usize;
        Self {
            prng: Prng::new(seed),
            buffer: vec![0u8; block_size],
            stats: WorkerStats::new(),
            config,
            registry,
        }
    }

    /// Draw the next operation from the configured ratios
    pub fn next_operation(&mut self) -> OperationType {
        if self.prng.boolean(self.config.workload.io_dir_ratio) {
            if self.prng.boolean(self.config.workload.read_write_ratio) {
                OperationType::Read
            } else {
                OperationType::Write
            }
        } else if self.prng.boolean(self.config.workload.create_delete_ratio) {
            OperationType::Create
        } else {
            OperationType::Delete
        }
    }

    /// Dispatch one operation
    pub fn execute(&mut self, op: OperationType) {
        match op {
            OperationType::Read => self.read(),
            OperationType::Write => self.write(),
            OperationType::Create => self.create(),
            OperationType::Delete => self.delete(),
        }
    }

    pub fn stats(&self) -> &WorkerStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut WorkerStats {
        &mut self.stats
    }

    pub fn into_stats(self) -> WorkerStats {
        self.stats
    }

    /// Create one file: allocate an identifier, exclusively create the file
    /// it names, fill it with generator bytes, and register the identifier.
    ///
    /// Fallible variant used directly by the initial seeding phase, where a
    /// failure is fatal rather than logged and skipped.
    pub fn create_file(&mut self) -> io::Result<()> {
        let id = self.registry.allocate_id();
        let mut file = OpenOptions::new()
            .create_new(true)
            .append(true)
            .open(self.file_path(id))?;

        let size = self.draw_size(
            self.config.workload.min_file_size,
            self.config.workload.max_file_size,
        );
        let written = self.fill_and_write(&mut file, size)?;
        self.stats.bytes_written += written;

        self.registry.register(id);
        Ok(())
    }

    fn create(&mut self) {
        match self.create_file() {
            Ok(()) => self.stats.create_ops += 1,
            Err(e) => eprintln!("create: {}", e),
        }
    }

    /// Stream one live file through the scratch buffer, counting bytes.
    /// No-op when the registry is empty.
    fn read(&mut self) {
        let dir = &self.config.directory;
        let opened = self
            .registry
            .with_random(&mut self.prng, |id| File::open(dir.join(id.to_string())));

        let mut file = match opened {
            Ok(Ok(file)) => file,
            Ok(Err(e)) => {
                eprintln!("read: open: {}", e);
                return;
            }
            Err(EmptyRegistry) => return,
        };

        let mut bytes = 0u64;
        loop {
            match file.read(&mut self.buffer) {
                Ok(0) => break,
                Ok(n) => bytes += n as u64,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    eprintln!("read: {}", e);
                    return;
                }
            }
        }

        self.stats.bytes_read += bytes;
        self.stats.read_ops += 1;
    }

    /// Append a randomly sized chunk to one live file. No-op when the
    /// registry is empty.
    fn write(&mut self) {
        let dir = &self.config.directory;
        let opened = self.registry.with_random(&mut self.prng, |id| {
            OpenOptions::new().append(true).open(dir.join(id.to_string()))
        });

        let mut file = match opened {
            Ok(Ok(file)) => file,
            Ok(Err(e)) => {
                eprintln!("write: open: {}", e);
                return;
            }
            Err(EmptyRegistry) => return,
        };

        let size = self.draw_size(
            self.config.workload.min_write_size,
            self.config.workload.max_write_size,
        );
        match self.fill_and_write(&mut file, size) {
            Ok(written) => {
                self.stats.bytes_written += written;
                self.stats.write_ops += 1;
            }
            Err(e) => eprintln!("write: {}", e),
        }
    }

    /// Pick-and-remove one identifier in a single critical section, then
    /// unlink its file outside the lock. No-op when the registry is empty.
    fn delete(&mut self) {
        let id = match self.registry.pick_and_remove(&mut self.prng) {
            Ok(id) => id,
            Err(EmptyRegistry) => return,
        };

        match fs::remove_file(self.file_path(id)) {
            Ok(()) => self.stats.delete_ops += 1,
            Err(e) => eprintln!("unlink {}: {}", id, e),
        }
    }

    fn file_path(&self, id: u64) -> PathBuf {
        self.config.directory.join(id.to_string())
    }

    /// Uniform size in `[low, high]`, both inclusive
    fn draw_size(&mut self, low: u64, high: u64) -> u64 {
        u64::from(self.prng.range(low as u32, high as u32 + 1))
    }

    /// Write `size` generator-produced bytes in chunks no larger than the
    /// block size. When block alignment is enabled, `size` is first
    /// truncated down to a block multiple. Returns the bytes written.
    fn fill_and_write(&mut self, file: &mut File, size: u64) -> io::Result<u64> {
        let block_size = self.buffer.len();
        let mut size = size as usize;
        if self.config.workload.block_aligned {
            size -= size % block_size;
        }

        let mut written = 0;
        while size > block_size {
            self.prng.fill_bytes(&mut self.buffer);
            file.write_all(&self.buffer)?;
            written += block_size;
            size -= block_size;
        }

        self.prng.fill_bytes(&mut self.buffer[..size]);
        file.write_all(&self.buffer[..size])?;
        written += size;

        Ok(written as u64)
    }
}
