use crate::util::Result;

mod memory;
mod posix_env;

pub use memory::MemorySource;
pub use posix_env::{PosixEnv, PosixLogger};

/// An Env is an interface used by the converter to reach operating system
/// functionality like the filesystem.  Callers may provide a custom Env to
/// read images from somewhere other than local files.
pub trait Env {
    /// The returned source is read by one encoder at a time.
    fn new_byte_source(&self, fname: &str) -> Result<Box<dyn ByteSource>>;

    /// Creates (or truncates) the named output.
    fn new_line_sink(&self, fname: &str) -> Result<Box<dyn LineSink>>;

    fn new_logger(&self, fname: &str) -> Result<Box<dyn Logger>>;
    fn file_exists(&self, fname: &str) -> bool;
    fn get_file_size(&self, fname: &str) -> Result<u64>;
    fn remove_file(&self, fname: &str) -> Result<()>;
}

/// A finite, seekable run of bytes with a known length.
pub trait ByteSource {
    fn seek(&mut self, offset: u32) -> Result<()>;

    /// Reads into `dst` from the current position and returns the number of
    /// bytes read.  Fewer than `dst.len()` bytes means end of data.
    fn read(&mut self, dst: &mut [u8]) -> Result<usize>;

    fn len(&self) -> u32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Receives output records in order, one per line.  The implementation
/// terminates each line.
pub trait LineSink {
    fn add_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

impl LineSink for Vec<String> {
    fn add_line(&mut self, line: &str) -> Result<()> {
        self.push(line.to_owned());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

pub trait Logger {
    fn log(&self, info: &str);
}
