use super::ByteSource;
use crate::util::{Error, Result};

/// A `ByteSource` over an owned buffer.
pub struct MemorySource {
    contents: Vec<u8>,
    pos: usize,
}

impl MemorySource {
    pub fn new(contents: Vec<u8>) -> Self {
        Self { contents, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl From<&[u8]> for MemorySource {
    fn from(contents: &[u8]) -> Self {
        Self::new(contents.to_vec())
    }
}

impl ByteSource for MemorySource {
    fn seek(&mut self, offset: u32) -> Result<()> {
        let offset = offset as usize;
        if offset > self.contents.len() {
            return Err(Error::source_unavailable(&format!(
                "in-memory source seek to {:X}h past end {:X}h",
                offset,
                self.contents.len()
            )));
        }
        self.pos = offset;
        Ok(())
    }

    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        let available = &self.contents[self.pos..];
        let n = dst.len().min(available.len());
        dst[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }

    fn len(&self) -> u32 {
        u32::try_from(self.contents.len()).unwrap_or(u32::MAX)
    }
}
