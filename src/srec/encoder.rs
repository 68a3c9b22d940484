use std::sync::Arc;

use super::{
    format::{format_data_record, format_footer, HEADER_RECORD},
    resolve_address_width, AddressWidth,
};
use crate::{
    config::{EncodingConfig, MAX_LINE_LENGTH},
    env::{ByteSource, LineSink, Logger},
    util::{Error, Result},
};

/// What one `RangeEncoder::encode` call produced.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EncodeSummary {
    /// Data records only.
    pub record_count: u32,
    /// Width after promotion.
    pub address_width: AddressWidth,
    pub max_address: u32,
    /// Data records plus any header and footer lines.
    pub lines_written: u32,
}

/// Encodes one byte range of a source as S-records.
///
/// `encode` consumes the encoder; a new request needs a new encoder.
pub struct RangeEncoder {
    config: EncodingConfig,
    info_log: Option<Arc<dyn Logger>>,
}

impl RangeEncoder {
    pub fn new(config: EncodingConfig) -> Self {
        Self {
            config,
            info_log: None,
        }
    }

    pub fn with_info_log(mut self, info_log: Arc<dyn Logger>) -> Self {
        self.info_log = Some(info_log);
        self
    }

    /// Writes the header (if enabled), one data record per chunk in address
    /// order, then the footer (if enabled).
    ///
    /// Configuration errors are reported before anything reaches `sink`.  A
    /// short read before the final chunk stops the encode with a
    /// `SourceRead` error; every line already handed to `sink` is complete.
    pub fn encode(
        self,
        source: &mut dyn ByteSource,
        sink: &mut dyn LineSink,
    ) -> Result<EncodeSummary> {
        let config = self.config;
        let max_address = config.validate(source.len())?;
        let address_width = resolve_address_width(config.address_width, max_address);
        source.seek(config.begin_address)?;

        self.log(&format!("Begin address     = {:X}h", config.begin_address));
        self.log(&format!("End address       = {:X}h", config.end_address));
        self.log(&format!("Address offset    = {:X}h", config.address_offset));
        self.log(&format!("Maximum address   = {:X}h", max_address));
        self.log(&format!("Address bytes     = {}", address_width.bytes()));

        let mut lines_written = 0;
        if config.headers {
            sink.add_line(HEADER_RECORD)?;
            lines_written += 1;
        }

        let line_length = config.line_length;
        let mut buf = [0u8; MAX_LINE_LENGTH as usize];
        let mut address = config.address_offset;
        let mut record_count: u32 = 0;
        loop {
            // address <= max_address on every pass.  Testing the distance
            // instead of address + line_length lets a range end at 0xFFFFFFFF.
            let remaining = max_address - address;
            let last = remaining < line_length;
            let this_line = if last { remaining + 1 } else { line_length };

            let chunk = &mut buf[..this_line as usize];
            let read = source.read(chunk)?;
            if read < chunk.len() && (!last || read == 0) {
                return Err(Error::source_read(&format!(
                    "Short read at address {:X}h: expected {} byte(s), got {}",
                    address, this_line, read
                )));
            }

            sink.add_line(&format_data_record(address, address_width, &chunk[..read]))?;
            record_count += 1;
            lines_written += 1;

            if last {
                break;
            }
            address += line_length;
        }

        if config.headers {
            for line in format_footer(record_count, config.address_offset, address_width) {
                sink.add_line(&line)?;
                lines_written += 1;
            }
        }

        self.log(&format!("Processing complete: {} record(s)", record_count));
        Ok(EncodeSummary {
            record_count,
            address_width,
            max_address,
            lines_written,
        })
    }

    /// Encodes into memory and returns the lines with the data record count.
    pub fn encode_lines(self, source: &mut dyn ByteSource) -> Result<(Vec<String>, u32)> {
        let mut lines: Vec<String> = vec![];
        let summary = self.encode(source, &mut lines)?;
        Ok((lines, summary.record_count))
    }

    fn log(&self, info: &str) {
        if let Some(info_log) = &self.info_log {
            info_log.log(info);
        }
    }
}
