use std::sync::Arc;

use crate::{
    env::Logger,
    srec::AddressWidth,
    util::{Error, Result},
};

pub const MIN_LINE_LENGTH: u32 = 8;
pub const MAX_LINE_LENGTH: u32 = 32;
pub const DEFAULT_LINE_LENGTH: u32 = MAX_LINE_LENGTH;

/// One encoding request: which source bytes, where they land in the output
/// address space, and how each record is shaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingConfig {
    /// First source offset to encode.
    pub begin_address: u32,
    /// Last source offset to encode, inclusive.
    pub end_address: u32,
    /// Output address of the byte at `begin_address`.
    pub address_offset: u32,
    /// Requested address width.  Widened at encode time when the highest
    /// output address does not fit.
    pub address_width: AddressWidth,
    /// Payload bytes per data record.
    pub line_length: u32,
    /// Emit the S0 header and the count and start address footer.
    pub headers: bool,
}

impl EncodingConfig {
    /// Config for `begin..=end` placed at the same output addresses, with
    /// 16-bit addresses, 32-byte lines and headers on.
    pub fn new(begin_address: u32, end_address: u32) -> Self {
        Self {
            begin_address,
            end_address,
            address_offset: begin_address,
            address_width: AddressWidth::Two,
            line_length: DEFAULT_LINE_LENGTH,
            headers: true,
        }
    }

    /// Output address of the last encoded byte.
    pub fn max_address(&self) -> Result<u32> {
        if self.end_address < self.begin_address {
            return Err(Error::invalid_range(&format!(
                "End address {:X}h is less than begin address {:X}h",
                self.end_address, self.begin_address
            )));
        }
        self.address_offset
            .checked_add(self.end_address - self.begin_address)
            .ok_or_else(|| {
                Error::invalid_range(&format!(
                    "Address offset {:X}h plus range length {:X}h exceeds 32 bits",
                    self.address_offset,
                    self.end_address - self.begin_address
                ))
            })
    }

    /// Checks the config against a source of `source_len` bytes and returns
    /// the maximum output address.
    pub fn validate(&self, source_len: u32) -> Result<u32> {
        if !(MIN_LINE_LENGTH..=MAX_LINE_LENGTH).contains(&self.line_length) {
            return Err(Error::invalid_argument(&format!(
                "Line length {} is outside {}..={}",
                self.line_length, MIN_LINE_LENGTH, MAX_LINE_LENGTH
            )));
        }
        if source_len == 0 {
            return Err(Error::invalid_range("Source is empty"));
        }
        if self.begin_address >= source_len {
            return Err(Error::invalid_range(&format!(
                "Begin address {:X}h is greater than file size {:X}h",
                self.begin_address,
                source_len - 1
            )));
        }
        self.max_address()
    }
}

/// Optional conversion parameters, resolved against the source length.
#[derive(Clone, Default)]
pub struct Options {
    /// Defaults to 0.
    pub begin_address: Option<u32>,
    /// Defaults to the last source byte; larger values are cut back to it.
    pub end_address: Option<u32>,
    /// Defaults to the begin address.
    pub address_offset: Option<u32>,
    /// Clamped into 2..=4.  Defaults to the narrowest width that fits.
    pub address_width: Option<u8>,
    /// Clamped into 8..=32.  Defaults to 32.
    pub line_length: Option<u32>,
    /// Defaults to true.
    pub headers: Option<bool>,
    /// Progress and summary lines go here when set.
    pub info_log: Option<Arc<dyn Logger>>,
}

impl Options {
    pub fn resolve(&self, source_len: u32) -> Result<EncodingConfig> {
        if source_len == 0 {
            return Err(Error::invalid_range("Source is empty"));
        }
        let last = source_len - 1;

        let begin_address = self.begin_address.unwrap_or(0);
        let config = EncodingConfig {
            begin_address,
            end_address: self.end_address.map_or(last, |end| end.min(last)),
            address_offset: self.address_offset.unwrap_or(begin_address),
            address_width: self
                .address_width
                .map_or(AddressWidth::Two, AddressWidth::clamped),
            line_length: self
                .line_length
                .map_or(DEFAULT_LINE_LENGTH, |len| {
                    len.clamp(MIN_LINE_LENGTH, MAX_LINE_LENGTH)
                }),
            headers: self.headers.unwrap_or(true),
        };
        config.validate(source_len)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = Options::default().resolve(0x4400).unwrap();
        assert_eq!(EncodingConfig::new(0, 0x43ff), config);
        assert_eq!(0x43ff, config.max_address().unwrap());
    }

    #[test]
    fn test_resolve_offset_defaults_to_begin() {
        let options = Options {
            begin_address: Some(0x100),
            ..Default::default()
        };
        let config = options.resolve(0x200).unwrap();
        assert_eq!(0x100, config.address_offset);
        assert_eq!(0x1ff, config.end_address);
        assert_eq!(0x1ff, config.max_address().unwrap());

        let options = Options {
            begin_address: Some(0x100),
            address_offset: Some(0),
            ..Default::default()
        };
        assert_eq!(0xff, options.resolve(0x200).unwrap().max_address().unwrap());
    }

    #[test]
    fn test_resolve_clamps() {
        let options = Options {
            end_address: Some(0xffff_ffff),
            address_width: Some(7),
            line_length: Some(1),
            headers: Some(false),
            ..Default::default()
        };
        let config = options.resolve(100).unwrap();
        assert_eq!(99, config.end_address);
        assert_eq!(AddressWidth::Four, config.address_width);
        assert_eq!(MIN_LINE_LENGTH, config.line_length);
        assert!(!config.headers);

        let options = Options {
            address_width: Some(0),
            line_length: Some(64),
            ..Default::default()
        };
        let config = options.resolve(100).unwrap();
        assert_eq!(AddressWidth::Two, config.address_width);
        assert_eq!(MAX_LINE_LENGTH, config.line_length);
    }

    #[test]
    fn test_resolve_begin_past_end() {
        let options = Options {
            begin_address: Some(0x10),
            ..Default::default()
        };
        let error = options.resolve(0x10).unwrap_err();
        assert!(error.is_invalid_range());
        assert_eq!(
            "InvalidRange: Begin address 10h is greater than file size Fh",
            error.to_string()
        );
        assert!(options.resolve(0x11).is_ok());
    }

    #[test]
    fn test_resolve_end_before_begin() {
        let options = Options {
            begin_address: Some(8),
            end_address: Some(4),
            ..Default::default()
        };
        assert!(options.resolve(16).unwrap_err().is_invalid_range());
    }

    #[test]
    fn test_resolve_empty_source() {
        assert!(Options::default().resolve(0).unwrap_err().is_invalid_range());
    }

    #[test]
    fn test_validate_offset_overflow() {
        let mut config = EncodingConfig::new(0, 15);
        config.address_offset = 0xffff_fff0;
        assert_eq!(0xffff_ffff, config.validate(16).unwrap());
        config.address_offset = 0xffff_fff1;
        assert!(config.validate(16).unwrap_err().is_invalid_range());
    }

    #[test]
    fn test_validate_line_length() {
        let mut config = EncodingConfig::new(0, 15);
        config.line_length = 33;
        assert!(config.validate(16).unwrap_err().is_invalid_argument());
        config.line_length = 7;
        assert!(config.validate(16).unwrap_err().is_invalid_argument());
        config.line_length = 8;
        assert!(config.validate(16).is_ok());
    }
}
