mod encoder;
mod format;

pub use encoder::{EncodeSummary, RangeEncoder};
pub use format::{format_data_record, format_footer, format_header_record, HEADER_RECORD};

use crate::util::{Error, Result};

/// Record type digit following the leading `S`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum RecordType {
    Header = 0,
    Data16 = 1,
    Data24 = 2,
    Data32 = 3,
    Count16 = 5,
    Count24 = 6,
    Start32 = 7,
    Start24 = 8,
    Start16 = 9,
}

impl RecordType {
    pub fn digit(self) -> u8 {
        self as u8
    }
}

/// Number of bytes in the address field of data and start records.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum AddressWidth {
    Two = 2,
    Three = 3,
    Four = 4,
}

impl AddressWidth {
    /// Nearest supported width: below 2 becomes 2, above 4 becomes 4.
    pub fn clamped(bytes: u8) -> Self {
        match bytes {
            0..=2 => AddressWidth::Two,
            3 => AddressWidth::Three,
            _ => AddressWidth::Four,
        }
    }

    pub fn bytes(self) -> u8 {
        self as u8
    }

    /// Highest address the field can hold.
    pub fn max_address(self) -> u32 {
        match self {
            AddressWidth::Two => 0xffff,
            AddressWidth::Three => 0xff_ffff,
            AddressWidth::Four => 0xffff_ffff,
        }
    }

    /// S1, S2 or S3.
    pub fn data_record_type(self) -> RecordType {
        match self {
            AddressWidth::Two => RecordType::Data16,
            AddressWidth::Three => RecordType::Data24,
            AddressWidth::Four => RecordType::Data32,
        }
    }

    /// S9, S8 or S7: the data record type digit mirrored around 5.
    pub fn start_record_type(self) -> RecordType {
        match self {
            AddressWidth::Two => RecordType::Start16,
            AddressWidth::Three => RecordType::Start24,
            AddressWidth::Four => RecordType::Start32,
        }
    }
}

impl TryFrom<u8> for AddressWidth {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(AddressWidth::Two),
            3 => Ok(AddressWidth::Three),
            4 => Ok(AddressWidth::Four),
            _ => Err(Error::invalid_argument(&format!(
                "address width {} is not one of 2, 3 or 4 bytes",
                value
            ))),
        }
    }
}

/// Widens `requested` until `max_address` fits.  Never narrows.
pub fn resolve_address_width(requested: AddressWidth, max_address: u32) -> AddressWidth {
    let needed = if max_address > AddressWidth::Three.max_address() {
        AddressWidth::Four
    } else if max_address > AddressWidth::Two.max_address() {
        AddressWidth::Three
    } else {
        AddressWidth::Two
    };
    requested.max(needed)
}
