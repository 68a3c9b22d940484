use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    InvalidRange = 1,
    InvalidArgument = 2,
    SourceRead = 3,
    SourceUnavailable = 4,
    IOError = 5,
}

impl Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Code::InvalidRange => "InvalidRange",
            Code::InvalidArgument => "InvalidArgument",
            Code::SourceRead => "SourceRead",
            Code::SourceUnavailable => "SourceUnavailable",
            Code::IOError => "IOError",
        };
        f.write_str(str)
    }
}

#[derive(Debug, Clone, Error)]
#[error("{code}: {msg}")]
pub struct Error {
    code: Code,
    msg: String,
}

impl Error {
    fn new(code: Code, msg: &str) -> Self {
        Self {
            code,
            msg: msg.to_owned(),
        }
    }

    pub fn invalid_range(msg: &str) -> Self {
        Self::new(Code::InvalidRange, msg)
    }

    pub fn invalid_argument(msg: &str) -> Self {
        Self::new(Code::InvalidArgument, msg)
    }

    pub fn source_read(msg: &str) -> Self {
        Self::new(Code::SourceRead, msg)
    }

    pub fn source_unavailable(msg: &str) -> Self {
        Self::new(Code::SourceUnavailable, msg)
    }

    pub fn io_error(msg: &str) -> Self {
        Self::new(Code::IOError, msg)
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.msg
    }

    pub fn is_invalid_range(&self) -> bool {
        self.code == Code::InvalidRange
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == Code::InvalidArgument
    }

    pub fn is_source_read(&self) -> bool {
        self.code == Code::SourceRead
    }

    pub fn is_source_unavailable(&self) -> bool {
        self.code == Code::SourceUnavailable
    }

    pub fn is_io_error(&self) -> bool {
        self.code == Code::IOError
    }
}

pub type Result<T> = std::result::Result<T, Error>;
