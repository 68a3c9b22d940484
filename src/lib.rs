mod config;
mod env;
mod srec;
mod util;

use std::sync::Arc;

pub use config::{EncodingConfig, Options, DEFAULT_LINE_LENGTH, MAX_LINE_LENGTH, MIN_LINE_LENGTH};
pub use env::{ByteSource, Env, LineSink, Logger, MemorySource, PosixEnv, PosixLogger};
pub use srec::{
    format_data_record, format_footer, format_header_record, resolve_address_width, AddressWidth,
    EncodeSummary, RangeEncoder, RecordType, HEADER_RECORD,
};
pub use util::{checksum, Code, Error, Result};

/// Converts the binary file `input` into the S-record file `output`.
///
/// Options are resolved against the input length before `output` is
/// created.  If encoding fails afterwards, `output` is removed.
pub fn convert_file(
    env: Arc<dyn Env>,
    input: &str,
    output: &str,
    options: &Options,
) -> Result<EncodeSummary> {
    let mut source = env.new_byte_source(input)?;
    let config = options.resolve(source.len())?;
    let mut encoder = RangeEncoder::new(config);
    if let Some(info_log) = &options.info_log {
        info_log.log(&format!("Input binary file:  {}", input));
        info_log.log(&format!("Output S-record file: {}", output));
        encoder = encoder.with_info_log(info_log.clone());
    }

    let mut sink = env.new_line_sink(output)?;
    let mut result = encoder.encode(source.as_mut(), sink.as_mut());
    if result.is_ok() {
        if let Err(error) = sink.flush() {
            result = Err(error);
        }
    }
    drop(sink);
    if result.is_err() {
        let _ = env.remove_file(output);
    }
    result
}
