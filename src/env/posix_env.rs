use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufReader, BufWriter, ErrorKind::Interrupted, Read, Seek, SeekFrom, Write},
    path::Path,
    sync::Mutex,
    thread,
};

use chrono::Local;

use super::{ByteSource, Env, LineSink, Logger};
use crate::util::{Error, Result};

#[derive(Default)]
pub struct PosixEnv {}

impl PosixEnv {
    pub fn new() -> Self {
        Self {}
    }
}

impl Env for PosixEnv {
    fn new_byte_source(&self, fname: &str) -> Result<Box<dyn ByteSource>> {
        let file = File::open(fname).map_err(|error| to_source_error(fname, error))?;
        let len = file
            .metadata()
            .map_err(|error| to_source_error(fname, error))?
            .len();
        let len = u32::try_from(len).map_err(|_| {
            Error::invalid_range(&format!(
                "{}: size {:X}h does not fit a 32-bit address space",
                fname, len
            ))
        })?;
        Ok(Box::new(PosixByteSource {
            file: BufReader::new(file),
            len,
            name: fname.to_owned(),
        }))
    }

    fn new_line_sink(&self, fname: &str) -> Result<Box<dyn LineSink>> {
        match File::create(fname) {
            Ok(file) => Ok(Box::new(PosixLineSink {
                file: BufWriter::new(file),
                name: fname.to_owned(),
            })),
            Err(error) => Err(to_io_error(fname, error)),
        }
    }

    fn new_logger(&self, fname: &str) -> Result<Box<dyn Logger>> {
        match OpenOptions::new().create(true).append(true).open(fname) {
            Ok(file) => Ok(Box::new(PosixLogger::new(file))),
            Err(error) => Err(to_io_error(fname, error)),
        }
    }

    fn file_exists(&self, fname: &str) -> bool {
        Path::new(fname).exists()
    }

    fn get_file_size(&self, fname: &str) -> Result<u64> {
        match fs::metadata(fname) {
            Ok(data) => Ok(data.len()),
            Err(error) => Err(to_source_error(fname, error)),
        }
    }

    fn remove_file(&self, fname: &str) -> Result<()> {
        match fs::remove_file(fname) {
            Ok(()) => Ok(()),
            Err(error) => Err(to_io_error(fname, error)),
        }
    }
}

fn to_source_error(target: &str, error: io::Error) -> Error {
    let msg = format!("{}: {}", target, error);
    Error::source_unavailable(&msg)
}

fn to_io_error(target: &str, error: io::Error) -> Error {
    let msg = format!("{}: {}", target, error);
    Error::io_error(&msg)
}

struct PosixByteSource {
    file: BufReader<File>,
    len: u32,
    name: String,
}

impl ByteSource for PosixByteSource {
    fn seek(&mut self, offset: u32) -> Result<()> {
        match self.file.seek(SeekFrom::Start(u64::from(offset))) {
            Ok(_) => Ok(()),
            Err(error) => Err(to_source_error(&self.name, error)),
        }
    }

    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        // Like read_exact, but a short count at end of file is not an error.
        let mut filled = 0;
        while filled < dst.len() {
            match self.file.read(&mut dst[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(ref e) if e.kind() == Interrupted => continue,
                Err(error) => {
                    return Err(Error::source_read(&format!("{}: {}", self.name, error)))
                }
            }
        }
        Ok(filled)
    }

    fn len(&self) -> u32 {
        self.len
    }
}

struct PosixLineSink {
    file: BufWriter<File>,
    name: String,
}

impl LineSink for PosixLineSink {
    fn add_line(&mut self, line: &str) -> Result<()> {
        let result = self
            .file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.write_all(b"\n"));
        result.map_err(|error| to_io_error(&self.name, error))
    }

    fn flush(&mut self) -> Result<()> {
        self.file
            .flush()
            .map_err(|error| to_io_error(&self.name, error))
    }
}

/// Writes timestamped lines to a file or any other stream.
pub struct PosixLogger<W: Write> {
    file: Mutex<W>,
}

impl<W: Write> PosixLogger<W> {
    pub fn new(file: W) -> Self {
        Self {
            file: Mutex::new(file),
        }
    }
}

impl PosixLogger<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Logger for PosixLogger<W> {
    fn log(&self, info: &str) {
        // Record the time as close to the log() call as possible.
        let time = Local::now().format("%Y/%m/%d-%H:%M:%S%.6f").to_string();
        let thread_id = thread::current().id();
        let mut info = format!("{} {:?} {}", time, thread_id, info);
        if !info.ends_with('\n') {
            info += "\n";
        }
        if let Ok(mut file_inner) = self.file.lock() {
            let _ = file_inner.write_all(info.as_bytes());
            let _ = file_inner.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_in(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_byte_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let fname = path_in(&dir, "image.bin");
        fs::write(&fname, (0u8..40).collect::<Vec<_>>()).unwrap();

        let env = PosixEnv::new();
        assert!(env.file_exists(&fname));
        assert_eq!(40, env.get_file_size(&fname).unwrap());

        let mut source = env.new_byte_source(&fname).unwrap();
        assert_eq!(40, source.len());
        source.seek(36).unwrap();
        let mut buf = [0; 8];
        assert_eq!(4, source.read(&mut buf).unwrap());
        assert_eq!(&[36, 37, 38, 39], &buf[..4]);
        assert_eq!(0, source.read(&mut buf).unwrap());
    }

    #[test]
    fn test_missing_source_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let fname = path_in(&dir, "missing.bin");
        let env = PosixEnv::new();
        assert!(!env.file_exists(&fname));
        let error = env.new_byte_source(&fname).err().unwrap();
        assert!(error.is_source_unavailable());
        assert!(env.get_file_size(&fname).unwrap_err().is_source_unavailable());
    }

    #[test]
    fn test_line_sink_terminates_lines() {
        let dir = tempfile::tempdir().unwrap();
        let fname = path_in(&dir, "out.mot");
        let env = PosixEnv::new();
        {
            let mut sink = env.new_line_sink(&fname).unwrap();
            sink.add_line("S00600004844521B").unwrap();
            sink.add_line("S9030000FC").unwrap();
            sink.flush().unwrap();
        }
        let contents = fs::read_to_string(&fname).unwrap();
        assert_eq!("S00600004844521B\nS9030000FC\n", contents);

        env.remove_file(&fname).unwrap();
        assert!(!env.file_exists(&fname));
        assert!(env.remove_file(&fname).unwrap_err().is_io_error());
    }

    #[test]
    fn test_logger_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let fname = path_in(&dir, "LOG");
        let env = PosixEnv::new();
        {
            let logger = env.new_logger(&fname).unwrap();
            logger.log("Begin address     = 0h");
            logger.log("Processing complete\n");
        }
        let contents = fs::read_to_string(&fname).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(2, lines.len());
        assert!(lines[0].ends_with(" Begin address     = 0h"));
        assert!(lines[1].ends_with(" Processing complete"));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_logger_over_buffer() {
        let logger = PosixLogger::new(Vec::<u8>::new());
        logger.log("hello");
        let buf = logger.file.lock().unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.ends_with("hello\n"));
        assert!(text.contains("ThreadId"));
    }
}
