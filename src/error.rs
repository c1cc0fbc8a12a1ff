//! Error type shared by the vitzip library and command line tool.
use std::{fmt::Display, io, path::PathBuf};

#[derive(Debug)]
pub enum Error {
    /// Underlying file or stream I/O failed.
    Io(io::Error),
    /// The bit channel ran dry before the end-of-stream marker was found.
    TruncatedStream,
    /// The stream decoded to something that cannot be valid (eg. an MTF rank over 255).
    CorruptStream(String),
    /// Refused to overwrite an existing output file without --force.
    OutputExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::TruncatedStream => write!(f, "compressed stream ended before the end marker"),
            Error::CorruptStream(why) => write!(f, "corrupt compressed stream: {}", why),
            Error::OutputExists(path) => write!(
                f,
                "output file {} already exists (use --force to overwrite)",
                path.display()
            ),
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<Error> for io::Error {
    fn from(val: Error) -> Self {
        match val {
            Error::Io(err) => err,
            Error::TruncatedStream => io::Error::new(io::ErrorKind::UnexpectedEof, val),
            Error::CorruptStream(_) => io::Error::new(io::ErrorKind::InvalidData, val),
            Error::OutputExists(_) => io::Error::new(io::ErrorKind::AlreadyExists, val),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Error;
    use std::io;

    #[test]
    fn io_kind_mapping_test() {
        let e: io::Error = Error::TruncatedStream.into();
        assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
        let e: io::Error = Error::CorruptStream("rank 300".to_string()).into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        assert!(e.to_string().contains("rank 300"));
    }

    #[test]
    fn io_round_trip_test() {
        let inner = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: Error = inner.into();
        assert!(matches!(e, Error::Io(_)));
        let back: io::Error = e.into();
        assert_eq!(back.kind(), io::ErrorKind::NotFound);
    }
}
