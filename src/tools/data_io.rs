//! Whole-buffer input and output for the command line operations.
//!
//! Every operation does exactly one full read of its input and one full write of its output,
//! so a failure never leaves a half written result behind from the codec itself.
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::cli::{Mode, Output, VzOpts};
use crate::error::{Error, Result};

/// File name extension of compressed files.
pub const EXTENSION: &str = "vz";
/// Extension used when decompressing a file that does not end in EXTENSION.
pub const FALLBACK_EXTENSION: &str = "out";

/// Where the result of an operation goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    File(PathBuf),
    Stdout,
}

/// Read an entire file, or all of stdin when there is no file name.
pub fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(name) => {
            let data = fs::read(name)?;
            debug!("Read {} bytes from {}", data.len(), name);
            Ok(data)
        }
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            debug!("Read {} bytes from stdin", data.len());
            Ok(data)
        }
    }
}

/// Name of the file an operation on path writes to.
pub fn output_name(path: &str, mode: Mode) -> PathBuf {
    match mode {
        Mode::Unzip => {
            let p = Path::new(path);
            match (p.extension(), p.file_stem()) {
                (Some(ext), Some(_)) if ext == EXTENSION => p.with_extension(""),
                _ => PathBuf::from(format!("{}.{}", path, FALLBACK_EXTENSION)),
            }
        }
        _ => PathBuf::from(format!("{}.{}", path, EXTENSION)),
    }
}

/// Pick the sink for an input, following the options.
pub fn sink_for(path: Option<&str>, opts: &VzOpts) -> Sink {
    match (path, opts.output) {
        (Some(name), Output::File) => Sink::File(output_name(name, opts.op_mode)),
        _ => Sink::Stdout,
    }
}

/// Write all the data to the sink. Existing files are only replaced when force is set.
pub fn write_output(sink: &Sink, data: &[u8], force: bool) -> Result<()> {
    match sink {
        Sink::File(path) => {
            if path.exists() && !force {
                return Err(Error::OutputExists(path.clone()));
            }
            fs::write(path, data)?;
            debug!("Wrote {} bytes to {}", data.len(), path.display());
        }
        Sink::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(data)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Remove the input once its output is safely in a file, unless asked to keep it.
pub fn cleanup_input(path: Option<&str>, sink: &Sink, opts: &VzOpts) -> Result<()> {
    if let (Some(name), Sink::File(_)) = (path, sink) {
        if !opts.keep_input_files {
            fs::remove_file(name)?;
            debug!("Removed input file {}", name);
        }
    }
    Ok(())
}
