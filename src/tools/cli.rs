//! Options and command line parsing for vitzip.
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// The log filter matching this verbosity.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct VzOpts {
    /// Vec of names of files to read for input. Empty means stdin.
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl VzOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Warnings,
        }
    }

    /// Report the settings in use. Call after the logger is running.
    pub fn log_settings(&self) {
        info!("---- vitzip initialization start ----");
        info!("Verbosity set to {}", log::max_level());
        info!("Operational mode set to {}", self.op_mode);
        if self.files.is_empty() {
            info!("Reading from stdin");
        } else {
            info!("Processing {} file(s)", self.files.len());
        }
        info!("Output goes to {}", self.output);
        if self.force_overwrite {
            info!("Forcing file overwriting")
        };
        if self.keep_input_files {
            info!("Keeping input files")
        };
        info!("---- vitzip initialization end ----");
    }
}

impl Default for VzOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "vitzip, a move-to-front + adaptive huffman file compressor",
    long_about = "
    vitzip compresses files in a single pass. Bytes are first put through a move-to-front
    transform, then coded with an adaptive (Vitter style) huffman tree that the decoder
    rebuilds on its own, so no code tables are stored in the compressed file.

    If no file names are given, vitzip compresses or decompresses from standard input
    to standard output."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Force compression (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep (don't delete) input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to standard out
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Suppress noncritical messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

impl From<Args> for VzOpts {
    /// Put command line information from CLAP into our internal structure.
    fn from(args: Args) -> Self {
        let mut opts = VzOpts::new();
        opts.files = args.files;

        // Test wins, then an explicit -z, then -d.
        opts.op_mode = if args.test {
            Mode::Test
        } else if args.compress {
            Mode::Zip
        } else if args.decompress {
            Mode::Unzip
        } else {
            Mode::Zip
        };

        opts.keep_input_files = args.keep;
        opts.force_overwrite = args.force;

        // Without files the data has to go to stdout anyway.
        if args.stdout || opts.files.is_empty() {
            opts.output = Output::Stdout
        };

        opts.verbose = match (args.quiet, args.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Warnings,
            (false, 1) => Verbosity::Info,
            (false, 2) => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        opts
    }
}

/// Parse the process arguments into our options.
pub fn vz_opts_init() -> VzOpts {
    VzOpts::from(Args::parse())
}
