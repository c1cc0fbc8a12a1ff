//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use vitzip::compression::compress::compress_file;
use vitzip::compression::decompress::{decompress_file, test_file};
use vitzip::tools::cli::{vz_opts_init, Mode, VzOpts};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), std::io::Error> {
    let options = vz_opts_init();

    // Log to stderr so that --stdout output is never mixed with messages.
    if let Err(e) = TermLogger::init(
        options.verbose.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }
    options.log_settings();

    //----- Figure how what we need to do and go do it
    let result = if options.files.is_empty() {
        run(None, &options)
    } else {
        // Keep going after a bad file, but report the last failure.
        options
            .files
            .iter()
            .map(|file| run(Some(file.as_str()), &options))
            .fold(Ok(()), |acc, r| r.and(acc))
    };

    info!("Done.");
    result
}

/// Run the selected operation on one input, logging any failure.
fn run(path: Option<&str>, options: &VzOpts) -> Result<(), std::io::Error> {
    let result = match options.op_mode {
        Mode::Zip => compress_file(path, options),
        Mode::Unzip => decompress_file(path, options),
        Mode::Test => test_file(path),
    };
    if let Err(e) = &result {
        error!("{}: {}", path.unwrap_or("(stdin)"), e);
    }
    result.map_err(std::io::Error::from)
}
