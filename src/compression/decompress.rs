use log::{debug, info};

use crate::bitstream::bitreader::BitReader;
use crate::error::Result;
use crate::huffman_coding::decoder::Decoder;
use crate::tools::cli::VzOpts;
use crate::tools::data_io::{cleanup_input, read_input, sink_for, write_output};
use crate::tools::mtf::MoveToFront;

/// Decompress a buffer produced by compress(). Empty input gives empty output.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    // Huffman decode every rank up to the end of stream marker.
    let mut br = BitReader::new(data);
    let mut decoder = Decoder::new();
    // A symbol costs at least one bit.
    let mut ranks = Vec::with_capacity(data.len() * 8);
    while let Some(rank) = decoder.decode_symbol(&mut br)? {
        ranks.push(rank);
    }
    debug!(
        "Decoded {} symbols, stopped at {} using {} tree nodes",
        ranks.len(),
        br.loc(),
        decoder.tree().len()
    );

    // Then undo the Move To Front transform with a fresh table.
    MoveToFront::new().decode(ranks)
}

/// Decompress the named file (or stdin when None) as directed by the options.
pub fn decompress_file(path: Option<&str>, opts: &VzOpts) -> Result<()> {
    let name = path.unwrap_or("(stdin)");
    let data = read_input(path)?;
    let out = decompress(&data)?;

    let sink = sink_for(path, opts);
    write_output(&sink, &out, opts.force_overwrite)?;
    info!("{}: {} -> {} bytes", name, data.len(), out.len());
    cleanup_input(path, &sink, opts)
}

/// Check that the named file (or stdin when None) decompresses cleanly. Nothing is written.
pub fn test_file(path: Option<&str>) -> Result<()> {
    let name = path.unwrap_or("(stdin)");
    let data = read_input(path)?;
    let out = decompress(&data)?;
    info!("{}: ok ({} bytes)", name, out.len());
    Ok(())
}
