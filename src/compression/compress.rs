use log::{debug, info};

use crate::bitstream::bitwriter::BitWriter;
use crate::error::Result;
use crate::huffman_coding::encoder::Encoder;
use crate::tools::cli::VzOpts;
use crate::tools::data_io::{cleanup_input, read_input, sink_for, write_output};
use crate::tools::mtf::MoveToFront;

/// Compress a buffer. Empty input gives empty output.
pub fn compress(data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    // Move To Front first, so recently used bytes become small, frequent ranks.
    let ranks = MoveToFront::new().encode(data);

    // Then code every rank with the adaptive huffman tree.
    let mut bw = BitWriter::new(data.len());
    let mut encoder = Encoder::new();
    ranks
        .iter()
        .for_each(|&rank| encoder.encode_symbol(rank, &mut bw));
    encoder.flush(&mut bw);

    debug!(
        "Coded {} symbols into {} bytes using {} tree nodes",
        ranks.len(),
        bw.output.len(),
        encoder.tree().len()
    );
    bw.output
}

/// Space savings in percent, (1 - compressed / original) * 100. Zero for empty input.
pub fn space_savings(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

/// Compress the named file (or stdin when None) as directed by the options.
pub fn compress_file(path: Option<&str>, opts: &VzOpts) -> Result<()> {
    let name = path.unwrap_or("(stdin)");
    let data = read_input(path)?;
    let out = compress(&data);

    let sink = sink_for(path, opts);
    write_output(&sink, &out, opts.force_overwrite)?;
    info!(
        "{}: {} -> {} bytes, space savings {:.2}%",
        name,
        data.len(),
        out.len(),
        space_savings(data.len(), out.len())
    );
    cleanup_input(path, &sink, opts)
}

#[cfg(test)]
mod test {
    use super::{compress, space_savings};
    use crate::compression::decompress::decompress;

    #[test]
    fn empty_test() {
        assert!(compress(&[]).is_empty());
    }

    #[test]
    fn repeated_byte_test() {
        let data = vec![0x41_u8; 1000];
        let out = compress(&data);
        // One literal for 0x41, one for rank 0, then a single bit per byte at most.
        assert!(out.len() < 150, "compressed to {} bytes", out.len());
        assert_eq!(decompress(&out).unwrap(), data);
    }

    #[test]
    fn text_shrinks_test() {
        let data = "[     5.123] (II) Loading extension GLX\n\
                    [     5.124] (II) Loading extension DRI2\n\
                    [     5.125] (II) Loading extension DRI3\n"
            .repeat(20);
        let out = compress(data.as_bytes());
        assert!(out.len() < data.len());
        assert_eq!(decompress(&out).unwrap(), data.as_bytes());
    }

    #[test]
    fn space_savings_test() {
        assert_eq!(space_savings(0, 0), 0.0);
        assert_eq!(space_savings(100, 25), 75.0);
        assert!(space_savings(10, 20) < 0.0);
    }
}
