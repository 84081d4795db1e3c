//! Gzip and deflate body codecs.
//!
//! Stateless free functions over byte slices. Failures are reported as
//! errors here; the response layer degrades them to the raw bytes.

use flate2::Compression;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use std::io::{self, Read, Write};

pub fn gzip_decompress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

/// Inflates a `deflate`-encoded body.
///
/// Servers disagree on whether the token means a zlib stream or a raw
/// deflate stream, so the zlib framing is tried first and the raw stream
/// second.
pub fn deflate_decompress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    match ZlibDecoder::new(data).read_to_end(&mut out) {
        Ok(_) => Ok(out),
        Err(_) => {
            let mut out = Vec::new();
            DeflateDecoder::new(data).read_to_end(&mut out)?;
            Ok(out)
        }
    }
}

pub fn gzip_compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Compresses as a zlib stream, the framing `Content-Encoding: deflate`
/// nominally names.
pub fn deflate_compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
