use courier::http::encoding;

#[test]
fn test_gzip_round_trip() {
    let original = b"The quick brown fox jumps over the lazy dog";
    let compressed = encoding::gzip_compress(original).unwrap();
    let decompressed = encoding::gzip_decompress(&compressed).unwrap();

    assert_eq!(decompressed, original);
    assert_ne!(compressed, original.to_vec());
}

#[test]
fn test_deflate_round_trip() {
    let original = b"body body body body body";
    let compressed = encoding::deflate_compress(original).unwrap();
    let decompressed = encoding::deflate_decompress(&compressed).unwrap();

    assert_eq!(decompressed, original);
}

#[test]
fn test_deflate_accepts_raw_stream() {
    // Some servers send raw deflate without the zlib wrapper; the decoder
    // must handle both framings.
    use flate2::Compression;
    use flate2::write::DeflateEncoder;
    use std::io::Write;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"raw deflate stream").unwrap();
    let raw = encoder.finish().unwrap();

    assert_eq!(
        encoding::deflate_decompress(&raw).unwrap(),
        b"raw deflate stream"
    );
}

#[test]
fn test_gzip_decompress_rejects_garbage() {
    assert!(encoding::gzip_decompress(b"not gzip at all").is_err());
}

#[test]
fn test_gzip_decompress_rejects_empty_input() {
    assert!(encoding::gzip_decompress(b"").is_err());
}

#[test]
fn test_gzip_compress_empty_input() {
    let compressed = encoding::gzip_compress(b"").unwrap();
    assert_eq!(encoding::gzip_decompress(&compressed).unwrap(), b"");
}
