//! In-memory release archive fixtures

use flate2::write::GzEncoder;
use flate2::Compression;

/// Build a gzip-compressed tarball with the given entries
pub fn gzip_tarball(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (name, payload) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(payload.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, name, *payload)
            .expect("append tar entry");
    }

    builder
        .into_inner()
        .expect("finish tar stream")
        .finish()
        .expect("finish gzip stream")
}

/// A well-formed release archive with a single executable entry
pub fn release_archive(payload: &[u8]) -> Vec<u8> {
    gzip_tarball(&[(super::EXPECTED_ENTRY, payload)])
}
