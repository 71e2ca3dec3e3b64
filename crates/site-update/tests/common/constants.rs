//! Shared constants for test infrastructure

// Version identifiers (timestamp tokens)
pub const VERSION_OLD: &str = "20230101120000";
pub const VERSION_MID: &str = "20230601080000";
pub const VERSION_NEW: &str = "20240215093000";
pub const SOURCE_VERSION: &str = "20240215100000";

// Executable payloads
pub const OLD_PAYLOAD: &[u8] = b"old site binary";
pub const NEW_PAYLOAD: &[u8] = b"#!/bin/sh\necho new site binary\n";
pub const NEWER_PAYLOAD: &[u8] = b"even newer site binary";

// Archive entry names
pub const EXPECTED_ENTRY: &str = "site";
pub const UNEXPECTED_ENTRY: &str = "unexpected.bin";
