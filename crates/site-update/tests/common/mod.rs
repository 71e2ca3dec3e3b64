//! Common test infrastructure for site-update tests
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

pub mod archives;
pub mod constants;
pub mod mock_server;
pub mod stubs;

pub use archives::*;
pub use constants::*;
pub use mock_server::*;
pub use stubs::*;
