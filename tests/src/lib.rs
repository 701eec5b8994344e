//! # KnowScroll Test Suite
//!
//! Cross-crate flows driven through the mock wallet, reader and notifier.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── gateway_flows.rs   # Writes, reads and notifications through ChainGateway
//!     └── view_flows.rs      # Refresh, purchase and publish flows over the gateway
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ks-tests
//! cargo test -p ks-tests integration::view_flows::
//! ```

pub mod integration;
