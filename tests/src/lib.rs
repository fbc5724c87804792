//! # Provenance Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (hashing, tally, ledger)
//! └── src/integration/  # Cross-crate flows
//!     ├── write_path.rs # detector consensus gating the ledger
//!     └── read_path.rs  # sharing, revocation, tamper detection
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pv-tests
//! cargo bench -p pv-tests
//! ```

pub mod integration;
