//! This file is the root of the `byteplane` Rust crate.
//!
//! byteplane implements the byte-plane transpose underlying Parquet's
//! BYTE_STREAM_SPLIT physical encoding, together with the offline
//! permutation-network search used to derive and validate its vectorized
//! fast paths. Both components operate purely on in-memory buffers: no file
//! format awareness, no compression, no I/O. The plane layout is defined
//! against little-endian element storage, the only layout the wire format
//! itself is specified for.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod error;
pub mod kernels;
pub mod lane;
pub mod search;
pub mod traits;
pub mod types;
pub mod utils;

//==================================================================================
// 2. Convenience Re-exports
//==================================================================================
pub use error::ByteplaneError;
pub use kernels::split::{decode, decode_scalar, encode, encode_scalar, Splittable, BLOCK_LEN};
pub use types::SplitType;
