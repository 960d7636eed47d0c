//! # cleanarch-core: Foundational Types
//!
//! The leaf crate of the cleanarch workspace. It defines the vocabulary
//! shared by requests, usecases and presenters: the status catalog, the
//! structured bad-request error, the payload value model, and request
//! identifiers.
//!
//! ## Key Design Principles
//!
//! 1. **Explicit shapes.** Payload values are classified with
//!    [`Shape`] (scalar, sequence, mapping); no loose runtime type tests.
//!
//! 2. **One error kind.** [`BadRequestContentError`] is the only error a
//!    request or usecase surfaces, and it always formats to the same body.
//!
//! 3. **Closed status catalog.** [`StatusCode`] is an exhaustive enum that
//!    serializes as its integer.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cleanarch-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod payload;
pub mod status;

pub use error::{BadRequestContentError, DETAILS_KEY};
pub use identity::RequestId;
pub use payload::{lookup, lookup_in, Payload, Shape};
pub use status::{Status, StatusCode, StatusCodeError, STATUS_CODE_COUNT};
