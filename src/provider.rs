//! Provider-facing data: Xing's OAuth 1.0a endpoints and the profile field table.
//!
//! `descriptor` exposes validated, HTTPS-only endpoint metadata with the provider's documented
//! defaults. `fields` holds the compile-time mapping from canonical profile attributes to the
//! field names Xing's users API accepts.

pub mod descriptor;
pub mod fields;

pub use descriptor::*;
pub use fields::*;
