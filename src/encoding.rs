//! Binary framing and scalar layouts of the CQL value format.
//!
//! All multi-byte integers are big-endian. Variable-width values inside
//! collections and composite routing keys carry a 2-byte length prefix.

pub(crate) mod constants;
pub(crate) mod frame;
pub(crate) mod scalar;
