#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;
#[cfg(feature = "testing")]
extern crate std;

pub mod codec;
pub(crate) mod encoding;
pub mod errors;
pub mod inference;
pub mod routing;
#[cfg(feature = "testing")]
pub mod testing;
pub mod types;
pub mod value;

// Re-export main types
pub use codec::{decode, encode, encode_as};
pub use inference::{infer, is_canonical_uuid};
pub use routing::{
    QueryOptions, RoutingKey, compose_routing_key, compute_routing_key, frame_composite_key,
};
pub use types::{TypeCode, TypeDescriptor, TypeHint, code_for, name_for};
pub use value::Value;

// Re-export the host types values are built from
pub use chrono;
pub use num_bigint;
pub use uuid;

// Re-export errors
pub use errors::Error;
