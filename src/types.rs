//! The CQL type catalog, descriptor trees and the type-name grammar.

mod catalog;
mod descriptor;
mod grammar;

pub use catalog::{TypeCode, code_for, name_for};
pub use descriptor::{TypeDescriptor, TypeHint};
