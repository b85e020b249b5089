//! Contract between the in-memory filesystem core and its host bridge
//!
//! This crate contains the definitions of the traits the core implements and
//! the basic types that cross the core boundary: node identifiers, attribute
//! records, directory entries, open handles and the error kinds the bridge
//! translates into host error codes.
//!
//! Placing the contract in its own crate lets a bridge depend on it without
//! pulling in the implementation.

#![deny(missing_docs)]

//Error kinds and the core-wide Result alias
pub mod error;

//Basic modules for types
pub mod types;

//Traits the core implements
pub mod fs;
