//! Token models handed from the token manager to the resource accessors.

pub mod token;

pub use token::{record::*, secret::*};
