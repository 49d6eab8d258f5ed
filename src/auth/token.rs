//! Access token records and the redacting secret wrapper they are built from.

pub mod record;
pub mod secret;
