//! Product catalog.
//!
//! - [`entities::Product`]: an immutable catalog record
//! - [`entities::Catalog`]: the ordered, session-immutable product list

pub mod entities;
