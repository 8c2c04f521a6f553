//! Progress display while the concierge is answering

pub mod reporter;
