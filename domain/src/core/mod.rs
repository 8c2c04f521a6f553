//! Core domain concepts shared across all subdomains.
//!
//! - [`model::AdviceModel`]: generative-text models the stylist can run on
//! - [`error::DomainError`]: domain-level errors
//! - [`string::truncate`]: UTF-8 safe previews for logs

pub mod error;
pub mod model;
pub mod string;
