//! Wire shapes for every backend request and response.
//!
//! Responses are checked by decoding them into these types; request bodies
//! additionally carry `validator` rules that run before anything is sent.

pub mod catalog;
pub mod cdek;
pub mod common;
pub mod faq;
pub mod sales;
pub mod values;

pub use catalog::*;
pub use cdek::*;
pub use common::*;
pub use faq::*;
pub use sales::*;
pub use values::{slugify, Sku, SkuError};
