//! `winnerlens-ai`
//!
//! **Responsibility:** AI copywriting for product listings.
//!
//! This crate never touches product state:
//! - It turns prompts into text through a [`TextGenerator`].
//! - Callers decide what to do with the generated copy.

pub mod client;
pub mod copywriter;
pub mod result;

pub use client::{GeminiClient, TextGenerator, DEFAULT_MODEL, GEMINI_API_BASE};
pub use copywriter::{parse_json_array, ProductCopywriter, NAME_CANDIDATES};
pub use result::{AiError, AiResult};
