//! Products domain module.
//!
//! This crate contains the business rules for tracked product listings: margin
//! derivation, composite scoring and per-category statistics. Everything here is
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod pricing;
pub mod product;
pub mod scoring;
pub mod stats;

pub use pricing::{compute_margin, round2};
pub use product::{CreateProduct, Product, ProductOptions, ProductStatus, UpdateProduct};
pub use scoring::{compute_total_score, Score, ScoreWeights, SubScores};
pub use stats::{aggregate_by_category, CategoryEntry, CategoryMember, CategoryStats};
