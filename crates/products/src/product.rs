use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use winnerlens_core::{DomainError, DomainResult, ProductId, UserId};

use crate::pricing::compute_margin;
use crate::scoring::SubScores;
use crate::stats::CategoryMember;

/// Free-form listing options (colour, size, bundle info, ...). Always a JSON object.
pub type ProductOptions = Map<String, JsonValue>;

/// Listing lifecycle on the marketplace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
    Pending,
    Registered,
    Rejected,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 4] = [
        ProductStatus::Draft,
        ProductStatus::Pending,
        ProductStatus::Registered,
        ProductStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Pending => "pending",
            ProductStatus::Registered => "registered",
            ProductStatus::Rejected => "rejected",
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ProductStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "status must be one of: draft, pending, registered, rejected (got '{s}')"
                ))
            })
    }
}

/// Command: register a new product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProduct {
    pub product_name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub cost: Option<Decimal>,
    pub margin: Option<Decimal>,
    pub options: Option<ProductOptions>,
}

/// Command: partially update a listing. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProduct {
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub margin: Option<Decimal>,
    pub options: Option<ProductOptions>,
    pub status: Option<ProductStatus>,
}

/// A tracked product listing owned by one seller.
///
/// # Invariants
/// - `price > 0`; `0 < cost < price` when a cost is known.
/// - Unless a margin was supplied explicitly, `margin` is derived from the
///   current price/cost and re-derived whenever either changes.
/// - `total_score` is recomputed every time sub-scores are written.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    owner: UserId,
    product_name: String,
    category: String,
    description: Option<String>,
    price: Decimal,
    cost: Option<Decimal>,
    margin: Option<Decimal>,
    options: ProductOptions,
    scores: SubScores,
    total_score: Option<u8>,
    status: ProductStatus,
    /// Marketplace listing id; assigned by the marketplace, never by sellers.
    coupang_product_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    pub fn create(
        id: ProductId,
        owner: UserId,
        cmd: CreateProduct,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let product_name = validate_name(cmd.product_name)?;
        let category = validate_category(cmd.category)?;
        validate_price(cmd.price)?;
        if let Some(cost) = cmd.cost {
            validate_cost(cost)?;
        }
        ensure_cost_below_price(cmd.price, cmd.cost)?;
        if let Some(margin) = cmd.margin {
            validate_margin(margin)?;
        }

        let margin = compute_margin(cmd.price, cmd.cost, cmd.margin)?;

        Ok(Self {
            id,
            owner,
            product_name,
            category,
            description: cmd.description,
            price: cmd.price,
            cost: cmd.cost,
            margin,
            options: cmd.options.unwrap_or_default(),
            scores: SubScores::default(),
            total_score: None,
            status: ProductStatus::Draft,
            coupang_product_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn total_score(&self) -> Option<u8> {
        self.total_score
    }

    pub fn coupang_product_id(&self) -> Option<&str> {
        self.coupang_product_id.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn cost(&self) -> Option<Decimal> {
        self.cost
    }

    pub fn margin(&self) -> Option<Decimal> {
        self.margin
    }

    pub fn options(&self) -> &ProductOptions {
        &self.options
    }

    pub fn scores(&self) -> &SubScores {
        &self.scores
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a partial update.
    ///
    /// Validation runs against a copy; on error `self` is left untouched.
    pub fn apply_update(&mut self, cmd: UpdateProduct, now: DateTime<Utc>) -> DomainResult<()> {
        let mut next = self.clone();

        if let Some(name) = cmd.product_name {
            next.product_name = validate_name(name)?;
        }
        if let Some(category) = cmd.category {
            next.category = validate_category(category)?;
        }
        if let Some(description) = cmd.description {
            next.description = Some(description);
        }
        if let Some(options) = cmd.options {
            next.options = options;
        }
        if let Some(status) = cmd.status {
            next.status = status;
        }
        if let Some(margin) = cmd.margin {
            validate_margin(margin)?;
        }

        let pricing_changed = cmd.price.is_some() || cmd.cost.is_some();
        if let Some(price) = cmd.price {
            validate_price(price)?;
            next.price = price;
        }
        if let Some(cost) = cmd.cost {
            validate_cost(cost)?;
            next.cost = Some(cost);
        }
        ensure_cost_below_price(next.price, next.cost)?;

        if pricing_changed {
            next.margin = compute_margin(next.price, next.cost, cmd.margin)?.or(self.margin);
        } else if cmd.margin.is_some() {
            next.margin = cmd.margin;
        }

        next.updated_at = now;
        *self = next;
        Ok(())
    }

    /// Write sub-scores (supplied ones replace stored ones) and recompute the total.
    pub fn apply_scores(&mut self, scores: SubScores, now: DateTime<Utc>) {
        self.scores = self.scores.merged_with(scores);
        self.total_score = Some(self.scores.total());
        self.updated_at = now;
    }
}

impl CategoryMember for Product {
    fn category(&self) -> &str {
        &self.category
    }

    fn status(&self) -> ProductStatus {
        self.status
    }

    fn total_score(&self) -> Option<u8> {
        self.total_score
    }
}

fn validate_name(name: String) -> DomainResult<String> {
    let name = name.trim().to_string();
    if name.chars().count() < 2 {
        return Err(DomainError::invalid_field(
            "productName",
            "productName must be at least 2 characters",
        ));
    }
    Ok(name)
}

fn validate_category(category: String) -> DomainResult<String> {
    let category = category.trim().to_string();
    if category.is_empty() {
        return Err(DomainError::invalid_field("category", "category is required"));
    }
    Ok(category)
}

fn validate_price(price: Decimal) -> DomainResult<()> {
    if price <= Decimal::ZERO {
        return Err(DomainError::invalid_field("price", "price must be positive"));
    }
    if price.normalize().scale() > 2 {
        return Err(DomainError::invalid_field(
            "price",
            "price must have at most 2 decimal places",
        ));
    }
    Ok(())
}

fn validate_cost(cost: Decimal) -> DomainResult<()> {
    if cost <= Decimal::ZERO {
        return Err(DomainError::invalid_field("cost", "cost must be positive"));
    }
    if cost.normalize().scale() > 2 {
        return Err(DomainError::invalid_field(
            "cost",
            "cost must have at most 2 decimal places",
        ));
    }
    Ok(())
}

fn validate_margin(margin: Decimal) -> DomainResult<()> {
    if margin < Decimal::ZERO || margin > Decimal::ONE_HUNDRED {
        return Err(DomainError::invalid_field("margin", "margin must be between 0 and 100"));
    }
    Ok(())
}

fn ensure_cost_below_price(price: Decimal, cost: Option<Decimal>) -> DomainResult<()> {
    match cost {
        Some(cost) if cost >= price => Err(DomainError::invalid_field(
            "cost",
            "cost must be lower than price",
        )),
        _ => Ok(()),
    }
}
