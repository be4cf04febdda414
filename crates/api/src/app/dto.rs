use rust_decimal::Decimal;
use serde::Deserialize;

use winnerlens_auth::{normalize_email, LoginUser, RegisterUser};
use winnerlens_auth::user::{MIN_NAME_LEN, MIN_PASSWORD_LEN};
use winnerlens_infra::{ProductQuery, SortBy, SortOrder, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
use winnerlens_products::{
    CreateProduct, Product, ProductOptions, ProductStatus, Score, SubScores, UpdateProduct,
};

use crate::app::errors::FieldError;

type Validated<T> = Result<T, Vec<FieldError>>;

fn finish<T>(errors: Vec<FieldError>, value: impl FnOnce() -> T) -> Validated<T> {
    if errors.is_empty() { Ok(value()) } else { Err(errors) }
}

// -------------------------
// Auth
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl RegisterRequest {
    pub fn validate(self) -> Validated<RegisterUser> {
        let mut errors = Vec::new();
        check_email(self.email.as_deref(), &mut errors);

        match self.password.as_deref() {
            None => errors.push(FieldError::new("password", "Password is required")),
            Some(p) if p.chars().count() < MIN_PASSWORD_LEN => errors.push(FieldError::new(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            )),
            Some(_) => {}
        }

        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() && name.chars().count() < MIN_NAME_LEN {
                errors.push(FieldError::new(
                    "name",
                    format!("Name must be at least {MIN_NAME_LEN} characters"),
                ));
            }
        }

        finish(errors, || RegisterUser {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            name: self.name,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> Validated<LoginUser> {
        let mut errors = Vec::new();
        check_email(self.email.as_deref(), &mut errors);
        if self.password.as_deref().is_none_or(str::is_empty) {
            errors.push(FieldError::new("password", "Password is required"));
        }

        finish(errors, || LoginUser {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

fn check_email(email: Option<&str>, errors: &mut Vec<FieldError>) {
    match email {
        None => errors.push(FieldError::new("email", "Email is required")),
        Some(e) if normalize_email(e).is_err() => {
            errors.push(FieldError::new("email", "Invalid email format"))
        }
        Some(_) => {}
    }
}

// -------------------------
// Products
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub margin: Option<Decimal>,
    pub options: Option<ProductOptions>,
}

impl CreateProductRequest {
    pub fn validate(self) -> Validated<CreateProduct> {
        let mut errors = Vec::new();

        match self.product_name.as_deref() {
            None => errors.push(FieldError::new("productName", "Product name is required")),
            Some(name) => check_product_name(name, &mut errors),
        }
        match self.category.as_deref() {
            None => errors.push(FieldError::new("category", "Category is required")),
            Some(category) => check_category(category, &mut errors),
        }
        match self.price {
            None => errors.push(FieldError::new("price", "Price is required")),
            Some(price) => check_amount("price", "Price", price, &mut errors),
        }
        if let Some(cost) = self.cost {
            check_amount("cost", "Cost", cost, &mut errors);
        }
        check_cost_below_price(self.price, self.cost, &mut errors);
        if let Some(margin) = self.margin {
            check_margin(margin, &mut errors);
        }

        finish(errors, || CreateProduct {
            product_name: self.product_name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            description: self.description,
            price: self.price.unwrap_or_default(),
            cost: self.cost,
            margin: self.margin,
            options: self.options,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub margin: Option<Decimal>,
    pub options: Option<ProductOptions>,
    pub status: Option<String>,
}

impl UpdateProductRequest {
    pub fn validate(self) -> Validated<UpdateProduct> {
        let mut errors = Vec::new();

        if let Some(name) = self.product_name.as_deref() {
            check_product_name(name, &mut errors);
        }
        if let Some(category) = self.category.as_deref() {
            check_category(category, &mut errors);
        }
        if let Some(price) = self.price {
            check_amount("price", "Price", price, &mut errors);
        }
        if let Some(cost) = self.cost {
            check_amount("cost", "Cost", cost, &mut errors);
        }
        // Checked against the stored price by the entity when only one side is sent.
        check_cost_below_price(self.price, self.cost, &mut errors);
        if let Some(margin) = self.margin {
            check_margin(margin, &mut errors);
        }
        let status = parse_status(self.status.as_deref(), &mut errors);

        finish(errors, || UpdateProduct {
            product_name: self.product_name,
            category: self.category,
            description: self.description,
            price: self.price,
            cost: self.cost,
            margin: self.margin,
            options: self.options,
            status,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    pub demand_score: Option<Decimal>,
    pub competition_score: Option<Decimal>,
    pub margin_score: Option<Decimal>,
    pub operability_score: Option<Decimal>,
}

impl UpdateScoreRequest {
    pub fn validate(self) -> Validated<SubScores> {
        let mut errors = Vec::new();
        let mut score = |field: &str, value: Option<Decimal>| {
            value.and_then(|v| match Score::new(v) {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.push(FieldError::new(field, format!("{field} must be between 0 and 100")));
                    None
                }
            })
        };

        let scores = SubScores {
            demand: score("demandScore", self.demand_score),
            competition: score("competitionScore", self.competition_score),
            margin: score("marginScore", self.margin_score),
            operability: score("operabilityScore", self.operability_score),
        };

        finish(errors, || scores)
    }
}

/// Raw list query string; every value arrives as text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
}

impl ListProductsQuery {
    pub fn validate(self) -> Validated<ProductQuery> {
        let mut errors = Vec::new();

        let page = parse_count("page", self.page.as_deref(), DEFAULT_PAGE, 1..=u32::MAX, &mut errors);
        let limit = parse_count("limit", self.limit.as_deref(), DEFAULT_LIMIT, 1..=MAX_LIMIT, &mut errors);
        let status = parse_status(self.status.as_deref(), &mut errors);

        let sort_by = match self.sort_by.as_deref() {
            None => SortBy::default(),
            Some(s) => s.parse::<SortBy>().unwrap_or_else(|e| {
                errors.push(FieldError::new("sortBy", e));
                SortBy::default()
            }),
        };
        let sort_order = match self.sort_order.as_deref() {
            None => SortOrder::default(),
            Some(s) => s.parse::<SortOrder>().unwrap_or_else(|e| {
                errors.push(FieldError::new("sortOrder", e));
                SortOrder::default()
            }),
        };

        finish(errors, || ProductQuery {
            category: self.category.filter(|c| !c.is_empty()),
            status,
            search: self.search.filter(|s| !s.is_empty()),
            sort_by,
            sort_order,
            page,
            limit,
        })
    }
}

fn parse_count(
    field: &str,
    raw: Option<&str>,
    default: u32,
    range: std::ops::RangeInclusive<u32>,
    errors: &mut Vec<FieldError>,
) -> u32 {
    let Some(raw) = raw else { return default };

    let parsed = if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        raw.parse::<u32>().ok().filter(|v| range.contains(v))
    };

    parsed.unwrap_or_else(|| {
        errors.push(FieldError::new(
            field,
            format!("{field} must be an integer between {} and {}", range.start(), range.end()),
        ));
        default
    })
}

fn parse_status(raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<ProductStatus> {
    let raw = raw?;
    match raw.parse::<ProductStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push(FieldError::new(
                "status",
                "status must be one of draft, pending, registered, rejected",
            ));
            None
        }
    }
}

fn check_product_name(name: &str, errors: &mut Vec<FieldError>) {
    if name.trim().chars().count() < 2 {
        errors.push(FieldError::new(
            "productName",
            "Product name must be at least 2 characters",
        ));
    }
}

fn check_category(category: &str, errors: &mut Vec<FieldError>) {
    if category.trim().is_empty() {
        errors.push(FieldError::new("category", "Category is required"));
    }
}

/// Money amounts: strictly positive, whole cents.
fn check_amount(field: &str, label: &str, value: Decimal, errors: &mut Vec<FieldError>) {
    if value <= Decimal::ZERO {
        errors.push(FieldError::new(field, format!("{label} must be positive")));
    } else if value.normalize().scale() > 2 {
        errors.push(FieldError::new(
            field,
            format!("{label} must have at most 2 decimal places"),
        ));
    }
}

fn check_cost_below_price(
    price: Option<Decimal>,
    cost: Option<Decimal>,
    errors: &mut Vec<FieldError>,
) {
    if let (Some(price), Some(cost)) = (price, cost) {
        if price > Decimal::ZERO && cost >= price {
            errors.push(FieldError::new("cost", "Cost must be lower than price"));
        }
    }
}

fn check_margin(margin: Decimal, errors: &mut Vec<FieldError>) {
    if margin < Decimal::ZERO || margin > Decimal::ONE_HUNDRED {
        errors.push(FieldError::new("margin", "Margin must be between 0 and 100"));
    }
}

// -------------------------
// Trends / AI
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    pub category: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductNameRequest {
    pub category: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl ProductNameRequest {
    pub fn validate(self) -> Validated<(String, Vec<String>)> {
        let mut errors = Vec::new();
        let category = self.category.filter(|c| !c.trim().is_empty());
        let keywords = self.keywords.filter(|k| !k.is_empty());

        if category.is_none() {
            errors.push(FieldError::new("category", "카테고리는 필수입니다"));
        }
        if keywords.is_none() {
            errors.push(FieldError::new("keywords", "키워드는 비어있지 않은 배열이어야 합니다"));
        }

        finish(errors, || (category.unwrap_or_default(), keywords.unwrap_or_default()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescriptionRequest {
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub features: Option<Vec<String>>,
}

/// Validated description request: product name, category, features.
#[derive(Debug)]
pub struct DescriptionInput {
    pub product_name: String,
    pub category: String,
    pub features: Vec<String>,
}

impl ProductDescriptionRequest {
    pub fn validate(self) -> Validated<DescriptionInput> {
        let mut errors = Vec::new();
        let product_name = self.product_name.filter(|n| !n.trim().is_empty());
        let category = self.category.filter(|c| !c.trim().is_empty());

        if product_name.is_none() {
            errors.push(FieldError::new("productName", "상품명은 필수입니다"));
        }
        if category.is_none() {
            errors.push(FieldError::new("category", "카테고리는 필수입니다"));
        }
        if self.features.is_none() {
            errors.push(FieldError::new("features", "특징은 배열이어야 합니다"));
        }

        finish(errors, || DescriptionInput {
            product_name: product_name.unwrap_or_default(),
            category: category.unwrap_or_default(),
            features: self.features.unwrap_or_default(),
        })
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    let scores = p.scores();
    serde_json::json!({
        "id": p.id().to_string(),
        "userId": p.owner().to_string(),
        "productName": p.product_name(),
        "category": p.category(),
        "description": p.description(),
        "price": p.price(),
        "cost": p.cost(),
        "margin": p.margin(),
        "options": p.options(),
        "demandScore": scores.demand,
        "competitionScore": scores.competition,
        "marginScore": scores.margin,
        "operabilityScore": scores.operability,
        "totalScore": p.total_score(),
        "status": p.status(),
        "coupangProductId": p.coupang_product_id(),
        "createdAt": p.created_at(),
        "updatedAt": p.updated_at(),
    })
}
