//! Product list queries: filtering, sorting and pagination.

use std::cmp::Ordering;

use serde::Serialize;

use winnerlens_products::{Product, ProductStatus};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Price,
    TotalScore,
}

impl core::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            "price" => Ok(Self::Price),
            "totalScore" => Ok(Self::TotalScore),
            other => Err(format!(
                "sortBy must be one of createdAt, updatedAt, price, totalScore (got `{other}`)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl core::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("sortOrder must be asc or desc (got `{other}`)")),
        }
    }
}

/// List query for an owner's products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Exact category match.
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            status: None,
            search: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category() != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if product.status() != status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !product.product_name().to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Ordering for the requested sort. Ties fall back to creation time, then id.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self.sort_by {
            SortBy::CreatedAt => a.created_at().cmp(&b.created_at()),
            SortBy::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
            SortBy::Price => a.price().cmp(&b.price()),
            SortBy::TotalScore => unscored_last(a.total_score(), b.total_score()),
        };
        let ordered = primary
            .then_with(|| a.created_at().cmp(&b.created_at()))
            .then_with(|| a.id().cmp(&b.id()));

        match self.sort_order {
            SortOrder::Asc => ordered,
            SortOrder::Desc => ordered.reverse(),
        }
    }

    fn page(&self) -> u32 {
        self.page.max(1)
    }

    fn limit(&self) -> u32 {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Filter, sort and cut one page out of `products`.
    pub fn apply(&self, products: Vec<Product>) -> Page<Product> {
        let mut matching: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        matching.sort_by(|a, b| self.compare(a, b));

        let (page, limit) = (self.page(), self.limit());
        let total = matching.len() as u64;
        let skip = (u64::from(page) - 1) * u64::from(limit);

        let data = matching
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(limit as usize)
            .collect();

        Page {
            data,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: total.div_ceil(u64::from(limit)),
            },
        }
    }
}

// Unscored products sort after every scored one (before them once reversed).
fn unscored_last(a: Option<u8>, b: Option<u8>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use winnerlens_core::{ProductId, UserId};
    use winnerlens_products::{CreateProduct, Score, SubScores};

    fn product(name: &str, category: &str, price: i64, minutes: i64, score: Option<i64>) -> Product {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        let mut p = Product::create(
            ProductId::new(),
            UserId::new(),
            CreateProduct {
                product_name: name.to_string(),
                category: category.to_string(),
                description: None,
                price: Decimal::from(price),
                cost: None,
                margin: None,
                options: None,
            },
            at,
        )
        .unwrap();
        if let Some(score) = score {
            let s = Score::new(Decimal::from(score)).unwrap();
            p.apply_scores(
                SubScores {
                    demand: Some(s),
                    competition: Some(s),
                    margin: Some(s),
                    operability: Some(s),
                },
                at,
            );
        }
        p
    }

    fn names(page: &Page<Product>) -> Vec<&str> {
        page.data.iter().map(|p| p.product_name()).collect()
    }

    fn fixture() -> Vec<Product> {
        vec![
            product("Wireless Fan", "Home", 20000, 0, Some(80)),
            product("Desk Lamp", "Home", 35000, 1, None),
            product("USB Fan", "Electronics", 9000, 2, Some(40)),
            product("Phone Case", "Electronics", 12000, 3, Some(95)),
        ]
    }

    #[test]
    fn default_is_newest_first() {
        let page = ProductQuery::default().apply(fixture());
        assert_eq!(names(&page), ["Phone Case", "USB Fan", "Desk Lamp", "Wireless Fan"]);
        assert_eq!(
            page.pagination,
            Pagination {
                page: 1,
                limit: 10,
                total: 4,
                total_pages: 1
            }
        );
    }

    #[test]
    fn filters_combine() {
        let query = ProductQuery {
            category: Some("Home".to_string()),
            search: Some("fAN".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&query.apply(fixture())), ["Wireless Fan"]);

        let query = ProductQuery {
            status: Some(ProductStatus::Registered),
            ..ProductQuery::default()
        };
        assert!(query.apply(fixture()).data.is_empty());
    }

    #[test]
    fn sort_by_price_ascending() {
        let query = ProductQuery {
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
            ..ProductQuery::default()
        };
        assert_eq!(
            names(&query.apply(fixture())),
            ["USB Fan", "Phone Case", "Wireless Fan", "Desk Lamp"]
        );
    }

    #[test]
    fn unscored_sorts_last_ascending_and_first_descending() {
        let asc = ProductQuery {
            sort_by: SortBy::TotalScore,
            sort_order: SortOrder::Asc,
            ..ProductQuery::default()
        };
        assert_eq!(
            names(&asc.apply(fixture())),
            ["USB Fan", "Wireless Fan", "Phone Case", "Desk Lamp"]
        );

        let desc = ProductQuery {
            sort_order: SortOrder::Desc,
            ..asc
        };
        assert_eq!(
            names(&desc.apply(fixture())),
            ["Desk Lamp", "Phone Case", "Wireless Fan", "USB Fan"]
        );
    }

    #[test]
    fn pagination_slices_and_counts_pages() {
        let query = ProductQuery {
            page: 2,
            limit: 3,
            ..ProductQuery::default()
        };
        let page = query.apply(fixture());
        assert_eq!(names(&page), ["Wireless Fan"]);
        assert_eq!(page.pagination.total, 4);
        assert_eq!(page.pagination.total_pages, 2);

        let beyond = ProductQuery {
            page: 9,
            ..query
        };
        assert!(beyond.apply(fixture()).data.is_empty());
    }

    #[test]
    fn out_of_range_page_and_limit_are_clamped() {
        let query = ProductQuery {
            page: 0,
            limit: 500,
            ..ProductQuery::default()
        };
        let page = query.apply(fixture());
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.limit, MAX_LIMIT);
    }

    #[test]
    fn sort_keys_parse_from_wire_names() {
        assert_eq!("totalScore".parse::<SortBy>(), Ok(SortBy::TotalScore));
        assert!("name".parse::<SortBy>().is_err());
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert!("ASC".parse::<SortOrder>().is_err());
    }
}
