//! Per-category product statistics.

use std::collections::HashMap;

use serde::Serialize;

use crate::product::ProductStatus;

/// The slice of a product the category aggregation needs.
pub trait CategoryMember {
    fn category(&self) -> &str;
    fn status(&self) -> ProductStatus;
    fn total_score(&self) -> Option<u8>;
}

/// Free-standing aggregation input (useful when products come from a projection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: String,
    pub status: ProductStatus,
    pub total_score: Option<u8>,
}

impl CategoryMember for CategoryEntry {
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

/// Status counts and average composite score of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: String,
    pub total: u32,
    pub draft: u32,
    pub pending: u32,
    pub registered: u32,
    pub rejected: u32,
    pub avg_score: u32,
}

impl CategoryStats {
    fn empty(category: &str) -> Self {
        Self {
            category: category.to_string(),
            total: 0,
            draft: 0,
            pending: 0,
            registered: 0,
            rejected: 0,
            avg_score: 0,
        }
    }

    fn count(&mut self, status: ProductStatus) {
        self.total += 1;
        match status {
            ProductStatus::Draft => self.draft += 1,
            ProductStatus::Pending => self.pending += 1,
            ProductStatus::Registered => self.registered += 1,
            ProductStatus::Rejected => self.rejected += 1,
        }
    }
}

/// Group products by category in a single pass.
///
/// Output follows the order in which categories are first seen. Unscored
/// products contribute 0 to the average.
pub fn aggregate_by_category<'a, T, I>(products: I) -> Vec<CategoryStats>
where
    T: CategoryMember + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut stats: Vec<CategoryStats> = Vec::new();
    let mut score_sums: Vec<u64> = Vec::new();

    for product in products {
        let slot = match index.get(product.category()) {
            Some(&slot) => slot,
            None => {
                stats.push(CategoryStats::empty(product.category()));
                score_sums.push(0);
                index.insert(product.category().to_string(), stats.len() - 1);
                stats.len() - 1
            }
        };

        stats[slot].count(product.status());
        score_sums[slot] += u64::from(product.total_score().unwrap_or(0));
    }

    for (entry, sum) in stats.iter_mut().zip(score_sums) {
        entry.avg_score = rounded_average(sum, u64::from(entry.total));
    }

    stats
}

// Half-up integer division: round(sum / count).
fn rounded_average(sum: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    let avg = (2 * sum + count) / (2 * count);
    u32::try_from(avg).unwrap_or(u32::MAX)
}
