//! Trend simulation.

use rand::Rng;

use crate::report::{ChartData, Dataset, RisingKeyword, TrendReport, TrendSummary};

pub const DEFAULT_CATEGORY: &str = "전체";
pub const DEFAULT_PERIOD: &str = "1년";

pub const MONTH_LABELS: [&str; 12] = [
    "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
];

const RISING_KEYWORDS: [(&str, u32); 5] = [
    ("초경량 무선 선풍기", 150),
    ("방수 블루투스 스피커", 85),
    ("휴대용 보조배터리", 45),
    ("캠핑용 미니 빔프로젝터", 30),
    ("스마트워치 스트랩", 25),
];

/// Monthly search-volume baseline and compound growth for a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    pub base_volume: f64,
    pub growth_rate: f64,
}

impl CategoryProfile {
    pub fn for_category(category: &str) -> Self {
        match category {
            "패션" => Self {
                base_volume: 5000.0,
                growth_rate: 1.2,
            },
            "전자기기" => Self {
                base_volume: 3000.0,
                growth_rate: 1.05,
            },
            _ => Self {
                base_volume: 1000.0,
                growth_rate: 1.1,
            },
        }
    }

    fn volume_at(&self, month: usize, jitter: f64) -> u64 {
        (self.base_volume * self.growth_rate.powi(month as i32) * jitter).floor() as u64
    }
}

/// Build a simulated twelve-month report.
///
/// `rng` is injected so callers (and tests) control the randomness. Blank or
/// absent `category`/`period` fall back to [`DEFAULT_CATEGORY`]/[`DEFAULT_PERIOD`].
pub fn simulate_trends<R: Rng + ?Sized>(
    category: Option<&str>,
    period: Option<&str>,
    rng: &mut R,
) -> TrendReport {
    let category = non_blank(category).unwrap_or(DEFAULT_CATEGORY);
    let period = non_blank(period).unwrap_or(DEFAULT_PERIOD);
    let profile = CategoryProfile::for_category(category);

    let search_volume: Vec<u64> = (0..MONTH_LABELS.len())
        .map(|month| profile.volume_at(month, rng.gen_range(0.8..1.2)))
        .collect();

    // 60..=99
    let competition: Vec<u64> = (0..MONTH_LABELS.len())
        .map(|_| (rng.r#gen::<f64>() * 40.0).floor() as u64 + 60)
        .collect();

    let rising_keywords: Vec<RisingKeyword> = RISING_KEYWORDS
        .iter()
        .map(|(keyword, growth)| RisingKeyword {
            keyword: (*keyword).to_string(),
            growth: *growth,
        })
        .collect();

    let summary = TrendSummary {
        total_search_volume: search_volume.iter().sum(),
        average_competition: competition.iter().sum::<u64>() / competition.len() as u64,
        top_keyword: rising_keywords[0].keyword.clone(),
    };

    TrendReport {
        category: category.to_string(),
        period: period.to_string(),
        chart_data: ChartData {
            labels: MONTH_LABELS.iter().map(|l| (*l).to_string()).collect(),
            datasets: vec![
                Dataset {
                    label: "검색량".to_string(),
                    data: search_volume,
                    border_color: "rgb(75, 192, 192)".to_string(),
                    background_color: "rgba(75, 192, 192, 0.5)".to_string(),
                },
                Dataset {
                    label: "경쟁 강도".to_string(),
                    data: competition,
                    border_color: "rgb(255, 99, 132)".to_string(),
                    background_color: "rgba(255, 99, 132, 0.5)".to_string(),
                },
            ],
        },
        rising_keywords,
        summary,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn defaults_apply_to_missing_or_blank_inputs() {
        let report = simulate_trends(None, Some("  "), &mut rng(1));
        assert_eq!(report.category, "전체");
        assert_eq!(report.period, "1년");
    }

    #[test]
    fn twelve_monthly_points_per_dataset() {
        let report = simulate_trends(Some("패션"), Some("6개월"), &mut rng(2));
        assert_eq!(report.chart_data.labels.len(), 12);
        assert_eq!(report.chart_data.labels[0], "1월");
        assert_eq!(report.chart_data.labels[11], "12월");
        assert_eq!(report.chart_data.datasets.len(), 2);
        for dataset in &report.chart_data.datasets {
            assert_eq!(dataset.data.len(), 12);
        }
        assert_eq!(report.period, "6개월");
    }

    #[test]
    fn same_seed_same_report() {
        let a = simulate_trends(Some("전자기기"), None, &mut rng(7));
        let b = simulate_trends(Some("전자기기"), None, &mut rng(7));
        assert_eq!(a, b);
    }

    #[test]
    fn summary_matches_datasets() {
        let report = simulate_trends(None, None, &mut rng(3));
        let volume = &report.chart_data.datasets[0].data;
        let competition = &report.chart_data.datasets[1].data;

        assert_eq!(report.summary.total_search_volume, volume.iter().sum::<u64>());
        assert_eq!(
            report.summary.average_competition,
            competition.iter().sum::<u64>() / 12
        );
        assert_eq!(report.summary.top_keyword, "초경량 무선 선풍기");
        assert_eq!(report.rising_keywords.len(), 5);
    }

    #[test]
    fn category_profiles() {
        assert_eq!(CategoryProfile::for_category("패션").base_volume, 5000.0);
        assert_eq!(CategoryProfile::for_category("전자기기").growth_rate, 1.05);
        assert_eq!(CategoryProfile::for_category("식품").base_volume, 1000.0);
    }

    #[test]
    fn serializes_chart_friendly_shape() {
        let json = serde_json::to_value(simulate_trends(None, None, &mut rng(4))).unwrap();
        assert!(json["chartData"]["datasets"][0]["borderColor"].is_string());
        assert_eq!(json["risingKeywords"][0]["growth"], 150);
        assert!(json["summary"]["totalSearchVolume"].is_u64());
    }

    proptest! {
        #[test]
        fn values_stay_within_jitter_bounds(seed in any::<u64>()) {
            let report = simulate_trends(Some("패션"), None, &mut rng(seed));
            let profile = CategoryProfile::for_category("패션");

            for (month, volume) in report.chart_data.datasets[0].data.iter().enumerate() {
                let expected = profile.base_volume * profile.growth_rate.powi(month as i32);
                prop_assert!(*volume as f64 >= (expected * 0.8).floor());
                prop_assert!((*volume as f64) < expected * 1.2);
            }
            for competition in &report.chart_data.datasets[1].data {
                prop_assert!((60..100).contains(competition));
            }
        }
    }
}
