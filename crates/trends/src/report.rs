use serde::Serialize;

/// One simulated trend report, shaped for a line-chart front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub category: String,
    pub period: String,
    pub chart_data: ChartData,
    pub rising_keywords: Vec<RisingKeyword>,
    pub summary: TrendSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    pub border_color: String,
    pub background_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RisingKeyword {
    pub keyword: String,
    /// Growth in percent.
    pub growth: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub total_search_volume: u64,
    pub average_competition: u64,
    pub top_keyword: String,
}
