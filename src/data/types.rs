use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Analytics API connection state, shown in the footer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, bytemuck::NoUninit)]
#[repr(u8)]
pub enum ReadyState {
    #[default]
    Connecting,
    Open,
    Closed,
}

/// Datasets served by the analytics API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum Dataset {
    Stats,
    Revenue,
    Penetration,
    RegionRevenue,
    ModelShare,
    CountryShare,
    Quarterly,
    SalesSummary,
    SalesByModel,
    Demographics,
    Sentiment,
}

impl Dataset {
    pub fn endpoint(self) -> &'static str {
        match self {
            Dataset::Stats => "/api/stats",
            Dataset::Revenue => "/api/revenue",
            Dataset::Penetration => "/api/penetration",
            Dataset::RegionRevenue => "/api/region-revenue",
            Dataset::ModelShare => "/api/model-share",
            Dataset::CountryShare => "/api/country-share",
            Dataset::Quarterly => "/api/quarterly",
            Dataset::SalesSummary => "/api/sales-summary",
            Dataset::SalesByModel => "/api/sales-by-model",
            Dataset::Demographics => "/api/demographics",
            Dataset::Sentiment => "/api/sentiment",
        }
    }
}

/// Headline numbers for the overview tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Stats {
    /// Cumulative revenue since 2019, billions of dollars.
    pub total_revenue: f64,
    /// Best single year, billions of dollars.
    pub peak_revenue: f64,
    /// Units sold since 2019, millions.
    pub total_units: f64,
    /// Active device owners, millions.
    pub active_users: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct RevenuePoint {
    pub year: i32,
    pub revenue: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct PenetrationPoint {
    pub year: i32,
    pub units: f64,
    pub active_users: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct RegionRevenue {
    pub year: i32,
    #[serde(rename = "Americas")]
    pub americas: f64,
    #[serde(rename = "Europe")]
    pub europe: f64,
    #[serde(rename = "China")]
    pub china: f64,
    #[serde(rename = "Japan")]
    pub japan: f64,
    #[serde(rename = "Asia_Pacific")]
    pub asia_pacific: f64,
}

impl RegionRevenue {
    pub const REGIONS: [&'static str; 5] = ["Americas", "Europe", "China", "Japan", "Asia Pacific"];

    pub fn values(&self) -> [f64; 5] {
        [
            self.americas,
            self.europe,
            self.china,
            self.japan,
            self.asia_pacific,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ModelShare {
    pub model: String,
    /// Percent of sales, already scaled to 0–100.
    pub share: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CountryShare {
    pub country: String,
    pub model: String,
    pub share: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuarterlyShare {
    pub year: i32,
    pub brand: String,
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q2")]
    pub q2: f64,
    #[serde(rename = "Q3")]
    pub q3: f64,
    #[serde(rename = "Q4")]
    pub q4: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RegionSummary {
    pub region: String,
    pub units: f64,
    /// Billions of dollars.
    pub revenue: f64,
    pub share: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ModelSales {
    pub model: String,
    pub units: f64,
    pub revenue: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Demographic {
    pub age: String,
    pub users: f64,
    pub avg_value: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Sentiment {
    pub sentiment: String,
    pub count: f64,
    pub mentions: f64,
    pub engagement: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_revenue_accepts_the_api_field_names() {
        let row: RegionRevenue = serde_json::from_str(
            r#"{"year":2023,"Americas":162.6,"Europe":94.3,"China":72.6,"Japan":24.3,"Asia_Pacific":29.6}"#,
        )
        .expect("decode");
        assert_eq!(row.year, 2023);
        assert_eq!(row.values()[0], 162.6);
        assert_eq!(row.values()[4], 29.6);
    }

    #[test]
    fn quarterly_share_accepts_uppercase_quarters() {
        let row: QuarterlyShare = serde_json::from_str(
            r#"{"year":2024,"brand":"Apple","Q1":20.1,"Q2":15.8,"Q3":17.7,"Q4":23.4}"#,
        )
        .expect("decode");
        assert_eq!(row.brand, "Apple");
        assert_eq!(row.q4, 23.4);
    }

    #[test]
    fn integer_counts_decode_into_floats() {
        let stats: Stats = serde_json::from_str(
            r#"{"total_revenue":1294.7,"peak_revenue":394.3,"total_units":1058.3,"active_users":1334}"#,
        )
        .expect("decode");
        assert_eq!(stats.active_users, 1334.0);
    }
}
