use std::sync::RwLock;

use super::types::{
    CountryShare, Demographic, ModelSales, ModelShare, PenetrationPoint, QuarterlyShare,
    RegionRevenue, RegionSummary, RevenuePoint, Sentiment, Stats,
};

/// Process-wide dataset cache. Background fetch tasks fill it, render
/// systems read snapshots.
pub static STORE: std::sync::LazyLock<DashStore> = std::sync::LazyLock::new(DashStore::default);

#[derive(Debug, Default)]
pub struct DashStore {
    stats: RwLock<Option<Stats>>,
    revenue: RwLock<Vec<RevenuePoint>>,
    penetration: RwLock<Vec<PenetrationPoint>>,
    region_revenue: RwLock<Vec<RegionRevenue>>,
    model_share: RwLock<Vec<ModelShare>>,
    country_share: RwLock<Vec<CountryShare>>,
    quarterly: RwLock<Vec<QuarterlyShare>>,
    sales_summary: RwLock<Vec<RegionSummary>>,
    sales_by_model: RwLock<Vec<ModelSales>>,
    demographics: RwLock<Vec<Demographic>>,
    sentiment: RwLock<Vec<Sentiment>>,
}

macro_rules! dataset_accessors {
    ($($get:ident / $set:ident: $ty:ty => $field:ident,)*) => {
        impl DashStore {
            $(
                pub fn $get(&self) -> $ty {
                    self.$field.read().expect("poison").clone()
                }

                pub fn $set(&self, rows: $ty) {
                    *self.$field.write().expect("poison") = rows;
                }
            )*
        }
    };
}

dataset_accessors! {
    stats / set_stats: Option<Stats> => stats,
    revenue / set_revenue: Vec<RevenuePoint> => revenue,
    penetration / set_penetration: Vec<PenetrationPoint> => penetration,
    region_revenue / set_region_revenue: Vec<RegionRevenue> => region_revenue,
    model_share / set_model_share: Vec<ModelShare> => model_share,
    country_share / set_country_share: Vec<CountryShare> => country_share,
    quarterly / set_quarterly: Vec<QuarterlyShare> => quarterly,
    sales_summary / set_sales_summary: Vec<RegionSummary> => sales_summary,
    sales_by_model / set_sales_by_model: Vec<ModelSales> => sales_by_model,
    demographics / set_demographics: Vec<Demographic> => demographics,
    sentiment / set_sentiment: Vec<Sentiment> => sentiment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trips_a_dataset() {
        let store = DashStore::default();
        assert!(store.revenue().is_empty());

        store.set_revenue(vec![RevenuePoint {
            year: 2024,
            revenue: 391.0,
        }]);
        let rows = store.revenue();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2024);
    }

    #[test]
    fn stats_start_empty() {
        let store = DashStore::default();
        assert!(store.stats().is_none());

        store.set_stats(Some(Stats {
            total_revenue: 1294.7,
            ..Stats::default()
        }));
        assert_eq!(store.stats().map(|s| s.total_revenue), Some(1294.7));
    }
}
