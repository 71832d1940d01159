use crate::shared::serde_helpers::{lenient_i64, lenient_opt_f64};
use serde::{Deserialize, Serialize};

/// Сводка по фиду для вкладки статистики
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedStatistics {
    /// Всего активных товаров в магазине
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_products: i64,

    /// Товаров попадёт в фид с текущими фильтрами
    #[serde(default, deserialize_with = "lenient_i64")]
    pub exported_products: i64,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_categories: i64,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub mapped_categories: i64,

    /// Категорий Rozetka в локальном справочнике
    #[serde(default, deserialize_with = "lenient_i64")]
    pub rozetka_categories: i64,

    #[serde(default)]
    pub last_generation: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub last_generation_time: Option<f64>,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub file_size: i64,

    #[serde(default)]
    pub feed_url: Option<String>,

    #[serde(default)]
    pub cache_valid: bool,
}

impl FeedStatistics {
    /// Доля сопоставленных категорий, процентов
    pub fn mapped_percent(&self) -> u8 {
        if self.total_categories <= 0 {
            return 0;
        }
        let pct = self.mapped_categories as f64 / self.total_categories as f64 * 100.0;
        pct.round().clamp(0.0, 100.0) as u8
    }

    /// Товары, которые отфильтрованы и в фид не попадут
    pub fn skipped_products(&self) -> i64 {
        self.total_products.saturating_sub(self.exported_products).max(0)
    }
}

/// Ответ `get_statistics`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetStatisticsResponse {
    #[serde(default, alias = "stats")]
    pub statistics: FeedStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_statistics_derived_values() {
        let resp: GetStatisticsResponse = serde_json::from_value(json!({
            "status": "success",
            "statistics": {
                "total_products": "200",
                "exported_products": 150,
                "total_categories": 30,
                "mapped_categories": 10,
                "last_generation": "2024-03-15 14:02:26"
            }
        }))
        .unwrap();
        let stats = resp.statistics;
        assert_eq!(stats.mapped_percent(), 33);
        assert_eq!(stats.skipped_products(), 50);
        assert_eq!(stats.file_size, 0);
    }

    #[test]
    fn test_skipped_products_with_extreme_counts() {
        let stats = FeedStatistics {
            total_products: i64::MAX,
            exported_products: -1,
            ..Default::default()
        };
        assert_eq!(stats.skipped_products(), i64::MAX);

        let stats = FeedStatistics {
            total_products: i64::MIN,
            exported_products: 1,
            ..Default::default()
        };
        assert_eq!(stats.skipped_products(), 0);

        let stats = FeedStatistics {
            total_products: 10,
            exported_products: 25,
            ..Default::default()
        };
        assert_eq!(stats.skipped_products(), 0);
    }

    #[test]
    fn test_mapped_percent_without_categories() {
        assert_eq!(FeedStatistics::default().mapped_percent(), 0);
    }
}
