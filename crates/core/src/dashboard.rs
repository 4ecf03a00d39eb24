//! Dashboard summary over the caller's visible leads.

use std::collections::HashMap;

use serde::Serialize;

use crate::lead::{LeadFields, LEAD_STATUSES, STATUS_CONVERTED, STATUS_NEW};
use crate::performance::conversion_rate;

/// How many bike models the summary ranks.
pub const TOP_BIKE_MODELS: usize = 5;

/// Bucket for leads without a bike model.
pub const UNKNOWN_BIKE_MODEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountBucket {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_leads: u32,
    pub new_leads: u32,
    pub converted_leads: u32,
    /// Percentage rounded to one decimal place.
    pub conversion_rate: f64,
    /// Non-empty status buckets in lifecycle order.
    pub status_distribution: Vec<CountBucket>,
    /// Most requested bike models, highest count first.
    pub top_bike_models: Vec<CountBucket>,
}

/// Summarize a lead list the way the dashboard cards and charts show it.
pub fn summarize<L: LeadFields>(leads: &[L]) -> DashboardSummary {
    let mut by_status: HashMap<&str, u32> = HashMap::new();
    let mut by_model: HashMap<&str, u32> = HashMap::new();

    for lead in leads {
        *by_status.entry(lead.status()).or_default() += 1;
        let model = lead
            .bike_model()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(UNKNOWN_BIKE_MODEL);
        *by_model.entry(model).or_default() += 1;
    }

    let total = leads.len() as u32;
    let new = by_status.get(STATUS_NEW).copied().unwrap_or(0);
    let converted = by_status.get(STATUS_CONVERTED).copied().unwrap_or(0);

    let status_distribution = LEAD_STATUSES
        .iter()
        .filter_map(|status| {
            by_status.get(status).map(|&value| CountBucket {
                name: (*status).to_string(),
                value,
            })
        })
        .collect();

    let mut models: Vec<CountBucket> = by_model
        .into_iter()
        .map(|(name, value)| CountBucket {
            name: name.to_string(),
            value,
        })
        .collect();
    models.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    models.truncate(TOP_BIKE_MODELS);

    DashboardSummary {
        total_leads: total,
        new_leads: new,
        converted_leads: converted,
        conversion_rate: round_one_decimal(conversion_rate(converted, total)),
        status_distribution,
        top_bike_models: models,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::tests::TestLead;
    use crate::lead::{STATUS_CONTACTED, STATUS_LOST};

    #[test]
    fn test_empty_book() {
        let summary = summarize::<TestLead>(&[]);
        assert_eq!(summary.total_leads, 0);
        assert_eq!(summary.conversion_rate, 0.0);
        assert!(summary.status_distribution.is_empty());
        assert!(summary.top_bike_models.is_empty());
    }

    #[test]
    fn test_counts_and_rounded_rate() {
        let leads = vec![
            TestLead::named("A", Some("Jupiter"), STATUS_NEW),
            TestLead::named("B", Some("Jupiter"), STATUS_CONVERTED),
            TestLead::named("C", Some("Raider"), STATUS_CONTACTED),
        ];
        let summary = summarize(&leads);
        assert_eq!(summary.total_leads, 3);
        assert_eq!(summary.new_leads, 1);
        assert_eq!(summary.converted_leads, 1);
        assert_eq!(summary.conversion_rate, 33.3);
    }

    #[test]
    fn test_status_distribution_skips_empty_buckets_in_lifecycle_order() {
        let leads = vec![
            TestLead::new(STATUS_LOST),
            TestLead::new(STATUS_NEW),
            TestLead::new(STATUS_NEW),
        ];
        let names: Vec<_> = summarize(&leads)
            .status_distribution
            .into_iter()
            .map(|b| (b.name, b.value))
            .collect();
        assert_eq!(names, vec![("new".to_string(), 2), ("lost".to_string(), 1)]);
    }

    #[test]
    fn test_top_models_capped_and_unknown_bucketed() {
        let mut leads = Vec::new();
        for (model, count) in [
            (Some("Jupiter"), 4),
            (None, 3),
            (Some("Raider"), 2),
            (Some("Apache"), 1),
            (Some("Ntorq"), 1),
            (Some("XL100"), 1),
        ] {
            for _ in 0..count {
                leads.push(TestLead::named("x", model, STATUS_NEW));
            }
        }
        let top = summarize(&leads).top_bike_models;
        assert_eq!(top.len(), TOP_BIKE_MODELS);
        assert_eq!(top[0].name, "Jupiter");
        assert_eq!(top[1].name, UNKNOWN_BIKE_MODEL);
        assert_eq!(top[1].value, 3);
        // Ties broken by name: Apache, Ntorq kept; XL100 dropped.
        assert_eq!(top[3].name, "Apache");
        assert_eq!(top[4].name, "Ntorq");
    }
}
