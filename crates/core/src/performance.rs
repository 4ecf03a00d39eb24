//! Team performance aggregation.
//!
//! A full recomputation over every lead on each call; nothing is maintained
//! incrementally.

use std::collections::HashMap;

use serde::Serialize;

use crate::lead::{STATUS_CONTACTED, STATUS_CONVERTED, STATUS_LOST, STATUS_NEW, STATUS_QUALIFIED};
use crate::types::UserId;

/// Label used when a salesman profile has no email.
pub const UNKNOWN_EMAIL: &str = "Unknown";

/// A salesman profile to seed the totals with.
#[derive(Debug, Clone)]
pub struct SalesmanProfile {
    pub user_id: UserId,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Running totals for one salesman.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesmanStats {
    pub user_id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub total_leads: u32,
    pub new_leads: u32,
    pub contacted_leads: u32,
    pub qualified_leads: u32,
    pub converted_leads: u32,
    pub lost_leads: u32,
    /// Percentage in `0.0..=100.0`.
    pub conversion_rate: f64,
}

impl SalesmanStats {
    fn seeded(profile: &SalesmanProfile) -> Self {
        Self {
            user_id: profile.user_id,
            email: profile
                .email
                .clone()
                .unwrap_or_else(|| UNKNOWN_EMAIL.to_string()),
            full_name: profile.full_name.clone(),
            total_leads: 0,
            new_leads: 0,
            contacted_leads: 0,
            qualified_leads: 0,
            converted_leads: 0,
            lost_leads: 0,
            conversion_rate: 0.0,
        }
    }

    fn record(&mut self, status: &str) {
        self.total_leads += 1;
        match status {
            STATUS_NEW => self.new_leads += 1,
            STATUS_CONTACTED => self.contacted_leads += 1,
            STATUS_QUALIFIED => self.qualified_leads += 1,
            STATUS_CONVERTED => self.converted_leads += 1,
            STATUS_LOST => self.lost_leads += 1,
            _ => {}
        }
    }
}

/// `converted / total * 100`, or `0` when there are no leads.
pub fn conversion_rate(converted: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(converted) / f64::from(total) * 100.0
    }
}

/// Aggregate `(assigned_to, status)` pairs into per-salesman totals.
///
/// Every profile gets a record even with no leads. Leads that are unassigned
/// or assigned to someone outside `salesmen` are ignored. The result is
/// sorted by total leads, highest first; ties keep the order of `salesmen`.
pub fn compute_team_stats<'a, I>(salesmen: &[SalesmanProfile], leads: I) -> Vec<SalesmanStats>
where
    I: IntoIterator<Item = (Option<UserId>, &'a str)>,
{
    let mut stats: Vec<SalesmanStats> = salesmen.iter().map(SalesmanStats::seeded).collect();
    let index: HashMap<UserId, usize> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| (s.user_id, i))
        .collect();

    for (assigned_to, status) in leads {
        let Some(slot) = assigned_to.and_then(|id| index.get(&id)) else {
            continue;
        };
        stats[*slot].record(status);
    }

    for s in &mut stats {
        s.conversion_rate = conversion_rate(s.converted_leads, s.total_leads);
    }

    stats.sort_by(|a, b| b.total_leads.cmp(&a.total_leads));
    stats
}
