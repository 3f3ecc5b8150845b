//! Aggregation over in-memory record snapshots. Every function here is a
//! pure, total computation: empty input yields zero-valued results, and the
//! reference instant is always an explicit parameter, never an ambient
//! clock read.

use chrono::{Duration, NaiveDateTime};

use crate::domain::estimate::CostEstimate;
use crate::domain::money::sanitize_amount;
use crate::domain::repair::RepairJob;

/// Counter map that remembers the first-seen order of its keys.
///
/// Keys compare by exact string match; callers supply already-normalized
/// labels. Display code sorts by descending count, and the stable sort keeps
/// first-seen order for ties.
#[derive(Debug, Clone, Default)]
pub struct OrderedCounts {
    entries: Vec<(String, i64)>,
}

impl OrderedCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&mut self, key: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 += 1;
        } else {
            self.entries.push((key.to_string(), 1));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn sum(&self) -> i64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Entries by descending count; ties keep first-seen order.
    pub fn sorted_desc(&self) -> Vec<(String, i64)> {
        let mut out = self.entries.clone();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    /// Key with the highest count; first-seen wins a tie.
    pub fn most_common(&self) -> Option<&str> {
        let mut best: Option<(&str, i64)> = None;
        for (key, count) in &self.entries {
            match best {
                Some((_, top)) if *count <= top => {}
                _ => best = Some((key, *count)),
            }
        }
        best.map(|(key, _)| key)
    }
}

/// Grouped and rolling-window intake counts.
#[derive(Debug, Clone, Default)]
pub struct RepairCounts {
    pub total: i64,
    pub by_make: OrderedCounts,
    pub by_displacement: OrderedCounts,
    pub last_week: i64,
    pub last_month: i64,
}

/// Single pass over the intake list. `now` anchors both rolling windows:
/// inclusive lower bound at `now - 7` / `now - 30` days of real elapsed
/// time, no upper bound. Jobs without a creation timestamp count toward the
/// total and the groupings but neither window.
pub fn count_repairs(jobs: &[RepairJob], now: NaiveDateTime) -> RepairCounts {
    let week_start = now - Duration::days(7);
    let month_start = now - Duration::days(30);

    let mut counts = RepairCounts {
        total: jobs.len() as i64,
        ..RepairCounts::default()
    };

    for job in jobs {
        counts.by_make.bump(&job.make);
        counts.by_displacement.bump(&job.displacement);

        if let Some(created) = job.created_at {
            if created >= week_start {
                counts.last_week += 1;
            }
            if created >= month_start {
                counts.last_month += 1;
            }
        }
    }

    counts
}

/// Totals for the estimates that fall in one calendar month, or all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialSummary {
    pub labor: f64,
    pub parts: f64,
    pub grand_total: f64,
    pub count: i64,
}

/// Sum labor and parts over the estimates whose creation timestamp falls in
/// `period` (a `"YYYY-MM"` key, local calendar time), or over every estimate
/// when `period` is `None`. The grand total is recomputed from the filtered
/// sums; the per-record `total` snapshot is never consulted.
pub fn summarize_finances(estimates: &[CostEstimate], period: Option<&str>) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    for estimate in estimates {
        if let Some(key) = period {
            match estimate.created_at {
                Some(created) if period_key(created) == key => {}
                _ => continue,
            }
        }

        summary.labor += sanitize_amount(estimate.labor_cost);
        summary.parts += sanitize_amount(estimate.parts_cost);
        summary.count += 1;
    }

    summary.grand_total = summary.labor + summary.parts;
    summary
}

/// `"YYYY-MM"` bucket for a creation timestamp.
pub fn period_key(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m").to_string()
}

/// The period the selector lands on by default: the current calendar month,
/// whether or not any estimate exists in it.
pub fn current_period(now: NaiveDateTime) -> String {
    period_key(now)
}

/// Distinct period keys across the estimates, most recent first.
pub fn available_periods(estimates: &[CostEstimate]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for estimate in estimates {
        if let Some(created) = estimate.created_at {
            let key = period_key(created);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys.sort_by(|a, b| b.cmp(a));
    keys
}
