//! Aggregate metrics over the request list.

use jiff::Span;
use jiff::civil::Date;
use serde_json::Value;

use crate::types::{Record, RequestStatus, value_display};
use crate::utils::{format_day_month_ru, parse_when};

/// Fixed demo series behind the "done" KPI sparkline.
pub const SPARK_DONE: [u32; 10] = [4, 3, 5, 7, 6, 8, 9, 12, 14, 15];

/// Fixed demo series behind the "in progress" KPI sparkline.
pub const SPARK_IN_PROGRESS: [u32; 10] = [2, 4, 3, 5, 4, 6, 5, 4, 3, 2];

/// Headline numbers for the statistics tab.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RequestStats {
    pub total: usize,
    /// Requests in a finished status (done or ready for pickup).
    pub done: usize,
    /// Requests currently in repair.
    pub in_progress: usize,
    /// Mean repair duration in hours over finished requests with parseable
    /// start and completion dates, `None` when no request qualifies.
    pub avg_hours: Option<f64>,
}

fn status_of(record: &Record) -> Option<RequestStatus> {
    record
        .get("request_status")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse().ok())
}

fn duration_hours(record: &Record) -> Option<f64> {
    let start = record
        .get("start_date")
        .and_then(Value::as_str)
        .and_then(parse_when)?;
    let end = record
        .get("completion_date")
        .and_then(Value::as_str)
        .and_then(parse_when)?;
    Some((end.as_millisecond() - start.as_millisecond()) as f64 / 3_600_000.0)
}

impl RequestStats {
    pub fn compute(records: &[Record]) -> Self {
        let mut stats = RequestStats {
            total: records.len(),
            ..Default::default()
        };
        let mut durations = Vec::new();

        for record in records {
            let Some(status) = status_of(record) else {
                continue;
            };
            if status.is_done() {
                stats.done += 1;
                if let Some(hours) = duration_hours(record) {
                    durations.push(hours);
                }
            } else if status.is_in_progress() {
                stats.in_progress += 1;
            }
        }

        if !durations.is_empty() {
            stats.avg_hours = Some(durations.iter().sum::<f64>() / durations.len() as f64);
        }
        stats
    }

    /// KPI text: one decimal place, or a dash when nothing qualifies.
    pub fn avg_display(&self) -> String {
        match self.avg_hours {
            Some(hours) => format!("{hours:.1}"),
            None => "—".to_string(),
        }
    }
}

/// Requests per day over the seven days ending today, as `(label, count)`
/// pairs in chronological order. A request lands in a bucket when the date
/// part of its `start_date` matches the bucket day exactly.
pub fn timeline_series(records: &[Record], today: Date) -> Vec<(String, u32)> {
    let mut days: Vec<(String, String, u32)> = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let day = today.checked_sub(Span::new().days(offset)).unwrap_or(today);
        days.push((day.to_string(), format_day_month_ru(day), 0));
    }

    for record in records {
        let Some(raw) = record.get("start_date").and_then(Value::as_str) else {
            continue;
        };
        let date_part = raw.split('T').next().unwrap_or_default();
        if let Some((_, _, count)) = days.iter_mut().find(|(iso, _, _)| iso == date_part) {
            *count += 1;
        }
    }

    days.into_iter()
        .map(|(_, label, count)| (label, count))
        .collect()
}

/// Fault categories by frequency for the donut chart. Missing and empty
/// `repair_parts` fall under "Не указано"; beyond the top five, categories
/// collapse into a single "Прочее" slice. An empty list yields one "Нет
/// данных" slice so the chart never renders hollow.
pub fn fault_breakdown(records: &[Record]) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for record in records {
        let category = record
            .get("repair_parts")
            .and_then(value_display)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "Не указано".to_string());
        match counts.iter_mut().find(|(name, _)| *name == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category, 1)),
        }
    }

    if counts.is_empty() {
        return vec![("Нет данных".to_string(), 1)];
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    if counts.len() > 5 {
        let other: u64 = counts[5..].iter().map(|(_, count)| count).sum();
        counts.truncate(5);
        counts.push(("Прочее".to_string(), other));
    }
    counts
}
