use crate::observations::fetcher::DailySource;
use crate::types::date_range::DateRange;
use crate::types::reading::CandidateReading;
use crate::types::time_filter::TimeOfDayFilter;
use log::{debug, info, warn};

/// Fetches every day of `range` and keeps the records taken at `filter`'s time of day.
///
/// A day that fails to fetch is logged and treated as a day without data. Records
/// with a missing or malformed `record_time` are skipped.
pub fn collect_matching<S: DailySource + ?Sized>(
    source: &S,
    range: &DateRange,
    filter: &TimeOfDayFilter,
) -> Vec<CandidateReading> {
    let mut kept = Vec::new();
    let mut failed_days = 0usize;
    let mut skipped_records = 0usize;

    for day in range.days() {
        let records = match source.fetch_day(day) {
            Ok(records) => records,
            Err(e) => {
                warn!("Request failed for {}: {}", day, e);
                failed_days += 1;
                continue;
            }
        };

        for record in records {
            let Some(record_time) = record.timestamp() else {
                debug!("Skipping record with unusable timestamp {:?}", record.record_time);
                skipped_records += 1;
                continue;
            };
            if filter.matches(&record_time) {
                kept.push(CandidateReading {
                    record_time,
                    water_temp: record.water_temp_text(),
                });
            }
        }
    }

    info!(
        "Kept {} records at {} over {} ({} days failed, {} records skipped)",
        kept.len(),
        filter,
        range,
        failed_days,
        skipped_records
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observations::response::RawRecord;
    use crate::observations::test_utils::{day, minute_records, StaticSource};
    use serde_json::json;

    #[test]
    fn test_requests_every_day_once() {
        let source = StaticSource::default();
        let range = DateRange::new(day(1), day(5));
        collect_matching(&source, &range, &TimeOfDayFilter::new("09:00:00"));
        assert_eq!(source.requested(), (1..=5).map(day).collect::<Vec<_>>());
    }

    #[test]
    fn test_keeps_only_exact_time_matches() {
        let source = StaticSource::default()
            .with_day(day(1), minute_records(day(1), "08:58", &["20.1", "20.2", "20.3", "20.4"]))
            .with_day(day(2), minute_records(day(2), "09:00", &["21.0", "21.1"]));
        let range = DateRange::new(day(1), day(2));

        let kept = collect_matching(&source, &range, &TimeOfDayFilter::new("09:00:00"));
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].record_time, day(1).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(kept[0].water_temp.as_deref(), Some("20.3"));
        assert_eq!(kept[1].record_time, day(2).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(kept[1].water_temp.as_deref(), Some("21.0"));
    }

    #[test]
    fn test_failed_day_does_not_stop_the_loop() {
        let source = StaticSource::default()
            .with_day(day(1), minute_records(day(1), "09:00", &["19.5"]))
            .with_failure(day(2))
            .with_day(day(3), minute_records(day(3), "09:00", &["19.9"]));
        let range = DateRange::new(day(1), day(3));

        let kept = collect_matching(&source, &range, &TimeOfDayFilter::new("09:00:00"));
        assert_eq!(kept.len(), 2);
        assert_eq!(source.requested().len(), 3);
    }

    #[test]
    fn test_malformed_timestamps_are_skipped() {
        let source = StaticSource::default().with_day(
            day(1),
            vec![
                RawRecord::new("not a time", Some(json!("18.0"))),
                RawRecord {
                    record_time: None,
                    water_temp: Some(json!("18.1")),
                },
                RawRecord::new("2024-06-01 09:00:00", Some(json!("18.2"))),
            ],
        );
        let kept = collect_matching(
            &source,
            &DateRange::new(day(1), day(1)),
            &TimeOfDayFilter::new("09:00:00"),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].water_temp.as_deref(), Some("18.2"));
    }

    #[test]
    fn test_reversed_range_fetches_nothing() {
        let source = StaticSource::default();
        let kept = collect_matching(
            &source,
            &DateRange::new(day(5), day(1)),
            &TimeOfDayFilter::new("09:00:00"),
        );
        assert!(kept.is_empty());
        assert!(source.requested().is_empty());
    }
}
