//! End-to-end tests for the free-slot pipeline.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use slot_engine::{
    compute_free_slots, find_first_free_slot, find_free_slots, Interval, SearchWindow, SlotError,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, min, 0).unwrap()
}

fn busy(day: u32, start: (u32, u32), end: (u32, u32)) -> Interval {
    Interval::new(at(day, start.0, start.1), at(day, end.0, end.1)).unwrap()
}

fn time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// Days `first..=last` of January 2024, 09:00–18:00 daily, in UTC.
fn office_hours(first: u32, last: u32, min_minutes: i64) -> SearchWindow {
    SearchWindow::new(
        at(first, 0, 0),
        at(last, 23, 59),
        time(9, 0),
        time(18, 0),
        Duration::minutes(min_minutes),
        chrono_tz::UTC,
    )
    .unwrap()
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn no_busy_intervals_yields_one_slot_per_day() {
    let slots = compute_free_slots(&[], &office_hours(1, 2, 30));

    assert_eq!(slots.len(), 2);
    assert_eq!((slots[0].start, slots[0].end), (at(1, 9, 0), at(1, 18, 0)));
    assert_eq!((slots[1].start, slots[1].end), (at(2, 9, 0), at(2, 18, 0)));
    assert_eq!(slots[0].duration_minutes, 540);
}

#[test]
fn fully_busy_range_yields_no_slots() {
    let all_day = Interval::new(at(1, 0, 0), at(2, 23, 59)).unwrap();

    let slots = compute_free_slots(&[all_day], &office_hours(1, 2, 30));

    assert!(slots.is_empty(), "nobody is free, got {:?}", slots);
}

#[test]
fn overlapping_busy_intervals_are_merged_before_inverting() {
    let events = vec![busy(1, (9, 0), (10, 30)), busy(1, (10, 0), (11, 0))];

    let slots = compute_free_slots(&events, &office_hours(1, 1, 30));

    assert_eq!(slots.len(), 1);
    assert_eq!((slots[0].start, slots[0].end), (at(1, 11, 0), at(1, 18, 0)));
}

#[test]
fn gap_shorter_than_duration_is_dropped() {
    // Busy 09:00-12:00 and 12:25-18:00 leaves a 25-minute gap.
    let events = vec![busy(1, (9, 0), (12, 0)), busy(1, (12, 25), (18, 0))];

    let slots = compute_free_slots(&events, &office_hours(1, 1, 30));

    assert!(slots.is_empty());
}

#[test]
fn gap_exactly_duration_is_kept() {
    let events = vec![busy(1, (9, 0), (12, 0)), busy(1, (12, 30), (18, 0))];

    let slots = compute_free_slots(&events, &office_hours(1, 1, 30));

    assert_eq!(slots.len(), 1);
    assert_eq!((slots[0].start, slots[0].end), (at(1, 12, 0), at(1, 12, 30)));
    assert_eq!(slots[0].duration_minutes, 30);
}

#[test]
fn multi_day_free_range_is_tiled_per_day() {
    let slots = compute_free_slots(&[], &office_hours(1, 3, 60));

    assert_eq!(slots.len(), 3, "one slot per day, not one 3-day slot");
    for (i, slot) in slots.iter().enumerate() {
        let day = 1 + i as u32;
        assert_eq!((slot.start, slot.end), (at(day, 9, 0), at(day, 18, 0)));
    }
}

#[test]
fn participants_calendars_combine() {
    // Alice busy 09-12 on day 1, Bob busy 14-18 on day 1 and 09-18 on day 2.
    let events = vec![
        busy(1, (9, 0), (12, 0)),
        busy(1, (14, 0), (18, 0)),
        busy(2, (9, 0), (18, 0)),
    ];

    let slots = compute_free_slots(&events, &office_hours(1, 2, 60));

    assert_eq!(slots.len(), 1);
    assert_eq!((slots[0].start, slots[0].end), (at(1, 12, 0), at(1, 14, 0)));
}

#[test]
fn busy_event_outside_daily_window_does_not_block() {
    let late_night = busy(1, (20, 0), (23, 0));

    let slots = compute_free_slots(&[late_night], &office_hours(1, 1, 30));

    assert_eq!(slots.len(), 1);
    assert_eq!((slots[0].start, slots[0].end), (at(1, 9, 0), at(1, 18, 0)));
}

#[test]
fn overnight_busy_event_blocks_both_days() {
    let overnight = Interval::new(at(1, 15, 0), at(2, 10, 0)).unwrap();

    let slots = compute_free_slots(&[overnight], &office_hours(1, 2, 30));

    assert_eq!(slots.len(), 2);
    assert_eq!((slots[0].start, slots[0].end), (at(1, 9, 0), at(1, 15, 0)));
    assert_eq!((slots[1].start, slots[1].end), (at(2, 10, 0), at(2, 18, 0)));
}

#[test]
fn daily_window_is_anchored_in_the_given_timezone() {
    let tz: Tz = "Asia/Singapore".parse().unwrap();
    let date_start = tz.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().with_timezone(&Utc);
    let date_end = tz.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap().with_timezone(&Utc);
    let window =
        SearchWindow::new(date_start, date_end, time(9, 0), time(18, 0), Duration::minutes(30), tz)
            .unwrap();

    let slots = compute_free_slots(&[], &window);

    // 09:00-18:00 in Singapore (UTC+8) is 01:00-10:00 UTC.
    assert_eq!(slots.len(), 1);
    assert_eq!((slots[0].start, slots[0].end), (at(1, 1, 0), at(1, 10, 0)));
}

#[test]
fn first_free_slot_is_earliest() {
    let events = vec![busy(1, (9, 0), (17, 30))];

    let slot = find_first_free_slot(&events, &office_hours(1, 2, 60)).unwrap();

    assert_eq!((slot.start, slot.end), (at(2, 9, 0), at(2, 18, 0)));
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn find_free_slots_validates_before_computing() {
    let result = find_free_slots(
        &[],
        at(2, 0, 0),
        at(1, 0, 0),
        time(9, 0),
        time(18, 0),
        Duration::minutes(30),
        chrono_tz::UTC,
    );

    assert!(matches!(result, Err(SlotError::InvalidWindow(_))));
}

#[test]
fn find_free_slots_computes_for_valid_window() {
    let slots = find_free_slots(
        &[busy(1, (9, 0), (10, 0))],
        at(1, 0, 0),
        at(1, 23, 59),
        time(9, 0),
        time(18, 0),
        Duration::minutes(30),
        chrono_tz::UTC,
    )
    .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!((slots[0].start, slots[0].end), (at(1, 10, 0), at(1, 18, 0)));
}
