use chrono::{Duration, NaiveDate};
use loadcast_calendar::{CalendarFields, Country, HolidayCalendar, HolidaySet};

#[test]
fn one_week_of_hours_has_two_weekend_days() {
    // 2024-01-01 is a Monday.
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let weekend_hours = (0..24 * 7)
        .map(|h| CalendarFields::from_timestamp(&(start + Duration::hours(h))))
        .filter(|f| f.is_weekend())
        .count();
    assert_eq!(weekend_hours, 48);
}

#[test]
fn active_hours_per_day() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let active = (0..24)
        .map(|h| CalendarFields::from_timestamp(&(start + Duration::hours(h))))
        .filter(|f| f.is_active_day())
        .count();
    assert_eq!(active, 15);
}

#[test]
fn per_country_holiday_lookup() {
    let it = HolidaySet::parse(&["2024-04-25"]).unwrap();
    let es = HolidaySet::parse(&["2024-10-12"]).unwrap();
    let lookup = |country: Country| match country {
        Country::It => it.clone(),
        Country::Es => es.clone(),
    };

    let liberation_day = NaiveDate::from_ymd_opt(2024, 4, 25).unwrap();
    let country = Country::from_entity_id("IT_7").unwrap();
    assert!(lookup(country).is_holiday(liberation_day));
    assert!(!lookup(Country::Es).is_holiday(liberation_day));
}
