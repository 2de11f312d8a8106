use std::io::Write;

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use loadcast_calendar::{CalendarError, Country, HolidaySet, NoHolidays};
use loadcast_io::{ConsumptionTable, ReaderConfig};
use loadcast_prepare::{
    CALENDAR_COLUMNS, CONSUMPTION, PrepareConfig, PrepareError, Preprocessor,
};

/// Friday 2024-03-01 00:00 plus `h` hours.
fn ts(h: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::hours(h)
}

/// 72 hours of consumption; IT_1 starts at hour 5 with value = hour index.
fn consumption() -> ConsumptionTable {
    let index: Vec<_> = (0..72).map(ts).collect();
    let it: Vec<f64> = (0..72)
        .map(|h| if h < 5 { f64::NAN } else { h as f64 })
        .collect();
    let es: Vec<f64> = (0..72).map(|h| 100.0 + h as f64).collect();
    let fr: Vec<f64> = vec![1.0; 72];
    let empty: Vec<f64> = vec![f64::NAN; 72];
    ConsumptionTable::from_columns(
        index,
        vec![
            ("IT_1".to_string(), it),
            ("ES_2".to_string(), es),
            ("FR_3".to_string(), fr),
            ("IT_4".to_string(), empty),
        ],
    )
    .unwrap()
}

/// Features for the first 70 hours only.
fn features() -> ConsumptionTable {
    let index: Vec<_> = (0..70).map(ts).collect();
    let spv: Vec<f64> = (0..70).map(|h| (h % 24) as f64 * 0.5).collect();
    let temp: Vec<f64> = (0..70).map(|h| 10.0 + h as f64 * 0.1).collect();
    ConsumptionTable::from_columns(
        index,
        vec![("spv".to_string(), spv), ("temp".to_string(), temp)],
    )
    .unwrap()
}

fn col(frame: &ConsumptionTable, name: &str) -> Vec<f64> {
    frame.column(name).unwrap()
}

#[test]
fn frame_layout_and_trimming() {
    let pre = Preprocessor::new(&consumption(), &features()).unwrap();
    let frame = pre.customer_frame("IT_1", &NoHolidays).unwrap();

    assert_eq!(frame.id(), "IT_1");
    assert_eq!(frame.country(), Country::It);

    let table = frame.table();
    let mut expected = vec![CONSUMPTION, "spv", "temp"];
    expected.extend(CALENDAR_COLUMNS);
    assert_eq!(table.columns(), expected.as_slice());

    // hours 5..70: leading gap trimmed, features end at hour 70
    assert_eq!(table.n_rows(), 65);
    assert_eq!(frame.index()[0], ts(5));
    assert_eq!(*frame.index().last().unwrap(), ts(69));
}

#[test]
fn calendar_features() {
    let pre = Preprocessor::new(&consumption(), &features()).unwrap();
    let holidays = HolidaySet::parse(&["2024-03-02"]).unwrap();
    let frame = pre.customer_frame("IT_1", &holidays).unwrap();
    let table = frame.table();

    let hour = col(table, "Hour");
    let dow = col(table, "Dow");
    let weekend = col(table, "IsWeekend");
    let holiday = col(table, "IsHoliday");
    let active = col(table, "ActiveDay");

    // row 0 is Friday 05:00
    assert_eq!(hour[0], 5.0);
    assert_eq!(dow[0], 4.0);
    assert_eq!(weekend[0], 0.0);
    assert_eq!(active[0], 0.0);
    assert_eq!(active[1], 1.0);
    // row 15 is 20:00, still active; row 16 is 21:00
    assert_eq!(active[15], 1.0);
    assert_eq!(active[16], 0.0);
    // row 19 is Saturday 00:00
    assert_eq!(dow[19], 5.0);
    assert_eq!(weekend[19], 1.0);
    assert_eq!(holiday[18], 0.0);
    assert_eq!(holiday[19], 1.0);
    // Sunday is not a holiday in this calendar
    assert_eq!(holiday[19 + 24], 0.0);

    assert_eq!(col(table, "Month")[0], 3.0);
    assert_eq!(col(table, "Year")[0], 2024.0);
    assert_eq!(col(table, "Day")[19], 2.0);

    let hour_sin = col(table, "HourSin");
    let hour_cos = col(table, "HourCos");
    // 05:00 on a 24-hour cycle
    let angle = std::f64::consts::TAU * 5.0 / 24.0;
    assert_relative_eq!(hour_sin[0], angle.sin(), epsilon = 1e-12);
    assert_relative_eq!(hour_cos[0], angle.cos(), epsilon = 1e-12);
}

#[test]
fn consumption_is_clipped_to_quantiles() {
    let pre = Preprocessor::new(&consumption(), &features()).unwrap();
    let frame = pre.customer_frame("IT_1", &NoHolidays).unwrap();
    let c = col(frame.table(), CONSUMPTION);

    // 65 values 5..=69: 1% quantile 5.64, 99% quantile 68.36
    assert_relative_eq!(c[0], 5.64, epsilon = 1e-9);
    assert_eq!(c[30], 35.0);
    assert_relative_eq!(c[64], 68.36, epsilon = 1e-9);
}

#[test]
fn clipping_band_is_configurable() {
    let pre = Preprocessor::new(&consumption(), &features())
        .unwrap()
        .with_config(PrepareConfig::new().with_clip_quantiles(0.0, 1.0));
    let frame = pre.customer_frame("IT_1", &NoHolidays).unwrap();
    let c = col(frame.table(), CONSUMPTION);
    assert_eq!(c[0], 5.0);
    assert_eq!(c[64], 69.0);
}

#[test]
fn spanish_customer_resolves_country() {
    let pre = Preprocessor::new(&consumption(), &features()).unwrap();
    let frame = pre.customer_frame("ES_2", &NoHolidays).unwrap();
    assert_eq!(frame.country(), Country::Es);
    assert_eq!(frame.table().n_rows(), 70);
}

#[test]
fn unknown_customer() {
    let pre = Preprocessor::new(&consumption(), &features()).unwrap();
    let err = pre.customer_frame("IT_404", &NoHolidays).unwrap_err();
    assert!(matches!(err, PrepareError::UnknownEntity { ref id } if id == "IT_404"));
}

#[test]
fn unrecognized_country() {
    let pre = Preprocessor::new(&consumption(), &features()).unwrap();
    let err = pre.customer_frame("FR_3", &NoHolidays).unwrap_err();
    assert!(matches!(
        err,
        PrepareError::Calendar(CalendarError::UnrecognizedGroup { .. })
    ));
}

#[test]
fn customer_without_observations() {
    let pre = Preprocessor::new(&consumption(), &features()).unwrap();
    let err = pre.customer_frame("IT_4", &NoHolidays).unwrap_err();
    assert!(matches!(err, PrepareError::NoObservations { .. }));
}

#[test]
fn missing_feature_column() {
    let pre = Preprocessor::new(&consumption(), &features())
        .unwrap()
        .with_config(PrepareConfig::new().with_temp_column("temperature"));
    let err = pre.customer_frame("IT_1", &NoHolidays).unwrap_err();
    assert!(matches!(err, PrepareError::MissingFeature { ref name } if name == "temperature"));
}

#[test]
fn training_data_uses_complete_rows() {
    let pre = Preprocessor::new(&consumption(), &features()).unwrap();
    let frame = pre.customer_frame("IT_1", &NoHolidays).unwrap();
    let names = frame.feature_names();
    assert_eq!(names.len(), 2 + CALENDAR_COLUMNS.len());
    assert!(!names.contains(&CONSUMPTION));

    let (x, y) = frame.training_data(&names).unwrap();
    assert_eq!(x.dim(), (65, names.len()));
    assert_eq!(y.len(), 65);
}

#[test]
fn load_keeps_first_duplicate_feature_row() {
    let dir = tempfile::tempdir().unwrap();
    let cons_path = dir.path().join("consumption.csv");
    let feat_path = dir.path().join("features.csv");

    let mut f = std::fs::File::create(&cons_path).unwrap();
    writeln!(f, "timestamp,IT_1").unwrap();
    writeln!(f, "2024-03-01 00:00:00,1.0").unwrap();
    writeln!(f, "2024-03-01 01:00:00,2.0").unwrap();

    let mut f = std::fs::File::create(&feat_path).unwrap();
    writeln!(f, "timestamp,spv,temp").unwrap();
    writeln!(f, "2024-03-01 00:00:00,0.0,10.0").unwrap();
    writeln!(f, "2024-03-01 01:00:00,1.0,11.0").unwrap();
    writeln!(f, "2024-03-01 01:00:00,9.0,99.0").unwrap();

    let pre = Preprocessor::load(&cons_path, &feat_path, &ReaderConfig::default()).unwrap();
    assert_eq!(pre.customers(), ["IT_1".to_string()].as_slice());

    let frame = pre
        .customer_frame("IT_1", &NoHolidays)
        .unwrap();
    assert_eq!(frame.table().n_rows(), 2);
    assert_eq!(col(frame.table(), "temp"), vec![10.0, 11.0]);
}
