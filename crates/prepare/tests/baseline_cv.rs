use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use loadcast_calendar::NoHolidays;
use loadcast_io::ConsumptionTable;
use loadcast_model::{
    LinearRegression, Pipeline, StandardScaler, TimeSeriesSplit, cross_validate,
};
use loadcast_prepare::Preprocessor;

const HOURS_2024: i64 = 366 * 24;

fn ts(h: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::hours(h)
}

/// One leap year of hourly consumption for IT_1 driven by hour, season and
/// temperature, with matching spv and temp features.
fn year_tables() -> (ConsumptionTable, ConsumptionTable) {
    let index: Vec<_> = (0..HOURS_2024).map(ts).collect();
    let hour_angle = |t: &NaiveDateTime| std::f64::consts::TAU * t.hour() as f64 / 24.0;
    let temp: Vec<f64> = index
        .iter()
        .map(|t| {
            let season = std::f64::consts::TAU * t.ordinal() as f64 / 366.0;
            12.0 - 8.0 * season.cos() + 3.0 * hour_angle(t).sin()
        })
        .collect();
    let spv: Vec<f64> = index
        .iter()
        .map(|t| (-hour_angle(t).cos()).max(0.0) * 4.0)
        .collect();
    let load: Vec<f64> = index
        .iter()
        .zip(&temp)
        .zip(&spv)
        .map(|((t, tc), s)| 40.0 + 6.0 * hour_angle(t).sin() + 0.8 * tc - 1.5 * s)
        .collect();

    let consumption =
        ConsumptionTable::from_columns(index.clone(), vec![("IT_1".to_string(), load)]).unwrap();
    let features = ConsumptionTable::from_columns(
        index,
        vec![("spv".to_string(), spv), ("temp".to_string(), temp)],
    )
    .unwrap();
    (consumption, features)
}

#[test]
fn one_year_frame_cross_validates() {
    let (consumption, features) = year_tables();
    let pre = Preprocessor::new(&consumption, &features).unwrap();
    let frame = pre.customer_frame("IT_1", &NoHolidays).unwrap();

    let names = frame.feature_names();
    assert!(names.contains(&"Month") && names.contains(&"MonthCos"));
    let (x, y) = frame.training_data(&names).unwrap();
    assert_eq!(y.len() as i64, HOURS_2024);

    let model = Pipeline::new(StandardScaler::new(), LinearRegression::new());
    let scores = cross_validate(&model, &x, &y, &TimeSeriesSplit::new(5)).unwrap();

    assert_eq!(scores.len(), 5);
    // The first window ends on 1 March: three distinct months.
    assert_eq!(scores[0].train_size, 24 * 61);
    for s in &scores {
        assert!(s.train_mae.is_finite());
        assert!(s.eval_mae.is_finite());
    }
}
