use chrono::{Datelike, NaiveDate, Weekday};
use commitart::error::ArtError;
use commitart::grid::{map_to_date, CoordinateMapper, GridCoordinate, WeekStart, DAYS_PER_WEEK, GRID_WEEKS};
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn all_cells() -> impl Iterator<Item = GridCoordinate> {
    (0..GRID_WEEKS).flat_map(|w| (0..DAYS_PER_WEEK).map(move |d| GridCoordinate::new(w, d).unwrap()))
}

#[test]
fn every_cell_is_on_or_before_reference_and_within_lookback() {
    for reference in [date(2024, 2, 29), date(2025, 1, 1), date(2025, 6, 14), date(2025, 6, 15)] {
        for week_start in [WeekStart::Sunday, WeekStart::Monday] {
            for coord in all_cells() {
                let mapped = map_to_date(coord, reference, week_start);
                assert!(mapped <= reference, "{coord:?} -> {mapped} after {reference}");
                assert!((reference - mapped).num_days() <= 370);
            }
        }
    }
}

#[test]
fn dates_increase_with_the_cell_index() {
    let mapper = CoordinateMapper::new(date(2025, 3, 12), WeekStart::Sunday);
    let dates: Vec<_> = all_cells().map(|c| mapper.unclamped(c)).collect();
    for pair in dates.windows(2) {
        assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
    }
}

#[test]
fn row_zero_is_the_first_day_of_the_week() {
    let reference = date(2025, 3, 12);
    let sunday = CoordinateMapper::new(reference, WeekStart::Sunday);
    let monday = CoordinateMapper::new(reference, WeekStart::Monday);
    for week in [0, 10, 51] {
        let coord = GridCoordinate::new(week, 0).unwrap();
        assert_eq!(sunday.unclamped(coord).weekday(), Weekday::Sun);
        assert_eq!(monday.unclamped(coord).weekday(), Weekday::Mon);
    }
}

#[test]
fn last_column_holds_the_reference_week() {
    // Wednesday
    let reference = date(2025, 3, 12);
    let mapper = CoordinateMapper::new(reference, WeekStart::Sunday);
    assert_eq!(mapper.target_date(GridCoordinate::new(52, 3).unwrap()).unwrap(), reference);
    assert_eq!(mapper.origin(), date(2024, 3, 10));
}

#[test]
fn future_cells_clamp_or_fail() {
    let reference = date(2025, 3, 12);
    let mapper = CoordinateMapper::new(reference, WeekStart::Sunday);
    let saturday = GridCoordinate::new(52, 6).unwrap();

    assert_eq!(mapper.map_to_date(saturday), reference);
    match mapper.target_date(saturday) {
        Err(ArtError::FutureDate { date: d, reference: r }) => {
            assert_eq!(d, date(2025, 3, 15));
            assert_eq!(r, reference);
        }
        other => panic!("expected FutureDate, got {other:?}"),
    }
}

#[test]
fn completed_weeks_never_reach_the_future() {
    let mapper = CoordinateMapper::new(date(2025, 3, 9), WeekStart::Sunday);
    for week in 0..52 {
        for day in 0..DAYS_PER_WEEK {
            assert!(mapper.target_date(GridCoordinate::new(week, day).unwrap()).is_ok());
        }
    }
}

#[test]
fn coordinate_of_inverts_the_mapping() {
    let mapper = CoordinateMapper::new(date(2025, 8, 20), WeekStart::Monday);
    for coord in all_cells() {
        let mapped = mapper.unclamped(coord);
        if mapped <= mapper.reference() {
            assert_eq!(mapper.coordinate_of(mapped), Some(coord));
        }
    }
    assert_eq!(mapper.coordinate_of(date(2025, 8, 21)), None);
    assert_eq!(mapper.coordinate_of(mapper.origin().pred_opt().unwrap()), None);
}

#[test]
fn out_of_range_cells_are_rejected() {
    assert!(matches!(GridCoordinate::new(53, 0), Err(ArtError::Validation(_))));
    assert!(matches!(GridCoordinate::new(0, 7), Err(ArtError::Validation(_))));
}
