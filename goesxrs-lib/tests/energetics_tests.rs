use approx::assert_relative_eq;
use chrono::{DateTime, Duration, Utc};
use goesxrs::{
    DirectorySource, GoesChianti, GoesError, goes_lx, parse_time, sun_earth_distance,
    xray_luminosity_from_flux,
};

fn chianti() -> GoesChianti {
    GoesChianti::new(DirectorySource::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data"
    )))
}

fn every_two_seconds(n: usize) -> Vec<DateTime<Utc>> {
    let t0 = parse_time("2014-04-16 00:00:00").unwrap();
    (0..n).map(|i| t0 + Duration::seconds(2 * i as i64)).collect()
}

#[test]
fn test_rad_loss_rate_at_tabulated_temperature() {
    let loss = chianti()
        .radiative_loss(&[10.0, 10.0], &[1e48, 2e48], None, false)
        .unwrap();
    assert_relative_eq!(loss.rate[0], 3.162278e25, max_relative = 1e-9);
    assert_relative_eq!(loss.rate[1], 2.0 * loss.rate[0], max_relative = 1e-12);
    assert_eq!(loss.integrated, None);
    assert_eq!(loss.cumulative, None);
}

#[test]
fn test_rad_loss_integrated_over_time() {
    let times = every_two_seconds(4);
    let loss = chianti()
        .radiative_loss(&[10.0; 4], &[1e48; 4], Some(&times[..]), true)
        .unwrap();

    let rate = loss.rate[0];
    let total = loss.integrated.unwrap();
    assert_relative_eq!(total, 6.0 * rate, max_relative = 1e-12);

    let cumulative = loss.cumulative.unwrap();
    assert_eq!(cumulative.len(), 4);
    assert_relative_eq!(cumulative[0], rate, max_relative = 1e-12);
    assert_relative_eq!(cumulative[1], 3.0 * rate, max_relative = 1e-12);
    assert_eq!(*cumulative.last().unwrap(), total);
}

#[test]
fn test_rad_loss_without_cumulative_leaves_it_empty() {
    let times = every_two_seconds(3);
    let loss = chianti()
        .radiative_loss(&[10.0; 3], &[1e48; 3], Some(&times[..]), false)
        .unwrap();
    assert!(loss.integrated.is_some());
    assert!(loss.cumulative.is_none());
}

#[test]
fn test_rad_loss_rejects_bad_input() {
    let db = chianti();
    let times = every_two_seconds(4);

    assert!(matches!(
        db.radiative_loss(&[10.0; 3], &[1e48; 3], None, true),
        Err(GoesError::Validation(_))
    ));
    assert!(matches!(
        db.radiative_loss(&[10.0; 3], &[1e48; 3], Some(&times[..]), false),
        Err(GoesError::Validation(_))
    ));
    // Mismatch between the first two arrays must be caught even when the
    // last two agree.
    assert!(matches!(
        db.radiative_loss(&[10.0; 2], &[1e48; 3], Some(&times[..3]), false),
        Err(GoesError::Validation(_))
    ));
    assert!(matches!(
        db.radiative_loss(&[200.0], &[1e48], None, false),
        Err(GoesError::OutOfRange { .. })
    ));

    let mut backwards = every_two_seconds(3);
    backwards.reverse();
    assert!(matches!(
        db.radiative_loss(&[10.0; 3], &[1e48; 3], Some(&backwards[..]), false),
        Err(GoesError::Validation(_))
    ));
}

#[test]
fn test_rad_loss_out_of_range_reported_in_mk() {
    match chianti().radiative_loss(&[0.01], &[1e48], None, false) {
        Err(GoesError::OutOfRange { min, max, unit, .. }) => {
            assert_relative_eq!(min, 0.1, max_relative = 1e-9);
            assert_relative_eq!(max, 100.0, max_relative = 1e-9);
            assert_eq!(unit, " MK");
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }
}

#[test]
fn test_luminosity_at_one_au() {
    let lx = xray_luminosity_from_flux(&[7e-6, 1.4e-5], None);
    assert_relative_eq!(lx[0], 1.9686056541e25, max_relative = 1e-9);
    assert_relative_eq!(lx[1], 2.0 * lx[0], max_relative = 1e-12);
}

#[test]
fn test_luminosity_follows_sun_earth_distance() {
    let date = parse_time("2024-01-03").unwrap();
    let d = sun_earth_distance(&date);
    let at_date = xray_luminosity_from_flux(&[1e-6], Some(&date));
    let at_au = xray_luminosity_from_flux(&[1e-6], None);
    assert_relative_eq!(at_date[0] / at_au[0], d * d, max_relative = 1e-12);
    assert!(at_date[0] < at_au[0]);
}

#[test]
fn test_goes_lx_energies() {
    let times = every_two_seconds(4);
    let lx = goes_lx(&[7e-6; 4], &[7e-7; 4], Some(&times[..]), None, true).unwrap();

    assert_eq!(lx.intervals.as_deref(), Some(&[1.0, 2.0, 2.0, 1.0][..]));
    let long_total = lx.long_integrated.unwrap();
    let short_total = lx.short_integrated.unwrap();
    assert_relative_eq!(long_total, 6.0 * lx.long[0], max_relative = 1e-12);
    assert_relative_eq!(long_total / short_total, 10.0, max_relative = 1e-9);
    assert_eq!(*lx.long_cumulative.unwrap().last().unwrap(), long_total);
    assert_eq!(*lx.short_cumulative.unwrap().last().unwrap(), short_total);
}

#[test]
fn test_goes_lx_without_times() {
    let lx = goes_lx(&[7e-6], &[7e-7], None, None, false).unwrap();
    assert_eq!(lx.long.len(), 1);
    assert!(lx.long_integrated.is_none());
    assert!(lx.intervals.is_none());
    assert!(goes_lx(&[7e-6], &[7e-7], None, None, true).is_err());
}

#[test]
fn test_goes_lx_rejects_bad_input() {
    let times = every_two_seconds(3);
    assert!(goes_lx(&[7e-6; 2], &[7e-7; 3], Some(&times[..]), None, false).is_err());
    assert!(goes_lx(&[7e-6; 3], &[7e-7; 2], None, None, false).is_err());

    let mut backwards = times.clone();
    backwards.reverse();
    assert!(goes_lx(&[7e-6; 3], &[7e-7; 3], Some(&backwards[..]), None, false).is_err());
}
