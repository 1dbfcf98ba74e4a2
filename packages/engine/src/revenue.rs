//! Year-to-date revenue annualization.

use chrono::{Datelike, NaiveDate};
use territory_map_facility_models::{RevenueFigures, RevenueProjection};

use crate::epidemiology::{round_1dp, round_count};

/// Share of the year elapsed at `as_of`, counting every month as 30 days.
#[must_use]
pub fn year_fraction(as_of: NaiveDate) -> f64 {
    (f64::from(as_of.month0()) + f64::from(as_of.day()) / 30.0) / 12.0
}

/// Year-over-year growth in percent, one decimal. Zero when there is no prior
/// figure to compare against.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn growth_pct(current: u64, prior: u64) -> f64 {
    if prior == 0 {
        0.0
    } else {
        round_1dp((current as f64 - prior as f64) / prior as f64 * 100.0)
    }
}

/// Extrapolates year-to-date revenue to a full year as of `as_of`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn project(revenue: &RevenueFigures, as_of: NaiveDate) -> RevenueProjection {
    let fraction = year_fraction(as_of);
    let annualized = if fraction > 0.0 {
        round_count(revenue.year_to_date as f64 / fraction)
    } else {
        revenue.year_to_date
    };

    RevenueProjection {
        annualized,
        yoy_growth_pct: growth_pct(annualized, revenue.prior_period),
    }
}
