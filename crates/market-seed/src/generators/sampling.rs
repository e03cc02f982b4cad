//! Random sampling helpers shared by the entity generators.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::SliceRandom;
use time::{Date, Duration, OffsetDateTime};

use crate::models::Id;

const SECONDS_PER_DAY: i64 = 86_400;

/// Rounds to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Draws a monetary amount uniformly from `range`, rounded to cents.
///
/// Both bounds are themselves whole cents, so rounding never leaves the range.
pub fn money(range: RangeInclusive<f64>, rng: &mut impl Rng) -> f64 {
    round2(rng.gen_range(range))
}

/// Picks one id uniformly.
pub fn pick(ids: &[Id], rng: &mut impl Rng) -> Option<Id> {
    ids.choose(rng).copied()
}

/// Picks one id uniformly from those not equal to `exclude`.
pub fn pick_other(ids: &[Id], exclude: Id, rng: &mut impl Rng) -> Option<Id> {
    let eligible: Vec<Id> = ids.iter().copied().filter(|&id| id != exclude).collect();
    eligible.choose(rng).copied()
}

/// Returns a timestamp in `[now - days, now]`, at whole-second offsets.
pub fn timestamp_within(now: OffsetDateTime, days: i64, rng: &mut impl Rng) -> OffsetDateTime {
    let offset = rng.gen_range(0..=days * SECONDS_PER_DAY);
    now - Duration::seconds(offset)
}

/// Returns a date between `a` and `b`, both inclusive, in either order.
pub fn date_between(a: Date, b: Date, rng: &mut impl Rng) -> Date {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    let span = (end - start).whole_days();
    start + Duration::days(rng.gen_range(0..=span))
}
