//! Abuse report generation.

use rand::Rng;
use time::OffsetDateTime;

use super::sampling::{pick, pick_other, timestamp_within};
use crate::error::SeedError;
use crate::models::{Id, REPORT_REASONS};

const STAGE: &str = "reports";

/// Generated report data ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    pub reporter_id: Id,
    pub reported_user_id: Id,
    pub listing_id: Id,
    pub reason: &'static str,
    pub created_at: OffsetDateTime,
}

/// Generates reports of one user by another.
pub struct ReportGenerator {
    window_days: i64,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self { window_days: 180 }
    }

    /// Generates a single report.
    pub fn generate(
        &self,
        user_ids: &[Id],
        listing_ids: &[Id],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<GeneratedReport, SeedError> {
        let not_enough = || SeedError::NotEnoughUsers {
            stage: STAGE,
            available: user_ids.len(),
        };

        let reporter_id = pick(user_ids, rng).ok_or_else(not_enough)?;
        let reported_user_id = pick_other(user_ids, reporter_id, rng).ok_or_else(not_enough)?;
        let listing_id = pick(listing_ids, rng).ok_or(SeedError::MissingReferences {
            stage: STAGE,
            reference: "listing",
        })?;

        Ok(GeneratedReport {
            reporter_id,
            reported_user_id,
            listing_id,
            reason: REPORT_REASONS[rng.gen_range(0..REPORT_REASONS.len())],
            created_at: timestamp_within(now, self.window_days, rng),
        })
    }

    /// Generates multiple reports.
    pub fn generate_batch(
        &self,
        count: usize,
        user_ids: &[Id],
        listing_ids: &[Id],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedReport>, SeedError> {
        (0..count)
            .map(|_| self.generate(user_ids, listing_ids, now, rng))
            .collect()
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_reporter_differs_from_reported() {
        let report_gen = ReportGenerator::new();
        let mut rng = StdRng::seed_from_u64(99);

        let reports = report_gen
            .generate_batch(400, &[4, 8], &[3], OffsetDateTime::now_utc(), &mut rng)
            .unwrap();

        for r in &reports {
            assert_ne!(r.reporter_id, r.reported_user_id);
            assert!(REPORT_REASONS.contains(&r.reason));
        }

        let reasons: std::collections::HashSet<_> = reports.iter().map(|r| r.reason).collect();
        assert_eq!(reasons.len(), REPORT_REASONS.len());
    }

    #[test]
    fn test_missing_listings() {
        let report_gen = ReportGenerator::new();
        let mut rng = rand::thread_rng();

        let err = report_gen
            .generate(&[1, 2], &[], OffsetDateTime::now_utc(), &mut rng)
            .unwrap_err();

        assert!(matches!(err, SeedError::MissingReferences { stage: "reports", .. }));
    }
}
