//! Certificate expiration analysis

use crate::models::{Certificate, CertificateStatus, ExpirationInfo};
use chrono::{DateTime, Utc};

/// Classify a certificate's time validity at `now`.
pub fn analyze(cert: &Certificate, warning_days: u32, now: DateTime<Utc>) -> ExpirationInfo {
    analyze_validity(cert.not_before, cert.not_after, warning_days, now)
}

/// Classify a validity window at `now`.
///
/// `is_expired` compares instants while `days_remaining` truncates to whole
/// days, so shortly after `not_after` the info reads expired with 0 days left.
pub fn analyze_validity(
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    warning_days: u32,
    now: DateTime<Utc>,
) -> ExpirationInfo {
    let days_remaining = (not_after - now).num_days();

    let is_expired = now > not_after;
    let is_warning = !is_expired && days_remaining < i64::from(warning_days);

    let status = if is_expired {
        CertificateStatus::Expired
    } else if is_warning {
        CertificateStatus::Warning
    } else {
        CertificateStatus::Valid
    };

    ExpirationInfo {
        not_before,
        not_after,
        days_remaining,
        is_expired,
        is_warning,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn ten_days_left_is_warning() {
        let info = analyze_validity(
            now() - Duration::days(80),
            now() + Duration::days(10),
            30,
            now(),
        );
        assert_eq!(info.status, CertificateStatus::Warning);
        assert_eq!(info.days_remaining, 10);
        assert!(!info.is_expired);
        assert!(info.is_warning);
    }

    #[test]
    fn five_days_past_is_expired() {
        let info = analyze_validity(
            now() - Duration::days(90),
            now() - Duration::days(5),
            30,
            now(),
        );
        assert_eq!(info.status, CertificateStatus::Expired);
        assert_eq!(info.days_remaining, -5);
        assert!(info.is_expired);
        assert!(!info.is_warning);
    }

    #[test]
    fn threshold_is_exclusive() {
        let info = analyze_validity(now(), now() + Duration::days(30), 30, now());
        assert_eq!(info.status, CertificateStatus::Valid);
    }

    #[test]
    fn zero_warning_days_never_warns() {
        let info = analyze_validity(now(), now() + Duration::hours(2), 0, now());
        assert_eq!(info.status, CertificateStatus::Valid);
        assert_eq!(info.days_remaining, 0);
    }

    #[test]
    fn expired_within_the_day_reports_zero_days() {
        let info = analyze_validity(
            now() - Duration::days(30),
            now() - Duration::hours(23),
            30,
            now(),
        );
        assert!(info.is_expired);
        assert_eq!(info.days_remaining, 0);
        assert_eq!(info.status, CertificateStatus::Expired);
    }

    #[test]
    fn expiry_instant_itself_is_not_expired() {
        let info = analyze_validity(now() - Duration::days(30), now(), 30, now());
        assert!(!info.is_expired);
        assert_eq!(info.status, CertificateStatus::Warning);
    }
}
