//! Online/offline evaluation for live location records.

use crate::models::types::LocationRecord;

/// How old a location record may be before the bus counts as offline.
///
/// Shared by every reader that reports bus status; there must be exactly one
/// threshold so "online" badges agree across views.
pub const ONLINE_THRESHOLD_MS: i64 = 5 * 60 * 1000;

/// Is the bus actively sharing its location?
///
/// Absent record means offline. The boundary is exclusive: a record exactly
/// [`ONLINE_THRESHOLD_MS`] old is already offline.
pub fn is_online(record: Option<&LocationRecord>, now_ms: i64) -> bool {
    match record {
        Some(record) => now_ms - record.timestamp_ms < ONLINE_THRESHOLD_MS,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_record_is_offline() {
        assert!(!is_online(None, 1_000_000));
    }

    #[test]
    fn test_fresh_record_is_online() {
        let record = LocationRecord::new(12.97, 77.59, 1_000_000);
        assert!(is_online(Some(&record), 1_000_000));
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        let record = LocationRecord::new(12.97, 77.59, 0);
        assert!(is_online(Some(&record), ONLINE_THRESHOLD_MS - 1));
        assert!(!is_online(Some(&record), ONLINE_THRESHOLD_MS));
        assert!(!is_online(Some(&record), ONLINE_THRESHOLD_MS + 1));
    }
}
