use crate::snapshot::Snapshot;

/// Keep-newest-N retention policy.
///
/// Works over a listing in the order the cluster returned it (oldest
/// first): the excess to delete is always a prefix of the list.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    keep: usize,
}

impl RetentionPolicy {
    pub fn new(keep: usize) -> Self {
        Self { keep }
    }

    pub fn keep(&self) -> usize {
        self.keep
    }

    /// Returns the snapshots that fall outside the retention window, oldest
    /// first. Empty when the listing already fits within `keep`.
    pub fn excess<'a>(&self, snapshots: &'a [Snapshot]) -> &'a [Snapshot] {
        if snapshots.len() <= self.keep {
            &[]
        } else {
            &snapshots[..snapshots.len() - self.keep]
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::snapshot::ListSnapshotsResponse;

    fn fixture_snapshots(count: usize) -> Vec<Snapshot> {
        let entries: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"snapshot":"snapshot_{i}","state":"SUCCESS"}}"#))
            .collect();
        let raw = format!(r#"{{"snapshots":[{}]}}"#, entries.join(","));
        serde_json::from_str::<ListSnapshotsResponse>(&raw)
            .unwrap()
            .snapshots
    }

    #[test]
    fn test_excess_selects_the_oldest_prefix() {
        let snapshots = fixture_snapshots(18);
        let policy = RetentionPolicy::new(10);

        let actual: Vec<&str> = policy
            .excess(&snapshots)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        let expected: Vec<String> = (0..8).map(|i| format!("snapshot_{i}")).collect();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_excess_is_empty_when_keep_exceeds_count() {
        let snapshots = fixture_snapshots(18);
        let policy = RetentionPolicy::new(20);

        assert!(policy.excess(&snapshots).is_empty());
    }

    #[test]
    fn test_excess_is_empty_at_exact_keep() {
        let snapshots = fixture_snapshots(10);
        let policy = RetentionPolicy::new(10);

        assert!(policy.excess(&snapshots).is_empty());
    }

    #[test]
    fn test_excess_on_empty_listing() {
        let policy = RetentionPolicy::new(5);

        assert!(policy.excess(&[]).is_empty());
    }

    #[test]
    fn test_keep_zero_selects_everything() {
        let snapshots = fixture_snapshots(3);
        let policy = RetentionPolicy::new(0);

        assert_eq!(policy.excess(&snapshots).len(), 3);
    }
}
