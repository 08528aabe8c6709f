//! Record Identifiers
//!
//! Millisecond timestamps, forced strictly increasing so two records created in
//! the same millisecond never collide.

/// Prefix for bookmark folder ids
pub const FOLDER_PREFIX: &str = "folder_";
/// Prefix for bookmark ids
pub const BOOKMARK_PREFIX: &str = "bm_";
/// Prefix for custom feed ids
pub const CUSTOM_FEED_PREFIX: &str = "cf_";

/// Largest stored id that is taken into account. Anything above cannot be a
/// millisecond timestamp and would leave no room for later ids.
const MAX_OBSERVED: u64 = i64::MAX as u64;

/// Monotonic id source
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next numeric id: the current time in ms, or `last + 1` if the clock
    /// has not moved past the previous id.
    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }

    /// Next prefixed string id, e.g. `folder_1700000000000`
    pub fn next_prefixed(&mut self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_id())
    }

    /// Make sure future ids are greater than an id loaded from storage.
    /// Out-of-range ids (tampered storage) are ignored.
    pub fn observe(&mut self, id: u64) {
        if id > MAX_OBSERVED {
            log::warn!("[IDS] Ignoring out-of-range stored id {}", id);
            return;
        }
        self.last = self.last.max(id);
    }

    /// Same as `observe` for prefixed ids. Ids that do not end in a plain
    /// integer (e.g. written by older versions) cannot collide and are ignored.
    pub fn observe_prefixed(&mut self, id: &str) {
        let numeric = id.rsplit('_').next().and_then(|n| n.parse::<u64>().ok());
        if let Some(n) = numeric {
            self.observe(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdGenerator::new();
        let mut previous = ids.next_id();
        for _ in 0..1000 {
            let id = ids.next_id();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn test_observe_moves_past_stored_ids() {
        let mut ids = IdGenerator::new();
        let far_future = u64::MAX / 2;
        ids.observe(far_future);
        assert_eq!(ids.next_id(), far_future + 1);

        ids.observe_prefixed(&format!("{}{}", FOLDER_PREFIX, far_future + 10));
        assert_eq!(ids.next_prefixed(BOOKMARK_PREFIX), format!("bm_{}", far_future + 11));
    }

    #[test]
    fn test_out_of_range_stored_id_does_not_overflow() {
        let mut ids = IdGenerator::new();
        ids.observe(u64::MAX);
        ids.observe_prefixed(&format!("{}{}", BOOKMARK_PREFIX, u64::MAX));
        let first = ids.next_id();
        let second = ids.next_id();
        assert!(first < u64::MAX);
        assert!(second > first);
    }

    #[test]
    fn test_observe_ignores_legacy_fractional_ids() {
        let mut ids = IdGenerator::new();
        ids.observe_prefixed("folder_1700000000000.5123");
        assert!(ids.next_id() > 0);
    }
}
