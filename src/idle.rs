/// Decide whether the inactivity window has elapsed.
///
/// A clock reading earlier than `last_activity_ms` counts as no time
/// elapsed.
pub fn idle_expired(last_activity_ms: u64, now_ms: u64, timeout_ms: u64) -> bool {
    now_ms.saturating_sub(last_activity_ms) >= timeout_ms
}
