// ABOUTME: Crash-loop detection over a log snapshot.
// ABOUTME: Plain substring scan; a known weak heuristic, kept as observed.

/// Scan a log snapshot for crash-loop indicators, returning the matched
/// indicator.
///
/// Substring matching over a short snapshot window can miss crashes outside
/// the window or match historical log text. That trade-off is accepted; a
/// false positive costs one unnecessary rollback, a false negative is caught
/// by the health-check deadline.
pub(crate) fn find_crash_indicator(logs: &str) -> Option<String> {
    if logs.contains("CrashLoopBackOff") {
        return Some("CrashLoopBackOff".to_string());
    }
    if logs.to_lowercase().contains("restarting") {
        return Some("restarting".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_logs_match_nothing() {
        let logs = "2024-05-01T10:00:00Z INFO listening on 0.0.0.0:8080\n";
        assert_eq!(find_crash_indicator(logs), None);
    }

    #[test]
    fn crash_loop_back_off_is_detected() {
        let logs = "state changed: CrashLoopBackOff (restart count 4)";
        assert_eq!(
            find_crash_indicator(logs),
            Some("CrashLoopBackOff".to_string())
        );
    }

    #[test]
    fn restarting_matches_case_insensitively() {
        let logs = "Container demo-backend is Restarting after exit code 137";
        assert_eq!(find_crash_indicator(logs), Some("restarting".to_string()));
    }

    #[test]
    fn empty_snapshot_matches_nothing() {
        assert_eq!(find_crash_indicator(""), None);
    }
}
