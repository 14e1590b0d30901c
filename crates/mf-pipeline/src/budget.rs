//! Parallelism budget derived from the host's core count.

/// Cores left free for the rest of the system.
pub const RESERVED_CORES: usize = 2;

/// Number of jobs allowed to run at once on a host with `cores` cores.
///
/// Always at least 1, so 1-, 2-, and 3-core hosts still make progress.
pub fn budget(cores: usize) -> usize {
    cores.saturating_sub(RESERVED_CORES).max(1)
}

/// Logical cores available to this process.
pub fn host_cores() -> usize {
    num_cpus::get()
}

/// Pick the parallelism for a run: an explicit override if one is given,
/// otherwise [`budget`] of `cores`. The result is clamped to at least 1.
pub fn resolve_parallelism(cores: usize, override_jobs: Option<usize>) -> usize {
    match override_jobs {
        Some(n) => n.max(1),
        None => budget(cores),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_reserves_two_cores() {
        assert_eq!(budget(4), 2);
        assert_eq!(budget(8), 6);
        assert_eq!(budget(64), 62);
    }

    #[test]
    fn budget_never_drops_below_one() {
        assert_eq!(budget(0), 1);
        assert_eq!(budget(1), 1);
        assert_eq!(budget(2), 1);
        assert_eq!(budget(3), 1);
    }

    #[test]
    fn budget_matches_formula_for_small_hosts() {
        for cores in 1..=32 {
            assert_eq!(budget(cores), std::cmp::max(1, cores as i64 - 2) as usize);
        }
    }

    #[test]
    fn override_wins_and_is_clamped() {
        assert_eq!(resolve_parallelism(16, Some(3)), 3);
        assert_eq!(resolve_parallelism(16, Some(0)), 1);
        assert_eq!(resolve_parallelism(16, None), 14);
    }

    #[test]
    fn host_cores_is_positive() {
        assert!(host_cores() >= 1);
    }
}
