//! Replay checks.

use std::fmt::Debug;

/// Run `scenario` `runs` times and panic unless every run produced the same
/// output. Returns the output of the first run.
pub fn assert_deterministic<T, F>(runs: usize, mut scenario: F) -> T
where
    T: PartialEq + Debug,
    F: FnMut() -> T,
{
    let first = scenario();
    for run in 1..runs {
        let again = scenario();
        assert_eq!(first, again, "run {run} diverged from the first run");
    }
    first
}
