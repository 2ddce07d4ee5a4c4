//! Installs a subscriber for the `tracing::trace_span!` calls around
//! `make_disjoint`/`simplify`, mirroring the teacher's own
//! `tracing_subscriber::fmt().init()` wiring in its binaries.

use random_events_core::interval;

#[test]
fn make_disjoint_runs_under_an_installed_subscriber() {
    let _ = tracing_subscriber::fmt().with_env_filter("trace").try_init();

    let merged = interval::closed(0.0, 10.0).union(&interval::closed(2.0, 3.0)).union(&interval::closed(9.0, 12.0));

    assert!(merged.is_disjoint());
    assert_eq!(merged.atoms().len(), 1);
}
