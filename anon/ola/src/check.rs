//! The privacy predicate applied to a candidate grouping.

use crate::classes::EquivalenceClasses;

/// Decides whether a grouping is releasable for a given `k` and maximum
/// fraction of suppressed records.
pub trait SuitabilityCheck {
    fn is_suitable(&self, classes: &EquivalenceClasses, k: usize, max_suppression: f64) -> bool;
}

impl<F> SuitabilityCheck for F
where
    F: Fn(&EquivalenceClasses, usize, f64) -> bool,
{
    fn is_suitable(&self, classes: &EquivalenceClasses, k: usize, max_suppression: f64) -> bool {
        self(classes, k, max_suppression)
    }
}

/// k-anonymity with bounded suppression: the records falling in classes
/// smaller than `k` may make up at most `max_suppression` of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KAnonymity;

impl SuitabilityCheck for KAnonymity {
    fn is_suitable(&self, classes: &EquivalenceClasses, k: usize, max_suppression: f64) -> bool {
        if k == 0 || classes.total_records() == 0 {
            return true;
        }
        let suppressed = classes.records_below(k);
        if suppressed == 0 {
            return true;
        }
        (suppressed as f64 / classes.total_records() as f64) <= max_suppression
    }
}

/// Plain k-anonymity: every class has at least `k` members.
pub fn k_anonymity(classes: &EquivalenceClasses, k: usize) -> bool {
    KAnonymity.is_suitable(classes, k, 0.0)
}
