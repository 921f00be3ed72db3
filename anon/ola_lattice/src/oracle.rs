use crate::strategy::Strategy;

/// Decides whether a strategy satisfies the privacy constraint.
///
/// Implementations must be upward-closed under dominance for the search to
/// return the exact k-minimal set.
pub trait SuitabilityOracle {
    type Error;

    fn is_suitable(&mut self, strategy: &Strategy) -> Result<bool, Self::Error>;
}

impl<F, E> SuitabilityOracle for F
where
    F: FnMut(&Strategy) -> Result<bool, E>,
{
    type Error = E;

    fn is_suitable(&mut self, strategy: &Strategy) -> Result<bool, E> {
        self(strategy)
    }
}
