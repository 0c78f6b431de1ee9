/// Approximate number of bytes a stored value occupies.
///
/// Reported alongside confirmations and not-found errors as a diagnostic;
/// the figure is an estimate, not a promise about any backing store.
pub trait Footprint {
    fn footprint(&self) -> usize;
}
