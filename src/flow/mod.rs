/// Flow normalization
///
/// Turns the raw, partially-optional sensor readings of one update tick into
/// a normalized [`FlowSnapshot`] with rounded edge magnitudes, derived
/// aggregates and presence decisions.
pub mod reading;
pub mod resolver;
pub mod snapshot;

pub use reading::{Reading, ReadingProvider, StaticReadings};
pub use resolver::resolve;
pub use snapshot::{FlowEdge, FlowSnapshot};
