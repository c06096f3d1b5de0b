//! Data fabric for synthetic advertising-performance data.
//!
//! The fabric turns a seed into the complete panel: response curves and
//! seasonality shape each record, the panel generator emits one record per
//! (day, brand, channel), the relationship builders produce the halo and
//! synergy matrices, and the cache memoizes the result for the process.

mod cache;
mod panel_gen;
mod relationships;
mod response_curve;
mod seasonality;

pub use cache::*;
pub use panel_gen::{GeneratorConfig, PanelGenerator};
pub use relationships::*;
pub use response_curve::*;
pub use seasonality::*;
