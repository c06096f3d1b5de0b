//! Data model for the synthetic advertising panel.
//!
//! - **Channels**: identifiers, capability descriptors, response-curve parameters
//! - **Brands / markets**: portfolio and geography tables
//! - **Records**: one [`DailyRecord`] per (date, brand, market, channel)
//! - **Relationships**: brand halo and channel synergy entries
//! - **Dataset**: the [`ApiDataResponse`] aggregate root

mod brand;
mod channel;
mod dataset;
mod record;
mod relationships;

pub use brand::*;
pub use channel::*;
pub use dataset::*;
pub use record::*;
pub use relationships::*;
