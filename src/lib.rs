//! Debounced live search over a static catalog
//!
//! Raw keystrokes go in; filtered result sets come out, recomputed only once
//! the term has been quiet for a full debounce window and only when it
//! differs from the last term forwarded.
//!
//! - [`frp`] - discrete/continuous signals; the whole-history model of the search
//! - [`pipeline`] - the incremental, clock-free [`SearchPipeline`]
//! - [`live`] - [`LiveSearch`], the pipeline driven in real time on tokio
//! - [`ticker`] - an interval counter with the same subscription model
//! - [`subscription`] - observer registration and scoped [`Subscription`] handles

pub mod catalog;
pub mod config;
pub mod errors;
pub mod frp;
pub mod keystroke_log;
pub mod live;
pub mod pipeline;
pub mod state_machine;
pub mod subscription;
pub mod ticker;

// Re-export commonly used types
pub use catalog::{Catalog, ResultSet};
pub use config::{SearchConfig, TickerConfig};
pub use errors::{SearchError, SearchResult};
pub use keystroke_log::KeystrokeLog;
pub use live::{LiveSearch, SearchView, Settlements};
pub use pipeline::{SearchPipeline, Settlement};
pub use subscription::{ObserverRegistry, Subscription};
pub use ticker::Ticker;
