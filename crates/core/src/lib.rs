pub mod error;
pub mod event;
pub mod snapshot;
pub mod state;

pub use error::{DashError, FetchFailed, Result};
pub use event::Message;
pub use snapshot::{Metric, Snapshot};
pub use state::{LinkStatus, Readouts};
