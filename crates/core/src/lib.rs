pub mod error;
pub mod event;
pub mod history;
pub mod page;
pub mod state;
pub mod tracking;

pub use error::{GuardError, Result};
pub use event::Message;
pub use history::History;
pub use page::Page;
pub use state::{MediaSources, Sample, Snapshot, StreamStatus};
pub use tracking::{TrackPoint, TrackingLog};
