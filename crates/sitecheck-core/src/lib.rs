pub mod error;
pub mod ids;
pub mod time;

pub use error::{ErrorCode, SiteError, SiteResult};
pub use ids::{SiteId, UserId};
pub use time::{now_epoch_millis, EpochMillis};
