//! Provider-agnostic domain types.
//!
//! Everything here is plain data plus the small invariants that belong to
//! it (the bounded [`SeenSet`], the [`MonitorTask`] lifecycle). No I/O.

pub mod alert;
pub mod event;
pub mod id;
pub mod seen;
pub mod subscriber;
pub mod summary;
pub mod task;
pub mod token;
pub mod watch;

pub use alert::{Alert, SampleWallet};
pub use event::{Side, TradeEvent};
pub use id::{PairId, SubscriberId};
pub use seen::{SeenSet, SEEN_RETAIN, SEEN_SOFT_CAP};
pub use subscriber::{SubscriberBook, SubscriberRecord};
pub use summary::TraderSummary;
pub use task::{MonitorState, MonitorStatus, MonitorTask};
pub use token::{TimeWindow, TokenInfo, TraderReport};
pub use watch::{CandidateItem, WatchKey};
