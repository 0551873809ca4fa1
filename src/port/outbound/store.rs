//! Subscriber persistence port.
//!
//! Read at startup and written at process boundaries. The core never
//! touches files itself.

use crate::domain::SubscriberBook;
use crate::error::Result;

/// Port for loading and saving the subscriber book.
///
/// # Errors
///
/// Methods return [`Result`] for storage failures.
pub trait SubscriberStore: Send + Sync {
    /// Load the stored book. A missing store yields an empty book.
    fn load(&self) -> Result<SubscriberBook>;

    /// Replace the stored book.
    fn save(&self, book: &SubscriberBook) -> Result<()>;
}
