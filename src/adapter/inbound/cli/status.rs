//! Handler for the `status` command.

use crate::adapter::inbound::cli::command::StatusArgs;
use crate::adapter::inbound::cli::print_json;
use crate::domain::SubscriberId;
use crate::error::{ControlError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::SubscriberStore;

/// Print the persisted subscriber book, or one subscriber's record.
pub fn execute(config: &Config, args: &StatusArgs) -> Result<()> {
    let book = bootstrap::build_store(config).load()?;

    match &args.subscriber {
        Some(id) => {
            let id = SubscriberId::new(id.clone());
            let record = book
                .get(&id)
                .ok_or_else(|| ControlError::NotRunning { subscriber: id.clone() })?;
            print_json(record)
        }
        None => print_json(&book),
    }
}
