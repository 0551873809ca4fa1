//! Handler for the `traders` command.

use crate::adapter::inbound::cli::command::TradersArgs;
use crate::adapter::inbound::cli::print_json;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

pub async fn execute(config: &Config, args: &TradersArgs) -> Result<()> {
    let services = bootstrap::build_services(config)?;
    let query = bootstrap::build_query(&services);

    let mut report = query
        .query_traders(&args.phrase, args.min_usd, args.network, args.hours)
        .await?;
    if let Some(top) = args.top {
        report.traders.truncate(top);
    }
    print_json(&report)
}
