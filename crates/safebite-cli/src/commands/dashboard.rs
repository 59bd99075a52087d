use chrono::Utc;
use safebite_core::DashboardSummary;

use super::{open_signed_in, CommandResult};

pub fn run(json: bool) -> CommandResult {
    let state = open_signed_in()?;
    let user = state.require_user()?;
    let summary = DashboardSummary::build(user, state.log(), Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.render());
    }
    Ok(())
}
