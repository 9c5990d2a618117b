//! Organization listing.

use tabled::Tabled;

use meraki_core::{Dashboard, Organization};

use crate::cli::{GlobalOpts, LimitArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct OrgRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Org ID")]
    id: String,
}

impl From<&Organization> for OrgRow {
    fn from(o: &Organization) -> Self {
        Self {
            name: o.name.clone(),
            id: o.id.clone(),
        }
    }
}

/// Lists the name -> id map, so duplicate names collapse to the last id.
pub async fn handle(
    dashboard: &Dashboard,
    args: &LimitArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let orgs: Vec<Organization> = dashboard
        .org_name_to_id()
        .await?
        .into_iter()
        .take(args.limit)
        .map(|(name, id)| Organization { id, name })
        .collect();

    let out = output::render_list(&global.output, &orgs, |o| OrgRow::from(o), |o| o.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
