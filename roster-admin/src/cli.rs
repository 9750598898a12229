//! Command line interface.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use roster_lib::RosterClient;
use roster_lib::auth::StaticTokenProvider;
use roster_lib::model::Role;
use roster_table::notify::{Notifier, Toast, ToastLevel};
use roster_table::sort::{SortDirection, SortSpec};

use crate::bulk::BulkOutcome;
use crate::config::{Overrides, RosterConfig};
use crate::error::AppError;
use crate::view::RosterView;

/// Administer the members and groups of a school.
#[derive(Parser, Debug)]
#[command(name = "roster-admin", version)]
#[command(about = "Filter school members and manage group memberships")]
pub struct Cli {
    /// API base URL [env: ROSTER_BASE_URL]
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// School id
    #[arg(short, long, global = true)]
    pub school: Option<String>,

    /// Raw Authorization token [env: ROSTER_TOKEN]
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List members, filtered and sorted
    Members(MembersArgs),
    /// List the groups of the school
    Groups,
    /// Add members to a group
    Assign(ChangeArgs),
    /// Remove members from a group
    Unassign(ChangeArgs),
}

#[derive(Args, Debug, Default)]
pub struct MembersArgs {
    /// Search names and emails, or an exact member id
    #[arg(long)]
    pub search: Option<String>,

    /// Only members with this role (repeatable)
    #[arg(long = "role")]
    pub roles: Vec<Role>,

    /// Only members of this group (repeatable)
    #[arg(long = "group")]
    pub groups: Vec<i64>,

    /// Sort key as COLUMN or COLUMN:desc (repeatable, first has priority)
    #[arg(long = "sort", value_parser = parse_sort)]
    pub sort: Vec<SortSpec>,
}

#[derive(Args, Debug)]
pub struct ChangeArgs {
    /// Target group id
    #[arg(short, long)]
    pub group: i64,

    /// Member id (repeatable)
    #[arg(short, long = "member", required = true)]
    pub members: Vec<String>,
}

/// Parse `COLUMN`, `COLUMN:asc` or `COLUMN:desc`.
pub fn parse_sort(value: &str) -> Result<SortSpec, String> {
    let (column, direction) = match value.split_once(':') {
        Some((column, direction)) => (column, direction),
        None => (value, "asc"),
    };
    if column.is_empty() {
        return Err(format!("missing column in sort key: {}", value));
    }
    let direction = match direction.to_ascii_lowercase().as_str() {
        "asc" => SortDirection::Ascending,
        "desc" => SortDirection::Descending,
        other => return Err(format!("unknown sort direction: {}", other)),
    };
    Ok(SortSpec::new(column, direction))
}

/// Prints toasts to the terminal and logs them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        let body = toast.body.as_deref().unwrap_or_default();
        match toast.level {
            ToastLevel::Error => {
                log::warn!("{}: {}", toast.title, body);
                eprintln!("{}: {}", toast.title, body);
            }
            ToastLevel::Success => {
                log::info!("{}: {}", toast.title, body);
                println!("{}: {}", toast.title, body);
            }
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            school_id: self.school.clone(),
            token: self.token.clone(),
            timeout_secs: self.timeout,
            verbose: self.verbose,
        }
    }

    pub async fn run(self, config: &RosterConfig) -> Result<ExitCode, AppError> {
        let school_id = config.school_id()?.to_string();
        let client = RosterClient::builder()
            .url(config.base_url.clone())
            .token_provider(StaticTokenProvider::new(config.token()?))
            .timeout(config.timeout())
            .build()?;

        match self.command {
            Command::Members(args) => members(client, &school_id, args).await,
            Command::Groups => groups(&client, &school_id).await,
            Command::Assign(args) => change(client, &school_id, args, true).await,
            Command::Unassign(args) => change(client, &school_id, args, false).await,
        }
    }
}

/// Apply the members filters and sort to a loaded view.
pub fn apply_members_args(view: &RosterView, args: MembersArgs) -> Result<(), AppError> {
    if let Some(search) = args.search {
        view.search().set(search);
    }
    view.role_filter()
        .set(args.roles.iter().map(|role| role.as_str()))?;
    if !args.groups.is_empty() {
        view.group_filter()
            .set(args.groups.iter().map(|id| id.to_string()))?;
    }
    if !args.sort.is_empty() {
        view.table().set_sort_specs(args.sort)?;
    }
    Ok(())
}

async fn members(
    client: RosterClient,
    school_id: &str,
    args: MembersArgs,
) -> Result<ExitCode, AppError> {
    let view = RosterView::load(Arc::new(client), school_id, None).await?;
    apply_members_args(&view, args)?;
    println!("{}", view.render());
    Ok(ExitCode::SUCCESS)
}

async fn groups(client: &RosterClient, school_id: &str) -> Result<ExitCode, AppError> {
    let groups = client.list_groups(school_id).await?;
    if groups.is_empty() {
        println!("No results.");
    }
    for group in groups {
        println!("{:>6}  {}", group.id, group.name);
    }
    Ok(ExitCode::SUCCESS)
}

async fn change(
    client: RosterClient,
    school_id: &str,
    args: ChangeArgs,
    assign: bool,
) -> Result<ExitCode, AppError> {
    let directory = Arc::new(client.clone());
    let view = RosterView::load(directory, school_id, None).await?;
    let group = view
        .find_group(args.group)
        .cloned()
        .ok_or(AppError::UnknownGroup(args.group))?;

    for member in &args.members {
        view.table().set_row_selected(member, true)?;
    }
    view.group_filter().set([group.id.to_string()])?;

    let actions = view.bulk_actions(Arc::new(client), Arc::new(ConsoleNotifier), group);
    let outcome = if assign {
        actions.assign().await
    } else {
        actions.unassign().await
    };
    log::debug!("bulk action outcome: {:?}", outcome);

    match outcome {
        BulkOutcome::Completed => {
            println!("{}", view.render());
            Ok(ExitCode::SUCCESS)
        }
        BulkOutcome::Failed => Ok(ExitCode::FAILURE),
        BulkOutcome::Skipped(reason) => {
            eprintln!("Nothing to do: {:?}", reason);
            Ok(ExitCode::FAILURE)
        }
    }
}
