//! A command-line client for the e-voting portal.
//! It drives the same flows as the web client, so anything it refuses to do
//! locally would also be refused there.

use std::path::Path;

use chrono::{DateTime, Utc};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::error;

use evote_client::{
    api::{admin, voting, HttpPortal, PortalApi},
    config::Config,
    error::Error,
    logging,
    model::{
        api::audit::{AuditLogEntry, SupportTicket},
        common::{
            election::Phase,
            filter::{FilterQuery, ALL_CATEGORIES},
        },
    },
    session::Session,
};

const PROGRAM_NAME: &str = "portal-cli";

const ABOUT_TEXT: &str = "Browse elections and cast votes on the e-voting portal.

Configure with `Portal.toml` or `PORTAL_*` environment variables;
at least `PORTAL_BASE_URL` must be set.

EXIT CODES:
     0: Success.
     1: Error.
     2: The vote was rejected, or you are not eligible to vote.";

const ELECTION_ID: &str = "ELECTION_ID";
const CANDIDATE_ID: &str = "CANDIDATE_ID";
const CATEGORY: &str = "category";
const SEARCH: &str = "search";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    let election_id = Arg::new(ELECTION_ID)
        .help("The election's ID, as listed by `elections`")
        .action(ArgAction::Set)
        .required(true);
    let filter_args = [
        Arg::new(CATEGORY)
            .long(CATEGORY)
            .short('c')
            .help("Only show entries in this category")
            .action(ArgAction::Set)
            .default_value(ALL_CATEGORIES),
        Arg::new(SEARCH)
            .long(SEARCH)
            .short('s')
            .help("Case-insensitive text to look for")
            .action(ArgAction::Set)
            .default_value(""),
    ];

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .subcommand_required(true)
        .subcommand(Command::new("elections").about("List elections by phase"))
        .subcommand(
            Command::new("election")
                .about("Show an election, its candidates and your eligibility")
                .arg(election_id.clone()),
        )
        .subcommand(
            Command::new("vote")
                .about("Cast your vote")
                .arg(election_id)
                .arg(
                    Arg::new(CANDIDATE_ID)
                        .help("The chosen candidate's ID")
                        .action(ArgAction::Set)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("audit")
                .about("Search the audit log (admin)")
                .args(filter_args.clone()),
        )
        .subcommand(
            Command::new("tickets")
                .about("Search support tickets (admin)")
                .args(filter_args),
        )
}

/// Print the dashboard.
fn elections(api: &impl PortalApi, now: DateTime<Utc>) -> Result<(), Error> {
    let dashboard = voting::dashboard(api, now)?;
    if dashboard.is_empty() {
        println!("No elections.");
    }
    for phase in [Phase::Active, Phase::Upcoming, Phase::Completed] {
        let elections = dashboard.in_phase(phase);
        if elections.is_empty() {
            continue;
        }
        println!("{}:", phase.label());
        for election in elections {
            println!("  {}  {}", election.id, election.title);
        }
    }
    Ok(())
}

/// Print an election's detail page.
fn election(api: &impl PortalApi, election_id: &str, now: DateTime<Utc>) -> Result<(), Error> {
    let view = voting::election_view(api, election_id, now)?;
    println!("{} [{}]", view.election.title, view.phase.label());
    if !view.election.description.is_empty() {
        println!("{}", view.election.description);
    }
    println!("{}", view.banner());
    match view.standings() {
        Some(standings) => {
            for standing in standings {
                println!(
                    "  {}{}  {} ({}): {} vote{} ({:.1}%)",
                    if standing.leading { "* " } else { "" },
                    standing.candidate.id,
                    standing.candidate.name,
                    standing.candidate.party,
                    standing.votes,
                    if standing.votes != 1 { "s" } else { "" },
                    standing.share
                );
            }
        }
        None => {
            for candidate in &view.candidates {
                println!("  {}  {} ({})", candidate.id, candidate.name, candidate.party);
            }
        }
    }
    Ok(())
}

/// Print the entries matching the filter arguments.
fn filtered<T>(
    args: &ArgMatches,
    fetch: impl FnOnce(&FilterQuery) -> Result<Vec<T>, Error>,
    line: impl Fn(&T) -> String,
) -> Result<(), Error> {
    // Arguments with defaults are guaranteed to be present.
    let category: &String = args.get_one(CATEGORY).unwrap();
    let search: &String = args.get_one(SEARCH).unwrap();
    let items = fetch(&FilterQuery::new(category.as_str(), search.as_str()))?;
    for item in &items {
        println!("{}", line(item));
    }
    println!("{} matching.", items.len());
    Ok(())
}

/// Run the chosen subcommand against `api`, report the result, and return the exit code.
fn run(args: &ArgMatches, api: &impl PortalApi, now: DateTime<Utc>) -> u8 {
    let result = match args.subcommand() {
        Some(("elections", _)) => elections(api, now),
        Some(("election", sub)) => {
            let election_id: &String = sub.get_one(ELECTION_ID).unwrap(); // Required argument.
            election(api, election_id, now)
        }
        Some(("vote", sub)) => {
            let election_id: &String = sub.get_one(ELECTION_ID).unwrap(); // Required argument.
            let candidate_id: &String = sub.get_one(CANDIDATE_ID).unwrap(); // Required argument.
            match voting::cast_ballot(api, election_id, candidate_id, now) {
                Ok(outcome) => {
                    let exit_code = match &outcome {
                        voting::VoteOutcome::Cast { receipt, .. } => {
                            println!("{}", receipt.message.as_deref().unwrap_or("Vote recorded."));
                            0
                        }
                        voting::VoteOutcome::Rejected { message, .. } => {
                            println!("Vote rejected: {message}");
                            2
                        }
                    };
                    match outcome.view() {
                        Some(view) => println!("{}", view.banner()),
                        None => println!("(Could not refresh the election; run `election` to see it.)"),
                    }
                    return exit_code;
                }
                Err(Error::Ineligible(reason)) => {
                    println!("Cannot vote: {}", reason.message());
                    return 2;
                }
                Err(err) => Err(err),
            }
        }
        Some(("audit", sub)) => filtered(
            sub,
            |query| admin::audit_log(api, query),
            |entry: &AuditLogEntry| {
                format!(
                    "{}  {}  {}",
                    entry
                        .timestamp
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| "-".to_string()),
                    entry.action,
                    entry
                        .user
                        .as_ref()
                        .and_then(|u| u.email.as_deref())
                        .unwrap_or("-")
                )
            },
        ),
        Some(("tickets", sub)) => filtered(
            sub,
            |query| admin::tickets(api, query),
            |ticket: &SupportTicket| format!("{}  [{}]  {}", ticket.id, ticket.category, ticket.subject),
        ),
        _ => unreachable!("a subcommand is required"),
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            println!("Error: {}", err.user_message());
            if let Error::Unauthorized(_) = err {
                println!("Sign in again and set `PORTAL_TOKEN`.");
            }
            1
        }
    }
}

/// Build the HTTP portal from configuration.
fn connect() -> Result<HttpPortal, Error> {
    let config = Config::load()?;
    let session = match config.token() {
        Some(token) => Session::start(token, config.preferences())?,
        None => Session::anonymous(config.preferences()),
    };
    if session.is_expired(Utc::now()) {
        println!("Your session has expired; the server will likely refuse it.");
    }
    HttpPortal::new(&config, session)
}

fn main() {
    let args = cli().get_matches();

    // Logging is optional for the CLI.
    if Path::new(logging::LOG_CONFIG_FILE).exists() {
        logging::init(logging::LOG_CONFIG_FILE);
    }

    let exit_code = match connect() {
        Ok(api) => run(&args, &api, Utc::now()),
        Err(err) => {
            error!("{err}");
            println!("Error: {}", err.user_message());
            1
        }
    };
    std::process::exit(exit_code.into())
}
