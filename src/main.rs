use clap::{Parser, ValueEnum};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anybox_search::utils::{added_on, summary_line};
use anybox_search::{
    Config, LogErrorHandler, LogNotifier, PreferenceStore, Preferences, PreferencesProvider,
    SearchClient, SearchOutcome, SearchQuery, YesNo,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StarredArg {
    Yes,
    No,
}

impl From<StarredArg> for YesNo {
    fn from(value: StarredArg) -> Self {
        match value {
            StarredArg::Yes => YesNo::Yes,
            StarredArg::No => YesNo::No,
        }
    }
}

/// Search bookmarks saved in Anybox.
#[derive(Parser, Debug)]
#[command(name = "anybox-search", version, about = "Search bookmarks saved in Anybox")]
struct CliArgs {
    #[arg(value_name = "QUERY", help = "Search keyword (default: none)")]
    query: Option<String>,
    #[arg(long = "smart-list", value_name = "ID", help = "Limit the search to one Smart List")]
    smart_list: Option<String>,
    #[arg(long, value_name = "ID", help = "Limit the search to one tag")]
    tag: Option<String>,
    #[arg(long, value_enum, help = "Only starred or only unstarred links")]
    starred: Option<StarredArg>,
    #[arg(short = 'n', long, value_name = "N", help = "Maximum links returned (default: 50)")]
    limit: Option<u32>,
    #[arg(long, help = "Print the links as JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> anyhow::Result<bool> {
    let config = Config::from_env()?;
    let store = Arc::new(PreferenceStore::from_config(&config));

    // A broken store surfaces again inside the search through the error
    // handler.
    let query = build_query(&args, store.preferences().ok().as_ref());

    let client = SearchClient::new(store, Arc::new(LogNotifier), Arc::new(LogErrorHandler))
        .with_config(&config);
    info!("Searching Anybox at {}", client.base_url());

    let outcome = client.search(&query).await;
    print_outcome(outcome, args.json, &mut std::io::stdout().lock())
}

/// Pinyin follows the preference when it could be read, otherwise it is off.
fn build_query(args: &CliArgs, preferences: Option<&Preferences>) -> SearchQuery {
    let mut query = match preferences {
        Some(preferences) => SearchQuery::for_preferences(preferences),
        None => SearchQuery::new(YesNo::No),
    };
    if let Some(keyword) = &args.query {
        query = query.with_keyword(keyword.as_str());
    }
    if let Some(id) = &args.smart_list {
        query = query.with_smart_list(id.as_str());
    }
    if let Some(id) = &args.tag {
        query = query.with_tag(id.as_str());
    }
    if let Some(starred) = args.starred {
        query = query.with_starred(starred.into());
    }
    if let Some(limit) = args.limit {
        query = query.with_limit(limit);
    }
    query
}

/// Writes the links and reports whether the search succeeded. Failures were
/// already reported by the client, so nothing is written for them.
fn print_outcome(outcome: SearchOutcome, json: bool, out: &mut impl Write) -> anyhow::Result<bool> {
    let links = match outcome {
        SearchOutcome::Links(links) => links,
        SearchOutcome::Unauthorized | SearchOutcome::Failed(_) => return Ok(false),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&links)?)?;
    } else {
        for link in &links {
            match added_on(link) {
                Some(date) => writeln!(out, "{}  {}", date, summary_line(link))?,
                None => writeln!(out, "{}", summary_line(link))?,
            }
        }
    }
    Ok(true)
}
