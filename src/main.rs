use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::ValueEnum;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vote_sync::ChannelObserver;
use vote_sync::Credential;
use vote_sync::HttpVoteService;
use vote_sync::Session;
use vote_sync::SubmitOutcome;
use vote_sync::TargetRef;
use vote_sync::VoteController;
use vote_sync::VoteEvent;
use vote_sync::VoteIntent;
use vote_sync::VoteState;
use vote_sync::VoteSyncConfig;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Question,
    Answer,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Click {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Held {
    None,
    Up,
    Down,
}

/// Submit one vote click against the Q&A backend.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opt {
    kind: Kind,

    id: u64,

    click: Click,

    /// Bearer token of the signed-in user
    #[clap(long, env = "VOTE_TOKEN")]
    token: Option<String>,

    /// Tally currently displayed on the card
    #[clap(long, default_value_t = 0, allow_negative_numbers = true)]
    tally: i64,

    /// Vote the user currently holds on the card
    #[clap(long, value_enum, default_value = "none")]
    state: Held,

    /// Extra configuration file merged over `CONFIG_PATH`
    #[clap(long)]
    config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Opt::parse();
    match run(options).await {
        Ok(outcome) if outcome.is_committed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            error!("vote-sync: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(options: Opt) -> vote_sync::Result<SubmitOutcome> {
    let mut settings = VoteSyncConfig::new()?;
    if let Some(path) = &options.config {
        settings = settings.with_override_config(path)?;
    }
    let settings = settings.validate()?;

    let session = Arc::new(match options.token {
        Some(token) => Session::with_credential(Credential::new(token)),
        None => Session::new(),
    });
    let service = Arc::new(HttpVoteService::new(settings.api.clone(), session.clone())?);

    let target = match options.kind {
        Kind::Question => TargetRef::question(options.id),
        Kind::Answer => TargetRef::answer(options.id),
    };
    let state = match options.state {
        Held::None => VoteState::None,
        Held::Up => VoteState::Upvoted,
        Held::Down => VoteState::Downvoted,
    };
    let intent = match options.click {
        Click::Up => VoteIntent::Upvote,
        Click::Down => VoteIntent::Downvote,
    };

    let (observer, mut events) = ChannelObserver::new();
    let controller = VoteController::builder(target, service, session)
        .initial(state, options.tally)
        .observer(Arc::new(observer))
        .settings(settings.sync)
        .build();

    let outcome = controller.submit_vote(intent).await;
    drop(controller);

    while let Some(event) = events.recv().await {
        if let VoteEvent::Notified { notification, .. } = event {
            println!(
                "[{:?}] {}: {}",
                notification.severity, notification.title, notification.description
            );
        }
    }

    let view = match &outcome {
        SubmitOutcome::Committed { state, tally } | SubmitOutcome::Failed { state, tally, .. } => {
            Some((*state, *tally))
        }
        _ => None,
    };
    if let Some((state, tally)) = view {
        println!("{} {} {}", target, state.as_str(), tally);
    }
    info!("outcome: {}", outcome.as_str());

    Ok(outcome)
}
