//! End-to-end click flows: controller -> HTTP adapter -> in-memory backend.

use std::sync::Arc;

use vote_sync::ChannelObserver;
use vote_sync::Credential;
use vote_sync::HttpVoteService;
use vote_sync::Notification;
use vote_sync::RemoteError;
use vote_sync::Session;
use vote_sync::Severity;
use vote_sync::SubmitOutcome;
use vote_sync::SwitchStrategy;
use vote_sync::SyncConfig;
use vote_sync::TargetRef;
use vote_sync::VoteController;
use vote_sync::VoteEvent;
use vote_sync::VoteIntent;
use vote_sync::VoteRegistry;
use vote_sync::VoteState;
use vote_sync::VoteView;
use warp::http::Method;
use warp::http::StatusCode;

use crate::common::Hit;
use crate::common::QaBackend;
use crate::common::TOKEN;

fn signed_in() -> Arc<Session> {
    Arc::new(Session::with_credential(Credential::new(TOKEN)))
}

fn committed(
    state: VoteState,
    tally: i64,
) -> SubmitOutcome {
    SubmitOutcome::Committed { state, tally }
}

#[tokio::test]
async fn test_question_click_sequence_round_trips() {
    crate::enable_logger();
    let backend = QaBackend::start().await;
    let session = signed_in();
    let service = Arc::new(HttpVoteService::new(backend.api_config(), session.clone()).unwrap());

    let controller = VoteController::builder(TargetRef::question(12), service, session)
        .initial(VoteState::None, 10)
        .build();

    assert_eq!(
        controller.submit_vote(VoteIntent::Upvote).await,
        committed(VoteState::Upvoted, 11)
    );
    assert_eq!(backend.vote_on("perguntas", 12).as_deref(), Some("upvote"));

    assert_eq!(
        controller.submit_vote(VoteIntent::Downvote).await,
        committed(VoteState::Downvoted, 9)
    );
    assert_eq!(backend.vote_on("perguntas", 12).as_deref(), Some("downvote"));

    assert_eq!(
        controller.submit_vote(VoteIntent::Downvote).await,
        committed(VoteState::None, 10)
    );
    assert_eq!(backend.vote_on("perguntas", 12), None);

    let methods: Vec<Method> = backend.hits().into_iter().map(|h| h.method).collect();
    assert_eq!(methods, vec![Method::POST, Method::POST, Method::DELETE]);
    assert_eq!(controller.confirmed(), VoteView::new(VoteState::None, 10));
}

#[tokio::test]
async fn test_answer_toggle_off_from_hydrated_upvote() {
    crate::enable_logger();
    let backend = QaBackend::start().await;
    let session = signed_in();
    let service = Arc::new(HttpVoteService::new(backend.api_config(), session.clone()).unwrap());

    // The card came from the server with an upvote already held
    let controller = VoteController::builder(TargetRef::answer(5), service.clone(), session.clone())
        .initial(VoteState::Upvoted, 3)
        .build();

    // Server has no record yet; removal is still a success
    assert_eq!(
        controller.submit_vote(VoteIntent::Upvote).await,
        committed(VoteState::None, 2)
    );
    assert_eq!(
        backend.hits(),
        vec![Hit {
            method: Method::DELETE,
            path: "/api/respostas/5/vote".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_remove_then_cast_switch_against_backend() {
    crate::enable_logger();
    let backend = QaBackend::start().await;
    let session = signed_in();
    let service = Arc::new(HttpVoteService::new(backend.api_config(), session.clone()).unwrap());
    let (observer, mut events) = ChannelObserver::new();

    let controller = VoteController::builder(TargetRef::question(7), service, session)
        .settings(SyncConfig {
            switch_strategy: SwitchStrategy::RemoveThenCast,
            ..SyncConfig::default()
        })
        .observer(Arc::new(observer))
        .build();

    controller.submit_vote(VoteIntent::Upvote).await;
    let outcome = controller.submit_vote(VoteIntent::Downvote).await;

    assert_eq!(outcome, committed(VoteState::Downvoted, -1));
    assert_eq!(backend.vote_on("perguntas", 7).as_deref(), Some("downvote"));

    let methods: Vec<Method> = backend.hits().into_iter().map(|h| h.method).collect();
    assert_eq!(methods, vec![Method::POST, Method::DELETE, Method::POST]);

    // One tally update and one notification per click, never one per remote call
    drop(controller);
    let mut notifications = 0;
    let mut tallies = Vec::new();
    while let Some(event) = events.recv().await {
        match event {
            VoteEvent::TallyChanged { tally, .. } => tallies.push(tally),
            VoteEvent::Notified { .. } => notifications += 1,
        }
    }
    assert_eq!(tallies, vec![1, -1]);
    assert_eq!(notifications, 2);
}

#[tokio::test]
async fn test_backend_failure_rolls_back_and_notifies() {
    crate::enable_logger();
    let backend = QaBackend::start().await;
    let session = signed_in();
    let service = Arc::new(HttpVoteService::new(backend.api_config(), session.clone()).unwrap());
    let (observer, mut events) = ChannelObserver::new();

    let controller = VoteController::builder(TargetRef::question(12), service, session)
        .initial(VoteState::Upvoted, 11)
        .observer(Arc::new(observer))
        .build();

    backend.force_status(Some(StatusCode::SERVICE_UNAVAILABLE));
    let outcome = controller.submit_vote(VoteIntent::Downvote).await;

    match outcome {
        SubmitOutcome::Failed {
            error: RemoteError::Rejected { status, .. },
            state,
            tally,
        } => {
            assert_eq!(status, 503);
            assert_eq!(state, VoteState::Upvoted);
            assert_eq!(tally, 11);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(controller.view(), VoteView::new(VoteState::Upvoted, 11));
    assert!(!controller.is_in_flight());

    let event = events.recv().await.unwrap();
    match event {
        VoteEvent::Notified { notification, .. } => {
            assert_eq!(notification.severity, Severity::Error);
            assert_eq!(notification.title, "Vote failed");
        }
        other => panic!("unexpected event: {:?}", other),
    }

    // Backend recovers; the next click starts from the restored baseline
    backend.force_status(None);
    assert_eq!(
        controller.submit_vote(VoteIntent::Downvote).await,
        committed(VoteState::Downvoted, 9)
    );
}

#[tokio::test]
async fn test_signed_out_click_never_reaches_backend() {
    crate::enable_logger();
    let backend = QaBackend::start().await;
    let session = Arc::new(Session::new());
    let service = Arc::new(HttpVoteService::new(backend.api_config(), session.clone()).unwrap());
    let (observer, mut events) = ChannelObserver::new();

    let controller = VoteController::builder(TargetRef::question(1), service, session.clone())
        .initial(VoteState::None, 4)
        .observer(Arc::new(observer))
        .build();

    assert_eq!(
        controller.submit_vote(VoteIntent::Upvote).await,
        SubmitOutcome::Unauthenticated
    );
    assert!(backend.hits().is_empty());
    assert_eq!(controller.view(), VoteView::new(VoteState::None, 4));
    assert_eq!(
        events.recv().await,
        Some(VoteEvent::Notified {
            target: TargetRef::question(1),
            notification: Notification::login_required(),
        })
    );

    // Signing in on the shared session is picked up by the next click
    session.sign_in(Credential::new(TOKEN));
    assert_eq!(
        controller.submit_vote(VoteIntent::Upvote).await,
        committed(VoteState::Upvoted, 5)
    );
}

#[tokio::test]
async fn test_expired_token_is_reported_as_unauthorized_failure() {
    crate::enable_logger();
    let backend = QaBackend::start().await;
    let session = Arc::new(Session::with_credential(Credential::new("expired")));
    let service = Arc::new(HttpVoteService::new(backend.api_config(), session.clone()).unwrap());

    let controller = VoteController::builder(TargetRef::answer(2), service, session)
        .initial(VoteState::None, 0)
        .build();

    let outcome = controller.submit_vote(VoteIntent::Upvote).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            error: RemoteError::Unauthorized { status: 401 },
            state: VoteState::None,
            tally: 0,
        }
    );
    assert_eq!(backend.vote_on("respostas", 2), None);
}

#[tokio::test]
async fn test_registry_keeps_list_and_detail_views_in_agreement() {
    crate::enable_logger();
    let backend = QaBackend::start().await;
    let session = signed_in();
    let service = Arc::new(HttpVoteService::new(backend.api_config(), session.clone()).unwrap());
    let registry = Arc::new(VoteRegistry::new());
    let target = TargetRef::question(42);

    let list_card = VoteController::builder(target, service.clone(), session.clone())
        .initial(VoteState::None, 8)
        .registry(registry.clone())
        .build();
    let detail_page = VoteController::builder(target, service, session)
        .initial(VoteState::None, 8)
        .registry(registry.clone())
        .build();
    let mut watcher = detail_page.subscribe();

    list_card.submit_vote(VoteIntent::Upvote).await;

    assert_eq!(detail_page.view(), VoteView::new(VoteState::Upvoted, 9));
    assert_eq!(*watcher.borrow_and_update(), VoteView::new(VoteState::Upvoted, 9));
    assert_eq!(registry.view(&target), Some(VoteView::new(VoteState::Upvoted, 9)));

    // A click on the detail page toggles the vote the list card cast
    assert_eq!(
        detail_page.submit_vote(VoteIntent::Upvote).await,
        committed(VoteState::None, 8)
    );
    assert_eq!(list_card.view(), VoteView::new(VoteState::None, 8));
    assert_eq!(backend.vote_on("perguntas", 42), None);
}
