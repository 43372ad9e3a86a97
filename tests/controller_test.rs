use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Notify;

use reel::consts::GENERATION_FAILED_MSG;
use reel::controller::{Controller, SubmitOutcome};
use reel::events::Event;
use reel::generator::mock::{MockGenerator, Scripted};
use reel::generator::{GeneratedVideo, Generator};
use reel::request::{Rejection, Status};

/// A generator that stays in flight until released, so tests can poke at
/// the controller while a request is outstanding.
struct StallingGenerator {
    release: Notify,
    calls: AtomicUsize,
}

impl StallingGenerator {
    fn new() -> Self {
        Self {
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Generator for StallingGenerator {
    async fn generate(&self, _topic: &str) -> Result<GeneratedVideo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(GeneratedVideo {
            video_url: "/videos/slow.mp4".to_string(),
        })
    }
}

fn finished(outcome: SubmitOutcome) -> reel::request::GenerationRequest {
    match outcome {
        SubmitOutcome::Finished(request) => request,
        SubmitOutcome::Rejected(r) => panic!("expected Finished, got Rejected({r:?})"),
    }
}

#[tokio::test]
async fn successful_generation() {
    let generator = Arc::new(MockGenerator::new(vec![Scripted::Url(
        "/v/1.mp4".to_string(),
    )]));
    let controller = Controller::new(generator.clone());

    let request = finished(controller.submit("Photosynthesis").await);

    assert_eq!(request.topic(), "Photosynthesis");
    assert_eq!(request.result_url(), Some("/v/1.mp4"));
    assert!(request.error_message().is_none());
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn failed_generation_gets_the_generic_message() {
    let generator = Arc::new(MockGenerator::new(vec![Scripted::Error(
        "connection timed out".to_string(),
    )]));
    let controller = Controller::new(generator.clone());

    let request = finished(controller.submit("Quantum Tunneling").await);

    assert_eq!(request.error_message(), Some(GENERATION_FAILED_MSG));
    assert!(request.result_url().is_none());
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn empty_topic_rejected_without_any_call() {
    let generator = Arc::new(MockGenerator::new(vec![Scripted::Url(
        "/v/1.mp4".to_string(),
    )]));
    let controller = Controller::new(generator.clone());

    let outcome = controller.submit("   \t  ").await;
    assert_eq!(outcome, SubmitOutcome::Rejected(Rejection::EmptyTopic));
    assert_eq!(generator.calls(), 0);
    assert_eq!(*controller.snapshot().status(), Status::Idle);
}

#[tokio::test]
async fn topic_is_trimmed_before_sending() {
    let generator = Arc::new(MockGenerator::new(vec![Scripted::Url(
        "/v/1.mp4".to_string(),
    )]));
    let controller = Controller::new(generator);

    let request = finished(controller.submit("  Photosynthesis  ").await);
    assert_eq!(request.topic(), "Photosynthesis");
}

#[tokio::test]
async fn one_call_per_submit() {
    let generator = Arc::new(MockGenerator::new(vec![
        Scripted::Url("/v/1.mp4".to_string()),
        Scripted::Url("/v/2.mp4".to_string()),
    ]));
    let controller = Controller::new(generator.clone());

    finished(controller.submit("first").await);
    finished(controller.submit("second").await);

    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn resubmit_after_failure_starts_fresh() {
    let generator = Arc::new(MockGenerator::new(vec![
        Scripted::Error("service down".to_string()),
        Scripted::Url("/v/retry.mp4".to_string()),
    ]));
    let controller = Controller::new(generator);

    let first = finished(controller.submit("Photosynthesis").await);
    assert!(first.error_message().is_some());

    // The user tries again by hand; the controller never retries itself.
    let second = finished(controller.submit("Photosynthesis").await);
    assert_eq!(second.result_url(), Some("/v/retry.mp4"));
    assert!(second.error_message().is_none());
}

#[tokio::test]
async fn submit_while_pending_is_a_noop() {
    let generator = Arc::new(StallingGenerator::new());
    let controller = Arc::new(Controller::new(generator.clone()));

    let background = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit("first").await })
    };

    // Wait for the outbound call to actually be in flight
    while generator.calls.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert!(controller.snapshot().is_pending());

    // Second submit: refused, no second call, outstanding request untouched
    let outcome = controller.submit("second").await;
    assert_eq!(outcome, SubmitOutcome::Rejected(Rejection::Outstanding));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.snapshot().topic(), "first");

    generator.release.notify_one();
    let request = finished(background.await.unwrap());
    assert_eq!(request.result_url(), Some("/videos/slow.mp4"));
}

#[tokio::test]
async fn reset_refused_while_pending() {
    let generator = Arc::new(StallingGenerator::new());
    let controller = Arc::new(Controller::new(generator.clone()));

    let background = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit("topic").await })
    };

    while generator.calls.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    assert!(!controller.reset());
    assert!(controller.snapshot().is_pending());

    generator.release.notify_one();
    finished(background.await.unwrap());
}

#[tokio::test]
async fn reset_after_success_returns_to_idle() {
    let generator = Arc::new(MockGenerator::new(vec![Scripted::Url(
        "/v/1.mp4".to_string(),
    )]));
    let controller = Controller::new(generator);

    finished(controller.submit("Photosynthesis").await);
    assert!(controller.reset());

    let snapshot = controller.snapshot();
    assert_eq!(*snapshot.status(), Status::Idle);
    assert_eq!(snapshot.topic(), "");
    assert!(snapshot.result_url().is_none());
    assert!(snapshot.error_message().is_none());
}

#[tokio::test]
async fn reset_after_failure_returns_to_idle() {
    let generator = Arc::new(MockGenerator::new(vec![Scripted::Error(
        "boom".to_string(),
    )]));
    let controller = Controller::new(generator);

    finished(controller.submit("topic").await);
    assert!(controller.reset());
    assert_eq!(*controller.snapshot().status(), Status::Idle);
}

#[tokio::test]
async fn transitions_are_observed_in_order() {
    let generator = Arc::new(MockGenerator::new(vec![Scripted::Url(
        "/v/1.mp4".to_string(),
    )]));
    let controller = Controller::new(generator);
    let mut events = controller.subscribe();

    finished(controller.submit("Photosynthesis").await);

    let Event::StatusChanged { status: first } = events.recv().await.unwrap();
    assert_eq!(first, Status::Pending);

    let Event::StatusChanged { status: second } = events.recv().await.unwrap();
    assert_eq!(
        second,
        Status::Succeeded {
            video_url: "/v/1.mp4".to_string()
        }
    );
}

#[tokio::test]
async fn failure_transition_is_broadcast() {
    let generator = Arc::new(MockGenerator::new(vec![Scripted::Error(
        "HTTP 500".to_string(),
    )]));
    let controller = Controller::new(generator);
    let mut events = controller.subscribe();

    finished(controller.submit("Quantum Tunneling").await);

    let Event::StatusChanged { status: first } = events.recv().await.unwrap();
    assert_eq!(first, Status::Pending);

    let Event::StatusChanged { status: second } = events.recv().await.unwrap();
    assert_eq!(
        second,
        Status::Failed {
            message: GENERATION_FAILED_MSG.to_string()
        }
    );
}

#[tokio::test]
async fn rejected_submit_emits_no_events() {
    let generator = Arc::new(MockGenerator::new(vec![]));
    let controller = Controller::new(generator);
    let mut events = controller.subscribe();

    let outcome = controller.submit("").await;
    assert_eq!(outcome, SubmitOutcome::Rejected(Rejection::EmptyTopic));

    assert!(matches!(
        events.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}
