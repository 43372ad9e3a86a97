//! The request controller. Wires together the lifecycle state machine,
//! a [`Generator`] transport, and the event bus.
//!
//! One controller owns one [`GenerationRequest`]. `submit` is the only
//! path that sends anything over the wire, and it sends exactly once per
//! accepted submission: the Pending guard in the state machine rejects a
//! second submit while a call is outstanding, so no interleaving of
//! transitions is possible.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::consts::GENERATION_FAILED_MSG;
use crate::events::{Event, EventBus};
use crate::generator::Generator;
use crate::request::{GenerationRequest, Rejection};

/// What a call to [`Controller::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request ran to a terminal state; here is where it ended up.
    Finished(GenerationRequest),
    /// The submission was refused; no call was made, state is unchanged.
    Rejected(Rejection),
}

pub struct Controller {
    // Never held across an await. The outbound call runs unlocked so a
    // concurrent submit can observe Pending and be refused.
    request: Mutex<GenerationRequest>,
    generator: Arc<dyn Generator>,
    events: EventBus,
}

impl Controller {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self {
            request: Mutex::new(GenerationRequest::new()),
            generator,
            events: EventBus::default(),
        }
    }

    /// Submit a topic for generation and drive the request to a terminal
    /// state. Refuses blank topics and double-submission without touching
    /// the wire. Transport errors never escape: any failure becomes the
    /// Failed state with the one generic user-facing message, and the
    /// underlying cause goes to stderr.
    pub async fn submit(&self, topic: &str) -> SubmitOutcome {
        {
            let mut request = self.request.lock().unwrap();
            if let Err(rejection) = request.begin(topic) {
                return SubmitOutcome::Rejected(rejection);
            }
            self.events.emit(Event::StatusChanged {
                status: request.status().clone(),
            });
        }

        let result = self.generator.generate(topic.trim()).await;

        let snapshot = {
            let mut request = self.request.lock().unwrap();
            match result {
                Ok(video) => request.succeed(video.video_url),
                Err(e) => {
                    eprintln!("generation error: {e:#}");
                    request.fail(GENERATION_FAILED_MSG.to_string());
                }
            }
            self.events.emit(Event::StatusChanged {
                status: request.status().clone(),
            });
            request.clone()
        };

        SubmitOutcome::Finished(snapshot)
    }

    /// Return the request to Idle. Refused (returns false) while a call
    /// is outstanding.
    pub fn reset(&self) -> bool {
        let mut request = self.request.lock().unwrap();
        let reset = request.reset();
        if reset {
            self.events.emit(Event::StatusChanged {
                status: request.status().clone(),
            });
        }
        reset
    }

    /// A clone of the current request, for rendering.
    pub fn snapshot(&self) -> GenerationRequest {
        self.request.lock().unwrap().clone()
    }

    /// Observe status transitions as they happen, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }
}
