//! The generation request lifecycle, as a pure state machine.
//!
//! A request moves Idle → Pending → (Succeeded | Failed) and back to Idle
//! via [`GenerationRequest::reset`]. Carrying the video URL and the error
//! message inside the [`Status`] variants makes the payload invariants
//! impossible to violate: a URL exists only while Succeeded, a message
//! only while Failed. No I/O happens here — the controller drives the
//! transitions.

/// Where a request is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No request outstanding, nothing to show.
    Idle,
    /// The outbound call has been sent and has not resolved yet.
    Pending,
    /// The service returned a video location.
    Succeeded { video_url: String },
    /// The call failed (network, bad status, malformed body — all alike).
    Failed { message: String },
}

/// Why a submission was refused. State is untouched in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Empty or whitespace-only topic.
    EmptyTopic,
    /// Another request is still outstanding.
    Outstanding,
}

/// A single generation request record. Exclusively owned and mutated by
/// the controller; the presentation layer only ever sees clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    topic: String,
    status: Status,
}

impl GenerationRequest {
    pub fn new() -> Self {
        Self {
            topic: String::new(),
            status: Status::Idle,
        }
    }

    /// Try to start a new request. Trims the topic, rejects blank input
    /// and double-submission, otherwise clears any prior outcome and
    /// enters Pending. Allowed from Idle and from both terminal states.
    pub fn begin(&mut self, topic: &str) -> Result<(), Rejection> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Rejection::EmptyTopic);
        }
        if self.status == Status::Pending {
            return Err(Rejection::Outstanding);
        }
        self.topic = topic.to_string();
        self.status = Status::Pending;
        Ok(())
    }

    /// Record a successful resolution. Only meaningful while Pending;
    /// a resolution can't arrive for a call that was never sent.
    pub fn succeed(&mut self, video_url: String) {
        if self.status == Status::Pending {
            self.status = Status::Succeeded { video_url };
        }
    }

    /// Record a failed resolution. Same guard as [`succeed`](Self::succeed).
    pub fn fail(&mut self, message: String) {
        if self.status == Status::Pending {
            self.status = Status::Failed { message };
        }
    }

    /// Return to Idle, discarding topic and outcome. No-op while Pending:
    /// an outstanding call always runs to resolution.
    pub fn reset(&mut self) -> bool {
        if self.status == Status::Pending {
            return false;
        }
        self.topic.clear();
        self.status = Status::Idle;
        true
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    /// The video location, present iff the request succeeded.
    pub fn result_url(&self) -> Option<&str> {
        match &self.status {
            Status::Succeeded { video_url } => Some(video_url),
            _ => None,
        }
    }

    /// The failure message, present iff the request failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            Status::Failed { message } => Some(message),
            _ => None,
        }
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::new()
    }
}
