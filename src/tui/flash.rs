use std::time::{Duration, Instant};

use crate::ops::task_store::Outcome;

/// How long a feedback message stays on screen
pub const FLASH_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// A transient feedback message with an explicit expiry.
///
/// Setting a new message replaces the old one and restarts the clock; the
/// event loop drops expired messages with [`expire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
    pub expires_at: Instant,
}

impl Flash {
    pub fn new(kind: FlashKind, text: impl Into<String>, now: Instant) -> Self {
        Flash {
            kind,
            text: text.into(),
            expires_at: now + FLASH_TTL,
        }
    }

    pub fn success(text: impl Into<String>, now: Instant) -> Self {
        Self::new(FlashKind::Success, text, now)
    }

    pub fn error(text: impl Into<String>, now: Instant) -> Self {
        Self::new(FlashKind::Error, text, now)
    }

    pub fn from_outcome(outcome: &Outcome, now: Instant) -> Self {
        match outcome {
            Ok(notice) => Self::success(*notice, now),
            Err(e) => Self::error(e.to_string(), now),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Clear `slot` if its message has expired. Returns true if one was cleared.
pub fn expire(slot: &mut Option<Flash>, now: Instant) -> bool {
    if slot.as_ref().is_some_and(|f| f.is_expired(now)) {
        *slot = None;
        return true;
    }
    false
}
