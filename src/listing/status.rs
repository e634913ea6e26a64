//! Publication state machine
//!
//! Transition rules: a draft may stay a draft, go live, or be archived;
//! an active listing can only be archived (never pulled back to draft);
//! an archived listing may be reactivated but never becomes a draft
//! again. Any transition into `Active` requires at least one media asset
//! at the moment of the transition — the check runs immediately before
//! commit and is never cached, since media may have been deleted since
//! the form was rendered.

use std::fmt;

use crate::error::VitrineResult;
use crate::listing::types::ListingStatus;

/// Policy rejections from the state machine. These are distinct from
/// validation errors: the payload may be perfectly well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    InvalidTransition {
        from: ListingStatus,
        to: ListingStatus,
    },
    /// A user asked to move a listing into the administrative blocked state.
    BlockedStatusRequested,
    /// The listing is blocked; user updates are rejected wholesale.
    ListingBlocked,
    /// Transition into active with no media assets attached.
    MediaRequired,
}

impl StatusError {
    /// Stable machine-readable code for the HTTP layer.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::BlockedStatusRequested => "BLOCKED_STATUS",
            Self::ListingBlocked => "LISTING_BLOCKED",
            Self::MediaRequired => "MEDIA_REQUIRED",
        }
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => {
                write!(f, "invalid status transition {} -> {}", from, to)
            }
            Self::BlockedStatusRequested => {
                write!(f, "the blocked status cannot be requested")
            }
            Self::ListingBlocked => write!(f, "listing is blocked"),
            Self::MediaRequired => write!(f, "at least one media asset is required to publish"),
        }
    }
}

impl std::error::Error for StatusError {}

/// Checks whether a user-requested transition is allowed. Same-state
/// requests are no-ops and always pass (except for blocked listings).
pub fn check_transition(current: ListingStatus, requested: ListingStatus) -> Result<(), StatusError> {
    if requested == ListingStatus::Blocked {
        return Err(StatusError::BlockedStatusRequested);
    }
    if current == ListingStatus::Blocked {
        return Err(StatusError::ListingBlocked);
    }
    if current == requested {
        return Ok(());
    }
    match (current, requested) {
        (ListingStatus::Draft, ListingStatus::Active | ListingStatus::Archived)
        | (ListingStatus::Active, ListingStatus::Archived)
        | (ListingStatus::Archived, ListingStatus::Active) => Ok(()),
        (from, to) => Err(StatusError::InvalidTransition { from, to }),
    }
}

/// Media-existence probe owned by the media subsystem. The count is
/// advisory-fresh at call time; implementations must not cache it.
pub trait MediaInventory {
    fn media_count(&self, listing_id: &str) -> VitrineResult<u64>;
}

/// Verifies the media precondition for a transition into `Active`.
pub fn ensure_media(media: &dyn MediaInventory, listing_id: &str) -> VitrineResult<()> {
    let count = media.media_count(listing_id)?;
    if count == 0 {
        return Err(StatusError::MediaRequired.into());
    }
    Ok(())
}
