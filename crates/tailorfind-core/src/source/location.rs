// crates/tailorfind-core/src/source/location.rs
use crate::error::SourceError;
use crate::model::LocationSnapshot;
use crate::traits::{LocationProvider, Permission};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Lifecycle of the one-shot location acquisition.
///
/// `Idle → Requesting → {Granted, Denied}`, `Granted → Resolving → {Fixed, Failed}`.
/// There is no retry and no tracking: one fix per activation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LocationState {
    #[default]
    Idle,
    Requesting,
    /// Permission given; the fix request has not been issued yet.
    Granted,
    Denied,
    Resolving,
    Fixed(LocationSnapshot),
    Failed(String),
}

/// Why no location is available once acquisition has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LocationIssue {
    PermissionDenied,
    FixFailed(String),
}

impl LocationIssue {
    pub fn message(&self) -> String {
        match self {
            LocationIssue::PermissionDenied => {
                "Location access is turned off. Allow location access to filter tailors by distance."
                    .to_string()
            }
            LocationIssue::FixFailed(reason) => format!(
                "We couldn't determine your location ({reason}). Distance filters need a location fix."
            ),
        }
    }
}

impl LocationState {
    pub fn snapshot(&self) -> Option<LocationSnapshot> {
        match self {
            LocationState::Fixed(s) => Some(*s),
            _ => None,
        }
    }

    /// Still waiting on the prompt or the fix.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            LocationState::Idle
                | LocationState::Requesting
                | LocationState::Granted
                | LocationState::Resolving
        )
    }

    pub fn issue(&self) -> Option<LocationIssue> {
        match self {
            LocationState::Denied => Some(LocationIssue::PermissionDenied),
            LocationState::Failed(reason) => Some(LocationIssue::FixFailed(reason.clone())),
            _ => None,
        }
    }
}

/// Drive `provider` through the state machine, publishing every transition
/// into `sink`. Returns the terminal state.
///
/// Failures never escape: a denial ends in [`LocationState::Denied`], any fix
/// error or an out-of-range fix ends in [`LocationState::Failed`].
#[instrument(skip_all)]
pub async fn acquire_location(
    provider: &dyn LocationProvider,
    sink: &watch::Sender<LocationState>,
) -> LocationState {
    let publish = |state: LocationState| {
        debug!(?state, "Location state");
        sink.send_replace(state.clone());
        state
    };

    publish(LocationState::Requesting);
    if provider.request_permission().await == Permission::Denied {
        warn!("Location permission denied");
        return publish(LocationState::Denied);
    }
    publish(LocationState::Granted);

    publish(LocationState::Resolving);
    let state = match provider.current_fix().await {
        Ok(fix) if fix.coordinates().is_valid() => {
            info!(latitude = fix.latitude, longitude = fix.longitude, "Location fixed");
            LocationState::Fixed(fix)
        }
        Ok(fix) => {
            warn!(latitude = fix.latitude, longitude = fix.longitude, "Discarding invalid fix");
            LocationState::Failed("the reported position was invalid".to_string())
        }
        Err(SourceError::LocationPermissionDenied) => {
            warn!("Location permission revoked while resolving");
            LocationState::Denied
        }
        Err(SourceError::LocationFixFailed(reason)) => {
            warn!(%reason, "Location fix failed");
            LocationState::Failed(reason)
        }
        Err(e) => {
            warn!(error = %e, "Location fix failed");
            LocationState::Failed(e.to_string())
        }
    };
    publish(state)
}
