// crates/tailorfind-core/src/source/fixed.rs
use crate::error::{Result, SourceError};
use crate::model::{LocationSnapshot, ProviderRecord};
use crate::traits::{LocationProvider, Permission, RecordProvider};
use async_trait::async_trait;
use std::time::Duration;

/// In-memory record provider. An optional delay makes the loading state
/// observable.
#[derive(Debug, Clone)]
pub struct StaticRecordProvider {
    outcome: std::result::Result<Vec<ProviderRecord>, String>,
    delay: Duration,
}

impl StaticRecordProvider {
    pub fn new(records: Vec<ProviderRecord>) -> Self {
        Self {
            outcome: Ok(records),
            delay: Duration::ZERO,
        }
    }

    /// A provider whose fetch always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl RecordProvider for StaticRecordProvider {
    async fn fetch_all(&self) -> Result<Vec<ProviderRecord>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone().map_err(SourceError::RecordFetch)
    }
}

/// Location provider with a scripted answer: a fix, a denial, or a failed
/// fix after a granted permission.
#[derive(Debug, Clone)]
pub struct StaticLocationProvider {
    permission: Permission,
    fix: std::result::Result<LocationSnapshot, String>,
    delay: Duration,
}

impl StaticLocationProvider {
    pub fn granted(snapshot: LocationSnapshot) -> Self {
        Self {
            permission: Permission::Granted,
            fix: Ok(snapshot),
            delay: Duration::ZERO,
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            fix: Err("permission denied".to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            permission: Permission::Granted,
            fix: Err(reason.into()),
            delay: Duration::ZERO,
        }
    }

    /// Delay applied to the position fix (not to the permission prompt).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn request_permission(&self) -> Permission {
        self.permission
    }

    async fn current_fix(&self) -> Result<LocationSnapshot> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.fix.clone().map_err(SourceError::LocationFixFailed)
    }
}
