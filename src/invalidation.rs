//! Cross-view invalidation signals.
//!
//! When one view creates, updates or deletes a record, every other view
//! listing the same resource is out of date. The [`InvalidationBus`] carries
//! that fact between views without the list-state controller knowing about
//! it: a view subscribes, and when its resource shows up it simply asks its
//! controller for a refresh.
//!
//! Event names follow the `"<resource>:<change>"` convention, for example
//! `"user:created"` or `"admin:deleted"`.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_paged_list::invalidation::{ChangeKind, Invalidation, InvalidationBus};
//!
//! let bus = InvalidationBus::new(16);
//! let mut users = bus.subscribe("user");
//!
//! bus.publish(Invalidation::new("user", ChangeKind::Created));
//! assert!(users.take_pending());
//! assert!(!users.take_pending());
//! ```

use std::fmt;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A record was added.
    Created,
    /// A record was modified.
    Updated,
    /// A record was removed.
    Deleted,
}

impl ChangeKind {
    fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        }
    }
}

/// A "records of `resource` changed" signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Invalidation {
    /// Resource name, e.g. `"user"`.
    pub resource: String,
    /// Kind of change.
    pub kind: ChangeKind,
}

impl Invalidation {
    /// Creates a signal for `resource`.
    pub fn new(resource: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            resource: resource.into(),
            kind,
        }
    }

    /// Parses an event name such as `"user:updated"`.
    ///
    /// Returns `None` for names without a known change suffix.
    ///
    /// ```rust
    /// use bubbletea_paged_list::invalidation::{ChangeKind, Invalidation};
    ///
    /// let event = Invalidation::parse("admin:deleted").unwrap();
    /// assert_eq!(event.resource, "admin");
    /// assert_eq!(event.kind, ChangeKind::Deleted);
    /// assert!(Invalidation::parse("admin:renamed").is_none());
    /// ```
    pub fn parse(event: &str) -> Option<Self> {
        let (resource, change) = event.split_once(':')?;
        if resource.is_empty() {
            return None;
        }
        let kind = match change {
            "created" => ChangeKind::Created,
            "updated" => ChangeKind::Updated,
            "deleted" => ChangeKind::Deleted,
            _ => return None,
        };
        Some(Self::new(resource, kind))
    }
}

impl fmt::Display for Invalidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.kind.as_str())
    }
}

/// Broadcast channel for [`Invalidation`] signals.
///
/// Cloning the bus yields another handle to the same channel.
#[derive(Debug, Clone)]
pub struct InvalidationBus {
    sender: broadcast::Sender<Invalidation>,
}

impl InvalidationBus {
    /// Creates a bus that buffers up to `capacity` undelivered signals per
    /// subscriber. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a signal and returns the number of subscribers reached.
    ///
    /// Publishing with no subscribers is not an error.
    pub fn publish(&self, invalidation: Invalidation) -> usize {
        tracing::debug!(event = %invalidation, "publishing invalidation");
        self.sender.send(invalidation).unwrap_or(0)
    }

    /// Subscribes to signals about `resource`.
    pub fn subscribe(&self, resource: impl Into<String>) -> InvalidationSubscription {
        InvalidationSubscription {
            resource: resource.into(),
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// A subscription filtered to one resource.
#[derive(Debug)]
pub struct InvalidationSubscription {
    resource: String,
    receiver: broadcast::Receiver<Invalidation>,
}

impl InvalidationSubscription {
    /// Resource this subscription listens for.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Drains buffered signals without waiting.
    ///
    /// Returns true if at least one of them concerned this resource. A lagged
    /// receiver has dropped signals it cannot inspect, so lag also counts as
    /// an invalidation.
    pub fn take_pending(&mut self) -> bool {
        let mut invalidated = false;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => invalidated |= event.resource == self.resource,
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(resource = %self.resource, skipped, "invalidation receiver lagged");
                    invalidated = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        invalidated
    }

    /// Waits for the next signal about this resource.
    ///
    /// Returns `None` once every bus handle has been dropped.
    pub async fn next(&mut self) -> Option<Invalidation> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.resource == self.resource => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    return Some(Invalidation::new(self.resource.clone(), ChangeKind::Updated));
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        let event = Invalidation::parse("user:created").unwrap();
        assert_eq!(event, Invalidation::new("user", ChangeKind::Created));
        assert_eq!(event.to_string(), "user:created");
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        assert!(Invalidation::parse("user").is_none());
        assert!(Invalidation::parse(":created").is_none());
        assert!(Invalidation::parse("user:archived").is_none());
    }

    #[test]
    fn test_subscription_filters_by_resource() {
        let bus = InvalidationBus::new(8);
        let mut users = bus.subscribe("user");
        let mut admins = bus.subscribe("admin");

        assert_eq!(bus.publish(Invalidation::new("admin", ChangeKind::Updated)), 2);

        assert!(!users.take_pending());
        assert!(admins.take_pending());
        assert!(!admins.take_pending());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = InvalidationBus::default();
        assert_eq!(bus.publish(Invalidation::new("user", ChangeKind::Deleted)), 0);
    }

    #[test]
    fn test_lag_counts_as_invalidation() {
        let bus = InvalidationBus::new(1);
        let mut users = bus.subscribe("user");
        bus.publish(Invalidation::new("admin", ChangeKind::Created));
        bus.publish(Invalidation::new("admin", ChangeKind::Created));
        assert!(users.take_pending());
    }

    #[tokio::test]
    async fn test_next_waits_for_matching_resource() {
        let bus = InvalidationBus::new(8);
        let mut users = bus.subscribe("user");
        bus.publish(Invalidation::new("post", ChangeKind::Created));
        bus.publish(Invalidation::new("user", ChangeKind::Deleted));

        let event = users.next().await.unwrap();
        assert_eq!(event.kind, ChangeKind::Deleted);
    }

    #[tokio::test]
    async fn test_next_ends_when_bus_dropped() {
        let bus = InvalidationBus::new(8);
        let mut users = bus.subscribe("user");
        drop(bus);
        assert!(users.next().await.is_none());
    }
}
