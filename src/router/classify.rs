//! Event classification for the notification router
//!
//! This module maps raw feed records onto the fixed set of route events:
//! - Remote messages: classified by delivery context (foreground/background/quit)
//! - Local interactions: classified by interaction type and action id
//! - Permission records: only the revoked case produces an event
//!
//! Classification is a pure function. Records that match no row of the
//! table return `None` and are dropped by the caller.

use crate::feed::FeedRecord;
use crate::interaction::{InteractionType, LocalInteraction};
use crate::message::{RemoteContext, RemoteMessage};
use crate::router::event::{EventKind, RouteEvent};

/// Recognized action ids for `action_press` interactions.
///
/// Any other id falls through to `None` and the record is dropped.
pub const ACTION_REPLY: &str = "reply";
pub const ACTION_MARK_READ: &str = "mark-as-read";
pub const ACTION_DEFAULT: &str = "default";

/// Classify a feed record into a route event
///
/// Returns `None` for records the router does not recognize:
/// unknown sources, unknown contexts, unknown interaction types,
/// unknown action ids, and `granted: true` permission records.
pub fn classify(record: &FeedRecord) -> Option<RouteEvent> {
    match record {
        FeedRecord::Remote { context, message } => classify_remote(*context, message),
        FeedRecord::Local { interaction } => classify_interaction(interaction),
        FeedRecord::Permission { granted } => classify_permission(*granted),
        FeedRecord::Unknown => None,
    }
}

/// Classify a remote message by its delivery context
pub fn classify_remote(context: RemoteContext, message: &RemoteMessage) -> Option<RouteEvent> {
    let kind = match context {
        // Message arrived while the app was in the foreground
        RemoteContext::Foreground => EventKind::ForegroundRemote,
        // User tapped the notification while the app was backgrounded
        RemoteContext::BackgroundTap => EventKind::OpenedFromBackground,
        // App was cold-started from the notification
        RemoteContext::Initial => EventKind::OpenedFromQuit,
        // Unrecognized context - drop
        RemoteContext::Unknown => return None,
    };
    Some(RouteEvent::new(kind, message.title(), message.body()))
}

/// Classify a local notification interaction
///
/// For `action_press` the action id selects the event; ids outside the
/// recognized set drop the record. `delivered` is kept as an event so the
/// router can log it, but it produces no status projection downstream.
pub fn classify_interaction(interaction: &LocalInteraction) -> Option<RouteEvent> {
    let title = interaction.title();
    let body = interaction.body();

    let event = match interaction.event_type {
        InteractionType::Press => RouteEvent::new(EventKind::LocalPressed, title, body),
        InteractionType::Dismissed => RouteEvent::new(EventKind::LocalDismissed, title, body),
        InteractionType::Delivered => RouteEvent::new(EventKind::LocalDelivered, title, body),
        InteractionType::ActionPress => {
            let kind = match interaction.action_id() {
                ACTION_REPLY => EventKind::LocalActionReply,
                ACTION_MARK_READ => EventKind::LocalActionMarkRead,
                ACTION_DEFAULT => EventKind::LocalActionDefault,
                // Unrecognized action id - drop
                _ => return None,
            };
            let mut event = RouteEvent::new(kind, title, body)
                .with_action_id(interaction.action_id());
            // Reply carries the typed text; empty string means the user
            // pressed send without typing
            if kind == EventKind::LocalActionReply {
                event = event.with_input_text(interaction.detail.input.clone().unwrap_or_default());
            }
            event
        }
        // Unrecognized interaction type - drop
        InteractionType::Unknown => return None,
    };
    Some(event)
}

/// Classify a permission change
///
/// Only revocation is an event. A grant restores normal operation and
/// the next real notification will overwrite the status anyway.
pub fn classify_permission(granted: bool) -> Option<RouteEvent> {
    if granted {
        None
    } else {
        Some(RouteEvent::permission_blocked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::RemoteNotification;

    fn remote(title: &str, body: &str) -> RemoteMessage {
        RemoteMessage::with_notification(title, body)
    }

    #[test]
    fn test_classify_remote_foreground() {
        let event = classify_remote(RemoteContext::Foreground, &remote("Hi", "there")).unwrap();
        assert_eq!(event.kind, EventKind::ForegroundRemote);
        assert_eq!(event.title, "Hi");
        assert_eq!(event.body, "there");
    }

    #[test]
    fn test_classify_remote_background_tap() {
        let event =
            classify_remote(RemoteContext::BackgroundTap, &remote("Digest", "3 items")).unwrap();
        assert_eq!(event.kind, EventKind::OpenedFromBackground);
    }

    #[test]
    fn test_classify_remote_initial() {
        let event = classify_remote(RemoteContext::Initial, &remote("Welcome", "back")).unwrap();
        assert_eq!(event.kind, EventKind::OpenedFromQuit);
    }

    #[test]
    fn test_classify_remote_unknown_context_dropped() {
        assert!(classify_remote(RemoteContext::Unknown, &remote("x", "y")).is_none());
    }

    #[test]
    fn test_classify_remote_missing_notification_payload() {
        // Data-only message: title/body fall back to empty strings
        let message = RemoteMessage {
            notification: None,
            data: Default::default(),
        };
        let event = classify_remote(RemoteContext::Foreground, &message).unwrap();
        assert_eq!(event.title, "");
        assert_eq!(event.body, "");
    }

    #[test]
    fn test_classify_remote_partial_notification() {
        let message = RemoteMessage {
            notification: Some(RemoteNotification {
                title: Some("Only title".to_string()),
                body: None,
            }),
            data: Default::default(),
        };
        let event = classify_remote(RemoteContext::Foreground, &message).unwrap();
        assert_eq!(event.title, "Only title");
        assert_eq!(event.body, "");
    }

    #[test]
    fn test_classify_interaction_press() {
        let interaction = LocalInteraction::new(InteractionType::Press).with_title("Build done");
        let event = classify_interaction(&interaction).unwrap();
        assert_eq!(event.kind, EventKind::LocalPressed);
        assert_eq!(event.title, "Build done");
    }

    #[test]
    fn test_classify_interaction_dismissed() {
        let interaction = LocalInteraction::new(InteractionType::Dismissed).with_title("Build done");
        let event = classify_interaction(&interaction).unwrap();
        assert_eq!(event.kind, EventKind::LocalDismissed);
    }

    #[test]
    fn test_classify_interaction_delivered() {
        let interaction = LocalInteraction::new(InteractionType::Delivered).with_title("Build done");
        let event = classify_interaction(&interaction).unwrap();
        assert_eq!(event.kind, EventKind::LocalDelivered);
    }

    #[test]
    fn test_classify_action_reply_with_input() {
        let interaction = LocalInteraction::new(InteractionType::ActionPress)
            .with_title("New message")
            .with_action(ACTION_REPLY)
            .with_input("on my way");
        let event = classify_interaction(&interaction).unwrap();
        assert_eq!(event.kind, EventKind::LocalActionReply);
        assert_eq!(event.action_id.as_deref(), Some("reply"));
        assert_eq!(event.input_text.as_deref(), Some("on my way"));
    }

    #[test]
    fn test_classify_action_reply_without_input() {
        // Reply pressed but no text typed: input is the empty string, not None
        let interaction = LocalInteraction::new(InteractionType::ActionPress)
            .with_title("New message")
            .with_action(ACTION_REPLY);
        let event = classify_interaction(&interaction).unwrap();
        assert_eq!(event.kind, EventKind::LocalActionReply);
        assert_eq!(event.input_text.as_deref(), Some(""));
    }

    #[test]
    fn test_classify_action_mark_read() {
        let interaction = LocalInteraction::new(InteractionType::ActionPress)
            .with_title("Unread thread")
            .with_action(ACTION_MARK_READ);
        let event = classify_interaction(&interaction).unwrap();
        assert_eq!(event.kind, EventKind::LocalActionMarkRead);
        assert!(event.input_text.is_none());
    }

    #[test]
    fn test_classify_action_default() {
        let interaction = LocalInteraction::new(InteractionType::ActionPress)
            .with_title("New comment")
            .with_action(ACTION_DEFAULT);
        let event = classify_interaction(&interaction).unwrap();
        assert_eq!(event.kind, EventKind::LocalActionDefault);
    }

    #[test]
    fn test_classify_unknown_action_id_dropped() {
        let interaction = LocalInteraction::new(InteractionType::ActionPress)
            .with_title("x")
            .with_action("snooze");
        assert!(classify_interaction(&interaction).is_none());
    }

    #[test]
    fn test_classify_action_press_without_action_id_dropped() {
        // action_press with no pressAction at all: empty id matches nothing
        let interaction = LocalInteraction::new(InteractionType::ActionPress).with_title("x");
        assert!(classify_interaction(&interaction).is_none());
    }

    #[test]
    fn test_classify_unknown_interaction_type_dropped() {
        let interaction = LocalInteraction::new(InteractionType::Unknown).with_title("x");
        assert!(classify_interaction(&interaction).is_none());
    }

    #[test]
    fn test_classify_permission() {
        let event = classify_permission(false).unwrap();
        assert_eq!(event.kind, EventKind::PermissionBlocked);
        // Grants produce no event
        assert!(classify_permission(true).is_none());
    }

    #[test]
    fn test_classify_feed_record_dispatch() {
        let record = FeedRecord::Remote {
            context: RemoteContext::Foreground,
            message: remote("Hi", "there"),
        };
        assert_eq!(classify(&record).unwrap().kind, EventKind::ForegroundRemote);

        assert!(classify(&FeedRecord::Unknown).is_none());
    }
}
