use chrono::Utc;
use common::position::{Fix, GeoPoint};
use module_core::{
    test_helper::{expect_no_event, wait_for_event},
    *,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
#[test_log::test]
pub async fn events_delivered() {
    let event_bus = EventBus::new();
    let mut receiver = event_bus.subscribe();
    let event = Event {
        kind: EventKind::QuitEvent,
    };
    event_bus.publish(&event);
    let received_event =
        tokio::time::timeout(std::time::Duration::from_millis(100), receiver.recv())
            .await
            .expect("Failed to receive event in required time")
            .unwrap();
    assert_eq!(received_event.event_type(), event.event_type());
}

#[tokio::test]
#[test_log::test]
pub async fn events_delivered_to_every_context() {
    let event_bus = EventBus::new();
    let publisher = event_bus.context();
    let mut first = event_bus.context();
    let mut second = event_bus.context();

    let fix = Arc::new(Fix::new(GeoPoint::new(80.2093, 13.0570), Utc::now()));
    let receivers = publisher
        .publish_event(EventKind::FixEvent(fix.clone()))
        .unwrap();
    // publisher, first and second are subscribed
    assert_eq!(receivers, 3);

    for ctx in [&mut first, &mut second] {
        let event = ctx.receiver.recv().await.unwrap();
        assert_eq!(event.kind, EventKind::FixEvent(fix.clone()));
    }
}

#[tokio::test]
#[test_log::test]
pub async fn test_wait_for_event_skips_other_events() {
    let event_bus = EventBus::new();
    let mut rx = event_bus.subscribe();
    event_bus.publish(&EventKind::StartRecordingEvent.into());
    event_bus.publish(&EventKind::PathUpdatedEvent(Arc::new(vec![GeoPoint::new(1.0, 2.0)])).into());

    let event = wait_for_event(
        &mut rx,
        Duration::from_millis(100),
        EventKindType::PathUpdatedEvent,
    )
    .await;
    let path = payload_ref!(event.kind, EventKind::PathUpdatedEvent).unwrap();
    assert_eq!(**path, vec![GeoPoint::new(1.0, 2.0)]);
}

#[tokio::test]
#[test_log::test]
pub async fn test_expect_no_event_ignores_other_events() {
    let event_bus = EventBus::new();
    let mut rx = event_bus.subscribe();
    event_bus.publish(&EventKind::MapGestureEvent.into());
    expect_no_event(
        &mut rx,
        Duration::from_millis(20),
        EventKindType::CenterToggleEvent,
    )
    .await;
}

#[test]
pub fn payload_ref_returns_none_for_other_variant() {
    let kind = EventKind::RecordingFailedEvent(common::error::RecorderError::DegenerateRun);
    assert!(payload_ref!(kind, EventKind::RecordingFinishedEvent).is_none());
    assert_eq!(
        payload_ref!(kind, EventKind::RecordingFailedEvent),
        Some(&common::error::RecorderError::DegenerateRun)
    );
}
