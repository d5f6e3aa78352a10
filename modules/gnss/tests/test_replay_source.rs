// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::{position::GeoPoint, test_helper::route::get_route};
use gnss::replay_source::ReplayGnssModule;
use module_core::{
    EventBus, EventKind, EventKindType, Module, ModuleCtx, payload_ref,
    test_helper::{stop_module, wait_for_event},
};
use std::time::Duration;

const TIMEOUT_MS: u64 = 100;

fn start_module(ctx: ModuleCtx, positions: Vec<GeoPoint>) -> tokio::task::JoinHandle<Result<(), ()>> {
    tokio::spawn(async move {
        let mut replay_source =
            ReplayGnssModule::new(ctx, &positions, Duration::from_millis(5)).unwrap();
        replay_source.run().await
    })
}

#[test]
fn report_creation_error_with_empty_positions() {
    let event_bus = EventBus::default();
    let replay_source =
        ReplayGnssModule::new(event_bus.context(), &[], Duration::from_millis(5));
    assert!(replay_source.is_err());
}

#[test]
fn report_creation_error_with_zero_interval() {
    let event_bus = EventBus::default();
    let replay_source = ReplayGnssModule::new(event_bus.context(), &get_route(), Duration::ZERO);
    assert!(replay_source.is_err());
}

#[tokio::test]
#[test_log::test]
async fn replay_positions_in_order_then_end_stream() {
    let event_bus = EventBus::default();
    let mut rx = event_bus.subscribe();
    let mut module_handle = start_module(event_bus.context(), get_route());

    for expected in get_route() {
        let fix_event = wait_for_event(
            &mut rx,
            Duration::from_millis(TIMEOUT_MS),
            EventKindType::FixEvent,
        )
        .await;
        let fix = payload_ref!(fix_event.kind, EventKind::FixEvent).unwrap();
        assert_eq!(fix.point, expected);
    }
    wait_for_event(
        &mut rx,
        Duration::from_millis(TIMEOUT_MS),
        EventKindType::FixStreamEndedEvent,
    )
    .await;

    stop_module(&event_bus, &mut module_handle).await;
}

#[tokio::test]
#[test_log::test]
async fn fixes_are_stamped_in_order() {
    let event_bus = EventBus::default();
    let mut rx = event_bus.subscribe();
    let mut module_handle = start_module(event_bus.context(), get_route());

    let mut timestamps = Vec::new();
    for _ in 0..get_route().len() {
        let fix_event = wait_for_event(
            &mut rx,
            Duration::from_millis(TIMEOUT_MS),
            EventKindType::FixEvent,
        )
        .await;
        timestamps.push(payload_ref!(fix_event.kind, EventKind::FixEvent).unwrap().timestamp);
    }
    assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));

    stop_module(&event_bus, &mut module_handle).await;
}
