use super::*;

use std::time::Duration;

use tokio::time::timeout;
use tokio_stream::StreamExt;

#[tokio::test]
async fn holds_directives_until_a_subscriber_attaches() {
    let bus = DirectiveBus::new();
    bus.emit(UiDirective::NavigateBack).await;
    bus.emit(UiDirective::NavigateBack).await;

    let mut directives = bus.subscribe().expect("first subscriber");
    assert_eq!(directives.next().await, Some(UiDirective::NavigateBack));
    assert_eq!(directives.next().await, Some(UiDirective::NavigateBack));
}

#[tokio::test]
async fn delivers_each_directive_at_most_once() {
    let bus = DirectiveBus::new();
    bus.emit(UiDirective::NavigateBack).await;

    let mut directives = bus.subscribe().expect("subscriber");
    assert_eq!(directives.next().await, Some(UiDirective::NavigateBack));
    assert!(
        timeout(Duration::from_millis(50), directives.next())
            .await
            .is_err(),
        "nothing should be replayed"
    );
}

#[tokio::test]
async fn consumer_side_is_unicast() {
    let bus = DirectiveBus::new();
    assert!(bus.subscribe().is_some());
    assert!(bus.subscribe().is_none());
}

#[tokio::test]
async fn emit_after_subscriber_is_dropped_does_not_block() {
    let bus = DirectiveBus::new();
    drop(bus.subscribe().expect("subscriber"));
    bus.emit(UiDirective::NavigateBack).await;
}
