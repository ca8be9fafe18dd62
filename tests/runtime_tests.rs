//! The tokio tick loop: commands between ticks, broadcasts, shutdown.

use animator::builder::{ControllerBuilder, TransitionBuilder};
use animator::core::{ParameterKind, ParameterValue};
use animator::runtime;
use animator::{Command, CommandOutcome, ControllerConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

fn fast_config() -> ControllerConfig {
    ControllerConfig {
        tick_interval_ms: 5,
        ..ControllerConfig::default()
    }
}

#[tokio::test]
async fn loop_fires_transitions_after_commands() {
    let controller = ControllerBuilder::new()
        .config(fast_config())
        .states(["Idle", "Jump"])
        .parameter("jump", ParameterValue::Trigger(false))
        .transition(TransitionBuilder::new().from_state("Idle").to("Jump").when_true("jump"))
        .build()
        .unwrap();
    let jump = controller.parameters().id_of("jump").unwrap();

    let handle = runtime::spawn(controller);
    let mut fired = handle.subscribe();

    let outcome = handle.send(Command::FireTrigger { id: jump }).await.unwrap();
    assert_eq!(outcome, CommandOutcome::Applied);

    let transition = timeout(Duration::from_secs(2), fired.recv())
        .await
        .expect("a transition within two seconds")
        .unwrap();
    assert_eq!(transition.to, "Jump");

    let active = handle
        .inspect(|c| c.active_state_name().map(str::to_string))
        .await
        .unwrap();
    assert_eq!(active.as_deref(), Some("Jump"));

    let controller = handle.shutdown().await.unwrap();
    assert_eq!(controller.history().len(), 1);
    assert_eq!(
        controller.parameters().get(jump).unwrap().value,
        ParameterValue::Trigger(false)
    );
}

#[tokio::test]
async fn edits_through_handle_are_applied() {
    let controller = ControllerBuilder::new()
        .config(fast_config())
        .build()
        .unwrap();
    let handle = runtime::spawn(controller);

    let CommandOutcome::StateAdded(idle) = handle
        .send(Command::AddState { name: "Idle".into() })
        .await
        .unwrap()
    else {
        panic!("expected a new state");
    };
    let outcome = handle
        .send(Command::AddParameter {
            kind: ParameterKind::Boolean,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, CommandOutcome::ParameterAdded(_)));

    let checkpoint = handle.checkpoint().await.unwrap();
    assert_eq!(checkpoint.active_state.as_deref(), Some("Idle"));
    assert!(checkpoint.graph.contains(idle));
    assert_eq!(checkpoint.parameters.len(), 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn parent_token_stops_the_loop() {
    let parent = CancellationToken::new();
    let controller = ControllerBuilder::new()
        .config(fast_config())
        .state("Idle")
        .build()
        .unwrap();
    let handle = runtime::spawn_with_token(controller, parent.child_token());
    assert!(handle.is_running());

    parent.cancel();
    let controller = handle.shutdown().await.unwrap();
    assert_eq!(controller.active_state_name(), Some("Idle"));
}

#[tokio::test]
async fn stopped_loop_reports_closed() {
    let token = CancellationToken::new();
    let controller = ControllerBuilder::new().config(fast_config()).build().unwrap();
    let handle = runtime::spawn_with_token(controller, token.clone());

    token.cancel();
    timeout(Duration::from_secs(2), async {
        while handle.is_running() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("loop stops after cancellation");

    let result = handle.send(Command::AddState { name: "Idle".into() }).await;
    assert!(matches!(result, Err(animator::RuntimeError::Closed)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn ticks_keep_running_under_a_command_flood() {
    let controller = ControllerBuilder::new()
        .config(fast_config())
        .states(["Idle", "Jump"])
        .parameter("jump", ParameterValue::Trigger(false))
        .parameter("noise", ParameterValue::float(0.0, 0.0, 10.0))
        .transition(TransitionBuilder::new().from_state("Idle").to("Jump").when_true("jump"))
        .build()
        .unwrap();
    let jump = controller.parameters().id_of("jump").unwrap();
    let noise = controller.parameters().id_of("noise").unwrap();

    let handle = Arc::new(runtime::spawn(controller));
    let mut fired = handle.subscribe();
    let stop = CancellationToken::new();

    let flooders: Vec<_> = (0..4)
        .map(|n| {
            let handle = Arc::clone(&handle);
            let stop = stop.clone();
            tokio::spawn(async move {
                let mut value = n as f64;
                while !stop.is_cancelled() {
                    value = (value + 1.0) % 10.0;
                    let _ = handle.send(Command::SetFloat { id: noise, value }).await;
                }
            })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.send(Command::FireTrigger { id: jump }).await.unwrap();

    let transition = timeout(Duration::from_secs(2), fired.recv())
        .await
        .expect("ticks are not starved by queued commands")
        .unwrap();
    assert_eq!(transition.to, "Jump");

    stop.cancel();
    for flooder in flooders {
        flooder.await.unwrap();
    }
    let handle = Arc::try_unwrap(handle).ok().expect("flooders released the handle");
    handle.shutdown().await.unwrap();
}
