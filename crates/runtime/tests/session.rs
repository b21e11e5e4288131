//! End-to-end runtime tests on paused tokio time.

use std::time::Duration;

use game_content::ContentBundle;
use game_core::{GameConfig, GameEvent, ItemKind, Key};
use runtime::{Event, Runtime, RuntimeConfig, RuntimeError, Topic};
use tokio::sync::broadcast;

async fn start() -> Runtime {
    let config = RuntimeConfig::default();
    Runtime::builder()
        .content(ContentBundle::standard(&config.game_config))
        .config(config)
        .build()
        .await
        .expect("runtime builds")
}

async fn next_game_event(rx: &mut broadcast::Receiver<Event>) -> GameEvent {
    loop {
        match rx.recv().await.expect("bus open") {
            Event::Game(event) => return event,
            Event::Frame(_) => continue,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn build_requires_content() {
    let error = Runtime::builder().build().await.err().unwrap();
    assert!(matches!(error, RuntimeError::MissingContent));
}

#[tokio::test(start_paused = true)]
async fn frames_are_published_every_interval() {
    let runtime = start().await;
    let mut frames = runtime.handle().subscribe(Topic::Frame);

    for _ in 0..3 {
        let event = frames.recv().await.unwrap();
        let Event::Frame(view) = event else {
            panic!("frame topic carried {event:?}");
        };
        assert_eq!(view.coins, 0);
        assert_eq!(view.coin_rects.len(), 5);
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn held_key_moves_the_player() {
    let runtime = start().await;
    let handle = runtime.handle();
    let start = GameConfig::default().player.start;

    handle.key_down(Key::Right).await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    handle.key_up(Key::Right).await.unwrap();

    let view = handle.query_view().await.unwrap();
    assert!(view.player.x > start.x, "player stayed at {}", view.player.x);
    assert_eq!(view.player.y, start.y);

    let settled = handle.query_view().await.unwrap().player;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(handle.query_view().await.unwrap().player, settled);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn restart_key_publishes_restarted() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut game = handle.subscribe(Topic::Game);

    handle.key_down(Key::Restart).await.unwrap();
    assert_eq!(next_game_event(&mut game).await, GameEvent::Restarted);

    // Holding the key does not restart again.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(game.try_recv().is_err());

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn using_an_item_not_held_is_rejected() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut game = handle.subscribe(Topic::Game);

    handle.use_item(ItemKind::Lantern).await.unwrap();
    let event = next_game_event(&mut game).await;
    assert!(matches!(
        event,
        GameEvent::CommandRejected { .. }
    ));

    let state = handle.query_state().await.unwrap();
    assert!(state.inventory.is_empty());

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn handles_fail_after_shutdown() {
    let runtime = start().await;
    let handle = runtime.handle();
    runtime.shutdown().await.unwrap();

    let error = handle.key_down(Key::Up).await.unwrap_err();
    assert!(matches!(error, RuntimeError::CommandChannelClosed));
}
