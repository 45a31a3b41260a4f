use std::net::TcpListener;
use std::time::Duration;

use classroom_server::client::{
    spawn_poller, ClassroomClient, ClassroomSession, ClientError, MIN_POLL_INTERVAL,
};
use classroom_server::domain::Player;
use classroom_server::AppState;
use tokio::time::timeout;

use crate::support::server::base_url;
use crate::support::start_test_server;

const FAST: Duration = Duration::from_millis(50);

#[tokio::test]
async fn poller_publishes_roster_changes() -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::in_memory();
    let (server_handle, addr, _join) = start_test_server(state).await?;
    let client = ClassroomClient::new(base_url(addr))?;
    client.create(Some("654321"), &Player::new("p1", "Alice")).await?;

    let handle = spawn_poller(client.clone(), "654321".to_string(), FAST);
    let mut rx = handle.subscribe();
    timeout(Duration::from_secs(5), async {
        while rx.borrow_and_update().players.len() != 1 {
            if rx.changed().await.is_err() {
                break;
            }
        }
    })
    .await?;

    client.join("654321", &Player::new("p2", "Bob")).await?;
    timeout(Duration::from_secs(5), async {
        while rx.borrow_and_update().players.len() != 2 {
            if rx.changed().await.is_err() {
                break;
            }
        }
    })
    .await?;
    assert_eq!(handle.latest().players[1].player_name, "Bob");

    timeout(Duration::from_secs(5), handle.stop()).await?;
    server_handle.stop(true).await;
    Ok(())
}

#[tokio::test]
async fn cancelled_poller_stops() -> Result<(), Box<dyn std::error::Error>> {
    let addr = TcpListener::bind("127.0.0.1:0")?.local_addr()?;
    let client = ClassroomClient::new(base_url(addr))?;

    // Failing polls keep the task alive until cancelled.
    let handle = spawn_poller(client, "123456".to_string(), FAST);
    tokio::time::sleep(FAST * 3).await;
    assert!(!handle.is_finished());

    handle.cancel();
    timeout(Duration::from_secs(5), async {
        while !handle.is_finished() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await?;
    Ok(())
}

#[tokio::test]
async fn zero_interval_poller_keeps_running() -> Result<(), Box<dyn std::error::Error>> {
    let addr = TcpListener::bind("127.0.0.1:0")?.local_addr()?;
    let client = ClassroomClient::new(base_url(addr))?;

    let handle = spawn_poller(client, "123456".to_string(), Duration::ZERO);
    tokio::time::sleep(MIN_POLL_INTERVAL * 5).await;
    assert!(!handle.is_finished(), "poll task must not panic on a zero period");

    timeout(Duration::from_secs(5), handle.stop()).await?;
    Ok(())
}

#[tokio::test]
async fn dropping_the_handle_closes_the_channel() -> Result<(), Box<dyn std::error::Error>> {
    let addr = TcpListener::bind("127.0.0.1:0")?.local_addr()?;
    let client = ClassroomClient::new(base_url(addr))?;

    let handle = spawn_poller(client, "123456".to_string(), FAST);
    let mut rx = handle.subscribe();
    drop(handle);

    // The sender lives in the task, so the channel closes once it exits.
    let closed = timeout(Duration::from_secs(5), async {
        while rx.changed().await.is_ok() {}
    })
    .await;
    assert!(closed.is_ok());
    Ok(())
}

#[tokio::test]
async fn session_leave_stops_polling_and_leaves() -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::in_memory();
    let store = state.store.clone();
    let (server_handle, addr, _join) = start_test_server(state).await?;
    let client = ClassroomClient::new(base_url(addr))?;

    let (host, classroom) =
        ClassroomSession::create(client.clone(), None, Player::new("p1", "Alice"), FAST).await?;
    assert_eq!(classroom.code.len(), 6);

    let (guest, _) =
        ClassroomSession::join(client.clone(), classroom.code.as_str(), Player::new("p2", "Bob"), FAST)
            .await?;
    guest.submit_score(75, 7).await?;
    assert_eq!(host.leaderboard().await?[0].player_name, "Bob");

    guest.leave().await?;
    let players = store
        .classroom(&classroom.code)
        .map(|c| c.players)
        .unwrap_or_default();
    assert_eq!(players, vec![Player::new("p1", "Alice")]);

    host.leave().await?;
    server_handle.stop(true).await;
    Ok(())
}

#[tokio::test]
async fn joining_offline_server_is_unreachable() -> Result<(), Box<dyn std::error::Error>> {
    let addr = TcpListener::bind("127.0.0.1:0")?.local_addr()?;
    let client = ClassroomClient::new(base_url(addr))?;

    let result = ClassroomSession::join(client, "123456", Player::new("p1", "Alice"), FAST).await;
    assert!(matches!(result, Err(ClientError::Unreachable(_))));
    Ok(())
}
