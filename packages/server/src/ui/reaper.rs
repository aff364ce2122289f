//! Idle room reaper background task.
//!
//! Live room state is kept while a room has members. Once the last member
//! leaves, the room stays around for `idle_timeout` so that a quick rejoin
//! still sees the document and chat history; after that it is removed.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::usecase::SessionCoordinator;

/// Start the reaper. It runs until the returned handle is aborted.
pub fn spawn_room_reaper(
    session: Arc<SessionCoordinator>,
    reap_interval: Duration,
    idle_timeout: Duration,
) -> JoinHandle<()> {
    tracing::info!(
        "Starting room reaper (interval {:?}, idle timeout {:?})",
        reap_interval,
        idle_timeout
    );

    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + reap_interval, reap_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let reaped = session.reap_idle_rooms(idle_timeout).await;
            if !reaped.is_empty() {
                tracing::info!("Reaped {} idle room(s): {:?}", reaped.len(), reaped);
            }
        }
    })
}
