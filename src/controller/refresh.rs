//! Dispatching requests, timer ticks and applying replies to the store
//!
//! Nothing here waits for the device. Each operation pushes its requests
//! onto the loop's in-flight set and returns; every reply is applied on its
//! own when the caller hands it to [`SyncLoop::apply_reply`].

use std::future::Future;
use std::rc::Rc;

use futures::{FutureExt, StreamExt};

use crate::error::{GatewayError, Reply};
use crate::gateway::{Command, CommandGateway, Transport};
use crate::model::{LibraryNode, PositionInfo, TrackInfo, TransportInfo, Volume};

use super::{SyncLoop, SyncPhase};

/// Which requests one refresh issues
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct RefreshPlan {
    pub state: bool,
    pub queue: bool,
    pub library: bool,
}

impl RefreshPlan {
    fn full() -> Self {
        Self {
            state: true,
            queue: true,
            library: true,
        }
    }

    fn tick(queue_due: bool) -> Self {
        Self {
            state: true,
            queue: queue_due,
            library: false,
        }
    }

    /// The tick refresh, plus the queue when the command changed it.
    pub fn after_command(queue_changed: bool) -> Self {
        Self::tick(queue_changed)
    }
}

/// What a finished request produced
enum Outcome {
    Volume(Reply<Volume>),
    Position(Reply<PositionInfo>),
    Transport(Reply<TransportInfo>),
    Queue(Reply<Vec<TrackInfo>>),
    Genres(Reply<Vec<LibraryNode>>),
    Children {
        parent_depth: usize,
        title: String,
        reply: Reply<Vec<LibraryNode>>,
    },
    Command {
        method: &'static str,
        result: Result<(), GatewayError>,
        /// Refresh to dispatch once the device accepted the command
        then: RefreshPlan,
    },
}

/// A reply that arrived and is waiting to be applied
pub struct Completion {
    batch: u64,
    outcome: Outcome,
}

impl<T: Transport + 'static> SyncLoop<T> {
    /// Fetch everything once, then accept ticks.
    pub fn initialize(&mut self) {
        if self.phase == SyncPhase::Polling {
            tracing::debug!("Sync loop already initialized");
            return;
        }

        tracing::info!("Initial refresh of device state");
        self.refresh(RefreshPlan::full());
        self.phase = SyncPhase::Polling;
    }

    /// One timer tick: volume, position and transport every time, the queue
    /// every `queue_refresh_every` ticks. Earlier replies may still be in
    /// flight; they are applied whenever they land.
    pub fn tick(&mut self) {
        if self.phase != SyncPhase::Polling {
            tracing::warn!("Tick before initialize, ignoring");
            return;
        }

        let queue_due = self.sync.advance(self.settings.queue_refresh_every);
        tracing::trace!(
            poll_count = self.sync.poll_count,
            queue_due,
            in_flight = self.pending.len(),
            "Tick"
        );
        self.refresh(RefreshPlan::tick(queue_due));
    }

    /// Wait for the next reply of any in-flight request.
    ///
    /// Returns `None` right away when nothing is in flight.
    pub async fn next_reply(&mut self) -> Option<Completion> {
        self.pending.next().await
    }

    /// Apply one reply to the store and re-derive whatever it affects.
    pub fn apply_reply(&mut self, done: Completion) {
        self.store.enter_batch(done.batch);

        match done.outcome {
            Outcome::Volume(reply) => self.store.apply_volume(reply),
            Outcome::Position(reply) => {
                self.store.apply_position_info(reply, &mut self.sync);
                self.rerender_queue();
            }
            Outcome::Transport(reply) => self.store.apply_transport_info(reply),
            Outcome::Queue(reply) => {
                self.store.apply_queue(reply, &mut self.sync);
                self.rerender_queue();
            }
            Outcome::Genres(reply) => {
                if let Some(genres) = self.store.settle("get-all-genres", reply) {
                    self.library.set_genres(genres);
                }
            }
            Outcome::Children {
                parent_depth,
                title,
                reply,
            } => {
                if let Some(children) = self.store.settle("get-direct-children", reply) {
                    tracing::debug!(parent_depth, count = children.len(), "Library level opened");
                    self.library.set_children(parent_depth, title, children);
                }
            }
            Outcome::Command {
                method,
                result,
                then,
            } => {
                if self.store.settle_command(method, &result) {
                    tracing::info!(method, "Command accepted by device");
                    self.refresh(then);
                }
            }
        }
    }

    /// Dispatch the planned requests as one batch.
    pub(super) fn refresh(&mut self, plan: RefreshPlan) {
        let batch = self.store.begin_batch();

        if plan.state {
            self.dispatch(batch, |g| async move { Outcome::Volume(g.get_volume().await) });
            self.dispatch(batch, |g| async move {
                Outcome::Position(g.get_position_info().await)
            });
            self.dispatch(batch, |g| async move {
                Outcome::Transport(g.get_transport_info().await)
            });
        }
        if plan.queue {
            self.dispatch(batch, |g| async move {
                Outcome::Queue(g.get_queue_contents().await)
            });
        }
        if plan.library {
            self.dispatch(batch, |g| async move { Outcome::Genres(g.get_all_genres().await) });
        }
    }

    /// Dispatch a user command as its own batch; `then` runs once the device
    /// accepts it.
    pub(super) fn send_command(&mut self, command: Command, then: RefreshPlan) {
        let batch = self.store.begin_batch();
        self.dispatch(batch, move |g| async move {
            let method = command.method;
            let result = g.execute(command).await;
            Outcome::Command {
                method,
                result,
                then,
            }
        });
    }

    /// Fetch the children of a library node, to be shown below `parent_depth`.
    pub(super) fn fetch_children(&mut self, parent_depth: usize, node: LibraryNode) {
        let batch = self.store.begin_batch();
        self.dispatch(batch, move |g| async move {
            let reply = g.get_direct_children(&node.id).await;
            Outcome::Children {
                parent_depth,
                title: node.title,
                reply,
            }
        });
    }

    /// Fetch the genre list on its own.
    pub(super) fn fetch_genres(&mut self) {
        let batch = self.store.begin_batch();
        self.dispatch(batch, |g| async move { Outcome::Genres(g.get_all_genres().await) });
    }

    fn dispatch<F, Fut>(&mut self, batch: u64, request: F)
    where
        F: FnOnce(Rc<CommandGateway<T>>) -> Fut,
        Fut: Future<Output = Outcome> + 'static,
    {
        let request = request(Rc::clone(&self.gateway));
        self.pending
            .push(async move { Completion { batch, outcome: request.await } }.boxed_local());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::super::test_support::{settle, sync_loop};
    use super::*;

    const STATE_METHODS: [&str; 3] = ["get-volume", "get-position-info", "get-transport-info"];

    fn order(sync: &SyncLoop<crate::gateway::mocks::ScriptedTransport>) -> Vec<usize> {
        sync.window().rows().iter().map(|r| r.absolute_index).collect()
    }

    #[tokio::test]
    async fn initialize_fetches_everything_once() {
        let (mut sync, transport) = sync_loop();
        sync.initialize();
        assert_eq!(sync.phase(), SyncPhase::Polling);
        assert_eq!(sync.in_flight(), 5);
        settle(&mut sync).await;

        for method in STATE_METHODS {
            assert_eq!(transport.count(method), 1, "{}", method);
        }
        assert_eq!(transport.count("get-queue-contents"), 1);
        assert_eq!(transport.count("get-all-genres"), 1);
        assert_eq!(transport.all_sent().len(), 5);
    }

    #[tokio::test]
    async fn initialize_twice_does_not_refetch() {
        let (mut sync, transport) = sync_loop();
        sync.initialize();
        sync.initialize();
        settle(&mut sync).await;
        assert_eq!(transport.count("get-all-genres"), 1);
    }

    #[tokio::test]
    async fn tick_before_initialize_is_ignored() {
        let (mut sync, transport) = sync_loop();
        sync.tick();
        settle(&mut sync).await;
        assert!(transport.all_sent().is_empty());
        assert_eq!(sync.sync_state().poll_count, 0);
    }

    #[tokio::test]
    async fn queue_is_throttled_to_every_fifth_tick() {
        let (mut sync, transport) = sync_loop();
        sync.initialize();
        settle(&mut sync).await;
        transport.clear_log();

        let mut queue_ticks = Vec::new();
        for tick in 1..=10 {
            let before = transport.count("get-queue-contents");
            sync.tick();
            settle(&mut sync).await;
            if transport.count("get-queue-contents") > before {
                queue_ticks.push(tick);
            }
        }

        assert_eq!(queue_ticks, vec![5, 10]);
        for method in STATE_METHODS {
            assert_eq!(transport.count(method), 10, "{}", method);
        }
        assert_eq!(transport.count("get-all-genres"), 0);
    }

    #[tokio::test]
    async fn failed_sub_request_does_not_block_the_others() {
        let (mut sync, transport) = sync_loop();
        transport.fail_transport("get-volume", "connection refused");
        transport.playing_track(2);
        sync.initialize();
        settle(&mut sync).await;

        assert_eq!(sync.store().volume(), None);
        assert_eq!(sync.store().position().map(|p| p.track), Some(2));
        assert_eq!(sync.store().queue().len(), 3);
        assert_eq!(
            sync.store().last_error(),
            Some("Request failed: connection refused")
        );

        // The loop keeps polling.
        sync.tick();
        settle(&mut sync).await;
        assert_eq!(transport.count("get-volume"), 2);
    }

    #[tokio::test]
    async fn error_clears_on_a_later_successful_tick() {
        let (mut sync, transport) = sync_loop();
        transport.fail("get-transport-info", "UPnP Error 402");
        sync.initialize();
        settle(&mut sync).await;
        assert_eq!(sync.store().last_error(), Some("UPnP Error 402"));

        transport.respond(
            "get-transport-info",
            serde_json::json!({ "Value": { "CurrentTransportState": "STOPPED" } }),
        );
        sync.tick();
        settle(&mut sync).await;
        assert_eq!(sync.store().last_error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_order_completion_still_anchors_queue() {
        let (mut sync, transport) = sync_loop();
        transport.queue_of(4);
        transport.playing_track(3);
        // Position arrives last, after the queue.
        transport.delay("get-position-info", Duration::from_millis(300));
        transport.delay("get-volume", Duration::from_millis(100));
        sync.initialize();
        settle(&mut sync).await;

        assert_eq!(order(&sync), vec![2, 3, 0, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_reply_does_not_hold_back_keys_or_ticks() {
        let (mut sync, transport) = sync_loop();
        sync.initialize();
        settle(&mut sync).await;

        transport.delay("get-transport-info", Duration::from_secs(5));
        transport.playing_track(2);
        let started = tokio::time::Instant::now();
        sync.tick();

        // Volume and position land while transport info is outstanding.
        for _ in 0..2 {
            let done = sync.next_reply().await.unwrap();
            sync.apply_reply(done);
        }
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(sync.in_flight(), 1);
        assert_eq!(sync.sync_state().current_track_index, 1);
        assert_eq!(order(&sync), vec![1, 2, 0]);

        // Keys and the next tick are handled with that reply still pending.
        sync.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(sync.selected_display_position(), Some(2));
        sync.handle_key_event(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        sync.tick();
        assert_eq!(sync.sync_state().poll_count, 2);
        // Old transport info, the `next` command and three tick requests.
        assert_eq!(sync.in_flight(), 5);

        settle(&mut sync).await;
        assert_eq!(transport.count("next"), 1);
        assert_eq!(transport.count("get-transport-info"), 4);
        assert!(!sync.has_pending());
    }

    #[tokio::test]
    async fn window_renders_from_anchor_each_tick() {
        let (mut sync, transport) = sync_loop();
        transport.playing_track(1);
        sync.initialize();
        settle(&mut sync).await;
        assert_eq!(sync.window().row(1).map(|r| r.absolute_index), Some(0));

        // The anchor moves without a queue fetch on this tick.
        transport.playing_track(3);
        sync.tick();
        settle(&mut sync).await;
        assert_eq!(sync.window().row(1).map(|r| r.absolute_index), Some(2));
        assert_eq!(sync.sync_state().current_track_index, 2);
    }

    #[tokio::test]
    async fn stale_anchor_after_queue_shrinks_renders_from_start() {
        let (mut sync, transport) = sync_loop();
        transport.queue_of(5);
        transport.playing_track(5);
        sync.initialize();
        settle(&mut sync).await;
        assert_eq!(sync.window().row(1).map(|r| r.absolute_index), Some(4));

        // Queue shrank remotely; position still reports the old track.
        transport.queue_of(2);
        for _ in 0..5 {
            sync.tick();
            settle(&mut sync).await;
        }
        assert_eq!(order(&sync), vec![0, 1]);
        assert!(!sync.store().has_error());
    }

    #[tokio::test]
    async fn empty_queue_from_device_clears_window() {
        let (mut sync, transport) = sync_loop();
        sync.initialize();
        settle(&mut sync).await;
        assert_eq!(sync.window().len(), 3);

        transport.respond("get-queue-contents", serde_json::json!({ "Value": null }));
        for _ in 0..5 {
            sync.tick();
            settle(&mut sync).await;
        }
        assert!(sync.window().is_empty());
        assert_eq!(sync.sync_state().last_queue_size, 0);
    }

    #[tokio::test]
    async fn genres_populate_library_root() {
        let (mut sync, _) = sync_loop();
        sync.initialize();
        settle(&mut sync).await;
        let root = sync.library().current().unwrap();
        assert_eq!(root.title, "Genres");
        assert_eq!(root.nodes.len(), 2);
    }
}
