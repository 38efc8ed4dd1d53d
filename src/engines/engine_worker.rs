//! Background search worker.
//!
//! An `IterativeEngine` lives on its own named thread and is driven by
//! control messages over an `mpsc` channel. Each search request carries its
//! own reply channel, so callers can block on it, poll it, or drop it.
//! Dropping the receiver does not cancel the search; it still runs to its
//! time budget and the answer is discarded.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::engines::difficulty::DifficultyConfig;
use crate::engines::engine_iterative::IterativeEngine;
use crate::engines::engine_trait::ScoredMove;
use crate::errors::{CornersError, CornersResult};
use crate::game_state::corners_types::{CornerShape, Piece, Player};

pub type SearchResponse = CornersResult<Option<ScoredMove>>;

struct SearchRequest {
    pieces: Vec<Piece>,
    player: Player,
    shape: CornerShape,
    config: DifficultyConfig,
    reply: Sender<SearchResponse>,
}

enum WorkerControlMessage {
    Search(SearchRequest),
    ClearCache,
    Shutdown,
}

pub struct SearchWorker {
    commands: Sender<WorkerControlMessage>,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    pub fn spawn() -> CornersResult<Self> {
        Self::spawn_with(IterativeEngine::default())
    }

    pub fn spawn_with(engine: IterativeEngine) -> CornersResult<Self> {
        let (commands, inbox) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("corners-search".to_owned())
            .spawn(move || run_worker(engine, inbox))
            .map_err(|e| CornersError::WorkerSpawn(e.to_string()))?;

        debug!("search worker started");
        Ok(Self {
            commands,
            handle: Some(handle),
        })
    }

    /// Queue a search; the answer arrives on the returned receiver.
    pub fn request(
        &self,
        pieces: Vec<Piece>,
        player: Player,
        shape: CornerShape,
        config: DifficultyConfig,
    ) -> CornersResult<Receiver<SearchResponse>> {
        let (reply, answer) = mpsc::channel();
        self.send(WorkerControlMessage::Search(SearchRequest {
            pieces,
            player,
            shape,
            config,
            reply,
        }))?;
        Ok(answer)
    }

    /// Blocking convenience wrapper around `request`.
    pub fn find_best_move(
        &self,
        pieces: Vec<Piece>,
        player: Player,
        shape: CornerShape,
        config: DifficultyConfig,
    ) -> SearchResponse {
        self.request(pieces, player, shape, config)?
            .recv()
            .map_err(|_| CornersError::WorkerDisconnected)?
    }

    /// Applied after any searches already queued.
    pub fn clear_cache(&self) -> CornersResult<()> {
        self.send(WorkerControlMessage::ClearCache)
    }

    fn send(&self, message: WorkerControlMessage) -> CornersResult<()> {
        self.commands
            .send(message)
            .map_err(|_| CornersError::WorkerDisconnected)
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        let _ = self.commands.send(WorkerControlMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("search worker panicked");
            }
        }
    }
}

fn run_worker(mut engine: IterativeEngine, inbox: Receiver<WorkerControlMessage>) {
    // A closed channel means the owner is gone; treat it like Shutdown.
    while let Ok(message) = inbox.recv() {
        match message {
            WorkerControlMessage::Search(request) => {
                let response = engine.find_best_move(
                    &request.pieces,
                    request.player,
                    request.shape,
                    request.config,
                );
                if request.reply.send(response).is_err() {
                    debug!("search result dropped; requester went away");
                }
            }
            WorkerControlMessage::ClearCache => engine.clear_search_cache(),
            WorkerControlMessage::Shutdown => break,
        }
    }
    debug!("search worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::corners_types::Coord;
    use crate::game_state::initial_layout::{initial_pieces, initial_position};

    fn quick() -> DifficultyConfig {
        DifficultyConfig::new(2, 10_000)
    }

    #[test]
    fn worker_answers_like_a_direct_engine() {
        let shape = CornerShape::SMALL;
        let worker = SearchWorker::spawn().expect("spawn");
        let from_worker = worker
            .find_best_move(initial_pieces(shape), Player::A, shape, quick())
            .expect("valid request");

        let mut engine = IterativeEngine::default();
        let direct = engine
            .find_best_move(&initial_pieces(shape), Player::A, shape, quick())
            .expect("valid request");

        assert!(from_worker.is_some());
        assert_eq!(from_worker, direct);
    }

    #[test]
    fn queued_requests_are_answered_in_order() {
        let shape = CornerShape::SMALL;
        let worker = SearchWorker::spawn().expect("spawn");
        let first = worker
            .request(initial_pieces(shape), Player::A, shape, quick())
            .expect("queued");
        worker.clear_cache().expect("queued");
        let second = worker
            .request(initial_pieces(shape), Player::A, shape, quick())
            .expect("queued");

        let a = first.recv().expect("answered").expect("valid");
        let b = second.recv().expect("answered").expect("valid");
        assert_eq!(a, b);

        let mv = a.expect("opening move exists");
        assert!(initial_position(shape).apply_move(mv.from, mv.to).is_ok());
    }

    #[test]
    fn invalid_request_is_reported_not_fatal() {
        let worker = SearchWorker::spawn().expect("spawn");
        let bad = vec![Piece::new(0, Player::A, Coord::new(9, 0))];
        let err = worker
            .find_best_move(bad, Player::A, CornerShape::SMALL, quick())
            .expect_err("off-board piece");
        assert!(matches!(err, CornersError::OutOfBounds { .. }));

        // The worker survives and keeps serving.
        let shape = CornerShape::SMALL;
        assert!(worker
            .find_best_move(initial_pieces(shape), Player::B, shape, quick())
            .expect("valid")
            .is_some());
    }
}
