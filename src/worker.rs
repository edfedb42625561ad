//! Offloaded occupancy tracking and placement search.
//!
//! The worker owns a private [`OccupancyState`] on its own thread and is
//! driven over a request/response channel pair, one round trip per word.
//! Ordering is strict by construction: the caller blocks on every response
//! before sending the next request, because placement `i + 1` depends on
//! the state mutated by placement `i`. There is no pipelining and no
//! mid-run cancellation; a run is all-or-nothing.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::warn;

use crate::layout::{BoundingRect, CloudError, GlyphMask, OccupancyState, find_position};

enum Request {
    AddMask {
        mask: GlyphMask,
        left: i32,
        top: i32,
    },
    FindPosition {
        mask: GlyphMask,
        container_width: f32,
        container_height: f32,
    },
    BoundingRect,
}

enum Response {
    Added,
    Position(Option<(i32, i32)>),
    Bounds(Option<BoundingRect>),
}

/// Host-side handle to one worker. Each run spawns a fresh worker, which
/// makes the "reset before reuse" rule structural: the state dies with the
/// thread when the handle is dropped.
pub struct ComputeHost {
    requests: Option<Sender<Request>>,
    responses: Receiver<Response>,
    handle: Option<JoinHandle<()>>,
}

impl ComputeHost {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (response_tx, response_rx) = mpsc::channel::<Response>();
        let handle = thread::spawn(move || serve(request_rx, response_tx));
        Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        }
    }

    fn exchange(&self, request: Request) -> Result<Response, CloudError> {
        let sender = self.requests.as_ref().ok_or(CloudError::WorkerClosed)?;
        sender.send(request).map_err(|_| CloudError::WorkerClosed)?;
        self.responses.recv().map_err(|_| CloudError::WorkerClosed)
    }

    pub fn add_mask(&self, mask: GlyphMask, left: i32, top: i32) -> Result<(), CloudError> {
        match self.exchange(Request::AddMask { mask, left, top })? {
            Response::Added => Ok(()),
            _ => Err(CloudError::WorkerClosed),
        }
    }

    pub fn find_position(
        &self,
        mask: GlyphMask,
        container_width: f32,
        container_height: f32,
    ) -> Result<Option<(i32, i32)>, CloudError> {
        match self.exchange(Request::FindPosition {
            mask,
            container_width,
            container_height,
        })? {
            Response::Position(position) => Ok(position),
            _ => Err(CloudError::WorkerClosed),
        }
    }

    pub fn bounding_rect(&self) -> Result<Option<BoundingRect>, CloudError> {
        match self.exchange(Request::BoundingRect)? {
            Response::Bounds(bounds) => Ok(bounds),
            _ => Err(CloudError::WorkerClosed),
        }
    }
}

impl Drop for ComputeHost {
    fn drop(&mut self) {
        // Closing the request channel ends the serve loop.
        self.requests.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("layout worker panicked during shutdown");
        }
    }
}

fn serve(requests: Receiver<Request>, responses: Sender<Response>) {
    let mut state = OccupancyState::new();
    while let Ok(request) = requests.recv() {
        let response = match request {
            Request::AddMask { mask, left, top } => {
                state.add_mask(&mask, left, top);
                Response::Added
            }
            Request::FindPosition {
                mask,
                container_width,
                container_height,
            } => Response::Position(find_position(
                &state,
                &mask,
                container_width,
                container_height,
            )),
            Request::BoundingRect => Response::Bounds(state.bounding_rect()),
        };
        if responses.send(response).is_err() {
            break;
        }
    }
}
