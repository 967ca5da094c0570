//! Live session event stream.
//!
//! GET /api/v1/events - Server-sent events carrying the caller's
//! [`SessionEvent`]s. Each connected view holds one bus subscription;
//! closing the connection drops the receiver, which is the entire
//! cleanup story. Events belonging to other users are filtered out
//! server-side.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};

use crate::http::extractors::auth::Identity;
use crate::state::AppState;

/// GET /api/v1/events - Subscribe to the caller's session events.
pub async fn subscribe(
    State(state): State<AppState>,
    identity: Identity,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.events.subscribe();
    let user_id = identity.user_id;

    let stream = BroadcastStream::new(receiver).filter_map(move |event| {
        // Lagged receivers skip missed events and keep going; views
        // re-derive their state from each event they do see.
        let event = event.ok()?;
        if event.user_id() != user_id {
            return None;
        }
        Event::default().json_data(&event).ok().map(Ok)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
