use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use manasooth_bedrock::client::ModelClient;
use manasooth_bedrock::consultation::DECLINE_RATE;
use manasooth_instruments::conversation::ConversationSession;
use manasooth_storage::Store;

/// Conversations untouched for this long are dropped when a new one starts.
pub const SESSION_IDLE_LIMIT: Duration = Duration::from_secs(60 * 60);

/// A conversation plus when it last saw a message.
pub struct TrackedSession {
    pub session: ConversationSession,
    pub last_active: jiff::Timestamp,
}

pub type Sessions = Arc<Mutex<HashMap<Uuid, TrackedSession>>>;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub model: Arc<dyn ModelClient>,
    pub sessions: Sessions,
    /// Chance, 0.0 to 1.0, that a consultation booking is turned away.
    pub decline_rate: f64,
}

impl AppState {
    pub fn new(store: Store, model: Arc<dyn ModelClient>) -> Self {
        Self {
            store,
            model,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            decline_rate: DECLINE_RATE,
        }
    }
}

/// Drop sessions idle since before `now - SESSION_IDLE_LIMIT`. Returns how
/// many were removed.
pub fn prune_idle(sessions: &mut HashMap<Uuid, TrackedSession>, now: jiff::Timestamp) -> usize {
    let before = sessions.len();
    sessions.retain(|_, tracked| {
        now.duration_since(tracked.last_active).unsigned_abs() < SESSION_IDLE_LIMIT
    });
    before - sessions.len()
}
