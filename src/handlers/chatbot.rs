use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotStateResponse {
    open: bool,
    scroll_locked: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotUpdate {
    pub open: Option<bool>,
    pub viewport_width: Option<u32>,
}

fn snapshot(state: &AppState) -> ChatbotStateResponse {
    let chatbot = state.chatbot.state();
    ChatbotStateResponse {
        open: chatbot.open,
        scroll_locked: chatbot.scroll_locked,
    }
}

// GET /api/ui/chatbot
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<ChatbotStateResponse> {
    Json(snapshot(&state))
}

// POST /api/ui/chatbot
pub async fn update_state(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ChatbotUpdate>,
) -> Json<ChatbotStateResponse> {
    if let Some(width) = update.viewport_width {
        state.chatbot.set_viewport_width(width);
    }
    if let Some(open) = update.open {
        state.chatbot.set_open(open);
    }
    Json(snapshot(&state))
}
