use crate::autofit::{FitOutcome, fit_text};
use crate::countdown::{countdown, countdown_text, title_text};
use crate::errors::AppError;
use crate::models::{CountdownResponse, EventData, EventUpdate, FitRequest};
use crate::quote::QuotePanel;
use crate::state::AppState;
use crate::storage::{persist_data, save_event};
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::State,
    response::{
        Html, Redirect,
        sse::{Event, KeepAlive, Sse},
    },
};
use chrono::{DateTime, Utc};
use futures_util::stream::{self, Stream};
use std::convert::Infallible;
use tracing::{error, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let event = state.current_event();
    let snapshot = snapshot(&event, state.clock.now());
    Html(render_index(&snapshot))
}

pub async fn get_event(State(state): State<AppState>) -> Json<EventData> {
    Json(state.current_event())
}

pub async fn update_event(
    State(state): State<AppState>,
    Json(payload): Json<EventUpdate>,
) -> Json<EventData> {
    Json(apply_update(&state, payload).await)
}

pub async fn update_event_form(
    State(state): State<AppState>,
    Form(payload): Form<EventUpdate>,
) -> Redirect {
    apply_update(&state, payload).await;
    Redirect::to("/")
}

pub async fn get_countdown(State(state): State<AppState>) -> Json<CountdownResponse> {
    let event = state.current_event();
    Json(snapshot(&event, state.clock.now()))
}

/// Pushes a fresh countdown on every tick and every event edit until the
/// clock stops.
pub async fn countdown_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receivers = (
        state.clock.subscribe(),
        state.event.subscribe(),
        state.clock.watch_running(),
    );

    let updates = stream::unfold(
        (receivers, true),
        |((mut now, mut event, mut running), first)| async move {
            if !first {
                tokio::select! {
                    changed = now.changed() => changed.ok()?,
                    changed = event.changed() => changed.ok()?,
                    changed = running.changed() => changed.ok()?,
                }
            }
            if !*running.borrow_and_update() {
                return None;
            }

            let at = *now.borrow_and_update();
            let current = event.borrow_and_update().clone();
            let payload = snapshot(&current, at);
            let message = match Event::default().event("countdown").json_data(&payload) {
                Ok(message) => message,
                Err(err) => {
                    error!("failed to encode countdown: {err}");
                    return None;
                }
            };
            Some((Ok::<_, Infallible>(message), ((now, event, running), false)))
        },
    );

    Sse::new(updates).keep_alive(KeepAlive::default())
}

/// A dropped connection drops this future, so an abandoned page never sees
/// the response.
pub async fn get_quote(State(state): State<AppState>) -> Json<QuotePanel> {
    Json(state.quotes.panel().await)
}

pub async fn fit(Json(payload): Json<FitRequest>) -> Result<Json<FitOutcome>, AppError> {
    if !payload.client_width.is_finite() {
        return Err(AppError::bad_request("client_width must be a finite number"));
    }

    Ok(Json(fit_text(
        &payload.text,
        payload.client_width,
        payload.padding_left,
        payload.padding_right,
    )))
}

async fn apply_update(state: &AppState, update: EventUpdate) -> EventData {
    let mut data = state.data.lock().await;
    let updated = update.apply(&state.current_event());
    save_event(&mut data, &updated);

    if let Err(err) = persist_data(&state.data_path, &data).await {
        error!("failed to persist event: {err}");
    }

    // publish before unlocking so the next update merges over this one
    state.event.send_replace(updated.clone());
    drop(data);

    info!(name = %updated.name, date = %updated.date, "event updated");
    updated
}

fn snapshot(event: &EventData, now: DateTime<Utc>) -> CountdownResponse {
    let countdown = countdown(&event.date, now);
    CountdownResponse {
        name: event.name.clone(),
        date: event.date.clone(),
        title: title_text(&event.name),
        countdown,
        text: countdown_text(countdown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::quote::QuoteClient;
    use crate::storage::{load_data, load_event};
    use std::sync::Arc;

    fn temp_state(label: &str) -> AppState {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("countdown_widget_{label}_{}_{nanos}.json", std::process::id()));
        AppState::new(
            path,
            Default::default(),
            Arc::new(Clock::new()),
            QuoteClient::default(),
        )
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_edits_keep_memory_and_storage_in_step() {
        let state = temp_state("concurrent");

        for round in 0..50 {
            let mut tasks = Vec::new();
            for i in 0..8 {
                let state = state.clone();
                let update = if i % 2 == 0 {
                    EventUpdate {
                        name: Some(format!("name-{round}-{i}")),
                        date: None,
                    }
                } else {
                    EventUpdate {
                        name: None,
                        date: Some(format!("2030-01-{:02}", i + 1)),
                    }
                };
                tasks.push(tokio::spawn(async move { apply_update(&state, update).await }));
            }
            for task in tasks {
                task.await.unwrap();
            }

            let published = state.current_event();
            let stored = load_event(&*state.data.lock().await);
            assert_eq!(published, stored, "round {round}");
            assert!(published.name.starts_with(&format!("name-{round}-")), "round {round}");
            assert!(published.date.starts_with("2030-01-"), "round {round}");
        }

        let on_disk = load_event(&load_data(&state.data_path).await);
        assert_eq!(on_disk, state.current_event());
        let _ = std::fs::remove_file(&state.data_path);
    }
}
