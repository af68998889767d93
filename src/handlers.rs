use crate::dates::{date_key, today};
use crate::errors::AppError;
use crate::heatmap::build_heatmap;
use crate::models::{Entry, Heatmap, SaveResponse, TodayResponse, WordRequest};
use crate::session;
use crate::state::AppState;
use crate::store::EntryStore;
use crate::ui::{render_index, IndexPage};
use crate::word::validate_word;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = today();
    let mut kv = state.kv.lock().await;
    let key = session::session_key(&mut *kv)?;
    let store = EntryStore::new(&mut *kv, key);

    let page = IndexPage {
        today,
        today_entry: store.get_today(),
        recent: store.recent(state.recent_limit),
        total: store.count(),
        heatmap: build_heatmap(&store.get_all()),
    };
    Ok(Html(render_index(&page)))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let mut kv = state.kv.lock().await;
    let key = session::session_key(&mut *kv)?;
    let entry = EntryStore::new(&mut *kv, key).get_today();

    Ok(Json(TodayResponse {
        date: date_key(today()),
        word: entry.map(|entry| entry.word),
    }))
}

pub async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, AppError> {
    let mut kv = state.kv.lock().await;
    let key = session::session_key(&mut *kv)?;
    Ok(Json(EntryStore::new(&mut *kv, key).get_all()))
}

pub async fn get_heatmap(State(state): State<AppState>) -> Result<Json<Heatmap>, AppError> {
    let mut kv = state.kv.lock().await;
    let key = session::session_key(&mut *kv)?;
    let entries = EntryStore::new(&mut *kv, key).get_all();
    Ok(Json(build_heatmap(&entries)))
}

pub async fn save_entry(
    State(state): State<AppState>,
    Json(payload): Json<WordRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let response = save_today(&state, &payload.word).await?;
    Ok(Json(response))
}

pub async fn save_entry_form(
    State(state): State<AppState>,
    Form(payload): Form<WordRequest>,
) -> Result<Redirect, AppError> {
    save_today(&state, &payload.word).await?;
    Ok(Redirect::to("/"))
}

pub async fn reset_session(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut kv = state.kv.lock().await;
    session::reset_session(&mut *kv)?;
    Ok(Redirect::to("/"))
}

async fn save_today(state: &AppState, raw_word: &str) -> Result<SaveResponse, AppError> {
    let word = validate_word(raw_word)?;
    let entry = Entry::new(date_key(today()), word);

    let mut kv = state.kv.lock().await;
    let key = session::session_key(&mut *kv)?;
    let mut store = EntryStore::new(&mut *kv, key);
    let updated = store.get_by_date(&entry.date).is_some();
    store.upsert(entry.clone())?;

    info!(date = %entry.date, updated, "entry saved");
    Ok(SaveResponse { entry, updated })
}
