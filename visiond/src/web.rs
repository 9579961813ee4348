use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::policy;
use crate::source::{AngleSource, SharedAngle};
use protocol::MotorCommand;

/// Camera-side knobs the operator can adjust at runtime. Consumed by
/// the external capture pipeline; stored here because they arrive over
/// the configuration endpoint.
#[derive(Clone, Copy, Debug)]
pub struct TrackerSettings {
    pub flip_camera: bool,
    pub max_distance: f64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            flip_camera: true,
            max_distance: 100.0,
        }
    }
}

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub angle: SharedAngle,
    pub settings: Arc<Mutex<TrackerSettings>>,
    pub motor_enabled: Arc<AtomicBool>,
    pub quit: Arc<watch::Sender<bool>>,
}

impl AppState {
    /// Fresh state (motor enabled, no target, quit clear) plus the
    /// receiver half of the quit flag for graceful shutdown.
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (
            Self {
                angle: SharedAngle::new(),
                settings: Arc::new(Mutex::new(TrackerSettings::default())),
                motor_enabled: Arc::new(AtomicBool::new(true)),
                quit: Arc::new(tx),
            },
            rx,
        )
    }
}

pub async fn index() -> &'static str {
    "visiond is running. POST /get_motor_commands for the command stream.\n"
}

/// The motor host polls here; the policy is re-evaluated on every
/// request from the current angle and flags, never cached.
pub async fn get_motor_commands(State(state): State<AppState>) -> Json<MotorCommand> {
    let cmd = policy::decide(
        state.angle.latest(),
        state.motor_enabled.load(Ordering::SeqCst),
        *state.quit.borrow(),
    );
    Json(cmd)
}

/// Url-encoded form fields of the configuration endpoint; every field
/// is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigForm {
    pub flip: Option<String>,
    pub max_distance: Option<String>,
    pub motor_enabled: Option<String>,
    pub quit: Option<String>,
}

pub async fn set_config(
    State(state): State<AppState>,
    Form(form): Form<ConfigForm>,
) -> impl IntoResponse {
    if form.quit.as_deref() == Some("true") {
        info!("quit flag set, shutting down after a final command cycle");
        state.quit.send_replace(true);
        return (StatusCode::OK, "shutting down\n").into_response();
    }
    if let Some(flip) = &form.flip {
        let flip = flip == "true";
        state.settings.lock().unwrap().flip_camera = flip;
        info!(flip, "camera mirroring updated");
    }
    if let Some(raw) = &form.max_distance {
        match raw.parse::<f64>() {
            Ok(max_distance) => {
                state.settings.lock().unwrap().max_distance = max_distance;
                info!(max_distance, "tracking distance ceiling updated");
            }
            Err(_) => warn!(%raw, "ignoring non-numeric max_distance"),
        }
    }
    if let Some(enabled) = &form.motor_enabled {
        let motor_enabled = enabled == "true";
        state.motor_enabled.store(motor_enabled, Ordering::SeqCst);
        info!(motor_enabled, "motor enable flag updated");
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get_motor_commands", post(get_motor_commands))
        .route("/set_config", post(set_config))
        .with_state(state)
}
