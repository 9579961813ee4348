use protocol::{Direction, MotorCommand};
use visiond::{app, AppState};

async fn spawn() -> (String, AppState) {
    // the shutdown future is main's job; tests only read the flag
    let (state, _quit) = AppState::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

#[tokio::test]
async fn command_endpoint_follows_the_angle() {
    let (base, state) = spawn().await;
    let client = reqwest::Client::new();

    // no target yet
    let cmd: MotorCommand = client
        .post(format!("{base}/get_motor_commands"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!cmd.motor_on);
    assert_eq!(cmd.direction, Direction::None);

    state.angle.publish(Some(10.0));
    let cmd: MotorCommand = client
        .post(format!("{base}/get_motor_commands"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cmd.motor_on);
    assert_eq!(cmd.direction, Direction::Cw);

    state.angle.publish(Some(-10.0));
    let cmd: MotorCommand = client
        .post(format!("{base}/get_motor_commands"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cmd.direction, Direction::Ccw);
}

#[tokio::test]
async fn config_endpoint_toggles_the_motor_flag() {
    let (base, state) = spawn().await;
    state.angle.publish(Some(30.0));
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/set_config"))
        .form(&[("motor_enabled", "false")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let cmd: MotorCommand = client
        .post(format!("{base}/get_motor_commands"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!cmd.motor_on);
    assert_eq!(cmd.direction, Direction::None);
}

#[tokio::test]
async fn config_endpoint_updates_tracker_settings() {
    let (base, state) = spawn().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/set_config"))
        .form(&[("flip", "false"), ("max_distance", "55.5")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    let settings = *state.settings.lock().unwrap();
    assert!(!settings.flip_camera);
    assert_eq!(settings.max_distance, 55.5);

    // junk distance is ignored, setting unchanged
    let resp = client
        .post(format!("{base}/set_config"))
        .form(&[("max_distance", "near")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert_eq!(state.settings.lock().unwrap().max_distance, 55.5);
}

#[tokio::test]
async fn quit_flag_turns_into_a_shutdown_command() {
    let (base, state) = spawn().await;
    state.angle.publish(Some(30.0));
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/set_config"))
        .form(&[("quit", "true")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // the next poll cycle sees quit=true regardless of the angle
    let cmd: MotorCommand = client
        .post(format!("{base}/get_motor_commands"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cmd.quit);
    assert!(!cmd.motor_on);
    assert_eq!(cmd.direction, Direction::None);
}
