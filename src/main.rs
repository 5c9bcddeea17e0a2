#![allow(clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]

use duck_nav::nav_control::{
    AnimationScheduler, DriverInput, Frame, FrameDriver, NavConfig, RouteBook,
};
use duck_nav::{fatal, info, log, warn};
use std::env;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

const DEFAULT_CITY: &str = "new-york";
const CITY_VAR: &str = "DUCK_CITY";
const ROUTES_PATH_VAR: &str = "DUCK_ROUTES_PATH";

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let cfg = NavConfig::from_env();
    let routes = match env::var(ROUTES_PATH_VAR) {
        Ok(path) => RouteBook::from_json_file(&path)
            .unwrap_or_else(|e| fatal!("Could not load routes from {path}: {e}")),
        Err(_) => RouteBook::builtin(),
    };
    let city = env::var(CITY_VAR).unwrap_or_else(|_| DEFAULT_CITY.to_string());

    let mut scheduler =
        AnimationScheduler::new(cfg).unwrap_or_else(|e| fatal!("Invalid navigation config: {e}"));
    match routes.route(&city) {
        Ok(route) => scheduler.select_route(route.clone()),
        Err(e) => fatal!("{e}. Known cities: {}", routes.cities().collect::<Vec<_>>().join(", ")),
    }

    let (driver, input_tx, frame_rx) = FrameDriver::new(scheduler, routes);
    let c_tok = driver.cancel_token();
    let driver_handle = tokio::spawn(driver.run());

    info!("Keys: w/a/s/d move, q/e turn camera, arrows turn duck, space jumps, enter starts the journey.");
    info!("Commands: 'city <name>', 'cancel', 'quit'.");
    read_stdin(input_tx, c_tok.clone()).await;
    wait_until_idle(frame_rx, c_tok.clone()).await;
    c_tok.cancel();

    match driver_handle.await {
        Ok(scheduler) => info!("Duck rests at {}.", scheduler.pose()),
        Err(e) => warn!("Frame driver ended abnormally: {e}"),
    }
}

/// Forwards stdin lines to the frame driver until EOF or `quit`.
async fn read_stdin(input_tx: mpsc::Sender<DriverInput>, c_tok: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            () = c_tok.cancelled() => return,
            line = lines.next_line() => line,
        };
        let Ok(Some(line)) = line else {
            log!("Input closed.");
            return;
        };
        let input = match line.trim() {
            "quit" | "exit" => {
                c_tok.cancel();
                return;
            }
            "cancel" => DriverInput::CancelJourney,
            "" | "space" => DriverInput::Key("Space".to_string()),
            cmd if cmd.starts_with("city ") => {
                DriverInput::SelectCity(cmd.trim_start_matches("city ").trim().to_string())
            }
            key => DriverInput::Key(key.to_string()),
        };
        if input_tx.send(input).await.is_err() {
            return;
        }
    }
}

/// Lets a running journey or hop finish after input has closed.
async fn wait_until_idle(mut frame_rx: watch::Receiver<Frame>, c_tok: CancellationToken) {
    let is_idle = |frame: &Frame| !frame.traversal.is_active() && !frame.pose.is_jumping();
    tokio::select! {
        () = c_tok.cancelled() => (),
        res = frame_rx.wait_for(is_idle) => {
            if res.is_err() {
                warn!("Frame driver stopped publishing frames.");
            }
        }
    }
}
