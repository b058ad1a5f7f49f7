//! Dodge Paddle entry point
//!
//! Handles platform-specific initialization and hands off to the host.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    dodge_paddle::platform::web::run().inspect_err(|e| {
        log::error!("Startup failed: {:?}", e);
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dodge_paddle::Settings;
    use dodge_paddle::platform::headless;

    env_logger::init();
    log::info!("Dodge Paddle (native) starting...");
    log::info!("Native mode runs a headless autopilot game, use `trunk serve` to play");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    match headless::run(Settings::default(), 800, 500, seed, 70 * 60) {
        Ok(report) => println!(
            "Survived {} ticks, dodged {} obstacle(s){}",
            report.ticks,
            report.score,
            if report.ended { "" } else { " and still going" }
        ),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
