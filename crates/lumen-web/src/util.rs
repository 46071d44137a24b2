//! Console bindings, logger and seeding

use lumen_backdrop::BackdropConfig;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Console.log binding for WASM
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

/// Forwards `log` records to the browser console
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{} {}", record.level(), record.args());
        match record.level() {
            log::Level::Error => console_error(&line),
            log::Level::Warn => console_warn(&line),
            _ => log(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger. Later calls keep the first logger.
pub fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

/// Parse the host's configuration, falling back to defaults
pub fn parse_config(json: Option<&str>) -> BackdropConfig {
    let Some(json) = json.map(str::trim).filter(|json| !json.is_empty()) else {
        return BackdropConfig::default();
    };
    match serde_json::from_str::<BackdropConfig>(json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[backdrop] ignoring malformed config ({}), using defaults", e);
            BackdropConfig::default()
        }
    }
}

/// Seed from the browser's crypto source, or the clock if that is unavailable
pub fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(e) => {
            log::warn!("[backdrop] crypto seed unavailable ({}), seeding from clock", e);
            js_sys::Date::now().to_bits()
        }
    }
}

/// Render an error for the JS caller
pub fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}
