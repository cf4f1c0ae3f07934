//! Routes `log` records from the core crate to the browser console, or to
//! stderr through `env_logger` when the bindings run natively.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
fn install() -> bool {
    console_log::init_with_level(log::Level::Trace).is_ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn install() -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .is_test(cfg!(test))
        .try_init()
        .is_ok()
}

/// Install the logger. Later calls only adjust the level.
pub(crate) fn init(level: LevelFilter) {
    if install() {
        log::debug!("logger installed");
    }
    log::set_max_level(level);
}
