use log::{Level, LevelFilter, Log, Metadata, Record};

/// `log` sink that writes to the browser console
struct ConsoleLog;

static CONSOLE_LOG: ConsoleLog = ConsoleLog;

impl Log for ConsoleLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    format!("[{}] {}: {}", level, target, message)
}

/// Routes the `log` macros of every crate to the console. Safe to call more
/// than once; later calls only adjust the level.
pub fn init(level: LevelFilter) {
    if log::set_logger(&CONSOLE_LOG).is_err() {
        log::debug!("Console logger already installed");
    }
    log::set_max_level(level);
}

/// Component-tagged logging for UI code
pub struct Logger;

impl Logger {
    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{}", message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        log::warn!(target: component, "{}", message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        log::error!(target: component, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_line() {
        assert_eq!(
            format_line(Level::Warn, "availability-grid", "flush failed"),
            "[WARN] availability-grid: flush failed"
        );
    }

    #[wasm_bindgen_test]
    fn test_init_twice() {
        init(LevelFilter::Info);
        init(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        Logger::info_with_component("logging-test", "console logger installed");
    }
}
