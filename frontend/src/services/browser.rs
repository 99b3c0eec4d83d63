use interview_scheduler_domain::{BoardResult, OffsetSource, TimezoneOffset};
use js_sys::Date;

/// Current offset of the browser's timezone. Read from a fresh `Date` on
/// every call so a DST change is picked up on the next fetch.
pub fn browser_offset() -> BoardResult<TimezoneOffset> {
    let raw = Date::new_0().get_timezone_offset();
    TimezoneOffset::from_browser_offset(raw as i32)
}

/// Offset source handed to the board controller
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserOffset;

impl OffsetSource for BrowserOffset {
    fn current_offset(&self) -> BoardResult<TimezoneOffset> {
        browser_offset()
    }
}

/// Leaves the page
pub fn redirect(url: &str) {
    log::info!("🔀 BROWSER: Redirecting to {}", url);
    if let Err(e) = gloo::utils::window().location().set_href(url) {
        log::error!("🔀 BROWSER: Redirect to {} failed: {:?}", url, e);
    }
}

/// Blocking message box
pub fn alert(message: &str) {
    gloo::dialogs::alert(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_browser_offset_matches_date() {
        let offset = browser_offset().unwrap();
        let raw = Date::new_0().get_timezone_offset() as i32;
        assert_eq!(offset.minutes(), -raw);
        assert!(offset.minutes().abs() <= 720);
    }

    #[wasm_bindgen_test]
    fn test_offset_source() {
        assert_eq!(BrowserOffset.current_offset(), browser_offset());
    }
}
