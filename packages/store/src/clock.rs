/// Current Unix time in milliseconds.
///
/// `std::time::SystemTime` panics on `wasm32-unknown-unknown`, so the browser
/// build asks `Date.now()` instead.
pub fn now_millis() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
