use leptos::prelude::*;
use userdesk_frontend::App;
use userdesk_frontend::config::LOG_LEVEL;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(LOG_LEVEL) {
        // 日志后端不可用，直接写到控制台，界面照常挂载
        web_sys::console::warn_1(&format!("console_log init failed: {}", e).into());
    }
    mount_to_body(App);
}
