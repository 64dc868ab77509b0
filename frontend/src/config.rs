//! 编译期配置
//!
//! 前端没有运行时配置文件，构建时可通过环境变量覆盖 API 地址：
//! `USERDESK_API_BASE=https://desk.example.com trunk build --release`

/// API 根地址，默认同源
pub const API_BASE_URL: &str = match option_env!("USERDESK_API_BASE") {
    Some(url) => url,
    None => "",
};

/// 浏览器控制台日志级别
pub const LOG_LEVEL: log::Level = if cfg!(debug_assertions) {
    log::Level::Debug
} else {
    log::Level::Info
};
