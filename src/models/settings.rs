//! # 应用配置数据模型
//!
//! 定义了应用配置（AppConfig），存储在 `~/.mo/PostListViewer/config.json`，
//! 也可以通过 `--config` 指定其他路径。所有字段均有默认值，
//! 配置文件中缺失的字段使用默认值补齐。

use serde::{Deserialize, Serialize};

/// 默认 API 根地址
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// 应用配置数据结构
///
/// 端点路径相对于 `api_base_url`，其中 `{id}` 会被替换为文章 ID。
///
/// 配置文件示例：
/// ```json
/// {
///   "apiBaseUrl": "https://jsonplaceholder.typicode.com",
///   "postsPath": "posts",
///   "postDetailPath": "posts/{id}",
///   "commentsPath": "posts/{id}/comments",
///   "requestTimeoutSecs": 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// API 根地址
    pub api_base_url: String,

    /// 文章列表路径：`GET <postsUrl>` → Post 数组
    pub posts_path: String,

    /// 文章详情路径模板：`GET <postDetailUrl>(id)` → 单个 Post
    pub post_detail_path: String,

    /// 评论集合路径模板：`GET <commentsUrl>(id)` → 评论数组
    pub comments_path: String,

    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,

    /// 请求的 User-Agent
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            posts_path: "posts".to_string(),
            post_detail_path: "posts/{id}".to_string(),
            comments_path: "posts/{id}/comments".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: format!("post-list-viewer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
