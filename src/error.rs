//! # 错误类型
//!
//! - `FetchError`：单次 HTTP 请求失败。列表控制器和条目注册表吸收此错误，
//!   保留之前的显示状态，不向上传播。
//! - `ConfigError`：启动阶段的配置加载和 HTTP 客户端构建错误，属于致命错误。

use thiserror::Error;

/// 单次 API 请求的失败原因
#[derive(Debug, Error)]
pub enum FetchError {
    /// 连接失败、超时等传输层错误
    #[error("网络请求失败 ({url}): {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务端返回非 2xx 状态码
    #[error("服务端返回非成功状态码 ({url}): {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// 端点模板替换 ID 后无法拼接为合法 URL
    #[error("无法拼接请求 URL: {0}")]
    Url(#[source] url::ParseError),

    /// 响应体不是预期的 JSON 结构
    #[error("解析响应 JSON 失败 ({url}): {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 启动阶段的配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法获取用户主目录")]
    NoHomeDir,

    #[error("读取配置文件失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("解析配置文件失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("无效的 API 地址 {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("创建 HTTP 客户端失败: {0}")]
    Client(#[source] reqwest::Error),
}

/// 应用启动和运行阶段的致命错误
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("输出渲染失败: {0}")]
    Io(#[from] std::io::Error),
}
