//! # 配置加载命令
//!
//! 提供启动阶段的配置读取：
//! - `load_config` - 读取 JSON 配置文件，文件缺失时使用默认配置
//! - `apply_overrides` - 命令行参数覆盖配置文件中的值

use std::path::Path;

use crate::error::ConfigError;
use crate::models::settings::AppConfig;
use crate::utils::path;

/// 读取应用配置
///
/// - 显式指定了路径：文件必须存在且可解析
/// - 未指定路径：读取 `~/.mo/PostListViewer/config.json`，文件不存在时返回默认配置
///
/// # 错误
/// 文件存在但无法读取、JSON 解析失败，或显式路径不存在时返回错误
pub async fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config_path = match explicit_path {
        Some(p) => p.to_path_buf(),
        None => {
            let default_path = path::get_default_config_path()?;
            // 默认配置文件不存在时使用内置默认值
            if !default_path.exists() {
                log::debug!("未找到配置文件 {}，使用默认配置", default_path.display());
                return Ok(AppConfig::default());
            }
            default_path
        }
    };

    let display_path = config_path.to_string_lossy().to_string();

    let content = tokio::fs::read_to_string(&config_path)
        .await
        .map_err(|source| ConfigError::Read {
            path: display_path.clone(),
            source,
        })?;

    let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: display_path.clone(),
        source,
    })?;

    log::info!("已加载配置文件: {}", display_path);
    Ok(config)
}

/// 用命令行参数覆盖配置
pub fn apply_overrides(mut config: AppConfig, base_url: Option<String>) -> AppConfig {
    if let Some(url) = base_url {
        config.api_base_url = url;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "post-list-viewer-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_explicit_config() {
        let path = temp_file(
            "explicit.json",
            r#"{"apiBaseUrl": "http://127.0.0.1:9", "requestTimeoutSecs": 3}"#,
        );
        let config = load_config(Some(&path)).await.unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.posts_path, "posts");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_missing_explicit_config_is_error() {
        let path = std::env::temp_dir().join("post-list-viewer-does-not-exist.json");
        assert!(matches!(
            load_config(Some(&path)).await,
            Err(ConfigError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_config_is_parse_error() {
        let path = temp_file("malformed.json", "{ not json");
        assert!(matches!(
            load_config(Some(&path)).await,
            Err(ConfigError::Parse { .. })
        ));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_base_url_override() {
        let config = apply_overrides(AppConfig::default(), Some("http://localhost:8080".into()));
        assert_eq!(config.api_base_url, "http://localhost:8080");
        let config = apply_overrides(AppConfig::default(), None);
        assert_eq!(config, AppConfig::default());
    }
}
