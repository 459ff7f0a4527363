//! # 路径工具函数
//!
//! 提供配置文件位置相关的工具函数：
//! - 获取应用自身配置目录路径（`~/.mo/PostListViewer/`）
//! - 获取默认配置文件路径

use std::path::PathBuf;

use crate::error::ConfigError;

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

/// 获取应用配置目录的绝对路径
///
/// 使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 错误
/// 如果无法确定用户主目录（如无 HOME 环境变量），返回错误。
///
/// # 示例
/// - Windows: `C:\Users\username\.mo\PostListViewer`
/// - Linux/macOS: `/home/username/.mo/PostListViewer`
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(config_dir_under(home))
}

/// 获取默认配置文件路径
pub fn get_default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

fn config_dir_under(home: PathBuf) -> PathBuf {
    home.join(".mo").join("PostListViewer")
}
