//! # 数据模型模块
//!
//! 定义了与 REST API 数据和终端渲染对应的 Rust 数据结构：
//! - `post` - 文章和评论记录（API 返回的原始数据）
//! - `display` - 渲染层数据结构（PostView / ListView）
//! - `settings` - 应用配置（API 端点、超时）

pub mod display;
pub mod post;
pub mod settings;
