//! # 业务逻辑服务模块
//!
//! 包含核心业务逻辑的实现，与事件循环和命令层解耦：
//! - `api` - REST API 客户端（文章列表、详情、评论）
//! - `filter` - 标题单词精确匹配过滤
//! - `list` - 文章列表控制器：过滤文本、显示列表、过期结果丢弃
//! - `detail` - 单篇文章的详情和评论到达状态
//! - `registry` - 按文章 ID 协调挂载/卸载条目
//! - `render` - 终端文本渲染

pub mod api;
pub mod detail;
pub mod filter;
pub mod list;
pub mod registry;
pub mod render;
