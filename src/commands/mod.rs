//! # 命令模块
//!
//! 事件循环调用的命令函数，每个子模块对应一个功能域：
//! - `posts` - 派发文章列表、详情和评论请求
//! - `settings` - 配置文件加载和命令行覆盖

pub mod posts;
pub mod settings;
