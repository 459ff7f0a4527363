//! # 文章数据模型
//!
//! 定义了文章（Post）和评论记录（CommentRecord），对应 REST API 返回的 JSON 结构。
//!
//! 文章以外部 API 为唯一数据源，客户端视角下不可变。
//! 评论记录仅用于计数，因此保留为 `serde_json::Value`，
//! 避免评论结构变化时导致整个评论集合反序列化失败。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 文章数据结构
///
/// 对应 `GET <postsUrl>` 数组中的元素，以及 `GET <postDetailUrl>(id)` 的返回值。
/// API 返回的其他字段（如 `userId`）在反序列化时被忽略。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// 文章 ID：同时用于派生渲染 key 和详情/评论请求路径
    pub id: u64,

    /// 文章标题：过滤谓词按空白拆分后逐词精确匹配
    pub title: String,

    /// 文章正文
    pub body: String,
}

/// 评论记录
///
/// 只展示评论集合的长度，单条评论的字段从不读取。
pub type CommentRecord = Value;
