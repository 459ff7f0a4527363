//! # 显示层数据模型
//!
//! 定义了终端渲染所需的独立数据结构，与 API 返回的 `Post` 完全解耦。
//!
//! ## 设计原则
//! - **稳定 key**：每个条目的 key 由文章自身 ID 派生（`post-{id}`），
//!   同一 ID 在多次重新过滤之间保持同一个 key，不会触发重复挂载和重复请求。
//! - **部分到达可渲染**：详情和评论两次请求独立完成，任何一方未到达时用占位符渲染。
//!
//! ## 数据流
//! ```text
//! GET posts → list::PostListController（过滤）→ Vec<Post>
//!          → registry::ItemRegistry::reconcile（按 ID 挂载/卸载）
//!          → 每个 ID 独立 GET 详情 + GET 评论 → detail::PostDetail
//!          → PostView → render::render_list
//! ```

use serde::Serialize;

/// 评论数量的显示状态
///
/// 评论数量只能来自该文章 ID 对应的评论请求结果，绝不从其他数据推导。
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "state", content = "count", rename_all = "camelCase")]
pub enum CommentCount {
    /// 评论请求尚未返回
    Pending,
    /// 评论请求成功，值为评论数组长度
    Loaded(usize),
    /// 评论请求失败（网络错误、非成功状态码或 JSON 解析失败）
    Unavailable,
}

/// 单条文章的显示数据
///
/// 由 `detail::PostDetail::view` 生成。`title` 和 `body` 在详情请求返回前为 `None`。
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    /// 渲染 key：由文章 ID 派生，跨重新过滤保持稳定
    pub key: String,
    /// 文章 ID（来自列表数据，挂载时即已知）
    pub id: u64,
    /// 标题（详情请求返回后填充）
    pub title: Option<String>,
    /// 正文（详情请求返回后填充）
    pub body: Option<String>,
    /// 评论数量
    pub comment_count: CommentCount,
    /// 详情请求是否失败
    pub detail_failed: bool,
}

/// 整个列表的显示数据
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    /// 当前过滤文本（空字符串表示不过滤）
    pub filter_text: String,
    /// 列表刷新请求是否仍在进行中
    pub loading: bool,
    /// 按列表顺序排列的条目
    pub items: Vec<PostView>,
}

/// 由文章 ID 派生渲染 key
pub fn render_key(id: u64) -> String {
    format!("post-{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_key_is_stable_per_id() {
        assert_eq!(render_key(42), render_key(42));
        assert_ne!(render_key(42), render_key(43));
        assert_eq!(render_key(1), "post-1");
    }

    #[test]
    fn test_comment_count_serializes_with_state_tag() {
        let json = serde_json::to_value(CommentCount::Loaded(5)).unwrap();
        assert_eq!(json, serde_json::json!({"state": "loaded", "count": 5}));
        let json = serde_json::to_value(CommentCount::Pending).unwrap();
        assert_eq!(json, serde_json::json!({"state": "pending"}));
    }
}
