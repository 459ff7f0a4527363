//! # 文章详情状态
//!
//! 每个挂载的条目持有一个 `PostDetail`，分别记录详情请求和评论请求的到达状态。
//! 两个请求互相独立、完成顺序不定，任意一方先到都可以渲染（未到达的字段显示占位符）。

use crate::error::FetchError;
use crate::models::display::{render_key, CommentCount, PostView};
use crate::models::post::{CommentRecord, Post};

/// 单个请求结果的到达状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    Pending,
    Ready(T),
    Failed,
}

impl<T> Slot<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }
}

/// 单篇文章的详情状态
#[derive(Debug, Clone)]
pub struct PostDetail {
    id: u64,
    detail: Slot<Post>,
    comments: Slot<usize>,
}

impl PostDetail {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            detail: Slot::Pending,
            comments: Slot::Pending,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// 应用详情请求结果
    pub fn apply_detail(&mut self, result: Result<Post, FetchError>) {
        self.detail = match result {
            Ok(post) => {
                if post.id != self.id {
                    log::warn!("文章 {} 的详情返回了 ID {}", self.id, post.id);
                }
                Slot::Ready(post)
            }
            Err(e) => {
                log::warn!("获取文章 {} 详情失败: {}", self.id, e);
                Slot::Failed
            }
        };
    }

    /// 应用评论请求结果
    ///
    /// 只保留评论数组的长度，作为该文章显示的评论数量。
    pub fn apply_comments(&mut self, result: Result<Vec<CommentRecord>, FetchError>) {
        self.comments = match result {
            Ok(comments) => Slot::Ready(comments.len()),
            Err(e) => {
                log::warn!("获取文章 {} 评论失败: {}", self.id, e);
                Slot::Failed
            }
        };
    }

    /// 两个请求是否都已到达（成功或失败）
    pub fn is_settled(&self) -> bool {
        !self.detail.is_pending() && !self.comments.is_pending()
    }

    /// 生成显示数据
    pub fn view(&self) -> PostView {
        let (title, body) = match &self.detail {
            Slot::Ready(post) => (Some(post.title.clone()), Some(post.body.clone())),
            _ => (None, None),
        };

        let comment_count = match self.comments {
            Slot::Pending => CommentCount::Pending,
            Slot::Ready(n) => CommentCount::Loaded(n),
            Slot::Failed => CommentCount::Unavailable,
        };

        PostView {
            key: render_key(self.id),
            id: self.id,
            title,
            body,
            comment_count,
            detail_failed: matches!(self.detail, Slot::Failed),
        }
    }
}
