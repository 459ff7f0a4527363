//! # 文章列表控制器
//!
//! 持有过滤文本和当前显示的文章列表。过滤文本每次变化都重新获取完整文章列表，
//! 再对新数据应用单词过滤谓词。
//!
//! ## 过期结果丢弃
//! 每次发起刷新都分配一个单调递增的代号（generation），随 `RefreshTicket` 交给请求任务。
//! 请求完成时只有代号等于最新代号的结果才会被应用：
//! 较早过滤值的慢请求晚于较新的请求返回时，直接丢弃，不会覆盖新结果。
//!
//! ## 失败处理
//! 请求失败（网络错误、非成功状态码、JSON 错误）时保留之前的显示列表，
//! 首次加载失败时列表保持为空。失败只记录日志，不向上传播。

use crate::error::FetchError;
use crate::models::post::Post;
use crate::services::filter::apply_filter;

/// 一次列表刷新的凭据
///
/// 记录发起刷新时的代号和过滤文本快照，请求完成时凭此判断结果是否过期，
/// 并用快照中的过滤文本过滤新数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    pub generation: u64,
    pub filter_text: String,
}

/// 文章列表控制器
#[derive(Debug, Default)]
pub struct PostListController {
    /// 当前过滤文本
    filter_text: String,
    /// 当前显示的（已过滤的）文章
    displayed: Vec<Post>,
    /// 最近一次发起刷新的代号，0 表示尚未发起过任何刷新
    latest_generation: u64,
    /// 最近一次刷新是否仍未完成
    loading: bool,
}

impl PostListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 挂载时的首次加载（空过滤文本）
    pub fn initial_load(&mut self) -> RefreshTicket {
        self.issue()
    }

    /// 更新过滤文本
    ///
    /// # 返回值
    /// - `Some(ticket)` - 过滤文本发生变化（或从未加载过），需要发起一次列表请求
    /// - `None` - 过滤文本与当前值相同，无需重复请求
    pub fn set_filter(&mut self, text: &str) -> Option<RefreshTicket> {
        if text == self.filter_text && self.has_requested() {
            return None;
        }

        self.filter_text = text.to_string();
        Some(self.issue())
    }

    fn issue(&mut self) -> RefreshTicket {
        self.latest_generation += 1;
        self.loading = true;
        RefreshTicket {
            generation: self.latest_generation,
            filter_text: self.filter_text.clone(),
        }
    }

    /// 应用一次列表请求的结果
    ///
    /// # 返回值
    /// 结果被应用（无论成功或失败）返回 true；结果过期被丢弃返回 false
    pub fn complete(
        &mut self,
        ticket: &RefreshTicket,
        result: Result<Vec<Post>, FetchError>,
    ) -> bool {
        if ticket.generation != self.latest_generation {
            log::debug!(
                "丢弃过期的列表结果: generation {} (最新 {})",
                ticket.generation,
                self.latest_generation
            );
            return false;
        }

        self.loading = false;

        match result {
            Ok(posts) => {
                let total = posts.len();
                self.displayed = apply_filter(posts, &ticket.filter_text);
                log::info!(
                    "列表已刷新: 过滤 {:?} 命中 {}/{} 篇",
                    ticket.filter_text,
                    self.displayed.len(),
                    total
                );
            }
            Err(e) => {
                log::warn!("获取文章列表失败，保留当前列表: {}", e);
            }
        }

        true
    }

    /// 是否已经发起过至少一次刷新
    pub fn has_requested(&self) -> bool {
        self.latest_generation > 0
    }

    /// 当前显示的文章
    pub fn displayed(&self) -> &[Post] {
        &self.displayed
    }

    /// 当前显示文章的 ID（按显示顺序）
    pub fn displayed_ids(&self) -> Vec<u64> {
        self.displayed.iter().map(|p| p.id).collect()
    }

    /// 当前过滤文本
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// 最近一次刷新是否仍在进行中
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
