//! # 条目注册表
//!
//! 按文章 ID 管理已挂载的条目（`PostDetail`），实现按 key 的增量协调：
//! - 重新过滤后仍在列表中的 ID：保留原条目，不重新请求
//! - 新出现的 ID：挂载新条目，分配新的挂载令牌（token），需要发起详情和评论请求
//! - 不再显示的 ID：卸载条目，中止其仍在进行的请求
//!
//! ## 过期结果丢弃
//! 请求任务携带挂载时的 token。结果到达时，只有 ID 仍处于挂载状态且 token 一致才会应用；
//! 条目已卸载（或卸载后又以新 token 重新挂载）时结果直接丢弃。
//!
//! 注册表只由事件循环单线程访问，不需要加锁。

use std::collections::{HashMap, HashSet};

use tokio::task::AbortHandle;

use crate::error::FetchError;
use crate::models::display::PostView;
use crate::models::post::{CommentRecord, Post};
use crate::services::detail::PostDetail;

/// 挂载令牌：区分同一 ID 的不同次挂载
pub type MountToken = u64;

/// 单次协调的结果
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// 新挂载的条目，需要为其发起详情和评论请求
    pub mounted: Vec<(u64, MountToken)>,
    /// 被卸载的条目 ID
    pub unmounted: Vec<u64>,
}

/// 已挂载条目
struct MountedItem {
    token: MountToken,
    detail: PostDetail,
    /// 该条目仍在进行的请求任务，卸载时中止
    tasks: Vec<AbortHandle>,
}

/// 条目注册表
#[derive(Default)]
pub struct ItemRegistry {
    /// 已挂载条目：文章 ID → 条目
    items: HashMap<u64, MountedItem>,
    /// 下一个挂载令牌
    next_token: MountToken,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按新的显示 ID 列表协调已挂载条目
    ///
    /// # 参数
    /// - `ids` - 按显示顺序排列的文章 ID；重复 ID 只挂载一次
    pub fn reconcile(&mut self, ids: &[u64]) -> Reconciliation {
        let wanted: HashSet<u64> = ids.iter().copied().collect();
        let mut result = Reconciliation::default();

        // 卸载不再显示的条目
        let stale: Vec<u64> = self
            .items
            .keys()
            .filter(|id| !wanted.contains(*id))
            .copied()
            .collect();
        for id in stale {
            if let Some(item) = self.items.remove(&id) {
                for task in item.tasks {
                    task.abort();
                }
                result.unmounted.push(id);
            }
        }
        result.unmounted.sort_unstable();

        // 挂载新出现的条目（按显示顺序）
        for &id in ids {
            if self.items.contains_key(&id) {
                continue;
            }
            self.next_token += 1;
            let token = self.next_token;
            self.items.insert(
                id,
                MountedItem {
                    token,
                    detail: PostDetail::new(id),
                    tasks: Vec::new(),
                },
            );
            result.mounted.push((id, token));
        }

        if !result.mounted.is_empty() || !result.unmounted.is_empty() {
            log::debug!(
                "条目协调: 挂载 {} 个，卸载 {} 个，保留 {} 个",
                result.mounted.len(),
                result.unmounted.len(),
                self.items.len() - result.mounted.len()
            );
        }

        result
    }

    /// 记录条目的请求任务，供卸载时中止
    ///
    /// token 不匹配（条目已被卸载）时立即中止这些任务。
    pub fn attach_tasks(&mut self, id: u64, token: MountToken, tasks: Vec<AbortHandle>) {
        match self.items.get_mut(&id) {
            Some(item) if item.token == token => item.tasks.extend(tasks),
            _ => tasks.iter().for_each(AbortHandle::abort),
        }
    }

    fn current(&mut self, id: u64, token: MountToken) -> Option<&mut PostDetail> {
        match self.items.get_mut(&id) {
            Some(item) if item.token == token => Some(&mut item.detail),
            _ => {
                log::debug!("丢弃已卸载条目的结果: post {} (token {})", id, token);
                None
            }
        }
    }

    /// 应用详情请求结果
    ///
    /// # 返回值
    /// 结果被应用返回 true；条目已卸载被丢弃返回 false
    pub fn apply_detail(
        &mut self,
        id: u64,
        token: MountToken,
        result: Result<Post, FetchError>,
    ) -> bool {
        match self.current(id, token) {
            Some(detail) => {
                detail.apply_detail(result);
                true
            }
            None => false,
        }
    }

    /// 应用评论请求结果
    ///
    /// # 返回值
    /// 结果被应用返回 true；条目已卸载被丢弃返回 false
    pub fn apply_comments(
        &mut self,
        id: u64,
        token: MountToken,
        result: Result<Vec<CommentRecord>, FetchError>,
    ) -> bool {
        match self.current(id, token) {
            Some(detail) => {
                detail.apply_comments(result);
                true
            }
            None => false,
        }
    }

    /// 所有已挂载条目是否都已完成两次请求
    pub fn all_settled(&self) -> bool {
        self.items.values().all(|item| item.detail.is_settled())
    }

    /// 已挂载条目数量
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 按给定顺序生成显示数据，跳过未挂载的 ID
    pub fn views(&self, order: &[u64]) -> Vec<PostView> {
        let mut seen = HashSet::new();
        order
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.items.get(id))
            .map(|item| item.detail.view())
            .collect()
    }
}
