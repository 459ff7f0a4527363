//! # 文章请求命令
//!
//! 把网络请求派发为后台任务，结果通过事件通道送回事件循环：
//! - `spawn_list_refresh` - 获取完整文章列表
//! - `spawn_item_fetches` - 为一个挂载的条目分别获取详情和评论
//!
//! 每个请求是独立任务，完成顺序不定。返回的 `AbortHandle` 用于在结果已无意义时中止请求。

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::app::Event;
use crate::services::api::PostsClient;
use crate::services::list::RefreshTicket;
use crate::services::registry::MountToken;

/// 发起一次列表刷新
pub fn spawn_list_refresh(
    client: &PostsClient,
    ticket: RefreshTicket,
    tx: &UnboundedSender<Event>,
) -> AbortHandle {
    let client = client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = client.fetch_posts().await;
        // 发送失败说明事件循环已退出，结果无人接收
        let _ = tx.send(Event::PostsLoaded { ticket, result });
    })
    .abort_handle()
}

/// 为新挂载的条目发起详情请求和评论请求
///
/// 两个请求互相独立，不等待对方。
pub fn spawn_item_fetches(
    client: &PostsClient,
    id: u64,
    token: MountToken,
    tx: &UnboundedSender<Event>,
) -> Vec<AbortHandle> {
    let detail_task = {
        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_post_detail(id).await;
            let _ = tx.send(Event::DetailLoaded { id, token, result });
        })
    };

    let comments_task = {
        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_comments(id).await;
            let _ = tx.send(Event::CommentsLoaded { id, token, result });
        })
    };

    vec![detail_task.abort_handle(), comments_task.abort_handle()]
}
