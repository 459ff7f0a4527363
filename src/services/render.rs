//! # 终端渲染服务
//!
//! 将 `ListView` 渲染为纯文本，每篇文章一段：
//!
//! ```text
//! 1 | sunt aut facere | 5
//! quia et suscipit ...
//! ```
//!
//! 尚未到达的字段显示 `…`，请求失败的字段显示 `-`。

use crate::models::display::{CommentCount, ListView, PostView};

/// 页面标题
const HEADING: &str = "Post List View";

/// 字段尚未到达时的占位符
const PENDING: &str = "…";

/// 字段请求失败时的占位符
const UNAVAILABLE: &str = "-";

/// 渲染整个列表
pub fn render_list(view: &ListView) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(HEADING.to_string());
    lines.push("=".repeat(HEADING.len()));

    let mut filter_line = format!("Filter Posts: {}", view.filter_text);
    if view.loading {
        filter_line.push_str(" (loading…)");
    }
    lines.push(filter_line);
    lines.push(String::new());

    if view.items.is_empty() {
        lines.push("(no posts)".to_string());
    }

    for item in &view.items {
        lines.push(render_header(item));
        lines.push(render_body(item));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// 渲染条目首行：`{id} | {title} | {comment count}`
fn render_header(item: &PostView) -> String {
    let title = match (&item.title, item.detail_failed) {
        (Some(title), _) => title.as_str(),
        (None, true) => UNAVAILABLE,
        (None, false) => PENDING,
    };

    let count = match item.comment_count {
        CommentCount::Loaded(n) => n.to_string(),
        CommentCount::Pending => PENDING.to_string(),
        CommentCount::Unavailable => UNAVAILABLE.to_string(),
    };

    format!("{} | {} | {}", item.id, title, count)
}

fn render_body(item: &PostView) -> String {
    match (&item.body, item.detail_failed) {
        (Some(body), _) => body.clone(),
        (None, true) => UNAVAILABLE.to_string(),
        (None, false) => PENDING.to_string(),
    }
}
