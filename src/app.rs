//! # 事件循环
//!
//! 单线程事件驱动：用户输入（过滤文本）和所有网络请求的完成都作为 `Event`
//! 汇入同一个 mpsc 通道，由 `App` 逐个处理，处理完一批事件后重新渲染。
//!
//! ## 事件处理
//! - `Filter`：更新过滤文本；文本确有变化时中止上一次列表请求并发起新的请求
//! - `PostsLoaded`：应用列表结果（过期结果被丢弃），然后按文章 ID 协调条目，
//!   为新挂载的条目发起详情和评论请求
//! - `DetailLoaded` / `CommentsLoaded`：应用到仍挂载的条目，已卸载条目的结果被丢弃
//! - `InputClosed`：输入结束（EOF 或 `:q`）
//!
//! ## 运行模式
//! - `run_once`：应用一次过滤，等待列表和所有条目请求完成，渲染一次后返回
//! - `run_interactive`：挂载时加载全部文章，之后每行输入都是新的过滤文本

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

use crate::commands::posts::{spawn_item_fetches, spawn_list_refresh};
use crate::error::FetchError;
use crate::models::display::ListView;
use crate::models::post::{CommentRecord, Post};
use crate::services::api::PostsClient;
use crate::services::list::{PostListController, RefreshTicket};
use crate::services::registry::{ItemRegistry, MountToken};
use crate::services::render::render_list;

/// 交互模式下的退出命令
const QUIT_COMMAND: &str = ":q";

/// 事件循环处理的事件
#[derive(Debug)]
pub enum Event {
    /// 用户输入了新的过滤文本
    Filter(String),
    /// 输入结束
    InputClosed,
    /// 列表请求完成
    PostsLoaded {
        ticket: RefreshTicket,
        result: Result<Vec<Post>, FetchError>,
    },
    /// 详情请求完成
    DetailLoaded {
        id: u64,
        token: MountToken,
        result: Result<Post, FetchError>,
    },
    /// 评论请求完成
    CommentsLoaded {
        id: u64,
        token: MountToken,
        result: Result<Vec<CommentRecord>, FetchError>,
    },
}

/// 应用状态和事件循环
pub struct App<W: Write> {
    client: PostsClient,
    list: PostListController,
    registry: ItemRegistry,
    /// 正在进行的列表请求，新的刷新发起时中止
    list_task: Option<AbortHandle>,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    out: W,
    /// 上一次输出的画面，内容不变时不重复输出
    last_frame: Option<String>,
}

impl<W: Write> App<W> {
    pub fn new(client: PostsClient, out: W) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            list: PostListController::new(),
            registry: ItemRegistry::new(),
            list_task: None,
            tx,
            rx,
            out,
            last_frame: None,
        }
    }

    /// 事件发送端，供输入读取任务使用
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    /// 渲染输出目标
    pub fn output(&self) -> &W {
        &self.out
    }

    /// 当前显示数据
    pub fn view(&self) -> ListView {
        let order = self.list.displayed_ids();
        ListView {
            filter_text: self.list.filter_text().to_string(),
            loading: self.list.is_loading(),
            items: self.registry.views(&order),
        }
    }

    fn start_refresh(&mut self, ticket: RefreshTicket) {
        if let Some(previous) = self.list_task.take() {
            previous.abort();
        }
        log::debug!(
            "发起列表请求: generation {} 过滤 {:?}",
            ticket.generation,
            ticket.filter_text
        );
        self.list_task = Some(spawn_list_refresh(&self.client, ticket, &self.tx));
    }

    /// 更新过滤文本，文本未变化时不发起请求
    pub fn set_filter(&mut self, text: &str) {
        if let Some(ticket) = self.list.set_filter(text) {
            self.start_refresh(ticket);
        }
    }

    /// 挂载时加载全部文章
    ///
    /// 挂载前已经通过 `set_filter` 发起过请求时不再重复请求。
    pub fn initial_load(&mut self) {
        if self.list.has_requested() {
            return;
        }
        let ticket = self.list.initial_load();
        self.start_refresh(ticket);
    }

    /// 处理单个事件
    ///
    /// # 返回值
    /// 事件是否改变了显示状态
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Filter(text) => {
                let before = self.list.filter_text().to_string();
                self.set_filter(&text);
                before != self.list.filter_text()
            }
            Event::InputClosed => false,
            Event::PostsLoaded { ticket, result } => {
                if !self.list.complete(&ticket, result) {
                    return false;
                }
                self.list_task = None;
                self.reconcile_items();
                true
            }
            Event::DetailLoaded { id, token, result } => {
                self.registry.apply_detail(id, token, result)
            }
            Event::CommentsLoaded { id, token, result } => {
                self.registry.apply_comments(id, token, result)
            }
        }
    }

    fn reconcile_items(&mut self) {
        let ids = self.list.displayed_ids();
        let reconciliation = self.registry.reconcile(&ids);
        for (id, token) in reconciliation.mounted {
            let tasks = spawn_item_fetches(&self.client, id, token, &self.tx);
            self.registry.attach_tasks(id, token, tasks);
        }
    }

    /// 列表请求和所有条目请求是否都已完成
    pub fn is_settled(&self) -> bool {
        !self.list.is_loading() && self.registry.all_settled()
    }

    /// 处理事件直到列表和所有条目都完成
    ///
    /// 此期间到达的过滤输入照常处理。
    pub async fn settle(&mut self) {
        while !self.is_settled() {
            match self.rx.recv().await {
                Some(event) => {
                    self.handle_event(event);
                }
                None => break,
            }
        }
    }

    /// 渲染当前画面，内容与上一次相同时不输出
    pub fn render(&mut self) -> std::io::Result<()> {
        let frame = render_list(&self.view());
        if self.last_frame.as_deref() == Some(frame.as_str()) {
            return Ok(());
        }
        writeln!(self.out, "{}", frame)?;
        self.out.flush()?;
        self.last_frame = Some(frame);
        Ok(())
    }

    /// 单次模式：应用过滤、等待全部请求完成、渲染一次
    pub async fn run_once(&mut self, filter_text: &str) -> std::io::Result<()> {
        self.set_filter(filter_text);
        self.settle().await;
        self.render()
    }

    /// 交互模式：逐行读取过滤文本，直到 EOF 或 `:q`
    ///
    /// EOF 时等待当前请求全部完成并渲染最终画面；`:q` 立即退出。
    pub async fn run_interactive<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let input_task = spawn_input_reader(input, self.sender());

        self.initial_load();
        self.render()?;

        let mut quit_now = false;
        while let Some(event) = self.rx.recv().await {
            let mut closed = matches!(event, Event::InputClosed);
            if let Event::Filter(text) = &event {
                if text == QUIT_COMMAND {
                    quit_now = true;
                    break;
                }
            }
            self.handle_event(event);

            // 一批事件只渲染一次
            while let Ok(event) = self.rx.try_recv() {
                if let Event::Filter(text) = &event {
                    if text == QUIT_COMMAND {
                        quit_now = true;
                        break;
                    }
                }
                closed |= matches!(event, Event::InputClosed);
                self.handle_event(event);
            }

            if quit_now {
                break;
            }
            self.render()?;
            if closed {
                break;
            }
        }

        input_task.abort();

        if !quit_now {
            self.settle().await;
            self.render()?;
        }
        Ok(())
    }
}

/// 逐行读取输入并转为过滤事件
fn spawn_input_reader<R>(input: R, tx: UnboundedSender<Event>) -> AbortHandle
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = input.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let text = line.trim_end_matches('\r').to_string();
                    if tx.send(Event::Filter(text)).is_err() {
                        return;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    log::warn!("读取输入失败: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(Event::InputClosed);
    })
    .abort_handle()
}
