//! # Post List Viewer - 终端入口点
//!
//! `main.rs` 仅负责启动应用，核心逻辑位于 `lib.rs` 中。

/// 应用程序主入口函数
fn main() {
    app_lib::run();
}
