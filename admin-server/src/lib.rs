//! Storefront Admin Server - 小型商城的商品/横幅/订单管理后台
//!
//! # 架构概述
//!
//! 本模块是管理后台的主入口，提供以下核心功能：
//!
//! - **录入流水线** (`ingest`): 表单校验 → 图片暂存 → 顺序上传 → 持久化
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储与全量快照推送
//! - **媒体上传** (`media`): 未签名 multipart 上传客户端
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! admin-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── ingest/        # 录入状态机、暂存、投影
//! ├── media/         # 媒体上传客户端
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod ingest;
pub mod media;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use ingest::{HeroDraft, IngestionController, ProductDraft};
pub use media::{CloudinaryClient, MediaStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：dotenv、工作目录、日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/storefront/admin".into());
    std::fs::create_dir_all(&work_dir)?;

    let log_dir = format!("{work_dir}/logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), Some(&log_dir));

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
    ___       __          _
   /   | ____/ /___ ___  (_)___
  / /| |/ __  / __ `__ \/ / __ \
 / ___ / /_/ / / / / / / / / / /
/_/  |_\__,_/_/ /_/ /_/_/_/ /_/
    "#
    );
}
