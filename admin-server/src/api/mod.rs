//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品录入和管理接口
//! - [`heroes`] - 首页横幅录入和管理接口
//! - [`orders`] - 订单查看和删除接口

pub mod health;
pub mod heroes;
pub mod orders;
pub mod products;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
