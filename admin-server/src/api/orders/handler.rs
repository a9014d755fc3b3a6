//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::models::OrderView;
use crate::utils::AppResult;

/// GET /api/orders - 所有订单，带派生总价，按下单时间倒序
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<OrderView>>>> {
    let orders = state.orders.find_all().await?;
    let views: Vec<OrderView> = orders.into_iter().map(OrderView::from).collect();
    Ok(Json(ApiResponse::ok(views)))
}

/// DELETE /api/orders/:id - 删除订单 (缺失的 id 视为已删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.orders.delete(&id).await?;
    Ok(Json(ApiResponse::ok(true)))
}
