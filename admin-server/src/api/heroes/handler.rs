//! Hero Banner API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use shared::ApiResponse;

use crate::api::products::handler::{SearchQuery, read_file_field};
use crate::core::ServerState;
use crate::db::models::Hero;
use crate::ingest::{HeroDraft, StagedAsset, StatusBanner};
use crate::utils::AppResult;

/// POST /api/heroes/images - 暂存横幅图片 (单槽位，重复暂存替换旧图)
pub async fn stage_image(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<StagedAsset>>> {
    let (file_name, content_type, data) = read_file_field(multipart).await?;
    let staged = state
        .hero_ingestion
        .stage_asset(&file_name, &content_type, data)?;
    Ok(Json(ApiResponse::ok(staged)))
}

/// DELETE /api/heroes/images/:index - 移除暂存图片
pub async fn remove_image(
    State(state): State<ServerState>,
    Path(index): Path<usize>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.hero_ingestion.remove_asset(index)?;
    Ok(Json(ApiResponse::ok(true)))
}

/// POST /api/heroes - 提交横幅表单
pub async fn submit(
    State(state): State<ServerState>,
    Json(draft): Json<HeroDraft>,
) -> AppResult<Json<ApiResponse<String>>> {
    state.hero_ingestion.update_draft(draft);
    let id = state.hero_ingestion.submit().await?;
    Ok(Json(ApiResponse::ok_with_message(
        id,
        "Hero added successfully!",
    )))
}

/// GET /api/heroes?q= - 过滤后的横幅列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<Hero>>>> {
    Ok(Json(ApiResponse::ok(state.hero_ingestion.search(&query.q))))
}

/// DELETE /api/heroes/:id - 删除单个横幅
pub async fn delete_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.hero_ingestion.request_delete(id);
    state.hero_ingestion.confirm_delete().await?;
    Ok(Json(ApiResponse::ok(true)))
}

/// DELETE /api/heroes - 批量删除所有横幅
pub async fn delete_all(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<bool>>> {
    if !state.hero_ingestion.request_delete_all() {
        return Ok(Json(ApiResponse::ok_with_message(
            false,
            "No heroes to delete.",
        )));
    }
    state.hero_ingestion.confirm_delete().await?;
    Ok(Json(ApiResponse::ok(true)))
}

/// GET /api/heroes/status - 当前状态横幅
pub async fn status(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Option<StatusBanner>>>> {
    Ok(Json(ApiResponse::ok(state.hero_ingestion.status())))
}
