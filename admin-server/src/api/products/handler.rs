//! Product API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::models::Product;
use crate::ingest::projection::{CategoryBuckets, group_by_category};
use crate::ingest::{ProductDraft, StagedAsset, StatusBanner};
use crate::utils::{AppError, AppResult};

/// 搜索参数
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// 大小写不敏感的子串过滤
    #[serde(default)]
    pub q: String,
}

/// 商品列表响应：过滤后的列表 + 固定分组
#[derive(Debug, Serialize)]
pub struct ProductListing {
    pub total: usize,
    pub products: Vec<Product>,
    pub buckets: CategoryBuckets,
}

/// 从 multipart 请求里取出 `file` 字段
///
/// 返回 (文件名, 声明类型, 数据)。声明类型缺失时按文件名猜测。
pub(crate) async fn read_file_field(
    mut multipart: Multipart,
) -> Result<(String, String, Vec<u8>), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::invalid("No filename provided in file field"))?;
        let content_type = field.content_type().map(|s| s.to_string()).unwrap_or_else(|| {
            mime_guess::from_path(&file_name)
                .first_raw()
                .unwrap_or("application/octet-stream")
                .to_string()
        });
        let data = field.bytes().await?.to_vec();
        if data.is_empty() {
            return Err(AppError::invalid("Empty file provided"));
        }
        return Ok((file_name, content_type, data));
    }
    Err(AppError::invalid(
        "No 'file' field found. Field name must be 'file'",
    ))
}

/// POST /api/products/images - 暂存一张商品图片
pub async fn stage_image(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<StagedAsset>>> {
    let (file_name, content_type, data) = read_file_field(multipart).await?;
    let staged = state
        .product_ingestion
        .stage_asset(&file_name, &content_type, data)?;
    Ok(Json(ApiResponse::ok(staged)))
}

/// DELETE /api/products/images/:index - 移除一张暂存图片
pub async fn remove_image(
    State(state): State<ServerState>,
    Path(index): Path<usize>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.product_ingestion.remove_asset(index)?;
    Ok(Json(ApiResponse::ok(true)))
}

/// POST /api/products - 提交商品表单
pub async fn submit(
    State(state): State<ServerState>,
    Json(draft): Json<ProductDraft>,
) -> AppResult<Json<ApiResponse<String>>> {
    state.product_ingestion.update_draft(draft);
    let id = state.product_ingestion.submit().await?;
    Ok(Json(ApiResponse::ok_with_message(
        id,
        "Product added successfully!",
    )))
}

/// GET /api/products?q= - 过滤并分组后的商品列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<ProductListing>>> {
    let products = state.product_ingestion.search(&query.q);
    let buckets = group_by_category(&products);
    Ok(Json(ApiResponse::ok(ProductListing {
        total: products.len(),
        products,
        buckets,
    })))
}

/// DELETE /api/products/:id - 删除单个商品 (两阶段在服务端完成)
pub async fn delete_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.product_ingestion.request_delete(id);
    state.product_ingestion.confirm_delete().await?;
    Ok(Json(ApiResponse::ok(true)))
}

/// DELETE /api/products - 批量删除当前镜像里的所有商品
pub async fn delete_all(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !state.product_ingestion.request_delete_all() {
        return Ok(Json(ApiResponse::ok_with_message(
            false,
            "No products to delete.",
        )));
    }
    state.product_ingestion.confirm_delete().await?;
    Ok(Json(ApiResponse::ok(true)))
}

/// GET /api/products/status - 当前状态横幅 (未清除时)
pub async fn status(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Option<StatusBanner>>>> {
    Ok(Json(ApiResponse::ok(state.product_ingestion.status())))
}
