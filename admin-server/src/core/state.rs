use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::live::ResourceVersions;
use crate::db::repository::{HeroRepository, OrderRepository, ProductRepository};
use crate::ingest::{HeroDraft, IngestionController, ProductDraft};
use crate::media::{CloudinaryClient, MediaStore};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是管理后台的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | products | ProductRepository | 商品数据仓库 |
/// | heroes | HeroRepository | 横幅数据仓库 |
/// | orders | OrderRepository | 订单数据仓库 (只读/删除) |
/// | product_ingestion | IngestionController | 商品录入流程 |
/// | hero_ingestion | IngestionController | 横幅录入流程 |
/// | resource_versions | Arc<ResourceVersions> | 快照版本管理 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 商品数据仓库
    pub products: Arc<ProductRepository>,
    /// 横幅数据仓库
    pub heroes: Arc<HeroRepository>,
    /// 订单数据仓库
    pub orders: Arc<OrderRepository>,
    /// 商品录入控制器
    pub product_ingestion: Arc<IngestionController<ProductDraft>>,
    /// 横幅录入控制器
    pub hero_ingestion: Arc<IngestionController<HeroDraft>>,
    /// 快照版本管理器
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// 初始化所有服务并装配状态
    ///
    /// 打开数据库、创建三个仓库、构造媒体客户端和两个录入控制器，
    /// 并将控制器挂到各自的快照推送上。
    pub async fn initialize(config: &Config) -> Result<Self> {
        let work_dir = PathBuf::from(&config.work_dir);
        std::fs::create_dir_all(&work_dir)?;

        let db_service = DbService::new(&work_dir).await?;
        let db = db_service.db.clone();

        let resource_versions = Arc::new(ResourceVersions::new());
        let products = Arc::new(ProductRepository::new(db.clone(), resource_versions.clone()));
        let heroes = Arc::new(HeroRepository::new(db.clone(), resource_versions.clone()));
        let orders = Arc::new(OrderRepository::new(db.clone(), resource_versions.clone()));

        let media: Arc<dyn MediaStore> = Arc::new(CloudinaryClient::new(
            &config.media_upload_url,
            &config.media_cloud_name,
            &config.media_upload_preset,
        ));

        let status_clear = Duration::from_millis(config.status_clear_ms);
        let staging_root = work_dir.join("staging");

        let product_ingestion = Arc::new(IngestionController::<ProductDraft>::new(
            products.clone(),
            media.clone(),
            staging_root.join("products"),
            status_clear,
        )?);
        let hero_ingestion = Arc::new(IngestionController::<HeroDraft>::new(
            heroes.clone(),
            media.clone(),
            staging_root.join("heroes"),
            status_clear,
        )?);

        let state = Self {
            config: config.clone(),
            db,
            products,
            heroes,
            orders,
            product_ingestion,
            hero_ingestion,
            resource_versions,
        };

        state.start_feeds().await?;
        Ok(state)
    }

    /// 测试用状态：内存数据库 + 注入的媒体客户端
    pub async fn initialize_with_media(
        config: &Config,
        media: Arc<dyn MediaStore>,
    ) -> Result<Self> {
        let work_dir = PathBuf::from(&config.work_dir);
        std::fs::create_dir_all(&work_dir)?;

        let db_service = DbService::memory().await?;
        let db = db_service.db.clone();

        let resource_versions = Arc::new(ResourceVersions::new());
        let products = Arc::new(ProductRepository::new(db.clone(), resource_versions.clone()));
        let heroes = Arc::new(HeroRepository::new(db.clone(), resource_versions.clone()));
        let orders = Arc::new(OrderRepository::new(db.clone(), resource_versions.clone()));

        let status_clear = Duration::from_millis(config.status_clear_ms);
        let staging_root = work_dir.join("staging");

        let product_ingestion = Arc::new(IngestionController::<ProductDraft>::new(
            products.clone(),
            media.clone(),
            staging_root.join("products"),
            status_clear,
        )?);
        let hero_ingestion = Arc::new(IngestionController::<HeroDraft>::new(
            heroes.clone(),
            media,
            staging_root.join("heroes"),
            status_clear,
        )?);

        let state = Self {
            config: config.clone(),
            db,
            products,
            heroes,
            orders,
            product_ingestion,
            hero_ingestion,
            resource_versions,
        };

        state.start_feeds().await?;
        Ok(state)
    }

    /// 发布初始快照并把录入控制器挂到各自的数据推送上
    async fn start_feeds(&self) -> Result<()> {
        self.products
            .republish()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        self.heroes
            .republish()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        self.orders
            .republish()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let _ = self.product_ingestion.attach(&self.products.feed());
        let _ = self.hero_ingestion.attach(&self.heroes.feed());
        Ok(())
    }

    /// 工作目录
    pub fn work_dir(&self) -> &Path {
        Path::new(&self.config.work_dir)
    }
}
