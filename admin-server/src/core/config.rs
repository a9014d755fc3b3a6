/// 服务器配置 - 管理后台的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/storefront/admin | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | MEDIA_UPLOAD_URL | https://api.cloudinary.com/v1_1 | 媒体上传服务地址 |
/// | MEDIA_CLOUD_NAME | (空) | 媒体服务租户名 |
/// | MEDIA_UPLOAD_PRESET | (空) | 未签名上传预设 |
/// | STATUS_CLEAR_MS | 3500 | 状态横幅自动清除时间(毫秒) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/admin HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、预览文件、日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 媒体上传服务基础地址
    pub media_upload_url: String,
    /// 媒体服务租户名 (拼入上传端点)
    pub media_cloud_name: String,
    /// 未签名上传预设
    pub media_upload_preset: String,
    /// 状态横幅自动清除时间 (毫秒)
    pub status_clear_ms: u64,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/storefront/admin".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            media_upload_url: std::env::var("MEDIA_UPLOAD_URL")
                .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".into()),
            media_cloud_name: std::env::var("MEDIA_CLOUD_NAME").unwrap_or_default(),
            media_upload_preset: std::env::var("MEDIA_UPLOAD_PRESET").unwrap_or_default(),
            status_clear_ms: std::env::var("STATUS_CLEAR_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3500),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
