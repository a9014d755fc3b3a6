use thiserror::Error;

/// 服务器启动/运行期错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::utils::AppError> for ServerError {
    fn from(err: crate::utils::AppError) -> Self {
        match err {
            crate::utils::AppError::Database(msg) => ServerError::Database(msg),
            other => ServerError::Internal(anyhow::anyhow!(other)),
        }
    }
}

/// 启动路径的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
