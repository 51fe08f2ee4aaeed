use std::io;

pub type Result<T> = core::result::Result<T, Error>;

/// 内容层内部错误
///
/// 对外的三个读取操作不会返回该错误，而是在边界处降级为约定的回退值。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Config(&'static str),

    #[error(transparent)]
    Io(#[from] io::Error),
}
