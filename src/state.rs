use std::sync::Arc;

use axum::extract::FromRef;

use crate::{access::ContentAccess, config::Config, error::Result, source::WordPressSource};

/// 应用程序上下文
///
/// [`AppState`] 封装了内容访问层和运行配置，提供统一访问入口。
#[derive(Clone, FromRef)]
pub struct AppState {
    access: ContentAccess<WordPressSource>,
    config: Arc<Config>,
}

impl AppState {
    /// 根据配置创建一个新的 [`AppState`] 实例
    pub fn new(config: Config) -> Result<Self> {
        let source = WordPressSource::new(&config)?;

        Ok(Self {
            access: ContentAccess::new(source),
            config: Arc::new(config),
        })
    }

    /// 获取内容访问层
    pub fn access(&self) -> &ContentAccess<WordPressSource> {
        &self.access
    }

    /// 获取运行配置
    pub fn config(&self) -> &Config {
        &self.config
    }
}
