//! 发布阶段：本地HTML文件与WordPress远端二选一。
//! 远端发布无幂等保证，重复执行会创建重复文章。

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::generator::context::GeneratorContext;
use crate::types::post::{GeneratedPost, PublishResult};
use crate::wordpress::{PostPayload, SeoMeta, WpClient};

pub trait Outlet {
    async fn publish(&self, context: &GeneratorContext, post: &GeneratedPost)
    -> Result<PublishResult>;
}

/// 本地文件出口：正文序列化为HTML文件
pub struct FileOutlet {
    /// 输出路径，缺省时使用时间戳文件名
    pub path: Option<PathBuf>,
}

impl FileOutlet {
    fn resolve_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => {
                let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                PathBuf::from(format!("blog_post_{}.html", timestamp))
            }
        }
    }
}

impl Outlet for FileOutlet {
    async fn publish(
        &self,
        _context: &GeneratorContext,
        post: &GeneratedPost,
    ) -> Result<PublishResult> {
        let path = self.resolve_path();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, &post.body)?;
        println!("💾 内容已保存到 {}", path.display());

        Ok(PublishResult::local(path))
    }
}

/// WordPress远端出口：认证、解析分类与标签后创建文章
pub struct WordPressOutlet;

impl Outlet for WordPressOutlet {
    async fn publish(
        &self,
        context: &GeneratorContext,
        post: &GeneratedPost,
    ) -> Result<PublishResult> {
        let config = &context.config;
        let client = WpClient::new(config.site_base_url(), config.site.clone());

        let auth_header = client.authenticate().await?;

        // 分类：显式ID直接使用，否则按名称查找
        let category_id = match config.defaults.category_id {
            Some(id) => {
                println!("   使用分类ID: {} (跳过名称查找)", id);
                Some(id)
            }
            None => {
                client
                    .ensure_category(&auth_header, &config.defaults.category_name)
                    .await
            }
        };

        // 标签：名称解析为ID，缺失的自动创建
        let tag_ids = client
            .resolve_tag_ids(&auth_header, &config.defaults.tags)
            .await;

        let payload = PostPayload {
            title: post.title.clone(),
            content: post.body.clone(),
            status: config.defaults.status.to_string(),
            categories: category_id.map(|id| vec![id]),
            tags: (!tag_ids.is_empty()).then_some(tag_ids),
            meta: post.metadata.as_ref().and_then(SeoMeta::from_metadata),
        };

        let post_id = client.create_post(&auth_header, &payload).await?;
        println!(
            "✅ 文章已发布，远端ID: {}，状态: {}",
            post_id, config.defaults.status
        );

        Ok(PublishResult::remote(post_id))
    }
}
