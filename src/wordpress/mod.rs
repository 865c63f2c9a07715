//! WordPress REST API客户端：认证、分类/标签解析与文章创建

pub mod auth;
pub mod error;
pub mod types;

pub use error::{Result, WpError};
pub use types::{JwtTokenResponse, PostPayload, PostResponse, SeoMeta, Term, TermPayload};

use serde_json::json;

use crate::config::{AuthMethod, SiteConfig};

/// WordPress REST API客户端
pub struct WpClient {
    client: reqwest::Client,
    base_url: String,
    site: SiteConfig,
}

impl WpClient {
    /// base_url为站点根地址（不含/wp-json），末尾斜杠已去除
    pub fn new(base_url: String, site: SiteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            site,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/wp-json/{}", self.base_url, path)
    }

    /// 构造Authorization头并做一次连通性探测。
    ///
    /// JWT方式先向令牌端点换取Bearer令牌，失败时回落到Basic。
    /// 探测失败只告警不中断，实际发布时再处理认证错误。
    pub async fn authenticate(&self) -> Result<String> {
        println!("🔑 正在向WordPress REST API认证: {}", self.base_url);

        let method = auth::resolve_auth_method(&self.site);
        let header = match method {
            AuthMethod::Basic => {
                println!("   使用Basic认证方式");
                auth::basic_auth_header(&self.site.username, &self.site.password)
            }
            AuthMethod::Application => {
                println!("   使用Application Password认证方式");
                auth::basic_auth_header(&self.site.username, &self.site.password)
            }
            AuthMethod::Jwt => {
                println!("   使用JWT认证方式");
                match self.fetch_jwt_token().await {
                    Ok(token) => auth::bearer_auth_header(&token),
                    Err(e) => {
                        eprintln!("⚠️ JWT认证失败: {}，回落到Basic认证", e);
                        auth::basic_auth_header(&self.site.username, &self.site.password)
                    }
                }
            }
        };

        // 连通性探测
        let test_url = self.api_url("wp/v2/users/me");
        match self
            .client
            .get(&test_url)
            .header("Authorization", &header)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                println!("✅ WordPress认证成功");
            }
            Ok(resp) => {
                eprintln!(
                    "⚠️ 认证探测返回 {}，将继续尝试发布（凭据可能不正确，或站点要求Application Password）",
                    resp.status().as_u16()
                );
            }
            Err(e) => {
                eprintln!("⚠️ 认证探测失败: {}，将继续尝试发布", e);
            }
        }

        Ok(header)
    }

    async fn fetch_jwt_token(&self) -> Result<String> {
        let token_url = self.api_url("jwt-auth/v1/token");
        let resp = self
            .client
            .post(&token_url)
            .json(&json!({
                "username": self.site.username,
                "password": self.site.password,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WpError::Auth(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token_resp: JwtTokenResponse = resp.json().await?;
        Ok(token_resp.token)
    }

    /// 按分类名查找分类ID：先列表匹配，其次search参数，最后按slug查找；
    /// 均未命中时尝试创建。任一环节失败都不中断发布流程。
    pub async fn ensure_category(&self, auth_header: &str, name: &str) -> Option<u64> {
        let name = name.trim();
        if name.is_empty() {
            eprintln!("⚠️ 分类名为空，跳过分类指定");
            return None;
        }

        // 分类列表端点通常无需认证
        let list_url = self.api_url("wp/v2/categories?per_page=100");
        if let Some(id) = self.find_term_in(&list_url, name).await {
            println!("   分类 '{}' 已存在，ID: {}", name, id);
            return Some(id);
        }

        let search_url = self.api_url(&format!(
            "wp/v2/categories?search={}&per_page=100",
            urlencode(name)
        ));
        if let Some(id) = self.find_term_in(&search_url, name).await {
            println!("   分类 '{}' 通过搜索命中，ID: {}", name, id);
            return Some(id);
        }

        let slug = name.to_lowercase().replace(' ', "-");
        let slug_url = self.api_url(&format!("wp/v2/categories?slug={}", urlencode(&slug)));
        if let Some(term) = self.first_term_in(&slug_url).await {
            println!("   分类 '{}' 通过slug命中，ID: {}", name, term.id);
            return Some(term.id);
        }

        println!("   分类 '{}' 不存在，尝试创建...", name);
        self.create_term(auth_header, "wp/v2/categories", name, Some(slug))
            .await
    }

    async fn find_term_in(&self, url: &str, name: &str) -> Option<u64> {
        let resp = self.client.get(url).send().await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        let terms: Vec<Term> = resp.json().await.ok()?;
        terms
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .map(|t| t.id)
    }

    async fn first_term_in(&self, url: &str) -> Option<Term> {
        let resp = self.client.get(url).send().await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        let terms: Vec<Term> = resp.json().await.ok()?;
        terms.into_iter().next()
    }

    async fn create_term(
        &self,
        auth_header: &str,
        path: &str,
        name: &str,
        slug: Option<String>,
    ) -> Option<u64> {
        let payload = TermPayload {
            name: name.to_string(),
            slug,
        };

        let resp = self
            .client
            .post(self.api_url(path))
            .header("Authorization", auth_header)
            .json(&payload)
            .send()
            .await
            .ok()?;

        if !resp.status().is_success() {
            eprintln!("⚠️ 创建 '{}' 失败: HTTP {}", name, resp.status().as_u16());
            return None;
        }

        let term: Term = resp.json().await.ok()?;
        println!("   已创建 '{}'，ID: {}", name, term.id);
        Some(term.id)
    }

    /// 将标签名解析为标签ID，不存在的标签自动创建。
    /// 任何失败都降级为“不带该标签发布”。
    pub async fn resolve_tag_ids(&self, auth_header: &str, tag_names: &[String]) -> Vec<u64> {
        let mut tag_ids = Vec::new();

        let tags_url = self.api_url("wp/v2/tags?per_page=100");
        let existing: Vec<Term> = match self.client.get(&tags_url).send().await {
            Ok(resp) if resp.status().is_success() => resp.json().await.unwrap_or_default(),
            Ok(resp) => {
                eprintln!(
                    "⚠️ 获取标签列表失败: HTTP {}，将不带标签发布",
                    resp.status().as_u16()
                );
                return tag_ids;
            }
            Err(e) => {
                eprintln!("⚠️ 获取标签列表失败: {}，将不带标签发布", e);
                return tag_ids;
            }
        };

        for tag_name in tag_names {
            let tag_name = tag_name.trim();
            if tag_name.is_empty() {
                continue;
            }

            if let Some(term) = existing
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(tag_name))
            {
                tag_ids.push(term.id);
            } else if let Some(id) = self
                .create_term(auth_header, "wp/v2/tags", tag_name, None)
                .await
            {
                tag_ids.push(id);
            }
        }

        tag_ids
    }

    /// 创建文章并返回远端文章ID。
    ///
    /// 分类字段导致的失败会自动去掉分类重试一次（站点分类配置异常时仍能发出文章）。
    pub async fn create_post(&self, auth_header: &str, payload: &PostPayload) -> Result<u64> {
        let posts_url = self.api_url("wp/v2/posts");
        println!("📤 正在发布到WordPress: {}", posts_url);

        let resp = self
            .client
            .post(&posts_url)
            .header("Authorization", auth_header)
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let post: PostResponse = resp.json().await?;
            return Ok(post.id);
        }

        let body = resp.text().await.unwrap_or_default();
        eprintln!("❌ 发布失败: HTTP {}，响应: {}", status.as_u16(), truncate(&body, 500));

        // 分类相关错误时去掉分类重试
        let body_lower = body.to_lowercase();
        if payload.categories.is_some()
            && (body_lower.contains("term") || body_lower.contains("categor"))
        {
            eprintln!("   检测到分类相关错误，尝试不带分类重新发布...");
            let mut retry_payload = payload.clone();
            retry_payload.categories = None;

            let retry_resp = self
                .client
                .post(&posts_url)
                .header("Authorization", auth_header)
                .json(&retry_payload)
                .send()
                .await?;

            if retry_resp.status().is_success() {
                let post: PostResponse = retry_resp.json().await?;
                println!("✅ 不带分类发布成功");
                return Ok(post.id);
            }
        }

        Err(WpError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

/// 最小化的查询参数编码，覆盖分类名/slug中的常见字符
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

fn truncate(s: &str, limit: usize) -> &str {
    if s.len() <= limit {
        s
    } else {
        let mut end = limit;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode() {
        assert_eq!(urlencode("CL8Y News"), "CL8Y%20News");
        assert_eq!(urlencode("plain-slug_1.0~x"), "plain-slug_1.0~x");
        assert_eq!(urlencode("a&b"), "a%26b");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let s = "日志输出测试";
        let t = truncate(s, 4);
        assert!(t.len() <= 4);
        assert!(s.starts_with(t));

        assert_eq!(truncate("short", 500), "short");
    }

    #[test]
    fn test_api_url_layout() {
        let client = WpClient::new(
            "https://blog.example.com".to_string(),
            crate::config::SiteConfig {
                url: "https://blog.example.com".to_string(),
                username: "editor".to_string(),
                password: "secret".to_string(),
                auth_method: None,
                use_application_password: false,
            },
        );

        assert_eq!(
            client.api_url("wp/v2/posts"),
            "https://blog.example.com/wp-json/wp/v2/posts"
        );
    }
}
