use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::config::{AuthMethod, SiteConfig};

/// 确定实际使用的认证方式。
///
/// 优先级：显式的auth_method配置 > use_application_password开关 > Basic认证。
pub fn resolve_auth_method(site: &SiteConfig) -> AuthMethod {
    if let Some(method) = site.auth_method {
        return method;
    }
    if site.use_application_password {
        return AuthMethod::Application;
    }
    AuthMethod::Basic
}

/// 构造Basic认证头（Application Password与Basic使用相同的凭据编码格式）
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", BASE64_STANDARD.encode(credentials.as_bytes()))
}

/// 构造Bearer认证头（JWT）
pub fn bearer_auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
