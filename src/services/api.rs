//! # REST API 客户端
//!
//! 封装三个外部接口：
//! - `GET <postsUrl>` → 文章数组
//! - `GET <postDetailUrl>(id)` → 单个文章
//! - `GET <commentsUrl>(id)` → 评论数组
//!
//! 响应体先读取为字节，再用 `serde_json` 解析，
//! 以便区分传输错误（`FetchError::Network`）和 JSON 结构错误（`FetchError::Decode`）。

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ConfigError, FetchError};
use crate::models::post::{CommentRecord, Post};
use crate::models::settings::AppConfig;

/// 路径模板中的文章 ID 占位符
const ID_PLACEHOLDER: &str = "{id}";

/// 已解析的 API 端点
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    posts_path: String,
    post_detail_path: String,
    comments_path: String,
}

impl Endpoints {
    /// 从配置构建端点
    ///
    /// 根地址末尾补齐 `/`，路径去掉开头的 `/`，保证 `Url::join` 追加而不是替换路径。
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let mut base_str = config.api_base_url.trim().to_string();
        if !base_str.ends_with('/') {
            base_str.push('/');
        }

        let base = Url::parse(&base_str).map_err(|source| ConfigError::InvalidUrl {
            url: config.api_base_url.clone(),
            source,
        })?;

        let normalize = |path: &str| path.trim().trim_start_matches('/').to_string();

        let endpoints = Self {
            base,
            posts_path: normalize(&config.posts_path),
            post_detail_path: normalize(&config.post_detail_path),
            comments_path: normalize(&config.comments_path),
        };

        // 启动时校验模板拼接结果，配置错误不拖到第一次请求才暴露
        for path in [
            endpoints.posts_path.clone(),
            endpoints.detail_path(0),
            endpoints.comment_path(0),
        ] {
            endpoints
                .base
                .join(&path)
                .map_err(|source| ConfigError::InvalidUrl {
                    url: format!("{}{}", endpoints.base, path),
                    source,
                })?;
        }

        Ok(endpoints)
    }

    fn detail_path(&self, id: u64) -> String {
        self.post_detail_path.replace(ID_PLACEHOLDER, &id.to_string())
    }

    fn comment_path(&self, id: u64) -> String {
        self.comments_path.replace(ID_PLACEHOLDER, &id.to_string())
    }

    /// 文章列表 URL
    pub fn posts_url(&self) -> Result<Url, url::ParseError> {
        self.base.join(&self.posts_path)
    }

    /// 文章详情 URL
    pub fn post_detail_url(&self, id: u64) -> Result<Url, url::ParseError> {
        self.base.join(&self.detail_path(id))
    }

    /// 评论集合 URL
    pub fn comments_url(&self, id: u64) -> Result<Url, url::ParseError> {
        self.base.join(&self.comment_path(id))
    }
}

/// 文章 API 客户端
///
/// 内部的 `reqwest::Client` 基于引用计数，`clone` 开销很小，
/// 每个后台请求任务持有一份克隆。
#[derive(Debug, Clone)]
pub struct PostsClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl PostsClient {
    /// 根据配置创建客户端
    ///
    /// # 错误
    /// 根地址无效或 HTTP 客户端无法构建时返回错误
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let endpoints = Endpoints::from_config(config)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self { http, endpoints })
    }

    /// 获取完整文章列表
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        let url = self.endpoints.posts_url().map_err(FetchError::Url)?;
        self.get_json(url).await
    }

    /// 获取指定文章的详情
    pub async fn fetch_post_detail(&self, id: u64) -> Result<Post, FetchError> {
        let url = self.endpoints.post_detail_url(id).map_err(FetchError::Url)?;
        self.get_json(url).await
    }

    /// 获取指定文章的评论集合
    pub async fn fetch_comments(&self, id: u64) -> Result<Vec<CommentRecord>, FetchError> {
        let url = self.endpoints.comments_url(id).map_err(FetchError::Url)?;
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let url_str = url.to_string();
        log::debug!("GET {}", url_str);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_str,
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network {
                url: url_str.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
            url: url_str,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> AppConfig {
        AppConfig {
            api_base_url: server.uri(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_endpoints_substitute_id() {
        let config = AppConfig {
            api_base_url: "https://example.com/api".to_string(),
            ..AppConfig::default()
        };
        let endpoints = Endpoints::from_config(&config).unwrap();
        assert_eq!(
            endpoints.posts_url().unwrap().as_str(),
            "https://example.com/api/posts"
        );
        assert_eq!(
            endpoints.post_detail_url(3).unwrap().as_str(),
            "https://example.com/api/posts/3"
        );
        assert_eq!(
            endpoints.comments_url(3).unwrap().as_str(),
            "https://example.com/api/posts/3/comments"
        );
    }

    #[test]
    fn test_endpoints_tolerate_leading_slash() {
        let config = AppConfig {
            api_base_url: "https://example.com/".to_string(),
            comments_path: "/comments/{id}".to_string(),
            ..AppConfig::default()
        };
        let endpoints = Endpoints::from_config(&config).unwrap();
        assert_eq!(
            endpoints.comments_url(9).unwrap().as_str(),
            "https://example.com/comments/9"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = AppConfig {
            api_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            Endpoints::from_config(&config),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_posts_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"userId": 1, "id": 1, "title": "foo bar", "body": "b1"},
                {"userId": 1, "id": 2, "title": "baz", "body": "b2"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = PostsClient::new(&config_for(&server)).unwrap();
        let posts = client.fetch_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "foo bar");
        assert_eq!(posts[1].id, 2);
    }

    #[tokio::test]
    async fn test_fetch_detail_and_comments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"id": 5, "title": "five", "body": "body five"}
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts/5/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "postId": 5, "body": "c1"},
                {"id": 2, "postId": 5, "body": "c2"},
                {"id": 3, "postId": 5, "body": "c3"}
            ])))
            .mount(&server)
            .await;

        let client = PostsClient::new(&config_for(&server)).unwrap();
        let detail = client.fetch_post_detail(5).await.unwrap();
        assert_eq!(detail.title, "five");
        let comments = client.fetch_comments(5).await.unwrap();
        assert_eq!(comments.len(), 3);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = PostsClient::new(&config_for(&server)).unwrap();
        let err = client.fetch_posts().await.unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 503),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": 1,"))
            .mount(&server)
            .await;

        let client = PostsClient::new(&config_for(&server)).unwrap();
        assert!(matches!(
            client.fetch_posts().await,
            Err(FetchError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // 绑定后立即释放，得到一个无人监听的本地端口
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = AppConfig {
            api_base_url: format!("http://127.0.0.1:{}", port),
            request_timeout_secs: 2,
            ..AppConfig::default()
        };
        let client = PostsClient::new(&config).unwrap();
        assert!(matches!(
            client.fetch_posts().await,
            Err(FetchError::Network { .. })
        ));
    }
}
