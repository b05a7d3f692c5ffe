// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::gateway::{ConnectionTestResult, GatewayError, ProjectGateway};
use crate::domain::models::project::{Project, ProjectSnapshot};
use crate::infrastructure::gateway::endpoint_store::EndpointStore;
use async_trait::async_trait;
use metrics::counter;
use parking_lot::RwLock;
use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// 远端错误响应体
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// 基于 HTTP 的持久化网关
///
/// 端点在构造时从 `EndpointStore` 读取，之后只通过 `set_api_url` 修改。
pub struct HttpGateway {
    /// HTTP客户端
    client: Client,
    /// 当前端点
    endpoint: RwLock<Option<String>>,
    /// 端点持久化
    store: Arc<dyn EndpointStore>,
}

impl HttpGateway {
    /// 创建网关
    ///
    /// # 参数
    ///
    /// * `store` - 端点存储
    /// * `timeout` - 单次请求超时时间，连接测试同样受其约束
    ///
    /// # 返回值
    ///
    /// * `Ok(HttpGateway)` - 网关实例
    /// * `Err(reqwest::Error)` - HTTP 客户端初始化失败
    pub fn new(store: Arc<dyn EndpointStore>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("seopulse/", env!("CARGO_PKG_VERSION"))),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        let endpoint = match store.load() {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!("Failed to read saved endpoint, starting offline: {}", e);
                None
            }
        };
        if let Some(url) = &endpoint {
            info!("Using saved endpoint {}", url);
        }

        Ok(Self {
            client,
            endpoint: RwLock::new(endpoint),
            store,
        })
    }

    fn configured(&self) -> Result<String, GatewayError> {
        self.endpoint
            .read()
            .clone()
            .ok_or_else(|| GatewayError::Connectivity("no endpoint configured".to_string()))
    }
}

/// 在端点路径后追加资源段
///
/// 段会被百分号编码，因此任意项目ID都可安全地放入路径。
pub fn resource_url(base: &str, segments: &[&str]) -> Result<Url, GatewayError> {
    let mut url = Url::parse(base.trim())
        .map_err(|e| GatewayError::Validation(format!("invalid endpoint URL '{base}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(GatewayError::Validation(format!(
            "unsupported endpoint scheme '{}'",
            url.scheme()
        )));
    }
    url.path_segments_mut()
        .map_err(|_| GatewayError::Validation(format!("endpoint '{base}' cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Connectivity(format!("request timed out: {err}"))
    } else if err.is_decode() {
        GatewayError::Validation(format!("malformed response: {err}"))
    } else {
        GatewayError::Connectivity(format!("endpoint unreachable: {err}"))
    }
}

async fn check_status(resp: Response) -> Result<Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let fallback = status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string();
    let message = resp
        .json::<ErrorBody>()
        .await
        .map(|b| b.error)
        .unwrap_or(fallback);

    Err(match status {
        StatusCode::CONFLICT => GatewayError::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            GatewayError::Validation(message)
        }
        other => GatewayError::Remote {
            status: other.as_u16(),
            message,
        },
    })
}

fn record_failure(operation: &'static str, err: &GatewayError) {
    counter!("gateway_failures_total", "operation" => operation).increment(1);
    debug!("Gateway {} failed: {}", operation, err);
}

#[async_trait]
impl ProjectGateway for HttpGateway {
    fn api_url(&self) -> Option<String> {
        self.endpoint.read().clone()
    }

    async fn set_api_url(&self, url: &str) -> Result<(), GatewayError> {
        let url = url.trim();
        self.store.save(url)?;
        *self.endpoint.write() = Some(url.to_string());
        info!("Endpoint saved: {}", url);
        Ok(())
    }

    async fn test_connection(&self, url: &str) -> ConnectionTestResult {
        let target = match resource_url(url, &["projects"]) {
            Ok(target) => target,
            Err(e) => return ConnectionTestResult::failed(e.to_string()),
        };

        let resp = match self.client.get(target).send().await {
            Ok(resp) => resp,
            Err(e) => return ConnectionTestResult::failed(transport_error(e).to_string()),
        };

        let resp = match check_status(resp).await {
            Ok(resp) => resp,
            Err(e) => return ConnectionTestResult::failed(e.to_string()),
        };

        match resp.json::<Vec<serde_json::Value>>().await {
            Ok(list) => {
                ConnectionTestResult::ok(format!("Connected. {} projects found.", list.len()))
            }
            Err(e) => ConnectionTestResult::failed(format!(
                "endpoint responded but did not return a project list: {e}"
            )),
        }
    }

    async fn get_projects(&self) -> Result<Vec<Project>, GatewayError> {
        let result: Result<Vec<Project>, GatewayError> = async {
            let target = resource_url(&self.configured()?, &["projects"])?;
            let resp = self.client.get(target).send().await.map_err(transport_error)?;
            let mut projects: Vec<Project> = check_status(resp)
                .await?
                .json()
                .await
                .map_err(transport_error)?;

            // Ordering is part of the contract even if the remote store skips it
            projects.sort_by(|a, b| b.last_checked.cmp(&a.last_checked));
            for p in &mut projects {
                p.history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            }
            Ok(projects)
        }
        .await;

        if let Err(e) = &result {
            record_failure("get_projects", e);
        }
        result
    }

    async fn create_or_update_project(&self, project: &Project) -> Result<(), GatewayError> {
        let result: Result<(), GatewayError> = async {
            let target = resource_url(&self.configured()?, &["projects"])?;
            let resp = self
                .client
                .post(target)
                .json(project)
                .send()
                .await
                .map_err(transport_error)?;
            check_status(resp).await.map(|_| ())
        }
        .await;

        if let Err(e) = &result {
            record_failure("create_or_update_project", e);
        }
        result
    }

    async fn append_snapshot(&self, snapshot: &ProjectSnapshot) -> Result<(), GatewayError> {
        let result: Result<(), GatewayError> = async {
            let target = resource_url(&self.configured()?, &["snapshots"])?;
            let resp = self
                .client
                .post(target)
                .json(snapshot)
                .send()
                .await
                .map_err(transport_error)?;
            check_status(resp).await.map(|_| ())
        }
        .await;

        if let Err(e) = &result {
            record_failure("append_snapshot", e);
        }
        result
    }

    async fn delete_project(&self, id: &str) -> Result<(), GatewayError> {
        let result: Result<(), GatewayError> = async {
            let target = resource_url(&self.configured()?, &["projects", id])?;
            let resp = self
                .client
                .delete(target)
                .send()
                .await
                .map_err(transport_error)?;
            check_status(resp).await.map(|_| ())
        }
        .await;

        if let Err(e) = &result {
            record_failure("delete_project", e);
        }
        result
    }
}
