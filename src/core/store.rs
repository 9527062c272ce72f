// ============================================================================
// FaqDesk - 远程内容存储
// ============================================================================
//
// 文件: src/core/store.rs
// 职责: 管理接口的抽象与 HTTP 实现
// 边界:
//   - ✅ ContentStore 接口定义
//   - ✅ 基于 reqwest 的 HTTP 实现
//   - ✅ 非 2xx 响应到错误类型的映射
//   - ❌ 不应包含草稿状态
//   - ❌ 不应包含分页逻辑
//   - ❌ 不应包含终端输出
//
// ============================================================================

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, IF_MATCH};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashMap};

use crate::core::error::{EditorError, EditorResult, GENERIC_SERVER_ERROR};
use crate::models::config::ApiConfig;
use crate::models::locale::Locale;
use crate::models::record::{
    AllTranslations, CoverageResponse, Created, ErrorBody, ListResponse, RecordId, RecordSummary,
    Translation, TranslationPayload, Updated,
};

/// 每条记录已保存的语言集合
pub type CoverageMap = HashMap<RecordId, BTreeSet<Locale>>;

/// 按 (记录 ID, 语言) 组织的远程内容存储
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// `GET ?locale=<code>` 获取基础列表
    async fn list(&self, locale: Locale) -> EditorResult<Vec<RecordSummary>>;

    /// `GET ?id=<id>&all=true` 获取记录全部翻译
    async fn translations(&self, id: &RecordId) -> EditorResult<Vec<Translation>>;

    /// 批量获取多条记录的语言覆盖情况
    async fn coverage(&self, ids: &[RecordId]) -> EditorResult<CoverageMap>;

    /// `POST` 创建记录
    async fn create(&self, payload: &TranslationPayload) -> EditorResult<Created>;

    /// `PUT ?id=<id>` 更新某个语言的翻译
    async fn update(
        &self,
        id: &RecordId,
        payload: &TranslationPayload,
        if_match: Option<&str>,
    ) -> EditorResult<Updated>;

    /// `DELETE ?id=<id>` 删除记录及其全部翻译
    async fn delete(&self, id: &RecordId) -> EditorResult<()>;
}

/// 根据状态码和响应体构建错误
pub(crate) fn error_from_status(status: u16, body: &str) -> EditorError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());

    match status {
        404 => EditorError::NotFound(message),
        409 | 412 => EditorError::Conflict(message),
        _ => EditorError::Server { status, message },
    }
}

/// 将翻译列表转换为语言集合
pub(crate) fn locales_of(translations: &[Translation]) -> BTreeSet<Locale> {
    translations.iter().map(|t| t.locale).collect()
}

/// 基于 HTTP 的管理接口客户端
#[derive(Debug, Clone)]
pub struct HttpContentStore {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpContentStore {
    /// 根据接口配置创建客户端
    pub fn new(api: &ApiConfig) -> EditorResult<Self> {
        let endpoint = build_endpoint(&api.base_url, &api.resource)?;

        let mut builder = Client::builder();
        if let Some(timeout) = api.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EditorError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            token: api.token.clone().filter(|token| !token.trim().is_empty()),
        })
    }

    /// 资源地址
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request(&self, method: Method, query: &[(&str, &str)]) -> RequestBuilder {
        let mut url = self.endpoint.clone();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        tracing::debug!(%method, %url, "admin api request");

        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }
}

impl HttpContentStore {
    fn coverage_request(&self, ids: &[RecordId]) -> RequestBuilder {
        let joined = ids
            .iter()
            .map(RecordId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.request(Method::GET, &[("ids", joined.as_str()), ("coverage", "true")])
    }

    fn create_request(&self, payload: &TranslationPayload) -> RequestBuilder {
        self.request(Method::POST, &[]).json(payload)
    }

    fn update_request(
        &self,
        id: &RecordId,
        payload: &TranslationPayload,
        if_match: Option<&str>,
    ) -> RequestBuilder {
        let builder = self
            .request(Method::PUT, &[("id", id.as_str())])
            .json(payload);
        match if_match {
            Some(version) => builder.header(IF_MATCH, version),
            None => builder,
        }
    }

    fn delete_request(&self, id: &RecordId) -> RequestBuilder {
        self.request(Method::DELETE, &[("id", id.as_str())])
    }
}

/// 批量覆盖率接口不存在或响应无法识别时，改为 `Unsupported` 以便逐条获取
pub(crate) fn coverage_unsupported(err: EditorError) -> EditorError {
    match err {
        EditorError::NotFound(message) | EditorError::Decode(message) => {
            EditorError::Unsupported(message)
        }
        EditorError::Server { status, message } if matches!(status, 400 | 405 | 501) => {
            EditorError::Unsupported(message)
        }
        other => other,
    }
}

/// 按请求顺序整理覆盖率，未知语言代码忽略，缺失的记录视为无翻译
pub(crate) fn coverage_from_response(ids: &[RecordId], response: &CoverageResponse) -> CoverageMap {
    ids.iter()
        .map(|id| {
            let locales = response
                .coverage
                .get(id.as_str())
                .map(|codes| {
                    codes
                        .iter()
                        .filter_map(|code| code.parse::<Locale>().ok())
                        .collect()
                })
                .unwrap_or_default();
            (id.clone(), locales)
        })
        .collect()
}

/// 拼接 `<base_url>/api/admin/<resource>`
pub fn build_endpoint(base_url: &str, resource: &str) -> EditorResult<Url> {
    let resource = resource.trim().trim_matches('/');
    if resource.is_empty() {
        return Err(EditorError::InvalidEndpoint(
            "resource name is empty".to_string(),
        ));
    }
    let raw = format!(
        "{}/api/admin/{}",
        base_url.trim().trim_end_matches('/'),
        resource
    );
    Url::parse(&raw).map_err(|err| EditorError::InvalidEndpoint(format!("{}: {}", raw, err)))
}

async fn send_raw(builder: RequestBuilder) -> EditorResult<String> {
    let response = builder
        .send()
        .await
        .map_err(|err| EditorError::Transport(err.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| EditorError::Transport(err.to_string()))?;

    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), %body, "admin api error response");
        return Err(error_from_status(status.as_u16(), &body));
    }
    Ok(body)
}

async fn request_json<T: DeserializeOwned>(builder: RequestBuilder) -> EditorResult<T> {
    let body = send_raw(builder).await?;
    serde_json::from_str(&body).map_err(|err| EditorError::Decode(err.to_string()))
}

/// 响应体可以为空的请求
async fn request_optional_json<T: DeserializeOwned + Default>(
    builder: RequestBuilder,
) -> EditorResult<T> {
    let body = send_raw(builder).await?;
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&body).map_err(|err| EditorError::Decode(err.to_string()))
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn list(&self, locale: Locale) -> EditorResult<Vec<RecordSummary>> {
        let response: ListResponse =
            request_json(self.request(Method::GET, &[("locale", locale.code())])).await?;
        Ok(response.into_rows())
    }

    async fn translations(&self, id: &RecordId) -> EditorResult<Vec<Translation>> {
        let response: AllTranslations = request_json(
            self.request(Method::GET, &[("id", id.as_str()), ("all", "true")]),
        )
        .await?;
        Ok(response.translations)
    }

    async fn coverage(&self, ids: &[RecordId]) -> EditorResult<CoverageMap> {
        if ids.is_empty() {
            return Ok(CoverageMap::new());
        }
        let response: CoverageResponse = request_json(self.coverage_request(ids))
            .await
            .map_err(coverage_unsupported)?;
        Ok(coverage_from_response(ids, &response))
    }

    async fn create(&self, payload: &TranslationPayload) -> EditorResult<Created> {
        request_json(self.create_request(payload)).await
    }

    async fn update(
        &self,
        id: &RecordId,
        payload: &TranslationPayload,
        if_match: Option<&str>,
    ) -> EditorResult<Updated> {
        request_optional_json(self.update_request(id, payload, if_match)).await
    }

    async fn delete(&self, id: &RecordId) -> EditorResult<()> {
        send_raw(self.delete_request(id)).await?;
        Ok(())
    }
}
