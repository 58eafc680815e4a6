use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{ApiError, JournalApi};
use crate::config::Config;
use crate::models::{
    AnalyticsSummary, Checklist, CloseTradeRequest, NewTradePayload, SentinelReport,
    SentinelRequest, Trade,
};

/// `JournalApi` over the backend's REST interface.
pub struct HttpJournalApi {
    client: Client,
    base_url: Url,
}

impl HttpJournalApi {
    pub fn new(cfg: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(&cfg.backend_url)
            .map_err(|e| ApiError::Config(format!("{}: {}", cfg.backend_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "{} cannot be used as a base url",
                cfg.backend_url
            )));
        }

        let client = Client::builder()
            .timeout(cfg.request_timeout())
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Config(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!("Backend responded {}: {}", status, body);
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl JournalApi for HttpJournalApi {
    async fn fetch_checklist(&self, user_id: &str) -> Result<Checklist, ApiError> {
        let url = self.endpoint(&["api", "checklist", user_id])?;
        debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    async fn fetch_analytics(
        &self,
        user_id: &str,
        period_days: u32,
    ) -> Result<AnalyticsSummary, ApiError> {
        let url = self.endpoint(&["api", "analytics", "summary"])?;
        debug!("GET {} user={} period={}d", url, user_id, period_days);
        let req = self.client.get(url).query(&[
            ("user_id", user_id.to_string()),
            ("period_days", period_days.to_string()),
        ]);
        self.send(req).await
    }

    async fn create_trade(&self, payload: &NewTradePayload) -> Result<Trade, ApiError> {
        let url = self.endpoint(&["api", "trades"])?;
        debug!("POST {} {} {}", url, payload.side, payload.ticker_pair);
        self.send(self.client.post(url).json(payload)).await
    }

    async fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>, ApiError> {
        let url = self.endpoint(&["api", "trades"])?;
        debug!("GET {} user={}", url, user_id);
        self.send(self.client.get(url).query(&[("user_id", user_id)]))
            .await
    }

    async fn close_trade(
        &self,
        trade_id: &str,
        req: &CloseTradeRequest,
    ) -> Result<Trade, ApiError> {
        let url = self.endpoint(&["api", "trades", trade_id, "close"])?;
        debug!("POST {} exit={}", url, req.exit_price);
        self.send(self.client.post(url).json(req)).await
    }

    async fn analyze(&self, req: &SentinelRequest) -> Result<SentinelReport, ApiError> {
        let url = self.endpoint(&["api", "sentinel", "analyze"])?;
        debug!("POST {} last_n={}", url, req.last_n);
        self.send(self.client.post(url).json(req)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpJournalApi {
        HttpJournalApi::new(&Config::default().with_backend_url(base)).unwrap()
    }

    #[test]
    fn endpoints_join_under_base() {
        let api = api("http://localhost:8000");
        let url = api.endpoint(&["api", "trades", "abc", "close"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/trades/abc/close");
    }

    #[test]
    fn endpoints_keep_base_path_prefix() {
        let api = api("https://example.com/journal/");
        let url = api.endpoint(&["api", "checklist", "demo-user"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/journal/api/checklist/demo-user");
    }

    #[test]
    fn path_segments_are_encoded() {
        let api = api("http://localhost:8000");
        let url = api.endpoint(&["api", "checklist", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/checklist/a%2Fb%20c");
    }

    #[test]
    fn rejects_unparseable_base() {
        let cfg = Config::default().with_backend_url("not a url");
        assert!(matches!(HttpJournalApi::new(&cfg), Err(ApiError::Config(_))));
    }
}
