//! Admin analytics. Every endpoint is served from the client's TTL cache
//! when a fresh entry exists.

use std::rc::Rc;

use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AnalyticsOverview, StatusBreakdown, Trend, Workload};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn analytics_overview(&self) -> Result<Rc<AnalyticsOverview>, ApiError> {
        if let Some(hit) = self.analytics_cache().overview.get(&()) {
            tracing::debug!("analytics overview: cache hit");
            return Ok(hit);
        }
        let fresh: AnalyticsOverview = self.get("/analytics/overview").await?;
        Ok(self.analytics_cache().overview.insert((), fresh))
    }

    pub async fn projects_by_status(&self) -> Result<Rc<StatusBreakdown>, ApiError> {
        if let Some(hit) = self.analytics_cache().projects_by_status.get(&()) {
            tracing::debug!("projects by status: cache hit");
            return Ok(hit);
        }
        let fresh: StatusBreakdown = self.get("/analytics/projects-by-status").await?;
        Ok(self.analytics_cache().projects_by_status.insert((), fresh))
    }

    /// Daily created/completed counts over the last `days` days.
    pub async fn tasks_trend(&self, days: u32) -> Result<Rc<Trend>, ApiError> {
        if let Some(hit) = self.analytics_cache().tasks_trend.get(&days) {
            tracing::debug!("tasks trend ({days}d): cache hit");
            return Ok(hit);
        }
        let fresh: Trend = self
            .get_with_query(
                "/analytics/tasks-trend",
                vec![("days".to_string(), days.to_string())],
            )
            .await?;
        Ok(self.analytics_cache().tasks_trend.insert(days, fresh))
    }

    pub async fn workload(&self) -> Result<Rc<Vec<Workload>>, ApiError> {
        if let Some(hit) = self.analytics_cache().workload.get(&()) {
            tracing::debug!("workload: cache hit");
            return Ok(hit);
        }
        let fresh: Vec<Workload> = self.get_list("/analytics/workload").await?;
        Ok(self.analytics_cache().workload.insert((), fresh))
    }

    /// Drop every cached analytics response.
    pub fn invalidate_analytics(&self) {
        self.analytics_cache().invalidate();
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::TimeDelta;
    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY};

    use crate::cache::ManualClock;
    use crate::client::ApiClient;
    use crate::mock::MockTransport;
    use crate::transport::Method;

    fn cached_client() -> (ApiClient<MockTransport, MemoryStore>, MockTransport, ManualClock) {
        let mock = MockTransport::new();
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "t").unwrap();
        let clock = ManualClock::new();
        let client = ApiClient::new(mock.clone(), store)
            .with_analytics_cache(300, Rc::new(clock.clone()));
        (client, mock, clock)
    }

    #[tokio::test]
    async fn test_same_rc_within_ttl_then_refetch() {
        let (client, mock, clock) = cached_client();
        mock.on_json(Method::Get, "/analytics/overview", json!({ "totalProjects": 3 }));

        let first = client.analytics_overview().await.unwrap();
        clock.advance(TimeDelta::seconds(120));
        let second = client.analytics_overview().await.unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(mock.count(Method::Get, "/analytics/overview"), 1);

        clock.advance(TimeDelta::seconds(180));
        let third = client.analytics_overview().await.unwrap();
        assert!(!Rc::ptr_eq(&first, &third));
        assert_eq!(third.total_projects, 3);
        assert_eq!(mock.count(Method::Get, "/analytics/overview"), 2);
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch() {
        let (client, mock, _) = cached_client();
        mock.on_json(Method::Get, "/analytics/workload", json!([]));
        client.workload().await.unwrap();
        client.workload().await.unwrap();
        assert_eq!(mock.count(Method::Get, "/analytics/workload"), 1);

        client.invalidate_analytics();
        client.workload().await.unwrap();
        assert_eq!(mock.count(Method::Get, "/analytics/workload"), 2);
    }

    #[tokio::test]
    async fn test_trend_cached_per_window() {
        let (client, mock, _) = cached_client();
        mock.on_json(
            Method::Get,
            "/analytics/tasks-trend",
            json!([{ "date": "2024-05-01", "completed": 2 }]),
        );
        client.tasks_trend(7).await.unwrap();
        client.tasks_trend(30).await.unwrap();
        client.tasks_trend(7).await.unwrap();
        assert_eq!(mock.count(Method::Get, "/analytics/tasks-trend"), 2);
        let query = mock.last_request().unwrap().query;
        assert_eq!(query, vec![("days".to_string(), "30".to_string())]);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let (client, mock, _) = cached_client();
        mock.on(Method::Get, "/analytics/projects-by-status", 503, "")
            .on_json(Method::Get, "/analytics/projects-by-status", json!({ "EN_COURS": 1 }));
        assert!(client.projects_by_status().await.is_err());
        let breakdown = client.projects_by_status().await.unwrap();
        assert_eq!(breakdown.0[0].count, 1);
    }
}
