//! Report and KPI endpoints. Chart series are returned as raw JSON; their
//! shape is owned by whichever view renders them.

use reqwest::Method;
use serde_json::Value;

use super::{Client, MaybeEnveloped};
use crate::error::Result;
use crate::types::{Ack, DateRange, DriverReport, PerformanceGoal, PerformanceGoalUpdate};

// =============================================================================
// Reports API
// =============================================================================

/// Reports API client.
#[derive(Debug)]
pub struct ReportsApi<'a> {
    pub(super) client: &'a Client,
}

impl ReportsApi<'_> {
    async fn get(&self, path: &str, range: Option<&DateRange>) -> Result<Value> {
        let mut request = self.client.request(Method::GET, path)?;
        if let Some(range) = range {
            request = request.query(range);
        }
        Client::send(request).await
    }

    pub async fn financial(&self) -> Result<Value> {
        self.get("/api/reports/financial", None).await
    }

    pub async fn financial_by_date(&self, range: &DateRange) -> Result<Value> {
        self.get("/api/reports/financial/date", Some(range)).await
    }

    pub async fn total_income(&self) -> Result<Value> {
        self.get("/api/reports/income", None).await
    }

    pub async fn income_per_month(&self) -> Result<Value> {
        self.get("/api/reports/financial/monthly", None).await
    }

    pub async fn expenses_per_month(&self) -> Result<Value> {
        self.get("/api/reports/expenses/monthly", None).await
    }

    pub async fn expenses_per_type(&self) -> Result<Value> {
        self.get("/api/reports/expenses/grouped", None).await
    }

    pub async fn order_type_distribution(&self) -> Result<Value> {
        self.get("/api/reports/financial/order-type", None).await
    }

    /// Financial control income, optionally restricted to a date range.
    pub async fn control_income(&self, range: Option<&DateRange>) -> Result<Value> {
        self.get("/api/reports/financial-control-income", range).await
    }

    /// Financial control spending, optionally restricted to a date range.
    pub async fn control_spending(&self, range: Option<&DateRange>) -> Result<Value> {
        self.get("/api/reports/financial-control-spending", range).await
    }

    pub async fn drivers(&self) -> Result<Vec<DriverReport>> {
        let request = self.client.request(Method::GET, "/api/reports/drivers")?;
        let drivers: MaybeEnveloped<Vec<DriverReport>> = Client::send(request).await?;
        Ok(drivers.into_inner())
    }

    /// Performance data; `filters` are passed through as query parameters.
    pub async fn performance(&self, filters: &[(&str, &str)]) -> Result<Value> {
        let request = self
            .client
            .request(Method::GET, "/api/reports/performance")?
            .query(filters);
        Client::send(request).await
    }
}

// =============================================================================
// KPI API
// =============================================================================

/// KPI and performance-goal API client.
#[derive(Debug)]
pub struct KpiApi<'a> {
    pub(super) client: &'a Client,
}

impl KpiApi<'_> {
    async fn get(&self, path: &str) -> Result<Value> {
        let request = self.client.request(Method::GET, path)?;
        Client::send(request).await
    }

    pub async fn current(&self) -> Result<Value> {
        self.get("/api/kpi/current").await
    }

    pub async fn goals(&self) -> Result<PerformanceGoal> {
        let request = self.client.request(Method::GET, "/api/kpi/goals")?;
        let goal: MaybeEnveloped<PerformanceGoal> = Client::send(request).await?;
        Ok(goal.into_inner())
    }

    pub async fn update_goal(&self, update: &PerformanceGoalUpdate) -> Result<Ack> {
        let request = self.client.request(Method::PUT, "/api/kpi/goals")?.json(update);
        Client::send(request).await
    }

    pub async fn quotations_per_month(&self) -> Result<Value> {
        self.get("/api/reports/completed-quotations").await
    }

    pub async fn quotations_per_status(&self) -> Result<Value> {
        self.get("/api/reports/quotations-status").await
    }

    pub async fn drivers_performance(&self) -> Result<Value> {
        self.get("/api/reports/drivers-performance").await
    }

    pub async fn drivers_participation(&self) -> Result<Value> {
        self.get("/api/reports/drivers-participation").await
    }
}
