use reqwest::Method;

use super::{Client, MaybeEnveloped};
use crate::error::Result;
use crate::types::{Ack, Expense, ExpenseType, FinanceFilters, FinancialRecord};

// =============================================================================
// Expenses API
// =============================================================================

/// Expenses API client.
#[derive(Debug)]
pub struct ExpensesApi<'a> {
    pub(super) client: &'a Client,
}

impl ExpensesApi<'_> {
    pub async fn list(&self) -> Result<Vec<Expense>> {
        let request = self.client.request(Method::GET, "/api/expenses")?;
        let expenses: MaybeEnveloped<Vec<Expense>> = Client::send(request).await?;
        Ok(expenses.into_inner())
    }

    pub async fn types(&self) -> Result<Vec<ExpenseType>> {
        let request = self.client.request(Method::GET, "/api/expense-types")?;
        let types: MaybeEnveloped<Vec<ExpenseType>> = Client::send(request).await?;
        Ok(types.into_inner())
    }

    pub async fn create(&self, expense: &Expense) -> Result<Ack> {
        let request = self.client.request(Method::POST, "/api/expenses")?.json(expense);
        Client::send(request).await
    }

    pub async fn create_type(&self, name: impl Into<String>) -> Result<Ack> {
        let body = serde_json::json!({ "type": name.into() });
        let request = self.client.request(Method::POST, "/api/expense-types")?.json(&body);
        Client::send(request).await
    }

    pub async fn update(&self, id: i64, expense: &Expense) -> Result<Ack> {
        let request = self
            .client
            .request(Method::PUT, &format!("/api/expenses/{id}"))?
            .json(expense);
        Client::send(request).await
    }
}

// =============================================================================
// Financial Records API
// =============================================================================

/// Financial records API client.
#[derive(Debug)]
pub struct FinanceApi<'a> {
    pub(super) client: &'a Client,
}

impl FinanceApi<'_> {
    /// List records matching `filters`. Unset filters are not sent.
    pub async fn records(&self, filters: &FinanceFilters) -> Result<Vec<FinancialRecord>> {
        let request = self
            .client
            .request(Method::GET, "/api/financial-records")?
            .query(filters);
        let records: MaybeEnveloped<Vec<FinancialRecord>> = Client::send(request).await?;
        Ok(records.into_inner())
    }

    pub async fn create(&self, record: &FinancialRecord) -> Result<Ack> {
        let request = self
            .client
            .request(Method::POST, "/api/financial-records")?
            .json(record);
        Client::send(request).await
    }

    pub async fn update(&self, id: i64, record: &FinancialRecord) -> Result<Ack> {
        let request = self
            .client
            .request(Method::PUT, &format!("/api/financial-records/{id}"))?
            .json(record);
        Client::send(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Ack> {
        let request = self
            .client
            .request(Method::DELETE, &format!("/api/financial-records/{id}"))?;
        Client::send(request).await
    }

    /// Income/expense totals for the filtered period.
    pub async fn summary(&self, filters: &FinanceFilters) -> Result<serde_json::Value> {
        let request = self
            .client
            .request(Method::GET, "/api/financial-summary")?
            .query(filters);
        Client::send(request).await
    }
}
