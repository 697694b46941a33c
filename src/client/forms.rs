use reqwest::Method;

use super::{Client, MaybeEnveloped};
use crate::error::Result;
use crate::types::{
    Ack, CreateOrderPayload, Envelope, Question, QuestionPayload, QuestionType, StatusUpdate,
    Submission, SubmissionStats, SubmissionStatus,
};

// =============================================================================
// Forms API
// =============================================================================

/// Quote-request form (questions) API client.
#[derive(Debug)]
pub struct FormsApi<'a> {
    pub(super) client: &'a Client,
}

impl FormsApi<'_> {
    /// List every question, active or not.
    pub async fn questions(&self) -> Result<Vec<Question>> {
        let request = self.client.request(Method::GET, "/api/questions")?;
        let questions: MaybeEnveloped<Vec<Question>> = Client::send(request).await?;
        Ok(questions.into_inner())
    }

    /// List the questions currently shown on the public form.
    pub async fn active_questions(&self) -> Result<Vec<Question>> {
        let request = self.client.request(Method::GET, "/api/questions-active")?;
        let questions: MaybeEnveloped<Vec<Question>> = Client::send(request).await?;
        Ok(questions.into_inner())
    }

    pub async fn create_question(&self, payload: &QuestionPayload) -> Result<Ack> {
        let request = self.client.request(Method::POST, "/api/questions")?.json(payload);
        Client::send(request).await
    }

    pub async fn update_question(&self, id: i64, payload: &QuestionPayload) -> Result<Ack> {
        let request = self
            .client
            .request(Method::PUT, &format!("/api/questions/{id}"))?
            .json(payload);
        Client::send(request).await
    }

    pub async fn delete_question(&self, id: i64) -> Result<Ack> {
        let request = self
            .client
            .request(Method::DELETE, &format!("/api/questions/{id}"))?;
        Client::send(request).await
    }

    /// List question types. A `null` body counts as none.
    pub async fn question_types(&self) -> Result<Vec<QuestionType>> {
        let request = self.client.request(Method::GET, "/api/question-types")?;
        let types: Option<MaybeEnveloped<Vec<QuestionType>>> = Client::send(request).await?;
        Ok(types.map(MaybeEnveloped::into_inner).unwrap_or_default())
    }

    /// Add a selectable option to a question.
    pub async fn create_option(&self, question_id: i64, option: impl Into<String>) -> Result<Ack> {
        let body = serde_json::json!({ "option": option.into() });
        let request = self
            .client
            .request(Method::POST, &format!("/api/questions/{question_id}/options"))?
            .json(&body);
        Client::send(request).await
    }
}

// =============================================================================
// Submissions API
// =============================================================================

/// Form submissions API client.
#[derive(Debug)]
pub struct SubmissionsApi<'a> {
    pub(super) client: &'a Client,
}

impl SubmissionsApi<'_> {
    pub async fn create(&self, payload: &serde_json::Value) -> Result<Ack> {
        let request = self.client.request(Method::POST, "/api/submissions")?.json(payload);
        Client::send(request).await
    }

    pub async fn list(&self) -> Result<Vec<Submission>> {
        let request = self.client.request(Method::GET, "/api/form/submissions")?;
        let envelope: Envelope<Vec<Submission>> = Client::send(request).await?;
        Ok(envelope.data)
    }

    pub async fn get(&self, id: i64) -> Result<Submission> {
        let request = self
            .client
            .request(Method::GET, &format!("/api/form/submissions/{id}"))?;
        let envelope: Envelope<Submission> = Client::send(request).await?;
        Ok(envelope.data)
    }

    pub async fn stats(&self) -> Result<SubmissionStats> {
        let request = self.client.request(Method::GET, "/api/submissions-stats")?;
        Client::send(request).await
    }

    pub async fn update_status(&self, id: i64, status: SubmissionStatus) -> Result<Ack> {
        let request = self
            .client
            .request(Method::PUT, &format!("/api/submissions/{id}/status"))?
            .json(&StatusUpdate { status });
        Client::send(request).await
    }

    /// Accept a submission by turning it into an order.
    pub async fn accept(&self, order: &CreateOrderPayload) -> Result<Ack> {
        let request = self.client.request(Method::POST, "/api/orders")?.json(order);
        Client::send(request).await
    }

    /// Reject a submission (status becomes `cancelled`).
    pub async fn reject(&self, id: i64) -> Result<Ack> {
        let request = self
            .client
            .request(Method::PATCH, &format!("/api/form/submissions/{id}/status"))?
            .json(&StatusUpdate {
                status: SubmissionStatus::Cancelled,
            });
        Client::send(request).await
    }
}
