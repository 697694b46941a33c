//! Data-transfer types for the backend REST API.
//!
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};

// =============================================================================
// Envelopes
// =============================================================================

/// Wrapper the backend puts around most payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Untyped acknowledgement returned by create/update/delete endpoints.
pub type Ack = serde_json::Value;

// =============================================================================
// Auth API Types
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response. `data` holds the session token on success.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Reset-password result. Failures are reported here rather than as errors.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordOutcome {
    pub ok: bool,
    pub status: u16,
    pub data: serde_json::Value,
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub license_expiration_date: String,
    pub is_active: bool,
}

// =============================================================================
// Vehicles
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub capacity_kg: f64,
    pub available: bool,
    pub current_mileage: f64,
    pub next_maintenance_mileage: f64,
    pub is_active: bool,
}

impl Vehicle {
    /// Whether the odometer has reached the next scheduled maintenance.
    pub fn maintenance_due(&self) -> bool {
        self.current_mileage >= self.next_maintenance_mileage
    }
}

/// Partial vehicle for create and update calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_maintenance_mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub submission_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub total_amount: f64,
    #[serde(default)]
    pub details: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub submission_id: i64,
    pub origin: String,
    pub destination: String,
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignOrderPayload {
    pub user_id: i64,
    pub vehicle_id: i64,
}

/// Kind of cargo an order carries, as the backend names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CargoType {
    Move,
    Cargo,
    Corporate,
}

impl CargoType {
    /// Label shown to console users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Move => "mudanza",
            Self::Cargo => "flete",
            Self::Corporate => "empresarial",
        }
    }
}

// =============================================================================
// Forms and submissions
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: i64,
    #[serde(default)]
    pub question_id: Option<i64>,
    pub option: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionType {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub question: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub options: Option<Vec<QuestionOption>>,
    pub is_active: bool,
    pub position: i64,
}

/// Body for creating or updating a question.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub submission_id: i64,
    pub question: Question,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub question_options: Option<Vec<QuestionOption>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Cancelled,
    Approved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub submitted_at: String,
    pub status: SubmissionStatus,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCount {
    pub question_id: i64,
    pub option_id: i64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub total_submissions: u64,
    pub submissions_by_status: Vec<StatusCount>,
    pub answers_by_question: Vec<AnswerCount>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusUpdate {
    pub status: SubmissionStatus,
}

// =============================================================================
// Expenses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseType {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: String,
    pub type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_type: Option<String>,
    pub temporal_employee: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Option<f64>,
}

// =============================================================================
// Finance
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub amount: f64,
    pub category: String,
    pub payment_method: String,
    pub responsible: String,
    pub description: String,
}

/// Query parameters accepted by the finance listing and summary endpoints.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Inclusive date window, `YYYY-MM-DD` on both ends.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

// =============================================================================
// Reports and KPIs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverReport {
    pub driver_name: String,
    pub total_orders: u64,
    pub orders_per_week: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceGoal {
    pub id: i64,
    pub order_goal: f64,
    pub utility_goal: f64,
    pub average_per_order_goal: f64,
    pub travel_goal: f64,
    pub delivery_goal: f64,
    pub achievement_rate_goal: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceGoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utility_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_per_order_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement_rate_goal: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vehicle_from_backend_json() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": 3,
            "brand": "Volvo",
            "model": "FH",
            "licensePlate": "ABC-123",
            "capacityKg": 18000,
            "available": true,
            "currentMileage": 120500,
            "nextMaintenanceMileage": 120000,
            "isActive": true
        }))
        .unwrap();

        assert_eq!(vehicle.license_plate, "ABC-123");
        assert!(vehicle.maintenance_due());
    }

    #[test]
    fn test_partial_payload_omits_unset_fields() {
        let payload = VehiclePayload {
            available: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(payload).unwrap(), json!({ "available": false }));
    }

    #[test]
    fn test_cargo_labels() {
        assert_eq!(CargoType::Move.label(), "mudanza");
        assert_eq!(CargoType::Cargo.label(), "flete");
        assert_eq!(
            serde_json::to_value(CargoType::Corporate).unwrap(),
            json!("corporate")
        );
    }

    #[test]
    fn test_submission_status_wire_format() {
        let update = StatusUpdate {
            status: SubmissionStatus::Cancelled,
        };
        assert_eq!(
            serde_json::to_value(update).unwrap(),
            json!({ "status": "cancelled" })
        );
    }
}
