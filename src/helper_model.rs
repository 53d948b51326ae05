use serde_derive::{Deserialize, Serialize};
use crate::model;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WashlineError {
    TokenFormatError,
    InvalidToken,
    Validation(String),
    NotAllowed,
    Internal,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NextOfKinInput {
    pub name: String,
    pub phone: String,
    pub relationship: String,
    pub address: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub location_id: Option<i32>,
    pub address: Option<String>,
    pub cv_path: Option<String>,
    pub picture_path: Option<String>,
    #[serde(default)]
    pub next_of_kin: Vec<NextOfKinInput>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreateWasherRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub assigned_admin_id: Option<i32>,
    pub location_id: Option<i32>,
    pub hourly_rate: Option<f64>,
    pub bank_information: Option<String>,
    pub picture_path: Option<String>,
    #[serde(default)]
    pub next_of_kin: Vec<NextOfKinInput>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FilePath {
    pub file_path: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DeactivateUserRequest {
    pub user_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewLocationRequest {
    pub address: String,
    pub lga: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UpdateLocationRequest {
    pub location_id: i32,
    pub address: Option<String>,
    pub lga: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LocationIdBody {
    pub location_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LocationWorkers {
    pub admins: Vec<model::PublishUser>,
    pub washers: Vec<model::PublishUser>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    pub category: model::ServiceCategory,
    pub washer_commission_percentage: f64,
    pub company_commission_percentage: f64,
    pub max_washers_per_service: Option<i32>,
    pub commission_notes: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UpdateServiceRequest {
    pub service_id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub category: Option<model::ServiceCategory>,
    pub washer_commission_percentage: Option<f64>,
    pub company_commission_percentage: Option<f64>,
    pub max_washers_per_service: Option<i32>,
    pub commission_notes: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceIdBody {
    pub service_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CheckInServiceInput {
    pub service_id: i32,
    pub washer_id: i32,
    pub custom_price: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewCheckInRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub license_plate: String,
    pub vehicle_type: String,
    pub vehicle_color: String,
    pub vehicle_model: Option<String>,
    pub wash_type: model::WashType,
    pub valuable_items: String,
    pub security_code: Option<String>,
    pub user_code: Option<String>,
    pub check_in_process: Option<String>,
    pub services: Vec<CheckInServiceInput>,
    #[serde(default)]
    pub acknowledge_duplicates: bool,
}

// Body of the 409 reply when the plate was already checked in today. The
// operator re-submits the same payload with acknowledge_duplicates set.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DuplicatePlateReply {
    pub title: String,
    pub message: String,
    pub existing_check_ins: Vec<model::PublishCheckIn>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CheckInDetail {
    pub check_in: model::PublishCheckIn,
    pub services: Vec<model::CheckInService>,
    pub materials: Vec<model::CheckInMaterial>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CheckInIdBody {
    pub check_in_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CompleteCheckInRequest {
    pub check_in_id: i32,
    pub passcode: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PayCheckInRequest {
    pub check_in_id: i32,
    pub payment_method: model::PaymentMethod,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CancelCheckInRequest {
    pub check_in_id: i32,
    pub reason: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AssignWasherRequest {
    pub check_in_id: i32,
    pub washer_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MaterialUsageInput {
    pub material_id: i32,
    pub quantity_used: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogMaterialsRequest {
    pub check_in_id: i32,
    pub materials: Vec<MaterialUsageInput>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AssignToolRequest {
    pub washer_id: i32,
    pub tool_name: String,
    pub tool_type: String,
    pub quantity: i32,
    pub unit_value: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AssignMaterialRequest {
    pub washer_id: i32,
    pub material_name: String,
    pub material_type: String,
    pub quantity: i32,
    pub unit_value: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ReturnItemRequest {
    pub kind: String, // tool | material
    pub item_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WasherItems {
    pub tools: Vec<model::WasherTool>,
    pub materials: Vec<model::WasherMaterial>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UnreturnedItem {
    pub id: i32,
    pub kind: String,
    pub name: String,
    pub quantity: i32,
    pub unit_value: f64,
    pub value: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DeductionSummary {
    pub material_deductions: f64,
    pub tool_deductions: f64,
    pub total_deductions: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DeductionReply {
    pub deductions: DeductionSummary,
    pub unreturned_items: Vec<UnreturnedItem>,
    pub has_unreturned_tools: bool,
    pub available_earnings: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewPaymentRequestBody {
    pub requested_amount: f64,
    pub notes: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ReviewPaymentRequestBody {
    pub request_id: i32,
    pub action: String, // approve | reject | pay
    pub notes: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PaymentRequestIdBody {
    pub request_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct QualifyingCustomer {
    pub customer: model::Customer,
    pub actual_value: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewMilestoneRequest {
    pub name: String,
    pub description: Option<String>,
    pub milestone_type: model::MilestoneType,
    pub condition_operator: String,
    pub condition_value: f64,
    pub reward: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ClaimRewardRequest {
    pub achievement_id: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GrantBonusRequest {
    pub bonus_type: model::BonusType,
    pub recipient_id: i32,
    pub amount: f64,
    pub reason: String,
    pub milestone_id: Option<i32>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LocationStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub by_lga: Vec<LgaCount>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LgaCount {
    pub lga: String,
    pub count: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct IncomeSlice {
    pub amount: f64,
    pub check_ins: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DashboardSummary {
    pub today: IncomeSlice,
    pub this_week: IncomeSlice,
    pub this_month: IncomeSlice,
    pub pending_check_ins: i64,
    pub in_progress_check_ins: i64,
    pub completed_unpaid_check_ins: i64,
    pub pending_payment_request_total: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TopPerformer {
    pub user: model::PublishUser,
    pub total_earnings: f64,
}
