use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// Diesel requires us to define a custom mapping between the Rust enum
// and the database type, if we are not using string.
use crate::schema::*;
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::{AsExpression, FromSqlRow};
use std::io::Write;
use std::str::FromStr;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::UserRoleEnum)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    CarWasher,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::CheckInStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    Pending,
    InProgress,
    Completed,
    Paid,
    Cancelled,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::WashTypeEnum)]
#[serde(rename_all = "snake_case")]
pub enum WashType {
    Instant,
    Delayed,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::PaymentStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::PaymentMethodEnum)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pos,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::ServiceCategoryEnum)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Exterior,
    Interior,
    Engine,
    Vacuum,
    Complementary,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::PaymentRequestStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRequestStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::MilestoneTypeEnum)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneType {
    Visits,
    Spending,
    Custom,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::BonusTypeEnum)]
#[serde(rename_all = "snake_case")]
pub enum BonusType {
    Customer,
    Washer,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::BonusStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum BonusStatus {
    Pending,
    Approved,
    Paid,
}

//This is for postgres. For other databases the type might be different.
impl ToSql<sql_types::UserRoleEnum, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            UserRole::SuperAdmin => out.write_all(b"super_admin")?,
            UserRole::Admin => out.write_all(b"admin")?,
            UserRole::CarWasher => out.write_all(b"car_washer")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::UserRoleEnum, Pg> for UserRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"super_admin" => Ok(UserRole::SuperAdmin),
            b"admin" => Ok(UserRole::Admin),
            b"car_washer" => Ok(UserRole::CarWasher),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}
// The following is the traits implementation for other Enums.
impl ToSql<sql_types::CheckInStatusEnum, Pg> for CheckInStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            CheckInStatus::Pending => out.write_all(b"pending")?,
            CheckInStatus::InProgress => out.write_all(b"in_progress")?,
            CheckInStatus::Completed => out.write_all(b"completed")?,
            CheckInStatus::Paid => out.write_all(b"paid")?,
            CheckInStatus::Cancelled => out.write_all(b"cancelled")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::CheckInStatusEnum, Pg> for CheckInStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(CheckInStatus::Pending),
            b"in_progress" => Ok(CheckInStatus::InProgress),
            b"completed" => Ok(CheckInStatus::Completed),
            b"paid" => Ok(CheckInStatus::Paid),
            b"cancelled" => Ok(CheckInStatus::Cancelled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl FromStr for CheckInStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CheckInStatus::Pending),
            "in_progress" => Ok(CheckInStatus::InProgress),
            "completed" => Ok(CheckInStatus::Completed),
            "paid" => Ok(CheckInStatus::Paid),
            "cancelled" => Ok(CheckInStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl ToSql<sql_types::WashTypeEnum, Pg> for WashType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            WashType::Instant => out.write_all(b"instant")?,
            WashType::Delayed => out.write_all(b"delayed")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::WashTypeEnum, Pg> for WashType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"instant" => Ok(WashType::Instant),
            b"delayed" => Ok(WashType::Delayed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::PaymentStatusEnum, Pg> for PaymentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            PaymentStatus::Pending => out.write_all(b"pending")?,
            PaymentStatus::Paid => out.write_all(b"paid")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::PaymentStatusEnum, Pg> for PaymentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(PaymentStatus::Pending),
            b"paid" => Ok(PaymentStatus::Paid),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::PaymentMethodEnum, Pg> for PaymentMethod {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            PaymentMethod::Cash => out.write_all(b"cash")?,
            PaymentMethod::Card => out.write_all(b"card")?,
            PaymentMethod::Pos => out.write_all(b"pos")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::PaymentMethodEnum, Pg> for PaymentMethod {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"cash" => Ok(PaymentMethod::Cash),
            b"card" => Ok(PaymentMethod::Card),
            b"pos" => Ok(PaymentMethod::Pos),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::ServiceCategoryEnum, Pg> for ServiceCategory {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            ServiceCategory::Exterior => out.write_all(b"exterior")?,
            ServiceCategory::Interior => out.write_all(b"interior")?,
            ServiceCategory::Engine => out.write_all(b"engine")?,
            ServiceCategory::Vacuum => out.write_all(b"vacuum")?,
            ServiceCategory::Complementary => out.write_all(b"complementary")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::ServiceCategoryEnum, Pg> for ServiceCategory {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"exterior" => Ok(ServiceCategory::Exterior),
            b"interior" => Ok(ServiceCategory::Interior),
            b"engine" => Ok(ServiceCategory::Engine),
            b"vacuum" => Ok(ServiceCategory::Vacuum),
            b"complementary" => Ok(ServiceCategory::Complementary),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exterior" => Ok(ServiceCategory::Exterior),
            "interior" => Ok(ServiceCategory::Interior),
            "engine" => Ok(ServiceCategory::Engine),
            "vacuum" => Ok(ServiceCategory::Vacuum),
            "complementary" => Ok(ServiceCategory::Complementary),
            _ => Err(()),
        }
    }
}

impl ToSql<sql_types::PaymentRequestStatusEnum, Pg> for PaymentRequestStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            PaymentRequestStatus::Pending => out.write_all(b"pending")?,
            PaymentRequestStatus::Approved => out.write_all(b"approved")?,
            PaymentRequestStatus::Rejected => out.write_all(b"rejected")?,
            PaymentRequestStatus::Paid => out.write_all(b"paid")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::PaymentRequestStatusEnum, Pg> for PaymentRequestStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(PaymentRequestStatus::Pending),
            b"approved" => Ok(PaymentRequestStatus::Approved),
            b"rejected" => Ok(PaymentRequestStatus::Rejected),
            b"paid" => Ok(PaymentRequestStatus::Paid),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl FromStr for PaymentRequestStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentRequestStatus::Pending),
            "approved" => Ok(PaymentRequestStatus::Approved),
            "rejected" => Ok(PaymentRequestStatus::Rejected),
            "paid" => Ok(PaymentRequestStatus::Paid),
            _ => Err(()),
        }
    }
}

impl ToSql<sql_types::MilestoneTypeEnum, Pg> for MilestoneType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            MilestoneType::Visits => out.write_all(b"visits")?,
            MilestoneType::Spending => out.write_all(b"spending")?,
            MilestoneType::Custom => out.write_all(b"custom")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::MilestoneTypeEnum, Pg> for MilestoneType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"visits" => Ok(MilestoneType::Visits),
            b"spending" => Ok(MilestoneType::Spending),
            b"custom" => Ok(MilestoneType::Custom),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::BonusTypeEnum, Pg> for BonusType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            BonusType::Customer => out.write_all(b"customer")?,
            BonusType::Washer => out.write_all(b"washer")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::BonusTypeEnum, Pg> for BonusType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"customer" => Ok(BonusType::Customer),
            b"washer" => Ok(BonusType::Washer),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::BonusStatusEnum, Pg> for BonusStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            BonusStatus::Pending => out.write_all(b"pending")?,
            BonusStatus::Approved => out.write_all(b"approved")?,
            BonusStatus::Paid => out.write_all(b"paid")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::BonusStatusEnum, Pg> for BonusStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(BonusStatus::Pending),
            b"approved" => Ok(BonusStatus::Approved),
            b"paid" => Ok(BonusStatus::Paid),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String, // Hashed!
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublishUser {
    fn from(user: User) -> Self {
        PublishUser {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String, // Hash this before inserting!
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(User))]
#[diesel(table_name = admin_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AdminProfile {
    pub id: i32,
    pub user_id: i32,
    pub location_id: Option<i32>,
    pub address: Option<String>,
    pub cv_path: Option<String>,
    pub picture_path: Option<String>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = admin_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAdminProfile {
    pub user_id: i32,
    pub location_id: Option<i32>,
    pub address: Option<String>,
    pub cv_path: Option<String>,
    pub picture_path: Option<String>,
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(User))]
#[diesel(table_name = washer_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WasherProfile {
    pub id: i32,
    pub user_id: i32,
    pub assigned_admin_id: Option<i32>,
    pub location_id: Option<i32>,
    pub hourly_rate: f64,
    pub total_earnings: f64,
    pub is_available: bool,
    pub picture_path: Option<String>,
    pub bank_information: Option<String>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = washer_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewWasherProfile {
    pub user_id: i32,
    pub assigned_admin_id: Option<i32>,
    pub location_id: Option<i32>,
    pub hourly_rate: f64,
    pub total_earnings: f64,
    pub is_available: bool,
    pub picture_path: Option<String>,
    pub bank_information: Option<String>,
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(User))]
#[diesel(table_name = next_of_kins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NextOfKin {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub phone: String,
    pub relationship: String,
    pub address: Option<String>,
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = next_of_kins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewNextOfKin {
    pub user_id: i32,
    pub name: String,
    pub phone: String,
    pub relationship: String,
    pub address: Option<String>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Location {
    pub id: i32,
    pub address: String,
    pub lga: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewLocation {
    pub address: String,
    pub lga: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub is_registered: bool,
    pub total_visits: i32,
    pub total_spent: f64,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub is_registered: bool,
    pub total_visits: i32,
    pub total_spent: f64,
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Customer))]
#[diesel(table_name = customer_vehicles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerVehicle {
    pub id: i32,
    pub customer_id: i32,
    pub license_plate: String,
    pub vehicle_type: String,
    pub model: Option<String>,
    pub color: String,
    pub is_primary: bool,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Customer))]
#[diesel(table_name = customer_vehicles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCustomerVehicle {
    pub customer_id: i32,
    pub license_plate: String,
    pub vehicle_type: String,
    pub model: Option<String>,
    pub color: String,
    pub is_primary: bool,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    pub category: ServiceCategory,
    pub washer_commission_percentage: f64,
    pub company_commission_percentage: f64,
    pub max_washers_per_service: i32,
    pub commission_notes: Option<String>,
    pub is_active: bool,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    pub category: ServiceCategory,
    pub washer_commission_percentage: f64,
    pub company_commission_percentage: f64,
    pub max_washers_per_service: i32,
    pub commission_notes: Option<String>,
    pub is_active: bool,
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Customer))]
#[diesel(table_name = check_ins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CheckIn {
    pub id: i32,
    pub confirmation: String,
    pub customer_id: Option<i32>,
    pub license_plate: String,
    pub vehicle_type: String,
    pub vehicle_color: String,
    pub vehicle_model: Option<String>,
    pub status: CheckInStatus,
    pub wash_type: WashType,
    pub valuable_items: String,
    pub security_code: Option<String>,
    pub user_code: Option<String>,
    pub check_in_process: Option<String>,
    pub check_in_time: DateTime<Utc>,
    pub completed_time: Option<DateTime<Utc>>,
    pub paid_time: Option<DateTime<Utc>>,
    pub assigned_washer_id: Option<i32>,
    pub assigned_admin_id: i32,
    pub estimated_duration: i32,
    pub actual_duration: Option<i32>,
    pub total_price: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub reason: Option<String>,
}

/// The check-in as clients see it. The security code and passcode stay
/// server-side; completion verifies them, replies never carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishCheckIn {
    pub id: i32,
    pub confirmation: String,
    pub customer_id: Option<i32>,
    pub license_plate: String,
    pub vehicle_type: String,
    pub vehicle_color: String,
    pub vehicle_model: Option<String>,
    pub status: CheckInStatus,
    pub wash_type: WashType,
    pub valuable_items: String,
    pub check_in_process: Option<String>,
    pub check_in_time: DateTime<Utc>,
    pub completed_time: Option<DateTime<Utc>>,
    pub paid_time: Option<DateTime<Utc>>,
    pub assigned_washer_id: Option<i32>,
    pub assigned_admin_id: i32,
    pub estimated_duration: i32,
    pub actual_duration: Option<i32>,
    pub total_price: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub reason: Option<String>,
}

impl From<CheckIn> for PublishCheckIn {
    fn from(check_in: CheckIn) -> Self {
        PublishCheckIn {
            id: check_in.id,
            confirmation: check_in.confirmation,
            customer_id: check_in.customer_id,
            license_plate: check_in.license_plate,
            vehicle_type: check_in.vehicle_type,
            vehicle_color: check_in.vehicle_color,
            vehicle_model: check_in.vehicle_model,
            status: check_in.status,
            wash_type: check_in.wash_type,
            valuable_items: check_in.valuable_items,
            check_in_process: check_in.check_in_process,
            check_in_time: check_in.check_in_time,
            completed_time: check_in.completed_time,
            paid_time: check_in.paid_time,
            assigned_washer_id: check_in.assigned_washer_id,
            assigned_admin_id: check_in.assigned_admin_id,
            estimated_duration: check_in.estimated_duration,
            actual_duration: check_in.actual_duration,
            total_price: check_in.total_price,
            payment_status: check_in.payment_status,
            payment_method: check_in.payment_method,
            reason: check_in.reason,
        }
    }
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Customer))]
#[diesel(table_name = check_ins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCheckIn {
    pub confirmation: String,
    pub customer_id: Option<i32>,
    pub license_plate: String,
    pub vehicle_type: String,
    pub vehicle_color: String,
    pub vehicle_model: Option<String>,
    pub status: CheckInStatus,
    pub wash_type: WashType,
    pub valuable_items: String,
    pub security_code: Option<String>,
    pub user_code: Option<String>,
    pub check_in_process: Option<String>,
    pub check_in_time: DateTime<Utc>,
    pub assigned_washer_id: Option<i32>,
    pub assigned_admin_id: i32,
    pub estimated_duration: i32,
    pub total_price: f64,
    pub payment_status: PaymentStatus,
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(CheckIn))]
#[diesel(belongs_to(Service))]
#[diesel(table_name = check_in_services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CheckInService {
    pub id: i32,
    pub check_in_id: i32,
    pub service_id: i32,
    pub washer_id: i32,
    pub custom_price: Option<f64>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(CheckIn))]
#[diesel(belongs_to(Service))]
#[diesel(table_name = check_in_services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCheckInService {
    pub check_in_id: i32,
    pub service_id: i32,
    pub washer_id: i32,
    pub custom_price: Option<f64>,
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(CheckIn))]
#[diesel(table_name = check_in_materials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CheckInMaterial {
    pub id: i32,
    pub check_in_id: i32,
    pub washer_id: i32,
    pub material_id: i32,
    pub material_name: String,
    pub quantity_used: i32,
    pub usage_date: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(CheckIn))]
#[diesel(table_name = check_in_materials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCheckInMaterial {
    pub check_in_id: i32,
    pub washer_id: i32,
    pub material_id: i32,
    pub material_name: String,
    pub quantity_used: i32,
    pub usage_date: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = washer_tools)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WasherTool {
    pub id: i32,
    pub washer_id: i32,
    pub tool_name: String,
    pub tool_type: String,
    pub quantity: i32,
    pub unit_value: f64,
    pub assigned_date: DateTime<Utc>,
    pub is_returned: bool,
    pub returned_date: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = washer_tools)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewWasherTool {
    pub washer_id: i32,
    pub tool_name: String,
    pub tool_type: String,
    pub quantity: i32,
    pub unit_value: f64,
    pub assigned_date: DateTime<Utc>,
    pub is_returned: bool,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = washer_materials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WasherMaterial {
    pub id: i32,
    pub washer_id: i32,
    pub material_name: String,
    pub material_type: String,
    pub quantity: i32,
    pub unit_value: f64,
    pub assigned_date: DateTime<Utc>,
    pub is_returned: bool,
    pub returned_date: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = washer_materials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewWasherMaterial {
    pub washer_id: i32,
    pub material_name: String,
    pub material_type: String,
    pub quantity: i32,
    pub unit_value: f64,
    pub assigned_date: DateTime<Utc>,
    pub is_returned: bool,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = payment_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRequest {
    pub id: i32,
    pub washer_id: i32,
    pub admin_id: Option<i32>,
    pub approval_date: Option<DateTime<Utc>>,
    pub total_earnings: f64,
    pub material_deductions: f64,
    pub tool_deductions: f64,
    pub amount: f64,
    pub status: PaymentRequestStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = payment_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPaymentRequest {
    pub washer_id: i32,
    pub total_earnings: f64,
    pub material_deductions: f64,
    pub tool_deductions: f64,
    pub amount: f64,
    pub status: PaymentRequestStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = milestones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Milestone {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub milestone_type: MilestoneType,
    pub condition_operator: String,
    pub condition_value: f64,
    pub reward: Option<f64>,
    pub is_active: bool,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = milestones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMilestone {
    pub name: String,
    pub description: Option<String>,
    pub milestone_type: MilestoneType,
    pub condition_operator: String,
    pub condition_value: f64,
    pub reward: Option<f64>,
    pub is_active: bool,
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Customer))]
#[diesel(belongs_to(Milestone))]
#[diesel(table_name = milestone_achievements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MilestoneAchievement {
    pub id: i32,
    pub customer_id: i32,
    pub milestone_id: i32,
    pub achieved_at: DateTime<Utc>,
    pub achieved_value: f64,
    pub reward_claimed: bool,
    pub claimed_at: Option<DateTime<Utc>>,
    pub claimed_by: Option<i32>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Customer))]
#[diesel(belongs_to(Milestone))]
#[diesel(table_name = milestone_achievements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMilestoneAchievement {
    pub customer_id: i32,
    pub milestone_id: i32,
    pub achieved_at: DateTime<Utc>,
    pub achieved_value: f64,
    pub reward_claimed: bool,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = bonuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bonus {
    pub id: i32,
    pub bonus_type: BonusType,
    pub recipient_id: i32,
    pub amount: f64,
    pub reason: String,
    pub milestone_id: Option<i32>,
    pub status: BonusStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = bonuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBonus {
    pub bonus_type: BonusType,
    pub recipient_id: i32,
    pub amount: f64,
    pub reason: String,
    pub milestone_id: Option<i32>,
    pub status: BonusStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = expenses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Expense {
    pub id: i32,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub bonus_id: Option<i32>,
    pub incurred_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = expenses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub bonus_id: Option<i32>,
    pub incurred_at: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(User))]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccessToken {
    pub id: i32,
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccessToken {
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishAccessToken {
    pub token: String,
    pub exp: DateTime<Utc>,
}

impl From<AccessToken> for PublishAccessToken {
    fn from(token: AccessToken) -> Self {
        PublishAccessToken {
            token: hex::encode(token.token),
            exp: token.exp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestToken {
    pub user_id: i32,
    pub token: String,
}
