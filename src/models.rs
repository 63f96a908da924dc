//! Frontend Models
//!
//! Data structures matching the backend's JSON.

use chrono::{DateTime, Utc};
use leptos_optimistic::Identified;
use serde::{Deserialize, Serialize};

// ========================
// Users
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Customer,
    Cook,
    DeliveryAgent,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Roles an admin can assign from the users hub
    pub const ASSIGNABLE: [Role; 4] = [Role::Customer, Role::Cook, Role::DeliveryAgent, Role::Admin];

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Customer => "Customer",
            Role::Cook => "Cook",
            Role::DeliveryAgent => "Delivery Agent",
            Role::Unknown => "Unknown",
        }
    }

    /// Wire value, as used in query strings and local storage
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Cook => "cook",
            Role::DeliveryAgent => "delivery_agent",
            Role::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Role {
        match value.trim() {
            "admin" => Role::Admin,
            "customer" => Role::Customer,
            "cook" => Role::Cook,
            "delivery_agent" => Role::DeliveryAgent,
            _ => Role::Unknown,
        }
    }
}

/// User row from the admin list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(default)]
    pub approval_status: Option<String>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: f64,
}

impl User {
    /// Fold the partial record echoed by write endpoints into this one
    pub fn merge_summary(mut self, summary: UserSummary) -> User {
        debug_assert_eq!(self.id, summary.id);
        self.email = summary.email;
        self.name = summary.name;
        if let Some(role) = summary.role {
            self.role = role;
        }
        self.is_active = summary.is_active;
        self
    }
}

impl Identified for User {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Partial user returned by activate/deactivate/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u32,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<Role>,
    pub is_active: bool,
}

// ========================
// Orders
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Cart,
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::Cart,
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Cart => "Cart",
            OrderStatus::Pending => "Pending Payment",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready for Pickup",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Cart => "cart",
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    pub fn parse(value: &str) -> Option<OrderStatus> {
        OrderStatus::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Refunded)
    }

    /// Accepted by the kitchen but not yet handed over
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            OrderStatus::Confirmed | OrderStatus::Preparing | OrderStatus::Ready | OrderStatus::OutForDelivery
        )
    }

    pub fn can_cancel(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Preparing)
    }

    /// Statuses an admin may pick for an order currently in `self`.
    /// Finished orders are locked; cancelling is only offered before pickup.
    pub fn admin_choices(self) -> Vec<OrderStatus> {
        if self.is_terminal() {
            return vec![self];
        }
        OrderStatus::ALL
            .into_iter()
            .filter(|&status| status != OrderStatus::Cancelled || self.can_cancel())
            .collect()
    }

    /// Next step a cook or delivery agent may move the order to.
    /// Admins set statuses directly and get None.
    pub fn next_for(self, role: Role) -> Option<OrderStatus> {
        match (role, self) {
            (Role::Cook, OrderStatus::Confirmed) => Some(OrderStatus::Preparing),
            (Role::Cook, OrderStatus::Preparing) => Some(OrderStatus::Ready),
            (Role::DeliveryAgent, OrderStatus::Ready) => Some(OrderStatus::OutForDelivery),
            (Role::DeliveryAgent, OrderStatus::OutForDelivery) => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
    PartialRefund,
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
            PaymentStatus::PartialRefund => "Partial Refund",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub order_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub items_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

impl Order {
    pub fn with_status(&self, status: OrderStatus) -> Order {
        Order {
            status,
            ..self.clone()
        }
    }
}

impl Identified for Order {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Partial order echoed by the status endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderStatusEcho {
    pub id: u32,
    pub status: OrderStatus,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ========================
// Foods
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodApproval {
    Pending,
    Approved,
    Rejected,
}

impl FoodApproval {
    pub fn label(self) -> &'static str {
        match self {
            FoodApproval::Pending => "Pending",
            FoodApproval::Approved => "Approved",
            FoodApproval::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    #[serde(alias = "food_id")]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: FoodApproval,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub preparation_time: Option<u32>,
    #[serde(default)]
    pub total_orders: u32,
}

impl Identified for Food {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn default_true() -> bool {
    true
}

/// New menu entry submitted by a cook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<u32>,
}

impl FoodDraft {
    /// Placeholder row shown until the backend assigns a real id
    pub fn provisional(&self, id: u32) -> Food {
        Food {
            id,
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            status: FoodApproval::Pending,
            is_available: true,
            is_featured: false,
            preparation_time: self.preparation_time,
            total_orders: 0,
        }
    }
}

// ========================
// Pagination
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub pages: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserPage {
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_page_parses_backend_shape() {
        let json = r#"{
            "users": [{
                "id": 7, "email": "cook@chefsync.lk", "name": "Kumar", "role": "cook",
                "is_active": true, "approval_status": "approved",
                "last_login": null, "date_joined": "2024-03-01T08:30:00Z",
                "total_orders": 0, "total_spent": 0.0
            }],
            "pagination": {"page": 1, "limit": 25, "total": 1, "pages": 1}
        }"#;
        let page: UserPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.users[0].role, Role::Cook);
        assert!(page.users[0].date_joined.is_some());
        assert_eq!(page.pagination.total, 1);
    }

    #[test]
    fn test_unknown_role_does_not_fail() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "email": "x@y.z", "role": "superhero", "is_active": false}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Unknown);
        assert_eq!(user.name, "");
    }

    #[test]
    fn test_merge_summary_takes_server_fields() {
        let user: User = serde_json::from_str(
            r#"{"id": 3, "email": "a@b.c", "name": "Old", "role": "customer", "is_active": false, "total_orders": 4}"#,
        )
        .unwrap();
        let summary = UserSummary {
            id: 3,
            email: "a@b.c".into(),
            name: "New".into(),
            role: None,
            is_active: true,
        };
        let merged = user.merge_summary(summary);
        assert_eq!(merged.name, "New");
        assert!(merged.is_active);
        assert_eq!(merged.role, Role::Customer);
        assert_eq!(merged.total_orders, 4);
    }

    #[test]
    fn test_order_status_wire_names() {
        let status: OrderStatus = serde_json::from_str(r#""out_for_delivery""#).unwrap();
        assert_eq!(status, OrderStatus::OutForDelivery);
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_role_workflows() {
        assert_eq!(OrderStatus::Confirmed.next_for(Role::Cook), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::Preparing.next_for(Role::Cook), Some(OrderStatus::Ready));
        assert_eq!(OrderStatus::Ready.next_for(Role::Cook), None);
        assert_eq!(OrderStatus::Ready.next_for(Role::DeliveryAgent), Some(OrderStatus::OutForDelivery));
        assert_eq!(OrderStatus::OutForDelivery.next_for(Role::DeliveryAgent), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next_for(Role::DeliveryAgent), None);
        assert_eq!(OrderStatus::Confirmed.next_for(Role::Admin), None);
        assert!(OrderStatus::Preparing.can_cancel());
        assert!(!OrderStatus::Ready.can_cancel());
        assert!(OrderStatus::Preparing.admin_choices().contains(&OrderStatus::Cancelled));
        assert!(!OrderStatus::Ready.admin_choices().contains(&OrderStatus::Cancelled));
        assert_eq!(OrderStatus::Delivered.admin_choices(), vec![OrderStatus::Delivered]);
    }

    #[test]
    fn test_food_accepts_food_id_alias() {
        let food: Food = serde_json::from_str(
            r#"{"food_id": 12, "name": "Kottu", "status": "Approved"}"#,
        )
        .unwrap();
        assert_eq!(food.id, 12);
        assert!(food.is_available);
        assert_eq!(food.status, FoodApproval::Approved);
    }
}
