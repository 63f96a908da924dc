//! Order Endpoints
//!
//! Admin order management plus the role-scoped order list used by cooks
//! and delivery agents.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::models::{Order, OrderPage, OrderStatus, OrderStatusEcho, PaymentStatus};

const ADMIN_ORDERS: &str = "admin-management/orders";
const ORDERS: &str = "orders/orders";

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

/// Body of a status change, also the query of a status-filtered list
#[derive(Serialize)]
struct StatusArgs {
    status: OrderStatus,
}

#[derive(Deserialize)]
struct StatusEnvelope {
    order: OrderStatusEcho,
}

/// The orders viewset answers with a bare array or a paginated object
/// depending on server settings
#[derive(Deserialize)]
#[serde(untagged)]
enum OrderList {
    Plain(Vec<Order>),
    Paged { results: Vec<Order> },
}

// ========================
// Commands
// ========================

pub async fn list_orders(api: &ApiClient, query: &OrderQuery) -> Result<OrderPage, ApiError> {
    api.get(&format!("{ADMIN_ORDERS}/list_orders/"), query).await
}

/// Admin status change; yields the confirmed order
pub async fn update_order_status(
    api: &ApiClient,
    order: Order,
    status: OrderStatus,
) -> Result<Order, ApiError> {
    let envelope: StatusEnvelope = api
        .patch(&format!("{ADMIN_ORDERS}/{}/update_status/", order.id), &StatusArgs { status })
        .await?;
    Ok(confirm_status(order, envelope.order))
}

/// Orders visible to the signed-in cook or delivery agent, in one status
pub async fn list_role_orders(api: &ApiClient, status: OrderStatus) -> Result<Vec<Order>, ApiError> {
    let list: OrderList = api.get(&format!("{ORDERS}/"), &StatusArgs { status }).await?;
    Ok(match list {
        OrderList::Plain(orders) => orders,
        OrderList::Paged { results } => results,
    })
}

/// Workflow step by a cook or delivery agent; the viewset returns the full order
pub async fn advance_order(api: &ApiClient, order: Order, status: OrderStatus) -> Result<Order, ApiError> {
    api.patch(&format!("{ORDERS}/{}/", order.id), &StatusArgs { status })
        .await
}

fn confirm_status(order: Order, echo: OrderStatusEcho) -> Order {
    Order {
        status: echo.status,
        updated_at: echo.updated_at.or(order.updated_at),
        ..order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        serde_json::from_value(serde_json::json!({
            "id": 31,
            "order_number": "ORD-0031",
            "customer_name": "Nila",
            "status": "confirmed",
            "payment_status": "paid",
            "total_amount": 1450.0
        }))
        .unwrap()
    }

    #[test]
    fn test_confirm_status_uses_server_echo() {
        let echo: StatusEnvelope = serde_json::from_str(
            r#"{"message": "Order status updated to preparing",
                "order": {"id": 31, "order_number": "ORD-0031", "status": "preparing",
                          "updated_at": "2024-05-02T10:00:00Z"}}"#,
        )
        .unwrap();
        let confirmed = confirm_status(order(), echo.order);
        assert_eq!(confirmed.status, OrderStatus::Preparing);
        assert!(confirmed.updated_at.is_some());
        assert_eq!(confirmed.total_amount, 1450.0);
    }

    #[test]
    fn test_order_list_accepts_both_shapes() {
        let plain: OrderList = serde_json::from_value(serde_json::json!([order()])).unwrap();
        assert!(matches!(plain, OrderList::Plain(ref o) if o.len() == 1));

        let paged: OrderList =
            serde_json::from_value(serde_json::json!({"count": 1, "results": [order()]})).unwrap();
        assert!(matches!(paged, OrderList::Paged { ref results } if results.len() == 1));
    }

    #[test]
    fn test_query_serializes_wire_status() {
        let query = OrderQuery {
            page: 1,
            limit: 25,
            status: Some(OrderStatus::OutForDelivery),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"page": 1, "limit": 25, "status": "out_for_delivery"})
        );
    }
}
