//! Stat Card Figures
//!
//! Summaries computed from the hub lists, so the cards move together with
//! optimistic changes.

use crate::models::{Food, FoodApproval, Order, OrderStatus, Role, User};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub cooks: usize,
    pub delivery_agents: usize,
}

impl UserStats {
    pub fn from_users(users: &[User]) -> Self {
        let active = users.iter().filter(|u| u.is_active).count();
        Self {
            total: users.len(),
            active,
            inactive: users.len() - active,
            cooks: users.iter().filter(|u| u.role == Role::Cook).count(),
            delivery_agents: users.iter().filter(|u| u.role == Role::DeliveryAgent).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderStats {
    pub total: usize,
    pub in_progress: usize,
    pub delivered: usize,
    pub cancelled: usize,
    /// Sum over delivered orders
    pub revenue: f64,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = OrderStats {
            total: orders.len(),
            ..Default::default()
        };
        for order in orders {
            match order.status {
                OrderStatus::Delivered => {
                    stats.delivered += 1;
                    stats.revenue += order.total_amount;
                }
                OrderStatus::Cancelled | OrderStatus::Refunded => stats.cancelled += 1,
                status if status.is_in_progress() => stats.in_progress += 1,
                _ => {}
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoodStats {
    pub total: usize,
    pub available: usize,
    pub awaiting_approval: usize,
}

impl FoodStats {
    pub fn from_foods(foods: &[Food]) -> Self {
        Self {
            total: foods.len(),
            available: foods.iter().filter(|f| f.is_available).count(),
            awaiting_approval: foods
                .iter()
                .filter(|f| f.status == FoodApproval::Pending)
                .count(),
        }
    }
}

/// `LKR 1,234.50`
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("LKR {sign}{grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;

    fn order(status: OrderStatus, total_amount: f64) -> Order {
        Order {
            id: 0,
            order_number: String::new(),
            customer_name: String::new(),
            customer_email: None,
            status,
            payment_status: PaymentStatus::Paid,
            total_amount,
            items_count: 0,
            created_at: None,
            updated_at: None,
            delivery_address: None,
        }
    }

    #[test]
    fn test_order_stats() {
        let orders = vec![
            order(OrderStatus::Delivered, 1200.0),
            order(OrderStatus::Delivered, 800.5),
            order(OrderStatus::Preparing, 500.0),
            order(OrderStatus::OutForDelivery, 300.0),
            order(OrderStatus::Cancelled, 900.0),
            order(OrderStatus::Pending, 100.0),
        ];
        let stats = OrderStats::from_orders(&orders);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.cancelled, 1);
        assert!((stats.revenue - 2000.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "LKR 0.00");
        assert_eq!(format_amount(1234.5), "LKR 1,234.50");
        assert_eq!(format_amount(1_000_000.0), "LKR 1,000,000.00");
        assert_eq!(format_amount(999.999), "LKR 1,000.00");
        assert_eq!(format_amount(-45.2), "LKR -45.20");
    }
}
