//! Table Filters
//!
//! Client-side filtering and paging applied to the hub lists.

use crate::models::{Food, Order, OrderStatus, Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFilter {
    Active,
    Inactive,
}

impl ActiveFilter {
    fn matches(self, active: bool) -> bool {
        match self {
            ActiveFilter::Active => active,
            ActiveFilter::Inactive => !active,
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn normalized(search: &str) -> String {
    search.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub search: String,
    pub role: Option<Role>,
    pub status: Option<ActiveFilter>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        let needle = normalized(&self.search);
        (needle.is_empty() || contains_ci(&user.name, &needle) || contains_ci(&user.email, &needle))
            && self.role.map_or(true, |role| user.role == role)
            && self.status.map_or(true, |status| status.matches(user.is_active))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub search: String,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        let needle = normalized(&self.search);
        (needle.is_empty()
            || contains_ci(&order.order_number, &needle)
            || contains_ci(&order.customer_name, &needle)
            || order
                .customer_email
                .as_deref()
                .is_some_and(|email| contains_ci(email, &needle)))
            && self.status.map_or(true, |status| order.status == status)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodFilter {
    pub search: String,
    /// Some(true) for available only, Some(false) for hidden only
    pub availability: Option<bool>,
}

impl FoodFilter {
    pub fn matches(&self, food: &Food) -> bool {
        let needle = normalized(&self.search);
        (needle.is_empty()
            || contains_ci(&food.name, &needle)
            || food
                .category
                .as_deref()
                .is_some_and(|category| contains_ci(category, &needle)))
            && self.availability.map_or(true, |available| food.is_available == available)
    }
}

/// Rows of `page` (1-based). Out-of-range pages are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    if per_page == 0 || page == 0 {
        return Vec::new();
    }
    items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect()
}

/// Number of pages needed, at least one so an empty table still has a page
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}
