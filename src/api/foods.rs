//! Food Endpoints
//!
//! A cook's own menu.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::models::{Food, FoodDraft};

const CHEF_FOODS: &str = "food/chef/foods";
const NO_QUERY: &[(&str, &str)] = &[];

#[derive(Serialize)]
struct AvailabilityArgs {
    is_available: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FoodList {
    Plain(Vec<Food>),
    Paged { results: Vec<Food> },
}

pub async fn list_chef_foods(api: &ApiClient) -> Result<Vec<Food>, ApiError> {
    let list: FoodList = api.get(&format!("{CHEF_FOODS}/"), NO_QUERY).await?;
    Ok(match list {
        FoodList::Plain(foods) => foods,
        FoodList::Paged { results } => results,
    })
}

pub async fn set_food_available(api: &ApiClient, food: Food, available: bool) -> Result<Food, ApiError> {
    api.patch(
        &format!("{CHEF_FOODS}/{}/", food.id),
        &AvailabilityArgs { is_available: available },
    )
    .await
}

pub async fn create_food(api: &ApiClient, draft: FoodDraft) -> Result<Food, ApiError> {
    api.post(&format!("{CHEF_FOODS}/"), &draft).await
}

pub async fn delete_food(api: &ApiClient, id: u32) -> Result<(), ApiError> {
    api.delete(&format!("{CHEF_FOODS}/{id}/")).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_list_paged() {
        let list: FoodList = serde_json::from_str(
            r#"{"count": 2, "next": null, "results": [
                {"food_id": 1, "name": "Hoppers", "status": "Approved", "is_available": false},
                {"food_id": 2, "name": "Pittu", "status": "Pending"}
            ]}"#,
        )
        .unwrap();
        let FoodList::Paged { results } = list else {
            panic!("expected a paged list");
        };
        assert_eq!(results.len(), 2);
        assert!(!results[0].is_available);
        assert!(results[1].is_available);
    }

    #[test]
    fn test_draft_omits_empty_fields() {
        let draft = FoodDraft {
            name: "String hoppers".into(),
            category: None,
            description: None,
            preparation_time: Some(20),
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"name": "String hoppers", "preparation_time": 20})
        );
    }
}
