use crate::POOL;
use crate::model::{User, UserRole, WasherProfile};
use diesel::prelude::*;
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use tokio::task;

/// Every mutating operation the API exposes. Role gates are looked up in
/// CAPABILITIES once per request instead of being re-derived per handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateAdmin,
    CreateWasher,
    DeactivateUser,
    ManageLocations,
    ManageServices,
    CreateCheckIn,
    StartCheckIn,
    CompleteCheckIn,
    RecordPayment,
    CancelCheckIn,
    AssignWasher,
    LogMaterials,
    RequestPayment,
    ReviewPaymentRequest,
    ManageInventory,
    ManageMilestones,
    GrantBonus,
    ClaimReward,
}

lazy_static! {
    static ref CAPABILITIES: HashMap<UserRole, HashSet<Action>> = {
        use Action::*;
        let mut map = HashMap::new();
        map.insert(
            UserRole::SuperAdmin,
            HashSet::from([
                CreateAdmin,
                CreateWasher,
                DeactivateUser,
                ManageLocations,
                ManageServices,
                CreateCheckIn,
                StartCheckIn,
                CompleteCheckIn,
                RecordPayment,
                CancelCheckIn,
                AssignWasher,
                ReviewPaymentRequest,
                ManageInventory,
                ManageMilestones,
                GrantBonus,
                ClaimReward,
            ]),
        );
        map.insert(
            UserRole::Admin,
            HashSet::from([
                CreateWasher,
                ManageLocations,
                ManageServices,
                CreateCheckIn,
                StartCheckIn,
                CompleteCheckIn,
                RecordPayment,
                CancelCheckIn,
                AssignWasher,
                ReviewPaymentRequest,
                ManageInventory,
                ManageMilestones,
                GrantBonus,
                ClaimReward,
            ]),
        );
        map.insert(
            UserRole::CarWasher,
            HashSet::from([StartCheckIn, CompleteCheckIn, LogMaterials, RequestPayment]),
        );
        map
    };
}

pub fn role_allows(role: &UserRole, action: Action) -> bool {
    CAPABILITIES
        .get(role)
        .map(|set| set.contains(&action))
        .unwrap_or(false)
}

pub async fn get_user_by_id(_user_id: &i32) -> QueryResult<User> {
    let uid = *_user_id;
    let mut pool = POOL.clone().get().unwrap();
    task::spawn_blocking(move || {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(&uid)).get_result::<User>(&mut pool)
    })
    .await
    .unwrap()
}

pub async fn get_washer_profile(_user_id: &i32) -> QueryResult<WasherProfile> {
    let uid = *_user_id;
    let mut pool = POOL.clone().get().unwrap();
    task::spawn_blocking(move || {
        use crate::schema::washer_profiles::dsl::*;
        washer_profiles
            .filter(user_id.eq(&uid))
            .get_result::<WasherProfile>(&mut pool)
    })
    .await
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_super_admin_creates_admins() {
        assert!(role_allows(&UserRole::SuperAdmin, Action::CreateAdmin));
        assert!(!role_allows(&UserRole::Admin, Action::CreateAdmin));
        assert!(!role_allows(&UserRole::CarWasher, Action::CreateAdmin));
    }

    #[test]
    fn admins_and_super_admins_create_washers() {
        assert!(role_allows(&UserRole::SuperAdmin, Action::CreateWasher));
        assert!(role_allows(&UserRole::Admin, Action::CreateWasher));
        assert!(!role_allows(&UserRole::CarWasher, Action::CreateWasher));
    }

    #[test]
    fn washers_request_payment_admins_review() {
        assert!(role_allows(&UserRole::CarWasher, Action::RequestPayment));
        assert!(!role_allows(&UserRole::Admin, Action::RequestPayment));
        assert!(role_allows(&UserRole::Admin, Action::ReviewPaymentRequest));
        assert!(!role_allows(&UserRole::CarWasher, Action::ReviewPaymentRequest));
    }

    #[test]
    fn milestone_management_is_admin_only() {
        assert!(role_allows(&UserRole::SuperAdmin, Action::ManageMilestones));
        assert!(role_allows(&UserRole::Admin, Action::ManageMilestones));
        assert!(!role_allows(&UserRole::CarWasher, Action::ManageMilestones));
    }

    #[test]
    fn washers_cannot_record_payment() {
        assert!(!role_allows(&UserRole::CarWasher, Action::RecordPayment));
        assert!(role_allows(&UserRole::Admin, Action::RecordPayment));
    }
}
