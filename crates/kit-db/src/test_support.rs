//! Shared test utilities for kit-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use kit_core::entities::User;
    use kit_core::enums::UserRole;

    use crate::KitDb;
    use crate::service::KitService;

    /// Create an in-memory service (fresh schema per test).
    pub async fn test_service() -> KitService {
        let db = KitDb::open_local(":memory:").await.unwrap();
        KitService::from_db(db)
    }

    /// Seed an admin user to act in transitions.
    pub async fn seed_admin(svc: &KitService) -> User {
        svc.create_user("admin@example.com", "Admin", UserRole::Admin)
            .await
            .unwrap()
    }
}
