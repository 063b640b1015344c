mod common;

use result_portal::bootstrap::ensure_admin_user;
use result_portal::repositories::UserRepository;

use common::setup_db;

#[tokio::test]
async fn admin_bootstrap_runs_once() {
    let db = setup_db().await;

    let created = ensure_admin_user(&db, "admin", "admin@university.edu", "admin123")
        .await
        .unwrap();
    let again = ensure_admin_user(&db, "admin", "admin@university.edu", "admin123")
        .await
        .unwrap();

    let admin = created.expect("first run creates the admin");
    assert!(admin.is_admin);
    assert!(bcrypt::verify("admin123", &admin.password_hash).unwrap());
    assert!(again.is_none());

    let stored = UserRepository::new(&db)
        .find_by_username("admin")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_id, admin.user_id);
}
