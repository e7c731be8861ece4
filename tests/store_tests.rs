//! Integration tests for the in-memory reference backend

use echomap::prelude::*;
use uuid::Uuid;

fn memory_at(owner: Uuid, title: &str, emotion: &str, lat: f64, lng: f64) -> Memory {
    Memory::new(owner, title, emotion, lat, lng)
}

#[tokio::test]
async fn store_is_healthy_and_clearable() {
    let store = InMemoryStore::new();

    assert!(store.health_check().await.expect("Health check failed"));

    store
        .create_memory(memory_at(Uuid::new_v4(), "a", "joy", 0.0, 0.0))
        .await
        .expect("Failed to create memory");
    store
        .create_user(User::new("mara", "mara@example.com"))
        .await
        .expect("Failed to create user");

    store.clear().await.expect("Failed to clear");
    assert_eq!(store.count_memories(None).await.expect("Failed to count"), 0);
    assert!(
        store
            .find_by_username("mara")
            .await
            .expect("Failed to find")
            .is_none()
    );
}

#[tokio::test]
async fn create_memory_enforces_data_constraints() {
    let store = InMemoryStore::new();
    let owner = Uuid::new_v4();

    let blank_title = store
        .create_memory(memory_at(owner, "  ", "joy", 0.0, 0.0))
        .await;
    assert!(matches!(blank_title, Err(StorageError::Validation(_))));

    let blank_emotion = store
        .create_memory(memory_at(owner, "title", "", 0.0, 0.0))
        .await;
    assert!(matches!(blank_emotion, Err(StorageError::Validation(_))));

    let memory = memory_at(owner, "title", "joy", 0.0, 0.0);
    store
        .create_memory(memory.clone())
        .await
        .expect("Failed to create memory");
    let duplicate = store.create_memory(memory).await;
    assert!(matches!(duplicate, Err(StorageError::AlreadyExists(_))));
}

#[tokio::test]
async fn list_memories_is_stable_and_respects_the_limit() {
    let store = InMemoryStore::new();
    let owner = Uuid::new_v4();

    for title in ["a", "b", "c"] {
        store
            .create_memory(memory_at(owner, title, "joy", 0.0, 0.0))
            .await
            .expect("Failed to create memory");
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let first = store.list_memories(None, None).await.expect("Failed to list");
    let second = store.list_memories(None, None).await.expect("Failed to list");
    assert_eq!(first, second);

    let titles: Vec<_> = first.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, ["a", "b", "c"]);

    let limited = store.list_memories(None, Some(2)).await.expect("Failed to list");
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn filtered_counts_match_filtered_lists() {
    let store = InMemoryStore::new();
    let owner = Uuid::new_v4();

    store
        .create_memory(memory_at(owner, "a", "joy", 0.0, 0.0))
        .await
        .expect("Failed to create memory");
    store
        .create_memory(memory_at(owner, "b", "sad", 0.0, 0.0))
        .await
        .expect("Failed to create memory");

    let filter = MemoryFilter { emotion: Some("joy".to_string()), ..Default::default() };
    let listed = store
        .list_memories(Some(filter.clone()), None)
        .await
        .expect("Failed to list");
    let counted = store.count_memories(Some(filter)).await.expect("Failed to count");
    assert_eq!(listed.len(), counted);
    assert_eq!(counted, 1);
}

#[tokio::test]
async fn increment_unlock_count_returns_the_new_value() {
    let store = InMemoryStore::new();
    let memory = memory_at(Uuid::new_v4(), "counted", "joy", 0.0, 0.0);
    store
        .create_memory(memory.clone())
        .await
        .expect("Failed to create memory");

    assert_eq!(
        store.increment_unlock_count(&memory.id).await.expect("Failed to increment"),
        1
    );
    assert_eq!(
        store.increment_unlock_count(&memory.id).await.expect("Failed to increment"),
        2
    );

    let missing = store.increment_unlock_count(&Uuid::new_v4()).await;
    assert!(matches!(missing, Err(StorageError::NotFound(_))));
}

#[tokio::test]
async fn set_active_touches_only_the_active_flag() {
    let store = InMemoryStore::new();
    let mut memory = memory_at(Uuid::new_v4(), "toggled", "joy", 1.5, 2.5);
    memory.unlock_count = 7;
    store
        .create_memory(memory.clone())
        .await
        .expect("Failed to create memory");

    assert!(store.set_active(&memory.id, false).await.expect("Failed to set"));

    let stored = store
        .get_memory(&memory.id)
        .await
        .expect("Failed to get")
        .expect("Memory missing");
    assert!(!stored.active);
    let mut expected = memory.clone();
    expected.active = false;
    assert_eq!(stored, expected);

    assert!(!store.set_active(&Uuid::new_v4(), true).await.expect("Failed to set"));
}

#[tokio::test]
async fn unlock_queries_cover_both_sides_of_the_pair() {
    let store = InMemoryStore::new();
    let memory_id = Uuid::new_v4();
    let other_memory = Uuid::new_v4();
    let user = Uuid::new_v4();

    assert!(
        !store
            .exists_for(&memory_id, &user)
            .await
            .expect("Failed to check")
    );

    store
        .create_unlock(MemoryUnlock::new(memory_id, user, EchoDraft::default()))
        .await
        .expect("Failed to create unlock");
    store
        .create_unlock(MemoryUnlock::new(other_memory, user, EchoDraft::default()))
        .await
        .expect("Failed to create unlock");

    assert!(store.exists_for(&memory_id, &user).await.expect("Failed to check"));
    assert_eq!(
        store.count_by_memory(&memory_id).await.expect("Failed to count"),
        1
    );
    assert_eq!(
        store.count_by_unlocker(&user).await.expect("Failed to count"),
        2
    );
    assert_eq!(
        store.list_by_memory(&memory_id).await.expect("Failed to list").len(),
        1
    );
    assert_eq!(
        store.list_by_unlocker(&user).await.expect("Failed to list").len(),
        2
    );
}

#[tokio::test]
async fn user_uniqueness_is_enforced() {
    let store = InMemoryStore::new();

    let mara = store
        .create_user(User::new("mara", "mara@example.com"))
        .await
        .expect("Failed to create user");

    let same_username = store.create_user(User::new("mara", "other@example.com")).await;
    assert!(matches!(same_username, Err(StorageError::AlreadyExists(_))));

    let same_email = store.create_user(User::new("other", "mara@example.com")).await;
    assert!(matches!(same_email, Err(StorageError::AlreadyExists(_))));

    let found = store
        .find_by_email("mara@example.com")
        .await
        .expect("Failed to find")
        .expect("User missing");
    assert_eq!(found.id, mara.id);
    assert_eq!(
        store
            .get_user(&mara.id)
            .await
            .expect("Failed to get")
            .expect("User missing")
            .username,
        "mara"
    );
}
