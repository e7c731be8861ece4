//! Integration tests for visibility and proximity filtering

use std::sync::Arc;
use std::time::Duration;

use echomap::prelude::*;

async fn create_test_engine() -> (EchoManager, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let tokens = Arc::new(TokenRegistry::new());
    let config = ConfigBuilder::new()
        .without_stdout_logging()
        .build()
        .expect("Failed to build config");
    let manager = EchoManager::new(store.clone(), store.clone(), store.clone(), tokens, config);
    (manager, store)
}

async fn seed_user(store: &InMemoryStore, name: &str) -> User {
    store
        .create_user(User::new(name, format!("{name}@example.com")))
        .await
        .expect("Failed to create user")
}

#[tokio::test]
async fn nearby_uses_planar_distance_against_the_radius() {
    let (manager, store) = create_test_engine().await;
    let owner = seed_user(&store, "owner").await;
    let viewer = seed_user(&store, "viewer").await;

    let draft = MemoryDraft::new("under the old bridge", "joy", 10.0, 10.0);
    manager
        .create_memory(owner.id, draft)
        .await
        .expect("Failed to create memory");

    // Planar distance from (10.0005, 10.0005) is about 0.0007 degree-units.
    let seen = manager
        .discover_nearby(viewer.id, 10.0005, 10.0005, Some(1.0), None)
        .await
        .expect("Failed to discover");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].emotion, "joy");

    let unseen = manager
        .discover_nearby(viewer.id, 10.0005, 10.0005, Some(0.0001), None)
        .await
        .expect("Failed to discover");
    assert!(unseen.is_empty());
}

#[tokio::test]
async fn nearby_never_returns_the_viewers_own_memories() {
    let (manager, store) = create_test_engine().await;
    let viewer = seed_user(&store, "viewer").await;
    let other = seed_user(&store, "other").await;

    manager
        .create_memory(viewer.id, MemoryDraft::new("mine", "calm", 5.0, 5.0))
        .await
        .expect("Failed to create memory");
    manager
        .create_memory(other.id, MemoryDraft::new("theirs", "calm", 5.0, 5.0))
        .await
        .expect("Failed to create memory");

    let seen = manager
        .discover_nearby(viewer.id, 5.0, 5.0, Some(1.0), None)
        .await
        .expect("Failed to discover");

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].owner_id, other.id);
}

#[tokio::test]
async fn discovery_hides_inactive_and_non_public_memories() {
    let (manager, store) = create_test_engine().await;
    let owner = seed_user(&store, "owner").await;
    let viewer = seed_user(&store, "viewer").await;

    manager
        .create_memory(owner.id, MemoryDraft::new("visible", "joy", 0.0, 0.0))
        .await
        .expect("Failed to create memory");
    manager
        .create_memory(
            owner.id,
            MemoryDraft::new("dormant", "joy", 0.0, 0.0).active(false),
        )
        .await
        .expect("Failed to create memory");
    for access in [AccessType::Friends, AccessType::EmotionMatch, AccessType::Private] {
        manager
            .create_memory(
                owner.id,
                MemoryDraft::new("gated", "joy", 0.0, 0.0).access_type(access),
            )
            .await
            .expect("Failed to create memory");
    }

    let nearby = manager
        .discover_nearby(viewer.id, 0.0, 0.0, Some(1.0), None)
        .await
        .expect("Failed to discover");
    assert_eq!(nearby.len(), 1);
    assert_eq!(nearby[0].title, "visible");

    let all = manager
        .discover_all_public(None, None)
        .await
        .expect("Failed to discover");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "visible");
}

#[tokio::test]
async fn emotion_filter_is_exact_and_case_sensitive() {
    let (manager, store) = create_test_engine().await;
    let owner = seed_user(&store, "owner").await;

    manager
        .create_memory(owner.id, MemoryDraft::new("sunrise", "joy", 1.0, 1.0))
        .await
        .expect("Failed to create memory");

    let sad = manager
        .discover_all_public(Some("sad"), None)
        .await
        .expect("Failed to discover");
    assert!(sad.is_empty());

    let capitalized = manager
        .discover_all_public(Some("Joy"), None)
        .await
        .expect("Failed to discover");
    assert!(capitalized.is_empty());

    let joy = manager
        .discover_all_public(Some("joy"), None)
        .await
        .expect("Failed to discover");
    assert_eq!(joy.len(), 1);
}

#[tokio::test]
async fn all_public_can_exclude_a_viewer() {
    let (manager, store) = create_test_engine().await;
    let viewer = seed_user(&store, "viewer").await;
    let other = seed_user(&store, "other").await;

    manager
        .create_memory(viewer.id, MemoryDraft::new("mine", "joy", 1.0, 1.0))
        .await
        .expect("Failed to create memory");
    manager
        .create_memory(other.id, MemoryDraft::new("theirs", "joy", 2.0, 2.0))
        .await
        .expect("Failed to create memory");

    let unfiltered = manager
        .discover_all_public(None, None)
        .await
        .expect("Failed to discover");
    assert_eq!(unfiltered.len(), 2);

    let excluded = manager
        .discover_all_public(None, Some(viewer.id))
        .await
        .expect("Failed to discover");
    assert_eq!(excluded.len(), 1);
    assert_eq!(excluded[0].owner_id, other.id);
}

#[tokio::test]
async fn nearby_falls_back_to_the_configured_default_radius() {
    let store = Arc::new(InMemoryStore::new());
    let tokens = Arc::new(TokenRegistry::new());
    let config = ConfigBuilder::new()
        .with_default_radius(0.0001)
        .without_stdout_logging()
        .build()
        .expect("Failed to build config");
    let manager = EchoManager::new(store.clone(), store.clone(), store.clone(), tokens, config);

    let owner = seed_user(&store, "owner").await;
    let viewer = seed_user(&store, "viewer").await;
    manager
        .create_memory(owner.id, MemoryDraft::new("far away", "joy", 10.0, 10.0))
        .await
        .expect("Failed to create memory");

    // The tight configured radius applies when none is supplied.
    let with_default = manager
        .discover_nearby(viewer.id, 10.5, 10.5, None, None)
        .await
        .expect("Failed to discover");
    assert!(with_default.is_empty());

    let with_explicit = manager
        .discover_nearby(viewer.id, 10.5, 10.5, Some(1.0), None)
        .await
        .expect("Failed to discover");
    assert_eq!(with_explicit.len(), 1);
}

#[tokio::test]
async fn recent_public_is_newest_first_and_limited() {
    let (manager, store) = create_test_engine().await;
    let owner = seed_user(&store, "owner").await;

    for title in ["first", "second", "third"] {
        manager
            .create_memory(owner.id, MemoryDraft::new(title, "joy", 0.0, 0.0))
            .await
            .expect("Failed to create memory");
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let recent = manager
        .discover_recent_public(2)
        .await
        .expect("Failed to discover");

    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].title, "third");
    assert_eq!(recent[1].title, "second");
}

#[tokio::test]
async fn global_analytics_count_what_discovery_hides() {
    let (manager, store) = create_test_engine().await;
    let owner = seed_user(&store, "owner").await;

    manager
        .create_memory(owner.id, MemoryDraft::new("open", "joy", 0.0, 0.0))
        .await
        .expect("Failed to create memory");
    manager
        .create_memory(
            owner.id,
            MemoryDraft::new("hidden", "joy", 0.0, 0.0).access_type(AccessType::Private),
        )
        .await
        .expect("Failed to create memory");
    manager
        .create_memory(
            owner.id,
            MemoryDraft::new("gone quiet", "sad", 0.0, 0.0).active(false),
        )
        .await
        .expect("Failed to create memory");

    let snapshot = manager
        .global_map_snapshot()
        .await
        .expect("Failed to build snapshot");

    // Counts span access types and owners; only active memories count.
    assert_eq!(snapshot.emotion_counts.get("joy"), Some(&2));
    assert_eq!(snapshot.emotion_counts.get("sad"), None);

    // The map itself shows only active PUBLIC memories.
    assert_eq!(snapshot.memories.len(), 1);
    assert_eq!(snapshot.memories[0].title, "open");

    let counts = manager.emotion_counts().await.expect("Failed to count");
    assert_eq!(counts, snapshot.emotion_counts);
}
