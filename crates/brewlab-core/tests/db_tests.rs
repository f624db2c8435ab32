use brewlab_core::{
    legacy::{blank_recipe, seed_recipes},
    models::ShareLink,
    BrewError, Database,
};
use jiff::Timestamp;
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn at(second: i64) -> Timestamp {
    Timestamp::from_second(second).expect("valid timestamp")
}

#[test]
fn test_initialization_seeds_once() {
    let (temp_file, db) = create_test_db();
    assert_eq!(db.list_public_recipes().unwrap().len(), 7);
    drop(db);

    let reopened = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(reopened.list_public_recipes().unwrap().len(), 7);
}

#[test]
fn test_seed_round_trips_through_storage() {
    let (_temp_file, db) = create_test_db();
    let expected = seed_recipes()
        .unwrap()
        .into_iter()
        .find(|recipe| recipe.slug == "kalita-wave")
        .unwrap();

    let stored = db.get_recipe_by_slug("kalita-wave").unwrap().unwrap();
    assert_eq!(stored, expected);
    assert_eq!(db.get_recipe_by_id(&expected.id).unwrap(), Some(expected));
}

#[test]
fn test_save_recipe_replaces_versions() {
    let (_temp_file, mut db) = create_test_db();
    let mut recipe = blank_recipe("abcdef123456", "alice", at(1_750_000_000));
    db.save_recipe(&recipe).unwrap();

    recipe.title = "Renamed".to_string();
    recipe.versions[0].steps.truncate(2);
    db.save_recipe(&recipe).unwrap();

    let stored = db.get_recipe_by_id(&recipe.id).unwrap().unwrap();
    assert_eq!(stored.title, "Renamed");
    assert_eq!(stored.versions.len(), 1);
    assert_eq!(stored.versions[0].steps.len(), 2);

    let owned = db.list_recipes_by_owner("alice").unwrap();
    assert_eq!(owned.len(), 1);
    assert!(db.list_public_recipes().unwrap().iter().all(|r| r.id != recipe.id));
}

#[test]
fn test_save_recipe_rejects_taken_slug() {
    let (_temp_file, mut db) = create_test_db();
    let mut recipe = blank_recipe("abcdef123456", "alice", at(1_750_000_000));
    recipe.slug = "chemex".to_string();

    let result = db.save_recipe(&recipe);
    assert!(matches!(
        result,
        Err(BrewError::InvalidInput { ref field, .. }) if field == "slug"
    ));
    assert!(db.get_recipe_by_id(&recipe.id).unwrap().is_none());
}

#[test]
fn test_set_visibility() {
    let (_temp_file, mut db) = create_test_db();
    let recipe = blank_recipe("abcdef123456", "alice", at(1_750_000_000));
    db.save_recipe(&recipe).unwrap();

    assert!(db
        .set_recipe_visibility(&recipe.id, true, at(1_750_000_100))
        .unwrap());
    assert!(!db
        .set_recipe_visibility("missing", true, at(1_750_000_100))
        .unwrap());

    let public = db.list_public_recipes().unwrap();
    assert_eq!(public[0].id, recipe.id);
    assert_eq!(public[0].updated_at, at(1_750_000_100));
}

#[test]
fn test_share_link_lifecycle() {
    let (_temp_file, db) = create_test_db();
    let link = |id: &str, token: &str, second: i64| ShareLink {
        id: id.to_string(),
        recipe_id: "seed-chemex".to_string(),
        token: token.to_string(),
        published_version_id: "seed-chemex-v1".to_string(),
        created_by: "alice".to_string(),
        revoked_at: None,
        created_at: at(second),
    };
    db.insert_share_link(&link("l1", "tok1", 100)).unwrap();
    db.insert_share_link(&link("l2", "tok2", 200)).unwrap();

    let active = db.find_active_share_link("seed-chemex", "alice").unwrap();
    assert_eq!(active.map(|l| l.token), Some("tok2".to_string()));
    assert!(db.find_active_share_link("seed-chemex", "bob").unwrap().is_none());

    assert!(!db.revoke_share_link("tok2", "bob", at(300)).unwrap());
    assert!(db.revoke_share_link("tok2", "alice", at(300)).unwrap());
    assert!(!db.revoke_share_link("tok2", "alice", at(400)).unwrap());

    let revoked = db.get_share_link_by_token("tok2").unwrap().unwrap();
    assert_eq!(revoked.revoked_at, Some(at(300)));
    let active = db.find_active_share_link("seed-chemex", "alice").unwrap();
    assert_eq!(active.map(|l| l.token), Some("tok1".to_string()));
    assert_eq!(db.list_share_links("seed-chemex").unwrap().len(), 2);
}

#[test]
fn test_snapshot_storage() {
    let (_temp_file, db) = create_test_db();
    assert!(db.get_snapshot("seed-chemex").unwrap().is_none());

    db.put_snapshot("seed-chemex", "{\"a\":1}", at(100)).unwrap();
    db.put_snapshot("seed-chemex", "{\"a\":2}", at(200)).unwrap();
    assert_eq!(
        db.get_snapshot("seed-chemex").unwrap().as_deref(),
        Some("{\"a\":2}")
    );

    assert!(db.delete_snapshot("seed-chemex").unwrap());
    assert!(!db.delete_snapshot("seed-chemex").unwrap());
}
