//! Startup seeding of API keys.

use std::collections::BTreeMap;

use not_twitter_core::{MAX_API_KEY_LEN, MAX_NAME_LEN};
use not_twitter_store::{Store, StoreError};

/// Create a user for every configured API key that does not exist yet.
///
/// Entries with an empty or over-long key or name are skipped with a warning.
/// Running this on every start is safe: keys already present are left as is.
///
/// Returns the number of users created.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn bootstrap_users<S>(
    store: &S,
    users: &BTreeMap<String, String>,
) -> Result<usize, StoreError>
where
    S: Store + ?Sized,
{
    let valid: BTreeMap<String, String> = users
        .iter()
        .filter(|(api_key, name)| {
            let ok = is_valid_entry(api_key, name);
            if !ok {
                tracing::warn!(name = %name, "Skipping invalid seed entry");
            }
            ok
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let created = store.seed_users(&valid).await?;

    tracing::info!(
        configured = users.len(),
        created = created,
        "API keys seeded"
    );

    Ok(created)
}

fn is_valid_entry(api_key: &str, name: &str) -> bool {
    !api_key.is_empty()
        && api_key.chars().count() <= MAX_API_KEY_LEN
        && !name.is_empty()
        && name.chars().count() <= MAX_NAME_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use not_twitter_store::SqliteStore;
    use tempfile::TempDir;

    #[test]
    fn entry_validation() {
        assert!(is_valid_entry("key", "name"));
        assert!(!is_valid_entry("", "name"));
        assert!(!is_valid_entry("key", ""));
        assert!(!is_valid_entry("key", &"n".repeat(MAX_NAME_LEN + 1)));
        assert!(!is_valid_entry(&"k".repeat(MAX_API_KEY_LEN + 1), "name"));
    }

    #[tokio::test]
    async fn bootstrap_skips_invalid_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(dir.path().join("seed.db")).await.unwrap();

        let mut users = BTreeMap::new();
        users.insert("good".to_string(), "Good".to_string());
        users.insert("bad".to_string(), String::new());

        assert_eq!(bootstrap_users(&store, &users).await.unwrap(), 1);
        assert_eq!(bootstrap_users(&store, &users).await.unwrap(), 0);

        assert!(store.get_user_by_api_key("good").await.unwrap().is_some());
        assert!(store.get_user_by_api_key("bad").await.unwrap().is_none());
    }
}
