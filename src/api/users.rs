use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::api::client::{ApiClient, BATCH_SIZE};
use crate::error::Result;
use crate::model::User;

const USERS_PATH: &str = "/users";

#[derive(Debug, Deserialize)]
struct UsersPage {
    users: Vec<User>,
}

/// Fetches one batch of users, starting after the given user id.
pub fn fetch_users(
    client: &ApiClient,
    take: usize,
    start_with: Option<&str>,
) -> Result<Vec<User>> {
    let mut query = vec![("take", take.to_string())];
    if let Some(user_id) = start_with {
        query.push(("start_with", user_id.to_string()));
    }
    let page: UsersPage = client.get_public(USERS_PATH, &query)?;
    Ok(page.users)
}

/// Fetches every user via cursor pagination: each next batch starts with
/// the id of the last user returned.
pub fn fetch_all_users(client: &ApiClient) -> Result<IndexMap<String, User>> {
    let mut users: IndexMap<String, User> = IndexMap::new();
    let mut cursor: Option<String> = None;

    loop {
        let batch = fetch_users(client, BATCH_SIZE, cursor.as_deref())?;
        let batch_len = batch.len();
        cursor = batch.last().map(|user| user.id.clone());
        for user in batch {
            users.insert(user.id.clone(), user);
        }
        if batch_len < BATCH_SIZE {
            break;
        }
    }

    info!(count = users.len(), "retrieved users");
    Ok(users)
}

/// Fetches the full detail for one user, including role memberships.
pub fn fetch_user_detail(client: &ApiClient, user_id: &str) -> Result<User> {
    client.get_public(&format!("{USERS_PATH}/{user_id}"), &[])
}

/// Fetches every user with full details. The listing carries limited
/// information per user, so each user is fetched again individually.
pub fn fetch_all_user_details(client: &ApiClient) -> Result<IndexMap<String, User>> {
    let users = fetch_all_users(client)?;

    let mut details = IndexMap::with_capacity(users.len());
    for user_id in users.keys() {
        debug!(user_id = %user_id, "fetching user detail");
        let detail = fetch_user_detail(client, user_id)?;
        details.insert(user_id.clone(), detail);
    }
    Ok(details)
}

/// Creates a user account. No invitation mail is sent.
pub fn create_user(
    client: &ApiClient,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<()> {
    client.post_public(
        USERS_PATH,
        &json!({
            "email": email,
            "first_name": first_name,
            "last_name": last_name,
            "send_email_when_created": false,
        }),
    )
}
