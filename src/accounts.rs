use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, instrument};

use crate::api::{ApiClient, users};
use crate::error::Result;

/// One account entry parsed from a semicolon-delimited user list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Parses a semicolon-delimited user list. Lines without an e-mail address
/// (header lines included) are skipped; fields 1 to 3 carry first name,
/// last name, and e-mail address. Addresses are lowercased.
pub fn parse_account_rows(reader: impl BufRead) -> Result<Vec<AccountRow>> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.contains('@') {
            continue;
        }
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() > 3 {
            rows.push(AccountRow {
                first_name: fields[1].trim().to_string(),
                last_name: fields[2].trim().to_string(),
                email: fields[3].trim().to_lowercase(),
            });
        }
    }
    Ok(rows)
}

/// Creates an account for every entry of the list whose e-mail address is
/// not known to the service yet. Returns the number of accounts created.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn create_missing_accounts(
    client: &ApiClient,
    input: &Path,
    description: &str,
) -> Result<usize> {
    let existing: HashSet<String> = users::fetch_all_user_details(client)?
        .values()
        .map(|user| user.email.to_lowercase())
        .collect();

    let rows = parse_account_rows(BufReader::new(File::open(input)?))?;

    let mut created = 0;
    for row in rows {
        if existing.contains(&row.email) {
            continue;
        }
        info!(
            first_name = %row.first_name,
            last_name = %row.last_name,
            email = %row.email,
            "creating account"
        );
        users::create_user(client, &row.first_name, &row.last_name, &row.email)?;
        created += 1;
    }

    info!(created, description, "account creation finished");
    Ok(created)
}
