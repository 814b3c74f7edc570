//! Roster import: parse a CSV player list, validate it, add it to a draft tournament.

use crate::models::{Player, PlayerId, Tournament, TournamentError, TournamentStatus};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

/// Accepted header spellings per column, in lookup order.
const NAME_COLUMNS: &[&str] = &["Name", "name", "NAME"];
const EMAIL_COLUMNS: &[&str] = &["Email", "email", "EMAIL"];
const PHONE_COLUMNS: &[&str] = &["Phone", "phone", "PHONE", "Mobile", "mobile"];
const TEAM_COLUMNS: &[&str] = &["Team", "team", "TEAM", "Team Name", "team_name"];

/// Positions of every header matching one of `spellings`, in spelling order.
fn column_positions(headers: &StringRecord, spellings: &[&str]) -> Vec<usize> {
    spellings
        .iter()
        .filter_map(|s| headers.iter().position(|h| h == *s))
        .collect()
}

/// First non-blank value among the given columns.
fn first_value(record: &StringRecord, positions: &[usize]) -> Option<String> {
    positions
        .iter()
        .filter_map(|&i| record.get(i))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// A player row ready to be imported.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub team_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Spreadsheet row (header is row 1).
    pub row_number: usize,
}

/// Outcome of `validate_roster`: errors block the import, warnings don't.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RosterValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl RosterValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a CSV roster with a header row (columns Name, Email, Phone, Team).
///
/// A column may appear under several spellings; the first non-blank one wins. Rows missing a
/// name or team are skipped; an import with no usable rows fails.
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Vec<RosterEntry>, TournamentError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| TournamentError::RosterImport(e.to_string()))?
        .clone();
    let name_at = column_positions(&headers, NAME_COLUMNS);
    let email_at = column_positions(&headers, EMAIL_COLUMNS);
    let phone_at = column_positions(&headers, PHONE_COLUMNS);
    let team_at = column_positions(&headers, TEAM_COLUMNS);

    let mut entries = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| TournamentError::RosterImport(e.to_string()))?;
        let entry = RosterEntry {
            name: first_value(&record, &name_at).unwrap_or_default(),
            team_name: first_value(&record, &team_at).unwrap_or_default(),
            email: first_value(&record, &email_at),
            phone: first_value(&record, &phone_at),
            row_number: index + 2,
        };
        if entry.name.is_empty() || entry.team_name.is_empty() {
            log::warn!("Skipping roster row {}: name and team are required", entry.row_number);
            continue;
        }
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(TournamentError::RosterImport(
            "No valid player data found. Please ensure columns: Name, Team are present."
                .to_string(),
        ));
    }
    Ok(entries)
}

/// Check entries before import: name and team are required, email is recommended.
pub fn validate_roster(entries: &[RosterEntry]) -> RosterValidation {
    let mut validation = RosterValidation::default();
    if entries.is_empty() {
        validation.errors.push("No players provided".to_string());
        return validation;
    }

    for entry in entries {
        let row = entry.row_number;
        if entry.name.trim().is_empty() {
            validation.errors.push(format!("Row {}: Name is required", row));
        }
        if entry.team_name.trim().is_empty() {
            validation.errors.push(format!("Row {}: Team is required", row));
        }
        if entry.email.as_deref().map_or(true, |e| e.trim().is_empty()) {
            validation.warnings.push(format!("Row {}: Email is missing", row));
        }
    }
    validation
}

/// Add validated entries to a draft tournament, all or nothing.
/// A (name, team) pair must not repeat an existing player or another entry (case-insensitive).
pub fn import_roster(
    tournament: &mut Tournament,
    entries: &[RosterEntry],
) -> Result<Vec<PlayerId>, TournamentError> {
    if tournament.status != TournamentStatus::Draft {
        return Err(TournamentError::InvalidState);
    }
    let validation = validate_roster(entries);
    if !validation.is_valid() {
        return Err(TournamentError::RosterImport(validation.errors.join("; ")));
    }

    let mut taken: HashSet<(String, String)> =
        tournament.players.iter().map(Player::key).collect();
    for entry in entries {
        if !taken.insert(Player::roster_key(&entry.name, &entry.team_name)) {
            return Err(TournamentError::DuplicatePlayer {
                name: entry.name.trim().to_string(),
                team_name: entry.team_name.trim().to_string(),
            });
        }
    }

    let mut added = Vec::with_capacity(entries.len());
    for entry in entries {
        let player = Player::new(entry.name.trim(), entry.team_name.trim())
            .with_contact(entry.email.clone(), entry.phone.clone());
        added.push(tournament.add_player(player)?);
    }
    log::info!(
        "Imported {} players into tournament {}",
        added.len(),
        tournament.id
    );
    Ok(added)
}
