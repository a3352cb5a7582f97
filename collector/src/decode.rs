//! Decoding of the dashboard's table endpoints.
//!
//! Both tables answer with `{"data": [...]}` where every row wraps the entity in a `user` or
//! `team` object. Only the name, the team name (users only) and the points are used, anything
//! else in the payload is ignored. A row that misses one of those fields fails the whole payload.

use crate::error::DecodeError;
use challengize_config::Stage;
use serde::Deserialize;

/// Points of one user in one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScore {
    pub username: String,
    pub team: String,
    pub points: i64,
    pub stage: Stage,
}

/// Points of one team in one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamScore {
    pub team: String,
    pub points: i64,
    pub stage: Stage,
}

#[derive(Deserialize)]
struct Table<Row> {
    data: Vec<Row>,
}

#[derive(Deserialize)]
struct UserRow {
    user: UserEntry,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserEntry {
    percentage_and_points: Points,
    id_name_avatar: UserName,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserName {
    name: String,
    team_name: String,
}

#[derive(Deserialize)]
struct TeamRow {
    team: TeamEntry,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamEntry {
    percentage_and_points: Points,
    id_name_avatar: TeamName,
}

#[derive(Deserialize)]
struct TeamName {
    name: String,
}

#[derive(Deserialize)]
struct Points {
    points: i64,
}

pub fn decode_users(body: &[u8], stage: Stage) -> Result<Vec<UserScore>, DecodeError> {
    let table: Table<UserRow> = serde_json::from_slice(body)?;
    Ok(table
        .data
        .into_iter()
        .map(|row| UserScore {
            username: row.user.id_name_avatar.name,
            team: row.user.id_name_avatar.team_name,
            points: row.user.percentage_and_points.points,
            stage,
        })
        .collect())
}

pub fn decode_teams(body: &[u8], stage: Stage) -> Result<Vec<TeamScore>, DecodeError> {
    let table: Table<TeamRow> = serde_json::from_slice(body)?;
    Ok(table
        .data
        .into_iter()
        .map(|row| TeamScore {
            team: row.team.id_name_avatar.name,
            points: row.team.percentage_and_points.points,
            stage,
        })
        .collect())
}
