use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{date::DayDate, films::dto::Film};

/// Actor record. Every field except `id` is optional: an update payload
/// only overwrites the fields it actually carries (merge semantics), and
/// a get on a missing id yields the all-unset record with id 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Actor {
    #[serde(default)]
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sex: Option<String>,
    pub birthdate: Option<DayDate>,
}

impl Actor {
    /// Merge-overwrite: fields present in `patch` replace the stored
    /// values, absent fields keep them.
    pub fn merged_with(mut self, patch: Actor) -> Actor {
        if patch.first_name.is_some() {
            self.first_name = patch.first_name;
        }
        if patch.last_name.is_some() {
            self.last_name = patch.last_name;
        }
        if patch.sex.is_some() {
            self.sex = patch.sex;
        }
        if patch.birthdate.is_some() {
            self.birthdate = patch.birthdate;
        }
        self
    }
}

/// Single-actor payload with the related films embedded.
#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub actor: Actor,
    pub films: Vec<Film>,
}

#[derive(Debug, Serialize)]
pub struct ActorList {
    pub actors: Vec<ActorResponse>,
}

/// Create and update share the same constraints: both names required at
/// 1-20 characters, sex required and exactly "m" or "f".
pub fn validate_actor(actor: &Actor) -> Result<(), String> {
    match actor.first_name.as_deref() {
        Some(name) if !name.is_empty() && name.len() <= 20 => {}
        _ => {
            return Err(
                "first name length should be at least 1 and no more than 20 characters".into(),
            )
        }
    }
    match actor.last_name.as_deref() {
        Some(name) if !name.is_empty() && name.len() <= 20 => {}
        _ => {
            return Err(
                "last name length should be at least 1 and no more than 20 characters".into(),
            )
        }
    }
    match actor.sex.as_deref() {
        Some("m") | Some("f") => {}
        _ => return Err("sex should be 'm' or 'f'".into()),
    }
    Ok(())
}
