use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{actors::dto::Actor, date::DayDate};

/// Film record, same optional-field convention as `Actor`: absent fields
/// in an update payload keep the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Film {
    #[serde(default)]
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<DayDate>,
    pub rating: Option<i32>,
}

impl Film {
    pub fn merged_with(mut self, patch: Film) -> Film {
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.release_date.is_some() {
            self.release_date = patch.release_date;
        }
        if patch.rating.is_some() {
            self.rating = patch.rating;
        }
        self
    }
}

/// Create body: film fields nested under "film", plus actor ids to link.
#[derive(Debug, Default, Deserialize)]
pub struct FilmPost {
    #[serde(default)]
    pub film: Film,
    #[serde(default)]
    pub actors_ids: Vec<i32>,
}

/// Update body: link list plus an unlink list.
#[derive(Debug, Default, Deserialize)]
pub struct FilmPut {
    #[serde(default)]
    pub film: Film,
    #[serde(default)]
    pub actors_ids: Vec<i32>,
    #[serde(default)]
    pub remove_actors_ids: Vec<i32>,
}

/// Single-film payload with the cast embedded.
#[derive(Debug, Serialize)]
pub struct FilmResponse {
    pub film: Film,
    pub actors: Vec<Actor>,
}

#[derive(Debug, Serialize)]
pub struct FilmsSearch {
    pub films: Vec<Film>,
}

/// Sort key for the film collection. Only these three columns ever reach
/// the ORDER BY clause; the value is formatted into the query text, so
/// arbitrary strings must never be converted into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Rating,
    ReleaseDate,
}

impl SortBy {
    /// Unrecognized or absent values silently fall back to rating.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("name") => SortBy::Name,
            Some("release_date") => SortBy::ReleaseDate,
            _ => SortBy::Rating,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Rating => "rating",
            SortBy::ReleaseDate => "release_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Defaults to descending, same fallback rule as `SortBy`.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("ASC") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Film fields are optional even on create; only bounds are checked.
pub fn validate_film(film: &Film) -> Result<(), String> {
    if let Some(name) = film.name.as_deref() {
        if name.is_empty() || name.len() > 150 {
            return Err(
                "the length of the film name must be at least 1 and no more than 150 characters"
                    .into(),
            );
        }
    }
    if let Some(description) = film.description.as_deref() {
        if description.len() > 1500 {
            return Err("film's description len should not exceed 1500 symbols".into());
        }
    }
    if let Some(rating) = film.rating {
        if !(0..=10).contains(&rating) {
            return Err("film's rating should be from 0 to 10".into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn empty_film_is_valid() {
        assert!(validate_film(&Film::default()).is_ok());
    }

    #[test]
    fn name_bounds() {
        let film = Film {
            name: Some(String::new()),
            ..Film::default()
        };
        assert!(validate_film(&film).is_err());

        let film = Film {
            name: Some("x".repeat(150)),
            ..Film::default()
        };
        assert!(validate_film(&film).is_ok());

        let film = Film {
            name: Some("x".repeat(151)),
            ..Film::default()
        };
        assert!(validate_film(&film).is_err());
    }

    #[test]
    fn description_bound() {
        let film = Film {
            description: Some("x".repeat(1500)),
            ..Film::default()
        };
        assert!(validate_film(&film).is_ok());

        let film = Film {
            description: Some("x".repeat(1501)),
            ..Film::default()
        };
        assert!(validate_film(&film).is_err());
    }

    #[test]
    fn rating_range() {
        for rating in [0, 10] {
            let film = Film {
                rating: Some(rating),
                ..Film::default()
            };
            assert!(validate_film(&film).is_ok());
        }
        for rating in [-1, 11] {
            let film = Film {
                rating: Some(rating),
                ..Film::default()
            };
            assert!(validate_film(&film).is_err());
        }
    }

    #[test]
    fn sort_by_falls_back_to_rating() {
        assert_eq!(SortBy::from_query(Some("name")), SortBy::Name);
        assert_eq!(SortBy::from_query(Some("release_date")), SortBy::ReleaseDate);
        assert_eq!(SortBy::from_query(Some("rating")), SortBy::Rating);
        assert_eq!(SortBy::from_query(Some("bogus")), SortBy::Rating);
        assert_eq!(SortBy::from_query(None), SortBy::Rating);
    }

    #[test]
    fn sort_order_falls_back_to_desc() {
        assert_eq!(SortOrder::from_query(Some("ASC")), SortOrder::Asc);
        assert_eq!(SortOrder::from_query(Some("asc")), SortOrder::Desc);
        assert_eq!(SortOrder::from_query(Some("DESC")), SortOrder::Desc);
        assert_eq!(SortOrder::from_query(None), SortOrder::Desc);
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let stored = Film {
            id: 7,
            name: Some("Heat".into()),
            description: Some("Crime drama".into()),
            release_date: Some(DayDate(date!(1995 - 12 - 15))),
            rating: Some(9),
        };
        let patch = Film {
            rating: Some(10),
            ..Film::default()
        };
        let merged = stored.clone().merged_with(patch);
        assert_eq!(merged.rating, Some(10));
        assert_eq!(merged.name, stored.name);
        assert_eq!(merged.description, stored.description);
        assert_eq!(merged.release_date, stored.release_date);
    }

    #[test]
    fn put_body_decodes_nested_film_and_link_lists() {
        let body: FilmPut = serde_json::from_str(
            r#"{"film":{"name":"Speed","rating":8},"actors_ids":[1,2],"remove_actors_ids":[3]}"#,
        )
        .unwrap();
        assert_eq!(body.film.name.as_deref(), Some("Speed"));
        assert_eq!(body.actors_ids, vec![1, 2]);
        assert_eq!(body.remove_actors_ids, vec![3]);
    }

    #[test]
    fn post_body_tolerates_missing_sections() {
        let body: FilmPost = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.film.name.is_none());
        assert!(body.actors_ids.is_empty());
    }

    #[test]
    fn search_response_uses_films_key() {
        let json = serde_json::to_string(&FilmsSearch { films: vec![] }).unwrap();
        assert_eq!(json, r#"{"films":[]}"#);
    }
}
