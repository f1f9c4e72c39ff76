//! Fitness profile types.

use super::Document;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// A user's fitness profile, keyed by user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// User id, stored as the document `_id`.
    #[serde(rename = "_id")]
    pub user_id: String,

    /// Name, age, weight, height, activity level, gender.
    #[serde(default)]
    pub general: Document,

    /// Training goals.
    #[serde(default)]
    pub goals: Vec<String>,

    /// Daily calories and macro targets.
    #[serde(default)]
    pub nutrition: Document,
}

impl Profile {
    /// The profile every new user starts with.
    pub fn with_defaults(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            general: object(json!({
                "name": "",
                "age": 30,
                "weight": 70,
                "height": 170,
                "activity_level": "Moderately Active",
                "gender": "Male",
            })),
            goals: vec!["Muscle Gain".to_string()],
            nutrition: object(json!({
                "calories": 2000,
                "protein": 140,
                "fat": 65,
                "carbs": 200,
            })),
        }
    }
}

fn object(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

/// The independently updatable parts of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileGroup {
    General,
    Goals,
    Nutrition,
}

impl ProfileGroup {
    /// Field name of the group inside the profile document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Goals => "goals",
            Self::Nutrition => "nutrition",
        }
    }
}

impl fmt::Display for ProfileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change to one group of a profile.
///
/// Goals are replaced wholesale. `General` and `Nutrition` are shallow-merged:
/// keys present in the update overwrite, keys absent keep their stored value.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    General(Document),
    Goals(Vec<String>),
    Nutrition(Document),
}

impl ProfileUpdate {
    /// The group this update touches.
    pub fn group(&self) -> ProfileGroup {
        match self {
            Self::General(_) => ProfileGroup::General,
            Self::Goals(_) => ProfileGroup::Goals,
            Self::Nutrition(_) => ProfileGroup::Nutrition,
        }
    }

    /// Apply the update to `profile` and return the `$set` payload for the
    /// touched group, i.e. the whole group after merging.
    pub fn apply(&self, profile: &mut Profile) -> Document {
        let value = match self {
            Self::Goals(goals) => {
                profile.goals = goals.clone();
                Value::from(goals.clone())
            }
            Self::General(fields) => {
                merge_shallow(&mut profile.general, fields);
                Value::Object(profile.general.clone())
            }
            Self::Nutrition(fields) => {
                merge_shallow(&mut profile.nutrition, fields);
                Value::Object(profile.nutrition.clone())
            }
        };

        let mut set = Document::new();
        set.insert(self.group().as_str().to_string(), value);
        set
    }
}

fn merge_shallow(target: &mut Document, fields: &Document) {
    for (key, value) in fields {
        target.insert(key.clone(), value.clone());
    }
}
