//! Playable characters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Character {
    pub id: &'static str,
    pub name: &'static str,
    pub gender: Gender,
    pub description: &'static str,
}

pub const ROSTER: [Character; 4] = [
    Character {
        id: "male1",
        name: "Alexei",
        gender: Gender::Male,
        description: "Seasoned pickup-point clerk",
    },
    Character {
        id: "female1",
        name: "Maria",
        gender: Gender::Female,
        description: "Energetic and attentive",
    },
    Character {
        id: "male2",
        name: "Dmitry",
        gender: Gender::Male,
        description: "Newcomer, eager to learn",
    },
    Character {
        id: "female2",
        name: "Anna",
        gender: Gender::Female,
        description: "Experienced professional",
    },
];

pub fn find_character(id: &str) -> Option<&'static Character> {
    ROSTER.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(find_character("female1").map(|c| c.name), Some("Maria"));
        assert!(find_character("robot").is_none());
    }

    #[test]
    fn test_ids_unique() {
        for (i, a) in ROSTER.iter().enumerate() {
            for b in &ROSTER[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
