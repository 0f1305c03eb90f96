//! Entity types served by the game-reference API.
//!
//! Field names follow the wire format exactly — the API mixes camelCase
//! (`priceGold`, `raceId`) and snake_case (`price_gold`, `attack_type`)
//! between entities, so renames are per-field rather than per-struct.
//! Nested collections and timestamps default to empty/None: list endpoints
//! routinely omit them and only the detail endpoints fill them in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric id unique within one entity collection.
pub type EntityId = u32;

/// The faction name used by list endpoints that serve faction-less content.
pub const NEUTRAL: &str = "neutral";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub ability: Option<Ability>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    /// Movement range per turn ("move" on the wire — a Rust keyword).
    #[serde(rename = "move")]
    pub movement: u32,
    pub damage: u32,
    pub health: u32,
    pub cost: u32,
    #[serde(default)]
    pub attack_type: String,
    #[serde(rename = "raceId", default)]
    pub race_id: Option<EntityId>,
    /// Only populated by the `/hero/{id}` detail endpoint.
    #[serde(default)]
    pub ability: Vec<Ability>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub times_in_deck: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "priceGold", default)]
    pub price_gold: u32,
    #[serde(rename = "priceWood", default)]
    pub price_wood: u32,
    /// Only populated by the `/building/{id}` detail endpoint.
    #[serde(default)]
    pub unit: Vec<Unit>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub price_gold: u32,
    #[serde(default)]
    pub price_wood: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub obtainability: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creep {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub level: u32,
    pub health: u32,
    pub damage: u32,
    #[serde(default)]
    pub attack_type: String,
    #[serde(default)]
    pub unit_type: String,
    /// Item drops — only populated by the `/creep/{id}` detail endpoint.
    #[serde(default)]
    pub item: Vec<Item>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "priceGold", default)]
    pub price_gold: u32,
    #[serde(rename = "priceWood", default)]
    pub price_wood: u32,
    pub health: u32,
    pub damage: u32,
    #[serde(default)]
    pub tech: u32,
    #[serde(default)]
    pub range: u32,
    #[serde(default)]
    pub movement: u32,
    #[serde(default)]
    pub attack_type: String,
    #[serde(default)]
    pub special_unit: bool,
    #[serde(default)]
    pub unit_type: String,
    /// Nullable on the wire.
    #[serde(rename = "buildingId", default)]
    pub building_id: Option<EntityId>,
    #[serde(rename = "raceId", default)]
    pub race_id: Option<EntityId>,
    /// Only populated by the `/unit/{id}` detail endpoint.
    #[serde(default)]
    pub ability: Vec<Ability>,
    #[serde(default)]
    pub building: Vec<Building>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub price_gold: u32,
    #[serde(default)]
    pub price_wood: u32,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: u32,
    #[serde(rename = "raceId", default)]
    pub race_id: Option<EntityId>,
    /// Embedded in the list response — upgrades have no detail endpoint.
    #[serde(default)]
    pub ability: Vec<Ability>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_races_minimal_payload() {
        // List endpoints may omit timestamps entirely.
        let json = r#"[{"id":1,"name":"Orcs","icon":"orc.png",
            "ability":{"id":9,"name":"Bloodlust","description":"...","icon":"blood.png"}}]"#;
        let races: Vec<Race> = serde_json::from_str(json).unwrap();
        assert_eq!(races.len(), 1);
        assert_eq!(races[0].id, 1);
        assert_eq!(races[0].name, "Orcs");
        assert_eq!(races[0].ability.as_ref().unwrap().name, "Bloodlust");
        assert!(races[0].created_at.is_none());
    }

    #[test]
    fn test_hero_move_keyword_rename() {
        let json = r#"{"id":7,"name":"Thrall","icon":"thrall.png","move":3,
            "damage":12,"health":100,"cost":5,"attack_type":"melee","raceId":1}"#;
        let hero: Hero = serde_json::from_str(json).unwrap();
        assert_eq!(hero.movement, 3);
        assert_eq!(hero.race_id, Some(1));
        assert!(hero.ability.is_empty());
    }

    #[test]
    fn test_unit_null_building_id() {
        let json = r#"{"id":4,"name":"Grunt","icon":"grunt.png","priceGold":2,
            "priceWood":0,"health":60,"damage":8,"tech":1,"range":1,"movement":2,
            "attack_type":"melee","special_unit":false,"unit_type":"ground",
            "buildingId":null,"raceId":1}"#;
        let unit: Unit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.price_gold, 2);
        assert!(unit.building_id.is_none());
        assert!(!unit.special_unit);
    }

    #[test]
    fn test_creep_detail_with_items() {
        let json = r#"{"id":3,"name":"Gnoll","icon":"gnoll.png","level":2,
            "health":40,"damage":6,"attack_type":"melee","unit_type":"ground",
            "item":[{"id":11,"name":"Claws","description":"+2 dmg","icon":"claws.png",
                     "price_gold":0,"price_wood":0,"type":"weapon","obtainability":"drop"}]}"#;
        let creep: Creep = serde_json::from_str(json).unwrap();
        assert_eq!(creep.item.len(), 1);
        assert_eq!(creep.item[0].kind, "weapon");
    }
}
