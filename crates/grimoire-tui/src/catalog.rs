//! Catalog — per-screen adapters the generic `EntityBrowser` is built over.
//!
//! Each browsable screen gets a marker type implementing `Catalog`: it names
//! the entity type, converts the shared payload enums into it, and renders
//! rows, stat lines, and the expandable detail block. Screens whose entities
//! carry everything in the list response (shops, blacksmith, cards) have no
//! detail request and render from the entity itself.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use grimoire_api::model::{
    Ability, Building, Card, Creep, EntityId, Hero, Item, Unit, Upgrade,
};

use crate::action::{DetailRequest, Screen};
use crate::fetch::{CollectionPayload, DetailPayload};
use crate::theme::{style_heading, C_GOLD, C_MUTED, C_PRIMARY, C_SECONDARY, C_WOOD};

pub trait Catalog {
    type Entity: Clone + Send + 'static;
    type Detail: Clone + Send + 'static;

    const SCREEN: Screen;

    /// Whether the collection endpoint is parameterized by the chosen race.
    fn needs_faction() -> bool {
        true
    }

    fn id(entity: &Self::Entity) -> EntityId;
    fn icon(entity: &Self::Entity) -> &str;
    fn matches(entity: &Self::Entity, query: &str) -> bool;
    fn row_line(entity: &Self::Entity) -> Line<'static>;
    fn stat_rows(entity: &Self::Entity) -> Vec<(&'static str, String)>;

    /// Detail endpoint to hit when this entity expands, if any.
    fn detail_request(_entity: &Self::Entity) -> Option<DetailRequest> {
        None
    }

    fn collection_from(payload: CollectionPayload) -> Option<Vec<Self::Entity>>;

    fn detail_from(_payload: DetailPayload) -> Option<Self::Detail> {
        None
    }

    fn detail_lines(_detail: &Self::Detail) -> Vec<Line<'static>> {
        Vec::new()
    }

    /// Detail content already embedded in the entity; used when
    /// `detail_request` is None.
    fn embedded_detail_lines(_entity: &Self::Entity) -> Vec<Line<'static>> {
        Vec::new()
    }

    fn detail_heading() -> &'static str {
        "Abilities:"
    }

    fn loading_text() -> &'static str {
        "Loading abilities..."
    }

    fn empty_text() -> &'static str {
        "No abilities available."
    }
}

// ── Shared rendering helpers ──────────────────────────────────────────────────

fn name_matches(text: &str, q: &str) -> bool {
    if q.trim().is_empty() {
        return true;
    }
    let text = text.to_lowercase();
    let q = q.to_lowercase();
    q.split_whitespace().all(|term| text.contains(term))
}

fn name_span(name: &str) -> Span<'static> {
    Span::styled(name.to_string(), Style::default().fg(C_PRIMARY))
}

fn price_spans(gold: u32, wood: u32) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled("  ", Style::default()),
        Span::styled(format!("{gold}g"), Style::default().fg(C_GOLD)),
    ];
    if wood > 0 {
        spans.push(Span::styled(" ", Style::default()));
        spans.push(Span::styled(format!("{wood}w"), Style::default().fg(C_WOOD)));
    }
    spans
}

pub(crate) fn ability_lines(abilities: &[Ability]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for ability in abilities {
        lines.push(Line::from(Span::styled(
            ability.name.clone(),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )));
        if !ability.description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", ability.description),
                Style::default().fg(C_SECONDARY),
            )));
        }
    }
    lines
}

fn description_lines(description: &str) -> Vec<Line<'static>> {
    if description.is_empty() {
        return Vec::new();
    }
    vec![Line::from(Span::styled(
        description.to_string(),
        Style::default().fg(C_SECONDARY),
    ))]
}

// ── Heroes (race) and Tavern (neutral heroes) ────────────────────────────────

pub struct HeroesCatalog;
pub struct TavernCatalog;

fn hero_row(hero: &Hero) -> Line<'static> {
    let mut spans = vec![name_span(&hero.name)];
    spans.extend(price_spans(hero.cost, 0));
    spans.push(Span::styled(
        format!("  {}", hero.attack_type),
        Style::default().fg(C_MUTED),
    ));
    Line::from(spans)
}

fn hero_stats(hero: &Hero) -> Vec<(&'static str, String)> {
    vec![
        ("Health", hero.health.to_string()),
        ("Damage", hero.damage.to_string()),
        ("Move", hero.movement.to_string()),
        ("Attack", hero.attack_type.clone()),
        ("Cost", format!("{}g", hero.cost)),
    ]
}

macro_rules! hero_catalog {
    ($name:ident, $screen:expr, $needs_faction:expr) => {
        impl Catalog for $name {
            type Entity = Hero;
            type Detail = Vec<Ability>;

            const SCREEN: Screen = $screen;

            fn needs_faction() -> bool {
                $needs_faction
            }

            fn id(entity: &Hero) -> EntityId {
                entity.id
            }

            fn icon(entity: &Hero) -> &str {
                &entity.icon
            }

            fn matches(entity: &Hero, query: &str) -> bool {
                name_matches(&entity.name, query)
            }

            fn row_line(entity: &Hero) -> Line<'static> {
                hero_row(entity)
            }

            fn stat_rows(entity: &Hero) -> Vec<(&'static str, String)> {
                hero_stats(entity)
            }

            fn detail_request(entity: &Hero) -> Option<DetailRequest> {
                Some(DetailRequest::Hero(entity.id))
            }

            fn collection_from(payload: CollectionPayload) -> Option<Vec<Hero>> {
                match payload {
                    CollectionPayload::Heroes(heroes) => Some(heroes),
                    _ => None,
                }
            }

            fn detail_from(payload: DetailPayload) -> Option<Vec<Ability>> {
                match payload {
                    DetailPayload::Abilities(abilities) => Some(abilities),
                    _ => None,
                }
            }

            fn detail_lines(detail: &Vec<Ability>) -> Vec<Line<'static>> {
                ability_lines(detail)
            }
        }
    };
}

hero_catalog!(HeroesCatalog, Screen::Heroes, true);
hero_catalog!(TavernCatalog, Screen::Tavern, false);

// ── Units ─────────────────────────────────────────────────────────────────────

pub struct UnitsCatalog;

impl Catalog for UnitsCatalog {
    type Entity = Unit;
    type Detail = Vec<Ability>;

    const SCREEN: Screen = Screen::Units;

    fn id(entity: &Unit) -> EntityId {
        entity.id
    }

    fn icon(entity: &Unit) -> &str {
        &entity.icon
    }

    fn matches(entity: &Unit, query: &str) -> bool {
        name_matches(&format!("{} {}", entity.name, entity.unit_type), query)
    }

    fn row_line(entity: &Unit) -> Line<'static> {
        let mut spans = vec![name_span(&entity.name)];
        spans.extend(price_spans(entity.price_gold, entity.price_wood));
        spans.push(Span::styled(
            format!("  T{}", entity.tech),
            Style::default().fg(C_MUTED),
        ));
        if entity.special_unit {
            spans.push(Span::styled("  ★", Style::default().fg(C_GOLD)));
        }
        Line::from(spans)
    }

    fn stat_rows(entity: &Unit) -> Vec<(&'static str, String)> {
        vec![
            ("Health", entity.health.to_string()),
            ("Damage", entity.damage.to_string()),
            ("Range", entity.range.to_string()),
            ("Move", entity.movement.to_string()),
            ("Tech", entity.tech.to_string()),
            ("Attack", entity.attack_type.clone()),
            ("Type", entity.unit_type.clone()),
        ]
    }

    fn detail_request(entity: &Unit) -> Option<DetailRequest> {
        Some(DetailRequest::Unit(entity.id))
    }

    fn collection_from(payload: CollectionPayload) -> Option<Vec<Unit>> {
        match payload {
            CollectionPayload::Units(units) => Some(units),
            _ => None,
        }
    }

    fn detail_from(payload: DetailPayload) -> Option<Vec<Ability>> {
        match payload {
            DetailPayload::Abilities(abilities) => Some(abilities),
            _ => None,
        }
    }

    fn detail_lines(detail: &Vec<Ability>) -> Vec<Line<'static>> {
        ability_lines(detail)
    }
}

// ── Buildings ─────────────────────────────────────────────────────────────────

pub struct BuildingsCatalog;

impl Catalog for BuildingsCatalog {
    type Entity = Building;
    type Detail = Vec<Unit>;

    const SCREEN: Screen = Screen::Buildings;

    fn id(entity: &Building) -> EntityId {
        entity.id
    }

    fn icon(entity: &Building) -> &str {
        &entity.icon
    }

    fn matches(entity: &Building, query: &str) -> bool {
        name_matches(&entity.name, query)
    }

    fn row_line(entity: &Building) -> Line<'static> {
        let mut spans = vec![name_span(&entity.name)];
        spans.extend(price_spans(entity.price_gold, entity.price_wood));
        Line::from(spans)
    }

    fn stat_rows(entity: &Building) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Gold", format!("{}g", entity.price_gold)),
            ("Wood", format!("{}w", entity.price_wood)),
        ];
        if !entity.description.is_empty() {
            rows.push(("Info", entity.description.clone()));
        }
        rows
    }

    fn detail_request(entity: &Building) -> Option<DetailRequest> {
        Some(DetailRequest::Building(entity.id))
    }

    fn collection_from(payload: CollectionPayload) -> Option<Vec<Building>> {
        match payload {
            CollectionPayload::Buildings(buildings) => Some(buildings),
            _ => None,
        }
    }

    fn detail_from(payload: DetailPayload) -> Option<Vec<Unit>> {
        match payload {
            DetailPayload::Units(units) => Some(units),
            _ => None,
        }
    }

    fn detail_lines(detail: &Vec<Unit>) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for unit in detail {
            lines.push(Line::from(Span::styled(
                unit.name.clone(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "  T{}  {}hp  {}dmg  {}g {}w",
                    unit.tech, unit.health, unit.damage, unit.price_gold, unit.price_wood
                ),
                Style::default().fg(C_SECONDARY),
            )));
        }
        lines
    }

    fn detail_heading() -> &'static str {
        "Units:"
    }

    fn loading_text() -> &'static str {
        "Loading units..."
    }

    fn empty_text() -> &'static str {
        "No units available."
    }
}

// ── Shop (race items) and Neutral shop ───────────────────────────────────────

pub struct ShopCatalog;
pub struct NeutralShopCatalog;

fn item_row(item: &Item) -> Line<'static> {
    let mut spans = vec![name_span(&item.name)];
    spans.extend(price_spans(item.price_gold, item.price_wood));
    if !item.kind.is_empty() {
        spans.push(Span::styled(
            format!("  {}", item.kind),
            Style::default().fg(C_MUTED),
        ));
    }
    Line::from(spans)
}

fn item_stats(item: &Item) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Gold", format!("{}g", item.price_gold))];
    if item.price_wood > 0 {
        rows.push(("Wood", format!("{}w", item.price_wood)));
    }
    if !item.kind.is_empty() {
        rows.push(("Type", item.kind.clone()));
    }
    if !item.obtainability.is_empty() {
        rows.push(("Obtained", item.obtainability.clone()));
    }
    rows
}

macro_rules! item_catalog {
    ($name:ident, $screen:expr, $needs_faction:expr) => {
        impl Catalog for $name {
            type Entity = Item;
            type Detail = ();

            const SCREEN: Screen = $screen;

            fn needs_faction() -> bool {
                $needs_faction
            }

            fn id(entity: &Item) -> EntityId {
                entity.id
            }

            fn icon(entity: &Item) -> &str {
                &entity.icon
            }

            fn matches(entity: &Item, query: &str) -> bool {
                name_matches(&format!("{} {}", entity.name, entity.kind), query)
            }

            fn row_line(entity: &Item) -> Line<'static> {
                item_row(entity)
            }

            fn stat_rows(entity: &Item) -> Vec<(&'static str, String)> {
                item_stats(entity)
            }

            fn collection_from(payload: CollectionPayload) -> Option<Vec<Item>> {
                match payload {
                    CollectionPayload::Items(items) => Some(items),
                    _ => None,
                }
            }

            fn embedded_detail_lines(entity: &Item) -> Vec<Line<'static>> {
                description_lines(&entity.description)
            }

            fn detail_heading() -> &'static str {
                "Details:"
            }

            fn empty_text() -> &'static str {
                "No details available."
            }
        }
    };
}

item_catalog!(ShopCatalog, Screen::Shop, true);
item_catalog!(NeutralShopCatalog, Screen::NeutralShop, false);

// ── Blacksmith (upgrades, abilities embedded in the list) ────────────────────

pub struct BlacksmithCatalog;

impl Catalog for BlacksmithCatalog {
    type Entity = Upgrade;
    type Detail = ();

    const SCREEN: Screen = Screen::Blacksmith;

    fn id(entity: &Upgrade) -> EntityId {
        entity.id
    }

    fn icon(entity: &Upgrade) -> &str {
        &entity.icon
    }

    fn matches(entity: &Upgrade, query: &str) -> bool {
        name_matches(&entity.name, query)
    }

    fn row_line(entity: &Upgrade) -> Line<'static> {
        let mut spans = vec![name_span(&entity.name)];
        spans.extend(price_spans(entity.price_gold, entity.price_wood));
        spans.push(Span::styled(
            format!("  T{}", entity.tech),
            Style::default().fg(C_MUTED),
        ));
        Line::from(spans)
    }

    fn stat_rows(entity: &Upgrade) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Gold", format!("{}g", entity.price_gold)),
            ("Wood", format!("{}w", entity.price_wood)),
            ("Tech", entity.tech.to_string()),
        ];
        if !entity.description.is_empty() {
            rows.push(("Info", entity.description.clone()));
        }
        rows
    }

    fn collection_from(payload: CollectionPayload) -> Option<Vec<Upgrade>> {
        match payload {
            CollectionPayload::Upgrades(upgrades) => Some(upgrades),
            _ => None,
        }
    }

    fn embedded_detail_lines(entity: &Upgrade) -> Vec<Line<'static>> {
        ability_lines(&entity.ability)
    }
}

// ── Cards ─────────────────────────────────────────────────────────────────────

pub struct CardsCatalog;

impl Catalog for CardsCatalog {
    type Entity = Card;
    type Detail = ();

    const SCREEN: Screen = Screen::Cards;

    fn id(entity: &Card) -> EntityId {
        entity.id
    }

    fn icon(entity: &Card) -> &str {
        &entity.icon
    }

    fn matches(entity: &Card, query: &str) -> bool {
        name_matches(&entity.name, query)
    }

    fn row_line(entity: &Card) -> Line<'static> {
        let mut spans = vec![name_span(&entity.name)];
        if entity.times_in_deck > 0 {
            spans.push(Span::styled(
                format!("  ×{}", entity.times_in_deck),
                Style::default().fg(C_MUTED),
            ));
        }
        Line::from(spans)
    }

    fn stat_rows(entity: &Card) -> Vec<(&'static str, String)> {
        vec![("In deck", format!("×{}", entity.times_in_deck))]
    }

    fn collection_from(payload: CollectionPayload) -> Option<Vec<Card>> {
        match payload {
            CollectionPayload::Cards(cards) => Some(cards),
            _ => None,
        }
    }

    fn embedded_detail_lines(entity: &Card) -> Vec<Line<'static>> {
        description_lines(&entity.description)
    }

    fn detail_heading() -> &'static str {
        "Details:"
    }

    fn empty_text() -> &'static str {
        "No details available."
    }
}

// ── Creeps ────────────────────────────────────────────────────────────────────

pub struct CreepsCatalog;

impl Catalog for CreepsCatalog {
    type Entity = Creep;
    type Detail = Creep;

    const SCREEN: Screen = Screen::Creeps;

    fn needs_faction() -> bool {
        false
    }

    fn id(entity: &Creep) -> EntityId {
        entity.id
    }

    fn icon(entity: &Creep) -> &str {
        &entity.icon
    }

    fn matches(entity: &Creep, query: &str) -> bool {
        name_matches(&format!("{} {}", entity.name, entity.unit_type), query)
    }

    fn row_line(entity: &Creep) -> Line<'static> {
        Line::from(vec![
            name_span(&entity.name),
            Span::styled(
                format!("  lvl {}", entity.level),
                Style::default().fg(C_GOLD),
            ),
            Span::styled(
                format!("  {}", entity.unit_type),
                Style::default().fg(C_MUTED),
            ),
        ])
    }

    fn stat_rows(entity: &Creep) -> Vec<(&'static str, String)> {
        vec![
            ("Level", entity.level.to_string()),
            ("Health", entity.health.to_string()),
            ("Damage", entity.damage.to_string()),
            ("Attack", entity.attack_type.clone()),
            ("Type", entity.unit_type.clone()),
        ]
    }

    fn detail_request(entity: &Creep) -> Option<DetailRequest> {
        Some(DetailRequest::Creep(entity.id))
    }

    fn collection_from(payload: CollectionPayload) -> Option<Vec<Creep>> {
        match payload {
            CollectionPayload::Creeps(creeps) => Some(creeps),
            _ => None,
        }
    }

    fn detail_from(payload: DetailPayload) -> Option<Creep> {
        match payload {
            DetailPayload::Creep(creep) => Some(*creep),
            _ => None,
        }
    }

    fn detail_lines(detail: &Creep) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for item in &detail.item {
            lines.push(Line::from(Span::styled(
                item.name.clone(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )));
            if !item.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", item.description),
                    Style::default().fg(C_SECONDARY),
                )));
            }
        }
        lines
    }

    fn detail_heading() -> &'static str {
        "Items:"
    }

    fn loading_text() -> &'static str {
        "Loading items..."
    }

    fn empty_text() -> &'static str {
        "No items available."
    }
}

/// Heading line used above detail blocks.
pub fn heading_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, style_heading()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upgrade_with_ability() -> Upgrade {
        Upgrade {
            id: 2,
            name: "Sharpened Axes".into(),
            price_gold: 3,
            price_wood: 1,
            icon: "axes.png".into(),
            description: String::new(),
            tech: 2,
            race_id: Some(1),
            ability: vec![Ability {
                id: 5,
                name: "Cleave".into(),
                description: "Splash damage.".into(),
                icon: "cleave.png".into(),
                created_at: None,
                updated_at: None,
            }],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_name_matches_all_terms() {
        assert!(name_matches("Frost Wyrm rider", "wyrm frost"));
        assert!(!name_matches("Frost Wyrm", "wyrm fire"));
        assert!(name_matches("anything", "  "));
    }

    #[test]
    fn test_collection_from_rejects_wrong_payload() {
        let payload = CollectionPayload::Items(Vec::new());
        assert!(HeroesCatalog::collection_from(payload).is_none());
    }

    #[test]
    fn test_upgrade_embedded_abilities() {
        let upgrade = upgrade_with_ability();
        let lines = BlacksmithCatalog::embedded_detail_lines(&upgrade);
        // Name line plus description line.
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_creep_detail_from_unwraps_box() {
        let creep = Creep {
            id: 3,
            name: "Gnoll".into(),
            icon: "gnoll.png".into(),
            level: 2,
            health: 40,
            damage: 6,
            attack_type: "melee".into(),
            unit_type: "ground".into(),
            item: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        let detail = CreepsCatalog::detail_from(DetailPayload::Creep(Box::new(creep)));
        assert_eq!(detail.map(|c| c.id), Some(3));
    }
}
