//! Screens, component ids, and the Action enum dispatched by the App.

use grimoire_api::model::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    RaceSelect,
    RaceOverview,
    Heroes,
    Tavern,
    Units,
    Buildings,
    Shop,
    NeutralShop,
    Blacksmith,
    Cards,
    Creeps,
    Rules,
    Menu,
    HelpOverlay,
}

/// One screen of the reference browser. Labels are the drawer labels the
/// board-game group uses, so they stay in Czech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Races,
    Lobby,
    Heroes,
    Tavern,
    Units,
    Shop,
    NeutralShop,
    Blacksmith,
    Cards,
    Buildings,
    Creeps,
    Rules,
}

impl Screen {
    /// Menu/cycle order. `Races` sits last as the "change race" entry.
    pub const ALL: [Screen; 12] = [
        Screen::Lobby,
        Screen::Heroes,
        Screen::Tavern,
        Screen::Units,
        Screen::Shop,
        Screen::NeutralShop,
        Screen::Blacksmith,
        Screen::Cards,
        Screen::Buildings,
        Screen::Creeps,
        Screen::Rules,
        Screen::Races,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Races => "Změnit rasu",
            Screen::Lobby => "Lobby",
            Screen::Heroes => "Hrdinové",
            Screen::Tavern => "Taverna",
            Screen::Units => "Jednotky",
            Screen::Shop => "Obchod",
            Screen::NeutralShop => "Neutrální obchod",
            Screen::Blacksmith => "Kovárna",
            Screen::Cards => "Karty",
            Screen::Buildings => "Budovy",
            Screen::Creeps => "Creepy",
            Screen::Rules => "Pravidla",
        }
    }

    /// Pane title, lowercase to match the chrome style.
    pub fn title(self) -> &'static str {
        match self {
            Screen::Races => "races",
            Screen::Lobby => "lobby",
            Screen::Heroes => "heroes",
            Screen::Tavern => "tavern",
            Screen::Units => "units",
            Screen::Shop => "shop",
            Screen::NeutralShop => "neutral shop",
            Screen::Blacksmith => "blacksmith",
            Screen::Cards => "cards",
            Screen::Buildings => "buildings",
            Screen::Creeps => "creeps",
            Screen::Rules => "rules",
        }
    }

    /// Digit shortcut shown in the pane header ('1'-'9', then '0').
    pub fn digit(self) -> Option<char> {
        let idx = Self::ALL.iter().position(|s| *s == self)?;
        match idx {
            0..=8 => Some(char::from(b'1' + idx as u8)),
            9 => Some('0'),
            _ => None,
        }
    }

    pub fn from_digit(c: char) -> Option<Screen> {
        let idx = match c {
            '1'..='9' => (c as u8 - b'1') as usize,
            '0' => 9,
            _ => return None,
        };
        Self::ALL.get(idx).copied()
    }

    pub fn next(self) -> Screen {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Screen {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which detail endpoint to hit for an expanded row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailRequest {
    Hero(EntityId),
    Unit(EntityId),
    Building(EntityId),
    Creep(EntityId),
}

#[derive(Debug, Clone)]
pub enum Action {
    SwitchScreen(Screen),
    /// Race picked on the races screen; also navigates to the lobby.
    ChooseFaction(String),
    FetchCollection {
        screen: Screen,
        generation: u64,
    },
    FetchDetail {
        screen: Screen,
        id: EntityId,
        request: DetailRequest,
        generation: u64,
    },
    OpenFilter,
    CloseFilter,
    CopyToClipboard(String),
    ToggleMenu,
    ToggleHelp,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_cover_first_ten_screens() {
        assert_eq!(Screen::Lobby.digit(), Some('1'));
        assert_eq!(Screen::Creeps.digit(), Some('0'));
        assert_eq!(Screen::Rules.digit(), None);
        assert_eq!(Screen::from_digit('2'), Some(Screen::Heroes));
        assert_eq!(Screen::from_digit('0'), Some(Screen::Creeps));
    }

    #[test]
    fn test_next_prev_cycle() {
        let mut screen = Screen::Lobby;
        for _ in 0..Screen::ALL.len() {
            screen = screen.next();
        }
        assert_eq!(screen, Screen::Lobby);
        assert_eq!(Screen::Lobby.prev(), Screen::Races);
    }
}
