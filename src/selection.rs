#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Year,
    League,
    Team,
    Player,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Year, Level::League, Level::Team, Level::Player];

    pub fn index(self) -> usize {
        match self {
            Level::Year => 0,
            Level::League => 1,
            Level::Team => 2,
            Level::Player => 3,
        }
    }
}

pub fn level_label(level: Level) -> &'static str {
    match level {
        Level::Year => "Year",
        Level::League => "League",
        Level::Team => "Team",
        Level::Player => "Player",
    }
}

/// Text shown in a dropdown while nothing is chosen at that level.
pub fn placeholder(level: Level) -> &'static str {
    match level {
        Level::Year => "Select Year",
        Level::League => "Select League",
        Level::Team => "Select Team",
        Level::Player => "Select Player",
    }
}

/// Progress through the four cascading dropdowns. A level can only be set
/// once every level above it is set, and changing a level clears the ones
/// below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    NoneSelected,
    YearOnly {
        year: String,
    },
    YearLeague {
        year: String,
        league: String,
    },
    YearLeagueTeam {
        year: String,
        league: String,
        team: String,
    },
    FullySelected {
        year: String,
        league: String,
        team: String,
        player: String,
    },
}

impl Selection {
    pub fn year(&self) -> Option<&str> {
        self.get(Level::Year)
    }

    pub fn league(&self) -> Option<&str> {
        self.get(Level::League)
    }

    pub fn team(&self) -> Option<&str> {
        self.get(Level::Team)
    }

    pub fn player(&self) -> Option<&str> {
        self.get(Level::Player)
    }

    pub fn get(&self, level: Level) -> Option<&str> {
        self.parts()[level.index()]
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Selection::FullySelected { .. })
    }

    pub fn select_year(&mut self, year: impl Into<String>) -> bool {
        self.select(Level::Year, year)
    }

    pub fn select_league(&mut self, league: impl Into<String>) -> bool {
        self.select(Level::League, league)
    }

    pub fn select_team(&mut self, team: impl Into<String>) -> bool {
        self.select(Level::Team, team)
    }

    pub fn select_player(&mut self, player: impl Into<String>) -> bool {
        self.select(Level::Player, player)
    }

    /// Returns false and leaves the state untouched when a level above
    /// `level` is still unset.
    pub fn select(&mut self, level: Level, value: impl Into<String>) -> bool {
        let idx = level.index();
        let parts = self.parts();
        if parts[..idx].iter().any(Option::is_none) {
            return false;
        }
        let mut owned = owned_parts(parts, idx);
        owned[idx] = Some(value.into());
        *self = Self::from_parts(owned);
        true
    }

    /// Clears `level` and everything below it.
    pub fn reset_to(&mut self, level: Level) {
        let owned = owned_parts(self.parts(), level.index());
        *self = Self::from_parts(owned);
    }

    fn parts(&self) -> [Option<&str>; 4] {
        match self {
            Selection::NoneSelected => [None, None, None, None],
            Selection::YearOnly { year } => [Some(year.as_str()), None, None, None],
            Selection::YearLeague { year, league } => {
                [Some(year.as_str()), Some(league.as_str()), None, None]
            }
            Selection::YearLeagueTeam { year, league, team } => {
                [Some(year.as_str()), Some(league.as_str()), Some(team.as_str()), None]
            }
            Selection::FullySelected {
                year,
                league,
                team,
                player,
            } => [
                Some(year.as_str()),
                Some(league.as_str()),
                Some(team.as_str()),
                Some(player.as_str()),
            ],
        }
    }

    fn from_parts(parts: [Option<String>; 4]) -> Self {
        let [year, league, team, player] = parts;
        let Some(year) = year else {
            return Selection::NoneSelected;
        };
        let Some(league) = league else {
            return Selection::YearOnly { year };
        };
        let Some(team) = team else {
            return Selection::YearLeague { year, league };
        };
        let Some(player) = player else {
            return Selection::YearLeagueTeam { year, league, team };
        };
        Selection::FullySelected {
            year,
            league,
            team,
            player,
        }
    }
}

fn owned_parts(parts: [Option<&str>; 4], keep: usize) -> [Option<String>; 4] {
    let mut out: [Option<String>; 4] = Default::default();
    for (idx, part) in parts.into_iter().enumerate().take(keep) {
        out[idx] = part.map(str::to_string);
    }
    out
}
