use crate::hierarchy::{Hierarchy, PlayerRecord};

/// Valid choices for each dropdown level under a partial selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions<'a> {
    pub years: Vec<&'a str>,
    pub leagues: Vec<&'a str>,
    pub teams: Vec<&'a str>,
    pub players: Vec<(&'a str, &'a str)>,
}

/// Derives the choice lists for every level. `None` means nothing is
/// selected at that level. A key that is missing from the hierarchy narrows
/// everything below it to empty instead of failing.
pub fn resolve<'a>(
    hierarchy: Option<&'a Hierarchy>,
    year: Option<&str>,
    league: Option<&str>,
    team: Option<&str>,
) -> ResolvedOptions<'a> {
    let Some(hierarchy) = hierarchy else {
        return ResolvedOptions::default();
    };

    let years = hierarchy.years().collect();

    let league_map = year.and_then(|year| hierarchy.year(year));
    let leagues = league_map
        .map(|map| map.keys().collect())
        .unwrap_or_default();

    let team_map = league_map
        .zip(league)
        .and_then(|(map, league)| map.get(league));
    let teams = team_map.map(|map| map.keys().collect()).unwrap_or_default();

    let roster = team_map.zip(team).and_then(|(map, team)| map.get(team));
    let players = roster
        .map(|players| {
            players
                .iter()
                .map(|p| (p.local_name.as_str(), p.romanized_name.as_str()))
                .collect()
        })
        .unwrap_or_default();

    ResolvedOptions {
        years,
        leagues,
        teams,
        players,
    }
}

pub fn player_label(local_name: &str, romanized_name: &str) -> String {
    format!("{local_name} ({romanized_name})")
}

/// Maps a dropdown label back to its roster entry. Exact string match only.
pub fn find_player<'a>(
    hierarchy: &'a Hierarchy,
    year: &str,
    league: &str,
    team: &str,
    label: &str,
) -> Option<&'a PlayerRecord> {
    hierarchy
        .roster(year, league, team)?
        .iter()
        .find(|p| player_label(&p.local_name, &p.romanized_name) == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_parenthesised_romanization() {
        assert_eq!(player_label("山田", "Yamada"), "山田 (Yamada)");
    }

    #[test]
    fn team_without_league_is_ignored() {
        let h = Hierarchy::from_json_str(r#"{"2023":{"Central":{"Giants":[]}}}"#).unwrap();
        let out = resolve(Some(&h), Some("2023"), None, Some("Giants"));
        assert_eq!(out.leagues, vec!["Central"]);
        assert!(out.teams.is_empty());
        assert!(out.players.is_empty());
    }
}
