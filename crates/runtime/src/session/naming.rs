use std::collections::HashMap;

use battle_core::Combatant;

const PLAYER_PREFIX: &str = "Player";

/// Per-template spawn counters behind the `"<Name> <n>"` display names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct NameCounters {
    templates: HashMap<String, u32>,
    players: u32,
}

impl NameCounters {
    pub(super) fn next_enemy(&mut self, base: &str) -> String {
        let n = self.templates.entry(base.to_owned()).or_default();
        *n += 1;
        format!("{base} {n}")
    }

    pub(super) fn next_player(&mut self) -> String {
        self.players += 1;
        format!("{PLAYER_PREFIX} {}", self.players)
    }

    /// Rebuilds counters from restored names so new spawns never reuse a
    /// number. An unnumbered name counts as the first of its base.
    pub(super) fn rebuild<'a>(combatants: impl IntoIterator<Item = &'a Combatant>) -> Self {
        let mut counters = Self::default();
        let mut players_seen = 0;
        for combatant in combatants {
            let numbered = split_numbered(&combatant.name);
            if combatant.is_player() {
                players_seen += 1;
                let n = match numbered {
                    Some((PLAYER_PREFIX, n)) => n,
                    _ => 0,
                };
                counters.players = counters.players.max(players_seen).max(n);
                continue;
            }
            let (base, n) = numbered.unwrap_or((combatant.name.as_str(), 1));
            let entry = counters.templates.entry(base.to_owned()).or_default();
            *entry = (*entry).max(n);
        }
        counters
    }
}

fn split_numbered(name: &str) -> Option<(&str, u32)> {
    let (base, n) = name.rsplit_once(' ')?;
    Some((base, n.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_independent_per_base_name() {
        let mut names = NameCounters::default();
        assert_eq!(names.next_enemy("Goblin"), "Goblin 1");
        assert_eq!(names.next_enemy("Orc"), "Orc 1");
        assert_eq!(names.next_enemy("Goblin"), "Goblin 2");
        assert_eq!(names.next_player(), "Player 1");
    }

    #[test]
    fn split_handles_multi_word_names() {
        assert_eq!(split_numbered("Cave Troll 12"), Some(("Cave Troll", 12)));
        assert_eq!(split_numbered("Boss"), None);
        assert_eq!(split_numbered("Boss Prime"), None);
    }
}
