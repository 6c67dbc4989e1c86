// src/combat/src/taunt.rs
//! Lines shouted when an attack is launched.

use crate::attack::Attack;
use crate::battle::Side;
use crate::rng::BattleRng;

const PLAYER_LINES: [&[&str]; 3] = [
    &["Yo, this rhyme is gonna break you!", "Hot like a freestyle cypher!"],
    &["My flow makes you shake!", "You can't keep up with my rhythm!"],
    &["Diss track incoming, your career is over!"],
];

const ENEMY_LINES: [&[&str]; 3] = [
    &["You think you can punchline me?", "I'll knock you out with my rhymes!"],
    &["My flow is on another level!", "Too slow for me!"],
    &["Diss track! You're gonna regret this!"],
];

/// 一句台词及说话方
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Taunt {
    pub speaker: Side,
    pub line: &'static str,
}

pub fn lines_for(speaker: Side, attack: Attack) -> &'static [&'static str] {
    match speaker {
        Side::Player => PLAYER_LINES[attack.index()],
        Side::Enemy => ENEMY_LINES[attack.index()],
    }
}

/// 随机挑选一句台词
pub fn pick(speaker: Side, attack: Attack, rng: &mut BattleRng) -> Taunt {
    let line = rng
        .choose(lines_for(speaker, attack))
        .copied()
        .unwrap_or_default();
    Taunt { speaker, line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_attack_has_lines_on_both_sides() {
        for attack in Attack::iter() {
            assert!(!lines_for(Side::Player, attack).is_empty());
            assert!(!lines_for(Side::Enemy, attack).is_empty());
        }
    }

    #[test]
    fn picked_line_belongs_to_the_attack() {
        let mut rng = BattleRng::new(3);
        let taunt = pick(Side::Enemy, Attack::Flow, &mut rng);
        assert_eq!(taunt.speaker, Side::Enemy);
        assert!(lines_for(Side::Enemy, Attack::Flow).contains(&taunt.line));
    }
}
