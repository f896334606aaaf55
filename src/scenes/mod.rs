//! The three demo programs and their scenes.

pub mod fight;
pub mod network;
pub mod stories;

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::engine::Driver;
use fight::Fight;
use network::Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Network,
    Fight,
    Stories,
}

impl Program {
    pub const ALL: [Program; 3] = [Program::Network, Program::Fight, Program::Stories];

    pub fn name(self) -> &'static str {
        match self {
            Program::Network => "network",
            Program::Fight => "fight",
            Program::Stories => "stories",
        }
    }

    /// Build a fresh driver with this program's scenes.
    pub fn driver(self) -> Driver {
        match self {
            Program::Network => Driver::single(Network::new()),
            Program::Fight => Driver::single(Fight::new()),
            Program::Stories => Driver::new(stories::storyboard()),
        }
    }

    /// Key hints for the menu bar.
    pub fn menu(self) -> &'static [&'static str] {
        match self {
            Program::Network => &["[a][d] rotate", "[p] pause", "[s] start", "[r] reset", "[Esc] quit"],
            Program::Fight => &["[f] fight", "[s] start", "[r] reset", "[Esc] quit"],
            Program::Stories => &["[1-9][0] scene", "[s] start", "[r] reset", "[Esc] quit"],
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Program {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Program::ALL.into_iter().find(|p| p.name() == s) {
            Some(program) => Ok(program),
            None => bail!("Unknown program '{s}' (expected network, fight or stories)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for program in Program::ALL {
            assert_eq!(program.name().parse::<Program>().unwrap(), program);
        }
        assert!("ann".parse::<Program>().is_err());
    }

    #[test]
    fn only_stories_has_several_scenes() {
        assert_eq!(Program::Network.driver().scene_count(), 1);
        assert_eq!(Program::Fight.driver().scene_count(), 1);
        assert_eq!(Program::Stories.driver().scene_count(), 10);
    }
}
