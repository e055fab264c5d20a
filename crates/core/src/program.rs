use serde::Serialize;
use std::fmt;

/// Scouting program classification, a closed set of five values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Program {
    #[serde(rename = "Scouts BSA")]
    ScoutsBsa,
    #[serde(rename = "Cub Scouts")]
    CubScouts,
    #[serde(rename = "Venturing")]
    Venturing,
    #[serde(rename = "Sea Scouts")]
    SeaScouts,
    #[serde(rename = "Exploring")]
    Exploring,
}

impl Program {
    /// Classification precedence order: when a line names several programs,
    /// the earliest entry here wins for that line.
    pub const ALL: [Program; 5] = [
        Program::ScoutsBsa,
        Program::CubScouts,
        Program::Venturing,
        Program::SeaScouts,
        Program::Exploring,
    ];

    /// Formal program name as it appears on receipts.
    pub fn name(self) -> &'static str {
        match self {
            Program::ScoutsBsa => "Scouts BSA",
            Program::CubScouts => "Cub Scouts",
            Program::Venturing => "Venturing",
            Program::SeaScouts => "Sea Scouts",
            Program::Exploring => "Exploring",
        }
    }

    /// Unit-type keyword paired with the program ("Troop 123" is Scouts BSA).
    pub fn unit_keyword(self) -> &'static str {
        match self {
            Program::ScoutsBsa => "Troop",
            Program::CubScouts => "Pack",
            Program::Venturing => "Crew",
            Program::SeaScouts => "Ship",
            Program::Exploring => "Post",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
