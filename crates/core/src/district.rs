use serde::Serialize;

/// Administrative district: one of a fixed named set, each with a council
/// district number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct District {
    pub name: &'static str,
    pub number: u32,
}

/// The closed district lookup table. Numbers are not contiguous; the gaps
/// are retired districts.
pub const DISTRICTS: [District; 9] = [
    District { name: "Calumet", number: 1 },
    District { name: "Prairie Dunes", number: 3 },
    District { name: "Thunderbird", number: 4 },
    District { name: "Checaugau", number: 5 },
    District { name: "Iron Horse", number: 6 },
    District { name: "Tri-Star", number: 7 },
    District { name: "Five Creeks", number: 9 },
    District { name: "Tall Grass", number: 11 },
    District { name: "Trailblazer", number: 12 },
];

impl District {
    /// Case-insensitive substring lookup against the closed table. When a
    /// line mentions more than one district, the later table entry wins.
    pub fn find_in_line(line: &str) -> Option<District> {
        let lower = line.to_lowercase();
        let mut found = None;
        for district in DISTRICTS {
            if lower.contains(&district.name.to_lowercase()) {
                found = Some(district);
            }
        }
        found
    }
}
