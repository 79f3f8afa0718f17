//! Element roles for the delegated pointer handler.

pub const ROLE_ATTRIBUTE: &str = "data-role";
pub const ROLE_SELECTOR: &str = "[data-role]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Interactive,
    Tilt,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "interactive" => Some(Self::Interactive),
            "tilt" => Some(Self::Tilt),
            _ => None,
        }
    }

    pub fn tilts(self) -> bool {
        matches!(self, Self::Tilt)
    }
}
