//! Fixed achievement catalog, baked in at compile time and immutable for the
//! process lifetime.

/// A single unlockable accomplishment.
///
/// `public_name` overrides `name` in community-facing messages when naming
/// the achievement would spoil the hunt; `None` means the real name is fine
/// to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: i32,
    pub name: &'static str,
    pub points: i32,
    pub description: &'static str,
    pub public_name: Option<&'static str>,
}

impl Achievement {
    /// Name safe to show on public channels.
    pub fn display_name(&self) -> &'static str {
        self.public_name.unwrap_or(self.name)
    }
}

pub const RICK_ROLLED: Achievement = Achievement {
    id: 1,
    name: "Rick Rolled",
    points: 1,
    description: "IYKYK",
    public_name: None,
};

pub const AROUND_THE_WORLD: Achievement = Achievement {
    id: 2,
    name: "Around the World",
    points: 10,
    description: "Played all of the games at least once.",
    public_name: None,
};

pub const SERIAL_PORT_INTERACTION: Achievement = Achievement {
    id: 3,
    name: "Serial Port Interaction",
    points: 5,
    description: "Interacted with the badge serial port",
    public_name: None,
};

pub const SECRET_FLAG: Achievement = Achievement {
    id: 4,
    name: "Secret Flag",
    points: 10,
    description: "Discovered the secret flag",
    public_name: None,
};

// Kept under wraps until the ceremony; community messages show the
// placeholder instead of the real name.
pub const BADGE_ACCESS_POINT: Achievement = Achievement {
    id: 5,
    name: "Badge Access Point",
    points: 10,
    description: "Enabled the badge access point",
    public_name: Some("[REDACTED]"),
};

pub const BADGE_WEB_AUTH: Achievement = Achievement {
    id: 6,
    name: "Badge Web Authentication",
    points: 10,
    description: "Unlocked web authentication with the badge",
    public_name: None,
};

pub const FLAG_TEXT: Achievement = Achievement {
    id: 7,
    name: "Flag Text",
    points: 10,
    description: "Flag Text",
    public_name: None,
};

pub const HELLO_WORLD: Achievement = Achievement {
    id: 8,
    name: "Hello World",
    points: 5,
    description: "Ahh... the classic.",
    public_name: None,
};

pub const CATALOG: [Achievement; 8] = [
    RICK_ROLLED,
    AROUND_THE_WORLD,
    SERIAL_PORT_INTERACTION,
    SECRET_FLAG,
    BADGE_ACCESS_POINT,
    BADGE_WEB_AUTH,
    FLAG_TEXT,
    HELLO_WORLD,
];

pub fn by_id(id: i32) -> Option<&'static Achievement> {
    CATALOG.iter().find(|achievement| achievement.id == id)
}
