use serde::Deserialize;

// The serde derives here leak the engine's wire shape into the domain, which is
// the same pragmatic trade-off the upstream client relies on.

// Game metadata as reported by the engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Game {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub status: String,
    pub width: u32,
    pub height: u32,
    // Older engine builds omit the participant list on the game document.
    #[serde(default)]
    pub snakes: Vec<Participant>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Participant {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

// One recorded simulation tick.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameFrame {
    pub turn: u64,
    #[serde(default)]
    pub snakes: Vec<Snake>,
    #[serde(default)]
    pub food: Vec<Point>,
    #[serde(default)]
    pub hazards: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snake {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub body: Vec<Point>,
    #[serde(default)]
    pub health: u32,
    #[serde(default)]
    pub death: Option<Death>,
}

impl Snake {
    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub fn head(&self) -> Option<&Point> {
        self.body.first()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Death {
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub turn: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Point {
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
}
