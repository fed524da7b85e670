use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A bookable room. The (building, floor, room_name) triple identifies a
/// room; the registry is fixed at process start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomDescriptor {
    pub building: String,
    pub floor: u32,
    pub room_name: String,
}

impl RoomDescriptor {
    pub fn new(building: &str, floor: u32, room_name: &str) -> Self {
        Self {
            building: building.to_string(),
            floor,
            room_name: room_name.to_string(),
        }
    }
}

impl std::fmt::Display for RoomDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "building {} - floor {} - room {}",
            self.building, self.floor, self.room_name
        )
    }
}

/// The static set of rooms available for booking, in listing order.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    rooms: Vec<RoomDescriptor>,
}

impl RoomRegistry {
    /// Loads the registry from a JSON array of room descriptors.
    pub fn from_config(path: &Path) -> Result<Self> {
        info!("Loading room registry from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading room registry {}", path.display()))?;
        let rooms: Vec<RoomDescriptor> = serde_json::from_str(&content)
            .map_err(|e| anyhow!("parsing room registry {}: {}", path.display(), e))?;
        if rooms.is_empty() {
            return Err(anyhow!("room registry {} is empty", path.display()));
        }
        Ok(Self { rooms })
    }

    /// The built-in campus: the two labs on A/4 plus rooms B4A through B4H.
    pub fn default_campus() -> Self {
        let mut rooms = vec![
            RoomDescriptor::new("A", 4, "Lab Software"),
            RoomDescriptor::new("A", 4, "Lab Hardware"),
        ];
        for letter in 'A'..='H' {
            rooms.push(RoomDescriptor::new("B", 4, &format!("B4{letter}")));
        }
        Self { rooms }
    }

    pub fn from_rooms(rooms: Vec<RoomDescriptor>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[RoomDescriptor] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
