use uuid::Uuid;

/// Strongly typed ID for shows
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ShowId(pub Uuid);

impl Default for ShowId {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowId {
    pub fn new() -> Self {
        ShowId(Uuid::now_v7())
    }
}

impl AsRef<Uuid> for ShowId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ShowId {
    fn from(id: Uuid) -> Self {
        ShowId(id)
    }
}

impl std::fmt::Display for ShowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
