use serde::{Deserialize, Serialize};

/// A strategy as seen by the name lookup: its id and the name the user gave it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StrategyRef {
    pub id: String,
    pub name: String,
}
