use serde::{Deserialize, Serialize};

/// Whether the account has read an item.
///
/// Not part of an item's identity: the same cached item can be reported read
/// by one listing and unread by a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    Read,
    Unread,
}

impl ReadStatus {
    pub fn is_read(self) -> bool {
        self == Self::Read
    }
}

impl std::fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Unread => write!(f, "unread"),
        }
    }
}
