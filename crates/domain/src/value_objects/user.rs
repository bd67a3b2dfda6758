//! Identity supplied by the caller for authorship fields.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// The acting user, as provided by the surrounding session layer.
///
/// The core never authenticates; it only stamps this onto `createdBy` /
/// `authorId` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
}

impl UserRef {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
