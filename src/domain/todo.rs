use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Key of a stored [`TodoItem`]. Zero means "not yet assigned".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl TodoId {
    pub const UNASSIGNED: TodoId = TodoId(0);

    pub fn is_unassigned(self) -> bool { self == Self::UNASSIGNED }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl From<i64> for TodoId {
    fn from(value: i64) -> Self { Self(value) }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TodoItem {
    #[schema(value_type = i64, example = 0)]
    pub id: TodoId,
    #[schema(example = "buy milk")]
    pub name: String,
    pub is_complete: bool,
}

impl TodoItem {
    pub fn new(id: impl Into<TodoId>, name: impl Into<String>, is_complete: bool) -> Self {
        Self { id: id.into(), name: name.into(), is_complete }
    }
}
