use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// The fixed column set. The serialized names are part of the stored
/// board shape and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "inprogress",
            ColumnId::Done => "done",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(ColumnId::Todo),
            "inprogress" => Ok(ColumnId::InProgress),
            "done" => Ok(ColumnId::Done),
            other => Err(format!(
                "unknown column '{}' (expected one of: todo, inprogress, done)",
                other
            )),
        }
    }
}

/// A named bucket holding an ordered card sequence. Order is meaningful
/// and user-controlled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: ColumnId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            cards: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_id_serial_names() {
        for id in ColumnId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
            assert_eq!(id.as_str().parse::<ColumnId>().unwrap(), id);
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(ColumnId::Todo.title(), "To Do");
        assert_eq!(ColumnId::InProgress.title(), "In Progress");
        assert_eq!(ColumnId::Done.title(), "Done");
    }

    #[test]
    fn test_new_column_is_empty() {
        let column = Column::new(ColumnId::Todo);
        assert!(column.is_empty());
        assert_eq!(column.title, "To Do");
    }
}
