use promptboard_core::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};

use crate::card::{Card, CardId};
use crate::column::{Column, ColumnId};

/// The settled result of one dispatch attempt, consumed by the state
/// machine to perform the terminal transition.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed { text: String },
    Failed { message: String },
}

/// The three-column board. Serializes as the bare column array, which is
/// exactly the stored snapshot shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            columns: ColumnId::ALL.into_iter().map(Column::new).collect(),
        }
    }

    /// Structural check for deserialized boards: exactly the three known
    /// columns, in canonical order.
    pub fn validate(&self) -> BoardResult<()> {
        let ids: Vec<ColumnId> = self.columns.iter().map(|c| c.id).collect();
        if ids != ColumnId::ALL {
            return Err(BoardError::Serialization(format!(
                "expected columns [todo, inprogress, done], found [{}]",
                ids.iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// Locate a card: which column holds it, and at what index.
    pub fn find_card(&self, id: &CardId) -> Option<(ColumnId, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .cards
                .iter()
                .position(|card| &card.id == id)
                .map(|index| (column.id, index))
        })
    }

    pub fn get_card(&self, id: &CardId) -> Option<&Card> {
        self.columns
            .iter()
            .find_map(|column| column.cards.iter().find(|card| &card.id == id))
    }

    /// New cards always enter at the tail of To Do.
    pub fn add_card(&mut self, card: Card) -> BoardResult<()> {
        if self.find_card(&card.id).is_some() {
            return Err(BoardError::Internal(format!(
                "card {} is already on the board",
                card.id
            )));
        }
        let column = self
            .column_mut(ColumnId::Todo)
            .ok_or_else(|| BoardError::Internal("todo column missing".into()))?;
        column.cards.push(card);
        Ok(())
    }

    /// Drop reconciliation: splice the card out of the source sequence and
    /// into the destination sequence at `dest_index`, clamped to the
    /// destination's post-removal length. Same column degrades to a pure
    /// reorder. All other columns are untouched.
    pub fn move_card(
        &mut self,
        source: ColumnId,
        source_index: usize,
        dest: ColumnId,
        dest_index: usize,
    ) -> BoardResult<()> {
        let source_column = self
            .column_mut(source)
            .ok_or_else(|| BoardError::Internal(format!("column {} missing", source)))?;
        if source_index >= source_column.cards.len() {
            return Err(BoardError::NotFound(format!(
                "no card at index {} in {}",
                source_index, source
            )));
        }
        let card = source_column.cards.remove(source_index);

        let dest_column = match self.column_mut(dest) {
            Some(column) => column,
            None => return Err(BoardError::Internal(format!("column {} missing", dest))),
        };
        let index = dest_index.min(dest_column.cards.len());
        dest_column.cards.insert(index, card);
        Ok(())
    }

    /// Move a card by identity, appending to the destination tail unless a
    /// position is given.
    pub fn move_card_by_id(
        &mut self,
        id: &CardId,
        dest: ColumnId,
        position: Option<usize>,
    ) -> BoardResult<()> {
        let (source, source_index) = self
            .find_card(id)
            .ok_or_else(|| BoardError::NotFound(format!("card {}", id)))?;
        let dest_index = position.unwrap_or(usize::MAX);
        self.move_card(source, source_index, dest, dest_index)
    }

    /// `Queued -> Running`: relocate the card from To Do to the tail of In
    /// Progress and hand back a snapshot of it for the dispatcher. The
    /// credential precondition is checked by the caller before this
    /// mutation happens.
    pub fn begin_run(&mut self, id: &CardId) -> BoardResult<Card> {
        match self.find_card(id) {
            Some((ColumnId::Todo, index)) => {
                let card = self
                    .column_mut(ColumnId::Todo)
                    .ok_or_else(|| BoardError::Internal("todo column missing".into()))?
                    .cards
                    .remove(index);
                let snapshot = card.clone();
                self.column_mut(ColumnId::InProgress)
                    .ok_or_else(|| BoardError::Internal("inprogress column missing".into()))?
                    .cards
                    .push(card);
                Ok(snapshot)
            }
            Some((other, _)) => Err(BoardError::Validation(format!(
                "card {} is in {} and cannot be run",
                id, other
            ))),
            None => Err(BoardError::NotFound(format!("card {}", id))),
        }
    }

    /// `Running -> Completed`: attach the result and append to Done. The
    /// card is taken from wherever it currently sits, so a concurrent
    /// relocation cannot orphan the settle.
    pub fn complete_run(&mut self, id: &CardId, result: String) -> BoardResult<()> {
        let mut card = self.take_card(id)?;
        card.result = Some(result);
        self.column_mut(ColumnId::Done)
            .ok_or_else(|| BoardError::Internal("done column missing".into()))?
            .cards
            .push(card);
        Ok(())
    }

    /// `Running -> Failed -> Queued`: return the card to the tail of To Do
    /// in its pre-run shape. No partial result is retained; the error
    /// message travels separately as a transient notification.
    pub fn fail_run(&mut self, id: &CardId) -> BoardResult<()> {
        let card = self.take_card(id)?;
        self.column_mut(ColumnId::Todo)
            .ok_or_else(|| BoardError::Internal("todo column missing".into()))?
            .cards
            .push(card);
        Ok(())
    }

    pub fn settle_run(&mut self, id: &CardId, outcome: RunOutcome) -> BoardResult<()> {
        match outcome {
            RunOutcome::Completed { text } => self.complete_run(id, text),
            RunOutcome::Failed { .. } => self.fail_run(id),
        }
    }

    fn take_card(&mut self, id: &CardId) -> BoardResult<Card> {
        let (column_id, index) = self
            .find_card(id)
            .ok_or_else(|| BoardError::NotFound(format!("card {}", id)))?;
        let column = self
            .column_mut(column_id)
            .ok_or_else(|| BoardError::Internal(format!("column {} missing", column_id)))?;
        Ok(column.cards.remove(index))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
