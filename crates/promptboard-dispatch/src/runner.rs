use promptboard_core::{BoardError, BoardResult};
use promptboard_domain::{Board, CardId, RunOutcome};

use crate::client::CompletionService;

/// Drive one card through a full run attempt: credential guard, optimistic
/// move into In Progress, a single awaited dispatch, then the terminal
/// transition.
///
/// The credential check happens before any column is mutated; a missing
/// credential leaves the board untouched and no request is issued. A
/// dispatch failure is reported through the returned `RunOutcome`, not as
/// an `Err`, since the board has already been put back into a consistent
/// state.
pub async fn run_card(
    board: &mut Board,
    id: &CardId,
    credential: &str,
    service: &dyn CompletionService,
) -> BoardResult<RunOutcome> {
    if credential.trim().is_empty() {
        return Err(BoardError::MissingCredential);
    }

    let card = board.begin_run(id)?;
    tracing::info!("Running card {} ({})", card.id, card.model);

    let outcome = match service.complete(&card).await {
        Ok(text) => RunOutcome::Completed { text },
        Err(e) => {
            tracing::warn!("Run for card {} failed: {}", card.id, e);
            RunOutcome::Failed {
                message: e.to_string(),
            }
        }
    };

    board.settle_run(id, outcome.clone())?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockCompletionService;
    use promptboard_core::BoardError;
    use promptboard_domain::{Card, ColumnId, Model, SamplingConfig};

    fn board_with_card() -> (Board, CardId) {
        let mut board = Board::new();
        let card = Card::new(
            "Say hello".to_string(),
            Model::Gpt4oMini,
            SamplingConfig {
                temperature: 0.7,
                max_tokens: 6000,
            },
        )
        .unwrap();
        let id = card.id.clone();
        board.add_card(card).unwrap();
        (board, id)
    }

    #[tokio::test]
    async fn test_empty_credential_rejects_without_dispatch_or_mutation() {
        let (mut board, id) = board_with_card();
        let before = board.clone();

        let mut service = MockCompletionService::new();
        service.expect_complete().times(0);

        let err = run_card(&mut board, &id, "  ", &service).await.unwrap_err();
        assert!(matches!(err, BoardError::MissingCredential));
        assert_eq!(board, before);
        assert_eq!(board.find_card(&id), Some((ColumnId::Todo, 0)));
    }

    #[tokio::test]
    async fn test_successful_run_ends_in_done_with_result() {
        let (mut board, id) = board_with_card();

        let mut service = MockCompletionService::new();
        service
            .expect_complete()
            .times(1)
            .returning(|_| Ok("Hello!".to_string()));

        let outcome = run_card(&mut board, &id, "sk-test", &service)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                text: "Hello!".to_string()
            }
        );
        assert_eq!(board.find_card(&id), Some((ColumnId::Done, 0)));
        assert_eq!(
            board.get_card(&id).unwrap().result.as_deref(),
            Some("Hello!")
        );
    }

    #[tokio::test]
    async fn test_failed_run_returns_card_to_todo_with_message() {
        let (mut board, id) = board_with_card();
        let pre_run = board.get_card(&id).unwrap().clone();

        let mut service = MockCompletionService::new();
        service
            .expect_complete()
            .times(1)
            .returning(|_| Err(BoardError::Completion("connection refused".into())));

        let outcome = run_card(&mut board, &id, "sk-test", &service)
            .await
            .unwrap();
        match outcome {
            RunOutcome::Failed { message } => {
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected failure outcome, got {:?}", other),
        }
        assert_eq!(board.find_card(&id), Some((ColumnId::Todo, 0)));
        assert_eq!(board.get_card(&id).unwrap(), &pre_run);
        assert!(board.get_card(&id).unwrap().result.is_none());
    }

    #[tokio::test]
    async fn test_run_rejects_card_not_in_todo() {
        let (mut board, id) = board_with_card();
        board.begin_run(&id).unwrap();

        let mut service = MockCompletionService::new();
        service.expect_complete().times(0);

        let err = run_card(&mut board, &id, "sk-test", &service)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));
    }
}
