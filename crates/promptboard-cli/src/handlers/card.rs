use crate::cli::{CardAction, CardCreateArgs};
use crate::context::CliContext;
use crate::output;
use promptboard_core::AppConfig;
use promptboard_dispatch::{run_card, ChatClient, DEFAULT_API_BASE};
use promptboard_domain::{Card, ColumnId, RunOutcome, SamplingConfig};
use promptboard_persistence::write_result_file;
use serde::Serialize;

#[derive(Serialize)]
struct CardListing<'a> {
    column: ColumnId,
    #[serde(flatten)]
    card: &'a Card,
}

pub async fn handle(ctx: &mut CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Create(args) => {
            let card = build_card(&args).unwrap_or_else(|e| output::output_error(&e.to_string()));
            ctx.board.add_card(card.clone())?;
            ctx.save_board().await?;
            output::output_success(&card);
        }
        CardAction::List { column } => {
            let listings: Vec<CardListing> = ctx
                .board
                .columns()
                .iter()
                .filter(|c| column.map(|wanted| c.id == wanted).unwrap_or(true))
                .flat_map(|c| {
                    c.cards
                        .iter()
                        .map(|card| CardListing { column: c.id, card })
                })
                .collect();
            output::output_list(listings);
        }
        CardAction::Get { id } => match ctx.board.get_card(&id) {
            Some(card) => output::output_success(card),
            None => output::output_error(&format!("Card not found: {}", id)),
        },
        CardAction::Move {
            id,
            column,
            position,
        } => {
            if let Err(e) = ctx.board.move_card_by_id(&id, column, position) {
                output::output_error(&e.to_string());
            }
            ctx.save_board().await?;
            match ctx.board.get_card(&id) {
                Some(card) => output::output_success(card),
                None => output::output_error(&format!("Card not found: {}", id)),
            }
        }
        CardAction::Run { id, api_base } => {
            let credential = ctx.credential_str().to_string();
            let base = api_base
                .or_else(|| AppConfig::load().api_base)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
            let client = ChatClient::with_base_url(credential.clone(), base);

            match run_card(&mut ctx.board, &id, &credential, &client).await {
                Ok(outcome) => {
                    // The terminal transition already happened; mirror it
                    // to disk before reporting.
                    ctx.save_board().await?;
                    match outcome {
                        RunOutcome::Completed { .. } => match ctx.board.get_card(&id) {
                            Some(card) => output::output_success(card),
                            None => {
                                output::output_error(&format!("Card not found: {}", id))
                            }
                        },
                        RunOutcome::Failed { message } => output::output_error(&message),
                    }
                }
                // Rejected before dispatch: nothing was mutated.
                Err(e) => output::output_error(&e.to_string()),
            }
        }
        CardAction::Export { id, output_dir } => {
            let card = match ctx.board.get_card(&id) {
                Some(card) => card.clone(),
                None => output::output_error(&format!("Card not found: {}", id)),
            };
            let dir = output_dir.unwrap_or_else(|| std::path::PathBuf::from("."));
            match write_result_file(&dir, &card).await {
                Ok(path) => output::output_success(serde_json::json!({
                    "path": path.display().to_string()
                })),
                Err(e) => output::output_error(&e.to_string()),
            }
        }
    }
    Ok(())
}

fn build_card(args: &CardCreateArgs) -> promptboard_core::BoardResult<Card> {
    let config = SamplingConfig::new(args.temperature, args.max_tokens)?;
    Card::new(args.prompt.clone(), args.model, config)
}
