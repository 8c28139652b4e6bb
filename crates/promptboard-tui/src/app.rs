use std::io;
use std::path::PathBuf;

use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use promptboard_core::{BoardResult, InputState, SelectionState};
use promptboard_domain::{Board, CardId, ColumnId, RunOutcome};
use promptboard_dispatch::{ChatClient, CompletionService};
use promptboard_persistence::{
    write_result_file, BoardStore, CredentialStore, FileCredentialStore, JsonBoardStore,
};

use crate::components::Banner;
use crate::dialog::{
    handle_create_input, handle_dialog_input, CreateDialogAction, CreateDialogState, DialogAction,
};
use crate::editor::edit_in_external_editor;
use crate::events::{Event, EventHandler};
use crate::ui;

/// A settled dispatch, sent back from the spawned run task to the event
/// loop, which applies the terminal transition.
#[derive(Debug)]
pub struct RunMessage {
    pub card_id: CardId,
    pub outcome: RunOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    CreateCard,
    Settings,
    Preview,
}

/// Work the run loop must do after a key has been handled, outside the
/// event `select!` so nothing borrows the input pump.
enum PostAction {
    None,
    EditPrompt,
}

pub struct App {
    pub should_quit: bool,
    pub mode: AppMode,
    pub board: Board,
    pub credential: String,
    pub focus: ColumnId,
    pub banner: Option<Banner>,
    pub create_dialog: CreateDialogState,
    pub settings_input: InputState,
    pub preview_content: String,
    pub preview_scroll: u16,
    selections: [SelectionState; 3],
    api_base: String,
    board_store: JsonBoardStore,
    credential_store: FileCredentialStore,
    run_tx: mpsc::UnboundedSender<RunMessage>,
}

fn column_slot(id: ColumnId) -> usize {
    match id {
        ColumnId::Todo => 0,
        ColumnId::InProgress => 1,
        ColumnId::Done => 2,
    }
}

impl App {
    /// Load stored state and build the app plus the channel the spawned
    /// run tasks report back on.
    pub async fn load(
        board_path: PathBuf,
        credential_path: PathBuf,
        api_base: String,
    ) -> (Self, mpsc::UnboundedReceiver<RunMessage>) {
        let board_store = JsonBoardStore::new(&board_path);
        let credential_store = FileCredentialStore::new(&credential_path);

        let board = board_store.load_or_default().await;
        let credential = match credential_store.load().await {
            Ok(stored) => stored.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read credential: {}", e);
                String::new()
            }
        };

        let (run_tx, run_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            should_quit: false,
            mode: AppMode::Normal,
            board,
            credential,
            focus: ColumnId::Todo,
            banner: None,
            create_dialog: CreateDialogState::new(),
            settings_input: InputState::new(),
            preview_content: String::new(),
            preview_scroll: 0,
            selections: [
                SelectionState::new(),
                SelectionState::new(),
                SelectionState::new(),
            ],
            api_base,
            board_store,
            credential_store,
            run_tx,
        };
        app.clamp_selections();
        (app, run_rx)
    }

    pub fn selection(&self, id: ColumnId) -> &SelectionState {
        &self.selections[column_slot(id)]
    }

    fn selection_mut(&mut self, id: ColumnId) -> &mut SelectionState {
        &mut self.selections[column_slot(id)]
    }

    fn column_len(&self, id: ColumnId) -> usize {
        self.board.column(id).map(|c| c.len()).unwrap_or(0)
    }

    fn clamp_selections(&mut self) {
        for id in ColumnId::ALL {
            let len = self.column_len(id);
            self.selection_mut(id).clamp(len);
        }
    }

    fn selected_card_id(&self) -> Option<CardId> {
        let index = self.selection(self.focus).get()?;
        self.board
            .column(self.focus)
            .and_then(|c| c.cards.get(index))
            .map(|card| card.id.clone())
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn expire_banner(&mut self) {
        if matches!(&self.banner, Some(banner) if banner.is_expired()) {
            self.banner = None;
        }
    }

    async fn persist(&mut self) {
        if let Err(e) = self.board_store.save(&self.board).await {
            tracing::error!("Failed to save board: {}", e);
            self.banner = Some(Banner::error(format!("Failed to save board: {}", e)));
        }
    }

    async fn handle_key_event(&mut self, key: KeyEvent) -> PostAction {
        match self.mode {
            AppMode::Normal => self.handle_normal_key(key).await,
            AppMode::CreateCard => match handle_create_input(&mut self.create_dialog, key) {
                CreateDialogAction::Submit => self.submit_create_dialog().await,
                CreateDialogAction::Cancel => self.mode = AppMode::Normal,
                CreateDialogAction::EditPrompt => return PostAction::EditPrompt,
                CreateDialogAction::None => {}
            },
            AppMode::Settings => {
                match handle_dialog_input(&mut self.settings_input, key.code, true) {
                    DialogAction::Confirm => self.save_credential().await,
                    DialogAction::Cancel => self.mode = AppMode::Normal,
                    DialogAction::None => {}
                }
            }
            AppMode::Preview => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    self.mode = AppMode::Normal;
                    self.preview_scroll = 0;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.preview_scroll = self.preview_scroll.saturating_add(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.preview_scroll = self.preview_scroll.saturating_sub(1);
                }
                KeyCode::Char('g') => self.preview_scroll = 0,
                _ => {}
            },
        }

        PostAction::None
    }

    async fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('n') => {
                self.create_dialog = CreateDialogState::new();
                self.mode = AppMode::CreateCard;
            }
            KeyCode::Char('s') => {
                self.settings_input.set(self.credential.clone());
                self.mode = AppMode::Settings;
            }
            KeyCode::Char('1') => self.focus_column(ColumnId::Todo),
            KeyCode::Char('2') => self.focus_column(ColumnId::InProgress),
            KeyCode::Char('3') => self.focus_column(ColumnId::Done),
            KeyCode::Char('h') | KeyCode::Left => self.focus_adjacent(false),
            KeyCode::Char('l') | KeyCode::Right => self.focus_adjacent(true),
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.column_len(self.focus);
                self.selection_mut(self.focus).next(len);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.column_len(self.focus) > 0 {
                    self.selection_mut(self.focus).prev();
                }
            }
            KeyCode::Char('r') => self.start_run().await,
            KeyCode::Char('J') => self.reorder_selected(1).await,
            KeyCode::Char('K') => self.reorder_selected(-1).await,
            KeyCode::Char('H') => self.relocate_selected(false).await,
            KeyCode::Char('L') => self.relocate_selected(true).await,
            KeyCode::Char('d') => self.export_selected().await,
            KeyCode::Enter | KeyCode::Char('p') => self.open_preview(),
            _ => {}
        }
    }

    fn focus_column(&mut self, id: ColumnId) {
        self.focus = id;
        let len = self.column_len(id);
        self.selection_mut(id).clamp(len);
    }

    fn focus_adjacent(&mut self, forward: bool) {
        let slot = column_slot(self.focus);
        let next = if forward {
            (slot + 1).min(ColumnId::ALL.len() - 1)
        } else {
            slot.saturating_sub(1)
        };
        self.focus_column(ColumnId::ALL[next]);
    }

    async fn submit_create_dialog(&mut self) {
        match self.create_dialog.build_card() {
            Ok(card) => {
                if let Err(e) = self.board.add_card(card) {
                    self.banner = Some(Banner::error(e.to_string()));
                    return;
                }
                self.persist().await;
                self.clamp_selections();
                let len = self.column_len(ColumnId::Todo);
                self.selection_mut(ColumnId::Todo).set(Some(len - 1));
                self.mode = AppMode::Normal;
                self.banner = Some(Banner::success("Prompt card created"));
            }
            Err(e) => {
                // Keep the dialog open so the field can be corrected.
                self.banner = Some(Banner::error(e.to_string()));
            }
        }
    }

    fn edit_prompt_in_editor(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) {
        let temp_file = std::env::temp_dir().join("promptboard-prompt.md");
        match edit_in_external_editor(
            terminal,
            events,
            temp_file,
            self.create_dialog.prompt.as_str(),
        ) {
            Ok(Some(content)) => {
                self.create_dialog
                    .prompt
                    .set(content.trim_end().to_string());
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to edit prompt: {}", e);
                self.banner = Some(Banner::error(e.to_string()));
            }
        }
    }

    async fn save_credential(&mut self) {
        let value = self.settings_input.as_str().trim().to_string();
        let result = if value.is_empty() {
            self.credential_store.clear().await
        } else {
            self.credential_store.save(&value).await
        };
        match result {
            Ok(()) => {
                self.credential = value;
                self.mode = AppMode::Normal;
                self.banner = Some(if self.credential.is_empty() {
                    Banner::success("API credential cleared")
                } else {
                    Banner::success("API credential saved")
                });
            }
            Err(e) => {
                self.banner = Some(Banner::error(format!("Failed to save credential: {}", e)));
            }
        }
    }

    /// Queued -> Running, then hand the request off to a spawned task so
    /// the board stays interactive while the call is in flight.
    async fn start_run(&mut self) {
        if self.focus != ColumnId::Todo {
            return;
        }
        let Some(id) = self.selected_card_id() else {
            return;
        };
        // The credential gate comes before any column mutation.
        if self.credential.trim().is_empty() {
            self.banner = Some(Banner::error(
                "Set your API credential in settings ('s') before running",
            ));
            return;
        }

        match self.board.begin_run(&id) {
            Ok(card) => {
                self.persist().await;
                self.clamp_selections();

                let tx = self.run_tx.clone();
                let client =
                    ChatClient::with_base_url(self.credential.clone(), self.api_base.clone());
                tokio::spawn(async move {
                    let outcome = match client.complete(&card).await {
                        Ok(text) => RunOutcome::Completed { text },
                        Err(e) => RunOutcome::Failed {
                            message: e.to_string(),
                        },
                    };
                    let _ = tx.send(RunMessage {
                        card_id: card.id.clone(),
                        outcome,
                    });
                });
            }
            Err(e) => self.banner = Some(Banner::error(e.to_string())),
        }
    }

    pub async fn apply_run_outcome(&mut self, message: RunMessage) {
        let banner = match &message.outcome {
            RunOutcome::Completed { .. } => Banner::success("Prompt completed"),
            RunOutcome::Failed { message } => Banner::error(message.clone()),
        };
        match self.board.settle_run(&message.card_id, message.outcome) {
            Ok(()) => {
                self.persist().await;
                self.clamp_selections();
                self.banner = Some(banner);
            }
            Err(e) => {
                tracing::error!("Failed to settle run for {}: {}", message.card_id, e);
                self.banner = Some(Banner::error(e.to_string()));
            }
        }
    }

    /// Shift-J/K: reorder within the focused column.
    async fn reorder_selected(&mut self, delta: i64) {
        if self.focus == ColumnId::InProgress {
            self.banner = Some(Banner::error("Cards stay put while a run is in flight"));
            return;
        }
        let Some(index) = self.selection(self.focus).get() else {
            return;
        };
        let len = self.column_len(self.focus);
        let target = index as i64 + delta;
        if target < 0 || target >= len as i64 {
            return;
        }
        let target = target as usize;
        match self.board.move_card(self.focus, index, self.focus, target) {
            Ok(()) => {
                self.selection_mut(self.focus).set(Some(target));
                self.persist().await;
            }
            Err(e) => self.banner = Some(Banner::error(e.to_string())),
        }
    }

    /// Shift-H/L: relocate between To Do and Done. In Progress is not
    /// offered as a source or a destination, mirroring the reference
    /// behavior; the domain itself does not forbid it.
    async fn relocate_selected(&mut self, forward: bool) {
        if self.focus == ColumnId::InProgress {
            self.banner = Some(Banner::error("Cards stay put while a run is in flight"));
            return;
        }
        let dest = match (self.focus, forward) {
            (ColumnId::Todo, true) => ColumnId::Done,
            (ColumnId::Done, false) => ColumnId::Todo,
            _ => return,
        };
        let Some(index) = self.selection(self.focus).get() else {
            return;
        };
        match self.board.move_card(self.focus, index, dest, usize::MAX) {
            Ok(()) => {
                self.persist().await;
                self.clamp_selections();
            }
            Err(e) => self.banner = Some(Banner::error(e.to_string())),
        }
    }

    async fn export_selected(&mut self) {
        let Some(id) = self.selected_card_id() else {
            return;
        };
        let Some(card) = self.board.get_card(&id).cloned() else {
            return;
        };
        match write_result_file(std::path::Path::new("."), &card).await {
            Ok(path) => {
                self.banner = Some(Banner::success(format!("Saved {}", path.display())));
            }
            Err(e) => self.banner = Some(Banner::error(e.to_string())),
        }
    }

    fn open_preview(&mut self) {
        let Some(id) = self.selected_card_id() else {
            return;
        };
        let Some(card) = self.board.get_card(&id) else {
            return;
        };
        let Some(result) = card.result.clone() else {
            return;
        };
        self.preview_content = result;
        self.preview_scroll = 0;
        self.mode = AppMode::Preview;
    }

    pub async fn run(&mut self, mut run_rx: mpsc::UnboundedReceiver<RunMessage>) -> BoardResult<()> {
        let mut terminal = setup_terminal()?;

        while !self.should_quit {
            let mut events = EventHandler::new();
            let mut should_restart_events = false;

            loop {
                self.expire_banner();
                terminal.draw(|frame| ui::render(self, frame))?;

                let action = tokio::select! {
                    maybe_event = events.next() => {
                        match maybe_event {
                            Some(Event::Key(key)) => self.handle_key_event(key).await,
                            Some(Event::Tick) | None => PostAction::None,
                        }
                    }
                    Some(message) = run_rx.recv() => {
                        self.apply_run_outcome(message).await;
                        PostAction::None
                    }
                };

                // The select statement is over, so the input pump is free
                // to be stopped and restarted for the editor round-trip.
                if let PostAction::EditPrompt = action {
                    self.edit_prompt_in_editor(&mut terminal, &events);
                    should_restart_events = true;
                }

                if should_restart_events || self.should_quit {
                    break;
                }
            }

            events.stop();
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
