use color_eyre::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use std::path::PathBuf;
use std::sync::Arc;
use throbber_widgets_tui::ThrobberState;

use crate::catalog::{ModuleType, Topic};
use crate::config::Config;
use crate::download::{analysis_file_name, note_file_name, save_document};
use crate::event::{AppEvent, Event, EventHandler};
use crate::gemini::GeminiClient;
use crate::markdown::render_markdown;
use crate::session::{RequestTicket, SessionEvent, SessionIntent, SessionState, SessionStateMachine, View};
use crate::tutor::Tutor;
use crate::upload::{self, UploadedFile};
use crate::visualizer::Lab;
use crate::visualizer::Visualizer;
use crate::{log_debug, log_error, log_info, log_warn};

/// Which pane receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub config: Config,
    /// Navigation and fetched content.
    pub session: SessionState,
    pub visualizer: Visualizer,
    pub focus: Focus,
    /// Highlighted sidebar entry, an index into [`ModuleType::ALL`].
    pub sidebar_cursor: usize,
    /// Highlighted home card or topic.
    pub item_cursor: usize,
    pub content_scroll: u16,
    pub path_input: String,
    pub is_editing_path: bool,
    /// One-line feedback shown in the footer.
    pub status: Option<String>,
    pub throbber: ThrobberState,
    /// Event handler.
    pub events: EventHandler,
    tutor: Tutor,
    pending_upload: Option<UploadedFile>,
}

impl App {
    /// Constructs a new instance of [`App`] backed by the Gemini API.
    pub fn new(config: Config) -> Result<Self> {
        let client = GeminiClient::new(&config)?;
        if !config.has_api_key() {
            log_warn!("API_KEY is not set; requests will fail until it is provided");
        }
        log_info!("Using model {}", client.model());

        let tutor = Tutor::new(Arc::new(client), config.thinking_budget);
        Ok(Self::with_parts(config, tutor, EventHandler::new()))
    }

    pub fn with_parts(config: Config, tutor: Tutor, events: EventHandler) -> Self {
        Self {
            running: true,
            config,
            session: SessionState::default(),
            visualizer: Visualizer::default(),
            focus: Focus::Sidebar,
            sidebar_cursor: 0,
            item_cursor: 0,
            content_scroll: 0,
            path_input: String::new(),
            is_editing_path: false,
            status: None,
            throbber: ThrobberState::default(),
            events,
            tutor,
            pending_upload: None,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {
                    // Only the spinner animates.
                    if self.session.is_busy() {
                        self.throbber.calc_next();
                        needs_redraw = true;
                    }
                }
                Event::Crossterm(event) => match event {
                    CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        self.handle_key_events(key_event)?;
                    }
                    CrosstermEvent::Resize(_, _) => needs_redraw = true,
                    _ => {}
                },
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.events.send(AppEvent::Quit);
            return Ok(());
        }

        if self.is_editing_path {
            match key_event.code {
                KeyCode::Esc => self.events.send(AppEvent::CancelPathInput),
                KeyCode::Enter => self.events.send(AppEvent::SubmitPath),
                KeyCode::Backspace => self.events.send(AppEvent::PathBackspace),
                KeyCode::Char(ch) => self.events.send(AppEvent::PathInput(ch)),
                _ => {}
            }
            return Ok(());
        }

        match key_event.code {
            KeyCode::Char('q') => self.events.send(AppEvent::Quit),
            KeyCode::Char(digit @ '0'..='6') => {
                let index = digit as usize - '0' as usize;
                if let Some(module) = ModuleType::from_index(index) {
                    self.events.send(AppEvent::SelectModule(module));
                }
            }
            KeyCode::Tab | KeyCode::BackTab => self.events.send(AppEvent::ToggleFocus),
            KeyCode::Esc => {
                if self.focus == Focus::Content {
                    self.events.send(AppEvent::ToggleFocus);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.events.send(AppEvent::PreviousItem),
            KeyCode::Down | KeyCode::Char('j') => self.events.send(AppEvent::NextItem),
            KeyCode::Enter | KeyCode::Char(' ') => self.events.send(AppEvent::Activate),
            KeyCode::PageUp => self.events.send(AppEvent::ScrollUp),
            KeyCode::PageDown => self.events.send(AppEvent::ScrollDown),
            KeyCode::Left | KeyCode::Char('h') => self.events.send(AppEvent::AdjustSlider(-1)),
            KeyCode::Right | KeyCode::Char('l') => self.events.send(AppEvent::AdjustSlider(1)),
            KeyCode::Char('s') => self.events.send(AppEvent::CycleSlider),
            KeyCode::Char('d') => self.events.send(AppEvent::Download),
            KeyCode::Char('u') | KeyCode::Char('i') => self.events.send(AppEvent::BeginPathInput),
            _ => {}
        }
        Ok(())
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SelectModule(module) => self.apply(SessionIntent::SelectModule(module)),
            AppEvent::SelectTopic(index) => self.select_topic(index),
            AppEvent::NextItem => self.move_cursor(1),
            AppEvent::PreviousItem => self.move_cursor(-1),
            AppEvent::Activate => self.activate(),
            AppEvent::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Content,
                    Focus::Content => Focus::Sidebar,
                };
            }
            AppEvent::ScrollUp => self.content_scroll = self.content_scroll.saturating_sub(5),
            AppEvent::ScrollDown => {
                self.content_scroll = self.content_scroll.saturating_add(5).min(self.max_scroll());
            }
            AppEvent::Download => {
                self.download();
            }
            AppEvent::AdjustSlider(steps) => {
                if let Some(lab) = self.current_lab() {
                    self.visualizer.adjust(lab, steps);
                }
            }
            AppEvent::CycleSlider => self.visualizer.cycle_slider(),
            AppEvent::BeginPathInput => {
                if self.session.view == View::Practice && !self.session.practice.is_analyzing {
                    self.is_editing_path = true;
                    self.focus = Focus::Content;
                }
            }
            AppEvent::PathInput(ch) => self.path_input.push(ch),
            AppEvent::PathBackspace => {
                self.path_input.pop();
            }
            AppEvent::CancelPathInput => self.is_editing_path = false,
            AppEvent::SubmitPath => self.submit_upload(),
            AppEvent::ContentReady { ticket, text } => {
                self.apply(SessionIntent::ContentArrived { ticket, text })
            }
            AppEvent::AnalysisReady { ticket, text } => {
                self.apply(SessionIntent::AnalysisArrived { ticket, text })
            }
            AppEvent::Quit => self.quit(),
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn current_lab(&self) -> Option<Lab> {
        match self.session.view {
            View::Module(module) => Lab::for_module(module),
            _ => None,
        }
    }

    /// Last scroll offset that still shows a rendered line.
    pub fn max_scroll(&self) -> u16 {
        let lines = render_markdown(self.session.displayed_text()).lines.len();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    /// Whether a download would write anything right now.
    pub fn can_download(&self) -> bool {
        !self.session.is_busy()
            && !self.session.displayed_text().is_empty()
            && match self.session.view {
                View::Module(_) => self.session.active_topic.is_some(),
                View::Practice => true,
                View::Home => false,
            }
    }

    /// Saves the displayed text as markdown and returns where it went.
    pub fn download(&mut self) -> Option<PathBuf> {
        if !self.can_download() {
            return None;
        }

        let file_name = match (self.session.view, self.session.active_topic) {
            (View::Module(_), Some(topic)) => note_file_name(topic.title),
            _ => analysis_file_name(self.session.practice.file_name.as_deref()),
        };

        match save_document(&self.config.download_dir, &file_name, self.session.displayed_text()) {
            Ok(path) => {
                log_info!("Saved {}", path.display());
                self.status = Some(format!("已保存: {}", path.display()));
                Some(path)
            }
            Err(e) => {
                log_error!("Failed to save {}: {}", file_name, e);
                self.status = Some(format!("保存失败: {}", e));
                None
            }
        }
    }

    fn apply(&mut self, intent: SessionIntent) {
        let state = std::mem::take(&mut self.session);
        let (state, events) = SessionStateMachine::transition(state, intent);
        self.session = state;

        for event in events {
            self.on_session_event(event);
        }
    }

    fn on_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::ModuleChanged(module) => {
                log_debug!("Module changed to {}", module);
                self.sidebar_cursor = module.index();
                self.item_cursor = 0;
                self.content_scroll = 0;
                self.path_input.clear();
                self.is_editing_path = false;
                self.pending_upload = None;
                self.status = None;
            }
            SessionEvent::ExplanationRequested { ticket, module, topic } => {
                log_info!("Requesting explanation {:?} for {} / {}", ticket, module, topic.id);
                self.content_scroll = 0;
                self.status = None;
                self.spawn_explanation(ticket, module, topic);
            }
            SessionEvent::AnalysisRequested { ticket, file_name } => {
                match self.pending_upload.take() {
                    Some(upload) => {
                        log_info!("Requesting analysis {:?} for {}", ticket, file_name);
                        self.content_scroll = 0;
                        self.status = None;
                        self.spawn_analysis(ticket, upload);
                    }
                    None => log_error!("Analysis requested for {} without file contents", file_name),
                }
            }
            SessionEvent::ContentUpdated | SessionEvent::AnalysisUpdated => {
                self.content_scroll = 0;
            }
            SessionEvent::UploadFailed(message) => {
                log_warn!("Upload rejected: {}", message);
            }
            SessionEvent::StaleResponseDropped(ticket) => {
                log_debug!("Dropped stale response {:?}", ticket);
            }
        }
    }

    fn spawn_explanation(&self, ticket: RequestTicket, module: ModuleType, topic: &'static Topic) {
        let tutor = self.tutor.clone();
        let sender = self.events.sender();

        tokio::spawn(async move {
            let text = tutor
                .fetch_topic_explanation(module, topic.title, topic.prompt_context)
                .await;
            let _ = sender.send(Event::App(AppEvent::ContentReady { ticket, text }));
        });
    }

    fn spawn_analysis(&self, ticket: RequestTicket, upload: UploadedFile) {
        let tutor = self.tutor.clone();
        let sender = self.events.sender();

        tokio::spawn(async move {
            let text = tutor
                .analyze_uploaded_code(&upload.contents, &upload.file_name)
                .await;
            let _ = sender.send(Event::App(AppEvent::AnalysisReady { ticket, text }));
        });
    }

    fn select_topic(&mut self, index: usize) {
        let View::Module(module) = self.session.view else {
            return;
        };
        if let Some(topic) = module.topics().get(index) {
            self.item_cursor = index;
            self.apply(SessionIntent::SelectTopic(topic));
        }
    }

    fn item_count(&self) -> usize {
        match self.session.view {
            View::Home => ModuleType::HOME_CARDS.len(),
            View::Module(module) => module.topics().len(),
            View::Practice => 0,
        }
    }

    fn move_cursor(&mut self, delta: i32) {
        let (cursor, count) = match self.focus {
            Focus::Sidebar => (&mut self.sidebar_cursor, ModuleType::ALL.len()),
            Focus::Content => {
                let count = self.item_count();
                (&mut self.item_cursor, count)
            }
        };

        if count > 0 {
            *cursor = (*cursor as i32 + delta).rem_euclid(count as i32) as usize;
        }
    }

    fn activate(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                if let Some(module) = ModuleType::from_index(self.sidebar_cursor) {
                    self.apply(SessionIntent::SelectModule(module));
                    self.focus = Focus::Content;
                }
            }
            Focus::Content => match self.session.view {
                View::Home => {
                    if let Some(&module) = ModuleType::HOME_CARDS.get(self.item_cursor) {
                        self.apply(SessionIntent::SelectModule(module));
                    }
                }
                View::Module(_) => self.select_topic(self.item_cursor),
                View::Practice => self.handle_app_event(AppEvent::BeginPathInput),
            },
        }
    }

    /// Validates and reads the typed path. The extension check happens
    /// before the file is touched and before any request is made.
    fn submit_upload(&mut self) {
        self.is_editing_path = false;

        let Some(path) = upload::parse_path_input(&self.path_input) else {
            return;
        };

        match upload::read_upload(&path) {
            Ok(file) => {
                let file_name = file.file_name.clone();
                self.pending_upload = Some(file);
                self.apply(SessionIntent::FileAccepted { file_name });
            }
            Err(e) => {
                log_debug!("Upload of {} failed: {:?}", path.display(), e);
                self.apply(SessionIntent::FileRejected {
                    file_name: upload::file_name_of(&path),
                    message: e.to_string(),
                });
            }
        }
    }
}
