// src/session.rs
//! Navigation and session state.
//!
//! Every fetch is tagged with a [`RequestTicket`]. Only the most recently
//! issued ticket may write content back; anything older is dropped, so a
//! slow response can never overwrite the topic the user moved on to.

use crate::catalog::{ModuleType, Topic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Module(ModuleType),
    Practice,
}

impl View {
    pub fn for_module(module: ModuleType) -> Self {
        match module {
            ModuleType::Home => View::Home,
            ModuleType::Practice => View::Practice,
            other => View::Module(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PracticeState {
    pub file_name: Option<String>,
    pub analysis: String,
    pub is_analyzing: bool,
    pub error: Option<String>,
    pending: Option<RequestTicket>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub view: View,
    pub module: ModuleType,
    pub active_topic: Option<&'static Topic>,
    pub content: String,
    pub is_loading: bool,
    pub practice: PracticeState,
    pending: Option<RequestTicket>,
    last_ticket: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            view: View::Home,
            module: ModuleType::Home,
            active_topic: None,
            content: String::new(),
            is_loading: false,
            practice: PracticeState::default(),
            pending: None,
            last_ticket: 0,
        }
    }
}

impl SessionState {
    /// Text currently on screen for the active view.
    pub fn displayed_text(&self) -> &str {
        match self.view {
            View::Practice => &self.practice.analysis,
            View::Module(_) => &self.content,
            View::Home => "",
        }
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading || self.practice.is_analyzing
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        self.last_ticket += 1;
        RequestTicket(self.last_ticket)
    }
}

// ----------------------------------------------------------------------------
// INTENT - Messages that express what user wants to do
// ----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum SessionIntent {
    SelectModule(ModuleType),
    SelectTopic(&'static Topic),
    ContentArrived { ticket: RequestTicket, text: String },
    /// A file passed validation and was read.
    FileAccepted { file_name: String },
    /// A file failed validation or could not be read.
    FileRejected { file_name: String, message: String },
    AnalysisArrived { ticket: RequestTicket, text: String },
}

// ----------------------------------------------------------------------------
// EVENTS - Things that happened (past tense)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ModuleChanged(ModuleType),
    ExplanationRequested {
        ticket: RequestTicket,
        module: ModuleType,
        topic: &'static Topic,
    },
    ContentUpdated,
    AnalysisRequested {
        ticket: RequestTicket,
        file_name: String,
    },
    AnalysisUpdated,
    UploadFailed(String),
    StaleResponseDropped(RequestTicket),
}

// ----------------------------------------------------------------------------
// STATE MACHINE - Pure function: (State, Intent) -> (State, Vec<Event>)
// ----------------------------------------------------------------------------

pub struct SessionStateMachine;

impl SessionStateMachine {
    pub fn transition(
        state: SessionState,
        intent: SessionIntent,
    ) -> (SessionState, Vec<SessionEvent>) {
        use SessionIntent::*;

        match intent {
            SelectModule(module) => Self::handle_select_module(state, module),
            SelectTopic(topic) => Self::handle_select_topic(state, topic),
            ContentArrived { ticket, text } => Self::handle_content(state, ticket, text),
            FileAccepted { file_name } => Self::handle_file_accepted(state, file_name),
            FileRejected { file_name, message } => Self::handle_file_rejected(state, file_name, message),
            AnalysisArrived { ticket, text } => Self::handle_analysis(state, ticket, text),
        }
    }

    /// Always resets topic, content and practice state, even when the
    /// module is unchanged. Outstanding requests become stale.
    fn handle_select_module(
        mut state: SessionState,
        module: ModuleType,
    ) -> (SessionState, Vec<SessionEvent>) {
        state.view = View::for_module(module);
        state.module = module;
        state.active_topic = None;
        state.content.clear();
        state.is_loading = false;
        state.pending = None;
        state.practice = PracticeState::default();
        (state, vec![SessionEvent::ModuleChanged(module)])
    }

    fn handle_select_topic(
        mut state: SessionState,
        topic: &'static Topic,
    ) -> (SessionState, Vec<SessionEvent>) {
        let module = match state.view {
            View::Module(module) if module.topics().contains(topic) => module,
            _ => return (state, vec![]),
        };

        let ticket = state.issue_ticket();
        state.active_topic = Some(topic);
        state.content.clear();
        state.is_loading = true;
        state.pending = Some(ticket);

        (state, vec![SessionEvent::ExplanationRequested { ticket, module, topic }])
    }

    fn handle_content(
        mut state: SessionState,
        ticket: RequestTicket,
        text: String,
    ) -> (SessionState, Vec<SessionEvent>) {
        if state.pending != Some(ticket) {
            return (state, vec![SessionEvent::StaleResponseDropped(ticket)]);
        }

        state.content = text;
        state.is_loading = false;
        state.pending = None;
        (state, vec![SessionEvent::ContentUpdated])
    }

    fn handle_file_accepted(
        mut state: SessionState,
        file_name: String,
    ) -> (SessionState, Vec<SessionEvent>) {
        if state.view != View::Practice {
            return (state, vec![]);
        }

        let ticket = state.issue_ticket();
        state.practice = PracticeState {
            file_name: Some(file_name.clone()),
            analysis: String::new(),
            is_analyzing: true,
            error: None,
            pending: Some(ticket),
        };

        (state, vec![SessionEvent::AnalysisRequested { ticket, file_name }])
    }

    fn handle_file_rejected(
        mut state: SessionState,
        file_name: String,
        message: String,
    ) -> (SessionState, Vec<SessionEvent>) {
        if state.view != View::Practice {
            return (state, vec![]);
        }

        state.practice = PracticeState {
            file_name: Some(file_name),
            analysis: String::new(),
            is_analyzing: false,
            error: Some(message.clone()),
            pending: None,
        };

        (state, vec![SessionEvent::UploadFailed(message)])
    }

    fn handle_analysis(
        mut state: SessionState,
        ticket: RequestTicket,
        text: String,
    ) -> (SessionState, Vec<SessionEvent>) {
        if state.practice.pending != Some(ticket) {
            return (state, vec![SessionEvent::StaleResponseDropped(ticket)]);
        }

        state.practice.analysis = text;
        state.practice.is_analyzing = false;
        state.practice.pending = None;
        (state, vec![SessionEvent::AnalysisUpdated])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: SessionState, intent: SessionIntent) -> (SessionState, Vec<SessionEvent>) {
        SessionStateMachine::transition(state, intent)
    }

    fn in_module(module: ModuleType) -> SessionState {
        apply(SessionState::default(), SessionIntent::SelectModule(module)).0
    }

    fn requested_ticket(events: &[SessionEvent]) -> RequestTicket {
        match events {
            [SessionEvent::ExplanationRequested { ticket, .. }] => *ticket,
            [SessionEvent::AnalysisRequested { ticket, .. }] => *ticket,
            other => panic!("expected a single request event, got {:?}", other),
        }
    }

    #[test]
    fn test_module_selection_maps_to_view() {
        assert_eq!(in_module(ModuleType::Home).view, View::Home);
        assert_eq!(in_module(ModuleType::Practice).view, View::Practice);
        assert_eq!(in_module(ModuleType::Ml).view, View::Module(ModuleType::Ml));
    }

    #[test]
    fn test_selecting_module_clears_topic_and_content() {
        let state = in_module(ModuleType::Math);
        let topic = &ModuleType::Math.topics()[0];
        let (state, events) = apply(state, SessionIntent::SelectTopic(topic));
        let ticket = requested_ticket(&events);
        let (state, _) = apply(state, SessionIntent::ContentArrived { ticket, text: "## 矩阵".into() });
        assert_eq!(state.content, "## 矩阵");

        for module in ModuleType::ALL {
            let (next, events) = apply(state.clone(), SessionIntent::SelectModule(module));
            assert!(next.active_topic.is_none());
            assert!(next.content.is_empty());
            assert!(!next.is_loading);
            assert_eq!(events, vec![SessionEvent::ModuleChanged(module)]);
        }
    }

    #[test]
    fn test_topic_selection_sets_loading_until_settled() {
        let state = in_module(ModuleType::Dl);
        let topic = &ModuleType::Dl.topics()[2];

        let (state, events) = apply(state, SessionIntent::SelectTopic(topic));
        assert!(state.is_loading);
        assert_eq!(state.active_topic, Some(topic));
        assert!(state.content.is_empty());

        let ticket = requested_ticket(&events);
        let (state, events) = apply(
            state,
            SessionIntent::ContentArrived { ticket, text: "Error loading content: boom".into() },
        );
        assert!(!state.is_loading);
        assert_eq!(events, vec![SessionEvent::ContentUpdated]);
        assert_eq!(state.displayed_text(), "Error loading content: boom");

        // A duplicate completion for the same ticket is ignored.
        let (state, events) = apply(state, SessionIntent::ContentArrived { ticket, text: "late".into() });
        assert_eq!(events, vec![SessionEvent::StaleResponseDropped(ticket)]);
        assert_eq!(state.content, "Error loading content: boom");
    }

    #[test]
    fn test_slow_earlier_response_does_not_overwrite_latest() {
        let state = in_module(ModuleType::Rl);
        let topics = ModuleType::Rl.topics();

        let (state, first) = apply(state, SessionIntent::SelectTopic(&topics[0]));
        let (state, second) = apply(state, SessionIntent::SelectTopic(&topics[1]));
        let first = requested_ticket(&first);
        let second = requested_ticket(&second);
        assert_ne!(first, second);

        let (state, _) = apply(state, SessionIntent::ContentArrived { ticket: second, text: "Q".into() });
        let (state, events) = apply(state, SessionIntent::ContentArrived { ticket: first, text: "MDP".into() });

        assert_eq!(events, vec![SessionEvent::StaleResponseDropped(first)]);
        assert_eq!(state.content, "Q");
        assert_eq!(state.active_topic, Some(&topics[1]));
    }

    #[test]
    fn test_response_after_navigation_is_dropped() {
        let state = in_module(ModuleType::Python);
        let (state, events) = apply(state, SessionIntent::SelectTopic(&ModuleType::Python.topics()[0]));
        let ticket = requested_ticket(&events);

        let (state, _) = apply(state, SessionIntent::SelectModule(ModuleType::Math));
        let (state, events) = apply(state, SessionIntent::ContentArrived { ticket, text: "stale".into() });

        assert_eq!(events, vec![SessionEvent::StaleResponseDropped(ticket)]);
        assert!(state.content.is_empty());
    }

    #[test]
    fn test_topic_from_other_module_is_ignored() {
        let state = in_module(ModuleType::Python);
        let (state, events) = apply(state, SessionIntent::SelectTopic(&ModuleType::Math.topics()[0]));
        assert!(events.is_empty());
        assert!(!state.is_loading);

        let (_, events) = apply(SessionState::default(), SessionIntent::SelectTopic(&ModuleType::Math.topics()[0]));
        assert!(events.is_empty());
    }

    #[test]
    fn test_practice_upload_flow() {
        let state = in_module(ModuleType::Practice);

        let (state, events) = apply(state, SessionIntent::FileRejected {
            file_name: "script.java".into(),
            message: "请上传 Python (.py) 或 文本 (.txt) 文件。".into(),
        });
        assert!(matches!(events[..], [SessionEvent::UploadFailed(_)]));
        assert!(state.practice.error.is_some());
        assert!(!state.practice.is_analyzing);

        let (state, events) = apply(state, SessionIntent::FileAccepted { file_name: "model.py".into() });
        let ticket = requested_ticket(&events);
        assert!(state.practice.is_analyzing);
        assert!(state.practice.error.is_none());
        assert!(state.is_busy());

        let (state, events) = apply(state, SessionIntent::AnalysisArrived { ticket, text: "## 分析".into() });
        assert_eq!(events, vec![SessionEvent::AnalysisUpdated]);
        assert!(!state.practice.is_analyzing);
        assert_eq!(state.displayed_text(), "## 分析");
    }

    #[test]
    fn test_leaving_practice_resets_upload_state() {
        let state = in_module(ModuleType::Practice);
        let (state, events) = apply(state, SessionIntent::FileAccepted { file_name: "notes.txt".into() });
        let ticket = requested_ticket(&events);

        let state = apply(state, SessionIntent::SelectModule(ModuleType::Home)).0;
        let state = apply(state, SessionIntent::SelectModule(ModuleType::Practice)).0;
        assert_eq!(state.practice, PracticeState::default());

        let (state, events) = apply(state, SessionIntent::AnalysisArrived { ticket, text: "old".into() });
        assert_eq!(events, vec![SessionEvent::StaleResponseDropped(ticket)]);
        assert!(state.practice.analysis.is_empty());
    }
}
