use crate::config::Config;
use crate::errors::ChatError;
use crate::log_view::LogView;
use crate::status_indicator::StatusIndicator;
use crate::transcript::{Message, Transcript, GREETING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

/// Owns everything the conversation needs: the transcript, the input
/// buffer, the typing indicator, and the in-flight request count. All
/// mutation happens behind one `Arc<Mutex<App>>` on the UI loop and the
/// delivery tasks.
pub struct App {
    pub state: AppState,
    pub transcript: Transcript,
    pub input: String,
    pub chat_scroll: u16,
    pub status_indicator: StatusIndicator,
    pub logs: LogView,
    pub allow_concurrent_sends: bool,
    in_flight: usize,
}

impl App {
    pub fn new(config: &Config) -> App {
        let mut app = App {
            state: AppState::Chat,
            transcript: Transcript::new(),
            input: String::new(),
            chat_scroll: 0,
            status_indicator: StatusIndicator::new(),
            logs: LogView::new(),
            allow_concurrent_sends: config.allow_concurrent_sends,
            in_flight: 0,
        };
        // The greeting exists before any user interaction.
        app.transcript.push(Message::bot(GREETING));
        app.logs.add(format!("Backend endpoint: {}", config.endpoint));
        app
    }

    /// Reads and trims the input buffer. Returns the text to dispatch, or
    /// `None` when there is nothing to send.
    ///
    /// Whitespace-only input is ignored without touching any state. While
    /// a request is outstanding and concurrent sends are disabled, the
    /// submit is also a no-op, but the typed text stays in the buffer so
    /// nothing is lost.
    ///
    /// A successful submit marks the request in flight here, before the
    /// delivery task gets scheduled, so a second Enter in the same tick
    /// cannot slip past the busy guard.
    pub fn submit(&mut self) -> Option<String> {
        if self.is_request_outstanding() && !self.allow_concurrent_sends {
            self.logs
                .add("Ignoring submit: a request is already in flight".to_string());
            return None;
        }

        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let text = trimmed.to_string();
        self.input.clear();
        self.transcript.push(Message::user(text.clone()));
        self.follow_bottom();
        self.begin_request();
        Some(text)
    }

    /// Appends the bot message for one resolved request. Errors become
    /// their user-facing text in the transcript; the full cause goes to
    /// the diagnostic log only.
    pub fn apply_reply(&mut self, result: Result<String, ChatError>) {
        let text = match result {
            Ok(reply) => {
                self.logs.add("Reply received from backend".to_string());
                reply
            }
            Err(e) => {
                self.logs.add(format!("Request failed: {}", e));
                e.user_facing_text()
            }
        };
        self.transcript.push(Message::bot(text));
        self.follow_bottom();
    }

    pub fn begin_request(&mut self) {
        self.in_flight += 1;
        self.status_indicator.set_typing(true);
    }

    pub fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.status_indicator.set_typing(self.in_flight > 0);
    }

    pub fn is_request_outstanding(&self) -> bool {
        self.in_flight > 0
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    /// Snaps the view to the newest entry; the draw pass clamps this back
    /// to the real maximum.
    pub fn follow_bottom(&mut self) {
        self.chat_scroll = u16::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Sender;

    fn test_app() -> App {
        App::new(&Config::default())
    }

    #[test]
    fn greeting_exists_before_any_interaction() {
        let app = test_app();
        assert_eq!(app.transcript.len(), 1);
        let greeting = app.transcript.last().unwrap();
        assert_eq!(greeting.sender, Sender::Bot);
        assert_eq!(greeting.text, GREETING);
    }

    #[test]
    fn submit_trims_and_appends_exactly_one_user_message() {
        let mut app = test_app();
        app.input = "  hello world  ".to_string();

        let sent = app.submit();

        assert_eq!(sent.as_deref(), Some("hello world"));
        assert!(app.input.is_empty());
        assert!(app.status_indicator.is_typing());
        assert_eq!(app.transcript.len(), 2);
        let msg = app.transcript.last().unwrap();
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "hello world");
    }

    #[test]
    fn whitespace_submit_is_a_no_op() {
        let mut app = test_app();
        app.input = "   \t ".to_string();

        assert_eq!(app.submit(), None);
        assert_eq!(app.transcript.len(), 1);
        assert!(!app.is_request_outstanding());
    }

    #[test]
    fn submit_is_ignored_while_request_outstanding() {
        let mut app = test_app();
        app.begin_request();
        app.input = "second question".to_string();

        assert_eq!(app.submit(), None);
        // Input is preserved so the user can resend after the reply lands.
        assert_eq!(app.input, "second question");
        assert_eq!(app.transcript.len(), 1);

        app.finish_request();
        assert_eq!(app.submit().as_deref(), Some("second question"));
    }

    #[test]
    fn concurrent_sends_allowed_when_policy_enabled() {
        let mut config = Config::default();
        config.allow_concurrent_sends = true;
        let mut app = App::new(&config);

        app.begin_request();
        app.input = "second question".to_string();
        assert_eq!(app.submit().as_deref(), Some("second question"));
    }

    #[test]
    fn apply_reply_success_appends_bot_message() {
        let mut app = test_app();
        app.apply_reply(Ok("Hi there".to_string()));

        let msg = app.transcript.last().unwrap();
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.text, "Hi there");
    }

    #[test]
    fn apply_reply_backend_error_is_labeled() {
        let mut app = test_app();
        app.apply_reply(Err(ChatError::Backend {
            status: 500,
            message: Some("overloaded".to_string()),
        }));
        assert_eq!(
            app.transcript.last().unwrap().text,
            "Error from backend: overloaded"
        );

        app.apply_reply(Err(ChatError::Backend {
            status: 500,
            message: None,
        }));
        assert_eq!(
            app.transcript.last().unwrap().text,
            "Error from backend: Unknown error"
        );
    }

    #[test]
    fn apply_reply_malformed_reads_as_connectivity_failure() {
        let mut app = test_app();
        app.apply_reply(Err(ChatError::MalformedReply("bad body".to_string())));
        assert_eq!(
            app.transcript.last().unwrap().text,
            crate::errors::CONNECT_FAILURE_TEXT
        );
    }

    #[test]
    fn indicator_tracks_in_flight_requests() {
        let mut app = test_app();
        assert!(!app.status_indicator.is_typing());

        app.begin_request();
        assert!(app.status_indicator.is_typing());

        app.begin_request();
        app.finish_request();
        // One of the two is still outstanding.
        assert!(app.status_indicator.is_typing());

        app.finish_request();
        assert!(!app.status_indicator.is_typing());
    }

    #[test]
    fn transcript_order_is_append_order() {
        let mut app = test_app();
        app.input = "one".to_string();
        app.submit();
        app.finish_request();
        app.apply_reply(Ok("reply one".to_string()));
        app.input = "two".to_string();
        app.submit();
        app.finish_request();
        app.apply_reply(Err(ChatError::MalformedReply("x".to_string())));

        let texts: Vec<&str> = app
            .transcript
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![
                GREETING,
                "one",
                "reply one",
                "two",
                crate::errors::CONNECT_FAILURE_TEXT,
            ]
        );
    }
}
