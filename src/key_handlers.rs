use crate::api::ChatClient;
use crate::app::{App, AppState};
use crate::conversation::deliver_reply;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn handle_chat_input(
    key: KeyEvent,
    app: &mut App,
    app_arc: Arc<Mutex<App>>,
    client: &ChatClient,
) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Enter => {
            if let Some(text) = app.submit() {
                let clone = app_arc.clone();
                let client = client.clone();
                tokio::spawn(async move {
                    deliver_reply(clone, client, text).await;
                });
            }
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn typing_edits_the_input_buffer() {
        let app_arc = Arc::new(Mutex::new(App::new(&Config::default())));
        let client = ChatClient::new("http://127.0.0.1:1/chat");
        let mut guard = app_arc.lock().await;

        for c in ['h', 'i', '!'] {
            handle_chat_input(key(KeyCode::Char(c)), &mut guard, app_arc.clone(), &client);
        }
        assert_eq!(guard.input, "hi!");

        handle_chat_input(key(KeyCode::Backspace), &mut guard, app_arc.clone(), &client);
        assert_eq!(guard.input, "hi");
    }

    #[tokio::test]
    async fn escape_asks_for_quit_confirmation() {
        let app_arc = Arc::new(Mutex::new(App::new(&Config::default())));
        let client = ChatClient::new("http://127.0.0.1:1/chat");
        let mut guard = app_arc.lock().await;

        handle_chat_input(key(KeyCode::Esc), &mut guard, app_arc.clone(), &client);
        assert_eq!(guard.state, AppState::QuitConfirm);

        handle_quit_confirm_input(key(KeyCode::Char('n')), &mut guard);
        assert_eq!(guard.state, AppState::Chat);

        handle_chat_input(key(KeyCode::Esc), &mut guard, app_arc.clone(), &client);
        handle_quit_confirm_input(key(KeyCode::Char('y')), &mut guard);
        assert_eq!(guard.state, AppState::Quit);
    }
}
