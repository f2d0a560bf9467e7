/// Bounded in-app diagnostic buffer, rendered in the side panel. This is
/// the operator-visible channel for request/error detail that never goes
/// into the transcript.
#[derive(Debug, Default)]
pub struct LogView {
    pub entries: Vec<String>,
    pub scroll_offset: u16,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: String) {
        log::debug!("{}", entry);
        self.entries.push(entry);
        if self.entries.len() > 200 {
            self.entries.remove(0);
        }
    }
}
