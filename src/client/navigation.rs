/// Where the client keeps its serialized view: the URL fragment.
///
/// Hashes are reported the way browsers do, either empty or starting
/// with `#`.
pub trait Navigator {
    fn hash(&self) -> String;

    /// Move to `fragment`, adding a history entry
    fn set_hash(&mut self, fragment: &str);

    /// Rewrite the current entry without adding history
    fn replace_hash(&mut self, fragment: &str);
}

/// In-memory history used by the terminal client and in tests
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    entries: Vec<String>,
    position: usize,
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryNavigator {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![normalize(initial)],
            position: 0,
        }
    }

    /// Step back in history. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Step forward in history. Returns false at the last entry.
    pub fn forward(&mut self) -> bool {
        if self.position + 1 >= self.entries.len() {
            return false;
        }
        self.position += 1;
        true
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }
}

impl Navigator for MemoryNavigator {
    fn hash(&self) -> String {
        self.entries[self.position].clone()
    }

    fn set_hash(&mut self, fragment: &str) {
        let hash = normalize(fragment);
        if hash == self.entries[self.position] {
            return;
        }
        self.entries.truncate(self.position + 1);
        self.entries.push(hash);
        self.position += 1;
    }

    fn replace_hash(&mut self, fragment: &str) {
        self.entries[self.position] = normalize(fragment);
    }
}

fn normalize(fragment: &str) -> String {
    let bare = fragment.strip_prefix('#').unwrap_or(fragment);
    if bare.is_empty() {
        String::new()
    } else {
        format!("#{}", bare)
    }
}
