//! Terminal implementations of the page regions.

use std::{
    io::Write,
    sync::{Arc, Mutex, PoisonError},
};

use briefing_core::{ListRegion, TextRegion};

fn render_block(title: &str, text: &str) -> String {
    format!("── {title} ──\n{text}\n")
}

fn render_list(title: &str, items: &[String]) -> String {
    let mut out = format!("── {title} ──\n");
    for item in items {
        out.push_str("  • ");
        out.push_str(item);
        out.push('\n');
    }
    out
}

/// Prints every write as a titled block.
#[derive(Debug)]
pub struct TerminalText {
    title: String,
    board: Option<Arc<CounterBoard>>,
}

impl TerminalText {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            board: None,
        }
    }

    /// Prints above the counter line instead of into it.
    pub fn with_board(mut self, board: Arc<CounterBoard>) -> Self {
        self.board = Some(board);
        self
    }
}

impl TextRegion for TerminalText {
    fn set_text(&self, text: &str) {
        print_block(self.board.as_deref(), &render_block(&self.title, text));
    }
}

/// Prints every write as a titled bullet list.
#[derive(Debug)]
pub struct TerminalList {
    title: String,
    board: Option<Arc<CounterBoard>>,
}

impl TerminalList {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            board: None,
        }
    }

    /// Prints above the counter line instead of into it.
    pub fn with_board(mut self, board: Arc<CounterBoard>) -> Self {
        self.board = Some(board);
        self
    }
}

impl ListRegion for TerminalList {
    fn replace_items(&self, items: &[String]) {
        print_block(self.board.as_deref(), &render_list(&self.title, items));
    }
}

fn print_block(board: Option<&CounterBoard>, block: &str) {
    match board {
        Some(board) => board.print_above(block),
        None => println!("{block}"),
    }
}

#[derive(Debug)]
struct BoardState {
    values: Vec<String>,
    /// The counter line was drawn without a trailing newline.
    line_open: bool,
}

impl BoardState {
    fn line(&self) -> String {
        self.values.join(" | ")
    }

    /// Output for a block printed while counters may be mid-line. The next
    /// redraw starts on a fresh line below the block.
    fn block_output(&mut self, block: &str) -> String {
        let lead = if std::mem::take(&mut self.line_open) {
            "\n"
        } else {
            ""
        };
        format!("{lead}{block}\n")
    }
}

/// A single status line shared by all counters, redrawn in place.
#[derive(Debug)]
pub struct CounterBoard {
    state: Mutex<BoardState>,
}

impl CounterBoard {
    pub fn new(len: usize) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(BoardState {
                values: vec!["0".to_string(); len],
                line_open: false,
            }),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One region per counter, in board order.
    pub fn slots(self: &Arc<Self>) -> Vec<Arc<dyn TextRegion>> {
        let len = self.lock().values.len();

        (0..len)
            .map(|index| {
                let slot: Arc<dyn TextRegion> = Arc::new(BoardSlot {
                    board: Arc::clone(self),
                    index,
                });
                slot
            })
            .collect()
    }

    fn line(&self) -> String {
        self.lock().line()
    }

    fn update(&self, index: usize, text: &str) {
        let mut state = self.lock();
        if let Some(value) = state.values.get_mut(index) {
            *value = text.to_string();
        }
        state.line_open = true;

        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\r{}", state.line());
        let _ = out.flush();
    }

    /// Prints `block` on its own lines, ending a half-drawn counter line first.
    pub fn print_above(&self, block: &str) {
        let mut state = self.lock();
        let output = state.block_output(block);

        let mut out = std::io::stdout().lock();
        let _ = write!(out, "{output}");
        let _ = out.flush();
    }

    /// Ends the status line.
    pub fn finish(&self) {
        let mut state = self.lock();
        state.line_open = false;
        println!("\r{}", state.line());
    }
}

#[derive(Debug)]
struct BoardSlot {
    board: Arc<CounterBoard>,
    index: usize,
}

impl TextRegion for BoardSlot {
    fn set_text(&self, text: &str) {
        self.board.update(self.index, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_has_title_and_text() {
        assert_eq!(
            render_block("Weather", "City not found!"),
            "── Weather ──\nCity not found!\n"
        );
    }

    #[test]
    fn list_has_one_bullet_per_item() {
        let out = render_list("News", &["a".to_string(), "b".to_string()]);
        assert_eq!(out, "── News ──\n  • a\n  • b\n");
    }

    #[test]
    fn board_slots_update_their_own_value() {
        let board = CounterBoard::new(3);
        let slots = board.slots();

        slots[0].set_text("12");
        slots[2].set_text("7.5");

        assert_eq!(slots.len(), 3);
        assert_eq!(board.line(), "12 | 0 | 7.5");
    }

    #[test]
    fn block_after_counter_redraw_starts_on_new_line() {
        let board = CounterBoard::new(1);
        board.slots()[0].set_text("37");

        let mut state = board.lock();
        let block = render_block("Weather", "City not found!");

        assert_eq!(state.block_output(&block), format!("\n{block}\n"));
        assert!(!state.line_open);
        assert_eq!(state.block_output(&block), format!("{block}\n"));
    }

    #[test]
    fn finished_board_closes_its_line() {
        let board = CounterBoard::new(1);
        board.slots()[0].set_text("5");
        board.finish();

        assert!(!board.lock().line_open);
    }
}
