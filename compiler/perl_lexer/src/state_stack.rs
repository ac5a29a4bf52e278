//! Lexer state stack.

use perl_lexer_core::LexState;

use crate::LexerDefect;

/// Modes saved while a nested construct is being scanned.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    states: Vec<LexState>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: LexState) {
        self.states.push(state);
    }

    pub fn try_pop(&mut self) -> Result<LexState, LexerDefect> {
        self.states.pop().ok_or(LexerDefect::EmptyStatePop)
    }

    /// Restore the most recently saved mode.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    #[track_caller]
    pub fn pop(&mut self) -> LexState {
        match self.try_pop() {
            Ok(state) => state,
            Err(defect) => panic!("{defect}"),
        }
    }

    /// Saved modes, outermost first.
    pub fn iter(&self) -> std::slice::Iter<'_, LexState> {
        self.states.iter()
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
