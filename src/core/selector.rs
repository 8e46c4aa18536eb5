//! # Selector
//!
//! Type-ahead single-select over a fixed candidate list. This is the
//! interaction model only: no terminal types, no rendering. The TUI (or any
//! other adapter) feeds it `SelectorInput`s and draws whatever it exposes.
//!
//! ```text
//!            Focus                      Type / ArrowUp / ArrowDown
//!   ┌────────┐ ───────────────▶ ┌──────┐ ◀──────────┐
//!   │ Closed │                  │ Open │ ───────────┘
//!   └────────┘ ◀─────────────── └──────┘
//!        Enter (highlighted) / Click(row)  → commit
//!        Escape / ClickOutside             → discard
//! ```
//!
//! Filtering always runs against the full candidate list, never against the
//! previous filtered subset. Typing alone never selects anything.

use std::sync::Arc;

/// Extracts a piece of text from a candidate (display label or subtitle).
pub type Extractor<T> = Box<dyn Fn(&T) -> String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Closed,
    Open,
}

/// Inputs the selector understands, independent of the UI that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorInput {
    Focus,
    /// Replace the query with this text.
    Type(String),
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    ClickOutside,
    /// Pointer click on a row of the filtered list.
    Click(usize),
}

/// What the owner needs to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    /// A candidate was bound. The value indexes the full candidate list.
    Committed(usize),
    /// The dropdown closed without a commit.
    Dismissed,
}

pub struct Selector<T> {
    candidates: Arc<[T]>,
    display: Extractor<T>,
    subtitle: Extractor<T>,
    state: SelectorState,
    query: String,
    /// Indices into `candidates`, in original order.
    filtered: Vec<usize>,
    /// Index into `filtered`. `None` until the user moves the highlight.
    highlighted: Option<usize>,
    /// Index into `candidates` of the committed item.
    selected: Option<usize>,
}

impl<T> Selector<T> {
    pub fn new(candidates: Arc<[T]>, display: Extractor<T>, subtitle: Extractor<T>) -> Self {
        let filtered = (0..candidates.len()).collect();
        Self {
            candidates,
            display,
            subtitle,
            state: SelectorState::Closed,
            query: String::new(),
            filtered,
            highlighted: None,
            selected: None,
        }
    }

    /// Feed one input through the state machine.
    pub fn handle(&mut self, input: SelectorInput) -> Option<SelectorEvent> {
        match (self.state, input) {
            (SelectorState::Closed, SelectorInput::Focus) => {
                self.state = SelectorState::Open;
                self.set_query(String::new());
                None
            }
            (SelectorState::Closed, _) => None,

            (SelectorState::Open, SelectorInput::Focus) => None,
            (SelectorState::Open, SelectorInput::Type(query)) => {
                self.set_query(query);
                None
            }
            (SelectorState::Open, SelectorInput::ArrowDown) => {
                if let Some(last) = self.filtered.len().checked_sub(1) {
                    self.highlighted = Some(match self.highlighted {
                        Some(i) => (i + 1).min(last),
                        None => 0,
                    });
                }
                None
            }
            (SelectorState::Open, SelectorInput::ArrowUp) => {
                if !self.filtered.is_empty() {
                    self.highlighted = Some(self.highlighted.map_or(0, |i| i.saturating_sub(1)));
                }
                None
            }
            (SelectorState::Open, SelectorInput::Enter) => {
                let row = self.highlighted?;
                self.commit_row(row)
            }
            (SelectorState::Open, SelectorInput::Click(row)) => self.commit_row(row),
            (SelectorState::Open, SelectorInput::Escape | SelectorInput::ClickOutside) => {
                self.close();
                Some(SelectorEvent::Dismissed)
            }
        }
    }

    fn set_query(&mut self, query: String) {
        let needle = query.trim().to_lowercase();
        self.filtered = if needle.is_empty() {
            (0..self.candidates.len()).collect()
        } else {
            self.candidates
                .iter()
                .enumerate()
                .filter(|&(_, item)| {
                    (self.display)(item).to_lowercase().contains(&needle)
                        || (self.subtitle)(item).to_lowercase().contains(&needle)
                })
                .map(|(i, _)| i)
                .collect()
        };
        self.query = query;
        self.highlighted = None;
    }

    fn commit_row(&mut self, row: usize) -> Option<SelectorEvent> {
        let index = *self.filtered.get(row)?;
        self.selected = Some(index);
        self.close();
        Some(SelectorEvent::Committed(index))
    }

    fn close(&mut self) {
        self.state = SelectorState::Closed;
        self.query.clear();
        self.highlighted = None;
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SelectorState::Open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Text the input box shows: the live query while open, the committed
    /// item's label otherwise.
    pub fn text(&self) -> String {
        if self.is_open() && !self.query.is_empty() {
            return self.query.clone();
        }
        self.selected().map(|item| (self.display)(item)).unwrap_or_default()
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    /// Current filtered rows, in original candidate order.
    pub fn filtered(&self) -> impl Iterator<Item = &T> + '_ {
        self.filtered.iter().map(|&i| &self.candidates[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.map(|i| &self.candidates[i])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn display_of(&self, item: &T) -> String {
        (self.display)(item)
    }

    pub fn subtitle_of(&self, item: &T) -> String {
        (self.subtitle)(item)
    }
}
