//! Full-screen terminal interface.
//!
//! The solver proposes each guess; the operator marks every slot with the
//! same digits the console codec uses (0 = gray, 1 = yellow, 2 = green)
//! and confirms the row. Esc abandons the session at any point.

use std::io;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::feedback::{Feedback, LetterState};
use crate::game::{GameOutcome, Oracle};
use crate::WORD_LENGTH;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow);

/// One board row: a proposed guess and the marks entered so far.
struct GuessRow {
    letters: [char; WORD_LENGTH],
    marks: [Option<LetterState>; WORD_LENGTH],
}

impl GuessRow {
    fn new(guess: &str) -> Self {
        let mut letters = [' '; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(guess.chars()) {
            *slot = c.to_ascii_uppercase();
        }
        Self {
            letters,
            marks: [None; WORD_LENGTH],
        }
    }

    /// The completed reply, once every slot is marked.
    fn feedback(&self) -> Option<Feedback> {
        let mut states = [LetterState::Miss; WORD_LENGTH];
        for (state, mark) in states.iter_mut().zip(self.marks) {
            *state = mark?;
        }
        Some(Feedback::new(states))
    }
}

fn mark_colors(mark: Option<LetterState>) -> (Color, Color) {
    match mark {
        None => (Color::DarkGray, Color::White),
        Some(LetterState::Miss) => (Color::Gray, Color::White),
        Some(LetterState::Present) => (Color::Yellow, Color::Black),
        Some(LetterState::Correct) => (Color::Green, Color::Black),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    /// Waiting for the operator to mark one slot of the newest row.
    Marking { index: usize },
    /// Every slot marked; waiting for Enter.
    Confirming,
    /// Terminal screen after the game resolved.
    GameOver,
}

enum MarkingEvent {
    Confirmed(Feedback),
    Abandoned,
}

/// Context for rendering the UI, grouped so the draw closure does not
/// borrow `self`.
struct RenderContext<'a> {
    rows: &'a [GuessRow],
    state: TuiState,
    status: &'a str,
    message: &'a str,
}

/// Oracle that renders the board with ratatui and collects marks in raw
/// mode. Terminal state is restored on drop.
pub struct TuiOracle {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rows: Vec<GuessRow>,
    state: TuiState,
    status: String,
    message: String,
}

impl TuiOracle {
    pub fn new() -> Result<Self, io::Error> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            rows: Vec::new(),
            state: TuiState::Marking { index: 0 },
            status: "Waiting for the first guess".to_string(),
            message: String::new(),
        })
    }

    fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            state: self.state,
            status: &self.status,
            message: &self.message,
        };
        self.terminal.draw(|f| render(f, &ctx))?;
        Ok(())
    }

    /// Next relevant key press, if any arrived within the poll window.
    /// Repeats, releases, mouse traffic, and modified characters are all
    /// filtered out, matching how alt-tab garbage reaches the terminal.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::ALT)
                    || key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    debug!("ignoring key with modifiers: {:?}", key.modifiers);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug!("ignoring event: {other:?}");
                Ok(None)
            }
        }
    }

    fn handle_marking_key(&mut self, key: KeyEvent) -> Option<MarkingEvent> {
        match self.state {
            TuiState::Marking { index } => match key.code {
                KeyCode::Esc => return Some(MarkingEvent::Abandoned),
                KeyCode::Char(c) => {
                    if let Some(mark) = LetterState::from_char(c) {
                        let row = self.rows.last_mut()?;
                        row.marks[index] = Some(mark);
                        if index + 1 < WORD_LENGTH {
                            self.state = TuiState::Marking { index: index + 1 };
                        } else {
                            self.state = TuiState::Confirming;
                            self.status = "Press Enter to confirm the row".to_string();
                        }
                        self.message.clear();
                    } else {
                        self.message =
                            format!("'{c}' is not a mark. Use 0 (gray), 1 (yellow), 2 (green).");
                    }
                }
                KeyCode::Backspace if index > 0 => {
                    let row = self.rows.last_mut()?;
                    row.marks[index - 1] = None;
                    self.state = TuiState::Marking { index: index - 1 };
                }
                _ => {}
            },
            TuiState::Confirming => match key.code {
                KeyCode::Esc => return Some(MarkingEvent::Abandoned),
                KeyCode::Enter => {
                    let feedback = self.rows.last().and_then(GuessRow::feedback)?;
                    return Some(MarkingEvent::Confirmed(feedback));
                }
                KeyCode::Backspace => {
                    let row = self.rows.last_mut()?;
                    row.marks[WORD_LENGTH - 1] = None;
                    self.state = TuiState::Marking {
                        index: WORD_LENGTH - 1,
                    };
                    self.status = "Mark each letter: 0 (gray), 1 (yellow), 2 (green)".to_string();
                }
                _ => {}
            },
            TuiState::GameOver => {}
        }
        None
    }

    /// Block until any key is pressed; used for the game-over screen.
    fn wait_for_key(&mut self) {
        loop {
            if self.draw().is_err() {
                return;
            }
            match self.next_key() {
                Ok(Some(_)) | Err(_) => return,
                Ok(None) => {}
            }
        }
    }
}

impl Oracle for TuiOracle {
    fn feedback_for(&mut self, guess: &str, round: usize) -> Option<Feedback> {
        self.rows.push(GuessRow::new(guess));
        self.state = TuiState::Marking { index: 0 };
        self.status =
            format!("Round {round}: play \"{guess}\", then mark each letter (0/1/2)");
        self.message.clear();

        loop {
            if self.draw().is_err() {
                return None;
            }
            match self.next_key() {
                Ok(Some(key)) => match self.handle_marking_key(key) {
                    Some(MarkingEvent::Confirmed(feedback)) => return Some(feedback),
                    Some(MarkingEvent::Abandoned) => return None,
                    None => {}
                },
                Ok(None) => {}
                Err(e) => {
                    debug!("input error: {e}");
                    return None;
                }
            }
        }
    }

    fn notify_outcome(&mut self, outcome: &GameOutcome) {
        self.state = TuiState::GameOver;
        match outcome {
            GameOutcome::Won { word, rounds } => {
                self.message = format!("Solved it: \"{word}\" in {rounds} round(s).");
                self.status = "Game over".to_string();
            }
            GameOutcome::Exhausted { history } => {
                self.message = format!("No win in {} rounds.", history.len());
                self.status = "Game over".to_string();
            }
            GameOutcome::Aborted { rounds_played } => {
                self.message = format!("Session ended after {rounds_played} round(s).");
                self.status = "Session ended".to_string();
            }
        }
        self.wait_for_key();
    }
}

impl Drop for TuiOracle {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn render(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(14),    // Board
            Constraint::Length(4),  // Message
            Constraint::Length(3),  // Status
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], ctx);
    render_message(f, chunks[2], ctx.message);
    render_status(f, chunks[3], ctx.status);
    render_instructions(f, chunks[4], ctx.state);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE AUTOPILOT")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (row_index, row) in ctx.rows.iter().enumerate() {
        let y = inner.y + (row_index as u16) * ROW_SPACING;
        if y >= inner.y + inner.height {
            break;
        }

        let mut spans = vec![Span::raw("  ")];
        for i in 0..WORD_LENGTH {
            let (bg, fg) = mark_colors(row.marks[i]);
            spans.push(Span::styled(
                format!(" {} ", row.letters[i]),
                Style::default().fg(fg).bg(bg),
            ));
            spans.push(Span::raw(" "));
        }

        let is_last = row_index == ctx.rows.len() - 1;
        if is_last {
            if let TuiState::Marking { index } = ctx.state {
                spans.push(Span::raw(format!(" <- marking slot {} (0/1/2)", index + 1)));
            }
        }

        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: 1,
            },
        );
    }
}

fn render_message(f: &mut Frame, area: Rect, message: &str) {
    let style = if message.starts_with("Solved") {
        SUCCESS_STYLE
    } else {
        MESSAGE_STYLE
    };
    let paragraph = Paragraph::new(message)
        .style(style)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
    let text = match state {
        TuiState::Marking { .. } => {
            "0: Gray (miss) | 1: Yellow (wrong spot) | 2: Green (correct) | BACKSPACE: Go back | ESC: Quit"
        }
        TuiState::Confirming => "ENTER: Confirm row | BACKSPACE: Go back and edit | ESC: Quit",
        TuiState::GameOver => "Press any key to exit",
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_row_uppercases_letters() {
        let row = GuessRow::new("crane");
        assert_eq!(row.letters, ['C', 'R', 'A', 'N', 'E']);
        assert!(row.marks.iter().all(Option::is_none));
    }

    #[test]
    fn test_guess_row_feedback_requires_all_marks() {
        let mut row = GuessRow::new("crane");
        assert!(row.feedback().is_none());

        row.marks = [
            Some(LetterState::Miss),
            Some(LetterState::Present),
            Some(LetterState::Correct),
            Some(LetterState::Miss),
            None,
        ];
        assert!(row.feedback().is_none());

        row.marks[4] = Some(LetterState::Correct);
        let feedback = row.feedback().unwrap();
        assert_eq!(feedback, Feedback::parse("01202").unwrap());
    }

    #[test]
    fn test_mark_colors_follow_wordle_palette() {
        assert_eq!(mark_colors(Some(LetterState::Correct)).0, Color::Green);
        assert_eq!(mark_colors(Some(LetterState::Present)).0, Color::Yellow);
        assert_eq!(mark_colors(Some(LetterState::Miss)).0, Color::Gray);
        assert_eq!(mark_colors(None).0, Color::DarkGray);
    }
}
