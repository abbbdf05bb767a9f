//! The quiz form.
//!
//! State machine over the round loop: enter a credential and a topic,
//! generate a smelly example, annotate it in place, submit for grading,
//! advance. Orchestrator actions validate and mutate state but perform no
//! I/O themselves; they hand a [`Dispatch`] back to the event loop, which
//! does the spawning. Outcomes come back in through [`App::on_outcome`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::{Palette, SPINNER_FRAMES};
use crate::config::Config;
use crate::errors::InputError;
use crate::prompts;
use crate::quiz::Quiz;
use crate::runner::{Outcome, RequestKind};

/// Which widget receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ApiKey,
    Topic,
    Code,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::ApiKey => Focus::Topic,
            Focus::Topic => Focus::Code,
            Focus::Code => Focus::ApiKey,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::ApiKey => Focus::Code,
            Focus::Topic => Focus::ApiKey,
            Focus::Code => Focus::Topic,
        }
    }
}

/// A request the event loop should fire, produced by a form action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub kind: RequestKind,
    pub prompt: String,
    pub api_key: String,
}

/// An editable text buffer with a cursor. Single-line fields simply never
/// receive `'\n'`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Move the cursor one line up, keeping the byte column where possible.
    pub fn up(&mut self) {
        let (line_start, col) = self.line_start_and_col();
        if line_start == 0 {
            return;
        }
        let prev_start = self.text[..line_start - 1]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let prev_len = line_start - 1 - prev_start;
        self.cursor = prev_start + col.min(prev_len);
    }

    /// Move the cursor one line down, keeping the byte column where possible.
    pub fn down(&mut self) {
        let (_, col) = self.line_start_and_col();
        let Some(next_nl) = self.text[self.cursor..].find('\n') else {
            return;
        };
        let next_start = self.cursor + next_nl + 1;
        let next_len = self.text[next_start..]
            .find('\n')
            .unwrap_or(self.text.len() - next_start);
        self.cursor = next_start + col.min(next_len);
    }

    /// 0-based (row, display-column) of the cursor, for terminal placement.
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let row = before.matches('\n').count();
        let line = before.rsplit('\n').next().unwrap_or(before);
        (row, line.width())
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    fn line_start_and_col(&self) -> (usize, usize) {
        let start = self.text[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        (start, self.cursor - start)
    }
}

/// The quiz form state.
pub struct App {
    focus: Focus,
    api_key: TextBuffer,
    topic: TextBuffer,
    code: TextBuffer,
    feedback: String,
    quiz: Quiz,
    /// The in-flight override: while set, every control is disabled.
    busy: Option<RequestKind>,
    busy_label: String,
    advance_ready: bool,
    finished: bool,
    should_quit: bool,
    tick: usize,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            focus: Focus::ApiKey,
            api_key: TextBuffer::from_text(config.api_key.clone().unwrap_or_default()),
            topic: TextBuffer::default(),
            code: TextBuffer::default(),
            feedback: String::new(),
            quiz: Quiz::new(config.rounds),
            busy: None,
            busy_label: String::new(),
            advance_ready: false,
            finished: false,
            should_quit: false,
            tick: 0,
        }
    }

    // ─── Readiness & enablement ────────────────────────────────────

    pub fn has_credential(&self) -> bool {
        !self.api_key.is_blank()
    }

    pub fn has_topic(&self) -> bool {
        !self.topic.is_blank()
    }

    pub fn has_example(&self) -> bool {
        !self.code.is_blank()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn example_text(&self) -> &str {
        self.code.text()
    }

    /// Enablement is a pure function of current field contents plus the
    /// in-flight override; there is no separate "done loading" flag.
    pub fn can_generate(&self) -> bool {
        !self.is_busy() && !self.finished && self.has_credential() && self.has_topic()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.finished && self.has_credential() && self.has_example()
    }

    pub fn can_advance(&self) -> bool {
        !self.is_busy() && !self.finished && self.advance_ready
    }

    // ─── Actions ───────────────────────────────────────────────────

    /// Request a fresh bad-code example. On a validation failure the
    /// message is shown inline and nothing is dispatched.
    pub fn generate(&mut self) -> Option<Dispatch> {
        if self.is_busy() || self.finished {
            return None;
        }
        if !self.has_credential() {
            self.feedback = InputError::MissingCredential.to_string();
            return None;
        }
        if !self.has_topic() {
            self.feedback = InputError::MissingTopic.to_string();
            return None;
        }

        self.begin(RequestKind::Generate, "Creating smelly code ...");
        Some(self.dispatch(RequestKind::Generate, prompts::bad_code(self.topic.text())))
    }

    /// Submit the annotated example for grading.
    pub fn submit(&mut self) -> Option<Dispatch> {
        if self.is_busy() || self.finished {
            return None;
        }
        if !self.has_credential() {
            self.feedback = InputError::MissingCredential.to_string();
            return None;
        }
        if !self.has_example() {
            self.feedback = InputError::MissingExample.to_string();
            return None;
        }

        self.begin(RequestKind::Grade, "Grading answers ...");
        Some(self.dispatch(
            RequestKind::Grade,
            prompts::grade_annotations(self.topic.text(), self.code.text()),
        ))
    }

    /// Move to the next example, or wrap up the round after the last one.
    pub fn advance(&mut self) -> Option<Dispatch> {
        if !self.can_advance() {
            return None;
        }
        self.advance_ready = false;
        self.quiz.advance();

        if !self.quiz.is_over() {
            self.code.clear();
            self.feedback.clear();
            return self.generate();
        }

        self.begin(RequestKind::Closing, "Summing up ...");
        Some(self.dispatch(
            RequestKind::Closing,
            prompts::closing_feedback(self.quiz.score(), self.quiz.total()),
        ))
    }

    /// Apply the terminal event of the outstanding request.
    ///
    /// Failures touch nothing but the feedback pane and the busy flag, so a
    /// failed call can never corrupt quiz state.
    pub fn on_outcome(&mut self, kind: RequestKind, outcome: Outcome) {
        self.busy = None;
        self.busy_label.clear();

        match outcome {
            Outcome::Failure(message) => {
                self.feedback = format!("An error occurred: {}", message);
            }
            Outcome::Success(text) => match kind {
                RequestKind::Generate => {
                    self.code.set_text(text);
                    self.focus = Focus::Code;
                }
                RequestKind::Grade => {
                    self.quiz.record_feedback(&text);
                    self.feedback = text;
                    self.advance_ready = true;
                }
                RequestKind::Closing => {
                    self.feedback = text;
                    self.topic.clear();
                    self.code.clear();
                    self.finished = true;
                }
            },
        }
    }

    fn begin(&mut self, kind: RequestKind, label: &str) {
        self.busy = Some(kind);
        self.busy_label = label.to_string();
    }

    fn dispatch(&self, kind: RequestKind, prompt: String) -> Dispatch {
        Dispatch {
            kind,
            prompt,
            api_key: self.api_key.text().trim().to_string(),
        }
    }

    // ─── Input handling ────────────────────────────────────────────

    /// Advance the spinner. Called once per rendered frame.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Route one key event. Returns the request to fire, if the key
    /// triggered a form action.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Dispatch> {
        // Quitting works even while a request is outstanding; everything
        // else is disabled until the terminal event arrives.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return None;
        }
        if self.is_busy() {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('g') => self.generate(),
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('n') => self.advance(),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => {
                if self.focus == Focus::Code {
                    self.code.insert('\n');
                } else {
                    self.focus = self.focus.next();
                }
            }
            KeyCode::Backspace => self.focused_mut().backspace(),
            KeyCode::Left => self.focused_mut().left(),
            KeyCode::Right => self.focused_mut().right(),
            KeyCode::Up => {
                if self.focus == Focus::Code {
                    self.code.up();
                }
            }
            KeyCode::Down => {
                if self.focus == Focus::Code {
                    self.code.down();
                }
            }
            KeyCode::Char(c) => self.focused_mut().insert(c),
            _ => {}
        }
        None
    }

    fn focused_mut(&mut self) -> &mut TextBuffer {
        match self.focus {
            Focus::ApiKey => &mut self.api_key,
            Focus::Topic => &mut self.topic,
            Focus::Code => &mut self.code,
        }
    }

    // ─── Rendering ─────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // API key
                Constraint::Length(3), // Topic
                Constraint::Min(8),    // Code
                Constraint::Length(8), // Feedback
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_api_key(frame, chunks[1]);
        self.render_topic(frame, chunks[2]);
        self.render_code(frame, chunks[3]);
        self.render_feedback(frame, chunks[4]);
        self.render_status_bar(frame, chunks[5]);

        if !self.is_busy() {
            self.place_cursor(frame, chunks[1], chunks[2], chunks[3]);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Palette::border_style())
            .title(Span::styled(
                " smellhunt — spot the bad code ",
                Palette::title_style(),
            ));

        let progress = format!(
            " Example {}/{}  │  Score {} ",
            self.quiz.current_index().min(self.quiz.total()),
            self.quiz.total(),
            self.quiz.score()
        );
        let paragraph = Paragraph::new(progress)
            .style(Palette::text_style())
            .alignment(Alignment::Right)
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_api_key(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus == Focus::ApiKey {
            Palette::focus_style()
        } else if self.has_credential() {
            Palette::ready_style()
        } else {
            Palette::border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Anthropic API key ");

        // Masked: one bullet per character, never the key itself.
        let mask = "•".repeat(self.api_key.text().chars().count());
        let paragraph = Paragraph::new(mask).style(Palette::text_style()).block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_topic(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus == Focus::Topic {
            Palette::focus_style()
        } else {
            Palette::border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Area to improve ");

        let paragraph = Paragraph::new(self.topic.text())
            .style(Palette::text_style())
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_code(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus == Focus::Code {
            Palette::focus_style()
        } else {
            Palette::border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Bad code example — add your comments where the code is bad ");

        let inner_height = area.height.saturating_sub(2) as usize;
        let (row, _) = self.code.cursor_position();
        let scroll = row.saturating_sub(inner_height.saturating_sub(1)) as u16;

        let paragraph = Paragraph::new(self.code.text())
            .style(Palette::text_style())
            .scroll((scroll, 0))
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_feedback(&self, frame: &mut Frame, area: Rect) {
        let style = if self.feedback.starts_with("An error occurred:")
            || self.feedback.starts_with("Please ")
        {
            Palette::error_style()
        } else {
            Palette::text_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Palette::border_style())
            .title(" Feedback ");

        let paragraph = Paragraph::new(self.feedback.as_str())
            .style(style)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if self.is_busy() {
            let frame_glyph = SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()];
            Line::from(vec![
                Span::styled(format!(" {} ", frame_glyph), Palette::title_style()),
                Span::styled(self.busy_label.clone(), Palette::text_style()),
            ])
        } else if self.finished {
            Line::from(Span::styled(
                " Round over — relaunch to play again │ ^C quit ",
                Palette::success_style(),
            ))
        } else {
            let hint = |label: &str, enabled: bool| {
                Span::styled(
                    format!(" {} ", label),
                    if enabled {
                        Palette::text_style()
                    } else {
                        Palette::muted_style()
                    },
                )
            };
            Line::from(vec![
                Span::styled(" Tab fields ", Palette::muted_style()),
                Span::raw("│"),
                hint("^G generate", self.can_generate()),
                Span::raw("│"),
                hint("^S submit", self.can_submit()),
                Span::raw("│"),
                hint("^N next", self.can_advance()),
                Span::raw("│"),
                Span::styled(" ^C quit ", Palette::muted_style()),
            ])
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn place_cursor(&self, frame: &mut Frame, key_area: Rect, topic_area: Rect, code_area: Rect) {
        let (area, x, y) = match self.focus {
            Focus::ApiKey => {
                let count = self.api_key.text()[..self.api_key.cursor].chars().count();
                (key_area, count as u16, 0)
            }
            Focus::Topic => {
                let col = self.topic.text()[..self.topic.cursor].width();
                (topic_area, col as u16, 0)
            }
            Focus::Code => {
                let (row, col) = self.code.cursor_position();
                let inner_height = code_area.height.saturating_sub(2) as usize;
                let scroll = row.saturating_sub(inner_height.saturating_sub(1));
                (code_area, col as u16, (row - scroll) as u16)
            }
        };

        let inner_x = area.x + 1 + x;
        let inner_y = area.y + 1 + y;
        if inner_x < area.x + area.width - 1 && inner_y < area.y + area.height - 1 {
            frame.set_cursor_position(Position::new(inner_x, inner_y));
        }
    }
}
