//! Plant care window: one row per plant, two buttons per row.
//!
//! # Responsibility
//! - Render status lines from the live `CareService`.
//! - Dispatch button presses to care actions and refresh every row after.
//! - Surface load/save problems and confirmations as modal dialogs.
//!
//! # Invariants
//! - Each `ActionButton` owns its plant name from row creation onward.
//! - Input is handled one event at a time; a press finishes its save and
//!   refresh before the next key is read.
//! - While a modal is open only dismiss keys (and Ctrl-C) have an effect.

use caretaker_core::{
    confirmation_message, display_name, status_line, CareAction, CareError,
    CareReceipt, CareResult, CareService, PlantRepository, StoreError,
};
use log::{info, warn};
use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};
use std::ops::Range;

const WINDOW_TITLE: &str = "Virtual Plant Caretaker";
const CORRUPTED_MESSAGE: &str = "Data file is corrupted. Resetting data.";
const HELP_TEXT: &str =
    "Up/Down: plant  Left/Right: button  Enter: press  w: water  f: fertilize  q: quit";
// Border top and bottom plus the buttons line.
const ROW_CHROME: u16 = 3;
const MODAL_WIDTH: u16 = 64;
const OK_LABEL: &str = "[ OK ]";
const ACCENT: Color = Color::Green;

/// A button bound to one plant and one action at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    plant: String,
    action: CareAction,
}

impl ActionButton {
    pub fn new(plant: impl Into<String>, action: CareAction) -> Self {
        Self {
            plant: plant.into(),
            action,
        }
    }

    pub fn plant(&self) -> &str {
        &self.plant
    }

    pub fn action(&self) -> CareAction {
        self.action
    }

    pub fn label(&self) -> &'static str {
        self.action.label()
    }

    /// Runs the bound care action against `service`.
    pub fn press<R: PlantRepository>(
        &self,
        service: &mut CareService<R>,
    ) -> CareResult<CareReceipt> {
        service.record_action(&self.plant, self.action)
    }
}

/// Display row for one plant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantRow {
    pub plant: String,
    pub title: String,
    pub status: String,
    pub buttons: [ActionButton; 2],
}

impl PlantRow {
    fn new(plant: &str) -> Self {
        Self {
            plant: plant.to_string(),
            title: display_name(plant),
            status: String::new(),
            buttons: CareAction::ALL.map(|action| ActionButton::new(plant, action)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Error,
    Success,
}

/// One-shot dialog; dismissed with Enter, Space or Esc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub kind: ModalKind,
    pub message: String,
}

impl Modal {
    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ModalKind::Error,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ModalKind::Success,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            ModalKind::Error => "Error",
            ModalKind::Success => "Success",
        }
    }
}

/// Shell state: the live service plus view-only widgets state.
pub struct App<R: PlantRepository> {
    service: CareService<R>,
    rows: Vec<PlantRow>,
    selected_row: usize,
    selected_button: usize,
    modal: Option<Modal>,
    status_note: Option<String>,
    should_quit: bool,
}

impl<R: PlantRepository> App<R> {
    /// Builds one row per plant and queues a dialog for any load notice.
    pub fn new(service: CareService<R>, load_notice: Option<StoreError>) -> Self {
        let rows = service
            .plant_names()
            .iter()
            .map(|name| PlantRow::new(name))
            .collect();
        let modal = load_notice.map(|notice| {
            if notice.is_corruption() {
                Modal::error(CORRUPTED_MESSAGE)
            } else {
                Modal::error(format!("{notice}. Using default plants."))
            }
        });

        let mut app = Self {
            service,
            rows,
            selected_row: 0,
            selected_button: 0,
            modal,
            status_note: None,
            should_quit: false,
        };
        app.refresh_status();
        app
    }

    /// Sets a persistent footer note, e.g. when file logging is unavailable.
    pub fn with_status_note(mut self, note: Option<String>) -> Self {
        self.status_note = note;
        self
    }

    pub fn rows(&self) -> &[PlantRow] {
        &self.rows
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn service(&self) -> &CareService<R> {
        &self.service
    }

    /// `(row, button)` indices of the focused button.
    pub fn selection(&self) -> (usize, usize) {
        (self.selected_row, self.selected_button)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draws and handles input until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> std::io::Result<()> {
        info!("event=shell_start module=app status=ok rows={}", self.rows.len());
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        info!("event=shell_quit module=app status=ok");
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.modal.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.modal = None;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_row(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_row(1),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.selected_button = 1 - self.selected_button;
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.press(self.selected_row, self.selected_button),
            KeyCode::Char('w') => self.press(self.selected_row, 0),
            KeyCode::Char('f') => self.press(self.selected_row, 1),
            _ => {}
        }
    }

    /// Presses button `button` of row `row`; out-of-range indices are ignored.
    pub fn press(&mut self, row: usize, button: usize) {
        let Some(target) = self
            .rows
            .get(row)
            .and_then(|plant_row| plant_row.buttons.get(button))
            .cloned()
        else {
            return;
        };

        match target.press(&mut self.service) {
            Ok(receipt) => {
                self.refresh_status();
                self.modal = Some(Modal::success(confirmation_message(
                    &receipt.plant,
                    receipt.action,
                )));
            }
            Err(err) => {
                warn!(
                    "event=button_press module=app status=error action={}",
                    target.action().as_str()
                );
                // A failed save still leaves the in-memory record stamped.
                self.refresh_status();
                let message = match err {
                    CareError::Store(store_err) => format!("Could not save plant data: {store_err}"),
                    other => other.to_string(),
                };
                self.modal = Some(Modal::error(message));
            }
        }
    }

    /// Re-renders every row's status line from the service.
    fn refresh_status(&mut self) {
        for row in &mut self.rows {
            if let Some(record) = self.service.record(&row.plant) {
                row.status = status_line(&row.plant, record);
            }
        }
    }

    fn move_row(&mut self, delta: isize) {
        let count = self.rows.len();
        if count == 0 {
            return;
        }
        self.selected_row = (self.selected_row as isize + delta).rem_euclid(count as isize) as usize;
    }

    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let rows_area = chunks[1];
        let status_lines: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| wrap_words(&row.status, rows_area.width.saturating_sub(2)))
            .collect();
        let heights: Vec<u16> = status_lines
            .iter()
            .map(|lines| u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(ROW_CHROME))
            .collect();
        let visible = visible_rows(&heights, self.selected_row, rows_area.height);

        let count = self.rows.len();
        let position = if visible.len() < count {
            format!("  plants {}-{} of {count}", visible.start + 1, visible.end)
        } else {
            format!("  {count} plants")
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                WINDOW_TITLE,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(position, Style::default().fg(Color::DarkGray)),
        ]));
        frame.render_widget(header, chunks[0]);

        self.draw_rows(frame, rows_area, &status_lines, &heights, visible);

        let footer = match &self.status_note {
            Some(note) => Line::from(Span::styled(note.as_str(), Style::default().fg(Color::Yellow))),
            None => Line::from(Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray))),
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);

        if let Some(modal) = &self.modal {
            self.draw_modal(frame, modal);
        }
    }

    fn draw_rows(
        &self,
        frame: &mut Frame,
        area: Rect,
        status_lines: &[Vec<String>],
        heights: &[u16],
        visible: Range<usize>,
    ) {
        let mut y = area.y;
        for index in visible {
            let height = heights[index].min(area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let row = &self.rows[index];
            let focused = index == self.selected_row;
            let border_style = if focused {
                Style::default().fg(ACCENT)
            } else {
                Style::default()
            };

            let mut buttons = Vec::with_capacity(row.buttons.len() * 2);
            for (button_index, button) in row.buttons.iter().enumerate() {
                let style = if focused && button_index == self.selected_button {
                    Style::default().fg(Color::Black).bg(ACCENT)
                } else {
                    Style::default().fg(ACCENT)
                };
                buttons.push(Span::styled(format!("[ {} ]", button.label()), style));
                buttons.push(Span::raw("  "));
            }

            let mut lines: Vec<Line> = status_lines[index]
                .iter()
                .map(|text| Line::from(text.as_str()))
                .collect();
            lines.push(Line::from(buttons));

            let body = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(Span::styled(
                        row.title.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
            );
            let row_area = Rect {
                x: area.x,
                y,
                width: area.width,
                height,
            };
            frame.render_widget(body, row_area);
            y += height;
        }
    }

    fn draw_modal(&self, frame: &mut Frame, modal: &Modal) {
        let screen = frame.area();
        let width = MODAL_WIDTH.min(screen.width);
        let mut message = wrap_words(&modal.message, width.saturating_sub(2));
        // Borders plus the OK line; the message gives way when the screen is short.
        let room = usize::from(screen.height.saturating_sub(3)).max(1);
        message.truncate(room);
        let height = u16::try_from(message.len()).unwrap_or(u16::MAX).saturating_add(3);
        let area = centered(screen, width, height);

        let color = match modal.kind {
            ModalKind::Error => Color::Red,
            ModalKind::Success => ACCENT,
        };
        let mut lines: Vec<Line> = message.into_iter().map(Line::from).collect();
        lines.push(Line::from(Span::styled(
            OK_LABEL,
            Style::default().fg(Color::Black).bg(color),
        )));
        let dialog = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(modal.title()),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(dialog, area);
    }
}

/// Greedy word wrap to `width` columns; words longer than a line are split.
///
/// Always yields at least one line so every row keeps its status slot.
fn wrap_words(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        if current_len > 0 && current_len + 1 + chars.len() <= width {
            current.push(' ');
            current.extend(chars.iter());
            current_len += 1 + chars.len();
            continue;
        }
        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        while chars.len() > width {
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        current_len = chars.len();
        current.extend(chars);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rows to draw so the selected one is on screen.
///
/// Starts as far up as still keeps `selected` visible, then fills downward.
/// The selected row is always included even when it alone overflows.
fn visible_rows(heights: &[u16], selected: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let selected = selected.min(heights.len() - 1);
    let available = u32::from(available);
    let mut used = u32::from(heights[selected]);

    let mut first = selected;
    while first > 0 && used + u32::from(heights[first - 1]) <= available {
        first -= 1;
        used += u32::from(heights[first]);
    }

    let mut end = selected + 1;
    while end < heights.len() && used + u32::from(heights[end]) <= available {
        used += u32::from(heights[end]);
        end += 1;
    }
    first..end
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
