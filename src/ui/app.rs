use std::mem;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db::persist;
use crate::exchange::{ExchangeEvent, ExchangePanel, ExchangeStatus};
use crate::images::load_image;
use crate::models::{
    cycle_palette, BackgroundType, CardDocument, ContactList, IconStyle, ImageSlot, TextField,
    BACKGROUND_COLORS, BUTTON_COLORS, PAGE_COLORS,
};
use crate::render::render;
use crate::vcard;

use super::forms::{
    AccreditationField, AccreditationForm, ContactField, ContactForm, ExchangeForm, PathForm,
    TextForm,
};
use super::helpers::{centered_rect, clamp_cursor, ellipsize, hex_color, surface_error};
use super::preview::{draw_card, draw_exchange};
use super::screens::{
    content_rows, describe_content_row, describe_design_row, design_rows, ContentRow, DesignRow,
    EditorScreen, Tab,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Which top-level view is on screen.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Screen {
    /// Form pane plus live preview.
    Editor,
    /// Read-only, full-screen card.
    Preview,
}

/// Startup settings handed over by `main`.
pub struct AppOptions {
    pub export_dir: PathBuf,
    pub start_in_preview: bool,
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    EditingText(TextForm),
    EditingContact(ContactForm),
    EditingAccreditation(AccreditationForm),
    PickingImage { slot: ImageSlot, form: PathForm },
    Exchange(ExchangeForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    doc: CardDocument,
    export_dir: PathBuf,
    screen: Screen,
    editor: EditorScreen,
    mode: Mode,
    status: Option<StatusMessage>,
    exchange: ExchangePanel,
    preview_link: usize,
    preview_scroll: u16,
}

impl App {
    pub fn new(conn: Connection, doc: CardDocument, options: AppOptions) -> Self {
        let screen = if options.start_in_preview {
            Screen::Preview
        } else {
            Screen::Editor
        };
        Self {
            conn,
            doc,
            export_dir: options.export_dir,
            screen,
            editor: EditorScreen::new(),
            mode: Mode::Normal,
            status: None,
            exchange: ExchangePanel::new(),
            preview_link: 0,
            preview_scroll: 0,
        }
    }

    pub fn document(&self) -> &CardDocument {
        &self.doc
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::EditingText(form) => self.handle_edit_text(code, form)?,
            Mode::EditingContact(form) => self.handle_edit_contact(code, form)?,
            Mode::EditingAccreditation(form) => self.handle_edit_accreditation(code, form)?,
            Mode::PickingImage { slot, form } => self.handle_pick_image(code, slot, form)?,
            Mode::Exchange(form) => self.handle_exchange(code, form)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Export shortcut that works from every mode.
    pub(crate) fn handle_ctrl_s(&mut self) -> Result<()> {
        self.export_card();
        Ok(())
    }

    /// Advance the exchange panel's timers. Called on every pass of the event
    /// loop.
    pub fn tick(&mut self, now: Instant) {
        match self.exchange.tick(now) {
            Some(ExchangeEvent::Sent) => debug!("exchange details sent"),
            Some(ExchangeEvent::Closed) => {
                if matches!(self.mode, Mode::Exchange(_)) {
                    self.mode = Mode::Normal;
                }
            }
            None => {}
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Editor => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    *exit = true;
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    self.clear_status();
                    self.editor.switch_tab();
                }
                KeyCode::Up => self.editor.move_selection(-1, &self.doc),
                KeyCode::Down => self.editor.move_selection(1, &self.doc),
                KeyCode::PageUp => self.editor.move_selection(-5, &self.doc),
                KeyCode::PageDown => self.editor.move_selection(5, &self.doc),
                KeyCode::Home => self.editor.selected = 0,
                KeyCode::End => self.editor.select_last(&self.doc),
                KeyCode::Left => self.adjust_design_row(-1),
                KeyCode::Right => self.adjust_design_row(1),
                KeyCode::Enter => {
                    self.clear_status();
                    return Ok(self.activate_row());
                }
                KeyCode::Char('d') | KeyCode::Delete => self.remove_row(),
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.clear_status();
                    self.open_preview();
                }
                KeyCode::Char('s') | KeyCode::Char('S') => self.export_card(),
                KeyCode::Char('x') | KeyCode::Char('X') => return Ok(self.open_exchange()),
                _ => {}
            },
            Screen::Preview => match code {
                KeyCode::Char('q') => {
                    *exit = true;
                }
                KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.clear_status();
                    self.screen = Screen::Editor;
                }
                KeyCode::Up => self.move_preview_link(-1),
                KeyCode::Down => self.move_preview_link(1),
                KeyCode::PageUp => self.preview_scroll = self.preview_scroll.saturating_sub(5),
                KeyCode::PageDown => self.preview_scroll = self.preview_scroll.saturating_add(5),
                KeyCode::Enter => self.open_selected_link(),
                KeyCode::Char('s') | KeyCode::Char('S') => self.export_card(),
                KeyCode::Char('x') | KeyCode::Char('X') => return Ok(self.open_exchange()),
                _ => {}
            },
        }
        Ok(Mode::Normal)
    }

    fn handle_edit_text(&mut self, code: KeyCode, mut form: TextForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                self.doc.set_text(form.field, form.value.clone());
                self.commit();
                let row = ContentRow::Text(form.field);
                self.editor.focus_content_row(&self.doc, &row);
                self.set_status(
                    format!("Updated {}.", form.field.short_name()),
                    StatusKind::Info,
                );
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::EditingText(form))
    }

    fn handle_edit_contact(&mut self, code: KeyCode, mut form: ContactForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                let updated = self.doc.update_contact(
                    form.list,
                    &form.id,
                    Some(form.value.clone()),
                    Some(form.label.clone()),
                );
                if updated {
                    self.commit();
                    self.set_status(format!("Saved {}.", form.list.noun()), StatusKind::Info);
                } else {
                    self.set_status("That entry no longer exists.", StatusKind::Error);
                }
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Left => {
                form.cycle_label(-1);
            }
            KeyCode::Right => {
                form.cycle_label(1);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::EditingContact(form))
    }

    fn handle_edit_accreditation(
        &mut self,
        code: KeyCode,
        mut form: AccreditationForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                let updated = self.doc.update_accreditation(
                    &form.id,
                    Some(form.label.clone()),
                    Some(form.url.clone()),
                );
                if updated {
                    self.commit();
                    self.set_status("Saved accreditation.", StatusKind::Info);
                } else {
                    self.set_status("That entry no longer exists.", StatusKind::Error);
                }
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::EditingAccreditation(form))
    }

    fn handle_pick_image(
        &mut self,
        code: KeyCode,
        slot: ImageSlot,
        mut form: PathForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                let Some(path) = form.resolved() else {
                    return Ok(Mode::Normal);
                };
                match load_image(&path) {
                    Ok(Some(url)) => {
                        self.doc.set_image(slot, Some(url));
                        self.commit();
                        self.set_status(format!("{} updated.", slot.label()), StatusKind::Info);
                    }
                    Ok(None) => {}
                    Err(err) => {
                        warn!(error = %err, "image could not be read");
                        self.set_status(err.to_string(), StatusKind::Error);
                    }
                }
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::PickingImage { slot, form })
    }

    fn handle_exchange(&mut self, code: KeyCode, mut form: ExchangeForm) -> Result<Mode> {
        if code == KeyCode::Esc {
            self.exchange.close();
            return Ok(Mode::Normal);
        }
        if self.exchange.status() != ExchangeStatus::Idle {
            return Ok(Mode::Exchange(form));
        }

        match code {
            KeyCode::Enter => match form.validate() {
                Ok(()) => {
                    form.error = None;
                    if self.exchange.submit(Instant::now()) {
                        info!("exchange form submitted");
                    }
                }
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::Exchange(form))
    }

    /// Enter on the selected row: open the matching form or apply the action.
    fn activate_row(&mut self) -> Mode {
        if let Some(row) = self.editor.current_design_row(&self.doc) {
            return match row {
                DesignRow::Image(slot) => Mode::PickingImage {
                    slot,
                    form: PathForm::default(),
                },
                _ => {
                    self.adjust_design_row(1);
                    Mode::Normal
                }
            };
        }

        let Some(row) = self.editor.current_content_row(&self.doc) else {
            return Mode::Normal;
        };
        match row {
            ContentRow::Text(field) | ContentRow::AddField(field) => {
                Mode::EditingText(TextForm::new(field, self.doc.text(field)))
            }
            ContentRow::Contact { list, id } => self.contact_form(list, &id),
            ContentRow::Accreditation { id } => self.accreditation_form(&id),
            ContentRow::AddContact(list) => {
                let id = self.doc.add_contact(list);
                self.commit();
                let row = ContentRow::Contact {
                    list,
                    id: id.clone(),
                };
                self.editor.focus_content_row(&self.doc, &row);
                self.contact_form(list, &id)
            }
            ContentRow::AddAccreditation => {
                let id = self.doc.add_accreditation();
                self.commit();
                let row = ContentRow::Accreditation { id: id.clone() };
                self.editor.focus_content_row(&self.doc, &row);
                self.accreditation_form(&id)
            }
        }
    }

    fn contact_form(&self, list: ContactList, id: &str) -> Mode {
        match self.doc.contacts(list).iter().find(|item| item.id == id) {
            Some(item) => Mode::EditingContact(ContactForm::from_item(list, item)),
            None => Mode::Normal,
        }
    }

    fn accreditation_form(&self, id: &str) -> Mode {
        match self.doc.accreditations.iter().find(|item| item.id == id) {
            Some(item) => Mode::EditingAccreditation(AccreditationForm::from_item(item)),
            None => Mode::Normal,
        }
    }

    /// Delete the selected field, item or image.
    fn remove_row(&mut self) {
        if let Some(row) = self.editor.current_design_row(&self.doc) {
            if let DesignRow::Image(slot) = row {
                if self.doc.image(slot).is_some() {
                    self.doc.set_image(slot, None);
                    self.commit();
                    self.set_status(format!("Removed {}.", slot.label()), StatusKind::Info);
                }
            }
            return;
        }

        let Some(row) = self.editor.current_content_row(&self.doc) else {
            return;
        };
        let removed = match &row {
            ContentRow::Text(field) if field.is_removable() => {
                self.doc.clear_text(*field);
                true
            }
            ContentRow::Text(_) => {
                self.set_status("The name field cannot be removed.", StatusKind::Error);
                false
            }
            ContentRow::Contact { list, id } => self.doc.remove_contact(*list, id),
            ContentRow::Accreditation { id } => self.doc.remove_accreditation(id),
            ContentRow::AddField(_)
            | ContentRow::AddContact(_)
            | ContentRow::AddAccreditation => false,
        };
        if removed {
            self.commit();
            self.set_status("Removed.", StatusKind::Info);
        }
    }

    /// Left/Right on a design row cycles its option or palette.
    fn adjust_design_row(&mut self, step: isize) {
        let Some(row) = self.editor.current_design_row(&self.doc) else {
            return;
        };
        match row {
            DesignRow::Image(_) => return,
            DesignRow::BackgroundType => {
                let next = match self.doc.card_background_type {
                    BackgroundType::Color => BackgroundType::Image,
                    BackgroundType::Image => BackgroundType::Color,
                };
                self.doc.set_background_type(next);
            }
            DesignRow::BackgroundColor => {
                let next = cycle_palette(BACKGROUND_COLORS, &self.doc.card_background_color, step);
                self.doc.set_background_color(next);
            }
            DesignRow::ThemeColor => {
                let next = cycle_palette(PAGE_COLORS, &self.doc.theme_color, step);
                self.doc.set_theme_color(next);
            }
            DesignRow::Alignment => {
                let current = self.doc.profile_alignment;
                let next = if step < 0 {
                    current.previous()
                } else {
                    current.next()
                };
                self.doc.set_alignment(next);
            }
            DesignRow::IconStyle => {
                let next = match self.doc.icon_style {
                    IconStyle::Original => IconStyle::Custom,
                    IconStyle::Custom => IconStyle::Original,
                };
                self.doc.set_icon_style(next);
            }
            DesignRow::IconColor => {
                let next = cycle_palette(BUTTON_COLORS, &self.doc.icon_color, step);
                self.doc.set_icon_color(next);
            }
            DesignRow::ButtonColor => {
                let next = cycle_palette(BUTTON_COLORS, &self.doc.button_color, step);
                self.doc.set_button_color(next);
            }
        }
        self.commit();
    }

    /// Persist after an edit and keep the selection valid.
    fn commit(&mut self) {
        persist(&self.conn, &self.doc);
        self.editor.ensure_in_bounds(&self.doc);
    }

    fn export_card(&mut self) {
        match vcard::export_to(&self.export_dir, &self.doc) {
            Ok(path) => {
                self.set_status(
                    format!("Saved contact to {}.", path.display()),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                warn!(error = %err, "vcard export failed");
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    fn open_preview(&mut self) {
        self.screen = Screen::Preview;
        self.preview_link = 0;
        self.preview_scroll = 0;
    }

    fn open_exchange(&mut self) -> Mode {
        self.clear_status();
        self.exchange.open();
        Mode::Exchange(ExchangeForm::default())
    }

    fn move_preview_link(&mut self, offset: isize) {
        let count = render(&self.doc).links().len() as isize;
        if count == 0 {
            self.preview_link = 0;
            return;
        }
        self.preview_link = (self.preview_link as isize + offset).clamp(0, count - 1) as usize;
    }

    fn open_selected_link(&mut self) {
        let links = render(&self.doc).links();
        let Some((label, href)) = links.get(self.preview_link) else {
            self.set_status("Nothing to open on this card.", StatusKind::Error);
            return;
        };
        match open_link(href) {
            Ok(()) => self.set_status(format!("Opened {label}."), StatusKind::Info),
            Err(err) => {
                warn!(error = %err, href = %href, "failed to open link");
                self.set_status(format!("Failed to open link: {err}"), StatusKind::Error);
            }
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let card_area = match self.screen {
            Screen::Editor => self.draw_editor(frame, content_area),
            Screen::Preview => {
                let view = render(&self.doc);
                draw_card(
                    frame,
                    content_area,
                    &view,
                    Some(self.preview_link),
                    self.preview_scroll,
                );
                content_area
            }
        };

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::EditingText(form) => self.draw_text_form(frame, area, form),
            Mode::EditingContact(form) => self.draw_contact_form(frame, area, form),
            Mode::EditingAccreditation(form) => self.draw_accreditation_form(frame, area, form),
            Mode::PickingImage { slot, form } => self.draw_image_prompt(frame, area, *slot, form),
            Mode::Exchange(form) => {
                draw_exchange(frame, card_area, &self.exchange, form, &self.doc.name)
            }
            Mode::Normal => {}
        }
    }

    /// Draw the live preview and the form pane; returns the preview area so
    /// overlays can be placed on the phone frame.
    fn draw_editor(&self, frame: &mut Frame, area: Rect) -> Rect {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let preview_block = Block::default().borders(Borders::ALL).title("Live Preview");
        let preview_inner = preview_block.inner(chunks[0]);
        frame.render_widget(preview_block, chunks[0]);
        let view = render(&self.doc);
        draw_card(frame, preview_inner, &view, None, 0);

        self.draw_form_pane(frame, chunks[1]);
        preview_inner
    }

    fn draw_form_pane(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let selected_tab = match self.editor.tab {
            Tab::Content => 0,
            Tab::Design => 1,
        };
        let tabs = Tabs::new(vec!["Content", "Design"])
            .select(selected_tab)
            .block(Block::default().borders(Borders::ALL).title("Customize"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        let value_width = (chunks[1].width as usize).saturating_sub(28);
        let label_style = Style::default().fg(Color::Cyan);
        let add_style = Style::default().fg(Color::Green);

        let items: Vec<ListItem> = match self.editor.tab {
            Tab::Content => content_rows(&self.doc)
                .iter()
                .map(|row| {
                    let (label, value) = describe_content_row(&self.doc, row);
                    let line = match row {
                        ContentRow::AddField(_)
                        | ContentRow::AddContact(_)
                        | ContentRow::AddAccreditation => {
                            Line::from(Span::styled(label, add_style))
                        }
                        _ => Line::from(vec![
                            Span::styled(format!("{label}: "), label_style),
                            Span::raw(ellipsize(&value, value_width)),
                        ]),
                    };
                    ListItem::new(line)
                })
                .collect(),
            Tab::Design => design_rows(&self.doc)
                .into_iter()
                .map(|row| {
                    let (label, value) = describe_design_row(&self.doc, row);
                    let mut spans = vec![Span::styled(format!("{label}: "), label_style)];
                    let is_color = matches!(
                        row,
                        DesignRow::BackgroundColor
                            | DesignRow::ThemeColor
                            | DesignRow::IconColor
                            | DesignRow::ButtonColor
                    );
                    if is_color {
                        spans.push(Span::styled("██ ", Style::default().fg(hex_color(&value))));
                    }
                    spans.push(Span::raw(ellipsize(&value, value_width)));
                    ListItem::new(Line::from(spans))
                })
                .collect(),
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");
        let mut state = ListState::default().with_selected(Some(self.editor.selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::Exchange(_)) => &[("[Enter]", "Connect"), ("[Tab]", "Next"), ("[Esc]", "Close")],
            (_, Mode::EditingContact(_)) => &[
                ("[Enter]", "Save"),
                ("[Tab]", "Switch"),
                ("[←→]", "Label"),
                ("[Esc]", "Cancel"),
            ],
            (_, Mode::EditingText(_))
            | (_, Mode::EditingAccreditation(_))
            | (_, Mode::PickingImage { .. }) => &[("[Enter]", "Save"), ("[Esc]", "Cancel")],
            (Screen::Preview, Mode::Normal) => &[
                ("[↑↓]", "Select link"),
                ("[Enter]", "Open"),
                ("[s]", "Save Contact"),
                ("[x]", "Exchange"),
                ("[Esc]", "Editor"),
                ("[q]", "Quit"),
            ],
            (Screen::Editor, Mode::Normal) => &[
                ("[↑↓]", "Navigate"),
                ("[Enter]", "Edit"),
                ("[←→]", "Cycle"),
                ("[d]", "Remove"),
                ("[Tab]", "Content/Design"),
                ("[p]", "See Live"),
                ("[s]", "Export"),
                ("[q]", "Quit"),
            ],
        };

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, action) in hints {
            spans.push(Span::styled(key.to_string(), key_style));
            spans.push(Span::raw(format!(" {action}   ")));
        }
        Line::from(spans)
    }

    fn draw_popup(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        mut lines: Vec<Line<'static>>,
        cursor: (u16, u16),
    ) {
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to save • Esc to cancel",
            Style::default().fg(Color::Gray),
        )));
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (row, column) = cursor;
        frame.set_cursor_position(clamp_cursor(inner, row, column));
    }

    fn draw_text_form(&self, frame: &mut Frame, area: Rect, form: &TextForm) {
        let prefix = format!("{}: ", form.field.label()).chars().count() as u16;
        let title = if self.doc.text(form.field).is_empty() && form.field != TextField::Name {
            format!("Add {}", form.field.short_name())
        } else {
            format!("Edit {}", form.field.short_name())
        };
        self.draw_popup(
            frame,
            area,
            &title,
            vec![form.build_line()],
            (0, prefix.saturating_add(form.value_len() as u16)),
        );
    }

    fn draw_contact_form(&self, frame: &mut Frame, area: Rect, form: &ContactForm) {
        let lines = vec![
            form.build_line(ContactField::Value),
            form.build_line(ContactField::Label),
        ];
        let cursor = match form.active {
            ContactField::Value => {
                let prefix = format!("{}: ", form.list.noun()).chars().count() as u16;
                (0, prefix.saturating_add(form.value_len(ContactField::Value) as u16))
            }
            ContactField::Label => {
                let prefix = "Label: ".len() as u16;
                (1, prefix.saturating_add(form.value_len(ContactField::Label) as u16))
            }
        };
        self.draw_popup(frame, area, form.list.noun(), lines, cursor);
    }

    fn draw_accreditation_form(&self, frame: &mut Frame, area: Rect, form: &AccreditationForm) {
        let lines = vec![
            form.build_line(AccreditationField::Label),
            form.build_line(AccreditationField::Url),
        ];
        let cursor = match form.active {
            AccreditationField::Label => {
                let prefix = "Name / Title: ".len() as u16;
                (0, prefix.saturating_add(form.value_len(AccreditationField::Label) as u16))
            }
            AccreditationField::Url => {
                let prefix = "Link URL: ".len() as u16;
                (1, prefix.saturating_add(form.value_len(AccreditationField::Url) as u16))
            }
        };
        self.draw_popup(frame, area, "Accreditation", lines, cursor);
    }

    fn draw_image_prompt(&self, frame: &mut Frame, area: Rect, slot: ImageSlot, form: &PathForm) {
        let prefix = "Path: ".len() as u16;
        self.draw_popup(
            frame,
            area,
            &format!("Upload {}", slot.label()),
            vec![form.build_line()],
            (0, prefix.saturating_add(form.value_len() as u16)),
        );
    }
}
