use anyhow::Result;
use crossterm::{
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::io;
use textwrap::{core::display_width, wrap};

use chatflow::auth::{AuthField, AuthForm, Submission};
use chatflow::chat::ChatView;
use chatflow::emoji::{EmojiPicker, CATEGORIES, GRID_COLUMNS};
use chatflow::models::{format_time, Message};
use chatflow::{Screen, Session};

// Export types needed by main module
pub use ratatui::Terminal;
pub use ratatui::backend::CrosstermBackend;

const ACCENT: Color = Color::Magenta;

/// What the event loop should do after an input event
pub enum Control {
    Continue,
    Quit,
}

/// Per-terminal view state that the chat model does not care about
pub struct ChatUI {
    active_tab: Tab,
    help_dialog: Option<HelpDialog>,
}

// Nothing to track yet, the dialog is either shown or not
struct HelpDialog {}

#[derive(PartialEq)]
enum Tab {
    Messages,
    Contacts,
}

impl ChatUI {
    pub fn new() -> Self {
        ChatUI {
            active_tab: Tab::Contacts,
            help_dialog: None,
        }
    }

    pub fn handle_event(&mut self, session: &mut Session, event: &Event) -> Control {
        let Event::Key(key) = event else {
            return Control::Continue;
        };
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }

        // Any key press closes the help dialog
        if self.help_dialog.is_some() {
            self.help_dialog = None;
            return Control::Continue;
        }

        // Raw mode swallows SIGINT
        if is_ctrl(key, 'c') {
            return Control::Quit;
        }

        if key.code == KeyCode::F(1) {
            self.help_dialog = Some(HelpDialog {});
            return Control::Continue;
        }

        if matches!(session.screen(), Screen::Auth(_)) {
            handle_auth_key(session, event, key)
        } else {
            self.handle_chat_key(session, event, key)
        }
    }

    fn handle_chat_key(&mut self, session: &mut Session, event: &Event, key: &KeyEvent) -> Control {
        if is_ctrl(key, 'l') {
            session.logout();
            self.active_tab = Tab::Contacts;
            return Control::Continue;
        }

        let Screen::Chat(chat) = session.screen_mut() else {
            return Control::Continue;
        };

        if chat.is_emoji_picker_open() {
            handle_picker_key(chat, event, key);
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                chat.toggle_emoji_picker();
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !chat.toggle_reply_mode() {
                    debug!("UI: Reply mode is not available for the current selection");
                }
            }
            KeyCode::Tab => {
                self.active_tab = match self.active_tab {
                    Tab::Messages => Tab::Contacts,
                    Tab::Contacts => Tab::Messages,
                };
            }
            KeyCode::Up if self.active_tab == Tab::Contacts => chat.select_previous(),
            KeyCode::Down if self.active_tab == Tab::Contacts => chat.select_next(),
            KeyCode::Enter => {
                if self.active_tab == Tab::Contacts {
                    if chat.selected_index().is_none() {
                        chat.select_next();
                    }
                    self.active_tab = Tab::Messages;
                } else if chat.send_message().is_none() {
                    debug!("UI: Nothing to send");
                }
            }
            _ => {
                if self.active_tab == Tab::Messages {
                    chat.handle_draft_event(event);
                }
            }
        }
        Control::Continue
    }

    pub fn draw<B: Backend>(&self, frame: &mut Frame<B>, session: &Session) {
        let size = frame.size();

        match session.screen() {
            Screen::Auth(form) => draw_auth(frame, form, size),
            Screen::Chat(chat) => self.draw_chat(frame, chat, size),
        }

        if self.help_dialog.is_some() {
            draw_help_dialog(frame, size);
        }
    }

    fn draw_chat<B: Backend>(&self, frame: &mut Frame<B>, chat: &ChatView, size: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),  // Contacts panel
                Constraint::Percentage(70),  // Chat panel
            ])
            .split(size);

        self.draw_contacts(frame, chat, chunks[0]);

        let Some(contact) = chat.selected_contact() else {
            draw_welcome(frame, chunks[1]);
            return;
        };

        let chat_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                                  // Header
                Constraint::Min(5),                                     // Messages area
                Constraint::Length(if chat.is_reply_mode() { 1 } else { 0 }), // Reply banner
                Constraint::Length(3),                                  // Input box
                Constraint::Length(1),                                  // Help line
            ])
            .split(chunks[1]);

        // Header with presence and the reply toggle
        let now = chrono::Utc::now();
        let presence = if contact.is_online {
            Span::styled("online", Style::default().fg(Color::Green))
        } else {
            Span::styled(
                format!("last seen {}", contact.presence_label(now)),
                Style::default().fg(Color::Gray),
            )
        };
        let mut header_spans = vec![
            Span::styled(contact.display_name(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            presence,
        ];
        if chat.can_reply() {
            header_spans.push(Span::raw("  "));
            header_spans.push(if chat.is_reply_mode() {
                Span::styled("[Reply Mode On]", Style::default().fg(Color::White).bg(ACCENT))
            } else {
                Span::styled("[Ctrl+R Reply as Contact]", Style::default().fg(Color::Gray))
            });
        }
        let header = Paragraph::new(Line::from(header_spans))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chat_chunks[0]);

        draw_messages(frame, chat.current_messages(), chat_chunks[1]);

        if chat.is_reply_mode() {
            let banner = Paragraph::new(format!("↩ Replying as {}", contact.username))
                .style(Style::default().fg(ACCENT));
            frame.render_widget(banner, chat_chunks[2]);
        }

        // Draw input box
        let input_block = Block::default()
            .title("Message (Ctrl+E emoji)")
            .borders(Borders::ALL)
            .border_style(match self.active_tab {
                Tab::Messages => Style::default().fg(Color::Yellow),
                _ => Style::default(),
            });
        let input_widget = if chat.draft().is_empty() {
            Paragraph::new(chat.draft_placeholder()).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(chat.draft())
        };
        frame.render_widget(input_widget.block(input_block), chat_chunks[3]);

        let help = Paragraph::new(Line::from(vec![Span::styled(
            "ESC quit | TAB switch | Enter send | Ctrl+E emoji | Ctrl+R reply | Ctrl+L logout | F1 help",
            Style::default().fg(Color::Gray),
        )]));
        frame.render_widget(help, chat_chunks[4]);

        if let Some(picker) = chat.emoji_picker() {
            draw_emoji_picker(frame, picker, chunks[1], chat_chunks[3].y);
        } else if self.active_tab == Tab::Messages {
            frame.set_cursor(
                chat_chunks[3].x + cursor_column(chat.draft(), chat.draft_cursor()) + 1,
                chat_chunks[3].y + 1,
            );
        }
    }

    fn draw_contacts<B: Backend>(&self, frame: &mut Frame<B>, chat: &ChatView, area: Rect) {
        let now = chrono::Utc::now();
        let preview_width = area.width.saturating_sub(8) as usize;

        let contacts: Vec<ListItem> = chat
            .contacts()
            .iter()
            .map(|c| {
                let status_indicator = if c.is_online {
                    Span::styled("● ", Style::default().fg(Color::Green))
                } else {
                    Span::styled("○ ", Style::default().fg(Color::Gray))
                };
                let name_style = if c.is_self() {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(ACCENT)
                };
                let preview: String = chat.store().preview(&c.id).chars().take(preview_width).collect();

                ListItem::new(vec![
                    Line::from(vec![
                        status_indicator,
                        Span::styled(c.display_name(), name_style.add_modifier(Modifier::BOLD)),
                        Span::styled(format!("  {}", c.presence_label(now)), Style::default().fg(Color::Gray)),
                    ]),
                    Line::from(Span::styled(format!("  {}", preview), Style::default().fg(Color::DarkGray))),
                ])
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(chat.selected_index());

        let contacts_list = List::new(contacts)
            .block(Block::default()
                .title(format!("ChatFlow · {} (Tab to focus)", chat.user().username))
                .borders(Borders::ALL)
                .border_style(match self.active_tab {
                    Tab::Contacts => Style::default().fg(Color::Yellow),
                    _ => Style::default(),
                }))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        frame.render_stateful_widget(contacts_list, area, &mut list_state);
    }
}

/// Terminal cells taken by the first `cursor` characters of `text`
fn cursor_column(text: &str, cursor: usize) -> u16 {
    let end = text.char_indices().nth(cursor).map_or(text.len(), |(i, _)| i);
    display_width(&text[..end]) as u16
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn handle_auth_key(session: &mut Session, event: &Event, key: &KeyEvent) -> Control {
    let Screen::Auth(form) = session.screen_mut() else {
        return Control::Continue;
    };

    match key.code {
        KeyCode::Esc => return Control::Quit,
        KeyCode::Enter => {}
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => form.toggle_mode(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.toggle_password_visibility()
        }
        _ => form.handle_event(event),
    }
    if key.code != KeyCode::Enter {
        return Control::Continue;
    }

    if let Some(Submission::Blocked(field)) = session.submit_auth() {
        debug!("UI: Waiting for {:?} before submitting", field);
    }
    Control::Continue
}

fn handle_picker_key(chat: &mut ChatView, event: &Event, key: &KeyEvent) {
    if key.code == KeyCode::Esc || is_ctrl(key, 'e') {
        chat.close_emoji_picker();
        return;
    }
    if key.code == KeyCode::Enter {
        chat.pick_highlighted_emoji();
        return;
    }

    let Some(picker) = chat.emoji_picker_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab => {
            picker.next_category();
        }
        KeyCode::BackTab => {
            picker.previous_category();
        }
        KeyCode::Left => picker.move_highlight(-1, 0),
        KeyCode::Right => picker.move_highlight(1, 0),
        KeyCode::Up => picker.move_highlight(0, -1),
        KeyCode::Down => picker.move_highlight(0, 1),
        _ => picker.handle_search_event(event),
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_auth<B: Backend>(f: &mut Frame<B>, form: &AuthForm, area: Rect) {
    let fields = form.visible_fields();
    let popup_area = centered_rect(area, 56, 11 + 3 * fields.len() as u16);

    let popup_block = Block::default()
        .title("ChatFlow")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    f.render_widget(Clear, popup_area); // Clear the area first
    f.render_widget(popup_block, popup_area);

    let inner_area = popup_area.inner(&Margin {
        vertical: 1,
        horizontal: 2,
    });

    let mut constraints = vec![Constraint::Length(4)]; // Heading
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.extend([
        Constraint::Length(1), // Missing field prompt
        Constraint::Length(1), // Submit button
        Constraint::Length(1), // Mode switch
        Constraint::Min(0),    // Key help
    ]);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner_area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled("Connect and chat in real-time", Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(form.title(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(form.subtitle(), Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    for (i, field) in fields.iter().copied().enumerate() {
        let chunk = chunks[i + 1];
        let value = form.value(field);
        let focused = form.focus() == field;

        let border_style = if form.missing_field() == Some(field) {
            Style::default().fg(Color::Red)
        } else if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let mut title = field.placeholder().to_string();
        if field == AuthField::Password {
            title.push_str(if form.show_password() { " (Ctrl+R hide)" } else { " (Ctrl+R show)" });
        }

        let widget = if value.is_empty() {
            Paragraph::new(field.placeholder()).style(Style::default().fg(Color::DarkGray))
        } else if field == AuthField::Password && !form.show_password() {
            Paragraph::new("•".repeat(value.chars().count()))
        } else {
            Paragraph::new(value)
        };
        f.render_widget(
            widget.block(Block::default().title(title).borders(Borders::ALL).border_style(border_style)),
            chunk,
        );

        if focused {
            // Masked passwords render one bullet per character
            let column = if field == AuthField::Password && !form.show_password() {
                form.cursor(field) as u16
            } else {
                cursor_column(value, form.cursor(field))
            };
            f.set_cursor(chunk.x + column + 1, chunk.y + 1);
        }
    }

    let base = fields.len() + 1;
    if form.missing_field().is_some() {
        let prompt = Paragraph::new("⚠ Please fill out this field.")
            .style(Style::default().fg(Color::Red));
        f.render_widget(prompt, chunks[base]);
    }

    let button = Paragraph::new(Span::styled(
        format!("[ {} ]", form.submit_caption()),
        Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(button, chunks[base + 1]);

    let (question, action) = form.toggle_prompt();
    let toggle = Paragraph::new(Line::from(vec![
        Span::styled(question, Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(action, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(" (Ctrl+T)", Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(toggle, chunks[base + 2]);

    let help = Paragraph::new("Enter submit | Tab next field | ESC quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[base + 3]);
}

fn draw_welcome<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text_area = centered_rect(inner, inner.width, 4);
    let welcome = Paragraph::new(vec![
        Line::from(Span::styled("Welcome to ChatFlow", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("Select a contact to start chatting", Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled("↑/↓ choose | Enter open | F1 help", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(welcome, text_area);
}

fn draw_messages<B: Backend>(f: &mut Frame<B>, messages: &[Message], area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize; // Account for borders
    let wrap_width = (inner_width * 3 / 4).max(1);

    // Own messages hug the right edge
    let align = |line: String, own: bool| -> String {
        if own {
            let pad = inner_width.saturating_sub(display_width(&line));
            format!("{}{}", " ".repeat(pad), line)
        } else {
            line
        }
    };

    let mut items: Vec<ListItem> = Vec::new();
    for m in messages {
        let body_style = if m.is_own {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        if !m.is_own {
            items.push(ListItem::new(Span::styled(
                m.sender.clone(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )));
        }
        for line in wrap(&m.text, wrap_width) {
            items.push(ListItem::new(align(line.into_owned(), m.is_own)).style(body_style));
        }
        items.push(
            ListItem::new(align(format_time(m.timestamp), m.is_own))
                .style(Style::default().fg(Color::DarkGray)),
        );
        items.push(ListItem::new(""));
    }

    // Selecting the last row keeps the newest message in view
    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(items.len() - 1));
    }

    let messages_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Messages"))
        .highlight_style(Style::default()); // Use default style to make selection invisible

    f.render_stateful_widget(messages_list, area, &mut list_state);
}

fn draw_emoji_picker<B: Backend>(f: &mut Frame<B>, picker: &EmojiPicker, area: Rect, input_top: u16) {
    // Anchored above the input box, against the right edge of the chat panel
    let popup_width = 46.min(area.width);
    let popup_height = 18.min(input_top.saturating_sub(area.y));
    let popup_area = Rect::new(
        area.x + area.width - popup_width,
        input_top - popup_height,
        popup_width,
        popup_height,
    );

    let popup_block = Block::default()
        .title("Emojis")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    f.render_widget(Clear, popup_area);
    f.render_widget(popup_block, popup_area);

    let inner_area = popup_area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Length(if picker.is_searching() { 0 } else { 1 }), // Category buttons
            Constraint::Min(1),    // Grid
            Constraint::Length(1), // Help
        ])
        .split(inner_area);

    let search = if picker.is_searching() {
        Paragraph::new(picker.search_term())
    } else {
        Paragraph::new("Search emojis...").style(Style::default().fg(Color::DarkGray))
    };
    f.render_widget(search.block(Block::default().borders(Borders::ALL)), chunks[0]);

    if !picker.is_searching() {
        let active = picker.active_category().key;
        let mut spans = Vec::new();
        for category in CATEGORIES.iter() {
            let style = if category.key == active {
                Style::default().fg(Color::White).bg(ACCENT)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(category.label(), style));
            spans.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
    }

    let emojis = picker.visible();
    let grid_rows = chunks[2].height.max(1) as usize;
    let highlighted_row = picker.highlighted_index() / GRID_COLUMNS;
    let first_row = highlighted_row.saturating_sub(grid_rows - 1);

    let lines: Vec<Line> = emojis
        .chunks(GRID_COLUMNS)
        .enumerate()
        .skip(first_row)
        .take(grid_rows)
        .map(|(row, cells)| {
            let mut spans = Vec::new();
            for (col, emoji) in cells.iter().enumerate() {
                let style = if row * GRID_COLUMNS + col == picker.highlighted_index() {
                    Style::default().bg(ACCENT)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!(" {} ", emoji), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();
    let grid = if lines.is_empty() {
        Paragraph::new("No emojis found").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(lines)
    };
    f.render_widget(grid, chunks[2]);

    let help = Paragraph::new("Enter pick | Tab category | ESC close")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);

    let column = cursor_column(picker.search_term(), picker.search_cursor());
    f.set_cursor(chunks[0].x + column + 1, chunks[0].y + 1);
}

fn draw_help_dialog<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let popup_area = centered_rect(area, 70, 29);

    let popup_block = Block::default()
        .title("Keyboard Shortcuts")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(Clear, popup_area); // Clear the area first
    f.render_widget(popup_block, popup_area);

    let inner_area = popup_area.inner(&Margin {
        vertical: 1,
        horizontal: 2,
    });

    let shortcuts = vec![
        ("General", ""),
        ("ESC", "Quit application (closes the emoji picker first)"),
        ("Ctrl+C", "Quit application"),
        ("F1", "Show this help dialog"),
        ("", ""),
        ("Sign in", ""),
        ("Tab/↑/↓", "Move between fields"),
        ("Enter", "Sign in or create the account"),
        ("Ctrl+T", "Switch between sign in and sign up"),
        ("Ctrl+R", "Show or hide the password"),
        ("", ""),
        ("Chat", ""),
        ("Tab", "Switch between Contacts and Message input"),
        ("↑/↓", "Choose a contact (when Contacts is focused)"),
        ("Enter", "Send message (when Message input is focused)"),
        ("Ctrl+R", "Toggle replying as the selected contact"),
        ("Ctrl+E", "Open or close the emoji picker"),
        ("Ctrl+L", "Log out"),
        ("", ""),
        ("Emoji picker", ""),
        ("Type", "Search by symbol or category name"),
        ("Tab", "Next category (while not searching)"),
        ("Arrows", "Move the highlight, Enter inserts it"),
        ("", ""),
        ("Press any key to close this dialog", ""),
    ];

    let items: Vec<ListItem> = shortcuts
        .iter()
        .map(|(key, desc)| {
            if desc.is_empty() {
                if key.is_empty() {
                    ListItem::new("")
                } else {
                    // Category header
                    ListItem::new(Text::styled(
                        key.to_string(),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ))
                }
            } else {
                let formatted_key = format!("{:<12}", key);
                let line = Line::from(vec![
                    Span::styled(formatted_key, Style::default().fg(Color::Green)),
                    Span::raw(desc.to_string()),
                ]);
                ListItem::new(line)
            }
        })
        .collect();

    f.render_widget(List::new(items), inner_area);
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatflow::config::Settings;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn signed_in_session() -> Session {
        let mut session = Session::new(&Settings::default());
        if let Screen::Auth(form) = session.screen_mut() {
            form.set_value(AuthField::Email, "alice@example.com");
            form.set_value(AuthField::Password, "secret");
        }
        session.submit_auth();
        session
    }

    fn chat(session: &mut Session) -> &mut ChatView {
        match session.screen_mut() {
            Screen::Chat(chat) => chat,
            Screen::Auth(_) => panic!("Expected the chat screen"),
        }
    }

    fn type_text(ui: &mut ChatUI, session: &mut Session, text: &str) {
        for c in text.chars() {
            ui.handle_event(session, &key(KeyCode::Char(c)));
        }
    }

    fn render(ui: &ChatUI, session: &Session) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui.draw(f, session)).unwrap();
        terminal
    }

    /// Rendered rows, starting at `from_column`
    fn screen_text(terminal: &Terminal<TestBackend>, from_column: usize) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row[from_column..].iter().map(|cell| cell.symbol.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_thread_scrolls_to_newest_message() {
        let mut session = signed_in_session();
        let chat_view = chat(&mut session);
        assert!(chat_view.select_contact("3"));
        for i in 0..40 {
            chat_view.set_draft(&format!("message {:02}", i));
            assert!(chat_view.send_message().is_some());
        }

        let terminal = render(&ChatUI::new(), &session);
        // Chat panel only, the contact list previews the newest message too
        let text = screen_text(&terminal, 30);

        assert!(text.contains("message 39"), "Newest message should be visible");
        assert!(!text.contains("message 00"), "Oldest message should have scrolled away");
    }

    #[test]
    fn test_enter_in_messages_tab_sends_draft() {
        let mut session = signed_in_session();
        let mut ui = ChatUI::new();

        // Contacts tab is focused first: "me", then "1"
        ui.handle_event(&mut session, &key(KeyCode::Down));
        ui.handle_event(&mut session, &key(KeyCode::Down));
        ui.handle_event(&mut session, &key(KeyCode::Enter));
        assert!(ui.active_tab == Tab::Messages);

        type_text(&mut ui, &mut session, "hello");
        ui.handle_event(&mut session, &key(KeyCode::Enter));

        let chat_view = chat(&mut session);
        let last = chat_view.store().last("1").expect("Thread should have a message");
        assert_eq!(last.text, "hello");
        assert!(last.is_own);
        assert_eq!(chat_view.draft(), "");
    }

    #[test]
    fn test_esc_closes_picker_before_quitting() {
        let mut session = signed_in_session();
        let mut ui = ChatUI::new();

        ui.handle_event(&mut session, &ctrl('e'));
        assert!(chat(&mut session).is_emoji_picker_open());

        let control = ui.handle_event(&mut session, &key(KeyCode::Esc));
        assert!(matches!(control, Control::Continue));
        assert!(!chat(&mut session).is_emoji_picker_open());

        let control = ui.handle_event(&mut session, &key(KeyCode::Esc));
        assert!(matches!(control, Control::Quit));
    }

    #[test]
    fn test_ctrl_l_logs_out() {
        let mut session = signed_in_session();
        let mut ui = ChatUI::new();
        ui.handle_event(&mut session, &key(KeyCode::Tab));

        let control = ui.handle_event(&mut session, &ctrl('l'));

        assert!(matches!(control, Control::Continue));
        assert!(matches!(session.screen(), Screen::Auth(_)));
        assert!(session.user().is_none());
        assert!(ui.active_tab == Tab::Contacts);
    }

    #[test]
    fn test_ctrl_h_edits_instead_of_opening_help() {
        let mut session = signed_in_session();
        let mut ui = ChatUI::new();
        chat(&mut session).select_contact("1");
        ui.handle_event(&mut session, &key(KeyCode::Tab));

        type_text(&mut ui, &mut session, "hi");
        ui.handle_event(&mut session, &ctrl('h'));

        assert!(ui.help_dialog.is_none());
        assert_eq!(chat(&mut session).draft(), "h");

        ui.handle_event(&mut session, &key(KeyCode::F(1)));
        assert!(ui.help_dialog.is_some());
    }

    #[test]
    fn test_cursor_column_counts_cells() {
        assert_eq!(cursor_column("abc", 2), 2);
        assert_eq!(cursor_column("😀a", 1), 2);
        assert_eq!(cursor_column("😀a", 2), 3);
        assert_eq!(cursor_column("abc", 10), 3);
    }

    #[test]
    fn test_draft_cursor_follows_wide_emoji() {
        let mut session = signed_in_session();
        let mut ui = ChatUI::new();
        let chat_view = chat(&mut session);
        chat_view.select_contact("1");
        chat_view.insert_emoji("😀");
        ui.handle_event(&mut session, &key(KeyCode::Tab));

        let mut terminal = render(&ui, &session);
        let (x, _) = terminal.get_cursor().unwrap();

        // Chat panel starts at column 30, plus the border and two cells
        assert_eq!(x, 33);
    }
}
