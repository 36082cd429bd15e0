//! Terminal drawing of the card preview. Everything shown comes from the
//! `CardView` produced by `render::render`; this module only decides glyphs,
//! spacing and colors.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::exchange::{ExchangePanel, ExchangeStatus};
use crate::models::{Alignment, TextTone};
use crate::render::{CardView, ContactLine, HeaderBackground, IconLink};

use super::forms::{ExchangeField, ExchangeForm};
use super::helpers::{clamp_cursor, contrast_text, ellipsize, hex_color};

/// Width the phone frame is drawn at when the area allows it.
pub(crate) const PHONE_WIDTH: u16 = 44;
const HEADER_ROWS: usize = 4;

fn glyph(icon: &str) -> &'static str {
    match icon {
        "address" => "⌂",
        "email" => "✉",
        "phone" => "☎",
        "award" => "★",
        _ => "●",
    }
}

/// Tracks which link is highlighted while lines are emitted in reading order.
struct LinkCursor {
    next: usize,
    selected: Option<usize>,
}

impl LinkCursor {
    fn take(&mut self) -> bool {
        let hit = self.selected == Some(self.next);
        self.next += 1;
        hit
    }
}

fn highlight(style: Style, selected: bool) -> Style {
    if selected {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

fn pad_to(text: &str, width: usize, alignment: Alignment) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let spare = width - len;
    let (left, right) = match alignment {
        Alignment::Left => (1.min(spare), spare - 1.min(spare)),
        Alignment::Center => (spare / 2, spare - spare / 2),
        Alignment::Right => (spare - 1.min(spare), 1.min(spare)),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn header_lines(view: &CardView, width: usize) -> Vec<Line<'static>> {
    let (bg, label) = match &view.header.background {
        HeaderBackground::Color(color) => (hex_color(color), None),
        HeaderBackground::Image(_) => (Color::DarkGray, Some("▒ background image ▒")),
    };
    let fg = match view.header.text_tone {
        TextTone::Light => Color::White,
        TextTone::Dark => Color::Black,
    };
    let style = Style::default().bg(bg).fg(fg);

    let mut rows: Vec<String> = vec![String::new(); HEADER_ROWS];
    rows[0] = pad_to("9:41", width, Alignment::Left);
    if view.header.logo.is_some() {
        rows[0] = format!("{}[logo] ", &rows[0][..rows[0].len().saturating_sub(7)]);
    }
    rows[1] = pad_to(label.unwrap_or(""), width, Alignment::Center);
    let portrait = if view.header.profile_picture.is_some() {
        "( ◉ )"
    } else {
        "(   )"
    };
    rows[2] = pad_to(portrait, width, view.header.alignment);
    rows[3] = " ".repeat(width);

    rows.into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect()
}

fn contact_line(
    line: &ContactLine,
    width: usize,
    base: Style,
    cursor: &mut LinkCursor,
) -> Line<'static> {
    let selected = cursor.take();
    let mut spans = vec![
        Span::styled(
            format!(" {} ", glyph(line.icon)),
            Style::default().fg(hex_color(&line.icon_color)),
        ),
        Span::styled(
            ellipsize(&line.text, width.saturating_sub(14)),
            highlight(base, selected),
        ),
    ];
    if !line.label.is_empty() {
        spans.push(Span::styled(
            format!("  {}", line.label),
            base.add_modifier(Modifier::DIM),
        ));
    }
    Line::from(spans)
}

fn icon_row(link: &IconLink, base: Style, cursor: &mut LinkCursor) -> Line<'static> {
    let selected = cursor.take();
    Line::from(vec![
        Span::styled(
            format!(" {} ", glyph(link.key)),
            Style::default().fg(hex_color(&link.color)),
        ),
        Span::styled(link.label.to_string(), highlight(base, selected)),
    ])
}

fn heading(text: &str, base: Style) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {text}"),
        base.add_modifier(Modifier::BOLD | Modifier::DIM),
    ))
}

/// Lines of the card body for a frame `width` columns wide. `selected_link`
/// indexes into `CardView::links`.
pub(crate) fn card_lines(
    view: &CardView,
    width: usize,
    selected_link: Option<usize>,
) -> Vec<Line<'static>> {
    let page = view.page_color.as_str();
    let base = Style::default().fg(contrast_text(page));
    let mut cursor = LinkCursor {
        next: 0,
        selected: selected_link,
    };

    let mut lines = header_lines(view, width);
    lines.push(Line::from(Span::styled(
        format!(" {}", view.name),
        base.add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(format!(" {}", view.title), base)));
    if let Some(company) = &view.company {
        lines.push(Line::from(Span::styled(
            format!(" {company}"),
            base.add_modifier(Modifier::DIM),
        )));
    }

    if let Some(contact) = &view.contact {
        lines.push(Line::from(""));
        let rows = contact
            .address
            .iter()
            .chain(contact.emails.iter())
            .chain(contact.phones.iter());
        for row in rows {
            lines.push(contact_line(row, width, base, &mut cursor));
        }
    }

    let button = hex_color(&view.button_color);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            " Save Contact ",
            Style::default()
                .bg(button)
                .fg(contrast_text(&view.button_color))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "[ Exchange ]",
            Style::default().fg(button).add_modifier(Modifier::BOLD),
        ),
    ]));

    if !view.messaging.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("MESSAGING", base));
        for link in &view.messaging {
            lines.push(icon_row(link, base, &mut cursor));
        }
    }

    if !view.social.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("CONNECT", base));
        for link in &view.social {
            lines.push(icon_row(link, base, &mut cursor));
        }
    }

    if !view.accreditations.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("ACCREDITATIONS", base));
        for item in &view.accreditations {
            let selected = item.href.is_some() && cursor.take();
            let mut spans = vec![
                Span::styled(" ★ ", Style::default().fg(hex_color(&item.icon_color))),
                Span::styled(
                    ellipsize(&item.label, width.saturating_sub(6)),
                    highlight(base, selected),
                ),
            ];
            if item.href.is_some() {
                spans.push(Span::styled(" ↗", base.add_modifier(Modifier::DIM)));
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(
            "M muradtap · Create your digital card",
            base.add_modifier(Modifier::DIM),
        ))
        .centered(),
    );
    lines
}

/// Narrow `area` to the phone frame width, centered.
pub(crate) fn phone_area(area: Rect) -> Rect {
    let width = PHONE_WIDTH.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

/// Draw the phone frame with the card inside.
pub(crate) fn draw_card(
    frame: &mut Frame,
    area: Rect,
    view: &CardView,
    selected_link: Option<usize>,
    scroll: u16,
) {
    let phone = phone_area(area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .style(Style::default().bg(hex_color(&view.page_color)));
    let inner = block.inner(phone);
    frame.render_widget(Clear, phone);
    frame.render_widget(block, phone);

    let lines = card_lines(view, inner.width as usize, selected_link);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Bottom sheet for the exchange panel, drawn over the phone frame.
pub(crate) fn draw_exchange(
    frame: &mut Frame,
    area: Rect,
    panel: &ExchangePanel,
    form: &ExchangeForm,
    owner: &str,
) {
    let phone = phone_area(area);
    let height = 12u16.min(phone.height);
    let sheet = Rect {
        x: phone.x,
        y: phone.y + phone.height - height,
        width: phone.width,
        height,
    };
    frame.render_widget(Clear, sheet);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Share your info");
    let inner = block.inner(sheet);
    frame.render_widget(block, sheet);

    let lines = match panel.status() {
        ExchangeStatus::Success => vec![
            Line::from(""),
            Line::from(Span::styled(
                "✔ Sent Successfully!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(format!("Your details have been shared with {owner}.")).centered(),
        ],
        status => {
            let mut lines: Vec<Line<'static>> = ExchangeField::ALL
                .iter()
                .map(|field| form.build_line(*field))
                .collect();
            lines.push(Line::from(""));
            if let Some(error) = &form.error {
                lines.push(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                )));
            } else if status == ExchangeStatus::Sending {
                lines.push(Line::from(Span::styled(
                    "Sending…",
                    Style::default().fg(Color::Yellow),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "Enter to connect • Tab to switch • Esc to close",
                    Style::default().fg(Color::Gray),
                )));
            }
            lines
        }
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

    if panel.status() == ExchangeStatus::Idle {
        let row = ExchangeField::ALL
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or(0) as u16;
        let prefix = format!("{}: ", form.active.label()).chars().count() as u16;
        let column = prefix.saturating_add(form.value_len(form.active) as u16);
        frame.set_cursor_position(clamp_cursor(inner, row, column));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardDocument;
    use crate::render::render;

    fn flatten(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn default_card_lists_sections_in_order() {
        let view = render(&CardDocument::default());
        let text = flatten(&card_lines(&view, 40, None)).join("\n");

        let name = text.find("Alex Smith").expect("name");
        let email = text.find("alex.smith@muradtap.me").expect("email");
        let save = text.find("Save Contact").expect("actions");
        let connect = text.find("CONNECT").expect("social");
        assert!(name < email && email < save && save < connect);
        assert!(!text.contains("MESSAGING"));
        assert!(text.contains("+1 415 555 0123"));
    }

    #[test]
    fn selected_link_is_reversed() {
        let view = render(&CardDocument::default());
        let lines = card_lines(&view, 40, Some(0));
        let highlighted: Vec<String> = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| span.style.add_modifier.contains(Modifier::REVERSED))
            .map(|span| span.content.to_string())
            .collect();
        assert_eq!(highlighted, vec!["San Francisco, CA".to_string()]);
    }

    #[test]
    fn alignment_padding_positions_portrait() {
        assert_eq!(pad_to("ab", 6, Alignment::Left), " ab   ");
        assert_eq!(pad_to("ab", 6, Alignment::Center), "  ab  ");
        assert_eq!(pad_to("ab", 6, Alignment::Right), "   ab ");
        assert_eq!(pad_to("abcdef", 4, Alignment::Center), "abcdef");
    }
}
