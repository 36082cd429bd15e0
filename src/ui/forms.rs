use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{AccreditationItem, ContactItem, ContactList, TextField};

/// Style shared by every form line: yellow while focused, gray while empty.
fn field_style(value: &str, is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn field_line(field_name: &str, value: &str, placeholder: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, field_style(value, is_active)),
    ])
}

/// Single-input form used for every singleton text field of the card.
#[derive(Clone)]
pub(crate) struct TextForm {
    pub(crate) field: TextField,
    pub(crate) value: String,
}

impl TextForm {
    pub(crate) fn new(field: TextField, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line(self.field.label(), &self.value, "<empty>", true)
    }

    pub(crate) fn value_len(&self) -> usize {
        self.value.chars().count()
    }
}

/// Fields of the phone/email item form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum ContactField {
    #[default]
    Value,
    Label,
}

/// Form state for one phone number or email address.
#[derive(Clone)]
pub(crate) struct ContactForm {
    pub(crate) list: ContactList,
    pub(crate) id: String,
    pub(crate) value: String,
    pub(crate) label: String,
    pub(crate) active: ContactField,
}

impl ContactForm {
    pub(crate) fn from_item(list: ContactList, item: &ContactItem) -> Self {
        Self {
            list,
            id: item.id.clone(),
            value: item.value.clone(),
            label: item.label.clone(),
            active: ContactField::Value,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ContactField::Value => ContactField::Label,
            ContactField::Label => ContactField::Value,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            ContactField::Value => self.value.push(ch),
            ContactField::Label => self.label.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ContactField::Value => {
                self.value.pop();
            }
            ContactField::Label => {
                self.label.pop();
            }
        }
    }

    /// Step the label through the list's preset choices. Only acts while the
    /// label field has focus.
    pub(crate) fn cycle_label(&mut self, step: isize) -> bool {
        if self.active != ContactField::Label {
            return false;
        }
        let choices = self.list.label_choices();
        let len = choices.len() as isize;
        let next = match choices
            .iter()
            .position(|choice| choice.eq_ignore_ascii_case(&self.label))
        {
            Some(idx) => (idx as isize + step).rem_euclid(len),
            None => 0,
        };
        self.label = choices[next as usize].to_string();
        true
    }

    pub(crate) fn build_line(&self, field: ContactField) -> Line<'static> {
        match field {
            ContactField::Value => field_line(
                self.list.noun(),
                &self.value,
                "<empty>",
                self.active == ContactField::Value,
            ),
            ContactField::Label => field_line(
                "Label",
                &self.label,
                "Blank",
                self.active == ContactField::Label,
            ),
        }
    }

    pub(crate) fn value_len(&self, field: ContactField) -> usize {
        match field {
            ContactField::Value => self.value.chars().count(),
            ContactField::Label => self.label.chars().count(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum AccreditationField {
    #[default]
    Label,
    Url,
}

/// Form state for one accreditation entry.
#[derive(Clone)]
pub(crate) struct AccreditationForm {
    pub(crate) id: String,
    pub(crate) label: String,
    pub(crate) url: String,
    pub(crate) active: AccreditationField,
}

impl AccreditationForm {
    pub(crate) fn from_item(item: &AccreditationItem) -> Self {
        Self {
            id: item.id.clone(),
            label: item.label.clone(),
            url: item.url.clone(),
            active: AccreditationField::Label,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            AccreditationField::Label => AccreditationField::Url,
            AccreditationField::Url => AccreditationField::Label,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            AccreditationField::Label => self.label.push(ch),
            AccreditationField::Url => self.url.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            AccreditationField::Label => {
                self.label.pop();
            }
            AccreditationField::Url => {
                self.url.pop();
            }
        }
    }

    pub(crate) fn build_line(&self, field: AccreditationField) -> Line<'static> {
        match field {
            AccreditationField::Label => field_line(
                "Name / Title",
                &self.label,
                "<empty>",
                self.active == AccreditationField::Label,
            ),
            AccreditationField::Url => field_line(
                "Link URL",
                &self.url,
                "<optional>",
                self.active == AccreditationField::Url,
            ),
        }
    }

    pub(crate) fn value_len(&self, field: AccreditationField) -> usize {
        match field {
            AccreditationField::Label => self.label.chars().count(),
            AccreditationField::Url => self.url.chars().count(),
        }
    }
}

/// Path prompt for picking an image file.
#[derive(Clone, Default)]
pub(crate) struct PathForm {
    pub(crate) path: String,
}

impl PathForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.path.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.path.pop();
    }

    /// Expand a leading `~/` against the home directory.
    pub(crate) fn resolved(&self) -> Option<std::path::PathBuf> {
        let trimmed = self.path.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(rest) = trimmed.strip_prefix("~/") {
            if let Some(dirs) = directories::BaseDirs::new() {
                return Some(dirs.home_dir().join(rest));
            }
        }
        Some(std::path::PathBuf::from(trimmed))
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line("Path", &self.path, "<image file>", true)
    }

    pub(crate) fn value_len(&self) -> usize {
        self.path.chars().count()
    }
}

/// Fields in the exchange panel's form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum ExchangeField {
    #[default]
    Name,
    Email,
    Phone,
    About,
}

impl ExchangeField {
    pub(crate) const ALL: [ExchangeField; 4] = [
        ExchangeField::Name,
        ExchangeField::Email,
        ExchangeField::Phone,
        ExchangeField::About,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            ExchangeField::Name => "Your Name",
            ExchangeField::Email => "Email Address",
            ExchangeField::Phone => "Phone Number",
            ExchangeField::About => "About You",
        }
    }
}

/// What a visitor fills in before sharing their details back.
#[derive(Clone, Default)]
pub(crate) struct ExchangeForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) about: String,
    pub(crate) active: ExchangeField,
    pub(crate) error: Option<String>,
}

impl ExchangeForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ExchangeField::Name => ExchangeField::Email,
            ExchangeField::Email => ExchangeField::Phone,
            ExchangeField::Phone => ExchangeField::About,
            ExchangeField::About => ExchangeField::Name,
        };
    }

    fn value_mut(&mut self, field: ExchangeField) -> &mut String {
        match field {
            ExchangeField::Name => &mut self.name,
            ExchangeField::Email => &mut self.email,
            ExchangeField::Phone => &mut self.phone,
            ExchangeField::About => &mut self.about,
        }
    }

    fn value(&self, field: ExchangeField) -> &str {
        match field {
            ExchangeField::Name => &self.name,
            ExchangeField::Email => &self.email,
            ExchangeField::Phone => &self.phone,
            ExchangeField::About => &self.about,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let active = self.active;
        self.value_mut(active).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let active = self.active;
        self.value_mut(active).pop();
    }

    /// Name and email are required before the details can be sent.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("Your name is required."));
        }
        if self.email.trim().is_empty() {
            return Err(anyhow!("Email address is required."));
        }
        Ok(())
    }

    pub(crate) fn build_line(&self, field: ExchangeField) -> Line<'static> {
        let placeholder = match field {
            ExchangeField::Name | ExchangeField::Email => "<required>",
            ExchangeField::Phone | ExchangeField::About => "<optional>",
        };
        field_line(
            field.label(),
            self.value(field),
            placeholder,
            self.active == field,
        )
    }

    pub(crate) fn value_len(&self, field: ExchangeField) -> usize {
        self.value(field).chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_label_cycles_through_presets() {
        let item = ContactItem {
            id: "p".to_string(),
            value: "+1".to_string(),
            label: "Mobile".to_string(),
        };
        let mut form = ContactForm::from_item(ContactList::Phones, &item);
        assert!(!form.cycle_label(1));

        form.toggle_field();
        assert!(form.cycle_label(1));
        assert_eq!(form.label, "Personal");
        assert!(form.cycle_label(-2));
        assert_eq!(form.label, "");
    }

    #[test]
    fn exchange_form_requires_name_and_email() {
        let mut form = ExchangeForm::default();
        assert!(form.validate().is_err());
        for ch in "Jo".chars() {
            form.push_char(ch);
        }
        assert!(form.validate().is_err());
        form.toggle_field();
        for ch in "jo@example.com".chars() {
            form.push_char(ch);
        }
        assert!(form.validate().is_ok());
        assert_eq!(form.value_len(ExchangeField::Email), 14);
    }

    #[test]
    fn control_characters_are_rejected() {
        let mut form = TextForm::new(TextField::Title, "");
        assert!(!form.push_char('\n'));
        assert!(form.push_char('a'));
        assert_eq!(form.value, "a");
    }
}
