use crate::models::{
    active_fields, BackgroundType, CardDocument, ContactList, IconStyle, ImageSlot, TextField,
};
use crate::phone::format_phone;

/// Tabs of the editor's form pane.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Tab {
    Content,
    Design,
}

impl Tab {
    pub(crate) fn toggle(self) -> Self {
        match self {
            Tab::Content => Tab::Design,
            Tab::Design => Tab::Content,
        }
    }
}

/// One selectable line of the content tab. Rows are rebuilt from the document
/// after every edit, so they never drift from what the card holds.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum ContentRow {
    Text(TextField),
    Contact { list: ContactList, id: String },
    Accreditation { id: String },
    AddField(TextField),
    AddContact(ContactList),
    AddAccreditation,
}

/// One selectable line of the design tab.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum DesignRow {
    Image(ImageSlot),
    BackgroundType,
    BackgroundColor,
    ThemeColor,
    Alignment,
    IconStyle,
    IconColor,
    ButtonColor,
}

/// Rows of the content tab: active fields, list items, then "+ Add" actions.
pub(crate) fn content_rows(doc: &CardDocument) -> Vec<ContentRow> {
    let active = active_fields(doc);
    let mut rows: Vec<ContentRow> = active.iter().copied().map(ContentRow::Text).collect();

    for list in [ContactList::Phones, ContactList::Emails] {
        rows.extend(doc.contacts(list).iter().map(|item| ContentRow::Contact {
            list,
            id: item.id.clone(),
        }));
    }
    rows.extend(
        doc.accreditations
            .iter()
            .map(|item| ContentRow::Accreditation { id: item.id.clone() }),
    );

    rows.extend(
        TextField::ALL
            .into_iter()
            .filter(|field| !active.contains(field))
            .map(ContentRow::AddField),
    );
    rows.push(ContentRow::AddContact(ContactList::Phones));
    rows.push(ContentRow::AddContact(ContactList::Emails));
    rows.push(ContentRow::AddAccreditation);
    rows
}

/// Rows of the design tab. The background row switches between a color and an
/// image slot, and the icon color row only exists in custom mode.
pub(crate) fn design_rows(doc: &CardDocument) -> Vec<DesignRow> {
    let mut rows = vec![
        DesignRow::Image(ImageSlot::ProfilePicture),
        DesignRow::Image(ImageSlot::Logo),
        DesignRow::BackgroundType,
    ];
    match doc.card_background_type {
        BackgroundType::Color => rows.push(DesignRow::BackgroundColor),
        BackgroundType::Image => rows.push(DesignRow::Image(ImageSlot::Background)),
    }
    rows.push(DesignRow::Alignment);
    rows.push(DesignRow::IconStyle);
    if doc.icon_style == IconStyle::Custom {
        rows.push(DesignRow::IconColor);
    }
    rows.push(DesignRow::ButtonColor);
    rows.push(DesignRow::ThemeColor);
    rows
}

fn image_summary(image: Option<&str>) -> String {
    match image {
        None => "none".to_string(),
        Some(url) if url.starts_with("data:") => {
            let mime = url
                .trim_start_matches("data:")
                .split(';')
                .next()
                .unwrap_or("image");
            format!("embedded {mime}")
        }
        Some(url) => url.to_string(),
    }
}

/// Label and value text for a content row.
pub(crate) fn describe_content_row(doc: &CardDocument, row: &ContentRow) -> (String, String) {
    match row {
        ContentRow::Text(field) => (field.label().to_string(), doc.text(*field).to_string()),
        ContentRow::Contact { list, id } => {
            let items = doc.contacts(*list);
            let position = items.iter().position(|item| &item.id == id).unwrap_or(0);
            let title = if position == 0 {
                list.noun().to_string()
            } else {
                format!("{} {}", list.noun(), position + 1)
            };
            let value = items
                .get(position)
                .map(|item| {
                    let shown = match list {
                        ContactList::Phones => format_phone(&item.value),
                        ContactList::Emails => item.value.clone(),
                    };
                    let label = if item.label.is_empty() {
                        "Blank"
                    } else {
                        item.label.as_str()
                    };
                    format!("{shown}  ({label})")
                })
                .unwrap_or_default();
            (title, value)
        }
        ContentRow::Accreditation { id } => {
            let value = doc
                .accreditations
                .iter()
                .find(|item| &item.id == id)
                .map(|item| {
                    if item.url.is_empty() {
                        item.label.clone()
                    } else {
                        format!("{} ↗ {}", item.label, item.url)
                    }
                })
                .unwrap_or_default();
            ("Accreditation".to_string(), value)
        }
        ContentRow::AddField(field) => (format!("+ {}", field.short_name()), String::new()),
        ContentRow::AddContact(ContactList::Phones) => ("+ Phone".to_string(), String::new()),
        ContentRow::AddContact(ContactList::Emails) => ("+ Email".to_string(), String::new()),
        ContentRow::AddAccreditation => ("+ Accreditations".to_string(), String::new()),
    }
}

/// Label and value text for a design row.
pub(crate) fn describe_design_row(doc: &CardDocument, row: DesignRow) -> (String, String) {
    match row {
        DesignRow::Image(slot) => (slot.label().to_string(), image_summary(doc.image(slot))),
        DesignRow::BackgroundType => (
            "Header Background".to_string(),
            match doc.card_background_type {
                BackgroundType::Color => "Color".to_string(),
                BackgroundType::Image => "Image".to_string(),
            },
        ),
        DesignRow::BackgroundColor => (
            "Header Color".to_string(),
            doc.card_background_color.clone(),
        ),
        DesignRow::ThemeColor => ("Page Color".to_string(), doc.theme_color.clone()),
        DesignRow::Alignment => (
            "Profile Alignment".to_string(),
            doc.profile_alignment.to_string(),
        ),
        DesignRow::IconStyle => (
            "Icon Style".to_string(),
            match doc.icon_style {
                IconStyle::Original => "Original".to_string(),
                IconStyle::Custom => "Custom".to_string(),
            },
        ),
        DesignRow::IconColor => ("Icon Color".to_string(), doc.icon_color.clone()),
        DesignRow::ButtonColor => ("Button Color".to_string(), doc.button_color.clone()),
    }
}

/// Selection state of the editor pane.
pub(crate) struct EditorScreen {
    pub(crate) tab: Tab,
    pub(crate) selected: usize,
}

impl EditorScreen {
    pub(crate) fn new() -> Self {
        Self {
            tab: Tab::Content,
            selected: 0,
        }
    }

    pub(crate) fn row_count(&self, doc: &CardDocument) -> usize {
        match self.tab {
            Tab::Content => content_rows(doc).len(),
            Tab::Design => design_rows(doc).len(),
        }
    }

    pub(crate) fn switch_tab(&mut self) {
        self.tab = self.tab.toggle();
        self.selected = 0;
    }

    pub(crate) fn move_selection(&mut self, offset: isize, doc: &CardDocument) {
        let len = self.row_count(doc) as isize;
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected as isize + offset).clamp(0, len - 1) as usize;
    }

    pub(crate) fn select_last(&mut self, doc: &CardDocument) {
        self.selected = self.row_count(doc).saturating_sub(1);
    }

    /// Keep the selection inside the row list after rows were added or removed.
    pub(crate) fn ensure_in_bounds(&mut self, doc: &CardDocument) {
        let len = self.row_count(doc);
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Move the selection onto `row` if it exists in the content tab.
    pub(crate) fn focus_content_row(&mut self, doc: &CardDocument, row: &ContentRow) {
        if let Some(idx) = content_rows(doc).iter().position(|candidate| candidate == row) {
            self.tab = Tab::Content;
            self.selected = idx;
        }
    }

    pub(crate) fn current_content_row(&self, doc: &CardDocument) -> Option<ContentRow> {
        if self.tab != Tab::Content {
            return None;
        }
        content_rows(doc).into_iter().nth(self.selected)
    }

    pub(crate) fn current_design_row(&self, doc: &CardDocument) -> Option<DesignRow> {
        if self.tab != Tab::Design {
            return None;
        }
        design_rows(doc).into_iter().nth(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_rows_list_active_fields_items_and_add_actions() {
        let doc = CardDocument::default();
        let rows = content_rows(&doc);

        assert_eq!(rows[0], ContentRow::Text(TextField::Name));
        assert!(rows.contains(&ContentRow::Text(TextField::Linkedin)));
        assert!(rows.contains(&ContentRow::AddField(TextField::Github)));
        assert!(!rows.contains(&ContentRow::AddField(TextField::Linkedin)));
        assert!(!rows.contains(&ContentRow::AddField(TextField::Name)));
        assert!(rows.contains(&ContentRow::Contact {
            list: ContactList::Phones,
            id: "default-phone".to_string(),
        }));
        assert_eq!(rows.last(), Some(&ContentRow::AddAccreditation));
    }

    #[test]
    fn design_rows_follow_background_and_icon_modes() {
        let mut doc = CardDocument::default();
        let rows = design_rows(&doc);
        assert!(rows.contains(&DesignRow::BackgroundColor));
        assert!(!rows.contains(&DesignRow::IconColor));

        doc.card_background_type = BackgroundType::Image;
        doc.icon_style = IconStyle::Custom;
        let rows = design_rows(&doc);
        assert!(rows.contains(&DesignRow::Image(ImageSlot::Background)));
        assert!(rows.contains(&DesignRow::IconColor));
        assert!(!rows.contains(&DesignRow::BackgroundColor));
    }

    #[test]
    fn selection_is_clamped_to_rows() {
        let doc = CardDocument::default();
        let mut screen = EditorScreen::new();
        screen.move_selection(-3, &doc);
        assert_eq!(screen.selected, 0);
        screen.move_selection(1000, &doc);
        assert_eq!(screen.selected, content_rows(&doc).len() - 1);

        screen.switch_tab();
        assert_eq!(screen.tab, Tab::Design);
        assert_eq!(screen.selected, 0);
        assert_eq!(
            screen.current_design_row(&doc),
            Some(DesignRow::Image(ImageSlot::ProfilePicture))
        );
    }

    #[test]
    fn embedded_images_are_summarised() {
        assert_eq!(image_summary(None), "none");
        assert_eq!(
            image_summary(Some("data:image/png;base64,AAAA")),
            "embedded image/png"
        );
    }
}
