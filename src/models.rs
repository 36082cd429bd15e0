//! Card document model. `CardDocument` is the single source of truth for the
//! editor: every form edits it in place, the preview is recomputed from it on
//! every frame, and the whole struct is written back to the snapshot store
//! after each change.
//!
//! Field names serialize in camelCase so a stored snapshot keeps the same
//! shape as the browser version of the card editor.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Soft pastel palette for the content sheet behind the card body.
pub const PAGE_COLORS: &[&str] = &[
    "#FFFFFF", "#F9FAFB", "#EFF6FF", "#F0FDF4", "#FEFCE8", "#FFF7ED", "#FDF2F8", "#FAF5FF",
];

/// Palette offered for the header background.
pub const BACKGROUND_COLORS: &[&str] = &[
    "#FFFFFF", "#F3F4F6", "#111827", "#374151", "#059669", "#7C3AED", "#2563EB", "#E11D48",
];

/// Palette for the action buttons. The custom icon color picks from the same list.
pub const BUTTON_COLORS: &[&str] = &[
    "#111827", "#2563EB", "#7C3AED", "#DB2777", "#E11D48", "#EA580C", "#059669", "#4B5563",
];

/// Label given to a freshly added email item.
pub const DEFAULT_EMAIL_LABEL: &str = "Work";
/// Label given to a freshly added phone item.
pub const DEFAULT_PHONE_LABEL: &str = "Mobile";

/// Label choices offered by the phone item form. The empty string is "Blank".
pub const PHONE_LABELS: &[&str] = &["", "Mobile", "Personal", "Office", "Business"];
/// Label choices offered by the email item form.
pub const EMAIL_LABELS: &[&str] = &["", "Work", "Personal", "Office", "Business"];

/// A labeled phone number or email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactItem {
    /// Opaque identifier assigned at creation and never changed afterwards.
    pub id: String,
    /// Raw phone number or email address exactly as typed.
    pub value: String,
    /// Free-text category such as "Work" or "Mobile". May be empty.
    pub label: String,
}

/// A credential or award shown at the bottom of the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccreditationItem {
    pub id: String,
    pub label: String,
    /// Optional link; empty means the entry is rendered without one.
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Color,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconStyle {
    /// Every icon keeps its brand color.
    #[default]
    Original,
    /// Every icon uses `CardDocument::icon_color`.
    Custom,
}

/// Tone of the text drawn on top of the header background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Cycle left → center → right → left.
    pub fn next(self) -> Self {
        match self {
            Alignment::Left => Alignment::Center,
            Alignment::Center => Alignment::Right,
            Alignment::Right => Alignment::Left,
        }
    }

    /// Cycle in the opposite direction.
    pub fn previous(self) -> Self {
        match self {
            Alignment::Left => Alignment::Right,
            Alignment::Center => Alignment::Left,
            Alignment::Right => Alignment::Center,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Alignment::Left => "Left",
            Alignment::Center => "Center",
            Alignment::Right => "Right",
        };
        f.write_str(label)
    }
}

/// Singleton text fields of the card. Lists (emails, phones, accreditations)
/// are edited through their own operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextField {
    Name,
    Title,
    Company,
    Address,
    Website,
    Linkedin,
    Instagram,
    Facebook,
    Twitter,
    Youtube,
    Tiktok,
    Snapchat,
    Github,
    Whatsapp,
    Telegram,
    Discord,
    Teams,
}

impl TextField {
    /// Every field in editor order.
    pub const ALL: [TextField; 17] = [
        TextField::Name,
        TextField::Title,
        TextField::Company,
        TextField::Address,
        TextField::Website,
        TextField::Linkedin,
        TextField::Instagram,
        TextField::Facebook,
        TextField::Twitter,
        TextField::Youtube,
        TextField::Tiktok,
        TextField::Snapchat,
        TextField::Github,
        TextField::Whatsapp,
        TextField::Telegram,
        TextField::Discord,
        TextField::Teams,
    ];

    /// Form label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            TextField::Name => "Full Name",
            TextField::Title => "Job Title",
            TextField::Company => "Company",
            TextField::Address => "Address",
            TextField::Website => "Website",
            TextField::Linkedin => "LinkedIn URL",
            TextField::Instagram => "Instagram URL",
            TextField::Facebook => "Facebook URL",
            TextField::Twitter => "X / Twitter URL",
            TextField::Youtube => "YouTube URL",
            TextField::Tiktok => "TikTok URL",
            TextField::Snapchat => "Snapchat Username/URL",
            TextField::Github => "GitHub URL",
            TextField::Whatsapp => "WhatsApp Number",
            TextField::Telegram => "Telegram Username/URL",
            TextField::Discord => "Discord Server/User",
            TextField::Teams => "Microsoft Teams Link",
        }
    }

    /// Short name used on the "+ Add" rows.
    pub fn short_name(self) -> &'static str {
        match self {
            TextField::Name => "Name",
            TextField::Title => "Job Title",
            TextField::Company => "Company",
            TextField::Address => "Address",
            TextField::Website => "Website",
            TextField::Linkedin => "LinkedIn",
            TextField::Instagram => "Instagram",
            TextField::Facebook => "Facebook",
            TextField::Twitter => "X",
            TextField::Youtube => "YouTube",
            TextField::Tiktok => "TikTok",
            TextField::Snapchat => "Snapchat",
            TextField::Github => "GitHub",
            TextField::Whatsapp => "WhatsApp",
            TextField::Telegram => "Telegram",
            TextField::Discord => "Discord",
            TextField::Teams => "Teams",
        }
    }

    /// The name field is always shown and cannot be removed.
    pub fn is_removable(self) -> bool {
        self != TextField::Name
    }
}

/// Which contact list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactList {
    Emails,
    Phones,
}

impl ContactList {
    pub fn default_label(self) -> &'static str {
        match self {
            ContactList::Emails => DEFAULT_EMAIL_LABEL,
            ContactList::Phones => DEFAULT_PHONE_LABEL,
        }
    }

    pub fn label_choices(self) -> &'static [&'static str] {
        match self {
            ContactList::Emails => EMAIL_LABELS,
            ContactList::Phones => PHONE_LABELS,
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            ContactList::Emails => "Email Address",
            ContactList::Phones => "Phone Number",
        }
    }
}

/// Image slots on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    ProfilePicture,
    Logo,
    Background,
}

impl ImageSlot {
    pub fn label(self) -> &'static str {
        match self {
            ImageSlot::ProfilePicture => "Profile Photo",
            ImageSlot::Logo => "Company Logo",
            ImageSlot::Background => "Background Image",
        }
    }
}

/// Every piece of content and styling for one digital card. Keys missing from
/// a stored snapshot come back empty, apart from the colors, which fall back to
/// the stock palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDocument {
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emails: Vec<ContactItem>,
    #[serde(default)]
    pub phone_numbers: Vec<ContactItem>,
    #[serde(default)]
    pub accreditations: Vec<AccreditationItem>,
    #[serde(default)]
    pub card_background_type: BackgroundType,
    #[serde(default = "default_dark_color")]
    pub card_background_color: String,
    #[serde(default)]
    pub card_background_image: Option<String>,
    /// Background of the content sheet below the header.
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    #[serde(default = "default_dark_color")]
    pub button_color: String,
    #[serde(default)]
    pub icon_style: IconStyle,
    #[serde(default = "default_dark_color")]
    pub icon_color: String,
    #[serde(default)]
    pub text_color: TextTone,
    #[serde(default)]
    pub profile_alignment: Alignment,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub tiktok: String,
    #[serde(default)]
    pub snapchat: String,
    #[serde(default)]
    pub telegram: String,
    #[serde(default)]
    pub discord: String,
    #[serde(default)]
    pub teams: String,
    #[serde(default)]
    pub github: String,
}

fn default_dark_color() -> String {
    "#111827".to_string()
}

fn default_theme_color() -> String {
    "#FFFFFF".to_string()
}

impl Default for CardDocument {
    /// The sample card a new user starts from.
    fn default() -> Self {
        Self {
            profile_picture: Some("https://picsum.photos/seed/muradtap-profile/200".to_string()),
            logo: Some("https://picsum.photos/seed/muradtap-logo/100".to_string()),
            name: "Alex Smith".to_string(),
            title: "Marketing Manager".to_string(),
            company: "Muradtap".to_string(),
            address: "San Francisco, CA".to_string(),
            emails: vec![ContactItem {
                id: "default-email".to_string(),
                value: "alex.smith@muradtap.me".to_string(),
                label: DEFAULT_EMAIL_LABEL.to_string(),
            }],
            phone_numbers: vec![ContactItem {
                id: "default-phone".to_string(),
                value: "+1 415 555 0123".to_string(),
                label: DEFAULT_PHONE_LABEL.to_string(),
            }],
            accreditations: Vec::new(),
            card_background_type: BackgroundType::Color,
            card_background_color: default_dark_color(),
            card_background_image: None,
            theme_color: default_theme_color(),
            button_color: default_dark_color(),
            icon_style: IconStyle::Original,
            icon_color: default_dark_color(),
            text_color: TextTone::Light,
            profile_alignment: Alignment::Left,
            linkedin: "https://linkedin.com/in/alexsmith".to_string(),
            website: "https://muradtap.me".to_string(),
            instagram: "https://instagram.com/muradtap".to_string(),
            facebook: String::new(),
            twitter: String::new(),
            whatsapp: String::new(),
            youtube: String::new(),
            tiktok: String::new(),
            snapchat: String::new(),
            telegram: String::new(),
            discord: String::new(),
            teams: String::new(),
            github: String::new(),
        }
    }
}

/// Generate a fresh list-item identifier. Identifiers are random v4 UUIDs so a
/// removed item's id is never handed out again.
pub fn new_item_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl CardDocument {
    /// Read a singleton text field.
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Title => &self.title,
            TextField::Company => &self.company,
            TextField::Address => &self.address,
            TextField::Website => &self.website,
            TextField::Linkedin => &self.linkedin,
            TextField::Instagram => &self.instagram,
            TextField::Facebook => &self.facebook,
            TextField::Twitter => &self.twitter,
            TextField::Youtube => &self.youtube,
            TextField::Tiktok => &self.tiktok,
            TextField::Snapchat => &self.snapchat,
            TextField::Github => &self.github,
            TextField::Whatsapp => &self.whatsapp,
            TextField::Telegram => &self.telegram,
            TextField::Discord => &self.discord,
            TextField::Teams => &self.teams,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::Title => &mut self.title,
            TextField::Company => &mut self.company,
            TextField::Address => &mut self.address,
            TextField::Website => &mut self.website,
            TextField::Linkedin => &mut self.linkedin,
            TextField::Instagram => &mut self.instagram,
            TextField::Facebook => &mut self.facebook,
            TextField::Twitter => &mut self.twitter,
            TextField::Youtube => &mut self.youtube,
            TextField::Tiktok => &mut self.tiktok,
            TextField::Snapchat => &mut self.snapchat,
            TextField::Github => &mut self.github,
            TextField::Whatsapp => &mut self.whatsapp,
            TextField::Telegram => &mut self.telegram,
            TextField::Discord => &mut self.discord,
            TextField::Teams => &mut self.teams,
        }
    }

    /// Overwrite a singleton text field. Values are stored verbatim.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.text_mut(field) = value.into();
    }

    /// Remove a singleton field from the card by emptying it.
    pub fn clear_text(&mut self, field: TextField) {
        self.text_mut(field).clear();
    }

    pub fn contacts(&self, list: ContactList) -> &[ContactItem] {
        match list {
            ContactList::Emails => &self.emails,
            ContactList::Phones => &self.phone_numbers,
        }
    }

    fn contacts_mut(&mut self, list: ContactList) -> &mut Vec<ContactItem> {
        match list {
            ContactList::Emails => &mut self.emails,
            ContactList::Phones => &mut self.phone_numbers,
        }
    }

    /// Append an empty item carrying the list's default label and return its id.
    pub fn add_contact(&mut self, list: ContactList) -> String {
        let id = new_item_id();
        self.contacts_mut(list).push(ContactItem {
            id: id.clone(),
            value: String::new(),
            label: list.default_label().to_string(),
        });
        id
    }

    pub fn add_email(&mut self) -> String {
        self.add_contact(ContactList::Emails)
    }

    pub fn add_phone(&mut self) -> String {
        self.add_contact(ContactList::Phones)
    }

    /// Patch the value and/or label of an item. Returns `false` when no item
    /// carries `id`.
    pub fn update_contact(
        &mut self,
        list: ContactList,
        id: &str,
        value: Option<String>,
        label: Option<String>,
    ) -> bool {
        let Some(item) = self.contacts_mut(list).iter_mut().find(|item| item.id == id) else {
            return false;
        };
        if let Some(value) = value {
            item.value = value;
        }
        if let Some(label) = label {
            item.label = label;
        }
        true
    }

    pub fn remove_contact(&mut self, list: ContactList, id: &str) -> bool {
        let items = self.contacts_mut(list);
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() != before
    }

    pub fn add_accreditation(&mut self) -> String {
        let id = new_item_id();
        self.accreditations.push(AccreditationItem {
            id: id.clone(),
            label: String::new(),
            url: String::new(),
        });
        id
    }

    pub fn update_accreditation(
        &mut self,
        id: &str,
        label: Option<String>,
        url: Option<String>,
    ) -> bool {
        let Some(item) = self.accreditations.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        if let Some(label) = label {
            item.label = label;
        }
        if let Some(url) = url {
            item.url = url;
        }
        true
    }

    pub fn remove_accreditation(&mut self, id: &str) -> bool {
        let before = self.accreditations.len();
        self.accreditations.retain(|item| item.id != id);
        self.accreditations.len() != before
    }

    pub fn set_background_type(&mut self, kind: BackgroundType) {
        self.card_background_type = kind;
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.card_background_color = color.into();
    }

    pub fn set_theme_color(&mut self, color: impl Into<String>) {
        self.theme_color = color.into();
    }

    pub fn set_button_color(&mut self, color: impl Into<String>) {
        self.button_color = color.into();
    }

    pub fn set_icon_style(&mut self, style: IconStyle) {
        self.icon_style = style;
    }

    pub fn set_icon_color(&mut self, color: impl Into<String>) {
        self.icon_color = color.into();
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.profile_alignment = alignment;
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        match slot {
            ImageSlot::ProfilePicture => self.profile_picture.as_deref(),
            ImageSlot::Logo => self.logo.as_deref(),
            ImageSlot::Background => self.card_background_image.as_deref(),
        }
    }

    /// Replace or clear an image reference.
    pub fn set_image(&mut self, slot: ImageSlot, image: Option<String>) {
        let target = match slot {
            ImageSlot::ProfilePicture => &mut self.profile_picture,
            ImageSlot::Logo => &mut self.logo,
            ImageSlot::Background => &mut self.card_background_image,
        };
        *target = image;
    }
}

/// Singleton fields that currently show an input in the editor: the name
/// always, every other field only while it holds a value.
pub fn active_fields(doc: &CardDocument) -> BTreeSet<TextField> {
    TextField::ALL
        .into_iter()
        .filter(|field| *field == TextField::Name || !doc.text(*field).is_empty())
        .collect()
}

/// Step through a palette, wrapping at both ends. A color that is not part of
/// the palette restarts from the first entry.
pub fn cycle_palette(palette: &[&str], current: &str, step: isize) -> String {
    if palette.is_empty() {
        return current.to_string();
    }
    let len = palette.len() as isize;
    let next = match palette
        .iter()
        .position(|color| color.eq_ignore_ascii_case(current))
    {
        Some(idx) => (idx as isize + step).rem_euclid(len),
        None => 0,
    };
    palette[next as usize].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_items_get_distinct_ids_and_default_labels() {
        let mut doc = CardDocument::default();
        let first = doc.add_phone();
        let second = doc.add_phone();
        assert_ne!(first, second);

        let added = &doc.phone_numbers[1];
        assert_eq!(added.id, first);
        assert_eq!(added.label, "Mobile");
        assert!(added.value.is_empty());

        let email = doc.add_email();
        assert_eq!(doc.emails.last().map(|e| e.id.as_str()), Some(email.as_str()));
        assert_eq!(doc.emails.last().map(|e| e.label.as_str()), Some("Work"));
    }

    #[test]
    fn removal_keeps_order_of_remaining_items() {
        let mut doc = CardDocument::default();
        doc.phone_numbers.clear();
        let a = doc.add_phone();
        let b = doc.add_phone();
        let c = doc.add_phone();

        assert!(doc.remove_contact(ContactList::Phones, &b));
        let ids: Vec<&str> = doc.phone_numbers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![a.as_str(), c.as_str()]);

        let d = doc.add_phone();
        assert_ne!(d, b);
        assert!(!doc.remove_contact(ContactList::Phones, &b));
    }

    #[test]
    fn update_of_unknown_item_is_a_no_op() {
        let mut doc = CardDocument::default();
        let before = doc.clone();
        assert!(!doc.update_contact(ContactList::Emails, "missing", Some("x".into()), None));
        assert!(!doc.update_accreditation("missing", Some("x".into()), None));
        assert_eq!(doc, before);
    }

    #[test]
    fn update_contact_patches_only_given_parts() {
        let mut doc = CardDocument::default();
        assert!(doc.update_contact(
            ContactList::Emails,
            "default-email",
            None,
            Some("Personal".into())
        ));
        assert_eq!(doc.emails[0].value, "alex.smith@muradtap.me");
        assert_eq!(doc.emails[0].label, "Personal");
    }

    #[test]
    fn active_fields_follow_document_values() {
        let mut doc = CardDocument::default();
        let active = active_fields(&doc);
        assert!(active.contains(&TextField::Name));
        assert!(active.contains(&TextField::Linkedin));
        assert!(!active.contains(&TextField::Github));

        doc.set_text(TextField::Github, "https://github.com/alex");
        doc.clear_text(TextField::Linkedin);
        doc.clear_text(TextField::Name);
        let active = active_fields(&doc);
        assert!(active.contains(&TextField::Github));
        assert!(!active.contains(&TextField::Linkedin));
        assert!(active.contains(&TextField::Name));
    }

    #[test]
    fn palette_cycles_and_wraps() {
        assert_eq!(cycle_palette(BUTTON_COLORS, "#111827", 1), "#2563EB");
        assert_eq!(cycle_palette(BUTTON_COLORS, "#111827", -1), "#4B5563");
        assert_eq!(cycle_palette(BUTTON_COLORS, "#4b5563", 1), "#111827");
        assert_eq!(cycle_palette(BUTTON_COLORS, "#ABCDEF", 1), "#111827");
    }

    #[test]
    fn snapshot_uses_camel_case_keys() {
        let json = serde_json::to_value(CardDocument::default()).expect("serialize");
        assert!(json.get("phoneNumbers").is_some());
        assert_eq!(json["cardBackgroundType"], "color");
        assert_eq!(json["iconStyle"], "original");
        assert_eq!(json["profileAlignment"], "left");
        assert!(json["cardBackgroundImage"].is_null());
    }

    #[test]
    fn partial_snapshot_fills_missing_fields_with_defaults() {
        let doc: CardDocument =
            serde_json::from_str(r#"{"name":"Sam","emails":[]}"#).expect("deserialize");
        assert_eq!(doc.name, "Sam");
        assert!(doc.emails.is_empty());
        assert_eq!(doc.card_background_color, "#111827");
        assert_eq!(doc.theme_color, "#FFFFFF");
        assert_eq!(doc.icon_style, IconStyle::Original);
    }

    #[test]
    fn partial_snapshot_keeps_missing_content_empty() {
        let doc: CardDocument = serde_json::from_str(
            r#"{"name":"Sam Lee","emails":[{"id":"e","value":"sam@x.io","label":""}]}"#,
        )
        .expect("deserialize");

        assert_eq!(doc.name, "Sam Lee");
        assert_eq!(doc.emails.len(), 1);
        assert!(doc.title.is_empty());
        assert!(doc.company.is_empty());
        assert!(doc.address.is_empty());
        assert!(doc.phone_numbers.is_empty());
        assert!(doc.linkedin.is_empty());
        assert!(doc.website.is_empty());
        assert!(doc.instagram.is_empty());
        assert_eq!(doc.profile_picture, None);
        assert_eq!(doc.logo, None);
        assert_eq!(active_fields(&doc).len(), 1);
    }

    #[test]
    fn empty_snapshot_is_a_blank_card() {
        let doc: CardDocument = serde_json::from_str("{}").expect("deserialize");
        assert!(doc.name.is_empty());
        assert!(doc.emails.is_empty());
        assert_eq!(doc.button_color, "#111827");
    }
}
