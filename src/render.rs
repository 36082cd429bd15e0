//! Pure transform from a `CardDocument` to the view model the preview draws.
//!
//! Nothing here touches the terminal: the UI layer maps `CardView` onto
//! ratatui widgets, and tests assert directly against the view model. Links
//! are derived on every call and never written back to the document.

use crate::models::{Alignment, BackgroundType, CardDocument, IconStyle, TextTone};
use crate::phone::format_phone;

/// Neutral gray used for icons that have no brand color.
pub const FALLBACK_ICON_COLOR: &str = "#4B5563";
/// Header color used when image mode is selected without an image.
pub const FALLBACK_HEADER_COLOR: &str = "#111827";
/// Button color used when the document does not carry one.
pub const FALLBACK_BUTTON_COLOR: &str = "#111827";

const BRAND_COLORS: &[(&str, &str)] = &[
    ("linkedin", "#0A66C2"),
    ("instagram", "#E4405F"),
    ("facebook", "#1877F2"),
    ("twitter", "#000000"),
    ("whatsapp", "#25D366"),
    ("youtube", "#FF0000"),
    ("tiktok", "#000000"),
    ("snapchat", "#F59E0B"),
    ("telegram", "#26A5E4"),
    ("discord", "#5865F2"),
    ("teams", "#6264A7"),
    ("github", "#181717"),
    ("website", "#4B5563"),
    ("email", "#4B5563"),
    ("phone", "#4B5563"),
    ("address", "#4B5563"),
    ("award", "#F59E0B"),
];

/// Icon key used for every accreditation entry.
pub const AWARD_ICON: &str = "award";

/// Brand color for an icon key, if it has one.
pub fn brand_color(key: &str) -> Option<&'static str> {
    BRAND_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, color)| *color)
}

/// Resolve the color an icon is drawn with under the document's icon style.
pub fn icon_color(doc: &CardDocument, key: &str) -> String {
    match doc.icon_style {
        IconStyle::Custom => doc.icon_color.clone(),
        IconStyle::Original => brand_color(key).unwrap_or(FALLBACK_ICON_COLOR).to_string(),
    }
}

/// Optional blocks of the card, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Contact,
    Actions,
    Messaging,
    Social,
    Accreditations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderBackground {
    Color(String),
    Image(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub background: HeaderBackground,
    pub text_tone: TextTone,
    pub alignment: Alignment,
    pub profile_picture: Option<String>,
    pub logo: Option<String>,
}

/// One clickable line of the contact block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLine {
    pub icon: &'static str,
    pub icon_color: String,
    /// Text shown on the card. Phones are formatted, everything else is raw.
    pub text: String,
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSection {
    pub address: Option<ContactLine>,
    pub phones: Vec<ContactLine>,
    pub emails: Vec<ContactLine>,
}

/// A messaging or social icon button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLink {
    pub key: &'static str,
    pub label: &'static str,
    pub href: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccreditationView {
    pub id: String,
    pub label: String,
    pub href: Option<String>,
    pub icon_color: String,
}

/// Everything the preview needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub header: HeaderView,
    pub name: String,
    pub title: String,
    pub company: Option<String>,
    pub page_color: String,
    pub button_color: String,
    pub contact: Option<ContactSection>,
    pub messaging: Vec<IconLink>,
    pub social: Vec<IconLink>,
    pub accreditations: Vec<AccreditationView>,
}

impl CardView {
    /// Sections that are present, in the order they are drawn.
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = Vec::with_capacity(5);
        if self.contact.is_some() {
            sections.push(Section::Contact);
        }
        sections.push(Section::Actions);
        if !self.messaging.is_empty() {
            sections.push(Section::Messaging);
        }
        if !self.social.is_empty() {
            sections.push(Section::Social);
        }
        if !self.accreditations.is_empty() {
            sections.push(Section::Accreditations);
        }
        sections
    }

    /// Every link on the card in reading order. The preview screen walks this
    /// list when the user moves the selection.
    pub fn links(&self) -> Vec<(String, String)> {
        let mut links = Vec::new();
        if let Some(contact) = &self.contact {
            let lines = contact
                .address
                .iter()
                .chain(contact.emails.iter())
                .chain(contact.phones.iter());
            for line in lines {
                links.push((line.text.clone(), line.href.clone()));
            }
        }
        for link in self.messaging.iter().chain(self.social.iter()) {
            links.push((link.label.to_string(), link.href.clone()));
        }
        for item in &self.accreditations {
            if let Some(href) = &item.href {
                links.push((item.label.clone(), href.clone()));
            }
        }
        links
    }
}

/// Build the view model for a document.
pub fn render(doc: &CardDocument) -> CardView {
    CardView {
        header: header_view(doc),
        name: placeholder(&doc.name, "Your Name"),
        title: placeholder(&doc.title, "Job Title"),
        company: non_empty(&doc.company).map(|company| format!("at {company}")),
        page_color: doc.theme_color.clone(),
        button_color: non_empty(&doc.button_color)
            .unwrap_or(FALLBACK_BUTTON_COLOR)
            .to_string(),
        contact: contact_section(doc),
        messaging: messaging_links(doc),
        social: social_links(doc),
        accreditations: accreditation_views(doc),
    }
}

fn header_view(doc: &CardDocument) -> HeaderView {
    let background = match (doc.card_background_type, doc.card_background_image.as_ref()) {
        (BackgroundType::Color, _) => HeaderBackground::Color(doc.card_background_color.clone()),
        (BackgroundType::Image, Some(image)) if !image.is_empty() => {
            HeaderBackground::Image(image.clone())
        }
        (BackgroundType::Image, _) => {
            HeaderBackground::Color(FALLBACK_HEADER_COLOR.to_string())
        }
    };

    HeaderView {
        background,
        text_tone: doc.text_color,
        alignment: doc.profile_alignment,
        profile_picture: doc.profile_picture.clone().filter(|p| !p.is_empty()),
        logo: doc.logo.clone().filter(|l| !l.is_empty()),
    }
}

fn contact_section(doc: &CardDocument) -> Option<ContactSection> {
    let address = non_empty(&doc.address).map(|address| ContactLine {
        icon: "address",
        icon_color: icon_color(doc, "address"),
        text: address.to_string(),
        label: String::new(),
        href: map_search_url(address),
    });

    let phones: Vec<ContactLine> = doc
        .phone_numbers
        .iter()
        .filter(|item| !item.value.is_empty())
        .map(|item| ContactLine {
            icon: "phone",
            icon_color: icon_color(doc, "phone"),
            text: format_phone(&item.value),
            label: item.label.clone(),
            href: format!("tel:{}", item.value),
        })
        .collect();

    let emails: Vec<ContactLine> = doc
        .emails
        .iter()
        .filter(|item| !item.value.is_empty())
        .map(|item| ContactLine {
            icon: "email",
            icon_color: icon_color(doc, "email"),
            text: item.value.clone(),
            label: item.label.clone(),
            href: format!("mailto:{}", item.value),
        })
        .collect();

    if address.is_none() && phones.is_empty() && emails.is_empty() {
        return None;
    }
    Some(ContactSection {
        address,
        phones,
        emails,
    })
}

fn messaging_links(doc: &CardDocument) -> Vec<IconLink> {
    let candidates: [(&'static str, &'static str, &String, fn(&str) -> String); 4] = [
        ("whatsapp", "WhatsApp", &doc.whatsapp, whatsapp_url),
        ("telegram", "Telegram", &doc.telegram, telegram_url),
        ("discord", "Discord", &doc.discord, verbatim),
        ("teams", "Teams", &doc.teams, verbatim),
    ];

    candidates
        .into_iter()
        .filter(|(_, _, value, _)| !value.is_empty())
        .map(|(key, label, value, link)| IconLink {
            key,
            label,
            href: link(value),
            color: icon_color(doc, key),
        })
        .collect()
}

fn social_links(doc: &CardDocument) -> Vec<IconLink> {
    let candidates = [
        ("linkedin", "LinkedIn", &doc.linkedin),
        ("website", "Website", &doc.website),
        ("instagram", "Instagram", &doc.instagram),
        ("facebook", "Facebook", &doc.facebook),
        ("twitter", "X", &doc.twitter),
        ("youtube", "YouTube", &doc.youtube),
        ("tiktok", "TikTok", &doc.tiktok),
        ("snapchat", "Snapchat", &doc.snapchat),
        ("github", "GitHub", &doc.github),
    ];

    candidates
        .into_iter()
        .filter(|(_, _, value)| !value.is_empty())
        .map(|(key, label, value)| IconLink {
            key,
            label,
            href: value.clone(),
            color: icon_color(doc, key),
        })
        .collect()
}

fn accreditation_views(doc: &CardDocument) -> Vec<AccreditationView> {
    let color = icon_color(doc, AWARD_ICON);
    doc.accreditations
        .iter()
        .map(|item| AccreditationView {
            id: item.id.clone(),
            label: placeholder(&item.label, "Accreditation Name"),
            href: non_empty(&item.url).map(str::to_string),
            icon_color: color.clone(),
        })
        .collect()
}

/// `https://wa.me/` link built from the digits of the stored number.
pub fn whatsapp_url(value: &str) -> String {
    let digits: String = value.chars().filter(|ch| ch.is_ascii_digit()).collect();
    format!("https://wa.me/{digits}")
}

/// Full URLs pass through; anything else is treated as a handle.
pub fn telegram_url(value: &str) -> String {
    if value.starts_with("http") {
        value.to_string()
    } else {
        let handle = value.strip_prefix('@').unwrap_or(value);
        format!("https://t.me/{handle}")
    }
}

/// Map search link for a free-text address.
pub fn map_search_url(address: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        encode_uri_component(address)
    )
}

/// Percent-encode everything except the characters `encodeURIComponent`
/// leaves alone.
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

fn verbatim(value: &str) -> String {
    value.to_string()
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn placeholder(value: &str, fallback: &str) -> String {
    non_empty(value).unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccreditationItem, ContactItem};

    fn bare_document() -> CardDocument {
        let mut doc = CardDocument::default();
        doc.address.clear();
        doc.emails.clear();
        doc.phone_numbers.clear();
        doc.linkedin.clear();
        doc.website.clear();
        doc.instagram.clear();
        doc
    }

    fn contact(value: &str, label: &str) -> ContactItem {
        ContactItem {
            id: crate::models::new_item_id(),
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let doc = CardDocument::default();
        assert_eq!(render(&doc), render(&doc));
    }

    #[test]
    fn bare_document_only_shows_actions() {
        let view = render(&bare_document());
        assert_eq!(view.sections(), vec![Section::Actions]);
        assert!(view.links().is_empty());
    }

    #[test]
    fn empty_value_items_are_suppressed_but_kept() {
        let mut doc = bare_document();
        doc.emails.push(contact("", "Work"));
        doc.phone_numbers.push(contact("", "Mobile"));

        let view = render(&doc);
        assert!(view.contact.is_none());
        assert_eq!(doc.emails.len(), 1);

        doc.phone_numbers.push(contact("+14155550123", ""));
        let view = render(&doc);
        let section = view.contact.expect("contact section");
        assert_eq!(section.phones.len(), 1);
        assert!(section.emails.is_empty());
        assert_eq!(section.phones[0].text, "+1 415 555 0123");
        assert_eq!(section.phones[0].href, "tel:+14155550123");
    }

    #[test]
    fn address_alone_opens_contact_block() {
        let mut doc = bare_document();
        doc.address = "San Francisco, CA".to_string();
        let view = render(&doc);
        let address = view.contact.and_then(|c| c.address).expect("address line");
        assert_eq!(
            address.href,
            "https://www.google.com/maps/search/?api=1&query=San%20Francisco%2C%20CA"
        );
    }

    #[test]
    fn whatsapp_link_keeps_only_digits() {
        assert_eq!(whatsapp_url("+1 (415) 555-0123"), "https://wa.me/14155550123");
    }

    #[test]
    fn telegram_accepts_urls_and_handles() {
        assert_eq!(telegram_url("https://t.me/alex"), "https://t.me/alex");
        assert_eq!(telegram_url("@alex"), "https://t.me/alex");
        assert_eq!(telegram_url("alex"), "https://t.me/alex");
    }

    #[test]
    fn messaging_and_social_sections_are_independent() {
        let mut doc = bare_document();
        doc.discord = "https://discord.gg/abc".to_string();
        let view = render(&doc);
        assert_eq!(view.sections(), vec![Section::Actions, Section::Messaging]);
        assert_eq!(view.messaging[0].href, "https://discord.gg/abc");

        doc.discord.clear();
        doc.github = "https://github.com/alex".to_string();
        doc.twitter = "https://x.com/alex".to_string();
        let view = render(&doc);
        assert_eq!(view.sections(), vec![Section::Actions, Section::Social]);
        let keys: Vec<&str> = view.social.iter().map(|l| l.key).collect();
        assert_eq!(keys, vec!["twitter", "github"]);
        assert_eq!(view.social[0].label, "X");
    }

    #[test]
    fn custom_icon_color_applies_everywhere() {
        let mut doc = CardDocument::default();
        doc.icon_style = IconStyle::Custom;
        doc.icon_color = "#FF0000".to_string();
        doc.whatsapp = "+14155550123".to_string();
        doc.accreditations.push(AccreditationItem {
            id: "a1".to_string(),
            label: "PMP".to_string(),
            url: String::new(),
        });

        let view = render(&doc);
        let contact = view.contact.expect("contact");
        let mut colors: Vec<&str> = Vec::new();
        colors.extend(contact.address.iter().map(|l| l.icon_color.as_str()));
        colors.extend(contact.phones.iter().map(|l| l.icon_color.as_str()));
        colors.extend(contact.emails.iter().map(|l| l.icon_color.as_str()));
        colors.extend(view.messaging.iter().map(|l| l.color.as_str()));
        colors.extend(view.social.iter().map(|l| l.color.as_str()));
        colors.extend(view.accreditations.iter().map(|a| a.icon_color.as_str()));
        assert!(!colors.is_empty());
        assert!(colors.iter().all(|color| *color == "#FF0000"));
    }

    #[test]
    fn original_icon_colors_use_brand_table() {
        let doc = CardDocument::default();
        assert_eq!(icon_color(&doc, "linkedin"), "#0A66C2");
        assert_eq!(icon_color(&doc, AWARD_ICON), "#F59E0B");
        assert_eq!(icon_color(&doc, "myspace"), FALLBACK_ICON_COLOR);
    }

    #[test]
    fn accreditation_placeholder_and_optional_link() {
        let mut doc = bare_document();
        doc.accreditations.push(AccreditationItem {
            id: "a1".to_string(),
            label: String::new(),
            url: "https://cert.example/1".to_string(),
        });
        doc.accreditations.push(AccreditationItem {
            id: "a2".to_string(),
            label: "CFA".to_string(),
            url: String::new(),
        });
        let view = render(&doc);
        assert_eq!(view.sections(), vec![Section::Actions, Section::Accreditations]);
        assert_eq!(view.accreditations[0].label, "Accreditation Name");
        assert_eq!(view.accreditations[1].href, None);
        assert_eq!(view.links().len(), 1);
    }

    #[test]
    fn image_mode_without_image_falls_back_to_dark_header() {
        let mut doc = CardDocument::default();
        doc.card_background_type = BackgroundType::Image;
        assert_eq!(
            render(&doc).header.background,
            HeaderBackground::Color(FALLBACK_HEADER_COLOR.to_string())
        );

        doc.card_background_image = Some("data:image/png;base64,AAAA".to_string());
        assert_eq!(
            render(&doc).header.background,
            HeaderBackground::Image("data:image/png;base64,AAAA".to_string())
        );
    }

    #[test]
    fn placeholders_fill_missing_identity() {
        let mut doc = bare_document();
        doc.name.clear();
        doc.title.clear();
        doc.company.clear();
        let view = render(&doc);
        assert_eq!(view.name, "Your Name");
        assert_eq!(view.title, "Job Title");
        assert_eq!(view.company, None);
    }

    #[test]
    fn uri_component_encoding_matches_browser_rules() {
        assert_eq!(encode_uri_component("a b&c/é"), "a%20b%26c%2F%C3%A9");
        assert_eq!(encode_uri_component("it's (ok)!"), "it's%20(ok)!");
    }
}
