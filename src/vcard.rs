//! vCard 3.0 export. `build` is pure and cannot fail; `export_to` is the thin
//! I/O step that drops the result into a directory, the terminal's version of
//! a browser download.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::models::CardDocument;

/// MIME type of the exported artifact.
pub const MIME_TYPE: &str = "text/vcard";
/// Extension appended to the exported file name.
pub const FILE_EXTENSION: &str = "vcf";

/// Render the contact record for a card.
pub fn build(doc: &CardDocument) -> String {
    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", doc.name),
    ];

    if !doc.company.is_empty() {
        lines.push(format!("ORG:{}", doc.company));
    }
    if !doc.title.is_empty() {
        lines.push(format!("TITLE:{}", doc.title));
    }

    for phone in doc.phone_numbers.iter().filter(|p| !p.value.is_empty()) {
        lines.push(format!(
            "TEL;TYPE={}:{}",
            type_tag(&phone.label, "CELL"),
            phone.value
        ));
    }
    for email in doc.emails.iter().filter(|e| !e.value.is_empty()) {
        lines.push(format!(
            "EMAIL;TYPE={}:{}",
            type_tag(&email.label, "WORK"),
            email.value
        ));
    }

    if !doc.website.is_empty() {
        lines.push(format!("URL:{}", doc.website));
    }
    if !doc.linkedin.is_empty() {
        lines.push(format!("URL:{}", doc.linkedin));
    }
    if !doc.address.is_empty() {
        lines.push(format!("ADR:;;{};;;;", doc.address.replace(',', ";")));
    }

    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

/// Characters most filesystems refuse in a file name.
const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// File name for the export: whitespace runs in the name become underscores,
/// path separators and reserved characters are replaced, and `.`/`..`
/// segments are dropped so the result always stays inside the export
/// directory. A blank name falls back to `contact`.
pub fn file_name(doc: &CardDocument) -> String {
    let joined = doc
        .name
        .split(['/', '\\'])
        .filter(|segment| !matches!(segment.trim(), "" | "." | ".."))
        .collect::<Vec<_>>()
        .join("_");

    let mut stem = String::with_capacity(joined.len());
    let mut in_whitespace = false;
    for ch in joined.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch.is_control() || RESERVED_CHARS.contains(&ch) {
            stem.push('_');
        } else {
            stem.push(ch);
        }
    }

    let stem = stem.trim_start_matches('.');
    if stem.trim_matches('_').is_empty() {
        return format!("contact.{FILE_EXTENSION}");
    }
    format!("{stem}.{FILE_EXTENSION}")
}

/// Write the vCard into `dir`, creating the directory when needed, and return
/// the full path of the written file.
pub fn export_to(dir: &Path, doc: &CardDocument) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(file_name(doc));
    fs::write(&path, build(doc))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), mime = MIME_TYPE, "exported contact card");
    Ok(path)
}

fn type_tag(label: &str, fallback: &str) -> String {
    if label.is_empty() {
        fallback.to_string()
    } else {
        label.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactItem;

    fn name_only(name: &str) -> CardDocument {
        let mut doc = CardDocument::default();
        doc.name = name.to_string();
        doc.title.clear();
        doc.company.clear();
        doc.address.clear();
        doc.emails.clear();
        doc.phone_numbers.clear();
        doc.website.clear();
        doc.linkedin.clear();
        doc
    }

    #[test]
    fn name_only_document_produces_degenerate_record() {
        let doc = name_only("Alex Smith");
        assert_eq!(
            build(&doc),
            "BEGIN:VCARD\nVERSION:3.0\nFN:Alex Smith\nEND:VCARD"
        );
    }

    #[test]
    fn default_document_lines_are_in_fixed_order() {
        let card = build(&CardDocument::default());
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(
            lines,
            vec![
                "BEGIN:VCARD",
                "VERSION:3.0",
                "FN:Alex Smith",
                "ORG:Muradtap",
                "TITLE:Marketing Manager",
                "TEL;TYPE=MOBILE:+1 415 555 0123",
                "EMAIL;TYPE=WORK:alex.smith@muradtap.me",
                "URL:https://muradtap.me",
                "URL:https://linkedin.com/in/alexsmith",
                "ADR:;;San Francisco; CA;;;;",
                "END:VCARD",
            ]
        );
        assert!(!card.ends_with('\n'));
    }

    #[test]
    fn empty_labels_fall_back_to_default_tags() {
        let mut doc = name_only("Sam");
        doc.emails.push(ContactItem {
            id: "e".to_string(),
            value: "a@b.com".to_string(),
            label: String::new(),
        });
        doc.phone_numbers.push(ContactItem {
            id: "p".to_string(),
            value: "+14155550123".to_string(),
            label: String::new(),
        });
        doc.phone_numbers.push(ContactItem {
            id: "blank".to_string(),
            value: String::new(),
            label: "Office".to_string(),
        });
        let card = build(&doc);
        assert!(card.contains("\nEMAIL;TYPE=WORK:a@b.com\n"));
        assert!(card.contains("\nTEL;TYPE=CELL:+14155550123\n"));
        assert!(!card.contains("OFFICE"));
    }

    #[test]
    fn file_name_collapses_whitespace() {
        assert_eq!(file_name(&name_only("Alex Smith")), "Alex_Smith.vcf");
        assert_eq!(file_name(&name_only("Ana  Maria\tLopez")), "Ana_Maria_Lopez.vcf");
        assert_eq!(file_name(&name_only("   ")), "contact.vcf");
    }

    #[test]
    fn file_name_never_leaves_the_export_directory() {
        assert_eq!(file_name(&name_only("Smith/Jones")), "Smith_Jones.vcf");
        assert_eq!(file_name(&name_only("../escaped")), "escaped.vcf");
        assert_eq!(file_name(&name_only("..\\..\\up")), "up.vcf");
        assert_eq!(file_name(&name_only("a:b*c?")), "a_b_c_.vcf");
        assert_eq!(file_name(&name_only(".hidden")), "hidden.vcf");
        assert_eq!(file_name(&name_only("../..")), "contact.vcf");
    }

    #[test]
    fn export_with_separator_in_name_stays_in_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let export_dir = dir.path().join("exports");
        let path = export_to(&export_dir, &name_only("../escaped")).expect("export");
        assert_eq!(path, export_dir.join("escaped.vcf"));
        assert!(path.exists());
        assert!(!dir.path().join("escaped.vcf").exists());

        let path = export_to(&export_dir, &name_only("Smith/Jones")).expect("export");
        assert_eq!(path, export_dir.join("Smith_Jones.vcf"));
    }

    #[test]
    fn export_writes_file_into_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("exports");
        let doc = name_only("Alex Smith");

        let path = export_to(&target, &doc).expect("export");
        assert_eq!(path, target.join("Alex_Smith.vcf"));
        let written = fs::read_to_string(&path).expect("read back");
        assert_eq!(written, build(&doc));
    }
}
