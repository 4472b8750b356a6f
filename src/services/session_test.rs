use std::path::Path;

use template_canvas::doc::ElementKind;
use uuid::Uuid;

use super::*;
use crate::services::image::ImageError;

const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn config() -> EditorConfig {
    EditorConfig::default()
}

fn add(session: &mut EditorSession, kind: ElementKind) -> template_canvas::doc::ElementId {
    session.engine_mut().add_element(kind);
    session.engine().selection()[0]
}

fn loaded(target: ImageTarget, uri: &str) -> ImageLoaded {
    ImageLoaded { target, path: PathBuf::from("logo.png"), result: Ok(uri.to_owned()) }
}

#[test]
fn new_blank_uses_config_threshold() {
    let cfg = EditorConfig { snap_threshold: 2.0, ..EditorConfig::default() };
    let session = EditorSession::new_blank("Invoice", "billing", &cfg);
    assert_eq!(session.template().name, "Invoice");
    assert_eq!(session.template().category, "billing");
    assert!(session.template().elements.is_empty());
    assert!((session.engine().snap_threshold - 2.0).abs() < f64::EPSILON);
}

#[test]
fn open_unknown_id_fails() {
    let library = TemplateLibrary::default();
    let id = Uuid::new_v4();
    let err = EditorSession::open(&library, &id, &config()).unwrap_err();
    assert!(matches!(err, LibraryError::NotFound(missing) if missing == id));
}

#[test]
fn edits_stay_private_until_save() {
    let mut library = TemplateLibrary::default();
    let original = Template::blank("Permit", "licensing");
    let id = original.id;
    library.save(original.clone());

    let mut session = EditorSession::open(&library, &id, &config()).unwrap();
    add(&mut session, ElementKind::Text);
    session.rename("Permit v2");
    assert_eq!(library.get(&id), Some(&original));

    assert_eq!(session.save(&mut library), SaveOutcome::Replaced);
    let saved = library.get(&id).unwrap();
    assert_eq!(saved.name, "Permit v2");
    assert_eq!(saved.elements.len(), 1);
    assert_eq!(library.len(), 1);
}

#[test]
fn save_with_blank_name_is_refused() {
    let mut library = TemplateLibrary::default();
    let mut session = EditorSession::new_blank("Draft", "misc", &config());
    session.rename("  ");
    assert_eq!(session.save(&mut library), SaveOutcome::Refused);
    assert!(library.is_empty());
}

#[test]
fn set_category_updates_template() {
    let mut session = EditorSession::new_blank("Draft", "misc", &config());
    session.set_category("payroll");
    assert_eq!(session.template().category, "payroll");
}

#[test]
fn image_lands_on_logo() {
    let mut session = EditorSession::new_blank("Letterhead", "office", &config());
    let id = add(&mut session, ElementKind::Logo);

    let actions = session.apply_image(loaded(ImageTarget::Element(id), "data:image/png;base64,AA=="));
    assert!(matches!(actions.first(), Some(Action::ElementUpdated { id: updated, .. }) if *updated == id));
    assert_eq!(session.engine().element(&id).unwrap().content, "data:image/png;base64,AA==");
}

#[test]
fn image_for_text_element_is_ignored() {
    let mut session = EditorSession::new_blank("Letter", "office", &config());
    let id = add(&mut session, ElementKind::Text);

    let actions = session.apply_image(loaded(ImageTarget::Element(id), "data:image/png;base64,AA=="));
    assert!(actions.is_empty());
    assert_eq!(session.engine().element(&id).unwrap().content, "New Text");
}

#[test]
fn image_for_deleted_element_is_ignored() {
    let mut session = EditorSession::new_blank("Letter", "office", &config());
    let id = add(&mut session, ElementKind::Logo);
    session.engine_mut().delete_element(&id);

    let actions = session.apply_image(loaded(ImageTarget::Element(id), "data:image/png;base64,AA=="));
    assert!(actions.is_empty());
}

#[test]
fn failed_read_keeps_previous_content() {
    let mut session = EditorSession::new_blank("Letter", "office", &config());
    let id = add(&mut session, ElementKind::Logo);
    session.apply_image(loaded(ImageTarget::Element(id), "data:image/png;base64,OLD="));

    let failed = ImageLoaded {
        target: ImageTarget::Element(id),
        path: PathBuf::from("huge.png"),
        result: Err(ImageError::TooLarge { size: 10, limit: 1 }),
    };
    assert!(session.apply_image(failed).is_empty());
    assert_eq!(session.engine().element(&id).unwrap().content, "data:image/png;base64,OLD=");
}

#[test]
fn background_image_sets_page() {
    let mut session = EditorSession::new_blank("Certificate", "awards", &config());
    let actions = session.apply_image(loaded(ImageTarget::Background, "data:image/jpeg;base64,BB=="));
    assert!(matches!(actions.first(), Some(Action::PageUpdated(_))));
    assert_eq!(session.template().page.background_image.as_deref(), Some("data:image/jpeg;base64,BB=="));
}

#[test]
fn apply_pending_images_is_empty_without_reads() {
    let mut session = EditorSession::new_blank("Letter", "office", &config());
    assert!(session.apply_pending_images().is_empty());
}

fn write_png(dir: &Path) -> PathBuf {
    let path = dir.join("logo.png");
    std::fs::write(&path, PNG_HEADER).unwrap();
    path
}

#[tokio::test]
async fn requested_image_arrives_after_selection_moves_on() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path());
    let mut session = EditorSession::new_blank("Letterhead", "office", &config());
    let logo = add(&mut session, ElementKind::Logo);

    session.request_image(&path, ImageTarget::Element(logo)).await.unwrap();
    add(&mut session, ElementKind::Text);

    let actions = session.apply_pending_images();
    assert!(!actions.is_empty());
    assert!(session.engine().element(&logo).unwrap().content.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn next_image_waits_for_background_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path());
    let mut session = EditorSession::new_blank("Certificate", "awards", &config());

    let _read = session.request_image(path, ImageTarget::Background);
    let actions = session.next_image().await;
    assert!(matches!(actions.first(), Some(Action::PageUpdated(_))));
    assert!(session.template().page.background_image.is_some());
}

#[tokio::test]
async fn oversized_upload_is_rejected_by_session_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path());
    let cfg = EditorConfig { image_max_bytes: 4, ..EditorConfig::default() };
    let mut session = EditorSession::new_blank("Letterhead", "office", &cfg);
    let logo = add(&mut session, ElementKind::Logo);

    session.request_image(path, ImageTarget::Element(logo)).await.unwrap();
    assert!(session.apply_pending_images().is_empty());
    assert_eq!(session.engine().element(&logo).unwrap().content, "");
}
