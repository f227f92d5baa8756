use caretaker_core::{CareAction, CareService, JsonFileRepository};
use caretaker_tui::{App, ModalKind};
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use std::fs;
use std::path::Path;

fn open_app(path: &Path) -> App<JsonFileRepository> {
    let (service, notice) = CareService::open(JsonFileRepository::new(path));
    App::new(service, notice)
}

fn key(app: &mut App<JsonFileRepository>, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn screen_text(app: &App<JsonFileRepository>, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| app.draw(frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn startup_builds_one_row_per_default_plant() {
    let temp = tempfile::tempdir().unwrap();
    let app = open_app(&temp.path().join("plant_data.json"));

    let titles: Vec<&str> = app.rows().iter().map(|row| row.title.as_str()).collect();
    assert_eq!(titles, vec!["Cactus", "Fern", "Aloe vera"]);
    assert_eq!(
        app.rows()[2].status,
        "Aloe vera -> Last Watered: Never, Last Fertilized: Never"
    );
    assert!(app.modal().is_none());
    assert_eq!(app.selection(), (0, 0));
}

#[test]
fn buttons_are_bound_to_their_own_plant() {
    let temp = tempfile::tempdir().unwrap();
    let app = open_app(&temp.path().join("plant_data.json"));

    for row in app.rows() {
        let [water, fertilize] = &row.buttons;
        assert_eq!(water.plant(), row.plant);
        assert_eq!(water.action(), CareAction::Water);
        assert_eq!(water.label(), "Water");
        assert_eq!(fertilize.plant(), row.plant);
        assert_eq!(fertilize.action(), CareAction::Fertilize);
        assert_eq!(fertilize.label(), "Fertilize");
    }
}

#[test]
fn water_key_updates_status_saves_and_confirms() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("plant_data.json");
    let mut app = open_app(&path);

    key(&mut app, KeyCode::Char('w'));

    let modal = app.modal().expect("confirmation should be shown");
    assert_eq!(modal.kind, ModalKind::Success);
    assert_eq!(modal.title(), "Success");
    assert_eq!(modal.message, "Cactus has been watered!");

    let cactus_status = &app.rows()[0].status;
    assert!(cactus_status.starts_with("Cactus -> Last Watered: 20"));
    assert!(cactus_status.ends_with("Last Fertilized: Never"));
    assert!(app.rows()[1].status.contains("Last Watered: Never"));

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(saved["cactus"]["last_watered"].is_string());
    assert!(saved["fern"]["last_watered"].is_null());
}

#[test]
fn navigation_then_enter_presses_focused_button() {
    let temp = tempfile::tempdir().unwrap();
    let mut app = open_app(&temp.path().join("plant_data.json"));

    key(&mut app, KeyCode::Down);
    key(&mut app, KeyCode::Right);
    assert_eq!(app.selection(), (1, 1));
    key(&mut app, KeyCode::Enter);

    assert_eq!(
        app.modal().map(|modal| modal.message.as_str()),
        Some("Fern has been fertilized!")
    );
    let fern = app.service().record("fern").unwrap();
    assert!(fern.last_fertilized.is_some());
    assert!(fern.last_watered.is_none());
}

#[test]
fn modal_blocks_input_until_dismissed() {
    let temp = tempfile::tempdir().unwrap();
    let mut app = open_app(&temp.path().join("plant_data.json"));

    key(&mut app, KeyCode::Char('w'));
    key(&mut app, KeyCode::Down);
    key(&mut app, KeyCode::Char('q'));
    assert_eq!(app.selection(), (0, 0));
    assert!(!app.should_quit());
    assert!(app.modal().is_some());

    key(&mut app, KeyCode::Enter);
    assert!(app.modal().is_none());

    key(&mut app, KeyCode::Up);
    assert_eq!(app.selection(), (2, 0), "selection wraps around");
    key(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn ctrl_c_quits_even_with_modal_open() {
    let temp = tempfile::tempdir().unwrap();
    let mut app = open_app(&temp.path().join("plant_data.json"));

    key(&mut app, KeyCode::Char('f'));
    assert!(app.modal().is_some());
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}

#[test]
fn corrupted_data_file_shows_reset_dialog() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("plant_data.json");
    fs::write(&path, "{{{").unwrap();

    let app = open_app(&path);

    let modal = app.modal().expect("corruption should be reported");
    assert_eq!(modal.kind, ModalKind::Error);
    assert_eq!(modal.title(), "Error");
    assert_eq!(modal.message, "Data file is corrupted. Resetting data.");
    assert_eq!(app.rows().len(), 3);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{{{");
}

#[test]
fn save_failure_shows_error_dialog_instead_of_crashing() {
    let temp = tempfile::tempdir().unwrap();
    // A directory cannot be read or written as the data file.
    let mut app = open_app(temp.path());
    assert!(app
        .modal()
        .is_some_and(|modal| modal.message.contains("Using default plants")));
    key(&mut app, KeyCode::Esc);

    key(&mut app, KeyCode::Char('w'));

    let modal = app.modal().expect("save failure should be reported");
    assert_eq!(modal.kind, ModalKind::Error);
    assert!(modal.message.starts_with("Could not save plant data"));
    assert!(app.rows()[0].status.starts_with("Cactus -> Last Watered: 20"));
}

#[test]
fn extra_persisted_plants_get_rows_after_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("plant_data.json");
    fs::write(
        &path,
        r#"{"orchid": {"water_days": 10, "fertilize_days": 60, "last_watered": "2026-01-02 03:04:05", "last_fertilized": null}}"#,
    )
    .unwrap();

    let mut app = open_app(&path);

    assert_eq!(app.rows().len(), 4);
    assert_eq!(app.rows()[3].title, "Orchid");
    assert_eq!(
        app.rows()[3].status,
        "Orchid -> Last Watered: 2026-01-02 03:04:05, Last Fertilized: Never"
    );

    app.press(3, 1);
    assert_eq!(
        app.modal().map(|modal| modal.message.as_str()),
        Some("Orchid has been fertilized!")
    );
}

#[test]
fn draw_renders_title_status_lines_and_buttons() {
    let temp = tempfile::tempdir().unwrap();
    let app = open_app(&temp.path().join("plant_data.json"));

    let text = screen_text(&app, 80, 24);

    assert!(text.contains("Virtual Plant Caretaker"));
    assert!(text.contains("Cactus -> Last Watered: Never, Last Fertilized: Never"));
    assert!(text.contains("[ Water ]"));
    assert!(text.contains("[ Fertilize ]"));
}

#[test]
fn draw_shows_confirmation_dialog() {
    let temp = tempfile::tempdir().unwrap();
    let mut app = open_app(&temp.path().join("plant_data.json"));
    key(&mut app, KeyCode::Char('j'));
    key(&mut app, KeyCode::Char('w'));

    let text = screen_text(&app, 80, 24);

    assert!(text.contains("Success"));
    assert!(text.contains("Fern has been watered!"));
}

#[test]
fn long_status_lines_wrap_instead_of_clipping() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("plant_data.json");
    fs::write(
        &path,
        r#"{"cactus": {"water_days": 7, "fertilize_days": 30, "last_watered": "2026-10-19 08:00:00", "last_fertilized": "2026-10-18 21:45:59"}}"#,
    )
    .unwrap();
    let app = open_app(&path);

    let text = screen_text(&app, 80, 24);

    assert!(text.contains("Cactus -> Last Watered: 2026-10-19 08:00:00, Last Fertilized: 2026-10-18"));
    assert!(text.contains("21:45:59"));
    assert_eq!(text.matches("[ Water ]").count(), 3);
}

#[test]
fn rows_scroll_to_keep_selected_plant_and_buttons_visible() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("plant_data.json");
    let extra = |name: &str| {
        format!(r#""{name}": {{"water_days": 5, "fertilize_days": 20, "last_watered": null, "last_fertilized": null}}"#)
    };
    let body = ["basil", "mint", "orchid", "rose"].map(extra).join(", ");
    fs::write(&path, format!("{{{body}}}")).unwrap();
    let mut app = open_app(&path);
    assert_eq!(app.rows().len(), 7);

    let text = screen_text(&app, 80, 24);
    assert!(text.contains("Cactus"));
    assert!(!text.contains("Rose"));
    assert_eq!(text.matches("[ Water ]").count(), 5);
    assert_eq!(text.matches("[ Fertilize ]").count(), 5);
    assert!(text.contains("plants 1-5 of 7"));

    for _ in 0..6 {
        key(&mut app, KeyCode::Down);
    }
    assert_eq!(app.selection(), (6, 0));

    let text = screen_text(&app, 80, 24);
    assert!(text.contains("Rose -> Last Watered: Never, Last Fertilized: Never"));
    assert!(!text.contains("Cactus"));
    assert_eq!(text.matches("[ Water ]").count(), 5);
    assert!(text.contains("plants 3-7 of 7"));
}

#[test]
fn long_dialog_message_keeps_ok_button_visible() {
    let temp = tempfile::tempdir().unwrap();
    // A directory at the data path makes the load notice carry a long path.
    let path = temp
        .path()
        .join("a_fairly_long_directory_name")
        .join("with_another_nested_segment")
        .join("plant_data.json");
    fs::create_dir_all(&path).unwrap();
    let app = open_app(&path);
    let message = &app.modal().expect("load error should be reported").message;
    assert!(message.chars().count() > 124, "message spans at least three lines");

    let text = screen_text(&app, 80, 24);

    assert!(text.contains("[ OK ]"));
    assert!(text.contains("plants."));
}
