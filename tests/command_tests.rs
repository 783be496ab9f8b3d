//! Command-mode verbs executed through a Session

use tempfile::TempDir;
use tindit::config::{ConfigPaths, EditorConfig, Settings};
use tindit::editor::{Mode, Outcome, Session};
use tindit::file::FileBrowser;
use tindit::input::EditorEvent;
use tindit::snippet::SnippetEngine;

fn session_in(dir: &TempDir) -> Session {
    Session::new(
        FileBrowser::open(dir.path()).unwrap(),
        Settings::in_memory(EditorConfig::default()),
        SnippetEngine::default(),
    )
}

fn run_command(session: &mut Session, command: &str) -> Outcome {
    session.handle_event(EditorEvent::CommandMode);
    for ch in command.chars() {
        session.handle_event(EditorEvent::Char(ch));
    }
    session.handle_event(EditorEvent::Enter)
}

fn entry_names(session: &Session) -> Vec<String> {
    session
        .browser()
        .entries()
        .iter()
        .map(|entry| entry.name.clone())
        .collect()
}

#[test]
fn test_create_and_remove_file() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    run_command(&mut session, "create notes.txt");
    assert_eq!(session.status().unwrap().text, "File 'notes.txt' created successfully");
    assert!(dir.path().join("notes.txt").is_file());
    assert!(entry_names(&session).contains(&"notes.txt".to_string()));

    run_command(&mut session, "rmfile notes.txt");
    assert_eq!(session.status().unwrap().text, "File 'notes.txt' removed successfully");
    assert!(!dir.path().join("notes.txt").exists());
    assert!(!entry_names(&session).contains(&"notes.txt".to_string()));
}

#[test]
fn test_mkdir_and_rmdir_recursive() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    run_command(&mut session, "mkdir build");
    assert_eq!(session.status().unwrap().text, "Directory 'build' created successfully");
    std::fs::write(dir.path().join("build").join("out.o"), "obj").unwrap();

    run_command(&mut session, "rmdir build");
    assert_eq!(session.status().unwrap().text, "Directory 'build' removed successfully");
    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_missing_argument_does_nothing() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    assert_eq!(run_command(&mut session, "create"), Outcome::Continue);
    assert!(session.status().is_none());
    assert_eq!(entry_names(&session), vec![".."]);
}

#[test]
fn test_remove_missing_file_reports_error() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    run_command(&mut session, "rmfile ghost.txt");
    let status = session.status().unwrap();
    assert!(status.is_error());
    assert!(status.text.starts_with("Error: "));
    assert_eq!(session.mode(), &Mode::Browsing);
}

#[test]
fn test_commands_from_editing_return_to_editing() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    session.open_file(dir.path().join("doc.txt")).unwrap();

    run_command(&mut session, "mkdir assets");
    assert_eq!(session.mode(), &Mode::Editing);
    assert!(dir.path().join("assets").is_dir());
}

#[test]
fn test_number_toggle_is_persisted() {
    let dir = TempDir::new().unwrap();
    let paths = ConfigPaths::in_dir(dir.path().join("config"));
    let settings = Settings::load_or_create(&paths).unwrap();
    let mut session = Session::new(
        FileBrowser::open(dir.path()).unwrap(),
        settings,
        SnippetEngine::default(),
    );

    run_command(&mut session, "number");
    run_command(&mut session, "relativenumber");

    let reloaded = Settings::load_or_create(&paths).unwrap();
    assert!(reloaded.config.number);
    assert!(reloaded.config.relative_number);

    run_command(&mut session, "number");
    let reloaded = Settings::load_or_create(&paths).unwrap();
    assert!(!reloaded.config.number);
}
