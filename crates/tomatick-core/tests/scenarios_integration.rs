//! End-to-end controller scenarios against the SQLite store.

use tomatick_core::storage::{COMPLETED_COUNT_KEY, DURATION_SETTINGS_KEY};
use tomatick_core::{
    Database, DurationSettings, Intent, KvStore, Mode, Outcome, Preferences, Prompt,
    SettingsForm, Silent, TimerController,
};

fn controller(db: &Database) -> TimerController<&Database, Silent> {
    TimerController::load(db, Silent)
}

#[test]
fn scenario_a_full_work_interval() {
    let db = Database::open_memory().unwrap();
    let mut c = controller(&db);
    assert_eq!(c.remaining_secs(), 1500);

    c.apply(Intent::ToggleRun);
    for _ in 0..1500 {
        c.tick();
    }

    assert_eq!(c.mode(), Mode::Break);
    assert_eq!(c.remaining_secs(), c.durations().seconds(Mode::Break));
    assert_eq!(c.completed(), 1);
    assert!(c.is_running());
    assert_eq!(db.get(COMPLETED_COUNT_KEY).unwrap().as_deref(), Some("1"));
}

#[test]
fn scenario_b_confirmed_switch_to_break() {
    let db = Database::open_memory().unwrap();
    let mut c = controller(&db);
    c.apply(Intent::ToggleRun);
    c.tick();

    let intent = Intent::SelectMode(Mode::Break);
    assert_eq!(
        c.request(intent.clone()),
        Outcome::NeedsConfirmation(Prompt::SwitchWhileRunning)
    );
    c.apply(intent);

    assert!(!c.is_running());
    assert_eq!(c.mode(), Mode::Break);
    assert_eq!(c.remaining_secs(), 300);
}

#[test]
fn scenario_c_save_settings() {
    let db = Database::open_memory().unwrap();
    let mut c = controller(&db);
    let update = SettingsForm::new("10", "2", "3").validate().unwrap();
    c.apply(Intent::SaveSettings(update));

    c.apply(Intent::ToggleRun);
    assert_eq!(c.remaining_secs(), 600);
    assert_eq!(c.completed(), 3);

    let prefs = Preferences::new(&db);
    assert_eq!(prefs.load_durations(), DurationSettings::new(600, 120));
    assert_eq!(
        db.get(DURATION_SETTINGS_KEY).unwrap().as_deref(),
        Some(r#"{"WORK":600,"BREAK":120}"#)
    );
}

#[test]
fn scenario_d_reset_session_from_either_mode() {
    for mode in [Mode::Work, Mode::Break] {
        let db = Database::open_memory().unwrap();
        db.set(COMPLETED_COUNT_KEY, "8").unwrap();
        let mut c = controller(&db);
        c.apply(Intent::SelectMode(mode));
        c.apply(Intent::ToggleRun);
        c.apply(Intent::ResetSession);
        assert_eq!(c.completed(), 0);
        assert!(!c.is_running());
        assert_eq!(db.get(COMPLETED_COUNT_KEY).unwrap().as_deref(), Some("0"));
    }
}

#[test]
fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tomatick.db");
    {
        let db = Database::open_at(&path).unwrap();
        let mut c = controller(&db);
        c.apply(Intent::SaveSettings(
            SettingsForm::new("1", "1", "0").validate().unwrap(),
        ));
        c.apply(Intent::ToggleRun);
        for _ in 0..60 {
            c.tick();
        }
        assert_eq!(c.completed(), 1);
    }

    let db = Database::open_at(&path).unwrap();
    let c = controller(&db);
    assert_eq!(c.completed(), 1);
    assert_eq!(c.mode(), Mode::Work);
    assert_eq!(c.remaining_secs(), 60);
    assert!(!c.is_running());
}

#[test]
fn idempotent_save_leaves_store_unchanged() {
    let db = Database::open_memory().unwrap();
    let mut c = controller(&db);
    let form = SettingsForm::from_current(c.durations(), c.completed());
    let before = *c.snapshot();
    c.apply(Intent::SaveSettings(form.validate().unwrap()));
    assert_eq!(*c.snapshot(), before);

    let reloaded = controller(&db);
    assert_eq!(reloaded.durations(), &DurationSettings::default());
    assert_eq!(reloaded.completed(), 0);
}

#[test]
fn long_run_alternates_without_long_break() {
    let db = Database::open_memory().unwrap();
    let mut c = controller(&db);
    c.apply(Intent::SaveSettings(
        SettingsForm::new("1", "1", "0").validate().unwrap(),
    ));
    c.apply(Intent::ToggleRun);

    let mut modes = vec![c.mode()];
    for _ in 0..8 {
        for _ in 0..60 {
            c.tick();
        }
        modes.push(c.mode());
    }
    assert_eq!(
        modes,
        [Mode::Work, Mode::Break].repeat(5)[..9].to_vec()
    );
    assert_eq!(c.completed(), 4);
}
