use super::*;
use crate::config::ButtonPins;
use crate::input::keyboard::map_key;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tempfile::tempdir;

const SETTLE: Duration = Duration::from_millis(50);

#[derive(Clone, Default)]
struct FakePins {
    levels: Rc<RefCell<HashMap<u32, io::Result<Level>>>>,
}

impl FakePins {
    fn set(&self, pin: u32, level: Level) {
        self.levels.borrow_mut().insert(pin, Ok(level));
    }

    fn break_pin(&self, pin: u32) {
        self.levels
            .borrow_mut()
            .insert(pin, Err(io::Error::other("line gone")));
    }
}

impl RawInput for FakePins {
    fn read(&mut self, pin: u32) -> io::Result<Level> {
        match self.levels.borrow().get(&pin) {
            Some(Ok(level)) => Ok(*level),
            Some(Err(err)) => Err(io::Error::new(err.kind(), err.to_string())),
            None => Ok(Level::High),
        }
    }
}

fn run_for(
    panel: &mut ButtonPanel<FakePins>,
    t0: Instant,
    from_ms: u64,
    to_ms: u64,
) -> Vec<ControlCmd> {
    let mut out = Vec::new();
    for t in (from_ms..=to_ms).step_by(10) {
        out.extend(panel.poll(t0 + Duration::from_millis(t)).unwrap());
    }
    out
}

mod buttons {
    use super::*;

    #[test]
    fn held_button_fires_once() {
        let pins = ButtonPins::default();
        let fake = FakePins::default();
        let t0 = Instant::now();
        let mut panel = ButtonPanel::new(fake.clone(), &pins, SETTLE, t0);

        fake.set(pins.next, Level::Low);
        let fired = run_for(&mut panel, t0, 0, 1_000);
        assert_eq!(fired, vec![ControlCmd::Next]);
        assert!(panel.stable(ButtonId::Next).is_pressed());
    }

    #[test]
    fn release_and_press_again_fires_again() {
        let pins = ButtonPins::default();
        let fake = FakePins::default();
        let t0 = Instant::now();
        let mut panel = ButtonPanel::new(fake.clone(), &pins, SETTLE, t0);

        fake.set(pins.play, Level::Low);
        assert_eq!(run_for(&mut panel, t0, 0, 200), vec![ControlCmd::PlayPause]);
        fake.set(pins.play, Level::High);
        assert!(run_for(&mut panel, t0, 210, 400).is_empty());
        assert_eq!(panel.stable(ButtonId::Play), Level::High);
        fake.set(pins.play, Level::Low);
        assert_eq!(run_for(&mut panel, t0, 410, 600), vec![ControlCmd::PlayPause]);
    }

    #[test]
    fn each_button_maps_to_its_command() {
        let pins = ButtonPins::default();
        let fake = FakePins::default();
        let t0 = Instant::now();
        let mut panel = ButtonPanel::new(fake.clone(), &pins, SETTLE, t0);

        for id in ButtonId::ALL {
            fake.set(id.pin(&pins), Level::Low);
        }
        let fired = run_for(&mut panel, t0, 0, 200);
        assert_eq!(
            fired,
            vec![
                ControlCmd::PlayPause,
                ControlCmd::Prev,
                ControlCmd::Next,
                ControlCmd::Info,
                ControlCmd::Quit,
            ]
        );
    }

    #[test]
    fn failing_pin_does_not_stop_the_others() {
        let pins = ButtonPins::default();
        let fake = FakePins::default();
        let t0 = Instant::now();
        let mut panel = ButtonPanel::new(fake.clone(), &pins, SETTLE, t0);

        fake.break_pin(pins.play);
        fake.set(pins.quit, Level::Low);
        assert_eq!(run_for(&mut panel, t0, 0, 200), vec![ControlCmd::Quit]);
        assert_eq!(panel.stable(ButtonId::Play), Level::High);
    }

    #[test]
    fn short_glitch_is_ignored() {
        let pins = ButtonPins::default();
        let fake = FakePins::default();
        let t0 = Instant::now();
        let mut panel = ButtonPanel::new(fake.clone(), &pins, SETTLE, t0);

        fake.set(pins.info, Level::Low);
        assert!(run_for(&mut panel, t0, 0, 40).is_empty());
        fake.set(pins.info, Level::High);
        assert!(run_for(&mut panel, t0, 50, 500).is_empty());
    }
}

mod gpio {
    use super::*;

    #[test]
    fn reads_value_files_active_low() {
        let dir = tempdir().unwrap();
        for (pin, value) in [(17, "0\n"), (18, "1\n")] {
            let line = dir.path().join(format!("gpio{pin}"));
            fs::create_dir(&line).unwrap();
            fs::write(line.join("value"), value).unwrap();
            fs::write(line.join("direction"), "out").unwrap();
        }

        let mut gpio = SysfsGpio::open(dir.path(), &[17, 18]).unwrap();
        assert_eq!(gpio.read(17).unwrap(), Level::Low);
        assert_eq!(gpio.read(18).unwrap(), Level::High);
        assert_eq!(
            fs::read_to_string(dir.path().join("gpio17/direction")).unwrap(),
            "in"
        );
    }

    #[test]
    fn unexported_pin_is_written_to_export() {
        let dir = tempdir().unwrap();
        SysfsGpio::open(dir.path(), &[4]).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("export")).unwrap(), "4");
    }

    #[test]
    fn missing_root_is_a_gpio_error() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nope");
        let err = SysfsGpio::open(&root, &[27]).unwrap_err();
        assert!(matches!(err, crate::error::PlayerError::Gpio { pin: 27, .. }));
    }
}

mod keyboard {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(ControlCmd::PlayPause));
        assert_eq!(map_key(press(KeyCode::Char('n'))), Some(ControlCmd::Next));
        assert_eq!(map_key(press(KeyCode::Right)), Some(ControlCmd::Next));
        assert_eq!(map_key(press(KeyCode::Char('p'))), Some(ControlCmd::Prev));
        assert_eq!(map_key(press(KeyCode::Left)), Some(ControlCmd::Prev));
        assert_eq!(map_key(press(KeyCode::Char('i'))), Some(ControlCmd::Info));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(ControlCmd::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(ControlCmd::Quit));
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn ctrl_c_quits_and_other_chords_are_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(ControlCmd::Quit));
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_n), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = press(KeyCode::Char('n'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
