use super::*;
use crate::library::RawTags;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn play_while_playing_is_a_no_op() {
    let t = Transport::new();
    assert_eq!(t.command(), TransportCmd::Play);
    assert!(!t.issue(TransportCmd::Play));
    assert_eq!(t.command(), TransportCmd::Play);
    assert!(!t.take_and_clear_finished());
}

#[test]
fn terminal_commands_set_finished_exactly_once() {
    for cmd in [TransportCmd::Next, TransportCmd::Previous, TransportCmd::Quit] {
        let t = Transport::new();
        assert!(t.issue(cmd));
        assert_eq!(t.command(), cmd);
        assert!(t.take_and_clear_finished());
        assert!(!t.take_and_clear_finished());
        assert!(!t.take_and_clear_finished());
    }
}

#[test]
fn pause_and_play_do_not_touch_finished() {
    let t = Transport::new();
    assert!(t.issue(TransportCmd::Pause));
    assert!(t.issue(TransportCmd::Play));
    assert!(!t.take_and_clear_finished());
}

#[test]
fn latched_skip_only_yields_to_quit() {
    let t = Transport::new();
    assert!(t.issue(TransportCmd::Next));
    assert!(!t.issue(TransportCmd::Pause));
    assert!(!t.issue(TransportCmd::Previous));
    assert!(!t.issue(TransportCmd::Play));
    assert_eq!(t.command(), TransportCmd::Next);
    assert!(t.issue(TransportCmd::Quit));
    assert!(!t.issue(TransportCmd::Quit));
    assert_eq!(t.command(), TransportCmd::Quit);
}

#[test]
fn toggle_pause_flips_only_between_play_and_pause() {
    let t = Transport::new();
    assert_eq!(t.toggle_pause(), TransportCmd::Pause);
    assert_eq!(t.toggle_pause(), TransportCmd::Play);
    t.issue(TransportCmd::Quit);
    assert_eq!(t.toggle_pause(), TransportCmd::Quit);
}

#[test]
fn await_not_paused_returns_immediately_when_playing() {
    let t = Transport::new();
    assert_eq!(t.await_not_paused(), TransportCmd::Play);
}

#[test]
fn paused_waiter_is_released_by_play() {
    let t = Arc::new(Transport::new());
    t.issue(TransportCmd::Pause);

    let waiter = {
        let t = t.clone();
        thread::spawn(move || t.await_not_paused())
    };
    thread::sleep(Duration::from_millis(20));
    assert!(!waiter.is_finished());

    t.issue(TransportCmd::Play);
    assert_eq!(waiter.join().unwrap(), TransportCmd::Play);
}

#[test]
fn paused_waiter_observes_quit() {
    let t = Arc::new(Transport::new());
    t.issue(TransportCmd::Pause);
    let waiter = {
        let t = t.clone();
        thread::spawn(move || t.await_not_paused())
    };
    thread::sleep(Duration::from_millis(10));
    t.issue(TransportCmd::Quit);
    assert_eq!(waiter.join().unwrap(), TransportCmd::Quit);
}

#[test]
fn racing_pause_play_cycles_never_miss_a_wakeup() {
    const CYCLES: usize = 500;
    let t = Arc::new(Transport::new());
    let passes = Arc::new(AtomicUsize::new(0));

    let waiter = {
        let t = t.clone();
        let passes = passes.clone();
        thread::spawn(move || {
            let mut worst = Duration::ZERO;
            loop {
                let started = Instant::now();
                let cmd = t.await_not_paused();
                worst = worst.max(started.elapsed());
                if cmd == TransportCmd::Quit {
                    return worst;
                }
                passes.fetch_add(1, Ordering::SeqCst);
                thread::yield_now();
            }
        })
    };

    for _ in 0..CYCLES {
        t.issue(TransportCmd::Pause);
        thread::yield_now();
        t.issue(TransportCmd::Play);
    }
    // Leave it paused, then make sure the final resume still gets through.
    t.issue(TransportCmd::Pause);
    thread::sleep(Duration::from_millis(5));
    let before = passes.load(Ordering::SeqCst);
    t.issue(TransportCmd::Play);
    let deadline = Instant::now() + Duration::from_secs(2);
    while passes.load(Ordering::SeqCst) == before {
        assert!(Instant::now() < deadline, "waiter never woke after PLAY");
        thread::sleep(Duration::from_millis(1));
    }

    t.issue(TransportCmd::Quit);
    let worst = waiter.join().unwrap();
    assert!(worst < Duration::from_secs(1), "wake latency too high: {worst:?}");
}

#[test]
fn wait_finished_times_out_then_wakes_on_mark() {
    let t = Arc::new(Transport::new());
    let started = Instant::now();
    assert!(!t.wait_finished(Duration::from_millis(20)));
    assert!(started.elapsed() >= Duration::from_millis(20));

    let marker = {
        let t = t.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            t.mark_finished();
        })
    };
    assert!(t.wait_finished(Duration::from_secs(5)));
    marker.join().unwrap();
    // Waiting does not consume the signal.
    assert!(t.take_and_clear_finished());
}

#[test]
fn rearm_reports_skip_and_resets_to_play() {
    let t = Transport::new();
    t.replace_metadata(TrackMetadata::from_tags(
        Path::new("/m/a.mp3"),
        RawTags {
            title: Some("Song".into()),
            ..RawTags::default()
        },
        SecondaryRow::Album,
    ));
    t.issue(TransportCmd::Previous);
    assert!(t.take_and_clear_finished());
    // The playback thread signals again when it stops.
    t.mark_finished();

    assert_eq!(t.rearm(), TrackEnd::Skipped(TransportCmd::Previous));
    assert_eq!(t.command(), TransportCmd::Play);
    assert!(!t.take_and_clear_finished());
    let meta = t.metadata();
    assert_eq!(meta.title.as_str(), FALLBACK_TEXT);
    assert_eq!(meta.secondary, SecondaryRow::Album);
}

#[test]
fn rearm_after_natural_end_and_quit() {
    let t = Transport::new();
    t.mark_finished();
    assert_eq!(t.rearm(), TrackEnd::Completed);
    assert_eq!(t.command(), TransportCmd::Play);

    t.issue(TransportCmd::Quit);
    assert_eq!(t.rearm(), TrackEnd::Quit);
    assert_eq!(t.command(), TransportCmd::Quit);
}

#[test]
fn metadata_fallbacks_are_never_empty() {
    let m = TrackMetadata::from_tags(
        Path::new("/music/track01.mp3"),
        RawTags::default(),
        SecondaryRow::Artist,
    );
    assert_eq!(m.title.as_str(), "track01.mp3");
    assert_eq!(m.artist.as_str(), FALLBACK_TEXT);
    assert_eq!(m.album.as_str(), FALLBACK_TEXT);
    assert_eq!(m.genre.as_str(), FALLBACK_TEXT);
    assert_eq!(m.secondary_text(), FALLBACK_TEXT);

    let m = TrackMetadata::from_tags(
        Path::new("/music/x.flac"),
        RawTags {
            title: Some("   ".into()),
            artist: Some(" Band ".into()),
            album: Some("Record".into()),
            genre: None,
        },
        SecondaryRow::Artist,
    );
    assert_eq!(m.title.as_str(), "x.flac");
    assert_eq!(m.secondary_text(), "Band");
}

#[test]
fn toggle_secondary_row_swaps_artist_and_album() {
    let t = Transport::new();
    t.replace_metadata(TrackMetadata::from_tags(
        Path::new("/m/a.mp3"),
        RawTags {
            artist: Some("Artist".into()),
            album: Some("Album".into()),
            ..RawTags::default()
        },
        SecondaryRow::Artist,
    ));
    assert_eq!(t.toggle_secondary_row(), "Album");
    assert_eq!(t.toggle_secondary_row(), "Artist");
}

#[test]
fn bounded_text_cuts_on_char_boundary() {
    let long = "é".repeat(150); // 300 bytes
    let b = BoundedText::new(&long);
    assert!(b.len() <= MAX_TEXT_BYTES);
    assert_eq!(b.len(), 200);
    assert!(b.as_str().chars().all(|c| c == 'é'));

    let odd = format!("a{}", "é".repeat(150));
    let b = BoundedText::new(&odd);
    assert_eq!(b.len(), 199);
}
