//! Engine-level tests: write contract, snapshots, dirty tracking and
//! thread safety

use std::io::{BufReader, Cursor};
use std::sync::Arc;
use std::thread;

use vtstate::{Color, Config, Error, MemoryDiagnostics, Style, Terminal, TerminalState};

fn drain(term: &Terminal, bytes: &[u8], capacity: usize) {
    let mut reader = BufReader::with_capacity(capacity, Cursor::new(bytes.to_vec()));
    loop {
        match term.parse(&mut reader) {
            Ok(()) => continue,
            Err(Error::StreamClosed) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}

#[test]
fn test_unsized_engine_snapshot_is_empty() {
    let term = Terminal::default();
    let state = term.snapshot();
    assert_eq!(state.cols, 0);
    assert_eq!(state.rows, 0);
    assert!(state.primary_buffer.is_empty());
    assert!(state.alternate_buffer.is_empty());
    assert!(state.tab_stops.is_empty());
    assert_eq!(state.to_text(), "");

    // writes into a zero-sized screen are consumed without effect
    assert_eq!(term.write(b"hello\r\n\x1b[5;5H"), 13);
    assert_eq!(term.snapshot(), state);
    assert_eq!(term.write_tracking_changes(b"a"), (1, vec![]));
}

#[test]
fn test_fresh_engine_defaults() {
    let state = Terminal::new(80, 24).snapshot();
    assert_eq!((state.cols, state.rows), (80, 24));
    assert_eq!((state.cursor_x, state.cursor_y), (0, 0));
    assert!(state.cursor_visible);
    assert!(!state.alt_screen);
    assert!(state.wrap);
    assert!(!state.insert);
    assert!(!state.reverse_video);
    assert!(!state.origin);
    assert_eq!((state.scroll_top, state.scroll_bottom), (0, 23));
    assert_eq!(state.tab_stops, vec![8, 16, 24, 32, 40, 48, 56, 64, 72]);
    assert_eq!(state.primary_buffer.len(), 24);
    assert!(state.primary_buffer.iter().all(|row| row.len() == 80));
    assert!(state
        .alternate_buffer
        .iter()
        .flatten()
        .all(|g| g.ch == ' ' && g.bg == Color::Default));
}

#[test]
fn test_resize_then_reset_matches_fresh_engine() {
    let term = Terminal::default();
    term.resize(40, 10);
    term.write(b"\x1b[1;31mjunk\x1b[?7l\x1b[4h\x1b[3g\x1b[2;5r\x1b[?1049h");
    term.reset();
    assert_eq!(term.snapshot(), Terminal::new(40, 10).snapshot());
}

#[test]
fn test_snapshot_is_stable_and_independent() {
    let term = Terminal::new(20, 5);
    term.write(b"first");
    let a = term.snapshot();
    let b = term.snapshot();
    assert_eq!(a, b);

    term.write(b"\r\nsecond");
    assert_eq!(a.line(0), "first");
    assert_eq!(a.line(1), "");
    assert_eq!(a.cursor_y, 0);

    let mut c = term.snapshot();
    c.primary_buffer[0][0].ch = 'X';
    assert_eq!(term.snapshot().line(0), "first");
}

#[test]
fn test_snapshot_json_round_trip() {
    let term = Terminal::new(10, 3);
    term.write("\x1b]2;json\x07\x1b[38;2;1;2;3mé".as_bytes());
    let state = term.snapshot();
    let json = state.to_json().unwrap();
    assert_eq!(TerminalState::from_json(&json).unwrap(), state);
}

#[test]
fn test_save_restore_cursor_round_trip() {
    let term = Terminal::new(80, 24);
    term.write(b"\x1b[5;10H\x1b[1;32m\x1b7\x1b[H\x1b[0m\x1b8X");
    let state = term.snapshot();
    assert_eq!((state.saved_cursor_x, state.saved_cursor_y), (9, 4));
    let glyph = state.glyph(9, 4).unwrap();
    assert_eq!(glyph.ch, 'X');
    assert!(glyph.style.contains(Style::BOLD));
    assert_eq!(glyph.fg, Color::BRIGHT_GREEN);
    assert_eq!((state.cursor_x, state.cursor_y), (10, 4));
}

#[test]
fn test_alternate_screen_isolation() {
    let term = Terminal::new(20, 5);
    term.write(b"main");
    term.write(b"\x1b[?1049h");

    let state = term.snapshot();
    assert!(state.alt_screen);
    assert_eq!(state.to_text(), "");
    assert_eq!((state.cursor_x, state.cursor_y), (4, 0));

    term.write(b"\x1b[Halt");
    let state = term.snapshot();
    assert_eq!(state.line(0), "alt");
    assert_eq!(state.alternate_buffer[0][0].ch, 'a');
    // primary_buffer always reports the primary grid
    assert_eq!(state.primary_buffer[0][0].ch, 'm');

    term.write(b"\x1b[?1049l");
    let state = term.snapshot();
    assert!(!state.alt_screen);
    assert_eq!(state.line(0), "main");
    assert_eq!((state.cursor_x, state.cursor_y), (4, 0));
}

#[test]
fn test_bold_brightening_resolved_per_glyph() {
    let term = Terminal::new(20, 2);
    term.write(b"\x1b[1;31mA\x1b[22mB\x1b[1;91mC\x1b[0;31mD");
    let state = term.snapshot();
    assert_eq!(state.glyph(0, 0).unwrap().fg, Color::Indexed(9));
    assert_eq!(state.glyph(1, 0).unwrap().fg, Color::Indexed(1));
    assert_eq!(state.glyph(2, 0).unwrap().fg, Color::Indexed(9));
    assert_eq!(state.glyph(3, 0).unwrap().fg, Color::Indexed(1));

    // storage keeps the raw index
    term.with_screen(|screen| {
        assert_eq!(screen.cell(0, 0).unwrap().fg, Color::Indexed(1));
    });
}

#[test]
fn test_split_utf8_matches_single_write() {
    let whole = Terminal::new(20, 2);
    whole.write("aé€😀".as_bytes());

    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let split = Terminal::new(20, 2).with_diagnostics(diagnostics.clone());
    let bytes = "aé€😀".as_bytes();

    let mut pending: Vec<u8> = Vec::new();
    for &b in bytes {
        pending.push(b);
        let consumed = split.write(&pending);
        pending.drain(..consumed);
    }
    assert!(pending.is_empty());
    assert!(diagnostics.is_empty());
    assert_eq!(split.snapshot(), whole.snapshot());
}

#[test]
fn test_incomplete_tail_not_consumed() {
    let term = Terminal::new(10, 2);
    assert_eq!(term.write(&[b'a', 0xE2, 0x82]), 1);
    assert_eq!(term.snapshot().line(0), "a");
    assert_eq!(term.write(&[0xE2, 0x82, 0xAC]), 3);
    assert_eq!(term.snapshot().line(0), "a€");
}

#[test]
fn test_invalid_bytes_skipped_and_reported() {
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let term = Terminal::new(10, 2).with_diagnostics(diagnostics.clone());
    assert_eq!(term.write(b"a\xFFb"), 3);
    assert_eq!(term.snapshot().line(0), "ab");
    assert_eq!(
        diagnostics.messages(),
        vec!["invalid UTF-8 sequence encountered".to_string()]
    );
}

#[test]
fn test_wrap_boundary() {
    let term = Terminal::new(5, 3);
    term.write(b"abcde");
    let state = term.snapshot();
    assert_eq!(state.line(0), "abcde");
    assert_eq!((state.cursor_x, state.cursor_y), (0, 1));

    term.write(b"f");
    assert_eq!(term.snapshot().line(1), "f");

    let term = Terminal::new(5, 3);
    term.write(b"\x1b[?7labcdefg");
    let state = term.snapshot();
    assert!(!state.wrap);
    assert_eq!(state.line(0), "abcdg");
    assert_eq!((state.cursor_x, state.cursor_y), (4, 0));
}

#[test]
fn test_tracking_changes_reports_cursor_rows() {
    let term = Terminal::new(10, 5);
    assert_eq!(term.write_tracking_changes(b"A\nB"), (3, vec![0, 1]));
    assert_eq!(term.write_tracking_changes(b"\x1b[4;1Hx"), (7, vec![1, 3]));
    assert_eq!(term.write_tracking_changes(b""), (0, vec![]));
}

#[test]
fn test_parse_drains_reader() {
    let term = Terminal::new(20, 3);
    // tiny buffer splits multi-byte code points across reads
    drain(&term, "héllo\r\nwörld 😀".as_bytes(), 3);
    assert_eq!(term.snapshot().to_text(), "héllo\nwörld 😀");
}

#[test]
fn test_parse_reports_stream_closed() {
    let term = Terminal::new(20, 3);
    let mut reader = Cursor::new(b"abc".to_vec());
    assert!(term.parse(&mut reader).is_ok());
    assert!(matches!(term.parse(&mut reader), Err(Error::StreamClosed)));
    assert_eq!(term.text().lines().next(), Some("abc"));
}

#[test]
fn test_from_config() {
    let config = Config::from_json(r#"{"cols": 30, "rows": 4}"#).unwrap();
    let term = Terminal::from_config(&config);
    assert_eq!(term.size(), (30, 4));
    assert_eq!(term.snapshot().scroll_bottom, 3);
}

#[test]
fn test_concurrent_writers_and_readers() {
    let term = Arc::new(Terminal::new(80, 24));
    let mut handles = Vec::new();
    for _ in 0..4 {
        let term = Arc::clone(&term);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                term.write(b"x");
            }
        }));
    }
    let reader = {
        let term = Arc::clone(&term);
        thread::spawn(move || {
            for _ in 0..50 {
                let state = term.snapshot();
                assert!(state.cursor_x < state.cols);
                assert!(state.cursor_y < state.rows);
            }
        })
    };
    for handle in handles {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    let state = term.snapshot();
    let count = state.primary_buffer.iter().flatten().filter(|g| g.ch == 'x').count();
    assert_eq!(count, 400);
    assert_eq!((state.cursor_x, state.cursor_y), (0, 5));
}
