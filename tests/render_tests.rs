//! End-to-end rendering tests: a bar writing into an in-memory sink.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use linebar::{ProgressBar, Theme};

mod common;
use common::SharedBuffer;

fn bar_into(max: i64, out: &SharedBuffer) -> linebar::ProgressBarBuilder {
    ProgressBar::builder(max).with_writer(out.clone())
}

#[test]
fn test_width_ten() {
    let out = SharedBuffer::new();
    let bar = bar_into(100, &out).with_width(10).build();

    bar.add(10).unwrap();

    assert_eq!(out.last_line(), "  10% |█         |  [0s:0s]");
}

#[test]
fn test_custom_theme() {
    let out = SharedBuffer::new();
    let bar = bar_into(10, &out)
        .with_width(10)
        .with_theme(Theme {
            saucer: "#".into(),
            saucer_padding: "-".into(),
            bar_start: ">".into(),
            bar_end: "<".into(),
            ..Theme::default()
        })
        .build();

    bar.add(5).unwrap();

    assert_eq!(out.last_line().trim(), "50% >#####-----<  [0s:0s]");
}

#[test]
fn test_rate_and_prediction() {
    let out = SharedBuffer::new();
    let bar = bar_into(100, &out).with_width(10).with_show_its(true).build();

    thread::sleep(Duration::from_secs(1));
    bar.add(10).unwrap();

    let line = out.last_line();
    assert!(line.starts_with("  10% |█         | ("), "got {line:?}");
    assert!(line.contains("(10 it/s)"), "got {line:?}");
    assert!(line.ends_with("[1s:9s]"), "got {line:?}");
}

#[test]
fn test_redraws_only_on_percent_change() {
    let out = SharedBuffer::new();
    let bar = bar_into(1000, &out).build();

    for _ in 0..1000 {
        bar.add(1).unwrap();
    }

    assert_eq!(out.draws(), 100);
    assert!(out.last_line().starts_with(" 100% |"));
}

#[test]
fn test_throttle_still_draws_completion() {
    let out = SharedBuffer::new();
    let bar = bar_into(1000, &out)
        .with_throttle(Duration::from_secs(60))
        .build();

    for _ in 0..1000 {
        bar.add(1).unwrap();
    }

    assert_eq!(out.draws(), 1);
    assert!(bar.is_finished());
}

#[test]
fn test_rate_display_bypasses_throttle() {
    let out = SharedBuffer::new();
    let bar = bar_into(1000, &out)
        .with_throttle(Duration::from_secs(60))
        .with_show_its(true)
        .build();

    for _ in 0..5 {
        bar.add(1).unwrap();
    }

    assert_eq!(out.draws(), 5, "every advance is drawn");
}

#[test]
fn test_byte_hint_bypasses_throttle() {
    let out = SharedBuffer::new();
    let bar = bar_into(1000, &out)
        .with_throttle(Duration::from_secs(60))
        .with_max_bytes(1 << 20)
        .build();

    for _ in 0..5 {
        bar.add(1).unwrap();
    }

    assert_eq!(out.draws(), 5, "every advance is drawn");
    assert!(out.last_line().contains("/s)"));
}

#[test]
fn test_concurrent_adds_are_lossless() {
    let out = SharedBuffer::new();
    let bar = bar_into(1000, &out).build();

    let handles: Vec<_> = (0..900)
        .map(|_| {
            let bar = bar.clone();
            thread::spawn(move || bar.add(1).unwrap())
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(bar.current(), 900);
    assert!(!bar.is_finished());
    assert!(out.last_line().starts_with("  90% |"));
}

#[test]
fn test_finish_fires_callback_once() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    let out = SharedBuffer::new();
    let bar = bar_into(10, &out)
        .with_on_completion(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    bar.add(4).unwrap();
    bar.finish().unwrap();
    bar.finish().unwrap();

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(bar.current(), 10);
    assert!(out.last_line().starts_with(" 100% |"));
}

#[test]
fn test_clear_on_finish_leaves_blank_line() {
    let out = SharedBuffer::new();
    let bar = bar_into(10, &out).with_clear_on_finish(true).build();

    bar.add(5).unwrap();
    bar.finish().unwrap();

    assert_eq!(out.last_line(), "");
    assert!(!out.contents().contains("100%"));
}

#[test]
fn test_invisible_bar_writes_nothing() {
    let out = SharedBuffer::new();
    let bar = bar_into(10, &out)
        .with_visible(false)
        .with_render_blank_state(true)
        .build();

    bar.add(10).unwrap();
    bar.clear().unwrap();

    assert!(bar.is_finished());
    assert_eq!(out.contents(), "");
}

#[test]
fn test_render_blank_state() {
    let out = SharedBuffer::new();
    let _bar = bar_into(10, &out)
        .with_width(4)
        .with_render_blank_state(true)
        .build();

    assert_eq!(out.last_line(), "   0% |    |  [0s:0s]");
}

#[test]
fn test_color_codes_emit_escapes() {
    let out = SharedBuffer::new();
    let bar = bar_into(10, &out)
        .with_color_codes(true)
        .with_description("[red]copying[reset] ")
        .build();

    bar.add(5).unwrap();

    let contents = out.contents();
    assert!(contents.contains("\u{1b}[31m"), "got {contents:?}");
    assert!(!contents.contains("[red]"));
}

#[test]
fn test_erase_covers_previous_line() {
    let out = SharedBuffer::new();
    let bar = bar_into(100, &out).with_description("long description ").build();

    bar.add(1).unwrap();
    let first = out.last_line();
    bar.describe("x ");
    bar.add(1).unwrap();

    let expected_blank = format!("\r{}\r", " ".repeat(first.chars().count()));
    assert!(out.contents().contains(&expected_blank));
    assert!(out.last_line().starts_with("x    2% |"));
}

#[test]
fn test_indeterminate_spinner_with_count() {
    let out = SharedBuffer::new();
    let bar = bar_into(-1, &out)
        .with_description("scanning")
        .with_show_count(true)
        .with_spinner_frames(["a", "b"])
        .build();

    bar.add(3).unwrap();
    let line = out.last_line();
    assert!(line.starts_with("a ") || line.starts_with("b "), "got {line:?}");
    assert!(line.contains("scanning (3/?) [0s]"), "got {line:?}");

    bar.finish().unwrap();
    assert_eq!(out.last_line(), "scanning (3/?) [0s]");
}

#[test]
fn test_byte_bar_reports_humanized_rate() {
    let out = SharedBuffer::new();
    let bar = bar_into(2048, &out)
        .with_show_bytes(true)
        .with_show_count(true)
        .with_binary_prefixes(true)
        .build();

    bar.add(1024).unwrap();

    let line = out.last_line();
    assert!(line.contains("1.00 KiB/2.00 KiB"), "got {line:?}");
    assert!(line.contains("/s)"), "got {line:?}");
}

#[test]
fn test_state_snapshot() {
    let bar = ProgressBar::builder(200)
        .with_visible(false)
        .with_max_bytes(2000)
        .build();

    bar.add(50).unwrap();
    let state = bar.state();

    assert!((state.current_percent - 0.25).abs() < f64::EPSILON);
    assert!((state.current_bytes - 500.0).abs() < f64::EPSILON);
    assert_eq!(state.max_bytes, 2000);
}
