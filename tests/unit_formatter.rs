use chrono::{Local, TimeZone};
use rtsp_logging::channel::{Message, PatternFormatter};
use rtsp_logging::constants::LINE_PATTERN;
use rtsp_logging::record::base_file_name;
use rtsp_logging::{render, Severity};

fn message(severity: Severity, text: &str) -> Message {
    Message {
        source: "MainServer.RtspServer".into(),
        severity,
        text: text.to_string(),
        timestamp: Local.with_ymd_and_hms(2024, 6, 1, 9, 5, 3).unwrap(),
        thread_id: 12,
    }
}

#[test]
fn test_render_field_order() {
    assert_eq!(
        render("Connected", "src/net/session.rs", "accept", 120, 4),
        "session.rs\t120\taccept\tTID: 4\tConnected"
    );
}

#[test]
fn test_render_windows_and_posix_paths() {
    let posix = render("m", "/build/src/Server.cpp", "f", 1, 1);
    let windows = render("m", "C:\\build\\src\\Server.cpp", "f", 1, 1);
    assert_eq!(posix, windows);
    assert!(posix.starts_with("Server.cpp\t"));
}

#[test]
fn test_render_path_without_separator() {
    assert_eq!(render("m", "main.rs", "main", 7, 2), "main.rs\t7\tmain\tTID: 2\tm");
    assert_eq!(base_file_name("dir/"), "");
}

#[test]
fn test_render_message_is_verbatim() {
    let messages = ["", "tabs\tinside", "50% done", "{braces}", "line\nbreak", "音频 🎵"];
    for text in messages {
        let line = render(text, "a.rs", "f", 3, 9);
        let prefix = "a.rs\t3\tf\tTID: 9\t";
        assert_eq!(&line[..prefix.len()], prefix);
        assert_eq!(&line[prefix.len()..], text);
    }
}

#[test]
fn test_render_thread_id_accepts_any_display() {
    assert_eq!(render("m", "a.rs", "f", 1, "main"), "a.rs\t1\tf\tTID: main\tm");
    assert_eq!(render("m", "a.rs", "f", 0, u64::MAX), format!("a.rs\t0\tf\tTID: {}\tm", u64::MAX));
}

#[test]
fn test_line_pattern_output() {
    let formatter = PatternFormatter::new(LINE_PATTERN);
    assert_eq!(
        formatter.format(&message(Severity::Warning, "Server.cpp\t42\tDoWork\tTID: 12\tdisk low")),
        "2024-06-01 09:05:03 Warning\t\tServer.cpp\t42\tDoWork\tTID: 12\tdisk low\n"
    );
}

#[test]
fn test_severity_names_in_lines() {
    let formatter = PatternFormatter::new("%p");
    let names: Vec<String> = Severity::ALL
        .iter()
        .map(|severity| formatter.format(&message(*severity, "")))
        .collect();
    assert_eq!(names, vec!["Fatal", "Error", "Warning", "Information", "Debug", "Trace"]);
}

#[test]
fn test_pattern_specifiers() {
    let formatter = PatternFormatter::new("[%s|%I|%i] 100%% %q %t%");
    assert_eq!(
        formatter.format(&message(Severity::Error, "boom")),
        "[MainServer.RtspServer|12|000] 100% %q boom%"
    );
    assert_eq!(formatter.pattern(), "[%s|%I|%i] 100%% %q %t%");
}
