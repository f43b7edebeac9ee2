//! # Log Record Enrichment
//!
//! Every line written through the severity macros is prefixed with call-site
//! metadata so a log file can be read without the source tree at hand:
//!
//! ```text
//! <base file name>\t<line>\t<function>\tTID: <thread id>\t<message>
//! ```
//!
//! Only the base name of the source file is kept. Compile-time paths contain
//! the build machine's directory layout, which has no business in shipped logs.
//! Both `/` and `\` count as separators regardless of the host platform, so
//! paths from either kind of build are trimmed the same way.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source location of a log statement, normally captured with [`call_site!`].
///
/// [`call_site!`]: crate::call_site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub function: &'static str,
    pub line: u32,
}

/// A message plus the metadata of the statement that produced it.
///
/// Rendered through [`Display`](fmt::Display) and discarded right away.
#[derive(Debug, Clone, Copy)]
pub struct LogDetails<'a> {
    message: &'a str,
    file: &'a str,
    function: &'a str,
    line: u32,
    thread_id: u64,
}

impl<'a> LogDetails<'a> {
    pub fn new(message: &'a str, call_site: &'a CallSite, thread_id: u64) -> Self {
        Self {
            message,
            file: call_site.file,
            function: call_site.function,
            line: call_site.line,
            thread_id,
        }
    }
}

impl fmt::Display for LogDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\tTID: {}\t{}",
            base_file_name(self.file),
            self.line,
            self.function,
            self.thread_id,
            self.message
        )
    }
}

/// Render one enriched line.
///
/// ```
/// use rtsp_logging::record::render;
///
/// let line = render("hi", "C:\\src\\app\\Server.cpp", "DoWork", 42, 7);
/// assert_eq!(line, "Server.cpp\t42\tDoWork\tTID: 7\thi");
/// ```
pub fn render(message: &str, file: &str, function: &str, line: u32, thread_id: impl fmt::Display) -> String {
    format!(
        "{}\t{}\t{}\tTID: {}\t{}",
        base_file_name(file),
        line,
        function,
        thread_id,
        message
    )
}

/// Everything after the last `/` or `\`, or the whole path when it has neither.
pub fn base_file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Small, stable, process-unique number for the calling thread.
///
/// Numbers are handed out on first use, starting at 1.
pub fn current_thread_id() -> u64 {
    THREAD_ID.with(|id| *id)
}

/// Reduce a `type_name` path produced inside [`function_name!`] to the name of
/// the enclosing function.
///
/// [`function_name!`]: crate::function_name
#[doc(hidden)]
pub fn trim_function_path(path: &'static str) -> &'static str {
    let path = path.strip_suffix("::__here").unwrap_or(path);
    path.rsplit("::")
        .find(|segment| *segment != "{{closure}}")
        .unwrap_or(path)
}

/// Name of the enclosing function, as a `&'static str`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::record::trim_function_path(__type_name_of(__here))
    }};
}

/// [`CallSite`](crate::record::CallSite) of the statement that expands it.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::record::CallSite {
            file: ::std::file!(),
            function: $crate::function_name!(),
            line: ::std::line!(),
        }
    };
}
