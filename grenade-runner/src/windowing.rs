//! Capabilities for finding and signalling another process's window.
//!
//! The guard only needs two things from the windowing system: locate a
//! top-level window by exact class name and title, and post it a message
//! without waiting. Each platform backend implements these traits; tests use
//! in-memory fakes.

use crate::Result;
use crate::models::{WindowHandle, WindowProbe, WindowQuery};

/// Finds a top-level window in the current session.
pub trait WindowLocator {
    /// Returns the first window matching `query`, if any.
    ///
    /// Windows whose class name or title cannot be read are skipped. The
    /// enumeration order is defined by the platform.
    fn find_window(&self, query: &WindowQuery) -> Option<WindowHandle>;
}

/// Delivers a message to a window owned by any process.
pub trait WindowMessenger {
    /// Queues `message` for `window` and returns immediately.
    ///
    /// Delivery and handling are not confirmed.
    fn post_message(&self, window: WindowHandle, message: u32) -> Result<()>;
}

impl<T: WindowLocator + ?Sized> WindowLocator for &T {
    fn find_window(&self, query: &WindowQuery) -> Option<WindowHandle> {
        (**self).find_window(query)
    }
}

impl<T: WindowMessenger + ?Sized> WindowMessenger for &T {
    fn post_message(&self, window: WindowHandle, message: u32) -> Result<()> {
        (**self).post_message(window, message)
    }
}

/// Returns the handle of the first probe matching `query`.
///
/// Stops consuming `probes` as soon as a match is found.
pub fn first_match<I>(probes: I, query: &WindowQuery) -> Option<WindowHandle>
where
    I: IntoIterator<Item = WindowProbe>,
{
    probes
        .into_iter()
        .find(|probe| query.matches(probe.class_name.as_deref(), probe.title.as_deref()))
        .map(|probe| probe.handle)
}

/// Decodes a UTF-16 buffer filled by a bounded text read.
///
/// `len` is the number of units the read reported. Zero means the read failed
/// or the text is empty; both count as unreadable. Text that is not valid
/// UTF-16 is unreadable as well.
pub fn decode_window_text(buffer: &[u16], len: usize) -> Option<String> {
    if len == 0 {
        return None;
    }
    let end = len.min(buffer.len());
    String::from_utf16(&buffer[..end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(id: isize, class: Option<&str>, title: Option<&str>) -> WindowProbe {
        WindowProbe::new(WindowHandle(id), class, title)
    }

    #[test]
    fn first_match_returns_earliest_matching_window() {
        let query = WindowQuery::new("C", "T");
        let probes = vec![
            probe(1, Some("Other"), Some("T")),
            probe(2, Some("C"), Some("T")),
            probe(3, Some("C"), Some("T")),
        ];
        assert_eq!(first_match(probes, &query), Some(WindowHandle(2)));
    }

    #[test]
    fn first_match_requires_both_fields() {
        let query = WindowQuery::new("C", "T");
        let probes = vec![
            probe(1, Some("C"), Some("Other")),
            probe(2, Some("Other"), Some("T")),
        ];
        assert_eq!(first_match(probes, &query), None);
    }

    #[test]
    fn first_match_is_case_sensitive() {
        let query = WindowQuery::new("FLUTTER_RUNNER_WIN32_WINDOW", "Grenade Helper");
        let probes = vec![
            probe(1, Some("flutter_runner_win32_window"), Some("Grenade Helper")),
            probe(2, Some("FLUTTER_RUNNER_WIN32_WINDOW"), Some("grenade helper")),
            probe(3, Some("FLUTTER_RUNNER_WIN32_WINDOW"), Some("Grenade Helper ")),
        ];
        assert_eq!(first_match(probes, &query), None);
    }

    #[test]
    fn first_match_skips_unreadable_windows() {
        let query = WindowQuery::new("C", "T");
        let probes = vec![
            probe(1, None, Some("T")),
            probe(2, Some("C"), None),
            probe(3, Some("C"), Some("T")),
        ];
        assert_eq!(first_match(probes, &query), Some(WindowHandle(3)));
    }

    #[test]
    fn first_match_stops_at_the_match() {
        let query = WindowQuery::new("C", "T");
        let mut seen = 0;
        let probes = [
            probe(1, Some("C"), Some("T")),
            probe(2, Some("C"), Some("T")),
        ]
        .into_iter()
        .inspect(|_| seen += 1);

        assert_eq!(first_match(probes, &query), Some(WindowHandle(1)));
        assert_eq!(seen, 1);
    }

    #[test]
    fn decode_window_text_uses_reported_length() {
        let mut buffer = [0u16; 8];
        for (slot, unit) in buffer.iter_mut().zip("Title".encode_utf16()) {
            *slot = unit;
        }
        assert_eq!(decode_window_text(&buffer, 5).as_deref(), Some("Title"));
        assert_eq!(decode_window_text(&buffer, 3).as_deref(), Some("Tit"));
    }

    #[test]
    fn decode_window_text_treats_failures_as_unreadable() {
        assert_eq!(decode_window_text(&[0u16; 4], 0), None);
        // Lone surrogate.
        assert_eq!(decode_window_text(&[0xD800, 0x0041], 2), None);
    }
}
