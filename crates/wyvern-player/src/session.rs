//! Close/pause toggle: first press frees the pointer, second press quits.

/// What the adapter should do in response to a close-action press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseResponse {
    /// Release the pointer and keep running.
    ReleasePointer,
    /// Terminate the application.
    Quit,
}

/// Resolve a close-action press against the current pointer capture state.
///
/// This is a two-state toggle, not a menu: while captured the press frees
/// the pointer; once free, the next press ends the process. No confirmation
/// step exists.
#[must_use]
pub fn close_response(pointer_captured: bool) -> CloseResponse {
    if pointer_captured {
        CloseResponse::ReleasePointer
    } else {
        CloseResponse::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_while_captured_releases() {
        assert_eq!(close_response(true), CloseResponse::ReleasePointer);
    }

    #[test]
    fn test_press_while_free_quits() {
        assert_eq!(close_response(false), CloseResponse::Quit);
    }

    #[test]
    fn test_exactly_two_presses_quit_from_captured() {
        // Simulate the adapter's capture flag across the toggle sequence.
        let mut captured = true;
        let mut responses = Vec::new();
        for _ in 0..2 {
            let response = close_response(captured);
            if response == CloseResponse::ReleasePointer {
                captured = false;
            }
            responses.push(response);
        }
        assert_eq!(
            responses,
            vec![CloseResponse::ReleasePointer, CloseResponse::Quit]
        );
    }
}
