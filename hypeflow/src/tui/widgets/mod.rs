// TUI widget modules for each panel.

pub mod grader;
pub mod market;
pub mod oracle;
pub mod portfolio;
pub mod quit_confirm;
pub mod stats;
pub mod status_bar;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Spinner glyph for the given render tick. Advances every few frames.
pub fn spinner(tick: u64) -> &'static str {
    SPINNER[(tick / 4 % SPINNER.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_cycles() {
        assert_eq!(spinner(0), spinner(3));
        assert_ne!(spinner(0), spinner(4));
        assert_eq!(spinner(0), spinner(16));
    }
}
