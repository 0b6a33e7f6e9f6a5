//! ANSI palette for the CLI.
//!
//! Deliberately small: three status colors, bold for structure, dim for
//! everything secondary. Glyph prefixes carry the meaning when colors are
//! stripped.

use anstyle::{AnsiColor, Color, Effects, Style};

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Green, confirmations and healthy checks.
pub(crate) const OK: Style = fg(AnsiColor::Green);

/// Red, failures.
pub(crate) const FAIL: Style = fg(AnsiColor::Red);

/// Yellow, cautions and empty results.
pub(crate) const CAUTION: Style = fg(AnsiColor::Yellow);

/// Bold, section headers and field labels.
pub(crate) const EMPHASIS: Style = Style::new().effects(Effects::BOLD);

/// Dimmed, secondary detail and usage hints.
pub(crate) const MUTED: Style = Style::new().effects(Effects::DIMMED);

/// Clap help styling drawn from the same palette.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    let accent = fg(AnsiColor::Cyan);
    clap::builder::Styles::styled()
        .header(OK.effects(Effects::BOLD))
        .usage(OK.effects(Effects::BOLD))
        .literal(accent)
        .placeholder(accent)
        .error(FAIL.effects(Effects::BOLD))
        .valid(OK)
        .invalid(CAUTION)
}
