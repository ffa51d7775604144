//! Block letter fonts for the flurry label.
//!
//! Glyphs are drawn with full block characters, seven lines tall. The
//! collision mask rasterizes them, so every row of a glyph must have the
//! same width.

/// Height of every glyph in lines.
pub const GLYPH_HEIGHT: usize = 7;

/// Blank columns inserted between adjacent glyphs.
pub const GLYPH_SPACING: usize = 1;

type Glyph = [&'static str; GLYPH_HEIGHT];

/// Large 7-segment style digits (7 lines tall, 6 chars wide)
pub const DIGITS: [Glyph; 10] = [
    // 0
    [
        " ████ ",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // 1
    [
        "  ██  ",
        " ███  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        " ████ ",
    ],
    // 2
    [
        " ████ ",
        "██  ██",
        "    ██",
        "  ██  ",
        " ██   ",
        "██    ",
        "██████",
    ],
    // 3
    [
        " ████ ",
        "██  ██",
        "    ██",
        "  ███ ",
        "    ██",
        "██  ██",
        " ████ ",
    ],
    // 4
    [
        "██  ██",
        "██  ██",
        "██  ██",
        "██████",
        "    ██",
        "    ██",
        "    ██",
    ],
    // 5
    [
        "██████",
        "██    ",
        "██    ",
        "█████ ",
        "    ██",
        "██  ██",
        " ████ ",
    ],
    // 6
    [
        " ████ ",
        "██    ",
        "██    ",
        "█████ ",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // 7
    [
        "██████",
        "    ██",
        "   ██ ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
    ],
    // 8
    [
        " ████ ",
        "██  ██",
        "██  ██",
        " ████ ",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // 9
    [
        " ████ ",
        "██  ██",
        "██  ██",
        " █████",
        "    ██",
        "    ██",
        " ████ ",
    ],
];

/// Letters A through Z.
pub const LETTERS: [Glyph; 26] = [
    // A
    [
        " ████ ",
        "██  ██",
        "██  ██",
        "██████",
        "██  ██",
        "██  ██",
        "██  ██",
    ],
    // B
    [
        "█████ ",
        "██  ██",
        "██  ██",
        "█████ ",
        "██  ██",
        "██  ██",
        "█████ ",
    ],
    // C
    [
        " ████ ",
        "██  ██",
        "██    ",
        "██    ",
        "██    ",
        "██  ██",
        " ████ ",
    ],
    // D
    [
        "█████ ",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "█████ ",
    ],
    // E
    [
        "██████",
        "██    ",
        "██    ",
        "█████ ",
        "██    ",
        "██    ",
        "██████",
    ],
    // F
    [
        "██████",
        "██    ",
        "██    ",
        "█████ ",
        "██    ",
        "██    ",
        "██    ",
    ],
    // G
    [
        " ████ ",
        "██  ██",
        "██    ",
        "██ ███",
        "██  ██",
        "██  ██",
        " █████",
    ],
    // H
    [
        "██  ██",
        "██  ██",
        "██  ██",
        "██████",
        "██  ██",
        "██  ██",
        "██  ██",
    ],
    // I
    [
        "██████",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "██████",
    ],
    // J
    [
        "  ████",
        "    ██",
        "    ██",
        "    ██",
        "    ██",
        "██  ██",
        " ████ ",
    ],
    // K
    [
        "██  ██",
        "██ ██ ",
        "████  ",
        "███   ",
        "████  ",
        "██ ██ ",
        "██  ██",
    ],
    // L
    [
        "██    ",
        "██    ",
        "██    ",
        "██    ",
        "██    ",
        "██    ",
        "██████",
    ],
    // M
    [
        "██   ██",
        "███ ███",
        "███████",
        "██ █ ██",
        "██   ██",
        "██   ██",
        "██   ██",
    ],
    // N
    [
        "██  ██",
        "███ ██",
        "██████",
        "██ ███",
        "██  ██",
        "██  ██",
        "██  ██",
    ],
    // O
    [
        " ████ ",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // P
    [
        "█████ ",
        "██  ██",
        "██  ██",
        "█████ ",
        "██    ",
        "██    ",
        "██    ",
    ],
    // Q
    [
        " ████ ",
        "██  ██",
        "██  ██",
        "██  ██",
        "██ ███",
        "██  ██",
        " ███ █",
    ],
    // R
    [
        "█████ ",
        "██  ██",
        "██  ██",
        "█████ ",
        "████  ",
        "██ ██ ",
        "██  ██",
    ],
    // S
    [
        " ████ ",
        "██  ██",
        "██    ",
        " ████ ",
        "    ██",
        "██  ██",
        " ████ ",
    ],
    // T
    [
        "██████",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
    ],
    // U
    [
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // V
    [
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
        "  ██  ",
    ],
    // W
    [
        "██   ██",
        "██   ██",
        "██   ██",
        "██ █ ██",
        "███████",
        "███ ███",
        "██   ██",
    ],
    // X
    [
        "██  ██",
        "██  ██",
        " ████ ",
        "  ██  ",
        " ████ ",
        "██  ██",
        "██  ██",
    ],
    // Y
    [
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
    ],
    // Z
    [
        "██████",
        "    ██",
        "   ██ ",
        "  ██  ",
        " ██   ",
        "██    ",
        "██████",
    ],
];

/// Word gap.
pub const SPACE: Glyph = ["   ", "   ", "   ", "   ", "   ", "   ", "   "];

/// Hyphen.
pub const HYPHEN: Glyph = ["    ", "    ", "    ", "████", "    ", "    ", "    "];

/// Full stop.
pub const PERIOD: Glyph = ["  ", "  ", "  ", "  ", "  ", "██", "██"];

/// Exclamation mark.
pub const EXCLAMATION: Glyph = ["██", "██", "██", "██", "██", "  ", "██"];

/// Drawn for characters the font does not cover.
pub const UNKNOWN: Glyph = [
    " ████ ",
    "██  ██",
    "    ██",
    "  ██  ",
    "  ██  ",
    "      ",
    "  ██  ",
];

/// Look up the glyph for a character. Lowercase letters use the uppercase
/// glyph.
pub fn glyph(ch: char) -> &'static Glyph {
    match ch.to_ascii_uppercase() {
        c @ 'A'..='Z' => &LETTERS[(c as u8 - b'A') as usize],
        c @ '0'..='9' => &DIGITS[(c as u8 - b'0') as usize],
        ' ' => &SPACE,
        '-' => &HYPHEN,
        '.' => &PERIOD,
        '!' => &EXCLAMATION,
        _ => &UNKNOWN,
    }
}

/// Build large block art for a label.
///
/// # Returns
/// A vector of [`GLYPH_HEIGHT`] strings of equal character width, or an
/// empty vector for an empty label.
pub fn build_label_art(label: &str) -> Vec<String> {
    if label.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(GLYPH_HEIGHT);
    for row in 0..GLYPH_HEIGHT {
        let mut line = String::new();
        for (i, ch) in label.chars().enumerate() {
            if i > 0 {
                line.extend(std::iter::repeat_n(' ', GLYPH_SPACING));
            }
            line.push_str(glyph(ch)[row]);
        }
        lines.push(line);
    }

    lines
}

/// Width in character cells of the art for `label`.
pub fn label_art_width(label: &str) -> usize {
    let glyphs: usize = label
        .chars()
        .map(|ch| glyph(ch)[0].chars().count())
        .sum();
    let gaps = label.chars().count().saturating_sub(1) * GLYPH_SPACING;
    glyphs + gaps
}
