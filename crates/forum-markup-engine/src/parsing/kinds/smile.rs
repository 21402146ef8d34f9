/// Smiles with a close emoji equivalent. Others render as images.
const EMOJI: &[(&str, &str)] = &[
    ("smile", "🙂"),
    ("happy", "😊"),
    ("biggrin", "😁"),
    ("laugh", "😆"),
    ("lol", "😂"),
    ("wink", "😉"),
    ("tongue", "😛"),
    ("cool", "😎"),
    ("sad", "🙁"),
    ("cry", "😢"),
    ("angry", "😠"),
    ("mad", "😡"),
    ("ohmy", "😮"),
    ("blush", "😳"),
    ("thumbup", "👍"),
    ("thumbdown", "👎"),
    ("beer", "🍺"),
    ("rose", "🌹"),
];

/// Emoji for a smile name (case-insensitive).
pub fn emoji(name: &str) -> Option<&'static str> {
    let name = name.trim();
    EMOJI
        .iter()
        .find(|(smile, _)| smile.eq_ignore_ascii_case(name))
        .map(|(_, emoji)| *emoji)
}
