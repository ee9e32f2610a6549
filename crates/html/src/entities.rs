/// Decode the character references that show up in form markup.
///
/// - Named references from [`NAMED`], only when terminated by `;`.
/// - Numeric references `&#123;` and `&#x1F4A9;`, only when well-formed and `;`-terminated.
/// - Unknown names, invalid scalar values and malformed numerics are copied through unchanged.
///
/// This is not the full HTML5 named-reference table.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    if memchr::memchr(b'&', bytes).is_none() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut copy_start = 0;
    let mut i = 0;

    while let Some(rel) = memchr::memchr(b'&', &bytes[i..]) {
        let amp = i + rel;
        out.push_str(&s[copy_start..amp]);

        match decode_one(s, amp) {
            Some((ch, consumed)) => {
                out.push(ch);
                i = amp + consumed;
            }
            None => {
                out.push('&');
                i = amp + 1;
            }
        }
        copy_start = i;
    }

    out.push_str(&s[copy_start..]);
    out
}

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("hellip", '\u{2026}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("laquo", '\u{00AB}'),
    ("raquo", '\u{00BB}'),
    ("euro", '\u{20AC}'),
    ("pound", '\u{00A3}'),
    ("yen", '\u{00A5}'),
    ("cent", '\u{00A2}'),
    ("sect", '\u{00A7}'),
    ("deg", '\u{00B0}'),
    ("times", '\u{00D7}'),
    ("divide", '\u{00F7}'),
    ("middot", '\u{00B7}'),
];

const MAX_NAME_LEN: usize = 8;
const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode the reference starting at `amp`; returns the char and the bytes consumed.
fn decode_one(s: &str, amp: usize) -> Option<(char, usize)> {
    let rest = &s.as_bytes()[amp + 1..];
    let semi = rest.iter().take(MAX_NAME_LEN + 2).position(|&b| b == b';')?;
    let body = &s[amp + 1..amp + 1 + semi];
    let consumed = semi + 2;

    if let Some(num) = body.strip_prefix('#') {
        let (digits, radix, max) = match num.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16, MAX_HEX_DIGITS),
            None => (num, 10, MAX_DEC_DIGITS),
        };
        if digits.is_empty()
            || digits.len() > max
            || !digits.bytes().all(|b| (b as char).is_digit(radix))
        {
            return None;
        }
        let ch = u32::from_str_radix(digits, radix)
            .ok()
            .and_then(char::from_u32)?;
        return Some((ch, consumed));
    }

    NAMED
        .iter()
        .find(|(name, _)| *name == body)
        .map(|&(_, ch)| (ch, consumed))
}
