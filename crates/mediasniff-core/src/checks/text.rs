//! Plain text formats: HLS playlists and SubRip subtitles

use super::require;
use crate::bytes::UTF8_BOM;

const HLS_SIGNATURE: &[u8] = b"#EXTM3U";

/// Tags that only appear in HLS playlists, not generic M3U.
const HLS_TAGS: [&[u8]; 3] = [
    b"#EXT-X-STREAM-INF:",
    b"#EXT-X-TARGETDURATION:",
    b"#EXT-X-MEDIA-SEQUENCE:",
];

/// `#EXTM3U` followed somewhere by an HLS-specific tag.
pub fn check_hls(buf: &[u8]) -> bool {
    let Some(rest) = buf.strip_prefix(HLS_SIGNATURE) else {
        return false;
    };
    (0..rest.len())
        .filter(|&i| rest[i] == b'#')
        .any(|i| HLS_TAGS.iter().any(|tag| rest[i..].starts_with(tag)))
}

/// Forward-only cursor over subtitle text.
struct TextCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> TextCursor<'a> {
    fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Skip leading whitespace, then consume up to `max_digits` digits.
    ///
    /// At least one digit is required. Reaching the end of the buffer after
    /// a digit is fine.
    fn number(&mut self, max_digits: usize) -> Option<()> {
        while is_space(self.peek()?) {
            self.pos += 1;
        }
        let digits = self.buf[self.pos..]
            .iter()
            .take(max_digits)
            .take_while(|b| b.is_ascii_digit())
            .count();
        self.pos += digits;
        require(digits > 0)
    }

    /// Consume one byte, which must be one of `expected`.
    fn one_of(&mut self, expected: &[u8]) -> Option<()> {
        let c = self.peek()?;
        self.pos += 1;
        require(expected.contains(&c))
    }

    fn literal(&mut self, expected: &[u8]) -> Option<()> {
        expected.iter().try_for_each(|&c| self.one_of(&[c]))
    }

    /// `H:MM:SS,mmm`, also accepting `.` before the milliseconds.
    fn timestamp(&mut self) -> Option<()> {
        self.number(100)?;
        self.one_of(b":")?;
        self.number(2)?;
        self.one_of(b":")?;
        self.number(2)?;
        self.one_of(b",.")?;
        self.number(3)
    }
}

/// C `isspace` in the default locale.
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// SubRip: a cue number line followed by a `start --> end` timing line.
pub fn check_srt(buf: &[u8]) -> bool {
    if buf.len() <= 20 {
        return false;
    }
    let start = if buf.starts_with(UTF8_BOM) { UTF8_BOM.len() } else { 0 };
    srt_first_cue(&mut TextCursor::new(buf, start)).is_some()
}

fn srt_first_cue(cursor: &mut TextCursor<'_>) -> Option<()> {
    cursor.number(100)?;
    cursor.one_of(b"\n\r")?;
    while matches!(cursor.peek(), Some(b'\n' | b'\r')) {
        cursor.pos += 1;
    }

    // 00:00:10,500 --> 00:00:13,000
    cursor.timestamp()?;
    cursor.literal(b" --> ")?;
    cursor.timestamp()
}
