use lazy_static::lazy_static;
use regex::Regex;

/// Longest chunk the backend accepts in one request, in characters.
pub const MAX_CHARS: usize = 100;

lazy_static! {
    // Sentence and clause punctuation across the scripts the games use.
    static ref BREAK_REGEX: Regex = Regex::new(r"[.!?;:,¿¡…。、،؛؟׃\n]+").unwrap();
}

/// Split text into chunks of at most [`MAX_CHARS`] characters.
///
/// Cuts after punctuation first, then between words. A single word longer
/// than the limit is cut hard.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut last_end = 0;

    for m in BREAK_REGEX.find_iter(text) {
        if !is_break(text, m.start(), m.end()) {
            continue;
        }
        push_piece(&text[last_end..m.end()], &mut chunks);
        last_end = m.end();
    }
    push_piece(&text[last_end..], &mut chunks);

    chunks
}

/// Whether the punctuation at `start..end` ends a chunk.
///
/// `.` and `,` only break before whitespace or the end of the text, and `:`
/// never breaks after a digit, so `3.14`, `1,000` and `10:30` stay whole.
fn is_break(text: &str, start: usize, end: usize) -> bool {
    let mark = &text[start..end];

    if mark.chars().all(|c| c == '.' || c == ',') {
        text[end..].chars().next().map_or(true, char::is_whitespace)
    } else if mark.chars().all(|c| c == ':') {
        !text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit())
    } else {
        true
    }
}

fn push_piece(piece: &str, chunks: &mut Vec<String>) {
    let words: Vec<&str> = piece.split_whitespace().collect();
    if words.iter().all(|w| is_punctuation(w)) {
        // Stray punctuation joins the previous chunk when it fits.
        if let (Some(last), false) = (chunks.last_mut(), words.is_empty()) {
            let joined = words.concat();
            if last.chars().count() + joined.chars().count() <= MAX_CHARS {
                last.push_str(&joined);
            }
        }
        return;
    }

    let mut current = String::new();
    for word in words {
        let word_len = word.chars().count();

        if word_len > MAX_CHARS {
            flush(&mut current, chunks);
            let chars: Vec<char> = word.chars().collect();
            for part in chars.chunks(MAX_CHARS) {
                chunks.push(part.iter().collect());
            }
            continue;
        }

        let current_len = current.chars().count();
        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > MAX_CHARS {
            flush(&mut current, chunks);
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    flush(&mut current, chunks);
}

fn flush(current: &mut String, chunks: &mut Vec<String>) {
    if !current.is_empty() {
        chunks.push(std::mem::take(current));
    }
}

fn is_punctuation(word: &str) -> bool {
    word.chars().all(|c| !c.is_alphanumeric())
}
