use rand::Rng;

/// The 22 letters of the Hebrew alphabet, without final forms.
pub const HEBREW_LETTERS: [char; 22] = [
    'א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט', 'י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ',
    'ק', 'ר', 'ש', 'ת',
];

/// Pick one letter uniformly at random.
pub fn random_letter() -> char {
    random_letter_with(&mut rand::rng())
}

pub fn random_letter_with<R: Rng>(rng: &mut R) -> char {
    HEBREW_LETTERS[rng.random_range(0..HEBREW_LETTERS.len())]
}
