//! Code page 950 rows that differ from the WHATWG Big5 table.
//!
//! `encoding_rs` decodes Big5 as Big5-HKSCS. HaoDoo books are written in
//! cp950, which puts kana, Cyrillic and enclosed numbers at `C6A1..=C7FC`
//! and box drawing at `F9D6..=F9FE`, and leaves the rest of `C6A1..=C8FE`
//! unassigned.

/// Runs of consecutive cp950 codes: the first code and the characters from it on.
const RUNS: [(u16, &[char]); 4] = [
    (
        0xC6A1,
        &[
            'ヾ', 'ゝ', 'ゞ', '々', 'ぁ', 'あ', 'ぃ', 'い', 'ぅ', 'う', 'ぇ', 'え',
            'ぉ', 'お', 'か', 'が', 'き', 'ぎ', 'く', 'ぐ', 'け', 'げ', 'こ', 'ご',
            'さ', 'ざ', 'し', 'じ', 'す', 'ず', 'せ', 'ぜ', 'そ', 'ぞ', 'た', 'だ',
            'ち', 'ぢ', 'っ', 'つ', 'づ', 'て', 'で', 'と', 'ど', 'な', 'に', 'ぬ',
            'ね', 'の', 'は', 'ば', 'ぱ', 'ひ', 'び', 'ぴ', 'ふ', 'ぶ', 'ぷ', 'へ',
            'べ', 'ぺ', 'ほ', 'ぼ', 'ぽ', 'ま', 'み', 'む', 'め', 'も', 'ゃ', 'や',
            'ゅ', 'ゆ', 'ょ', 'よ', 'ら', 'り', 'る', 'れ', 'ろ', 'ゎ', 'わ', 'ゐ',
            'ゑ', 'を', 'ん', 'ァ', 'ア', 'ィ', 'イ', 'ゥ', 'ウ', 'ェ',
        ],
    ),
    (
        0xC740,
        &[
            'エ', 'ォ', 'オ', 'カ', 'ガ', 'キ', 'ギ', 'ク', 'グ', 'ケ', 'ゲ', 'コ',
            'ゴ', 'サ', 'ザ', 'シ', 'ジ', 'ス', 'ズ', 'セ', 'ゼ', 'ソ', 'ゾ', 'タ',
            'ダ', 'チ', 'ヂ', 'ッ', 'ツ', 'ヅ', 'テ', 'デ', 'ト', 'ド', 'ナ', 'ニ',
            'ヌ', 'ネ', 'ノ', 'ハ', 'バ', 'パ', 'ヒ', 'ビ', 'ピ', 'フ', 'ブ', 'プ',
            'ヘ', 'ベ', 'ペ', 'ホ', 'ボ', 'ポ', 'マ', 'ミ', 'ム', 'メ', 'モ', 'ャ',
            'ヤ', 'ュ', 'ユ',
        ],
    ),
    (
        0xC7A1,
        &[
            'ョ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ヮ', 'ワ', 'ヰ', 'ヱ', 'ヲ',
            'ン', 'ヴ', 'ヵ', 'ヶ', 'Д', 'Е', 'Ё', 'Ж', 'З', 'И', 'Й', 'К',
            'Л', 'М', 'У', 'Ф', 'Х', 'Ц', 'Ч', 'Ш', 'Щ', 'Ъ', 'Ы', 'Ь',
            'Э', 'Ю', 'Я', 'а', 'б', 'в', 'г', 'д', 'е', 'ё', 'ж', 'з',
            'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п', 'р', 'с', 'т', 'у',
            'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
            '①', '②', '③', '④', '⑤', '⑥', '⑦', '⑧', '⑨', '⑩', '⑴', '⑵',
            '⑶', '⑷', '⑸', '⑹', '⑺', '⑻', '⑼', '⑽',
        ],
    ),
    (
        0xF9D6,
        &[
            '碁', '銹', '裏', '墻', '恒', '粧', '嫺', '╔', '╦', '╗', '╠', '╬',
            '╣', '╚', '╩', '╝', '╒', '╤', '╕', '╞', '╪', '╡', '╘', '╧',
            '╛', '╓', '╥', '╖', '╟', '╫', '╢', '╙', '╨', '╜', '║', '═',
            '╭', '╮', '╰', '╯', '▓',
        ],
    ),
];

/// Whether `lead trail` lies in a range where cp950 and WHATWG Big5 disagree.
pub fn is_override(lead: u8, trail: u8) -> bool {
    matches!(
        (lead, trail),
        (0xC6, 0xA1..=0xFE) | (0xC7 | 0xC8, _) | (0xF9, 0xD6..=0xFE)
    )
}

/// cp950 character for an overridden pair; `None` where cp950 assigns nothing.
pub fn lookup(lead: u8, trail: u8) -> Option<char> {
    let code = u16::from_be_bytes([lead, trail]);
    RUNS.iter().find_map(|&(first, chars)| {
        let index = code.checked_sub(first)?;
        chars.get(usize::from(index)).copied()
    })
}
