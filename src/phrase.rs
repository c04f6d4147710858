use crate::registry;

/// A resolved keystroke phrase: `[count] key [modifier]`.
///
/// A count of 0 means no count was typed; handlers treat it as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase {
    pub count: u32,
    pub key: char,
    pub modifier: Option<char>,
}

/// Outcome of parsing the keys typed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseStatus {
    /// The phrase names a command and can be dispatched.
    Success(Phrase),
    /// The phrase is a valid prefix; wait for more keys.
    NeedMore,
    /// The phrase can never become valid; discard it.
    Failed,
}

/// Incremental parser for normal-mode phrases.
///
/// Accepted shapes, tried in order:
///
/// | input            | result                              |
/// |------------------|-------------------------------------|
/// | `2dw`            | count 2, key `d`, modifier `w`      |
/// | `3j`             | count 3, key `j`                    |
/// | `5`              | need more (but `0` alone is a key)  |
/// | `d2w`            | count 2, key `d`, modifier `w`      |
/// | `d2`             | need more                           |
/// | `dw`             | key `d`, modifier `w`               |
/// | `x`              | key `x`                             |
pub struct PhraseParser;

impl PhraseParser {
    pub fn parse(input: &str, selection_active: bool) -> PhraseStatus {
        let phrase = match Self::scan(input) {
            Scan::Phrase(phrase) => phrase,
            Scan::NeedMore => return PhraseStatus::NeedMore,
        };

        let Some(command) = registry::lookup(phrase.key) else {
            return PhraseStatus::Failed;
        };

        // Operators wait for their motion, unless a selection supplies the range.
        if phrase.modifier.is_none()
            && command.requires_modifier()
            && !(command.is_visual() && selection_active)
        {
            return PhraseStatus::NeedMore;
        }

        PhraseStatus::Success(phrase)
    }

    fn scan(input: &str) -> Scan {
        let chars: Vec<char> = input.chars().collect();
        let Some(&first) = chars.first() else {
            return Scan::NeedMore;
        };

        if first.is_ascii_digit() {
            let (count, rest) = read_count(&chars);
            return match rest {
                [] if count == 0 => Scan::Phrase(Phrase {
                    count: 0,
                    key: '0',
                    modifier: None,
                }),
                [] => Scan::NeedMore,
                [key] => Scan::Phrase(Phrase {
                    count,
                    key: *key,
                    modifier: None,
                }),
                [key, modifier, ..] => Scan::Phrase(Phrase {
                    count,
                    key: *key,
                    modifier: Some(*modifier),
                }),
            };
        }

        let rest = &chars[1..];
        match rest {
            [] => Scan::Phrase(Phrase {
                count: 0,
                key: first,
                modifier: None,
            }),
            [digit, ..] if digit.is_ascii_digit() => match read_count(rest) {
                (_, []) => Scan::NeedMore,
                (count, [modifier, ..]) => Scan::Phrase(Phrase {
                    count,
                    key: first,
                    modifier: Some(*modifier),
                }),
            },
            [modifier, ..] => Scan::Phrase(Phrase {
                count: 0,
                key: first,
                modifier: Some(*modifier),
            }),
        }
    }
}

enum Scan {
    Phrase(Phrase),
    NeedMore,
}

/// Reads leading ASCII digits as a saturating count.
fn read_count(chars: &[char]) -> (u32, &[char]) {
    let digits = chars.iter().take_while(|c| c.is_ascii_digit()).count();
    let count = chars[..digits].iter().fold(0u32, |acc, c| {
        acc.saturating_mul(10)
            .saturating_add(c.to_digit(10).unwrap_or(0))
    });
    (count, &chars[digits..])
}
