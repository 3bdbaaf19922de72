use serde::{Serialize, Serializer};

///
/// LikePattern
///
/// SQL `LIKE` pattern lowered to an anchored regular expression:
/// `%` matches any run of characters, `_` matches exactly one, and every
/// other character matches itself. Serializes as `[source, flags]`, the
/// form the engine's `$regex` operator accepts.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LikePattern {
    source: String,
    case_insensitive: bool,
}

impl LikePattern {
    #[must_use]
    pub fn new(like: &str, case_insensitive: bool) -> Self {
        let mut source = String::with_capacity(like.len() + 2);
        source.push('^');

        for ch in like.chars() {
            match ch {
                '%' => source.push_str(".*"),
                '_' => source.push('.'),
                '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^'
                | '$' => {
                    source.push('\\');
                    source.push(ch);
                }
                _ => source.push(ch),
            }
        }

        source.push('$');

        Self {
            source,
            case_insensitive,
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    // `s` lets `%` span newlines
    #[must_use]
    pub const fn flags(&self) -> &'static str {
        if self.case_insensitive { "is" } else { "s" }
    }
}

impl Serialize for LikePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.source(), self.flags()).serialize(serializer)
    }
}

///
/// TESTS
///
