//! Tagged content model for render-ready text.
//!
//! A [`Markup`] is a sequence of literal text runs and color tokens. Because the
//! two are kept apart, the visible width of a line is the number of characters
//! in its text runs, with no need to strip escape sequences afterwards.
//!
//! Tokens are written in brackets, e.g. `"[green]done[reset]"`. Only names from
//! [`TAGS`] are recognised; any other bracketed text (`"[1/3]"`) stays literal.

use compact_str::CompactString;
use console::Style;

/// Recognised tag names and the `console` style fragment each one adds.
///
/// `reset` is handled separately and clears every active fragment.
pub const TAGS: &[(&str, &str)] = &[
    ("black", "black"),
    ("red", "red"),
    ("green", "green"),
    ("yellow", "yellow"),
    ("blue", "blue"),
    ("magenta", "magenta"),
    ("cyan", "cyan"),
    ("white", "white"),
    ("light_black", "black.bright"),
    ("light_red", "red.bright"),
    ("light_green", "green.bright"),
    ("light_yellow", "yellow.bright"),
    ("light_blue", "blue.bright"),
    ("light_magenta", "magenta.bright"),
    ("light_cyan", "cyan.bright"),
    ("light_white", "white.bright"),
    ("on_black", "on_black"),
    ("on_red", "on_red"),
    ("on_green", "on_green"),
    ("on_yellow", "on_yellow"),
    ("on_blue", "on_blue"),
    ("on_magenta", "on_magenta"),
    ("on_cyan", "on_cyan"),
    ("on_white", "on_white"),
    ("bold", "bold"),
    ("dim", "dim"),
    ("italic", "italic"),
    ("underline", "underlined"),
    ("blink", "blink"),
    ("reverse", "reverse"),
    ("hidden", "hidden"),
];

const RESET: &str = "reset";

/// One piece of a [`Markup`] line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    /// Printable text.
    Text(CompactString),
    /// Adds a style fragment (see [`TAGS`]) to the following text.
    Style(&'static str),
    /// Clears all active style fragments.
    Reset,
}

/// A line of text made of literal runs and color tokens.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Markup {
    tokens: Vec<Token>,
}

impl Markup {
    /// Creates an empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text`, turning known `[tag]`s into tokens when `decode` is set.
    ///
    /// With `decode` off the whole input is literal.
    #[must_use]
    pub fn parse(text: &str, decode: bool) -> Self {
        let mut markup = Self::new();
        if !decode {
            markup.push_str(text);
            return markup;
        }

        let mut rest = text;
        while let Some(open) = rest.find('[') {
            let Some(len) = rest[open..].find(']') else {
                break;
            };
            let name = &rest[open + 1..open + len];
            let token = if name == RESET {
                Some(Token::Reset)
            } else {
                TAGS.iter()
                    .find(|(tag, _)| *tag == name)
                    .map(|(_, fragment)| Token::Style(*fragment))
            };

            match token {
                Some(token) => {
                    markup.push_str(&rest[..open]);
                    markup.tokens.push(token);
                }
                None => markup.push_str(&rest[..=open + len]),
            }
            rest = &rest[open + len + 1..];
        }
        markup.push_str(rest);
        markup
    }

    /// Appends literal text, merging with a preceding text run.
    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Token::Text(last)) = self.tokens.last_mut() {
            last.push_str(text);
        } else {
            self.tokens.push(Token::Text(text.into()));
        }
    }

    /// Appends every token of `other`.
    pub fn push_markup(&mut self, other: &Self) {
        for token in &other.tokens {
            match token {
                Token::Text(text) => self.push_str(text),
                token => self.tokens.push(token.clone()),
            }
        }
    }

    /// Appends `other` `times` times.
    pub fn push_repeated(&mut self, other: &Self, times: usize) {
        for _ in 0..times {
            self.push_markup(other);
        }
    }

    /// Returns `true` if the line holds no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The tokens making up this line.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of terminal columns the line occupies.
    ///
    /// Every character of a text run counts as one column, color tokens as
    /// none.
    #[must_use]
    pub fn visible_width(&self) -> usize {
        self.tokens
            .iter()
            .map(|token| match token {
                Token::Text(text) => text.chars().count(),
                Token::Style(_) | Token::Reset => 0,
            })
            .sum()
    }

    /// The text without any styling.
    #[must_use]
    pub fn plain(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            if let Token::Text(text) = token {
                out.push_str(text);
            }
        }
        out
    }

    /// The text with color tokens expanded to ANSI escape sequences.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut active: Vec<&str> = Vec::new();

        for token in &self.tokens {
            match token {
                Token::Text(text) if active.is_empty() => out.push_str(text),
                Token::Text(text) => {
                    let style = Style::from_dotted_str(&active.join(".")).force_styling(true);
                    out.push_str(&style.apply_to(text.as_str()).to_string());
                }
                Token::Style(fragment) => active.push(*fragment),
                Token::Reset => active.clear(),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Markup, Token};

    #[test]
    fn test_parse_known_tags_only() {
        let markup = Markup::parse("[cyan][1/3][reset] Writing", true);

        assert_eq!(
            markup.tokens(),
            &[
                Token::Style("cyan"),
                Token::Text("[1/3]".into()),
                Token::Reset,
                Token::Text(" Writing".into()),
            ]
        );
        assert_eq!(markup.plain(), "[1/3] Writing");
        assert_eq!(markup.visible_width(), 13);
    }

    #[test]
    fn test_no_decoding_keeps_brackets() {
        let markup = Markup::parse("[green]=[reset]", false);
        assert_eq!(markup.plain(), "[green]=[reset]");
        assert_eq!(markup.render(), "[green]=[reset]");
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let markup = Markup::parse("50% [red", true);
        assert_eq!(markup.plain(), "50% [red");
    }

    #[test]
    fn test_render_emits_escapes_but_width_ignores_them() {
        let markup = Markup::parse("[green]██[reset]░", true);
        let rendered = markup.render();

        assert!(rendered.contains('\u{1b}'), "expected ANSI escapes: {rendered:?}");
        assert!(rendered.ends_with('░'));
        assert_eq!(markup.visible_width(), 3, "multi-byte glyphs count once");
    }

    #[test]
    fn test_push_merges_text_runs() {
        let mut line = Markup::new();
        line.push_str("a");
        line.push_repeated(&Markup::parse("=", true), 3);
        line.push_str("b");
        assert_eq!(line.tokens(), &[Token::Text("a===b".into())]);
    }
}
