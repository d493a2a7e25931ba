use crate::model::filter::{FilterGroup, FilterKind};

/// Error type for headline filter strings. Positions are character offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unexpected end of filter, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("unexpected '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("empty alternative at position {position}")]
    EmptyAlternative { position: usize },
    #[error("unterminated quote starting at position {position}")]
    UnterminatedQuote { position: usize },
}

/// Parse a filter query into its AND-ed groups.
///
/// ```text
/// query    = group { whitespace group }
/// group    = [ "-" ] ( ":" name [ ":" values ] | words )
/// values   = value { "|" value }        value may be empty
/// words    = word { "|" word }
/// word     = quoted | bare
/// ```
pub fn parse_filter(input: &str) -> Result<Vec<FilterGroup>, FilterError> {
    let mut parser = FilterParser {
        chars: input.chars().collect(),
        pos: 0,
    };
    let groups = parser.parse_query();
    if let Err(ref e) = groups {
        log::debug!("filter {:?} rejected: {}", input, e);
    }
    groups
}

struct FilterParser {
    chars: Vec<char>,
    pos: usize,
}

impl FilterParser {
    fn parse_query(&mut self) -> Result<Vec<FilterGroup>, FilterError> {
        let mut groups = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                return Ok(groups);
            }
            groups.push(self.parse_group()?);
            match self.peek() {
                None => return Ok(groups),
                Some(c) if c.is_whitespace() => {}
                Some(found) => {
                    return Err(FilterError::UnexpectedChar {
                        found,
                        position: self.pos,
                    });
                }
            }
        }
    }

    fn parse_group(&mut self) -> Result<FilterGroup, FilterError> {
        let exclude = self.eat('-');
        let kind = match self.peek() {
            None => {
                return Err(FilterError::UnexpectedEnd {
                    expected: "a filter term",
                });
            }
            Some(':') => {
                self.pos += 1;
                self.parse_tag_or_property()?
            }
            Some(_) => self.parse_text()?,
        };
        Ok(FilterGroup { kind, exclude })
    }

    fn parse_tag_or_property(&mut self) -> Result<FilterKind, FilterError> {
        let start = self.pos;
        let name = self.take_while(|c| !c.is_whitespace() && !matches!(c, '|' | ':' | '"'));
        if name.is_empty() {
            return match self.peek() {
                None => Err(FilterError::UnexpectedEnd {
                    expected: "a tag or property name",
                }),
                Some(_) => Err(FilterError::EmptyAlternative { position: start }),
            };
        }

        if self.eat(':') {
            let mut words = vec![self.parse_value()?];
            while self.eat('|') {
                words.push(self.parse_value()?);
            }
            return Ok(FilterKind::Property {
                property: name,
                words,
            });
        }

        let mut words = vec![name];
        while self.eat('|') {
            let position = self.pos;
            let tag = self.take_while(|c| !c.is_whitespace() && !matches!(c, '|' | ':' | '"'));
            if tag.is_empty() {
                return Err(FilterError::EmptyAlternative { position });
            }
            words.push(tag);
        }
        Ok(FilterKind::Tag { words })
    }

    /// A property value. Empty is allowed and matches any value.
    fn parse_value(&mut self) -> Result<String, FilterError> {
        if self.peek() == Some('"') {
            return self.parse_quoted();
        }
        Ok(self.take_while(|c| !c.is_whitespace() && !matches!(c, '|' | '"')))
    }

    fn parse_text(&mut self) -> Result<FilterKind, FilterError> {
        let mut words = vec![self.parse_word()?];
        while self.eat('|') {
            words.push(self.parse_word()?);
        }
        let case_sensitive = words[0].chars().next().is_some_and(char::is_uppercase);
        Ok(if case_sensitive {
            FilterKind::CaseSensitive { words }
        } else {
            FilterKind::IgnoreCase { words }
        })
    }

    fn parse_word(&mut self) -> Result<String, FilterError> {
        let position = self.pos;
        let word = if self.peek() == Some('"') {
            self.parse_quoted()?
        } else {
            self.take_while(|c| !c.is_whitespace() && !matches!(c, '|' | '"'))
        };
        if word.is_empty() {
            return match self.peek() {
                None => Err(FilterError::UnexpectedEnd {
                    expected: "a word",
                }),
                Some(_) => Err(FilterError::EmptyAlternative { position }),
            };
        }
        Ok(word)
    }

    fn parse_quoted(&mut self) -> Result<String, FilterError> {
        let open = self.pos;
        self.pos += 1;
        let contents = self.take_while(|c| c != '"');
        if !self.eat('"') {
            return Err(FilterError::UnterminatedQuote { position: open });
        }
        Ok(contents)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }
}
