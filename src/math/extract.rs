/// A maximal run of expression-like characters and its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionCandidate<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Scans `text` for candidate expressions, in order of appearance.
pub fn candidates(text: &str) -> Candidates<'_> {
    Candidates { text, pos: 0 }
}

#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Candidates<'a> {
    type Item = ExpressionCandidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let base = self.pos;
        let mut prev = self.text[..base].chars().next_back();
        let mut chars = self.text[base..].char_indices().peekable();
        let mut start = None;
        let mut end = self.text.len();

        while let Some((idx, ch)) = chars.next() {
            let next = chars.peek().map(|&(_, c)| c);
            let member = is_candidate_char(prev, ch, next);
            match (start, member) {
                (None, true) => start = Some(base + idx),
                (Some(_), false) => {
                    end = base + idx;
                    break;
                }
                _ => {}
            }
            prev = Some(ch);
        }

        self.pos = end;
        let start = start?;
        Some(ExpressionCandidate {
            text: &self.text[start..end],
            start,
            end,
        })
    }
}

fn is_candidate_char(prev: Option<char>, ch: char, next: Option<char>) -> bool {
    match ch {
        '0'..='9' | '.' | '+' | '-' | '*' | '/' | '(' | ')' => true,
        // Glyphs the normalizer rewrites or cuts at.
        '=' | '—' | '÷' | '×' => true,
        // A variable only when it stands apart from ordinary words ("2x", not "box").
        'x' | 'y' => {
            !prev.is_some_and(char::is_alphabetic) && !next.is_some_and(char::is_alphabetic)
        }
        c => c.is_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(input: &str) -> Vec<&str> {
        candidates(input).map(|candidate| candidate.text).collect()
    }

    #[test]
    fn finds_maximal_runs_in_order() {
        assert_eq!(texts("Solve: 3 + 4 * 2 = ?"), vec![" 3 + 4 * 2 = "]);
        assert_eq!(texts("a 1+1 b (2)"), vec![" 1+1 ", " (2)"]);
    }

    #[test]
    fn spans_point_into_source() {
        let text = "Total: 12 ÷ 4";
        let found: Vec<_> = candidates(text).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], found[0].text);
        assert_eq!(found[0].text, " 12 ÷ 4");
    }

    #[test]
    fn keeps_standalone_variables_only() {
        assert_eq!(texts("2x + 3 = 7"), vec!["2x + 3 = 7"]);
        assert_eq!(texts("box"), Vec::<&str>::new());
        assert_eq!(texts("y"), vec!["y"]);
    }

    #[test]
    fn text_without_candidate_characters_yields_nothing() {
        assert_eq!(texts("abc"), Vec::<&str>::new());
        assert_eq!(texts(""), Vec::<&str>::new());
    }
}
