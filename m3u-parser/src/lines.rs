/// A trimmed, non-empty line of the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based position in the source, blank lines included
    pub number: usize,
    pub text: &'a str,
}

impl Line<'_> {
    pub fn is_comment(&self) -> bool {
        self.text.starts_with('#')
    }
}

pub fn normalize_lines(input: &str) -> Vec<Line<'_>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    input
        .lines()
        .enumerate()
        .map(|(index, text)| Line {
            number: index + 1,
            text: text.trim(),
        })
        .filter(|x| !x.text.is_empty())
        .collect()
}
