//! Minimal tokenizer for the INI-style files the analyzer exports.
//!
//! The format is loose: `[Section]` headers, `key=value` entries, and raw
//! lines (the `F:<freq>,<value>` curve points) that carry no `=` at all.
//! We keep line numbers around so the loader can point at bad input.

/// One non-empty, non-comment line inside a section
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    Entry { key: &'a str, value: &'a str },
    Raw(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    /// Empty for lines that appear before the first header
    pub name: &'a str,
    /// (1-based line number, content)
    pub lines: Vec<(usize, Line<'a>)>,
}

impl<'a> Section<'a> {
    /// Case-insensitive key lookup returning the line number too, first match wins
    pub fn entry(&self, key: &str) -> Option<(usize, &'a str)> {
        self.lines.iter().find_map(|(n, line)| match line {
            Line::Entry { key: k, value } if k.eq_ignore_ascii_case(key) => Some((*n, *value)),
            _ => None,
        })
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entry(key).map(|(_, value)| value)
    }

    pub fn raw_lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines.iter().filter_map(|(n, line)| match line {
            Line::Raw(text) => Some((*n, *text)),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document<'a> {
    pub sections: Vec<Section<'a>>,
}

impl<'a> Document<'a> {
    pub fn parse(text: &'a str) -> Self {
        let mut sections: Vec<Section<'a>> = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                sections.push(Section {
                    name: name.trim(),
                    lines: Vec::new(),
                });
                continue;
            }
            let parsed = match line.split_once('=') {
                Some((key, value)) => Line::Entry {
                    key: key.trim(),
                    value: value.trim(),
                },
                None => Line::Raw(line),
            };
            if sections.is_empty() {
                sections.push(Section {
                    name: "",
                    lines: Vec::new(),
                });
            }
            // Safe, we just made sure there is at least one section
            if let Some(current) = sections.last_mut() {
                current.lines.push((idx + 1, parsed));
            }
        }
        Self { sections }
    }

    /// Case-insensitive section lookup, first match wins
    pub fn section(&self, name: &str) -> Option<&Section<'a>> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Look for a key in the named section first, then anywhere in the file
    pub fn find_key(&self, preferred: &str, key: &str) -> Option<&'a str> {
        self.section(preferred)
            .and_then(|s| s.get(key))
            .or_else(|| self.sections.iter().find_map(|s| s.get(key)))
    }
}
