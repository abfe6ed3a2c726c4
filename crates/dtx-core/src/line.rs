//! Text lines and ordered sequences.

/// One animated line: final text plus an opaque presentation label.
///
/// The label (`style_tag`) is carried through to snapshots unchanged and
/// never interpreted by the reveal logic; renderers map it to whatever
/// styling they like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    content: String,
    style_tag: String,
}

impl TextLine {
    /// Create a line with an empty style tag.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style_tag: String::new(),
        }
    }

    /// Attach a presentation label.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.style_tag = tag.into();
        self
    }

    /// The final revealed text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The opaque presentation label.
    pub fn style_tag(&self) -> &str {
        &self.style_tag
    }
}

/// Ordered list of [`TextLine`]s, played top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    lines: Vec<TextLine>,
}

impl Sequence {
    /// Create a sequence from its lines.
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the sequence has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&TextLine> {
        self.lines.get(index)
    }

    /// All lines in playback order.
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }
}

impl From<Vec<TextLine>> for Sequence {
    fn from(lines: Vec<TextLine>) -> Self {
        Self::new(lines)
    }
}

impl FromIterator<TextLine> for Sequence {
    fn from_iter<I: IntoIterator<Item = TextLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
