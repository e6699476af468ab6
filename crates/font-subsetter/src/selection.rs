/// Either everything, or an explicit list of items.
///
/// Used for layout feature tags and unicode ranges, where `pyftsubset` spells
/// "everything" as `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Items(Vec<String>),
}

impl Selection {
    pub const ALL_ARG: &'static str = "*";

    /// Split on commas and whitespace, trimming and dropping empty pieces.
    ///
    /// A leading `*` or `all` means [`Selection::All`], whatever follows.
    /// An input with no items at all is also [`Selection::All`].
    ///
    /// ```
    /// use font_subsetter::Selection;
    ///
    /// assert_eq!(Selection::parse("*"), Selection::All);
    /// assert_eq!(
    ///     Selection::parse("kern, liga"),
    ///     Selection::Items(vec!["kern".into(), "liga".into()])
    /// );
    /// ```
    pub fn parse(text: &str) -> Self {
        Self::from_items(
            text.split(|c: char| c == ',' || c.is_whitespace())
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string),
        )
    }

    /// Build from already separated items, applying the same sentinel rules.
    pub fn from_items(items: impl IntoIterator<Item = String>) -> Self {
        let items: Vec<String> = items.into_iter().collect();
        match items.first().map(String::as_str) {
            None | Some("*") | Some("all") => Selection::All,
            Some(_) => Selection::Items(items),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// The `pyftsubset` argument value: `*` or a comma-joined list.
    pub fn to_arg(&self) -> String {
        match self {
            Selection::All => Self::ALL_ARG.to_string(),
            Selection::Items(items) => items.join(","),
        }
    }
}
