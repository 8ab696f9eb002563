use scraper::ElementRef;

/// Collapses every whitespace run to a single space and trims both ends.
pub fn tidy(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of a table cell: descendant text nodes concatenated as-is, then tidied.
pub fn cell_text(element: &ElementRef) -> String {
    tidy(&element.text().collect::<String>())
}

/// Text of a card block: descendant text nodes joined with single spaces, then tidied.
pub fn block_text(element: &ElementRef) -> String {
    tidy(&element.text().collect::<Vec<_>>().join(" "))
}
