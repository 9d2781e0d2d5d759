use crate::indented::IndentedDocument;

const RIBBON_LEN: usize = 20;

impl IndentedDocument {
    /// Pushes `"{pretext}{sep}{marker}{sep}{posttext}"` as a single line.
    pub fn marker_line(&mut self, marker: &str, pretext: &str, posttext: &str, sep: &str) {
        self.push(format!("{pretext}{sep}{marker}{sep}{posttext}"));
    }

    /// Opens a labeled section: `==================== header ====================`.
    pub fn start_section(&mut self, header: &str) {
        let ribbon = "=".repeat(RIBBON_LEN);
        self.marker_line(header, &ribbon, &ribbon, " ");
    }

    /// Closes a labeled section: `-------------------- footer --------------------`.
    pub fn end_section(&mut self, footer: &str) {
        let ribbon = "-".repeat(RIBBON_LEN);
        self.marker_line(footer, &ribbon, &ribbon, " ");
    }
}
