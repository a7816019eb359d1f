use ragdemo_core::{DocSection, SectionTop};

use super::constants::{LINE_HEIGHT_PX, SECTION_GAP_LINES};

#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionSpan {
    id: &'static str,
    start_line: usize,
}

/// A fixed-height window over the rendered documentation page.
///
/// The page is laid out once; scrolling only moves `offset`. Section tops
/// are measured relative to the window top, in pixels.
#[derive(Debug, Clone)]
pub struct DocsViewport {
    lines: Vec<String>,
    spans: Vec<SectionSpan>,
    height: usize,
    offset: usize,
}

impl DocsViewport {
    pub fn new(sections: &[DocSection], height: usize) -> Self {
        let mut lines = Vec::new();
        let mut spans = Vec::with_capacity(sections.len());
        for section in sections {
            spans.push(SectionSpan {
                id: section.id,
                start_line: lines.len(),
            });
            lines.push(format!("## {}", section.title));
            lines.push(section.description.to_string());
            lines.extend(section.body.iter().map(|line| format!("   {line}")));
            lines.extend(std::iter::repeat(String::new()).take(SECTION_GAP_LINES));
        }
        Self {
            lines,
            spans,
            height: height.max(1),
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Past the page end far enough for the last heading to reach the
    /// window top.
    fn max_offset(&self) -> usize {
        let last_start = self.spans.last().map_or(0, |span| span.start_line);
        self.lines.len().saturating_sub(self.height).max(last_start)
    }

    /// Moves the window by `delta` lines, clamped to the page, and returns
    /// the measured section tops.
    pub fn scroll_by(&mut self, delta: i64) -> Vec<SectionTop> {
        let target = (self.offset as i64).saturating_add(delta);
        self.offset = target.clamp(0, self.max_offset() as i64) as usize;
        self.tops()
    }

    /// Brings the section heading to the window top. Returns false for an
    /// unknown id.
    pub fn scroll_to(&mut self, section_id: &str) -> bool {
        let Some(span) = self.spans.iter().find(|span| span.id == section_id) else {
            return false;
        };
        self.offset = span.start_line.min(self.max_offset());
        true
    }

    pub fn tops(&self) -> Vec<SectionTop> {
        self.spans
            .iter()
            .map(|span| {
                let relative = span.start_line as f64 - self.offset as f64;
                SectionTop::new(span.id, relative * LINE_HEIGHT_PX)
            })
            .collect()
    }

    pub fn visible_lines(&self) -> &[String] {
        let end = (self.offset + self.height).min(self.lines.len());
        &self.lines[self.offset..end]
    }

    /// Ids of sections with at least one line inside the window.
    pub fn visible_sections(&self) -> Vec<&'static str> {
        let window = self.offset..self.offset + self.height;
        self.spans
            .iter()
            .enumerate()
            .filter(|(index, span)| {
                let end = self
                    .spans
                    .get(index + 1)
                    .map_or(self.lines.len(), |next| next.start_line);
                span.start_line < window.end && end > window.start
            })
            .map(|(_, span)| span.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::platform::ui::constants::DOCS_VIEWPORT_LINES;
    use ragdemo_core::{update, AppState, Msg, DOC_SECTIONS};

    const SECTIONS: &[DocSection] = &[
        DocSection {
            id: "alpha",
            label: "Alpha",
            title: "Alpha",
            description: "first",
            body: &["a1", "a2", "a3"],
        },
        DocSection {
            id: "beta",
            label: "Beta",
            title: "Beta",
            description: "second",
            body: &["b1"],
        },
        DocSection {
            id: "gamma",
            label: "Gamma",
            title: "Gamma",
            description: "third",
            body: &["c1", "c2"],
        },
    ];

    #[test]
    fn tops_are_pixel_offsets_from_window_top() {
        let mut viewport = DocsViewport::new(SECTIONS, 4);
        let tops = viewport.tops();
        assert_eq!(tops[0], SectionTop::new("alpha", 0.0));
        assert_eq!(tops[1], SectionTop::new("beta", 6.0 * LINE_HEIGHT_PX));

        let tops = viewport.scroll_by(2);
        assert_eq!(tops[0], SectionTop::new("alpha", -2.0 * LINE_HEIGHT_PX));
        assert_eq!(viewport.visible_lines()[0], "   a1");
    }

    #[test]
    fn scrolling_clamps_to_page() {
        let mut viewport = DocsViewport::new(SECTIONS, 4);
        viewport.scroll_by(-10);
        assert_eq!(viewport.offset(), 0);
        viewport.scroll_by(1_000);
        assert_eq!(viewport.offset(), 15 - 4);
        assert_eq!(viewport.visible_lines().len(), 4);
    }

    #[test]
    fn scroll_to_puts_last_heading_at_top() {
        let mut viewport = DocsViewport::new(SECTIONS, 8);
        assert!(viewport.scroll_to("beta"));
        assert_eq!(viewport.offset(), 6);
        assert!(viewport.scroll_to("gamma"));
        assert_eq!(viewport.offset(), 10);
        assert_eq!(viewport.visible_lines().len(), 5);
        assert!(!viewport.scroll_to("delta"));
        assert_eq!(viewport.offset(), 10);
    }

    #[test]
    fn scrolling_to_the_end_activates_last_section() {
        let mut viewport = DocsViewport::new(DOC_SECTIONS, DOCS_VIEWPORT_LINES);
        let tops = viewport.scroll_by(10_000);
        let last = DOC_SECTIONS[DOC_SECTIONS.len() - 1].id;
        assert_eq!(tops.last(), Some(&SectionTop::new(last, 0.0)));

        let (state, _) = update(AppState::new(), Msg::DocsScrolled(tops));
        assert_eq!(state.view().docs.active, "troubleshooting");
    }

    #[test]
    fn every_section_can_be_scrolled_into_the_band() {
        let mut viewport = DocsViewport::new(DOC_SECTIONS, DOCS_VIEWPORT_LINES);
        let mut state = AppState::new();
        for section in DOC_SECTIONS {
            viewport.scroll_to(section.id);
            let tops = viewport.scroll_by(0);
            state = update(state, Msg::DocsScrolled(tops)).0;
            assert_eq!(state.view().docs.active, section.id);
        }
    }

    #[test]
    fn visible_sections_cover_window() {
        let mut viewport = DocsViewport::new(SECTIONS, 4);
        assert_eq!(viewport.visible_sections(), vec!["alpha"]);
        viewport.scroll_by(4);
        assert_eq!(viewport.visible_sections(), vec!["alpha", "beta"]);
    }

    #[test]
    fn scrolled_tops_drive_active_section() {
        let mut viewport = DocsViewport::new(DOC_SECTIONS, 18);
        let second = DOC_SECTIONS[1].id;
        viewport.scroll_to(second);
        let tops = viewport.scroll_by(0);

        let (state, effects) = update(AppState::new(), Msg::DocsScrolled(tops));
        assert!(effects.is_empty());
        assert_eq!(state.view().docs.active, second);
    }
}
