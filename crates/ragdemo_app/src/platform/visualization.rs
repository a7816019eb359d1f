use ragdemo_core::{PointKind, Visualization, VizPoint};

const MAX_LISTED_POINTS: usize = 8;
const SNIPPET_CHARS: usize = 60;

/// Holds the latest retrieval visualization forwarded from a chat answer.
#[derive(Debug, Default)]
pub struct VisualizationPane {
    current: Option<Visualization>,
}

impl VisualizationPane {
    pub fn receive(&mut self, visualization: Visualization) {
        self.current = Some(visualization);
    }

    pub fn current(&self) -> Option<&Visualization> {
        self.current.as_ref()
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let Some(viz) = self.current() else {
            return vec!["No visualization yet; ask a question first.".to_string()];
        };
        if viz.is_empty() {
            return vec!["Last answer retrieved no chunks.".to_string()];
        }

        let mut lines = Vec::new();
        match &viz.query_point {
            Some(point) => lines.push(format!("query  {}", coordinates(point))),
            None => lines.push("query  (not projected)".to_string()),
        }
        for point in viz.points.iter().take(MAX_LISTED_POINTS) {
            let source = point
                .metadata
                .iter()
                .find(|(key, _)| key == "source")
                .map(|(_, value)| format!(" [{value}]"))
                .unwrap_or_default();
            lines.push(format!(
                "{:<6} {}{} {}",
                kind_label(point.kind),
                coordinates(point),
                source,
                snippet(&point.text)
            ));
        }
        if viz.points.len() > MAX_LISTED_POINTS {
            lines.push(format!(
                "... {} more points",
                viz.points.len() - MAX_LISTED_POINTS
            ));
        }
        lines
    }
}

fn kind_label(kind: PointKind) -> &'static str {
    match kind {
        PointKind::Query => "query",
        PointKind::Doc => "doc",
        PointKind::Other => "point",
    }
}

fn coordinates(point: &VizPoint) -> String {
    format!("({:>7.3}, {:>7.3}, {:>7.3})", point.x, point.y, point.z)
}

fn snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SNIPPET_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(SNIPPET_CHARS).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> VizPoint {
        VizPoint {
            x: 1.0,
            y: -2.5,
            z: 0.0,
            kind: PointKind::Doc,
            text: text.to_string(),
            metadata: vec![("source".to_string(), "guide.md".to_string())],
        }
    }

    #[test]
    fn empty_pane_prompts_for_a_question() {
        let pane = VisualizationPane::default();
        assert!(pane.current().is_none());
        assert_eq!(pane.summary_lines().len(), 1);
    }

    #[test]
    fn latest_payload_replaces_previous() {
        let mut pane = VisualizationPane::default();
        pane.receive(Visualization {
            query_point: None,
            points: vec![doc("first")],
        });
        pane.receive(Visualization::default());
        assert_eq!(pane.current(), Some(&Visualization::default()));
        assert_eq!(
            pane.summary_lines(),
            vec!["Last answer retrieved no chunks.".to_string()]
        );
    }

    #[test]
    fn summary_lists_points_with_source_and_truncated_text() {
        let mut pane = VisualizationPane::default();
        let long = "word ".repeat(40);
        pane.receive(Visualization {
            query_point: None,
            points: vec![doc(&long)],
        });
        let lines = pane.summary_lines();
        assert_eq!(lines[0], "query  (not projected)");
        assert!(lines[1].starts_with("doc"));
        assert!(lines[1].contains("[guide.md]"));
        assert!(lines[1].ends_with("..."));
    }
}
